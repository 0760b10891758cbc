//! Route 53 错误映射
//!
//! 参考: <https://docs.aws.amazon.com/Route53/latest/APIReference/CommonErrors.html>
//!
//! - **托管区不存在**：`NoSuchHostedZone`
//! - **批量变更被拒**：`InvalidChangeBatch`（删除不存在的记录、值不匹配等）
//! - **参数错误**：`InvalidInput`, `InvalidDomainName`, `InvalidArgument`
//! - **配额**：`TooManyHostedZones`, `LimitsExceeded`
//! - 认证、权限、限流走 [`map_common_error`]

use crate::error::ProviderError;
use crate::providers::aws_error::map_common_error;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::Route53Provider;

impl ProviderErrorMapper for Route53Provider {
    fn service_name(&self) -> &'static str {
        "route53"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        if let Some(err) = map_common_error(self.service_name(), &raw) {
            return err;
        }

        match raw.code.as_deref() {
            Some("NoSuchHostedZone" | "HostedZoneNotFound") => ProviderError::ZoneNotFound {
                service: self.service_name().to_string(),
                zone_id: context.zone_id.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            Some("InvalidChangeBatch") => ProviderError::InvalidChangeBatch {
                service: self.service_name().to_string(),
                zone_id: context.zone_id.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            Some("InvalidInput" | "InvalidDomainName" | "InvalidArgument") => {
                ProviderError::InvalidParameter {
                    service: self.service_name().to_string(),
                    param: context.resource.unwrap_or_else(|| "request".to_string()),
                    detail: raw.message,
                }
            }

            Some("TooManyHostedZones" | "LimitsExceeded") => ProviderError::QuotaExceeded {
                service: self.service_name().to_string(),
                raw_message: Some(raw.message),
            },

            _ => self.unknown_error(raw),
        }
    }
}
