//! ACM 错误映射
//!
//! 参考: <https://docs.aws.amazon.com/acm/latest/APIReference/CommonErrors.html>

use crate::error::ProviderError;
use crate::providers::aws_error::map_common_error;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::AcmProvider;

impl ProviderErrorMapper for AcmProvider {
    fn service_name(&self) -> &'static str {
        "acm"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        if let Some(err) = map_common_error(self.service_name(), &raw) {
            return err;
        }

        match raw.code.as_deref() {
            Some("ResourceNotFoundException") => ProviderError::ResourceNotFound {
                service: self.service_name().to_string(),
                resource: context.resource.unwrap_or_default(),
                raw_message: Some(raw.message),
            },
            Some(
                "InvalidArnException"
                | "InvalidArgsException"
                | "InvalidParameterException"
                | "ValidationException",
            ) => ProviderError::InvalidParameter {
                service: self.service_name().to_string(),
                param: context.resource.unwrap_or_else(|| "request".to_string()),
                detail: raw.message,
            },
            Some("LimitExceededException") => ProviderError::QuotaExceeded {
                service: self.service_name().to_string(),
                raw_message: Some(raw.message),
            },
            _ => self.unknown_error(raw),
        }
    }
}
