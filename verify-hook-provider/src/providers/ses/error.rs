//! SES 错误映射
//!
//! 参考: <https://docs.aws.amazon.com/ses/latest/APIReference/CommonErrors.html>

use crate::error::ProviderError;
use crate::providers::aws_error::map_common_error;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::SesProvider;

impl ProviderErrorMapper for SesProvider {
    fn service_name(&self) -> &'static str {
        "ses"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        if let Some(err) = map_common_error(self.service_name(), &raw) {
            return err;
        }

        match raw.code.as_deref() {
            Some("InvalidParameterValue" | "InvalidParameterCombination" | "MissingParameter") => {
                ProviderError::InvalidParameter {
                    service: self.service_name().to_string(),
                    param: context.resource.unwrap_or_else(|| "Domain".to_string()),
                    detail: raw.message,
                }
            }
            Some("LimitExceeded" | "LimitExceededException") => ProviderError::QuotaExceeded {
                service: self.service_name().to_string(),
                raw_message: Some(raw.message),
            },
            _ => self.unknown_error(raw),
        }
    }
}
