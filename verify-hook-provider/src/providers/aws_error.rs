//! AWS 通用错误解析与分类
//!
//! Route 53 与 SES 返回 XML 错误信封，ACM 返回 JSON `__type` 错误；
//! 认证、权限、限流类错误码在三个服务间通用，统一在此分类。

use serde::Deserialize;

use crate::error::ProviderError;
use crate::traits::RawApiError;

/// `<ErrorResponse><Error><Code/><Message/></Error></ErrorResponse>`
#[derive(Debug, Deserialize)]
struct XmlErrorResponse {
    #[serde(rename = "Error")]
    error: XmlErrorDetail,
}

#[derive(Debug, Deserialize)]
struct XmlErrorDetail {
    #[serde(rename = "Code")]
    code: String,
    #[serde(rename = "Message", default)]
    message: Option<String>,
}

/// `{"__type": "...#ResourceNotFoundException", "message": "..."}`
#[derive(Debug, Deserialize)]
struct JsonErrorResponse {
    #[serde(rename = "__type")]
    error_type: String,
    #[serde(default, alias = "Message")]
    message: Option<String>,
}

/// 解析 XML 错误信封；无法解析时回退为带 HTTP 状态的原始消息
pub(crate) fn parse_xml_error(status: u16, body: &str) -> RawApiError {
    match quick_xml::de::from_str::<XmlErrorResponse>(body) {
        Ok(resp) => RawApiError::with_code(resp.error.code, resp.error.message.unwrap_or_default()),
        Err(_) => RawApiError::new(format!("HTTP {status}: {body}")),
    }
}

/// 解析 JSON 错误；`__type` 可能带 `namespace#` 前缀
pub(crate) fn parse_json_error(status: u16, body: &str) -> RawApiError {
    match serde_json::from_str::<JsonErrorResponse>(body) {
        Ok(resp) => {
            let code = resp
                .error_type
                .rsplit('#')
                .next()
                .unwrap_or(&resp.error_type)
                .to_string();
            RawApiError::with_code(code, resp.message.unwrap_or_default())
        }
        Err(_) => RawApiError::new(format!("HTTP {status}: {body}")),
    }
}

/// 通用错误码分类（认证 / 权限 / 限流），未命中返回 `None`
pub(crate) fn map_common_error(service: &str, raw: &RawApiError) -> Option<ProviderError> {
    let code = raw.code.as_deref()?;
    let message = Some(raw.message.clone());
    match code {
        "InvalidClientTokenId"
        | "UnrecognizedClientException"
        | "SignatureDoesNotMatch"
        | "IncompleteSignature"
        | "MissingAuthenticationToken"
        | "ExpiredToken"
        | "ExpiredTokenException"
        | "InvalidSignatureException" => Some(ProviderError::InvalidCredentials {
            service: service.to_string(),
            raw_message: message,
        }),
        "AccessDenied" | "AccessDeniedException" | "OptInRequired" => {
            Some(ProviderError::PermissionDenied {
                service: service.to_string(),
                raw_message: message,
            })
        }
        "Throttling" | "ThrottlingException" | "PriorRequestNotComplete" | "RequestLimitExceeded" => {
            Some(ProviderError::RateLimited {
                service: service.to_string(),
                retry_after: None,
                raw_message: message,
            })
        }
        "ServiceUnavailable" | "InternalFailure" | "InternalError" => {
            Some(ProviderError::NetworkError {
                service: service.to_string(),
                detail: raw.message.clone(),
            })
        }
        _ => None,
    }
}
