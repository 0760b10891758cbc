//! ACM HTTP 请求方法（JSON 1.1：`X-Amz-Target` 指定操作）

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::providers::aws_error::parse_json_error;
use crate::providers::sigv4::amz_date_now;
use crate::traits::{ErrorContext, ProviderErrorMapper};

use super::{AcmProvider, TARGET_PREFIX};

const JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";

impl AcmProvider {
    fn handle_response_error(&self, status: u16, response_text: &str, ctx: ErrorContext) -> Result<()> {
        if (200..300).contains(&status) {
            return Ok(());
        }

        let raw = parse_json_error(status, response_text);
        if raw.code.is_some() {
            Err(self.map_error(raw, ctx))
        } else {
            Err(self.unknown_error(raw))
        }
    }

    /// 执行一次 JSON 1.1 调用
    pub(crate) async fn call<T: DeserializeOwned, B: Serialize>(
        &self,
        operation: &str,
        body: &B,
        ctx: ErrorContext,
    ) -> Result<T> {
        let payload = serde_json::to_string(body).map_err(|e| self.serialization_error(e))?;

        log::debug!("Request Body: {payload}");

        let target = format!("{TARGET_PREFIX}.{operation}");
        let amz_date = amz_date_now();
        let mut headers = self.signer.base_headers(&self.host, &amz_date);
        headers.push(("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string()));
        headers.push(("X-Amz-Target".to_string(), target));
        let authorization = self.signer.sign("POST", "/", "", &headers, &payload, &amz_date);

        let url = format!("https://{}/", self.host);
        let mut request = self.client.post(&url);
        for (name, value) in &headers {
            request = request.header(name.as_str(), value.as_str());
        }
        let request = request.header("Authorization", authorization).body(payload);

        let (status, response_text) = HttpUtils::execute_request_with_retry(
            request,
            self.service_name(),
            operation,
            self.max_retries,
        )
        .await?;

        self.handle_response_error(status, &response_text, ctx)?;
        HttpUtils::parse_json(&response_text, self.service_name())
    }
}
