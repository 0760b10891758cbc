//! SES HTTP 请求方法（Query API：表单 POST，XML 响应）

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::providers::aws_error::parse_xml_error;
use crate::providers::sigv4::{amz_date_now, canonical_query};
use crate::traits::{ErrorContext, ProviderErrorMapper};

use super::{API_VERSION, SesProvider};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

impl SesProvider {
    fn handle_response_error(&self, status: u16, response_text: &str, ctx: ErrorContext) -> Result<()> {
        if (200..300).contains(&status) {
            return Ok(());
        }

        let raw = parse_xml_error(status, response_text);
        if raw.code.is_some() {
            Err(self.map_error(raw, ctx))
        } else {
            Err(self.unknown_error(raw))
        }
    }

    /// 执行一次 Query API 调用
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        action: &str,
        params: &[(&str, &str)],
        ctx: ErrorContext,
    ) -> Result<T> {
        let mut form: Vec<(&str, &str)> = vec![("Action", action), ("Version", API_VERSION)];
        form.extend_from_slice(params);
        let payload = canonical_query(&form);

        log::debug!("Request Body: {payload}");

        let amz_date = amz_date_now();
        let mut headers = self.signer.base_headers(&self.host, &amz_date);
        headers.push(("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string()));
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
            action,
            self.max_retries,
        )
        .await?;

        self.handle_response_error(status, &response_text, ctx)?;
        HttpUtils::parse_xml(&response_text, self.service_name())
    }
}
