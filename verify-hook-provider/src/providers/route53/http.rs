//! Route 53 HTTP 请求方法（REST + XML）

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::providers::aws_error::parse_xml_error;
use crate::providers::sigv4::{amz_date_now, canonical_query};
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::types::ChangeBatch;

use super::types::{ChangeResourceRecordSetsRequest, InvalidChangeBatchXml};
use super::{API_VERSION, Route53Provider, XML_NAMESPACE};

impl Route53Provider {
    // ==================== 辅助方法 ====================

    /// 统一处理 Route 53 响应错误
    ///
    /// 两种错误体：常规 `ErrorResponse`，以及批量变更被拒时的 `InvalidChangeBatch`。
    fn handle_response_error(&self, status: u16, response_text: &str, ctx: ErrorContext) -> Result<()> {
        if (200..300).contains(&status) {
            return Ok(());
        }

        if let Ok(batch) = quick_xml::de::from_str::<InvalidChangeBatchXml>(response_text)
            && !batch.messages.message.is_empty()
        {
            return Err(self.map_error(
                RawApiError::with_code("InvalidChangeBatch", batch.messages.message.join("; ")),
                ctx,
            ));
        }

        let raw = parse_xml_error(status, response_text);
        if raw.code.is_some() {
            Err(self.map_error(raw, ctx))
        } else {
            Err(self.unknown_error(raw))
        }
    }

    fn path(&self, resource: &str) -> String {
        format!("/{API_VERSION}/{resource}")
    }

    // ==================== 公开 API 方法 ====================

    /// 执行签名 GET 请求
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &[(&str, &str)],
        ctx: ErrorContext,
    ) -> Result<T> {
        let path = self.path(resource);
        let query = canonical_query(params);
        let amz_date = amz_date_now();

        let headers = self.signer.base_headers(&self.host, &amz_date);
        let authorization = self.signer.sign("GET", &path, &query, &headers, "", &amz_date);

        let url = if query.is_empty() {
            format!("https://{}{path}", self.host)
        } else {
            format!("https://{}{path}?{query}", self.host)
        };

        let mut request = self.client.get(&url);
        for (name, value) in &headers {
            request = request.header(name.as_str(), value.as_str());
        }
        let request = request.header("Authorization", authorization);

        let (status, response_text) = HttpUtils::execute_request_with_retry(
            request,
            self.service_name(),
            &format!("GET {path}"),
            self.max_retries,
        )
        .await?;

        self.handle_response_error(status, &response_text, ctx)?;
        HttpUtils::parse_xml(&response_text, self.service_name())
    }

    /// 提交变更批次（POST XML body）
    pub(crate) async fn post_change_batch<T: DeserializeOwned>(
        &self,
        zone_id: &str,
        batch: &ChangeBatch,
        ctx: ErrorContext,
    ) -> Result<T> {
        let body = ChangeResourceRecordSetsRequest::new(XML_NAMESPACE, batch);
        let payload = quick_xml::se::to_string(&body).map_err(|e| self.serialization_error(e))?;
        let payload = format!(r#"<?xml version="1.0" encoding="UTF-8"?>{payload}"#);

        log::debug!("Request Body: {payload}");

        let path = self.path(&format!("hostedzone/{zone_id}/rrset/"));
        let amz_date = amz_date_now();

        let mut headers = self.signer.base_headers(&self.host, &amz_date);
        headers.push(("Content-Type".to_string(), "application/xml".to_string()));
        let authorization = self.signer.sign("POST", &path, "", &headers, &payload, &amz_date);

        let url = format!("https://{}{path}", self.host);
        let mut request = self.client.post(&url);
        for (name, value) in &headers {
            request = request.header(name.as_str(), value.as_str());
        }
        let request = request.header("Authorization", authorization).body(payload);

        let (status, response_text) = HttpUtils::execute_request_with_retry(
            request,
            self.service_name(),
            &format!("POST {path}"),
            self.max_retries,
        )
        .await?;

        self.handle_response_error(status, &response_text, ctx)?;
        HttpUtils::parse_xml(&response_text, self.service_name())
    }
}
