//! ACM JSON 请求/响应结构

use serde::{Deserialize, Serialize};

// ============ 请求 ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListCertificatesRequest<'a> {
    pub certificate_statuses: &'a [&'a str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeCertificateRequest<'a> {
    pub certificate_arn: &'a str,
}

// ============ 响应 ============

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListCertificatesResponse {
    #[serde(default)]
    pub certificate_summary_list: Vec<CertificateSummaryJson>,
    pub next_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CertificateSummaryJson {
    pub certificate_arn: String,
    #[serde(default)]
    pub domain_name: String,
    pub status: Option<String>,
    /// 秒级时间戳（可带小数）
    #[serde(default, with = "crate::utils::datetime")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeCertificateResponse {
    pub certificate: CertificateJson,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CertificateJson {
    pub certificate_arn: String,
    #[serde(default)]
    pub domain_name: String,
    #[serde(rename = "Type", default)]
    pub certificate_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub domain_validation_options: Vec<DomainValidationJson>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DomainValidationJson {
    pub domain_name: String,
    pub validation_status: Option<String>,
    pub validation_method: Option<String>,
    pub resource_record: Option<ResourceRecordJson>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceRecordJson {
    pub name: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    pub value: String,
}
