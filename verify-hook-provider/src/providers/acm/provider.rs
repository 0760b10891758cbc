//! ACM `CertificateApi` 实现

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::{CertificateApi, ErrorContext};
use crate::types::{
    CertificateDetail, CertificateSummary, DomainValidation, PENDING_VALIDATION, Page,
    ValidationRecord,
};

use super::AcmProvider;
use super::types::{
    CertificateJson, DescribeCertificateRequest, DescribeCertificateResponse,
    ListCertificatesRequest, ListCertificatesResponse,
};

impl From<CertificateJson> for CertificateDetail {
    fn from(cert: CertificateJson) -> Self {
        Self {
            arn: cert.certificate_arn,
            domain_name: cert.domain_name,
            certificate_type: cert.certificate_type,
            status: cert.status,
            validations: cert
                .domain_validation_options
                .into_iter()
                .map(|v| DomainValidation {
                    domain_name: v.domain_name,
                    validation_status: v.validation_status,
                    validation_method: v.validation_method,
                    resource_record: v.resource_record.map(|r| ValidationRecord {
                        name: r.name,
                        record_type: r.record_type,
                        value: r.value,
                    }),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl CertificateApi for AcmProvider {
    fn id(&self) -> &'static str {
        "acm"
    }

    async fn list_pending_certificates(
        &self,
        next_token: Option<&str>,
    ) -> Result<Page<CertificateSummary>> {
        let request = ListCertificatesRequest {
            certificate_statuses: &[PENDING_VALIDATION],
            next_token,
        };
        let response: ListCertificatesResponse = self
            .call("ListCertificates", &request, ErrorContext::default())
            .await?;

        let items = response
            .certificate_summary_list
            .into_iter()
            .map(|c| CertificateSummary {
                arn: c.certificate_arn,
                domain_name: c.domain_name,
                status: c.status,
                created_at: c.created_at,
            })
            .collect();

        // 空字符串视为无后续页
        let next_token = response.next_token.filter(|t| !t.is_empty());
        Ok(Page::new(items, next_token))
    }

    async fn describe_certificate(&self, arn: &str) -> Result<CertificateDetail> {
        let response: DescribeCertificateResponse = self
            .call(
                "DescribeCertificate",
                &DescribeCertificateRequest {
                    certificate_arn: arn,
                },
                ErrorContext::resource(arn),
            )
            .await?;
        Ok(response.certificate.into())
    }
}
