//! AWS Signature Version 4
//! Reference: <https://docs.aws.amazon.com/IAM/latest/UserGuide/create-signed-request.html>

use std::fmt::Write;

use crate::providers::common::{hmac_sha256, sha256_hex};
use crate::types::AwsCredentials;
use crate::utils::log_sanitizer::{redact_canonical_request, truncate_for_log};

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Signs requests for one service in one region.
pub(crate) struct SigV4Signer {
    credentials: AwsCredentials,
    region: String,
    service: &'static str,
}

impl SigV4Signer {
    pub fn new(credentials: AwsCredentials, region: impl Into<String>, service: &'static str) -> Self {
        Self {
            credentials,
            region: region.into(),
            service,
        }
    }

    /// Headers every signed request carries: `Host`, `X-Amz-Date` and, for
    /// temporary credentials, `X-Amz-Security-Token`.
    pub fn base_headers(&self, host: &str, amz_date: &str) -> Vec<(String, String)> {
        let mut headers = vec![
            ("Host".to_string(), host.to_string()),
            ("X-Amz-Date".to_string(), amz_date.to_string()),
        ];
        if let Some(token) = &self.credentials.session_token {
            headers.push(("X-Amz-Security-Token".to_string(), token.clone()));
        }
        headers
    }

    /// Builds the `Authorization` header value.
    ///
    /// `query` must already be in canonical form (see [`canonical_query`]);
    /// `amz_date` is `YYYYMMDD'T'HHMMSS'Z'`.
    pub fn sign(
        &self,
        method: &str,
        uri: &str,
        query: &str,
        headers: &[(String, String)],
        payload: &str,
        amz_date: &str,
    ) -> String {
        let date = &amz_date[..amz_date.len().min(8)];

        // 1. Canonical URI
        let canonical_uri = if uri.is_empty() { "/" } else { uri };

        // 2. Canonical headers: lowercase names, trimmed values, sorted
        let mut sorted_headers: Vec<(String, String)> = headers
            .iter()
            .map(|(k, v)| {
                (
                    k.to_lowercase(),
                    v.split_whitespace().collect::<Vec<_>>().join(" "),
                )
            })
            .collect();
        sorted_headers.sort_by(|a, b| a.0.cmp(&b.0));

        let canonical_headers = sorted_headers
            .iter()
            .fold(String::new(), |mut acc, (k, v)| {
                let _ = writeln!(acc, "{k}:{v}");
                acc
            });

        let signed_headers = sorted_headers
            .iter()
            .map(|(k, _)| k.as_str())
            .collect::<Vec<_>>()
            .join(";");

        // 3. Canonical request
        let hashed_payload = sha256_hex(payload.as_bytes());
        let canonical_request = format!(
            "{method}\n{canonical_uri}\n{query}\n{canonical_headers}\n{signed_headers}\n{hashed_payload}"
        );

        log::debug!(
            "CanonicalRequest:\n{}",
            truncate_for_log(&redact_canonical_request(&canonical_request))
        );

        // 4. String to sign
        let scope = format!("{date}/{}/{}/aws4_request", self.region, self.service);
        let string_to_sign = format!(
            "{ALGORITHM}\n{amz_date}\n{scope}\n{}",
            sha256_hex(canonical_request.as_bytes())
        );

        log::debug!("StringToSign:\n{string_to_sign}");

        // 5. Signature
        let signing_key = self.signing_key(date);
        let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes()));

        format!(
            "{ALGORITHM} Credential={}/{scope}, SignedHeaders={signed_headers}, Signature={signature}",
            self.credentials.access_key_id
        )
    }

    /// kSigning = HMAC(HMAC(HMAC(HMAC("AWS4" + secret, date), region), service), "aws4_request")
    fn signing_key(&self, date: &str) -> Vec<u8> {
        let k_secret = format!("AWS4{}", self.credentials.secret_access_key);
        let k_date = hmac_sha256(k_secret.as_bytes(), date.as_bytes());
        let k_region = hmac_sha256(&k_date, self.region.as_bytes());
        let k_service = hmac_sha256(&k_region, self.service.as_bytes());
        hmac_sha256(&k_service, b"aws4_request")
    }
}

/// Encodes and sorts query parameters into SigV4 canonical form.
///
/// The result is also valid as the query part of the request URL.
pub(crate) fn canonical_query(params: &[(&str, &str)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| {
            (
                urlencoding::encode(k).into_owned(),
                urlencoding::encode(v).into_owned(),
            )
        })
        .collect();
    encoded.sort();
    encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// `X-Amz-Date` value for the current instant.
pub(crate) fn amz_date_now() -> String {
    chrono::Utc::now().format("%Y%m%dT%H%M%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_SECRET: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";

    fn iam_signer() -> SigV4Signer {
        SigV4Signer::new(
            AwsCredentials::new("AKIDEXAMPLE", EXAMPLE_SECRET),
            "us-east-1",
            "iam",
        )
    }

    fn extract_signature(auth: &str) -> Option<&str> {
        auth.split("Signature=").nth(1)
    }

    #[test]
    fn signing_key_matches_published_example() {
        let key = iam_signer().signing_key("20150830");
        assert_eq!(
            hex::encode(key),
            "c4afb1cc5771d871763a393e44b703571b55cc28424d1a5e86da6ed3c154a4b9"
        );
    }

    #[test]
    fn sign_matches_published_example() {
        let signer = iam_signer();
        let headers = vec![
            (
                "Content-Type".to_string(),
                "application/x-www-form-urlencoded; charset=utf-8".to_string(),
            ),
            ("Host".to_string(), "iam.amazonaws.com".to_string()),
            ("X-Amz-Date".to_string(), "20150830T123600Z".to_string()),
        ];
        let query = canonical_query(&[("Version", "2010-05-08"), ("Action", "ListUsers")]);
        assert_eq!(query, "Action=ListUsers&Version=2010-05-08");

        let auth = signer.sign("GET", "/", &query, &headers, "", "20150830T123600Z");
        assert_eq!(
            auth,
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-east-1/iam/aws4_request, \
             SignedHeaders=content-type;host;x-amz-date, \
             Signature=5d672d79c15b13162d9279b0855cfba6789a8edb4c82c400e06b5924a6f2b5d7"
        );
    }

    #[test]
    fn header_order_does_not_change_signature() {
        let signer = iam_signer();
        let a = vec![
            ("Host".to_string(), "route53.amazonaws.com".to_string()),
            ("X-Amz-Date".to_string(), "20240101T000000Z".to_string()),
        ];
        let b: Vec<_> = a.iter().rev().cloned().collect();
        assert_eq!(
            signer.sign("GET", "/2013-04-01/hostedzone/Z1", "", &a, "", "20240101T000000Z"),
            signer.sign("GET", "/2013-04-01/hostedzone/Z1", "", &b, "", "20240101T000000Z"),
        );
    }

    #[test]
    fn payload_changes_signature() {
        let signer = iam_signer();
        let headers = signer.base_headers("acm.us-east-1.amazonaws.com", "20240101T000000Z");
        let one = signer.sign("POST", "/", "", &headers, "{}", "20240101T000000Z");
        let two = signer.sign("POST", "/", "", &headers, "{\"a\":1}", "20240101T000000Z");
        assert_ne!(extract_signature(&one), extract_signature(&two));
    }

    #[test]
    fn session_token_is_signed() {
        let signer = SigV4Signer::new(
            AwsCredentials::new("AKID", "secret").with_session_token("session"),
            "us-east-1",
            "route53",
        );
        let headers = signer.base_headers("route53.amazonaws.com", "20240101T000000Z");
        assert_eq!(headers.len(), 3);
        let auth = signer.sign("GET", "/", "", &headers, "", "20240101T000000Z");
        assert!(auth.contains("SignedHeaders=host;x-amz-date;x-amz-security-token"));
    }

    #[test]
    fn canonical_query_encodes_reserved_characters() {
        let query = canonical_query(&[("recordname", "_x.example.com"), ("a b", "c/d")]);
        assert_eq!(query, "a%20b=c%2Fd&recordname=_x.example.com");
    }
}
