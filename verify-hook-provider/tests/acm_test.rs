//! ACM integration test
//!
//! Operation mode:
//! ```bash
//! AWS_ACCESS_KEY_ID=xxx AWS_SECRET_ACCESS_KEY=xxx AWS_REGION=us-east-1 \
//!     cargo test -p verify-hook-provider --test acm_test -- --ignored --nocapture
//! ```

mod common;

use std::env;

use verify_hook_provider::{
    AwsCredentials, CertificateApi, PENDING_VALIDATION, ProviderError, create_clients,
};

fn certificates() -> Option<std::sync::Arc<dyn CertificateApi>> {
    let credentials = AwsCredentials::from_env().ok()?;
    let region = env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());
    Some(create_clients(&credentials, &region, 2).certificates)
}

#[tokio::test]
#[ignore = "integration test: requires AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY"]
async fn test_acm_list_pending_certificates() {
    skip_if_no_credentials!("AWS_ACCESS_KEY_ID", "AWS_SECRET_ACCESS_KEY");

    let acm = require_some!(certificates(), "创建客户端失败");
    let mut token: Option<String> = None;
    let mut total = 0;
    loop {
        let page = require_ok!(
            acm.list_pending_certificates(token.as_deref()).await,
            "list_pending_certificates 调用失败"
        );
        for cert in &page.items {
            if let Some(status) = &cert.status {
                assert_eq!(status, PENDING_VALIDATION);
            }
        }
        total += page.items.len();
        token = page.next_token;
        if token.is_none() {
            break;
        }
    }

    println!("✓ list_pending_certificates 测试通过，共 {total} 个待验证证书");
}

#[tokio::test]
#[ignore = "integration test: requires AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY"]
async fn test_acm_describe_missing_certificate() {
    skip_if_no_credentials!("AWS_ACCESS_KEY_ID", "AWS_SECRET_ACCESS_KEY");

    let acm = require_some!(certificates(), "创建客户端失败");
    let region = env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());
    let arn = format!(
        "arn:aws:acm:{region}:000000000000:certificate/00000000-0000-0000-0000-000000000000"
    );
    let result = acm.describe_certificate(&arn).await;
    assert!(
        matches!(
            result,
            Err(ProviderError::ResourceNotFound { .. } | ProviderError::PermissionDenied { .. })
        ),
        "不存在的证书应返回错误: {result:?}"
    );

    println!("✓ describe_certificate 错误路径测试通过");
}
