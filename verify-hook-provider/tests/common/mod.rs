//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;

use verify_hook_provider::{
    AwsClients, AwsCredentials, Change, ChangeAction, ChangeBatch, HostedZone, RecordType,
    ResourceRecordSet, create_clients, normalize_domain_name,
};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 生成唯一的测试记录名称
pub fn generate_test_record_name(zone: &str) -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}.{zone}", &uuid.to_string()[..8])
}

/// 单值 TXT 变更
pub fn txt_change(action: ChangeAction, name: &str, text: &str) -> ChangeBatch {
    ChangeBatch {
        comment: Some("verify-hook integration test".to_string()),
        changes: vec![Change {
            action,
            record_set: ResourceRecordSet {
                name: name.to_string(),
                record_type: RecordType::Txt,
                ttl: 60,
                values: vec![format!("\"{text}\"")],
            },
        }],
    }
}

/// 测试上下文 - 封装客户端和测试域名
pub struct TestContext {
    pub clients: AwsClients,
    pub domain: String,
}

impl TestContext {
    /// 从 `AWS_*` 与 `TEST_DOMAIN` 环境变量创建
    pub fn from_env() -> Option<Self> {
        let credentials = AwsCredentials::from_env().ok()?;
        let region = env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());
        let domain = env::var("TEST_DOMAIN").ok()?;

        Some(Self {
            clients: create_clients(&credentials, &region, 2),
            domain,
        })
    }

    /// 查找名称与测试域名完全一致的托管区
    pub async fn find_zone(&self) -> Option<HostedZone> {
        let zones = self
            .clients
            .zones
            .list_zones_by_name(&self.domain, 1)
            .await
            .ok()?;
        zones
            .into_iter()
            .find(|z| normalize_domain_name(&z.name).eq_ignore_ascii_case(&self.domain))
    }
}
