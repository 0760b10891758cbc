//! Route 53 integration test
//!
//! Operation mode:
//! ```bash
//! AWS_ACCESS_KEY_ID=xxx AWS_SECRET_ACCESS_KEY=xxx TEST_DOMAIN=example.com \
//!     cargo test -p verify-hook-provider --test route53_test -- --ignored --nocapture --test-threads=1
//! ```

mod common;

use common::{TestContext, generate_test_record_name, txt_change};
use verify_hook_provider::{ChangeAction, ProviderError, RecordType};

#[tokio::test]
#[ignore = "integration test: requires AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY and TEST_DOMAIN"]
async fn test_route53_list_zones_by_name() {
    skip_if_no_credentials!("AWS_ACCESS_KEY_ID", "AWS_SECRET_ACCESS_KEY", "TEST_DOMAIN");

    let ctx = require_some!(TestContext::from_env(), "创建测试上下文失败");
    let zone = require_some!(ctx.find_zone().await, "找不到测试域名对应的托管区");
    assert!(zone.name.ends_with('.'), "Route 53 返回的区名应以点结尾");

    println!("✓ list_zones_by_name 测试通过: {} ({})", zone.name, zone.id);
}

#[tokio::test]
#[ignore = "integration test: requires AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY and TEST_DOMAIN"]
async fn test_route53_get_zone() {
    skip_if_no_credentials!("AWS_ACCESS_KEY_ID", "AWS_SECRET_ACCESS_KEY", "TEST_DOMAIN");

    let ctx = require_some!(TestContext::from_env(), "创建测试上下文失败");
    let zone = require_some!(ctx.find_zone().await, "找不到测试域名对应的托管区");

    let fetched = require_ok!(ctx.clients.zones.get_zone(&zone.id).await, "get_zone 调用失败");
    assert_eq!(fetched.name, zone.name, "区名不匹配");

    println!("✓ get_zone 测试通过: {}", fetched.name);
}

#[tokio::test]
#[ignore = "integration test: requires AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY and TEST_DOMAIN"]
async fn test_route53_get_missing_zone() {
    skip_if_no_credentials!("AWS_ACCESS_KEY_ID", "AWS_SECRET_ACCESS_KEY", "TEST_DOMAIN");

    let ctx = require_some!(TestContext::from_env(), "创建测试上下文失败");
    let result = ctx.clients.zones.get_zone("Z0000000000000000000").await;
    assert!(
        matches!(result, Err(ProviderError::ZoneNotFound { .. })),
        "应返回 ZoneNotFound: {result:?}"
    );

    println!("✓ 不存在的托管区测试通过");
}

#[tokio::test]
#[ignore = "integration test: requires AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY and TEST_DOMAIN"]
async fn test_route53_apex_is_not_delegated() {
    skip_if_no_credentials!("AWS_ACCESS_KEY_ID", "AWS_SECRET_ACCESS_KEY", "TEST_DOMAIN");

    let ctx = require_some!(TestContext::from_env(), "创建测试上下文失败");
    let zone = require_some!(ctx.find_zone().await, "找不到测试域名对应的托管区");

    let name = generate_test_record_name(&ctx.domain);
    let delegated = require_ok!(
        ctx.clients
            .zones
            .test_name_delegation(&zone.id, &name, RecordType::Ns)
            .await,
        "test_name_delegation 调用失败"
    );
    assert!(!delegated, "随机子域不应被委派");

    println!("✓ test_name_delegation 测试通过");
}

#[tokio::test]
#[ignore = "integration test: requires AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY and TEST_DOMAIN"]
async fn test_route53_upsert_then_delete() {
    skip_if_no_credentials!("AWS_ACCESS_KEY_ID", "AWS_SECRET_ACCESS_KEY", "TEST_DOMAIN");

    let ctx = require_some!(TestContext::from_env(), "创建测试上下文失败");
    let zone = require_some!(ctx.find_zone().await, "找不到测试域名对应的托管区");
    let name = generate_test_record_name(&ctx.domain);

    let created = require_ok!(
        ctx.clients
            .zones
            .submit_change_batch(&zone.id, &txt_change(ChangeAction::Upsert, &name, "it"))
            .await,
        "UPSERT 失败"
    );
    assert!(!created.id.is_empty(), "变更 ID 不应为空");

    let deleted = ctx
        .clients
        .zones
        .submit_change_batch(&zone.id, &txt_change(ChangeAction::Delete, &name, "it"))
        .await;
    assert!(deleted.is_ok(), "DELETE 失败: {deleted:?}");

    // delete again: the record is gone now
    let again = ctx
        .clients
        .zones
        .submit_change_batch(&zone.id, &txt_change(ChangeAction::Delete, &name, "it"))
        .await;
    assert!(
        matches!(again, Err(ProviderError::InvalidChangeBatch { .. })),
        "重复删除应返回 InvalidChangeBatch: {again:?}"
    );

    println!("✓ UPSERT/DELETE 测试通过: {name}");
}
