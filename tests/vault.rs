//! 保管库行为的集成测试
//!
//! 基于内存存储验证一次性读取、过期与存在性探测的契约，
//! 内存实现与 Redis 实现遵循同一套原子语义。

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use secretlink_backend::cache::{CachedSecret, MemorySecretStore, SecretStore};
use secretlink_backend::error::VaultError;
use secretlink_backend::vault::SecretVault;

fn new_vault() -> SecretVault {
    SecretVault::new(Arc::new(MemorySecretStore::new()))
}

#[tokio::test]
async fn consume_returns_original_ciphertext_exactly_once() {
    let vault = new_vault();
    let ciphertext = "U2FsdGVkX1+vupppZksvRf5pq5g5XjFR".to_string();

    let id = vault.create_secret(ciphertext.clone(), 60).await.unwrap();

    let fetched = vault.consume_secret(&id).await.unwrap();
    assert_eq!(fetched, ciphertext);

    // 读取成功后标识符永久失效
    assert!(matches!(
        vault.consume_secret(&id).await,
        Err(VaultError::Gone)
    ));
}

#[tokio::test]
async fn unknown_id_is_gone() {
    let vault = new_vault();

    assert!(matches!(
        vault.consume_secret("does-not-exist").await,
        Err(VaultError::Gone)
    ));
}

#[tokio::test]
async fn exists_reflects_lifecycle() {
    let vault = new_vault();

    let id = vault
        .create_secret("payload".to_string(), 60)
        .await
        .unwrap();
    assert!(vault.secret_exists(&id).await.unwrap());

    vault.consume_secret(&id).await.unwrap();
    assert!(!vault.secret_exists(&id).await.unwrap());
}

#[tokio::test]
async fn expired_secret_is_gone_without_explicit_delete() {
    let vault = new_vault();

    let id = vault.create_secret("payload".to_string(), 1).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1100)).await;

    assert!(!vault.secret_exists(&id).await.unwrap());
    assert!(matches!(
        vault.consume_secret(&id).await,
        Err(VaultError::Gone)
    ));
}

#[tokio::test]
async fn concurrent_consumers_get_exactly_one_delivery() {
    let vault = new_vault();
    let id = vault
        .create_secret("only-once".to_string(), 60)
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..32 {
        let vault = vault.clone();
        let id = id.clone();
        handles.push(tokio::spawn(async move { vault.consume_secret(&id).await }));
    }

    let mut delivered = 0;
    let mut gone = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(ciphertext) => {
                assert_eq!(ciphertext, "only-once");
                delivered += 1;
            }
            Err(VaultError::Gone) => gone += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(delivered, 1);
    assert_eq!(gone, 31);
}

#[tokio::test]
async fn record_past_its_own_expiry_is_treated_as_gone() {
    // 存储端尚未清理、但记录自身时间已过期的情况按不存在处理
    let store = Arc::new(MemorySecretStore::new());
    let now = Utc::now();
    let record = CachedSecret {
        secret_id: "skewed".to_string(),
        ciphertext: "payload".to_string(),
        created_at: now - chrono::Duration::seconds(120),
        expires_at: now - chrono::Duration::seconds(1),
        max_views: 1,
        views: 0,
    };
    store.put(&record, 60).await.unwrap();

    let vault = SecretVault::new(store);
    assert!(matches!(
        vault.consume_secret("skewed").await,
        Err(VaultError::Gone)
    ));
}

#[tokio::test]
async fn record_with_exhausted_views_is_treated_as_gone() {
    let store = Arc::new(MemorySecretStore::new());
    let now = Utc::now();
    let record = CachedSecret {
        secret_id: "viewed".to_string(),
        ciphertext: "payload".to_string(),
        created_at: now,
        expires_at: now + chrono::Duration::seconds(60),
        max_views: 1,
        views: 1,
    };
    store.put(&record, 60).await.unwrap();

    let vault = SecretVault::new(store);
    assert!(matches!(
        vault.consume_secret("viewed").await,
        Err(VaultError::Gone)
    ));
}
