use std::sync::Arc;

use chrono::Utc;

use crate::cache::models::secret::CachedSecret;
use crate::cache::operations::secret::SecretStore;
use crate::error::VaultError;
use crate::utils::generate_secret_id;

/// 秘密保管库
///
/// 自身不持有任何可变状态，也不在进程内缓存记录，
/// 跨请求协调全部交给存储端的原子操作，多个实例可共享同一存储并发运行。
#[derive(Clone)]
pub struct SecretVault {
    store: Arc<dyn SecretStore>,
}

impl SecretVault {
    pub fn new(store: Arc<dyn SecretStore>) -> Self {
        Self { store }
    }

    /// 创建秘密记录，返回新生成的标识符
    ///
    /// ttl_secs 由传输层先行校验，这里不再检查范围。
    pub async fn create_secret(
        &self,
        ciphertext: String,
        ttl_secs: u64,
    ) -> Result<String, VaultError> {
        let secret_id = generate_secret_id();
        let now = Utc::now();

        let record = CachedSecret {
            secret_id: secret_id.clone(),
            ciphertext,
            created_at: now,
            expires_at: now + chrono::Duration::seconds(ttl_secs as i64),
            max_views: 1,
            views: 0,
        };

        self.store.put(&record, ttl_secs).await?;

        tracing::debug!("Created secret {} with ttl {}s", secret_id, ttl_secs);

        Ok(secret_id)
    }

    /// 一次性读取：原子地取出并删除记录，返回密文
    ///
    /// 同一标识符的并发读取至多一个成功；成功返回之后该标识符永久失效。
    /// 这里不做自动重试：首次尝试可能已经删除了记录，重试会破坏仅一次语义。
    pub async fn consume_secret(&self, secret_id: &str) -> Result<String, VaultError> {
        let record = match self.store.take(secret_id).await? {
            Some(record) => record,
            None => return Err(VaultError::Gone),
        };

        // 存储端 TTL 与应用时钟可能有偏差，取出后再校验一次过期时间
        if record.is_expired(Utc::now()) {
            tracing::warn!(
                "Secret {} fetched past its expiry, treating as gone",
                secret_id
            );
            return Err(VaultError::Gone);
        }

        // 单次删除设计下此分支不可达，为未来的多次读取策略保留显式检查
        if record.views_exhausted() {
            tracing::warn!(
                "Secret {} has exhausted its views, treating as gone",
                secret_id
            );
            return Err(VaultError::Gone);
        }

        Ok(record.ciphertext)
    }

    /// 只读探测记录是否存在，不影响存在性、过期时间与读取计数
    ///
    /// exists 与随后的 consume 之间没有原子性，第三方可能在两次调用
    /// 之间读走同一记录。
    pub async fn secret_exists(&self, secret_id: &str) -> Result<bool, VaultError> {
        Ok(self.store.exists(secret_id).await?)
    }
}
