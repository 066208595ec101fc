use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 秘密记录缓存数据模型
///
/// 记录整体随过期时间一起写入，之后内容不再修改；
/// 读取即删除，views 字段只在未来支持多次读取时才会递增。
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CachedSecret {
    pub secret_id: String,
    pub ciphertext: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub max_views: u32,
    pub views: u32,
}

impl CachedSecret {
    /// 记录是否已过本地时钟判断的过期时间
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// 读取次数是否已达上限
    pub fn views_exhausted(&self) -> bool {
        self.views >= self.max_views
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn serialization_keeps_subsecond_precision() {
        let created_at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
            + chrono::Duration::nanoseconds(123_456_789);
        let record = CachedSecret {
            secret_id: "abc".to_string(),
            ciphertext: "payload".to_string(),
            created_at,
            expires_at: created_at + chrono::Duration::seconds(60),
            max_views: 1,
            views: 0,
        };

        let json = serde_json::to_string(&record).unwrap();
        let decoded: CachedSecret = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded.created_at, record.created_at);
        assert_eq!(decoded.expires_at, record.expires_at);
        assert_eq!(decoded.ciphertext, record.ciphertext);
    }

    #[test]
    fn expiry_check_uses_given_clock() {
        let now = Utc::now();
        let record = CachedSecret {
            secret_id: "abc".to_string(),
            ciphertext: "payload".to_string(),
            created_at: now - chrono::Duration::seconds(120),
            expires_at: now - chrono::Duration::seconds(60),
            max_views: 1,
            views: 0,
        };

        assert!(record.is_expired(now));
        assert!(!record.is_expired(now - chrono::Duration::seconds(90)));
    }
}
