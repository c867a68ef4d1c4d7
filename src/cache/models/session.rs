/// 会话数据模型，由 cookie 中的会话ID索引
#[derive(Debug, Clone)]
pub struct CachedSession {
    pub session_id: String,
    pub username: String,
    pub created_at: i64, // Unix timestamp
    pub expires_at: i64, // Unix timestamp
}

impl CachedSession {
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(chrono::Utc::now().timestamp())
    }
}
