/// 已注册用户，用户名区分大小写
#[derive(Debug, Clone)]
pub struct UserEntity {
    pub username: String,
    pub password_hash: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl UserEntity {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            created_at: chrono::Utc::now(),
        }
    }
}
