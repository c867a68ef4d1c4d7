use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::models::user::UserEntity;
use crate::error::StoreError;

/// 用户存储接口，可替换为真实数据库实现
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 插入新用户，用户名已存在时返回 `StoreError::UserExists`
    async fn create(&self, user: UserEntity) -> Result<UserEntity, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<UserEntity>, StoreError>;
}

/// 进程内用户存储，按注册顺序保存，重启后丢失
#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<Vec<UserEntity>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: UserEntity) -> Result<UserEntity, StoreError> {
        // 存在性检查与插入在同一把写锁内完成
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::UserExists(user.username));
        }

        tracing::debug!("Storing user: {}", user.username);
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserEntity>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }
}
