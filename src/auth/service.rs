use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CachedSession, SessionStore};
use crate::database::{UserEntity, UserRepository};
use crate::error::StoreError;
use crate::utils::{hash_password, verify_password};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("user already exists")]
    UserExists,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("no valid session")]
    Unauthorized,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// 认证服务：注册、登录、登出、会话校验
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionStore>,
    bcrypt_cost: u32,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionStore>,
        bcrypt_cost: u32,
        session_ttl: Duration,
    ) -> Self {
        Self {
            users,
            sessions,
            bcrypt_cost,
            session_ttl,
        }
    }

    /// 注册新用户，不创建会话
    pub async fn register(&self, username: &str, password: &str) -> Result<UserEntity, AuthError> {
        if self.users.find_by_username(username).await?.is_some() {
            return Err(AuthError::UserExists);
        }

        // bcrypt 计算量大，放到阻塞线程池
        let cost = self.bcrypt_cost;
        let password = password.to_string();
        let password_hash =
            tokio::task::spawn_blocking(move || hash_password(&password, cost)).await??;

        match self.users.create(UserEntity::new(username, password_hash)).await {
            Ok(user) => {
                tracing::info!("Registered user: {}", user.username);
                Ok(user)
            }
            Err(StoreError::UserExists(_)) => Err(AuthError::UserExists),
            Err(e) => Err(e.into()),
        }
    }

    /// 校验密码并创建新会话；携带旧会话时旧会话作废
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        previous_session: Option<&str>,
    ) -> Result<CachedSession, AuthError> {
        let user = match self.users.find_by_username(username).await? {
            Some(user) => user,
            None => {
                tracing::warn!("Login attempt for unknown user: {}", username);
                return Err(AuthError::InvalidCredentials);
            }
        };

        let password = password.to_string();
        let hash = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await??;
        if !valid {
            tracing::warn!("Invalid password for user: {}", username);
            return Err(AuthError::InvalidCredentials);
        }

        if let Some(previous) = previous_session {
            self.sessions.remove_session(previous).await?;
        }

        let session = self
            .sessions
            .create_session(&user.username, self.session_ttl)
            .await?;
        tracing::info!("User logged in: {}", user.username);
        Ok(session)
    }

    /// 销毁会话，无会话时直接成功
    pub async fn logout(&self, session_id: Option<&str>) -> Result<(), AuthError> {
        if let Some(session_id) = session_id {
            if self.sessions.remove_session(session_id).await? {
                tracing::info!("Session destroyed");
            }
        }
        Ok(())
    }

    /// 获取当前会话
    pub async fn current_session(&self, session_id: Option<&str>) -> Result<CachedSession, AuthError> {
        let session_id = session_id.ok_or(AuthError::Unauthorized)?;
        self.sessions
            .get_session(session_id)
            .await?
            .ok_or(AuthError::Unauthorized)
    }
}
