use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::cache::models::session::CachedSession;
use crate::error::StoreError;
use crate::utils::generate_session_id;

/// 会话存储接口：会话ID -> 会话记录
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// 为用户创建新会话
    async fn create_session(
        &self,
        username: &str,
        ttl: Duration,
    ) -> Result<CachedSession, StoreError>;

    /// 获取会话，已过期的会话视为不存在
    async fn get_session(&self, session_id: &str) -> Result<Option<CachedSession>, StoreError>;

    /// 删除会话，返回会话是否存在
    async fn remove_session(&self, session_id: &str) -> Result<bool, StoreError>;

    /// 清理过期会话，返回清理数量
    async fn remove_expired(&self) -> Result<usize, StoreError>;
}

/// 进程内会话存储
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, CachedSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create_session(
        &self,
        username: &str,
        ttl: Duration,
    ) -> Result<CachedSession, StoreError> {
        let now = chrono::Utc::now().timestamp();
        let session = CachedSession {
            session_id: generate_session_id(),
            username: username.to_string(),
            created_at: now,
            expires_at: i64::try_from(ttl.as_secs())
                .ok()
                .and_then(|secs| now.checked_add(secs))
                .unwrap_or(i64::MAX),
        };

        self.sessions
            .write()
            .await
            .insert(session.session_id.clone(), session.clone());

        Ok(session)
    }

    async fn get_session(&self, session_id: &str) -> Result<Option<CachedSession>, StoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(session_id)
            .filter(|session| !session.is_expired())
            .cloned())
    }

    async fn remove_session(&self, session_id: &str) -> Result<bool, StoreError> {
        Ok(self.sessions.write().await.remove(session_id).is_some())
    }

    async fn remove_expired(&self) -> Result<usize, StoreError> {
        let now = chrono::Utc::now().timestamp();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now));
        Ok(before - sessions.len())
    }
}

const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// 启动后台任务，定期清理过期会话
pub fn spawn_session_sweeper(store: Arc<dyn SessionStore>, every: Duration) -> JoinHandle<()> {
    // interval 周期为 0 会 panic
    let every = every.max(MIN_SWEEP_INTERVAL);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            match store.remove_expired().await {
                Ok(0) => {}
                Ok(removed) => tracing::debug!("Swept {} expired sessions", removed),
                Err(e) => tracing::warn!("Failed to sweep sessions: {}", e),
            }
        }
    })
}
