use std::sync::Arc;

use auth::AuthService;
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use cache::{DataCache, SessionStore};
use config::Config;
use database::UserRepository;

pub mod auth;
pub mod cache;
pub mod config;
pub mod database;
pub mod error;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub auth: AuthService,
    pub data_cache: Arc<dyn DataCache>,
    pub cookie_key: Key,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

impl AppState {
    /// 由配置和注入的存储组装应用状态
    pub fn new(
        config: Config,
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionStore>,
        data_cache: Arc<dyn DataCache>,
    ) -> Self {
        let auth = AuthService::new(users, sessions, config.bcrypt_cost, config.session_ttl());
        let cookie_key = utils::cookie_key(&config.session_secret);

        Self {
            config,
            auth,
            data_cache,
            cookie_key,
        }
    }
}
