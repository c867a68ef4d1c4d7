use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::SignedCookieJar;

use crate::{AppState, auth::AuthError, config::Config, error::AppError};

/// 从签名 cookie 中取出会话ID，签名无效的 cookie 视为不存在
pub fn session_id_from(jar: &SignedCookieJar, config: &Config) -> Option<String> {
    jar.get(&config.session_cookie_name)
        .map(|cookie| cookie.value().to_string())
}

/// 校验会话，并把会话写入请求扩展供处理函数使用
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let session_id = session_id_from(&jar, &state.config);

    match state.auth.current_session(session_id.as_deref()).await {
        Ok(session) => {
            req.extensions_mut().insert(session);
            Ok(next.run(req).await)
        }
        Err(AuthError::Unauthorized) => Err(AppError::Unauthorized),
        Err(e) => {
            tracing::error!("Failed to load session: {}", e);
            Err(AppError::Unauthorized)
        }
    }
}
