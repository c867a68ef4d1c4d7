use axum::{
    extract::{Extension, Json, State, rejection::JsonRejection},
    http::StatusCode,
};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};

use crate::{
    AppState,
    auth::AuthError,
    cache::CachedSession,
    config::Config,
    error::AppError,
    middleware::session_id_from,
};

use super::model::{CredentialsRequest, MessageResponse, ProfileResponse, SessionUser};

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    // 请求体无法解析时按注册失败处理
    let Json(req) = payload.map_err(|rejection| {
        tracing::warn!("Rejected register body: {}", rejection);
        AppError::Internal("Registration failed")
    })?;

    match state.auth.register(&req.username, &req.password).await {
        Ok(_) => Ok((
            StatusCode::CREATED,
            Json(MessageResponse::new("User registered successfully")),
        )),
        Err(AuthError::UserExists) => Err(AppError::Conflict),
        Err(e) => {
            tracing::error!("Registration failed: {}", e);
            Err(AppError::Internal("Registration failed"))
        }
    }
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(SignedCookieJar, Json<MessageResponse>), AppError> {
    // 缺少用户名或密码视为凭据无效
    let Json(req) = payload.map_err(|rejection| {
        tracing::warn!("Rejected login body: {}", rejection);
        AppError::InvalidCredentials
    })?;

    let previous = session_id_from(&jar, &state.config);

    match state
        .auth
        .login(&req.username, &req.password, previous.as_deref())
        .await
    {
        Ok(session) => {
            let jar = jar.add(session_cookie(&state.config, session.session_id));
            Ok((jar, Json(MessageResponse::new("Login successful"))))
        }
        Err(AuthError::InvalidCredentials) => Err(AppError::InvalidCredentials),
        Err(e) => {
            tracing::error!("Login failed: {}", e);
            Err(AppError::Internal("Login failed"))
        }
    }
}

#[axum::debug_handler]
pub async fn logout(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Json<MessageResponse>), AppError> {
    let session_id = session_id_from(&jar, &state.config);

    if let Err(e) = state.auth.logout(session_id.as_deref()).await {
        tracing::error!("Logout failed: {}", e);
        return Err(AppError::Internal("Logout failed"));
    }

    let removal = Cookie::build((state.config.session_cookie_name.clone(), ""))
        .path("/")
        .build();
    Ok((
        jar.remove(removal),
        Json(MessageResponse::new("Logout successful")),
    ))
}

/// 需要经过会话中间件，会话由中间件写入请求扩展
#[axum::debug_handler]
pub async fn profile(Extension(session): Extension<CachedSession>) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        message: format!("Welcome, {}", session.username),
        user: SessionUser {
            username: session.username,
        },
    })
}

fn session_cookie(config: &Config, session_id: String) -> Cookie<'static> {
    Cookie::build((config.session_cookie_name.clone(), session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(false)
        .max_age(time::Duration::seconds(
            i64::try_from(config.session_ttl_secs).unwrap_or(i64::MAX),
        ))
        .build()
}
