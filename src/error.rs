use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// 存储层错误（用户存储、会话存储、数据缓存文件）
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("user {0} already exists")]
    UserExists(String),
    #[error("cache file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache file is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 接口层错误，统一转换为 `{message}` 响应
#[derive(Debug)]
pub enum AppError {
    Conflict,
    InvalidCredentials,
    Unauthorized,
    Internal(&'static str),
}

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Conflict => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AppError::Conflict => "User already exists",
            AppError::InvalidCredentials => "Invalid credentials",
            AppError::Unauthorized => "Unauthorized",
            AppError::Internal(message) => message,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            message: self.message().to_string(),
        });

        (self.status(), body).into_response()
    }
}
