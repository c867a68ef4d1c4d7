use axum::extract::{Json, State};

use crate::{AppState, cache::DataPayload, error::AppError};

/// 返回缓存数据，缓存过期时重新生成
#[axum::debug_handler]
pub async fn get_data(State(state): State<AppState>) -> Result<Json<DataPayload>, AppError> {
    state.data_cache.get_data().await.map(Json).map_err(|e| {
        tracing::error!("Failed to get data: {}", e);
        AppError::Internal("Failed to get data")
    })
}
