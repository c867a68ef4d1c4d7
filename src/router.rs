use axum::{
    Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    AppState,
    config::Config,
    middleware::{auth_middleware, log_errors},
    routes,
};

// 允许前端源携带 cookie 跨域访问
fn cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true);

    match HeaderValue::from_str(&config.client_origin) {
        Ok(origin) => cors.allow_origin(origin),
        Err(_) => {
            tracing::warn!("Invalid CLIENT_ORIGIN {:?}, cross-origin requests disabled", config.client_origin);
            cors
        }
    }
}

// 创建主路由
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/logout", post(routes::auth::logout))
        .route("/data", get(routes::data::get_data));

    let protected_routes = Router::new()
        .route("/profile", get(routes::auth::profile))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // 其余路径交给前端静态文件
    let client = ServeDir::new(&state.config.static_dir);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback_service(client)
        .layer(axum::middleware::from_fn(log_errors))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config))
        .with_state(state)
}
