use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use auth_demo::{
    AppState,
    cache::{FileDataCache, MemorySessionStore, SessionStore, operations::spawn_session_sweeper},
    config::Config,
    database::MemoryUserRepository,
    router::create_router,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env();

    // 初始化存储，均为进程内存储，重启后丢失
    let users = Arc::new(MemoryUserRepository::new());
    let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
    let data_cache = FileDataCache::new(&config.cache_file, config.cache_ttl())
        .await
        .expect("Failed to prepare cache directory");
    tracing::info!("Data cache file: {}", data_cache.path().display());

    let sweeper = spawn_session_sweeper(sessions.clone(), config.session_sweep_interval());

    let state = AppState::new(config.clone(), users, sessions, Arc::new(data_cache));
    let app = create_router(state);

    // 启动服务器
    let addr = SocketAddr::new(
        config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        config.server_port,
    );
    tracing::info!("Server running on http://{}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app,
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Failed to start server");

    sweeper.abort();
    tracing::info!("Server stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
