use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use fizzbuzz_stats::{
    AppState,
    cache::{FrequencyTracker, KvStore, MemoryStore, RedisStore},
    config::{Config, StoreBackend},
};
#[cfg(debug_assertions)]
use tower_http::cors::CorsLayer;
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
    let config = Config::from_env().expect("Failed to load configuration");

    // 初始化计数存储，失败时直接退出
    let store: Arc<dyn KvStore> = match config.store_backend {
        StoreBackend::Redis => {
            let redis_url = config.redis_url.as_deref().unwrap_or_default();
            Arc::new(
                RedisStore::connect(redis_url)
                    .await
                    .expect("Failed to connect to Redis"),
            )
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory stats store, counts are lost on restart");
            Arc::new(MemoryStore::new())
        }
    };
    let tracker = FrequencyTracker::new(
        store,
        config.stats_namespace.clone(),
        config.scan_page_size,
    );

    let state = AppState {
        config: config.clone(),
        tracker,
    };
    let router = fizzbuzz_stats::app(state);

    // 调试模式下允许跨域
    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(CorsLayer::permissive())
    };

    let addr = SocketAddr::new(
        config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        router,
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Failed to start server");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
