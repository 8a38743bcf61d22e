use axum::{
    Router,
    routing::{get, post},
};
use cache::FrequencyTracker;
use config::Config;
use tower::ServiceBuilder;

pub mod cache;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub tracker: FrequencyTracker,
}

/// 组装全部路由和中间件
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .route("/generate", post(routes::fizzbuzz::generate))
        // 旧版路径
        .route("/fizzbuzz", post(routes::fizzbuzz::generate))
        .route("/stats", get(routes::stats::stats));

    // axum 不允许在根路径嵌套
    let base = state.config.api_base_uri.trim_matches('/');
    let router = if base.is_empty() {
        Router::new().merge(api)
    } else {
        Router::new().nest(&format!("/{}", base), api)
    };

    router
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::log_requests))
                .layer(axum::middleware::from_fn(middleware::log_errors)),
        )
        .with_state(state)
}
