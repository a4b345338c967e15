//! HTTP 服务器
//!
//! 组装路由并启动服务。/v1 下的两个端点由本地处理，
//! 其余所有路径透传给上游。

pub mod error;
pub mod handlers;

use crate::config::AppConfig;
use crate::providers::ChatGotProvider;
use axum::{
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

/// 请求体大小上限 (16 MB)
const MAX_BODY_SIZE: usize = 16 * 1024 * 1024;

/// 应用共享状态
///
/// 除只读配置和 HTTP 连接池外没有跨请求共享的可变状态。
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// ChatGot 会话客户端
    pub provider: ChatGotProvider,
    /// 透传代理使用的 HTTP 客户端
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let provider = ChatGotProvider::new(config.upstream.base_url.clone());
        Self {
            config: Arc::new(config),
            provider,
            http: reqwest::Client::new(),
        }
    }
}

/// 构建路由
///
/// /v1/chat/completions 用 any 匹配所有方法，由 handler 自行拒绝
/// 非 POST 请求，以返回结构化错误而不是 405。
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/models", get(handlers::models_api::list_models))
        .route(
            "/v1/chat/completions",
            any(handlers::chat::chat_completions),
        )
        .fallback(handlers::passthrough::passthrough)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .with_state(state)
}

/// 启动服务器
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    let state = AppState::new(config);
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("[SERVER] listening on {}", addr);
    axum::serve(listener, router).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_router() {
        let state = AppState::new(AppConfig::default());
        // 路由构建不应 panic
        let _router = build_router(state);
    }

    #[test]
    fn test_state_provider_uses_configured_upstream() {
        let mut config = AppConfig::default();
        config.upstream.base_url = "http://localhost:1234".to_string();
        let state = AppState::new(config);
        assert_eq!(state.provider.base_url(), "http://localhost:1234");
    }
}
