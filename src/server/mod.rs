//! Web surface for browsing current prices.
//!
//! Serves the rendered price table at `/`, the raw aggregation result
//! as JSON at `/api/prices`, and container diagnostics at `/api/debug`.

mod handlers;
mod routes;
mod templates;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Config;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// Start the web server.
pub async fn serve(config: Config, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(config);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    /// Config whose sources point at a closed local port, so fetches
    /// fail fast without touching the network.
    fn offline_config() -> Config {
        let mut config = Config::default();
        for (i, category) in config.categories.iter_mut().enumerate() {
            category.url = format!("http://127.0.0.1:9/category/{i}");
        }
        config.timeout = 1;
        config
    }

    async fn get(path: &str) -> (StatusCode, Vec<u8>) {
        let app = create_router(AppState::new(offline_config()));
        let response = app
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_price_page_renders_despite_failed_fetches() {
        let (status, body) = get("/").await;
        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(body).unwrap();
        // Degraded categories show as empty, never as an error page.
        assert!(html.contains("叶菜类"));
        assert!(html.contains("暂无商品"));
    }

    #[tokio::test]
    async fn test_api_prices_keeps_category_order() {
        let (status, body) = get("/api/prices").await;
        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let ids: Vec<_> = value["categories"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            ids,
            [
                "fruit-vegetable",
                "leaf-vegetable",
                "root-vegetable",
                "mushroom",
                "condiment"
            ]
        );
    }

    #[tokio::test]
    async fn test_api_debug_reports_failure_in_body() {
        let (status, body) = get("/api/debug").await;
        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["mode"], "debug");
        assert_eq!(value["status"], "failed");
    }
}
