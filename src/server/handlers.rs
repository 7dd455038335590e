//! HTTP handlers.
//!
//! Every handler succeeds: the aggregation policy means the worst
//! outcome is a page with empty categories, never a 5xx for a bad
//! upstream. The debug endpoint reports its own fetch failures inside
//! the JSON body, as the original function surface did.

use axum::extract::State;
use axum::response::Html;
use axum::Json;
use serde_json::{json, Value};

use super::templates;
use super::AppState;
use crate::aggregate;
use crate::extract;
use crate::models::PageData;
use crate::scrapers::HttpClient;

/// `GET /`: rendered price table across all categories.
pub async fn price_page(State(state): State<AppState>) -> Html<String> {
    let page = aggregate::fetch_all_categories(&state.config).await;
    Html(templates::price_page(&page))
}

/// `GET /api/prices`: the aggregation result as JSON.
pub async fn api_prices(State(state): State<AppState>) -> Json<PageData> {
    let page = aggregate::fetch_all_categories(&state.config).await;
    Json(page)
}

/// `GET /api/debug`: container diagnostics for the first category
/// page: body length, container presence, direct-child count.
pub async fn api_debug(State(state): State<AppState>) -> Json<Value> {
    let config = &state.config;
    let source = &config.categories[0];

    let client = match HttpClient::new(&config.user_agent, &config.cookie, config.timeout()) {
        Ok(client) => client,
        Err(e) => {
            return Json(json!({
                "mode": "debug",
                "url": source.url,
                "status": "failed",
                "error": format!("client build failed: {e}"),
            }))
        }
    };

    match client.get_text(&source.url).await {
        Ok(html) => {
            let report = extract::debug_report(&html);
            Json(json!({
                "mode": "debug",
                "url": source.url,
                "status": "success",
                "html_length": report.html_length,
                "container_found": report.container_found,
                "product_count": report.child_count,
            }))
        }
        Err(e) => Json(json!({
            "mode": "debug",
            "url": source.url,
            "status": "failed",
            "error": format!("fetch failed: {e}"),
        })),
    }
}
