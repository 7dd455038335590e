//! Parallel category aggregation.
//!
//! Fans out one fetch-and-extract task per configured category source,
//! waits for all of them, and assembles the result in configuration
//! order. A task failure degrades its category to an empty product
//! list; the rest of the run is unaffected. Diagnostics go to the log
//! only; the assembled result carries no failure detail, so callers
//! cannot tell an empty category from a failed one. That opacity
//! matches the deployed behavior and is relied on by the HTML surface.

use tracing::{debug, warn};

use crate::config::{CategorySource, Config};
use crate::extract;
use crate::models::{Category, PageData, Product};
use crate::scrapers::HttpClient;

/// Outcome of one category task.
pub struct CategoryFetch {
    pub source: CategorySource,
    pub products: Vec<Product>,
    /// Present when the task degraded to an empty list.
    pub diagnostic: Option<String>,
}

/// Fetch and extract all configured categories in parallel.
///
/// Never fails: client construction errors degrade every category to
/// empty, task errors degrade their own category only.
pub async fn fetch_all_categories(config: &Config) -> PageData {
    let client = match HttpClient::new(&config.user_agent, &config.cookie, config.timeout()) {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "failed to build HTTP client");
            return PageData {
                categories: config
                    .categories
                    .iter()
                    .map(|s| Category::new(s.id.clone(), s.name.clone(), Vec::new()))
                    .collect(),
            };
        }
    };

    // One task per source; awaiting the handles in spawn order keeps
    // the result in configuration order regardless of completion order.
    let handles: Vec<_> = config
        .categories
        .iter()
        .cloned()
        .map(|source| {
            let client = client.clone();
            tokio::spawn(fetch_category(client, source))
        })
        .collect();

    let mut fetches = Vec::with_capacity(handles.len());
    for (handle, source) in handles.into_iter().zip(config.categories.iter()) {
        match handle.await {
            Ok(fetch) => fetches.push(fetch),
            Err(e) => fetches.push(CategoryFetch {
                source: source.clone(),
                products: Vec::new(),
                diagnostic: Some(format!("category task panicked: {e}")),
            }),
        }
    }

    assemble(fetches)
}

/// Fetch one category page and extract its products. All failures are
/// folded into an empty list plus a diagnostic.
pub async fn fetch_category(client: HttpClient, source: CategorySource) -> CategoryFetch {
    let html = match client.get_text(&source.url).await {
        Ok(html) => html,
        Err(e) => {
            return CategoryFetch {
                source,
                products: Vec::new(),
                diagnostic: Some(format!("fetch failed: {e}")),
            }
        }
    };

    match extract::parse_products(&html) {
        Ok(products) => {
            debug!(category = %source.id, count = products.len(), "extracted products");
            CategoryFetch {
                source,
                products,
                diagnostic: None,
            }
        }
        Err(e) => CategoryFetch {
            source,
            products: Vec::new(),
            diagnostic: Some(format!("extraction failed: {e}")),
        },
    }
}

/// Assemble task outcomes into the final page, logging diagnostics.
fn assemble(fetches: Vec<CategoryFetch>) -> PageData {
    let categories = fetches
        .into_iter()
        .map(|fetch| {
            if let Some(diagnostic) = &fetch.diagnostic {
                warn!(category = %fetch.source.id, "{diagnostic}");
            }
            Category::new(fetch.source.id, fetch.source.name, fetch.products)
        })
        .collect();

    PageData { categories }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(id: &str) -> CategorySource {
        CategorySource {
            id: id.to_string(),
            name: format!("{id}-name"),
            url: format!("https://example.invalid/{id}"),
        }
    }

    #[test]
    fn test_assemble_keeps_order_and_swallows_diagnostics() {
        let fetches = vec![
            CategoryFetch {
                source: source("first"),
                products: vec![Product {
                    name: "白菜".to_string(),
                    price: 1.5,
                    ..Default::default()
                }],
                diagnostic: None,
            },
            CategoryFetch {
                source: source("second"),
                products: Vec::new(),
                diagnostic: Some("fetch failed: timeout".to_string()),
            },
            CategoryFetch {
                source: source("third"),
                products: Vec::new(),
                diagnostic: None,
            },
        ];

        let page = assemble(fetches);
        let ids: Vec<_> = page.categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["first", "second", "third"]);

        // A failed category and a genuinely empty one look the same.
        assert!(page.categories[1].products.is_empty());
        assert!(page.categories[2].products.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_source_degrades_to_empty() {
        let client = HttpClient::new(
            "test-agent",
            "cookie",
            std::time::Duration::from_millis(200),
        )
        .unwrap();

        let fetch = fetch_category(client, source("offline")).await;
        assert!(fetch.products.is_empty());
        assert!(fetch.diagnostic.is_some());
    }
}
