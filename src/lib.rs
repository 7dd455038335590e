//! vegprice - vegetable price scraper and per-jin price normalizer.
//!
//! Scrapes five vegetable-category pages from one retail site, pulls
//! product listings out of loosely structured markup with ordered
//! fallback rules, and normalizes every price to 元/斤 so weight-priced
//! and package-priced listings become comparable.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod extract;
pub mod models;
pub mod pricing;
pub mod scrapers;
pub mod server;
pub mod utils;
