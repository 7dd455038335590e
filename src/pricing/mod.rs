//! Price and spec normalization.
//!
//! Turns raw price/spec text into a comparable per-jin figure:
//! - clean a price string down to its first numeric substring
//! - parse a spec string into a canonical weight in jin
//! - classify products as packaged vs. weight-priced
//! - pick the display unit for the normalized price
//!
//! Field-level failures are values here, never errors: unparseable
//! input resolves to 0 or an empty string and the caller moves on.

mod units;

pub use units::{rules_of, UnitKind, UnitRule, UNIT_PATTERNS, UNIT_RULES};

use regex::Regex;
use std::sync::LazyLock;

/// First decimal-or-integer numeric substring. Alternation order makes
/// the decimal form win over a bare integer at the same position.
static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+|\d+").expect("static number pattern"));

/// Reduce a raw price string to its numeric part.
///
/// "¥12.50" -> "12.50", "价格: 8.80元" -> "8.80". A string with no
/// digits cleans to the literal "0".
pub fn clean_price_text(text: &str) -> String {
    match NUMBER_PATTERN.find(text) {
        Some(m) => m.as_str().to_string(),
        None => "0".to_string(),
    }
}

/// Parse a raw price string to yuan. Malformed input yields 0 silently.
pub fn parse_price(text: &str) -> f64 {
    clean_price_text(text).parse().unwrap_or(0.0)
}

/// Parse a spec string into a canonical weight in jin.
///
/// Weight units convert directly (kg = 2 jin, 500g = 1 jin, ...);
/// packaging units fall back to an estimated weight per piece (a bag
/// counts as 1 jin, a piece as 0.2 jin, ...). Tokens without an
/// estimate (筐, 箱) and unrecognized specs yield 0.
pub fn parse_weight_jin(spec: &str) -> f64 {
    if spec.is_empty() {
        return 0.0;
    }

    for (pattern, rule) in UNIT_PATTERNS.iter() {
        let Some(multiplier) = rule.jin_multiplier else {
            continue;
        };
        if let Some(caps) = pattern.captures(spec) {
            if let Ok(value) = caps[1].parse::<f64>() {
                return value * multiplier;
            }
        }
    }

    0.0
}

/// Whether a spec describes a packaged (per-piece priced) product.
///
/// An empty spec also classifies as packaged: without identifiable
/// weight data the listing is priced as-is rather than per jin.
pub fn is_packaged(spec: &str) -> bool {
    if spec.is_empty() {
        return true;
    }
    rules_of(UnitKind::Packaging).any(|rule| spec.contains(rule.token))
}

/// Display unit for a packaged product, from the first packaging token
/// found in the spec. "元/份" for an empty spec, "元/个" when a token
/// was claimed but not individually mapped.
pub fn packaged_unit(spec: &str) -> String {
    if spec.is_empty() {
        return "元/份".to_string();
    }
    rules_of(UnitKind::Packaging)
        .find(|rule| spec.contains(rule.token))
        .map(|rule| rule.display.to_string())
        .unwrap_or_else(|| "元/个".to_string())
}

/// Price per jin for a weight-priced product. Zero price or an
/// unresolvable weight yields 0.
pub fn price_per_jin(price: f64, spec: &str) -> f64 {
    if price <= 0.0 {
        return 0.0;
    }
    let weight = parse_weight_jin(spec);
    if weight <= 0.0 {
        return 0.0;
    }
    price / weight
}

/// Derive a spec from the product name when no spec text was found.
///
/// A packaging token in the name assumes single-unit packaging ("盒装"
/// becomes "1盒"); a number-adjacent weight unit is extracted verbatim
/// ("精品土豆2.5kg" becomes "2.5kg"); anything else stays empty.
pub fn spec_from_name(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    for rule in rules_of(UnitKind::Packaging) {
        if name.contains(rule.token) {
            return format!("1{}", rule.token);
        }
    }

    for (pattern, rule) in UNIT_PATTERNS.iter() {
        if rule.kind != UnitKind::Weight {
            continue;
        }
        if let Some(m) = pattern.find(name) {
            return m.as_str().to_string();
        }
    }

    String::new()
}
