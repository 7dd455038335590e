//! Single data-driven unit table backing weight parsing, packaged
//! classification and display units.
//!
//! The same token list used to be repeated in three places in the old
//! handler; every consumer now reads this table so the priority order
//! is defined exactly once.

use regex::Regex;
use std::sync::LazyLock;

/// Whether a unit token prices by weight or by packaging count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Weight,
    Packaging,
}

/// One recognized unit token.
#[derive(Debug, Clone, Copy)]
pub struct UnitRule {
    /// Token as it appears in spec text ("斤", "kg", "盒", ...).
    pub token: &'static str,
    pub kind: UnitKind,
    /// Jin per unit for weight tokens, estimated jin per piece for
    /// packaging tokens. `None` for packaging tokens that classify a
    /// product but carry no weight estimate (筐, 箱).
    pub jin_multiplier: Option<f64>,
    /// Display unit when this token decides the price ("元/盒", ...).
    pub display: &'static str,
}

/// Unit rules in match priority order: weight units first, then
/// packaging units. Order is load-bearing ("kg" must precede "g",
/// "千克" must precede "克").
pub static UNIT_RULES: &[UnitRule] = &[
    UnitRule { token: "斤", kind: UnitKind::Weight, jin_multiplier: Some(1.0), display: "元/斤" },
    UnitRule { token: "kg", kind: UnitKind::Weight, jin_multiplier: Some(2.0), display: "元/斤" },
    UnitRule { token: "千克", kind: UnitKind::Weight, jin_multiplier: Some(2.0), display: "元/斤" },
    UnitRule { token: "g", kind: UnitKind::Weight, jin_multiplier: Some(0.002), display: "元/斤" },
    UnitRule { token: "克", kind: UnitKind::Weight, jin_multiplier: Some(0.002), display: "元/斤" },
    UnitRule { token: "两", kind: UnitKind::Weight, jin_multiplier: Some(0.1), display: "元/斤" },
    UnitRule { token: "磅", kind: UnitKind::Weight, jin_multiplier: Some(0.907), display: "元/斤" },
    UnitRule { token: "盒", kind: UnitKind::Packaging, jin_multiplier: Some(0.5), display: "元/盒" },
    UnitRule { token: "袋", kind: UnitKind::Packaging, jin_multiplier: Some(1.0), display: "元/袋" },
    UnitRule { token: "包", kind: UnitKind::Packaging, jin_multiplier: Some(1.0), display: "元/包" },
    UnitRule { token: "筐", kind: UnitKind::Packaging, jin_multiplier: None, display: "元/筐" },
    UnitRule { token: "箱", kind: UnitKind::Packaging, jin_multiplier: None, display: "元/箱" },
    UnitRule { token: "个", kind: UnitKind::Packaging, jin_multiplier: Some(0.2), display: "元/个" },
    UnitRule { token: "只", kind: UnitKind::Packaging, jin_multiplier: Some(0.3), display: "元/只" },
    UnitRule { token: "束", kind: UnitKind::Packaging, jin_multiplier: Some(0.5), display: "元/束" },
    UnitRule { token: "把", kind: UnitKind::Packaging, jin_multiplier: Some(0.3), display: "元/把" },
    UnitRule { token: "根", kind: UnitKind::Packaging, jin_multiplier: Some(0.1), display: "元/根" },
];

/// `number + unit` patterns compiled per rule, in rule order.
/// Case-insensitive so "KG" and "kg" match alike.
pub static UNIT_PATTERNS: LazyLock<Vec<(Regex, &'static UnitRule)>> = LazyLock::new(|| {
    UNIT_RULES
        .iter()
        .map(|rule| {
            let pattern = format!(r"(?i)(\d+(?:\.\d+)?)\s*{}", regex::escape(rule.token));
            (Regex::new(&pattern).expect("static unit pattern"), rule)
        })
        .collect()
});

/// Iterate rules of one kind in priority order.
pub fn rules_of(kind: UnitKind) -> impl Iterator<Item = &'static UnitRule> {
    UNIT_RULES.iter().filter(move |r| r.kind == kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_all_tokens() {
        let weight: Vec<_> = rules_of(UnitKind::Weight).map(|r| r.token).collect();
        assert_eq!(weight, ["斤", "kg", "千克", "g", "克", "两", "磅"]);

        let packaging: Vec<_> = rules_of(UnitKind::Packaging).map(|r| r.token).collect();
        assert_eq!(
            packaging,
            ["盒", "袋", "包", "筐", "箱", "个", "只", "束", "把", "根"]
        );
    }

    #[test]
    fn test_kg_precedes_g() {
        let kg = UNIT_RULES.iter().position(|r| r.token == "kg").unwrap();
        let g = UNIT_RULES.iter().position(|r| r.token == "g").unwrap();
        assert!(kg < g);
    }

    #[test]
    fn test_basket_and_crate_have_no_estimate() {
        for token in ["筐", "箱"] {
            let rule = UNIT_RULES.iter().find(|r| r.token == token).unwrap();
            assert_eq!(rule.kind, UnitKind::Packaging);
            assert!(rule.jin_multiplier.is_none());
        }
    }

    #[test]
    fn test_patterns_compile_and_match() {
        for (pattern, rule) in UNIT_PATTERNS.iter() {
            let sample = format!("2.5{}", rule.token);
            let caps = pattern.captures(&sample).unwrap();
            assert_eq!(&caps[1], "2.5");
        }
    }
}
