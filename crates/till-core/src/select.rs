//! Total selection from extracted candidates
//!
//! Rules are evaluated in a fixed order, first hit wins:
//! 1. Rent override: Housing receipt mentioning rent, prefer an amount in the
//!    monthly-rent band, otherwise the largest amount.
//! 2. Largest amount: first maximum in input order.
//! 3. No total.
//!
//! Selection never re-filters candidates; range checks happen at extraction.

use rust_decimal::Decimal;

use crate::categories::HOUSING;
use crate::models::{AmountCandidate, DetectionResult, DetectionRule};

/// Words in the receipt text that mark it as a rent receipt (substring match)
pub const RENT_KEYWORDS: &[&str] = &["rent", "rental", "lease", "housing", "apartment"];

/// Lower bound of the monthly-rent band (inclusive)
pub const RENT_BAND_MIN: Decimal = Decimal::from_parts(800, 0, 0, false, 0);

/// Upper bound of the monthly-rent band (inclusive)
pub const RENT_BAND_MAX: Decimal = Decimal::from_parts(1800, 0, 0, false, 0);

pub const RENT_REASON: &str = "rent detected";
pub const NO_TOTAL_REASON: &str = "no clear total found";

/// Which rule fired, with the candidate it picked
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection<'a> {
    Rent(&'a AmountCandidate),
    Largest(&'a AmountCandidate),
    NoTotal,
}

impl Selection<'_> {
    pub fn rule(&self) -> DetectionRule {
        match self {
            Self::Rent(_) => DetectionRule::RentOverride,
            Self::Largest(_) => DetectionRule::LargestAmount,
            Self::NoTotal => DetectionRule::NoTotal,
        }
    }

    pub fn into_result(self) -> DetectionResult {
        let rule = self.rule();
        match self {
            Self::Rent(c) => DetectionResult {
                amount: Some(c.value),
                reason: RENT_REASON.to_string(),
                rule,
            },
            Self::Largest(c) => DetectionResult {
                amount: Some(c.value),
                reason: c.context.clone(),
                rule,
            },
            Self::NoTotal => DetectionResult {
                amount: None,
                reason: NO_TOTAL_REASON.to_string(),
                rule,
            },
        }
    }
}

/// Whether the receipt qualifies for the rent override.
///
/// `joined_ocr_text` is expected lowercase; category gating is an exact match.
pub fn is_rent_receipt(joined_ocr_text: &str, main_category: &str) -> bool {
    main_category == HOUSING && RENT_KEYWORDS.iter().any(|kw| joined_ocr_text.contains(kw))
}

pub fn in_rent_band(value: Decimal) -> bool {
    value >= RENT_BAND_MIN && value <= RENT_BAND_MAX
}

/// Rule 1
pub fn rent_override<'a>(
    candidates: &'a [AmountCandidate],
    joined_ocr_text: &str,
    main_category: &str,
) -> Option<&'a AmountCandidate> {
    if candidates.is_empty() || !is_rent_receipt(joined_ocr_text, main_category) {
        return None;
    }

    // Stable sort keeps input order among equal values
    let mut sorted: Vec<&AmountCandidate> = candidates.iter().collect();
    sorted.sort_by(|a, b| b.value.cmp(&a.value));

    let largest = sorted[0];
    Some(
        sorted
            .into_iter()
            .find(|c| in_rent_band(c.value))
            .unwrap_or(largest),
    )
}

/// Rule 2: the first candidate holding the maximum value
pub fn largest_amount(candidates: &[AmountCandidate]) -> Option<&AmountCandidate> {
    let mut best: Option<&AmountCandidate> = None;
    for candidate in candidates {
        match best {
            Some(b) if candidate.value <= b.value => {}
            _ => best = Some(candidate),
        }
    }
    best
}

/// Run the cascade and report which rule fired
pub fn choose<'a>(
    candidates: &'a [AmountCandidate],
    joined_ocr_text: &str,
    main_category: &str,
) -> Selection<'a> {
    if let Some(c) = rent_override(candidates, joined_ocr_text, main_category) {
        return Selection::Rent(c);
    }
    if let Some(c) = largest_amount(candidates) {
        return Selection::Largest(c);
    }
    Selection::NoTotal
}

/// Pick the receipt total from extracted candidates
pub fn select(
    candidates: &[AmountCandidate],
    joined_ocr_text: &str,
    main_category: &str,
) -> DetectionResult {
    choose(candidates, joined_ocr_text, main_category).into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn candidate(value: &str, context: &str) -> AmountCandidate {
        AmountCandidate {
            value: Decimal::from_str(value).unwrap(),
            raw_text: value.to_string(),
            context: context.to_string(),
        }
    }

    fn amounts(values: &[&str]) -> Vec<AmountCandidate> {
        values
            .iter()
            .map(|v| candidate(v, "total detected"))
            .collect()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_rent_band_refines_largest_pick() {
        let candidates = amounts(&["2000", "1500", "900"]);
        let result = select(&candidates, "monthly rent statement", "Housing");

        assert_eq!(result.amount, Some(dec("1500")));
        assert_eq!(result.reason, RENT_REASON);
        assert_eq!(result.rule, DetectionRule::RentOverride);
    }

    #[test]
    fn test_rent_without_band_match_keeps_largest() {
        let candidates = amounts(&["3000", "4000"]);
        let result = select(&candidates, "lease payment", "Housing");

        assert_eq!(result.amount, Some(dec("4000")));
        assert_eq!(result.rule, DetectionRule::RentOverride);
    }

    #[test]
    fn test_rent_band_is_inclusive() {
        assert!(in_rent_band(dec("800")));
        assert!(in_rent_band(dec("1800")));
        assert!(in_rent_band(dec("1800.00")));
        assert!(!in_rent_band(dec("799.99")));
        assert!(!in_rent_band(dec("1800.01")));

        let candidates = amounts(&["2500", "1800.00", "800"]);
        let result = select(&candidates, "apartment 4b", "Housing");
        assert_eq!(result.amount, Some(dec("1800")));
    }

    #[test]
    fn test_rent_requires_housing_category() {
        let candidates = amounts(&["2000", "1500"]);
        let result = select(&candidates, "rent receipt", "Utilities");

        assert_eq!(result.amount, Some(dec("2000")));
        assert_eq!(result.rule, DetectionRule::LargestAmount);
    }

    #[test]
    fn test_rent_category_match_is_exact() {
        let candidates = amounts(&["2000", "1500"]);
        let result = select(&candidates, "rent receipt", "housing");
        assert_eq!(result.rule, DetectionRule::LargestAmount);
    }

    #[test]
    fn test_rent_requires_keyword() {
        let candidates = amounts(&["2000", "1500"]);
        let result = select(&candidates, "hardware store", "Housing");
        assert_eq!(result.amount, Some(dec("2000")));
        assert_eq!(result.rule, DetectionRule::LargestAmount);
    }

    #[test]
    fn test_rent_keyword_substring_match() {
        // "parent" contains "rent"
        assert!(is_rent_receipt("parent association dues", HOUSING));
    }

    #[test]
    fn test_rent_keywords_without_candidates_is_no_total() {
        let result = select(&[], "rent due", "Housing");
        assert_eq!(result.amount, None);
        assert_eq!(result.reason, NO_TOTAL_REASON);
        assert_eq!(result.rule, DetectionRule::NoTotal);
    }

    #[test]
    fn test_largest_amount_uses_context_as_reason() {
        let candidates = vec![
            candidate("45.00", "subtotal 45.00"),
            candidate("52.30", "total 52.30"),
        ];
        let result = select(&candidates, "subtotal 45.00 total 52.30 tip", "Food");

        assert_eq!(result.amount, Some(dec("52.30")));
        assert_eq!(result.reason, "total 52.30");
        assert_eq!(result.rule, DetectionRule::LargestAmount);
    }

    #[test]
    fn test_largest_amount_first_maximum_wins() {
        let candidates = vec![
            candidate("52.30", "subtotal 52.30"),
            candidate("52.3", "total 52.3"),
            candidate("10.00", "balance 10.00"),
        ];
        let picked = largest_amount(&candidates).unwrap();
        assert_eq!(picked.context, "subtotal 52.30");
    }

    #[test]
    fn test_rent_ties_keep_input_order() {
        let candidates = vec![candidate("1200", "first"), candidate("1200.00", "second")];
        let picked = rent_override(&candidates, "rent", HOUSING).unwrap();
        assert_eq!(picked.context, "first");
    }

    #[test]
    fn test_no_candidates() {
        let result = select(&[], "", "Food");
        assert_eq!(result.amount, None);
        assert_eq!(result.reason, "no clear total found");
        assert!(!result.is_found());
        assert_eq!(result.amount_or_zero(), Decimal::ZERO);
    }

    #[test]
    fn test_choose_reports_rule_per_branch() {
        let candidates = amounts(&["1000.00"]);
        assert!(matches!(
            choose(&candidates, "rent", HOUSING),
            Selection::Rent(_)
        ));
        assert!(matches!(
            choose(&candidates, "groceries", HOUSING),
            Selection::Largest(_)
        ));
        assert_eq!(choose(&[], "rent", HOUSING), Selection::NoTotal);
    }
}
