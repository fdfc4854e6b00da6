//! Monetary amount candidates from OCR text
//!
//! Two passes share one amount pattern (`[0-9,]+\.?[0-9]*`):
//! - **Anchored**: only fragments mentioning a total keyword are scanned, and each
//!   candidate remembers the fragment it came from.
//! - **Unanchored**: the whole receipt is scanned as one string. Used only when
//!   the anchored pass finds nothing, and additionally requires a decimal point.
//!
//! Both passes drop matches whose comma-stripped form is shorter than
//! [`MIN_NORMALIZED_LEN`] characters. This also rejects short totals such as
//! `9.9` or a bare `42`.
//!
//! Only ASCII digits count. Amounts written in other numeral systems (e.g.
//! Arabic-Indic `١٢٣٤.٥٠`) never match and are not candidates.

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;
use tracing::trace;

use crate::models::{AmountCandidate, TextFragment};

/// Keywords that anchor a fragment as holding a total (substring match)
pub const TOTAL_KEYWORDS: &[&str] = &[
    "total",
    "subtotal",
    "balance",
    "amount due",
    "grand total",
    "final total",
];

/// Minimum length of the comma-stripped match
pub const MIN_NORMALIZED_LEN: usize = 4;

/// Lower bound of a plausible amount (exclusive)
pub const MIN_AMOUNT: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Upper bound of a plausible amount (exclusive)
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);

/// Context attached to candidates from the keyword-free pass
pub const UNANCHORED_CONTEXT: &str = "total detected";

/// Which extraction pass to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    /// Scan only fragments containing a total keyword
    Anchored,
    /// Scan the joined receipt text; decimal amounts only
    Unanchored,
}

fn amount_pattern() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| Regex::new(r"[0-9,]+\.?[0-9]*").expect("invalid amount regex"))
}

/// Lowercased fragment texts joined by single spaces
pub fn joined_text(fragments: &[TextFragment]) -> String {
    fragments
        .iter()
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Whether lowercased text mentions any total keyword
pub fn has_total_keyword(text_lower: &str) -> bool {
    TOTAL_KEYWORDS.iter().any(|kw| text_lower.contains(kw))
}

/// Whether a value lies strictly inside the plausible amount range
pub fn in_plausible_range(value: Decimal) -> bool {
    value > MIN_AMOUNT && value < MAX_AMOUNT
}

/// Extract amount candidates from OCR fragments.
///
/// Output order follows fragment order (anchored) or scan order (unanchored).
pub fn extract(fragments: &[TextFragment], mode: ExtractionMode) -> Vec<AmountCandidate> {
    match mode {
        ExtractionMode::Anchored => {
            let mut candidates = Vec::new();
            for fragment in fragments {
                let context = fragment.text.to_lowercase();
                if !has_total_keyword(&context) {
                    continue;
                }
                for (raw_text, value) in scan_amounts(&fragment.text, false) {
                    candidates.push(AmountCandidate {
                        value,
                        raw_text,
                        context: context.clone(),
                    });
                }
            }
            candidates
        }
        ExtractionMode::Unanchored => scan_amounts(&joined_text(fragments), true)
            .into_iter()
            .map(|(raw_text, value)| AmountCandidate {
                value,
                raw_text,
                context: UNANCHORED_CONTEXT.to_string(),
            })
            .collect(),
    }
}

/// Find every amount-shaped substring that survives the noise, parse and range filters
fn scan_amounts(text: &str, require_decimal_point: bool) -> Vec<(String, Decimal)> {
    amount_pattern()
        .find_iter(text)
        .filter_map(|m| {
            let raw = m.as_str();
            let normalized = raw.replace(',', "");
            if normalized.chars().count() < MIN_NORMALIZED_LEN {
                return None;
            }
            let value = match parse_amount(&normalized) {
                Some(v) => v,
                None => {
                    trace!(raw, "Dropping unparseable amount");
                    return None;
                }
            };
            if !in_plausible_range(value) {
                return None;
            }
            if require_decimal_point && !normalized.contains('.') {
                return None;
            }
            Some((raw.to_string(), value))
        })
        .collect()
}

/// Parse a comma-free amount; a trailing decimal point is allowed ("1200.")
fn parse_amount(normalized: &str) -> Option<Decimal> {
    let digits = normalized.strip_suffix('.').unwrap_or(normalized);
    Decimal::from_str(digits).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frags(texts: &[&str]) -> Vec<TextFragment> {
        texts.iter().map(|t| TextFragment::new(*t, 0.9)).collect()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn values(candidates: &[AmountCandidate]) -> Vec<Decimal> {
        candidates.iter().map(|c| c.value).collect()
    }

    #[test]
    fn test_anchored_keeps_fragment_context() {
        let fragments = frags(&["Subtotal 45.00", "Total 52.30", "Tip"]);
        let candidates = extract(&fragments, ExtractionMode::Anchored);

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].value, dec("45.00"));
        assert_eq!(candidates[0].context, "subtotal 45.00");
        assert_eq!(candidates[1].value, dec("52.30"));
        assert_eq!(candidates[1].context, "total 52.30");
        assert_eq!(candidates[1].raw_text, "52.30");
    }

    #[test]
    fn test_anchored_ignores_fragments_without_keywords() {
        let fragments = frags(&["Coffee 12.50", "Bagel 6.75"]);
        assert!(extract(&fragments, ExtractionMode::Anchored).is_empty());
    }

    #[test]
    fn test_anchored_keyword_match_is_case_insensitive() {
        let fragments = frags(&["GRAND TOTAL: 1,234.56"]);
        let candidates = extract(&fragments, ExtractionMode::Anchored);
        assert_eq!(values(&candidates), vec![dec("1234.56")]);
        assert_eq!(candidates[0].raw_text, "1,234.56");
        assert_eq!(candidates[0].context, "grand total: 1,234.56");
    }

    #[test]
    fn test_anchored_accepts_bare_integers() {
        let fragments = frags(&["Amount due 1200"]);
        assert_eq!(
            values(&extract(&fragments, ExtractionMode::Anchored)),
            vec![dec("1200")]
        );
    }

    #[test]
    fn test_anchored_multiple_numbers_in_one_fragment() {
        let fragments = frags(&["Balance 120.00 of 480.00"]);
        assert_eq!(
            values(&extract(&fragments, ExtractionMode::Anchored)),
            vec![dec("120.00"), dec("480.00")]
        );
    }

    #[test]
    fn test_range_bounds_are_exclusive() {
        let fragments = frags(&["total 5.00", "total 5000.00", "total 5.01", "total 4999.99"]);
        assert_eq!(
            values(&extract(&fragments, ExtractionMode::Anchored)),
            vec![dec("5.01"), dec("4999.99")]
        );
    }

    #[test]
    fn test_short_amounts_are_dropped() {
        // Only commas are stripped, so "9.99" keeps four characters while
        // "5.0" and "999" fall below the cutoff.
        let fragments = frags(&["total 5.0", "total 999", "total 9.99"]);
        let candidates = extract(&fragments, ExtractionMode::Anchored);
        assert_eq!(values(&candidates), vec![dec("9.99")]);
    }

    #[test]
    fn test_short_total_without_cents_digit_is_dropped() {
        let fragments = frags(&["Total 9.9", "Total 42"]);
        assert!(extract(&fragments, ExtractionMode::Anchored).is_empty());
    }

    #[test]
    fn test_commas_do_not_count_toward_length() {
        // ",,12" normalizes to "12"
        let fragments = frags(&["total ,,12"]);
        assert!(extract(&fragments, ExtractionMode::Anchored).is_empty());
    }

    #[test]
    fn test_trailing_decimal_point_parses() {
        let fragments = frags(&["Total 1200."]);
        let candidates = extract(&fragments, ExtractionMode::Anchored);
        assert_eq!(values(&candidates), vec![dec("1200")]);
        assert_eq!(candidates[0].raw_text, "1200.");
    }

    #[test]
    fn test_unparseable_match_is_dropped() {
        // ",.50" normalizes to ".50" (too short); ",,,.500" to ".500" which parses
        // to 0.5 and falls out of range. Neither reaches the caller.
        let fragments = frags(&["total ,.50 ,,,.500"]);
        assert!(extract(&fragments, ExtractionMode::Anchored).is_empty());
    }

    #[test]
    fn test_substring_keyword_matching() {
        // "totally" contains "total"
        let fragments = frags(&["Totally 23.50"]);
        assert_eq!(extract(&fragments, ExtractionMode::Anchored).len(), 1);
    }

    #[test]
    fn test_unanchored_requires_decimal_point() {
        let fragments = frags(&["Store #1234", "Coffee", "23.50", "Thanks"]);
        let candidates = extract(&fragments, ExtractionMode::Unanchored);

        assert_eq!(values(&candidates), vec![dec("23.50")]);
        assert_eq!(candidates[0].context, UNANCHORED_CONTEXT);
    }

    #[test]
    fn test_unanchored_scans_across_fragments_in_order() {
        let fragments = frags(&["Item 12.00", "Item 8.50", "Paid 20.50"]);
        assert_eq!(
            values(&extract(&fragments, ExtractionMode::Unanchored)),
            vec![dec("12.00"), dec("8.50"), dec("20.50")]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(extract(&[], ExtractionMode::Anchored).is_empty());
        assert!(extract(&[], ExtractionMode::Unanchored).is_empty());
    }

    #[test]
    fn test_non_ascii_digits_are_not_amounts() {
        let fragments = frags(&["Total ١٢٣٤.٥٠"]);
        assert!(extract(&fragments, ExtractionMode::Anchored).is_empty());
        assert!(extract(&fragments, ExtractionMode::Unanchored).is_empty());

        let mixed = extract(&frags(&["Total ١٢٣٤.٥٠ 12.50"]), ExtractionMode::Anchored);
        assert_eq!(mixed.len(), 1);
        assert_eq!(mixed[0].raw_text, "12.50");
    }

    #[test]
    fn test_joined_text_is_lowercase_and_space_separated() {
        let fragments = frags(&["MONTHLY RENT", "Due 1,500.00"]);
        assert_eq!(joined_text(&fragments), "monthly rent due 1,500.00");
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let fragments = frags(&["Subtotal 45.00", "Total 52.30"]);
        assert_eq!(
            extract(&fragments, ExtractionMode::Anchored),
            extract(&fragments, ExtractionMode::Anchored)
        );
    }
}
