//! Receipt total detection
//!
//! Ties extraction and selection together:
//!
//! ```text
//! fragments ─► anchored pass ─┬─ non-empty ─────────────┐
//!                             └─ empty ─► unanchored ───┴─► select ─► DetectionResult
//! ```
//!
//! Detection is pure and synchronous. The only fallible step is OCR, which
//! belongs to the [`OcrEngine`] the caller supplies.

use tracing::debug;

use crate::error::Result;
use crate::extract::{extract, joined_text, ExtractionMode};
use crate::models::{AmountCandidate, DetectionResult, TextFragment};
use crate::ocr::OcrEngine;
use crate::select::select;

/// Candidates for a receipt: anchored first, unanchored only as a fallback
pub fn extract_candidates(fragments: &[TextFragment]) -> Vec<AmountCandidate> {
    let anchored = extract(fragments, ExtractionMode::Anchored);
    if !anchored.is_empty() {
        return anchored;
    }
    extract(fragments, ExtractionMode::Unanchored)
}

/// Detect the purchase total in OCR output for a receipt of `main_category`
pub fn detect_total(fragments: &[TextFragment], main_category: &str) -> DetectionResult {
    let candidates = extract_candidates(fragments);
    let joined = joined_text(fragments);
    let result = select(&candidates, &joined, main_category);

    debug!(
        fragments = fragments.len(),
        candidates = candidates.len(),
        rule = %result.rule,
        amount = ?result.amount,
        "Receipt total detection"
    );

    result
}

/// Detection straight from image bytes, using a caller-supplied OCR engine
pub struct TotalDetector<'a> {
    ocr: &'a dyn OcrEngine,
}

impl<'a> TotalDetector<'a> {
    pub fn new(ocr: &'a dyn OcrEngine) -> Self {
        Self { ocr }
    }

    /// Run OCR on the image and detect its total
    pub fn scan_image(&self, image: &[u8], main_category: &str) -> Result<DetectionResult> {
        let fragments = self.ocr.recognize(image)?;
        Ok(detect_total(&fragments, main_category))
    }
}
