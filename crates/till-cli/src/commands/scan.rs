//! Receipt scan command and shared receipt loading

use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use till_core::categories::Taxonomy;
use till_core::detect::{detect_total, TotalDetector};
use till_core::models::DetectionResult;
use till_core::ocr::{parse_ocr_json, CommandOcr, OCR_COMMAND_ENV};

/// Where a receipt's text comes from
#[derive(Debug, Clone, Copy)]
pub enum ReceiptInput<'a> {
    /// OCR output saved as JSON
    OcrJson(&'a Path),
    /// Image to run through an OCR command (`None` = TILL_OCR_COMMAND)
    Image {
        path: &'a Path,
        ocr_cmd: Option<&'a str>,
    },
}

fn resolve_ocr(ocr_cmd: Option<&str>) -> Result<CommandOcr> {
    match ocr_cmd {
        Some(cmd) => CommandOcr::from_command_line(cmd).context("Invalid --ocr-cmd"),
        None => CommandOcr::from_env().ok_or_else(|| {
            anyhow!(
                "No OCR command configured. Pass --ocr-cmd or set {}",
                OCR_COMMAND_ENV
            )
        }),
    }
}

/// Run total detection on a receipt for the given main category
pub fn detect_receipt(
    taxonomy: &Taxonomy,
    category: &str,
    input: ReceiptInput<'_>,
) -> Result<DetectionResult> {
    if taxonomy.subcategories(category).is_none() {
        bail!(
            "Unknown category: {} (choose from: {})",
            category,
            taxonomy.main_categories().join(", ")
        );
    }

    match input {
        ReceiptInput::OcrJson(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read OCR output: {}", path.display()))?;
            let fragments = parse_ocr_json(&json)
                .with_context(|| format!("Invalid OCR output in {}", path.display()))?;
            Ok(detect_total(&fragments, category))
        }
        ReceiptInput::Image { path, ocr_cmd } => {
            let image = fs::read(path)
                .with_context(|| format!("Failed to read receipt image: {}", path.display()))?;
            let ocr = resolve_ocr(ocr_cmd)?;
            TotalDetector::new(&ocr)
                .scan_image(&image, category)
                .with_context(|| format!("OCR failed for {}", path.display()))
        }
    }
}

pub fn cmd_scan(
    taxonomy: &Taxonomy,
    category: &str,
    input: Option<ReceiptInput<'_>>,
    json: bool,
) -> Result<()> {
    let input = input.ok_or_else(|| anyhow!("Provide a receipt with --ocr-json or --image"))?;
    let result = detect_receipt(taxonomy, category, input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    println!("🧾 Receipt Scan ({})", category);
    println!("   ─────────────────────────────");
    match result.amount {
        Some(amount) => println!("   💵 Total: ${:.2}", amount),
        None => println!("   ❓ Total: not found, enter the amount manually"),
    }
    println!("   Reason: {}", result.reason);
    println!();

    Ok(())
}
