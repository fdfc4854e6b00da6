//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;
use std::str::FromStr;

use rust_decimal::Decimal;
use tempfile::NamedTempFile;
use till_core::categories::Taxonomy;
use till_core::db::Database;

use crate::commands::{self, truncate, ReceiptInput};

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Write OCR output to a temp file
fn ocr_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

const GROCERY_OCR: &str = r#"[
    [[[0, 0], [10, 0], [10, 10], [0, 10]], "FRESH MART", 0.91],
    [[[0, 20], [10, 20], [10, 30], [0, 30]], "Milk 3.49", 0.88],
    [[[0, 40], [10, 40], [10, 50], [0, 50]], "TOTAL 27.45", 0.96]
]"#;

// ========== Scan Command Tests ==========

#[test]
fn test_detect_receipt_from_ocr_json() {
    let taxonomy = Taxonomy::default();
    let file = ocr_file(GROCERY_OCR);

    let result =
        commands::detect_receipt(&taxonomy, "Food", ReceiptInput::OcrJson(file.path())).unwrap();
    assert_eq!(result.amount, Some(dec("27.45")));
    assert_eq!(result.reason, "total 27.45");
}

#[test]
fn test_detect_receipt_unknown_category() {
    let taxonomy = Taxonomy::default();
    let file = ocr_file(GROCERY_OCR);

    let err = commands::detect_receipt(&taxonomy, "Groceries", ReceiptInput::OcrJson(file.path()))
        .unwrap_err();
    assert!(err.to_string().contains("Unknown category"));
}

#[test]
fn test_detect_receipt_missing_file() {
    let taxonomy = Taxonomy::default();
    let result = commands::detect_receipt(
        &taxonomy,
        "Food",
        ReceiptInput::OcrJson(std::path::Path::new("/nonexistent/ocr.json")),
    );
    assert!(result.is_err());
}

#[cfg(unix)]
#[test]
fn test_detect_receipt_from_image_with_ocr_command() {
    let taxonomy = Taxonomy::default();
    // `cat` echoes the "image" back, which here is already OCR JSON
    let image = ocr_file(r#"["Monthly rent", "Balance 2,600.00", "Amount due 1,375.00"]"#);

    let result = commands::detect_receipt(
        &taxonomy,
        "Housing",
        ReceiptInput::Image {
            path: image.path(),
            ocr_cmd: Some("cat"),
        },
    )
    .unwrap();
    assert_eq!(result.amount, Some(dec("1375.00")));
    assert_eq!(result.reason, "rent detected");
}

#[cfg(unix)]
#[test]
fn test_detect_receipt_ocr_command_failure() {
    let taxonomy = Taxonomy::default();
    let image = ocr_file("not an image");

    let result = commands::detect_receipt(
        &taxonomy,
        "Food",
        ReceiptInput::Image {
            path: image.path(),
            ocr_cmd: Some("false"),
        },
    );
    assert!(result.is_err());
}

#[test]
fn test_cmd_scan_requires_receipt() {
    let taxonomy = Taxonomy::default();
    assert!(commands::cmd_scan(&taxonomy, "Food", None, false).is_err());
}

#[test]
fn test_cmd_scan_json_output() {
    let taxonomy = Taxonomy::default();
    let file = ocr_file(GROCERY_OCR);
    let result = commands::cmd_scan(
        &taxonomy,
        "Food",
        Some(ReceiptInput::OcrJson(file.path())),
        true,
    );
    assert!(result.is_ok());
}

// ========== Add Command Tests ==========

#[test]
fn test_cmd_add_with_amount() {
    let db = setup_test_db();
    let taxonomy = Taxonomy::default();

    let expense = commands::cmd_add(
        &db,
        &taxonomy,
        "Transportation",
        "Fuel",
        Some("45.10"),
        "  fill-up ",
        None,
    )
    .unwrap();

    assert_eq!(expense.amount, dec("45.10"));
    assert_eq!(expense.notes, "fill-up");
    assert_eq!(db.count_expenses().unwrap(), 1);
}

#[test]
fn test_cmd_add_detects_amount_from_receipt() {
    let db = setup_test_db();
    let taxonomy = Taxonomy::default();
    let file = ocr_file(GROCERY_OCR);

    let expense = commands::cmd_add(
        &db,
        &taxonomy,
        "Food",
        "Groceries",
        None,
        "",
        Some(ReceiptInput::OcrJson(file.path())),
    )
    .unwrap();

    assert_eq!(expense.amount, dec("27.45"));
}

#[test]
fn test_cmd_add_amount_overrides_detection() {
    let db = setup_test_db();
    let taxonomy = Taxonomy::default();
    let file = ocr_file(GROCERY_OCR);

    let expense = commands::cmd_add(
        &db,
        &taxonomy,
        "Food",
        "Groceries",
        Some("30.00"),
        "",
        Some(ReceiptInput::OcrJson(file.path())),
    )
    .unwrap();

    assert_eq!(expense.amount, dec("30.00"));
}

#[test]
fn test_cmd_add_no_total_on_receipt() {
    let db = setup_test_db();
    let taxonomy = Taxonomy::default();
    let file = ocr_file(r#"["blurry", "smudge"]"#);

    let result = commands::cmd_add(
        &db,
        &taxonomy,
        "Food",
        "Groceries",
        None,
        "",
        Some(ReceiptInput::OcrJson(file.path())),
    );

    assert!(result.is_err());
    assert_eq!(db.count_expenses().unwrap(), 0);
}

#[test]
fn test_cmd_add_rejects_bad_input() {
    let db = setup_test_db();
    let taxonomy = Taxonomy::default();

    // Not a number
    assert!(
        commands::cmd_add(&db, &taxonomy, "Food", "Groceries", Some("abc"), "", None).is_err()
    );
    // Zero
    assert!(commands::cmd_add(&db, &taxonomy, "Food", "Groceries", Some("0"), "", None).is_err());
    // Subcategory from another category
    assert!(commands::cmd_add(&db, &taxonomy, "Food", "Fuel", Some("10.00"), "", None).is_err());
    // Past the per-expense limit
    assert!(commands::cmd_add(
        &db,
        &taxonomy,
        "Food",
        "Groceries",
        Some("50000000000000000000000000000"),
        "",
        None
    )
    .is_err());
    // Neither amount nor receipt
    assert!(commands::cmd_add(&db, &taxonomy, "Food", "Groceries", None, "", None).is_err());

    assert_eq!(db.count_expenses().unwrap(), 0);
}

// ========== List / Delete Command Tests ==========

#[test]
fn test_cmd_list_empty() {
    let db = setup_test_db();
    assert!(commands::cmd_list(&db, 20).is_ok());
}

#[test]
fn test_cmd_list_with_expenses() {
    let db = setup_test_db();
    let taxonomy = Taxonomy::default();
    commands::cmd_add(
        &db,
        &taxonomy,
        "Healthcare",
        "Medicines",
        Some("18.20"),
        "a very long note that will certainly be truncated in the listing",
        None,
    )
    .unwrap();

    assert!(commands::cmd_list(&db, 0).is_ok());
}

#[test]
fn test_cmd_delete() {
    let db = setup_test_db();
    let taxonomy = Taxonomy::default();
    let a = commands::cmd_add(&db, &taxonomy, "Food", "Groceries", Some("10"), "", None)
        .unwrap()
        .id;
    let b = commands::cmd_add(&db, &taxonomy, "Food", "Groceries", Some("20"), "", None)
        .unwrap()
        .id;

    assert_eq!(commands::cmd_delete(&db, &[a, 9999]).unwrap(), 1);
    assert_eq!(db.count_expenses().unwrap(), 1);
    assert!(db.get_expense(b).unwrap().is_some());

    assert!(commands::cmd_delete(&db, &[]).is_err());
}

// ========== Dashboard / Export Command Tests ==========

#[test]
fn test_cmd_dashboard() {
    let db = setup_test_db();
    assert!(commands::cmd_dashboard(&db).is_ok());

    let taxonomy = Taxonomy::default();
    commands::cmd_add(&db, &taxonomy, "Food", "Groceries", Some("52.30"), "", None).unwrap();
    assert!(commands::cmd_dashboard(&db).is_ok());

    // Largest accepted amount still renders category shares
    commands::cmd_add(
        &db,
        &taxonomy,
        "Housing",
        "Property tax",
        Some("999999999999.99"),
        "",
        None,
    )
    .unwrap();
    assert!(commands::cmd_dashboard(&db).is_ok());
}

#[test]
fn test_cmd_export_to_file() {
    let db = setup_test_db();
    let taxonomy = Taxonomy::default();
    commands::cmd_add(&db, &taxonomy, "Food", "Dining out", Some("52.3"), "dinner", None).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.csv");
    commands::cmd_export(&db, "csv", Some(&path)).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "date,category,subcategory,amount,notes");
    assert!(lines[1].ends_with(",Food,Dining out,52.30,dinner"));
}

#[test]
fn test_cmd_export_json_to_file() {
    let db = setup_test_db();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.json");

    commands::cmd_export(&db, "json", Some(&path)).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(json.as_array().unwrap().is_empty());
}

#[test]
fn test_cmd_export_invalid_format() {
    let db = setup_test_db();
    assert!(commands::cmd_export(&db, "xlsx", None).is_err());
}

// ========== Misc ==========

#[test]
fn test_cmd_categories() {
    assert!(commands::cmd_categories(&Taxonomy::default()).is_ok());
}

#[test]
fn test_open_db_unencrypted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("till.db");

    let db = commands::open_db(&path, true).unwrap();
    assert_eq!(db.count_expenses().unwrap(), 0);
    assert!(path.exists());
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("exactly10!", 10), "exactly10!");
    assert_eq!(truncate("this is too long", 10), "this is...");
    // Multi-byte characters are never split
    assert_eq!(truncate("café au lait", 7), "café...");
}
