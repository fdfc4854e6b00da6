//! Server command implementation

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use till_core::categories::Taxonomy;
use till_core::ocr::{CachedOcr, CommandOcr, OcrEngine, OCR_COMMAND_ENV};

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_auth: bool,
    no_encrypt: bool,
    static_dir: Option<&Path>,
    taxonomy: Taxonomy,
) -> Result<()> {
    println!("🚀 Starting Till web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }

    // Parse API keys from environment (comma-separated)
    let api_keys =
        till_server::parse_api_keys(&std::env::var(till_server::API_KEYS_ENV).unwrap_or_default());

    // Same image uploaded twice is only OCR'd once
    let ocr: Option<Arc<dyn OcrEngine>> = match CommandOcr::from_env() {
        Some(command) => {
            println!("   🔎 OCR: {} ({})", command.program(), OCR_COMMAND_ENV);
            Some(Arc::new(CachedOcr::new(command)))
        }
        None => {
            println!("   💡 Tip: Set {} to enable receipt image scanning", OCR_COMMAND_ENV);
            None
        }
    };

    if no_auth {
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
    } else if api_keys.is_empty() {
        println!(
            "   ❌ Authentication required but {} is not set - all API requests will be rejected",
            till_server::API_KEYS_ENV
        );
    } else {
        println!(
            "   🔑 API keys: {} configured ({})",
            api_keys.len(),
            till_server::API_KEYS_ENV
        );
    }
    if no_encrypt {
        println!("   ⚠️  Encryption DISABLED (--no-encrypt)");
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path, no_encrypt)?;

    let config = till_server::ServerConfig {
        require_auth: !no_auth,
        allowed_origins: vec![],
        api_keys,
    };

    let static_dir_str = static_dir
        .map(|p| p.to_str().context("static_dir path must be valid UTF-8"))
        .transpose()?;
    till_server::serve_with_config(db, host, port, static_dir_str, config, taxonomy, ocr).await?;

    Ok(())
}
