//! Export command

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use till_core::db::Database;
use till_core::export::ExportFormat;

/// Export every expense as CSV or JSON to a file or stdout
pub fn cmd_export(db: &Database, format: &str, output: Option<&Path>) -> Result<()> {
    let format: ExportFormat = format.parse().map_err(|e: String| anyhow!(e))?;
    let content = db.export_expenses(format)?;

    match output {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            file.write_all(content.as_bytes())?;

            let count = db.count_expenses()?;
            println!(
                "✅ Exported {} expenses ({}) to {}",
                count,
                format,
                path.display()
            );
        }
        None => {
            // Write to stdout
            print!("{}", content);
        }
    }

    Ok(())
}
