//! Till CLI - Receipt expense tracker
//!
//! Usage:
//!   till init                                   Initialize database
//!   till scan --category Food --image r.jpg     Detect a receipt's total
//!   till add --category Food --subcategory Groceries --image r.jpg
//!   till dashboard                              Spending summary
//!   till serve --port 3000                      Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Categories => commands::cmd_categories(&commands::load_taxonomy()?),
        Commands::Scan {
            category,
            receipt,
            json,
        } => {
            let taxonomy = commands::load_taxonomy()?;
            commands::cmd_scan(&taxonomy, &category, receipt.input(), json)
        }
        Commands::Add {
            category,
            subcategory,
            amount,
            notes,
            receipt,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let taxonomy = commands::load_taxonomy()?;
            commands::cmd_add(
                &db,
                &taxonomy,
                &category,
                &subcategory,
                amount.as_deref(),
                &notes,
                receipt.input(),
            )
            .map(|_| ())
        }
        Commands::List { limit } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_list(&db, limit)
        }
        Commands::Delete { ids } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_delete(&db, &ids).map(|_| ())
        }
        Commands::Dashboard => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_dashboard(&db)
        }
        Commands::Export { format, output } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_export(&db, &format, output.as_deref())
        }
        Commands::Serve {
            port,
            host,
            no_auth,
            static_dir,
        } => {
            let taxonomy = commands::load_taxonomy()?;
            commands::cmd_serve(
                &cli.db,
                &host,
                port,
                no_auth,
                cli.no_encrypt,
                static_dir.as_deref(),
                taxonomy,
            )
            .await
        }
    }
}
