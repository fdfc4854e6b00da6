//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::ReceiptInput;

/// Till - Turn receipt photos into categorized expenses
#[derive(Parser)]
#[command(name = "till")]
#[command(about = "Self-hosted receipt expense tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "till.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set TILL_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the receipt text comes from
#[derive(Args, Debug, Clone, Default)]
pub struct ReceiptArgs {
    /// OCR output file (JSON fragments)
    #[arg(long, conflicts_with = "image")]
    pub ocr_json: Option<PathBuf>,

    /// Receipt image to run through the OCR command
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// OCR command (receives the image path, prints JSON fragments)
    ///
    /// Defaults to the TILL_OCR_COMMAND environment variable.
    #[arg(long, requires = "image")]
    pub ocr_cmd: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Show expense categories
    Categories,

    /// Detect the total on a receipt
    Scan {
        /// Main category of the receipt (e.g. Food, Housing)
        #[arg(short, long)]
        category: String,

        #[command(flatten)]
        receipt: ReceiptArgs,

        /// Print the detection result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Save an expense
    Add {
        /// Main category
        #[arg(short, long)]
        category: String,

        /// Subcategory
        #[arg(short, long)]
        subcategory: String,

        /// Amount (detected from the receipt when omitted)
        #[arg(short, long)]
        amount: Option<String>,

        /// Free-text notes
        #[arg(short, long, default_value = "")]
        notes: String,

        #[command(flatten)]
        receipt: ReceiptArgs,
    },

    /// List recent expenses
    List {
        /// Number of expenses to show
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },

    /// Delete expenses by ID
    Delete {
        /// Expense IDs (see `till list`)
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Show dashboard summary
    Dashboard,

    /// Export all expenses
    Export {
        /// Output format: csv or json
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        /// By default, the server requires an API key from TILL_API_KEYS.
        #[arg(long)]
        no_auth: bool,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

impl ReceiptArgs {
    /// The receipt source selected on the command line, if any
    pub fn input(&self) -> Option<ReceiptInput<'_>> {
        if let Some(path) = &self.ocr_json {
            return Some(ReceiptInput::OcrJson(path));
        }
        self.image.as_deref().map(|path| ReceiptInput::Image {
            path,
            ocr_cmd: self.ocr_cmd.as_deref(),
        })
    }
}
