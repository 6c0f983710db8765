//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Fintrack - Track spending, budgets, and get advice
#[derive(Parser)]
#[command(name = "fintrack")]
#[command(about = "Self-hosted personal finance tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "fintrack.db", global = true)]
    pub db: PathBuf,

    /// Ledger owner all commands operate on
    #[arg(long, default_value = "default", global = true)]
    pub owner: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Record a transaction
    Add {
        /// Transaction kind: income or expense
        #[arg(short, long)]
        kind: String,

        /// Free-form category label
        #[arg(short, long)]
        category: String,

        /// Amount (non-negative; the kind carries the sign)
        #[arg(short, long)]
        amount: f64,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,

        /// Date the transaction happened (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List recent transactions
    List {
        /// Maximum number of transactions to show
        #[arg(short, long, default_value = "100")]
        limit: i64,
    },

    /// Delete a transaction by id
    Delete {
        /// Transaction id
        id: i64,
    },

    /// Manage budget goals
    Budget {
        #[command(subcommand)]
        action: BudgetAction,
    },

    /// Show the financial summary
    Summary {
        /// How many recent transactions to summarize
        #[arg(short, long, default_value = "100")]
        limit: i64,
    },

    /// Show spending trends (monthly, by category, by weekday)
    Trends,

    /// Show budget performance for a period
    Performance {
        /// Period month (1-12, defaults to the current month)
        #[arg(short, long)]
        month: Option<u32>,

        /// Period year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Generate financial advice from the ledger
    Advice {
        /// Extra free-text context for the advisor
        #[arg(short, long)]
        context: Option<String>,

        /// How many recent transactions to send
        #[arg(short, long, default_value = "100")]
        limit: i64,
    },

    /// Show ledger status
    Status,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// CORS origin to allow (repeatable)
        #[arg(long = "allow-origin")]
        allow_origins: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum BudgetAction {
    /// Set or replace a budget goal for a category and period
    Set {
        /// Category the cap applies to
        #[arg(short, long)]
        category: String,

        /// Cap amount
        #[arg(short, long)]
        amount: f64,

        /// Period month (1-12)
        #[arg(short, long)]
        month: u32,

        /// Period year (4-digit)
        #[arg(short, long)]
        year: i32,
    },

    /// List budget goals
    List {
        /// Filter to a period month (requires --year)
        #[arg(short, long)]
        month: Option<u32>,

        /// Filter to a period year (requires --month)
        #[arg(short, long)]
        year: Option<i32>,
    },
}
