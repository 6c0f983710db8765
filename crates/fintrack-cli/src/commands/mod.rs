//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init, status) and shared utilities (open_db)
//! - `transactions` - Transaction commands (add, list, delete)
//! - `budgets` - Budget goal commands (set, list)
//! - `reports` - Summary, trends, and budget performance commands
//! - `advice` - Advice generation command
//! - `serve` - Web server command

pub mod advice;
pub mod budgets;
pub mod core;
pub mod reports;
pub mod serve;
pub mod transactions;

// Re-export command functions for main.rs
pub use advice::*;
pub use budgets::*;
pub use core::*;
pub use reports::*;
pub use serve::*;
pub use transactions::*;

/// Truncate a string for table display
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max.saturating_sub(3)])
    }
}
