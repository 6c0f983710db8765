//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod advice;
pub mod budgets;
pub mod health;
pub mod reports;
pub mod transactions;

// Re-export all handlers for use in router
pub use advice::*;
pub use budgets::*;
pub use health::*;
pub use reports::*;
pub use transactions::*;

/// Resolve the owner query parameter to its boundary default
pub(crate) fn owner_or_default(owner: &Option<String>) -> &str {
    owner
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(crate::DEFAULT_OWNER)
}
