//! Advice command implementation

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::{Datelike, Local};
use fintrack_core::ai::{AdviceBackend, AdviceClient};
use fintrack_core::db::Database;
use fintrack_core::models::AdviceRequest;

pub async fn cmd_advice(
    db: &Database,
    owner: &str,
    context: Option<&str>,
    limit: i64,
) -> Result<()> {
    let Some(client) = AdviceClient::from_env() else {
        println!("💡 Advice backend not configured.");
        println!("   Set GEMINI_API_KEY to enable advice generation.");
        return Ok(());
    };

    // Snapshot the ledger: recent transactions plus this month's goals
    let transactions = db.list_transactions(owner, limit)?;
    let records = transactions
        .iter()
        .filter_map(|tx| match serde_json::to_value(tx) {
            Ok(serde_json::Value::Object(map)) => Some(map),
            _ => None,
        })
        .collect::<Vec<_>>();

    let today = Local::now().date_naive();
    let goals: BTreeMap<String, f64> = db
        .list_budget_goals(owner, Some((today.month(), today.year())))?
        .into_iter()
        .map(|g| (g.category, g.amount))
        .collect();

    let request = AdviceRequest {
        transactions: records,
        budget_goals: if goals.is_empty() { None } else { Some(goals) },
        user_context: context.map(|s| s.to_string()),
    };

    println!(
        "🤖 Asking {} for advice on {} transactions...",
        client.model(),
        request.transactions.len()
    );

    let advice = client.generate_advice(&request).await?;

    println!();
    println!("{}", advice);

    Ok(())
}
