//! Advice prompt assembly
//!
//! Builds the structured natural-language prompt sent to the advice
//! generator. The transaction records are caller-supplied key/value maps and
//! are embedded verbatim; categories are free-form strings.

use crate::models::AdviceRequest;

/// Render the advice prompt from a ledger snapshot
pub fn build_advice_prompt(request: &AdviceRequest) -> String {
    let transactions_json = serde_json::to_string_pretty(&request.transactions)
        .unwrap_or_else(|_| "[]".to_string());

    let goals_block = match &request.budget_goals {
        Some(goals) => {
            serde_json::to_string_pretty(goals).unwrap_or_else(|_| "{}".to_string())
        }
        None => "No budget goals set".to_string(),
    };

    let context_block = request
        .user_context
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("No additional context provided");

    format!(
        r#"You are a professional financial advisor. Analyze the following financial data and provide personalized advice.

TRANSACTION DATA:
{transactions_json}

BUDGET GOALS:
{goals_block}

USER CONTEXT:
{context_block}

Please provide:
1. Overall financial health assessment
2. Spending pattern analysis
3. Specific recommendations for improvement
4. Budget suggestions
5. Savings opportunities
6. Warning about any concerning trends

Keep the advice practical, actionable, and encouraging. Format your response in a clear, easy-to-read manner.
"#
    )
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_prompt_embeds_all_three_sections() {
        let mut tx = serde_json::Map::new();
        tx.insert("category".to_string(), serde_json::json!("food"));
        tx.insert("amount".to_string(), serde_json::json!(42.5));

        let mut goals = BTreeMap::new();
        goals.insert("food".to_string(), 300.0);

        let request = AdviceRequest {
            transactions: vec![tx],
            budget_goals: Some(goals),
            user_context: Some("Saving for a house".to_string()),
        };

        let prompt = build_advice_prompt(&request);
        assert!(prompt.contains("\"category\": \"food\""));
        assert!(prompt.contains("\"food\": 300.0"));
        assert!(prompt.contains("Saving for a house"));
    }

    #[test]
    fn test_prompt_placeholders_when_optional_fields_missing() {
        let request = AdviceRequest::default();

        let prompt = build_advice_prompt(&request);
        assert!(prompt.contains("No budget goals set"));
        assert!(prompt.contains("No additional context provided"));
    }

    #[test]
    fn test_unknown_transaction_keys_pass_through() {
        let mut tx = serde_json::Map::new();
        tx.insert("merchant_note".to_string(), serde_json::json!("corner shop"));

        let request = AdviceRequest {
            transactions: vec![tx],
            budget_goals: None,
            user_context: None,
        };

        let prompt = build_advice_prompt(&request);
        assert!(prompt.contains("merchant_note"));
        assert!(prompt.contains("corner shop"));
    }
}
