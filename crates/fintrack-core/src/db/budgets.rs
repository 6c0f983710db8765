//! Budget goal operations

use rusqlite::params;

use super::Database;
use crate::error::Result;
use crate::models::{BudgetGoal, NewBudgetGoal};

impl Database {
    /// Set or replace a budget goal
    ///
    /// The (owner, category, month, year) key is unique; a colliding write
    /// replaces the existing row atomically instead of creating a duplicate.
    pub fn upsert_budget_goal(&self, owner: &str, goal: &NewBudgetGoal) -> Result<i64> {
        goal.validate()?;

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO budget_goals (user_id, category, amount, month, year)
            VALUES (?, ?, ?, ?, ?)
            "#,
            params![owner, goal.category, goal.amount, goal.month, goal.year],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List budget goals, optionally restricted to one (month, year) period
    ///
    /// Ordered by category then id so performance reports iterate goals in a
    /// stable order.
    pub fn list_budget_goals(
        &self,
        owner: &str,
        period: Option<(u32, i32)>,
    ) -> Result<Vec<BudgetGoal>> {
        let conn = self.conn()?;

        let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<BudgetGoal> {
            Ok(BudgetGoal {
                id: row.get(0)?,
                owner: row.get(1)?,
                category: row.get(2)?,
                amount: row.get(3)?,
                month: row.get(4)?,
                year: row.get(5)?,
            })
        };

        let goals = if let Some((month, year)) = period {
            let mut stmt = conn.prepare(
                r#"
                SELECT id, user_id, category, amount, month, year
                FROM budget_goals
                WHERE user_id = ? AND month = ? AND year = ?
                ORDER BY category, id
                "#,
            )?;
            let rows = stmt
                .query_map(params![owner, month, year], map_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        } else {
            let mut stmt = conn.prepare(
                r#"
                SELECT id, user_id, category, amount, month, year
                FROM budget_goals
                WHERE user_id = ?
                ORDER BY year, month, category, id
                "#,
            )?;
            let rows = stmt
                .query_map(params![owner], map_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        };

        Ok(goals)
    }
}
