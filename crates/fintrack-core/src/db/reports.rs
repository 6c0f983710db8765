//! Trend analytics and per-period expense totals
//!
//! All lookback windows are anchored at a caller-supplied date rather than
//! the database clock, so tests can pin "now".

use chrono::{Duration, Months, NaiveDate};
use rusqlite::params;

use super::Database;
use crate::error::Result;
use crate::models::{CategoryTrend, DailyPattern, MonthlyTrend, SpendingTrends};

/// Lookback for category and day-of-week aggregations
const SHORT_WINDOW_DAYS: i64 = 30;

/// Lookback for the month-by-month trend, in calendar months
const MONTHLY_WINDOW_MONTHS: u32 = 6;

impl Database {
    /// Income and expense totals per calendar month over the last 6 months
    ///
    /// Months with no activity in the window are omitted, not zero-filled.
    pub fn monthly_trends(&self, owner: &str, today: NaiveDate) -> Result<Vec<MonthlyTrend>> {
        let cutoff = today
            .checked_sub_months(Months::new(MONTHLY_WINDOW_MONTHS))
            .unwrap_or(NaiveDate::MIN);

        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                strftime('%Y-%m', date) AS month,
                SUM(CASE WHEN kind = 'income' THEN amount ELSE 0 END) AS income,
                SUM(CASE WHEN kind = 'expense' THEN amount ELSE 0 END) AS expenses
            FROM transactions
            WHERE user_id = ? AND date >= ?
            GROUP BY strftime('%Y-%m', date)
            ORDER BY month
            "#,
        )?;

        let trends = stmt
            .query_map(params![owner, cutoff.to_string()], |row| {
                Ok(MonthlyTrend {
                    month: row.get(0)?,
                    income: row.get(1)?,
                    expenses: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(trends)
    }

    /// Expense totals, counts, and averages per category over the last 30 days
    ///
    /// Ordered by total descending; ties keep first-inserted-first order.
    pub fn category_trends(&self, owner: &str, today: NaiveDate) -> Result<Vec<CategoryTrend>> {
        let cutoff = today - Duration::days(SHORT_WINDOW_DAYS);

        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                category,
                SUM(amount) AS total_amount,
                COUNT(*) AS transaction_count,
                AVG(amount) AS avg_amount
            FROM transactions
            WHERE user_id = ? AND kind = 'expense' AND date >= ?
            GROUP BY category
            ORDER BY total_amount DESC, MIN(id)
            "#,
        )?;

        let trends = stmt
            .query_map(params![owner, cutoff.to_string()], |row| {
                Ok(CategoryTrend {
                    category: row.get(0)?,
                    total_amount: row.get(1)?,
                    transaction_count: row.get(2)?,
                    avg_amount: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(trends)
    }

    /// Average expense amount per weekday (0=Sunday..6=Saturday) over the
    /// last 30 days
    ///
    /// Weekdays with no expenses are omitted.
    pub fn daily_patterns(&self, owner: &str, today: NaiveDate) -> Result<Vec<DailyPattern>> {
        let cutoff = today - Duration::days(SHORT_WINDOW_DAYS);

        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                CAST(strftime('%w', date) AS INTEGER) AS day_of_week,
                AVG(amount) AS avg_spending
            FROM transactions
            WHERE user_id = ? AND kind = 'expense' AND date >= ?
            GROUP BY strftime('%w', date)
            ORDER BY day_of_week
            "#,
        )?;

        let patterns = stmt
            .query_map(params![owner, cutoff.to_string()], |row| {
                Ok(DailyPattern {
                    day_of_week: row.get(0)?,
                    avg_spending: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(patterns)
    }

    /// All three trend aggregations anchored at the same date
    ///
    /// The aggregations are independent reads over the store; nothing here
    /// holds a lock between them.
    pub fn spending_trends(&self, owner: &str, today: NaiveDate) -> Result<SpendingTrends> {
        Ok(SpendingTrends {
            monthly_trends: self.monthly_trends(owner, today)?,
            category_trends: self.category_trends(owner, today)?,
            daily_patterns: self.daily_patterns(owner, today)?,
        })
    }

    /// Expense sums per category for one calendar month
    ///
    /// Returns every expense category with activity in the period, whether or
    /// not a budget goal exists for it.
    pub fn expense_totals_for_month(
        &self,
        owner: &str,
        month: u32,
        year: i32,
    ) -> Result<Vec<(String, f64)>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT category, SUM(amount) AS actual_spending
            FROM transactions
            WHERE user_id = ?
              AND kind = 'expense'
              AND strftime('%m', date) = ?
              AND strftime('%Y', date) = ?
            GROUP BY category
            ORDER BY category
            "#,
        )?;

        let totals = stmt
            .query_map(
                params![owner, format!("{:02}", month), year.to_string()],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?)),
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(totals)
    }
}
