//! Transaction operations

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{NewTransaction, Transaction, TransactionKind};

fn transaction_from_row(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let kind_str: String = row.get(2)?;
    let kind = kind_str.parse::<TransactionKind>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e)),
        )
    })?;
    let date_str: String = row.get(6)?;
    let created_at: String = row.get(7)?;

    Ok(Transaction {
        id: row.get(0)?,
        owner: row.get(1)?,
        kind,
        category: row.get(3)?,
        amount: row.get(4)?,
        description: row.get(5)?,
        occurred_on: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").unwrap_or_default(),
        recorded_at: parse_datetime(&created_at),
    })
}

impl Database {
    /// Insert a transaction and return its assigned id
    ///
    /// Validation happens before any store mutation; `recorded_at` is
    /// assigned by the store and never changes afterwards.
    pub fn insert_transaction(&self, owner: &str, tx: &NewTransaction) -> Result<i64> {
        tx.validate()?;

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO transactions (user_id, kind, category, amount, description, date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                owner,
                tx.kind.as_str(),
                tx.category,
                tx.amount,
                tx.description,
                tx.occurred_on.to_string(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List an owner's transactions, most recent first
    ///
    /// Ordered by occurrence date descending, ties broken by creation
    /// timestamp descending. The returned sequence is a snapshot.
    pub fn list_transactions(&self, owner: &str, limit: i64) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, user_id, kind, category, amount, description, date, created_at
            FROM transactions
            WHERE user_id = ?
            ORDER BY date DESC, created_at DESC, id DESC
            LIMIT ?
            "#,
        )?;

        let transactions = stmt
            .query_map(params![owner, limit], transaction_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(transactions)
    }

    /// Get a single transaction by id
    pub fn get_transaction(&self, owner: &str, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;

        let tx = conn
            .query_row(
                r#"
                SELECT id, user_id, kind, category, amount, description, date, created_at
                FROM transactions
                WHERE user_id = ? AND id = ?
                "#,
                params![owner, id],
                transaction_from_row,
            )
            .optional()?;

        Ok(tx)
    }

    /// Delete a transaction by id, returning whether a row existed
    pub fn delete_transaction(&self, owner: &str, id: i64) -> Result<bool> {
        let conn = self.conn()?;

        let deleted = conn.execute(
            "DELETE FROM transactions WHERE user_id = ? AND id = ?",
            params![owner, id],
        )?;

        Ok(deleted > 0)
    }

    /// Count all transactions for an owner
    pub fn count_transactions(&self, owner: &str) -> Result<i64> {
        let conn = self.conn()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM transactions WHERE user_id = ?",
            params![owner],
            |row| row.get(0),
        )?;

        Ok(count)
    }
}
