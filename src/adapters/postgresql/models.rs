//! SQL text and row conversion for the PostgreSQL store
//!
//! Rows are selected as `row_to_json(t)` so that every column type arrives
//! as JSON in table column order.

use crate::domain::{FerryError, Record, Result};
use tokio_postgres::Row;

/// Quote a table or column name as a SQL identifier
///
/// Embedded double quotes are doubled, so the result is always a single
/// identifier token.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// `SELECT` for rows whose `column` equals a single text parameter
pub fn select_rows_eq(table: &str, column: &str) -> String {
    format!(
        "SELECT row_to_json(t) FROM {} t WHERE t.{}::text = $1",
        quote_ident(table),
        quote_ident(column)
    )
}

/// `SELECT` for rows whose `column` is in a text array parameter
pub fn select_rows_any(table: &str, column: &str) -> String {
    format!(
        "SELECT row_to_json(t) FROM {} t WHERE t.{}::text = ANY($1)",
        quote_ident(table),
        quote_ident(column)
    )
}

/// `SELECT` for one column's text values restricted to an owner
pub fn select_keys(table: &str, key_column: &str, owner_column: &str) -> String {
    format!(
        "SELECT t.{}::text FROM {} t WHERE t.{}::text = $1",
        quote_ident(key_column),
        quote_ident(table),
        quote_ident(owner_column)
    )
}

/// Convert a `row_to_json` result row into a [`Record`]
///
/// # Errors
///
/// Returns an error if the column is not JSON or not an object.
pub fn record_from_row(row: &Row) -> Result<Record> {
    let value: serde_json::Value = row
        .try_get(0)
        .map_err(|e| FerryError::Database(format!("Failed to decode row: {e}")))?;
    record_from_json(value)
}

/// Unwrap a JSON object into a [`Record`]
pub fn record_from_json(value: serde_json::Value) -> Result<Record> {
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(FerryError::Database(format!(
            "Expected a JSON object per row, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("invoices"), "\"invoices\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_select_rows_eq() {
        assert_eq!(
            select_rows_eq("invoices", "user_id"),
            "SELECT row_to_json(t) FROM \"invoices\" t WHERE t.\"user_id\"::text = $1"
        );
    }

    #[test]
    fn test_select_rows_any() {
        assert_eq!(
            select_rows_any("invoice_items", "invoice_id"),
            "SELECT row_to_json(t) FROM \"invoice_items\" t WHERE t.\"invoice_id\"::text = ANY($1)"
        );
    }

    #[test]
    fn test_select_keys() {
        assert_eq!(
            select_keys("classes", "id", "user_id"),
            "SELECT t.\"id\"::text FROM \"classes\" t WHERE t.\"user_id\"::text = $1"
        );
    }

    #[test]
    fn test_record_from_json_preserves_column_order() {
        let value: serde_json::Value =
            serde_json::from_str(r#"{"zeta": 1, "alpha": "a", "mid": null}"#).unwrap();
        let record = record_from_json(value).unwrap();
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_record_from_json_rejects_scalars() {
        assert!(record_from_json(json!(42)).is_err());
    }
}
