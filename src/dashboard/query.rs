//! Database queries for the dashboard report.
//!
//! These are aggregate queries that return computed summaries rather than
//! individual rows. The full transaction listing lives in the transaction
//! module.

use std::ops::RangeInclusive;

use rusqlite::{Connection, params_from_iter, types::Value};
use time::Date;

use crate::{Error, transaction::TransactionType, user::UserID};

/// Sum a user's transaction amounts within `date_range` (inclusive).
///
/// Passing a `transaction_type` restricts the sum to that type, `None` sums
/// every transaction in the range. Returns 0 when no rows match.
///
/// # Errors
/// Returns [Error::SqlError] if SQL query preparation or execution fails.
pub(super) fn sum_in_range(
    user_id: UserID,
    date_range: &RangeInclusive<Date>,
    transaction_type: Option<TransactionType>,
    connection: &Connection,
) -> Result<i64, Error> {
    let base_query = "SELECT COALESCE(SUM(amount), 0) FROM \"transaction\"
         WHERE user_id = ?1 AND date BETWEEN ?2 AND ?3";

    let mut params = vec![
        Value::Integer(user_id.as_i64()),
        Value::Text(date_range.start().to_string()),
        Value::Text(date_range.end().to_string()),
    ];

    let query = match transaction_type {
        Some(transaction_type) => {
            params.push(Value::Text(transaction_type.as_str().to_owned()));
            format!("{base_query} AND type = ?4")
        }
        None => base_query.to_owned(),
    };

    connection
        .prepare(&query)?
        .query_row(params_from_iter(params), |row| row.get(0))
        .map_err(|error| error.into())
}

/// Sum a user's expenses within `date_range` (inclusive), partitioned by
/// category label.
///
/// Categories are returned largest total first so the breakdown reads from
/// biggest spender down. Returns an empty vector when no expenses match.
///
/// # Errors
/// Returns [Error::SqlError] if SQL query preparation or execution fails.
pub(super) fn expense_totals_by_category(
    user_id: UserID,
    date_range: &RangeInclusive<Date>,
    connection: &Connection,
) -> Result<Vec<(String, i64)>, Error> {
    let params = [
        Value::Integer(user_id.as_i64()),
        Value::Text(date_range.start().to_string()),
        Value::Text(date_range.end().to_string()),
        Value::Text(TransactionType::Expense.as_str().to_owned()),
    ];

    connection
        .prepare(
            "SELECT category, SUM(amount) FROM \"transaction\"
             WHERE user_id = ?1 AND date BETWEEN ?2 AND ?3 AND type = ?4
             GROUP BY category
             ORDER BY SUM(amount) DESC, category ASC",
        )?
        .query_map(params_from_iter(params), |row| {
            Ok((row.get(0)?, row.get(1)?))
        })?
        .map(|maybe_row| maybe_row.map_err(Error::SqlError))
        .collect()
}
