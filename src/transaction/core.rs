//! Defines the core data models and database queries for transactions.

use std::ops::RangeInclusive;

use rusqlite::{Connection, Row, types::Value};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{Error, database_id::TransactionId, user::UserID};

/// The category label given to transactions that were created without one.
pub const UNCATEGORIZED_LABEL: &str = "Other";

// ============================================================================
// MODELS
// ============================================================================

/// The kind of money movement a transaction records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Money entering the account, e.g. a salary payment.
    Deposit,
    /// Money spent, e.g. rent or groceries.
    Expense,
    /// Money moved into an investment, e.g. an index fund purchase.
    Investment,
}

impl TransactionType {
    /// The name the transaction type is stored under in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "DEPOSIT",
            Self::Expense => "EXPENSE",
            Self::Investment => "INVESTMENT",
        }
    }

    /// Parse a stored transaction type name.
    ///
    /// Returns `None` for names that [TransactionType::as_str] does not produce.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "DEPOSIT" => Some(Self::Deposit),
            "EXPENSE" => Some(Self::Expense),
            "INVESTMENT" => Some(Self::Investment),
            _ => None,
        }
    }
}

/// A deposit, expense or investment, i.e. an event where money moved in or out
/// of the user's account.
///
/// Amounts are integer minor units (e.g. cents) so that report arithmetic is
/// exact.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money that moved, in minor units.
    pub amount: i64,
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// Whether the transaction is a deposit, expense or investment.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The category label of the transaction, e.g. "Housing".
    pub category: String,
    /// The ID of the user the transaction belongs to.
    pub user_id: UserID,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        amount: i64,
        date: Date,
        transaction_type: TransactionType,
        user_id: UserID,
    ) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            date,
            description: String::new(),
            transaction_type,
            category: UNCATEGORIZED_LABEL.to_owned(),
            user_id,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// The required fields are set through [Transaction::build], the optional
/// fields through the setter methods. Pass the finished builder to
/// [create_transaction] to insert the transaction and get back the stored row.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The amount of money that moved, in minor units.
    pub amount: i64,
    /// The date when the transaction occurred. Must not be in the future.
    pub date: Date,
    /// A human-readable description of the transaction.
    pub description: String,
    /// Whether the transaction is a deposit, expense or investment.
    pub transaction_type: TransactionType,
    /// The category label, e.g. "Housing", "Food". Defaults to
    /// [UNCATEGORIZED_LABEL].
    pub category: String,
    /// The ID of the user the transaction belongs to.
    pub user_id: UserID,
}

impl TransactionBuilder {
    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the category label for the transaction.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database from a builder.
///
/// Dates must be no later than today.
///
/// # Errors
/// This function will return a:
/// - [Error::FutureDate] if the transaction date is after today,
/// - [Error::NotFound] if the user ID does not refer to a registered user,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if builder.date > OffsetDateTime::now_utc().date() {
        return Err(Error::FutureDate(builder.date));
    }

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (amount, date, description, type, category, user_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, amount, date, description, type, category, user_id",
        )?
        .query_row(
            (
                builder.amount,
                builder.date,
                builder.description,
                builder.transaction_type.as_str(),
                builder.category,
                builder.user_id.as_i64(),
            ),
            map_transaction_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::NotFound,
            error => error.into(),
        })?;

    Ok(transaction)
}

/// Retrieve a user's transactions within `date_range` (inclusive), newest
/// first.
///
/// Transactions on the same date are returned in reverse insertion order so
/// that the listing is stable.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_transactions_in_date_range(
    user_id: UserID,
    date_range: &RangeInclusive<Date>,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let params = [
        Value::Integer(user_id.as_i64()),
        Value::Text(date_range.start().to_string()),
        Value::Text(date_range.end().to_string()),
    ];

    connection
        .prepare(
            "SELECT id, amount, date, description, type, category, user_id
             FROM \"transaction\"
             WHERE user_id = ?1 AND date BETWEEN ?2 AND ?3
             ORDER BY date DESC, id DESC",
        )?
        .query_map(rusqlite::params_from_iter(params), map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
        .collect()
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount INTEGER NOT NULL,
                date TEXT NOT NULL,
                description TEXT NOT NULL,
                type TEXT NOT NULL,
                category TEXT NOT NULL,
                user_id INTEGER NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    // Composite index used by the dashboard report queries.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_user_date ON \"transaction\"(user_id, date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let date = row.get(2)?;
    let description = row.get(3)?;
    let raw_type: String = row.get(4)?;
    let category = row.get(5)?;
    let user_id = UserID::new(row.get(6)?);

    let transaction_type = TransactionType::from_name(&raw_type).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            rusqlite::types::Type::Text,
            format!("unknown transaction type \"{raw_type}\"").into(),
        )
    })?;

    Ok(Transaction {
        id,
        amount,
        date,
        description,
        transaction_type,
        category,
        user_id,
    })
}

// ============================================================================
// TESTS
// ============================================================================
