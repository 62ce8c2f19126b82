//! Transaction management for the dashboard service.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - Database functions for storing and querying transactions
//! - Date-range helpers for selecting a calendar month of transactions

mod core;
mod range;

pub use self::core::{
    Transaction, TransactionBuilder, TransactionType, create_transaction,
    create_transaction_table, get_transactions_in_date_range,
};
pub use range::{last_day_of_month, month_bounds};
