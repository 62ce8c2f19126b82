//! The dashboard report model and the queries that assemble it.

use rusqlite::Connection;
use serde::Serialize;
use time::Month;

use crate::{
    Error,
    dashboard::{
        aggregation::percentage,
        query::{expense_totals_by_category, sum_in_range},
    },
    transaction::{Transaction, TransactionType, get_transactions_in_date_range, month_bounds},
    user::UserID,
};

/// The calendar year that dashboard reports cover.
///
/// Reports are requested by month number only, so the year is pinned here.
pub const REPORT_YEAR: i32 = 2024;

/// The percentage share each transaction type contributes to the month's
/// grand total.
///
/// The wire names match the stored transaction type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct TypePercentages {
    /// Share of the grand total made up by deposits.
    pub deposit: i64,
    /// Share of the grand total made up by expenses.
    pub expense: i64,
    /// Share of the grand total made up by investments.
    pub investment: i64,
}

/// One category's slice of the month's expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryExpense {
    /// The category label.
    pub category: String,
    /// The summed expense amount for the category, in minor units.
    pub total_amount: i64,
    /// The category's share of the month's total expenses.
    pub percentage_of_total: i64,
}

/// A user's financial summary for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Deposits minus investments minus expenses.
    pub balance: i64,
    /// The month's summed deposits, in minor units.
    pub deposits_total: i64,
    /// The month's summed investments, in minor units.
    pub investments_total: i64,
    /// The month's summed expenses, in minor units.
    pub expenses_total: i64,
    /// Each transaction type's share of the month's grand total.
    pub type_percentages: TypePercentages,
    /// The month's expenses partitioned by category, largest first.
    pub expenses_per_category: Vec<CategoryExpense>,
    /// Every transaction in the month regardless of type, newest first.
    pub last_transactions: Vec<Transaction>,
}

/// Build the dashboard report for `month` of [REPORT_YEAR].
///
/// Issues the aggregate queries, derives the balance and percentage shares,
/// and fetches the month's transaction listing. All reads run on the one
/// `connection`, so as long as the caller holds the connection lock for the
/// duration the report is drawn from a single consistent snapshot.
///
/// # Errors
/// Returns [Error::SqlError] if any of the underlying queries fail.
pub fn build_report(
    user_id: UserID,
    month: Month,
    connection: &Connection,
) -> Result<Report, Error> {
    let date_range = month_bounds(REPORT_YEAR, month);

    let deposits_total = sum_in_range(
        user_id,
        &date_range,
        Some(TransactionType::Deposit),
        connection,
    )?;
    let investments_total = sum_in_range(
        user_id,
        &date_range,
        Some(TransactionType::Investment),
        connection,
    )?;
    let expenses_total = sum_in_range(
        user_id,
        &date_range,
        Some(TransactionType::Expense),
        connection,
    )?;
    let grand_total = sum_in_range(user_id, &date_range, None, connection)?;

    let balance = deposits_total - investments_total - expenses_total;

    let type_percentages = TypePercentages {
        deposit: percentage(deposits_total, grand_total),
        expense: percentage(expenses_total, grand_total),
        investment: percentage(investments_total, grand_total),
    };

    let expenses_per_category = expense_totals_by_category(user_id, &date_range, connection)?
        .into_iter()
        .map(|(category, total_amount)| CategoryExpense {
            category,
            total_amount,
            percentage_of_total: percentage(total_amount, expenses_total),
        })
        .collect();

    let last_transactions = get_transactions_in_date_range(user_id, &date_range, connection)?;

    Ok(Report {
        balance,
        deposits_total,
        investments_total,
        expenses_total,
        type_percentages,
        expenses_per_category,
        last_transactions,
    })
}
