use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::macros::date;

use finboard::{
    PasswordHash, Transaction, TransactionType, UserID, ValidatedPassword, create_transaction,
    create_user, initialize_db,
};

/// A utility for creating a test database for the REST API server of finboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test user...");

    let password_hash = PasswordHash::new(
        ValidatedPassword::new_unchecked("test"),
        PasswordHash::DEFAULT_COST,
    )?;

    let user = create_user(password_hash, &conn)?;

    println!("Creating sample transactions...");

    create_sample_transactions(user.id, &conn)?;

    println!("Success!");

    Ok(())
}

/// Insert a few months of sample data so the dashboard has something to show.
///
/// Amounts are in minor units (cents).
fn create_sample_transactions(user_id: UserID, conn: &Connection) -> Result<(), Box<dyn Error>> {
    let transactions = [
        // May 2024
        Transaction::build(450_000, date!(2024 - 05 - 01), TransactionType::Deposit, user_id)
            .description("Salary")
            .category("Salary"),
        Transaction::build(120_000, date!(2024 - 05 - 02), TransactionType::Expense, user_id)
            .description("Rent")
            .category("Housing"),
        Transaction::build(50_000, date!(2024 - 05 - 10), TransactionType::Investment, user_id)
            .description("Index fund")
            .category("Investments"),
        Transaction::build(23_450, date!(2024 - 05 - 14), TransactionType::Expense, user_id)
            .description("Groceries")
            .category("Food"),
        // June 2024
        Transaction::build(450_000, date!(2024 - 06 - 01), TransactionType::Deposit, user_id)
            .description("Salary")
            .category("Salary"),
        Transaction::build(120_000, date!(2024 - 06 - 03), TransactionType::Expense, user_id)
            .description("Rent")
            .category("Housing"),
        Transaction::build(7_900, date!(2024 - 06 - 08), TransactionType::Expense, user_id)
            .description("Bus pass")
            .category("Transport"),
        Transaction::build(31_200, date!(2024 - 06 - 17), TransactionType::Expense, user_id)
            .description("Groceries")
            .category("Food"),
        Transaction::build(50_000, date!(2024 - 06 - 28), TransactionType::Investment, user_id)
            .description("Index fund")
            .category("Investments"),
    ];

    for builder in transactions {
        create_transaction(builder, conn)?;
    }

    Ok(())
}
