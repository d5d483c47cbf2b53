use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime, Time};

use expense_tracker::{UserID, create_expense, initialize_db};

/// A utility for creating a test database for the API server of expense_tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The ID of the user that owns the generated expenses.
    #[arg(long, short, default_value_t = 1)]
    user_id: i64,
}

/// Prices and day of month offsets for the generated expenses.
const SAMPLE_EXPENSES: [(f64, i64); 5] = [
    (12.5, 0),
    (48.0, 2),
    (7.25, 5),
    (120.0, 9),
    (3.4, 14),
];

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

    let user_id = UserID::new(args.user_id);
    let this_month = OffsetDateTime::now_utc()
        .replace_day(1)?
        .replace_time(Time::from_hms(12, 0, 0)?);
    let last_month = (this_month - Duration::days(1)).replace_day(1)?;

    println!("Creating expenses for user {user_id} this month and last month...");

    for month_start in [last_month, this_month] {
        for (price, day_offset) in SAMPLE_EXPENSES {
            create_expense(
                user_id,
                price,
                month_start + Duration::days(day_offset),
                &conn,
            )?;
        }
    }

    println!("Success!");

    Ok(())
}
