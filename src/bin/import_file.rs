use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use sales_dashboard::{import_seed_records, initialize_db, parse_seed_document};

/// A utility for seeding a sales dashboard database from a local JSON file.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite database. Created if it does not exist.
    #[arg(long, env = "DATABASE_PATH", default_value = "sales.db")]
    db_path: PathBuf,

    /// File path to a JSON array of sale records.
    #[arg(long, short)]
    input_path: PathBuf,
}

/// Import sale records from a file into the database.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if !args.input_path.is_file() {
        eprintln!("No file found at {:#?}!", args.input_path);
        exit(1);
    }

    println!("Reading sale records from {:#?}", args.input_path);
    let document = fs::read_to_string(&args.input_path)?;
    let records = parse_seed_document(&document)?;

    println!("Opening database at {:#?}", args.db_path);
    let conn = Connection::open(&args.db_path)?;
    initialize_db(&conn)?;

    println!("Importing {} records...", records.len());
    let summary = import_seed_records(records, &conn)?;

    println!(
        "Imported {} records, {} already present, {} skipped.",
        summary.imported, summary.duplicates, summary.skipped
    );

    Ok(())
}
