//! Seeding the database from a JSON document of sale records.
//!
//! This module contains:
//! - The seed record format and functions to fetch, parse and store it
//! - The route handler that imports the configured seed document

mod endpoint;
mod seed;

pub use endpoint::{ImportState, InitDbResponse, init_db};
pub use seed::{ImportSummary, SeedRecord, import_seed_records, parse_seed_document};

pub(crate) use endpoint::run_import;
