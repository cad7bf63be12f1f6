//! Sale transactions.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - Database functions for storing, searching and paging transactions
//! - The route handler for listing transactions

mod core;
mod list_endpoint;
mod query;

pub use core::{Transaction, TransactionBuilder, create_transaction, create_transaction_table};
pub use list_endpoint::get_transactions;
pub use query::{SearchTerm, TransactionQuery, get_transactions_in_range, query_transactions};

#[cfg(test)]
pub use core::count_transactions;
