//! Transaction management for the budget tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the append-only `TransactionLog`
//! - Filtering and column selection for the transactions table
//! - View handlers and endpoints for transaction-related web pages

mod core;
mod create_endpoint;
mod create_page;
mod filter;
mod transactions_page;

pub use core::{
    AccountRef, NewTransaction, TRANSFER_SEPARATOR, Transaction, TransactionKind, TransactionLog,
};
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_create_transaction_page;
pub use filter::{
    ALL_VALUES, FilterValue, TransactionColumn, TransactionFilter, distinct_values,
    filter_transactions, visible_columns,
};
pub use transactions_page::get_transactions_page;
