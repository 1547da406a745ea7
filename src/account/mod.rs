mod accounts_page;
mod core;
mod create_endpoint;
mod delete_endpoint;

pub use accounts_page::get_accounts_page;
pub use core::{Account, AccountLedger, AccountName};
pub use create_endpoint::create_account_endpoint;
pub use delete_endpoint::delete_account_endpoint;
