//! The API endpoints URIs.

/// The root route which redirects to the accounts page.
pub const ROOT: &str = "/";
/// The page for displaying accounts and their balances.
pub const ACCOUNTS_VIEW: &str = "/accounts";
/// The page for displaying and filtering transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for creating a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route to create or delete accounts.
pub const ACCOUNTS_API: &str = "/api/accounts";
/// The route to create transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";

/// The URL for deleting the account called `name`.
///
/// The account name is passed in the query string so that it does not need
/// to be a valid path segment.
pub fn delete_account_url(name: &str) -> String {
    match serde_urlencoded::to_string([("name", name)]) {
        Ok(query) => format!("{ACCOUNTS_API}?{query}"),
        Err(error) => {
            tracing::error!("Could not encode account name {name:?}: {error}");
            ACCOUNTS_API.to_owned()
        }
    }
}
