//! Defines the endpoint for creating a new account.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{account::accounts_page::AccountState, app_state::lock_budget, endpoints};

/// The form data for creating an account.
#[derive(Debug, Deserialize)]
pub struct AccountForm {
    /// The account name.
    pub name: String,
    /// The initial balance in dollars.
    pub balance: Decimal,
}

/// A route handler for creating a new account, redirects to accounts view on success.
///
/// A duplicate name leaves the ledger unchanged and responds with an alert.
pub async fn create_account_endpoint(
    State(state): State<AccountState>,
    Form(form): Form<AccountForm>,
) -> Response {
    let mut budget = match lock_budget(&state.budget) {
        Ok(budget) => budget,
        Err(error) => return error.into_alert_response(),
    };

    match budget.add_account(&form.name, form.balance) {
        Ok(account) => {
            tracing::info!("Created account {} with balance {}", account.name, account.balance);
        }
        Err(error) => {
            tracing::warn!("Could not create account with {form:?}: {error}");
            return error.into_alert_response();
        }
    }

    (
        HxRedirect(endpoints::ACCOUNTS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
