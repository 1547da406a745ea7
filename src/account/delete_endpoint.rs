//! Defines the endpoint for deleting an account.

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
};
use maud::html;
use serde::Deserialize;

use crate::{
    account::accounts_page::{AccountState, total_balance_view},
    alert::Alert,
    app_state::lock_budget,
};

/// The query string for deleting an account.
#[derive(Debug, Deserialize)]
pub struct DeleteAccountQuery {
    /// The name of the account to delete.
    pub name: String,
}

/// A route handler for deleting an account, responds with an alert and the new total balance.
///
/// Deleting an account that does not exist succeeds so that repeated requests are harmless.
/// Transactions that name the account are kept.
pub async fn delete_account_endpoint(
    State(state): State<AccountState>,
    Query(query): Query<DeleteAccountQuery>,
) -> Response {
    let mut budget = match lock_budget(&state.budget) {
        Ok(budget) => budget,
        Err(error) => return error.into_alert_response(),
    };

    if budget.delete_account(&query.name) {
        tracing::info!("Deleted account {}", query.name);
    } else {
        tracing::debug!("Account {} was already deleted", query.name);
    }

    let alert = Alert::SuccessSimple {
        message: format!("Account {} deleted", query.name.trim()),
    };

    // The status code has to be 200 OK or HTMX will not delete the table row.
    Html(
        html!(
            (alert.into_oob_html())
            (total_balance_view(budget.ledger().total_balance(), true))
        )
        .into_string(),
    )
    .into_response()
}
