//! Defines the endpoint for creating a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rust_decimal::Decimal;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Budget,
    app_state::lock_budget,
    endpoints,
    transaction::{AccountRef, NewTransaction, TransactionKind},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The budget the transaction is added to.
    pub budget: Arc<Mutex<Budget>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            budget: state.budget.clone(),
        }
    }
}

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// Whether the transaction is income, an expense or a transfer.
    pub type_: TransactionKind,
    /// The account for income and expenses.
    #[serde(default)]
    pub account: Option<String>,
    /// The account money is transferred from.
    #[serde(default)]
    pub source: Option<String>,
    /// The account money is transferred to.
    #[serde(default)]
    pub destination: Option<String>,
    /// The value of the transaction in dollars.
    pub amount: Decimal,
    /// A free text label, e.g. "Groceries".
    #[serde(default)]
    pub category: String,
    /// The date when the transaction occurred.
    pub date: Date,
}

impl From<TransactionForm> for NewTransaction {
    fn from(form: TransactionForm) -> Self {
        let account = match form.type_ {
            TransactionKind::Transfer => AccountRef::transfer_text(
                form.source.as_deref().unwrap_or_default(),
                form.destination.as_deref().unwrap_or_default(),
            ),
            TransactionKind::Income | TransactionKind::Expense => {
                form.account.unwrap_or_default()
            }
        };

        NewTransaction {
            kind: form.type_,
            account,
            amount: form.amount,
            category: form.category,
            date: form.date,
        }
    }
}

/// A route handler for creating a new transaction, redirects to transactions view on success.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let new_transaction = NewTransaction::from(form);

    let mut budget = match lock_budget(&state.budget) {
        Ok(budget) => budget,
        Err(error) => return error.into_alert_response(),
    };

    match budget.add_transaction(new_transaction.clone()) {
        Ok(transaction) => tracing::info!(
            "Recorded {} of {} for {}",
            transaction.kind,
            transaction.amount,
            transaction.account
        ),
        Err(error) => {
            tracing::warn!("Could not create transaction from {new_transaction:?}: {error}");
            return error.into_alert_response();
        }
    }

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
