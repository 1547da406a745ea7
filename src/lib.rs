//! Budget Tracker is a web app for keeping track of account balances and the
//! income, expenses and transfers that change them.
//!
//! This library provides a REST API that directly serves HTML pages. All data
//! is kept in memory for the lifetime of the server process.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use rust_decimal::Decimal;
use tokio::signal;

mod account;
mod alert;
mod app_state;
mod budget;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use account::{Account, AccountLedger, AccountName};
pub use app_state::AppState;
pub use budget::Budget;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use timezone::get_local_offset;
pub use transaction::{
    AccountRef, FilterValue, NewTransaction, TRANSFER_SEPARATOR, Transaction, TransactionColumn,
    TransactionFilter, TransactionKind, TransactionLog, distinct_values, filter_transactions,
};

use crate::{alert::Alert, internal_server_error::InternalServerError};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The specified account name is already used by another account.
    #[error("the account \"{0}\" already exists")]
    DuplicateAccountName(String),

    /// An empty string was used as an account name.
    #[error("account name cannot be empty")]
    EmptyAccountName,

    /// A negative amount was used for an initial balance or a transaction.
    #[error("{0} is negative, amounts must be zero or more")]
    NegativeAmount(Decimal),

    /// A transaction named an account that is not in the ledger.
    #[error("there is no account called \"{0}\"")]
    UnknownAccount(String),

    /// The account text of a transfer is not of the form "<source> -> <destination>".
    #[error("\"{0}\" is not a valid transfer, expected \"<source> -> <destination>\"")]
    MalformedTransfer(String),

    /// A transfer used the same account as its source and destination.
    #[error("cannot transfer from the account \"{0}\" to itself")]
    SelfTransfer(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the lock on the budget.
    ///
    /// This happens when a request handler panicked while holding the lock.
    #[error("could not acquire the budget lock")]
    StateLockError,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidTimezoneError(timezone) => {
                InternalServerError::invalid_timezone(&timezone).into_response()
            }
            Error::StateLockError => InternalServerError::budget_unavailable().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        let (status_code, alert) = match &self {
            Error::DuplicateAccountName(name) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Duplicate Account Name".to_owned(),
                    details: format!(
                        "The account {name} already exists. \
                        Choose a different account name, or delete the existing account.",
                    ),
                },
            ),
            Error::EmptyAccountName => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: "Account name cannot be empty".to_owned(),
                },
            ),
            Error::NegativeAmount(amount) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid amount".to_owned(),
                    details: format!("{amount} is negative. Enter an amount of zero or more."),
                },
            ),
            Error::UnknownAccount(name) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Unknown account".to_owned(),
                    details: format!(
                        "There is no account called {name}. \
                        Try refreshing the page to see if the account has been deleted.",
                    ),
                },
            ),
            Error::MalformedTransfer(text) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid transfer".to_owned(),
                    details: format!(
                        "Could not read the source and destination accounts from \"{text}\". \
                        Choose both a source and a destination account."
                    ),
                },
            ),
            Error::SelfTransfer(name) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid transfer".to_owned(),
                    details: format!(
                        "Cannot transfer from {name} to itself. \
                        Choose a different destination account."
                    ),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                        ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            Error::StateLockError => {
                tracing::error!("An unexpected error occurred: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details: "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                    },
                )
            }
        };

        (status_code, alert).into_response()
    }
}
