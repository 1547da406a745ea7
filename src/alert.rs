//! Alert system for displaying success and error messages to users.
//!
//! Alerts are HTML fragments that HTMX swaps into the `#alert-container`
//! element of the base page: error responses via `hx-target-error`, and
//! success responses as an out-of-band swap.

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};

use crate::html::ALERT_CONTAINER_ID;

/// A message to show the user after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// The action succeeded.
    SuccessSimple { message: String },
    /// The action failed, with a hint on how to fix it.
    Error { message: String, details: String },
    /// The action failed.
    ErrorSimple { message: String },
}

impl Alert {
    /// Render the alert by itself, for swapping into the alert container.
    pub fn into_html(self) -> Markup {
        let (style, message, details) = match self {
            Alert::SuccessSimple { message } => (
                "border-green-300 bg-green-50 text-green-800 \
                dark:border-green-800 dark:bg-gray-800 dark:text-green-400",
                message,
                None,
            ),
            Alert::Error { message, details } => (
                "border-red-300 bg-red-50 text-red-800 \
                dark:border-red-800 dark:bg-gray-800 dark:text-red-400",
                message,
                Some(details),
            ),
            Alert::ErrorSimple { message } => (
                "border-red-300 bg-red-50 text-red-800 \
                dark:border-red-800 dark:bg-gray-800 dark:text-red-400",
                message,
                None,
            ),
        };

        html! {
            div
                role="alert"
                class={ "flex items-start gap-3 p-4 text-sm border rounded-lg shadow " (style) }
            {
                div class="flex-1"
                {
                    p class="font-semibold" { (message) }

                    @if let Some(details) = details {
                        p class="mt-1" { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Dismiss"
                    class="font-bold"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "×"
                }
            }
        }
    }

    /// Render the alert wrapped in an out-of-band swap targeting the alert container.
    ///
    /// Use this when the main response swap targets something else, e.g.
    /// when deleting a table row.
    pub fn into_oob_html(self) -> Markup {
        let alert = self.into_html();

        html! {
            div hx-swap-oob={ "innerHTML:#" (ALERT_CONTAINER_ID) } { (alert) }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        Html(self.into_html().into_string()).into_response()
    }
}
