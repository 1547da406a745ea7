//! Displays accounts and their balances, with a form for adding accounts.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rust_decimal::Decimal;

use crate::{
    AppState, Budget, Error,
    account::Account,
    app_state::lock_budget,
    endpoints::{self, delete_account_url},
    html::{
        ALERT_CONTAINER_ID, BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, dollar_input_styles, format_currency, loading_spinner,
    },
    navigation::NavBar,
};

/// The ID of the element showing the sum of all account balances.
pub(crate) const TOTAL_BALANCE_ID: &str = "total-balance";

/// The state needed by the account route handlers.
#[derive(Debug, Clone)]
pub struct AccountState {
    /// The budget holding the account ledger.
    pub budget: Arc<Mutex<Budget>>,
}

impl FromRef<AppState> for AccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            budget: state.budget.clone(),
        }
    }
}

/// Render the total balance.
///
/// Set `out_of_band` to replace the total on an already rendered page.
pub(crate) fn total_balance_view(total: Decimal, out_of_band: bool) -> Markup {
    html!(
        span
            id=(TOTAL_BALANCE_ID)
            hx-swap-oob=[out_of_band.then_some("true")]
            class="tabular-nums"
        {
            (format_currency(total))
        }
    )
}

fn account_row_view(account: &Account) -> Markup {
    let name = account.name.as_ref();

    html!(
        tr class=(TABLE_ROW_STYLE)
        {
            th
                scope="row"
                class="px-6 py-4 font-medium text-gray-900 whitespace-nowrap dark:text-white"
            {
                (name)
            }

            td class="px-6 py-4 text-right tabular-nums"
            {
                (format_currency(account.balance))
            }

            td class=(TABLE_CELL_STYLE)
            {
                button
                    type="button"
                    hx-delete=(delete_account_url(name))
                    hx-confirm={
                        "Are you sure you want to delete the account '" (name) "'? "
                        "Its transactions will be kept."
                    }
                    hx-target="closest tr"
                    hx-swap="delete"
                    hx-target-error={ "#" (ALERT_CONTAINER_ID) }
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    )
}

fn create_account_form_view() -> Markup {
    html!(
        form
            hx-post=(endpoints::ACCOUNTS_API)
            hx-target-error={ "#" (ALERT_CONTAINER_ID) }
            hx-disabled-elt="#submit-button"
            hx-indicator="#indicator"
            class="w-full space-y-4"
        {
            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Account Name" }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="Everyday"
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="balance" class=(FORM_LABEL_STYLE) { "Initial Balance" }

                div class="input-wrapper w-full"
                {
                    input
                        id="balance"
                        type="number"
                        name="balance"
                        step="0.01"
                        min="0"
                        value="0"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            button
                type="submit"
                id="submit-button"
                class=(BUTTON_PRIMARY_STYLE)
            {
                span id="indicator" class="inline htmx-indicator" { (loading_spinner()) }
                "Add Account"
            }
        }
    )
}

fn accounts_view(accounts: &[Account], total_balance: Decimal) -> Markup {
    let nav_bar = NavBar::new(endpoints::ACCOUNTS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Accounts" }

                    p class="text-lg"
                    {
                        "Total: "
                        (total_balance_view(total_balance, false))
                    }
                }

                section class="w-full overflow-x-auto dark:bg-gray-800"
                {
                    table class="w-full text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                                th scope="col" class="px-6 py-3 text-right" { "Balance" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for account in accounts {
                                (account_row_view(account))
                            }

                            @if accounts.is_empty() {
                                tr
                                {
                                    td
                                        colspan="3"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No accounts found. Add an account below."
                                    }
                                }
                            }
                        }
                    }
                }

                section class="max-w-md"
                {
                    h2 class="text-lg font-semibold mb-2" { "Add Account" }
                    (create_account_form_view())
                }
            }
        }
    );

    base("Accounts", &[dollar_input_styles()], &content)
}

/// Renders the accounts page showing all accounts in the order they were added.
pub async fn get_accounts_page(State(state): State<AccountState>) -> Result<Response, Error> {
    let budget = lock_budget(&state.budget)?;
    let ledger = budget.ledger();

    Ok(accounts_view(ledger.list_accounts(), ledger.total_balance()).into_response())
}
