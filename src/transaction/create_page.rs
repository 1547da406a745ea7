//! Defines the route handler for the page for creating a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    AppState, Budget, Error,
    account::Account,
    app_state::lock_budget,
    endpoints,
    html::{
        ALERT_CONTAINER_ID, BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE,
        FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, LINK_STYLE, base, dollar_input_styles, loading_spinner,
    },
    navigation::NavBar,
    timezone::current_local_date,
    transaction::TransactionKind,
};

/// The state needed for create new transaction page.
#[derive(Debug, Clone)]
pub struct CreateTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The budget holding the accounts to choose from.
    pub budget: Arc<Mutex<Budget>>,
}

impl FromRef<AppState> for CreateTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            budget: state.budget.clone(),
        }
    }
}

fn transaction_type_radios() -> Markup {
    html! {
        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { "Transaction type" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                @for kind in TransactionKind::ALL {
                    @let id = format!("transaction-type-{}", kind.form_value());

                    div class="flex items-center gap-3"
                    {
                        input
                            name="type_"
                            id=(id)
                            type="radio"
                            value=(kind.form_value())
                            checked[kind == TransactionKind::Expense]
                            required
                            class=(FORM_RADIO_INPUT_STYLE);

                        label for=(id) class=(FORM_RADIO_LABEL_STYLE)
                        {
                            (kind)
                        }
                    }
                }
            }
        }
    }
}

fn account_select(name: &str, label: &str, accounts: &[Account]) -> Markup {
    html! {
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }

            select name=(name) id=(name) class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" { "Select an account" }

                @for account in accounts {
                    option value=(account.name) { (account.name) }
                }
            }
        }
    }
}

fn create_transaction_view(today: Date, accounts: &[Account]) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();

    let form = html! {
        form
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target-error={ "#" (ALERT_CONTAINER_ID) }
            hx-disabled-elt="#submit-button"
            hx-indicator="#indicator"
            class="w-full space-y-4 md:space-y-6"
        {
            h2 class="text-xl font-bold" { "New Transaction" }

            (transaction_type_radios())

            (account_select("account", "Account (income and expenses)", accounts))

            div class="grid grid-cols-2 gap-4"
            {
                (account_select("source", "From (transfers)", accounts))
                (account_select("destination", "To (transfers)", accounts))
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                // w-full needed to ensure input takes the full width when prefilled with a value
                div class="input-wrapper w-full"
                {
                    input
                        name="amount"
                        id="amount"
                        type="number"
                        step="0.01"
                        min="0"
                        placeholder="0.00"
                        required
                        autofocus
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                input
                    name="category"
                    id="category"
                    type="text"
                    placeholder="Groceries"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    name="date"
                    id="date"
                    type="date"
                    required
                    value=(today)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" id="submit-button" class=(BUTTON_PRIMARY_STYLE)
            {
                span id="indicator" class="inline htmx-indicator" { (loading_spinner()) }
                " Create Transaction"
            }
        }
    };

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            @if accounts.is_empty() {
                p
                {
                    "You need an account before you can add transactions. Create one on the "
                    a href=(endpoints::ACCOUNTS_VIEW) class=(LINK_STYLE) { "accounts page" }
                    "."
                }
            } @else {
                (form)
            }
        }
    };

    base("Create Transaction", &[dollar_input_styles()], &content)
}

/// Renders the page for creating a transaction.
///
/// The date defaults to today in the server's timezone.
pub async fn get_create_transaction_page(
    State(state): State<CreateTransactionPageState>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let budget = lock_budget(&state.budget)?;

    Ok(create_transaction_view(today, budget.ledger().list_accounts()).into_response())
}

#[cfg(test)]
mod view_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use rust_decimal_macros::dec;
    use scraper::{ElementRef, Selector};
    use time::OffsetDateTime;

    use crate::{
        Budget, Error,
        endpoints,
        test_utils::{
            assert_content_type, assert_form_input, assert_form_input_with_value,
            assert_form_submit_button, assert_hx_endpoint, assert_status_ok, assert_valid_html,
            must_get_form, parse_html_document,
        },
        transaction::{create_page::CreateTransactionPageState, get_create_transaction_page},
    };

    fn state_with_accounts(names: &[&str]) -> CreateTransactionPageState {
        let mut budget = Budget::new();
        for name in names {
            budget.add_account(name, dec!(0)).unwrap();
        }

        CreateTransactionPageState {
            local_timezone: "Etc/UTC".to_owned(),
            budget: Arc::new(Mutex::new(budget)),
        }
    }

    #[tokio::test]
    async fn new_transaction_returns_form() {
        let state = state_with_accounts(&["Cash", "Savings"]);

        let response = get_create_transaction_page(State(state)).await.unwrap();

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        let form = must_get_form(&document);
        assert_hx_endpoint(&form, endpoints::TRANSACTIONS_API, "hx-post");
        assert_form_input(&form, "type_", "radio");
        assert_form_input(&form, "amount", "number");
        assert_form_input_with_value(
            &form,
            "date",
            "date",
            &OffsetDateTime::now_utc().date().to_string(),
        );
        assert_form_submit_button(&form);

        for select in ["account", "source", "destination"] {
            assert_eq!(
                select_options(&form, select),
                ["", "Cash", "Savings"],
                "want every account as an option of {select}"
            );
        }
    }

    #[tokio::test]
    async fn offers_every_transaction_type() {
        let state = state_with_accounts(&["Cash"]);

        let response = get_create_transaction_page(State(state)).await.unwrap();

        let document = parse_html_document(response).await;
        let values: Vec<&str> = document
            .select(&Selector::parse("input[name=type_]").unwrap())
            .filter_map(|input| input.value().attr("value"))
            .collect();
        assert_eq!(values, ["income", "expense", "transfer"]);
    }

    #[tokio::test]
    async fn links_to_accounts_page_without_accounts() {
        let state = state_with_accounts(&[]);

        let response = get_create_transaction_page(State(state)).await.unwrap();

        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        assert!(
            document
                .select(&Selector::parse("form").unwrap())
                .next()
                .is_none()
        );
        let link = document
            .select(&Selector::parse("p a").unwrap())
            .find(|link| link.value().attr("href") == Some(endpoints::ACCOUNTS_VIEW))
            .and_then(|link| link.text().next().map(str::to_owned));
        assert_eq!(link.as_deref(), Some("accounts page"));
    }

    #[tokio::test]
    async fn invalid_timezone_is_an_error() {
        let mut state = state_with_accounts(&["Cash"]);
        state.local_timezone = "Not/A_Timezone".to_owned();

        let result = get_create_transaction_page(State(state)).await;

        assert_eq!(
            result.err(),
            Some(Error::InvalidTimezoneError("Not/A_Timezone".to_owned()))
        );
    }

    #[track_caller]
    fn select_options(form: &ElementRef<'_>, name: &str) -> Vec<String> {
        let select = form
            .select(&Selector::parse(&format!("select[name={name}]")).unwrap())
            .next()
            .unwrap_or_else(|| panic!("No select found with name \"{name}\""));

        select
            .select(&Selector::parse("option").unwrap())
            .map(|option| option.value().attr("value").unwrap_or_default().to_owned())
            .collect()
    }
}
