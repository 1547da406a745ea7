//! Defines the route handler for the page that displays transactions as a table.
//!
//! The page has a form for choosing which columns to show and, for each
//! shown column with more than one distinct value, a select for filtering
//! on that column. The form is submitted as a GET request so the current
//! view can be bookmarked.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
// axum_extra's Query supports repeated keys, e.g. `columns=type&columns=date`.
use axum_extra::extract::Query;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Budget, Error,
    app_state::lock_budget,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
    },
    navigation::NavBar,
    transaction::{
        ALL_VALUES, FilterValue, Transaction, TransactionColumn, TransactionFilter,
        distinct_values, filter_transactions, visible_columns,
    },
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The budget holding the transaction log.
    pub budget: Arc<Mutex<Budget>>,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            budget: state.budget.clone(),
        }
    }
}

/// The query string of the transactions page.
///
/// Each column key holds [ALL_VALUES] or a literal to match. A missing key
/// means [ALL_VALUES], while an empty value matches records where the column
/// is empty.
#[derive(Debug, Deserialize)]
pub struct TransactionsQuery {
    #[serde(rename = "type", default = "all_values")]
    type_: String,
    #[serde(default = "all_values")]
    account: String,
    #[serde(default = "all_values")]
    amount: String,
    #[serde(default = "all_values")]
    category: String,
    #[serde(default = "all_values")]
    date: String,
    /// The columns to show, all columns when empty.
    #[serde(default)]
    columns: Vec<TransactionColumn>,
}

// Plain strings rather than `Option`s, since `Query` reads an empty value as `None`.
fn all_values() -> String {
    ALL_VALUES.to_owned()
}

impl Default for TransactionsQuery {
    fn default() -> Self {
        Self {
            type_: all_values(),
            account: all_values(),
            amount: all_values(),
            category: all_values(),
            date: all_values(),
            columns: Vec::new(),
        }
    }
}

impl TransactionsQuery {
    fn value(&self, column: TransactionColumn) -> &str {
        match column {
            TransactionColumn::Type => &self.type_,
            TransactionColumn::Account => &self.account,
            TransactionColumn::Amount => &self.amount,
            TransactionColumn::Category => &self.category,
            TransactionColumn::Date => &self.date,
        }
    }

    /// Build the filter for the `visible` columns, other columns are not filtered.
    fn filter(&self, visible: &[TransactionColumn]) -> TransactionFilter {
        let mut filter = TransactionFilter::new();

        for &column in visible {
            filter.set(column, FilterValue::from_control(self.value(column)));
        }

        filter
    }
}

/// A filter select for one column.
struct FilterControl {
    column: TransactionColumn,
    options: Vec<String>,
    selected: FilterValue,
}

struct TransactionsViewModel<'a> {
    columns: Vec<TransactionColumn>,
    controls: Vec<FilterControl>,
    rows: Vec<&'a Transaction>,
    total_count: usize,
}

fn build_view_model<'a>(
    transactions: &'a [Transaction],
    query: &TransactionsQuery,
) -> TransactionsViewModel<'a> {
    let columns = visible_columns(&query.columns);
    let filter = query.filter(&columns);

    // Each control only offers the values left after applying the filters of
    // the columns before it.
    let mut narrowed = TransactionFilter::new();
    let mut controls = Vec::new();

    for &column in &columns {
        let selected = filter.get(column).clone();
        let mut options = distinct_values(filter_transactions(transactions, &narrowed), column);

        match &selected {
            FilterValue::Equals(literal) if !options.contains(literal) => {
                options.push(literal.clone());
            }
            _ => {}
        }

        if options.len() > 1 || selected != FilterValue::All {
            controls.push(FilterControl {
                column,
                options,
                selected: selected.clone(),
            });
        }

        narrowed.set(column, selected);
    }

    TransactionsViewModel {
        rows: filter_transactions(transactions, &filter).collect(),
        controls,
        columns,
        total_count: transactions.len(),
    }
}

fn column_checkboxes(visible: &[TransactionColumn]) -> Markup {
    html! {
        fieldset class="flex flex-wrap gap-4"
        {
            legend class=(FORM_LABEL_STYLE) { "Columns" }

            @for column in TransactionColumn::ALL {
                @let id = format!("column-{}", column.query_key());

                div class="flex items-center gap-2"
                {
                    input
                        type="checkbox"
                        name="columns"
                        id=(id)
                        value=(column.query_key())
                        checked[visible.contains(&column)];

                    label for=(id) class="text-sm" { (column.header()) }
                }
            }
        }
    }
}

fn filter_select(control: &FilterControl) -> Markup {
    let key = control.column.query_key();
    let id = format!("filter-{key}");

    html! {
        div
        {
            label for=(id) class=(FORM_LABEL_STYLE) { (control.column.header()) }

            select name=(key) id=(id) class=(FORM_TEXT_INPUT_STYLE)
            {
                option value=(ALL_VALUES) selected[control.selected == FilterValue::All]
                {
                    (ALL_VALUES)
                }

                @for value in &control.options {
                    @let is_selected = matches!(
                        &control.selected,
                        FilterValue::Equals(literal) if literal == value
                    );

                    option value=(value) selected[is_selected] { (value) }
                }
            }
        }
    }
}

fn transactions_table(model: &TransactionsViewModel<'_>) -> Markup {
    html! {
        table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    @for column in &model.columns {
                        th scope="col" class=(TABLE_CELL_STYLE) { (column.header()) }
                    }
                }
            }

            tbody
            {
                @for transaction in &model.rows {
                    tr class=(TABLE_ROW_STYLE)
                    {
                        @for column in &model.columns {
                            td class=(TABLE_CELL_STYLE) { (column.text(transaction)) }
                        }
                    }
                }

                @if model.rows.is_empty() {
                    tr
                    {
                        td
                            colspan=(model.columns.len())
                            class="px-6 py-4 text-center"
                        {
                            @if model.total_count == 0 {
                                "No transactions yet. "
                                a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                                {
                                    "Add a transaction"
                                }
                                "."
                            } @else {
                                "No transactions match the filters."
                            }
                        }
                    }
                }
            }
        }
    }
}

fn transactions_view(model: &TransactionsViewModel<'_>) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Transactions" }

                    p id="transaction-count" class="text-sm"
                    {
                        "Showing " (model.rows.len()) " of " (model.total_count)
                    }
                }

                form
                    method="get"
                    action=(endpoints::TRANSACTIONS_VIEW)
                    class="space-y-4 p-4 rounded bg-white dark:bg-gray-800"
                {
                    (column_checkboxes(&model.columns))

                    @if !model.controls.is_empty() {
                        div class="grid grid-cols-2 lg:grid-cols-5 gap-4"
                        {
                            @for control in &model.controls {
                                (filter_select(control))
                            }
                        }
                    }

                    div class="flex items-center gap-4"
                    {
                        button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Apply" }

                        a href=(endpoints::TRANSACTIONS_VIEW) class=(LINK_STYLE) { "Reset" }
                    }
                }

                section class="w-full overflow-x-auto dark:bg-gray-800"
                {
                    (transactions_table(model))
                }
            }
        }
    };

    base("Transactions", &[], &content)
}

/// Renders the transactions table, filtered and narrowed to the columns in the query string.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Response, Error> {
    let budget = lock_budget(&state.budget)?;
    let model = build_view_model(budget.log().transactions(), &query);

    Ok(transactions_view(&model).into_response())
}
