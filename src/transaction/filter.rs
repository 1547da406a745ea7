//! Filtering and column selection for the transactions table.
//!
//! Filtering never changes the log, it produces a lazy view over the records
//! that match every predicate.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::transaction::{Transaction, TransactionKind};

/// The value of a filter control that accepts every record.
pub const ALL_VALUES: &str = "All";

const DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month padding:zero]-[day padding:zero]");

/// A column of the transactions table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionColumn {
    /// The transaction kind.
    Type,
    /// The account name or transfer text.
    Account,
    /// The amount of money.
    Amount,
    /// The category label.
    Category,
    /// The transaction date.
    Date,
}

impl TransactionColumn {
    /// Every column in display order.
    pub const ALL: [TransactionColumn; 5] = [
        Self::Type,
        Self::Account,
        Self::Amount,
        Self::Category,
        Self::Date,
    ];

    /// The column heading.
    pub fn header(&self) -> &'static str {
        match self {
            Self::Type => "Type",
            Self::Account => "Account",
            Self::Amount => "Amount",
            Self::Category => "Category",
            Self::Date => "Date",
        }
    }

    /// The key used for this column in query strings.
    pub fn query_key(&self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Account => "account",
            Self::Amount => "amount",
            Self::Category => "category",
            Self::Date => "date",
        }
    }

    /// The text shown in this column for `transaction`.
    pub fn text(&self, transaction: &Transaction) -> String {
        match self {
            Self::Type => transaction.kind.to_string(),
            Self::Account => transaction.account.to_string(),
            Self::Amount => transaction.amount.to_string(),
            Self::Category => transaction.category.clone(),
            Self::Date => transaction.date.to_string(),
        }
    }

    /// Whether the value of this column for `transaction` equals `literal`.
    ///
    /// Amounts are compared as decimals and dates as `YYYY-MM-DD` dates, so
    /// "25" matches an amount of 25.00. A literal that cannot be parsed as the
    /// column's type matches nothing. Text columns must match exactly, so the
    /// empty string only matches records with an empty category.
    pub fn matches(&self, transaction: &Transaction, literal: &str) -> bool {
        match self {
            Self::Type => literal
                .trim()
                .parse::<TransactionKind>()
                .is_ok_and(|kind| kind == transaction.kind),
            Self::Account => transaction.account.to_string() == literal,
            Self::Amount => literal
                .trim()
                .parse::<Decimal>()
                .is_ok_and(|amount| amount == transaction.amount),
            Self::Category => transaction.category == literal,
            Self::Date => Date::parse(literal.trim(), DATE_FORMAT)
                .is_ok_and(|date| date == transaction.date),
        }
    }
}

/// The accepted value(s) for one column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterValue {
    /// Accept every record.
    #[default]
    All,
    /// Accept records whose column value equals the literal.
    Equals(String),
}

impl FilterValue {
    /// Interpret the value of a filter control.
    ///
    /// Only [ALL_VALUES] accepts everything, any other value (including the
    /// empty string) must be matched exactly.
    pub fn from_control(value: &str) -> Self {
        if value == ALL_VALUES {
            Self::All
        } else {
            Self::Equals(value.to_owned())
        }
    }
}

/// A set of column predicates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionFilter {
    predicates: BTreeMap<TransactionColumn, FilterValue>,
}

impl TransactionFilter {
    /// A filter that accepts every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the predicate for `column`, replacing any previous one.
    pub fn with(mut self, column: TransactionColumn, value: FilterValue) -> Self {
        self.set(column, value);
        self
    }

    /// Set the predicate for `column`, replacing any previous one.
    pub fn set(&mut self, column: TransactionColumn, value: FilterValue) {
        match value {
            FilterValue::All => {
                self.predicates.remove(&column);
            }
            value => {
                self.predicates.insert(column, value);
            }
        }
    }

    /// The predicate for `column`.
    pub fn get(&self, column: TransactionColumn) -> &FilterValue {
        static ALL: FilterValue = FilterValue::All;
        self.predicates.get(&column).unwrap_or(&ALL)
    }

    /// Whether `transaction` satisfies every predicate.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.predicates
            .iter()
            .all(|(column, value)| match value {
                FilterValue::All => true,
                FilterValue::Equals(literal) => column.matches(transaction, literal),
            })
    }
}

/// The records in `records` that satisfy `filter`, in the order they were given.
pub fn filter_transactions<'a, 'f, I>(
    records: I,
    filter: &'f TransactionFilter,
) -> impl Iterator<Item = &'a Transaction> + 'f
where
    'a: 'f,
    I: IntoIterator<Item = &'a Transaction>,
    I::IntoIter: 'f,
{
    records
        .into_iter()
        .filter(move |transaction| filter.matches(transaction))
}

/// The distinct values of `column` in the order they first appear.
pub fn distinct_values<'a>(
    records: impl IntoIterator<Item = &'a Transaction>,
    column: TransactionColumn,
) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();

    for transaction in records {
        let value = column.text(transaction);

        if !values.contains(&value) {
            values.push(value);
        }
    }

    values
}

/// The columns to display, in table order.
///
/// Selecting no columns shows every column.
pub fn visible_columns(selected: &[TransactionColumn]) -> Vec<TransactionColumn> {
    if selected.is_empty() {
        return TransactionColumn::ALL.to_vec();
    }

    TransactionColumn::ALL
        .into_iter()
        .filter(|column| selected.contains(column))
        .collect()
}

#[cfg(test)]
mod filter_tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use time::{Date, macros::date};

    use crate::{
        account::AccountLedger,
        transaction::{
            NewTransaction, Transaction, TransactionKind, TransactionLog,
            filter::{
                FilterValue, TransactionColumn, TransactionFilter, distinct_values,
                filter_transactions, visible_columns,
            },
        },
    };

    fn record(
        kind: TransactionKind,
        account: &str,
        amount: Decimal,
        category: &str,
        date: Date,
    ) -> NewTransaction {
        NewTransaction {
            kind,
            account: account.to_owned(),
            amount,
            category: category.to_owned(),
            date,
        }
    }

    fn test_log() -> TransactionLog {
        let mut ledger = AccountLedger::new();
        ledger.add_account("Checking", dec!(100)).unwrap();
        ledger.add_account("Savings", dec!(0)).unwrap();
        let mut log = TransactionLog::new();

        let records = [
            record(
                TransactionKind::Income,
                "Checking",
                dec!(1000.00),
                "Wages",
                date!(2024 - 01 - 01),
            ),
            record(
                TransactionKind::Expense,
                "Checking",
                dec!(25.00),
                "Groceries",
                date!(2024 - 01 - 02),
            ),
            record(
                TransactionKind::Transfer,
                "Checking -> Savings",
                dec!(25.00),
                "move",
                date!(2024 - 01 - 02),
            ),
            record(
                TransactionKind::Expense,
                "Savings",
                dec!(4.50),
                "Groceries",
                date!(2024 - 01 - 03),
            ),
        ];

        for new_transaction in records {
            log.add_transaction(&mut ledger, new_transaction).unwrap();
        }

        log
    }

    fn collect<'a>(
        records: &'a [Transaction],
        filter: &'a TransactionFilter,
    ) -> Vec<&'a Transaction> {
        filter_transactions(records, filter).collect()
    }

    #[test]
    fn empty_filter_accepts_everything() {
        let log = test_log();
        let filter = TransactionFilter::new();

        let got = collect(log.transactions(), &filter);

        assert_eq!(got.len(), log.len());
    }

    #[test]
    fn keeps_exactly_the_matching_records_in_order() {
        let log = test_log();
        let filter = TransactionFilter::new()
            .with(
                TransactionColumn::Category,
                FilterValue::Equals("Groceries".to_owned()),
            )
            .with(
                TransactionColumn::Type,
                FilterValue::Equals("Expense".to_owned()),
            );

        let got = collect(log.transactions(), &filter);

        let want: Vec<&Transaction> = log
            .transactions()
            .iter()
            .filter(|transaction| {
                transaction.category == "Groceries"
                    && transaction.kind == TransactionKind::Expense
            })
            .collect();
        assert_eq!(got, want);
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].amount, dec!(25.00));
        assert_eq!(got[1].amount, dec!(4.50));
    }

    #[test]
    fn amount_compares_as_decimal() {
        let log = test_log();
        let filter = TransactionFilter::new().with(
            TransactionColumn::Amount,
            FilterValue::Equals("25".to_owned()),
        );

        let got = collect(log.transactions(), &filter);

        assert_eq!(got.len(), 2);
    }

    #[test]
    fn date_and_account_filters() {
        let log = test_log();
        let filter = TransactionFilter::new()
            .with(
                TransactionColumn::Date,
                FilterValue::Equals("2024-01-02".to_owned()),
            )
            .with(
                TransactionColumn::Account,
                FilterValue::Equals("Checking -> Savings".to_owned()),
            );

        let got = collect(log.transactions(), &filter);

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].kind, TransactionKind::Transfer);
    }

    #[test]
    fn unparsable_literals_match_nothing() {
        let log = test_log();

        for (column, literal) in [
            (TransactionColumn::Amount, "lots"),
            (TransactionColumn::Date, "yesterday"),
            (TransactionColumn::Type, "Refund"),
        ] {
            let filter =
                TransactionFilter::new().with(column, FilterValue::Equals(literal.to_owned()));

            assert!(
                collect(log.transactions(), &filter).is_empty(),
                "want no matches for {column:?} = {literal:?}"
            );
        }
    }

    #[test]
    fn filtering_is_idempotent_and_does_not_mutate() {
        let log = test_log();
        let before = log.clone();
        let filter = TransactionFilter::new().with(
            TransactionColumn::Category,
            FilterValue::Equals("Groceries".to_owned()),
        );

        let once = collect(log.transactions(), &filter);
        let twice: Vec<&Transaction> = filter_transactions(once.iter().copied(), &filter).collect();

        assert_eq!(once, twice);
        assert_eq!(log, before);
    }

    #[test]
    fn setting_all_removes_predicate() {
        let mut filter = TransactionFilter::new().with(
            TransactionColumn::Category,
            FilterValue::Equals("Groceries".to_owned()),
        );

        filter.set(TransactionColumn::Category, FilterValue::All);

        assert_eq!(filter, TransactionFilter::new());
        assert_eq!(filter.get(TransactionColumn::Category), &FilterValue::All);
    }

    #[test]
    fn filter_value_from_control() {
        assert_eq!(FilterValue::from_control("All"), FilterValue::All);
        assert_eq!(
            FilterValue::from_control(""),
            FilterValue::Equals(String::new())
        );
        assert_eq!(
            FilterValue::from_control("Wages"),
            FilterValue::Equals("Wages".to_owned())
        );
    }

    #[test]
    fn distinct_values_in_first_appearance_order() {
        let log = test_log();

        let got = distinct_values(log.transactions(), TransactionColumn::Category);

        assert_eq!(got, ["Wages", "Groceries", "move"]);
    }

    #[test]
    fn empty_category_matches_only_uncategorised_records() {
        let mut ledger = AccountLedger::new();
        ledger.add_account("Cash", dec!(0)).unwrap();
        let mut log = TransactionLog::new();
        for category in ["", "Food"] {
            log.add_transaction(
                &mut ledger,
                record(
                    TransactionKind::Income,
                    "Cash",
                    dec!(5),
                    category,
                    date!(2024 - 02 - 01),
                ),
            )
            .unwrap();
        }
        let options = distinct_values(log.transactions(), TransactionColumn::Category);
        assert_eq!(options, ["", "Food"]);

        let filter = TransactionFilter::new().with(
            TransactionColumn::Category,
            FilterValue::from_control(&options[0]),
        );
        let got = collect(log.transactions(), &filter);

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].category, "");
    }

    #[test]
    fn every_offered_category_matches_its_records() {
        let mut ledger = AccountLedger::new();
        ledger.add_account("Cash", dec!(0)).unwrap();
        let mut log = TransactionLog::new();
        for category in [" Food", "Rent "] {
            log.add_transaction(
                &mut ledger,
                record(
                    TransactionKind::Income,
                    "Cash",
                    dec!(5),
                    category,
                    date!(2024 - 02 - 01),
                ),
            )
            .unwrap();
        }

        for option in distinct_values(log.transactions(), TransactionColumn::Category) {
            let filter = TransactionFilter::new().with(
                TransactionColumn::Category,
                FilterValue::from_control(&option),
            );

            assert_eq!(
                collect(log.transactions(), &filter).len(),
                1,
                "want one record for the category option {option:?}"
            );
        }
    }

    #[test]
    fn no_selected_columns_shows_all() {
        assert_eq!(visible_columns(&[]), TransactionColumn::ALL.to_vec());
    }

    #[test]
    fn selected_columns_keep_table_order() {
        let got = visible_columns(&[TransactionColumn::Date, TransactionColumn::Type]);

        assert_eq!(got, [TransactionColumn::Type, TransactionColumn::Date]);
    }
}
