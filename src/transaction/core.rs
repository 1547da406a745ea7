//! Defines the transaction model and the append-only transaction log.
//!
//! Appending a transaction to the log also applies its effect to the
//! [AccountLedger]: income credits an account, an expense debits an account
//! and a transfer moves money from one account to another.

use std::{fmt::Display, str::FromStr};

use rust_decimal::Decimal;
use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    account::{AccountLedger, AccountName},
};

/// The separator between the source and destination account names of a transfer.
pub const TRANSFER_SEPARATOR: &str = " -> ";

/// Whether money was earned, spent or moved between accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned, credited to one account.
    Income,
    /// Money spent, debited from one account.
    Expense,
    /// Money moved from a source account to a destination account.
    Transfer,
}

impl TransactionKind {
    /// All transaction kinds, in the order they are offered to the user.
    pub const ALL: [TransactionKind; 3] = [Self::Income, Self::Expense, Self::Transfer];

    /// The display name, e.g. "Income".
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
            Self::Transfer => "Transfer",
        }
    }

    /// The value used for this kind in HTML forms, e.g. "income".
    pub fn form_value(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Transfer => "transfer",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The account(s) a transaction applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountRef {
    /// The account credited by income or debited by an expense.
    Single(AccountName),
    /// The accounts money is moved between.
    Transfer {
        /// The account that is debited.
        source: AccountName,
        /// The account that is credited.
        destination: AccountName,
    },
}

impl AccountRef {
    /// Parse the account text of a transaction of type `kind`.
    ///
    /// Transfers must be written as `"<source> -> <destination>"`, any other
    /// kind is a single account name.
    ///
    /// # Errors
    ///
    /// Returns [Error::MalformedTransfer] if a transfer does not contain
    /// exactly one separator with a name on either side, or
    /// [Error::EmptyAccountName] if a single account name is blank.
    pub fn parse(kind: TransactionKind, text: &str) -> Result<Self, Error> {
        match kind {
            TransactionKind::Income | TransactionKind::Expense => {
                AccountName::new(text).map(Self::Single)
            }
            TransactionKind::Transfer => {
                let mut parts = text.split(TRANSFER_SEPARATOR);
                let (Some(source), Some(destination), None) =
                    (parts.next(), parts.next(), parts.next())
                else {
                    return Err(Error::MalformedTransfer(text.to_owned()));
                };

                let source = AccountName::new(source)
                    .map_err(|_| Error::MalformedTransfer(text.to_owned()))?;
                let destination = AccountName::new(destination)
                    .map_err(|_| Error::MalformedTransfer(text.to_owned()))?;

                Ok(Self::Transfer {
                    source,
                    destination,
                })
            }
        }
    }

    /// Join a transfer's account names with [TRANSFER_SEPARATOR].
    pub fn transfer_text(source: &str, destination: &str) -> String {
        format!("{source}{TRANSFER_SEPARATOR}{destination}")
    }
}

impl Display for AccountRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(name) => write!(f, "{name}"),
            Self::Transfer {
                source,
                destination,
            } => write!(f, "{source}{TRANSFER_SEPARATOR}{destination}"),
        }
    }
}

/// A recorded income, expense or transfer.
///
/// Transactions are never changed once they are added to a [TransactionLog].
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Whether money was earned, spent or moved.
    pub kind: TransactionKind,
    /// The account or pair of accounts affected.
    pub account: AccountRef,
    /// How much money, never negative.
    pub amount: Decimal,
    /// A free text label, e.g. "Groceries", without leading or trailing whitespace.
    pub category: String,
    /// When the transaction happened.
    pub date: Date,
}

/// A request to add a transaction.
///
/// `account` is the raw account text, i.e. a single account name or
/// `"<source> -> <destination>"` for transfers.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// Income, expense or transfer.
    pub kind: TransactionKind,
    /// The account name, or the transfer text.
    pub account: String,
    /// How much money.
    pub amount: Decimal,
    /// A free text label, surrounding whitespace is removed when it is added to a log.
    pub category: String,
    /// When the transaction happened.
    pub date: Date,
}

/// The history of transactions in the order they were added.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionLog {
    transactions: Vec<Transaction>,
}

impl TransactionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transaction and apply it to the account balances in `ledger`.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [Error::NegativeAmount] if the amount is less than zero,
    /// - [Error::MalformedTransfer] or [Error::EmptyAccountName] if the account
    ///   text cannot be parsed,
    /// - [Error::UnknownAccount] if a referenced account is not in `ledger`,
    /// - [Error::SelfTransfer] if a transfer names the same account twice.
    ///
    /// Neither the log nor the ledger is modified when an error is returned.
    pub fn add_transaction(
        &mut self,
        ledger: &mut AccountLedger,
        new_transaction: NewTransaction,
    ) -> Result<&Transaction, Error> {
        let NewTransaction {
            kind,
            account,
            amount,
            category,
            date,
        } = new_transaction;

        if amount < Decimal::ZERO {
            return Err(Error::NegativeAmount(amount));
        }

        let account = AccountRef::parse(kind, &account)?;
        resolve(&account, ledger)?;

        let index = self.transactions.len();
        self.transactions.push(Transaction {
            kind,
            account,
            amount,
            category: category.trim().to_owned(),
            date,
        });
        let transaction = &self.transactions[index];

        // Every name was resolved above, so the ledger mutations cannot fail.
        match &transaction.account {
            AccountRef::Single(name) if kind == TransactionKind::Income => {
                ledger.apply_credit(name.as_ref(), amount)?;
            }
            AccountRef::Single(name) => {
                ledger.apply_debit(name.as_ref(), amount)?;
            }
            AccountRef::Transfer {
                source,
                destination,
            } => {
                ledger.apply_debit(source.as_ref(), amount)?;
                ledger.apply_credit(destination.as_ref(), amount)?;
            }
        }

        Ok(transaction)
    }

    /// All transactions in the order they were added.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The number of transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether no transactions have been added.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

fn resolve(account: &AccountRef, ledger: &AccountLedger) -> Result<(), Error> {
    let require = |name: &AccountName| {
        if ledger.contains(name.as_ref()) {
            Ok(())
        } else {
            Err(Error::UnknownAccount(name.to_string()))
        }
    };

    match account {
        AccountRef::Single(name) => require(name),
        AccountRef::Transfer {
            source,
            destination,
        } => {
            require(source)?;
            require(destination)?;

            if source == destination {
                Err(Error::SelfTransfer(source.to_string()))
            } else {
                Ok(())
            }
        }
    }
}

impl FromStr for TransactionKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}
