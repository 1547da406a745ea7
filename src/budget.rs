//! The application state for one session: the account ledger and the
//! transaction log.

use rust_decimal::Decimal;

use crate::{
    Error,
    account::{Account, AccountLedger},
    transaction::{NewTransaction, Transaction, TransactionLog},
};

/// The accounts and transactions of a budget.
///
/// Every operation takes the budget by reference, the server keeps one
/// instance behind a lock in [AppState](crate::AppState).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Budget {
    ledger: AccountLedger,
    log: TransactionLog,
}

impl Budget {
    /// Create a budget with no accounts and no transactions.
    pub fn new() -> Self {
        Self::default()
    }

    /// The account ledger.
    pub fn ledger(&self) -> &AccountLedger {
        &self.ledger
    }

    /// The transaction log.
    pub fn log(&self) -> &TransactionLog {
        &self.log
    }

    /// Add an account. See [AccountLedger::add_account].
    pub fn add_account(
        &mut self,
        name: &str,
        initial_balance: Decimal,
    ) -> Result<&Account, Error> {
        self.ledger.add_account(name, initial_balance)
    }

    /// Delete an account. See [AccountLedger::delete_account].
    pub fn delete_account(&mut self, name: &str) -> bool {
        self.ledger.delete_account(name)
    }

    /// Record a transaction and update the balances of the accounts it names.
    /// See [TransactionLog::add_transaction].
    pub fn add_transaction(
        &mut self,
        new_transaction: NewTransaction,
    ) -> Result<&Transaction, Error> {
        self.log.add_transaction(&mut self.ledger, new_transaction)
    }
}
