//! Defines the account model and the in-memory ledger that holds account balances.

use std::fmt::Display;

use rust_decimal::Decimal;

use crate::Error;

/// The name of an account, e.g. "Checking" or "Savings".
///
/// Account names are the only way to refer to an account, so they must be
/// unique within a ledger.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AccountName(String);

impl AccountName {
    /// Create an account name.
    ///
    /// Leading and trailing whitespace is removed.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyAccountName] if `name` is
    /// empty or only contains whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyAccountName)
        } else {
            Ok(Self(name.to_owned()))
        }
    }
}

impl AsRef<str> for AccountName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for AccountName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The amount of money available in a bank account, wallet or credit card.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// The name of the account.
    pub name: AccountName,
    /// The current balance.
    pub balance: Decimal,
}

/// The set of accounts and their balances, kept in the order they were added.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AccountLedger {
    accounts: Vec<Account>,
}

impl AccountLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new account with a starting balance.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [Error::EmptyAccountName] if `name` is blank,
    /// - [Error::NegativeAmount] if `initial_balance` is less than zero,
    /// - [Error::DuplicateAccountName] if an account called `name` already exists.
    ///
    /// The ledger is not modified when an error is returned.
    pub fn add_account(
        &mut self,
        name: &str,
        initial_balance: Decimal,
    ) -> Result<&Account, Error> {
        let name = AccountName::new(name)?;

        if initial_balance < Decimal::ZERO {
            return Err(Error::NegativeAmount(initial_balance));
        }

        if self.contains(name.as_ref()) {
            return Err(Error::DuplicateAccountName(name.to_string()));
        }

        let index = self.accounts.len();
        self.accounts.push(Account {
            name,
            balance: initial_balance,
        });

        Ok(&self.accounts[index])
    }

    /// Remove the account called `name`.
    ///
    /// Deleting an account that does not exist is a no-op. Returns whether an
    /// account was removed.
    pub fn delete_account(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) => {
                self.accounts.remove(index);
                true
            }
            None => false,
        }
    }

    /// Add `amount` to the balance of the account called `name`.
    ///
    /// # Errors
    ///
    /// Returns [Error::UnknownAccount] if there is no account called `name`.
    pub fn apply_credit(&mut self, name: &str, amount: Decimal) -> Result<(), Error> {
        let account = self.get_mut(name)?;
        account.balance += amount;

        Ok(())
    }

    /// Subtract `amount` from the balance of the account called `name`.
    ///
    /// # Errors
    ///
    /// Returns [Error::UnknownAccount] if there is no account called `name`.
    pub fn apply_debit(&mut self, name: &str, amount: Decimal) -> Result<(), Error> {
        let account = self.get_mut(name)?;
        account.balance -= amount;

        Ok(())
    }

    /// The accounts in the order they were added.
    pub fn list_accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Get the account called `name`, if it exists.
    ///
    /// Like every lookup in the ledger, `name` is compared without leading or
    /// trailing whitespace.
    pub fn get(&self, name: &str) -> Option<&Account> {
        self.position(name).map(|index| &self.accounts[index])
    }

    /// Whether there is an account called `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The sum of the balances of all accounts.
    pub fn total_balance(&self) -> Decimal {
        self.accounts.iter().map(|account| account.balance).sum()
    }

    /// The number of accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the ledger has no accounts.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut Account, Error> {
        match self.position(name) {
            Some(index) => Ok(&mut self.accounts[index]),
            None => Err(Error::UnknownAccount(name.trim().to_owned())),
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();

        self.accounts
            .iter()
            .position(|account| account.name.as_ref() == name)
    }
}

#[cfg(test)]
mod account_name_tests {
    use crate::{Error, account::AccountName};

    #[test]
    fn trims_whitespace() {
        let name = AccountName::new("  Checking ").unwrap();

        assert_eq!(name.as_ref(), "Checking");
    }

    #[test]
    fn rejects_empty_name() {
        assert_eq!(AccountName::new(""), Err(Error::EmptyAccountName));
        assert_eq!(AccountName::new("   "), Err(Error::EmptyAccountName));
    }
}
