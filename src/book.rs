//! In-memory account book: the record set and its mapping invariants.

use crate::error::{Result, StoreError};
use crate::types::{Account, AccountUpdate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The full set of accounts, keyed by holder name.
///
/// Invariant: every key equals the `holder` field of its record. All
/// mutations preserve this; decoding normalizes hand-edited files by
/// letting the mapping key win. Encodes transparently as the inner map.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountBook {
    accounts: HashMap<String, Account>,
}

impl AccountBook {
    /// Empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the book holds no accounts.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Whether an account exists for this holder.
    pub fn contains(&self, holder: &str) -> bool {
        self.accounts.contains_key(holder)
    }

    /// Look up a single account.
    pub fn get(&self, holder: &str) -> Option<&Account> {
        self.accounts.get(holder)
    }

    /// Iterate all accounts, in no particular order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Insert a new account, keyed by its holder name.
    ///
    /// Fails with `AlreadyExists` if the holder already has one, leaving
    /// the book unchanged.
    pub fn insert(&mut self, account: Account) -> Result<()> {
        if self.accounts.contains_key(&account.holder) {
            return Err(StoreError::AlreadyExists(account.holder));
        }
        self.accounts.insert(account.holder.clone(), account);
        Ok(())
    }

    /// Apply a partial update to an existing account.
    ///
    /// Each supplied field overwrites independently; an update carrying no
    /// fields still succeeds. Fails with `NotFound` if the holder is
    /// absent, leaving the book unchanged.
    pub fn apply(&mut self, holder: &str, update: AccountUpdate) -> Result<&Account> {
        let account = self
            .accounts
            .get_mut(holder)
            .ok_or_else(|| StoreError::NotFound(holder.to_string()))?;

        if let Some(pin) = update.pin {
            account.pin = pin;
        }
        if let Some(balance) = update.balance {
            account.balance = balance;
        }
        Ok(account)
    }

    /// Remove an account, returning the removed record.
    ///
    /// Fails with `NotFound` if the holder is absent, leaving the book
    /// unchanged.
    pub fn remove(&mut self, holder: &str) -> Result<Account> {
        self.accounts
            .remove(holder)
            .ok_or_else(|| StoreError::NotFound(holder.to_string()))
    }

    /// Re-key records whose holder field disagrees with their mapping key.
    ///
    /// Only a hand-edited file can introduce drift; the mapping key wins.
    pub(crate) fn adopt_keys(&mut self) {
        for (name, account) in self.accounts.iter_mut() {
            if account.holder != *name {
                account.holder.clone_from(name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_book() -> AccountBook {
        let mut book = AccountBook::new();
        book.insert(Account::new("Alice", "1234", 500.0)).unwrap();
        book.insert(Account::new("Bob", "9876", 42.0)).unwrap();
        book
    }

    #[test]
    fn test_insert_rejects_duplicate() {
        let mut book = sample_book();
        let result = book.insert(Account::new("Alice", "0000", 1.0));

        assert!(matches!(result, Err(StoreError::AlreadyExists(name)) if name == "Alice"));
        assert_eq!(book.get("Alice").unwrap().pin, "1234");
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_apply_updates_fields_independently() {
        let mut book = sample_book();

        book.apply("Alice", AccountUpdate::new().with_pin("4321"))
            .unwrap();
        assert_eq!(book.get("Alice").unwrap().pin, "4321");
        assert_eq!(book.get("Alice").unwrap().balance, 500.0);

        book.apply("Alice", AccountUpdate::new().with_balance(750.0))
            .unwrap();
        assert_eq!(book.get("Alice").unwrap().pin, "4321");
        assert_eq!(book.get("Alice").unwrap().balance, 750.0);
    }

    #[test]
    fn test_apply_empty_update_is_noop() {
        let mut book = sample_book();
        let updated = book.apply("Bob", AccountUpdate::new()).unwrap().clone();

        assert_eq!(updated, Account::new("Bob", "9876", 42.0));
    }

    #[test]
    fn test_apply_missing_holder() {
        let mut book = AccountBook::new();
        let result = book.apply("Ghost", AccountUpdate::new().with_balance(1.0));

        assert!(matches!(result, Err(StoreError::NotFound(name)) if name == "Ghost"));
    }

    #[test]
    fn test_remove_returns_record() {
        let mut book = sample_book();
        let removed = book.remove("Bob").unwrap();

        assert_eq!(removed, Account::new("Bob", "9876", 42.0));
        assert!(!book.contains("Bob"));
        assert!(matches!(book.remove("Bob"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_transparent_encoding() {
        let book = sample_book();
        let value = serde_json::to_value(&book).unwrap();

        assert_eq!(
            value["Alice"],
            json!({"account_holder": "Alice", "pin": "1234", "balance": 500.0})
        );
        assert_eq!(value.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_adopt_keys_rekeys_drifted_records() {
        let mut book: AccountBook = serde_json::from_value(json!({
            "Alice": {"account_holder": "alice", "pin": "1234", "balance": 5.0}
        }))
        .unwrap();

        book.adopt_keys();
        assert_eq!(book.get("Alice").unwrap().holder, "Alice");
    }
}
