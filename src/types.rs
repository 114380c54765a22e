//! Core types for the account store.

use serde::{Deserialize, Serialize};

/// A single account record.
///
/// The holder name doubles as the record's key in the containing book. The
/// field is kept on the record as well so the persisted form carries it
/// explicitly under the `account_holder` name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Holder name, case-sensitive. Matches the book key for this record.
    #[serde(rename = "account_holder")]
    pub holder: String,

    /// PIN, stored verbatim. Length and digit content are the caller's concern.
    pub pin: String,

    /// Current balance. Callers supply non-negative values.
    pub balance: f64,
}

impl Account {
    /// Create a new account record.
    pub fn new(holder: impl Into<String>, pin: impl Into<String>, balance: f64) -> Self {
        Self {
            holder: holder.into(),
            pin: pin.into(),
            balance,
        }
    }
}

/// Partial update for an existing account.
///
/// Absent fields are left unchanged; present fields overwrite. The empty
/// update is valid and leaves every field as it was.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AccountUpdate {
    /// Replacement PIN, if any.
    pub pin: Option<String>,

    /// Replacement balance, if any. `Some(0.0)` is a real value, distinct
    /// from "leave unchanged".
    pub balance: Option<f64>,
}

impl AccountUpdate {
    /// Update that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a replacement PIN.
    pub fn with_pin(mut self, pin: impl Into<String>) -> Self {
        self.pin = Some(pin.into());
        self
    }

    /// Set a replacement balance.
    pub fn with_balance(mut self, balance: f64) -> Self {
        self.balance = Some(balance);
        self
    }
}
