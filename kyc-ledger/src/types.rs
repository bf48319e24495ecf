//! Core types for the ledger
//!
//! Balances use exact decimals; timestamps are UTC.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Kind of account owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerType {
    /// Natural person
    Individual,
    /// Legal entity, identified by a company UID
    Company,
}

impl OwnerType {
    /// Lowercase label
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerType::Individual => "individual",
            OwnerType::Company => "company",
        }
    }

    /// Map a free-text label to an owner type.
    ///
    /// Only "company" (any case) selects [`OwnerType::Company`]; every other
    /// label is treated as an individual.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("company") {
            OwnerType::Company
        } else {
            OwnerType::Individual
        }
    }
}

impl fmt::Display for OwnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Normal operation
    Active,
    /// Blocked pending compliance review
    Frozen,
    /// Declared for completeness; no operation transitions into it
    Closed,
}

impl AccountStatus {
    /// Lowercase label
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Frozen => "frozen",
            AccountStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owner of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountOwner {
    /// Owner name, also the ledger key
    pub name: String,

    /// Individual or company
    pub owner_type: OwnerType,

    /// Company UID (e.g. `CHE-123.456.789`), required for companies
    pub company_uid: Option<String>,
}

impl AccountOwner {
    /// Create a new owner
    pub fn new(name: impl Into<String>, owner_type: OwnerType, company_uid: Option<String>) -> Self {
        Self {
            name: name.into(),
            owner_type,
            company_uid,
        }
    }
}

/// Bank account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Informational identifier (UUIDv7). The ledger key is the owner name.
    pub account_id: Uuid,

    /// Account owner
    pub owner: AccountOwner,

    /// Balance (no enforced floor)
    pub balance: Decimal,

    /// Current status
    pub status: AccountStatus,

    /// Creation time
    pub created_at: DateTime<Utc>,

    /// Why the account is frozen, if it is
    pub freeze_reason: Option<String>,
}

impl Account {
    /// Open a new active account
    pub fn open(owner: AccountOwner, balance: Decimal) -> Self {
        Self {
            account_id: Uuid::now_v7(),
            owner,
            balance,
            status: AccountStatus::Active,
            created_at: Utc::now(),
            freeze_reason: None,
        }
    }

    /// Is the account frozen
    pub fn is_frozen(&self) -> bool {
        self.status == AccountStatus::Frozen
    }

    pub(crate) fn freeze(&mut self, reason: impl Into<String>) {
        self.status = AccountStatus::Frozen;
        self.freeze_reason = Some(reason.into());
    }

    pub(crate) fn unfreeze(&mut self) {
        self.status = AccountStatus::Active;
        self.freeze_reason = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_type_from_label() {
        assert_eq!(OwnerType::from_label("company"), OwnerType::Company);
        assert_eq!(OwnerType::from_label(" Company "), OwnerType::Company);
        assert_eq!(OwnerType::from_label("individual"), OwnerType::Individual);
        assert_eq!(OwnerType::from_label("partnership"), OwnerType::Individual);
    }

    #[test]
    fn test_open_account_is_active() {
        let owner = AccountOwner::new("Jane Doe", OwnerType::Individual, None);
        let account = Account::open(owner, Decimal::from(500));
        assert_eq!(account.status, AccountStatus::Active);
        assert!(account.freeze_reason.is_none());
        assert!(!account.is_frozen());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&AccountStatus::Frozen).unwrap();
        assert_eq!(json, "\"frozen\"");
    }
}
