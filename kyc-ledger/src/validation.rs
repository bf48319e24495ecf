//! Creation-time structural checks
//!
//! Violations do not reject an account; the ledger freezes it with the
//! joined violation messages as reason.

use crate::types::{Account, OwnerType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rules applied when an account is created
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    /// Minimum owner name length after trimming
    pub min_name_len: usize,

    /// Company accounts must carry a UID
    pub require_company_uid: bool,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            min_name_len: 2,
            require_company_uid: true,
        }
    }
}

/// A single structural violation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// Owner name too short
    InvalidOwnerName,
    /// Company owner without UID
    MissingCompanyUid,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::InvalidOwnerName => f.write_str("Invalid owner name"),
            Violation::MissingCompanyUid => f.write_str("Company requires UID"),
        }
    }
}

impl ValidationRules {
    /// Collect violations for an account, in check order
    pub fn check(&self, account: &Account) -> Vec<Violation> {
        let owner = &account.owner;
        let mut violations = Vec::new();

        if owner.name.trim().chars().count() < self.min_name_len {
            violations.push(Violation::InvalidOwnerName);
        }

        let uid_missing = owner
            .company_uid
            .as_deref()
            .map_or(true, |uid| uid.trim().is_empty());
        if self.require_company_uid && owner.owner_type == OwnerType::Company && uid_missing {
            violations.push(Violation::MissingCompanyUid);
        }

        violations
    }
}

/// Join violations into a freeze reason
pub fn freeze_reason(violations: &[Violation]) -> Option<String> {
    if violations.is_empty() {
        return None;
    }
    Some(
        violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountOwner;
    use rust_decimal::Decimal;

    fn account(name: &str, owner_type: OwnerType, uid: Option<&str>) -> Account {
        Account::open(
            AccountOwner::new(name, owner_type, uid.map(str::to_string)),
            Decimal::ZERO,
        )
    }

    #[test]
    fn test_valid_individual() {
        let rules = ValidationRules::default();
        assert!(rules.check(&account("Jane Doe", OwnerType::Individual, None)).is_empty());
    }

    #[test]
    fn test_short_name() {
        let rules = ValidationRules::default();
        assert_eq!(
            rules.check(&account("  A ", OwnerType::Individual, None)),
            vec![Violation::InvalidOwnerName]
        );
    }

    #[test]
    fn test_company_without_uid() {
        let rules = ValidationRules::default();
        assert_eq!(
            rules.check(&account("Test Company AG", OwnerType::Company, Some(""))),
            vec![Violation::MissingCompanyUid]
        );
        assert!(rules
            .check(&account("Test Company AG", OwnerType::Company, Some("CHE-123.456.789")))
            .is_empty());
    }

    #[test]
    fn test_reason_joins_in_order() {
        let rules = ValidationRules::default();
        let violations = rules.check(&account("A", OwnerType::Company, None));
        assert_eq!(
            freeze_reason(&violations).as_deref(),
            Some("Invalid owner name; Company requires UID")
        );
        assert_eq!(freeze_reason(&[]), None);
    }

    #[test]
    fn test_uid_rule_can_be_disabled() {
        let rules = ValidationRules {
            require_company_uid: false,
            ..ValidationRules::default()
        };
        assert!(rules.check(&account("Test Company AG", OwnerType::Company, None)).is_empty());
    }
}
