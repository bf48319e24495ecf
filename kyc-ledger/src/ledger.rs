//! Account ledger
//!
//! Accounts live in memory, keyed by owner name. All mutations take the
//! write lock, so create-then-check is atomic with respect to other callers.

use crate::{
    types::{Account, AccountOwner, OwnerType},
    validation::{freeze_reason, ValidationRules},
};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{info, warn};

/// Insertion-ordered account storage
#[derive(Debug, Default)]
struct AccountBook {
    /// Owner name -> position in `accounts`
    index: HashMap<String, usize>,
    accounts: Vec<Account>,
}

impl AccountBook {
    /// Insert or replace. A replaced record keeps its original position.
    /// Returns the stored account and whether a record was replaced.
    fn upsert(&mut self, account: Account) -> (&mut Account, bool) {
        match self.index.get(&account.owner.name) {
            Some(&pos) => {
                self.accounts[pos] = account;
                (&mut self.accounts[pos], true)
            }
            None => {
                let pos = self.accounts.len();
                self.index.insert(account.owner.name.clone(), pos);
                self.accounts.push(account);
                (&mut self.accounts[pos], false)
            }
        }
    }

    fn get(&self, owner_name: &str) -> Option<&Account> {
        self.index.get(owner_name).map(|&pos| &self.accounts[pos])
    }

    fn get_mut(&mut self, owner_name: &str) -> Option<&mut Account> {
        match self.index.get(owner_name) {
            Some(&pos) => Some(&mut self.accounts[pos]),
            None => None,
        }
    }
}

/// In-memory account ledger
///
/// Construct one per process and share it behind an `Arc`.
#[derive(Debug, Default)]
pub struct Ledger {
    book: RwLock<AccountBook>,
    rules: ValidationRules,
}

impl Ledger {
    /// Ledger with default validation rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger with custom validation rules
    pub fn with_rules(rules: ValidationRules) -> Self {
        Self {
            book: RwLock::new(AccountBook::default()),
            rules,
        }
    }

    /// Validation rules in effect
    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Create an account and run the basic checks.
    ///
    /// Always succeeds. An existing account with the same owner name is
    /// replaced. If the checks find violations the returned account is
    /// already frozen.
    pub fn create_account(
        &self,
        owner_name: impl Into<String>,
        owner_type: OwnerType,
        initial_balance: Decimal,
        company_uid: Option<String>,
    ) -> Account {
        let owner = AccountOwner::new(owner_name, owner_type, company_uid);
        let account = Account::open(owner, initial_balance);

        let mut book = self.book.write();
        let (stored, replaced) = book.upsert(account);
        if replaced {
            warn!("Replaced existing account for owner {:?}", stored.owner.name);
        }
        self.basic_checks(stored);
        let created = stored.clone();
        drop(book);

        info!(
            "Created {} account for {:?} (status: {})",
            created.owner.owner_type, created.owner.name, created.status
        );
        created
    }

    /// Run structural checks against a stored account and freeze it on any
    /// violation. Returns whether the account was frozen.
    fn basic_checks(&self, account: &mut Account) -> bool {
        match freeze_reason(&self.rules.check(account)) {
            Some(reason) => {
                warn!("Auto-freezing account {:?}: {}", account.owner.name, reason);
                account.freeze(reason);
                true
            }
            None => false,
        }
    }

    /// Get account by owner name
    pub fn get_account(&self, owner_name: &str) -> Option<Account> {
        self.book.read().get(owner_name).cloned()
    }

    /// Freeze an account. Returns `false` if no account exists for the owner.
    pub fn freeze_account(&self, owner_name: &str, reason: &str) -> bool {
        let mut book = self.book.write();
        match book.get_mut(owner_name) {
            Some(account) => {
                account.freeze(reason);
                warn!("Froze account {:?}: {}", owner_name, reason);
                true
            }
            None => false,
        }
    }

    /// Unfreeze an account and clear its reason. Returns `false` if no
    /// account exists for the owner.
    pub fn unfreeze_account(&self, owner_name: &str) -> bool {
        let mut book = self.book.write();
        match book.get_mut(owner_name) {
            Some(account) => {
                account.unfreeze();
                info!("Unfroze account {:?}", owner_name);
                true
            }
            None => false,
        }
    }

    /// All accounts in insertion order
    pub fn list_accounts(&self) -> Vec<Account> {
        self.book.read().accounts.clone()
    }

    /// Number of accounts
    pub fn len(&self) -> usize {
        self.book.read().accounts.len()
    }

    /// No accounts yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
