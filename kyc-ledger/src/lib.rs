//! KYC Ledger
//!
//! In-memory bank ledger used by the KYC orchestrator.
//!
//! # Model
//!
//! - **Keyed by owner name**: one account per owner name, re-creation replaces
//!   the previous record in place
//! - **Soft validation**: creation always succeeds, structural violations
//!   freeze the account instead of rejecting it
//! - **Compliance actions**: freeze / unfreeze with a recorded reason

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]
//!
//! # Invariants
//!
//! - Status transitions are Active ⇄ Frozen only
//! - A frozen account always carries a freeze reason, an active one never does
//! - `list_accounts` returns accounts in first-insertion order
//!
//! # Example
//!
//! ```
//! use kyc_ledger::{Ledger, OwnerType, AccountStatus};
//! use rust_decimal::Decimal;
//!
//! let ledger = Ledger::new();
//! let account = ledger.create_account("Test Company AG", OwnerType::Company, Decimal::from(1000), None);
//! assert_eq!(account.status, AccountStatus::Frozen);
//! assert!(ledger.unfreeze_account("Test Company AG"));
//! ```

pub mod types;
pub mod validation;
pub mod ledger;

// Re-exports
pub use types::{Account, AccountOwner, AccountStatus, OwnerType};
pub use validation::{ValidationRules, Violation};
pub use ledger::Ledger;
