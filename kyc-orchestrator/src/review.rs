//! Compliance review: screen account owners and freeze on a hit

use crate::{context::KycContext, Error, Result};
use kyc_ledger::AccountStatus;
use serde::Serialize;
use tracing::{info, warn};

/// Result of reviewing one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewOutcome {
    /// Owner name reviewed
    pub owner_name: String,
    /// Listed names the owner matched
    pub matches: Vec<String>,
    /// Status after review
    pub status: AccountStatus,
}

impl ReviewOutcome {
    /// True if the owner matched the sanctions list
    pub fn is_hit(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// Freeze reason recorded for a sanctions hit
pub fn sanctions_reason(matches: &[String]) -> String {
    format!("Sanctions match: {}", matches.join(", "))
}

/// Screen one account owner and freeze the account on a hit.
///
/// A screening failure is returned as an error and leaves the account
/// untouched. A clear result never unfreezes an account.
pub async fn review_account(ctx: &KycContext, owner_name: &str) -> Result<ReviewOutcome> {
    if ctx.ledger().get_account(owner_name).is_none() {
        return Err(Error::AccountNotFound(owner_name.to_string()));
    }

    let matches = ctx.matcher().search(owner_name).await?;
    if !matches.is_empty() {
        ctx.metrics().record_sanctions_hit();
        let reason = sanctions_reason(&matches);
        if ctx.ledger().freeze_account(owner_name, &reason) {
            ctx.metrics().record_account_frozen();
            warn!("Froze account of {:?}: {}", owner_name, reason);
        }
    }

    let status = ctx
        .ledger()
        .get_account(owner_name)
        .map(|account| account.status)
        .ok_or_else(|| Error::AccountNotFound(owner_name.to_string()))?;

    Ok(ReviewOutcome {
        owner_name: owner_name.to_string(),
        matches,
        status,
    })
}

/// Review every account in creation order; stops at the first screening error
pub async fn review_all(ctx: &KycContext) -> Result<Vec<ReviewOutcome>> {
    let owners: Vec<String> = ctx
        .ledger()
        .list_accounts()
        .into_iter()
        .map(|account| account.owner.name)
        .collect();

    let mut outcomes = Vec::with_capacity(owners.len());
    for owner in &owners {
        outcomes.push(review_account(ctx, owner).await?);
    }

    let hits = outcomes.iter().filter(|o| o.is_hit()).count();
    info!("Reviewed {} accounts, {} sanctions hits", outcomes.len(), hits);
    Ok(outcomes)
}
