//! Demo data

use crate::{context::KycContext, Result};
use kyc_ledger::{Account, OwnerType};
use rust_decimal::Decimal;
use tracing::info;

/// Sample company owner
pub const SAMPLE_COMPANY: &str = "Test Company AG";

/// UID of the sample company
pub const SAMPLE_COMPANY_UID: &str = "CHE-123.456.789";

/// Create a company account and an account for a randomly picked listed
/// person. Fails if the sanctions list cannot be loaded.
pub async fn init_sample_data(ctx: &KycContext) -> Result<Vec<Account>> {
    let sanctioned = ctx.matcher().random_sanctioned_name().await?;

    let company = ctx.ledger().create_account(
        SAMPLE_COMPANY,
        OwnerType::Company,
        Decimal::from(1000),
        Some(SAMPLE_COMPANY_UID.to_string()),
    );
    let person = ctx.ledger().create_account(
        sanctioned,
        OwnerType::Individual,
        Decimal::from(500),
        None,
    );

    info!("Seeded sample accounts for {:?} and {:?}", company.owner.name, person.owner.name);
    Ok(vec![company, person])
}
