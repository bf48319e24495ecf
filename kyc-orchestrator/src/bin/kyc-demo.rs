//! KYC demo: seed sample accounts, screen every owner, print the outcome

use anyhow::Context as _;
use kyc_orchestrator::{init_sample_data, review_all, BankTools, Config, KycContext};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting KYC demo");

    let config = Config::from_env().context("loading configuration")?;
    let call_limit = config.call_log.default_limit;
    let ctx = KycContext::from_config(config)?;

    let seeded = init_sample_data(&ctx)
        .await
        .context("seeding sample accounts")?;
    tracing::info!("Seeded {} accounts", seeded.len());

    let outcomes = review_all(&ctx).await.context("screening account owners")?;
    for outcome in &outcomes {
        if outcome.is_hit() {
            println!("HIT   {} -> {}", outcome.owner_name, outcome.matches.join(", "));
        } else {
            println!("CLEAR {}", outcome.owner_name);
        }
    }

    let bank = BankTools::new(ctx.clone());
    println!("\n{}", bank.list_accounts());

    println!("\nRecent tool calls:");
    for call in ctx.calls().last_calls(call_limit) {
        println!(
            "  {} {}.{} {}",
            call.timestamp.format("%H:%M:%S"),
            call.plugin,
            call.function,
            call.input
        );
    }

    println!("\n{}", ctx.metrics().render()?);
    Ok(())
}
