use super::context::CliContext;
use anyhow::Result;

pub async fn run(ctx: &CliContext) -> Result<()> {
    let stats = ctx.app.statistics.portfolio_stats().await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
