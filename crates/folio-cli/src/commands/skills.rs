use super::context::CliContext;
use anyhow::Result;
use colored::Colorize;
use folio_application::SyncOutcome;

pub async fn sync(ctx: &CliContext, technologies: Vec<String>) -> Result<()> {
    let outcome = ctx.app.skills.try_sync_skills(&technologies).await?;
    print_outcome(&outcome);
    Ok(())
}

pub async fn cleanup(ctx: &CliContext) -> Result<()> {
    let outcome = ctx.app.skills.try_cleanup_unused_skills().await?;
    print_outcome(&outcome);
    Ok(())
}

pub async fn stats(ctx: &CliContext) -> Result<()> {
    let stats = ctx.app.skills.try_skills_statistics().await?;
    println!("{} skill(s)", stats.total_skills.to_string().bold());
    for usage in &stats.skills_with_experience {
        let years = usage
            .years
            .map(|y| format!("{y:.1} years"))
            .unwrap_or_else(|| "-".to_string());
        let line = format!("  {:<24} {:>3} record(s)  {}", usage.skill, usage.count, years);
        if usage.count == 0 {
            println!("{}", line.dimmed());
        } else {
            println!("{line}");
        }
    }
    Ok(())
}

fn print_outcome(outcome: &SyncOutcome) {
    match outcome {
        SyncOutcome::Updated(skills) => {
            println!("{}", "Profile skills updated".green());
            println!("  {}", skills.join(", "));
        }
        SyncOutcome::NoOp => println!("{}", "Nothing to change".dimmed()),
    }
}
