use super::context::CliContext;
use anyhow::{Result, bail};
use colored::Colorize;
use folio_core::contact::ContactForm;

pub async fn send(ctx: &CliContext, form: ContactForm) -> Result<()> {
    let problems = ctx.app.contact.validate(&form);
    if !problems.is_empty() {
        for problem in &problems {
            eprintln!("  {} {}", "-".red(), problem);
        }
        bail!("Contact form is invalid");
    }

    let submission = ctx.app.contact.submit(form).await?;
    println!(
        "{} {} (to {})",
        "Message sent:".green(),
        submission.id,
        ctx.config.contact.recipient
    );
    Ok(())
}
