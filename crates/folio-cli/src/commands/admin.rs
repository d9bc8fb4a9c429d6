use super::context::CliContext;
use anyhow::Result;
use colored::Colorize;

pub async fn register(ctx: &CliContext, uid: &str, email: Option<&str>) -> Result<()> {
    let user = ctx.directory.register(uid, email).await?;
    println!("{} {}", "Registered".green(), user.uid);
    Ok(())
}

pub async fn set(
    ctx: &CliContext,
    uid: Option<&str>,
    email: Option<&str>,
    is_admin: bool,
) -> Result<()> {
    let update = ctx
        .app
        .admin
        .set_admin_claim_by_email_or_uid(uid, email, Some(is_admin))
        .await?;
    println!("{}", update.message.green());
    Ok(())
}

pub async fn list(ctx: &CliContext) -> Result<()> {
    let users = ctx.app.admin.list_users().await?;
    if users.is_empty() {
        println!("{}", "No users registered".dimmed());
    }
    for user in users {
        let role = if user.custom_claims.admin {
            "admin".yellow().bold()
        } else {
            "user".normal()
        };
        println!(
            "  {:<24} {:<32} {}",
            user.uid,
            user.email.as_deref().unwrap_or("-"),
            role
        );
    }
    Ok(())
}
