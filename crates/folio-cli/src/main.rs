use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::context::CliContext;
use commands::gallery::GalleryKindArg;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio - portfolio content administration", long_about = None)]
struct Cli {
    /// Keep config and data below this directory instead of the user dirs
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the profile and sample content if no profile exists
    Seed,
    /// Reconcile profile skills with experiences and projects
    Skills {
        #[command(subcommand)]
        action: SkillsAction,
    },
    /// Print portfolio statistics as JSON
    Stats,
    /// Manage users and the admin claim
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Send a contact form message to the site owner
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        company: Option<String>,
    },
    /// Edit project and travel image galleries
    Gallery {
        #[command(subcommand)]
        action: GalleryAction,
    },
}

#[derive(Subcommand)]
enum SkillsAction {
    /// Add technologies to the profile's skills
    Sync { technologies: Vec<String> },
    /// Remove skills no experience or project uses
    Cleanup,
    /// Show per-skill usage
    Stats,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Register a user in the local directory
    Register {
        uid: String,
        #[arg(long)]
        email: Option<String>,
    },
    /// Grant or revoke the admin claim by uid or email
    Set {
        #[arg(long)]
        uid: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Revoke instead of grant
        #[arg(long)]
        revoke: bool,
    },
    /// List users (first 10)
    List,
}

#[derive(Subcommand)]
enum GalleryAction {
    /// Show the stored images
    List { kind: GalleryKindArg, id: String },
    /// Upload files and append them to the gallery
    Add {
        kind: GalleryKindArg,
        id: String,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Remove images by position (as shown by `list`)
    Remove {
        kind: GalleryKindArg,
        id: String,
        #[arg(required = true)]
        indexes: Vec<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = CliContext::open(cli.home.as_deref()).await?;

    execute(ctx, cli.command).await
}

/// Runs `command`, then drains queued skill sync jobs whether or not it failed.
async fn execute(ctx: CliContext, command: Commands) -> Result<()> {
    let result = run(&ctx, command).await;
    ctx.finish().await;
    result
}

async fn run(ctx: &CliContext, command: Commands) -> Result<()> {
    match command {
        Commands::Seed => commands::seed::run(ctx).await?,
        Commands::Skills { action } => match action {
            SkillsAction::Sync { technologies } => {
                commands::skills::sync(ctx, technologies).await?
            }
            SkillsAction::Cleanup => commands::skills::cleanup(ctx).await?,
            SkillsAction::Stats => commands::skills::stats(ctx).await?,
        },
        Commands::Stats => commands::stats::run(ctx).await?,
        Commands::Admin { action } => match action {
            AdminAction::Register { uid, email } => {
                commands::admin::register(ctx, &uid, email.as_deref()).await?
            }
            AdminAction::Set { uid, email, revoke } => {
                commands::admin::set(ctx, uid.as_deref(), email.as_deref(), !revoke).await?
            }
            AdminAction::List => commands::admin::list(ctx).await?,
        },
        Commands::Contact {
            name,
            email,
            subject,
            message,
            phone,
            company,
        } => {
            let form = folio_core::contact::ContactForm {
                name,
                email,
                subject,
                message,
                phone,
                company,
            };
            commands::contact::send(ctx, form).await?
        }
        Commands::Gallery { action } => match action {
            GalleryAction::List { kind, id } => commands::gallery::list(ctx, kind, &id).await?,
            GalleryAction::Add { kind, id, files } => {
                commands::gallery::add(ctx, kind, &id, &files).await?
            }
            GalleryAction::Remove { kind, id, indexes } => {
                commands::gallery::remove(ctx, kind, &id, &indexes).await?
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::experience::{ExperienceFields, Tenure};
    use folio_core::profile::ProfileFields;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_failed_command_still_drains_sync_queue() {
        let home = TempDir::new().unwrap();
        let ctx = CliContext::open(Some(home.path())).await.unwrap();
        ctx.app
            .profile
            .save_profile(ProfileFields {
                name: "Alex Doe".to_string(),
                title: "Engineer".to_string(),
                bio: "Builds back ends".to_string(),
                email: "alex@example.com".to_string(),
                skills: vec!["Go".to_string()],
                ..Default::default()
            })
            .await
            .unwrap();
        ctx.app
            .experience
            .create(ExperienceFields {
                company: "Acme".to_string(),
                position: "Engineer".to_string(),
                description: "Built the platform team".to_string(),
                tenure: Tenure::Ongoing,
                technologies: vec!["Rust".to_string()],
                ..Default::default()
            })
            .await
            .unwrap();

        let missing = Commands::Gallery {
            action: GalleryAction::Add {
                kind: GalleryKindArg::Project,
                id: "missing".to_string(),
                files: Vec::new(),
            },
        };
        assert!(execute(ctx, missing).await.is_err());

        let ctx = CliContext::open(Some(home.path())).await.unwrap();
        let profile = ctx.app.profile.get_profile().await.unwrap().unwrap();
        assert_eq!(profile.fields.skills, vec!["Go", "Rust"]);
    }
}
