//! Gallery editing from the command line.
//!
//! Each command opens an editor session on the stored record, applies the
//! requested change and saves it through the transactional editor. Ctrl-C
//! cancels an in-flight save and rolls back its uploads.

use super::context::CliContext;
use anyhow::{Result, anyhow, bail};
use clap::ValueEnum;
use colored::Colorize;
use folio_application::editor::{EditSession, SaveReport};
use folio_core::image::GalleryFields;
use folio_core::store::Document;
use folio_infrastructure::local_object_storage::staged_file_from_path;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GalleryKindArg {
    Project,
    Travel,
}

pub async fn list(ctx: &CliContext, kind: GalleryKindArg, id: &str) -> Result<()> {
    let images = match kind {
        GalleryKindArg::Project => ctx.app.project.get(id).await?.map(|p| p.fields.images),
        GalleryKindArg::Travel => ctx.app.travel.get(id).await?.map(|t| t.fields.images),
    }
    .ok_or_else(|| anyhow!("No {kind:?} with id '{id}'"))?;

    if images.is_empty() {
        println!("{}", "No images".dimmed());
    }
    for (index, url) in images.iter().enumerate() {
        println!("  {index:>2}  {url}");
    }
    Ok(())
}

pub async fn add(
    ctx: &CliContext,
    kind: GalleryKindArg,
    id: &str,
    files: &[PathBuf],
) -> Result<()> {
    let cancel = cancel_on_ctrl_c();
    match kind {
        GalleryKindArg::Project => {
            let project = ctx
                .app
                .project
                .get(id)
                .await?
                .ok_or_else(|| anyhow!("No project with id '{id}'"))?;
            let mut session = ctx.app.project.open_editor(Some(id)).await?;
            stage_paths(&mut session, files).await?;
            let report = ctx.app.project.save(&mut session, project.fields, &cancel).await?;
            print_report(&report);
        }
        GalleryKindArg::Travel => {
            let travel = ctx
                .app
                .travel
                .get(id)
                .await?
                .ok_or_else(|| anyhow!("No travel with id '{id}'"))?;
            let mut session = ctx.app.travel.open_editor(Some(id)).await?;
            stage_paths(&mut session, files).await?;
            let report = ctx.app.travel.save(&mut session, travel.fields, &cancel).await?;
            print_report(&report);
        }
    }
    Ok(())
}

pub async fn remove(
    ctx: &CliContext,
    kind: GalleryKindArg,
    id: &str,
    indexes: &[usize],
) -> Result<()> {
    let cancel = cancel_on_ctrl_c();
    match kind {
        GalleryKindArg::Project => {
            let project = ctx
                .app
                .project
                .get(id)
                .await?
                .ok_or_else(|| anyhow!("No project with id '{id}'"))?;
            let mut session = ctx.app.project.open_editor(Some(id)).await?;
            mark_removed(&mut session, indexes)?;
            let report = ctx.app.project.save(&mut session, project.fields, &cancel).await?;
            print_report(&report);
        }
        GalleryKindArg::Travel => {
            let travel = ctx
                .app
                .travel
                .get(id)
                .await?
                .ok_or_else(|| anyhow!("No travel with id '{id}'"))?;
            let mut session = ctx.app.travel.open_editor(Some(id)).await?;
            mark_removed(&mut session, indexes)?;
            let report = ctx.app.travel.save(&mut session, travel.fields, &cancel).await?;
            print_report(&report);
        }
    }
    Ok(())
}

async fn stage_paths(session: &mut EditSession, files: &[PathBuf]) -> Result<()> {
    let mut staged = 0;
    for path in files {
        let file = staged_file_from_path(path).await?;
        match session.stage_file(file) {
            Ok(()) => staged += 1,
            Err(rejection) => eprintln!("{} {}", "skipped:".yellow(), rejection),
        }
    }
    if staged == 0 {
        bail!("No acceptable images to upload");
    }
    Ok(())
}

fn mark_removed(session: &mut EditSession, indexes: &[usize]) -> Result<()> {
    for &index in indexes {
        if !session.remove_image(index) {
            bail!("No image at position {index}");
        }
    }
    Ok(())
}

fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("{}", "Cancelling...".yellow());
            trigger.cancel();
        }
    });
    token
}

fn print_report<T>(report: &SaveReport<T>)
where
    T: Document,
    T::Fields: GalleryFields,
{
    println!(
        "{} {} ({} uploaded, {} image(s))",
        "Saved".green(),
        report.record.id(),
        report.uploaded.len(),
        report.record.fields().images().len()
    );
    for warning in &report.cleanup_warnings {
        eprintln!(
            "{} could not delete {}: {}",
            "warning:".yellow().bold(),
            warning.url,
            warning.message
        );
    }
}
