//! Wires the application for one CLI invocation.

use anyhow::{Context, Result};
use colored::Colorize;
use folio_application::editor::UploadProgress;
use folio_application::{FolioApp, Gateways, SyncWarning};
use folio_core::auth::{AuthSession, UserClaims};
use folio_core::clock::SystemClock;
use folio_core::config::RootConfig;
use folio_infrastructure::backend::{open_document_store, open_email_sender, open_object_storage};
use folio_infrastructure::{ConfigService, FolioPaths, StaticAuthProvider, StoreUserDirectory};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// uid of the local operator session the CLI acts as.
const OPERATOR_UID: &str = "cli-operator";

pub struct CliContext {
    pub app: FolioApp,
    pub directory: Arc<StoreUserDirectory>,
    pub config: RootConfig,
    warnings: mpsc::UnboundedReceiver<SyncWarning>,
}

impl CliContext {
    pub async fn open(home: Option<&Path>) -> Result<Self> {
        let service = ConfigService::new(FolioPaths::new(home));
        let config = service.get_config().context("Failed to load configuration")?;
        init_tracing(&config.log_level);
        tracing::debug!("Configuration: {}", service.config_path()?.display());

        let clock = Arc::new(SystemClock);
        let store = open_document_store(&service, &config, clock.clone()).await?;
        let directory = Arc::new(StoreUserDirectory::new(store.clone()));
        let operator = AuthSession {
            uid: OPERATOR_UID.to_string(),
            email: None,
            claims: UserClaims { admin: true },
        };

        let gateways = Gateways {
            store,
            storage: Arc::new(open_object_storage(&service, &config)?),
            email: Arc::new(open_email_sender(&service, &config)?),
            auth: Arc::new(StaticAuthProvider::new(Some(operator))),
            claims: directory.clone(),
            clock,
            progress: Some(Arc::new(print_progress)),
        };
        let (app, warnings) = FolioApp::build(gateways, &config)?;

        Ok(Self {
            app,
            directory,
            config,
            warnings,
        })
    }

    /// Waits for queued skill sync jobs and reports their failures.
    pub async fn finish(mut self) {
        self.app.flush_sync().await;
        while let Ok(warning) = self.warnings.try_recv() {
            eprintln!("{} {}", "warning:".yellow().bold(), warning);
        }
    }
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // a second init (tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_progress(progress: UploadProgress) {
    if progress.percent == 100 {
        eprintln!(
            "  [{}/{}] {} {}",
            progress.index + 1,
            progress.total,
            progress.file_name,
            "uploaded".green()
        );
    }
}
