//! Fire-and-forget dispatch of skill synchronization.
//!
//! Mutating use cases enqueue jobs and return immediately. A single worker
//! task drains the queue in order, so profile writes from sync jobs never
//! race each other. Failures and dropped jobs surface on the warning
//! channel instead of reaching the caller.

use super::service::{SkillSyncService, SyncOperation, SyncWarning, log_warning};
use folio_core::error::FolioError;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// Receives skill sync jobs from mutating use cases.
pub trait SkillSyncDispatcher: Send + Sync {
    /// Requests that `technologies` be merged into the profile's skills.
    fn dispatch_sync(&self, technologies: Vec<String>);

    /// Requests removal of skills nothing references anymore.
    fn dispatch_cleanup(&self);
}

enum SyncJob {
    Sync(Vec<String>),
    Cleanup,
    Flush(oneshot::Sender<()>),
}

/// Bounded background queue in front of a [`SkillSyncService`].
#[derive(Clone)]
pub struct SkillSyncQueue {
    sender: mpsc::Sender<SyncJob>,
    warnings: mpsc::UnboundedSender<SyncWarning>,
}

impl SkillSyncQueue {
    /// Starts the worker on the current tokio runtime.
    ///
    /// Returns the queue handle and the receiving end of the warning
    /// channel. The worker stops once every handle is dropped.
    pub fn spawn(
        service: Arc<SkillSyncService>,
        capacity: usize,
    ) -> (Self, mpsc::UnboundedReceiver<SyncWarning>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let (warnings, warning_rx) = mpsc::unbounded_channel();

        tokio::spawn(run_worker(service, receiver, warnings.clone()));
        tracing::info!(
            target: "skill_sync",
            "Skill sync worker started (capacity {})",
            capacity.max(1)
        );

        (Self { sender, warnings }, warning_rx)
    }

    fn enqueue(&self, job: SyncJob, operation: SyncOperation) {
        if let Err(e) = self.sender.try_send(job) {
            let reason = match e {
                mpsc::error::TrySendError::Full(_) => "queue is full",
                mpsc::error::TrySendError::Closed(_) => "worker has stopped",
            };
            let warning = SyncWarning::new(
                operation,
                &FolioError::internal(format!("job dropped: {reason}")),
            );
            log_warning(&warning);
            let _ = self.warnings.send(warning);
        }
    }

    /// Waits until every job queued before this call has been processed.
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        if self.sender.send(SyncJob::Flush(done)).await.is_ok() {
            let _ = wait.await;
        }
    }
}

impl SkillSyncDispatcher for SkillSyncQueue {
    fn dispatch_sync(&self, technologies: Vec<String>) {
        if technologies.is_empty() {
            return;
        }
        self.enqueue(SyncJob::Sync(technologies), SyncOperation::Sync);
    }

    fn dispatch_cleanup(&self) {
        self.enqueue(SyncJob::Cleanup, SyncOperation::Cleanup);
    }
}

async fn run_worker(
    service: Arc<SkillSyncService>,
    mut receiver: mpsc::Receiver<SyncJob>,
    warnings: mpsc::UnboundedSender<SyncWarning>,
) {
    while let Some(job) = receiver.recv().await {
        let result = match job {
            SyncJob::Sync(technologies) => service
                .try_sync_skills(&technologies)
                .await
                .map_err(|e| SyncWarning::new(SyncOperation::Sync, &e)),
            SyncJob::Cleanup => service
                .try_cleanup_unused_skills()
                .await
                .map_err(|e| SyncWarning::new(SyncOperation::Cleanup, &e)),
            SyncJob::Flush(done) => {
                let _ = done.send(());
                continue;
            }
        };

        match result {
            Ok(outcome) => {
                tracing::debug!(target: "skill_sync", "Job finished: {:?}", outcome);
            }
            Err(warning) => {
                log_warning(&warning);
                // nobody listening is fine
                let _ = warnings.send(warning);
            }
        }
    }
    tracing::debug!(target: "skill_sync", "Skill sync worker stopped");
}
