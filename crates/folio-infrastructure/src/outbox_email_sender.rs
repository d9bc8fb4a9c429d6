//! Email relay that drops messages into an outbox directory.
//!
//! Each email becomes one `.eml` file; a mail transfer agent or a human
//! picks them up from there.

use async_trait::async_trait;
use folio_core::contact::{ContactEmail, EmailSender};
use folio_core::error::Result;
use std::path::{Path, PathBuf};
use tokio::fs;

pub struct OutboxEmailSender {
    outbox_dir: PathBuf,
    from: String,
}

impl OutboxEmailSender {
    pub fn new(outbox_dir: impl Into<PathBuf>) -> Self {
        Self {
            outbox_dir: outbox_dir.into(),
            from: "noreply@folio.local".to_string(),
        }
    }

    pub fn outbox_dir(&self) -> &Path {
        &self.outbox_dir
    }
}

fn render_message(from: &str, email: &ContactEmail) -> String {
    format!(
        "From: {from}\r\nTo: {}\r\nReply-To: {}\r\nSubject: {}\r\nContent-Type: text/plain; charset=utf-8\r\n\r\n{}\r\n",
        email.to, email.reply_to, email.subject, email.body
    )
}

#[async_trait]
impl EmailSender for OutboxEmailSender {
    async fn send(&self, email: &ContactEmail) -> Result<()> {
        fs::create_dir_all(&self.outbox_dir).await?;
        let file_name = format!(
            "{}-{}.eml",
            chrono::Utc::now().format("%Y%m%dT%H%M%S"),
            uuid::Uuid::new_v4().simple()
        );
        let path = self.outbox_dir.join(file_name);
        fs::write(&path, render_message(&self.from, email)).await?;
        tracing::info!("Queued contact email for {} at {}", email.to, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_send_writes_eml_file() {
        let temp_dir = TempDir::new().unwrap();
        let sender = OutboxEmailSender::new(temp_dir.path().join("outbox"));
        let email = ContactEmail {
            to: "owner@example.com".to_string(),
            reply_to: "ada@example.com".to_string(),
            subject: "Portfolio Contact: Hello".to_string(),
            body: "Hi there".to_string(),
        };

        sender.send(&email).await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(sender.outbox_dir())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(entries.len(), 1);
        let content = std::fs::read_to_string(&entries[0]).unwrap();
        assert!(content.contains("Reply-To: ada@example.com"));
        assert!(content.ends_with("Hi there\r\n"));
    }
}
