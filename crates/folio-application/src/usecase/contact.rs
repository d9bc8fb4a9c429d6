//! Contact form submission.

use folio_core::clock::Clock;
use folio_core::contact::{ContactEmail, ContactForm, ContactSubmission, EmailSender};
use folio_core::error::{FolioError, Result};
use minijinja::{Environment, context};
use std::sync::Arc;

const EMAIL_TEMPLATE: &str = "contact_email";

const EMAIL_BODY: &str = "\
New message from the portfolio contact form.

Name:    {{ form.name }}
Email:   {{ form.email }}
{%- if form.phone %}
Phone:   {{ form.phone }}
{%- endif %}
{%- if form.company %}
Company: {{ form.company }}
{%- endif %}
Sent:    {{ submitted_at }}
Ref:     {{ id }}

{{ form.message }}
";

/// Validates contact forms and relays them to the site owner.
pub struct ContactUseCase {
    sender: Arc<dyn EmailSender>,
    recipient: String,
    clock: Arc<dyn Clock>,
    templates: Environment<'static>,
}

impl ContactUseCase {
    pub fn new(
        sender: Arc<dyn EmailSender>,
        recipient: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let mut templates = Environment::new();
        templates
            .add_template(EMAIL_TEMPLATE, EMAIL_BODY)
            .map_err(|e| FolioError::internal(format!("Invalid contact template: {e}")))?;
        Ok(Self {
            sender,
            recipient: recipient.into(),
            clock,
            templates,
        })
    }

    /// Every failing rule, empty when the form is acceptable.
    pub fn validate(&self, form: &ContactForm) -> Vec<String> {
        match form.validate() {
            Ok(()) => Vec::new(),
            Err(e) => e.messages(),
        }
    }

    /// Validates, renders and sends the form.
    pub async fn submit(&self, form: ContactForm) -> Result<ContactSubmission> {
        form.validate()?;
        let submission = ContactSubmission::new(form, self.clock.now());
        let email = self.render(&submission)?;

        self.sender.send(&email).await?;
        tracing::info!("Relayed contact submission {}", submission.id);
        Ok(submission)
    }

    fn render(&self, submission: &ContactSubmission) -> Result<ContactEmail> {
        let body = self
            .templates
            .get_template(EMAIL_TEMPLATE)
            .and_then(|t| {
                t.render(context! {
                    id => &submission.id,
                    form => &submission.form,
                    submitted_at => submission.submitted_at.to_rfc3339(),
                })
            })
            .map_err(|e| FolioError::internal(format!("Failed to render contact email: {e}")))?;

        Ok(ContactEmail {
            to: self.recipient.clone(),
            reply_to: submission.form.email.trim().to_string(),
            subject: format!("[Portfolio Contact] {}", submission.form.subject.trim()),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use folio_core::clock::FixedClock;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSender {
        sent: Mutex<Vec<ContactEmail>>,
    }

    #[async_trait]
    impl EmailSender for RecordingSender {
        async fn send(&self, email: &ContactEmail) -> Result<()> {
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }
    }

    fn use_case(sender: Arc<RecordingSender>) -> ContactUseCase {
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        ContactUseCase::new(sender, "owner@example.com", Arc::new(clock)).unwrap()
    }

    fn form() -> ContactForm {
        ContactForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Project inquiry".to_string(),
            message: "Could we talk about a new project?".to_string(),
            phone: None,
            company: Some("Analytical Engines".to_string()),
        }
    }

    #[tokio::test]
    async fn test_submit_renders_and_sends() {
        let sender = Arc::new(RecordingSender::default());
        let submission = use_case(sender.clone()).submit(form()).await.unwrap();

        assert!(submission.id.starts_with("contact_"));
        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "owner@example.com");
        assert_eq!(sent[0].reply_to, "ada@example.com");
        assert_eq!(sent[0].subject, "[Portfolio Contact] Project inquiry");
        assert!(sent[0].body.contains("Company: Analytical Engines"));
        assert!(!sent[0].body.contains("Phone:"));
        assert!(sent[0].body.contains(&submission.id));
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_sent() {
        let sender = Arc::new(RecordingSender::default());
        let uc = use_case(sender.clone());
        let mut bad = form();
        bad.email = "not-an-email".to_string();

        assert_eq!(uc.validate(&bad), vec!["Please enter a valid email address"]);
        assert!(uc.submit(bad).await.unwrap_err().is_validation());
        assert!(sender.sent.lock().unwrap().is_empty());
    }
}
