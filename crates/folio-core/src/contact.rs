//! Contact form model, validation and the email relay contract.

use crate::error::Result;
use crate::validation::Validator;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use rand::Rng;
use rand::distributions::Alphanumeric;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex is valid"));

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("static regex is valid"));

static PHONE_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s\-()]").expect("static regex is valid"));

/// A message submitted through the public contact page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

impl ContactForm {
    /// Validates the form, collecting every failing rule.
    pub fn validate(&self) -> Result<()> {
        let mut v = Validator::new();
        v.length_between("Name", &self.name, 2, 50);

        if self.email.trim().is_empty() {
            v.check(false, "Email is required");
        } else {
            v.check(
                is_valid_email(&self.email),
                "Please enter a valid email address",
            );
        }

        v.length_between("Subject", &self.subject, 5, 100)
            .length_between("Message", &self.message, 10, 1000);

        if let Some(phone) = self.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            v.check(is_valid_phone(phone), "Please enter a valid phone number");
        }
        v.finish()
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email.trim())
}

/// Accepts an optional leading `+` and up to 16 digits, ignoring spaces,
/// dashes and parentheses.
pub fn is_valid_phone(phone: &str) -> bool {
    let compact = PHONE_SEPARATORS.replace_all(phone, "");
    PHONE_PATTERN.is_match(&compact)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Pending,
    Read,
    Replied,
}

/// An accepted contact form with its tracking metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: String,
    #[serde(flatten)]
    pub form: ContactForm,
    pub submitted_at: DateTime<Utc>,
    pub status: SubmissionStatus,
}

impl ContactSubmission {
    /// Wraps a validated form, assigning `contact_{millis}_{random}`.
    pub fn new(form: ContactForm, now: DateTime<Utc>) -> Self {
        let random: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(9)
            .map(char::from)
            .collect();
        Self {
            id: submission_id(now.timestamp_millis(), &random.to_lowercase()),
            form,
            submitted_at: now,
            status: SubmissionStatus::Pending,
        }
    }
}

pub fn submission_id(millis: i64, random: &str) -> String {
    format!("contact_{millis}_{random}")
}

/// A rendered email ready for relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactEmail {
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub body: String,
}

/// Relays contact emails to the site owner.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &ContactEmail) -> Result<()>;
}
