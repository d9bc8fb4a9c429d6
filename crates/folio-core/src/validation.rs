//! Field validation shared by the admin editors and the contact form.

use crate::error::{FolioError, Result};

/// Collects validation messages for one form.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires a non-blank value.
    pub fn required(&mut self, label: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.push(format!("{label} is required"));
        }
        self
    }

    /// Requires a non-blank value of at least `min` characters.
    pub fn min_len(&mut self, label: &str, value: &str, min: usize) -> &mut Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.errors.push(format!("{label} is required"));
        } else if trimmed.chars().count() < min {
            self.errors
                .push(format!("{label} must be at least {min} characters"));
        }
        self
    }

    /// Requires a non-blank value between `min` and `max` characters.
    pub fn length_between(
        &mut self,
        label: &str,
        value: &str,
        min: usize,
        max: usize,
    ) -> &mut Self {
        let trimmed = value.trim();
        let len = trimmed.chars().count();
        if trimmed.is_empty() {
            self.errors.push(format!("{label} is required"));
        } else if len < min {
            self.errors
                .push(format!("{label} must be at least {min} characters"));
        } else if len > max {
            self.errors
                .push(format!("{label} must be less than {max} characters"));
        }
        self
    }

    /// Records a custom failure when `condition` does not hold.
    pub fn check(&mut self, condition: bool, message: impl Into<String>) -> &mut Self {
        if !condition {
            self.errors.push(message.into());
        }
        self
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Returns `Ok(())` or a `Validation` error carrying every message.
    pub fn finish(&mut self) -> Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(FolioError::Validation(std::mem::take(&mut self.errors)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_all_messages() {
        let mut v = Validator::new();
        v.required("Title", "  ")
            .min_len("Company", "A", 2)
            .length_between("Subject", "Hello there", 5, 100);

        assert_eq!(
            v.errors(),
            &[
                "Title is required".to_string(),
                "Company must be at least 2 characters".to_string(),
            ]
        );
        assert!(v.finish().unwrap_err().is_validation());
    }

    #[test]
    fn test_finish_ok_when_clean() {
        let mut v = Validator::new();
        v.required("Title", "Demo").check(true, "never");
        assert!(v.finish().is_ok());
    }
}
