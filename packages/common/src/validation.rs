use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Field-level errors for one form, in the order they were found.
///
/// Only the first message for a field is kept, so forms show one problem per input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    entries: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        if self.contains(&field) {
            return;
        }
        self.entries.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.entries.iter().any(|e| e.field == field)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.entries.iter()
    }

    /// Merge errors from a nested form, prefixing their field names
    /// (`members[1]` + `email` becomes `members[1].email`).
    pub fn extend_prefixed(&mut self, prefix: &str, other: FieldErrors) {
        for entry in other.entries {
            self.add(format!("{prefix}.{}", entry.field), entry.message);
        }
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self
            .entries
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

/// A form schema: checks its own fields before anything is sent.
pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;
}

/// Rule builder used by the `Validate` implementations.
#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trimmed value must be non-empty.
    pub fn required(&mut self, field: &str, label: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.add(field, format!("{label} is required"));
        }
        self
    }

    pub fn required_opt<T>(&mut self, field: &str, label: &str, value: &Option<T>) -> &mut Self {
        if value.is_none() {
            self.errors.add(field, format!("{label} is required"));
        }
        self
    }

    pub fn max_chars(&mut self, field: &str, label: &str, value: &str, max: usize) -> &mut Self {
        if value.trim().chars().count() > max {
            self.errors
                .add(field, format!("{label} must be at most {max} characters"));
        }
        self
    }

    /// Empty values pass; pair with `required` when the field is mandatory.
    pub fn email(&mut self, field: &str, label: &str, value: &str) -> &mut Self {
        let value = value.trim();
        if !value.is_empty() && !looks_like_email(value) {
            self.errors
                .add(field, format!("{label} must be a valid email address"));
        }
        self
    }

    /// Empty values pass; otherwise an absolute http(s) URL is expected.
    pub fn url(&mut self, field: &str, label: &str, value: &str) -> &mut Self {
        let value = value.trim();
        if !value.is_empty() && !(value.starts_with("http://") || value.starts_with("https://")) {
            self.errors.add(field, format!("{label} must be a valid URL"));
        }
        self
    }

    pub fn range(&mut self, field: &str, label: &str, value: f64, min: f64, max: f64) -> &mut Self {
        if !value.is_finite() || value < min || value > max {
            self.errors
                .add(field, format!("{label} must be between {min} and {max}"));
        }
        self
    }

    pub fn min(&mut self, field: &str, label: &str, value: f64, min: f64) -> &mut Self {
        if !value.is_finite() || value < min {
            self.errors
                .add(field, format!("{label} must be at least {min}"));
        }
        self
    }

    /// When both dates are present, `later` must be strictly after `earlier`.
    pub fn date_order(
        &mut self,
        field: &str,
        later_label: &str,
        earlier_label: &str,
        earlier: Option<NaiveDate>,
        later: Option<NaiveDate>,
    ) -> &mut Self {
        if let (Some(earlier), Some(later)) = (earlier, later)
            && later <= earlier
        {
            self.errors.add(
                field,
                format!("{later_label} must be after {earlier_label}"),
            );
        }
        self
    }

    pub fn non_empty<T>(&mut self, field: &str, label: &str, items: &[T]) -> &mut Self {
        if items.is_empty() {
            self.errors
                .add(field, format!("At least one {label} is required"));
        }
        self
    }

    pub fn check(&mut self, field: &str, message: &str, ok: bool) -> &mut Self {
        if !ok {
            self.errors.add(field, message);
        }
        self
    }

    pub fn nested(&mut self, prefix: &str, result: Result<(), FieldErrors>) -> &mut Self {
        if let Err(errors) = result {
            self.errors.extend_prefixed(prefix, errors);
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), FieldErrors> {
        std::mem::take(&mut self.errors).into_result()
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        && !value.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_reports_label() {
        let err = Validator::new()
            .required("firstName", "First Name", "   ")
            .finish()
            .unwrap_err();
        assert_eq!(err.get("firstName"), Some("First Name is required"));
    }

    #[test]
    fn test_first_message_per_field_wins() {
        let err = Validator::new()
            .required("title", "Title", "")
            .max_chars("title", "Title", "", 0)
            .check("title", "ignored", false)
            .finish()
            .unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.get("title"), Some("Title is required"));
    }

    #[test]
    fn test_email_rule() {
        let mut v = Validator::new();
        v.email("a", "Email", "jane@example.org")
            .email("b", "Email", "jane@")
            .email("c", "Email", "")
            .email("d", "Email", "ja ne@example.org");
        let err = v.finish().unwrap_err();
        assert!(!err.contains("a"));
        assert!(err.contains("b"));
        assert!(!err.contains("c"));
        assert!(err.contains("d"));
    }

    #[test]
    fn test_date_order() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 1);
        let end = NaiveDate::from_ymd_opt(2026, 2, 1);
        let err = Validator::new()
            .date_order("endDate", "End date", "start date", start, end)
            .finish()
            .unwrap_err();
        assert_eq!(err.get("endDate"), Some("End date must be after start date"));

        assert!(
            Validator::new()
                .date_order("endDate", "End date", "start date", start, None)
                .finish()
                .is_ok()
        );
    }

    #[test]
    fn test_nested_prefixes_fields() {
        let inner = FieldErrors::single("email", "Email is required");
        let err = Validator::new()
            .nested("members[1]", Err(inner))
            .finish()
            .unwrap_err();
        assert_eq!(err.get("members[1].email"), Some("Email is required"));
    }

    #[test]
    fn test_range_message() {
        let err = Validator::new()
            .range("score", "Score", 11.0, 0.0, 10.0)
            .finish()
            .unwrap_err();
        assert_eq!(err.get("score"), Some("Score must be between 0 and 10"));
    }
}
