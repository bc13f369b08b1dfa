//! Form sanitization and validation
//!
//! Every submission goes through the same steps: raw fields are
//! sanitized into a draft (always, whatever the outcome), then each rule
//! runs and failures are appended to an ordered error list. Rules never
//! short-circuit, so a single response reports every problem.

pub mod forms;
pub mod rules;
pub mod sanitize;

use serde::Serialize;
use utoipa::ToSchema;

pub use forms::{author_form, book_form, book_instance_form, genre_form};

/// Raw form fields in submission order. Keys may repeat (multi-selects).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawForm {
    fields: Vec<(String, String)>,
}

impl RawForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    /// First value submitted under `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value submitted under `key`, in order
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

impl From<Vec<(String, String)>> for RawForm {
    fn from(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }
}

/// A single failed rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    #[schema(value_type = String)]
    pub field: &'static str,
    pub message: String,
}

/// Ordered list of failed rules for one submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// Record `message` against `field` unless `passed`
    pub fn check(&mut self, field: &'static str, passed: bool, message: &str) {
        if !passed {
            self.0.push(FieldError {
                field,
                message: message.to_string(),
            });
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.0.iter().filter(move |e| e.field == field)
    }
}

/// Output of the pipeline: the sanitized draft plus whatever failed
#[derive(Debug, Clone, PartialEq)]
pub struct Submission<D> {
    pub draft: D,
    pub errors: FieldErrors,
}

impl<D> Submission<D> {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}
