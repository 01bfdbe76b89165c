// Rust guideline compliant 2026-10-18

//! Error types for the Pearly model layer.

use std::fmt;
use thiserror::Error;

/// Result type alias for Pearly operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Summary used when a validation failure is raised without messages.
pub const DEFAULT_VALIDATION_SUMMARY: &str = "Validation Exception";

/// An expected validation outcome carrying user-displayable messages.
///
/// The message list is never empty: constructing a failure from an empty
/// list falls back to the summary line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    summary: String,
    messages: Vec<String>,
}

impl ValidationFailure {
    /// Creates a failure from a summary and the collected messages.
    #[must_use]
    pub fn new(summary: impl Into<String>, messages: Vec<String>) -> Self {
        let summary = summary.into();
        let messages = if messages.is_empty() {
            vec![summary.clone()]
        } else {
            messages
        };
        Self { summary, messages }
    }

    /// Creates a failure using the default summary.
    #[must_use]
    pub fn from_messages(messages: Vec<String>) -> Self {
        Self::new(DEFAULT_VALIDATION_SUMMARY, messages)
    }

    /// Returns the summary line.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Returns the ordered validation messages.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Consumes the failure and returns its messages.
    #[must_use]
    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.summary, self.messages.join("; "))
    }
}

impl std::error::Error for ValidationFailure {}

/// Error types for Pearly operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Access to a field that is not managed by the value object.
    #[error("Undefined property '{0}'.")]
    UndefinedField(String),

    /// A value object declaration or hook broke its contract.
    #[error("Contract violation: {0}")]
    Contract(String),

    /// Validation rejected the value object.
    #[error("{0}")]
    Validation(ValidationFailure),

    /// No schema is registered under the requested name.
    #[error("Unknown value object schema: {0}")]
    UnknownSchema(String),

    /// Input could not be interpreted.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration could not be loaded or failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Returns true for errors caused by a coding mistake in a value object
    /// declaration rather than by user input.
    #[must_use]
    pub fn is_programmer_error(&self) -> bool {
        matches!(self, Error::UndefinedField(_) | Error::Contract(_))
    }

    /// Returns the validation messages when this is a validation failure.
    #[must_use]
    pub fn messages(&self) -> Option<&[String]> {
        match self {
            Error::Validation(failure) => Some(failure.messages()),
            _ => None,
        }
    }
}

impl From<ValidationFailure> for Error {
    fn from(failure: ValidationFailure) -> Self {
        Error::Validation(failure)
    }
}
