//! Domain-level error types.
//!
//! These errors are transport agnostic. A caller that wants the individual
//! field failures behind a rejected record reads them from
//! [`Error::failures`]; adapters that only speak JSON use [`Error::details`].

use serde::Serialize;
use serde_json::{Value, json};

use super::record::Entity;
use super::validation::ValidationErrors;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The candidate record failed one or more field rules.
    InvalidRequest,
    /// The requested record does not exist.
    NotFound,
    /// The operation would break a relationship between records.
    Conflict,
    /// The persistence collaborator could not be reached.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Domain error payload.
///
/// # Examples
/// ```
/// use linkboard::domain::{Entity, Error, ErrorCode, Field, Reason, ValidationErrors};
///
/// let err = Error::rejected(Entity::User, ValidationErrors::single(Field::Email, Reason::NotUnique));
/// assert_eq!(err.code(), ErrorCode::InvalidRequest);
/// assert!(err.failures().is_some_and(|f| f.contains(Field::Email, Reason::NotUnique)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
    #[serde(skip)]
    failures: Option<ValidationErrors>,
}

impl Error {
    fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            failures: None,
        }
    }

    /// A candidate `entity` record was rejected by its field rules.
    pub fn rejected(entity: Entity, failures: ValidationErrors) -> Self {
        let details = json!({
            "entity": entity,
            "failures": &failures,
        });
        Self {
            code: ErrorCode::InvalidRequest,
            message: format!("{entity} rejected: {failures}"),
            details: Some(details),
            failures: Some(failures),
        }
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Field failures when the error came from a rejected record.
    pub fn failures(&self) -> Option<&ValidationErrors> {
        self.failures.as_ref()
    }

    /// Consume the error, keeping only its field failures.
    pub fn into_failures(self) -> Option<ValidationErrors> {
        self.failures
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
