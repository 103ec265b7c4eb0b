//! Field rules shared by the user, post, and comment validators.
//!
//! Each rule is an explicit predicate that records a [`FieldError`] into a
//! [`ValidationErrors`] collector instead of returning early, so a validator
//! can run every rule and report all failures at once.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Record fields that carry validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Username,
    Email,
    Title,
    Url,
    Body,
    UserId,
    PostId,
}

impl Field {
    /// Stable snake_case field name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::Title => "title",
            Self::Url => "url",
            Self::Body => "body",
            Self::UserId => "user_id",
            Self::PostId => "post_id",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    /// Required value is absent, empty, or only whitespace.
    Missing,
    /// Fewer characters than the lower bound.
    TooShort,
    /// More characters than the upper bound.
    TooLong,
    /// Another record already holds the value (case-insensitive).
    NotUnique,
    /// Value does not match the required grammar.
    BadFormat,
    /// Referenced record does not exist.
    NotFound,
}

impl Reason {
    /// Stable snake_case reason code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::TooShort => "too_short",
            Self::TooLong => "too_long",
            Self::NotUnique => "not_unique",
            Self::BadFormat => "bad_format",
            Self::NotFound => "not_found",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single failed rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldError {
    pub field: Field,
    pub reason: Reason,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.reason)
    }
}

/// Ordered collection of rule failures for one candidate record.
///
/// Failures keep the order in which rules ran: field declaration order first,
/// then presence, length, format, and uniqueness or existence.
///
/// # Examples
/// ```
/// use linkboard::domain::{Field, Reason, ValidationErrors};
///
/// let mut errors = ValidationErrors::new();
/// errors.push(Field::Username, Reason::TooShort);
/// assert!(errors.contains(Field::Username, Reason::TooShort));
/// assert_eq!(errors.to_string(), "username too_short");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection holding exactly one failure.
    pub fn single(field: Field, reason: Reason) -> Self {
        Self(vec![FieldError { field, reason }])
    }

    pub fn push(&mut self, field: Field, reason: Reason) {
        self.0.push(FieldError { field, reason });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[FieldError] {
        &self.0
    }

    /// Whether `field` failed with `reason`.
    pub fn contains(&self, field: Field, reason: Reason) -> bool {
        self.0
            .iter()
            .any(|error| error.field == field && error.reason == reason)
    }

    /// Reasons recorded against `field`, in rule order.
    pub fn reasons_for(&self, field: Field) -> Vec<Reason> {
        self.0
            .iter()
            .filter(|error| error.field == field)
            .map(|error| error.reason)
            .collect()
    }

    /// Convert into `Ok(value)` when no rule failed.
    pub fn finish<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Inclusive character-count bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

impl LengthBounds {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

/// Presence rule. Returns the value when it is present and not blank.
pub fn require_text<'a>(
    errors: &mut ValidationErrors,
    field: Field,
    value: Option<&'a str>,
) -> Option<&'a str> {
    match value {
        Some(text) if !text.trim().is_empty() => Some(text),
        _ => {
            errors.push(field, Reason::Missing);
            None
        }
    }
}

/// Presence rule for record references.
pub fn require_reference<T: Copy>(
    errors: &mut ValidationErrors,
    field: Field,
    value: Option<T>,
) -> Option<T> {
    if value.is_none() {
        errors.push(field, Reason::Missing);
    }
    value
}

/// Length rule over Unicode scalar values.
pub fn check_length(errors: &mut ValidationErrors, field: Field, value: &str, bounds: LengthBounds) {
    let length = value.chars().count();
    if length < bounds.min {
        errors.push(field, Reason::TooShort);
    } else if length > bounds.max {
        errors.push(field, Reason::TooLong);
    }
}

/// Format rule driven by a grammar predicate.
pub fn check_format(
    errors: &mut ValidationErrors,
    field: Field,
    value: &str,
    matches: impl Fn(&str) -> bool,
) {
    if !matches(value) {
        errors.push(field, Reason::BadFormat);
    }
}

/// Records `reason` when `failed` holds.
pub fn check(errors: &mut ValidationErrors, field: Field, reason: Reason, failed: bool) {
    if failed {
        errors.push(field, reason);
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for the shared field rules.

    use rstest::rstest;

    use super::*;

    const BOUNDS: LengthBounds = LengthBounds::new(3, 5);

    #[rstest]
    #[case::absent(None)]
    #[case::empty(Some(""))]
    #[case::whitespace(Some("   \t"))]
    fn blank_text_is_missing(#[case] value: Option<&str>) {
        let mut errors = ValidationErrors::new();
        assert!(require_text(&mut errors, Field::Title, value).is_none());
        assert_eq!(errors.reasons_for(Field::Title), vec![Reason::Missing]);
    }

    #[rstest]
    fn present_text_passes_through() {
        let mut errors = ValidationErrors::new();
        assert_eq!(require_text(&mut errors, Field::Title, Some(" hi ")), Some(" hi "));
        assert!(errors.is_empty());
    }

    #[rstest]
    #[case::below("ab", Some(Reason::TooShort))]
    #[case::at_min("abc", None)]
    #[case::at_max("abcde", None)]
    #[case::above("abcdef", Some(Reason::TooLong))]
    fn length_bounds_are_inclusive(#[case] value: &str, #[case] expected: Option<Reason>) {
        let mut errors = ValidationErrors::new();
        check_length(&mut errors, Field::Username, value, BOUNDS);
        assert_eq!(errors.reasons_for(Field::Username), expected.into_iter().collect::<Vec<_>>());
    }

    #[rstest]
    fn length_counts_characters_not_bytes() {
        let mut errors = ValidationErrors::new();
        // Five characters, ten bytes.
        check_length(&mut errors, Field::Username, "ééééé", BOUNDS);
        assert!(errors.is_empty());
    }

    #[rstest]
    fn missing_reference_is_recorded() {
        let mut errors = ValidationErrors::new();
        assert_eq!(require_reference::<u8>(&mut errors, Field::UserId, None), None);
        assert!(errors.contains(Field::UserId, Reason::Missing));
    }

    #[rstest]
    fn failures_keep_insertion_order_and_display() {
        let mut errors = ValidationErrors::new();
        errors.push(Field::Email, Reason::BadFormat);
        errors.push(Field::Email, Reason::NotUnique);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.to_string(), "email bad_format; email not_unique");
    }

    #[rstest]
    fn finish_returns_value_only_when_clean() {
        assert_eq!(ValidationErrors::new().finish(7), Ok(7));
        let failed = ValidationErrors::single(Field::Body, Reason::TooLong).finish(7);
        assert!(failed.is_err());
    }

    #[rstest]
    fn serialises_as_tagged_list() {
        let errors = ValidationErrors::single(Field::PostId, Reason::NotFound);
        let value = serde_json::to_value(&errors).expect("serialise errors");
        assert_eq!(
            value,
            serde_json::json!([{ "field": "post_id", "reason": "not_found" }])
        );
    }
}
