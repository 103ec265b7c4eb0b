//! User data model and validation rules.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::record::{RecordMeta, UserId};
use super::validation::{
    Field, LengthBounds, Reason, ValidationErrors, check, check_format, check_length,
    require_text,
};

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 20;

const USERNAME_LENGTH: LengthBounds = LengthBounds::new(USERNAME_MIN, USERNAME_MAX);

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Practical RFC 5322 subset: dot-atom local part, hostname labels of at
        // most 63 characters that neither start nor end with a hyphen.
        let pattern = concat!(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+",
            r"@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
            r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        );
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Whether `value` matches the email address grammar.
pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Candidate user values supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl UserDraft {
    /// Draft with both fields present.
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            email: Some(email.into()),
        }
    }
}

/// Outcome of the uniqueness lookups for a draft.
///
/// A flag is true when a *different* persisted user already holds the value
/// under case-insensitive comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserCollisions {
    pub username_taken: bool,
    pub email_taken: bool,
}

/// User values that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFields {
    pub username: String,
    pub email: String,
}

/// Run every user rule against `draft`.
///
/// Validation depends on the draft and on the persisted users, which reach
/// this function through `collisions`.
///
/// # Examples
/// ```
/// use linkboard::domain::{Field, Reason, UserCollisions, UserDraft, validate_user};
///
/// let errors = validate_user(&UserDraft::new("a", "a@b.com"), UserCollisions::default())
///     .expect_err("username is too short");
/// assert_eq!(errors.reasons_for(Field::Username), vec![Reason::TooShort]);
/// ```
pub fn validate_user(
    draft: &UserDraft,
    collisions: UserCollisions,
) -> Result<UserFields, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let username = require_text(&mut errors, Field::Username, draft.username.as_deref());
    if let Some(username) = username {
        check_length(&mut errors, Field::Username, username, USERNAME_LENGTH);
        check(
            &mut errors,
            Field::Username,
            Reason::NotUnique,
            collisions.username_taken,
        );
    }

    let email = require_text(&mut errors, Field::Email, draft.email.as_deref());
    if let Some(email) = email {
        check_format(&mut errors, Field::Email, email, is_valid_email);
        check(
            &mut errors,
            Field::Email,
            Reason::NotUnique,
            collisions.email_taken,
        );
    }

    match (username, email) {
        (Some(username), Some(email)) => errors.finish(UserFields {
            username: username.to_owned(),
            email: email.to_owned(),
        }),
        _ => Err(errors),
    }
}

/// Case-insensitive equality used by the uniqueness rules.
pub fn same_ignoring_case(left: &str, right: &str) -> bool {
    left.to_lowercase() == right.to_lowercase()
}

/// Application user.
///
/// ## Invariants
/// - `username` is 3 to 20 characters and unique ignoring case.
/// - `email` matches the email grammar and is unique ignoring case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(flatten)]
    meta: RecordMeta<UserId>,
    username: String,
    email: String,
}

impl User {
    /// Build a user from metadata and validated fields.
    pub fn new(meta: RecordMeta<UserId>, fields: UserFields) -> Self {
        let UserFields { username, email } = fields;
        Self {
            meta,
            username,
            email,
        }
    }

    pub fn id(&self) -> UserId {
        self.meta.id()
    }

    pub fn meta(&self) -> &RecordMeta<UserId> {
        &self.meta
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }
}
