//! Post data model and validation rules.

use serde::{Deserialize, Serialize};
use url::Url;

use super::record::{PostId, RecordMeta, UserId};
use super::validation::{
    Field, LengthBounds, Reason, ValidationErrors, check, check_format, check_length,
    require_reference, require_text,
};

/// Minimum allowed length for a post title.
pub const TITLE_MIN: usize = 5;
/// Maximum allowed length for a post title.
pub const TITLE_MAX: usize = 300;

const TITLE_LENGTH: LengthBounds = LengthBounds::new(TITLE_MIN, TITLE_MAX);

/// Whether `value` is an absolute `http` or `https` URL with a host.
///
/// # Examples
/// ```
/// use linkboard::domain::is_web_url;
///
/// assert!(is_web_url("https://example.com"));
/// assert!(!is_web_url("ftp://example.com"));
/// ```
pub fn is_web_url(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Ok(parsed) = Url::parse(value) else {
        return false;
    };
    matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some_and(|h| !h.is_empty())
}

/// Candidate post values supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub title: Option<String>,
    pub url: Option<String>,
    pub body: Option<String>,
    pub user_id: Option<UserId>,
}

impl PostDraft {
    /// Draft with every required field present and no body.
    pub fn new(title: impl Into<String>, url: impl Into<String>, user_id: UserId) -> Self {
        Self {
            title: Some(title.into()),
            url: Some(url.into()),
            body: None,
            user_id: Some(user_id),
        }
    }

    /// Attach free text to the draft.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Result of resolving the references held by a post draft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostReferences {
    pub user_exists: bool,
}

/// Post values that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    pub title: String,
    pub url: String,
    pub body: Option<String>,
    pub user_id: UserId,
}

/// Run every post rule against `draft`.
///
/// The body is carried through untouched.
pub fn validate_post(
    draft: &PostDraft,
    references: PostReferences,
) -> Result<PostFields, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let title = require_text(&mut errors, Field::Title, draft.title.as_deref());
    if let Some(title) = title {
        check_length(&mut errors, Field::Title, title, TITLE_LENGTH);
    }

    let url = require_text(&mut errors, Field::Url, draft.url.as_deref());
    if let Some(url) = url {
        check_format(&mut errors, Field::Url, url, is_web_url);
    }

    let user_id = require_reference(&mut errors, Field::UserId, draft.user_id);
    if user_id.is_some() {
        check(
            &mut errors,
            Field::UserId,
            Reason::NotFound,
            !references.user_exists,
        );
    }

    match (title, url, user_id) {
        (Some(title), Some(url), Some(user_id)) => errors.finish(PostFields {
            title: title.to_owned(),
            url: url.to_owned(),
            body: draft.body.clone(),
            user_id,
        }),
        _ => Err(errors),
    }
}

/// A shared link authored by a user.
///
/// ## Invariants
/// - `title` is 5 to 300 characters.
/// - `url` is an absolute `http` or `https` URL.
/// - `user_id` named an existing user when the post was saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(flatten)]
    meta: RecordMeta<PostId>,
    title: String,
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,
    user_id: UserId,
}

impl Post {
    pub fn new(meta: RecordMeta<PostId>, fields: PostFields) -> Self {
        let PostFields {
            title,
            url,
            body,
            user_id,
        } = fields;
        Self {
            meta,
            title,
            url,
            body,
            user_id,
        }
    }

    pub fn id(&self) -> PostId {
        self.meta.id()
    }

    pub fn meta(&self) -> &RecordMeta<PostId> {
        &self.meta
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Authoring user.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}
