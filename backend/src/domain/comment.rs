//! Comment data model and validation rules.

use serde::{Deserialize, Serialize};

use super::record::{CommentId, PostId, RecordMeta, UserId};
use super::validation::{
    Field, LengthBounds, Reason, ValidationErrors, check, check_length, require_reference,
    require_text,
};

/// Minimum allowed length for a comment body.
pub const BODY_MIN: usize = 1;
/// Maximum allowed length for a comment body.
pub const BODY_MAX: usize = 10_000;

const BODY_LENGTH: LengthBounds = LengthBounds::new(BODY_MIN, BODY_MAX);

/// Candidate comment values supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDraft {
    pub body: Option<String>,
    pub user_id: Option<UserId>,
    pub post_id: Option<PostId>,
}

impl CommentDraft {
    pub fn new(body: impl Into<String>, user_id: UserId, post_id: PostId) -> Self {
        Self {
            body: Some(body.into()),
            user_id: Some(user_id),
            post_id: Some(post_id),
        }
    }
}

/// Result of resolving the references held by a comment draft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommentReferences {
    pub user_exists: bool,
    pub post_exists: bool,
}

/// Comment values that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentFields {
    pub body: String,
    pub user_id: UserId,
    pub post_id: PostId,
}

/// Run every comment rule against `draft`.
///
/// # Examples
/// ```
/// use linkboard::domain::{
///     CommentDraft, CommentReferences, Field, PostId, Reason, UserId, validate_comment,
/// };
///
/// let draft = CommentDraft::new("", UserId::random(), PostId::random());
/// let references = CommentReferences { user_exists: true, post_exists: true };
/// let errors = validate_comment(&draft, references).expect_err("empty body");
/// assert_eq!(errors.reasons_for(Field::Body), vec![Reason::Missing]);
/// ```
pub fn validate_comment(
    draft: &CommentDraft,
    references: CommentReferences,
) -> Result<CommentFields, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let body = require_text(&mut errors, Field::Body, draft.body.as_deref());
    if let Some(body) = body {
        check_length(&mut errors, Field::Body, body, BODY_LENGTH);
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

    let post_id = require_reference(&mut errors, Field::PostId, draft.post_id);
    if post_id.is_some() {
        check(
            &mut errors,
            Field::PostId,
            Reason::NotFound,
            !references.post_exists,
        );
    }

    match (body, user_id, post_id) {
        (Some(body), Some(user_id), Some(post_id)) => errors.finish(CommentFields {
            body: body.to_owned(),
            user_id,
            post_id,
        }),
        _ => Err(errors),
    }
}

/// A reply left by a user on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(flatten)]
    meta: RecordMeta<CommentId>,
    body: String,
    user_id: UserId,
    post_id: PostId,
}

impl Comment {
    pub fn new(meta: RecordMeta<CommentId>, fields: CommentFields) -> Self {
        let CommentFields {
            body,
            user_id,
            post_id,
        } = fields;
        Self {
            meta,
            body,
            user_id,
            post_id,
        }
    }

    pub fn id(&self) -> CommentId {
        self.meta.id()
    }

    pub fn meta(&self) -> &RecordMeta<CommentId> {
        &self.meta
    }

    pub fn body(&self) -> &str {
        self.body.as_str()
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn post_id(&self) -> PostId {
        self.post_id
    }
}
