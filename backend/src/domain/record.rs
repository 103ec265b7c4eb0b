//! Record identity and bookkeeping shared by every entity.
//!
//! Each entity embeds a [`RecordMeta`] instead of inheriting identity and
//! timestamps from a common base type. Identifiers are UUID newtypes so a post
//! id can never be passed where a user id is expected.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors raised when parsing a record identifier from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordIdError {
    #[error("record id must not be empty")]
    Empty,
    #[error("record id must be a valid UUID")]
    Invalid,
}

fn parse_record_uuid(raw: &str) -> Result<Uuid, RecordIdError> {
    if raw.is_empty() {
        return Err(RecordIdError::Empty);
    }
    if raw.trim() != raw {
        return Err(RecordIdError::Invalid);
    }
    Uuid::parse_str(raw).map_err(|_| RecordIdError::Invalid)
}

macro_rules! define_record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Uuid);

        impl $name {
            /// Validate and construct an identifier from text.
            pub fn new(id: impl AsRef<str>) -> Result<Self, RecordIdError> {
                parse_record_uuid(id.as_ref()).map(Self)
            }

            /// Generate a new random identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an already parsed UUID.
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0.to_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = RecordIdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

define_record_id! {
    /// Stable user identifier.
    UserId
}

define_record_id! {
    /// Stable post identifier.
    PostId
}

define_record_id! {
    /// Stable comment identifier.
    CommentId
}

/// The three record types managed by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    User,
    Post,
    Comment,
}

impl Entity {
    /// Stable lowercase name used in logs and error details.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Post => "post",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity and timestamps embedded in every persisted record.
///
/// ## Invariants
/// - `created_at` never changes after construction.
/// - `updated_at` is never earlier than `created_at` when driven by a
///   monotonic clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMeta<Id> {
    id: Id,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<Id: Copy> RecordMeta<Id> {
    /// Metadata for a record created at `now`.
    pub fn new(id: Id, now: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild metadata read back from storage.
    pub fn restore(id: Id, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at,
            updated_at,
        }
    }

    /// Copy of this metadata marked as updated at `now`.
    #[must_use]
    pub fn touched(self, now: DateTime<Utc>) -> Self {
        Self {
            updated_at: now,
            ..self
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for record identifiers and metadata.

    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    use super::*;

    const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    #[rstest]
    fn parses_valid_uuid() {
        let id = UserId::new(VALID_ID).expect("valid id");
        assert_eq!(id.to_string(), VALID_ID);
    }

    #[rstest]
    #[case::empty("", RecordIdError::Empty)]
    #[case::padded(" 3fa85f64-5717-4562-b3fc-2c963f66afa6 ", RecordIdError::Invalid)]
    #[case::garbage("not-a-uuid", RecordIdError::Invalid)]
    fn rejects_malformed_ids(#[case] raw: &str, #[case] expected: RecordIdError) {
        assert_eq!(PostId::new(raw), Err(expected));
    }

    #[rstest]
    fn ids_serialise_as_strings() {
        let id = CommentId::new(VALID_ID).expect("valid id");
        let value = serde_json::to_value(id).expect("serialise id");
        assert_eq!(value, serde_json::json!(VALID_ID));

        let back: CommentId = serde_json::from_value(value).expect("deserialise id");
        assert_eq!(back, id);
    }

    #[rstest]
    fn touched_keeps_creation_time() {
        let created = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        let later = created + Duration::minutes(5);

        let meta = RecordMeta::new(UserId::random(), created).touched(later);

        assert_eq!(meta.created_at(), created);
        assert_eq!(meta.updated_at(), later);
    }

    #[rstest]
    fn entity_names_are_lowercase() {
        assert_eq!(Entity::Comment.to_string(), "comment");
        assert_eq!(
            serde_json::to_value(Entity::Post).expect("serialise entity"),
            serde_json::json!("post")
        );
    }
}
