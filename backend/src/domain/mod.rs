//! Domain records, validation rules, and services.
//!
//! Purpose: define the User, Post, and Comment records, the field rules each
//! must satisfy before it is persisted, and the services that run those rules
//! against the repository ports.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Field / Reason / ValidationErrors: field-tagged rule failures.
//! - User / Post / Comment with their drafts and `validate_*` functions.
//! - UserService / PostService / CommentService: validate-and-save.
//! - DemoDataSeeder: resets the tables to the demo dataset.

pub mod comment;
mod comment_service;
mod demo_data;
pub mod error;
pub mod ports;
pub mod post;
mod post_service;
pub mod record;
mod service_support;
pub mod user;
mod user_service;
pub mod validation;

pub use self::comment::{
    BODY_MAX, BODY_MIN, Comment, CommentDraft, CommentFields, CommentReferences, validate_comment,
};
pub use self::comment_service::CommentService;
pub use self::demo_data::{DemoDataSeeder, SeedSummary, SeedingError};
pub use self::error::{Error, ErrorCode};
pub use self::post::{
    Post, PostDraft, PostFields, PostReferences, TITLE_MAX, TITLE_MIN, is_web_url, validate_post,
};
pub use self::post_service::PostService;
pub use self::record::{CommentId, Entity, PostId, RecordIdError, RecordMeta, UserId};
pub use self::user::{
    USERNAME_MAX, USERNAME_MIN, User, UserCollisions, UserDraft, UserFields, is_valid_email,
    same_ignoring_case, validate_user,
};
pub use self::user_service::UserService;
pub use self::validation::{Field, FieldError, LengthBounds, Reason, ValidationErrors};
