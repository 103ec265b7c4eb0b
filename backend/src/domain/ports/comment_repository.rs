//! Port abstraction for comment persistence adapters.
use async_trait::async_trait;

use crate::domain::{Comment, CommentId, PostId, UserId};

use super::RepositoryError;

/// Driven port for storing and querying comments.
///
/// Adapters must check that `user_id` and `post_id` name stored records on
/// every write.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Persist a new comment record.
    async fn insert(&self, comment: &Comment) -> Result<(), RepositoryError>;

    /// Replace a stored comment. Returns `false` when no comment has that id.
    async fn update(&self, comment: &Comment) -> Result<bool, RepositoryError>;

    /// Fetch a comment by identifier.
    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, RepositoryError>;

    /// Comments left on `post_id`, in insertion order.
    async fn find_by_post(&self, post_id: &PostId) -> Result<Vec<Comment>, RepositoryError>;

    /// Comments written by `user_id`, in insertion order.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Comment>, RepositoryError>;

    async fn list(&self) -> Result<Vec<Comment>, RepositoryError>;

    async fn count(&self) -> Result<usize, RepositoryError>;

    /// Remove a comment. Returns `false` when no comment has that id.
    async fn delete(&self, id: &CommentId) -> Result<bool, RepositoryError>;

    /// Remove every comment, returning how many rows were deleted.
    async fn delete_all(&self) -> Result<usize, RepositoryError>;
}
