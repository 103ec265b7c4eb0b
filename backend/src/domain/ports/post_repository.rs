//! Port abstraction for post persistence adapters.
use async_trait::async_trait;

use crate::domain::{Post, PostId, UserId};

use super::RepositoryError;

/// Driven port for storing and querying posts.
///
/// Adapters must check that `user_id` names a stored user on every write and
/// refuse to delete posts that still have comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a new post record.
    async fn insert(&self, post: &Post) -> Result<(), RepositoryError>;

    /// Replace a stored post. Returns `false` when no post has that id.
    async fn update(&self, post: &Post) -> Result<bool, RepositoryError>;

    /// Fetch a post by identifier.
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, RepositoryError>;

    /// Posts authored by `user_id`, in insertion order.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Post>, RepositoryError>;

    async fn list(&self) -> Result<Vec<Post>, RepositoryError>;

    async fn count(&self) -> Result<usize, RepositoryError>;

    /// Remove a post. Returns `false` when no post has that id.
    async fn delete(&self, id: &PostId) -> Result<bool, RepositoryError>;

    /// Remove every post, returning how many rows were deleted.
    async fn delete_all(&self) -> Result<usize, RepositoryError>;
}
