//! Port abstraction for user persistence adapters.
use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::RepositoryError;

/// Driven port for storing and querying users.
///
/// Adapters must enforce case-insensitive unique indexes on `username` and
/// `email` atomically and report collisions as
/// [`RepositoryError::UniqueViolation`]. Deletes must refuse users that
/// still own posts or comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user record.
    async fn insert(&self, user: &User) -> Result<(), RepositoryError>;

    /// Replace a stored user. Returns `false` when no user has that id.
    async fn update(&self, user: &User) -> Result<bool, RepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    /// Fetch the user whose username matches ignoring case.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    /// Fetch the user whose email matches ignoring case.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// All users in insertion order.
    async fn list(&self) -> Result<Vec<User>, RepositoryError>;

    async fn count(&self) -> Result<usize, RepositoryError>;

    /// Remove a user. Returns `false` when no user has that id.
    async fn delete(&self, id: &UserId) -> Result<bool, RepositoryError>;

    /// Remove every user, returning how many rows were deleted.
    async fn delete_all(&self) -> Result<usize, RepositoryError>;
}
