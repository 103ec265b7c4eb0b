//! In-memory persistence adapter for users, posts, and comments.
//!
//! One mutex guards all three tables, so each write checks its unique
//! indexes, foreign keys, and restrict rules against a consistent snapshot
//! and applies atomically.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{CommentRepository, PostRepository, RepositoryError, UserRepository};
use crate::domain::{
    Comment, CommentId, Entity, Field, Post, PostId, User, UserId, same_ignoring_case,
};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
}

impl Tables {
    fn check_user_unique(&self, user: &User) -> Result<(), RepositoryError> {
        let others = || self.users.iter().filter(|row| row.id() != user.id());
        if others().any(|row| same_ignoring_case(row.username(), user.username())) {
            return Err(violation(RepositoryError::unique_violation(Field::Username)));
        }
        if others().any(|row| same_ignoring_case(row.email(), user.email())) {
            return Err(violation(RepositoryError::unique_violation(Field::Email)));
        }
        Ok(())
    }

    fn check_post_references(&self, post: &Post) -> Result<(), RepositoryError> {
        if !self.has_user(post.user_id()) {
            return Err(violation(RepositoryError::foreign_key_violation(
                Field::UserId,
            )));
        }
        Ok(())
    }

    fn check_comment_references(&self, comment: &Comment) -> Result<(), RepositoryError> {
        if !self.has_user(comment.user_id()) {
            return Err(violation(RepositoryError::foreign_key_violation(
                Field::UserId,
            )));
        }
        if !self.posts.iter().any(|row| row.id() == comment.post_id()) {
            return Err(violation(RepositoryError::foreign_key_violation(
                Field::PostId,
            )));
        }
        Ok(())
    }

    fn has_user(&self, id: UserId) -> bool {
        self.users.iter().any(|row| row.id() == id)
    }

    /// Children still pointing at `user`, restricted from orphaning.
    fn user_dependents(&self, user: Option<UserId>) -> Option<Entity> {
        let owns = |owner: UserId| user.is_none_or(|id| id == owner);
        if self.posts.iter().any(|row| owns(row.user_id())) {
            return Some(Entity::Post);
        }
        if self.comments.iter().any(|row| owns(row.user_id())) {
            return Some(Entity::Comment);
        }
        None
    }

    fn post_has_comments(&self, post: Option<PostId>) -> bool {
        self.comments
            .iter()
            .any(|row| post.is_none_or(|id| id == row.post_id()))
    }
}

fn violation(error: RepositoryError) -> RepositoryError {
    debug!(%error, "in-memory store rejected write");
    error
}

fn replace<T, Id: PartialEq>(rows: &mut [T], record: &T, id: impl Fn(&T) -> Id) -> bool
where
    T: Clone,
{
    let target = id(record);
    match rows.iter_mut().find(|row| id(&**row) == target) {
        Some(row) => {
            *row = record.clone();
            true
        }
        None => false,
    }
}

fn remove<T, Id: PartialEq>(rows: &mut Vec<T>, target: &Id, id: impl Fn(&T) -> Id) -> bool {
    let before = rows.len();
    rows.retain(|row| id(row) != *target);
    rows.len() != before
}

/// Thread-safe store implementing every record repository port.
///
/// Share one instance behind an `Arc` across the user, post, and comment
/// services so reference checks see the same rows.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use linkboard::domain::{PostService, UserService};
/// use linkboard::outbound::persistence::InMemoryStore;
/// use mockable::DefaultClock;
///
/// let store = Arc::new(InMemoryStore::new());
/// let users = UserService::new(Arc::clone(&store), Arc::new(DefaultClock));
/// let posts = PostService::new(Arc::clone(&store), store, Arc::new(DefaultClock));
/// # let _ = (users, posts);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, RepositoryError> {
        self.tables
            .lock()
            .map_err(|_| RepositoryError::connection("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
        let mut tables = self.lock()?;
        tables.check_user_unique(user)?;
        tables.users.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<bool, RepositoryError> {
        let mut tables = self.lock()?;
        tables.check_user_unique(user)?;
        Ok(replace(&mut tables.users, user, User::id))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables.users.iter().find(|row| row.id() == *id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables
            .users
            .iter()
            .find(|row| same_ignoring_case(row.username(), username))
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables
            .users
            .iter()
            .find(|row| same_ignoring_case(row.email(), email))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.lock()?.users.clone())
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.users.len())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, RepositoryError> {
        let mut tables = self.lock()?;
        if !tables.has_user(*id) {
            return Ok(false);
        }
        if let Some(dependents) = tables.user_dependents(Some(*id)) {
            return Err(violation(RepositoryError::dependent_records(
                Entity::User,
                dependents,
            )));
        }
        Ok(remove(&mut tables.users, id, User::id))
    }

    async fn delete_all(&self) -> Result<usize, RepositoryError> {
        let mut tables = self.lock()?;
        if let Some(dependents) = tables.user_dependents(None) {
            return Err(violation(RepositoryError::dependent_records(
                Entity::User,
                dependents,
            )));
        }
        Ok(std::mem::take(&mut tables.users).len())
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn insert(&self, post: &Post) -> Result<(), RepositoryError> {
        let mut tables = self.lock()?;
        tables.check_post_references(post)?;
        tables.posts.push(post.clone());
        Ok(())
    }

    async fn update(&self, post: &Post) -> Result<bool, RepositoryError> {
        let mut tables = self.lock()?;
        tables.check_post_references(post)?;
        Ok(replace(&mut tables.posts, post, Post::id))
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables.posts.iter().find(|row| row.id() == *id).cloned())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Post>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables
            .posts
            .iter()
            .filter(|row| row.user_id() == *user_id)
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<Post>, RepositoryError> {
        Ok(self.lock()?.posts.clone())
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.posts.len())
    }

    async fn delete(&self, id: &PostId) -> Result<bool, RepositoryError> {
        let mut tables = self.lock()?;
        if !tables.posts.iter().any(|row| row.id() == *id) {
            return Ok(false);
        }
        if tables.post_has_comments(Some(*id)) {
            return Err(violation(RepositoryError::dependent_records(
                Entity::Post,
                Entity::Comment,
            )));
        }
        Ok(remove(&mut tables.posts, id, Post::id))
    }

    async fn delete_all(&self) -> Result<usize, RepositoryError> {
        let mut tables = self.lock()?;
        if tables.post_has_comments(None) {
            return Err(violation(RepositoryError::dependent_records(
                Entity::Post,
                Entity::Comment,
            )));
        }
        Ok(std::mem::take(&mut tables.posts).len())
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn insert(&self, comment: &Comment) -> Result<(), RepositoryError> {
        let mut tables = self.lock()?;
        tables.check_comment_references(comment)?;
        tables.comments.push(comment.clone());
        Ok(())
    }

    async fn update(&self, comment: &Comment) -> Result<bool, RepositoryError> {
        let mut tables = self.lock()?;
        tables.check_comment_references(comment)?;
        Ok(replace(&mut tables.comments, comment, Comment::id))
    }

    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables.comments.iter().find(|row| row.id() == *id).cloned())
    }

    async fn find_by_post(&self, post_id: &PostId) -> Result<Vec<Comment>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables
            .comments
            .iter()
            .filter(|row| row.post_id() == *post_id)
            .cloned()
            .collect())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Comment>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables
            .comments
            .iter()
            .filter(|row| row.user_id() == *user_id)
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<Comment>, RepositoryError> {
        Ok(self.lock()?.comments.clone())
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.comments.len())
    }

    async fn delete(&self, id: &CommentId) -> Result<bool, RepositoryError> {
        let mut tables = self.lock()?;
        Ok(remove(&mut tables.comments, id, Comment::id))
    }

    async fn delete_all(&self) -> Result<usize, RepositoryError> {
        let mut tables = self.lock()?;
        Ok(std::mem::take(&mut tables.comments).len())
    }
}

#[cfg(test)]
#[path = "in_memory_store_tests.rs"]
mod tests;
