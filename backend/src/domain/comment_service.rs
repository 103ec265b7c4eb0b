//! Comment domain service.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{CommentRepository, PostRepository, UserRepository};
use crate::domain::service_support::{map_repository_error, not_found};
use crate::domain::{
    Comment, CommentDraft, CommentFields, CommentId, CommentReferences, Entity, Error, PostId,
    RecordMeta, UserId, validate_comment,
};

/// Service implementing validate-and-save for comments.
#[derive(Clone)]
pub struct CommentService<C, P, U> {
    comments: Arc<C>,
    posts: Arc<P>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<C, P, U> CommentService<C, P, U> {
    pub fn new(comments: Arc<C>, posts: Arc<P>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            comments,
            posts,
            users,
            clock,
        }
    }
}

impl<C, P, U> CommentService<C, P, U>
where
    C: CommentRepository,
    P: PostRepository,
    U: UserRepository,
{
    /// Check `draft` against every comment rule without persisting it.
    ///
    /// # Errors
    ///
    /// Returns an `invalid_request` error carrying every failed rule.
    pub async fn validate(&self, draft: &CommentDraft) -> Result<CommentFields, Error> {
        let references = self.references(draft).await?;
        validate_comment(draft, references).map_err(|failures| {
            debug!(failures = %failures, "comment draft rejected");
            Error::rejected(Entity::Comment, failures)
        })
    }

    /// Validate and persist a new comment.
    ///
    /// # Errors
    ///
    /// Returns the validation failures or the adapter's mapped failure.
    pub async fn create(&self, draft: &CommentDraft) -> Result<Comment, Error> {
        let fields = self.validate(draft).await?;
        let comment = Comment::new(
            RecordMeta::new(CommentId::random(), self.clock.utc()),
            fields,
        );
        self.comments
            .insert(&comment)
            .await
            .map_err(|err| map_repository_error(Entity::Comment, err))?;
        info!(
            comment_id = %comment.id(),
            post_id = %comment.post_id(),
            user_id = %comment.user_id(),
            "comment created"
        );
        Ok(comment)
    }

    /// Re-validate and replace the stored comment `id`.
    ///
    /// # Errors
    ///
    /// Returns `not_found` for an unknown id, otherwise as [`Self::create`].
    pub async fn update(&self, id: CommentId, draft: &CommentDraft) -> Result<Comment, Error> {
        let existing = self.get(id).await?;
        let fields = self.validate(draft).await?;
        let comment = Comment::new(existing.meta().touched(self.clock.utc()), fields);
        let updated = self
            .comments
            .update(&comment)
            .await
            .map_err(|err| map_repository_error(Entity::Comment, err))?;
        if !updated {
            return Err(not_found(Entity::Comment, id));
        }
        info!(comment_id = %id, "comment updated");
        Ok(comment)
    }

    /// Fetch the comment `id`.
    ///
    /// # Errors
    ///
    /// Returns `not_found` when no comment has that id.
    pub async fn get(&self, id: CommentId) -> Result<Comment, Error> {
        self.comments
            .find_by_id(&id)
            .await
            .map_err(|err| map_repository_error(Entity::Comment, err))?
            .ok_or_else(|| not_found(Entity::Comment, id))
    }

    /// All stored comments.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the adapter fails.
    pub async fn list(&self) -> Result<Vec<Comment>, Error> {
        self.comments
            .list()
            .await
            .map_err(|err| map_repository_error(Entity::Comment, err))
    }

    /// Comments left on `post_id`.
    ///
    /// # Errors
    ///
    /// Returns `not_found` when the post does not exist.
    pub async fn list_for_post(&self, post_id: PostId) -> Result<Vec<Comment>, Error> {
        if !self.post_exists(post_id).await? {
            return Err(not_found(Entity::Post, post_id));
        }
        self.comments
            .find_by_post(&post_id)
            .await
            .map_err(|err| map_repository_error(Entity::Comment, err))
    }

    /// Comments written by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `not_found` when the user does not exist.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Comment>, Error> {
        if !self.user_exists(user_id).await? {
            return Err(not_found(Entity::User, user_id));
        }
        self.comments
            .find_by_user(&user_id)
            .await
            .map_err(|err| map_repository_error(Entity::Comment, err))
    }

    /// Delete the comment `id`.
    ///
    /// # Errors
    ///
    /// Returns `not_found` when no comment has that id.
    pub async fn delete(&self, id: CommentId) -> Result<(), Error> {
        let removed = self
            .comments
            .delete(&id)
            .await
            .map_err(|err| map_repository_error(Entity::Comment, err))?;
        if !removed {
            return Err(not_found(Entity::Comment, id));
        }
        info!(comment_id = %id, "comment deleted");
        Ok(())
    }

    async fn references(&self, draft: &CommentDraft) -> Result<CommentReferences, Error> {
        let user_exists = match draft.user_id {
            Some(user_id) => self.user_exists(user_id).await?,
            None => false,
        };
        let post_exists = match draft.post_id {
            Some(post_id) => self.post_exists(post_id).await?,
            None => false,
        };
        Ok(CommentReferences {
            user_exists,
            post_exists,
        })
    }

    async fn user_exists(&self, user_id: UserId) -> Result<bool, Error> {
        self.users
            .find_by_id(&user_id)
            .await
            .map(|user| user.is_some())
            .map_err(|err| map_repository_error(Entity::User, err))
    }

    async fn post_exists(&self, post_id: PostId) -> Result<bool, Error> {
        self.posts
            .find_by_id(&post_id)
            .await
            .map(|post| post.is_some())
            .map_err(|err| map_repository_error(Entity::Post, err))
    }
}

#[cfg(test)]
#[path = "comment_service_tests.rs"]
mod tests;
