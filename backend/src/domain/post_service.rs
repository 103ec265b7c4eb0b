//! Post domain service.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{PostRepository, UserRepository};
use crate::domain::service_support::{map_repository_error, not_found};
use crate::domain::{
    Entity, Error, Post, PostDraft, PostFields, PostId, PostReferences, RecordMeta, UserId,
    validate_post,
};

/// Service implementing validate-and-save for posts.
///
/// Holds the user repository so author references can be checked before a
/// post is written.
#[derive(Clone)]
pub struct PostService<P, U> {
    posts: Arc<P>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<P, U> PostService<P, U> {
    pub fn new(posts: Arc<P>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            posts,
            users,
            clock,
        }
    }
}

impl<P, U> PostService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    /// Check `draft` against every post rule without persisting it.
    ///
    /// # Errors
    ///
    /// Returns an `invalid_request` error carrying every failed rule.
    pub async fn validate(&self, draft: &PostDraft) -> Result<PostFields, Error> {
        let references = self.references(draft).await?;
        validate_post(draft, references).map_err(|failures| {
            debug!(failures = %failures, "post draft rejected");
            Error::rejected(Entity::Post, failures)
        })
    }

    /// Validate and persist a new post.
    ///
    /// # Errors
    ///
    /// Returns the validation failures, or `user_id not_found` when the
    /// author disappears between validation and the write.
    pub async fn create(&self, draft: &PostDraft) -> Result<Post, Error> {
        let fields = self.validate(draft).await?;
        let post = Post::new(RecordMeta::new(PostId::random(), self.clock.utc()), fields);
        self.posts
            .insert(&post)
            .await
            .map_err(|err| map_repository_error(Entity::Post, err))?;
        info!(post_id = %post.id(), user_id = %post.user_id(), "post created");
        Ok(post)
    }

    /// Re-validate and replace the stored post `id`.
    ///
    /// # Errors
    ///
    /// Returns `not_found` for an unknown id, otherwise as [`Self::create`].
    pub async fn update(&self, id: PostId, draft: &PostDraft) -> Result<Post, Error> {
        let existing = self.get(id).await?;
        let fields = self.validate(draft).await?;
        let post = Post::new(existing.meta().touched(self.clock.utc()), fields);
        let updated = self
            .posts
            .update(&post)
            .await
            .map_err(|err| map_repository_error(Entity::Post, err))?;
        if !updated {
            return Err(not_found(Entity::Post, id));
        }
        info!(post_id = %id, "post updated");
        Ok(post)
    }

    /// Fetch the post `id`.
    ///
    /// # Errors
    ///
    /// Returns `not_found` when no post has that id.
    pub async fn get(&self, id: PostId) -> Result<Post, Error> {
        self.posts
            .find_by_id(&id)
            .await
            .map_err(|err| map_repository_error(Entity::Post, err))?
            .ok_or_else(|| not_found(Entity::Post, id))
    }

    /// All stored posts.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the adapter fails.
    pub async fn list(&self) -> Result<Vec<Post>, Error> {
        self.posts
            .list()
            .await
            .map_err(|err| map_repository_error(Entity::Post, err))
    }

    /// Posts authored by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `not_found` when the user does not exist.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Post>, Error> {
        if !self.user_exists(user_id).await? {
            return Err(not_found(Entity::User, user_id));
        }
        self.posts
            .find_by_user(&user_id)
            .await
            .map_err(|err| map_repository_error(Entity::Post, err))
    }

    /// Delete the post `id`.
    ///
    /// # Errors
    ///
    /// Returns `conflict` while the post still has comments and `not_found`
    /// when no post has that id.
    pub async fn delete(&self, id: PostId) -> Result<(), Error> {
        let removed = self
            .posts
            .delete(&id)
            .await
            .map_err(|err| map_repository_error(Entity::Post, err))?;
        if !removed {
            return Err(not_found(Entity::Post, id));
        }
        info!(post_id = %id, "post deleted");
        Ok(())
    }

    async fn references(&self, draft: &PostDraft) -> Result<PostReferences, Error> {
        let user_exists = match draft.user_id {
            Some(user_id) => self.user_exists(user_id).await?,
            None => false,
        };
        Ok(PostReferences { user_exists })
    }

    async fn user_exists(&self, user_id: UserId) -> Result<bool, Error> {
        self.users
            .find_by_id(&user_id)
            .await
            .map(|user| user.is_some())
            .map_err(|err| map_repository_error(Entity::User, err))
    }
}

#[cfg(test)]
#[path = "post_service_tests.rs"]
mod tests;
