//! Demo data seeding orchestration.
//!
//! Resets the three record tables and recreates the demo dataset through the
//! record services, so every seeded record passes the same rules as any other
//! write. Dataset references are positions; they are resolved to the ids the
//! services assign as records are created.

use std::fmt;
use std::sync::Arc;

use demo_data::DemoDataset;
use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{CommentRepository, PostRepository, UserRepository};
use crate::domain::service_support::map_repository_error;
use crate::domain::{
    CommentDraft, CommentService, Entity, Error, PostDraft, PostId, PostService, UserDraft, UserId,
    UserService, ValidationErrors,
};

/// Record counts left behind by a completed seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub posts: usize,
    pub comments: usize,
}

impl fmt::Display for SeedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Created {} users, {} posts, and {} comments!",
            self.users, self.posts, self.comments
        )
    }
}

/// Errors raised while seeding demo data.
///
/// A run stops at the first failure. Records created earlier in the same run
/// stay in place; running the seeder again resets them.
#[derive(Debug, Error)]
pub enum SeedingError {
    /// A dataset record failed validation.
    #[error("{entity} #{index} rejected: {failures}")]
    Rejected {
        /// Kind of record that failed.
        entity: Entity,
        /// Position of the record in its dataset batch.
        index: usize,
        /// Every rule the record broke.
        failures: ValidationErrors,
    },
    /// A dataset record referenced a position that was never created.
    #[error("{entity} #{index} references a record missing from the dataset")]
    UnresolvedReference { entity: Entity, index: usize },
    /// The persistence collaborator failed.
    #[error("demo data persistence error: {0}")]
    Persistence(#[from] Error),
}

impl SeedingError {
    fn from_create(entity: Entity, index: usize, error: Error) -> Self {
        if error.failures().is_none() {
            return Self::Persistence(error);
        }
        Self::Rejected {
            entity,
            index,
            failures: error.into_failures().unwrap_or_default(),
        }
    }
}

/// Service that wipes and repopulates the record tables.
pub struct DemoDataSeeder<U, P, C> {
    users: Arc<U>,
    posts: Arc<P>,
    comments: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<U, P, C> DemoDataSeeder<U, P, C> {
    pub fn new(users: Arc<U>, posts: Arc<P>, comments: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            posts,
            comments,
            clock,
        }
    }
}

impl<U, P, C> DemoDataSeeder<U, P, C>
where
    U: UserRepository,
    P: PostRepository,
    C: CommentRepository,
{
    /// Replace every stored record with `dataset`.
    ///
    /// Comments, posts, and users are deleted in that order, then users,
    /// posts, and comments are created in that order.
    ///
    /// # Errors
    ///
    /// Returns [`SeedingError::Rejected`] naming the first record that failed
    /// validation, or [`SeedingError::Persistence`] when the store fails.
    pub async fn seed(&self, dataset: &DemoDataset) -> Result<SeedSummary, SeedingError> {
        self.reset().await?;

        let user_ids = self.create_users(dataset).await?;
        let post_ids = self.create_posts(dataset, &user_ids).await?;
        self.create_comments(dataset, &user_ids, &post_ids).await?;

        let summary = self.summary().await?;
        info!(
            users = summary.users,
            posts = summary.posts,
            comments = summary.comments,
            "demo data seeded"
        );
        Ok(summary)
    }

    async fn reset(&self) -> Result<(), Error> {
        let comments = self
            .comments
            .delete_all()
            .await
            .map_err(|err| map_repository_error(Entity::Comment, err))?;
        let posts = self
            .posts
            .delete_all()
            .await
            .map_err(|err| map_repository_error(Entity::Post, err))?;
        let users = self
            .users
            .delete_all()
            .await
            .map_err(|err| map_repository_error(Entity::User, err))?;
        info!(users, posts, comments, "existing records cleared");
        Ok(())
    }

    async fn create_users(&self, dataset: &DemoDataset) -> Result<Vec<UserId>, SeedingError> {
        let service = UserService::new(Arc::clone(&self.users), Arc::clone(&self.clock));
        let mut ids = Vec::with_capacity(dataset.users().len());
        for (index, seed) in dataset.users().iter().enumerate() {
            let draft = UserDraft::new(seed.username.as_str(), seed.email.as_str());
            let user = service
                .create(&draft)
                .await
                .map_err(|err| SeedingError::from_create(Entity::User, index, err))?;
            ids.push(user.id());
        }
        Ok(ids)
    }

    async fn create_posts(
        &self,
        dataset: &DemoDataset,
        user_ids: &[UserId],
    ) -> Result<Vec<PostId>, SeedingError> {
        let service = PostService::new(
            Arc::clone(&self.posts),
            Arc::clone(&self.users),
            Arc::clone(&self.clock),
        );
        let mut ids = Vec::with_capacity(dataset.posts().len());
        for (index, seed) in dataset.posts().iter().enumerate() {
            let author = resolve(user_ids, seed.author, Entity::Post, index)?;
            let draft = PostDraft {
                title: Some(seed.title.clone()),
                url: Some(seed.url.clone()),
                body: seed.body.clone(),
                user_id: Some(author),
            };
            let post = service
                .create(&draft)
                .await
                .map_err(|err| SeedingError::from_create(Entity::Post, index, err))?;
            ids.push(post.id());
        }
        Ok(ids)
    }

    async fn create_comments(
        &self,
        dataset: &DemoDataset,
        user_ids: &[UserId],
        post_ids: &[PostId],
    ) -> Result<(), SeedingError> {
        let service = CommentService::new(
            Arc::clone(&self.comments),
            Arc::clone(&self.posts),
            Arc::clone(&self.users),
            Arc::clone(&self.clock),
        );
        for (index, seed) in dataset.comments().iter().enumerate() {
            let author = resolve(user_ids, seed.author, Entity::Comment, index)?;
            let post = resolve(post_ids, seed.post, Entity::Comment, index)?;
            let draft = CommentDraft::new(seed.body.as_str(), author, post);
            service
                .create(&draft)
                .await
                .map_err(|err| SeedingError::from_create(Entity::Comment, index, err))?;
        }
        Ok(())
    }

    async fn summary(&self) -> Result<SeedSummary, Error> {
        Ok(SeedSummary {
            users: self
                .users
                .count()
                .await
                .map_err(|err| map_repository_error(Entity::User, err))?,
            posts: self
                .posts
                .count()
                .await
                .map_err(|err| map_repository_error(Entity::Post, err))?,
            comments: self
                .comments
                .count()
                .await
                .map_err(|err| map_repository_error(Entity::Comment, err))?,
        })
    }
}

fn resolve<Id: Copy>(
    ids: &[Id],
    position: usize,
    entity: Entity,
    index: usize,
) -> Result<Id, SeedingError> {
    ids.get(position)
        .copied()
        .ok_or(SeedingError::UnresolvedReference { entity, index })
}
