//! User domain service.
//!
//! Runs the user rules against the persisted set and drives the user
//! repository port. Every write re-validates the full record.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::UserRepository;
use crate::domain::service_support::{
    lookup_key, map_repository_error, not_found, taken_by_other,
};
use crate::domain::{
    Entity, Error, RecordMeta, User, UserCollisions, UserDraft, UserFields, UserId, validate_user,
};

/// Service implementing validate-and-save for users.
#[derive(Clone)]
pub struct UserService<R> {
    users: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> UserService<R> {
    /// Create a new service over the given repository.
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use linkboard::domain::{UserDraft, UserService};
    /// # use linkboard::outbound::persistence::InMemoryStore;
    /// # use mockable::DefaultClock;
    /// # async fn example() -> Result<(), linkboard::domain::Error> {
    /// let service = UserService::new(Arc::new(InMemoryStore::new()), Arc::new(DefaultClock));
    /// let user = service
    ///     .create(&UserDraft::new("reddit_user1", "user1@example.com"))
    ///     .await?;
    /// assert_eq!(user.username(), "reddit_user1");
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(users: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    /// Check `draft` against every user rule without persisting it.
    ///
    /// `except` names the user being updated so it does not collide with
    /// itself.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorCode::InvalidRequest`](crate::domain::ErrorCode)
    /// error carrying every failed rule, or a repository error when the
    /// uniqueness lookups fail.
    pub async fn validate(
        &self,
        draft: &UserDraft,
        except: Option<UserId>,
    ) -> Result<UserFields, Error> {
        let collisions = self.collisions(draft, except).await?;
        validate_user(draft, collisions).map_err(|failures| {
            debug!(failures = %failures, "user draft rejected");
            Error::rejected(Entity::User, failures)
        })
    }

    /// Validate and persist a new user.
    ///
    /// # Errors
    ///
    /// Returns the validation failures, or the adapter's failure mapped onto
    /// the same field reasons when it rejects the write.
    pub async fn create(&self, draft: &UserDraft) -> Result<User, Error> {
        let fields = self.validate(draft, None).await?;
        let user = User::new(RecordMeta::new(UserId::random(), self.clock.utc()), fields);
        self.users
            .insert(&user)
            .await
            .map_err(|err| map_repository_error(Entity::User, err))?;
        info!(user_id = %user.id(), username = user.username(), "user created");
        Ok(user)
    }

    /// Re-validate and replace the stored user `id`.
    ///
    /// # Errors
    ///
    /// Returns `not_found` for an unknown id, otherwise as [`Self::create`].
    pub async fn update(&self, id: UserId, draft: &UserDraft) -> Result<User, Error> {
        let existing = self.get(id).await?;
        let fields = self.validate(draft, Some(id)).await?;
        let user = User::new(existing.meta().touched(self.clock.utc()), fields);
        let updated = self
            .users
            .update(&user)
            .await
            .map_err(|err| map_repository_error(Entity::User, err))?;
        if !updated {
            return Err(not_found(Entity::User, id));
        }
        info!(user_id = %id, "user updated");
        Ok(user)
    }

    /// Fetch the user `id`.
    ///
    /// # Errors
    ///
    /// Returns `not_found` when no user has that id.
    pub async fn get(&self, id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(&id)
            .await
            .map_err(|err| map_repository_error(Entity::User, err))?
            .ok_or_else(|| not_found(Entity::User, id))
    }

    /// All stored users.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the adapter fails.
    pub async fn list(&self) -> Result<Vec<User>, Error> {
        self.users
            .list()
            .await
            .map_err(|err| map_repository_error(Entity::User, err))
    }

    /// Delete the user `id`.
    ///
    /// # Errors
    ///
    /// Returns `conflict` while the user still owns posts or comments and
    /// `not_found` when no user has that id.
    pub async fn delete(&self, id: UserId) -> Result<(), Error> {
        let removed = self
            .users
            .delete(&id)
            .await
            .map_err(|err| map_repository_error(Entity::User, err))?;
        if !removed {
            return Err(not_found(Entity::User, id));
        }
        info!(user_id = %id, "user deleted");
        Ok(())
    }

    async fn collisions(
        &self,
        draft: &UserDraft,
        except: Option<UserId>,
    ) -> Result<UserCollisions, Error> {
        let mut collisions = UserCollisions::default();
        if let Some(username) = lookup_key(draft.username.as_deref()) {
            let holder = self
                .users
                .find_by_username(username)
                .await
                .map_err(|err| map_repository_error(Entity::User, err))?;
            collisions.username_taken = taken_by_other(holder.map(|user| user.id()), except);
        }
        if let Some(email) = lookup_key(draft.email.as_deref()) {
            let holder = self
                .users
                .find_by_email(email)
                .await
                .map_err(|err| map_repository_error(Entity::User, err))?;
            collisions.email_taken = taken_by_other(holder.map(|user| user.id()), except);
        }
        Ok(collisions)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
