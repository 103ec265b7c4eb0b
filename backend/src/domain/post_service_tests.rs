//! Tests for the post service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{MockPostRepository, MockUserRepository, RepositoryError};
use crate::domain::{ErrorCode, Field, Reason, User, UserFields};
use crate::test_support::clock::FixtureClock;
use rstest::{fixture, rstest};

type Service = PostService<MockPostRepository, MockUserRepository>;

#[fixture]
fn clock() -> Arc<FixtureClock> {
    Arc::new(FixtureClock::fixed())
}

fn author(clock: &FixtureClock) -> User {
    User::new(
        RecordMeta::new(UserId::random(), clock.utc()),
        UserFields {
            username: "reddit_user1".to_owned(),
            email: "user1@example.com".to_owned(),
        },
    )
}

fn users_with(user: Option<User>) -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(move |_| Ok(user.clone()));
    users
}

fn make_service(posts: MockPostRepository, users: MockUserRepository, clock: Arc<FixtureClock>) -> Service {
    PostService::new(Arc::new(posts), Arc::new(users), clock)
}

#[rstest]
#[tokio::test]
async fn create_persists_post_for_existing_author(clock: Arc<FixtureClock>) {
    let user = author(&clock);
    let user_id = user.id();
    let mut posts = MockPostRepository::new();
    posts
        .expect_insert()
        .withf(move |post| post.user_id() == user_id && post.body() == Some("Body"))
        .times(1)
        .return_once(|_| Ok(()));

    let service = make_service(posts, users_with(Some(user)), clock);
    let draft = PostDraft::new("Check out this cool Ruby article", "https://www.ruby-lang.org", user_id)
        .with_body("Body");
    let post = service.create(&draft).await.expect("create succeeds");

    assert_eq!(post.title(), "Check out this cool Ruby article");
}

#[rstest]
#[tokio::test]
async fn create_rejects_unknown_author_and_bad_url(clock: Arc<FixtureClock>) {
    let mut posts = MockPostRepository::new();
    posts.expect_insert().never();

    let service = make_service(posts, users_with(None), clock);
    let draft = PostDraft::new("A valid title", "ftp://example.com", UserId::random());
    let error = service.create(&draft).await.expect_err("rejected");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let failures = error.failures().expect("field failures");
    assert_eq!(failures.reasons_for(Field::Url), vec![Reason::BadFormat]);
    assert_eq!(failures.reasons_for(Field::UserId), vec![Reason::NotFound]);
}

#[rstest]
#[tokio::test]
async fn missing_author_skips_lookup(clock: Arc<FixtureClock>) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().never();

    let service = make_service(MockPostRepository::new(), users, clock);
    let draft = PostDraft {
        title: Some("A valid title".to_owned()),
        url: Some("https://example.com".to_owned()),
        ..PostDraft::default()
    };
    let error = service.validate(&draft).await.expect_err("no author");

    let failures = error.failures().expect("field failures");
    assert_eq!(failures.reasons_for(Field::UserId), vec![Reason::Missing]);
}

#[rstest]
#[tokio::test]
async fn adapter_foreign_key_violation_surfaces_as_not_found(clock: Arc<FixtureClock>) {
    let user = author(&clock);
    let user_id = user.id();
    let mut posts = MockPostRepository::new();
    posts
        .expect_insert()
        .times(1)
        .return_once(|_| Err(RepositoryError::foreign_key_violation(Field::UserId)));

    let service = make_service(posts, users_with(Some(user)), clock);
    let error = service
        .create(&PostDraft::new("A valid title", "https://example.com", user_id))
        .await
        .expect_err("author vanished");

    let failures = error.failures().expect("field failures");
    assert_eq!(failures.reasons_for(Field::UserId), vec![Reason::NotFound]);
}

#[rstest]
#[tokio::test]
async fn list_for_user_requires_existing_user(clock: Arc<FixtureClock>) {
    let mut posts = MockPostRepository::new();
    posts.expect_find_by_user().never();

    let service = make_service(posts, users_with(None), clock);
    let error = service
        .list_for_user(UserId::random())
        .await
        .expect_err("unknown user");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn list_for_user_queries_by_author(clock: Arc<FixtureClock>) {
    let user = author(&clock);
    let user_id = user.id();
    let mut posts = MockPostRepository::new();
    posts
        .expect_find_by_user()
        .withf(move |id| *id == user_id)
        .times(1)
        .return_once(|_| Ok(Vec::new()));

    let service = make_service(posts, users_with(Some(user)), clock);
    let listed = service.list_for_user(user_id).await.expect("list succeeds");
    assert!(listed.is_empty());
}

#[rstest]
#[tokio::test]
async fn update_refreshes_timestamp_only(clock: Arc<FixtureClock>) {
    let user = author(&clock);
    let user_id = user.id();
    let existing = Post::new(
        RecordMeta::new(PostId::random(), clock.utc()),
        PostFields {
            title: "Original title".to_owned(),
            url: "https://example.com".to_owned(),
            body: None,
            user_id,
        },
    );
    let id = existing.id();
    let created_at = existing.meta().created_at();

    let mut posts = MockPostRepository::new();
    posts
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    posts.expect_update().times(1).return_once(|_| Ok(true));

    clock.advance_seconds(30);
    let service = make_service(posts, users_with(Some(user)), clock);
    let post = service
        .update(id, &PostDraft::new("Edited title", "https://example.com/new", user_id))
        .await
        .expect("update succeeds");

    assert_eq!(post.id(), id);
    assert_eq!(post.meta().created_at(), created_at);
    assert!(post.meta().updated_at() > created_at);
    assert_eq!(post.title(), "Edited title");
}

#[rstest]
#[tokio::test]
async fn delete_with_comments_is_conflict(clock: Arc<FixtureClock>) {
    let mut posts = MockPostRepository::new();
    posts
        .expect_delete()
        .times(1)
        .return_once(|_| Err(RepositoryError::dependent_records(Entity::Post, Entity::Comment)));

    let service = make_service(posts, MockUserRepository::new(), clock);
    let error = service.delete(PostId::random()).await.expect_err("restricted");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(
        error.details(),
        Some(&serde_json::json!({"entity": "post", "dependents": "comment"}))
    );
}
