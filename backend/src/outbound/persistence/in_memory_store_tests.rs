//! Constraint coverage for the in-memory store.

use super::*;
use crate::domain::{CommentFields, PostFields, RecordMeta, UserFields};
use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};

fn meta<Id: Copy>(id: Id) -> RecordMeta<Id> {
    let now = Utc
        .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp");
    RecordMeta::new(id, now)
}

fn user(username: &str, email: &str) -> User {
    User::new(
        meta(UserId::random()),
        UserFields {
            username: username.to_owned(),
            email: email.to_owned(),
        },
    )
}

fn post(author: UserId) -> Post {
    Post::new(
        meta(PostId::random()),
        PostFields {
            title: "Understanding Rails Validations".to_owned(),
            url: "https://guides.rubyonrails.org".to_owned(),
            body: None,
            user_id: author,
        },
    )
}

fn comment(author: UserId, post_id: PostId) -> Comment {
    Comment::new(
        meta(CommentId::random()),
        CommentFields {
            body: "Thanks for sharing.".to_owned(),
            user_id: author,
            post_id,
        },
    )
}

#[fixture]
fn store() -> InMemoryStore {
    InMemoryStore::new()
}

#[rstest]
#[case::username("REDDIT_USER1", "other@example.com", Field::Username)]
#[case::email("someone_else", "USER1@Example.com", Field::Email)]
#[tokio::test]
async fn unique_indexes_ignore_case(
    store: InMemoryStore,
    #[case] username: &str,
    #[case] email: &str,
    #[case] field: Field,
) {
    UserRepository::insert(&store, &user("reddit_user1", "user1@example.com"))
        .await
        .expect("first insert");

    let error = UserRepository::insert(&store, &user(username, email))
        .await
        .expect_err("collision");
    assert_eq!(error, RepositoryError::UniqueViolation { field });
    assert_eq!(UserRepository::count(&store).await.expect("count"), 1);
}

#[rstest]
#[tokio::test]
async fn update_does_not_collide_with_itself(store: InMemoryStore) {
    let original = user("tech_guru", "guru@example.com");
    UserRepository::insert(&store, &original)
        .await
        .expect("insert");

    let renamed = User::new(
        *original.meta(),
        UserFields {
            username: "Tech_Guru".to_owned(),
            email: "guru@example.com".to_owned(),
        },
    );
    let updated = UserRepository::update(&store, &renamed)
        .await
        .expect("update");
    assert!(updated);

    let stored = store
        .find_by_username("tech_guru")
        .await
        .expect("lookup")
        .expect("user present");
    assert_eq!(stored.username(), "Tech_Guru");
}

#[rstest]
#[tokio::test]
async fn lookups_ignore_case(store: InMemoryStore) {
    let stored = user("code_lover", "coder@example.com");
    UserRepository::insert(&store, &stored)
        .await
        .expect("insert");

    let by_email = store
        .find_by_email("CODER@EXAMPLE.COM")
        .await
        .expect("lookup");
    assert_eq!(by_email.map(|found| found.id()), Some(stored.id()));
}

#[rstest]
#[tokio::test]
async fn foreign_keys_are_enforced(store: InMemoryStore) {
    let error = PostRepository::insert(&store, &post(UserId::random()))
        .await
        .expect_err("dangling author");
    assert_eq!(error, RepositoryError::foreign_key_violation(Field::UserId));

    let author = user("code_lover", "coder@example.com");
    UserRepository::insert(&store, &author)
        .await
        .expect("insert user");
    let error = CommentRepository::insert(&store, &comment(author.id(), PostId::random()))
        .await
        .expect_err("dangling post");
    assert_eq!(error, RepositoryError::foreign_key_violation(Field::PostId));
}

#[rstest]
#[tokio::test]
async fn deletes_are_restricted_by_children(store: InMemoryStore) {
    let author = user("reddit_user1", "user1@example.com");
    let shared = post(author.id());
    let reply = comment(author.id(), shared.id());
    UserRepository::insert(&store, &author).await.expect("user");
    PostRepository::insert(&store, &shared).await.expect("post");
    CommentRepository::insert(&store, &reply).await.expect("comment");

    let error = UserRepository::delete(&store, &author.id())
        .await
        .expect_err("user owns posts");
    assert_eq!(
        error,
        RepositoryError::dependent_records(Entity::User, Entity::Post)
    );
    let error = PostRepository::delete_all(&store)
        .await
        .expect_err("posts have comments");
    assert_eq!(
        error,
        RepositoryError::dependent_records(Entity::Post, Entity::Comment)
    );

    assert!(
        CommentRepository::delete(&store, &reply.id())
            .await
            .expect("delete comment")
    );
    assert!(
        PostRepository::delete(&store, &shared.id())
            .await
            .expect("delete post")
    );
    assert!(
        UserRepository::delete(&store, &author.id())
            .await
            .expect("delete user")
    );
}

#[rstest]
#[tokio::test]
async fn delete_of_missing_row_reports_false(store: InMemoryStore) {
    assert!(
        !UserRepository::delete(&store, &UserId::random())
            .await
            .expect("delete")
    );
    assert!(
        !PostRepository::update(&store, &post(UserId::random()))
            .await
            .is_ok_and(|updated| updated)
    );
}

#[rstest]
#[tokio::test]
async fn relationship_queries_filter_rows(store: InMemoryStore) {
    let first = user("reddit_user1", "user1@example.com");
    let second = user("code_lover", "coder@example.com");
    UserRepository::insert(&store, &first).await.expect("user");
    UserRepository::insert(&store, &second).await.expect("user");
    let first_post = post(first.id());
    let second_post = post(second.id());
    PostRepository::insert(&store, &first_post).await.expect("post");
    PostRepository::insert(&store, &second_post).await.expect("post");
    CommentRepository::insert(&store, &comment(second.id(), first_post.id()))
        .await
        .expect("comment");

    let posts = PostRepository::find_by_user(&store, &first.id())
        .await
        .expect("posts by user");
    assert_eq!(posts, vec![first_post.clone()]);

    let on_first = store.find_by_post(&first_post.id()).await.expect("by post");
    assert_eq!(on_first.len(), 1);
    let by_second = CommentRepository::find_by_user(&store, &second.id())
        .await
        .expect("by user");
    assert_eq!(by_second.len(), 1);
    assert!(
        store
            .find_by_post(&second_post.id())
            .await
            .expect("by post")
            .is_empty()
    );
}

#[rstest]
#[tokio::test]
async fn delete_all_in_dependency_order_empties_tables(store: InMemoryStore) {
    let author = user("reddit_user1", "user1@example.com");
    let shared = post(author.id());
    UserRepository::insert(&store, &author).await.expect("user");
    PostRepository::insert(&store, &shared).await.expect("post");
    CommentRepository::insert(&store, &comment(author.id(), shared.id()))
        .await
        .expect("comment");

    assert_eq!(CommentRepository::delete_all(&store).await.expect("comments"), 1);
    assert_eq!(PostRepository::delete_all(&store).await.expect("posts"), 1);
    assert_eq!(UserRepository::delete_all(&store).await.expect("users"), 1);
    assert!(UserRepository::list(&store).await.expect("list").is_empty());
}
