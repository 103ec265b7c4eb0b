//! Driven ports for record persistence.
//!
//! Services depend on these traits only. The in-memory adapter in
//! `outbound::persistence` implements all three over shared tables so
//! reference and restrict checks see a consistent view.

mod macros;
pub(crate) use macros::define_port_error;

mod comment_repository;
mod post_repository;
mod repository_error;
mod user_repository;

#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::CommentRepository;
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::PostRepository;
pub use repository_error::RepositoryError;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
