//! Fixed demonstration dataset for seeding linkboard records.
//!
//! The dataset describes users, the links they post, and the comments left on
//! those posts. It is kept independent of backend domain types so the backend
//! can convert each seed into a validated draft at the point of use.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Loading datasets from JSON strings; callers read files themselves
//! - A built-in dataset with three users, three posts, and three comments
//! - Resolving author usernames and post positions to indices up front, so a
//!   parsed dataset never carries a dangling reference
//!
//! # Example
//!
//! ```
//! use demo_data::DemoDataset;
//!
//! let json = r#"{
//!     "version": 1,
//!     "users": [{"username": "ada_l", "email": "ada@example.com"}],
//!     "posts": [{"title": "Analytical engines", "url": "https://example.com", "author": "ada_l"}],
//!     "comments": [{"body": "Nice!", "author": "ada_l", "post": 0}]
//! }"#;
//!
//! let dataset = DemoDataset::from_json(json).expect("valid dataset");
//! assert_eq!(dataset.users().len(), 1);
//! assert_eq!(dataset.posts()[0].author, 0);
//! ```

mod dataset;
mod error;

pub use dataset::{CommentSeed, DemoDataset, PostSeed, UserSeed};
pub use error::DatasetError;
