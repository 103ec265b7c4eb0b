//! Demo dataset types and JSON parsing.
//!
//! The JSON document names authors by username and posts by their position in
//! the `posts` array. Parsing resolves both into indices so consumers can map
//! each reference onto the identifiers they assign while creating records.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::error::DatasetError;

/// Current supported dataset version.
const SUPPORTED_VERSION: u32 = 1;

/// JSON source of the built-in dataset.
const BUILTIN_DATASET: &str = include_str!("../fixtures/dataset.json");

/// A user record to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSeed {
    /// Username shown next to posts and comments.
    pub username: String,
    /// Contact email address.
    pub email: String,
}

/// A post record to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSeed {
    /// Post headline.
    pub title: String,
    /// Link the post shares.
    pub url: String,
    /// Optional free text accompanying the link.
    pub body: Option<String>,
    /// Position of the authoring user in [`DemoDataset::users`].
    pub author: usize,
}

/// A comment record to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSeed {
    /// Comment text.
    pub body: String,
    /// Position of the commenting user in [`DemoDataset::users`].
    pub author: usize,
    /// Position of the commented post in [`DemoDataset::posts`].
    pub post: usize,
}

/// A resolved demo dataset.
///
/// # Example
///
/// ```
/// use demo_data::DemoDataset;
///
/// let dataset = DemoDataset::builtin().expect("built-in dataset parses");
/// assert_eq!(dataset.users().len(), 3);
/// assert_eq!(dataset.posts().len(), 3);
/// assert_eq!(dataset.comments().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoDataset {
    users: Vec<UserSeed>,
    posts: Vec<PostSeed>,
    comments: Vec<CommentSeed>,
}

impl DemoDataset {
    /// Parses the dataset compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] only if the bundled fixture is corrupt.
    pub fn builtin() -> Result<Self, DatasetError> {
        Self::from_json(BUILTIN_DATASET)
    }

    /// Parses a dataset from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if:
    /// - The JSON is malformed or required fields are missing
    /// - The version is unsupported
    /// - The users array is empty or repeats a username
    /// - A post or comment names an unknown author
    /// - A comment references a post position that does not exist
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let raw: RawDataset = serde_json::from_str(json).map_err(|e| DatasetError::ParseError {
            message: e.to_string(),
        })?;

        Self::from_raw(raw)
    }

    fn from_raw(raw: RawDataset) -> Result<Self, DatasetError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(DatasetError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.users.is_empty() {
            return Err(DatasetError::EmptyUsers);
        }

        let authors = index_usernames(&raw.users)?;

        let posts = raw
            .posts
            .into_iter()
            .enumerate()
            .map(|(index, post)| {
                let author = resolve_author(&authors, &post.author).ok_or_else(|| {
                    DatasetError::UnknownPostAuthor {
                        index,
                        author: post.author.clone(),
                    }
                })?;
                Ok(PostSeed {
                    title: post.title,
                    url: post.url,
                    body: post.body,
                    author,
                })
            })
            .collect::<Result<Vec<_>, DatasetError>>()?;

        let post_count = posts.len();
        let comments = raw
            .comments
            .into_iter()
            .enumerate()
            .map(|(index, comment)| {
                let author = resolve_author(&authors, &comment.author).ok_or_else(|| {
                    DatasetError::UnknownCommentAuthor {
                        index,
                        author: comment.author.clone(),
                    }
                })?;
                if comment.post >= post_count {
                    return Err(DatasetError::UnknownCommentPost {
                        index,
                        post: comment.post,
                        post_count,
                    });
                }
                Ok(CommentSeed {
                    body: comment.body,
                    author,
                    post: comment.post,
                })
            })
            .collect::<Result<Vec<_>, DatasetError>>()?;

        let users = raw
            .users
            .into_iter()
            .map(|user| UserSeed {
                username: user.username,
                email: user.email,
            })
            .collect();

        Ok(Self {
            users,
            posts,
            comments,
        })
    }

    /// Returns the users in creation order.
    #[must_use]
    pub fn users(&self) -> &[UserSeed] {
        &self.users
    }

    /// Returns the posts in creation order.
    #[must_use]
    pub fn posts(&self) -> &[PostSeed] {
        &self.posts
    }

    /// Returns the comments in creation order.
    #[must_use]
    pub fn comments(&self) -> &[CommentSeed] {
        &self.comments
    }
}

fn index_usernames(users: &[RawUserSeed]) -> Result<HashMap<&str, usize>, DatasetError> {
    let mut seen = HashSet::with_capacity(users.len());
    let mut authors = HashMap::with_capacity(users.len());
    for (index, user) in users.iter().enumerate() {
        if !seen.insert(user.username.to_lowercase()) {
            return Err(DatasetError::DuplicateUsername {
                index,
                username: user.username.clone(),
            });
        }
        authors.insert(user.username.as_str(), index);
    }
    Ok(authors)
}

fn resolve_author(authors: &HashMap<&str, usize>, username: &str) -> Option<usize> {
    authors.get(username).copied()
}

/// Raw JSON structure for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawDataset {
    version: u32,
    users: Vec<RawUserSeed>,
    #[serde(default)]
    posts: Vec<RawPostSeed>,
    #[serde(default)]
    comments: Vec<RawCommentSeed>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawUserSeed {
    username: String,
    email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawPostSeed {
    title: String,
    url: String,
    #[serde(default)]
    body: Option<String>,
    author: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawCommentSeed {
    body: String,
    author: String,
    post: usize,
}
