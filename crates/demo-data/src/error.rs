//! Error types for the demo-data crate.
//!
//! Dataset loading failures are reported through a single semantic enum built
//! with `thiserror`, following the project's error handling conventions.

use thiserror::Error;

/// Errors that can occur when loading or resolving a demo dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    /// The dataset JSON is malformed or missing required fields.
    #[error("invalid dataset JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The dataset version is not supported.
    #[error("unsupported dataset version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the dataset.
        actual: u32,
    },

    /// The dataset contains no users.
    #[error("dataset contains no users")]
    EmptyUsers,

    /// Two users share a username under case-insensitive comparison.
    #[error("dataset user at index {index} repeats username '{username}'")]
    DuplicateUsername {
        /// Index of the repeated user entry.
        index: usize,
        /// The repeated username.
        username: String,
    },

    /// A post names an author that is not one of the dataset users.
    #[error("post at index {index} names unknown author '{author}'")]
    UnknownPostAuthor {
        /// Index of the post entry.
        index: usize,
        /// The unresolved author username.
        author: String,
    },

    /// A comment names an author that is not one of the dataset users.
    #[error("comment at index {index} names unknown author '{author}'")]
    UnknownCommentAuthor {
        /// Index of the comment entry.
        index: usize,
        /// The unresolved author username.
        author: String,
    },

    /// A comment points at a post position outside the posts array.
    #[error("comment at index {index} references post {post}, but only {post_count} posts exist")]
    UnknownCommentPost {
        /// Index of the comment entry.
        index: usize,
        /// The out-of-range post position.
        post: usize,
        /// Number of posts in the dataset.
        post_count: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_error_formats_correctly() {
        let err = DatasetError::UnsupportedVersion {
            expected: 1,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "unsupported dataset version: expected 1, found 3"
        );
    }

    #[test]
    fn duplicate_username_formats_correctly() {
        let err = DatasetError::DuplicateUsername {
            index: 2,
            username: "Tech_Guru".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "dataset user at index 2 repeats username 'Tech_Guru'"
        );
    }

    #[test]
    fn unknown_comment_post_formats_correctly() {
        let err = DatasetError::UnknownCommentPost {
            index: 0,
            post: 7,
            post_count: 3,
        };
        assert_eq!(
            err.to_string(),
            "comment at index 0 references post 7, but only 3 posts exist"
        );
    }
}
