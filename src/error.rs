//! Error types shared across the library

use thiserror::Error;

use crate::storage::StorageError;

/// Errors raised by the blog's stores, views and admin panel
#[derive(Debug, Error)]
pub enum BlogError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to (de)serialize value under key {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Post {0} does not exist or has been deleted")]
    PostNotFound(u64),

    #[error("No post ids left: the largest id is already in use")]
    IdsExhausted,

    #[error("Comment {comment_id} on post {post_id} does not exist")]
    CommentNotFound { post_id: u64, comment_id: i64 },

    #[error("{0}")]
    Validation(String),

    #[error("Admin session required")]
    Unauthorized,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Operation cancelled")]
    Cancelled,
}

impl BlogError {
    /// Shorthand for a user-input validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        BlogError::Validation(message.into())
    }
}

/// Result alias used by the library
pub type Result<T> = std::result::Result<T, BlogError>;
