//! Content domain - the four orderable/publishable content kinds
//! (news, events, projects, downloads) managed from the admin console.

pub mod collection;
pub mod models;
pub mod notification;
pub mod publish;

pub use collection::{apply_reorder, parse_reorder_payload, OrderedCollection, ReorderUpdate};
pub use notification::{notification_body, NotificationMessage, Topic, EXCERPT_LIMIT};
pub use publish::{notify_if_published, set_published, NotifyOutcome, PublishOutcome};

use thiserror::Error;

use crate::common::ApiError;

/// Errors for the content domain operations
#[derive(Error, Debug)]
pub enum ContentError {
    /// Malformed request payload. Nothing was written.
    #[error("{0}")]
    InvalidPayload(String),

    #[error("record not found: {0}")]
    NotFound(String),

    /// A point-write failed. Writes already applied before it stay applied.
    #[error("write failed for id {id}: {source}")]
    WriteFailed {
        id: String,
        #[source]
        source: sqlx::Error,
    },

    /// Store read/write failure. Completed point-writes are not rolled back.
    #[error("persistence failure: {0}")]
    Persistence(#[from] sqlx::Error),
}

impl From<ContentError> for ApiError {
    fn from(value: ContentError) -> Self {
        match value {
            ContentError::InvalidPayload(message) => ApiError::bad_request(message),
            ContentError::NotFound(id) => ApiError::not_found(format!("record not found: {}", id)),
            other => ApiError::internal(other.to_string()),
        }
    }
}
