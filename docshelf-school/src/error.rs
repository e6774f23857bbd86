//! Error types for the school store.

use thiserror::Error;

use docshelf_core::error::DocumentStoreError;

/// Errors raised by the school-level operations built on top of the document store.
#[derive(Error, Debug)]
pub enum SchoolError {
    /// A record could not be converted to or from a document.
    #[error(transparent)]
    Store(#[from] DocumentStoreError),
    /// A date field is neither `YYYY-MM-DD` nor an ISO-8601 date-time.
    #[error("Invalid date format: {0:?}. Use YYYY-MM-DD")]
    InvalidDate(String),
    /// No announcement has the given identity.
    #[error("Announcement not found: {0}")]
    AnnouncementNotFound(String),
    /// No activity has the given name.
    #[error("Activity not found: {0}")]
    ActivityNotFound(String),
    /// The student is already on the activity's participant list.
    #[error("{email} is already signed up for {activity}")]
    AlreadySignedUp { activity: String, email: String },
    /// The activity has reached its participant limit.
    #[error("Activity {0} is full")]
    ActivityFull(String),
    /// Password hashing failed.
    #[error("Password hashing error: {0}")]
    PasswordHash(String),
}

/// A specialized `Result` type for school store operations.
pub type SchoolResult<T> = Result<T, SchoolError>;
