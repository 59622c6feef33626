//! Error types for the feed read path.
//!
//! Every failure is an explicit variant so the transport layer can map it to
//! a protocol response. Nothing is retried here.

use thiserror::Error;

/// Message returned whenever a marker arrives without a usable direction.
pub const INVALID_DIRECTION_MESSAGE: &str =
    "Marker must have a page direction specified as either \"forward\" or \"backward\"";

/// Message returned when a marker does not resolve to an entry.
pub const MARKER_NOT_FOUND_MESSAGE: &str = "No entry with specified marker found";

/// The unified error type for feed operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The marker or the requested entry does not exist in the feed.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// The request itself is malformed.
    #[error("bad request: {0}")]
    BadRequest(#[from] BadRequestError),

    /// The storage backend failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The search query could not be turned into a category predicate.
    #[error("filter error: {0}")]
    Filter(#[from] FilterError),

    /// A stored entry body could not be parsed into a document.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),
}

impl Error {
    /// Create a not-found error with the given message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Error::NotFound {
            message: message.into(),
        }
    }

    /// Check if this is a definitive not-found signal.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Check if this error should be surfaced as a client error.
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Error::BadRequest(_) | Error::Filter(_))
    }
}

/// Client-side request errors.
#[derive(Debug, Error)]
pub enum BadRequestError {
    /// A marker was given with a direction other than forward/backward.
    #[error("{}", INVALID_DIRECTION_MESSAGE)]
    InvalidDirection,

    /// The page size token is not a positive integer.
    #[error("invalid page size '{value}': {reason}")]
    InvalidPageSize { value: String, reason: String },

    /// A feed name, entry id or base URI failed validation.
    #[error("invalid {kind} '{value}': {reason}")]
    InvalidInput {
        kind: &'static str,
        value: String,
        reason: String,
    },
}

/// Failures reported by an entry store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend rejected or failed the query.
    #[error("backend failure: {message}")]
    Backend { message: String },

    /// A stored row could not be decoded into an entry.
    #[error("corrupt row: {message}")]
    CorruptRow { message: String },
}

/// Malformed search query.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The query contained separators but no category terms.
    #[error("search query '{query}' contains no categories")]
    Empty { query: String },

    /// A category term contains a character the stores cannot match on.
    #[error("invalid category '{term}': {reason}")]
    InvalidTerm { term: String, reason: String },
}

/// Failures while hydrating stored entry bodies.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The body is not a well-formed Atom entry.
    #[error("failed to parse entry '{id}': {message}")]
    Parse { id: String, message: String },

    /// The body parsed but contained no entry element.
    #[error("entry '{id}' has no <entry> element")]
    MissingEntry { id: String },
}
