//! Error types for SDK collaborators

use thiserror::Error;

/// Failure fetching a page of a space hierarchy
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HierarchyError {
    /// The homeserver could not be reached or timed out
    #[error("Network error: {0}")]
    Network(String),

    /// The server refused the request (e.g. no access to the space)
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The response could not be understood
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl HierarchyError {
    /// Whether trying the same page again may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            HierarchyError::Network(_) => true,
            HierarchyError::Rejected { status, .. } => *status == 429 || *status >= 500,
            HierarchyError::InvalidResponse(_) => false,
        }
    }
}

/// Failure sending an event through the SDK
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SendError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not allowed to send {event_type} in this room")]
    Forbidden { event_type: String },
}
