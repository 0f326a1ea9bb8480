//! Port error type shared by all store abstractions
//!
//! Domain crates define their own port traits (claim store, lecturer store,
//! document store); every implementation reports failures through the
//! unified `StoreError` so engine boundaries can translate them into
//! structured outcome values without knowing the backing technology.

use std::fmt;
use thiserror::Error;

/// Error type for store (port) operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// The write conflicts with existing state (e.g. a stale status precondition)
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection { message: String },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl StoreError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        StoreError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        StoreError::Conflict {
            message: message.into(),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        StoreError::Connection {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        StoreError::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_not_found() {
        let error = StoreError::not_found("Claim", 999);
        assert!(error.is_not_found());
        assert!(error.to_string().contains("Claim"));
        assert!(error.to_string().contains("999"));
    }

    #[test]
    fn test_store_error_conflict() {
        let error = StoreError::conflict("claim no longer pending");
        assert!(!error.is_not_found());
        assert!(error.to_string().starts_with("Conflict"));
    }
}
