//! Claims domain errors

use thiserror::Error;

use core_kernel::StoreError;

use crate::claim::ClaimStatus;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Claim not found")]
    NotFound,

    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: ClaimStatus, to: ClaimStatus },

    #[error("{0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ClaimError {
    /// Maps a store lookup failure: NotFound becomes the domain's fixed
    /// "Claim not found", anything else is carried as a store error.
    pub fn from_lookup(error: StoreError) -> Self {
        if error.is_not_found() {
            ClaimError::NotFound
        } else {
            ClaimError::Store(error)
        }
    }
}
