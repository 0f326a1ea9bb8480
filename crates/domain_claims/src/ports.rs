//! Store ports for the claims domain
//!
//! The approval engine and status tracker reach persistence only through
//! these traits. Adapters (in-memory for tests, a database in production)
//! implement them and report failures through [`StoreError`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, ClaimMonth, DocumentId, LecturerId, StoreError};

use crate::claim::{ClaimRecord, ClaimStatus};
use crate::document::SupportingDocument;
use crate::lecturer::Lecturer;

/// Claim persistence port
///
/// Reads return claims with their supporting documents loaded. Writes that
/// change status go through `update_if_status`, an atomic compare-on-status
/// update: of two racing terminal transitions, at most one wins.
#[async_trait]
pub trait ClaimStore: Send + Sync {
    /// Fetches a claim by id, documents included
    async fn get(&self, id: ClaimId) -> Result<ClaimRecord, StoreError>;

    /// All claims for a lecturer, newest submission first
    async fn find_by_lecturer(&self, lecturer_id: LecturerId)
        -> Result<Vec<ClaimRecord>, StoreError>;

    /// All Pending claims, oldest submission first
    async fn find_pending(&self) -> Result<Vec<ClaimRecord>, StoreError>;

    /// Every claim in the store
    async fn find_all(&self) -> Result<Vec<ClaimRecord>, StoreError>;

    /// Inserts a new claim, returning it with its assigned identifier
    async fn insert(&self, claim: ClaimRecord) -> Result<ClaimRecord, StoreError>;

    /// Writes the claim if and only if its stored status is `expected`
    ///
    /// Fails with a Conflict error when another writer got there first.
    async fn update_if_status(
        &self,
        claim: &ClaimRecord,
        expected: ClaimStatus,
    ) -> Result<(), StoreError>;

    /// Whether another non-Rejected claim exists for the lecturer and month
    async fn month_taken(
        &self,
        lecturer_id: LecturerId,
        month: ClaimMonth,
        excluding: ClaimId,
    ) -> Result<bool, StoreError>;
}

/// Lecturer lookup port
#[async_trait]
pub trait LecturerStore: Send + Sync {
    async fn get(&self, id: LecturerId) -> Result<Lecturer, StoreError>;
}

/// Supporting-document metadata port
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Whether any document exists for the claim
    async fn any_for_claim(&self, claim_id: ClaimId) -> Result<bool, StoreError>;

    /// All documents attached to the claim
    async fn find_by_claim(&self, claim_id: ClaimId)
        -> Result<Vec<SupportingDocument>, StoreError>;

    /// Inserts document metadata, returning it with its assigned identifier
    async fn insert(&self, document: SupportingDocument)
        -> Result<SupportingDocument, StoreError>;

    /// Removes document metadata
    async fn delete(&self, id: DocumentId) -> Result<(), StoreError>;
}

/// Event emitted when a claim's status changes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusNotification {
    pub claim_id: ClaimId,
    pub status: ClaimStatus,
    pub message: String,
}

/// Fire-and-forget notification port; no delivery guarantee
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, notification: StatusNotification);
}
