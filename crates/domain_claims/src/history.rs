//! Status history view

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::ClaimId;

use crate::claim::ClaimStatus;

/// One entry in a claim's chronological status history
///
/// Entries are append-only: once produced they are never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub claim_id: ClaimId,
    pub status: ClaimStatus,
    pub updated_by: String,
    pub updated_at: DateTime<Utc>,
    pub notes: Option<String>,
}
