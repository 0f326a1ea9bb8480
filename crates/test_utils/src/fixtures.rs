//! Wired in-memory test environment

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

use core_kernel::FixedClock;
use domain_claims::{ClaimRecord, ClaimStore, DocumentStore, Lecturer};
use infra_memory::{MemoryClaimStore, MemoryDocumentStore, MemoryLecturerStore, RecordingSink};

/// The instant the environment's clock starts at
pub fn clock_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap()
}

/// In-memory stores, a fixed clock, and a recording notification sink
///
/// Engine and tracker suites construct their service under test from these
/// handles and seed state through the helpers below.
pub struct TestEnv {
    pub claims: Arc<MemoryClaimStore>,
    pub lecturers: Arc<MemoryLecturerStore>,
    pub documents: Arc<MemoryDocumentStore>,
    pub clock: Arc<FixedClock>,
    pub sink: Arc<RecordingSink>,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            claims: Arc::new(MemoryClaimStore::new()),
            lecturers: Arc::new(MemoryLecturerStore::new()),
            documents: Arc::new(MemoryDocumentStore::new()),
            clock: Arc::new(FixedClock::at(clock_start())),
            sink: Arc::new(RecordingSink::new()),
        }
    }

    pub async fn seed_lecturer(&self, lecturer: Lecturer) {
        self.lecturers.insert(lecturer).await;
    }

    /// Inserts a claim and mirrors its documents into the document store
    ///
    /// Returns the claim as stored, with identifiers assigned.
    pub async fn seed_claim(&self, claim: ClaimRecord) -> ClaimRecord {
        let status = claim.status;
        let mut stored = self.claims.insert(claim).await.expect("insert claim");

        if !stored.documents.is_empty() {
            let mut persisted = Vec::with_capacity(stored.documents.len());
            for document in stored.documents.drain(..) {
                persisted.push(
                    self.documents
                        .insert(document)
                        .await
                        .expect("insert document"),
                );
            }
            stored.documents = persisted;
            self.claims
                .update_if_status(&stored, status)
                .await
                .expect("sync documents");
        }

        stored
    }
}
