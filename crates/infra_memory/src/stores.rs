//! In-memory claim, lecturer, and document stores

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use core_kernel::{ClaimId, ClaimMonth, DocumentId, LecturerId, StoreError};
use domain_claims::{
    ClaimRecord, ClaimStatus, ClaimStore, DocumentStore, Lecturer, LecturerStore,
    SupportingDocument,
};

/// In-memory claim store
///
/// A single async RwLock serializes writers, and `update_if_status` checks
/// its precondition under the write lock, so each transition is an atomic
/// read-modify-write: of two racing terminal transitions, exactly one wins
/// and the loser gets a Conflict error.
#[derive(Default)]
pub struct MemoryClaimStore {
    claims: RwLock<HashMap<ClaimId, ClaimRecord>>,
    next_id: AtomicI64,
}

impl MemoryClaimStore {
    pub fn new() -> Self {
        Self {
            claims: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn assign_id(&self) -> ClaimId {
        ClaimId::new(self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait]
impl ClaimStore for MemoryClaimStore {
    async fn get(&self, id: ClaimId) -> Result<ClaimRecord, StoreError> {
        self.claims
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Claim", id))
    }

    async fn find_by_lecturer(
        &self,
        lecturer_id: LecturerId,
    ) -> Result<Vec<ClaimRecord>, StoreError> {
        let mut claims: Vec<ClaimRecord> = self
            .claims
            .read()
            .await
            .values()
            .filter(|c| c.lecturer_id == lecturer_id)
            .cloned()
            .collect();
        claims.sort_by_key(|c| std::cmp::Reverse(c.submission_date));
        Ok(claims)
    }

    async fn find_pending(&self) -> Result<Vec<ClaimRecord>, StoreError> {
        let mut claims: Vec<ClaimRecord> = self
            .claims
            .read()
            .await
            .values()
            .filter(|c| c.status == ClaimStatus::Pending)
            .cloned()
            .collect();
        claims.sort_by_key(|c| c.submission_date);
        Ok(claims)
    }

    async fn find_all(&self) -> Result<Vec<ClaimRecord>, StoreError> {
        let mut claims: Vec<ClaimRecord> = self.claims.read().await.values().cloned().collect();
        claims.sort_by_key(|c| c.id);
        Ok(claims)
    }

    async fn insert(&self, mut claim: ClaimRecord) -> Result<ClaimRecord, StoreError> {
        if claim.id.value() == 0 {
            claim.id = self.assign_id();
            for document in &mut claim.documents {
                document.claim_id = claim.id;
            }
        }
        let mut claims = self.claims.write().await;
        claims.insert(claim.id, claim.clone());
        Ok(claim)
    }

    async fn update_if_status(
        &self,
        claim: &ClaimRecord,
        expected: ClaimStatus,
    ) -> Result<(), StoreError> {
        let mut claims = self.claims.write().await;
        let stored = claims
            .get_mut(&claim.id)
            .ok_or_else(|| StoreError::not_found("Claim", claim.id))?;
        if stored.status != expected {
            return Err(StoreError::conflict(format!(
                "claim {} is {} and not {}",
                claim.id, stored.status, expected
            )));
        }
        *stored = claim.clone();
        Ok(())
    }

    async fn month_taken(
        &self,
        lecturer_id: LecturerId,
        month: ClaimMonth,
        excluding: ClaimId,
    ) -> Result<bool, StoreError> {
        Ok(self.claims.read().await.values().any(|c| {
            c.lecturer_id == lecturer_id
                && c.claim_month == month
                && c.id != excluding
                && c.status != ClaimStatus::Rejected
        }))
    }
}

/// In-memory lecturer store
#[derive(Default)]
pub struct MemoryLecturerStore {
    lecturers: RwLock<HashMap<LecturerId, Lecturer>>,
}

impl MemoryLecturerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, lecturer: Lecturer) {
        self.lecturers
            .write()
            .await
            .insert(lecturer.id, lecturer);
    }
}

#[async_trait]
impl LecturerStore for MemoryLecturerStore {
    async fn get(&self, id: LecturerId) -> Result<Lecturer, StoreError> {
        self.lecturers
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Lecturer", id))
    }
}

/// In-memory supporting-document metadata store
#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<HashMap<DocumentId, SupportingDocument>>,
    next_id: AtomicI64,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn any_for_claim(&self, claim_id: ClaimId) -> Result<bool, StoreError> {
        Ok(self
            .documents
            .read()
            .await
            .values()
            .any(|d| d.claim_id == claim_id))
    }

    async fn find_by_claim(
        &self,
        claim_id: ClaimId,
    ) -> Result<Vec<SupportingDocument>, StoreError> {
        let mut documents: Vec<SupportingDocument> = self
            .documents
            .read()
            .await
            .values()
            .filter(|d| d.claim_id == claim_id)
            .cloned()
            .collect();
        documents.sort_by_key(|d| d.id);
        Ok(documents)
    }

    async fn insert(
        &self,
        mut document: SupportingDocument,
    ) -> Result<SupportingDocument, StoreError> {
        if document.id.value() == 0 {
            document.id = DocumentId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        }
        self.documents
            .write()
            .await
            .insert(document.id, document.clone());
        Ok(document)
    }

    async fn delete(&self, id: DocumentId) -> Result<(), StoreError> {
        self.documents
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("SupportingDocument", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use core_kernel::Money;
    use rust_decimal_macros::dec;

    fn submitted_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
    }

    fn claim_for(lecturer: i64, month: &str) -> ClaimRecord {
        ClaimRecord::submit(
            LecturerId::new(lecturer),
            month.parse().unwrap(),
            dec!(40),
            Money::zar(dec!(200)),
            submitted_at(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = MemoryClaimStore::new();

        let first = store.insert(claim_for(1, "2025-01")).await.unwrap();
        let second = store.insert(claim_for(1, "2025-02")).await.unwrap();

        assert_eq!(first.id, ClaimId::new(1));
        assert_eq!(second.id, ClaimId::new(2));
        assert_eq!(store.get(first.id).await.unwrap().claim_month, first.claim_month);
    }

    #[tokio::test]
    async fn test_update_if_status_lets_one_racing_writer_win() {
        let store = MemoryClaimStore::new();
        let claim = store.insert(claim_for(1, "2025-01")).await.unwrap();

        // Two writers read the same Pending claim
        let mut approved = claim.clone();
        approved.status = ClaimStatus::Approved;
        let mut rejected = claim.clone();
        rejected.status = ClaimStatus::Rejected;

        store
            .update_if_status(&approved, ClaimStatus::Pending)
            .await
            .unwrap();
        let second = store.update_if_status(&rejected, ClaimStatus::Pending).await;

        assert!(matches!(second, Err(StoreError::Conflict { .. })));
        assert_eq!(store.get(claim.id).await.unwrap().status, ClaimStatus::Approved);
    }

    #[tokio::test]
    async fn test_month_taken_skips_rejected_and_self() {
        let store = MemoryClaimStore::new();
        let mut rejected = claim_for(1, "2025-01");
        rejected.status = ClaimStatus::Rejected;
        store.insert(rejected).await.unwrap();
        let pending = store.insert(claim_for(1, "2025-01")).await.unwrap();

        let month = pending.claim_month;
        // The rejected sibling does not count, and a claim never blocks itself
        assert!(!store
            .month_taken(pending.lecturer_id, month, pending.id)
            .await
            .unwrap());
        // A different claim for the same lecturer and month does
        assert!(store
            .month_taken(pending.lecturer_id, month, ClaimId::new(0))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_find_pending_returns_oldest_first() {
        let store = MemoryClaimStore::new();
        let mut late = claim_for(1, "2025-02");
        late.submission_date = submitted_at() + chrono::Duration::days(5);
        let late = store.insert(late).await.unwrap();
        let early = store.insert(claim_for(1, "2025-01")).await.unwrap();

        let pending = store.find_pending().await.unwrap();

        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].id, early.id);
        assert_eq!(pending[1].id, late.id);
    }

    #[tokio::test]
    async fn test_document_store_round_trip() {
        let store = MemoryDocumentStore::new();
        let claim_id = ClaimId::new(7);
        assert!(!store.any_for_claim(claim_id).await.unwrap());

        let document = store
            .insert(SupportingDocument {
                id: DocumentId::new(0),
                claim_id,
                file_name: "timesheet.pdf".to_string(),
                stored_name: "7_20250310090000.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                size_bytes: 64 * 1024,
                uploaded_at: submitted_at(),
            })
            .await
            .unwrap();

        assert_eq!(document.id, DocumentId::new(1));
        assert!(store.any_for_claim(claim_id).await.unwrap());
        assert_eq!(store.find_by_claim(claim_id).await.unwrap().len(), 1);

        store.delete(document.id).await.unwrap();
        assert!(!store.any_for_claim(claim_id).await.unwrap());
    }
}
