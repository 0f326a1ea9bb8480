//! Supporting document metadata and acceptance policy
//!
//! Only the accept/reject decision and the stored metadata live here; the
//! actual byte shuffling belongs to the file storage collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, DocumentId};

use crate::error::ClaimError;

const MAX_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx", "xlsx", "jpg", "png"];

/// Metadata for a file attached to a claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportingDocument {
    pub id: DocumentId,
    pub claim_id: ClaimId,
    /// Name as uploaded by the lecturer
    pub file_name: String,
    /// Name under which the file is stored
    pub stored_name: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub uploaded_at: DateTime<Utc>,
}

impl SupportingDocument {
    /// Accepts an upload, producing the metadata record to persist
    ///
    /// Fails with a validation error if the file breaks the policy; the
    /// store assigns the real identifier on insert.
    pub fn accept(
        claim_id: ClaimId,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        size_bytes: u64,
        now: DateTime<Utc>,
    ) -> Result<Self, ClaimError> {
        let file_name = file_name.into();
        let policy = DocumentPolicy::default();
        policy.check(&file_name, size_bytes)?;

        let extension = extension_of(&file_name).unwrap_or_default();
        let stored_name = format!(
            "{}_{}.{}",
            claim_id.value(),
            now.format("%Y%m%d%H%M%S"),
            extension
        );

        Ok(Self {
            id: DocumentId::new(0),
            claim_id,
            file_name,
            stored_name,
            content_type: content_type.into(),
            size_bytes,
            uploaded_at: now,
        })
    }
}

/// Upload acceptance policy: size ceiling and extension whitelist
#[derive(Debug, Clone)]
pub struct DocumentPolicy {
    pub max_size_bytes: u64,
    pub allowed_extensions: Vec<String>,
}

impl Default for DocumentPolicy {
    fn default() -> Self {
        Self {
            max_size_bytes: MAX_SIZE_BYTES,
            allowed_extensions: ALLOWED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl DocumentPolicy {
    /// Decides whether an upload is acceptable
    pub fn check(&self, file_name: &str, size_bytes: u64) -> Result<(), ClaimError> {
        if size_bytes > self.max_size_bytes {
            return Err(ClaimError::Validation(
                "File size must be less than 5MB".to_string(),
            ));
        }

        let allowed = extension_of(file_name)
            .map(|ext| self.allowed_extensions.iter().any(|a| a == &ext))
            .unwrap_or(false);
        if !allowed {
            return Err(ClaimError::Validation(
                "Only PDF, DOCX, XLSX, JPG, and PNG files are allowed".to_string(),
            ));
        }

        Ok(())
    }
}

fn extension_of(file_name: &str) -> Option<String> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}
