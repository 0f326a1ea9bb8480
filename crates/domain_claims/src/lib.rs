//! Contract Monthly Claims Domain
//!
//! This crate owns the claim aggregate and the entities around it: the
//! lecturer submitting claims, supporting document metadata, and the status
//! history view. It also defines the port traits the approval engine and
//! status tracker use to reach the backing store.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Pending -> Approved -> Paid
//!         -> Rejected
//! ```
//!
//! All status mutation goes through [`ClaimRecord::apply_transition`], so
//! audit fields (approval date, approver, rejection reason) are stamped
//! identically no matter which service drives the change.

pub mod claim;
pub mod lecturer;
pub mod document;
pub mod history;
pub mod ports;
pub mod error;

pub use claim::{ClaimRecord, ClaimStatus, Transition, NO_REASON_PROVIDED};
pub use lecturer::Lecturer;
pub use document::{SupportingDocument, DocumentPolicy};
pub use history::StatusHistoryEntry;
pub use ports::{ClaimStore, LecturerStore, DocumentStore, NotificationSink, StatusNotification};
pub use error::ClaimError;
