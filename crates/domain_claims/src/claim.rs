//! Claim aggregate

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{ClaimId, ClaimMonth, LecturerId, Money};

use crate::document::SupportingDocument;
use crate::error::ClaimError;

/// Maximum hours accepted at submission time.
///
/// This is deliberately tighter than the approval-side HoursLimit rule (200):
/// submission caps a single month at 176 contract hours, while the approval
/// rule set bounds whatever is already in the store.
pub const SUBMISSION_MAX_HOURS: Decimal = dec!(176);

/// Rejection reason recorded when the approver gives none
pub const NO_REASON_PROVIDED: &str = "No reason provided";

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// Submitted, awaiting a decision
    Pending,
    /// Approved for payment
    Approved,
    /// Rejected with a reason
    Rejected,
    /// Paid out by HR
    Paid,
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ClaimStatus::Pending => "Pending",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
            ClaimStatus::Paid => "Paid",
        };
        write!(f, "{}", s)
    }
}

/// A status transition with its audit fields
///
/// Both the approval engine and the status tracker drive claims through this
/// single primitive, so approval date, approver, and rejection reason carry
/// identical semantics regardless of entry point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Transition {
    Approve { actor: String },
    Reject { actor: String, reason: Option<String> },
    MarkPaid { actor: String },
}

impl Transition {
    /// The status this transition moves a claim into
    pub fn target_status(&self) -> ClaimStatus {
        match self {
            Transition::Approve { .. } => ClaimStatus::Approved,
            Transition::Reject { .. } => ClaimStatus::Rejected,
            Transition::MarkPaid { .. } => ClaimStatus::Paid,
        }
    }

    /// Builds the transition that moves a claim into `target`, if one exists
    ///
    /// There is no transition into Pending; claims are born there.
    pub fn into_status(target: ClaimStatus, actor: String, notes: Option<String>) -> Option<Self> {
        match target {
            ClaimStatus::Approved => Some(Transition::Approve { actor }),
            ClaimStatus::Rejected => Some(Transition::Reject {
                actor,
                reason: notes,
            }),
            ClaimStatus::Paid => Some(Transition::MarkPaid { actor }),
            ClaimStatus::Pending => None,
        }
    }
}

/// A lecturer's monthly hours/rate claim
///
/// The total amount is never stored; it is always recomputed from hours and
/// rate so the two can never drift apart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimRecord {
    /// Store-assigned identifier
    pub id: ClaimId,
    /// Submitting lecturer (not owned; activity is checked live at evaluation)
    pub lecturer_id: LecturerId,
    /// Month the claim is for; unique per lecturer among non-rejected claims
    pub claim_month: ClaimMonth,
    /// Hours worked in the month
    pub hours_worked: Decimal,
    /// Hourly rate in Rand
    pub hourly_rate: Money,
    /// Status
    pub status: ClaimStatus,
    /// Set once at creation, immutable thereafter
    pub submission_date: DateTime<Utc>,
    /// Stamped on approve/reject
    pub approval_date: Option<DateTime<Utc>>,
    /// Who approved or rejected
    pub approved_by: Option<String>,
    /// Set only on rejection
    pub rejection_reason: Option<String>,
    /// Stamped on mark-paid
    pub processed_date: Option<DateTime<Utc>>,
    /// Who marked the claim paid
    pub processed_by: Option<String>,
    /// Owned document metadata, cascade-deleted with the claim
    pub documents: Vec<SupportingDocument>,
}

impl ClaimRecord {
    /// Creates a new Pending claim, applying submission-time guards
    ///
    /// The store assigns the real identifier on insert.
    pub fn submit(
        lecturer_id: LecturerId,
        claim_month: ClaimMonth,
        hours_worked: Decimal,
        hourly_rate: Money,
        now: DateTime<Utc>,
    ) -> Result<Self, ClaimError> {
        if hours_worked <= Decimal::ZERO || hours_worked > SUBMISSION_MAX_HOURS {
            return Err(ClaimError::Validation(
                "Maximum 176 hours per month allowed".to_string(),
            ));
        }
        if hourly_rate.amount() < dec!(100) || hourly_rate.amount() > dec!(1000) {
            return Err(ClaimError::Validation(
                "Hourly rate must be between R100 and R1000".to_string(),
            ));
        }

        Ok(Self {
            id: ClaimId::new(0),
            lecturer_id,
            claim_month,
            hours_worked,
            hourly_rate,
            status: ClaimStatus::Pending,
            submission_date: now,
            approval_date: None,
            approved_by: None,
            rejection_reason: None,
            processed_date: None,
            processed_by: None,
            documents: Vec::new(),
        })
    }

    /// Total claim amount, a pure function of hours and rate
    pub fn total_amount(&self) -> Money {
        self.hourly_rate * self.hours_worked
    }

    /// Whether any supporting document is attached
    pub fn has_documents(&self) -> bool {
        !self.documents.is_empty()
    }

    /// Whole days elapsed since submission
    pub fn days_since_submission(&self, now: DateTime<Utc>) -> i64 {
        (now - self.submission_date).num_days()
    }

    /// Applies a transition, stamping its audit fields
    ///
    /// Returns the previous status. Fails with `InvalidTransition` if the
    /// claim is not in the transition's source state; terminal states are
    /// never silently overwritten.
    pub fn apply_transition(
        &mut self,
        transition: &Transition,
        now: DateTime<Utc>,
    ) -> Result<ClaimStatus, ClaimError> {
        let target = transition.target_status();
        if !self.can_transition_to(target) {
            return Err(ClaimError::InvalidTransition {
                from: self.status,
                to: target,
            });
        }

        let previous = self.status;
        match transition {
            Transition::Approve { actor } => {
                self.status = ClaimStatus::Approved;
                self.approval_date = Some(now);
                self.approved_by = Some(actor.clone());
                self.rejection_reason = None;
            }
            Transition::Reject { actor, reason } => {
                self.status = ClaimStatus::Rejected;
                self.approval_date = Some(now);
                self.approved_by = Some(actor.clone());
                self.rejection_reason = Some(
                    reason
                        .clone()
                        .unwrap_or_else(|| NO_REASON_PROVIDED.to_string()),
                );
            }
            Transition::MarkPaid { actor } => {
                self.status = ClaimStatus::Paid;
                self.processed_date = Some(now);
                self.processed_by = Some(actor.clone());
            }
        }
        Ok(previous)
    }

    /// Checks if transition is valid
    fn can_transition_to(&self, target: ClaimStatus) -> bool {
        use ClaimStatus::*;
        matches!(
            (self.status, target),
            (Pending, Approved) | (Pending, Rejected) | (Approved, Paid)
        )
    }
}
