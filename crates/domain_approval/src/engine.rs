//! Approval workflow engine
//!
//! Orchestrates rule-set validation, auto-approval eligibility, reviewer
//! recommendations, and the claim state machine. Every operation returns a
//! structured outcome; store failures are caught at the boundary, logged,
//! and reported as failed outcomes rather than propagated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, warn};

use core_kernel::{ClaimId, Clock};
use domain_claims::{
    ClaimError, ClaimRecord, ClaimStatus, ClaimStore, DocumentStore, LecturerStore, Transition,
};

use crate::criteria::{
    qualifies_for_auto_approval, CriterionId, CriterionKind, RuleSet,
    DOCUMENT_REQUIRED_ABOVE, HIGH_HOURS_ABOVE, MANAGER_REVIEW_ABOVE,
};

const PROCESSING_ERROR: &str = "An error occurred while processing the approval";
const STATUS_UPDATE_ERROR: &str = "An error occurred while updating the claim status";

/// Advisory guidance for a human reviewer; never itself a state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Reject,
    AutoApprove,
    ManagerReviewHighValue,
    CoordinatorReviewNoDocuments,
    CoordinatorReviewHighHours,
    CoordinatorReviewStandard,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Recommendation::Reject => "REJECT - Validation errors found",
            Recommendation::AutoApprove => "AUTO-APPROVE - Meets all auto-approval criteria",
            Recommendation::ManagerReviewHighValue => "MANAGER REVIEW - High value claim",
            Recommendation::CoordinatorReviewNoDocuments => {
                "COORDINATOR REVIEW - No supporting documents"
            }
            Recommendation::CoordinatorReviewHighHours => {
                "COORDINATOR REVIEW - High hours worked"
            }
            Recommendation::CoordinatorReviewStandard => "COORDINATOR REVIEW - Standard claim",
        };
        write!(f, "{}", text)
    }
}

/// Result of validating a claim against the rule set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Valid iff no enabled criterion is violated
    pub is_valid: bool,
    /// Every violated criterion's error message, in catalogue order
    pub violations: Vec<String>,
    pub can_auto_approve: bool,
    pub recommendation: Recommendation,
}

/// Outcome of a workflow operation (approve, reject, mark-paid)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowOutcome {
    pub success: bool,
    pub message: String,
    pub new_status: Option<ClaimStatus>,
}

impl WorkflowOutcome {
    fn succeeded(message: impl Into<String>, new_status: ClaimStatus) -> Self {
        Self {
            success: true,
            message: message.into(),
            new_status: Some(new_status),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            new_status: None,
        }
    }
}

/// Outcome of a bulk auto-approval sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkApprovalOutcome {
    pub approved: usize,
    pub message: String,
}

/// Caller's decision for [`ApprovalEngine::process_approval`]
#[derive(Debug, Clone)]
pub enum ApprovalDecision {
    Approve,
    Reject { reason: Option<String> },
}

/// The claim approval engine
///
/// Holds the store ports and the active rule set. Transitions are
/// read-modify-write with a status precondition at the store, so of two
/// racing decisions on the same claim at most one wins.
pub struct ApprovalEngine {
    claims: Arc<dyn ClaimStore>,
    lecturers: Arc<dyn LecturerStore>,
    documents: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
    rules: RuleSet,
}

impl ApprovalEngine {
    pub fn new(
        claims: Arc<dyn ClaimStore>,
        lecturers: Arc<dyn LecturerStore>,
        documents: Arc<dyn DocumentStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            claims,
            lecturers,
            documents,
            clock,
            rules: RuleSet::all_enabled(),
        }
    }

    /// Replaces the active rule set
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Validates a claim against every enabled criterion
    ///
    /// All enabled rules run; there is no short-circuit, so the report
    /// carries the full list of violations at once. A lookup rule whose
    /// store call fails contributes no violation; the failure is logged and
    /// the remaining rules proceed.
    pub async fn validate(&self, claim: &ClaimRecord) -> ValidationReport {
        let mut violations = Vec::new();

        for criterion in self.rules.enabled_criteria() {
            let passed = match criterion.kind {
                CriterionKind::Pure(predicate) => predicate(claim),
                CriterionKind::Lookup => self.check_lookup(criterion.id, claim).await,
            };
            if !passed {
                violations.push(criterion.error_message.to_string());
            }
        }

        let is_valid = violations.is_empty();
        let can_auto_approve = qualifies_for_auto_approval(claim);
        let recommendation = recommend(claim, is_valid, can_auto_approve);

        ValidationReport {
            is_valid,
            violations,
            can_auto_approve,
            recommendation,
        }
    }

    /// Auto-approves a claim if and only if it meets the eligibility test
    ///
    /// Re-validates, stamps `Auto-Approved by {actor}`, and persists.
    /// Returns whether the approval went through; any failure is logged and
    /// surfaces as `false`, never as an error.
    pub async fn auto_approve(&self, claim: &ClaimRecord, actor: &str) -> bool {
        let report = self.validate(claim).await;
        if !report.can_auto_approve {
            return false;
        }

        let transition = Transition::Approve {
            actor: format!("Auto-Approved by {}", actor),
        };
        let mut updated = claim.clone();
        if let Err(e) = updated.apply_transition(&transition, self.clock.now()) {
            error!(claim_id = %claim.id, error = %e, "auto-approval transition refused");
            return false;
        }

        match self
            .claims
            .update_if_status(&updated, ClaimStatus::Pending)
            .await
        {
            Ok(()) => {
                info!(claim_id = %claim.id, approved_by = actor, "claim auto-approved");
                true
            }
            Err(e) => {
                error!(claim_id = %claim.id, error = %e, "error auto-approving claim");
                false
            }
        }
    }

    /// Processes a human approve/reject decision for a claim
    ///
    /// Approvals are refused while validation violations are outstanding.
    /// Approve and reject both require the claim to be Pending; terminal
    /// states are never overwritten.
    pub async fn process_approval(
        &self,
        claim_id: ClaimId,
        actor: &str,
        decision: ApprovalDecision,
    ) -> WorkflowOutcome {
        match self.try_process_approval(claim_id, actor, decision).await {
            Ok(outcome) => outcome,
            Err(e) => failure_outcome(claim_id, e, PROCESSING_ERROR),
        }
    }

    async fn try_process_approval(
        &self,
        claim_id: ClaimId,
        actor: &str,
        decision: ApprovalDecision,
    ) -> Result<WorkflowOutcome, ClaimError> {
        let claim = self
            .claims
            .get(claim_id)
            .await
            .map_err(ClaimError::from_lookup)?;
        let report = self.validate(&claim).await;
        let now = self.clock.now();

        let mut updated = claim.clone();
        let outcome = match decision {
            ApprovalDecision::Approve => {
                if !report.is_valid && !report.violations.is_empty() {
                    return Ok(WorkflowOutcome::failed(format!(
                        "Cannot approve claim with validation errors: {}",
                        report.violations.join(", ")
                    )));
                }

                updated.apply_transition(
                    &Transition::Approve {
                        actor: actor.to_string(),
                    },
                    now,
                )?;
                let message = if report.can_auto_approve {
                    "Claim auto-approved successfully"
                } else {
                    "Claim manually approved successfully"
                };
                WorkflowOutcome::succeeded(message, ClaimStatus::Approved)
            }
            ApprovalDecision::Reject { reason } => {
                updated.apply_transition(
                    &Transition::Reject {
                        actor: actor.to_string(),
                        reason,
                    },
                    now,
                )?;
                WorkflowOutcome::succeeded("Claim rejected successfully", ClaimStatus::Rejected)
            }
        };

        self.claims
            .update_if_status(&updated, ClaimStatus::Pending)
            .await?;

        info!(
            claim_id = %claim_id,
            action = %updated.status,
            actor = actor,
            "approval decision processed"
        );
        Ok(outcome)
    }

    /// Marks an Approved claim as paid
    pub async fn mark_paid(&self, claim_id: ClaimId, actor: &str) -> WorkflowOutcome {
        match self.try_mark_paid(claim_id, actor).await {
            Ok(outcome) => outcome,
            Err(e) => failure_outcome(claim_id, e, STATUS_UPDATE_ERROR),
        }
    }

    async fn try_mark_paid(
        &self,
        claim_id: ClaimId,
        actor: &str,
    ) -> Result<WorkflowOutcome, ClaimError> {
        let claim = self
            .claims
            .get(claim_id)
            .await
            .map_err(ClaimError::from_lookup)?;

        let mut updated = claim.clone();
        updated.apply_transition(
            &Transition::MarkPaid {
                actor: actor.to_string(),
            },
            self.clock.now(),
        )?;

        self.claims
            .update_if_status(&updated, ClaimStatus::Approved)
            .await?;

        info!(claim_id = %claim_id, actor = actor, "claim marked as paid");
        Ok(WorkflowOutcome::succeeded(
            "Claim marked as paid",
            ClaimStatus::Paid,
        ))
    }

    /// Pending claims that meet the auto-approval eligibility test
    pub async fn auto_approval_candidates(&self) -> Result<Vec<ClaimRecord>, ClaimError> {
        let pending = self.claims.find_pending().await?;
        Ok(pending
            .into_iter()
            .filter(|claim| qualifies_for_auto_approval(claim))
            .collect())
    }

    /// Auto-approves every eligible Pending claim
    ///
    /// Candidates are processed sequentially; each approval re-validates
    /// against committed store state, never against earlier members of the
    /// same batch.
    pub async fn auto_approve_all(&self, actor: &str) -> BulkApprovalOutcome {
        let candidates = match self.auto_approval_candidates().await {
            Ok(candidates) => candidates,
            Err(e) => {
                error!(error = %e, "error listing auto-approval candidates");
                return BulkApprovalOutcome {
                    approved: 0,
                    message: PROCESSING_ERROR.to_string(),
                };
            }
        };

        if candidates.is_empty() {
            return BulkApprovalOutcome {
                approved: 0,
                message: "No claims met the auto-approval criteria".to_string(),
            };
        }

        let mut approved = 0;
        for claim in &candidates {
            if self.auto_approve(claim, actor).await {
                approved += 1;
            }
        }

        BulkApprovalOutcome {
            approved,
            message: format!("{} claim(s) auto-approved", approved),
        }
    }

    async fn check_lookup(&self, id: CriterionId, claim: &ClaimRecord) -> bool {
        let result: Result<bool, core_kernel::StoreError> = match id {
            CriterionId::DuplicateMonthPrevention => self
                .claims
                .month_taken(claim.lecturer_id, claim.claim_month, claim.id)
                .await
                .map(|taken| !taken),
            CriterionId::SupportingDocuments => {
                if claim.total_amount().amount() <= DOCUMENT_REQUIRED_ABOVE {
                    Ok(true)
                } else {
                    self.documents.any_for_claim(claim.id).await
                }
            }
            CriterionId::LecturerActive => match self.lecturers.get(claim.lecturer_id).await {
                Ok(lecturer) => Ok(lecturer.is_active),
                Err(e) if e.is_not_found() => Ok(false),
                Err(e) => Err(e),
            },
            // Pure criteria never reach this path
            _ => Ok(true),
        };

        match result {
            Ok(passed) => passed,
            Err(e) => {
                // A failed lookup aborts only this rule; it contributes no
                // violation and the remaining rules proceed.
                warn!(claim_id = %claim.id, criterion = ?id, error = %e, "lookup rule aborted");
                true
            }
        }
    }
}

/// Computes the reviewer recommendation by priority order; first match wins
fn recommend(claim: &ClaimRecord, is_valid: bool, can_auto_approve: bool) -> Recommendation {
    if !is_valid {
        return Recommendation::Reject;
    }
    if can_auto_approve {
        return Recommendation::AutoApprove;
    }
    if claim.total_amount().amount() > MANAGER_REVIEW_ABOVE {
        return Recommendation::ManagerReviewHighValue;
    }
    if !claim.has_documents() {
        return Recommendation::CoordinatorReviewNoDocuments;
    }
    if claim.hours_worked > HIGH_HOURS_ABOVE {
        return Recommendation::CoordinatorReviewHighHours;
    }
    Recommendation::CoordinatorReviewStandard
}

fn failure_outcome(claim_id: ClaimId, error: ClaimError, store_message: &str) -> WorkflowOutcome {
    match error {
        ClaimError::NotFound => WorkflowOutcome::failed("Claim not found"),
        ClaimError::InvalidTransition { from, to } => {
            let message = match to {
                ClaimStatus::Paid => "Claim is not approved for payment",
                _ => "Claim is not pending approval",
            };
            warn!(claim_id = %claim_id, %from, %to, "invalid transition refused");
            WorkflowOutcome::failed(message)
        }
        e => {
            error!(claim_id = %claim_id, error = %e, "workflow operation failed");
            WorkflowOutcome::failed(store_message)
        }
    }
}
