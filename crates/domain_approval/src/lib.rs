//! Approval Domain
//!
//! This crate implements the decision core of the claim system: the ordered
//! validation rule set a claim must satisfy, the conservative auto-approval
//! eligibility test, reviewer recommendations, and the workflow operations
//! that drive a claim from Pending to Approved, Rejected, or Paid.
//!
//! Validation never short-circuits: every enabled rule runs so the caller
//! sees the full list of problems at once. Workflow operations never leak
//! errors; they return structured outcome values.

pub mod criteria;
pub mod engine;

pub use criteria::{
    Criterion, CriterionId, CriterionKind, RuleSet, RuleSetConfig,
    catalogue, qualifies_for_auto_approval,
};
pub use engine::{
    ApprovalDecision, ApprovalEngine, BulkApprovalOutcome, Recommendation, ValidationReport,
    WorkflowOutcome,
};
