//! Validation criteria catalogue
//!
//! The catalogue is a static table of named criteria with stable
//! identifiers. Pure criteria are plain predicates over the claim; lookup
//! criteria are tagged so the engine knows they need store access. Criteria
//! can be toggled off individually through [`RuleSetConfig`]; a disabled
//! criterion is skipped entirely and never contributes a violation.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use domain_claims::ClaimRecord;

// General validation bounds.
pub const MIN_HOURS: Decimal = dec!(1);
pub const MAX_HOURS: Decimal = dec!(200);
pub const MIN_RATE: Decimal = dec!(100);
pub const MAX_RATE: Decimal = dec!(1000);
pub const MAX_TOTAL_AMOUNT: Decimal = dec!(50000);
/// Claims above this total require at least one supporting document.
pub const DOCUMENT_REQUIRED_ABOVE: Decimal = dec!(10000);

// Auto-approval is a conservative sub-range of the general bounds.
pub const AUTO_APPROVE_MAX_TOTAL: Decimal = dec!(5000);
pub const AUTO_APPROVE_MAX_HOURS: Decimal = dec!(80);
pub const AUTO_APPROVE_MIN_RATE: Decimal = dec!(100);
pub const AUTO_APPROVE_MAX_RATE: Decimal = dec!(500);

// Recommendation thresholds.
pub const MANAGER_REVIEW_ABOVE: Decimal = dec!(20000);
pub const HIGH_HOURS_ABOVE: Decimal = dec!(100);

/// Stable identifier for a validation criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CriterionId {
    HoursLimit,
    RateLimit,
    TotalAmountLimit,
    DuplicateMonthPrevention,
    SupportingDocuments,
    LecturerActive,
}

/// How a criterion is evaluated
#[derive(Clone, Copy)]
pub enum CriterionKind {
    /// Stateless predicate over the claim; must not perform I/O
    Pure(fn(&ClaimRecord) -> bool),
    /// Needs sibling-claim / document / lecturer lookups; the engine
    /// dispatches these against the stores
    Lookup,
}

/// One named, independently toggleable validation criterion
pub struct Criterion {
    pub id: CriterionId,
    pub description: &'static str,
    pub error_message: &'static str,
    pub kind: CriterionKind,
}

fn hours_within_limit(claim: &ClaimRecord) -> bool {
    claim.hours_worked >= MIN_HOURS && claim.hours_worked <= MAX_HOURS
}

fn rate_within_limit(claim: &ClaimRecord) -> bool {
    let rate = claim.hourly_rate.amount();
    rate >= MIN_RATE && rate <= MAX_RATE
}

fn total_within_limit(claim: &ClaimRecord) -> bool {
    claim.total_amount().amount() <= MAX_TOTAL_AMOUNT
}

static CATALOGUE: &[Criterion] = &[
    Criterion {
        id: CriterionId::HoursLimit,
        description: "Hours worked must be between 1 and 200",
        error_message: "Hours worked must be between 1 and 200",
        kind: CriterionKind::Pure(hours_within_limit),
    },
    Criterion {
        id: CriterionId::RateLimit,
        description: "Hourly rate must be between R100 and R1000",
        error_message: "Hourly rate must be between R100 and R1000",
        kind: CriterionKind::Pure(rate_within_limit),
    },
    Criterion {
        id: CriterionId::TotalAmountLimit,
        description: "Total amount must not exceed R50,000",
        error_message: "Total amount exceeds maximum limit of R50,000",
        kind: CriterionKind::Pure(total_within_limit),
    },
    Criterion {
        id: CriterionId::DuplicateMonthPrevention,
        description: "No duplicate claims for the same month",
        error_message: "A claim already exists for this month",
        kind: CriterionKind::Lookup,
    },
    Criterion {
        id: CriterionId::SupportingDocuments,
        description: "Claims over R10,000 require supporting documents",
        error_message: "Claims over R10,000 require supporting documents",
        kind: CriterionKind::Lookup,
    },
    Criterion {
        id: CriterionId::LecturerActive,
        description: "Lecturer must be active",
        error_message: "Lecturer account is not active",
        kind: CriterionKind::Lookup,
    },
];

/// The ordered criteria catalogue
pub fn catalogue() -> &'static [Criterion] {
    CATALOGUE
}

/// Auto-approval eligibility: a strict subset of general validity
///
/// Total at most R5,000, at least one supporting document, hours within the
/// normal range (1-80), and rate within the normal range (100-500).
pub fn qualifies_for_auto_approval(claim: &ClaimRecord) -> bool {
    let rate = claim.hourly_rate.amount();
    claim.total_amount().amount() <= AUTO_APPROVE_MAX_TOTAL
        && claim.has_documents()
        && claim.hours_worked >= MIN_HOURS
        && claim.hours_worked <= AUTO_APPROVE_MAX_HOURS
        && rate >= AUTO_APPROVE_MIN_RATE
        && rate <= AUTO_APPROVE_MAX_RATE
}

/// Configuration document for criterion toggles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSetConfig {
    /// Criteria to disable; everything else stays enabled
    #[serde(default)]
    pub disabled: Vec<CriterionId>,
}

/// The active rule set: the catalogue minus any disabled criteria
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    disabled: HashSet<CriterionId>,
}

impl RuleSet {
    /// All criteria enabled
    pub fn all_enabled() -> Self {
        Self::default()
    }

    pub fn from_config(config: &RuleSetConfig) -> Self {
        Self {
            disabled: config.disabled.iter().copied().collect(),
        }
    }

    pub fn is_enabled(&self, id: CriterionId) -> bool {
        !self.disabled.contains(&id)
    }

    /// The enabled criteria, in catalogue order
    pub fn enabled_criteria(&self) -> impl Iterator<Item = &'static Criterion> + '_ {
        catalogue().iter().filter(|c| self.is_enabled(c.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_order_is_stable() {
        let ids: Vec<CriterionId> = catalogue().iter().map(|c| c.id).collect();
        assert_eq!(
            ids,
            vec![
                CriterionId::HoursLimit,
                CriterionId::RateLimit,
                CriterionId::TotalAmountLimit,
                CriterionId::DuplicateMonthPrevention,
                CriterionId::SupportingDocuments,
                CriterionId::LecturerActive,
            ]
        );
    }

    #[test]
    fn test_rule_set_config_disables_criteria() {
        let config: RuleSetConfig =
            serde_json::from_str(r#"{ "disabled": ["SupportingDocuments"] }"#).unwrap();
        let rules = RuleSet::from_config(&config);

        assert!(!rules.is_enabled(CriterionId::SupportingDocuments));
        assert!(rules.is_enabled(CriterionId::HoursLimit));
        assert_eq!(rules.enabled_criteria().count(), 5);
    }
}
