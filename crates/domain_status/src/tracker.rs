//! Status tracker

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use core_kernel::{ClaimId, Clock, Currency, Money};
use domain_claims::{
    ClaimError, ClaimRecord, ClaimStatus, ClaimStore, NotificationSink, StatusHistoryEntry,
    StatusNotification, Transition,
};

use crate::overview::{StatusOverview, StatusTrend};

/// A Pending claim is overdue once it is older than this many days
pub const OVERDUE_AFTER_DAYS: i64 = 30;

/// Default trailing window for trend buckets, inclusive of today
pub const TREND_WINDOW_DAYS: i64 = 7;

/// Outcome of recording a status transition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub success: bool,
    pub message: String,
    pub previous_status: Option<ClaimStatus>,
    pub new_status: Option<ClaimStatus>,
}

impl StatusUpdate {
    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            previous_status: None,
            new_status: None,
        }
    }
}

/// Observational status tracking over the claim collection
///
/// Shares the claim aggregate's transition primitive with the approval
/// engine, so audit fields are stamped identically regardless of which
/// service records the change.
pub struct StatusTracker {
    claims: Arc<dyn ClaimStore>,
    clock: Arc<dyn Clock>,
    notifications: Arc<dyn NotificationSink>,
}

impl StatusTracker {
    pub fn new(
        claims: Arc<dyn ClaimStore>,
        clock: Arc<dyn Clock>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            claims,
            clock,
            notifications,
        }
    }

    /// Records a status transition and emits a notification event
    ///
    /// The transition goes through the claim state machine; moving a claim
    /// back to Pending or out of a terminal state is refused.
    pub async fn record_transition(
        &self,
        claim_id: ClaimId,
        new_status: ClaimStatus,
        actor: &str,
        notes: Option<String>,
    ) -> StatusUpdate {
        let transition = match Transition::into_status(new_status, actor.to_string(), notes) {
            Some(transition) => transition,
            None => return StatusUpdate::failed("Cannot move a claim back to Pending"),
        };

        match self.try_record(claim_id, &transition).await {
            Ok(update) => update,
            Err(ClaimError::NotFound) => StatusUpdate::failed("Claim not found"),
            Err(ClaimError::InvalidTransition { from, to }) => StatusUpdate::failed(format!(
                "Invalid status transition from {} to {}",
                from, to
            )),
            Err(e) => {
                error!(claim_id = %claim_id, error = %e, "error updating claim status");
                StatusUpdate::failed("Error updating claim status")
            }
        }
    }

    async fn try_record(
        &self,
        claim_id: ClaimId,
        transition: &Transition,
    ) -> Result<StatusUpdate, ClaimError> {
        let claim = self
            .claims
            .get(claim_id)
            .await
            .map_err(ClaimError::from_lookup)?;

        let mut updated = claim.clone();
        let previous = updated.apply_transition(transition, self.clock.now())?;
        self.claims.update_if_status(&updated, previous).await?;

        let new_status = updated.status;
        info!(
            claim_id = %claim_id,
            previous = %previous,
            new = %new_status,
            "claim status updated"
        );

        // Fire-and-forget; the sink gives no delivery guarantee.
        self.notifications
            .notify(StatusNotification {
                claim_id,
                status: new_status,
                message: format!("Claim status updated to {}", new_status),
            })
            .await;

        Ok(StatusUpdate {
            success: true,
            message: format!("Claim status updated from {} to {}", previous, new_status),
            previous_status: Some(previous),
            new_status: Some(new_status),
        })
    }

    /// Chronological status history for a claim
    ///
    /// History is synthesized from the claim's audit fields: a submitted
    /// entry always, a decision entry once approval_date is set, and a paid
    /// entry once processed_date is set.
    pub async fn history(&self, claim_id: ClaimId) -> Result<Vec<StatusHistoryEntry>, ClaimError> {
        let claim = self
            .claims
            .get(claim_id)
            .await
            .map_err(ClaimError::from_lookup)?;

        let mut history = vec![StatusHistoryEntry {
            claim_id,
            status: ClaimStatus::Pending,
            updated_by: "System".to_string(),
            updated_at: claim.submission_date,
            notes: Some("Claim submitted".to_string()),
        }];

        if let Some(decided_at) = claim.approval_date {
            let (status, notes) = match &claim.rejection_reason {
                Some(reason) => (ClaimStatus::Rejected, format!("Claim rejected: {}", reason)),
                None => (ClaimStatus::Approved, "Claim approved".to_string()),
            };
            history.push(StatusHistoryEntry {
                claim_id,
                status,
                updated_by: claim.approved_by.clone().unwrap_or_else(|| "Unknown".to_string()),
                updated_at: decided_at,
                notes: Some(notes),
            });
        }

        if let Some(paid_at) = claim.processed_date {
            history.push(StatusHistoryEntry {
                claim_id,
                status: ClaimStatus::Paid,
                updated_by: claim
                    .processed_by
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_string()),
                updated_at: paid_at,
                notes: Some("Claim paid".to_string()),
            });
        }

        history.sort_by_key(|entry| entry.updated_at);
        Ok(history)
    }

    /// Counts, sums, overdue tally, and recent trends over all claims
    pub async fn overview(&self) -> Result<StatusOverview, ClaimError> {
        let claims = self.claims.find_all().await?;
        let now = self.clock.now();

        let count_with = |status: ClaimStatus| claims.iter().filter(|c| c.status == status).count();
        let sum_with = |status: ClaimStatus| {
            claims
                .iter()
                .filter(|c| c.status == status)
                .fold(Money::zero(Currency::ZAR), |acc, c| acc + c.total_amount())
        };

        Ok(StatusOverview {
            total_claims: claims.len(),
            pending_count: count_with(ClaimStatus::Pending),
            approved_count: count_with(ClaimStatus::Approved),
            rejected_count: count_with(ClaimStatus::Rejected),
            paid_count: count_with(ClaimStatus::Paid),
            overdue_count: claims.iter().filter(|c| is_overdue(c, now)).count(),
            pending_amount: sum_with(ClaimStatus::Pending),
            approved_amount: sum_with(ClaimStatus::Approved),
            recent_trends: bucket_trends(&claims, now, TREND_WINDOW_DAYS),
        })
    }

    /// Pending claims older than the overdue window, oldest first
    pub async fn overdue(&self) -> Result<Vec<ClaimRecord>, ClaimError> {
        let now = self.clock.now();
        let mut overdue: Vec<ClaimRecord> = self
            .claims
            .find_all()
            .await?
            .into_iter()
            .filter(|c| is_overdue(c, now))
            .collect();
        overdue.sort_by_key(|c| c.submission_date);
        Ok(overdue)
    }

    /// Per-day trend buckets for the trailing window, inclusive of today
    pub async fn trends(&self, days: i64) -> Result<Vec<StatusTrend>, ClaimError> {
        let claims = self.claims.find_all().await?;
        Ok(bucket_trends(&claims, self.clock.now(), days))
    }
}

fn is_overdue(claim: &ClaimRecord, now: chrono::DateTime<chrono::Utc>) -> bool {
    claim.status == ClaimStatus::Pending
        && claim.days_since_submission(now) > OVERDUE_AFTER_DAYS
}

fn bucket_trends(
    claims: &[ClaimRecord],
    now: chrono::DateTime<chrono::Utc>,
    days: i64,
) -> Vec<StatusTrend> {
    let today = now.date_naive();
    let mut trends = Vec::with_capacity(days.max(0) as usize);

    for offset in (0..days).rev() {
        let date = today - Duration::days(offset);
        let submitted_that_day = claims
            .iter()
            .filter(|c| c.submission_date.date_naive() == date);

        let mut trend = StatusTrend {
            date,
            pending_count: 0,
            approved_count: 0,
            rejected_count: 0,
        };
        for claim in submitted_that_day {
            match claim.status {
                ClaimStatus::Pending => trend.pending_count += 1,
                ClaimStatus::Approved => trend.approved_count += 1,
                ClaimStatus::Rejected => trend.rejected_count += 1,
                ClaimStatus::Paid => {}
            }
        }
        trends.push(trend);
    }

    trends
}
