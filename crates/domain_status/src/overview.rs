//! Aggregate view types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::Money;

/// Counts and sums over the whole claim collection
///
/// Paid claims are bucketed explicitly, so
/// `total_claims == pending + approved + rejected + paid` always holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusOverview {
    pub total_claims: usize,
    pub pending_count: usize,
    pub approved_count: usize,
    pub rejected_count: usize,
    pub paid_count: usize,
    /// Pending claims older than the overdue window
    pub overdue_count: usize,
    pub pending_amount: Money,
    pub approved_amount: Money,
    pub recent_trends: Vec<StatusTrend>,
}

/// One calendar-day trend bucket
///
/// Claims are bucketed by submission date and counted by their current
/// status, not by the status they had on that day. This is a documented
/// approximation: a claim approved yesterday counts as approved in the
/// bucket of its submission day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTrend {
    pub date: NaiveDate,
    pub pending_count: usize,
    pub approved_count: usize,
    pub rejected_count: usize,
}
