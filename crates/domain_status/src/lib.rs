//! Status Tracking Domain
//!
//! Observational views over the claim collection: transition recording with
//! notification events, per-claim status history, aggregate overviews,
//! overdue detection, and submission-date trend buckets. The tracker does
//! not enforce business rules beyond the state machine itself; the approval
//! engine owns those.

pub mod tracker;
pub mod overview;

pub use tracker::{StatusTracker, StatusUpdate, OVERDUE_AFTER_DAYS, TREND_WINDOW_DAYS};
pub use overview::{StatusOverview, StatusTrend};
