//! Test Utilities
//!
//! Builders for constructing test claims with sensible defaults, and a
//! wired in-memory environment (stores, fixed clock, recording sink) so the
//! engine and tracker suites only specify what matters to the scenario.

pub mod builders;
pub mod fixtures;

pub use builders::{ClaimBuilder, LecturerBuilder};
pub use fixtures::TestEnv;
