//! Core Kernel - Foundational types for the contract monthly claim system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Temporal types (claim months and a clock abstraction for deterministic tests)
//! - Strongly-typed entity identifiers
//! - The common error type for store (port) operations

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use temporal::{ClaimMonth, Clock, SystemClock, FixedClock, TemporalError};
pub use identifiers::{ClaimId, LecturerId, DocumentId};
pub use ports::StoreError;
