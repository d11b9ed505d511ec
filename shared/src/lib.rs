//! Shared types and models for the Stride retail back-office
//!
//! This crate contains the domain models and the pure stock-ledger and
//! reconciliation arithmetic used by the backend. It performs no I/O.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
