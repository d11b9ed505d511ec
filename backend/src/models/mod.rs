//! Database models for the Stride retail back-office
//!
//! Re-exports models from the shared crate; row-mapping structs live next
//! to the services that query them.

pub use shared::models::*;
