//! HTTP handlers for the Stride retail back-office

pub mod adjustments;
pub mod auth;
pub mod closings;
pub mod health;
pub mod invoicing;
pub mod items;
pub mod payments;
pub mod purchasing;
pub mod reports;

pub use adjustments::*;
pub use auth::*;
pub use closings::*;
pub use health::*;
pub use invoicing::*;
pub use items::*;
pub use payments::*;
pub use purchasing::*;
pub use reports::*;
