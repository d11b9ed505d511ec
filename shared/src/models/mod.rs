//! Domain models for the Stride retail back-office

pub mod adjustment;
pub mod invoice;
pub mod item;
pub mod purchase;
pub mod transaction;
pub mod user;

pub use adjustment::*;
pub use invoice::*;
pub use item::*;
pub use purchase::*;
pub use transaction::*;
pub use user::*;
