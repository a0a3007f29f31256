//! Data models
//!
//! Mirrors of the backend resource collections. Amounts are `f64` in currency
//! units; IDs are opaque strings assigned by the backend.

pub mod alert;
pub mod cash_closing;
pub mod configuration;
pub mod dining_table;
pub mod payment;
pub mod product;
pub mod role;
pub mod user;

// Re-exports
pub use alert::*;
pub use cash_closing::*;
pub use configuration::*;
pub use dining_table::*;
pub use payment::*;
pub use product::*;
pub use role::*;
pub use user::*;
