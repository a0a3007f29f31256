//! SIREST role console
//!
//! Role screens built from polled snapshots, invoices and cash closings, and
//! the plain-text renderer the console binary prints them with.

pub mod config;
pub mod console;
pub mod invoice;
pub mod logger;
pub mod render;
pub mod reports;
pub mod views;

pub use config::PosConfig;
pub use console::Console;
pub use invoice::{Invoice, InvoiceKind, InvoiceRenderer};
pub use reports::{CashClosingBuilder, SalesSummary};
pub use views::{RoleView, Snapshots, for_role};
