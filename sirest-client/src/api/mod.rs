//! Resource APIs, one module per backend collection
//!
//! Each module adds methods to [`SirestClient`](crate::SirestClient).

pub mod alerts;
pub mod auth;
pub mod cash_closing;
pub mod configuration;
pub mod demo;
pub mod invoices;
pub mod orders;
pub mod payments;
pub mod products;
pub mod profile;
pub mod staff;
pub mod tables;
pub mod users;

/// Endpoint paths (relative to `/api`)
pub mod endpoints {
    pub const LOGIN: &str = "auth/login";
    pub const SIGNUP: &str = "auth/signup";
    pub const LOGOUT: &str = "auth/logout";
    pub const ORDERS: &str = "orders";
    pub const PRODUCTS: &str = "products";
    pub const TABLES: &str = "tables";
    pub const PAYMENTS: &str = "payments";
    pub const USERS: &str = "users";
    pub const PROFILE: &str = "profile";
    pub const CONFIGURATION: &str = "configuration";
    pub const ALERTS: &str = "alerts";
    pub const STAFF_STATUS: &str = "staff-status";
    pub const CASH_CLOSING: &str = "cash-closing";
    pub const SEND_INVOICE_EMAIL: &str = "send-invoice-email";
    pub const INIT_DEMO_DATA: &str = "init-demo-data";

    /// `<collection>/<id>` with `id` percent-encoded as one path segment
    pub fn item(collection: &str, id: &str) -> String {
        format!("{collection}/{}", urlencoding::encode(id))
    }

}
