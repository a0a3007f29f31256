//! SIREST client
//!
//! Talks to the SIREST backend over REST: typed resource APIs, interval
//! pollers that keep role screens fresh, and the order and payment services
//! that enforce the order lifecycle before anything is sent.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod orders;
pub mod payments;
pub mod poller;
pub mod session;

pub use client::SirestClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use orders::OrderService;
pub use payments::{PaymentService, SettleRequest, Settlement};
pub use poller::{
    Fetch, PollState, Poller, RefetchHandle, RefetchRegistry, Resource, ResourcePoller,
};
pub use session::Session;
