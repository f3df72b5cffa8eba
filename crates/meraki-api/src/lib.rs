//! Async client for the Meraki Dashboard API.
//!
//! The client enforces the Dashboard's operational constraints at the
//! transport layer so callers never see them: a global semaphore caps
//! simultaneously outstanding requests, 429 responses are retried in place
//! up to a bounded budget, and list endpoints are drained across all
//! `Link`-header pages before results are returned.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

mod appliance;
mod networks;
mod organizations;
mod wireless;

pub use client::DashboardClient;
pub use error::Error;
pub use transport::TransportConfig;
