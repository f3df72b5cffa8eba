//! Reporting engine for the Meraki Dashboard: resolve selectors to
//! canonical identifiers, fan requests out over independent sub-resources,
//! aggregate completions into a frozen key -> result mapping, and emit
//! fixed-schema reports.
//!
//! Data flows strictly forward through the four components; a per-key
//! failure is data, not an exception, so one bad sub-resource never costs
//! the rest of the batch.

pub mod aggregate;
pub mod dispatch;
pub mod error;
pub mod filterlist;
pub mod report;
pub mod resolve;

pub use aggregate::{AggregatedReport, collect};
pub use dispatch::{
    Band, BandKey, DispatchKey, Failure, FailureKind, NetworkKey, ResourceResult, SerialKey,
    dispatch,
};
pub use error::CoreError;
pub use filterlist::FilterLists;
pub use resolve::{
    NetworkSelector, OrgSelector, partition_by_products, resolve_networks, resolve_organization,
    resolve_organizations,
};
