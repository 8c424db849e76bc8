//! Fleet data sources
//!
//! The map reads container and route rows from a [`FleetSource`]. Two are
//! provided:
//! - [`rest::RestStore`]: the hosted store's REST API
//! - [`memory::MemorySource`]: rows held in memory (demo data, tests)
//!
//! Sources only fetch on request; there is no caching, polling or push.

pub mod memory;
pub mod rest;

use crate::error::Result;
use crate::fleet::{ContainerRow, RouteRow};
use std::future::Future;

pub use memory::MemorySource;
pub use rest::RestStore;

/// Trait for fleet data sources
pub trait FleetSource: Send + Sync {
    /// Short name for logs and status output
    fn name(&self) -> &str;

    /// Fetch every container row
    fn fetch_containers(&self) -> impl Future<Output = Result<Vec<ContainerRow>>> + Send;

    /// Fetch every route row
    fn fetch_routes(&self) -> impl Future<Output = Result<Vec<RouteRow>>> + Send;
}
