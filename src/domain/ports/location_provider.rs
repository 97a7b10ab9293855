//! Location Provider Port
//!
//! Defines the interface for external geolocation data sources.

use crate::domain::entities::LocationInfo;
use crate::domain::errors::ProviderError;
use async_trait::async_trait;
use std::net::IpAddr;

/// A source that can attempt to locate an address.
///
/// This is an outbound port. Implementations may query a local database
/// or a remote service; remote implementations must bound each attempt
/// with a timeout and report it as [`ProviderError::Timeout`].
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Attempt to locate `ip`.
    ///
    /// An all-unknown record is allowed here; the provider chain treats it
    /// the same as an error.
    async fn try_resolve(&self, ip: IpAddr) -> Result<LocationInfo, ProviderError>;
}
