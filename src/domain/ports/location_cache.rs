//! Location Cache Port
//!
//! Defines the interface for remembering resolved locations.

use crate::domain::entities::Location;
use std::net::IpAddr;

/// In-memory store of resolved locations keyed by address.
///
/// Implementations must be safe to share between concurrent resolutions.
/// Entries live as long as the cache; there is no eviction.
pub trait LocationCache: Send + Sync {
    /// Look up a previously stored location.
    fn get(&self, ip: &IpAddr) -> Option<Location>;

    /// Store a location, replacing any previous entry for the address.
    fn put(&self, ip: IpAddr, location: Location);

    /// Number of cached addresses.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
