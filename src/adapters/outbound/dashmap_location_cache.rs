//! DashMap Location Cache
//!
//! Implements LocationCache using DashMap for concurrent access.

use crate::domain::entities::Location;
use crate::domain::ports::LocationCache;
use dashmap::DashMap;
use std::net::IpAddr;

/// DashMap-backed location cache.
///
/// Sharded locking lets concurrent resolutions read and populate the cache
/// without a global lock. Entries are never evicted.
pub struct DashMapLocationCache {
    entries: DashMap<IpAddr, Location>,
}

impl DashMapLocationCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl Default for DashMapLocationCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationCache for DashMapLocationCache {
    fn get(&self, ip: &IpAddr) -> Option<Location> {
        self.entries.get(ip).map(|e| e.value().clone())
    }

    fn put(&self, ip: IpAddr, location: Location) {
        self.entries.insert(ip, location);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
