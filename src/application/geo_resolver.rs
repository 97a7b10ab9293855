//! Geo Resolver - Main application use case
//!
//! Orchestrates the lookup: cache, internal classification, provider
//! chain, then cache store. This is the primary interface for callers.

use crate::domain::entities::Location;
use crate::domain::errors::GeoError;
use crate::domain::ports::LocationCache;
use crate::domain::services::InternalNetworkClassifier;
use crate::domain::value_objects::parse_address;
use crate::application::ProviderChain;
use std::net::IpAddr;
use std::sync::Arc;

/// Geolocation resolver - main application use case.
///
/// Resolution short-circuits at the first step that yields a result:
/// 1. Cached location for the address
/// 2. Internal network rule
/// 3. Provider chain, in configured priority order
///
/// Results from steps 2 and 3 are cached before returning. Failures are
/// not cached, so a later call may succeed once a provider recovers.
pub struct GeoResolver {
    cache: Box<dyn LocationCache>,
    classifier: InternalNetworkClassifier,
    chain: Arc<ProviderChain>,
}

impl GeoResolver {
    /// Create a new resolver owning `cache`.
    ///
    /// Cached answers depend on this resolver's rules and chain, so the
    /// cache is never shared with another resolver. Its lifetime defines
    /// how long answers are remembered.
    pub fn new(
        classifier: InternalNetworkClassifier,
        chain: Arc<ProviderChain>,
        cache: Box<dyn LocationCache>,
    ) -> Self {
        Self {
            cache,
            classifier,
            chain,
        }
    }

    /// Parse `text` and resolve it.
    ///
    /// Invalid text fails with `InvalidAddress` before any lookup.
    pub async fn resolve_str(&self, text: &str) -> Result<Location, GeoError> {
        let ip = parse_address(text)?;
        self.resolve(ip).await
    }

    /// Resolve an address to a location.
    ///
    /// # Returns
    /// The location, or `NoLocationFound` when the classifier and every
    /// provider came up empty
    pub async fn resolve(&self, ip: IpAddr) -> Result<Location, GeoError> {
        // 1. Cache
        if let Some(location) = self.cache.get(&ip) {
            tracing::debug!("cache hit for {}", ip);
            return Ok(location);
        }

        // 2. Internal networks
        let location = if let Some(descriptor) = self.classifier.classify(&ip) {
            tracing::debug!("{} matched internal network {:?}", ip, descriptor);
            Location::internal(descriptor)
        } else {
            // 3. Providers
            Location::Geo(self.chain.resolve(ip).await?)
        };

        self.cache.put(ip, location.clone());
        Ok(location)
    }

    pub fn classifier(&self) -> &InternalNetworkClassifier {
        &self.classifier
    }

    pub fn chain(&self) -> &Arc<ProviderChain> {
        &self.chain
    }

    /// Number of addresses currently cached.
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }
}
