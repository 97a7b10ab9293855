//! geolocate Library
//!
//! Resolves IP addresses to a city, region and country. Internal networks
//! are answered from configured rules; everything else goes through an
//! ordered chain of geolocation providers. Answers are cached per resolver.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use adapters::outbound::{
    DashMapLocationCache, GeoIpToolProvider, GeoPluginProvider, MaxMindLocationProvider,
};
pub use application::{GeoResolver, ProviderChain};
pub use config::{load_config, Config};
pub use domain::entities::{InternalRule, Location, LocationInfo, UNKNOWN};
pub use domain::errors::{GeoError, ProviderError};
pub use domain::ports::{LocationCache, LocationProvider};
pub use domain::services::{matches, InternalNetworkClassifier};
pub use domain::value_objects::{parse_address, AddressRange, ProviderKind};
pub use infrastructure::ProviderRegistry;

use std::sync::Arc;

/// Build a resolver from configuration.
///
/// Fails on malformed internal network rules or on a provider order that
/// names an unavailable provider. The resolver gets a cache of its own.
pub fn build_resolver(cfg: &Config) -> anyhow::Result<GeoResolver> {
    let classifier = InternalNetworkClassifier::from_pairs(cfg.internal_networks.iter().cloned())?;
    let registry = ProviderRegistry::from_config(cfg)?;
    let chain = registry.chain(&cfg.providers)?;

    tracing::info!(
        "resolver ready: {} internal rules, providers={:?}",
        classifier.len(),
        chain.names()
    );

    Ok(GeoResolver::new(
        classifier,
        Arc::new(chain),
        Box::new(DashMapLocationCache::new()),
    ))
}
