//! Application Layer
//!
//! Use cases wiring domain services to outbound ports.

mod geo_resolver;
mod provider_chain;

pub use geo_resolver::GeoResolver;
pub use provider_chain::ProviderChain;
