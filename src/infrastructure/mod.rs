//! Infrastructure Layer
//!
//! Wiring between configuration and the application layer.

pub mod provider_registry;

pub use provider_registry::ProviderRegistry;
