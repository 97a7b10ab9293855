//! Provider Registry
//!
//! Maps provider identifiers to implementations and builds the provider
//! chain from a configured order.

use crate::adapters::outbound::{GeoIpToolProvider, GeoPluginProvider, MaxMindLocationProvider};
use crate::application::ProviderChain;
use crate::config::Config;
use crate::domain::errors::GeoError;
use crate::domain::ports::LocationProvider;
use crate::domain::value_objects::ProviderKind;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Registry of available geolocation providers.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderKind, Arc<dyn LocationProvider>>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the providers selected by `cfg.providers`.
    ///
    /// Providers outside the configured order are never built, so an
    /// unused database is not opened. A selected database that fails to
    /// open is logged and surfaces later as `UnknownProvider` when the
    /// chain asks for it.
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(cfg.http_timeout_secs);
        let mut registry = Self::new();

        for kind in &cfg.providers {
            if registry.contains(*kind) {
                continue;
            }

            match kind {
                ProviderKind::GeoPlugin => registry.register(
                    ProviderKind::GeoPlugin,
                    Arc::new(GeoPluginProvider::new(cfg.geoplugin_url.clone(), timeout)?),
                ),
                ProviderKind::GeoIpTool => registry.register(
                    ProviderKind::GeoIpTool,
                    Arc::new(GeoIpToolProvider::new(cfg.geoiptool_url.clone(), timeout)?),
                ),
                ProviderKind::GeoIp2 => {
                    match MaxMindLocationProvider::from_file(&cfg.geoip_path, cfg.language.clone()) {
                        Ok(p) => {
                            tracing::info!("GeoIP DB loaded from {}", cfg.geoip_path);
                            registry.register(ProviderKind::GeoIp2, Arc::new(p));
                        }
                        Err(e) => {
                            tracing::warn!("failed to load GeoIP DB from {}: {:?}", cfg.geoip_path, e);
                        }
                    }
                }
            }
        }

        Ok(registry)
    }

    /// Register or replace the provider for `kind`.
    pub fn register(&mut self, kind: ProviderKind, provider: Arc<dyn LocationProvider>) {
        self.providers.insert(kind, provider);
    }

    pub fn get(&self, kind: ProviderKind) -> Option<Arc<dyn LocationProvider>> {
        self.providers.get(&kind).cloned()
    }

    pub fn contains(&self, kind: ProviderKind) -> bool {
        self.providers.contains_key(&kind)
    }

    /// Build a chain trying `order` front to back.
    pub fn chain(&self, order: &[ProviderKind]) -> Result<ProviderChain, GeoError> {
        let providers = order
            .iter()
            .map(|kind| {
                self.get(*kind)
                    .ok_or_else(|| GeoError::UnknownProvider(kind.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ProviderChain::new(providers))
    }
}
