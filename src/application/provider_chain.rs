//! Provider Chain
//!
//! Sequential fallback across geolocation providers.

use crate::domain::entities::LocationInfo;
use crate::domain::errors::GeoError;
use crate::domain::ports::LocationProvider;
use std::net::IpAddr;
use std::sync::Arc;

/// Ordered list of providers tried one after another.
///
/// The first usable answer wins and later providers are never called.
/// Provider errors and all-unknown answers are logged and skipped.
#[derive(Clone, Default)]
pub struct ProviderChain {
    providers: Vec<Arc<dyn LocationProvider>>,
}

impl ProviderChain {
    pub fn new(providers: Vec<Arc<dyn LocationProvider>>) -> Self {
        Self { providers }
    }

    /// Resolve `ip` with the first provider that yields a usable record.
    ///
    /// # Returns
    /// The record, or `NoLocationFound` once every provider has failed
    pub async fn resolve(&self, ip: IpAddr) -> Result<LocationInfo, GeoError> {
        for provider in &self.providers {
            match provider.try_resolve(ip).await {
                Ok(info) if info.is_usable() => {
                    tracing::debug!("provider {} located {} -> {}", provider.name(), ip, info);
                    return Ok(info);
                }
                Ok(_) => {
                    tracing::debug!("provider {} has no data for {}", provider.name(), ip);
                }
                Err(e) => {
                    tracing::warn!("provider {} failed for {}: {}", provider.name(), ip, e);
                }
            }
        }

        Err(GeoError::NoLocationFound(ip))
    }

    /// Provider names in priority order.
    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderChain")
            .field("providers", &self.names())
            .finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::domain::errors::ProviderError;
    use async_trait::async_trait;
    use std::net::Ipv4Addr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    enum Answer {
        Found(LocationInfo),
        Unknown,
        Fail,
    }

    struct ScriptedProvider {
        name: String,
        answer: Answer,
        calls: AtomicUsize,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedProvider {
        fn new(name: &str, answer: Answer, log: Arc<Mutex<Vec<String>>>) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                answer,
                calls: AtomicUsize::new(0),
                log,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LocationProvider for ScriptedProvider {
        fn name(&self) -> &str {
            &self.name
        }

        async fn try_resolve(&self, _ip: IpAddr) -> Result<LocationInfo, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.log.lock().unwrap().push(self.name.clone());
            match &self.answer {
                Answer::Found(info) => Ok(info.clone()),
                Answer::Unknown => Ok(LocationInfo::unknown()),
                Answer::Fail => Err(ProviderError::Timeout),
            }
        }
    }

    fn google() -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8))
    }

    fn mountain_view() -> LocationInfo {
        LocationInfo::new("Mountain View", "California", "United States")
    }

    #[tokio::test]
    async fn test_first_usable_answer_wins() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let a = ScriptedProvider::new("a", Answer::Found(mountain_view()), log.clone());
        let b = ScriptedProvider::new("b", Answer::Found(LocationInfo::new("x", "y", "z")), log.clone());

        let chain = ProviderChain::new(vec![a.clone(), b.clone()]);
        let result = chain.resolve(google()).await.unwrap();

        assert_eq!(result, mountain_view());
        assert_eq!(a.calls(), 1);
        assert_eq!(b.calls(), 0);
    }

    #[tokio::test]
    async fn test_errors_fall_through_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let a = ScriptedProvider::new("a", Answer::Fail, log.clone());
        let b = ScriptedProvider::new("b", Answer::Fail, log.clone());
        let c = ScriptedProvider::new("c", Answer::Found(mountain_view()), log.clone());
        let d = ScriptedProvider::new("d", Answer::Found(mountain_view()), log.clone());

        let chain = ProviderChain::new(vec![a, b, c, d.clone()]);
        let result = chain.resolve(google()).await.unwrap();

        assert_eq!(result, mountain_view());
        assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
        assert_eq!(d.calls(), 0);
    }

    #[tokio::test]
    async fn test_all_unknown_answer_is_skipped() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let a = ScriptedProvider::new("a", Answer::Unknown, log.clone());
        let b = ScriptedProvider::new("b", Answer::Found(mountain_view()), log.clone());

        let chain = ProviderChain::new(vec![a.clone(), b.clone()]);
        let result = chain.resolve(google()).await.unwrap();

        assert_eq!(result, mountain_view());
        assert_eq!(a.calls(), 1);
        assert_eq!(b.calls(), 1);
    }

    #[tokio::test]
    async fn test_partially_unknown_answer_is_usable() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let partial = LocationInfo::new("unknown", "unknown", "Brazil");
        let a = ScriptedProvider::new("a", Answer::Found(partial.clone()), log.clone());
        let b = ScriptedProvider::new("b", Answer::Found(mountain_view()), log.clone());

        let chain = ProviderChain::new(vec![a, b.clone()]);
        assert_eq!(chain.resolve(google()).await.unwrap(), partial);
        assert_eq!(b.calls(), 0);
    }

    #[tokio::test]
    async fn test_exhausted_chain_reports_no_location() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let a = ScriptedProvider::new("a", Answer::Unknown, log.clone());
        let b = ScriptedProvider::new("b", Answer::Fail, log.clone());

        let chain = ProviderChain::new(vec![a, b]);
        let err = chain.resolve(google()).await.unwrap_err();

        assert_eq!(err, GeoError::NoLocationFound(google()));
        assert_eq!(*log.lock().unwrap(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_empty_chain_reports_no_location() {
        let chain = ProviderChain::default();
        assert!(chain.is_empty());
        let err = chain.resolve(google()).await.unwrap_err();
        assert_eq!(err, GeoError::NoLocationFound(google()));
    }

    #[test]
    fn test_names_in_priority_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let chain = ProviderChain::new(vec![
            ScriptedProvider::new("geoiptool", Answer::Fail, log.clone()),
            ScriptedProvider::new("geoplugin", Answer::Fail, log),
        ]);
        assert_eq!(chain.names(), vec!["geoiptool", "geoplugin"]);
        assert_eq!(chain.len(), 2);
        assert!(format!("{:?}", chain).contains("geoiptool"));
    }
}
