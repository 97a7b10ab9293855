use crate::adapters::outbound::{DEFAULT_GEOIP_PATH, GEOIPTOOL_URL, GEOPLUGIN_URL};
use crate::domain::value_objects::ProviderKind;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    // Resolution order
    pub providers: Vec<ProviderKind>,
    pub internal_networks: Vec<(String, String)>,

    // Local database settings
    pub geoip_path: String,
    pub language: String,

    // Remote service settings
    pub http_timeout_secs: u64,
    pub geoplugin_url: String,
    pub geoiptool_url: String,

    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            providers: vec![ProviderKind::GeoPlugin],
            internal_networks: Vec::new(),
            geoip_path: DEFAULT_GEOIP_PATH.to_string(),
            language: "en".to_string(),
            http_timeout_secs: 20,
            geoplugin_url: GEOPLUGIN_URL.to_string(),
            geoiptool_url: GEOIPTOOL_URL.to_string(),
            debug: false,
        }
    }
}

pub fn load_config() -> anyhow::Result<Config> {
    load_config_from(|key| std::env::var(key).ok())
}

/// Build the configuration from an arbitrary variable source.
pub fn load_config_from<F>(var: F) -> anyhow::Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = Config::default();

    let providers = match var("GEOLOCATE_PROVIDERS") {
        Some(v) => parse_providers(&v)?,
        None => Vec::new(),
    };
    let providers = if providers.is_empty() {
        defaults.providers
    } else {
        providers
    };

    let internal_networks = match var("GEOLOCATE_INTERNAL_NETWORKS") {
        Some(v) => parse_internal_networks(&v)?,
        None => Vec::new(),
    };

    let geoip_path = var("GEOLOCATE_GEOIP_PATH").unwrap_or(defaults.geoip_path);

    let language = var("GEOLOCATE_LANGUAGE")
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or(defaults.language);

    let http_timeout_secs = var("GEOLOCATE_HTTP_TIMEOUT_SECS")
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(defaults.http_timeout_secs);

    let geoplugin_url = var("GEOLOCATE_GEOPLUGIN_URL").unwrap_or(defaults.geoplugin_url);
    let geoiptool_url = var("GEOLOCATE_GEOIPTOOL_URL").unwrap_or(defaults.geoiptool_url);

    let debug = var("DEBUG").is_some();

    Ok(Config {
        providers,
        internal_networks,
        geoip_path,
        language,
        http_timeout_secs,
        geoplugin_url,
        geoiptool_url,
        debug,
    })
}

/// Parse a comma-separated provider order. Unknown names are an error.
fn parse_providers(value: &str) -> anyhow::Result<Vec<ProviderKind>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| name.parse::<ProviderKind>().map_err(anyhow::Error::from))
        .collect()
}

/// Parse `cidr=descriptor` rules separated by `;`, keeping their order.
///
/// Only the shape is checked here; the CIDR itself is validated when the
/// classifier is built.
fn parse_internal_networks(value: &str) -> anyhow::Result<Vec<(String, String)>> {
    value
        .split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (cidr, descr) = entry.split_once('=').ok_or_else(|| {
                anyhow::anyhow!("internal network entry {:?} is not cidr=descriptor", entry)
            })?;
            Ok::<_, anyhow::Error>((cidr.trim().to_string(), descr.trim().to_string()))
        })
        .collect()
}
