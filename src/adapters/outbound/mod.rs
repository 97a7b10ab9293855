mod dashmap_location_cache;
mod geoiptool_provider;
mod geoplugin_provider;
mod maxmind_location_provider;

pub use dashmap_location_cache::DashMapLocationCache;
pub use geoiptool_provider::{GeoIpToolProvider, GEOIPTOOL_URL};
pub use geoplugin_provider::{GeoPluginProvider, GEOPLUGIN_URL};
pub use maxmind_location_provider::{MaxMindLocationProvider, DEFAULT_GEOIP_PATH};
