mod location_cache;
mod location_provider;

pub use location_cache::LocationCache;
pub use location_provider::LocationProvider;
