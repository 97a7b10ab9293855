//! MaxMind Location Provider
//!
//! Implements LocationProvider using a MaxMind GeoIP2/GeoLite2 City database.

use crate::domain::entities::LocationInfo;
use crate::domain::errors::ProviderError;
use crate::domain::ports::LocationProvider;
use async_trait::async_trait;
use maxminddb::Reader;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::IpAddr;
use std::sync::Arc;

/// Usual install location of the GeoLite2 City database.
pub const DEFAULT_GEOIP_PATH: &str = "/usr/share/GeoIP/GeoLite2-City.mmdb";

/// Localized names keyed by language tag (`en`, `pt-BR`, ...).
type Names = BTreeMap<String, String>;

#[derive(Debug, Default, Deserialize)]
struct NamedRecord {
    #[serde(default)]
    names: Names,
}

#[derive(Debug, Default, Deserialize)]
struct SubdivisionRecord {
    #[serde(default)]
    iso_code: Option<String>,
    #[serde(default)]
    names: Names,
}

#[derive(Debug, Default, Deserialize)]
struct CityRecord {
    #[serde(default)]
    city: Option<NamedRecord>,
    #[serde(default)]
    subdivisions: Vec<SubdivisionRecord>,
    #[serde(default)]
    country: Option<NamedRecord>,
}

/// Pick a label for `language`: exact tag, then its two-letter prefix,
/// then English.
fn pick_label(names: &Names, language: &str) -> Option<String> {
    let short = language.get(..2).unwrap_or(language);
    [language, short, "en"]
        .iter()
        .find_map(|tag| names.get(*tag))
        .cloned()
}

fn build_location(record: CityRecord, language: &str) -> LocationInfo {
    let city = record.city.and_then(|c| pick_label(&c.names, language));

    // Subdivision codes stand in when the database has no name for them.
    let region = record
        .subdivisions
        .into_iter()
        .next()
        .and_then(|s| pick_label(&s.names, language).or(s.iso_code));

    let country = record.country.and_then(|c| pick_label(&c.names, language));

    LocationInfo::from_parts(city, region, country)
}

/// MaxMind GeoIP resolver.
///
/// Lookups are in-memory and never block on the network. Labels are
/// chosen for the configured language.
pub struct MaxMindLocationProvider {
    reader: Arc<Reader<Vec<u8>>>,
    language: String,
}

impl MaxMindLocationProvider {
    /// Load a GeoIP database from a file path.
    pub fn from_file(path: &str, language: impl Into<String>) -> anyhow::Result<Self> {
        let reader = Reader::open_readfile(path)?;
        Ok(Self {
            reader: Arc::new(reader),
            language: language.into(),
        })
    }

    /// Load a GeoIP database already held in memory.
    pub fn from_bytes(bytes: Vec<u8>, language: impl Into<String>) -> anyhow::Result<Self> {
        let reader = Reader::from_source(bytes)?;
        Ok(Self {
            reader: Arc::new(reader),
            language: language.into(),
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

#[async_trait]
impl LocationProvider for MaxMindLocationProvider {
    fn name(&self) -> &str {
        "geoip2"
    }

    async fn try_resolve(&self, ip: IpAddr) -> Result<LocationInfo, ProviderError> {
        let record: CityRecord = self.reader.lookup(ip)?;
        let info = build_location(record, &self.language);

        if info.is_unknown() {
            return Err(ProviderError::NotFound);
        }
        Ok(info)
    }
}
