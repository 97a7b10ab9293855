//! Domain Entities - Core business objects
//!
//! These entities represent the core concepts of the geolocation domain.
//! They have no external dependencies and contain only business logic.

use crate::domain::value_objects::AddressRange;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder for a location field the source could not fill.
pub const UNKNOWN: &str = "unknown";

/// City, region and country of an address.
///
/// Missing fields hold [`UNKNOWN`]. A record where all three are unknown
/// carries no information and is never treated as a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub city: String,
    pub region: String,
    pub country: String,
}

impl LocationInfo {
    pub fn new(
        city: impl Into<String>,
        region: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            city: city.into(),
            region: region.into(),
            country: country.into(),
        }
    }

    /// Build a record from optional fields; absent or blank fields become unknown.
    pub fn from_parts(city: Option<String>, region: Option<String>, country: Option<String>) -> Self {
        fn field(value: Option<String>) -> String {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| UNKNOWN.to_string())
        }

        Self {
            city: field(city),
            region: field(region),
            country: field(country),
        }
    }

    pub fn unknown() -> Self {
        Self::new(UNKNOWN, UNKNOWN, UNKNOWN)
    }

    /// True when every field is unknown.
    pub fn is_unknown(&self) -> bool {
        self.city == UNKNOWN && self.region == UNKNOWN && self.country == UNKNOWN
    }

    /// True when at least one field carries information.
    pub fn is_usable(&self) -> bool {
        !self.is_unknown()
    }
}

impl fmt::Display for LocationInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.city, self.region, self.country)
    }
}

/// Result of a resolution.
///
/// Internal networks are described by a single administrator-supplied
/// string, so they are kept apart from structured provider answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Location {
    /// Address belongs to a configured internal network.
    Internal { descriptor: String },
    /// Address was located by a geolocation provider.
    Geo(LocationInfo),
}

impl Location {
    pub fn internal(descriptor: impl Into<String>) -> Self {
        Self::Internal {
            descriptor: descriptor.into(),
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }

    /// Flat view for consumers that only understand three fields.
    ///
    /// An internal descriptor is placed in the region field.
    pub fn to_info(&self) -> LocationInfo {
        match self {
            Self::Internal { descriptor } => LocationInfo::new(UNKNOWN, descriptor.clone(), UNKNOWN),
            Self::Geo(info) => info.clone(),
        }
    }
}

impl From<LocationInfo> for Location {
    fn from(info: LocationInfo) -> Self {
        Self::Geo(info)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal { descriptor } => write!(f, "{} (internal)", descriptor),
            Self::Geo(info) => fmt::Display::fmt(info, f),
        }
    }
}

/// An internal network and the descriptor reported for addresses inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalRule {
    pub range: AddressRange,
    pub descriptor: String,
}

impl InternalRule {
    pub fn new(range: AddressRange, descriptor: impl Into<String>) -> Self {
        Self {
            range,
            descriptor: descriptor.into(),
        }
    }
}
