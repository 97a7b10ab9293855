//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use crate::domain::errors::GeoError;
use serde::Deserialize;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// Parse address text into an `IpAddr`.
///
/// Surrounding whitespace is ignored; anything else that is not a plain
/// IPv4 or IPv6 literal is rejected with `InvalidAddress`.
pub fn parse_address(text: &str) -> Result<IpAddr, GeoError> {
    text.trim()
        .parse()
        .map_err(|_| GeoError::InvalidAddress(text.to_string()))
}

/// Number of bits in an address of the same family as `ip`.
pub fn family_bits(ip: &IpAddr) -> u8 {
    match ip {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}

/// A network prefix: base address plus prefix length.
///
/// The prefix length is always in `1..=32` for IPv4 and `1..=128` for IPv6.
/// A range can only be obtained through [`AddressRange::new`] or
/// [`AddressRange::parse`], both of which enforce that bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressRange {
    base: IpAddr,
    prefix_len: u8,
}

impl AddressRange {
    /// Build a range from an already parsed base address.
    pub fn new(base: IpAddr, prefix_len: u8) -> Result<Self, GeoError> {
        let bits = family_bits(&base);
        if prefix_len == 0 || prefix_len > bits {
            return Err(GeoError::invalid_range(
                &format!("{}/{}", base, prefix_len),
                format!("prefix length must be between 1 and {}", bits),
            ));
        }
        Ok(Self { base, prefix_len })
    }

    /// Parse CIDR notation (`10.0.0.0/8`, `2001:db8::/32`).
    ///
    /// A bare address is accepted and covers exactly that host.
    ///
    /// # Examples
    /// ```
    /// use geolocate::AddressRange;
    ///
    /// let range = AddressRange::parse("10.0.0.0/8").unwrap();
    /// assert_eq!(range.prefix_len(), 8);
    /// assert!(AddressRange::parse("10.0.0.0/0").is_err());
    /// ```
    pub fn parse(cidr: &str) -> Result<Self, GeoError> {
        let cidr = cidr.trim();
        let (network, prefix) = match cidr.split_once('/') {
            Some((network, prefix)) => (network.trim(), Some(prefix.trim())),
            None => (cidr, None),
        };

        let base: IpAddr = network
            .parse()
            .map_err(|_| GeoError::invalid_range(cidr, "unparsable network address"))?;

        let bits = family_bits(&base);
        let prefix_len = match prefix {
            Some(p) => p
                .parse::<u8>()
                .map_err(|_| GeoError::invalid_range(cidr, "prefix length is not a number"))?,
            None => bits,
        };

        if prefix_len == 0 || prefix_len > bits {
            return Err(GeoError::invalid_range(
                cidr,
                format!("prefix length must be between 1 and {}", bits),
            ));
        }

        Ok(Self { base, prefix_len })
    }

    pub fn base(&self) -> IpAddr {
        self.base
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.prefix_len)
    }
}

impl FromStr for AddressRange {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Identifier of a geolocation provider.
///
/// Configuration refers to providers by these names; the registry maps
/// each identifier to a concrete implementation. Deserializing accepts the
/// same names as `FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum ProviderKind {
    /// geoplugin.net JSON service
    GeoPlugin,
    /// geoiptool.com HTML page
    GeoIpTool,
    /// Local MaxMind GeoIP2/GeoLite2 City database
    GeoIp2,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GeoPlugin => "geoplugin",
            Self::GeoIpTool => "geoiptool",
            Self::GeoIp2 => "geoip2",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "geoplugin" => Ok(Self::GeoPlugin),
            "geoiptool" => Ok(Self::GeoIpTool),
            "geoip2" | "maxmind" => Ok(Self::GeoIp2),
            other => Err(GeoError::UnknownProvider(other.to_string())),
        }
    }
}

impl TryFrom<String> for ProviderKind {
    type Error = GeoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
