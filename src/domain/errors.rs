//! Domain Errors
//!
//! `GeoError` is what callers of the resolver see. `ProviderError` stays
//! inside the provider chain, which absorbs it and moves on.

use std::net::IpAddr;

/// Errors surfaced by the resolver and its configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeoError {
    /// The input text is not an IPv4 or IPv6 address.
    #[error("invalid address: {0:?}")]
    InvalidAddress(String),

    /// An internal network rule could not be built.
    #[error("invalid range {cidr:?}: {reason}")]
    InvalidRange { cidr: String, reason: String },

    /// Configuration names a provider that is not registered.
    #[error("unknown provider: {0:?}")]
    UnknownProvider(String),

    /// Cache, classifier and every provider came up empty.
    #[error("no location found for {0}")]
    NoLocationFound(IpAddr),
}

impl GeoError {
    pub(crate) fn invalid_range(cidr: &str, reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            cidr: cidr.to_string(),
            reason: reason.into(),
        }
    }
}

/// A single failed provider attempt.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("http error: {0}")]
    Http(reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("unparsable response: {0}")]
    Parse(String),

    /// The provider answered but has nothing for this address.
    #[error("address not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

impl From<maxminddb::MaxMindDBError> for ProviderError {
    fn from(err: maxminddb::MaxMindDBError) -> Self {
        match err {
            maxminddb::MaxMindDBError::AddressNotFoundError(_) => Self::NotFound,
            other => Self::Database(other.to_string()),
        }
    }
}
