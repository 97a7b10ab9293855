//! Internal Network Classifier
//!
//! Pure domain logic deciding whether an address belongs to one of the
//! operator's own networks.

use crate::domain::entities::InternalRule;
use crate::domain::errors::GeoError;
use crate::domain::services::address_matcher::matches;
use crate::domain::value_objects::AddressRange;
use std::net::IpAddr;

/// Ordered set of internal network rules.
///
/// Rules are checked in the order they were given and the first match
/// wins, so more specific ranges should come before broader ones.
#[derive(Debug, Clone, Default)]
pub struct InternalNetworkClassifier {
    rules: Vec<InternalRule>,
}

impl InternalNetworkClassifier {
    pub fn new(rules: Vec<InternalRule>) -> Self {
        Self { rules }
    }

    /// Build from `(cidr, descriptor)` pairs.
    ///
    /// Fails on the first malformed CIDR; no partially built rule set is
    /// ever returned.
    pub fn from_pairs<I, C, D>(pairs: I) -> Result<Self, GeoError>
    where
        I: IntoIterator<Item = (C, D)>,
        C: AsRef<str>,
        D: Into<String>,
    {
        let rules = pairs
            .into_iter()
            .map(|(cidr, descriptor)| {
                AddressRange::parse(cidr.as_ref()).map(|range| InternalRule::new(range, descriptor))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    /// Descriptor of the first rule whose range contains `addr`.
    pub fn classify(&self, addr: &IpAddr) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| matches(addr, &rule.range))
            .map(|rule| rule.descriptor.as_str())
    }

    pub fn rules(&self) -> &[InternalRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
