mod address_matcher;
mod network_classifier;

pub use address_matcher::matches;
pub use network_classifier::InternalNetworkClassifier;
