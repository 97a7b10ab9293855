//! GeoIPTool Provider
//!
//! Implements LocationProvider by scraping the geoiptool.com result page.
//! The page has no API contract, so markup changes show up as
//! `ProviderError::Parse` and the chain moves on to the next provider.

use crate::domain::entities::LocationInfo;
use crate::domain::errors::ProviderError;
use crate::domain::ports::LocationProvider;
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Duration;

/// Default public endpoint.
pub const GEOIPTOOL_URL: &str = "https://www.geoiptool.com";

/// Each labelled row on the page is a `<div class="data-item">`.
const DATA_ITEM_SELECTOR: &str = "div.data-item";

/// GeoIPTool resolver (best effort).
pub struct GeoIpToolProvider {
    client: reqwest::Client,
    base_url: String,
}

impl GeoIpToolProvider {
    /// Create a provider talking to `base_url` (e.g. [`GEOIPTOOL_URL`]).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Extract `label: value` pairs from the data items of a result page.
    fn scrape_fields(html: &str) -> Result<HashMap<String, String>, ProviderError> {
        let document = Html::parse_document(html);
        let selector = Selector::parse(DATA_ITEM_SELECTOR)
            .map_err(|e| ProviderError::Parse(format!("{:?}", e)))?;

        let mut fields = HashMap::new();
        for item in document.select(&selector) {
            let text = item.text().collect::<Vec<_>>().join(" ");
            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

            if let Some((label, value)) = text.split_once(':') {
                fields.insert(label.trim().to_string(), value.trim().to_string());
            }
        }

        if fields.is_empty() {
            return Err(ProviderError::Parse("no data items found".to_string()));
        }

        Ok(fields)
    }

    fn parse_page(html: &str) -> Result<LocationInfo, ProviderError> {
        let mut fields = Self::scrape_fields(html)?;
        Ok(LocationInfo::from_parts(
            fields.remove("City"),
            fields.remove("Region"),
            fields.remove("Country"),
        ))
    }
}

#[async_trait]
impl LocationProvider for GeoIpToolProvider {
    fn name(&self) -> &str {
        "geoiptool"
    }

    async fn try_resolve(&self, ip: IpAddr) -> Result<LocationInfo, ProviderError> {
        let url = format!("{}/en/", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("IP", ip.to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        Self::parse_page(&body)
    }
}
