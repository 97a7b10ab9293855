//! geoPlugin Provider
//!
//! Implements LocationProvider using the geoplugin.net JSON web service.
//!
//! See: http://www.geoplugin.com/webservices/json

use crate::domain::entities::LocationInfo;
use crate::domain::errors::ProviderError;
use crate::domain::ports::LocationProvider;
use async_trait::async_trait;
use serde::Deserialize;
use std::net::IpAddr;
use std::time::Duration;

/// Default public endpoint.
pub const GEOPLUGIN_URL: &str = "http://www.geoplugin.net";

/// Response from the `json.gp` endpoint.
///
/// Only the fields we map are declared. `geoplugin_status` has been seen
/// both as a number and as a numeric string.
#[derive(Debug, Deserialize)]
struct GeoPluginResponse {
    #[serde(default)]
    geoplugin_status: serde_json::Value,
    #[serde(default)]
    geoplugin_city: Option<String>,
    #[serde(default, rename = "geoplugin_regionName")]
    geoplugin_region_name: Option<String>,
    #[serde(default, rename = "geoplugin_countryName")]
    geoplugin_country_name: Option<String>,
}

impl GeoPluginResponse {
    fn status(&self) -> Option<u64> {
        self.geoplugin_status
            .as_u64()
            .or_else(|| self.geoplugin_status.as_str()?.trim().parse().ok())
    }
}

/// geoPlugin resolver.
///
/// Each attempt is bounded by the client timeout given at construction.
pub struct GeoPluginProvider {
    client: reqwest::Client,
    base_url: String,
}

impl GeoPluginProvider {
    /// Create a provider talking to `base_url` (e.g. [`GEOPLUGIN_URL`]).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Map a geoPlugin payload into a location.
    fn parse_response(body: &str) -> Result<LocationInfo, ProviderError> {
        let data: GeoPluginResponse =
            serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;

        match data.status() {
            // 206 means some fields are missing, which from_parts handles.
            Some(200) | Some(206) => Ok(LocationInfo::from_parts(
                data.geoplugin_city,
                data.geoplugin_region_name,
                data.geoplugin_country_name,
            )),
            _ => Err(ProviderError::NotFound),
        }
    }
}

#[async_trait]
impl LocationProvider for GeoPluginProvider {
    fn name(&self) -> &str {
        "geoplugin"
    }

    async fn try_resolve(&self, ip: IpAddr) -> Result<LocationInfo, ProviderError> {
        let url = format!("{}/json.gp", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("ip", ip.to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        let body = response.text().await?;
        Self::parse_response(&body)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::domain::entities::UNKNOWN;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn google() -> IpAddr {
        "8.8.8.8".parse().unwrap()
    }

    // ===== Parsing Tests =====

    #[test]
    fn test_parse_success() {
        let body = r#"{
            "geoplugin_request": "8.8.8.8",
            "geoplugin_status": 200,
            "geoplugin_city": "Mountain View",
            "geoplugin_regionName": "California",
            "geoplugin_countryName": "United States"
        }"#;

        let info = GeoPluginProvider::parse_response(body).unwrap();
        assert_eq!(info, LocationInfo::new("Mountain View", "California", "United States"));
    }

    #[test]
    fn test_parse_status_as_string() {
        let body = r#"{"geoplugin_status": "200", "geoplugin_countryName": "Portugal"}"#;

        let info = GeoPluginProvider::parse_response(body).unwrap();
        assert_eq!(info, LocationInfo::new(UNKNOWN, UNKNOWN, "Portugal"));
    }

    #[test]
    fn test_parse_partial_content() {
        let body = r#"{"geoplugin_status": 206, "geoplugin_city": "", "geoplugin_regionName": null, "geoplugin_countryName": "Brazil"}"#;

        let info = GeoPluginProvider::parse_response(body).unwrap();
        assert_eq!(info, LocationInfo::new(UNKNOWN, UNKNOWN, "Brazil"));
    }

    #[test]
    fn test_parse_failed_status() {
        let body = r#"{"geoplugin_status": 404, "geoplugin_city": "Nowhere"}"#;
        assert!(matches!(
            GeoPluginProvider::parse_response(body),
            Err(ProviderError::NotFound)
        ));
    }

    #[test]
    fn test_parse_missing_status() {
        let body = r#"{"geoplugin_city": "Nowhere"}"#;
        assert!(matches!(
            GeoPluginProvider::parse_response(body),
            Err(ProviderError::NotFound)
        ));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            GeoPluginProvider::parse_response("<html>oops</html>"),
            Err(ProviderError::Parse(_))
        ));
    }

    // ===== Integration Tests with Mock HTTP Server =====

    #[tokio::test]
    async fn test_try_resolve_success() {
        let mock_server = MockServer::start().await;

        let response_body = serde_json::json!({
            "geoplugin_status": 200,
            "geoplugin_city": "Mountain View",
            "geoplugin_regionName": "California",
            "geoplugin_countryName": "United States"
        });

        Mock::given(method("GET"))
            .and(path("/json.gp"))
            .and(query_param("ip", "8.8.8.8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = GeoPluginProvider::new(mock_server.uri(), Duration::from_secs(5)).unwrap();
        let info = provider.try_resolve(google()).await.unwrap();

        assert_eq!(info.city, "Mountain View");
        assert_eq!(info.region, "California");
        assert_eq!(info.country, "United States");
    }

    #[tokio::test]
    async fn test_try_resolve_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/json.gp"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .mount(&mock_server)
            .await;

        let provider = GeoPluginProvider::new(mock_server.uri(), Duration::from_secs(5)).unwrap();
        let result = provider.try_resolve(google()).await;

        assert!(matches!(result, Err(ProviderError::Status(503))));
    }

    #[tokio::test]
    async fn test_try_resolve_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/json.gp"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"geoplugin_status": 200}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let provider =
            GeoPluginProvider::new(mock_server.uri(), Duration::from_millis(100)).unwrap();
        let result = provider.try_resolve(google()).await;

        assert!(matches!(result, Err(ProviderError::Timeout)));
    }

    #[tokio::test]
    async fn test_try_resolve_connection_refused() {
        // Nothing listens on port 9 locally.
        let provider =
            GeoPluginProvider::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let result = provider.try_resolve(google()).await;

        assert!(matches!(
            result,
            Err(ProviderError::Http(_)) | Err(ProviderError::Timeout)
        ));
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash_trimmed() {
        let provider =
            GeoPluginProvider::new("http://example.test/", Duration::from_secs(1)).unwrap();
        assert_eq!(provider.base_url, "http://example.test");
        assert_eq!(provider.name(), "geoplugin");
    }
}
