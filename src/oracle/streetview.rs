//! Google Street View metadata oracle
//!
//! Queries the Street View metadata endpoint, which is free of charge and
//! reports whether outdoor imagery exists near a coordinate, snapping to
//! the nearest panorama when it does.

use crate::constants::api::STREETVIEW_METADATA_URL;
use crate::error::{Error, Result};
use crate::oracle::{ImageryHit, ImageryOracle};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Default per-call timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Street View metadata backend
#[derive(Debug, Clone)]
pub struct StreetViewOracle {
    client: reqwest::Client,
    api_key: String,
}

/// Metadata endpoint response
///
/// `status` is `"OK"` on a hit; `"ZERO_RESULTS"` and `"NOT_FOUND"` are
/// clean misses.
#[derive(Debug, Deserialize)]
struct MetadataResponse {
    status: String,
    #[serde(default)]
    location: Option<MetadataLocation>,
    #[serde(default)]
    pano_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MetadataLocation {
    lat: f64,
    lng: f64,
}

impl StreetViewOracle {
    /// Create an oracle with the default per-call timeout
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_timeout(api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create an oracle with a custom per-call timeout
    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Oracle(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
        })
    }

    fn query_url(&self, lat: f64, lng: f64, radius_m: Option<u32>) -> String {
        let mut url = format!(
            "{}?location={:.6},{:.6}&source=outdoor&key={}",
            STREETVIEW_METADATA_URL, lat, lng, self.api_key
        );
        if let Some(radius) = radius_m {
            url.push_str(&format!("&radius={}", radius));
        }
        url
    }
}

impl ImageryOracle for StreetViewOracle {
    async fn find_imagery(
        &self,
        lat: f64,
        lng: f64,
        radius_m: Option<u32>,
    ) -> Result<Option<ImageryHit>> {
        let url = self.query_url(lat, lng, radius_m);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Oracle(format!("metadata request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Oracle(format!(
                "metadata endpoint returned status {}",
                response.status()
            )));
        }

        let metadata: MetadataResponse = response
            .json()
            .await
            .map_err(|e| Error::Oracle(format!("failed to parse metadata response: {}", e)))?;

        if metadata.status == "OK" {
            let location = metadata.location.ok_or_else(|| {
                Error::Oracle("OK response without a location".to_string())
            })?;
            return Ok(Some(ImageryHit {
                lat: location.lat,
                lng: location.lng,
                imagery_id: metadata.pano_id.unwrap_or_default(),
            }));
        }

        debug!(status = %metadata.status, lat, lng, ?radius_m, "imagery miss");
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_url_with_radius() {
        let oracle = StreetViewOracle::new("test-key").unwrap();
        let url = oracle.query_url(48.8584, 2.2945, Some(5000));
        assert!(url.contains("location=48.858400,2.294500"));
        assert!(url.contains("source=outdoor"));
        assert!(url.contains("radius=5000"));
        assert!(url.contains("key=test-key"));
    }

    #[test]
    fn test_query_url_unbounded() {
        let oracle = StreetViewOracle::new("test-key").unwrap();
        let url = oracle.query_url(0.0, 0.0, None);
        assert!(!url.contains("radius="));
    }

    #[test]
    fn test_metadata_response_parses_hit() {
        let json = r#"{
            "status": "OK",
            "location": {"lat": 40.758, "lng": -73.985},
            "pano_id": "abc123",
            "copyright": "(c)",
            "date": "2023-06"
        }"#;
        let parsed: MetadataResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.status, "OK");
        assert_eq!(parsed.pano_id.as_deref(), Some("abc123"));
        assert!(parsed.location.is_some());
    }

    #[test]
    fn test_metadata_response_parses_miss() {
        let parsed: MetadataResponse =
            serde_json::from_str(r#"{"status": "ZERO_RESULTS"}"#).unwrap();
        assert_eq!(parsed.status, "ZERO_RESULTS");
        assert!(parsed.location.is_none());
    }
}
