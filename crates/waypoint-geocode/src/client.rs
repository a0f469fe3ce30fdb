//! HTTP client for the geocoding provider's search API.
//!
//! Wraps `reqwest` with provider-specific error handling, access-token
//! management, and typed response deserialization. The base URL is
//! injectable so tests can point the client at a mock server.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::GeocodeError;
use crate::types::{ProviderFeature, SearchResponse};

const DEFAULT_BASE_URL: &str = "https://api.mapbox.com/search/geocode/v6";

/// Result types requested from the forward-search endpoint.
const SEARCH_TYPES: &str = "poi,address";

/// Client for the geocoding provider's REST API.
///
/// Use [`GeocodeClient::new`] for production or
/// [`GeocodeClient::with_base_url`] to point at a mock server in tests.
pub struct GeocodeClient {
    client: Client,
    access_token: String,
    base_url: Url,
}

impl GeocodeClient {
    /// Creates a new client pointed at the production geocoding API.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(access_token: &str, timeout_secs: u64) -> Result<Self, GeocodeError> {
        Self::with_base_url(access_token, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodeError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        access_token: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("waypoint/0.1 (travel-safety)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // Url::join appends endpoint segments instead of replacing the last
        // path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|_| GeocodeError::InvalidBaseUrl(base_url.to_string()))?;

        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            base_url,
        })
    }

    /// Forward-searches places by free-text query.
    ///
    /// `proximity` is an optional `(longitude, latitude)` bias point; when
    /// present the provider re-ranks results toward it. `limit` caps the
    /// number of returned features.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Http`] on network failure or non-2xx HTTP status.
    /// - [`GeocodeError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn forward(
        &self,
        query: &str,
        proximity: Option<(f64, f64)>,
        limit: usize,
    ) -> Result<Vec<ProviderFeature>, GeocodeError> {
        let mut params = vec![
            ("q".to_string(), query.to_string()),
            ("types".to_string(), SEARCH_TYPES.to_string()),
            ("limit".to_string(), limit.to_string()),
        ];
        if let Some((lon, lat)) = proximity {
            params.push(("proximity".to_string(), format!("{lon},{lat}")));
        }

        let url = self.build_url("forward", &params)?;
        let response = self.request_json(&url).await?;
        Ok(response.features)
    }

    /// Retrieves a single place by its provider id.
    ///
    /// Returns `None` when the provider has no feature for the id.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Http`] on network failure or non-2xx HTTP status.
    /// - [`GeocodeError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn retrieve(&self, place_id: &str) -> Result<Option<ProviderFeature>, GeocodeError> {
        let url = self.build_url(&format!("retrieve/{place_id}"), &[])?;
        let response = self.request_json(&url).await?;
        Ok(response.features.into_iter().next())
    }

    /// Reverse-geocodes a coordinate pair into place features.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Http`] on network failure or non-2xx HTTP status.
    /// - [`GeocodeError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn reverse(
        &self,
        longitude: f64,
        latitude: f64,
    ) -> Result<Vec<ProviderFeature>, GeocodeError> {
        let params = [
            ("longitude".to_string(), longitude.to_string()),
            ("latitude".to_string(), latitude.to_string()),
        ];
        let url = self.build_url("reverse", &params)?;
        let response = self.request_json(&url).await?;
        Ok(response.features)
    }

    /// Builds the full endpoint URL with properly percent-encoded query
    /// parameters, always appending the access token.
    fn build_url(&self, endpoint: &str, extra: &[(String, String)]) -> Result<Url, GeocodeError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|_| GeocodeError::InvalidBaseUrl(self.base_url.to_string()))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("access_token", &self.access_token);
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the
    /// response body as a feature collection.
    async fn request_json(&self, url: &Url) -> Result<SearchResponse, GeocodeError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
            // Redact the token from diagnostics.
            context: url.path().to_string(),
            source: e,
        })
    }
}
