//! HTTP client for the Overpass API interpreter.
//!
//! Sends one POST per search with the Overpass QL query as the raw request
//! body, checks the status, and normalizes the `elements` array into places.
//! There is no internal retry: a failed attempt goes straight back to the
//! caller, which decides whether to offer a retry.

use std::time::Duration;

use nearby_core::{Coordinate, Place, PlaceSource, PlaceSourceError};
use reqwest::{Client, Url};

use crate::error::OverpassError;
use crate::normalize::normalize_elements;
use crate::query::build_nearby_query;
use crate::types::OverpassResponse;

pub const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Client for the Overpass API.
///
/// Use [`OverpassClient::new`] for production or
/// [`OverpassClient::with_endpoint`] to point at a mirror or a mock server.
pub struct OverpassClient {
    client: Client,
    endpoint: Url,
}

impl OverpassClient {
    /// Creates a client pointed at the public Overpass instance.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, OverpassError> {
        Self::with_endpoint(DEFAULT_ENDPOINT, timeout_secs, user_agent)
    }

    /// Creates a client with a custom interpreter endpoint.
    ///
    /// # Errors
    ///
    /// - [`OverpassError::Http`] if the `reqwest::Client` cannot be built.
    /// - [`OverpassError::InvalidEndpoint`] if `endpoint` is not an absolute
    ///   http(s) URL.
    pub fn with_endpoint(
        endpoint: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, OverpassError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let url = Url::parse(endpoint).map_err(|e| OverpassError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(OverpassError::InvalidEndpoint {
                endpoint: endpoint.to_owned(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        Ok(Self {
            client,
            endpoint: url,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches named amenities within `radius_m` of `origin`.
    ///
    /// # Errors
    ///
    /// - [`OverpassError::Http`] on network failure or timeout.
    /// - [`OverpassError::UnexpectedStatus`] on any non-2xx response
    ///   (the interpreter answers 429/504 under load).
    /// - [`OverpassError::Deserialize`] if the body is not the expected JSON.
    pub async fn fetch_nearby(
        &self,
        origin: Coordinate,
        radius_m: u32,
    ) -> Result<Vec<Place>, OverpassError> {
        let query = build_nearby_query(origin, radius_m);
        tracing::debug!(%origin, radius_m, query = %query, "querying overpass");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .header(reqwest::header::ACCEPT, "application/json")
            .body(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OverpassError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed: OverpassResponse =
            serde_json::from_str(&body).map_err(|e| OverpassError::Deserialize {
                context: format!("nearby(origin={origin}, radius={radius_m})"),
                source: e,
            })?;

        Ok(normalize_elements(parsed.elements))
    }
}

impl PlaceSource for OverpassClient {
    async fn fetch_nearby(
        &self,
        origin: Coordinate,
        radius_m: u32,
    ) -> Result<Vec<Place>, PlaceSourceError> {
        OverpassClient::fetch_nearby(self, origin, radius_m)
            .await
            .map_err(PlaceSourceError::from)
    }
}
