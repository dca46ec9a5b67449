//! Open-data API client implementation.
//!
//! The analytical core never owns a connection; this client is the
//! data-access collaborator that materializes raw document rows before a
//! pipeline run. Each dataset resource returns a JSON array of documents
//! with dataset-specific field names.

use crate::{Result, error::PulseError, registry::DatasetInfo};
use marasi_traits::{RawRecord, RawSeries};
use reqwest::Client;
use std::env;

/// Environment variable naming the API base URL.
const DATA_URL_VAR: &str = "MARASI_DATA_URL";

/// Environment variable naming the optional API key.
const API_KEY_VAR: &str = "MARASI_API_KEY";

/// Client for the open-data API serving the raw market datasets.
#[derive(Debug, Clone)]
pub struct PulseClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl PulseClient {
    /// Create a new client for the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Create a client from the `MARASI_DATA_URL` and `MARASI_API_KEY`
    /// environment variables.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL variable is not set.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = env::var(DATA_URL_VAR).map_err(|_| PulseError::MissingBaseUrl)?;
        let api_key = env::var(API_KEY_VAR).ok();

        Ok(Self::new(base_url, api_key))
    }

    /// Build a URL, appending the API key when configured.
    fn url(&self, resource: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        match &self.api_key {
            Some(key) if resource.contains('?') => {
                format!("{base}/{resource}&apikey={key}")
            }
            Some(key) => format!("{base}/{resource}?apikey={key}"),
            None => format!("{base}/{resource}"),
        }
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, resource: &str) -> Result<T> {
        let url = self.url(resource);
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(PulseError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(PulseError::Api(format!("HTTP {status}: {text}")));
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(PulseError::Json)
    }

    /// Fetch the raw document rows for a dataset resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a
    /// JSON array of documents.
    pub async fn records(&self, resource: &str) -> Result<Vec<RawRecord>> {
        self.get(resource).await
    }

    /// Fetch a registered dataset as a named raw series, ready to hand to
    /// the pipeline together with the registry's field mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn dataset(&self, info: &DatasetInfo) -> Result<RawSeries> {
        let records = self.records(info.resource).await?;
        Ok(RawSeries::new(info.name, records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_without_key() {
        let client = PulseClient::new("https://data.example.com/v1/", None);
        assert_eq!(
            client.url("economy/gdp"),
            "https://data.example.com/v1/economy/gdp"
        );
    }

    #[test]
    fn test_url_appends_key() {
        let client =
            PulseClient::new("https://data.example.com/v1", Some("secret".to_string()));
        assert_eq!(
            client.url("economy/gdp"),
            "https://data.example.com/v1/economy/gdp?apikey=secret"
        );
        assert_eq!(
            client.url("economy/gdp?year=2022"),
            "https://data.example.com/v1/economy/gdp?year=2022&apikey=secret"
        );
    }
}
