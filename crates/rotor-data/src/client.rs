//! FMP API client implementation.

use std::env;
use std::time::Duration;

use log::debug;
use reqwest::Client;
use rotor_traits::{Date, PriceSeries};

use crate::{
    Result,
    error::DataError,
    loader::PriceLoader,
    types::{HistoricalPrice, PriceResponse, to_series},
};

/// Base URL for the FMP stable API.
const FMP_BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Request timeout used by [`FmpClient::new`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Financial Modeling Prep API client.
#[derive(Debug, Clone)]
pub struct FmpClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl FmpClient {
    /// Create a new FMP client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: build_client(DEFAULT_TIMEOUT),
            api_key: api_key.into(),
            base_url: FMP_BASE_URL.to_string(),
        }
    }

    /// Give up on requests after `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_client(timeout);
        self
    }

    /// Point the client at a different API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Create a new FMP client from the `FMP_API_KEY` environment variable.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_key = env::var("FMP_API_KEY").map_err(|_| DataError::MissingApiKey)?;
        if api_key.trim().is_empty() {
            return Err(DataError::MissingApiKey);
        }

        Ok(Self::new(api_key))
    }

    /// Build a URL with the API key.
    fn url(&self, endpoint: &str) -> String {
        if endpoint.contains('?') {
            format!("{}/{endpoint}&apikey={}", self.base_url, self.api_key)
        } else {
            format!("{}/{endpoint}?apikey={}", self.base_url, self.api_key)
        }
    }

    /// Make a GET request and return the body text.
    async fn get(&self, endpoint: &str) -> Result<String> {
        let url = self.url(endpoint);
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(DataError::Api(format!("HTTP {status}: {text}")));
        }

        let text = response.text().await?;

        // Check for error responses
        if text.contains("\"Error Message\"") || text.contains("\"error\"") {
            return Err(DataError::Api(text));
        }

        Ok(text)
    }

    /// Get daily price history for a symbol.
    ///
    /// Rows come back newest first; use [`to_series`] to get a sorted series.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the body is not a
    /// price list.
    pub async fn historical_prices(
        &self,
        symbol: &str,
        from: Option<Date>,
        to: Option<Date>,
    ) -> Result<Vec<HistoricalPrice>> {
        let text = self.get(&history_endpoint(symbol, from, to)).await?;
        let response: PriceResponse = serde_json::from_str(&text)?;
        Ok(response.into_rows())
    }
}

fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Endpoint path for the end-of-day history of `symbol`.
fn history_endpoint(symbol: &str, from: Option<Date>, to: Option<Date>) -> String {
    let mut params = String::new();
    if let Some(f) = from {
        params.push_str(&format!("&from={}", f.format("%Y-%m-%d")));
    }
    if let Some(t) = to {
        params.push_str(&format!("&to={}", t.format("%Y-%m-%d")));
    }
    format!(
        "historical-price-eod/full?symbol={}{}",
        symbol.trim().to_uppercase(),
        params
    )
}

impl PriceLoader for FmpClient {
    async fn fetch(&self, symbol: &str, start: Date) -> Result<PriceSeries> {
        debug!("requesting {symbol} prices from {start}");
        let rows = self.historical_prices(symbol, Some(start), None).await?;
        let series = to_series(&rows);
        if series.is_empty() {
            return Err(DataError::NoData(symbol.to_string()));
        }
        Ok(series)
    }
}
