use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Result of converting `amount` from one currency into another.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub amount: f64,
    pub base: String,
    pub target: String,
    pub result: f64,
    pub rate: f64,
    pub date: Option<String>,
}

#[derive(Debug, Error)]
pub enum CurrencyLookupError {
    #[error("Please enter a valid positive amount.")]
    InvalidAmount,

    #[error("Currency codes must be three letters, e.g. USD.")]
    InvalidCurrency,

    #[error("Could not connect to the exchange rate service.")]
    Connect(#[source] reqwest::Error),

    #[error("Could not parse exchange rate data from the service.")]
    Parse(#[source] serde_json::Error),

    #[error("Exchange rate API Error: {0}")]
    Api(String),

    #[error("No exchange rate available for {from} to {to}.")]
    RateMissing { from: String, to: String },

    #[error("The exchange rate service address is misconfigured.")]
    BadUrl(#[from] url::ParseError),
}

#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<Conversion, CurrencyLookupError>;
}

/// Parses a user-supplied amount; only finite positive numbers pass.
pub fn parse_amount(raw: &str) -> Result<f64, CurrencyLookupError> {
    match raw.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(CurrencyLookupError::InvalidAmount),
    }
}

/// Normalizes an ISO 4217 style code to upper case.
pub fn normalize_currency(raw: &str) -> Result<String, CurrencyLookupError> {
    let code = raw.trim().to_ascii_uppercase();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code)
    } else {
        Err(CurrencyLookupError::InvalidCurrency)
    }
}

#[derive(Debug, Deserialize)]
struct LatestResponse {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    rates: HashMap<String, f64>,
    #[serde(default)]
    message: Option<String>,
}

/// Decodes a frankfurter `latest` body requested with `amount`, `from` and
/// `to`; the rates it returns are already multiplied by the amount.
pub fn parse_latest_response(
    amount: f64,
    from: &str,
    to: &str,
    body: &str,
) -> Result<Conversion, CurrencyLookupError> {
    let response: LatestResponse = serde_json::from_str(body).map_err(CurrencyLookupError::Parse)?;

    if let Some(message) = response.message {
        return Err(CurrencyLookupError::Api(message));
    }

    let result = response
        .rates
        .get(to)
        .copied()
        .ok_or_else(|| CurrencyLookupError::RateMissing {
            from: from.to_string(),
            to: to.to_string(),
        })?;

    Ok(Conversion {
        amount,
        base: from.to_string(),
        target: to.to_string(),
        result,
        rate: result / amount,
        date: response.date,
    })
}

/// Client for a frankfurter-compatible exchange rate API.
#[derive(Clone)]
pub struct FrankfurterClient {
    http: reqwest::Client,
    base_url: String,
}

impl FrankfurterClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn latest_url(&self, amount: f64, from: &str, to: &str) -> Result<Url, url::ParseError> {
        Url::parse_with_params(
            &format!("{}/latest", self.base_url),
            &[("amount", amount.to_string().as_str()), ("from", from), ("to", to)],
        )
    }
}

#[async_trait]
impl ExchangeRateProvider for FrankfurterClient {
    async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<Conversion, CurrencyLookupError> {
        if from == to {
            return Ok(Conversion {
                amount,
                base: from.to_string(),
                target: to.to_string(),
                result: amount,
                rate: 1.0,
                date: None,
            });
        }

        let url = self.latest_url(amount, from, to).map_err(|e| {
            warn!(base_url = %self.base_url, error = %e, "Invalid exchange rate API base URL");
            CurrencyLookupError::BadUrl(e)
        })?;

        debug!(amount = amount, from = from, to = to, "Fetching exchange rate");
        let body = self
            .http
            .get(url)
            .send()
            .await
            .map_err(CurrencyLookupError::Connect)?
            .text()
            .await
            .map_err(CurrencyLookupError::Connect)?;

        parse_latest_response(amount, from, to, &body)
    }
}
