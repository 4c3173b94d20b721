use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Current conditions for one city, as shown on the weather page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub city: String,
    pub temperature: f64,
    pub humidity: i64,
    pub description: String,
}

/// Lookup failures. The `Display` text is what the page shows to the user.
#[derive(Debug, Error)]
pub enum WeatherLookupError {
    #[error("Could not connect to the weather service.")]
    Connect(#[source] reqwest::Error),

    #[error("Could not parse weather data from the service.")]
    Parse(#[source] serde_json::Error),

    #[error("Weather API Error: {message}")]
    Api { code: i64, message: String },

    #[error("Could not find weather for '{0}'. Please try again with a valid city name.")]
    CityNotFound(String),

    #[error("The weather service address is misconfigured.")]
    BadUrl(#[from] url::ParseError),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// False when no API key is available; the page refuses to render then.
    fn is_configured(&self) -> bool;

    async fn current(&self, city: &str) -> Result<WeatherReport, WeatherLookupError>;
}

#[derive(Debug, Deserialize)]
struct WeatherApiResponse {
    #[serde(default)]
    location: Option<ApiLocation>,
    #[serde(default)]
    current: Option<ApiCurrent>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiLocation {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct ApiCurrent {
    #[serde(default)]
    temp_c: f64,
    #[serde(default)]
    humidity: i64,
    #[serde(default)]
    condition: Option<ApiCondition>,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: i64,
    message: String,
}

/// Decodes a weatherapi.com `current.json` body. The service reports errors
/// inside the JSON document, so the HTTP status is not consulted.
pub fn parse_weather_response(city: &str, body: &str) -> Result<WeatherReport, WeatherLookupError> {
    let response: WeatherApiResponse =
        serde_json::from_str(body).map_err(WeatherLookupError::Parse)?;

    if let Some(error) = response.error {
        return Err(WeatherLookupError::Api {
            code: error.code,
            message: error.message,
        });
    }

    let name = response
        .location
        .map(|location| location.name)
        .unwrap_or_default();
    if name.is_empty() {
        return Err(WeatherLookupError::CityNotFound(city.to_string()));
    }

    let current = response.current.unwrap_or(ApiCurrent {
        temp_c: 0.0,
        humidity: 0,
        condition: None,
    });

    Ok(WeatherReport {
        city: name,
        temperature: current.temp_c,
        humidity: current.humidity,
        description: current.condition.map(|c| c.text).unwrap_or_default(),
    })
}

/// weatherapi.com client.
#[derive(Clone)]
pub struct WeatherApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl WeatherApiClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.is_empty()),
        }
    }

    fn current_url(&self, api_key: &str, city: &str) -> Result<Url, url::ParseError> {
        Url::parse_with_params(
            &format!("{}/current.json", self.base_url),
            &[("key", api_key), ("q", city)],
        )
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn current(&self, city: &str) -> Result<WeatherReport, WeatherLookupError> {
        let api_key = self.api_key.as_deref().unwrap_or_default();
        let url = self.current_url(api_key, city).map_err(|e| {
            warn!(base_url = %self.base_url, error = %e, "Invalid weather API base URL");
            WeatherLookupError::BadUrl(e)
        })?;

        debug!(city = city, "Fetching current weather");
        let body = self
            .http
            .get(url)
            .send()
            .await
            .map_err(WeatherLookupError::Connect)?
            .text()
            .await
            .map_err(WeatherLookupError::Connect)?;

        parse_weather_response(city, &body)
    }
}
