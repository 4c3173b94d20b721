use crate::{
    repositories::NoteStore,
    services::{ExchangeRateProvider, FrankfurterClient, NoteService, WeatherApiClient, WeatherProvider},
    templates::Templates,
};
use anyhow::{Context, Result};
use std::{sync::Arc, time::{Duration, Instant}};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub note_service: Arc<NoteService>,
    pub weather: Arc<dyn WeatherProvider>,
    pub exchange: Arc<dyn ExchangeRateProvider>,
    pub templates: Arc<Templates>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;

        let weather = Arc::new(WeatherApiClient::new(
            http.clone(),
            config.weather_api_base_url.clone(),
            config.weather_api_key.clone(),
        ));
        let exchange = Arc::new(FrankfurterClient::new(http, config.exchange_api_base_url.clone()));

        Self::with_providers(config, weather, exchange)
    }

    /// Builds the state around caller-supplied upstream providers.
    pub fn with_providers(
        config: AppConfig,
        weather: Arc<dyn WeatherProvider>,
        exchange: Arc<dyn ExchangeRateProvider>,
    ) -> Result<Self> {
        let templates = Templates::new().context("failed to compile page templates")?;
        let note_service = Arc::new(NoteService::new(Arc::new(NoteStore::new())));

        Ok(Self {
            config: Arc::new(config),
            note_service,
            weather,
            exchange,
            templates: Arc::new(templates),
            started_at: Instant::now(),
        })
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub environment: Environment,
    pub static_dir: String,
    pub cors_allowed_origins: Vec<String>,
    pub weather_api_key: Option<String>,
    pub weather_api_base_url: String,
    pub exchange_api_base_url: String,
    pub upstream_timeout: Duration,
    pub request_timeout: Duration,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Environment {
    Development,
    Testing,
    Production,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            environment: Environment::Development,
            static_dir: "static".to_string(),
            cors_allowed_origins: Vec::new(),
            weather_api_key: None,
            weather_api_base_url: "http://api.weatherapi.com/v1".to_string(),
            exchange_api_base_url: "https://api.frankfurter.app".to_string(),
            upstream_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads every setting through `lookup`, keeping the default for values
    /// that are absent or fail to parse.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            server_host: lookup("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: lookup("SERVER_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format: match lookup("LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            environment: match lookup("ENVIRONMENT").as_deref() {
                Some("production") => Environment::Production,
                Some("testing") => Environment::Testing,
                _ => Environment::Development,
            },
            static_dir: lookup("STATIC_DIR").unwrap_or(defaults.static_dir),
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|origin| !origin.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or(defaults.cors_allowed_origins),
            weather_api_key: lookup("WEATHERAPI_KEY").filter(|key| !key.is_empty()),
            weather_api_base_url: lookup("WEATHERAPI_BASE_URL").unwrap_or(defaults.weather_api_base_url),
            exchange_api_base_url: lookup("EXCHANGE_API_BASE_URL")
                .unwrap_or(defaults.exchange_api_base_url),
            upstream_timeout: lookup("UPSTREAM_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.upstream_timeout),
            request_timeout: lookup("REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Formats a duration the way humans read uptimes: `1h2m3s`, `4m0s`, `12s`.
pub fn format_uptime(duration: Duration) -> String {
    let total = duration.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
