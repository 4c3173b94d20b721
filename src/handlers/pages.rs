use crate::app_state::AppState;
use crate::error::{AppError, AppResult};
use crate::services::currency::{normalize_currency, parse_amount, Conversion, CurrencyLookupError};
use crate::services::weather::WeatherReport;
use axum::{
    extract::{Query, State},
    response::Html,
};
use minijinja::context;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};

#[derive(Debug, Default, Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CurrencyQuery {
    pub amount: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Default, Serialize)]
struct WeatherPage {
    query: Option<String>,
    report: Option<WeatherReport>,
    error: Option<String>,
}

#[derive(Debug, Default, Serialize)]
struct CurrencyPage {
    amount: Option<String>,
    base: Option<String>,
    target: Option<String>,
    conversion: Option<Conversion>,
    error: Option<String>,
}

pub async fn home(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let html = state
        .templates
        .render("index.html", context! { version => env!("CARGO_PKG_VERSION") })?;
    Ok(Html(html))
}

pub async fn weather_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WeatherQuery>,
) -> AppResult<Html<String>> {
    if !state.weather.is_configured() {
        error!("WEATHERAPI_KEY is not set; weather page unavailable");
        return Err(AppError::Config("Weather API key is not configured.".to_string()));
    }

    let city = query.city.as_deref().map(str::trim).unwrap_or_default();
    let page = if city.is_empty() {
        WeatherPage::default()
    } else {
        match state.weather.current(city).await {
            Ok(report) => WeatherPage {
                query: Some(city.to_string()),
                report: Some(report),
                error: None,
            },
            Err(e) => {
                warn!(city = city, error = ?e, "Weather lookup failed");
                WeatherPage {
                    query: Some(city.to_string()),
                    report: None,
                    error: Some(e.to_string()),
                }
            }
        }
    };

    Ok(Html(state.templates.render("weather.html", &page)?))
}

pub async fn currency_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CurrencyQuery>,
) -> AppResult<Html<String>> {
    let non_empty = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let mut page = CurrencyPage {
        amount: non_empty(&query.amount),
        base: non_empty(&query.from),
        target: non_empty(&query.to),
        ..Default::default()
    };

    if let (Some(amount), Some(base), Some(target)) = (&page.amount, &page.base, &page.target) {
        match convert(&state, amount, base, target).await {
            Ok(conversion) => page.conversion = Some(conversion),
            Err(e) => {
                warn!(amount = %amount, from = %base, to = %target, error = ?e, "Currency conversion failed");
                page.error = Some(e.to_string());
            }
        }
    }

    Ok(Html(state.templates.render("currency.html", &page)?))
}

async fn convert(
    state: &AppState,
    amount: &str,
    from: &str,
    to: &str,
) -> Result<Conversion, CurrencyLookupError> {
    let amount = parse_amount(amount)?;
    let from = normalize_currency(from)?;
    let to = normalize_currency(to)?;
    state.exchange.convert(amount, &from, &to).await
}
