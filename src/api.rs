//! Open-Meteo client for city resolution and the same-day weather outlook
//!
//! Both collaborators speak to the Open-Meteo APIs, which need no API key.
//! Requests are blocking with a configured timeout; transient failures retry
//! with exponential backoff up to the configured maximum.

use std::thread;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use tracing::{debug, info, warn};

use crate::Result;
use crate::config::ProviderConfig;
use crate::error::PlannerError;
use crate::models::{ResolvedCity, WeatherSnapshot};

/// Blocking HTTP client for the Open-Meteo geocoding and forecast APIs
pub struct OpenMeteoClient {
    client: Client,
    config: ProviderConfig,
}

impl OpenMeteoClient {
    /// Create a new client with the configured timeout
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("daytrip/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PlannerError::config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Resolve a free-text city name to coordinates and a display label
    ///
    /// An empty result set is a `CityNotFound` condition; the pipeline
    /// surfaces it before the engine runs.
    pub fn resolve_city(&self, name: &str) -> Result<ResolvedCity> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlannerError::validation("city name cannot be empty"));
        }

        let url = format!(
            "{}/search?name={}&count=1&language=en&format=json",
            self.config.geocoding_base_url,
            urlencoding::encode(name)
        );
        debug!(%url, "geocoding request");

        let response = self.make_request(&url)?;
        let parsed: openmeteo::GeocodingResponse = response
            .json()
            .map_err(|e| PlannerError::provider(format!("invalid geocoding response: {e}")))?;

        let city = openmeteo::city_from_results(parsed.results.unwrap_or_default(), name)?;
        info!(
            city = %city.display_name,
            lat = city.latitude,
            lon = city.longitude,
            "resolved city"
        );
        Ok(city)
    }

    /// Fetch the current forecast day for a coordinate pair
    pub fn daily_outlook(&self, latitude: f64, longitude: f64) -> Result<WeatherSnapshot> {
        let url = format!(
            "{}/forecast?latitude={latitude}&longitude={longitude}&daily=weather_code,temperature_2m_max,temperature_2m_min,precipitation_probability_max&timezone=auto&forecast_days=1",
            self.config.forecast_base_url
        );
        debug!(%url, "forecast request");

        let response = self.make_request(&url)?;
        let parsed: openmeteo::ForecastResponse = response
            .json()
            .map_err(|e| PlannerError::provider(format!("invalid forecast response: {e}")))?;

        let snapshot = openmeteo::snapshot_from_response(&parsed)?;
        info!(
            rain = snapshot.rain_probability,
            code = snapshot.weather_code,
            "retrieved same-day outlook"
        );
        Ok(snapshot)
    }

    /// Issue a GET with bounded retries
    ///
    /// Network errors and 5xx responses back off exponentially; 4xx responses
    /// fail immediately since retrying cannot help.
    fn make_request(&self, url: &str) -> Result<Response> {
        let max_attempts = self.config.max_retries + 1;
        let mut attempt = 0;

        loop {
            match self.client.get(url).send() {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }
                    if status.is_server_error() && attempt + 1 < max_attempts {
                        let backoff = Duration::from_millis(500 * 2u64.pow(attempt));
                        warn!(%status, attempt, ?backoff, "server error, retrying");
                        thread::sleep(backoff);
                        attempt += 1;
                        continue;
                    }
                    return Err(PlannerError::provider(format!(
                        "request failed with status {status}"
                    )));
                }
                Err(e) if attempt + 1 < max_attempts => {
                    let backoff = Duration::from_millis(500 * 2u64.pow(attempt));
                    warn!(error = %e, attempt, ?backoff, "network error, retrying");
                    thread::sleep(backoff);
                    attempt += 1;
                }
                Err(e) => {
                    return Err(PlannerError::provider(format!(
                        "network error after {max_attempts} attempts: {e}"
                    )));
                }
            }
        }
    }
}

/// Open-Meteo response structures and conversion helpers
mod openmeteo {
    use serde::Deserialize;

    use crate::error::PlannerError;
    use crate::models::{ResolvedCity, WeatherSnapshot};

    /// Geocoding response from Open-Meteo
    #[derive(Debug, Deserialize)]
    pub struct GeocodingResponse {
        pub results: Option<Vec<GeocodingResult>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct GeocodingResult {
        pub name: String,
        pub latitude: f64,
        pub longitude: f64,
        pub country: Option<String>,
    }

    /// Daily forecast response from Open-Meteo
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub daily: Option<DailyData>,
    }

    #[derive(Debug, Deserialize)]
    pub struct DailyData {
        #[serde(rename = "weather_code")]
        pub weather_code: Option<Vec<Option<u8>>>,
        #[serde(rename = "temperature_2m_max")]
        pub temperature_max: Option<Vec<Option<f32>>>,
        #[serde(rename = "temperature_2m_min")]
        pub temperature_min: Option<Vec<Option<f32>>>,
        #[serde(rename = "precipitation_probability_max")]
        pub rain_probability: Option<Vec<Option<u8>>>,
    }

    fn first<T: Copy>(values: &Option<Vec<Option<T>>>) -> Option<T> {
        values.as_ref().and_then(|v| v.first()).copied().flatten()
    }

    /// Map geocoding results to a resolved city, first match wins
    pub fn city_from_results(
        results: Vec<GeocodingResult>,
        query: &str,
    ) -> crate::Result<ResolvedCity> {
        let Some(best) = results.into_iter().next() else {
            return Err(PlannerError::city_not_found(format!(
                "no match for '{query}'; try an English city name"
            )));
        };

        let display_name = match &best.country {
            Some(country) => format!("{}, {}", best.name, country),
            None => best.name.clone(),
        };

        Ok(ResolvedCity {
            latitude: best.latitude,
            longitude: best.longitude,
            display_name,
        })
    }

    /// Map the first forecast day to a weather snapshot
    ///
    /// The precipitation probability drives scoring, so a response without it
    /// is a provider failure. Temperatures and the weather code degrade to
    /// neutral defaults.
    pub fn snapshot_from_response(response: &ForecastResponse) -> crate::Result<WeatherSnapshot> {
        let daily = response
            .daily
            .as_ref()
            .ok_or_else(|| PlannerError::provider("forecast response has no daily block"))?;

        let rain_probability = first(&daily.rain_probability).ok_or_else(|| {
            PlannerError::provider("forecast response is missing the precipitation probability")
        })?;

        let weather_code = first(&daily.weather_code).unwrap_or(0);

        Ok(WeatherSnapshot {
            weather_code,
            high_temp: first(&daily.temperature_max).unwrap_or(0.0),
            low_temp: first(&daily.temperature_min).unwrap_or(0.0),
            rain_probability,
            description: weather_code_to_description(weather_code).to_string(),
        })
    }

    /// Convert an Open-Meteo weather code to a human-readable description
    #[must_use]
    pub fn weather_code_to_description(code: u8) -> &'static str {
        match code {
            0 => "Clear sky",
            1 => "Mainly clear",
            2 => "Partly cloudy",
            3 => "Overcast",
            45 => "Fog",
            48 => "Depositing rime fog",
            51 => "Light drizzle",
            53 => "Moderate drizzle",
            55 => "Dense drizzle",
            56 => "Light freezing drizzle",
            57 => "Dense freezing drizzle",
            61 => "Slight rain",
            63 => "Moderate rain",
            65 => "Heavy rain",
            66 => "Light freezing rain",
            67 => "Heavy freezing rain",
            71 => "Slight snow fall",
            73 => "Moderate snow fall",
            75 => "Heavy snow fall",
            77 => "Snow grains",
            80 => "Slight rain showers",
            81 => "Moderate rain showers",
            82 => "Violent rain showers",
            85 => "Slight snow showers",
            86 => "Heavy snow showers",
            95 => "Thunderstorm",
            96 => "Thunderstorm with slight hail",
            99 => "Thunderstorm with heavy hail",
            _ => "Unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::openmeteo::*;
    use crate::error::PlannerError;

    #[test]
    fn test_geocoding_response_parses() {
        let json = r#"{
            "results": [
                { "name": "Tokyo", "latitude": 35.6895, "longitude": 139.6917,
                  "country": "Japan", "admin1": "Tokyo" }
            ]
        }"#;
        let parsed: GeocodingResponse = serde_json::from_str(json).unwrap();
        let city = city_from_results(parsed.results.unwrap(), "tokyo").unwrap();

        assert_eq!(city.display_name, "Tokyo, Japan");
        assert_eq!(city.latitude, 35.6895);
        assert_eq!(city.longitude, 139.6917);
    }

    #[test]
    fn test_city_without_country_keeps_the_bare_name() {
        let results = vec![GeocodingResult {
            name: "Nowhere".to_string(),
            latitude: 1.0,
            longitude: 2.0,
            country: None,
        }];
        let city = city_from_results(results, "nowhere").unwrap();
        assert_eq!(city.display_name, "Nowhere");
    }

    #[test]
    fn test_empty_geocoding_results_are_not_found() {
        let result = city_from_results(Vec::new(), "atlantis");
        assert!(matches!(result, Err(PlannerError::CityNotFound { .. })));
    }

    #[test]
    fn test_daily_forecast_maps_to_a_snapshot() {
        let json = r#"{
            "daily": {
                "weather_code": [61],
                "temperature_2m_max": [27.4],
                "temperature_2m_min": [19.1],
                "precipitation_probability_max": [72]
            }
        }"#;
        let parsed: ForecastResponse = serde_json::from_str(json).unwrap();
        let snapshot = snapshot_from_response(&parsed).unwrap();

        assert_eq!(snapshot.weather_code, 61);
        assert_eq!(snapshot.high_temp, 27.4);
        assert_eq!(snapshot.low_temp, 19.1);
        assert_eq!(snapshot.rain_probability, 72);
        assert_eq!(snapshot.description, "Slight rain");
    }

    #[test]
    fn test_missing_daily_block_is_a_provider_error() {
        let parsed: ForecastResponse = serde_json::from_str("{}").unwrap();
        let result = snapshot_from_response(&parsed);
        assert!(matches!(result, Err(PlannerError::Provider { .. })));
    }

    #[test]
    fn test_missing_rain_probability_is_a_provider_error() {
        let json = r#"{
            "daily": {
                "weather_code": [0],
                "temperature_2m_max": [27.4],
                "temperature_2m_min": [19.1],
                "precipitation_probability_max": [null]
            }
        }"#;
        let parsed: ForecastResponse = serde_json::from_str(json).unwrap();
        let result = snapshot_from_response(&parsed);
        assert!(matches!(result, Err(PlannerError::Provider { .. })));
    }

    #[test]
    fn test_weather_code_descriptions() {
        assert_eq!(weather_code_to_description(0), "Clear sky");
        assert_eq!(weather_code_to_description(63), "Moderate rain");
        assert_eq!(weather_code_to_description(95), "Thunderstorm");
        assert_eq!(weather_code_to_description(42), "Unknown");
    }
}
