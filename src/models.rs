//! Data models for the itinerary planner
//!
//! This module contains the catalog-facing POI types, the transport and route
//! types produced by the engine, the weather snapshot consumed by scoring, and
//! the plan record handed to the rendering layer.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// Serde adapter for "HH:MM" time-of-day strings
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&value, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Whether a point of interest is sheltered from the weather
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoiCategory {
    Indoor,
    Outdoor,
    Mixed,
}

impl fmt::Display for PoiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PoiCategory::Indoor => "indoor",
            PoiCategory::Outdoor => "outdoor",
            PoiCategory::Mixed => "mixed",
        };
        write!(f, "{label}")
    }
}

/// A visitable attraction from the per-city catalog
///
/// Coordinates and opening hours are carried for display; scheduling only
/// looks at category, stay duration and cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    /// Attraction name
    pub name: String,
    /// Weather-shelter category
    pub category: PoiCategory,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Stay duration in minutes, always positive
    pub stay: u32,
    /// Entry cost in the local display currency, zero for free attractions
    pub cost: u32,
    /// Opening time of day
    #[serde(with = "hhmm")]
    pub open: NaiveTime,
    /// Closing time of day
    #[serde(with = "hhmm")]
    pub close: NaiveTime,
}

/// Caller-selected optimization bias
///
/// `Balanced` is the neutral strategy: it applies none of the
/// preference-specific scoring modifiers and rides transit. Unrecognized
/// strings fail parsing at the input boundary rather than silently mapping to
/// a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preference {
    Balanced,
    Cheapest,
    Fastest,
    AvoidRain,
    LessWalking,
}

impl Default for Preference {
    fn default() -> Self {
        Self::Balanced
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Preference::Balanced => "balanced",
            Preference::Cheapest => "cheapest",
            Preference::Fastest => "fastest",
            Preference::AvoidRain => "avoid_rain",
            Preference::LessWalking => "less_walking",
        };
        write!(f, "{label}")
    }
}

impl FromStr for Preference {
    type Err = PlannerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "balanced" => Ok(Self::Balanced),
            "cheapest" => Ok(Self::Cheapest),
            "fastest" => Ok(Self::Fastest),
            "avoid_rain" => Ok(Self::AvoidRain),
            "less_walking" => Ok(Self::LessWalking),
            other => Err(PlannerError::validation(format!(
                "unknown preference '{other}', expected one of balanced, cheapest, fastest, avoid_rain, less_walking"
            ))),
        }
    }
}

/// Mode of transport toward a stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Transit,
    Bus,
    Taxi,
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransportMode::Transit => "transit",
            TransportMode::Bus => "bus",
            TransportMode::Taxi => "taxi",
        };
        write!(f, "{label}")
    }
}

/// A simulated transport choice, computed fresh per POI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportOption {
    pub mode: TransportMode,
    /// Travel time in minutes
    pub duration: u32,
    /// Fare in the local display currency
    pub cost: u32,
}

/// A POI bound to the transport option chosen to reach it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub poi: Poi,
    pub transport: TransportOption,
}

/// Ordered sequence of stops, order = inclusion order during packing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub stops: Vec<Stop>,
}

impl Route {
    #[must_use]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

/// Aggregate cost and minutes (transport + stay) across a route
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub cost: u32,
    pub minutes: u32,
}

impl Totals {
    /// Sum realized cost and minutes over every stop of a route
    #[must_use]
    pub fn of(route: &Route) -> Self {
        route.stops.iter().fold(Self::default(), |acc, stop| Self {
            cost: acc.cost + stop.transport.cost + stop.poi.cost,
            minutes: acc.minutes + stop.transport.duration + stop.poi.stay,
        })
    }
}

/// Same-day weather signal, supplied by the forecast collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// WMO weather code for the day
    pub weather_code: u8,
    /// Daily high in Celsius
    pub high_temp: f32,
    /// Daily low in Celsius
    pub low_temp: f32,
    /// Maximum precipitation probability for the day (0-100)
    pub rain_probability: u8,
    /// Human-readable description of the weather code
    pub description: String,
}

/// Output of city resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedCity {
    pub latitude: f64,
    pub longitude: f64,
    /// Display label, "Name, Country" when the country is known
    pub display_name: String,
}

/// Projected total for a strategy the caller did not choose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    TotalCost(u32),
    TotalMinutes(u32),
}

/// A what-if estimate for an alternative strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    pub strategy: Preference,
    pub projection: Projection,
}

/// One planning request as received from the caller
///
/// The budget is informational: it is echoed back as a delta against the
/// realized cost and never constrains the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub city: String,
    /// Window start as a "HH:MM" 24-hour string
    pub start: String,
    /// Window end as a "HH:MM" 24-hour string
    pub end: String,
    pub budget: u32,
    pub preference: Preference,
}

/// The terminal output of one planning invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Resolved city label
    pub city: String,
    pub weather: WeatherSnapshot,
    pub route: Route,
    pub totals: Totals,
    pub alternatives: Vec<Alternative>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_poi() -> Poi {
        Poi {
            name: "Sample Museum".to_string(),
            category: PoiCategory::Indoor,
            latitude: 35.7188,
            longitude: 139.7765,
            stay: 90,
            cost: 620,
            open: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            close: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_preference_round_trip() {
        for label in ["balanced", "cheapest", "fastest", "avoid_rain", "less_walking"] {
            let preference: Preference = label.parse().unwrap();
            assert_eq!(preference.to_string(), label);
        }
    }

    #[test]
    fn test_preference_unknown_string_fails() {
        let result = "scenic".parse::<Preference>();
        assert!(matches!(result, Err(PlannerError::Validation { .. })));
    }

    #[test]
    fn test_poi_serde_round_trip() {
        let poi = sample_poi();
        let json = serde_json::to_string(&poi).unwrap();
        assert!(json.contains("\"indoor\""));
        assert!(json.contains("\"09:30\""));

        let parsed: Poi = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, poi);
    }

    #[test]
    fn test_poi_rejects_malformed_time_of_day() {
        let json = r#"{
            "name": "Broken", "category": "indoor",
            "latitude": 0.0, "longitude": 0.0,
            "stay": 60, "cost": 0,
            "open": "9am", "close": "17:00"
        }"#;
        assert!(serde_json::from_str::<Poi>(json).is_err());
    }

    #[test]
    fn test_totals_sum_transport_and_stay() {
        let poi = sample_poi();
        let transport = TransportOption {
            mode: TransportMode::Transit,
            duration: 20,
            cost: 76,
        };
        let route = Route {
            stops: vec![
                Stop {
                    poi: poi.clone(),
                    transport,
                },
                Stop { poi, transport },
            ],
        };

        let totals = Totals::of(&route);
        assert_eq!(totals.cost, 2 * (76 + 620));
        assert_eq!(totals.minutes, 2 * (20 + 90));
    }

    #[test]
    fn test_totals_of_empty_route() {
        assert_eq!(Totals::of(&Route::default()), Totals::default());
    }
}
