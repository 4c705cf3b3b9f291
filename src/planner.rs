//! Plan assembly and the resolve → weather → engine pipeline

use tracing::{debug, info};

use crate::Result;
use crate::alternatives::suggest_alternatives;
use crate::api::OpenMeteoClient;
use crate::catalog::Catalog;
use crate::config::PlannerConfig;
use crate::models::{Plan, PlanRequest, Poi, Totals, WeatherSnapshot};
use crate::route::build_route;
use crate::scoring::rank_pois;

/// Run the pure itinerary engine over an already-gathered set of inputs
///
/// Rank, pack, total, project, assemble. A single deterministic pass with no
/// I/O; every failure mode is a labeled condition from the window check.
pub fn build_plan(
    pois: &[Poi],
    request: &PlanRequest,
    city_label: &str,
    weather: &WeatherSnapshot,
) -> Result<Plan> {
    let ranked = rank_pois(pois, request.preference, weather.rain_probability);
    debug!(
        candidates = ranked.len(),
        preference = %request.preference,
        rain = weather.rain_probability,
        "ranked catalog"
    );

    let route = build_route(&ranked, &request.start, &request.end, request.preference)?;
    let totals = Totals::of(&route);
    let alternatives = suggest_alternatives(&route, request.preference);

    info!(
        stops = route.len(),
        cost = totals.cost,
        minutes = totals.minutes,
        "plan assembled"
    );

    Ok(Plan {
        city: city_label.to_string(),
        weather: weather.clone(),
        route,
        totals,
        alternatives,
    })
}

/// One-request planning service
///
/// Owns the HTTP client and the catalog; constructed once, shared read-only.
/// City resolution must complete before the weather call (the forecast needs
/// resolved coordinates), and both before the engine runs.
pub struct TripPlanner {
    client: OpenMeteoClient,
    catalog: Catalog,
}

impl TripPlanner {
    /// Build a planner from configuration
    pub fn new(config: &PlannerConfig) -> Result<Self> {
        Ok(Self {
            client: OpenMeteoClient::new(&config.providers)?,
            catalog: Catalog::embedded(&config.catalog.default_city)?,
        })
    }

    /// Resolve the city, fetch the same-day outlook, then run the engine
    ///
    /// No partial results: the request either yields a Plan or fails with a
    /// labeled error before the engine runs.
    pub fn plan(&self, request: &PlanRequest) -> Result<Plan> {
        let city = self.client.resolve_city(&request.city)?;
        let weather = self
            .client
            .daily_outlook(city.latitude, city.longitude)?;

        let pois = self.catalog.pois_for(&request.city);
        build_plan(pois, request, &city.display_name, &weather)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlannerError;
    use crate::models::{PoiCategory, Preference};
    use chrono::NaiveTime;

    fn poi(name: &str, category: PoiCategory, stay: u32, cost: u32) -> Poi {
        Poi {
            name: name.to_string(),
            category,
            latitude: 0.0,
            longitude: 0.0,
            stay,
            cost,
            open: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            close: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        }
    }

    fn dry_weather() -> WeatherSnapshot {
        WeatherSnapshot {
            weather_code: 1,
            high_temp: 24.0,
            low_temp: 16.0,
            rain_probability: 10,
            description: "Mainly clear".to_string(),
        }
    }

    fn request(preference: Preference) -> PlanRequest {
        PlanRequest {
            city: "testville".to_string(),
            start: "09:00".to_string(),
            end: "18:00".to_string(),
            budget: 2000,
            preference,
        }
    }

    #[test]
    fn test_plan_carries_its_inputs_through() {
        let pois = vec![
            poi("museum", PoiCategory::Indoor, 90, 620),
            poi("park", PoiCategory::Outdoor, 75, 0),
        ];

        let plan = build_plan(&pois, &request(Preference::Balanced), "Testville, TV", &dry_weather())
            .unwrap();

        assert_eq!(plan.city, "Testville, TV");
        assert_eq!(plan.weather, dry_weather());
        assert_eq!(plan.route.len(), 2);
        assert_eq!(plan.alternatives.len(), 2);
        assert_eq!(plan.totals, Totals::of(&plan.route));
    }

    #[test]
    fn test_invalid_window_aborts_before_assembly() {
        let pois = vec![poi("museum", PoiCategory::Indoor, 90, 620)];
        let mut request = request(Preference::Balanced);
        request.start = "18:00".to_string();
        request.end = "09:00".to_string();

        let result = build_plan(&pois, &request, "Testville", &dry_weather());
        assert!(matches!(result, Err(PlannerError::InvalidWindow { .. })));
    }

    #[test]
    fn test_totals_match_the_stop_sums() {
        let pois = vec![
            poi("museum", PoiCategory::Indoor, 90, 620),
            poi("tower", PoiCategory::Indoor, 80, 2100),
        ];

        let plan =
            build_plan(&pois, &request(Preference::Balanced), "Testville", &dry_weather()).unwrap();

        let cost: u32 = plan
            .route
            .stops
            .iter()
            .map(|s| s.transport.cost + s.poi.cost)
            .sum();
        let minutes: u32 = plan
            .route
            .stops
            .iter()
            .map(|s| s.transport.duration + s.poi.stay)
            .sum();
        assert_eq!(plan.totals.cost, cost);
        assert_eq!(plan.totals.minutes, minutes);
    }
}
