//! `daytrip` - single-day travel itinerary planning
//!
//! This library synthesizes a one-day itinerary for a city: it scores and ranks
//! the city's points of interest against the caller's preference and the
//! same-day rain probability, packs them greedily into the requested time
//! window with a simulated transport choice per stop, and projects rough
//! cost/time estimates for the strategies the caller did not choose.

pub mod alternatives;
pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod planner;
pub mod route;
pub mod scoring;
pub mod transport;

// Re-export core types for public API
pub use api::OpenMeteoClient;
pub use catalog::Catalog;
pub use config::PlannerConfig;
pub use error::PlannerError;
pub use models::{
    Alternative, Plan, PlanRequest, Poi, PoiCategory, Preference, Projection, ResolvedCity, Route,
    Stop, Totals, TransportMode, TransportOption, WeatherSnapshot,
};
pub use planner::{TripPlanner, build_plan};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
