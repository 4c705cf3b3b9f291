//! Embedded per-city POI catalog
//!
//! The catalog ships with the binary and is parsed once at construction. It is
//! read-only afterwards and may be shared freely across invocations.

use std::collections::HashMap;

use tracing::debug;

use crate::Result;
use crate::error::PlannerError;
use crate::models::Poi;

const EMBEDDED_CATALOG: &str = include_str!("catalog.json");

/// Immutable mapping from city key to its points of interest
#[derive(Debug, Clone)]
pub struct Catalog {
    cities: HashMap<String, Vec<Poi>>,
    default_city: String,
}

impl Catalog {
    /// Load the embedded catalog, falling back to `default_city` on unknown keys
    pub fn embedded(default_city: &str) -> Result<Self> {
        Self::from_json(EMBEDDED_CATALOG, default_city)
    }

    /// Parse a catalog from JSON and validate it
    pub fn from_json(json: &str, default_city: &str) -> Result<Self> {
        let cities: HashMap<String, Vec<Poi>> = serde_json::from_str(json)
            .map_err(|e| PlannerError::config(format!("invalid catalog data: {e}")))?;

        let default_city = normalize_key(default_city);
        if !cities.contains_key(&default_city) {
            return Err(PlannerError::config(format!(
                "default city '{default_city}' is not in the catalog"
            )));
        }

        for (city, pois) in &cities {
            if pois.is_empty() {
                return Err(PlannerError::config(format!(
                    "catalog entry for '{city}' has no points of interest"
                )));
            }
            for poi in pois {
                if poi.stay == 0 {
                    return Err(PlannerError::config(format!(
                        "'{}' in '{city}' has a zero stay duration",
                        poi.name
                    )));
                }
            }
        }

        Ok(Self {
            cities,
            default_city,
        })
    }

    /// Points of interest for a city, case-insensitive on the key
    ///
    /// Unrecognized keys fall back to the default city's catalog rather than
    /// failing.
    #[must_use]
    pub fn pois_for(&self, city: &str) -> &[Poi] {
        let key = normalize_key(city);
        if let Some(pois) = self.cities.get(&key) {
            return pois;
        }
        debug!(
            requested = %key,
            fallback = %self.default_city,
            "no catalog entry, using the default city"
        );
        &self.cities[&self.default_city]
    }

    /// Whether the catalog has an entry of its own for this city
    #[must_use]
    pub fn knows(&self, city: &str) -> bool {
        self.cities.contains_key(&normalize_key(city))
    }
}

fn normalize_key(city: &str) -> String {
    city.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = Catalog::embedded("tokyo").unwrap();
        assert!(catalog.knows("tokyo"));
        assert!(catalog.knows("taipei"));
        assert!(catalog.knows("paris"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = Catalog::embedded("tokyo").unwrap();
        assert_eq!(catalog.pois_for("Taipei"), catalog.pois_for("taipei"));
        assert_eq!(catalog.pois_for("  PARIS "), catalog.pois_for("paris"));
    }

    #[test]
    fn test_unknown_city_falls_back_to_default() {
        let catalog = Catalog::embedded("tokyo").unwrap();
        assert!(!catalog.knows("atlantis"));
        assert_eq!(catalog.pois_for("atlantis"), catalog.pois_for("tokyo"));
    }

    #[test]
    fn test_every_poi_has_positive_stay() {
        let catalog = Catalog::embedded("tokyo").unwrap();
        for city in ["tokyo", "taipei", "paris"] {
            for poi in catalog.pois_for(city) {
                assert!(poi.stay > 0, "{} has zero stay", poi.name);
            }
        }
    }

    #[test]
    fn test_missing_default_city_is_a_config_error() {
        let result = Catalog::embedded("atlantis");
        assert!(matches!(result, Err(PlannerError::Config { .. })));
    }

    #[test]
    fn test_zero_stay_rejected_at_load() {
        let json = r#"{
            "nowhere": [
                { "name": "Void", "category": "mixed",
                  "latitude": 0.0, "longitude": 0.0,
                  "stay": 0, "cost": 0, "open": "09:00", "close": "17:00" }
            ]
        }"#;
        let result = Catalog::from_json(json, "nowhere");
        assert!(matches!(result, Err(PlannerError::Config { .. })));
    }
}
