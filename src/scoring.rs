//! POI scoring and ranking

use crate::models::{Poi, PoiCategory, Preference};

const BASE_SCORE: f64 = 50.0;

/// Preference-weighted desirability of a single POI
///
/// Pure and deterministic. Modifiers stack independently: the category and
/// free-entry bonuses always apply, the rest depend on the preference.
#[must_use]
pub fn score_poi(poi: &Poi, preference: Preference, rain_probability: u8) -> f64 {
    let mut score = BASE_SCORE;

    if poi.category == PoiCategory::Indoor {
        score += 10.0;
    }
    if poi.cost == 0 {
        score += 8.0;
    }

    match preference {
        Preference::Cheapest if poi.cost == 0 => score += 20.0,
        Preference::Fastest => score += f64::from(120u32.saturating_sub(poi.stay)) / 4.0,
        Preference::AvoidRain if rain_probability > 60 => match poi.category {
            PoiCategory::Indoor => score += 30.0,
            PoiCategory::Outdoor => score -= 20.0,
            PoiCategory::Mixed => {}
        },
        Preference::LessWalking if poi.category == PoiCategory::Outdoor => score -= 10.0,
        _ => {}
    }

    score
}

/// Order POIs by descending score
///
/// The sort is stable: equally scored POIs keep their catalog order, which
/// makes the packer's output reproducible.
#[must_use]
pub fn rank_pois(pois: &[Poi], preference: Preference, rain_probability: u8) -> Vec<&Poi> {
    let mut scored: Vec<(&Poi, f64)> = pois
        .iter()
        .map(|poi| (poi, score_poi(poi, preference, rain_probability)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.into_iter().map(|(poi, _)| poi).collect()
}
