//! What-if projections for strategies the caller did not choose
//!
//! These are multiplicative estimates derived from the realized route totals,
//! not re-runs of the packer. The factors are part of the output contract and
//! must not drift.

use crate::models::{Alternative, Preference, Projection, Route, Totals};

const COST_PROJECTION_FACTOR: f64 = 0.82;
const TIME_PROJECTION_FACTOR: f64 = 0.86;

/// Exactly two estimates: one cost-oriented, one time-oriented
#[must_use]
pub fn suggest_alternatives(route: &Route, preference: Preference) -> Vec<Alternative> {
    let base = Totals::of(route);

    let cost_strategy = if preference == Preference::Cheapest {
        Preference::Fastest
    } else {
        Preference::Cheapest
    };
    let time_strategy = if preference == Preference::Fastest {
        Preference::Balanced
    } else {
        Preference::Fastest
    };

    vec![
        Alternative {
            strategy: cost_strategy,
            projection: Projection::TotalCost(
                (f64::from(base.cost) * COST_PROJECTION_FACTOR).round() as u32,
            ),
        },
        Alternative {
            strategy: time_strategy,
            projection: Projection::TotalMinutes(
                (f64::from(base.minutes) * TIME_PROJECTION_FACTOR).round() as u32,
            ),
        },
    ]
}
