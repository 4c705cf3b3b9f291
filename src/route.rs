//! Greedy first-fit packing of ranked POIs into a day window
//!
//! The packer is intentionally a heuristic: it favors POIs in rank order
//! subject to a feasibility check, never reorders accepted stops and never
//! revisits a skipped candidate. It does not maximize the packed value; an
//! optimal subset would need a knapsack search.

use chrono::NaiveTime;
use tracing::debug;

use crate::Result;
use crate::error::PlannerError;
use crate::models::{Poi, Preference, Route, Stop};
use crate::transport::simulate_transport;

const TIME_FORMAT: &str = "%H:%M";

fn parse_time_of_day(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
        .map_err(|_| PlannerError::validation(format!("expected a HH:MM time of day, got '{value}'")))
}

/// Width of the planning window in minutes
///
/// Fails with `InvalidWindow` when the end is not strictly after the start.
pub fn window_minutes(start: &str, end: &str) -> Result<u32> {
    let start_time = parse_time_of_day(start)?;
    let end_time = parse_time_of_day(end)?;

    let width = (end_time - start_time).num_minutes();
    if width <= 0 {
        return Err(PlannerError::invalid_window(format!(
            "end time {end} is not after start time {start}"
        )));
    }
    Ok(width as u32)
}

/// Pack ranked POIs into the window, first fit wins
///
/// Each candidate is charged its transport duration plus its stay. A candidate
/// that does not fit is skipped for good, but iteration continues: a later,
/// smaller POI may still fit.
pub fn build_route(
    ranked: &[&Poi],
    start: &str,
    end: &str,
    preference: Preference,
) -> Result<Route> {
    let window = window_minutes(start, end)?;

    let mut used = 0u32;
    let mut stops = Vec::new();

    for poi in ranked {
        let transport = simulate_transport(poi, preference);
        let needed = transport.duration + poi.stay;
        if used + needed > window {
            debug!(poi = %poi.name, needed, remaining = window - used, "skipped, does not fit");
            continue;
        }
        used += needed;
        stops.push(Stop {
            poi: (*poi).clone(),
            transport,
        });
    }

    debug!(stops = stops.len(), used, window, "route packed");
    Ok(Route { stops })
}
