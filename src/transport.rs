//! Closed-form transport simulation
//!
//! Transport is not routed geographically. A pseudo-distance is derived from
//! the POI's stay duration alone and fed through three fixed linear cost
//! models; the preference then picks among them.

use crate::models::{Poi, Preference, TransportMode, TransportOption};

fn base_unit(poi: &Poi) -> u32 {
    3 + poi.stay % 5
}

fn options_for(poi: &Poi) -> [TransportOption; 3] {
    let base = base_unit(poi);
    [
        TransportOption {
            mode: TransportMode::Transit,
            duration: base * 4 + 8,
            cost: base * 22 + 10,
        },
        TransportOption {
            mode: TransportMode::Bus,
            duration: base * 5 + 10,
            cost: base * 15 + 8,
        },
        TransportOption {
            mode: TransportMode::Taxi,
            duration: base * 3 + 6,
            cost: base * 60 + 70,
        },
    ]
}

/// Pick the transport option for a POI under the given preference
///
/// Cheapest and fastest minimize cost and duration respectively, ties going to
/// the earlier entry in the fixed transit/bus/taxi order. Less-walking always
/// rides a taxi; every other preference rides transit.
#[must_use]
pub fn simulate_transport(poi: &Poi, preference: Preference) -> TransportOption {
    let [transit, bus, taxi] = options_for(poi);
    match preference {
        Preference::Cheapest => min_by_key([transit, bus, taxi], |option| option.cost),
        Preference::Fastest => min_by_key([transit, bus, taxi], |option| option.duration),
        Preference::LessWalking => taxi,
        Preference::AvoidRain | Preference::Balanced => transit,
    }
}

fn min_by_key<F>(options: [TransportOption; 3], key: F) -> TransportOption
where
    F: Fn(&TransportOption) -> u32,
{
    let [first, second, third] = options;
    let mut best = first;
    if key(&second) < key(&best) {
        best = second;
    }
    if key(&third) < key(&best) {
        best = third;
    }
    best
}
