//! Spatial hazard monitoring: restricted-area entries, terrain collisions
//! and runway wind assessment.
//!
//! Containment tests are expensive enough to schedule by distance: each
//! tracked polygon carries the distance that must be flown before the next
//! check, and the counter is rebuilt from the actual distance-to-boundary
//! whenever it runs out.

use crate::aircraft::state::AircraftState;
use crate::control::events::{EventSink, GameEvent, RadioSector};
use crate::environment::{Airspace, Runway, Terrain};
use crate::navigation::RouteProvider;
use crate::utils::constants::*;
use crate::utils::units::knots_to_kps;
use crate::utils::vectors::{distance_to_polygon, point_in_polygon, point_to_multipolygon};

/// Inspect the aircraft's new position and raise hazard state/events.
/// Skipped entirely while taxiing.
pub fn scan<R: RouteProvider, S: EventSink>(
    aircraft: &mut AircraftState,
    route: &R,
    airspace: &Airspace,
    dt: f64,
    sink: &mut S,
) {
    if aircraft.is_taxiing() {
        return;
    }

    scan_restricted_areas(aircraft, airspace, dt, sink);

    if !airspace.terrain.is_empty() && aircraft.is_airborne(route, airspace) {
        scan_terrain(aircraft, airspace, dt, sink);
    }
}

fn scan_restricted_areas<S: EventSink>(
    aircraft: &mut AircraftState,
    airspace: &Airspace,
    dt: f64,
    sink: &mut S,
) {
    let traveled_km = knots_to_kps(aircraft.ground_speed) * dt;
    let mut warning = false;

    for track in &mut aircraft.restricted_tracks {
        let Some(area) = airspace.restricted_areas.get(track.index) else {
            continue;
        };

        // not yet relevant below the area's floor
        if area.floor > aircraft.altitude {
            track.range = None;
            track.inside = false;

            continue;
        }

        if let Some(range) = &mut track.range {
            *range -= traveled_km;
        }

        let needs_check = match track.range {
            None => true,
            Some(range) => range <= 0.0,
        };

        if needs_check {
            let now_inside = point_in_polygon(aircraft.position, &area.coordinates);

            if now_inside && !track.inside {
                // a fresh bust; once inside, checks can be sparse
                sink.record(GameEvent::AirspaceBust);
                track.range =
                    Some(knots_to_kps(aircraft.speed) * RESTRICTED_AREA_RECHECK_AFTER_ENTRY);
            } else {
                // planes skimming the boundary at a shallow angle would
                // otherwise recheck every tick
                let minimum_range =
                    knots_to_kps(aircraft.speed) * RESTRICTED_AREA_MINIMUM_CHECK_INTERVAL;
                let boundary_distance = distance_to_polygon(aircraft.position, &area.coordinates);

                track.range = Some(minimum_range.max(boundary_distance));
            }

            track.inside = now_inside;
        }

        warning = warning || track.inside;
    }

    aircraft.warning = warning;
}

fn scan_terrain<S: EventSink>(
    aircraft: &mut AircraftState,
    airspace: &Airspace,
    dt: f64,
    sink: &mut S,
) {
    let traveled_km = knots_to_kps(aircraft.ground_speed) * dt;
    let band = Terrain::band_for_altitude(aircraft.altitude);

    if band != aircraft.terrain_band {
        if let Some(previous) = aircraft.terrain_ranges.get_mut(&aircraft.terrain_band) {
            for range in previous.iter_mut() {
                *range = f64::INFINITY;
            }
        }

        aircraft.terrain_band = band;
    }

    let callsign = aircraft.callsign();
    let position = aircraft.position;
    let polygons = airspace.terrain.polygons_in_band(band);

    let Some(ranges) = aircraft.terrain_ranges.get_mut(&band) else {
        return;
    };

    for (id, range) in ranges.iter_mut().enumerate() {
        *range -= traveled_km;

        if *range > 0.0 && range.is_finite() {
            continue;
        }

        let Some(polygon) = polygons.get(id) else {
            continue;
        };

        let probe = point_to_multipolygon(position, &polygon.rings);

        if probe.inside {
            aircraft.altitude = 0.0;

            if !aircraft.hit {
                aircraft.hit = true;

                log::warn!("{callsign} collided with terrain in controlled flight");
                sink.radio_call("we're going down!", RadioSector::Tower, true);
                sink.record(GameEvent::Collision);
            }
        } else {
            *range = TERRAIN_MINIMUM_CHECK_DISTANCE.max(probe.distance);
        }
    }
}

/// Assess the runway wind for a takeoff or landing and record any
/// crosswind/tailwind events. Called by the external takeoff and landing
/// actions with the operation name ("taking off"/"landed").
pub fn score_wind<S: EventSink>(
    aircraft: &AircraftState,
    runway: &Runway,
    airspace: &Airspace,
    action: &str,
    sink: &mut S,
) {
    let components = runway.wind_components(&airspace.wind);
    let callsign = aircraft.callsign();

    if components.cross >= EXTREME_CROSSWIND {
        log::warn!("{callsign} {action} with major crosswind");
        sink.record(GameEvent::ExtremeCrosswindOperation);
    } else if components.cross >= HIGH_CROSSWIND {
        log::warn!("{callsign} {action} with crosswind");
        sink.record(GameEvent::HighCrosswindOperation);
    }

    if components.head <= -EXTREME_TAILWIND {
        log::warn!("{callsign} {action} with major tailwind");
        sink.record(GameEvent::ExtremeTailwindOperation);
    } else if components.head <= -HIGH_TAILWIND {
        log::warn!("{callsign} {action} with tailwind");
        sink.record(GameEvent::HighTailwindOperation);
    }
}
