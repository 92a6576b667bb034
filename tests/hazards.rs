mod common;

use glam::DVec2;
use std::collections::BTreeMap;

use common::*;
use tracon::aircraft::hazards;
use tracon::control::{GameEvent, HeadingMode, ModeController, RecordingSink};
use tracon::environment::{RestrictedArea, Terrain, TerrainPolygon, Wind};
use tracon::simulation::update_controllability;

fn square_around(center: DVec2, half: f64) -> Vec<DVec2> {
    vec![
        DVec2::new(center.x - half, center.y - half),
        DVec2::new(center.x + half, center.y - half),
        DVec2::new(center.x + half, center.y + half),
        DVec2::new(center.x - half, center.y + half),
    ]
}

fn airspace_with_restricted_area() -> tracon::environment::Airspace {
    let mut airspace = test_airspace();
    airspace.restricted_areas.push(RestrictedArea {
        name: "R-4806".into(),
        floor: 0.0,
        coordinates: square_around(DVec2::new(0.0, -60.0), 5.0),
    });

    airspace
}

#[test]
fn entering_a_restricted_area_raises_one_bust() {
    let airspace = airspace_with_restricted_area();
    let route = arrival_route();
    let mut sink = RecordingSink::default();
    let mut aircraft = arrival_aircraft(&airspace);

    // spawned inside the polygon, tracking starts cold
    hazards::scan(&mut aircraft, &route, &airspace, 1.0, &mut sink);
    assert!(aircraft.warning);
    assert_eq!(sink.count(GameEvent::AirspaceBust), 1);

    // still inside on later checks: no repeat event
    hazards::scan(&mut aircraft, &route, &airspace, 1.0, &mut sink);
    hazards::scan(&mut aircraft, &route, &airspace, 100.0, &mut sink);
    assert!(aircraft.warning);
    assert_eq!(sink.count(GameEvent::AirspaceBust), 1);
}

#[test]
fn leaving_the_area_clears_the_warning() {
    let airspace = airspace_with_restricted_area();
    let route = arrival_route();
    let mut sink = RecordingSink::default();
    let mut aircraft = arrival_aircraft(&airspace);

    hazards::scan(&mut aircraft, &route, &airspace, 1.0, &mut sink);
    assert!(aircraft.warning);

    // well clear of the polygon; a long tick forces the recheck
    aircraft.position = DVec2::new(40.0, -60.0);
    hazards::scan(&mut aircraft, &route, &airspace, 100.0, &mut sink);
    assert!(!aircraft.warning);
    assert_eq!(sink.count(GameEvent::AirspaceBust), 1);
}

#[test]
fn areas_with_a_floor_above_the_aircraft_are_ignored() {
    let mut airspace = airspace_with_restricted_area();
    airspace.restricted_areas[0].floor = 20_000.0;

    let route = arrival_route();
    let mut sink = RecordingSink::default();
    let mut aircraft = arrival_aircraft(&airspace);

    hazards::scan(&mut aircraft, &route, &airspace, 1.0, &mut sink);
    assert!(!aircraft.warning);
    assert!(sink.events.is_empty());
}

#[test]
fn hazard_scans_are_skipped_while_taxiing() {
    let airspace = airspace_with_restricted_area();
    let route = arrival_route();
    let mut sink = RecordingSink::default();
    let mut aircraft = departure_aircraft(&airspace);

    hazards::scan(&mut aircraft, &route, &airspace, 1.0, &mut sink);
    assert!(!aircraft.warning);
    assert!(sink.events.is_empty());
}

fn airspace_with_terrain() -> tracon::environment::Airspace {
    let mut airspace = test_airspace();
    let mut bands = BTreeMap::new();
    bands.insert(
        3000,
        vec![TerrainPolygon {
            rings: vec![square_around(DVec2::new(0.0, -60.0), 5.0)],
        }],
    );
    airspace.terrain = Terrain::new(bands);

    airspace
}

#[test]
fn terrain_collision_fires_exactly_once() {
    init_test_logging();

    let airspace = airspace_with_terrain();
    let route = arrival_route();
    let mut sink = RecordingSink::default();
    let mut aircraft = arrival_aircraft(&airspace);
    aircraft.altitude = 2500.0;

    hazards::scan(&mut aircraft, &route, &airspace, 1.0, &mut sink);

    assert!(aircraft.hit);
    assert_eq!(aircraft.altitude, 0.0);
    assert_eq!(sink.count(GameEvent::Collision), 1);

    // still over the ridge on later ticks: no second collision event
    aircraft.altitude = 2500.0;
    hazards::scan(&mut aircraft, &route, &airspace, 1.0, &mut sink);
    assert_eq!(aircraft.altitude, 0.0);
    assert_eq!(sink.count(GameEvent::Collision), 1);
}

#[test]
fn terrain_outside_the_polygon_schedules_the_next_check() {
    let airspace = airspace_with_terrain();
    let route = arrival_route();
    let mut sink = RecordingSink::default();
    let mut aircraft = arrival_aircraft(&airspace);
    aircraft.altitude = 2500.0;
    aircraft.position = DVec2::new(0.0, -80.0);

    hazards::scan(&mut aircraft, &route, &airspace, 1.0, &mut sink);

    assert!(!aircraft.hit);
    let range = aircraft.terrain_ranges[&3000][0];
    assert!(range.is_finite() && range > 0.0);
}

#[test]
fn changing_band_resets_the_previous_band_counters() {
    let airspace = airspace_with_terrain();
    let route = arrival_route();
    let mut sink = RecordingSink::default();
    let mut aircraft = arrival_aircraft(&airspace);
    aircraft.altitude = 2500.0;
    aircraft.position = DVec2::new(0.0, -80.0);

    hazards::scan(&mut aircraft, &route, &airspace, 1.0, &mut sink);
    assert!(aircraft.terrain_ranges[&3000][0].is_finite());

    // climb out of the band; its counters go back to infinity
    aircraft.altitude = 3500.0;
    hazards::scan(&mut aircraft, &route, &airspace, 1.0, &mut sink);
    assert!(aircraft.terrain_ranges[&3000][0].is_infinite());
}

#[test]
fn arrival_contact_on_entering_the_airspace() {
    let airspace = test_airspace();
    let mut sink = RecordingSink::default();
    let mut aircraft = arrival_aircraft(&airspace);
    let mcp = ModeController::default();

    // spawns outside coverage, then crosses inbound
    aircraft.position = DVec2::new(0.0, -90.0);
    aircraft.distance = 90.0;
    assert!(!aircraft.is_controllable);

    aircraft.position = DVec2::new(0.0, -60.0);
    aircraft.distance = 60.0;
    update_controllability(&mut aircraft, &mcp, &airspace, &mut sink);

    assert!(aircraft.is_controllable);
    assert!(!aircraft.is_flight_strip_removable);
    assert_eq!(sink.radio_calls.len(), 1);
    assert!(sink.radio_calls[0].message.contains("with you"));
}

#[test]
fn departure_handoff_with_lateral_clearance() {
    let airspace = test_airspace();
    let mut sink = RecordingSink::default();
    let mut aircraft = departure_aircraft(&airspace);
    let mut mcp = ModeController::default();
    mcp.set_heading_lnav();

    aircraft.altitude = 12_000.0;
    aircraft.position = DVec2::new(0.0, -90.0);
    aircraft.distance = 90.0;
    update_controllability(&mut aircraft, &mcp, &airspace, &mut sink);

    assert!(!aircraft.is_controllable);
    assert!(aircraft.is_flight_strip_removable);
    assert!(aircraft.is_removable);
    assert_eq!(sink.count(GameEvent::Departure), 1);
}

#[test]
fn departure_without_clearance_is_a_violation() {
    let airspace = test_airspace();
    let mut sink = RecordingSink::default();
    let mut aircraft = departure_aircraft(&airspace);
    let mut mcp = ModeController::default();
    mcp.set_heading_hold(1.0);

    aircraft.altitude = 12_000.0;
    aircraft.position = DVec2::new(0.0, -90.0);
    aircraft.distance = 90.0;
    update_controllability(&mut aircraft, &mcp, &airspace, &mut sink);

    assert_eq!(sink.count(GameEvent::NotClearedOnRoute), 1);
    assert!(sink.radio_calls[0].is_warning);
}

#[test]
fn arrival_leaving_coverage_is_a_bust() {
    let airspace = test_airspace();
    let mut sink = RecordingSink::default();
    let mut aircraft = arrival_aircraft(&airspace);
    let mcp = ModeController::default();
    aircraft.is_controllable = true;

    aircraft.position = DVec2::new(0.0, -90.0);
    aircraft.distance = 90.0;
    update_controllability(&mut aircraft, &mcp, &airspace, &mut sink);

    assert_eq!(sink.count(GameEvent::AirspaceBust), 1);
}

#[test]
fn projected_aircraft_skip_the_boundary_check() {
    let airspace = test_airspace();
    let mut sink = RecordingSink::default();
    let mut aircraft = arrival_aircraft(&airspace);
    let mcp = ModeController::default();
    aircraft.is_controllable = true;
    aircraft.projected = true;

    aircraft.position = DVec2::new(0.0, -90.0);
    aircraft.distance = 90.0;
    update_controllability(&mut aircraft, &mcp, &airspace, &mut sink);

    assert!(aircraft.is_controllable);
    assert!(sink.events.is_empty());
    assert!(sink.radio_calls.is_empty());
}

#[test]
fn strong_crosswind_and_tailwind_are_scored() {
    let mut airspace = test_airspace();
    let runway = runway_north();
    let aircraft = arrival_aircraft(&airspace);

    // 15 kt straight across the runway
    airspace.wind = Wind {
        angle: std::f64::consts::FRAC_PI_2,
        speed: 15.0,
    };
    let mut sink = RecordingSink::default();
    hazards::score_wind(&aircraft, &runway, &airspace, "landed", &mut sink);
    assert_eq!(sink.count(GameEvent::HighCrosswindOperation), 1);

    // 12 kt up the tail
    airspace.wind = Wind {
        angle: std::f64::consts::PI,
        speed: 12.0,
    };
    let mut sink = RecordingSink::default();
    hazards::score_wind(&aircraft, &runway, &airspace, "landed", &mut sink);
    assert_eq!(sink.count(GameEvent::ExtremeTailwindOperation), 1);
}
