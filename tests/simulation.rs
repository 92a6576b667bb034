mod common;

use approx::assert_relative_eq;

use common::*;
use tracon::aircraft::FlightPhase;
use tracon::control::{ModeController, RecordingSink};

#[test]
fn altitude_converges_monotonically_and_exactly() {
    let airspace = test_airspace();
    let mut route = arrival_route();
    let mut sink = RecordingSink::default();
    let mut aircraft = arrival_aircraft(&airspace);

    let mut mcp = ModeController::default();
    mcp.enable_autopilot();
    mcp.set_altitude_hold(10_000.0);
    mcp.set_heading_hold(0.0);
    mcp.set_speed_hold(280.0);

    let mut previous = aircraft.altitude;

    for step in 0..40 {
        let elapsed = 5.0 * step as f64;
        tick(
            &mut aircraft,
            &mut route,
            &mut mcp,
            &airspace,
            5.0,
            elapsed,
            &mut sink,
        )
        .unwrap();

        // never overshoots past the target, never climbs back
        assert!(aircraft.altitude <= previous);
        assert!(aircraft.altitude >= 10_000.0);
        previous = aircraft.altitude;
    }

    assert_relative_eq!(aircraft.altitude, 10_000.0);
    assert_eq!(aircraft.phase, FlightPhase::Descent);
}

#[test]
fn time_warp_is_expressed_through_dt_alone() {
    let airspace = test_airspace();

    let mut route_a = arrival_route();
    let mut route_b = arrival_route();
    let mut sink = RecordingSink::default();

    let mut mcp_fine = ModeController::default();
    mcp_fine.enable_autopilot();
    mcp_fine.set_altitude_hold(12_000.0);
    mcp_fine.set_heading_hold(0.0);
    mcp_fine.set_speed_hold(280.0);
    let mut mcp_coarse = mcp_fine.clone();

    let mut fine = arrival_aircraft(&airspace);
    let mut coarse = arrival_aircraft(&airspace);

    // sixty seconds of sim time, finely and coarsely ticked
    for step in 0..60 {
        tick(
            &mut fine,
            &mut route_a,
            &mut mcp_fine,
            &airspace,
            1.0,
            step as f64,
            &mut sink,
        )
        .unwrap();
    }

    tick(
        &mut coarse,
        &mut route_b,
        &mut mcp_coarse,
        &airspace,
        60.0,
        0.0,
        &mut sink,
    )
    .unwrap();

    assert_relative_eq!(fine.altitude, coarse.altitude, epsilon = 1e-6);
}

#[test]
fn a_paused_tick_changes_nothing_kinematic() {
    let airspace = test_airspace();
    let mut route = arrival_route();
    let mut sink = RecordingSink::default();
    let mut aircraft = arrival_aircraft(&airspace);

    let mut mcp = ModeController::default();
    mcp.enable_autopilot();
    mcp.set_altitude_hold(10_000.0);
    mcp.set_heading_hold(1.0);
    mcp.set_speed_hold(250.0);

    let heading = aircraft.heading;
    let altitude = aircraft.altitude;
    let speed = aircraft.speed;
    let position = aircraft.position;

    tick(
        &mut aircraft,
        &mut route,
        &mut mcp,
        &airspace,
        0.0,
        0.0,
        &mut sink,
    )
    .unwrap();

    assert_eq!(aircraft.heading, heading);
    assert_eq!(aircraft.altitude, altitude);
    assert_eq!(aircraft.speed, speed);
    assert_eq!(aircraft.position, position);
}

#[test]
fn the_altitude_target_never_exceeds_the_ceiling() {
    let airspace = test_airspace();
    let mut route = arrival_route();
    let mut sink = RecordingSink::default();
    let mut aircraft = arrival_aircraft(&airspace);

    let mut mcp = ModeController::default();
    mcp.enable_autopilot();
    mcp.set_altitude_hold(50_000.0);

    tick(
        &mut aircraft,
        &mut route,
        &mut mcp,
        &airspace,
        1.0,
        0.0,
        &mut sink,
    )
    .unwrap();

    assert_relative_eq!(aircraft.target.altitude, 41_000.0);
}
