//! Closed-form kinematics for one aircraft tick: turning, climb/descent,
//! speed, and the wind-composited ground track.

use std::f64::consts::PI;

use crate::aircraft::state::{AircraftState, PositionSample};
use crate::environment::Airspace;
use crate::navigation::{RouteProvider, TurnDirection};
use crate::utils::constants::*;
use crate::utils::math::{angle_offset, extrapolate_range_clamp, radians_normalize};
use crate::utils::units::{knots_to_kps, SECONDS_PER_MINUTE};
use crate::utils::vectors::{vectorize_2d, vradial};

/// Move the aircraft toward its targets for one tick of `dt` scaled
/// seconds. Inputs are already-clamped targets, so this never fails; a zero
/// or negative `dt` (pause) is a no-op.
pub fn advance<R: RouteProvider>(
    aircraft: &mut AircraftState,
    route: &R,
    airspace: &Airspace,
    dt: f64,
    elapsed: f64,
    timewarp: f64,
) {
    if dt <= 0.0 || aircraft.is_taxiing() {
        return;
    }

    if aircraft.hit {
        // falling out of controlled flight
        aircraft.altitude -= HIT_FALL_RATE * dt;
        aircraft.speed *= HIT_SPEED_DECAY;

        return;
    }

    update_turn(aircraft, route, airspace, dt);
    update_altitude(aircraft, dt);

    if aircraft.is_on_ground(route, airspace) {
        aircraft.trend = 0;
    }

    update_speed(aircraft, route, airspace, dt);
    record_position_history(aircraft, elapsed, timewarp);
    update_ground_track(aircraft, airspace, dt);

    aircraft.distance = aircraft.position.length();
    aircraft.radial = radians_normalize(vradial(aircraft.position));
}

/// Rotate toward the target heading at the standard turn rate, snapping
/// once the remaining error fits inside this tick's step
fn update_turn<R: RouteProvider>(
    aircraft: &mut AircraftState,
    route: &R,
    airspace: &Airspace,
    dt: f64,
) {
    if aircraft.is_on_ground(route, airspace) || aircraft.heading == aircraft.target.heading {
        aircraft.target.turn = None;

        return;
    }

    let angle_diff = angle_offset(aircraft.target.heading, aircraft.heading);
    let angle_change = TURN_RATE * dt;

    if angle_diff.abs() <= angle_change {
        aircraft.heading = aircraft.target.heading;
    } else if let Some(direction) = aircraft.target.turn {
        match direction {
            TurnDirection::Left => {
                aircraft.heading = radians_normalize(aircraft.heading - angle_change);
            }
            TurnDirection::Right => {
                aircraft.heading = radians_normalize(aircraft.heading + angle_change);
            }
        }
    } else if angle_diff <= 0.0 {
        aircraft.heading = radians_normalize(aircraft.heading - angle_change);
    } else {
        aircraft.heading = radians_normalize(aircraft.heading + angle_change);
    }
}

fn update_altitude(aircraft: &mut AircraftState, dt: f64) {
    aircraft.trend = 0;

    if aircraft.target.altitude < aircraft.altitude {
        descend(aircraft, dt);
    } else if aircraft.target.altitude > aircraft.altitude {
        climb(aircraft, dt);
    }
}

fn descend(aircraft: &mut AircraftState, dt: f64) {
    let altitude_diff = aircraft.altitude - aircraft.target.altitude;

    let descent_rate = if aircraft.target.expedite {
        aircraft.performance.rate.descent
    } else {
        aircraft.performance.rate.descent * TYPICAL_DESCENT_FACTOR
    };

    let feet_descended = descent_rate / SECONDS_PER_MINUTE * dt;

    if altitude_diff.abs() < feet_descended {
        aircraft.altitude = aircraft.target.altitude;
    } else {
        aircraft.altitude -= feet_descended;
    }

    aircraft.trend = -1;
}

fn climb(aircraft: &mut AircraftState, dt: f64) {
    let altitude_diff = aircraft.altitude - aircraft.target.altitude;

    let climb_rate = if aircraft.target.expedite {
        aircraft.performance.rate.climb
    } else {
        aircraft.performance.climb_rate_at_altitude(aircraft.altitude) * TYPICAL_CLIMB_FACTOR
    };

    let feet_climbed = climb_rate / SECONDS_PER_MINUTE * dt;

    if altitude_diff.abs() < feet_climbed.abs() {
        aircraft.altitude = aircraft.target.altitude;
    } else {
        aircraft.altitude += feet_climbed;
    }

    aircraft.trend = 1;
}

/// Accelerate or decelerate toward the target speed. Acceleration tapers
/// off near the stall speed; braking on the runway is much stronger than
/// aerodynamic deceleration.
fn update_speed<R: RouteProvider>(
    aircraft: &mut AircraftState,
    route: &R,
    airspace: &Airspace,
    dt: f64,
) {
    let difference = aircraft.speed - aircraft.target.speed;

    if difference == 0.0 {
        return;
    }

    let speed_change = if aircraft.speed > aircraft.target.speed {
        // rate.decelerate is knots per two seconds
        let mut change = -aircraft.performance.rate.decelerate * dt / 2.0;

        if aircraft.is_on_ground(route, airspace) {
            change *= DECELERATION_FACTOR_DUE_TO_GROUND_BRAKING;
        }

        change
    } else {
        let ramp = extrapolate_range_clamp(
            0.0,
            aircraft.speed,
            aircraft.performance.speed.min,
            ACCELERATION_RAMP_NEAR_STALL_FACTOR,
            1.0,
        );

        aircraft.performance.rate.accelerate * dt / 2.0 * ramp
    };

    aircraft.speed += speed_change;

    if speed_change.abs() > difference.abs() {
        aircraft.speed = aircraft.target.speed;
    }
}

/// Append a radar-trail sample if enough (time-scale-corrected) time has
/// passed since the last one
fn record_position_history(aircraft: &mut AircraftState, elapsed: f64, timewarp: f64) {
    let offset_time = elapsed / timewarp;

    let should_sample = match aircraft.position_history.last() {
        None => true,
        Some(last) => (offset_time - last.time).abs() > POSITION_HISTORY_INTERVAL / timewarp,
    };

    if should_sample {
        aircraft.position_history.push(PositionSample {
            east: aircraft.position.x,
            north: aircraft.position.y,
            time: offset_time,
        });
    }
}

/// Compose true airspeed with the altitude-corrected wind, displace the
/// aircraft along the resulting ground track, and store the new ground
/// speed/track
fn update_ground_track(aircraft: &mut AircraftState, airspace: &Airspace, dt: f64) {
    let true_airspeed =
        aircraft.speed * (1.0 + aircraft.altitude * TAS_INCREASE_FACTOR_PER_FOOT);
    let air_vector = vectorize_2d(aircraft.heading) * true_airspeed;

    let wind = &airspace.wind;
    let wind_travel_direction = wind.angle + PI;
    let wind_speed = wind.speed * (1.0 + aircraft.altitude * WIND_INCREASE_FACTOR_PER_FOOT);
    let wind_vector = vectorize_2d(wind_travel_direction) * wind_speed;

    let flight_path_vector = air_vector + wind_vector;
    let ground_track = vradial(flight_path_vector);
    let ground_speed = flight_path_vector.length();

    let distance_km = knots_to_kps(ground_speed) * dt;
    aircraft.position += vectorize_2d(ground_track) * distance_km;

    aircraft.ground_track = ground_track;
    aircraft.ground_speed = ground_speed;
}
