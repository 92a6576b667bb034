//! Autopilot target resolution: converts mode-control settings and route
//! state into the instantaneous altitude/heading/speed the physics chases.

use std::f64::consts::PI;

use glam::DVec2;

use crate::aircraft::phase::FlightPhase;
use crate::aircraft::state::AircraftState;
use crate::control::mcp::{AltitudeMode, HeadingMode, ModeController, SpeedMode};
use crate::environment::Airspace;
use crate::navigation::{RouteProvider, Waypoint, WaypointKind};
use crate::utils::constants::*;
use crate::utils::errors::SimError;
use crate::utils::math::{angle_offset, extrapolate_range_clamp, radians_normalize};
use crate::utils::units::{km_to_nm, knots_to_kps, SECONDS_PER_HOUR};
use crate::utils::vectors::{bearing_to, course_offset};

/// Recompute the aircraft's control targets for this tick.
///
/// Per-axis calculations produce an override or leave the previous (sticky)
/// target in place; the final clamp then enforces the performance envelope
/// and regulatory limits. The only stateful side effects are the documented
/// route-capability calls: hold-timer arming/reset, inbound-heading capture
/// and waypoint advancement.
///
/// Lateral navigation without a current waypoint completes the tick with the
/// sticky heading target and reports `SimError::MissingRoute`.
pub fn resolve_targets<R: RouteProvider>(
    aircraft: &mut AircraftState,
    route: &mut R,
    mcp: &mut ModeController,
    airspace: &Airspace,
    elapsed: f64,
) -> Result<(), SimError> {
    aircraft.target.expedite = route
        .current_waypoint()
        .map(|waypoint| waypoint.expedite)
        .unwrap_or(false);

    let altitude = target_altitude(aircraft, route, mcp);

    let mut anomaly = None;
    let heading = match target_heading(aircraft, route, mcp, elapsed) {
        Ok(heading) => heading,
        Err(error) => {
            anomaly = Some(error);
            None
        }
    };

    let speed = target_speed(aircraft, route, mcp, airspace);

    if let Some(altitude) = altitude {
        aircraft.target.altitude = altitude;
    }

    if let Some(heading) = heading {
        aircraft.target.heading = heading;
    }

    if let Some(speed) = speed {
        aircraft.target.speed = speed;
    }

    override_target(aircraft, route, mcp, airspace);

    match anomaly {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

/// Altitude the autopilot should chase, or `None` to keep the sticky target
fn target_altitude<R: RouteProvider>(
    aircraft: &AircraftState,
    route: &R,
    mcp: &ModeController,
) -> Option<f64> {
    if !mcp.autopilot_engaged {
        return None;
    }

    if aircraft.phase == FlightPhase::Landing {
        return landing_altitude(aircraft, route, mcp);
    }

    match mcp.altitude_mode {
        AltitudeMode::Off => Some(aircraft.altitude),
        AltitudeMode::Hold => Some(mcp.altitude),
        AltitudeMode::Approach => Some(glidepath_intercept_altitude(aircraft, route, mcp)),
        AltitudeMode::Vnav => vnav_altitude(aircraft, route, mcp),
    }
}

/// Heading the autopilot should chase, or `None` to keep the sticky target
fn target_heading<R: RouteProvider>(
    aircraft: &mut AircraftState,
    route: &mut R,
    mcp: &mut ModeController,
    elapsed: f64,
) -> Result<Option<f64>, SimError> {
    if !mcp.autopilot_engaged {
        return Ok(None);
    }

    if aircraft.phase == FlightPhase::Landing {
        return Ok(landing_heading(aircraft, route));
    }

    match mcp.heading_mode {
        HeadingMode::Off => Ok(Some(aircraft.heading)),
        HeadingMode::Hold => Ok(Some(mcp.heading.unwrap_or(aircraft.heading))),
        HeadingMode::Lnav => lnav_heading(aircraft, route, mcp, elapsed).map(Some),
        HeadingMode::VorLoc => Ok(Some(intercept_course_heading(aircraft, mcp))),
    }
}

/// Speed the autopilot should chase, or `None` to keep the sticky target
fn target_speed<R: RouteProvider>(
    aircraft: &AircraftState,
    route: &R,
    mcp: &ModeController,
    airspace: &Airspace,
) -> Option<f64> {
    if !mcp.autopilot_engaged {
        return None;
    }

    if aircraft.phase == FlightPhase::Landing {
        return landing_speed(aircraft, route, mcp, airspace);
    }

    match mcp.speed_mode {
        SpeedMode::Off => Some(legal_speed(aircraft.speed, aircraft.altitude)),
        SpeedMode::Hold => Some(legal_speed(mcp.speed, aircraft.altitude)),
        SpeedMode::N1 => Some(legal_speed(
            aircraft.performance.speed.max,
            aircraft.altitude,
        )),
        SpeedMode::Vnav => {
            vnav_speed(aircraft, route, mcp).map(|speed| legal_speed(speed, aircraft.altitude))
        }
    }
}

/// Cap a commanded speed to the regulatory maximum below 10,000 ft
fn legal_speed(speed: f64, altitude: f64) -> f64 {
    if altitude < SPEED_RESTRICTION_ALTITUDE {
        return speed.min(MAX_SPEED_BELOW_10K_FEET);
    }

    speed
}

/// Phase-specific overrides, then the envelope/regulatory clamp applied
/// after every resolution pass
fn override_target<R: RouteProvider>(
    aircraft: &mut AircraftState,
    route: &R,
    mcp: &ModeController,
    airspace: &Airspace,
) {
    match aircraft.phase {
        FlightPhase::Takeoff => {
            aircraft.target.altitude = aircraft.altitude;

            if aircraft.speed >= aircraft.performance.speed.min {
                aircraft.target.altitude = aircraft.performance.ceiling;
            }

            aircraft.target.expedite = false;
            aircraft.target.heading = aircraft.heading;
            aircraft.target.speed = aircraft.performance.speed.min;

            if mcp.heading.is_none() {
                log::warn!(
                    "{} took off with no directional instructions",
                    aircraft.callsign()
                );
            }
        }

        FlightPhase::Landing => {
            if let Some(runway) = route.arrival_runway() {
                if aircraft.altitude <= runway.elevation {
                    aircraft.altitude = runway.elevation;
                    aircraft.target.speed = 0.0;
                }
            }
        }

        _ => {}
    }

    // a stalled aircraft stops flying no matter what was commanded
    if aircraft.is_stalling(route, airspace) {
        aircraft.target.altitude = aircraft.target.altitude.min(0.0);
    }

    if aircraft.altitude < SPEED_RESTRICTION_ALTITUDE {
        aircraft.target.speed = aircraft.target.speed.min(MAX_SPEED_BELOW_10K_FEET);
    }

    if aircraft.target.altitude > aircraft.performance.ceiling {
        aircraft.target.altitude = aircraft.performance.ceiling;
    }

    if aircraft.target.speed > aircraft.performance.speed.max {
        aircraft.target.speed = aircraft.performance.speed.max;
    }

    if aircraft.target.speed < aircraft.performance.speed.min
        && aircraft.is_airborne(route, airspace)
    {
        aircraft.target.speed = aircraft.performance.speed.min;
    }
}

/// Altitude to intercept a vertically aligned course: ride the glideslope
/// down once established, otherwise hold the panel altitude
fn glidepath_intercept_altitude<R: RouteProvider>(
    aircraft: &AircraftState,
    route: &R,
    mcp: &ModeController,
) -> f64 {
    if !aircraft.is_established_on_course(route) {
        return mcp.altitude;
    }

    let Some(runway) = route.arrival_runway() else {
        return mcp.altitude;
    };

    mcp.altitude.min(aircraft.glideslope_altitude_abeam(runway))
}

/// VNAV altitude: look ahead for the binding restriction and descend or
/// climb toward it
fn vnav_altitude<R: RouteProvider>(
    aircraft: &AircraftState,
    route: &R,
    mcp: &ModeController,
) -> Option<f64> {
    let ceiling_waypoint = route.next_waypoint_with_maximum_altitude_at_or_below(aircraft.altitude);
    let floor_waypoint = route.next_waypoint_with_minimum_altitude_at_or_above(aircraft.altitude);

    match (ceiling_waypoint, floor_waypoint) {
        (None, None) => Some(mcp.altitude),

        (Some(ceiling), Some(floor)) => {
            // both apply: whichever comes first along the route wins
            let ceiling_index = route.waypoint_index(&ceiling.name);
            let floor_index = route.waypoint_index(&floor.name);

            if ceiling_index < floor_index {
                vnav_descent_altitude(aircraft, route, mcp, ceiling)
            } else {
                Some(vnav_climb_altitude(mcp, floor))
            }
        }

        (Some(ceiling), None) => vnav_descent_altitude(aircraft, route, mcp, ceiling),

        (None, Some(floor)) => Some(vnav_climb_altitude(mcp, floor)),
    }
}

fn vnav_climb_altitude(mcp: &ModeController, floor_waypoint: &Waypoint) -> f64 {
    floor_waypoint
        .altitude_minimum
        .unwrap_or(mcp.altitude)
        .min(mcp.altitude)
}

/// Descend toward the restriction, but not before the top-of-descent point
fn vnav_descent_altitude<R: RouteProvider>(
    aircraft: &AircraftState,
    route: &R,
    mcp: &ModeController,
    ceiling_waypoint: &Waypoint,
) -> Option<f64> {
    if !aircraft.is_beyond_top_of_descent(route, mcp.altitude) {
        return None;
    }

    Some(
        ceiling_waypoint
            .altitude_maximum
            .unwrap_or(mcp.altitude)
            .min(mcp.altitude),
    )
}

/// VNAV speed: symmetric look-ahead over speed restrictions, gated by the
/// deceleration point
fn vnav_speed<R: RouteProvider>(
    aircraft: &AircraftState,
    route: &R,
    mcp: &ModeController,
) -> Option<f64> {
    let ceiling_waypoint = route.next_waypoint_with_maximum_speed_at_or_below(aircraft.speed);
    let floor_waypoint = route.next_waypoint_with_minimum_speed_at_or_above(aircraft.speed);

    match (ceiling_waypoint, floor_waypoint) {
        (None, None) => Some(mcp.speed),

        (Some(ceiling), Some(floor)) => {
            let ceiling_index = route.waypoint_index(&ceiling.name);
            let floor_index = route.waypoint_index(&floor.name);

            if ceiling_index < floor_index {
                vnav_deceleration_speed(aircraft, mcp, ceiling)
            } else {
                Some(vnav_acceleration_speed(mcp, floor))
            }
        }

        (Some(ceiling), None) => vnav_deceleration_speed(aircraft, mcp, ceiling),

        (None, Some(floor)) => Some(vnav_acceleration_speed(mcp, floor)),
    }
}

fn vnav_acceleration_speed(mcp: &ModeController, floor_waypoint: &Waypoint) -> f64 {
    floor_waypoint.speed_minimum.unwrap_or(mcp.speed).min(mcp.speed)
}

fn vnav_deceleration_speed(
    aircraft: &AircraftState,
    mcp: &ModeController,
    ceiling_waypoint: &Waypoint,
) -> Option<f64> {
    let waypoint_speed = ceiling_waypoint.speed_maximum?;

    if !aircraft.is_beyond_deceleration_point(waypoint_speed, ceiling_waypoint.position) {
        return None;
    }

    Some(waypoint_speed.min(mcp.speed))
}

/// Follow the current waypoint, sequencing the route as fixes are passed
fn lnav_heading<R: RouteProvider>(
    aircraft: &mut AircraftState,
    route: &mut R,
    mcp: &mut ModeController,
    elapsed: f64,
) -> Result<f64, SimError> {
    enum Guidance {
        Vector(f64),
        Hold,
        Fix,
    }

    let guidance = {
        let Some(waypoint) = route.current_waypoint() else {
            return Err(SimError::MissingRoute);
        };

        match &waypoint.kind {
            WaypointKind::Vector { course } => Guidance::Vector(*course),
            WaypointKind::Hold(_) => Guidance::Hold,
            WaypointKind::Fix => Guidance::Fix,
        }
    };

    match guidance {
        Guidance::Vector(course) => Ok(course),
        Guidance::Hold => Ok(hold_heading(aircraft, route, elapsed)),
        Guidance::Fix => fix_heading(aircraft, route, mcp),
    }
}

/// Bearing to the current fix, advancing the route once the fix is passed
/// (or the fly-by turn point is reached)
fn fix_heading<R: RouteProvider>(
    aircraft: &mut AircraftState,
    route: &mut R,
    mcp: &mut ModeController,
) -> Result<f64, SimError> {
    let waypoint = route.current_waypoint().ok_or(SimError::MissingRoute)?;
    let waypoint_position = waypoint.position;
    let is_fly_over = waypoint.is_fly_over;

    let distance_km = (waypoint_position - aircraft.position).length();
    let heading_to_waypoint = bearing_to(aircraft.position, waypoint_position);
    let turn_initiation_km = turn_initiation_distance(aircraft, route, waypoint_position);

    let is_time_to_start_turning = distance_km < turn_initiation_km;
    let close_to_being_over_fix = km_to_nm(distance_km) < MAXIMUM_DISTANCE_TO_PASS_WAYPOINT_NM;
    let close_enough_to_fly_by = km_to_nm(distance_km) < MAXIMUM_DISTANCE_TO_FLY_BY_WAYPOINT_NM;
    let should_fly_by_fix = close_enough_to_fly_by && is_time_to_start_turning;

    let should_move_to_next_fix = if is_fly_over {
        close_to_being_over_fix
    } else {
        close_to_being_over_fix || should_fly_by_fix
    };

    if should_move_to_next_fix {
        if !route.has_next_waypoint() {
            // out of route: the pilot maintains present heading
            mcp.set_heading_hold(aircraft.heading);

            return Ok(heading_to_waypoint);
        }

        route.advance_waypoint();
    }

    Ok(heading_to_waypoint)
}

/// Distance before a fix at which the turn to the following leg should
/// begin, km
fn turn_initiation_distance<R: RouteProvider>(
    aircraft: &AircraftState,
    route: &R,
    waypoint_position: DVec2,
) -> f64 {
    let speed_kps = knots_to_kps(aircraft.ground_speed);
    let lead_km = speed_kps * TURN_LEAD_TIME;

    let Some(next) = route.next_waypoint() else {
        return lead_km;
    };

    let course_inbound = bearing_to(aircraft.position, waypoint_position);
    let course_outbound = bearing_to(waypoint_position, next.position);
    let course_change = angle_offset(course_outbound, course_inbound).abs();
    let turn_radius_km = speed_kps / TURN_RATE;

    turn_radius_km * (course_change / 2.0).tan() + lead_km
}

/// Fly the published holding pattern at the current waypoint.
///
/// Before establishment the target is simply the bearing to the fix. Once
/// past the fix, fly outbound until the leg timer expires, then back to the
/// fix, resetting the timer on each fix passage. Turns are forced in the
/// pattern's direction throughout.
fn hold_heading<R: RouteProvider>(
    aircraft: &mut AircraftState,
    route: &mut R,
    elapsed: f64,
) -> f64 {
    let waypoint = match route.current_waypoint() {
        Some(waypoint) => waypoint,
        None => return aircraft.heading,
    };

    let waypoint_position = waypoint.position;
    let parameters = match waypoint.hold_parameters() {
        Some(parameters) => parameters.clone(),
        None => return aircraft.heading,
    };

    let bearing_to_fix = bearing_to(aircraft.position, waypoint_position);

    if parameters.inbound_heading.is_none() {
        route.set_hold_inbound_heading(bearing_to_fix);
    }

    let inbound_heading = parameters.inbound_heading.unwrap_or(bearing_to_fix);
    let outbound_heading = radians_normalize(inbound_heading + PI);
    let offset = course_offset(aircraft.position, waypoint_position, inbound_heading);
    let leg_duration = parameters.leg_duration();

    let is_past_fix =
        offset.along < HOLD_PAST_FIX_ALONG_TRACK_KM && offset.distance < HOLD_PAST_FIX_TOTAL_KM;
    let is_timer_expired = matches!(parameters.timer, Some(expiry) if elapsed > expiry);

    if is_past_fix && !aircraft.established_on_hold {
        aircraft.established_on_hold = true;
    }

    if !aircraft.established_on_hold {
        return bearing_to_fix;
    }

    let mut next_target_heading = outbound_heading;

    if aircraft.heading == outbound_heading && parameters.timer.is_none() {
        route.arm_hold_timer(elapsed + leg_duration);
    }

    if is_timer_expired {
        next_target_heading = bearing_to_fix;

        if is_past_fix {
            route.reset_hold_timer();
            next_target_heading = outbound_heading;
        }
    }

    aircraft.target.turn = Some(parameters.turn_direction);

    next_target_heading
}

/// Guide the aircraft onto the tuned localizer course.
///
/// Inside the capture window (or once aligned) the target is the course plus
/// a proportional correction. Approaching the computed intercept point, the
/// correction is clamped to the minimum intercept angle and never steered
/// past the panel heading. Anywhere else, the panel heading stands.
fn intercept_course_heading(aircraft: &mut AircraftState, mcp: &ModeController) -> f64 {
    let Some(datum) = mcp.nav1_datum else {
        log::warn!(
            "{} is in VOR/LOC mode with no course datum tuned",
            aircraft.callsign()
        );

        return mcp.heading.unwrap_or(aircraft.heading);
    };

    let course = mcp.course;
    let offset = course_offset(aircraft.position, datum.position, course);
    let lateral_distance_nm = km_to_nm(offset.lateral);
    let heading_difference = angle_offset(course, aircraft.heading);
    let bearing_to_datum = bearing_to(aircraft.position, datum.position);
    let angle_away_from_localizer = angle_offset(course, bearing_to_datum);

    let turn_time_s = heading_difference.abs() / TURN_RATE;
    let turn_distance_nm = aircraft.speed * turn_time_s / SECONDS_PER_HOUR;
    let distance_covered_during_turn_nm = turn_distance_nm * heading_difference.abs();
    let distance_to_localizer_nm = lateral_distance_nm / heading_difference.sin();

    let should_attempt_intercept = distance_to_localizer_nm > 0.0
        && distance_to_localizer_nm
            <= distance_covered_during_turn_nm + LOCALIZER_EARLY_TURN_DISTANCE_NM;
    let in_the_window = angle_away_from_localizer.abs() < LOCALIZER_CAPTURE_WINDOW;

    if !should_attempt_intercept && !in_the_window {
        return mcp.heading.unwrap_or(aircraft.heading);
    }

    let mut intercept_angle = angle_away_from_localizer * -LOCALIZER_COURSE_CORRECTION_GAIN;
    let is_aligned_with_course =
        lateral_distance_nm.abs() <= ESTABLISHED_ON_COURSE_MAX_LATERAL_NM;

    if in_the_window || is_aligned_with_course {
        aircraft.target.turn = None;

        return course + intercept_angle;
    }

    intercept_angle = intercept_angle.clamp(
        -LOCALIZER_MINIMUM_INTERCEPT_ANGLE,
        LOCALIZER_MINIMUM_INTERCEPT_ANGLE,
    );

    let intercept_heading = course + intercept_angle;
    let assigned_heading = mcp.heading.unwrap_or(course);

    // never steer past the panel heading; which side depends on where the
    // assigned heading sits relative to the course
    if assigned_heading < course {
        intercept_heading.max(assigned_heading)
    } else if assigned_heading > course {
        intercept_heading.min(assigned_heading)
    } else {
        course
    }
}

/// Landing altitude: ride the glideslope to the threshold, then the runway
fn landing_altitude<R: RouteProvider>(
    aircraft: &AircraftState,
    route: &R,
    mcp: &ModeController,
) -> Option<f64> {
    let runway = route.arrival_runway()?;
    let offset = course_offset(aircraft.position, runway.position, runway.angle);

    if offset.along > 0.0 {
        return Some(glidepath_intercept_altitude(aircraft, route, mcp));
    }

    Some(runway.elevation)
}

/// Landing heading: home on the threshold, then hold the centerline
fn landing_heading<R: RouteProvider>(aircraft: &AircraftState, route: &R) -> Option<f64> {
    let runway = route.arrival_runway()?;
    let offset = course_offset(aircraft.position, runway.position, runway.angle);

    if km_to_nm(offset.along) > 0.0 {
        return Some(bearing_to(aircraft.position, runway.position));
    }

    Some(runway.angle)
}

/// Landing speed: blend from the assigned speed at 5 nm down to the type's
/// landing speed at 1 nm, and stop on the runway
fn landing_speed<R: RouteProvider>(
    aircraft: &AircraftState,
    route: &R,
    mcp: &ModeController,
    airspace: &Airspace,
) -> Option<f64> {
    let runway = route.arrival_runway()?;
    let offset = course_offset(aircraft.position, runway.position, runway.angle);
    let distance_on_final_nm = km_to_nm(offset.along);

    if distance_on_final_nm <= 0.0 && aircraft.is_on_ground(route, airspace) {
        return Some(0.0);
    }

    let start_speed = match mcp.speed_mode {
        SpeedMode::Hold => mcp.speed,
        _ => aircraft.speed,
    };

    Some(extrapolate_range_clamp(
        LANDING_FINAL_APPROACH_SPEED_DISTANCE_NM,
        distance_on_final_nm,
        LANDING_ASSIGNED_SPEED_DISTANCE_NM,
        aircraft.performance.speed.landing,
        start_speed,
    ))
}
