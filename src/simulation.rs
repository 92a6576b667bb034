//! Per-tick orchestration: one `update_aircraft` call advances one
//! aircraft's phase, targets, physics and hazard state, then checks the
//! controlled-airspace boundary.

use crate::aircraft::state::AircraftState;
use crate::aircraft::{autopilot, hazards, phase, physics};
use crate::control::events::{EventSink, GameEvent, RadioSector};
use crate::control::mcp::{HeadingMode, ModeController};
use crate::environment::Airspace;
use crate::navigation::RouteProvider;
use crate::utils::errors::SimError;

/// Shared per-tick inputs. Time-warp and pause are expressed through `dt`
/// (already scaled sim seconds; zero while paused), never by changing the
/// call cadence.
#[derive(Debug, Clone, Copy)]
pub struct UpdateContext<'a> {
    /// Scaled sim seconds this tick
    pub dt: f64,
    /// Accumulated sim time, s
    pub elapsed: f64,
    /// Current time-scale factor (1.0 = real time)
    pub timewarp: f64,
    pub airspace: &'a Airspace,
}

impl<'a> UpdateContext<'a> {
    pub fn new(airspace: &'a Airspace, dt: f64, elapsed: f64) -> Self {
        Self {
            dt,
            elapsed,
            timewarp: 1.0,
            airspace,
        }
    }

    pub fn with_timewarp(mut self, timewarp: f64) -> Self {
        self.timewarp = timewarp;
        self
    }
}

/// Advance one aircraft by one tick: phase machine, target resolver,
/// physics integrator, hazard monitor, airspace boundary — in that order.
///
/// All anomalies stay local to this aircraft's tick. A missing route under
/// lateral navigation completes the tick on the sticky heading target and is
/// reported so the caller can flag the aircraft.
pub fn update_aircraft<R: RouteProvider, S: EventSink>(
    aircraft: &mut AircraftState,
    route: &mut R,
    mcp: &mut ModeController,
    ctx: &UpdateContext,
    sink: &mut S,
) -> Result<(), SimError> {
    phase::update_flight_phase(aircraft, route, mcp, ctx.elapsed, sink);

    let resolution = autopilot::resolve_targets(aircraft, route, mcp, ctx.airspace, ctx.elapsed);

    physics::advance(
        aircraft,
        route,
        ctx.airspace,
        ctx.dt,
        ctx.elapsed,
        ctx.timewarp,
    );
    hazards::scan(aircraft, route, ctx.airspace, ctx.dt, sink);
    update_controllability(aircraft, mcp, ctx.airspace, sink);

    resolution
}

/// Detect a change of the "inside controlled airspace" status and run the
/// matching contact/handoff side effects. Suppressed for projected
/// instances.
pub fn update_controllability<S: EventSink>(
    aircraft: &mut AircraftState,
    mcp: &ModeController,
    airspace: &Airspace,
    sink: &mut S,
) {
    let is_inside_airspace = aircraft.is_inside_airspace(airspace);

    if is_inside_airspace == aircraft.is_controllable || aircraft.projected {
        return;
    }

    aircraft.is_controllable = is_inside_airspace;

    if is_inside_airspace {
        call_up(aircraft, mcp, sink);
        // reentry: the strip is needed again
        aircraft.is_flight_strip_removable = false;

        return;
    }

    aircraft.is_flight_strip_removable = true;
    aircraft.is_removable = true;
    on_airspace_exit(aircraft, mcp, sink);
}

/// First radio contact after entering controlled airspace
fn call_up<S: EventSink>(aircraft: &AircraftState, mcp: &ModeController, sink: &mut S) {
    if aircraft.is_arrival() {
        let altitude_difference = aircraft.altitude - mcp.altitude;
        let altitude_hundreds = (aircraft.altitude / 100.0).round() * 100.0;

        let message = if altitude_difference > 200.0 {
            format!(
                "with you descending through {altitude_hundreds:.0} for {:.0}",
                mcp.altitude
            )
        } else if altitude_difference < -200.0 {
            format!(
                "with you climbing through {altitude_hundreds:.0} for {:.0}",
                mcp.altitude
            )
        } else {
            format!("with you at {altitude_hundreds:.0}")
        };

        sink.radio_call(&message, RadioSector::Approach, false);
    }

    if aircraft.is_departure() {
        sink.radio_call("ready to taxi", RadioSector::Tower, false);
    }
}

/// Handoff (or violation) as the aircraft leaves controlled airspace
fn on_airspace_exit<S: EventSink>(aircraft: &AircraftState, mcp: &ModeController, sink: &mut S) {
    if aircraft.is_arrival() {
        sink.radio_call("leaving radar coverage as arrival", RadioSector::Approach, true);
        sink.record(GameEvent::AirspaceBust);

        return;
    }

    if mcp.heading_mode != HeadingMode::Lnav {
        sink.radio_call(
            "leaving radar coverage without proper clearance",
            RadioSector::Departure,
            true,
        );
        sink.record(GameEvent::NotClearedOnRoute);

        return;
    }

    sink.radio_call("switching to center, good day", RadioSector::Departure, false);
    sink.record(GameEvent::Departure);
}
