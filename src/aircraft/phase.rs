use serde::{Deserialize, Serialize};

use crate::aircraft::state::AircraftState;
use crate::control::events::{EventSink, GameEvent, RadioSector};
use crate::control::mcp::ModeController;
use crate::navigation::RouteProvider;
use crate::utils::constants::{MISSED_APPROACH_CLIMB, TAKEOFF_TURN_ALTITUDE};
use crate::utils::math::{ceil_to, floor_to};

/// The phases of a simulated flight.
///
/// Departures walk Apron → Taxi → Waiting → Takeoff → Climb → Cruise;
/// arrivals enter at Cruise (or Descent) and walk down to Landing. The only
/// reverse edge is the missed-approach abort, Approach → Descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightPhase {
    Apron,
    Taxi,
    Waiting,
    Takeoff,
    Climb,
    Cruise,
    Descent,
    Approach,
    Landing,
}

/// Advance the flight phase if this tick's conditions allow it. At most one
/// transition happens per tick.
pub fn update_flight_phase<R: RouteProvider, S: EventSink>(
    aircraft: &mut AircraftState,
    route: &R,
    mcp: &mut ModeController,
    elapsed: f64,
    sink: &mut S,
) {
    match aircraft.phase {
        FlightPhase::Apron => {}

        FlightPhase::Taxi => {
            if elapsed - aircraft.taxi_start > aircraft.taxi_duration {
                if let Some(runway) = route.departure_runway() {
                    aircraft.move_to_runway(runway);
                }

                aircraft.phase = FlightPhase::Waiting;
            }
        }

        // holds short until an external takeoff clearance calls begin_takeoff
        FlightPhase::Waiting => {}

        FlightPhase::Takeoff => {
            let runway_elevation = route
                .departure_runway()
                .map(|runway| runway.elevation)
                .unwrap_or(0.0);

            if aircraft.altitude - runway_elevation > TAKEOFF_TURN_ALTITUDE {
                // gear up; the panel takes over from here
                mcp.enable_autopilot();
                aircraft.phase = FlightPhase::Climb;
            }
        }

        FlightPhase::Climb => {
            if aircraft.altitude == route.flight_plan_altitude() {
                aircraft.phase = FlightPhase::Cruise;
            }
        }

        FlightPhase::Cruise => {
            if aircraft.altitude < route.flight_plan_altitude() {
                aircraft.phase = FlightPhase::Descent;
            }
        }

        FlightPhase::Descent => {
            if mcp.approach_clearance && aircraft.is_established_on_course(route) {
                judge_localizer_interception(aircraft, route, sink);
                aircraft.phase = FlightPhase::Approach;
            }
        }

        FlightPhase::Approach => {
            if !aircraft.is_on_final(route) {
                return;
            }

            if !aircraft.is_established_on_glidepath_for_route(route) {
                cancel_landing(aircraft, route, mcp, sink);

                return;
            }

            aircraft.phase = FlightPhase::Landing;
        }

        // rollout; removal is decided by the controller once stopped
        FlightPhase::Landing => {}
    }
}

/// Push back and start the taxi clock. External taxi clearances call this.
pub fn begin_taxi(aircraft: &mut AircraftState, elapsed: f64) {
    if aircraft.phase == FlightPhase::Apron {
        aircraft.phase = FlightPhase::Taxi;
        aircraft.taxi_start = elapsed;
    }
}

/// Roll from holding short. External takeoff clearances call this.
pub fn begin_takeoff(aircraft: &mut AircraftState, elapsed: f64) {
    if aircraft.phase == FlightPhase::Waiting {
        aircraft.phase = FlightPhase::Takeoff;
        aircraft.takeoff_time = Some(elapsed);
    }
}

/// Abort the landing attempt: climb on present heading to the missed-approach
/// altitude (or level at the next thousand below, whichever is higher),
/// revoke the approach clearance and fall back to the descent phase.
pub fn cancel_landing<R: RouteProvider, S: EventSink>(
    aircraft: &mut AircraftState,
    route: &R,
    mcp: &mut ModeController,
    sink: &mut S,
) {
    if aircraft.projected {
        return;
    }

    let Some(runway) = route.arrival_runway() else {
        log::warn!(
            "{} cannot go around without an arrival runway",
            aircraft.callsign()
        );

        return;
    };

    let missed_approach_altitude = ceil_to(runway.elevation + MISSED_APPROACH_CLIMB, 1000.0);
    let next_altitude_below = floor_to(aircraft.altitude, 1000.0);

    let (altitude_to_maintain, radio_message) = if next_altitude_below >= missed_approach_altitude {
        (
            next_altitude_below,
            format!(
                "going missed approach, present heading, leveling at {next_altitude_below:.0}"
            ),
        )
    } else {
        (
            missed_approach_altitude,
            format!(
                "going missed approach, present heading, climbing to {missed_approach_altitude:.0}"
            ),
        )
    };

    mcp.approach_clearance = false;
    mcp.set_altitude_hold(altitude_to_maintain);
    mcp.set_heading_hold(aircraft.heading);
    aircraft.phase = FlightPhase::Descent;
    sink.radio_call(&radio_message, RadioSector::Approach, true);
}

/// Evaluate the interception as the aircraft becomes established; a capture
/// from above the glidepath is penalized.
fn judge_localizer_interception<R: RouteProvider, S: EventSink>(
    aircraft: &AircraftState,
    route: &R,
    sink: &mut S,
) {
    if aircraft.projected {
        return;
    }

    let Some(runway) = route.arrival_runway() else {
        return;
    };

    if aircraft.is_above_glidepath(runway) {
        log::warn!(
            "{} intercepted localizer above glideslope",
            aircraft.callsign()
        );
        sink.record(GameEvent::LocalizerInterceptAboveGlideslope);
    }
}

impl AircraftState {
    /// Glidepath establishment against the route's landing runway
    pub fn is_established_on_glidepath_for_route<R: RouteProvider>(&self, route: &R) -> bool {
        route
            .arrival_runway()
            .map(|runway| self.is_established_on_glidepath(runway))
            .unwrap_or(false)
    }
}
