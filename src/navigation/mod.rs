pub mod route;
pub mod waypoint;

pub use route::FlightPlan;
pub use waypoint::{HoldParameters, TurnDirection, Waypoint, WaypointKind};

use crate::environment::Runway;

/// The flight-management seam: everything the simulation core asks of the
/// route owned by an external collaborator.
///
/// Restriction searches look forward from the current waypoint and return
/// the nearest qualifying waypoint. The hold-timer operations act on the
/// current waypoint; `set_hold_inbound_heading` is idempotent and only
/// captures a heading if none is cached yet.
pub trait RouteProvider {
    fn current_waypoint(&self) -> Option<&Waypoint>;

    /// The waypoint after the current one, if any
    fn next_waypoint(&self) -> Option<&Waypoint>;

    fn has_next_waypoint(&self) -> bool {
        self.next_waypoint().is_some()
    }

    /// Sequence past the current waypoint
    fn advance_waypoint(&mut self);

    /// The full ordered route, for restriction-index comparison
    fn waypoints(&self) -> &[Waypoint];

    /// Index of the first waypoint with the given name
    fn waypoint_index(&self, name: &str) -> Option<usize> {
        self.waypoints().iter().position(|w| w.name == name)
    }

    fn next_waypoint_with_maximum_altitude_at_or_below(&self, altitude: f64) -> Option<&Waypoint>;

    fn next_waypoint_with_minimum_altitude_at_or_above(&self, altitude: f64) -> Option<&Waypoint>;

    fn next_waypoint_with_maximum_speed_at_or_below(&self, speed: f64) -> Option<&Waypoint>;

    fn next_waypoint_with_minimum_speed_at_or_above(&self, speed: f64) -> Option<&Waypoint>;

    /// Remaining waypoints carrying any altitude restriction, in route order
    fn altitude_restricted_waypoints(&self) -> Vec<&Waypoint>;

    /// Planned cruise altitude, ft
    fn flight_plan_altitude(&self) -> f64;

    fn arrival_runway(&self) -> Option<&Runway>;

    fn departure_runway(&self) -> Option<&Runway>;

    /// Arm the current waypoint's hold timer to expire at `expiry` sim time
    fn arm_hold_timer(&mut self, expiry: f64);

    /// Clear the current waypoint's hold timer
    fn reset_hold_timer(&mut self);

    /// Cache the holding pattern's inbound heading if not already captured
    fn set_hold_inbound_heading(&mut self, heading: f64);
}
