use serde::{Deserialize, Serialize};

use crate::environment::Runway;
use crate::navigation::waypoint::{Waypoint, WaypointKind};
use crate::navigation::RouteProvider;

/// A straightforward Vec-backed route.
///
/// Real deployments own route management elsewhere; this implementation is
/// the reference `RouteProvider` and the test double the core is exercised
/// against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightPlan {
    waypoints: Vec<Waypoint>,
    current: usize,
    /// Planned cruise altitude, ft
    pub cruise_altitude: f64,
    #[serde(default)]
    pub arrival_runway: Option<Runway>,
    #[serde(default)]
    pub departure_runway: Option<Runway>,
}

impl FlightPlan {
    pub fn new(waypoints: Vec<Waypoint>, cruise_altitude: f64) -> Self {
        Self {
            waypoints,
            current: 0,
            cruise_altitude,
            arrival_runway: None,
            departure_runway: None,
        }
    }

    pub fn with_arrival_runway(mut self, runway: Runway) -> Self {
        self.arrival_runway = Some(runway);
        self
    }

    pub fn with_departure_runway(mut self, runway: Runway) -> Self {
        self.departure_runway = Some(runway);
        self
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    fn remaining(&self) -> &[Waypoint] {
        self.waypoints.get(self.current..).unwrap_or(&[])
    }

    fn find_ahead<F>(&self, qualifies: F) -> Option<&Waypoint>
    where
        F: Fn(&Waypoint) -> bool,
    {
        self.remaining().iter().find(|waypoint| qualifies(waypoint))
    }
}

impl RouteProvider for FlightPlan {
    fn current_waypoint(&self) -> Option<&Waypoint> {
        self.waypoints.get(self.current)
    }

    fn next_waypoint(&self) -> Option<&Waypoint> {
        self.waypoints.get(self.current + 1)
    }

    fn advance_waypoint(&mut self) {
        if self.current < self.waypoints.len() {
            self.current += 1;
        }
    }

    fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    fn next_waypoint_with_maximum_altitude_at_or_below(&self, altitude: f64) -> Option<&Waypoint> {
        self.find_ahead(|w| w.has_maximum_altitude_at_or_below(altitude))
    }

    fn next_waypoint_with_minimum_altitude_at_or_above(&self, altitude: f64) -> Option<&Waypoint> {
        self.find_ahead(|w| w.has_minimum_altitude_at_or_above(altitude))
    }

    fn next_waypoint_with_maximum_speed_at_or_below(&self, speed: f64) -> Option<&Waypoint> {
        self.find_ahead(|w| w.has_maximum_speed_at_or_below(speed))
    }

    fn next_waypoint_with_minimum_speed_at_or_above(&self, speed: f64) -> Option<&Waypoint> {
        self.find_ahead(|w| w.has_minimum_speed_at_or_above(speed))
    }

    fn altitude_restricted_waypoints(&self) -> Vec<&Waypoint> {
        self.remaining()
            .iter()
            .filter(|w| w.is_altitude_restricted())
            .collect()
    }

    fn flight_plan_altitude(&self) -> f64 {
        self.cruise_altitude
    }

    fn arrival_runway(&self) -> Option<&Runway> {
        self.arrival_runway.as_ref()
    }

    fn departure_runway(&self) -> Option<&Runway> {
        self.departure_runway.as_ref()
    }

    fn arm_hold_timer(&mut self, expiry: f64) {
        if let Some(waypoint) = self.waypoints.get_mut(self.current) {
            if let WaypointKind::Hold(parameters) = &mut waypoint.kind {
                parameters.timer = Some(expiry);
            }
        }
    }

    fn reset_hold_timer(&mut self) {
        if let Some(waypoint) = self.waypoints.get_mut(self.current) {
            if let WaypointKind::Hold(parameters) = &mut waypoint.kind {
                parameters.timer = None;
            }
        }
    }

    fn set_hold_inbound_heading(&mut self, heading: f64) {
        if let Some(waypoint) = self.waypoints.get_mut(self.current) {
            if let WaypointKind::Hold(parameters) = &mut waypoint.kind {
                if parameters.inbound_heading.is_none() {
                    parameters.inbound_heading = Some(heading);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn plan() -> FlightPlan {
        let mut restricted = Waypoint::fix("KEPEC", DVec2::new(20.0, 0.0));
        restricted.altitude_maximum = Some(8000.0);

        FlightPlan::new(
            vec![
                Waypoint::fix("TRALR", DVec2::new(40.0, 0.0)),
                restricted,
                Waypoint::fix("SUNST", DVec2::new(10.0, 0.0)),
            ],
            34_000.0,
        )
    }

    #[test]
    fn advancing_moves_the_current_waypoint() {
        let mut plan = plan();
        assert_eq!(plan.current_waypoint().unwrap().name, "TRALR");
        assert!(plan.has_next_waypoint());

        plan.advance_waypoint();
        assert_eq!(plan.current_waypoint().unwrap().name, "KEPEC");

        plan.advance_waypoint();
        plan.advance_waypoint();
        assert!(plan.current_waypoint().is_none());
        assert!(!plan.has_next_waypoint());
    }

    #[test]
    fn restriction_search_is_forward_only() {
        let mut plan = plan();
        assert!(plan
            .next_waypoint_with_maximum_altitude_at_or_below(10_000.0)
            .is_some());

        plan.advance_waypoint();
        plan.advance_waypoint();
        assert!(plan
            .next_waypoint_with_maximum_altitude_at_or_below(10_000.0)
            .is_none());
    }

    #[test]
    fn first_match_by_name_wins_for_duplicates() {
        let plan = FlightPlan::new(
            vec![
                Waypoint::fix("DUPE", DVec2::new(1.0, 0.0)),
                Waypoint::fix("DUPE", DVec2::new(2.0, 0.0)),
            ],
            10_000.0,
        );

        assert_eq!(plan.waypoint_index("DUPE"), Some(0));
    }
}
