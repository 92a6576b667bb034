use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::utils::units::SECONDS_PER_MINUTE;

/// Direction of turns while flying a holding pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnDirection {
    Left,
    Right,
}

/// Holding-pattern definition attached to a hold waypoint.
///
/// The timer and inbound-heading cache are simulation state: they are armed
/// and reset through the route provider while an aircraft flies the hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldParameters {
    /// Leg length, e.g. "1min"
    pub leg_length: String,
    pub turn_direction: TurnDirection,
    /// Sim time at which the outbound leg ends, s
    #[serde(default)]
    pub timer: Option<f64>,
    /// Captured on first entry; the course flown back toward the fix, rad
    #[serde(default)]
    pub inbound_heading: Option<f64>,
}

impl HoldParameters {
    pub fn new(leg_length: &str, turn_direction: TurnDirection) -> Self {
        Self {
            leg_length: leg_length.to_string(),
            turn_direction,
            timer: None,
            inbound_heading: None,
        }
    }

    /// Duration of one leg, s. Malformed leg lengths fall back to one minute.
    pub fn leg_duration(&self) -> f64 {
        match self.leg_length.strip_suffix("min").map(str::parse::<f64>) {
            Some(Ok(minutes)) => minutes * SECONDS_PER_MINUTE,
            _ => {
                log::warn!(
                    "unparseable hold leg length {:?}, assuming 1min",
                    self.leg_length
                );

                SECONDS_PER_MINUTE
            }
        }
    }
}

/// What kind of guidance a waypoint provides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WaypointKind {
    /// A named fix flown to by bearing
    Fix,
    /// Fly a fixed course rather than to a position
    Vector { course: f64 },
    /// Hold at the fix
    Hold(HoldParameters),
}

/// One waypoint of a flight plan, with its restrictions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    /// km east/north of the airport reference
    pub position: DVec2,
    pub kind: WaypointKind,
    /// At-or-below crossing restriction, ft
    #[serde(default)]
    pub altitude_maximum: Option<f64>,
    /// At-or-above crossing restriction, ft
    #[serde(default)]
    pub altitude_minimum: Option<f64>,
    /// At-or-below crossing restriction, kt
    #[serde(default)]
    pub speed_maximum: Option<f64>,
    /// At-or-above crossing restriction, kt
    #[serde(default)]
    pub speed_minimum: Option<f64>,
    /// Must be overflown before turning (no early fly-by turn)
    #[serde(default)]
    pub is_fly_over: bool,
    /// Altitude changes toward this waypoint may use full climb/descent rates
    #[serde(default)]
    pub expedite: bool,
}

impl Waypoint {
    pub fn fix(name: &str, position: DVec2) -> Self {
        Self {
            name: name.to_string(),
            position,
            kind: WaypointKind::Fix,
            altitude_maximum: None,
            altitude_minimum: None,
            speed_maximum: None,
            speed_minimum: None,
            is_fly_over: false,
            expedite: false,
        }
    }

    pub fn vector(name: &str, course: f64) -> Self {
        Self {
            kind: WaypointKind::Vector { course },
            ..Self::fix(name, DVec2::ZERO)
        }
    }

    pub fn hold(name: &str, position: DVec2, parameters: HoldParameters) -> Self {
        Self {
            kind: WaypointKind::Hold(parameters),
            ..Self::fix(name, position)
        }
    }

    pub fn is_vector(&self) -> bool {
        matches!(self.kind, WaypointKind::Vector { .. })
    }

    pub fn is_hold(&self) -> bool {
        matches!(self.kind, WaypointKind::Hold(_))
    }

    pub fn hold_parameters(&self) -> Option<&HoldParameters> {
        match &self.kind {
            WaypointKind::Hold(parameters) => Some(parameters),
            _ => None,
        }
    }

    pub fn has_maximum_altitude_at_or_below(&self, altitude: f64) -> bool {
        matches!(self.altitude_maximum, Some(max) if max <= altitude)
    }

    pub fn has_minimum_altitude_at_or_above(&self, altitude: f64) -> bool {
        matches!(self.altitude_minimum, Some(min) if min >= altitude)
    }

    pub fn has_maximum_speed_at_or_below(&self, speed: f64) -> bool {
        matches!(self.speed_maximum, Some(max) if max <= speed)
    }

    pub fn has_minimum_speed_at_or_above(&self, speed: f64) -> bool {
        matches!(self.speed_minimum, Some(min) if min >= speed)
    }

    pub fn is_altitude_restricted(&self) -> bool {
        self.altitude_maximum.is_some() || self.altitude_minimum.is_some()
    }
}
