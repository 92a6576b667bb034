use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Altitude axis of the mode-control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AltitudeMode {
    #[default]
    Off,
    Hold,
    Approach,
    Vnav,
}

/// Heading axis of the mode-control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingMode {
    #[default]
    Off,
    Hold,
    Lnav,
    VorLoc,
}

/// Speed axis of the mode-control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedMode {
    #[default]
    Off,
    Hold,
    N1,
    Vnav,
}

/// The point a tuned course is referenced to (an ILS antenna / runway
/// threshold), with its field elevation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CourseDatum {
    /// km east/north of the airport reference
    pub position: DVec2,
    /// ft MSL
    pub elevation: f64,
}

/// Mode-control panel state: the human-commanded mode and setpoint per axis.
///
/// These are *settings*, distinct from the per-tick targets the resolver
/// computes from them. The panel is owned by an external collaborator; the
/// core reads it every tick and writes it back only through the documented
/// pilot actions (missed approach, present-heading fallback, autopilot
/// engagement after takeoff).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModeController {
    pub autopilot_engaged: bool,

    pub altitude_mode: AltitudeMode,
    /// Commanded altitude, ft
    pub altitude: f64,

    pub heading_mode: HeadingMode,
    /// Commanded heading, rad; unset until a directional instruction is given
    pub heading: Option<f64>,

    pub speed_mode: SpeedMode,
    /// Commanded speed, kt
    pub speed: f64,

    /// Tuned localizer/VOR course, rad
    pub course: f64,
    pub nav1_datum: Option<CourseDatum>,

    /// Pilot bookkeeping surfaced with the command state: whether an
    /// approach clearance has been issued and not revoked
    pub approach_clearance: bool,
}

impl ModeController {
    pub fn enable_autopilot(&mut self) {
        self.autopilot_engaged = true;
    }

    pub fn set_altitude_hold(&mut self, altitude: f64) {
        self.altitude = altitude;
        self.altitude_mode = AltitudeMode::Hold;
    }

    pub fn set_altitude_vnav(&mut self, altitude: f64) {
        self.altitude = altitude;
        self.altitude_mode = AltitudeMode::Vnav;
    }

    pub fn set_altitude_approach(&mut self) {
        self.altitude_mode = AltitudeMode::Approach;
    }

    pub fn set_heading_hold(&mut self, heading: f64) {
        self.heading = Some(heading);
        self.heading_mode = HeadingMode::Hold;
    }

    pub fn set_heading_lnav(&mut self) {
        self.heading_mode = HeadingMode::Lnav;
    }

    pub fn set_speed_hold(&mut self, speed: f64) {
        self.speed = speed;
        self.speed_mode = SpeedMode::Hold;
    }

    pub fn set_speed_vnav(&mut self, speed: f64) {
        self.speed = speed;
        self.speed_mode = SpeedMode::Vnav;
    }

    /// Tune an approach course and arm the localizer/glidepath modes
    pub fn arm_approach(&mut self, course: f64, datum: CourseDatum) {
        self.course = course;
        self.nav1_datum = Some(datum);
        self.heading_mode = HeadingMode::VorLoc;
        self.altitude_mode = AltitudeMode::Approach;
        self.approach_clearance = true;
    }

    /// Panel state for an aircraft spawning already airborne: autopilot on,
    /// coupled to the route laterally and vertically
    pub fn initialize_for_airborne_flight(
        &mut self,
        bottom_altitude: f64,
        airspace_ceiling: f64,
        speed: f64,
    ) -> &mut Self {
        self.autopilot_engaged = true;
        self.altitude = bottom_altitude.min(airspace_ceiling);
        self.altitude_mode = AltitudeMode::Vnav;
        self.heading = None;
        self.heading_mode = HeadingMode::Lnav;
        self.speed = speed;
        self.speed_mode = SpeedMode::Vnav;
        self
    }
}
