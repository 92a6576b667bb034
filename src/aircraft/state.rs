use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::aircraft::performance::{
    AircraftPerformance, EngineType, Engines, PerformanceRates, SpeedEnvelope, WeightClass,
};
use crate::aircraft::phase::FlightPhase;
use crate::environment::{Airspace, Runway, Terrain};
use crate::navigation::{RouteProvider, TurnDirection};
use crate::utils::constants::*;
use crate::utils::math::angle_offset;
use crate::utils::units::{km_to_nm, MINUTES_PER_HOUR, SECONDS_PER_HOUR};
use crate::utils::vectors::{course_offset, vradial};

/// Whether the flight is inbound to or outbound from the airport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightCategory {
    Arrival,
    Departure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightRules {
    Ifr,
    Vfr,
}

/// The desired values the physics integrator chases each tick; computed by
/// the target resolver, distinct from the mode-control panel's settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// ft MSL
    pub altitude: f64,
    /// rad
    pub heading: f64,
    /// Forced turn direction (holding patterns); `None` turns the short way
    pub turn: Option<TurnDirection>,
    /// Use full climb/descent rates instead of the typical derate
    pub expedite: bool,
    /// kt IAS
    pub speed: f64,
}

impl Default for Target {
    fn default() -> Self {
        Self {
            altitude: 0.0,
            heading: 0.0,
            turn: None,
            expedite: false,
            speed: 0.0,
        }
    }
}

/// Per-aircraft tracking of one restricted area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestrictedAreaTrack {
    /// Index into the airspace's restricted-area list
    pub index: usize,
    /// Distance until the next containment check, km; `None` forces a check
    pub range: Option<f64>,
    pub inside: bool,
}

/// One radar-trail sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    pub east: f64,
    pub north: f64,
    /// Time-scale-corrected sim time of the sample, s
    pub time: f64,
}

/// Everything needed to create an aircraft at spawn
#[derive(Debug, Clone)]
pub struct SpawnOptions {
    pub category: FlightCategory,
    pub airline_id: String,
    pub airline_callsign: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub rules: FlightRules,
    /// km east/north of the airport reference
    pub position: DVec2,
    /// rad
    pub heading: f64,
    /// ft MSL
    pub altitude: f64,
    /// kt IAS
    pub speed: f64,
    pub transponder_code: u16,
    pub performance: Arc<AircraftPerformance>,
}

/// The full simulation state of one aircraft.
///
/// Mutated once per tick by the flight-phase machine, target resolver,
/// physics integrator and hazard monitor, in that order. Aircraft are
/// mutually independent; nothing here is shared between aircraft except the
/// read-only performance data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftState {
    pub id: Uuid,
    pub airline_id: String,
    pub airline_callsign: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub transponder_code: u16,

    /// rad, magnetic
    pub heading: f64,
    /// ft MSL
    pub altitude: f64,
    /// kt IAS
    pub speed: f64,
    /// kt
    pub ground_speed: f64,
    /// rad, azimuth of movement across the ground
    pub ground_track: f64,
    /// -1 descending, 0 level, 1 climbing
    pub trend: i8,
    /// km east/north of the airport reference
    pub position: DVec2,
    /// km from the airport reference
    pub distance: f64,
    /// rad, azimuth from the airport reference to the aircraft
    pub radial: f64,

    pub category: FlightCategory,
    pub rules: FlightRules,
    #[serde(skip, default = "placeholder_performance")]
    pub performance: Arc<AircraftPerformance>,

    pub phase: FlightPhase,
    /// Sim time taxi began, s
    pub taxi_start: f64,
    /// s from pushback to holding short
    pub taxi_duration: f64,
    /// Sim time of takeoff, s
    pub takeoff_time: Option<f64>,

    pub target: Target,

    pub is_controllable: bool,
    pub is_flight_strip_removable: bool,
    pub is_removable: bool,
    /// Terrain collision has occurred
    pub hit: bool,
    /// Inside at least one restricted area
    pub warning: bool,
    /// Speculative what-if instance; side effects must stay suppressed
    pub projected: bool,

    pub restricted_tracks: Vec<RestrictedAreaTrack>,
    /// band (ft) -> per-polygon distance until the next containment check, km
    pub terrain_ranges: HashMap<i64, Vec<f64>>,
    /// Band the counters were last maintained for
    pub terrain_band: i64,

    /// Set after the first pass over the holding fix
    pub established_on_hold: bool,

    pub position_history: Vec<PositionSample>,
}

fn placeholder_performance() -> Arc<AircraftPerformance> {
    // Deserialized states must be re-linked to their shared performance data
    // by the owning controller before use.
    Arc::new(AircraftPerformance {
        name: String::new(),
        icao: String::new(),
        weight_class: WeightClass::Medium,
        engines: Engines {
            number: 2,
            engine_type: EngineType::Jet,
        },
        rate: PerformanceRates {
            climb: 1000.0,
            descent: 1000.0,
            accelerate: 4.0,
            decelerate: 4.0,
        },
        speed: SpeedEnvelope {
            min: 100.0,
            landing: 120.0,
            cruise: 400.0,
            max: 500.0,
        },
        ceiling: 30_000.0,
    })
}

impl AircraftState {
    /// Create an aircraft at spawn. Departures start on the apron at field
    /// elevation; arrivals spawn airborne outside controlled airspace with
    /// their target matching their current kinematics.
    pub fn new(options: SpawnOptions, airspace: &Airspace) -> Self {
        let (phase, altitude, speed, is_controllable, takeoff_time) = match options.category {
            FlightCategory::Departure => (FlightPhase::Apron, airspace.elevation, 0.0, true, None),
            FlightCategory::Arrival => (
                FlightPhase::Cruise,
                options.altitude,
                options.speed,
                false,
                Some(0.0),
            ),
        };

        let restricted_tracks = (0..airspace.restricted_areas.len())
            .map(|index| RestrictedAreaTrack {
                index,
                range: None,
                inside: false,
            })
            .collect();

        let mut state = Self {
            id: Uuid::new_v4(),
            airline_id: options.airline_id,
            airline_callsign: options.airline_callsign,
            flight_number: options.flight_number,
            origin: options.origin,
            destination: options.destination,
            transponder_code: options.transponder_code,
            heading: options.heading,
            altitude,
            speed,
            ground_speed: speed,
            ground_track: options.heading,
            trend: 0,
            position: options.position,
            distance: options.position.length(),
            radial: vradial(options.position),
            category: options.category,
            rules: options.rules,
            performance: options.performance,
            phase,
            taxi_start: 0.0,
            taxi_duration: DEFAULT_TAXI_DURATION,
            takeoff_time,
            target: Target {
                altitude,
                heading: options.heading,
                turn: None,
                expedite: false,
                speed,
            },
            is_controllable,
            is_flight_strip_removable: false,
            is_removable: false,
            hit: false,
            warning: false,
            projected: false,
            restricted_tracks,
            terrain_ranges: HashMap::new(),
            terrain_band: 0,
            established_on_hold: false,
            position_history: Vec::new(),
        };

        state.build_terrain_ranges(&airspace.terrain);
        state
    }

    fn build_terrain_ranges(&mut self, terrain: &Terrain) {
        self.terrain_ranges = terrain
            .bands()
            .map(|(band, polygons)| (band, vec![f64::INFINITY; polygons.len()]))
            .collect();
        self.terrain_band = 0;
    }

    /// Written callsign, e.g. `AAL551`
    pub fn callsign(&self) -> String {
        format!(
            "{}{}",
            self.airline_id.to_uppercase(),
            self.flight_number.to_uppercase()
        )
    }

    /// Callsign as spoken on the radio, with the weight-class suffix
    pub fn radio_callsign(&self) -> String {
        match self.performance.weight_class.radio_modifier() {
            Some(modifier) => format!(
                "{} {} {}",
                self.airline_callsign, self.flight_number, modifier
            ),
            None => format!("{} {}", self.airline_callsign, self.flight_number),
        }
    }

    pub fn is_arrival(&self) -> bool {
        self.category == FlightCategory::Arrival
    }

    pub fn is_departure(&self) -> bool {
        self.category == FlightCategory::Departure
    }

    /// The runway relevant to this flight's ground operations
    pub fn active_runway<'a, R: RouteProvider>(&self, route: &'a R) -> Option<&'a Runway> {
        match self.category {
            FlightCategory::Arrival => route.arrival_runway(),
            FlightCategory::Departure => route.departure_runway(),
        }
    }

    /// Weight-on-wheels: within a few feet of runway or field elevation
    pub fn is_on_ground<R: RouteProvider>(&self, route: &R, airspace: &Airspace) -> bool {
        let near_airport =
            (self.altitude - airspace.elevation).abs() < ON_GROUND_ALTITUDE_TOLERANCE;
        let near_runway = self
            .active_runway(route)
            .map(|runway| (self.altitude - runway.elevation).abs() < ON_GROUND_ALTITUDE_TOLERANCE)
            .unwrap_or(false);

        near_runway || near_airport
    }

    pub fn is_airborne<R: RouteProvider>(&self, route: &R, airspace: &Airspace) -> bool {
        !self.is_on_ground(route, airspace)
    }

    pub fn is_taxiing(&self) -> bool {
        matches!(
            self.phase,
            FlightPhase::Apron | FlightPhase::Taxi | FlightPhase::Waiting
        )
    }

    pub fn is_takeoff(&self) -> bool {
        self.is_taxiing() || self.phase == FlightPhase::Takeoff
    }

    pub fn is_stopped<R: RouteProvider>(&self, route: &R, airspace: &Airspace) -> bool {
        self.is_on_ground(route, airspace) && self.speed < STOPPED_SPEED
    }

    /// In flight below the minimum flying speed
    pub fn is_stalling<R: RouteProvider>(&self, route: &R, airspace: &Airspace) -> bool {
        self.speed < self.performance.speed.min && self.is_airborne(route, airspace)
    }

    /// Glideslope altitude abeam the current position for the landing runway
    pub fn glideslope_altitude_abeam(&self, runway: &Runway) -> f64 {
        let offset = course_offset(self.position, runway.position, runway.angle);

        runway.glideslope_altitude(offset.along)
    }

    /// Above the glidepath beyond the established tolerance
    pub fn is_above_glidepath(&self, runway: &Runway) -> bool {
        let glideslope_altitude = self.glideslope_altitude_abeam(runway);

        glideslope_altitude - self.altitude < -ESTABLISHED_ON_GLIDEPATH_MAX_DELTA
    }

    pub fn is_established_on_glidepath(&self, runway: &Runway) -> bool {
        let glideslope_altitude = self.glideslope_altitude_abeam(runway);

        (glideslope_altitude - self.altitude).abs() <= ESTABLISHED_ON_GLIDEPATH_MAX_DELTA
    }

    /// Laterally aligned with the approach course and pointed down it
    pub fn is_established_on_course<R: RouteProvider>(&self, route: &R) -> bool {
        let Some(runway) = route.arrival_runway() else {
            return false;
        };

        let offset = course_offset(self.position, runway.position, runway.angle);
        let aligned = km_to_nm(offset.lateral.abs()) <= ESTABLISHED_ON_COURSE_MAX_LATERAL_NM;
        let on_heading =
            angle_offset(self.heading, runway.angle).abs() < ESTABLISHED_ON_COURSE_MAX_ANGLE;

        aligned && on_heading
    }

    /// Established on course and inside the final approach fix
    pub fn is_on_final<R: RouteProvider>(&self, route: &R) -> bool {
        let Some(runway) = route.arrival_runway() else {
            return false;
        };

        let distance_nm = km_to_nm((runway.position - self.position).length());

        self.is_established_on_course(route) && distance_nm <= FINAL_APPROACH_FIX_DISTANCE_NM
    }

    pub fn is_inside_airspace(&self, airspace: &Airspace) -> bool {
        airspace.contains(self.position, self.distance, self.altitude)
    }

    /// Whether descent must begin now to make the next at-or-below
    /// altitude restriction on the route
    pub fn is_beyond_top_of_descent<R: RouteProvider>(&self, route: &R, mcp_altitude: f64) -> bool {
        let restricted = route.altitude_restricted_waypoints();

        let Some(last) = restricted.last() else {
            return false;
        };

        let (target_altitude, target_position) = match restricted
            .iter()
            .find(|w| w.has_maximum_altitude_at_or_below(self.altitude))
        {
            Some(ceiling_waypoint) => (
                ceiling_waypoint.altitude_maximum.unwrap_or(mcp_altitude),
                ceiling_waypoint.position,
            ),
            None => (mcp_altitude, last.position),
        };

        let distance_nm = km_to_nm((target_position - self.position).length());
        let altitude_change = target_altitude - self.altitude;
        let descent_rate = -self.performance.rate.descent * TYPICAL_DESCENT_FACTOR;
        let descent_time_min = altitude_change / descent_rate;
        let time_until_waypoint_min = distance_nm / self.ground_speed * MINUTES_PER_HOUR;

        descent_time_min > time_until_waypoint_min
    }

    /// Whether deceleration must begin now to make the given waypoint's
    /// at-or-below speed restriction
    pub fn is_beyond_deceleration_point(&self, waypoint_speed: f64, waypoint_position: DVec2) -> bool {
        let distance_nm = km_to_nm((waypoint_position - self.position).length());
        let speed_change = waypoint_speed - self.speed;
        // rate.decelerate is knots per two seconds
        let deceleration_rate = -self.performance.rate.decelerate / 2.0;
        let deceleration_time = speed_change / deceleration_rate;
        let time_until_waypoint = distance_nm / self.ground_speed * SECONDS_PER_HOUR;

        deceleration_time > time_until_waypoint
    }

    /// Place the aircraft at the runway threshold, aligned and at field
    /// elevation
    pub fn move_to_runway(&mut self, runway: &Runway) {
        self.position = runway.position;
        self.heading = runway.angle;
        self.altitude = runway.elevation;
        self.distance = self.position.length();
        self.radial = vradial(self.position);
    }
}

/// A random valid transponder code, avoiding reserved squawks
pub fn random_transponder_code<R: Rng>(rng: &mut R) -> u16 {
    const RESERVED: [u16; 4] = [0o1200, 0o7500, 0o7600, 0o7700];

    loop {
        let code = rng.gen_range(0..0o10000) as u16;

        if !RESERVED.contains(&code) {
            return code;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn transponder_codes_skip_reserved_squawks() {
        // StepRng walks straight through the emergency codes
        let mut rng = StepRng::new(0o7500, 1);

        for _ in 0..16 {
            let code = random_transponder_code(&mut rng);
            assert!(![0o1200, 0o7500, 0o7600, 0o7700].contains(&code));
            assert!(code < 0o10000);
        }
    }
}
