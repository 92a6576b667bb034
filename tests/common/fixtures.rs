use std::sync::Arc;

use glam::DVec2;

use tracon::aircraft::{
    AircraftPerformance, AircraftState, EngineType, Engines, FlightCategory, FlightRules,
    PerformanceRates, SpawnOptions, SpeedEnvelope, WeightClass,
};
use tracon::environment::{Airspace, Runway, Wind};
use tracon::navigation::{FlightPlan, Waypoint};
use tracon::utils::math::deg_to_rad;

/// A medium twin-jet, the workhorse of the test fleet
pub fn b738() -> Arc<AircraftPerformance> {
    Arc::new(AircraftPerformance {
        name: "Boeing 737-800".into(),
        icao: "B738".into(),
        weight_class: WeightClass::Large,
        engines: Engines {
            number: 2,
            engine_type: EngineType::Jet,
        },
        rate: PerformanceRates {
            climb: 3000.0,
            descent: 3000.0,
            accelerate: 7.0,
            decelerate: 7.0,
        },
        speed: SpeedEnvelope {
            min: 110.0,
            landing: 135.0,
            cruise: 460.0,
            max: 525.0,
        },
        ceiling: 41_000.0,
    })
}

/// A sea-level airport with an 80 km control radius and no wind
pub fn test_airspace() -> Airspace {
    Airspace {
        elevation: 0.0,
        ctr_radius: 80.0,
        ctr_ceiling: 19_000.0,
        perimeter: None,
        wind: Wind {
            angle: 0.0,
            speed: 0.0,
        },
        restricted_areas: vec![],
        terrain: Default::default(),
    }
}

/// A north-facing runway with its threshold at the airport reference
pub fn runway_north() -> Runway {
    Runway {
        name: "36".into(),
        position: DVec2::ZERO,
        elevation: 0.0,
        angle: 0.0,
        glideslope_angle: deg_to_rad(3.0),
    }
}

/// An empty route carrying only the arrival runway
pub fn arrival_route() -> FlightPlan {
    FlightPlan::new(vec![], 34_000.0).with_arrival_runway(runway_north())
}

pub fn route_with_waypoints(waypoints: Vec<Waypoint>) -> FlightPlan {
    FlightPlan::new(waypoints, 34_000.0).with_arrival_runway(runway_north())
}

pub fn arrival_spawn(performance: Arc<AircraftPerformance>) -> SpawnOptions {
    SpawnOptions {
        category: FlightCategory::Arrival,
        airline_id: "AAL".into(),
        airline_callsign: "American".into(),
        flight_number: "551".into(),
        origin: String::new(),
        destination: "KLAS".into(),
        rules: FlightRules::Ifr,
        position: DVec2::new(0.0, -60.0),
        heading: 0.0,
        altitude: 15_000.0,
        speed: 280.0,
        transponder_code: 0o4601,
        performance,
    }
}

pub fn departure_spawn(performance: Arc<AircraftPerformance>) -> SpawnOptions {
    SpawnOptions {
        category: FlightCategory::Departure,
        airline_id: "UAL".into(),
        airline_callsign: "United".into(),
        flight_number: "1606".into(),
        origin: "KLAS".into(),
        destination: String::new(),
        rules: FlightRules::Ifr,
        position: DVec2::ZERO,
        heading: 0.0,
        altitude: 0.0,
        speed: 0.0,
        transponder_code: 0o2234,
        performance,
    }
}

/// An arrival in cruise, 60 km south of the field, heading north
pub fn arrival_aircraft(airspace: &Airspace) -> AircraftState {
    AircraftState::new(arrival_spawn(b738()), airspace)
}

/// A departure on the apron
pub fn departure_aircraft(airspace: &Airspace) -> AircraftState {
    AircraftState::new(departure_spawn(b738()), airspace)
}
