pub mod autopilot;
pub mod hazards;
pub mod performance;
pub mod phase;
pub mod physics;
pub mod state;

pub use performance::{
    AircraftPerformance, EngineType, Engines, PerformanceRates, SpeedEnvelope, WeightClass,
};
pub use phase::{begin_takeoff, begin_taxi, cancel_landing, update_flight_phase, FlightPhase};
pub use state::{
    random_transponder_code, AircraftState, FlightCategory, FlightRules, PositionSample,
    RestrictedAreaTrack, SpawnOptions, Target,
};
