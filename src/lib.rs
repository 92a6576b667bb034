pub mod aircraft;
pub mod control;
pub mod environment;
pub mod navigation;
pub mod simulation;
pub mod utils;

pub use aircraft::{
    AircraftPerformance, AircraftState, FlightCategory, FlightPhase, FlightRules, Target,
};
pub use control::{EventSink, GameEvent, LogSink, ModeController, NullSink, RadioSector};
pub use environment::{Airspace, RestrictedArea, Runway, Terrain, Wind};
pub use navigation::{FlightPlan, RouteProvider, Waypoint};
pub use simulation::{update_aircraft, UpdateContext};
pub use utils::errors::SimError;
