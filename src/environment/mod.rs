pub mod airspace;
pub mod runway;
pub mod terrain;

pub use airspace::{Airspace, Wind};
pub use runway::{Runway, RunwayWind};
pub use terrain::{RestrictedArea, Terrain, TerrainPolygon};
