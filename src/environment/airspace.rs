use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

use crate::environment::terrain::{RestrictedArea, Terrain};
use crate::utils::errors::SimError;
use crate::utils::vectors::point_in_polygon;

/// Surface wind at the airport reference point
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Wind {
    /// Direction the wind blows from, rad
    pub angle: f64,
    /// Speed at the surface, kt
    pub speed: f64,
}

impl Default for Wind {
    fn default() -> Self {
        Self {
            angle: 0.0,
            speed: 0.0,
        }
    }
}

/// The controlled airspace surrounding the airport reference point.
///
/// All relative positions are km east/north of the reference point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airspace {
    /// Field elevation, ft MSL
    pub elevation: f64,
    /// Lateral boundary radius, km
    pub ctr_radius: f64,
    /// Vertical boundary, ft MSL
    pub ctr_ceiling: f64,
    /// Polygonal lateral boundary; overrides `ctr_radius` when present
    #[serde(default)]
    pub perimeter: Option<Vec<DVec2>>,
    #[serde(default)]
    pub wind: Wind,
    #[serde(default)]
    pub restricted_areas: Vec<RestrictedArea>,
    #[serde(default)]
    pub terrain: Terrain,
}

impl Airspace {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, SimError> {
        let file = File::open(path)?;
        let airspace: Airspace = serde_yaml::from_reader(file)?;

        airspace.validate()?;

        Ok(airspace)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.ctr_radius <= 0.0 {
            return Err(SimError::InvalidConfig(
                "airspace lateral radius must be positive".into(),
            ));
        }

        if self.ctr_ceiling <= self.elevation {
            return Err(SimError::InvalidConfig(
                "airspace ceiling must be above field elevation".into(),
            ));
        }

        Ok(())
    }

    /// Whether a position at the given radial distance and altitude lies
    /// inside the lateral and vertical boundaries
    pub fn contains(&self, position: DVec2, distance: f64, altitude: f64) -> bool {
        let within_lateral = match &self.perimeter {
            Some(perimeter) => point_in_polygon(position, perimeter),
            None => distance <= self.ctr_radius,
        };

        within_lateral && altitude <= self.ctr_ceiling
    }
}
