use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::environment::airspace::Wind;
use crate::utils::math::{angle_offset, deg_to_rad};
use crate::utils::units::km_to_ft;

fn default_glideslope_angle() -> f64 {
    deg_to_rad(3.0)
}

/// A landing/departure runway, positioned by its threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Runway {
    pub name: String,
    /// Threshold position, km east/north of the airport reference
    pub position: DVec2,
    /// Threshold elevation, ft MSL
    pub elevation: f64,
    /// True course of the runway centerline, rad
    pub angle: f64,
    /// Glideslope angle, rad
    #[serde(default = "default_glideslope_angle")]
    pub glideslope_angle: f64,
}

/// Wind decomposed into runway-relative components, kt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunwayWind {
    /// Across the runway, always non-negative
    pub cross: f64,
    /// Along the runway; negative is a tailwind
    pub head: f64,
}

impl Runway {
    /// Glideslope altitude abeam a point the given along-course distance
    /// from the threshold, ft MSL
    pub fn glideslope_altitude(&self, distance_on_final_km: f64) -> f64 {
        let distance_ft = km_to_ft(distance_on_final_km.max(0.0));

        self.elevation + self.glideslope_angle.tan() * distance_ft
    }

    /// Angle between the wind direction and the runway heading
    pub fn crosswind_angle(&self, wind_angle: f64) -> f64 {
        angle_offset(self.angle, wind_angle)
    }

    /// Decompose the given wind into crosswind and headwind components
    pub fn wind_components(&self, wind: &Wind) -> RunwayWind {
        let angle = self.crosswind_angle(wind.angle).abs();

        RunwayWind {
            cross: angle.sin() * wind.speed,
            head: angle.cos() * wind.speed,
        }
    }
}
