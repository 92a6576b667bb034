use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::utils::math::ceil_to;

/// A restricted/prohibited area. Aircraft at or above the floor that enter
/// the lateral boundary trigger an airspace-bust hazard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestrictedArea {
    pub name: String,
    /// Lowest relevant altitude, ft MSL; the area is ignored below it
    pub floor: f64,
    /// Lateral boundary, km east/north of the airport reference
    pub coordinates: Vec<DVec2>,
}

/// One terrain obstruction polygon; the first ring is the outer boundary,
/// any further rings are holes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainPolygon {
    pub rings: Vec<Vec<DVec2>>,
}

/// Terrain obstructions indexed by elevation band.
///
/// A band key is the obstruction elevation rounded up to the next thousand
/// feet; an aircraft only tests the polygons of the band its own altitude
/// rounds up into.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Terrain {
    bands: BTreeMap<i64, Vec<TerrainPolygon>>,
}

impl Terrain {
    pub fn new(bands: BTreeMap<i64, Vec<TerrainPolygon>>) -> Self {
        Self { bands }
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Band key for an altitude, ft MSL
    pub fn band_for_altitude(altitude: f64) -> i64 {
        ceil_to(altitude, 1000.0) as i64
    }

    pub fn polygons_in_band(&self, band: i64) -> &[TerrainPolygon] {
        self.bands.get(&band).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn bands(&self) -> impl Iterator<Item = (i64, &[TerrainPolygon])> {
        self.bands.iter().map(|(band, polys)| (*band, polys.as_slice()))
    }
}
