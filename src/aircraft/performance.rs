use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use crate::utils::constants::*;
use crate::utils::errors::SimError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineType {
    Jet,
    Turboprop,
    Piston,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightClass {
    Super,
    Heavy,
    Large,
    Medium,
    Light,
}

impl WeightClass {
    /// Suffix spoken after the callsign on the radio, if any
    pub fn radio_modifier(&self) -> Option<&'static str> {
        match self {
            WeightClass::Super => Some("super"),
            WeightClass::Heavy => Some("heavy"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Engines {
    pub number: u8,
    #[serde(rename = "type")]
    pub engine_type: EngineType,
}

/// Book rates for the type. Climb/descent in ft/min; accelerate/decelerate
/// in knots per two seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PerformanceRates {
    pub climb: f64,
    pub descent: f64,
    pub accelerate: f64,
    pub decelerate: f64,
}

/// Speed envelope, kt IAS
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpeedEnvelope {
    pub min: f64,
    pub landing: f64,
    pub cruise: f64,
    pub max: f64,
}

/// Immutable performance data for one aircraft type, shared read-only by
/// every aircraft of that type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftPerformance {
    pub name: String,
    pub icao: String,
    pub weight_class: WeightClass,
    pub engines: Engines,
    pub rate: PerformanceRates,
    pub speed: SpeedEnvelope,
    /// Service ceiling, ft
    pub ceiling: f64,
}

impl AircraftPerformance {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Arc<Self>, SimError> {
        let file = File::open(path)?;
        let performance: AircraftPerformance = serde_yaml::from_reader(file)?;

        performance.validate()?;

        Ok(Arc::new(performance))
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.speed.min <= 0.0 || self.speed.max < self.speed.min {
            return Err(SimError::InvalidConfig(format!(
                "{}: speed envelope is inverted or non-positive",
                self.icao
            )));
        }

        if self.ceiling <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "{}: ceiling must be positive",
                self.icao
            )));
        }

        if self.rate.climb <= 0.0 || self.rate.descent <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "{}: climb and descent rates must be positive",
                self.icao
            )));
        }

        Ok(())
    }

    /// Achievable climb rate at altitude, ft/min.
    ///
    /// Below the tropopause the book rate is derated along the ISA density
    /// lapse and blended toward the service-ceiling climb rate; above it the
    /// book rate is used as-is.
    pub fn climb_rate_at_altitude(&self, altitude: f64) -> f64 {
        let service_ceiling_rate = match self.engines.engine_type {
            EngineType::Jet => SERVICE_CEILING_CLIMB_RATE_JET,
            _ => SERVICE_CEILING_CLIMB_RATE_PISTON,
        };

        if altitude >= TROPOSPHERE_CEILING {
            return self.rate.climb;
        }

        let temperature = SEA_LEVEL_TEMPERATURE_RANKINE - TROPOSPHERE_LAPSE_RATE * altitude;
        let density_ratio = (temperature / SEA_LEVEL_TEMPERATURE_RANKINE).powf(ISA_DENSITY_EXPONENT);
        let uncorrected =
            self.rate.climb * CLIMB_RATE_SCALE * (CLIMB_RATE_DENSITY_COEFFICIENT * density_ratio)
                / temperature;
        let ceiling_fraction = altitude / self.ceiling;

        uncorrected - ceiling_fraction * uncorrected + ceiling_fraction * service_ceiling_rate
    }
}
