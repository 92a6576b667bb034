use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Config error: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),

    /// Lateral navigation was commanded with no waypoint left in the route.
    /// The tick still completes with the sticky target, but the caller can
    /// detect the misconfigured aircraft.
    #[error("no waypoint available for lateral navigation")]
    MissingRoute,
}
