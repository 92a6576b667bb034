pub mod events;
pub mod mcp;

pub use events::{EventSink, GameEvent, LogSink, NullSink, RadioSector, RecordingSink};
pub use mcp::{AltitudeMode, CourseDatum, HeadingMode, ModeController, SpeedMode};
