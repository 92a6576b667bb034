use serde::{Deserialize, Serialize};

/// Scoring-relevant events raised by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    AirspaceBust,
    Collision,
    Departure,
    NotClearedOnRoute,
    LocalizerInterceptAboveGlideslope,
    ExtremeCrosswindOperation,
    HighCrosswindOperation,
    ExtremeTailwindOperation,
    HighTailwindOperation,
}

/// Which control position a radio transmission is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RadioSector {
    Approach,
    Tower,
    Departure,
}

/// Where hazard events and radio traffic go.
///
/// The simulation never reads anything back from the sink, so a no-op
/// implementation turns an update into a pure what-if evaluation.
pub trait EventSink {
    fn record(&mut self, event: GameEvent);

    fn radio_call(&mut self, message: &str, sector: RadioSector, is_warning: bool);
}

/// Discards everything; used for projected (speculative) updates
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&mut self, _event: GameEvent) {}

    fn radio_call(&mut self, _message: &str, _sector: RadioSector, _is_warning: bool) {}
}

/// Forwards everything to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn record(&mut self, event: GameEvent) {
        log::info!("game event: {event:?}");
    }

    fn radio_call(&mut self, message: &str, sector: RadioSector, is_warning: bool) {
        if is_warning {
            log::warn!("[{sector:?}] {message}");
        } else {
            log::info!("[{sector:?}] {message}");
        }
    }
}

/// A transmitted radio call, as seen by a [`RecordingSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioCall {
    pub message: String,
    pub sector: RadioSector,
    pub is_warning: bool,
}

/// Captures everything; the scoring collaborator and the test suite both
/// consume updates through this
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub events: Vec<GameEvent>,
    pub radio_calls: Vec<RadioCall>,
}

impl RecordingSink {
    pub fn count(&self, event: GameEvent) -> usize {
        self.events.iter().filter(|&&e| e == event).count()
    }
}

impl EventSink for RecordingSink {
    fn record(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    fn radio_call(&mut self, message: &str, sector: RadioSector, is_warning: bool) {
        self.radio_calls.push(RadioCall {
            message: message.to_string(),
            sector,
            is_warning,
        });
    }
}
