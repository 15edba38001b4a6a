//! Generation settings.

use riffweave_theory::Note;
use serde::{Deserialize, Serialize};

/// Default attempt budget per generation call.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

/// Inclusive absolute-pitch bounds for a finished phrase.
///
/// Absolute pitch is `octave * 12 + pitch_class`, so the defaults `29..=60`
/// are F2 and C5 in this numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterBounds {
    pub low: i32,
    pub high: i32,
}

impl Default for RegisterBounds {
    fn default() -> Self {
        Self { low: 29, high: 60 }
    }
}

impl RegisterBounds {
    pub fn contains(&self, note: Note) -> bool {
        (self.low..=self.high).contains(&note.absolute_pitch())
    }
}

/// Settings for a generation session.
///
/// Every field has a default, so a config file only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    /// Attempts before a call fails with `AttemptsExhausted`.
    pub max_attempts: u32,
    /// Register every note of a result must fall in.
    pub register: RegisterBounds,
    /// Base seed for all random streams in the session.
    pub seed: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            register: RegisterBounds::default(),
            seed: 0,
        }
    }
}

impl GenerationConfig {
    /// Parses a config from JSON, filling absent fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
