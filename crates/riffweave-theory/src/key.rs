//! The 12-key table.
//!
//! Each key maps to a semitone offset from C and carries a spelling
//! convention. Keys are listed in circle-of-fifths order, which is also the
//! order the engine's key cycler shuffles.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A key name that is not one of the 12 supported keys.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown key: {name:?}")]
pub struct KeyParseError {
    /// The offending input.
    pub name: String,
}

/// One of the 12 keys, identified by its tonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    C,
    G,
    D,
    A,
    E,
    B,
    FSharp,
    Db,
    Ab,
    Eb,
    Bb,
    F,
}

impl Key {
    /// All keys in circle-of-fifths order.
    pub const ALL: [Key; 12] = [
        Key::C,
        Key::G,
        Key::D,
        Key::A,
        Key::E,
        Key::B,
        Key::FSharp,
        Key::Db,
        Key::Ab,
        Key::Eb,
        Key::Bb,
        Key::F,
    ];

    /// Semitone offset of the tonic from C (0-11).
    pub fn semitones(self) -> u8 {
        match self {
            Key::C => 0,
            Key::Db => 1,
            Key::D => 2,
            Key::Eb => 3,
            Key::E => 4,
            Key::F => 5,
            Key::FSharp => 6,
            Key::G => 7,
            Key::Ab => 8,
            Key::A => 9,
            Key::Bb => 10,
            Key::B => 11,
        }
    }

    /// The key whose tonic sits at `semitones` (mod 12).
    pub fn from_semitones(semitones: i32) -> Key {
        match semitones.rem_euclid(12) {
            0 => Key::C,
            1 => Key::Db,
            2 => Key::D,
            3 => Key::Eb,
            4 => Key::E,
            5 => Key::F,
            6 => Key::FSharp,
            7 => Key::G,
            8 => Key::Ab,
            9 => Key::A,
            10 => Key::Bb,
            _ => Key::B,
        }
    }

    /// Display name of the key.
    pub fn name(self) -> &'static str {
        match self {
            Key::C => "C",
            Key::G => "G",
            Key::D => "D",
            Key::A => "A",
            Key::E => "E",
            Key::B => "B",
            Key::FSharp => "F#",
            Key::Db => "Db",
            Key::Ab => "Ab",
            Key::Eb => "Eb",
            Key::Bb => "Bb",
            Key::F => "F",
        }
    }

    /// Whether notes in this key are spelled with flats.
    ///
    /// C is spelled with flats so chromatic passing tones in the home key
    /// read as Eb/Ab/Bb.
    pub fn uses_flats(self) -> bool {
        matches!(
            self,
            Key::C | Key::F | Key::Bb | Key::Eb | Key::Ab | Key::Db
        )
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Key {
    type Err = KeyParseError;

    /// Parses a key name, accepting either enharmonic spelling ("C#" or "Db").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.trim() {
            "C" | "B#" => Key::C,
            "C#" | "Db" => Key::Db,
            "D" => Key::D,
            "D#" | "Eb" => Key::Eb,
            "E" | "Fb" => Key::E,
            "F" | "E#" => Key::F,
            "F#" | "Gb" => Key::FSharp,
            "G" => Key::G,
            "G#" | "Ab" => Key::Ab,
            "A" => Key::A,
            "A#" | "Bb" => Key::Bb,
            "B" | "Cb" => Key::B,
            _ => {
                return Err(KeyParseError {
                    name: s.to_string(),
                })
            }
        };
        Ok(key)
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
