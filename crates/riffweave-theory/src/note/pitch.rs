//! The numeric note type.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::conversion::{parse_note_name, sharp_name, NoteParseError};

/// A single note: pitch class (0-11, C=0) plus octave number.
///
/// Ordering and equality are structural, so two notes are equal only when
/// both pitch class and octave match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Note {
    /// Pitch class, always in `0..12`.
    pub pitch_class: u8,
    /// Octave number (`C4` has octave 4).
    pub octave: i8,
}

impl Note {
    /// Creates a note. Pitch classes outside `0..12` carry into the octave,
    /// so `Note::new(12, 3)` is `C4`.
    pub const fn new(pitch_class: i32, octave: i32) -> Self {
        Self::from_absolute(octave * 12 + pitch_class)
    }

    /// Builds a note from an absolute pitch (`octave * 12 + pitch_class`).
    pub const fn from_absolute(absolute: i32) -> Self {
        Self {
            pitch_class: absolute.rem_euclid(12) as u8,
            octave: absolute.div_euclid(12) as i8,
        }
    }

    /// Like [`from_absolute`](Self::from_absolute), but `None` when the
    /// octave does not fit the note's octave range.
    pub fn checked_from_absolute(absolute: i32) -> Option<Self> {
        let octave = i8::try_from(absolute.div_euclid(12)).ok()?;
        Some(Self {
            pitch_class: absolute.rem_euclid(12) as u8,
            octave,
        })
    }

    /// Absolute pitch used for register checks: `octave * 12 + pitch_class`.
    ///
    /// This is deliberately not MIDI numbering; `C4` is 48.
    pub fn absolute_pitch(self) -> i32 {
        self.octave as i32 * 12 + self.pitch_class as i32
    }

    /// Returns this note moved by `semitones`, carrying into the octave.
    pub fn transposed(self, semitones: i32) -> Self {
        Self::from_absolute(self.absolute_pitch() + semitones)
    }

    /// Returns this note moved by whole octaves.
    pub fn shifted_octaves(self, octaves: i32) -> Self {
        self.transposed(octaves * 12)
    }

    /// True when both notes share a pitch class, regardless of octave.
    pub fn same_pitch_class(self, other: Note) -> bool {
        self.pitch_class == other.pitch_class
    }

    /// Sharp spelling of this note's pitch class, without octave.
    pub fn letter(self) -> &'static str {
        sharp_name(self.pitch_class)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", sharp_name(self.pitch_class), self.octave)
    }
}

impl FromStr for Note {
    type Err = NoteParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_note_name(s).ok_or_else(|| NoteParseError {
            name: s.to_string(),
        })
    }
}

impl Serialize for Note {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Note {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
