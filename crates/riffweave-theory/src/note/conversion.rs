//! Note name parsing and key-aware spelling.

use thiserror::Error;

use super::constants::{FLAT_NAMES, SEMITONE_MAP, SHARP_NAMES};
use super::pitch::Note;
use crate::key::Key;

/// A note name that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid note name: {name:?}")]
pub struct NoteParseError {
    /// The offending input.
    pub name: String,
}

/// Sharp spelling of a pitch class (`0..12`), independent of key.
///
/// # Examples
/// ```
/// use riffweave_theory::sharp_name;
///
/// assert_eq!(sharp_name(0), "C");
/// assert_eq!(sharp_name(6), "F#");
/// ```
pub fn sharp_name(pitch_class: u8) -> &'static str {
    SHARP_NAMES[(pitch_class % 12) as usize]
}

/// Spell a note in the convention of `key` (sharps or flats), with octave.
///
/// # Examples
/// ```
/// use riffweave_theory::{note_name, Key, Note};
///
/// assert_eq!(note_name(Note::new(10, 3), Key::F), "Bb3");
/// assert_eq!(note_name(Note::new(10, 3), Key::D), "A#3");
/// ```
pub fn note_name(note: Note, key: Key) -> String {
    let names = if key.uses_flats() {
        &FLAT_NAMES
    } else {
        &SHARP_NAMES
    };
    format!("{}{}", names[note.pitch_class as usize], note.octave)
}

/// Parse a note name (e.g., "C4", "F#3", "Bb5", "C-4") into a [`Note`].
///
/// Accidentals that cross a letter boundary carry into the octave, so
/// "Cb4" is `B3` and "B#3" is `C4`.
///
/// # Examples
/// ```
/// use riffweave_theory::{parse_note_name, Note};
///
/// assert_eq!(parse_note_name("C4"), Some(Note::new(0, 4)));
/// assert_eq!(parse_note_name("Ab4"), Some(Note::new(8, 4)));
/// assert_eq!(parse_note_name("Cb4"), Some(Note::new(11, 3)));
/// assert_eq!(parse_note_name("H2"), None);
/// assert_eq!(parse_note_name("C200"), None);
/// ```
pub fn parse_note_name(name: &str) -> Option<Note> {
    // Remove dashes for parsing (e.g., "C-4" -> "C4")
    let name = name.trim().replace('-', "");
    let chars: Vec<char> = name.chars().collect();
    if chars.is_empty() {
        return None;
    }

    // Get note letter
    let letter = chars[0].to_ascii_uppercase();
    let mut semitone = SEMITONE_MAP
        .iter()
        .find(|(c, _)| *c == letter)
        .map(|(_, s)| *s)?;

    let mut idx = 1;

    // Accidentals: '#' raises, 'b' lowers. A lone 'b' cannot be the letter
    // here because the letter was already consumed.
    while idx < chars.len() {
        match chars[idx] {
            '#' => semitone += 1,
            'b' => semitone -= 1,
            _ => break,
        }
        idx += 1;
    }

    // Get octave
    let octave_str: String = chars[idx..].iter().collect();
    if octave_str.is_empty() {
        return None;
    }
    let octave: i8 = octave_str.parse().ok()?;

    i32::from(octave)
        .checked_mul(12)?
        .checked_add(semitone)
        .and_then(Note::checked_from_absolute)
}
