//! Riffweave Theory - Notes, Keys, and Key-Aware Spelling
//!
//! This crate provides the small set of music theory primitives the phrase
//! engine works with. Everything is numeric: a [`Note`] is a pitch class and
//! an octave, a [`Key`] is a semitone offset from C. Display spelling (sharp
//! vs. flat) only happens at the edges, through [`note_name`].
//!
//! # Absolute pitch
//!
//! Register checks use `octave * 12 + pitch_class`, so `C4` is 48 and not the
//! MIDI-style 60. The default comfortable register is `29..=60`, which is
//! `F2..=C5` in this numbering.
//!
//! # Example
//!
//! ```
//! use riffweave_theory::{note_name, parse_note_name, Key, Note};
//!
//! let note = parse_note_name("Eb4").unwrap();
//! assert_eq!(note, Note::new(3, 4));
//! assert_eq!(note.absolute_pitch(), 51);
//! assert_eq!(note_name(note, Key::E), "D#4");
//! assert_eq!(note_name(note, Key::Bb), "Eb4");
//! ```
//!
//! # Module Structure
//!
//! - [`note`]: Note type, absolute pitch numbering, naming and parsing
//! - [`key`]: The 12-key table and each key's sharp/flat convention

pub mod key;
pub mod note;

pub use key::{Key, KeyParseError};
pub use note::{
    note_name, parse_note_name, sharp_name, Note, NoteParseError, FLAT_NAMES, SHARP_NAMES,
};

/// Crate version for diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
