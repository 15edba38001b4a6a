//! Constants for note naming.

/// Pitch class names using sharps (C=0 .. B=11).
///
/// Also the key-independent spelling used when a note has to be named
/// without a key in scope, e.g. for letter-name filters on catalog cells.
pub const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Pitch class names using flats (C=0 .. B=11).
pub const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Semitone offsets for natural note letters.
pub(super) const SEMITONE_MAP: [(char, i32); 7] = [
    ('C', 0),
    ('D', 2),
    ('E', 4),
    ('F', 5),
    ('G', 7),
    ('A', 9),
    ('B', 11),
];
