//! Note representation, absolute pitch numbering, and note-name conversion.
//!
//! Notes are compared and shifted numerically; names only matter when a
//! catalog is loaded or a phrase is displayed.

mod constants;
mod conversion;
mod pitch;


pub use constants::{FLAT_NAMES, SHARP_NAMES};
pub use conversion::{note_name, parse_note_name, sharp_name, NoteParseError};
pub use pitch::Note;
