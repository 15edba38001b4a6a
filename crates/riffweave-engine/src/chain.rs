//! Joining cells end to end.
//!
//! Two cells join when the boundary notes share a pitch class. The newly
//! added cell is moved by whole octaves so its boundary note lands exactly
//! on the phrase's boundary note, then that duplicate note is dropped. The
//! existing phrase is never moved.

use riffweave_catalog::Cell;
use riffweave_theory::Note;

/// Octave delta that moves `boundary` onto `target`, if they share a pitch
/// class.
fn octave_delta(target: Note, boundary: Note) -> Option<i32> {
    if target.same_pitch_class(boundary) {
        Some(target.octave as i32 - boundary.octave as i32)
    } else {
        None
    }
}

/// Appends `cell` after `phrase`, joining on the phrase's last note.
///
/// Returns `None` when `cell` does not start on the phrase's last pitch
/// class, or when `phrase` is empty.
///
/// # Examples
/// ```
/// use riffweave_catalog::Cell;
/// use riffweave_engine::chain::extend_right;
/// use riffweave_theory::Note;
///
/// let phrase = vec![Note::new(2, 4), Note::new(0, 5)];
/// let cell = Cell::new(vec![Note::new(0, 3), Note::new(11, 2)]).unwrap();
/// let joined = extend_right(&phrase, &cell).unwrap();
/// assert_eq!(joined, vec![Note::new(2, 4), Note::new(0, 5), Note::new(11, 4)]);
/// ```
pub fn extend_right(phrase: &[Note], cell: &Cell) -> Option<Vec<Note>> {
    let join = *phrase.last()?;
    let delta = octave_delta(join, cell.first())?;

    let mut joined = Vec::with_capacity(phrase.len() + cell.len() - 1);
    joined.extend_from_slice(phrase);
    joined.extend(cell.notes()[1..].iter().map(|n| n.shifted_octaves(delta)));
    Some(joined)
}

/// Prepends `cell` before `phrase`, joining on the phrase's first note.
///
/// Returns `None` when `cell` does not end on the phrase's first pitch
/// class, or when `phrase` is empty.
pub fn extend_left(cell: &Cell, phrase: &[Note]) -> Option<Vec<Note>> {
    let join = *phrase.first()?;
    let delta = octave_delta(join, cell.last())?;

    let head = &cell.notes()[..cell.len() - 1];
    let mut joined = Vec::with_capacity(phrase.len() + head.len());
    joined.extend(head.iter().map(|n| n.shifted_octaves(delta)));
    joined.extend_from_slice(phrase);
    Some(joined)
}
