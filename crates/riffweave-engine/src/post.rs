//! Post-processing of an assembled phrase: transposition, cadence snapping
//! and register correction.

use riffweave_catalog::Catalog;
use riffweave_theory::Note;

use crate::config::RegisterBounds;

/// Length of the cadential window at the end of a phrase.
pub const CADENCE_WINDOW: usize = 5;

/// Moves every note by the sum of `stages`, carrying into the octave.
pub fn transpose(notes: &[Note], stages: &[i32]) -> Vec<Note> {
    let shift: i32 = stages.iter().sum();
    notes.iter().map(|n| n.transposed(shift)).collect()
}

/// Snaps the trailing window onto a canonical cell of `pool`.
///
/// Pool cells are compared after moving them by `shift`, the same amount
/// the phrase was transposed by. An exact match leaves the phrase alone. A
/// pitch-class match replaces the window with the canonical cell,
/// re-anchored so its first note keeps the window's first octave. With no
/// match the phrase is returned unchanged.
pub fn snap_cadence(notes: &[Note], pool: &Catalog, shift: i32) -> Vec<Note> {
    if notes.len() < CADENCE_WINDOW {
        return notes.to_vec();
    }
    let split = notes.len() - CADENCE_WINDOW;
    let window = &notes[split..];

    let canonical: Vec<Vec<Note>> = pool
        .cells
        .iter()
        .filter(|c| c.len() == CADENCE_WINDOW)
        .map(|c| c.transposed(shift).notes().to_vec())
        .collect();

    if canonical.iter().any(|c| c.as_slice() == window) {
        return notes.to_vec();
    }

    let window_classes: Vec<u8> = window.iter().map(|n| n.pitch_class).collect();
    let Some(target) = canonical
        .iter()
        .find(|c| c.iter().map(|n| n.pitch_class).eq(window_classes.iter().copied()))
    else {
        return notes.to_vec();
    };

    let anchor_octave = window[0].octave as i32;
    let base_octave = target[0].octave as i32;

    let mut snapped = notes[..split].to_vec();
    snapped.extend(target.iter().map(|n| {
        Note::new(
            n.pitch_class as i32,
            anchor_octave + (n.octave as i32 - base_octave),
        )
    }));
    snapped
}

/// One-shot register correction.
///
/// Down an octave if any note is above `bounds.high`, otherwise up an
/// octave if any note is below `bounds.low`. Never applied twice, so a
/// phrase spanning more than the register can remain out of range.
pub fn correct_register(notes: &[Note], bounds: RegisterBounds) -> Vec<Note> {
    let high = notes.iter().any(|n| n.absolute_pitch() > bounds.high);
    let low = notes.iter().any(|n| n.absolute_pitch() < bounds.low);

    let octaves = if high {
        -1
    } else if low {
        1
    } else {
        return notes.to_vec();
    };
    notes.iter().map(|n| n.shifted_octaves(octaves)).collect()
}

/// First note outside `bounds`, if any.
pub fn first_out_of_range(notes: &[Note], bounds: RegisterBounds) -> Option<Note> {
    notes.iter().copied().find(|n| !bounds.contains(*n))
}
