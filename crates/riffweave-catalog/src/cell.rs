//! Cells and single-role catalogs.

use riffweave_theory::Note;
use serde::Serialize;

use crate::role::CellRole;

/// A fixed melodic fragment: an ordered, non-empty run of notes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Cell {
    notes: Vec<Note>,
}

impl Cell {
    /// Wraps `notes` as a cell. Returns `None` when `notes` is empty.
    pub fn new(notes: Vec<Note>) -> Option<Self> {
        if notes.is_empty() {
            None
        } else {
            Some(Self { notes })
        }
    }

    /// The cell's notes in order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Always false; cells are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// First note, the join point for right extension.
    pub fn first(&self) -> Note {
        self.notes[0]
    }

    /// Last note, the join point for left extension.
    pub fn last(&self) -> Note {
        self.notes[self.notes.len() - 1]
    }

    /// A copy of this cell moved by `semitones`, carrying into the octave.
    pub fn transposed(&self, semitones: i32) -> Cell {
        Cell {
            notes: self.notes.iter().map(|n| n.transposed(semitones)).collect(),
        }
    }

    /// True if `window` appears as a contiguous run inside this cell.
    pub fn contains_window(&self, window: &[Note]) -> bool {
        !window.is_empty() && self.notes.windows(window.len()).any(|w| w == window)
    }

    /// Pitch-class sequence of the cell.
    pub fn pitch_classes(&self) -> Vec<u8> {
        self.notes.iter().map(|n| n.pitch_class).collect()
    }
}

/// All cells for one harmonic role.
///
/// Cells are addressed by index; the index is the cell's identity for
/// per-attempt reuse tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    pub role: CellRole,
    pub cells: Vec<Cell>,
}

impl Catalog {
    pub fn new(role: CellRole, cells: Vec<Cell>) -> Self {
        Self { role, cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Iterates `(index, cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Cell)> {
        self.cells.iter().enumerate()
    }

    /// Builds the catalog for `role` by transposing every cell of `self`.
    pub fn transposed(&self, role: CellRole, semitones: i32) -> Catalog {
        Catalog {
            role,
            cells: self.cells.iter().map(|c| c.transposed(semitones)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cell(names: &[&str]) -> Cell {
        Cell::new(names.iter().map(|n| n.parse().unwrap()).collect()).unwrap()
    }

    #[test]
    fn test_empty_cell_rejected() {
        assert!(Cell::new(Vec::new()).is_none());
    }

    #[test]
    fn test_boundary_notes() {
        let c = cell(&["C4", "D4", "E4", "G4", "A4"]);
        assert_eq!(c.first(), Note::new(0, 4));
        assert_eq!(c.last(), Note::new(9, 4));
        assert_eq!(c.len(), 5);
    }

    #[test]
    fn test_transposed_carries() {
        let c = cell(&["A4", "B4", "C5"]);
        assert_eq!(c.transposed(3), cell(&["C5", "D5", "D#5"]));
        assert_eq!(c.transposed(-7), cell(&["D4", "E4", "F4"]));
    }

    #[test]
    fn test_contains_window() {
        let long = cell(&["E4", "D4", "B3", "C4", "D4", "D#4", "F4", "G4", "A4"]);
        let banned = cell(&["D4", "B3", "C4", "D4", "D#4"]);
        assert!(long.contains_window(banned.notes()));
        let other = cell(&["D4", "B3", "C4", "D4", "E4"]);
        assert!(!long.contains_window(other.notes()));
        assert!(!long.contains_window(&[]));
    }

    #[test]
    fn test_catalog_transposed_role() {
        let catalog = Catalog::new(CellRole::Sus4, vec![cell(&["C4", "D4"])]);
        let up = catalog.transposed(CellRole::Sus4Up2, 2);
        assert_eq!(up.role, CellRole::Sus4Up2);
        assert_eq!(up.cells, vec![cell(&["D4", "E4"])]);
    }
}
