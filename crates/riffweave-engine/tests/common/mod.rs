//! Shared fixtures for engine integration tests.

#![allow(dead_code)]

use riffweave_catalog::{Catalog, CatalogSet, Cell, CellRole};
use riffweave_theory::Note;

/// Short cells that all start and end on C3.
pub const C_CELLS: [&str; 4] = [
    "C3 D3 E3 D3 C3",
    "C3 B2 A2 B2 C3",
    "C3 Eb3 F3 Eb3 C3",
    "C3 D3 C3 B2 C3",
];

/// A sus4 cell opening on E, for the rhythm-changes start filter.
pub const E_OPENING: &str = "E3 F3 D3 B2 C3";

/// Long cells that start and end on C3.
pub const LONG_CELLS: [&str; 2] = [
    "C3 D3 Eb3 F3 G3 F3 Eb3 D3 C3",
    "C3 B2 A2 G2 F2 G2 A2 B2 C3",
];

pub fn notes(names: &str) -> Vec<Note> {
    names.split_whitespace().map(|n| n.parse().unwrap()).collect()
}

pub fn catalog(role: CellRole, cells: &[&str]) -> Catalog {
    Catalog::new(
        role,
        cells.iter().map(|c| Cell::new(notes(c)).unwrap()).collect(),
    )
}

/// Every role, authored explicitly, with material that chains on C.
pub fn full_catalogs() -> CatalogSet {
    let mut set = CatalogSet::new();
    for role in CellRole::ALL {
        let catalog = match role {
            CellRole::LongBiii | CellRole::LongBaseBiii => catalog(role, &LONG_CELLS),
            CellRole::Sus4 => {
                let mut cells = C_CELLS.to_vec();
                cells.push(E_OPENING);
                catalog(role, &cells)
            }
            _ => catalog(role, &C_CELLS),
        };
        set.insert(catalog);
    }
    set
}

/// `full_catalogs` with some roles replaced.
pub fn catalogs_with(overrides: Vec<Catalog>) -> CatalogSet {
    let mut set = full_catalogs();
    for catalog in overrides {
        set.insert(catalog);
    }
    set
}
