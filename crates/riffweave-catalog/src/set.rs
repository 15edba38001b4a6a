//! The full set of catalogs, keyed by role, and its JSON file format.
//!
//! A catalog file is a JSON object mapping role names to arrays of cells,
//! each cell an array of note names:
//!
//! ```json
//! {
//!   "sus4": [["C4", "D4", "F4", "G4", "A4"], ["A4", "G4", "F4", "D4", "C4"]],
//!   "major_resolution": [["D4", "E4", "G4", "B4", "C5"]]
//! }
//! ```
//!
//! Sibling roles that the file omits are derived from their base role by
//! [`CatalogSet::derive_missing_siblings`].

use std::collections::BTreeMap;
use std::path::Path;

use riffweave_theory::parse_note_name;

use crate::cell::{Catalog, Cell};
use crate::error::CatalogError;
use crate::role::CellRole;

/// Raw file shape: role name to list of cells of note names.
type RawCatalogFile = BTreeMap<String, Vec<Vec<String>>>;

/// Every loaded catalog, keyed by role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSet {
    catalogs: BTreeMap<CellRole, Catalog>,
}

impl CatalogSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the catalog for its role.
    pub fn insert(&mut self, catalog: Catalog) {
        self.catalogs.insert(catalog.role, catalog);
    }

    /// Looks up the catalog for `role`.
    pub fn get(&self, role: CellRole) -> Result<&Catalog, CatalogError> {
        self.catalogs
            .get(&role)
            .ok_or(CatalogError::MissingRole(role))
    }

    pub fn contains(&self, role: CellRole) -> bool {
        self.catalogs.contains_key(&role)
    }

    /// Roles present in the set, in role order.
    pub fn roles(&self) -> impl Iterator<Item = CellRole> + '_ {
        self.catalogs.keys().copied()
    }

    /// Total number of cells across all catalogs.
    pub fn cell_count(&self) -> usize {
        self.catalogs.values().map(Catalog::len).sum()
    }

    /// Parses a catalog file's contents.
    ///
    /// Only the roles present in the file are loaded; call
    /// [`derive_missing_siblings`](Self::derive_missing_siblings) to fill in
    /// transposed siblings.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalogFile = serde_json::from_str(json)?;
        let mut set = CatalogSet::new();

        for (role_name, raw_cells) in raw {
            let role: CellRole = role_name.parse()?;
            let mut cells = Vec::with_capacity(raw_cells.len());

            for (index, raw_cell) in raw_cells.iter().enumerate() {
                let mut notes = Vec::with_capacity(raw_cell.len());
                for name in raw_cell {
                    let note = parse_note_name(name).ok_or_else(|| CatalogError::InvalidNote {
                        role,
                        cell: index,
                        note: name.clone(),
                    })?;
                    notes.push(note);
                }
                let cell =
                    Cell::new(notes).ok_or(CatalogError::EmptyCell { role, cell: index })?;
                cells.push(cell);
            }

            set.insert(Catalog::new(role, cells));
        }

        Ok(set)
    }

    /// Reads and parses a catalog file, then derives missing siblings.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut set = Self::from_json(&json)?;
        set.derive_missing_siblings();
        Ok(set)
    }

    /// Derives every absent sibling role whose base role is present.
    ///
    /// Authored siblings are never overwritten. Returns the derived roles.
    pub fn derive_missing_siblings(&mut self) -> Vec<CellRole> {
        let mut derived = Vec::new();
        for role in CellRole::ALL {
            if self.catalogs.contains_key(&role) {
                continue;
            }
            let Some((base, semitones)) = role.derivation() else {
                continue;
            };
            let Some(source) = self.catalogs.get(&base) else {
                continue;
            };
            let sibling = source.transposed(role, semitones);
            self.catalogs.insert(role, sibling);
            derived.push(role);
        }
        derived
    }

    /// BLAKE3 hash of the set's canonical content, as lowercase hex.
    ///
    /// The canonical form lists roles in role order and notes by sharp name,
    /// so enharmonic spellings in the source file hash identically.
    pub fn content_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for (role, catalog) in &self.catalogs {
            hasher.update(role.name().as_bytes());
            hasher.update(b"\n");
            for cell in &catalog.cells {
                for note in cell.notes() {
                    hasher.update(note.to_string().as_bytes());
                    hasher.update(b" ");
                }
                hasher.update(b"\n");
            }
        }
        hasher.finalize().to_hex().to_string()
    }
}
