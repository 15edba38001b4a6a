//! Riffweave Catalog - Cell Catalogs Keyed by Harmonic Role
//!
//! Cells are the fixed melodic fragments the phrase engine stitches
//! together. Each [`Catalog`] holds the cells for one [`CellRole`], and a
//! [`CatalogSet`] holds every catalog the engine may draw from.
//!
//! Several roles are pre-transposed siblings of a base role (for example
//! `sus4_down5` is `sus4` moved down a fifth). Catalog files may author
//! them explicitly; any that are missing are derived on load.
//!
//! # Example
//!
//! ```
//! use riffweave_catalog::{CatalogSet, CellRole};
//!
//! let mut set = CatalogSet::from_json(r#"{"sus4": [["C4", "D4", "F4", "G4", "C5"]]}"#)?;
//! set.derive_missing_siblings();
//!
//! let up5 = set.get(CellRole::Sus4Up5)?;
//! assert_eq!(up5.cells[0].first().to_string(), "G4");
//! # Ok::<(), riffweave_catalog::CatalogError>(())
//! ```

pub mod cell;
pub mod error;
pub mod role;
pub mod set;

pub use cell::{Catalog, Cell};
pub use error::{CatalogError, ErrorCode};
pub use role::CellRole;
pub use set::CatalogSet;

/// Crate version for diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
