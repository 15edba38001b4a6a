//! Riffweave Engine - Seeded Melodic Phrase Generation
//!
//! Builds 9- and 17-note jazz phrases by stitching catalog cells together
//! at shared boundary notes, following a named harmonic [`Archetype`]. The
//! result is transposed into a target key, its cadence is snapped onto a
//! canonical cell, and it is forced into the playable register.
//!
//! Sampling is non-repeating ([`cycler::Cycler`]) and fully deterministic
//! for a given seed: every random draw goes through one PCG32 stream owned
//! by the [`Session`].
//!
//! # Example
//!
//! ```
//! use riffweave_catalog::CatalogSet;
//! use riffweave_engine::{Archetype, GenerationConfig, Session};
//! use riffweave_theory::Key;
//!
//! let catalogs = CatalogSet::from_json(
//!     r#"{"sus4": [["C3", "D3", "F3", "G3", "C3"], ["C3", "Bb2", "G2", "F2", "C3"]]}"#,
//! )?;
//! let mut session = Session::new(catalogs, GenerationConfig::default());
//!
//! let phrase = session.generate(Archetype::Sus4, Some(Key::D))?;
//! assert_eq!(phrase.len(), 9);
//! assert_eq!(phrase.notes[4].pitch_class, 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod archetype;
pub mod assemble;
pub mod chain;
pub mod config;
pub mod cycler;
pub mod error;
pub mod joinable;
pub mod post;
pub mod rng;
pub mod scheduler;
pub mod session;

pub use archetype::{Archetype, ArchetypeDef, DECEPTIVE_SUBSTITUTES};
pub use config::{GenerationConfig, RegisterBounds, DEFAULT_MAX_ATTEMPTS};
pub use error::{AttemptFailure, GenerateError};
pub use scheduler::FormTag;
pub use session::{GeneratedPhrase, Session};

/// Crate version for diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
