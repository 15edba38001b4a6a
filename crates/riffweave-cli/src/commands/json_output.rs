//! JSON output types for machine-readable CLI output.
//!
//! These back the `--json` flag on every command. Each output carries a
//! `success` flag and, on failure, a [`JsonError`] with a stable code.

use riffweave_catalog::{CatalogSet, CellRole, ErrorCode};
use riffweave_engine::joinable::first_unjoinable;
use riffweave_engine::{Archetype, GeneratedPhrase};
use serde::{Deserialize, Serialize};

/// Error codes for CLI-level failures. Library errors pass their own codes
/// through (`CATALOG_xxx`, `PHRASE_xxx`).
pub mod error_codes {
    /// Config file could not be read
    pub const CONFIG_READ: &str = "CLI_001";
    /// Config file is not a valid generation config
    pub const CONFIG_PARSE: &str = "CLI_002";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "PHRASE_004")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl JsonError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Builds a JSON error from any coded library error.
    pub fn from_coded<E: ErrorCode>(err: &E) -> Self {
        Self::new(err.code(), err.message())
    }
}

/// One generated phrase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhraseRecord {
    pub archetype: String,
    pub key: String,
    /// Note count
    pub length: usize,
    /// Absolute pitches (`octave * 12 + pitch_class`)
    pub pitches: Vec<i32>,
    /// Names spelled in the key's sharp/flat convention
    pub names: Vec<String>,
    pub attempts: u32,
    /// `long` or `short`, for scheduled archetypes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<String>,
}

impl From<&GeneratedPhrase> for PhraseRecord {
    fn from(phrase: &GeneratedPhrase) -> Self {
        Self {
            archetype: phrase.archetype.id().to_string(),
            key: phrase.key.name().to_string(),
            length: phrase.len(),
            pitches: phrase.notes.iter().map(|n| n.absolute_pitch()).collect(),
            names: phrase.names(),
            attempts: phrase.attempts,
            form: phrase.form.map(|f| f.name().to_string()),
        }
    }
}

/// Output of `riffweave generate --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateOutput {
    pub success: bool,
    /// BLAKE3 hash of the loaded catalog content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_hash: Option<String>,
    pub seed: u64,
    pub phrases: Vec<PhraseRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonError>,
}

/// One row of the archetype table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArchetypeRecord {
    pub id: String,
    pub lengths: Vec<usize>,
    pub transposition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cadence_pool: Option<String>,
    pub roles: Vec<String>,
}

impl From<Archetype> for ArchetypeRecord {
    fn from(archetype: Archetype) -> Self {
        let def = archetype.def();
        Self {
            id: archetype.id().to_string(),
            lengths: def.accepted_lengths.to_vec(),
            transposition: def.transposition.describe(),
            cadence_pool: def.cadence_pool.map(|r| r.name().to_string()),
            roles: role_names(archetype.required_roles()),
        }
    }
}

/// Output of `riffweave list --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListOutput {
    pub archetypes: Vec<ArchetypeRecord>,
}

/// Catalog coverage for one archetype.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArchetypeCoverage {
    pub id: String,
    pub ready: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub empty: Vec<String>,
    /// First role with no cell that can join the phrase built so far
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unjoinable: Option<String>,
}

impl ArchetypeCoverage {
    /// Coverage of `archetype`'s required roles in `catalogs`.
    pub fn of(archetype: Archetype, catalogs: &CatalogSet) -> Self {
        let mut missing = Vec::new();
        let mut empty = Vec::new();
        for role in archetype.required_roles() {
            match catalogs.get(role) {
                Ok(catalog) if catalog.is_empty() => empty.push(role),
                Ok(_) => {}
                Err(_) => missing.push(role),
            }
        }
        let unjoinable = if missing.is_empty() && empty.is_empty() {
            first_unjoinable(archetype, catalogs)
        } else {
            None
        };
        Self {
            id: archetype.id().to_string(),
            ready: missing.is_empty() && empty.is_empty() && unjoinable.is_none(),
            missing: role_names(missing),
            empty: role_names(empty),
            unjoinable: unjoinable.map(|r| r.name().to_string()),
        }
    }
}

/// Output of `riffweave check --json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckOutput {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_hash: Option<String>,
    pub roles: usize,
    pub cells: usize,
    pub archetypes: Vec<ArchetypeCoverage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonError>,
}

fn role_names(roles: Vec<CellRole>) -> Vec<String> {
    roles.into_iter().map(|r| r.name().to_string()).collect()
}
