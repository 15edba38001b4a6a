//! Error types for phrase generation.

use riffweave_catalog::{CatalogError, CellRole, ErrorCode};
use riffweave_theory::Key;
use thiserror::Error;

/// Fatal outcome of a generation call.
///
/// Only these reach the caller. Sampling failures inside one attempt are
/// [`AttemptFailure`]s and are absorbed by the retry loop.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The archetype identifier is not in the table.
    #[error("Unknown archetype: {0:?}")]
    UnknownArchetype(String),

    /// The key name is not one of the 12 keys.
    #[error("Unknown key: {0:?}")]
    UnknownKey(String),

    /// The substitute-key table has no entry for the requested key.
    #[error("No substitute key for {archetype} in key {key}")]
    MissingSubstituteKey { archetype: String, key: Key },

    /// A catalog the archetype needs is absent.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Every attempt failed.
    #[error("Failed to generate a valid {archetype} phrase in key {key} after {attempts} attempts")]
    AttemptsExhausted {
        archetype: String,
        key: Key,
        attempts: u32,
    },
}

impl ErrorCode for GenerateError {
    fn code(&self) -> &'static str {
        match self {
            GenerateError::UnknownArchetype(_) => "PHRASE_001",
            GenerateError::UnknownKey(_) => "PHRASE_002",
            GenerateError::MissingSubstituteKey { .. } => "PHRASE_003",
            GenerateError::Catalog(err) => err.code(),
            GenerateError::AttemptsExhausted { .. } => "PHRASE_004",
        }
    }

    fn category(&self) -> &'static str {
        "generate"
    }
}

/// Why a single attempt was abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptFailure {
    /// A slot had no compatible, unused candidate.
    #[error("no compatible candidate in {role}")]
    NoCandidate { role: CellRole },

    /// The assembled phrase has a length the archetype does not accept.
    #[error("phrase has {actual} notes, expected one of {expected:?}")]
    LengthMismatch {
        expected: &'static [usize],
        actual: usize,
    },

    /// A note lies outside the register after correction.
    #[error("absolute pitch {pitch} outside register {low}..={high}")]
    OutOfRange { pitch: i32, low: i32, high: i32 },
}
