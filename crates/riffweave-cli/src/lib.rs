//! Riffweave CLI library.
//!
//! Command implementations for the `riffweave` binary: phrase generation,
//! the archetype listing and catalog coverage checks.

pub mod commands;
