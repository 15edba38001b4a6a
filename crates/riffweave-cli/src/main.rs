//! Riffweave CLI - Command-line interface for melodic phrase generation
//!
//! This binary provides commands for generating jazz phrases from cell
//! catalogs, listing the archetype table, and checking catalog coverage.

use clap::{ArgAction, Parser, Subcommand};
use std::process::ExitCode;
use tracing::Level;

// Use modules from the library crate
use riffweave_cli::commands;

/// Riffweave - Seeded Jazz Phrase Generation
#[derive(Parser)]
#[command(name = "riffweave")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); logs go to stderr
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate phrases for an archetype
    Generate {
        /// Path to the catalog file (JSON)
        #[arg(short, long)]
        catalogs: String,

        /// Archetype identifier (see `riffweave list`)
        #[arg(short, long, default_value = "major")]
        archetype: String,

        /// Target key (e.g. C, F#, Bb); cycles through all keys when omitted
        #[arg(short, long)]
        key: Option<String>,

        /// Number of phrases to generate in one session
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Base seed, overriding the config file
        #[arg(long)]
        seed: Option<u64>,

        /// Attempt budget per phrase, overriding the config file
        #[arg(long)]
        max_attempts: Option<u32>,

        /// Path to a generation config file (JSON)
        #[arg(long)]
        config: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List every archetype with its lengths, transposition and cadence pool
    List {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Report which archetypes a catalog file can serve
    Check {
        /// Path to the catalog file (JSON)
        #[arg(short, long)]
        catalogs: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            catalogs,
            archetype,
            key,
            count,
            seed,
            max_attempts,
            config,
            json,
        } => commands::generate::run(
            &commands::generate::GenerateOptions {
                catalogs: &catalogs,
                archetype: &archetype,
                key: key.as_deref(),
                count,
                seed,
                max_attempts,
                config: config.as_deref(),
            },
            json,
        ),
        Commands::List { json } => commands::list::run(json),
        Commands::Check { catalogs, json } => commands::check::run(&catalogs, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "riffweave",
            "generate",
            "--catalogs",
            "demos/catalogs.json",
            "--archetype",
            "long_iii_to_biii",
            "--key",
            "Eb",
            "-n",
            "9",
            "--seed",
            "42",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                catalogs,
                archetype,
                key,
                count,
                seed,
                max_attempts,
                config,
                json,
            } => {
                assert_eq!(catalogs, "demos/catalogs.json");
                assert_eq!(archetype, "long_iii_to_biii");
                assert_eq!(key.as_deref(), Some("Eb"));
                assert_eq!(count, 9);
                assert_eq!(seed, Some(42));
                assert_eq!(max_attempts, None);
                assert_eq!(config, None);
                assert!(!json);
            }
            _ => panic!("expected generate command"),
        }
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_generate_defaults() {
        let cli =
            Cli::try_parse_from(["riffweave", "generate", "-c", "cells.json", "--json"]).unwrap();
        match cli.command {
            Commands::Generate {
                archetype,
                key,
                count,
                json,
                ..
            } => {
                assert_eq!(archetype, "major");
                assert_eq!(key, None);
                assert_eq!(count, 1);
                assert!(json);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_verbosity_is_global() {
        let cli = Cli::try_parse_from(["riffweave", "list", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::List { json: false }));
    }

    #[test]
    fn test_cli_parses_check() {
        let cli = Cli::try_parse_from(["riffweave", "check", "-c", "cells.json", "--json"]).unwrap();
        match cli.command {
            Commands::Check { catalogs, json } => {
                assert_eq!(catalogs, "cells.json");
                assert!(json);
            }
            _ => panic!("expected check command"),
        }
    }

    #[test]
    fn test_cli_requires_catalogs() {
        assert!(Cli::try_parse_from(["riffweave", "generate"]).is_err());
    }
}
