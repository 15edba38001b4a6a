//! Generate command implementation
//!
//! Runs one or more generation calls in a single session, so the key
//! cycler and the mode schedulers advance from call to call.

use anyhow::{Context, Result};
use colored::Colorize;
use riffweave_catalog::CatalogSet;
use riffweave_engine::{GenerateError, GeneratedPhrase, GenerationConfig, Session};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::json_output::{error_codes, GenerateOutput, JsonError, PhraseRecord};

/// Inputs for one `generate` invocation.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions<'a> {
    /// Path to the catalog JSON file
    pub catalogs: &'a str,
    /// Archetype identifier
    pub archetype: &'a str,
    /// Key name; drawn from the session's key cycler when absent
    pub key: Option<&'a str>,
    /// Number of phrases to generate
    pub count: usize,
    /// Overrides the config file's seed
    pub seed: Option<u64>,
    /// Overrides the config file's attempt budget
    pub max_attempts: Option<u32>,
    /// Optional generation config file (JSON)
    pub config: Option<&'a str>,
}

/// Reads the config file, if any, and applies flag overrides.
pub fn load_config(
    path: Option<&str>,
    seed: Option<u64>,
    max_attempts: Option<u32>,
) -> Result<GenerationConfig> {
    let mut config = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            GenerationConfig::from_json(&json)
                .with_context(|| format!("Invalid config file: {}", path))?
        }
        None => GenerationConfig::default(),
    };

    if let Some(seed) = seed {
        config.seed = seed;
    }
    if let Some(max_attempts) = max_attempts {
        config.max_attempts = max_attempts;
    }
    Ok(config)
}

/// Generates up to `count` phrases, stopping at the first failure.
pub fn generate_batch(
    session: &mut Session,
    archetype: &str,
    key: Option<&str>,
    count: usize,
) -> (Vec<GeneratedPhrase>, Option<GenerateError>) {
    let mut phrases = Vec::with_capacity(count);
    for _ in 0..count {
        match session.generate_named(archetype, key) {
            Ok(phrase) => phrases.push(phrase),
            Err(e) => return (phrases, Some(e)),
        }
    }
    (phrases, None)
}

/// Run the generate command
///
/// # Arguments
/// * `options` - Catalogs, archetype, key, count and config overrides
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if every phrase was generated, 1 otherwise
pub fn run(options: &GenerateOptions<'_>, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(options)
    } else {
        run_human(options)
    }
}

fn run_human(options: &GenerateOptions<'_>) -> Result<ExitCode> {
    let start = Instant::now();

    println!("{} {}", "Generating:".cyan().bold(), options.archetype);

    let config = load_config(options.config, options.seed, options.max_attempts)?;
    let catalogs = CatalogSet::load(Path::new(options.catalogs))
        .with_context(|| format!("Failed to load catalogs: {}", options.catalogs))?;

    println!(
        "{} {} ({})",
        "Catalogs:".dimmed(),
        options.catalogs,
        catalogs.content_hash()
    );
    println!("{} {}", "Seed:".dimmed(), config.seed);
    println!();

    let mut session = Session::new(catalogs, config);
    let (phrases, error) =
        generate_batch(&mut session, options.archetype, options.key, options.count);

    for (index, phrase) in phrases.iter().enumerate() {
        let form = phrase
            .form
            .map(|f| format!(", {} form", f.name()))
            .unwrap_or_default();
        println!(
            "  {} {} in {} ({} notes, {} attempt{}{})",
            format!("{:>3}.", index + 1).dimmed(),
            phrase.archetype.to_string().bold(),
            phrase.key.to_string().bold(),
            phrase.len(),
            phrase.attempts,
            if phrase.attempts == 1 { "" } else { "s" },
            form
        );
        println!("       {}", phrase.names().join(" "));
    }

    let elapsed = start.elapsed();
    println!();
    match error {
        None => {
            println!(
                "{} {} phrase{} in {:?}",
                "SUCCESS".green().bold(),
                phrases.len(),
                if phrases.len() == 1 { "" } else { "s" },
                elapsed
            );
            Ok(ExitCode::SUCCESS)
        }
        Some(e) => Err(e).with_context(|| {
            format!(
                "generated {} of {} phrases",
                phrases.len(),
                options.count
            )
        }),
    }
}

fn run_json(options: &GenerateOptions<'_>) -> Result<ExitCode> {
    let output = build_json_output(options);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn build_json_output(options: &GenerateOptions<'_>) -> GenerateOutput {
    let failed = |seed: u64, error: JsonError| GenerateOutput {
        success: false,
        catalog_hash: None,
        seed,
        phrases: Vec::new(),
        error: Some(error),
    };

    let config = match load_config(options.config, options.seed, options.max_attempts) {
        Ok(config) => config,
        Err(e) => {
            let code = if e.root_cause().is::<std::io::Error>() {
                error_codes::CONFIG_READ
            } else {
                error_codes::CONFIG_PARSE
            };
            return failed(
                options.seed.unwrap_or_default(),
                JsonError::new(code, format!("{:#}", e)),
            );
        }
    };
    let catalogs = match CatalogSet::load(Path::new(options.catalogs)) {
        Ok(catalogs) => catalogs,
        Err(e) => return failed(config.seed, JsonError::from_coded(&e)),
    };

    let catalog_hash = catalogs.content_hash();
    let seed = config.seed;
    let mut session = Session::new(catalogs, config);
    let (phrases, error) =
        generate_batch(&mut session, options.archetype, options.key, options.count);

    GenerateOutput {
        success: error.is_none(),
        catalog_hash: Some(catalog_hash),
        seed,
        phrases: phrases.iter().map(PhraseRecord::from).collect(),
        error: error.as_ref().map(JsonError::from_coded),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const CATALOGS: &str = r#"{
        "sus4": [
            ["C3", "D3", "F3", "G3", "C3"],
            ["C3", "Bb2", "G2", "F2", "C3"],
            ["C3", "E3", "G3", "E3", "C3"]
        ]
    }"#;

    fn write(dir: &TempDir, name: &str, contents: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "config.json", r#"{"seed": 5, "max_attempts": 7}"#);

        let config = load_config(Some(&path), None, None).unwrap();
        assert_eq!((config.seed, config.max_attempts), (5, 7));

        let config = load_config(Some(&path), Some(9), Some(3)).unwrap();
        assert_eq!((config.seed, config.max_attempts), (9, 3));
    }

    #[test]
    fn test_config_errors() {
        let dir = TempDir::new().unwrap();
        let bad = write(&dir, "bad.json", r#"{"attempts": 5}"#);

        assert!(load_config(Some(&bad), None, None).is_err());
        assert!(load_config(Some("/nonexistent/config.json"), None, None).is_err());
    }

    #[test]
    fn test_json_output_reports_every_phrase() {
        let dir = TempDir::new().unwrap();
        let catalogs = write(&dir, "catalogs.json", CATALOGS);
        let options = GenerateOptions {
            catalogs: &catalogs,
            archetype: "7sus4",
            key: Some("G"),
            count: 3,
            seed: Some(11),
            ..GenerateOptions::default()
        };

        let output = build_json_output(&options);
        assert!(output.success, "{:?}", output.error);
        assert_eq!(output.seed, 11);
        assert_eq!(output.phrases.len(), 3);
        assert!(output.catalog_hash.is_some());
        for phrase in &output.phrases {
            assert_eq!(phrase.archetype, "7sus4");
            assert_eq!(phrase.key, "G");
            assert_eq!(phrase.length, 9);
            assert_eq!(phrase.names.len(), 9);
            assert_eq!(phrase.pitches[4] % 12, 7);
        }
    }

    #[test]
    fn test_json_output_carries_error_codes() {
        let dir = TempDir::new().unwrap();
        let catalogs = write(&dir, "catalogs.json", CATALOGS);

        let output = build_json_output(&GenerateOptions {
            catalogs: &catalogs,
            archetype: "major",
            count: 1,
            ..GenerateOptions::default()
        });
        assert!(!output.success);
        assert_eq!(output.error.unwrap().code, "CATALOG_005");

        let output = build_json_output(&GenerateOptions {
            catalogs: &catalogs,
            archetype: "lydian",
            count: 1,
            ..GenerateOptions::default()
        });
        assert_eq!(output.error.unwrap().code, "PHRASE_001");

        let output = build_json_output(&GenerateOptions {
            catalogs: "/nonexistent/catalogs.json",
            archetype: "7sus4",
            count: 1,
            ..GenerateOptions::default()
        });
        assert_eq!(output.error.unwrap().code, "CATALOG_006");
        assert_eq!(output.catalog_hash, None);
    }

    #[test]
    fn test_demo_catalogs_generate_in_every_key() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/catalogs.json");
        let catalogs = CatalogSet::load(&path).unwrap();
        let keys = [
            "C", "G", "D", "A", "E", "B", "F#", "Db", "Ab", "Eb", "Bb", "F",
        ];

        for archetype in ["turnaround", "short_iv_iv"] {
            let mut session = Session::new(catalogs.clone(), GenerationConfig::default());
            for key in keys {
                let (phrases, error) = generate_batch(&mut session, archetype, Some(key), 1);
                assert!(error.is_none(), "{archetype} in {key}: {error:?}");
                assert_eq!(phrases[0].len(), if archetype == "turnaround" { 17 } else { 9 });
            }
        }
    }

    #[test]
    fn test_batch_stops_at_first_error() {
        let catalogs = CatalogSet::from_json(CATALOGS).unwrap();
        let mut session = Session::new(catalogs, GenerationConfig::default());

        let (phrases, error) = generate_batch(&mut session, "7sus4", Some("H"), 4);
        assert!(phrases.is_empty());
        assert!(matches!(error, Some(GenerateError::UnknownKey(_))));

        let (phrases, error) = generate_batch(&mut session, "7sus4", None, 4);
        assert_eq!(phrases.len(), 4);
        assert!(error.is_none());
    }
}
