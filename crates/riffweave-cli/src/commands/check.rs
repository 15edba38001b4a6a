//! Check command implementation
//!
//! Loads a catalog file and reports which archetypes it can serve: every
//! required role present and non-empty, and every slot joinable.

use anyhow::{Context, Result};
use colored::Colorize;
use riffweave_catalog::CatalogSet;
use riffweave_engine::Archetype;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{ArchetypeCoverage, CheckOutput, JsonError};

/// Coverage report for an already loaded catalog set.
pub fn coverage(catalogs: &CatalogSet) -> CheckOutput {
    let archetypes: Vec<ArchetypeCoverage> = Archetype::ALL
        .into_iter()
        .map(|a| ArchetypeCoverage::of(a, catalogs))
        .collect();

    CheckOutput {
        success: archetypes.iter().all(|a| a.ready),
        catalog_hash: Some(catalogs.content_hash()),
        roles: catalogs.roles().count(),
        cells: catalogs.cell_count(),
        archetypes,
        error: None,
    }
}

/// Run the check command
///
/// # Arguments
/// * `catalogs_path` - Path to the catalog JSON file
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if every archetype is servable, 1 otherwise
pub fn run(catalogs_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(catalogs_path)
    } else {
        run_human(catalogs_path)
    }
}

fn run_human(catalogs_path: &str) -> Result<ExitCode> {
    println!("{} {}", "Checking:".cyan().bold(), catalogs_path);

    let catalogs = CatalogSet::load(Path::new(catalogs_path))
        .with_context(|| format!("Failed to load catalogs: {}", catalogs_path))?;
    let report = coverage(&catalogs);

    println!(
        "{} {} roles, {} cells",
        "Loaded:".dimmed(),
        report.roles,
        report.cells
    );
    if let Some(hash) = &report.catalog_hash {
        println!("{} {}", "Hash:".dimmed(), hash);
    }
    println!();

    for archetype in &report.archetypes {
        if archetype.ready {
            println!("  {} {}", "ok".green(), archetype.id);
            continue;
        }
        println!("  {} {}", "!!".red().bold(), archetype.id);
        if !archetype.missing.is_empty() {
            println!("     missing: {}", archetype.missing.join(", "));
        }
        if !archetype.empty.is_empty() {
            println!("     empty:   {}", archetype.empty.join(", "));
        }
        if let Some(role) = &archetype.unjoinable {
            println!("     no joinable cell in {}", role);
        }
    }

    let ready = report.archetypes.iter().filter(|a| a.ready).count();
    println!();
    if report.success {
        println!("{} all {} archetypes ready", "SUCCESS".green().bold(), ready);
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{} {} of {} archetypes ready",
            "INCOMPLETE".yellow().bold(),
            ready,
            report.archetypes.len()
        );
        Ok(ExitCode::from(1))
    }
}

fn run_json(catalogs_path: &str) -> Result<ExitCode> {
    let report = match CatalogSet::load(Path::new(catalogs_path)) {
        Ok(catalogs) => coverage(&catalogs),
        Err(e) => CheckOutput {
            success: false,
            catalog_hash: None,
            roles: 0,
            cells: 0,
            archetypes: Vec::new(),
            error: Some(JsonError::from_coded(&e)),
        },
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(if report.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
