//! List command implementation
//!
//! Prints the archetype table.

use anyhow::Result;
use colored::Colorize;
use riffweave_engine::Archetype;
use std::process::ExitCode;

use super::json_output::{ArchetypeRecord, ListOutput};

/// Builds the listing for every archetype, in table order.
pub fn archetype_table() -> ListOutput {
    ListOutput {
        archetypes: Archetype::ALL.into_iter().map(ArchetypeRecord::from).collect(),
    }
}

/// Run the list command
///
/// # Arguments
/// * `json_output` - Whether to output machine-readable JSON
pub fn run(json_output: bool) -> Result<ExitCode> {
    let table = archetype_table();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Archetypes:".cyan().bold());
    for record in &table.archetypes {
        let lengths: Vec<String> = record.lengths.iter().map(|l| l.to_string()).collect();
        println!(
            "  {:<20} {:>5}  {:<28} {}",
            record.id.bold(),
            lengths.join("/"),
            record.transposition,
            record
                .cadence_pool
                .as_deref()
                .map(|p| format!("snap: {p}"))
                .unwrap_or_default()
                .dimmed()
        );
    }
    println!();
    println!("{} {}", "Total:".dimmed(), table.archetypes.len());

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_table_lists_every_archetype() {
        let table = archetype_table();
        assert_eq!(table.archetypes.len(), 21);
        assert_eq!(table.archetypes[0].id, "7sus4");
        assert_eq!(table.archetypes[20].id, "short_iv_iv");

        let biii = table
            .archetypes
            .iter()
            .find(|a| a.id == "long_biii_to_ii_old")
            .unwrap();
        assert_eq!(biii.lengths, vec![17, 20]);
    }
}
