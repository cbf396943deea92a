//! Output formatting utilities for CLI.

use serde::Serialize;
use treegp::ant::AntReport;

use super::CliError;

/// JSON-serializable demo result.
#[derive(Debug, Serialize)]
pub(super) struct JsonAntReport<'a> {
    /// Random seed used.
    pub(super) seed: u64,
    /// The report itself.
    #[serde(flatten)]
    pub(super) report: &'a AntReport,
}

/// Format a demo result as pretty JSON.
pub(super) fn format_json(report: &AntReport, seed: u64) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(&JsonAntReport { seed, report })?)
}

/// Format a demo result as human-readable text.
pub(super) fn format_text(report: &AntReport, seed: u64) -> String {
    let mut output = String::new();

    output.push_str(&format!("Ant Evolution (seed: {seed})\n"));
    output.push_str(&format!(
        "  Generations: {}  Evaluations: {}  Time: {:.2}s\n\n",
        report.stats.generations.len(),
        report.stats.evaluations,
        report.stats.elapsed_seconds
    ));

    output.push_str("  gen   evals      best      mean       std\n");
    for generation in &report.stats.generations {
        let population = &generation.population;
        output.push_str(&format!(
            "  {:>3} {:>7} {:>9.2} {:>9.2} {:>9.2}\n",
            generation.generation, generation.evaluations, population.best, population.mean, population.std
        ));
    }

    output.push_str(&format!("\nBest program ({}/{} food eaten):\n", report.eaten, report.food));
    output.push_str(&format!("  {}\n\n", report.program));
    output.push_str(&report.trail);

    output
}
