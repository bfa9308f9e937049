//! Inspect command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use zxbench_ir::Phase;

use super::common::print_stats;

/// Execute the inspect command.
pub fn execute(file: &Path) -> Result<()> {
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;
    let parsed = zxbench_dot::parse(&source)
        .with_context(|| format!("Failed to parse {}", file.display()))?;
    let diagram = &parsed.diagram;

    println!("{} {}", style("Diagram:").bold(), style(file.display()).cyan());
    print_stats(diagram);

    let thirds = diagram
        .vertices()
        .filter(|&v| diagram.vertex(v).is_some_and(|d| d.phase == Phase::third()))
        .count();
    let non_clifford = diagram
        .vertices()
        .filter(|&v| diagram.vertex(v).is_some_and(|d| !d.phase.is_clifford()))
        .count();
    println!("  π/3 spiders: {thirds}, non-Clifford phases: {non_clifford}");

    Ok(())
}
