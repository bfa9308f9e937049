//! Generate command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use tracing::info;
use zxbench_gen::benchmark_diagram;

use super::common::CircuitArgs;

/// Execute the generate command.
pub fn execute(args: &CircuitArgs, output: Option<&Path>) -> Result<()> {
    let config = args.generator_config();
    let circuit = benchmark_diagram(&config)?;
    info!(
        qubits = args.qubits,
        gates = circuit.sequence.len(),
        resolved = circuit.resolved,
        scalar = %circuit.diagram.scalar(),
        "Diagram generated"
    );

    let dot = zxbench_dot::emit(&circuit.diagram);
    let dot = dot.trim_end();

    match output {
        Some(path) => {
            std::fs::write(path, dot)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Wrote {} ({} vertices, scalar {})",
                style("✓").green().bold(),
                style(path.display()).cyan(),
                circuit.diagram.num_vertices(),
                circuit.diagram.scalar()
            );
        }
        None => println!("{dot}"),
    }

    Ok(())
}
