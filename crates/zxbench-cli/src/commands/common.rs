//! Shared helpers for CLI commands.

use clap::Args;
use console::style;
use zxbench_gen::GeneratorConfig;
use zxbench_ir::{Diagram, VertexKind};

/// Parameters of a single random circuit.
#[derive(Debug, Clone, Args)]
pub struct CircuitArgs {
    /// Number of qubits
    #[arg(short, long)]
    pub qubits: usize,

    /// Number of NOT gates
    #[arg(long, default_value = "0")]
    pub nots: usize,

    /// Number of CNOT gates
    #[arg(long, default_value = "0")]
    pub cnots: usize,

    /// Number of Toffoli gates
    #[arg(long, default_value = "0")]
    pub toffolis: usize,

    /// Random seed (OS entropy if omitted)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Share of qubits, from the top, reserved for Toffoli targets
    #[arg(long, default_value = "0.15")]
    pub target_fraction: f64,
}

impl CircuitArgs {
    /// Generator settings with the benchmark placement rules.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig::for_benchmark(
            self.qubits,
            self.nots,
            self.cnots,
            self.toffolis,
            self.target_fraction,
            self.seed,
        )
    }
}

/// Print vertex/edge counts and the scalar of a diagram.
pub fn print_stats(diagram: &Diagram) {
    println!(
        "  Vertices: {} ({} Z, {} X, {} H-box, {} boundary)",
        diagram.num_vertices(),
        diagram.count_kind(VertexKind::Z),
        diagram.count_kind(VertexKind::X),
        diagram.count_kind(VertexKind::HBox),
        diagram.count_kind(VertexKind::Boundary),
    );
    println!("  Edges:    {}", diagram.num_edges());
    println!(
        "  Inputs:   {}, outputs: {}",
        diagram.inputs().len(),
        diagram.outputs().len()
    );
    println!("  Scalar:   {}", style(diagram.scalar()).yellow());
}
