//! Generate, build, project and resolve a benchmark diagram in one call.

use tracing::debug;
use zxbench_ir::{BasisState, Diagram};

use crate::error::GenResult;
use crate::gadget::build_diagram;
use crate::gate::GateSequence;
use crate::generator::{GeneratorConfig, generate};

/// Output of [`benchmark_diagram`].
#[derive(Debug, Clone)]
pub struct BenchmarkCircuit {
    /// The abstract circuit.
    pub sequence: GateSequence,
    /// The closed, marker-free diagram ready for serialization.
    pub diagram: Diagram,
    /// Number of H-box/helper pairs folded into `π/3` spiders.
    pub resolved: usize,
}

/// Basis states closing the register: `|0⟩` on the target range, `|+⟩`
/// elsewhere.
pub fn projection_states(config: &GeneratorConfig) -> Vec<BasisState> {
    (0..config.qubits)
        .map(|q| {
            if config.target_range.contains(&q) {
                BasisState::Zero
            } else {
                BasisState::Plus
            }
        })
        .collect()
}

/// Run the whole construction for one task.
///
/// The same states are applied to inputs and outputs, so the diagram is a
/// closed scalar-valued network once this returns.
pub fn benchmark_diagram(config: &GeneratorConfig) -> GenResult<BenchmarkCircuit> {
    let sequence = generate(config)?;
    let mut diagram = build_diagram(&sequence)?;

    let states = projection_states(config);
    diagram.plug_inputs(&states)?;
    diagram.plug_outputs(&states)?;

    let resolved = diagram.resolve_markers()?;
    debug!(
        qubits = config.qubits,
        resolved,
        vertices = diagram.num_vertices(),
        scalar = %diagram.scalar(),
        "Benchmark diagram ready"
    );

    Ok(BenchmarkCircuit {
        sequence,
        diagram,
        resolved,
    })
}
