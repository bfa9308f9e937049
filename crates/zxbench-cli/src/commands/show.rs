//! Show command implementation.

use anyhow::Result;
use console::style;
use zxbench_gen::{GateKind, build_diagram, generate, projection_states};

use super::common::{CircuitArgs, print_stats};

/// Execute the show command.
pub fn execute(args: &CircuitArgs) -> Result<()> {
    let config = args.generator_config();
    let seq = generate(&config)?;

    println!(
        "{} {} qubits, {} NOT, {} CNOT, {} Toffoli (targets {:?})",
        style("Circuit:").bold(),
        seq.num_qubits(),
        seq.count(GateKind::Not),
        seq.count(GateKind::Cnot),
        seq.count(GateKind::Toffoli),
        config.target_range,
    );
    print!("{seq}");

    let mut diagram = build_diagram(&seq)?;
    println!();
    println!("{}", style("Gadget diagram:").bold());
    print_stats(&diagram);

    let states = projection_states(&config);
    diagram.plug_inputs(&states)?;
    diagram.plug_outputs(&states)?;
    let resolved = diagram.resolve_markers()?;

    println!();
    println!(
        "{} ({} star gadgets resolved)",
        style("Closed diagram:").bold(),
        resolved
    );
    print_stats(&diagram);

    Ok(())
}
