//! Per-gate diagram fragments and their sequential composition.
//!
//! Every fragment spans the whole register: qubit `i` enters at boundary
//! `(i, 0)` and leaves at an output boundary on the same qubit line, so
//! fragments chain with [`Diagram::compose`].
//!
//! The Toffoli fragment is built from phase-free spiders plus H-boxes. Each
//! control and the target grow an auxiliary leg, placed at negative qubit
//! coordinates, that ends in an H-box paired with a [`Marker::StarHelper`]
//! spider. A closing gadget ties every leg to one master Z spider. Running
//! [`Diagram::resolve_markers`] afterwards folds each H-box/helper pair into
//! a single `π/3` Z spider.

use tracing::{debug, trace};
use zxbench_ir::{Diagram, EdgeKind, Marker, Phase, V, VertexData};

use crate::error::GenResult;
use crate::gate::{GateColumn, GateSequence};

/// Scalar exponent (in powers of `√2`) contributed by one gadget H-box.
pub const HBOX_SQRT2_POWER: i32 = -2;

#[allow(clippy::cast_precision_loss)]
fn coord(q: usize) -> f64 {
    q as f64
}

/// Identity on `qubits` wires except the chosen qubit, which passes through
/// an X spider with phase `π`.
pub fn not_fragment(qubits: usize, qubit: usize) -> GenResult<Diagram> {
    let mut d = Diagram::new();
    let mut inputs = Vec::with_capacity(qubits);
    let mut outputs = Vec::with_capacity(qubits);

    for i in 0..qubits {
        let start = d.add_vertex(VertexData::boundary().at(coord(i), 0.0));
        let end = d.add_vertex(VertexData::boundary().at(coord(i), 2.0));
        if i == qubit {
            let x = d.add_vertex(VertexData::x().with_phase(Phase::pi()).at(coord(i), 1.0));
            d.add_edge(start, x, EdgeKind::Simple)?;
            d.add_edge(x, end, EdgeKind::Simple)?;
        } else {
            d.add_edge(start, end, EdgeKind::Simple)?;
        }
        inputs.push(start);
        outputs.push(end);
    }

    d.set_inputs(inputs);
    d.set_outputs(outputs);
    Ok(d)
}

/// Identity except a phase-free Z spider on `control` wired to a phase-free
/// X spider on `target`.
pub fn cnot_fragment(qubits: usize, control: usize, target: usize) -> GenResult<Diagram> {
    let mut d = Diagram::new();
    let mut inputs = Vec::with_capacity(qubits);
    let mut outputs = Vec::with_capacity(qubits);
    let mut z = None;
    let mut x = None;

    for i in 0..qubits {
        let start = d.add_vertex(VertexData::boundary().at(coord(i), 0.0));
        let end = d.add_vertex(VertexData::boundary().at(coord(i), 2.0));
        let spider = if i == control {
            z = Some(d.add_vertex(VertexData::z().at(coord(i), 1.0)));
            z
        } else if i == target {
            x = Some(d.add_vertex(VertexData::x().at(coord(i), 1.0)));
            x
        } else {
            None
        };
        match spider {
            Some(s) => {
                d.add_edge(start, s, EdgeKind::Simple)?;
                d.add_edge(s, end, EdgeKind::Simple)?;
            }
            None => d.add_edge(start, end, EdgeKind::Simple)?,
        }
        inputs.push(start);
        outputs.push(end);
    }

    if let (Some(z), Some(x)) = (z, x) {
        d.add_edge(z, x, EdgeKind::Simple)?;
    }
    d.set_inputs(inputs);
    d.set_outputs(outputs);
    Ok(d)
}

/// Exact multi-controlled NOT.
///
/// `controls` must be sorted ascending. The result has the control legs,
/// then the target leg, then the main wires, all merged into the closing
/// gadget, and carries `√2^-2` per H-box.
pub fn toffoli_fragment(qubits: usize, controls: &[usize], target: usize) -> GenResult<Diagram> {
    let mut legs = Diagram::new();
    let mut inputs = Vec::with_capacity(qubits);
    let mut ends = Vec::with_capacity(qubits);
    let mut control_spiders = Vec::with_capacity(controls.len());
    let mut target_spider = None;

    for i in 0..qubits {
        let start = legs.add_vertex(VertexData::boundary().at(coord(i), 0.0));
        let end = legs.add_vertex(VertexData::boundary().at(coord(i), 3.0));
        let spider = if controls.contains(&i) {
            let z = legs.add_vertex(
                VertexData::z()
                    .at(coord(i), 1.0)
                    .with_marker(Marker::PotentialMaster),
            );
            control_spiders.push(z);
            Some(z)
        } else if i == target {
            target_spider = Some(legs.add_vertex(VertexData::x().at(coord(i), 1.0)));
            target_spider
        } else {
            None
        };
        match spider {
            Some(s) => {
                legs.add_edge(start, s, EdgeKind::Simple)?;
                legs.add_edge(s, end, EdgeKind::Simple)?;
            }
            None => legs.add_edge(start, end, EdgeKind::Simple)?,
        }
        inputs.push(start);
        ends.push(end);
    }

    let n = control_spiders.len();
    let mut leg_outputs = Vec::with_capacity(n + 1);

    for (i, &z) in control_spiders.iter().enumerate() {
        let q = coord(i) - coord(n) - 1.0;
        let x_pi = legs.add_vertex(VertexData::x().with_phase(Phase::pi()).at(q, 3.0));
        let out = star_leg(&mut legs, x_pi, VertexData::hbox().at(q, 3.5), q - 0.2, 3.5, 4.0)?;
        legs.add_edge(z, x_pi, EdgeKind::Simple)?;
        leg_outputs.push(out);
    }

    if let Some(x) = target_spider {
        let shift = legs.add_vertex(VertexData::z().with_phase(Phase::pi()).at(-0.5, 3.0));
        let out = star_leg(&mut legs, shift, VertexData::hbox().at(-1.0, 3.0), -1.2, 3.0, 3.5)?;
        legs.add_edge(x, shift, EdgeKind::Simple)?;
        leg_outputs.push(out);
    }

    leg_outputs.extend(ends);
    legs.set_inputs(inputs);
    legs.set_outputs(leg_outputs);

    let closing = closing_gadget(qubits, n)?;
    legs.compose(&closing)?;

    trace!(
        controls = ?controls,
        target,
        vertices = legs.num_vertices(),
        "Built Toffoli fragment"
    );
    Ok(legs)
}

/// H-box fed by `feed`, with a star helper and an output boundary one half
/// row further on.
fn star_leg(
    d: &mut Diagram,
    feed: V,
    hbox: VertexData,
    helper_qubit: f64,
    helper_row: f64,
    out_row: f64,
) -> GenResult<V> {
    let q = hbox.qubit;
    let hbox = d.add_vertex(hbox);
    d.scalar_mut().mul_sqrt2_pow(HBOX_SQRT2_POWER);

    let helper = d.add_vertex(
        VertexData::z()
            .at(helper_qubit, helper_row)
            .with_marker(Marker::StarHelper),
    );
    let out = d.add_vertex(VertexData::boundary().at(q, out_row));

    d.add_edge(feed, hbox, EdgeKind::Simple)?;
    d.add_edge(hbox, helper, EdgeKind::Simple)?;
    d.add_edge(hbox, out, EdgeKind::Simple)?;
    Ok(out)
}

/// Master Z spider collecting `controls + 1` legs, the last one through a
/// NOT, tensored with the identity on the main register.
#[allow(clippy::cast_precision_loss)]
fn closing_gadget(qubits: usize, controls: usize) -> GenResult<Diagram> {
    let legs = controls + 1;
    let mut mid = legs as f64 / 2.0;
    if mid.fract() == 0.0 {
        mid += 0.5;
    }

    let mut d = Diagram::new();
    let master = d.add_vertex(
        VertexData::z()
            .with_phase(Phase::pi())
            .at(-mid, 1.0)
            .with_marker(Marker::PotentialMaster),
    );
    let final_not = d.add_vertex(VertexData::x().with_phase(Phase::pi()).at(-1.0, 1.0));
    d.add_edge(final_not, master, EdgeKind::Simple)?;

    let mut inputs = Vec::with_capacity(legs);
    for i in 0..legs {
        let bound = d.add_vertex(VertexData::boundary().at(coord(i) - legs as f64, 0.0));
        let sink = if i == controls { final_not } else { master };
        d.add_edge(bound, sink, EdgeKind::Simple)?;
        inputs.push(bound);
    }
    d.set_inputs(inputs);

    d.tensor(&Diagram::identity(qubits));
    Ok(d)
}

/// Fragment for one column.
pub fn column_fragment(qubits: usize, column: &GateColumn) -> GenResult<Diagram> {
    column.validate(qubits)?;
    match column {
        GateColumn::Not { qubit } => not_fragment(qubits, *qubit),
        GateColumn::Cnot { control, target } => cnot_fragment(qubits, *control, *target),
        GateColumn::Toffoli { controls, target } => toffoli_fragment(qubits, controls, *target),
    }
}

/// Accumulates fragments on top of an identity register.
#[derive(Debug, Clone)]
pub struct GadgetBuilder {
    qubits: usize,
    diagram: Diagram,
}

impl GadgetBuilder {
    /// Start from the identity on `qubits` wires.
    pub fn new(qubits: usize) -> Self {
        Self {
            qubits,
            diagram: Diagram::identity(qubits),
        }
    }

    /// Append a NOT.
    pub fn not(&mut self, qubit: usize) -> GenResult<&mut Self> {
        self.apply(&GateColumn::Not { qubit })
    }

    /// Append a CNOT.
    pub fn cnot(&mut self, control: usize, target: usize) -> GenResult<&mut Self> {
        self.apply(&GateColumn::Cnot { control, target })
    }

    /// Append a multi-controlled NOT.
    pub fn toffoli(&mut self, controls: &[usize], target: usize) -> GenResult<&mut Self> {
        self.apply(&GateColumn::toffoli(controls.to_vec(), target))
    }

    /// Append one column.
    pub fn apply(&mut self, column: &GateColumn) -> GenResult<&mut Self> {
        let fragment = column_fragment(self.qubits, column)?;
        self.diagram.compose(&fragment)?;
        Ok(self)
    }

    /// The diagram built so far.
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    /// Consume the builder.
    pub fn finish(self) -> Diagram {
        self.diagram
    }
}

/// Build the (unresolved) diagram of a whole gate sequence.
pub fn build_diagram(seq: &GateSequence) -> GenResult<Diagram> {
    let mut builder = GadgetBuilder::new(seq.num_qubits());
    for column in seq.columns() {
        builder.apply(column)?;
    }
    let diagram = builder.finish();
    debug!(
        columns = seq.len(),
        vertices = diagram.num_vertices(),
        edges = diagram.num_edges(),
        "Built gadget diagram"
    );
    Ok(diagram)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zxbench_ir::VertexKind;

    fn spiders(d: &Diagram, kind: VertexKind) -> usize {
        d.count_kind(kind)
    }

    #[test]
    fn test_not_fragment() {
        let d = not_fragment(3, 1).unwrap();
        assert_eq!(d.inputs().len(), 3);
        assert_eq!(d.outputs().len(), 3);
        assert_eq!(spiders(&d, VertexKind::X), 1);
        assert_eq!(d.num_edges(), 4);
    }

    #[test]
    fn test_cnot_fragment() {
        let d = cnot_fragment(3, 2, 0).unwrap();
        assert_eq!(spiders(&d, VertexKind::Z), 1);
        assert_eq!(spiders(&d, VertexKind::X), 1);
        // 2 per spider wire, 1 idle wire, 1 shared
        assert_eq!(d.num_edges(), 6);
    }

    #[test]
    fn test_toffoli_fragment_structure() {
        let d = toffoli_fragment(3, &[0, 1], 2).unwrap();
        assert_eq!(d.inputs().len(), 3);
        assert_eq!(d.outputs().len(), 3);
        assert_eq!(d.count_kind(VertexKind::HBox), 3);
        assert_eq!(d.marked(Marker::StarHelper).len(), 3);
        // two controls plus the master
        assert_eq!(d.marked(Marker::PotentialMaster).len(), 3);
        assert_eq!(d.scalar().power_sqrt2(), 3 * HBOX_SQRT2_POWER);

        for &h in &d.marked(Marker::StarHelper) {
            let n = d.neighbors(h);
            assert_eq!(n.len(), 1);
            assert_eq!(d.kind(n[0]).unwrap(), VertexKind::HBox);
            assert_eq!(d.degree(n[0]), 3);
        }

        for v in d.vertices() {
            let data = d.vertex(v).unwrap();
            if data.kind == VertexKind::HBox {
                assert_eq!(data.phase, Phase::pi());
            }
        }
    }

    #[test]
    fn test_closing_gadget_layout() {
        let d = closing_gadget(2, 2).unwrap();
        // 3 legs plus 2 identity wires
        assert_eq!(d.inputs().len(), 5);
        assert_eq!(d.outputs().len(), 2);
        let master = d
            .vertices()
            .find(|&v| d.vertex(v).unwrap().marker == Some(Marker::PotentialMaster))
            .unwrap();
        let data = d.vertex(master).unwrap();
        assert_eq!(data.qubit, -1.5);
        assert_eq!(data.phase, Phase::pi());
        assert_eq!(d.degree(master), 3);
    }

    #[test]
    fn test_builder_chains() {
        let mut b = GadgetBuilder::new(4);
        b.not(0).unwrap().cnot(1, 2).unwrap().toffoli(&[0, 1], 3).unwrap();
        let d = b.finish();
        assert_eq!(d.inputs().len(), 4);
        assert_eq!(d.outputs().len(), 4);
        assert_eq!(d.count_kind(VertexKind::HBox), 3);
    }

    #[test]
    fn test_invalid_column_rejected() {
        let mut b = GadgetBuilder::new(3);
        assert!(b.cnot(0, 0).is_err());
        assert!(b.toffoli(&[0], 2).is_err());
    }
}
