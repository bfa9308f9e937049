//! Composition and projection properties of the diagram model.

use proptest::prelude::*;
use zxbench_ir::{BasisState, Diagram, EdgeKind, Phase, VertexData, VertexKind};

/// One-wire diagram with a single spider of the given kind and phase.
fn single_spider(kind: VertexKind, phase: Phase, power: i32) -> Diagram {
    let mut d = Diagram::identity(1);
    let (i, o) = (d.inputs()[0], d.outputs()[0]);
    d.remove_edge(i, o);
    let s = d.add_vertex(VertexData::new(kind).with_phase(phase).at(0.0, 0.5));
    d.add_edge(i, s, EdgeKind::Simple).unwrap();
    d.add_edge(s, o, EdgeKind::Simple).unwrap();
    d.scalar_mut().mul_sqrt2_pow(power);
    d
}

proptest! {
    #[test]
    fn composing_identities_stays_identity(n in 1_usize..6, k in 1_usize..5) {
        let mut d = Diagram::identity(n);
        for _ in 0..k {
            d.compose(&Diagram::identity(n)).unwrap();
        }
        prop_assert_eq!(d.num_vertices(), 2 * n);
        prop_assert_eq!(d.num_edges(), n);
        for (&i, &o) in d.inputs().iter().zip(d.outputs()) {
            prop_assert!(d.connected(i, o));
        }
    }

    #[test]
    fn scalars_multiply_under_composition(powers in prop::collection::vec(-4_i32..4, 1..8)) {
        let mut d = Diagram::identity(1);
        for &p in &powers {
            d.compose(&single_spider(VertexKind::Z, Phase::zero(), p)).unwrap();
        }
        prop_assert_eq!(d.scalar().power_sqrt2(), powers.iter().sum::<i32>());
        prop_assert_eq!(d.count_kind(VertexKind::Z), powers.len());
        prop_assert_eq!(d.count_kind(VertexKind::Boundary), 2);
    }
}

#[test]
fn test_composed_spiders_form_a_chain() {
    let mut d = Diagram::identity(1);
    d.compose(&single_spider(VertexKind::X, Phase::pi(), 0)).unwrap();
    d.compose(&single_spider(VertexKind::Z, Phase::third(), 0)).unwrap();

    let i = d.inputs()[0];
    let x = d.neighbors(i)[0];
    assert_eq!(d.kind(x).unwrap(), VertexKind::X);
    let next: Vec<_> = d.neighbors(x).into_iter().filter(|&v| v != i).collect();
    assert_eq!(next.len(), 1);
    assert_eq!(d.vertex(next[0]).unwrap().phase, Phase::third());
    assert!(d.vertex(next[0]).unwrap().row > d.vertex(x).unwrap().row);
}

#[test]
fn test_full_projection_closes_diagram() {
    let mut d = Diagram::identity(4);
    let states = BasisState::parse_list("++00").unwrap();
    d.plug_inputs(&states).unwrap();
    d.plug_outputs(&states).unwrap();

    assert!(d.inputs().is_empty());
    assert!(d.outputs().is_empty());
    assert_eq!(d.count_kind(VertexKind::Boundary), 0);
    assert_eq!(d.count_kind(VertexKind::Z), 4);
    assert_eq!(d.count_kind(VertexKind::X), 4);
    assert_eq!(d.scalar().power_sqrt2(), -8);
}
