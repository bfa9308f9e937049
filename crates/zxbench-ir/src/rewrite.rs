//! Resolution of pending decomposition markers.

use crate::diagram::{Diagram, V};
use crate::error::{IrError, IrResult};
use crate::phase::Phase;
use crate::vertex::{EdgeKind, Marker, VertexData, VertexKind};

impl Diagram {
    /// Replace every star gadget by a single `π/3` Z spider and clear all
    /// remaining markers.
    ///
    /// A star gadget is a [`Marker::StarHelper`] Z spider whose only
    /// neighbour is an H-box with exactly one other pair of neighbours. Both
    /// vertices are removed and a fresh Z spider with phase `π/3`, placed at
    /// the H-box position, is wired to the two outer neighbours. The scalar
    /// is left unchanged: the H-box factor was accounted for when the gadget
    /// was built.
    ///
    /// Returns the number of gadgets replaced. Running the pass again on a
    /// resolved diagram changes nothing and returns 0.
    pub fn resolve_markers(&mut self) -> IrResult<usize> {
        let helpers = self.marked(Marker::StarHelper);
        for &helper in &helpers {
            self.resolve_star(helper)?;
        }

        let rest: Vec<V> = self.vertices().filter(|&v| self.is_marked(v)).collect();
        for v in rest {
            if let Some(data) = self.vertex_mut(v) {
                data.marker = None;
            }
        }

        Ok(helpers.len())
    }

    fn resolve_star(&mut self, helper: V) -> IrResult<()> {
        let malformed = |v: V, reason: &str| IrError::MalformedGadget {
            vertex: v.index(),
            reason: reason.to_string(),
        };

        let hbox = match self.neighbors(helper).as_slice() {
            [n] => *n,
            _ => return Err(malformed(helper, "star helper must have exactly one neighbour")),
        };
        if self.kind(hbox)? != VertexKind::HBox {
            return Err(malformed(hbox, "star helper must hang off an H-box"));
        }

        let outer: Vec<V> = self
            .neighbors(hbox)
            .into_iter()
            .filter(|&n| n != helper)
            .collect();
        let &[left, right] = outer.as_slice() else {
            return Err(malformed(hbox, "H-box must have exactly two outer neighbours"));
        };

        self.remove_vertex(helper)?;
        let VertexData { qubit, row, .. } = self.remove_vertex(hbox)?;

        let z = self.add_vertex(VertexData::z().with_phase(Phase::third()).at(qubit, row));
        self.add_edge(left, z, EdgeKind::Simple)?;
        self.add_edge(right, z, EdgeKind::Simple)?;
        Ok(())
    }

    fn is_marked(&self, v: V) -> bool {
        self.vertex(v).is_some_and(|d| d.marker.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `a - hbox - b` with a star helper on the H-box.
    fn star_chain() -> (Diagram, V, V) {
        let mut d = Diagram::new();
        let a = d.add_vertex(VertexData::x().with_phase(Phase::pi()));
        let b = d.add_vertex(VertexData::z().with_marker(Marker::PotentialMaster));
        let h = d.add_vertex(VertexData::hbox().at(-1.0, 3.0));
        let s = d.add_vertex(VertexData::z().with_marker(Marker::StarHelper));
        d.add_edge(a, h, EdgeKind::Simple).unwrap();
        d.add_edge(h, b, EdgeKind::Simple).unwrap();
        d.add_edge(h, s, EdgeKind::Simple).unwrap();
        (d, a, b)
    }

    #[test]
    fn test_star_becomes_third_spider() {
        let (mut d, a, b) = star_chain();
        assert_eq!(d.resolve_markers().unwrap(), 1);

        assert_eq!(d.num_vertices(), 3);
        assert_eq!(d.count_kind(VertexKind::HBox), 0);
        let z = d.neighbors(a)[0];
        let data = d.vertex(z).unwrap();
        assert_eq!(data.phase, Phase::third());
        assert_eq!((data.qubit, data.row), (-1.0, 3.0));
        assert!(d.connected(z, b));
        assert!(d.marked(Marker::PotentialMaster).is_empty());
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let (mut d, _, _) = star_chain();
        d.resolve_markers().unwrap();
        let edges = d.edges();
        let verts: Vec<V> = d.vertices().collect();

        assert_eq!(d.resolve_markers().unwrap(), 0);
        assert_eq!(d.edges(), edges);
        assert_eq!(d.vertices().collect::<Vec<_>>(), verts);
    }

    #[test]
    fn test_malformed_helper_fails_loudly() {
        let mut d = Diagram::new();
        let s = d.add_vertex(VertexData::z().with_marker(Marker::StarHelper));
        let x = d.add_vertex(VertexData::x());
        d.add_edge(s, x, EdgeKind::Simple).unwrap();
        assert!(matches!(
            d.resolve_markers(),
            Err(IrError::MalformedGadget { .. })
        ));
    }

    #[test]
    fn test_hbox_with_wrong_arity_fails() {
        let mut d = Diagram::new();
        let s = d.add_vertex(VertexData::z().with_marker(Marker::StarHelper));
        let h = d.add_vertex(VertexData::hbox());
        let a = d.add_vertex(VertexData::z());
        d.add_edge(s, h, EdgeKind::Simple).unwrap();
        d.add_edge(h, a, EdgeKind::Simple).unwrap();
        assert!(d.resolve_markers().is_err());
    }
}
