//! Arena-backed diagram with explicit boundary lists.

use petgraph::stable_graph::{NodeIndex as PetNodeIndex, StableUnGraph};
use rustc_hash::FxHashMap;

use crate::error::{IrError, IrResult};
use crate::scalar::Scalar;
use crate::vertex::{BasisState, EdgeKind, Marker, VertexData, VertexKind};

/// Vertex identifier. Ids stay valid across removals of other vertices.
pub type V = PetNodeIndex<u32>;

/// A typed graph denoting a linear map, up to an exact [`Scalar`].
///
/// Vertices live in a stable arena; at most one edge joins any pair of
/// vertices. Inputs and outputs are ordered lists of boundary vertices,
/// each of which has exactly one neighbour.
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    graph: StableUnGraph<VertexData, EdgeKind>,
    inputs: Vec<V>,
    outputs: Vec<V>,
    scalar: Scalar,
}

impl Diagram {
    /// Create an empty diagram.
    pub fn new() -> Self {
        Self::default()
    }

    /// `n` parallel wires: input boundary at row 0, output at row 1.
    #[allow(clippy::cast_precision_loss)]
    pub fn identity(n: usize) -> Self {
        let mut d = Self::new();
        for q in 0..n {
            let i = d.add_vertex(VertexData::boundary().at(q as f64, 0.0));
            let o = d.add_vertex(VertexData::boundary().at(q as f64, 1.0));
            d.graph.add_edge(i, o, EdgeKind::Simple);
            d.inputs.push(i);
            d.outputs.push(o);
        }
        d
    }

    // =========================================================================
    // Vertices and edges
    // =========================================================================

    /// Add a vertex and return its id.
    pub fn add_vertex(&mut self, data: VertexData) -> V {
        self.graph.add_node(data)
    }

    /// Remove a vertex together with its incident edges.
    ///
    /// The vertex is also dropped from the input/output lists.
    pub fn remove_vertex(&mut self, v: V) -> IrResult<VertexData> {
        let data = self
            .graph
            .remove_node(v)
            .ok_or(IrError::VertexNotFound(v.index()))?;
        self.inputs.retain(|&b| b != v);
        self.outputs.retain(|&b| b != v);
        Ok(data)
    }

    /// Connect two vertices.
    pub fn add_edge(&mut self, a: V, b: V, kind: EdgeKind) -> IrResult<()> {
        self.check(a)?;
        self.check(b)?;
        if a == b {
            return Err(IrError::SelfLoop(a.index()));
        }
        if self.graph.find_edge(a, b).is_some() {
            return Err(IrError::ParallelEdge(a.index(), b.index()));
        }
        self.graph.add_edge(a, b, kind);
        Ok(())
    }

    /// Disconnect two vertices, returning the removed edge kind.
    pub fn remove_edge(&mut self, a: V, b: V) -> Option<EdgeKind> {
        let e = self.graph.find_edge(a, b)?;
        self.graph.remove_edge(e)
    }

    /// Kind of the edge between `a` and `b`, if connected.
    pub fn edge_kind(&self, a: V, b: V) -> Option<EdgeKind> {
        self.graph
            .find_edge(a, b)
            .and_then(|e| self.graph.edge_weight(e).copied())
    }

    /// Check whether `a` and `b` are connected.
    pub fn connected(&self, a: V, b: V) -> bool {
        self.graph.find_edge(a, b).is_some()
    }

    /// Vertex data, if present.
    pub fn vertex(&self, v: V) -> Option<&VertexData> {
        self.graph.node_weight(v)
    }

    /// Mutable vertex data, if present.
    pub fn vertex_mut(&mut self, v: V) -> Option<&mut VertexData> {
        self.graph.node_weight_mut(v)
    }

    /// Check whether the vertex exists.
    pub fn contains(&self, v: V) -> bool {
        self.graph.contains_node(v)
    }

    /// Kind of a vertex.
    pub fn kind(&self, v: V) -> IrResult<VertexKind> {
        self.vertex(v)
            .map(|d| d.kind)
            .ok_or(IrError::VertexNotFound(v.index()))
    }

    /// Neighbours of a vertex in ascending id order.
    pub fn neighbors(&self, v: V) -> Vec<V> {
        let mut ns: Vec<V> = self.graph.neighbors(v).collect();
        ns.sort_unstable();
        ns.dedup();
        ns
    }

    /// Neighbours with the kind of the connecting edge.
    pub fn incident_edges(&self, v: V) -> Vec<(V, EdgeKind)> {
        self.neighbors(v)
            .into_iter()
            .filter_map(|n| self.edge_kind(v, n).map(|k| (n, k)))
            .collect()
    }

    /// Number of neighbours.
    pub fn degree(&self, v: V) -> usize {
        self.neighbors(v).len()
    }

    /// All vertex ids in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        self.graph.node_indices()
    }

    /// All edges as `(smaller id, larger id, kind)`, sorted.
    pub fn edges(&self) -> Vec<(V, V, EdgeKind)> {
        let mut out: Vec<(V, V, EdgeKind)> = self
            .graph
            .edge_indices()
            .filter_map(|e| {
                let (a, b) = self.graph.edge_endpoints(e)?;
                let kind = *self.graph.edge_weight(e)?;
                Some(if a <= b { (a, b, kind) } else { (b, a, kind) })
            })
            .collect();
        out.sort_unstable_by_key(|&(a, b, _)| (a, b));
        out
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of vertices of a given kind.
    pub fn count_kind(&self, kind: VertexKind) -> usize {
        self.data().filter(|d| d.kind == kind).count()
    }

    /// Vertices carrying the given marker, in ascending id order.
    pub fn marked(&self, marker: Marker) -> Vec<V> {
        self.vertices()
            .filter(|&v| self.graph[v].marker == Some(marker))
            .collect()
    }

    fn data(&self) -> impl Iterator<Item = &VertexData> + '_ {
        self.graph.node_indices().map(|v| &self.graph[v])
    }

    fn check(&self, v: V) -> IrResult<()> {
        if self.graph.contains_node(v) {
            Ok(())
        } else {
            Err(IrError::VertexNotFound(v.index()))
        }
    }

    // =========================================================================
    // Boundaries and scalar
    // =========================================================================

    /// Ordered input boundaries.
    pub fn inputs(&self) -> &[V] {
        &self.inputs
    }

    /// Ordered output boundaries.
    pub fn outputs(&self) -> &[V] {
        &self.outputs
    }

    /// Replace the input list.
    pub fn set_inputs(&mut self, inputs: Vec<V>) {
        self.inputs = inputs;
    }

    /// Replace the output list.
    pub fn set_outputs(&mut self, outputs: Vec<V>) {
        self.outputs = outputs;
    }

    /// Check whether `v` is a circuit input.
    pub fn is_input(&self, v: V) -> bool {
        self.inputs.contains(&v)
    }

    /// Check whether `v` is a circuit output.
    pub fn is_output(&self, v: V) -> bool {
        self.outputs.contains(&v)
    }

    /// The tracked global scalar.
    pub fn scalar(&self) -> &Scalar {
        &self.scalar
    }

    /// Mutable access to the tracked global scalar.
    pub fn scalar_mut(&mut self) -> &mut Scalar {
        &mut self.scalar
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Largest row coordinate, or 0 for an empty diagram.
    pub fn depth(&self) -> f64 {
        self.data().map(|d| d.row).fold(0.0, f64::max)
    }

    /// Number of qubit rows occupied from 0 downwards.
    ///
    /// Auxiliary legs placed at negative qubit coordinates do not count.
    pub fn qubit_count(&self) -> f64 {
        self.data().map(|d| d.qubit + 1.0).fold(0.0, f64::max)
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// Copy all of `other` into `self` with shifted coordinates.
    ///
    /// Returns the id remapping. Scalars and boundary lists are left alone.
    pub fn append(&mut self, other: &Diagram, qubit_shift: f64, row_shift: f64) -> FxHashMap<V, V> {
        let mut vmap = FxHashMap::default();
        for v in other.vertices() {
            let mut data = other.graph[v].clone();
            data.qubit += qubit_shift;
            data.row += row_shift;
            vmap.insert(v, self.graph.add_node(data));
        }
        for (a, b, kind) in other.edges() {
            self.graph.add_edge(vmap[&a], vmap[&b], kind);
        }
        vmap
    }

    /// Sequential composition: plug the inputs of `other` into the outputs
    /// of `self`, in order.
    ///
    /// Each output/input boundary pair is removed and their neighbours are
    /// joined by a single wire whose kind is the merge of the two.
    pub fn compose(&mut self, other: &Diagram) -> IrResult<()> {
        if self.outputs.len() != other.inputs.len() {
            return Err(IrError::ArityMismatch {
                outputs: self.outputs.len(),
                inputs: other.inputs.len(),
            });
        }

        let row_shift = self.depth();
        let vmap = self.append(other, 0.0, row_shift);
        let outputs = std::mem::take(&mut self.outputs);

        for (&o, i) in outputs.iter().zip(&other.inputs) {
            let i = vmap[i];
            let (no, k0) = self.sole_neighbor(o)?;
            let (ni, k1) = self.sole_neighbor(i)?;
            self.graph.remove_node(o);
            self.graph.remove_node(i);
            self.add_edge(no, ni, k0.merge(k1))?;
        }

        self.outputs = other.outputs.iter().map(|o| vmap[o]).collect();
        self.scalar *= other.scalar;
        Ok(())
    }

    /// Parallel composition: place `other` below `self`.
    pub fn tensor(&mut self, other: &Diagram) {
        let qubit_shift = self.qubit_count();
        let vmap = self.append(other, qubit_shift, 0.0);
        self.inputs.extend(other.inputs.iter().map(|v| vmap[v]));
        self.outputs.extend(other.outputs.iter().map(|v| vmap[v]));
        self.scalar *= other.scalar;
    }

    fn sole_neighbor(&self, b: V) -> IrResult<(V, EdgeKind)> {
        match self.incident_edges(b).as_slice() {
            [(n, k)] => Ok((*n, *k)),
            _ => Err(IrError::DanglingBoundary(b.index())),
        }
    }

    // =========================================================================
    // Boundary-state projection
    // =========================================================================

    /// Close off inputs with basis states, starting from the first input.
    ///
    /// Each projected wire multiplies the scalar by `√2⁻¹`.
    pub fn plug_inputs(&mut self, states: &[BasisState]) -> IrResult<()> {
        let inputs = std::mem::take(&mut self.inputs);
        self.inputs = self.plug(inputs, states)?;
        Ok(())
    }

    /// Close off outputs with basis effects, starting from the first output.
    pub fn plug_outputs(&mut self, states: &[BasisState]) -> IrResult<()> {
        let outputs = std::mem::take(&mut self.outputs);
        self.outputs = self.plug(outputs, states)?;
        Ok(())
    }

    fn plug(&mut self, wires: Vec<V>, states: &[BasisState]) -> IrResult<Vec<V>> {
        if states.len() > wires.len() {
            let err = IrError::TooManyStates {
                states: states.len(),
                wires: wires.len(),
            };
            return Err(err);
        }

        let mut open = Vec::with_capacity(wires.len());
        let mut plugged = 0;
        for (k, &v) in wires.iter().enumerate() {
            match states.get(k).and_then(|s| s.spider()) {
                Some((kind, phase)) => {
                    let data = self
                        .graph
                        .node_weight_mut(v)
                        .ok_or(IrError::VertexNotFound(v.index()))?;
                    data.kind = kind;
                    data.phase = phase;
                    plugged += 1;
                }
                None => open.push(v),
            }
        }

        self.scalar.mul_sqrt2_pow(-plugged);
        Ok(open)
    }
}
