//! zxbench Diagram Model
//!
//! Typed graphs over the ZX/ZH generators, used to represent benchmark
//! circuits structurally and hand them to external solvers.
//!
//! # Core Components
//!
//! - **Phases**: [`Phase`], an exact rational multiple of π
//! - **Scalar**: [`Scalar`], the exact global factor `√2^k · e^(iπ·p)`
//! - **Vertices**: [`VertexKind`], [`VertexData`], and pending decomposition
//!   [`Marker`]s
//! - **Diagram**: [`Diagram`], an arena of vertices with ordered boundaries,
//!   sequential/parallel composition and basis-state projection
//!
//! # Example: a CNOT
//!
//! ```rust
//! use zxbench_ir::{Diagram, EdgeKind, VertexData};
//!
//! let mut cnot = Diagram::identity(2);
//! let (i0, o0) = (cnot.inputs()[0], cnot.outputs()[0]);
//! let (i1, o1) = (cnot.inputs()[1], cnot.outputs()[1]);
//! cnot.remove_edge(i0, o0);
//! cnot.remove_edge(i1, o1);
//!
//! let z = cnot.add_vertex(VertexData::z().at(0.0, 0.5));
//! let x = cnot.add_vertex(VertexData::x().at(1.0, 0.5));
//! for (a, b) in [(i0, z), (z, o0), (i1, x), (x, o1), (z, x)] {
//!     cnot.add_edge(a, b, EdgeKind::Simple).unwrap();
//! }
//!
//! let mut circuit = Diagram::identity(2);
//! circuit.compose(&cnot).unwrap();
//! assert_eq!(circuit.num_vertices(), 6);
//! ```

pub mod diagram;
pub mod error;
pub mod phase;
pub mod rewrite;
pub mod scalar;
pub mod vertex;

pub use diagram::{Diagram, V};
pub use error::{IrError, IrResult};
pub use phase::Phase;
pub use scalar::Scalar;
pub use vertex::{BasisState, EdgeKind, Marker, VertexData, VertexKind};
