//! zxbench Circuit Generation
//!
//! Random NOT/CNOT/Toffoli circuits and their exact translation into ZH
//! diagrams.
//!
//! # Core Components
//!
//! - **Gates**: [`GateColumn`] and [`GateSequence`], one gate per column
//! - **Generator**: [`generate`] draws a seeded random [`GateSequence`] under
//!   the placement rules of a [`GeneratorConfig`]
//! - **Gadgets**: [`GadgetBuilder`] turns each column into a diagram
//!   fragment and composes it onto the running diagram
//! - **Pipeline**: [`benchmark_diagram`] generates, builds, closes the
//!   boundaries and resolves decomposition markers
//!
//! # Example
//!
//! ```rust
//! use zxbench_gen::{GadgetBuilder, HBOX_SQRT2_POWER};
//! use zxbench_ir::VertexKind;
//!
//! let mut builder = GadgetBuilder::new(3);
//! builder.toffoli(&[0, 1], 2).unwrap();
//! let mut diagram = builder.finish();
//!
//! // one H-box per control plus one for the target
//! assert_eq!(diagram.count_kind(VertexKind::HBox), 3);
//! assert_eq!(diagram.scalar().power_sqrt2(), 3 * HBOX_SQRT2_POWER);
//!
//! diagram.resolve_markers().unwrap();
//! assert_eq!(diagram.count_kind(VertexKind::HBox), 0);
//! ```

pub mod error;
pub mod gadget;
pub mod gate;
pub mod generator;
pub mod pipeline;

pub use error::{GenError, GenResult};
pub use gadget::{
    GadgetBuilder, HBOX_SQRT2_POWER, build_diagram, cnot_fragment, column_fragment, not_fragment,
    toffoli_fragment,
};
pub use gate::{GateColumn, GateKind, GateSequence, Role};
pub use generator::{GeneratorConfig, generate};
pub use pipeline::{BenchmarkCircuit, benchmark_diagram, projection_states};
