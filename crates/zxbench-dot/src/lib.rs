//! Diagram Text Format for zxbench
//!
//! Reads and writes the line-oriented, Graphviz-style graph format consumed
//! by the external solvers:
//!
//! ```text
//! graph {
//!   <id> [color=<black|green|red|yellow>, label="<id[:i|:o|:phase]>"[, pos="<qubit>,<row>!"]]
//!   ...
//!
//!   <id> -- <id> [color=blue]
//! }
//! ```
//!
//! | Vertex kind | Color |
//! |-------------|-------|
//! | Boundary | `black` |
//! | Z spider | `green` |
//! | X spider | `red` |
//! | H-box | `yellow` |
//!
//! # Example: Round-Trip
//!
//! ```rust
//! use zxbench_dot::{emit, parse};
//! use zxbench_ir::Diagram;
//!
//! let wires = Diagram::identity(2);
//! let text = emit(&wires);
//! let parsed = parse(&text).unwrap();
//! assert_eq!(parsed.diagram.num_vertices(), 4);
//! assert_eq!(parsed.diagram.inputs().len(), 2);
//! ```

mod emitter;
mod error;
mod lexer;
mod parser;

pub use emitter::{color, emit};
pub use error::{DotError, DotResult};
pub use parser::{ParsedDiagram, parse};
