//! Error types for the diagram model.

use thiserror::Error;

/// Errors that can occur in diagram operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Vertex id not present in the diagram.
    #[error("Vertex {0} not found in diagram")]
    VertexNotFound(usize),

    /// Attempt to add a second edge between two vertices.
    #[error("Vertices {0} and {1} are already connected")]
    ParallelEdge(usize, usize),

    /// Attempt to connect a vertex to itself.
    #[error("Self-loop on vertex {0}")]
    SelfLoop(usize),

    /// Sequential composition with mismatched boundaries.
    #[error("Cannot compose: {outputs} outputs against {inputs} inputs")]
    ArityMismatch {
        /// Number of outputs of the left diagram.
        outputs: usize,
        /// Number of inputs of the right diagram.
        inputs: usize,
    },

    /// A boundary vertex without exactly one neighbour.
    #[error("Boundary vertex {0} must have exactly one neighbour")]
    DanglingBoundary(usize),

    /// More basis states than open wires.
    #[error("Got {states} basis states for {wires} open wires")]
    TooManyStates {
        /// Number of states supplied.
        states: usize,
        /// Number of wires available.
        wires: usize,
    },

    /// Unknown basis state character.
    #[error("Invalid basis state '{0}', expected one of 0 1 + - /")]
    InvalidBasisState(char),

    /// Unparseable phase text.
    #[error("Invalid phase: {0}")]
    InvalidPhase(String),

    /// A marked vertex whose neighbourhood does not have the gadget shape.
    #[error("Malformed gadget at vertex {vertex}: {reason}")]
    MalformedGadget {
        /// The offending vertex.
        vertex: usize,
        /// What was wrong.
        reason: String,
    },
}

/// Result type for diagram operations.
pub type IrResult<T> = Result<T, IrError>;
