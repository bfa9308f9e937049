//! Error types for circuit generation and gadget building.

use thiserror::Error;
use zxbench_ir::IrError;

use crate::gate::GateKind;

/// Errors that can occur while generating or building circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenError {
    /// A selection pool is too small for the requested gate.
    #[error("Cannot place {gate}: need {needed} eligible {role} qubit(s), {available} available")]
    PoolTooSmall {
        /// Gate being placed.
        gate: GateKind,
        /// Which role the pool was for.
        role: &'static str,
        /// Minimum pool size.
        needed: usize,
        /// Actual pool size.
        available: usize,
    },

    /// Toffoli target range outside the register.
    #[error("Target range {start}..{end} does not fit in {qubits} qubits")]
    InvalidTargetRange {
        start: usize,
        end: usize,
        qubits: usize,
    },

    /// Qubit index outside the register.
    #[error("Qubit {qubit} out of range for {qubits} qubits")]
    QubitOutOfRange { qubit: usize, qubits: usize },

    /// A column whose roles do not describe exactly one gate.
    #[error("Invalid gate column: {0}")]
    InvalidColumn(String),

    /// Diagram error during gadget construction.
    #[error("Diagram error: {0}")]
    Diagram(#[from] IrError),
}

/// Result type for generation operations.
pub type GenResult<T> = Result<T, GenError>;
