//! Error types for the diagram text format.

use thiserror::Error;

/// Errors that can occur while reading a diagram file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DotError {
    /// Lexer error (invalid token).
    #[error("Lexer error at position {position}: {message}")]
    LexerError { position: usize, message: String },

    /// Unexpected token.
    #[error("Unexpected token: expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    /// Unexpected end of input.
    #[error("Unexpected end of input: {0}")]
    UnexpectedEof(String),

    /// Vertex color with no known kind.
    #[error("Unknown vertex color: {0}")]
    UnknownColor(String),

    /// Edge attribute with no known edge kind.
    #[error("Unknown edge color: {0}")]
    UnknownEdgeColor(String),

    /// Malformed `label` attribute.
    #[error("Invalid label for vertex {id}: {label}")]
    InvalidLabel { id: usize, label: String },

    /// Malformed `pos` attribute.
    #[error("Invalid position for vertex {id}: {pos}")]
    InvalidPosition { id: usize, pos: String },

    /// Vertex declared twice.
    #[error("Duplicate vertex: {0}")]
    DuplicateVertex(usize),

    /// Edge referencing an undeclared vertex.
    #[error("Undefined vertex: {0}")]
    UndefinedVertex(usize),

    /// Diagram error during reconstruction.
    #[error("Diagram error: {0}")]
    Diagram(#[from] zxbench_ir::IrError),
}

/// Result type for text format operations.
pub type DotResult<T> = Result<T, DotError>;
