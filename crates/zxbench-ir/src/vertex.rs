//! Vertex and edge kinds.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::phase::Phase;

/// The generator a vertex stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexKind {
    /// Circuit input or output terminal.
    Boundary,
    /// Z (green) spider.
    Z,
    /// X (red) spider.
    X,
    /// Hadamard box.
    HBox,
}

impl VertexKind {
    /// Check if this is a Z or X spider.
    #[inline]
    pub fn is_spider(self) -> bool {
        matches!(self, VertexKind::Z | VertexKind::X)
    }
}

/// The type of a wire between two vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum EdgeKind {
    /// A plain wire.
    #[default]
    Simple,
    /// A wire carrying a Hadamard.
    Hadamard,
}

impl EdgeKind {
    /// Kind of the wire obtained by fusing two wires end to end.
    pub fn merge(self, other: EdgeKind) -> EdgeKind {
        if self == other {
            EdgeKind::Simple
        } else {
            EdgeKind::Hadamard
        }
    }
}

/// A pending decomposition marker attached to a vertex.
///
/// Markers are consumed by [`Diagram::resolve_markers`](crate::Diagram::resolve_markers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    /// A Z spider that may absorb neighbouring control structure.
    PotentialMaster,
    /// A helper Z spider attached to an H-box; the pair stands for a single
    /// Z spider with phase `π/3`.
    StarHelper,
}

/// Data stored for each vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexData {
    /// Vertex kind.
    pub kind: VertexKind,
    /// Phase (boundaries always carry zero).
    pub phase: Phase,
    /// Vertical layout coordinate; fractional or negative for auxiliary legs.
    pub qubit: f64,
    /// Horizontal layout coordinate (circuit time).
    pub row: f64,
    /// Pending decomposition marker.
    pub marker: Option<Marker>,
}

impl VertexData {
    /// Create a vertex of the given kind at the origin.
    pub fn new(kind: VertexKind) -> Self {
        Self {
            kind,
            phase: Phase::zero(),
            qubit: 0.0,
            row: 0.0,
            marker: None,
        }
    }

    /// Shorthand for a boundary vertex.
    pub fn boundary() -> Self {
        Self::new(VertexKind::Boundary)
    }

    /// Shorthand for a Z spider.
    pub fn z() -> Self {
        Self::new(VertexKind::Z)
    }

    /// Shorthand for an X spider.
    pub fn x() -> Self {
        Self::new(VertexKind::X)
    }

    /// Shorthand for an H-box with the standard `π` label.
    pub fn hbox() -> Self {
        Self::new(VertexKind::HBox).with_phase(Phase::pi())
    }

    /// Set the phase.
    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = phase;
        self
    }

    /// Set the layout coordinates.
    pub fn at(mut self, qubit: f64, row: f64) -> Self {
        self.qubit = qubit;
        self.row = row;
        self
    }

    /// Attach a marker.
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }
}

/// A single-qubit basis state or effect used to close off a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasisState {
    /// `|0⟩`: X spider, phase 0.
    Zero,
    /// `|1⟩`: X spider, phase π.
    One,
    /// `|+⟩`: Z spider, phase 0.
    Plus,
    /// `|−⟩`: Z spider, phase π.
    Minus,
    /// Leave the boundary open.
    Open,
}

impl BasisState {
    /// Parse one of `0`, `1`, `+`, `-`, `/`.
    pub fn from_char(c: char) -> IrResult<Self> {
        match c {
            '0' => Ok(BasisState::Zero),
            '1' => Ok(BasisState::One),
            '+' => Ok(BasisState::Plus),
            '-' => Ok(BasisState::Minus),
            '/' => Ok(BasisState::Open),
            other => Err(IrError::InvalidBasisState(other)),
        }
    }

    /// Parse a string such as `"++00/"`.
    pub fn parse_list(s: &str) -> IrResult<Vec<Self>> {
        s.chars().map(Self::from_char).collect()
    }

    /// Spider kind and phase realizing this state, or `None` for `Open`.
    pub fn spider(self) -> Option<(VertexKind, Phase)> {
        match self {
            BasisState::Zero => Some((VertexKind::X, Phase::zero())),
            BasisState::One => Some((VertexKind::X, Phase::pi())),
            BasisState::Plus => Some((VertexKind::Z, Phase::zero())),
            BasisState::Minus => Some((VertexKind::Z, Phase::pi())),
            BasisState::Open => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_merge() {
        assert_eq!(EdgeKind::Simple.merge(EdgeKind::Simple), EdgeKind::Simple);
        assert_eq!(EdgeKind::Simple.merge(EdgeKind::Hadamard), EdgeKind::Hadamard);
        assert_eq!(EdgeKind::Hadamard.merge(EdgeKind::Hadamard), EdgeKind::Simple);
    }

    #[test]
    fn test_parse_basis_list() {
        let states = BasisState::parse_list("+0/-1").unwrap();
        assert_eq!(
            states,
            vec![
                BasisState::Plus,
                BasisState::Zero,
                BasisState::Open,
                BasisState::Minus,
                BasisState::One
            ]
        );
        assert!(BasisState::parse_list("+x").is_err());
    }
}
