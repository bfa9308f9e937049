//! Abstract gate columns.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GenError, GenResult};

/// The three gate families of the benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    /// Single-qubit bit flip.
    Not,
    /// Controlled-NOT.
    Cnot,
    /// Multi-controlled NOT with at least two controls.
    Toffoli,
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateKind::Not => write!(f, "NOT"),
            GateKind::Cnot => write!(f, "CNOT"),
            GateKind::Toffoli => write!(f, "Toffoli"),
        }
    }
}

/// The part a qubit plays in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Bit-flipped qubit of a NOT.
    Not,
    /// Control (Z spider) of a CNOT.
    ZControl,
    /// Target (X spider) of a CNOT.
    XControl,
    /// Control of a Toffoli.
    Control,
    /// Target of a Toffoli.
    Target,
}

impl Role {
    fn tag(self) -> &'static str {
        match self {
            Role::Not => "NOT",
            Role::ZControl => "Z",
            Role::XControl => "X",
            Role::Control => "ctrl",
            Role::Target => "targ",
        }
    }
}

/// One time-slice of the circuit, holding exactly one gate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateColumn {
    /// Bit flip on `qubit`.
    Not { qubit: usize },
    /// CNOT from `control` onto `target`.
    Cnot { control: usize, target: usize },
    /// Multi-controlled NOT; `controls` is sorted ascending.
    Toffoli { controls: Vec<usize>, target: usize },
}

impl GateColumn {
    /// Create a Toffoli column, sorting the controls.
    pub fn toffoli(mut controls: Vec<usize>, target: usize) -> Self {
        controls.sort_unstable();
        GateColumn::Toffoli { controls, target }
    }

    /// The gate family of this column.
    pub fn kind(&self) -> GateKind {
        match self {
            GateColumn::Not { .. } => GateKind::Not,
            GateColumn::Cnot { .. } => GateKind::Cnot,
            GateColumn::Toffoli { .. } => GateKind::Toffoli,
        }
    }

    /// Per-qubit roles; `None` marks an idle qubit.
    pub fn roles(&self, qubits: usize) -> Vec<Option<Role>> {
        let mut roles = vec![None; qubits];
        let mut set = |q: usize, role: Role| {
            if let Some(slot) = roles.get_mut(q) {
                *slot = Some(role);
            }
        };
        match self {
            GateColumn::Not { qubit } => set(*qubit, Role::Not),
            GateColumn::Cnot { control, target } => {
                set(*control, Role::ZControl);
                set(*target, Role::XControl);
            }
            GateColumn::Toffoli { controls, target } => {
                for &c in controls {
                    set(c, Role::Control);
                }
                set(*target, Role::Target);
            }
        }
        roles
    }

    /// Rebuild a column from its role vector.
    pub fn from_roles(roles: &[Option<Role>]) -> GenResult<Self> {
        let with = |role: Role| -> Vec<usize> {
            roles
                .iter()
                .enumerate()
                .filter(|(_, r)| **r == Some(role))
                .map(|(q, _)| q)
                .collect()
        };
        let (nots, zs, xs, ctrls, targs) = (
            with(Role::Not),
            with(Role::ZControl),
            with(Role::XControl),
            with(Role::Control),
            with(Role::Target),
        );

        let column = match (nots.as_slice(), zs.as_slice(), xs.as_slice(), targs.as_slice()) {
            ([q], [], [], []) if ctrls.is_empty() => GateColumn::Not { qubit: *q },
            ([], [c], [t], []) if ctrls.is_empty() => GateColumn::Cnot {
                control: *c,
                target: *t,
            },
            ([], [], [], [t]) => GateColumn::Toffoli {
                controls: ctrls,
                target: *t,
            },
            _ => {
                return Err(GenError::InvalidColumn(
                    "roles do not describe exactly one gate".into(),
                ));
            }
        };
        column.validate(roles.len())?;
        Ok(column)
    }

    /// Check that the footprint fits `qubits` and is internally consistent.
    pub fn validate(&self, qubits: usize) -> GenResult<()> {
        let in_range = |q: usize| {
            if q < qubits {
                Ok(())
            } else {
                Err(GenError::QubitOutOfRange { qubit: q, qubits })
            }
        };
        match self {
            GateColumn::Not { qubit } => in_range(*qubit),
            GateColumn::Cnot { control, target } => {
                in_range(*control)?;
                in_range(*target)?;
                if control == target {
                    return Err(GenError::InvalidColumn(format!(
                        "CNOT control and target coincide on qubit {control}"
                    )));
                }
                Ok(())
            }
            GateColumn::Toffoli { controls, target } => {
                in_range(*target)?;
                if controls.len() < 2 {
                    return Err(GenError::InvalidColumn(format!(
                        "Toffoli needs at least 2 controls, got {}",
                        controls.len()
                    )));
                }
                for (k, &c) in controls.iter().enumerate() {
                    in_range(c)?;
                    if c == *target || controls[..k].contains(&c) {
                        return Err(GenError::InvalidColumn(format!(
                            "Toffoli control {c} repeated or equal to target"
                        )));
                    }
                }
                Ok(())
            }
        }
    }
}

/// An ordered list of gate columns over a fixed register.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GateSequence {
    qubits: usize,
    columns: Vec<GateColumn>,
}

impl GateSequence {
    /// Create an empty sequence.
    pub fn new(qubits: usize) -> Self {
        Self {
            qubits,
            columns: Vec::new(),
        }
    }

    /// Append a column after validating it.
    pub fn push(&mut self, column: GateColumn) -> GenResult<()> {
        column.validate(self.qubits)?;
        self.columns.push(column);
        Ok(())
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits
    }

    /// The columns in circuit order.
    pub fn columns(&self) -> &[GateColumn] {
        &self.columns
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if there are no gates.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of columns of the given family.
    pub fn count(&self, kind: GateKind) -> usize {
        self.columns.iter().filter(|c| c.kind() == kind).count()
    }
}

/// Qubit-by-column grid, tab separated, `#` for idle qubits.
impl fmt::Display for GateSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid: Vec<Vec<Option<Role>>> =
            self.columns.iter().map(|c| c.roles(self.qubits)).collect();
        for q in 0..self.qubits {
            for column in &grid {
                write!(f, "{}\t", column[q].map_or("#", Role::tag))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_roundtrip() {
        let col = GateColumn::toffoli(vec![3, 0], 2);
        let roles = col.roles(4);
        assert_eq!(
            roles,
            vec![Some(Role::Control), None, Some(Role::Target), Some(Role::Control)]
        );
        assert_eq!(GateColumn::from_roles(&roles).unwrap(), col);
    }

    #[test]
    fn test_from_roles_rejects_mixed_columns() {
        let roles = vec![Some(Role::Not), Some(Role::Control), Some(Role::Target)];
        assert!(GateColumn::from_roles(&roles).is_err());

        let roles = vec![Some(Role::Control), None, Some(Role::Target)];
        assert!(GateColumn::from_roles(&roles).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(GateColumn::Cnot { control: 1, target: 1 }.validate(3).is_err());
        assert!(GateColumn::Not { qubit: 3 }.validate(3).is_err());
        assert!(GateColumn::toffoli(vec![0, 2], 2).validate(3).is_err());
        assert!(GateColumn::toffoli(vec![0, 1], 2).validate(3).is_ok());
    }

    #[test]
    fn test_grid_display() {
        let mut seq = GateSequence::new(3);
        seq.push(GateColumn::Not { qubit: 0 }).unwrap();
        seq.push(GateColumn::Cnot { control: 2, target: 1 }).unwrap();
        assert_eq!(seq.to_string(), "NOT\t#\t\n#\tX\t\n#\tZ\t\n");
    }
}
