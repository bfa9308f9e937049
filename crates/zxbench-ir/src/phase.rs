//! Exact phases as rational multiples of π.

use std::fmt;
use std::ops::{Add, AddAssign, Neg};
use std::str::FromStr;

use num_rational::Rational64;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::error::IrError;

/// A phase `p·π`, stored as the exact rational `p` normalized into `[0, 2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Phase(Rational64);

impl Phase {
    /// Create the phase `numer/denom · π`.
    ///
    /// # Panics
    ///
    /// Panics if `denom` is zero.
    pub fn new(numer: i64, denom: i64) -> Self {
        Self::from_rational(Rational64::new(numer, denom))
    }

    /// Create a phase from a rational multiple of π.
    pub fn from_rational(r: Rational64) -> Self {
        let two = Rational64::from_integer(2);
        let mut r = r % two;
        if r < Rational64::zero() {
            r += two;
        }
        Phase(r)
    }

    /// The zero phase.
    pub fn zero() -> Self {
        Phase(Rational64::zero())
    }

    /// The half-turn `π`.
    pub fn pi() -> Self {
        Phase(Rational64::one())
    }

    /// The one-third turn `π/3` carried by resolved star gadgets.
    pub fn third() -> Self {
        Phase::new(1, 3)
    }

    /// The underlying rational coefficient of π.
    pub fn to_rational(self) -> Rational64 {
        self.0
    }

    /// Check whether the phase is zero.
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Check whether the phase is a multiple of `π/2`.
    pub fn is_clifford(self) -> bool {
        *self.0.denom() <= 2
    }

    /// The phase as a float multiple of π.
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(self) -> f64 {
        *self.0.numer() as f64 / *self.0.denom() as f64
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::zero()
    }
}

impl From<i64> for Phase {
    fn from(n: i64) -> Self {
        Phase::from_rational(Rational64::from_integer(n))
    }
}

impl From<Rational64> for Phase {
    fn from(r: Rational64) -> Self {
        Phase::from_rational(r)
    }
}

impl Add for Phase {
    type Output = Phase;

    fn add(self, rhs: Phase) -> Phase {
        Phase::from_rational(self.0 + rhs.0)
    }
}

impl AddAssign for Phase {
    fn add_assign(&mut self, rhs: Phase) {
        *self = *self + rhs;
    }
}

impl Neg for Phase {
    type Output = Phase;

    fn neg(self) -> Phase {
        Phase::from_rational(-self.0)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Phase {
    type Err = IrError;

    /// Parse `"n"` or `"n/d"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bad = || IrError::InvalidPhase(s.to_string());
        let r = match s.split_once('/') {
            Some((n, d)) => {
                let n: i64 = n.trim().parse().map_err(|_| bad())?;
                let d: i64 = d.trim().parse().map_err(|_| bad())?;
                if d == 0 {
                    return Err(bad());
                }
                Rational64::new(n, d)
            }
            None => Rational64::from_integer(s.parse().map_err(|_| bad())?),
        };
        Ok(Phase::from_rational(r))
    }
}
