//! Exact global scalar carried by a diagram.

use std::f64::consts::{PI, SQRT_2};
use std::fmt;
use std::ops::{Mul, MulAssign};

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::phase::Phase;

/// The scalar `√2^power_sqrt2 · e^(iπ·phase)`.
///
/// Every rewrite that does not preserve the denoted linear map multiplies
/// this factor so the diagram stays exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Scalar {
    power_sqrt2: i32,
    phase: Phase,
}

impl Scalar {
    /// The unit scalar.
    pub fn one() -> Self {
        Self::default()
    }

    /// Create `√2^power_sqrt2 · e^(iπ·phase)`.
    pub fn new(power_sqrt2: i32, phase: Phase) -> Self {
        Self { power_sqrt2, phase }
    }

    /// Exponent of √2.
    pub fn power_sqrt2(&self) -> i32 {
        self.power_sqrt2
    }

    /// Phase factor as a multiple of π.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Multiply by `√2^k`.
    pub fn mul_sqrt2_pow(&mut self, k: i32) {
        self.power_sqrt2 += k;
    }

    /// Multiply by `e^(iπ·p)`.
    pub fn mul_phase(&mut self, p: Phase) {
        self.phase += p;
    }

    /// Check whether this is exactly one.
    pub fn is_one(&self) -> bool {
        self.power_sqrt2 == 0 && self.phase.is_zero()
    }

    /// Floating-point approximation.
    pub fn to_number(&self) -> Complex64 {
        let magnitude = SQRT_2.powi(self.power_sqrt2);
        Complex64::from_polar(magnitude, PI * self.phase.to_f64())
    }
}

impl Mul for Scalar {
    type Output = Scalar;

    fn mul(self, rhs: Scalar) -> Scalar {
        Scalar {
            power_sqrt2: self.power_sqrt2 + rhs.power_sqrt2,
            phase: self.phase + rhs.phase,
        }
    }
}

impl MulAssign for Scalar {
    fn mul_assign(&mut self, rhs: Scalar) {
        *self = *self * rhs;
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.to_number();
        write!(f, "√2^{}", self.power_sqrt2)?;
        if !self.phase.is_zero() {
            write!(f, "·e^(iπ·{})", self.phase)?;
        }
        write!(f, " ≈ {:.6}{:+.6}i", n.re, n.im)
    }
}
