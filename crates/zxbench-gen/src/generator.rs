//! Seeded random circuit generation.

use std::ops::Range;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GenError, GenResult};
use crate::gate::{GateColumn, GateKind, GateSequence};

/// Parameters for one random circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Register width.
    pub qubits: usize,
    /// Number of NOT columns.
    pub nots: usize,
    /// Number of CNOT columns.
    pub cnots: usize,
    /// Number of Toffoli columns.
    pub toffolis: usize,
    /// Qubits eligible as Toffoli targets.
    pub target_range: Range<usize>,
    /// Let NOT gates land inside the target range.
    pub allow_not_in_target_range: bool,
    /// Let CNOT qubits land inside the target range.
    pub allow_cnot_in_target_range: bool,
    /// Draw Toffoli controls from the whole register minus the target.
    pub allow_ctrl_in_target_range: bool,
    /// Seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    /// Benchmark layout: the last `floor(fraction * qubits)` qubits form the
    /// target range and every placement flag is off.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn for_benchmark(
        qubits: usize,
        nots: usize,
        cnots: usize,
        toffolis: usize,
        target_fraction: f64,
        seed: Option<u64>,
    ) -> Self {
        let reserved = (target_fraction * qubits as f64).floor() as usize;
        Self {
            qubits,
            nots,
            cnots,
            toffolis,
            target_range: qubits.saturating_sub(reserved)..qubits,
            allow_not_in_target_range: false,
            allow_cnot_in_target_range: false,
            allow_ctrl_in_target_range: false,
            seed,
        }
    }

    fn in_range(&self, q: usize) -> bool {
        self.target_range.contains(&q)
    }

    fn outside_range(&self) -> Vec<usize> {
        (0..self.qubits).filter(|&q| !self.in_range(q)).collect()
    }

    fn not_pool(&self) -> Vec<usize> {
        if self.allow_not_in_target_range {
            (0..self.qubits).collect()
        } else {
            self.outside_range()
        }
    }

    fn cnot_pool(&self) -> Vec<usize> {
        if self.allow_cnot_in_target_range {
            (0..self.qubits).collect()
        } else {
            self.outside_range()
        }
    }

    fn control_pool(&self, target: usize) -> Vec<usize> {
        if self.allow_ctrl_in_target_range {
            (0..self.qubits).filter(|&q| q != target).collect()
        } else {
            self.outside_range()
        }
    }

    /// Check that every requested gate can be placed.
    ///
    /// Pools depend only on the configuration, so a config that validates
    /// never fails halfway through generation.
    pub fn validate(&self) -> GenResult<()> {
        let range = &self.target_range;
        if range.start > range.end || range.end > self.qubits {
            return Err(GenError::InvalidTargetRange {
                start: range.start,
                end: range.end,
                qubits: self.qubits,
            });
        }

        let check = |gate, role, needed, available: usize| {
            if available < needed {
                Err(GenError::PoolTooSmall {
                    gate,
                    role,
                    needed,
                    available,
                })
            } else {
                Ok(())
            }
        };

        if self.nots > 0 {
            check(GateKind::Not, "NOT", 1, self.not_pool().len())?;
        }
        if self.cnots > 0 {
            check(GateKind::Cnot, "CNOT", 2, self.cnot_pool().len())?;
        }
        if self.toffolis > 0 {
            check(GateKind::Toffoli, "target", 1, range.len())?;
            // Smallest pool over all eligible targets.
            let controls = range
                .clone()
                .map(|t| self.control_pool(t).len())
                .min()
                .unwrap_or(0);
            check(GateKind::Toffoli, "control", 2, controls)?;
        }
        Ok(())
    }
}

/// Generate a random gate sequence.
///
/// Gate tokens are shuffled uniformly, then each token is given a random
/// footprint. Identical configs with a fixed seed give identical sequences.
pub fn generate(config: &GeneratorConfig) -> GenResult<GateSequence> {
    config.validate()?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut tokens: Vec<GateKind> = std::iter::repeat_n(GateKind::Not, config.nots)
        .chain(std::iter::repeat_n(GateKind::Cnot, config.cnots))
        .chain(std::iter::repeat_n(GateKind::Toffoli, config.toffolis))
        .collect();
    tokens.shuffle(&mut rng);

    let mut seq = GateSequence::new(config.qubits);
    for kind in tokens {
        let column = match kind {
            GateKind::Not => random_not(config, &mut rng),
            GateKind::Cnot => random_cnot(config, &mut rng),
            GateKind::Toffoli => random_toffoli(config, &mut rng),
        }?;
        seq.push(column)?;
    }

    debug!(
        qubits = config.qubits,
        columns = seq.len(),
        seed = ?config.seed,
        "Generated gate sequence"
    );
    Ok(seq)
}

fn pick<R: Rng>(pool: &[usize], rng: &mut R, gate: GateKind, role: &'static str) -> GenResult<usize> {
    pool.choose(rng).copied().ok_or(GenError::PoolTooSmall {
        gate,
        role,
        needed: 1,
        available: 0,
    })
}

fn random_not<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> GenResult<GateColumn> {
    let qubit = pick(&config.not_pool(), rng, GateKind::Not, "NOT")?;
    Ok(GateColumn::Not { qubit })
}

fn random_cnot<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> GenResult<GateColumn> {
    let mut pool = config.cnot_pool();
    let control = pick(&pool, rng, GateKind::Cnot, "Z")?;
    pool.retain(|&q| q != control);
    let target = pick(&pool, rng, GateKind::Cnot, "X")?;
    Ok(GateColumn::Cnot { control, target })
}

fn random_toffoli<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> GenResult<GateColumn> {
    let targets: Vec<usize> = config.target_range.clone().collect();
    let target = pick(&targets, rng, GateKind::Toffoli, "target")?;

    let pool = config.control_pool(target);
    if pool.len() < 2 {
        return Err(GenError::PoolTooSmall {
            gate: GateKind::Toffoli,
            role: "control",
            needed: 2,
            available: pool.len(),
        });
    }
    let count = rng.gen_range(2..=pool.len());
    let controls: Vec<usize> = pool.choose_multiple(rng, count).copied().collect();
    Ok(GateColumn::toffoli(controls, target))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: u64) -> GeneratorConfig {
        GeneratorConfig::for_benchmark(20, 5, 5, 5, 0.15, Some(seed))
    }

    #[test]
    fn test_benchmark_layout() {
        let c = GeneratorConfig::for_benchmark(20, 0, 0, 1, 0.15, None);
        assert_eq!(c.target_range, 17..20);
        let c = GeneratorConfig::for_benchmark(50, 0, 0, 1, 0.15, None);
        assert_eq!(c.target_range, 43..50);
    }

    #[test]
    fn test_counts() {
        let seq = generate(&config(7)).unwrap();
        assert_eq!(seq.len(), 15);
        assert_eq!(seq.count(GateKind::Not), 5);
        assert_eq!(seq.count(GateKind::Cnot), 5);
        assert_eq!(seq.count(GateKind::Toffoli), 5);
    }

    #[test]
    fn test_seeded_is_deterministic() {
        assert_eq!(generate(&config(42)).unwrap(), generate(&config(42)).unwrap());
    }

    #[test]
    fn test_empty_target_range_rejected() {
        let c = GeneratorConfig::for_benchmark(4, 0, 0, 1, 0.15, Some(1));
        assert!(c.target_range.is_empty());
        assert!(matches!(
            generate(&c),
            Err(GenError::PoolTooSmall { role: "target", .. })
        ));
    }

    #[test]
    fn test_small_control_pool_rejected() {
        let mut c = GeneratorConfig::for_benchmark(3, 0, 0, 1, 0.15, Some(1));
        c.target_range = 1..3;
        assert!(matches!(
            generate(&c),
            Err(GenError::PoolTooSmall { role: "control", available: 1, .. })
        ));

        c.allow_ctrl_in_target_range = true;
        assert!(generate(&c).is_ok());
    }

    #[test]
    fn test_range_outside_register_rejected() {
        let mut c = config(1);
        c.target_range = 18..25;
        assert!(matches!(generate(&c), Err(GenError::InvalidTargetRange { .. })));
    }

    #[test]
    fn test_no_gates() {
        let c = GeneratorConfig::for_benchmark(3, 0, 0, 0, 0.15, Some(3));
        assert!(generate(&c).unwrap().is_empty());
    }
}
