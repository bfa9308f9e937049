//! Task descriptors and the benchmark grid.

use std::fmt;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use zxbench_gen::{BenchmarkCircuit, GeneratorConfig, benchmark_diagram};

use crate::config::BenchConfig;
use crate::error::SchedResult;

/// Largest per-task seed drawn by the grid.
pub const MAX_TASK_SEED: u64 = 100_000_000;

/// One benchmark task. Fully determines its random circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskDescriptor {
    pub qubits: usize,
    pub nots: usize,
    pub cnots: usize,
    pub toffolis: usize,
    pub seed: u64,
}

impl TaskDescriptor {
    /// File stem shared by the diagram and result files.
    pub fn stem(&self) -> String {
        format!(
            "{}_{}_{}_{}_{}",
            self.qubits, self.nots, self.cnots, self.toffolis, self.seed
        )
    }

    /// `<dir>/<stem>.txt`; used for both the diagram and the result file.
    pub fn file_in(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.txt", self.stem()))
    }

    /// Generator settings for this task under `config`'s placement rules.
    pub fn generator_config(&self, config: &BenchConfig) -> GeneratorConfig {
        let mut gen_config = GeneratorConfig::for_benchmark(
            self.qubits,
            self.nots,
            self.cnots,
            self.toffolis,
            config.target_fraction,
            Some(self.seed),
        );
        gen_config.allow_not_in_target_range = config.allow_not_in_target_range;
        gen_config.allow_cnot_in_target_range = config.allow_cnot_in_target_range;
        gen_config.allow_ctrl_in_target_range = config.allow_ctrl_in_target_range;
        gen_config
    }
}

impl fmt::Display for TaskDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stem())
    }
}

/// Expand the full grid, qubits outermost and samples innermost.
///
/// Each task seed is drawn from `1..=MAX_TASK_SEED` by a master RNG seeded
/// from `config.master_seed`, or from OS entropy when unset.
pub fn task_grid(config: &BenchConfig) -> Vec<TaskDescriptor> {
    let mut rng = match config.master_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut tasks = Vec::with_capacity(config.num_tasks());
    for &qubits in &config.qubits {
        for &nots in &config.nots {
            for &cnots in &config.cnots {
                for &toffolis in &config.toffolis {
                    for _ in 0..config.samples {
                        tasks.push(TaskDescriptor {
                            qubits,
                            nots,
                            cnots,
                            toffolis,
                            seed: rng.gen_range(1..=MAX_TASK_SEED),
                        });
                    }
                }
            }
        }
    }
    tasks
}

/// Generate, build, project and resolve the diagram for one task.
pub fn build_task_diagram(task: &TaskDescriptor, config: &BenchConfig) -> SchedResult<BenchmarkCircuit> {
    Ok(benchmark_diagram(&task.generator_config(config))?)
}
