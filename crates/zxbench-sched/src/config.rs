//! Benchmark configuration.
//!
//! Values come from, lowest to highest precedence:
//! 1. Built-in defaults (the published benchmark grid)
//! 2. A YAML file
//! 3. `ZXBENCH_*` environment variables
//!
//! Command-line flags are applied on top by the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// How the two solver invocations of a task are bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeoutPolicy {
    /// Both invocations get the same timeout and the same kill path.
    #[default]
    Symmetric,
    /// Only the second (`WITHOUT_SD`) invocation is bounded; the first runs
    /// until it exits on its own.
    SecondOnly,
}

/// Full benchmark run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Register widths to sweep.
    #[serde(default = "default_qubits")]
    pub qubits: Vec<usize>,

    /// NOT counts to sweep.
    #[serde(default = "default_gate_counts")]
    pub nots: Vec<usize>,

    /// CNOT counts to sweep.
    #[serde(default = "default_gate_counts")]
    pub cnots: Vec<usize>,

    /// Toffoli counts to sweep.
    #[serde(default = "default_toffolis")]
    pub toffolis: Vec<usize>,

    /// Random circuits per grid point.
    #[serde(default = "default_samples")]
    pub samples: usize,

    /// Tasks in flight at once.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Wall-clock limit per solver invocation, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Which invocations the timeout applies to.
    #[serde(default)]
    pub timeout_policy: TimeoutPolicy,

    /// Solver executable.
    #[serde(default = "default_solver")]
    pub solver: PathBuf,

    /// Directory for serialized diagrams.
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// Directory for result files.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Share of the register, taken from the top, reserved for Toffoli targets.
    #[serde(default = "default_target_fraction")]
    pub target_fraction: f64,

    #[serde(default)]
    pub allow_not_in_target_range: bool,

    #[serde(default)]
    pub allow_cnot_in_target_range: bool,

    #[serde(default)]
    pub allow_ctrl_in_target_range: bool,

    /// Seed for drawing per-task seeds; unset means OS entropy.
    #[serde(default)]
    pub master_seed: Option<u64>,
}

fn default_qubits() -> Vec<usize> {
    vec![20, 50, 80]
}

fn default_gate_counts() -> Vec<usize> {
    vec![0, 20, 80, 240]
}

fn default_toffolis() -> Vec<usize> {
    vec![20, 40, 60, 80]
}

fn default_samples() -> usize {
    50
}

fn default_workers() -> usize {
    12
}

fn default_timeout_secs() -> u64 {
    180
}

fn default_solver() -> PathBuf {
    PathBuf::from("./target/release/main")
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("benchmark_dot_repr")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("benchmark_output")
}

fn default_target_fraction() -> f64 {
    0.15
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            qubits: default_qubits(),
            nots: default_gate_counts(),
            cnots: default_gate_counts(),
            toffolis: default_toffolis(),
            samples: default_samples(),
            workers: default_workers(),
            timeout_secs: default_timeout_secs(),
            timeout_policy: TimeoutPolicy::default(),
            solver: default_solver(),
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            target_fraction: default_target_fraction(),
            allow_not_in_target_range: false,
            allow_cnot_in_target_range: false,
            allow_ctrl_in_target_range: false,
            master_seed: None,
        }
    }
}

impl BenchConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from YAML text. Missing fields take defaults.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: BenchConfig =
            serde_yaml_ng::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml_ng::to_string(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Defaults or file, then environment overrides, then validation.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Apply `ZXBENCH_*` variables from the process environment.
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Unparseable numeric values are ignored with a warning.
    pub fn merge_vars<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parsed<T: std::str::FromStr>(key: &str, value: Option<String>) -> Option<T> {
            let value = value?;
            match value.parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!("Ignoring {key}={value}: not a number");
                    None
                }
            }
        }

        if let Some(v) = lookup("ZXBENCH_SOLVER") {
            self.solver = PathBuf::from(v);
        }
        if let Some(v) = parsed("ZXBENCH_TIMEOUT_SECS", lookup("ZXBENCH_TIMEOUT_SECS")) {
            self.timeout_secs = v;
        }
        if let Some(v) = parsed("ZXBENCH_WORKERS", lookup("ZXBENCH_WORKERS")) {
            self.workers = v;
        }
        if let Some(v) = lookup("ZXBENCH_INPUT_DIR") {
            self.input_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("ZXBENCH_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(v);
        }
        if let Some(v) = parsed("ZXBENCH_MASTER_SEED", lookup("ZXBENCH_MASTER_SEED")) {
            self.master_seed = Some(v);
        }
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::ValidationError(
                "workers must be greater than 0".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.samples == 0 {
            return Err(ConfigError::ValidationError(
                "samples must be greater than 0".to_string(),
            ));
        }
        for (name, grid) in [
            ("qubits", &self.qubits),
            ("nots", &self.nots),
            ("cnots", &self.cnots),
            ("toffolis", &self.toffolis),
        ] {
            if grid.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "{name} grid must not be empty"
                )));
            }
        }
        if !(self.target_fraction > 0.0 && self.target_fraction < 1.0) {
            return Err(ConfigError::ValidationError(format!(
                "target_fraction must lie in (0, 1), got {}",
                self.target_fraction
            )));
        }
        Ok(())
    }

    /// Per-invocation timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Number of tasks the grid expands to.
    pub fn num_tasks(&self) -> usize {
        self.qubits.len() * self.nots.len() * self.cnots.len() * self.toffolis.len() * self.samples
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
