//! zxbench Benchmark Orchestrator
//!
//! Expands a parameter grid into tasks, builds one diagram file per task and
//! runs both modes of an external solver on it under a wall-clock timeout.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌─────────────────┐   ┌──────────────┐
//! │ BenchConfig  │──▶│  task_grid()    │──▶│ Orchestrator │
//! │ (YAML + env) │   │ TaskDescriptor* │   │ (N in flight)│
//! └──────────────┘   └─────────────────┘   └──────┬───────┘
//!                                                 │ per task
//!                     ┌───────────────────────────┼──────────────────┐
//!                     ▼                           ▼                  ▼
//!              <input_dir>/<stem>.txt     WITH_SD ║ WITHOUT_SD   <output_dir>/<stem>.txt
//!              (serialized diagram)       (concurrent, timed)    (stem + both outputs)
//! ```
//!
//! A timed-out solver is killed and recorded with a fixed `STOPPED` text;
//! nothing is retried.

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod solver;
pub mod task;

pub use config::{BenchConfig, ConfigError, TimeoutPolicy};
pub use error::{SchedError, SchedResult};
pub use orchestrator::{FailedTask, Orchestrator, RunSummary, SUMMARY_FILE, TaskReport};
pub use solver::{ProcessSolver, SolverMode, SolverOutcome, SolverRunner};
pub use task::{MAX_TASK_SEED, TaskDescriptor, build_task_diagram, task_grid};
