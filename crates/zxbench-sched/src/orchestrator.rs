//! Benchmark orchestration.
//!
//! Each task builds and serializes its diagram, runs both solver modes
//! concurrently on the file, and writes one result file. Up to
//! `workers` tasks are in flight at once. Tasks share nothing but the
//! file system, and every task writes only files named after its own
//! descriptor.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::{BenchConfig, TimeoutPolicy};
use crate::error::{SchedError, SchedResult};
use crate::solver::{ProcessSolver, SolverMode, SolverOutcome, SolverRunner};
use crate::task::{TaskDescriptor, build_task_diagram, task_grid};

/// Name of the run summary written next to the result files.
pub const SUMMARY_FILE: &str = "summary.json";

/// Outcome of one finished task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskReport {
    pub task: TaskDescriptor,
    pub with_sd: SolverOutcome,
    pub without_sd: SolverOutcome,
    pub diagram_path: PathBuf,
    pub result_path: PathBuf,
    pub elapsed: Duration,
}

impl TaskReport {
    /// Both outcomes in result-file order.
    pub fn outcomes(&self) -> [(SolverMode, &SolverOutcome); 2] {
        [
            (SolverMode::WithSd, &self.with_sd),
            (SolverMode::WithoutSd, &self.without_sd),
        ]
    }
}

/// A task that could not produce a result file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedTask {
    pub task: TaskDescriptor,
    pub error: String,
}

/// Totals for a whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_secs: f64,
    pub tasks: usize,
    /// Solver invocations that exited on their own.
    pub completed: usize,
    /// Solver invocations killed by the timeout.
    pub timed_out: usize,
    /// Solver invocations that could not be run.
    pub failed: usize,
    pub failed_tasks: Vec<FailedTask>,
}

impl RunSummary {
    fn new(tasks: usize) -> Self {
        let now = Utc::now();
        Self {
            started_at: now,
            finished_at: now,
            elapsed_secs: 0.0,
            tasks,
            completed: 0,
            timed_out: 0,
            failed: 0,
            failed_tasks: Vec::new(),
        }
    }

    fn record(&mut self, report: &TaskReport) {
        for (_, outcome) in report.outcomes() {
            match outcome {
                SolverOutcome::Completed { .. } => self.completed += 1,
                SolverOutcome::TimedOut { .. } => self.timed_out += 1,
                SolverOutcome::Failed { .. } => self.failed += 1,
            }
        }
    }
}

/// Drives the benchmark grid through a solver.
pub struct Orchestrator {
    config: Arc<BenchConfig>,
    solver: Arc<dyn SolverRunner>,
}

impl Orchestrator {
    /// Orchestrator running `config.solver` as an external process.
    pub fn new(config: BenchConfig) -> Self {
        let solver = Arc::new(ProcessSolver::new(config.solver.clone()));
        Self::with_solver(config, solver)
    }

    /// Orchestrator using a custom solver runner.
    pub fn with_solver(config: BenchConfig, solver: Arc<dyn SolverRunner>) -> Self {
        Self {
            config: Arc::new(config),
            solver,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Per-mode timeouts under the configured policy.
    pub fn timeouts(&self) -> (Option<Duration>, Option<Duration>) {
        let limit = self.config.timeout();
        match self.config.timeout_policy {
            TimeoutPolicy::Symmetric => (Some(limit), Some(limit)),
            TimeoutPolicy::SecondOnly => (None, Some(limit)),
        }
    }

    /// Check that every grid point can be generated, before any work starts.
    pub fn check_grid(&self, tasks: &[TaskDescriptor]) -> SchedResult<()> {
        let mut seen = FxHashSet::default();
        for task in tasks {
            let key = (task.qubits, task.nots, task.cnots, task.toffolis);
            if seen.insert(key) {
                task.generator_config(&self.config).validate()?;
            }
        }
        Ok(())
    }

    async fn prepare_dirs(&self) -> SchedResult<()> {
        for dir in [&self.config.input_dir, &self.config.output_dir] {
            tokio::fs::create_dir_all(dir).await.map_err(|source| SchedError::Write {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Build and serialize the diagram for `task` into the input directory.
    pub async fn write_diagram(&self, task: &TaskDescriptor) -> SchedResult<PathBuf> {
        let config = Arc::clone(&self.config);
        let owned = *task;
        let dot = tokio::task::spawn_blocking(move || -> SchedResult<String> {
            let circuit = build_task_diagram(&owned, &config)?;
            debug!(
                task = %owned,
                vertices = circuit.diagram.num_vertices(),
                scalar = %circuit.diagram.scalar(),
                "Diagram built"
            );
            Ok(zxbench_dot::emit(&circuit.diagram).trim_end().to_string())
        })
        .await
        .map_err(|e| SchedError::Worker(e.to_string()))??;

        let path = task.file_in(&self.config.input_dir);
        write_file(&path, dot).await?;
        Ok(path)
    }

    /// Run one task end to end.
    pub async fn run_task(&self, task: TaskDescriptor) -> SchedResult<TaskReport> {
        let start = Instant::now();
        debug!(task = %task, "Task started");

        let diagram_path = self.write_diagram(&task).await?;
        let (with_limit, without_limit) = self.timeouts();
        let (with_sd, without_sd) = tokio::join!(
            self.solver.run(SolverMode::WithSd, &diagram_path, with_limit),
            self.solver.run(SolverMode::WithoutSd, &diagram_path, without_limit),
        );

        let record = format!(
            "{}\n{}{}",
            task.stem(),
            with_sd.record_text(SolverMode::WithSd),
            without_sd.record_text(SolverMode::WithoutSd)
        );
        let result_path = task.file_in(&self.config.output_dir);
        write_file(&result_path, record).await?;

        let elapsed = start.elapsed();
        debug!(task = %task, ?elapsed, "Task finished");
        Ok(TaskReport {
            task,
            with_sd,
            without_sd,
            diagram_path,
            result_path,
            elapsed,
        })
    }

    /// Record `err` as the outcome of both modes in the task's result file.
    async fn write_failure_record(&self, task: &TaskDescriptor, err: &SchedError) {
        let message = err.to_string();
        let record = format!(
            "{}\n{}{}",
            task.stem(),
            SolverMode::WithSd.failed_text(&message),
            SolverMode::WithoutSd.failed_text(&message)
        );
        let path = task.file_in(&self.config.output_dir);
        if let Err(e) = write_file(&path, record).await {
            warn!(task = %task, "Cannot record task failure: {e}");
        }
    }

    /// Run the configured grid.
    pub async fn run(&self) -> SchedResult<RunSummary> {
        let tasks = task_grid(&self.config);
        self.run_tasks(tasks, |_, _| {}).await
    }

    /// Run `tasks`, calling `on_done` as each one finishes.
    ///
    /// Per-task errors are logged, written to the task's result file and
    /// collected in the summary; they do not stop the other tasks. Nothing is
    /// retried.
    pub async fn run_tasks<F>(&self, tasks: Vec<TaskDescriptor>, mut on_done: F) -> SchedResult<RunSummary>
    where
        F: FnMut(&TaskDescriptor, &SchedResult<TaskReport>),
    {
        self.check_grid(&tasks)?;
        self.prepare_dirs().await?;

        let start = Instant::now();
        let mut summary = RunSummary::new(tasks.len());
        info!(
            tasks = tasks.len(),
            workers = self.config.workers,
            timeout_secs = self.config.timeout_secs,
            solver = %self.config.solver.display(),
            "Benchmark started"
        );

        let mut results = stream::iter(tasks)
            .map(|task| async move { (task, self.run_task(task).await) })
            .buffer_unordered(self.config.workers);

        while let Some((task, result)) = results.next().await {
            match &result {
                Ok(report) => summary.record(report),
                Err(e) => {
                    error!(task = %task, "Task failed: {e}");
                    self.write_failure_record(&task, e).await;
                    summary.failed_tasks.push(FailedTask {
                        task,
                        error: e.to_string(),
                    });
                }
            }
            on_done(&task, &result);
        }

        summary.finished_at = Utc::now();
        summary.elapsed_secs = start.elapsed().as_secs_f64();
        info!(
            elapsed_secs = summary.elapsed_secs,
            completed = summary.completed,
            timed_out = summary.timed_out,
            failed = summary.failed,
            failed_tasks = summary.failed_tasks.len(),
            "Benchmark finished"
        );

        let json = serde_json::to_string_pretty(&summary)?;
        write_file(&self.config.output_dir.join(SUMMARY_FILE), json).await?;
        Ok(summary)
    }
}

async fn write_file(path: &Path, contents: String) -> SchedResult<()> {
    let to_error = |source| SchedError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(to_error)?;
    }
    tokio::fs::write(path, contents).await.map_err(to_error)?;
    debug!(path = %path.display(), "Wrote file");
    Ok(())
}
