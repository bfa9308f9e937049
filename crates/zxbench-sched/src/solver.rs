//! External solver invocations.
//!
//! A solver is run as `<program> <MODE> <diagram-file>`. Its standard
//! output is recorded verbatim; the orchestrator never inspects it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::{debug, warn};

/// The two algorithmic variants of the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolverMode {
    /// Spider decomposition plus the star (triangle) decomposition.
    WithSd,
    /// Spider decomposition only.
    WithoutSd,
}

impl SolverMode {
    /// Both modes, in result-file order.
    pub const ALL: [SolverMode; 2] = [SolverMode::WithSd, SolverMode::WithoutSd];

    /// Command-line flag passed to the solver.
    pub fn flag(self) -> &'static str {
        match self {
            SolverMode::WithSd => "WITH_SD",
            SolverMode::WithoutSd => "WITHOUT_SD",
        }
    }

    /// Line prefix the solver uses for this mode.
    pub fn label(self) -> &'static str {
        match self {
            SolverMode::WithSd => "QUIZX_WITH",
            SolverMode::WithoutSd => "QUIZX_WITHOUT",
        }
    }

    /// Text recorded when the invocation is stopped by the timeout.
    pub fn stopped_text(self) -> String {
        let label = self.label();
        format!("{label} NUM OF TERMS: NONE\n{label} RUNTIME: STOPPED\n\n")
    }

    /// Text recorded when the solver could not be run at all.
    pub fn failed_text(self, message: &str) -> String {
        let label = self.label();
        format!("{label} NUM OF TERMS: NONE\n{label} RUNTIME: FAILED ({message})\n\n")
    }
}

impl fmt::Display for SolverMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag())
    }
}

/// What happened to one solver invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverOutcome {
    /// The process exited on its own. A non-zero status is still a
    /// completion; whatever it printed is kept.
    Completed {
        stdout: String,
        exit_code: Option<i32>,
        elapsed: Duration,
    },
    /// The process was killed after exceeding the timeout.
    TimedOut { limit: Duration },
    /// The process could not be started or its output could not be read.
    Failed { message: String },
}

impl SolverOutcome {
    /// Text written to the result file for this outcome.
    pub fn record_text(&self, mode: SolverMode) -> String {
        match self {
            SolverOutcome::Completed { stdout, .. } => stdout.clone(),
            SolverOutcome::TimedOut { .. } => mode.stopped_text(),
            SolverOutcome::Failed { message } => mode.failed_text(message),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, SolverOutcome::Completed { .. })
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self, SolverOutcome::TimedOut { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SolverOutcome::Failed { .. })
    }
}

/// Something that can run a solver on a diagram file.
#[async_trait]
pub trait SolverRunner: Send + Sync {
    /// Run `mode` on `diagram`, killing it after `timeout` if one is given.
    ///
    /// Never errors: every failure is folded into the outcome.
    async fn run(&self, mode: SolverMode, diagram: &Path, timeout: Option<Duration>) -> SolverOutcome;
}

/// Runs an external executable.
#[derive(Debug, Clone)]
pub struct ProcessSolver {
    program: PathBuf,
}

impl ProcessSolver {
    /// Create a runner for `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The executable path.
    pub fn program(&self) -> &Path {
        &self.program
    }
}

#[async_trait]
impl SolverRunner for ProcessSolver {
    async fn run(&self, mode: SolverMode, diagram: &Path, timeout: Option<Duration>) -> SolverOutcome {
        let start = Instant::now();
        let child = Command::new(&self.program)
            .arg(mode.flag())
            .arg(diagram)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(child) => child,
            Err(e) => {
                warn!(program = %self.program.display(), %mode, "Cannot start solver: {e}");
                return SolverOutcome::Failed {
                    message: e.to_string(),
                };
            }
        };

        // Dropping the wait future drops the child, which kills it.
        let waited = match timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
                Ok(waited) => waited,
                Err(_) => {
                    warn!(diagram = %diagram.display(), %mode, "Solver stopped after {limit:?}");
                    return SolverOutcome::TimedOut { limit };
                }
            },
            None => child.wait_with_output().await,
        };

        match waited {
            Ok(output) => {
                let elapsed = start.elapsed();
                if !output.status.success() {
                    warn!(
                        diagram = %diagram.display(),
                        %mode,
                        status = ?output.status.code(),
                        stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                        "Solver exited with failure"
                    );
                }
                debug!(diagram = %diagram.display(), %mode, ?elapsed, "Solver finished");
                SolverOutcome::Completed {
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    exit_code: output.status.code(),
                    elapsed,
                }
            }
            Err(e) => SolverOutcome::Failed {
                message: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_text() {
        assert_eq!(
            SolverMode::WithSd.stopped_text(),
            "QUIZX_WITH NUM OF TERMS: NONE\nQUIZX_WITH RUNTIME: STOPPED\n\n"
        );
        assert_eq!(
            SolverMode::WithoutSd.stopped_text(),
            "QUIZX_WITHOUT NUM OF TERMS: NONE\nQUIZX_WITHOUT RUNTIME: STOPPED\n\n"
        );
    }

    #[test]
    fn test_record_text() {
        let done = SolverOutcome::Completed {
            stdout: "terms: 4\n".into(),
            exit_code: Some(0),
            elapsed: Duration::from_millis(5),
        };
        assert_eq!(done.record_text(SolverMode::WithSd), "terms: 4\n");

        let stopped = SolverOutcome::TimedOut {
            limit: Duration::from_secs(1),
        };
        assert!(stopped.record_text(SolverMode::WithoutSd).contains("STOPPED"));

        let failed = SolverOutcome::Failed {
            message: "no such file".into(),
        };
        let text = failed.record_text(SolverMode::WithSd);
        assert!(text.contains("NONE") && text.contains("no such file"));
    }

    #[tokio::test]
    async fn test_missing_program_fails() {
        let solver = ProcessSolver::new("/nonexistent/zxbench-solver");
        let outcome = solver
            .run(SolverMode::WithSd, Path::new("x.txt"), Some(Duration::from_secs(1)))
            .await;
        assert!(outcome.is_failed());
    }
}
