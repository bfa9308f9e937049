//! Orchestrator runs against stand-in solvers.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use zxbench_sched::{
    BenchConfig, Orchestrator, SUMMARY_FILE, SolverMode, SolverOutcome, SolverRunner,
    TaskDescriptor, TimeoutPolicy,
};

fn config_in(dir: &Path) -> BenchConfig {
    BenchConfig {
        qubits: vec![8],
        nots: vec![2],
        cnots: vec![2],
        toffolis: vec![1],
        samples: 1,
        workers: 2,
        timeout_secs: 1,
        input_dir: dir.join("dot"),
        output_dir: dir.join("out"),
        master_seed: Some(17),
        ..BenchConfig::default()
    }
}

fn task() -> TaskDescriptor {
    TaskDescriptor {
        qubits: 8,
        nots: 2,
        cnots: 2,
        toffolis: 1,
        seed: 4242,
    }
}

/// Records calls and answers with fixed text per mode.
#[derive(Default)]
struct EchoSolver {
    calls: Mutex<Vec<(SolverMode, PathBuf, Option<Duration>)>>,
}

#[async_trait]
impl SolverRunner for EchoSolver {
    async fn run(&self, mode: SolverMode, diagram: &Path, timeout: Option<Duration>) -> SolverOutcome {
        self.calls
            .lock()
            .unwrap()
            .push((mode, diagram.to_path_buf(), timeout));
        let label = mode.label();
        SolverOutcome::Completed {
            stdout: format!("{label} NUM OF TERMS: 3\n{label} RUNTIME: 0.1\n"),
            exit_code: Some(0),
            elapsed: Duration::from_millis(1),
        }
    }
}

#[tokio::test]
async fn writes_diagram_and_result_files() {
    let dir = tempfile::tempdir().unwrap();
    let solver = Arc::new(EchoSolver::default());
    let orch = Orchestrator::with_solver(config_in(dir.path()), solver.clone());

    let summary = orch.run_tasks(vec![task()], |_, _| {}).await.unwrap();
    assert_eq!(summary.tasks, 1);
    assert_eq!(summary.completed, 2);
    assert_eq!(summary.timed_out, 0);
    assert!(summary.failed_tasks.is_empty());

    let dot_path = dir.path().join("dot/8_2_2_1_4242.txt");
    let dot = std::fs::read_to_string(&dot_path).unwrap();
    assert!(dot.starts_with("graph {"));
    assert!(dot.ends_with('}'));
    zxbench_dot::parse(&dot).unwrap();

    let result = std::fs::read_to_string(dir.path().join("out/8_2_2_1_4242.txt")).unwrap();
    assert_eq!(
        result,
        "8_2_2_1_4242\n\
         QUIZX_WITH NUM OF TERMS: 3\nQUIZX_WITH RUNTIME: 0.1\n\
         QUIZX_WITHOUT NUM OF TERMS: 3\nQUIZX_WITHOUT RUNTIME: 0.1\n"
    );

    let calls = solver.calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|(_, path, limit)| *path == dot_path && *limit == Some(Duration::from_secs(1))));

    assert!(dir.path().join("out").join(SUMMARY_FILE).exists());
}

#[tokio::test]
async fn second_only_policy_leaves_first_unbounded() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.timeout_policy = TimeoutPolicy::SecondOnly;
    let solver = Arc::new(EchoSolver::default());
    let orch = Orchestrator::with_solver(config, solver.clone());

    orch.run_task(task()).await.unwrap();
    let calls = solver.calls.lock().unwrap();
    for (mode, _, limit) in calls.iter() {
        match mode {
            SolverMode::WithSd => assert_eq!(*limit, None),
            SolverMode::WithoutSd => assert_eq!(*limit, Some(Duration::from_secs(1))),
        }
    }
}

#[tokio::test]
async fn grid_run_reports_every_task() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.samples = 3;
    config.toffolis = vec![1, 2];
    let orch = Orchestrator::with_solver(config, Arc::new(EchoSolver::default()));

    let mut seen = Vec::new();
    let tasks = zxbench_sched::task_grid(orch.config());
    let summary = orch
        .run_tasks(tasks.clone(), |task, result| {
            assert!(result.is_ok());
            seen.push(*task);
        })
        .await
        .unwrap();

    assert_eq!(summary.tasks, 6);
    assert_eq!(summary.completed, 12);
    assert_eq!(seen.len(), 6);
    for task in &tasks {
        assert!(task.file_in(&dir.path().join("out")).exists());
    }
}

#[tokio::test]
async fn unplaceable_grid_is_rejected_up_front() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    // 3 qubits leave no Toffoli target range at 15%
    config.qubits = vec![3];
    let orch = Orchestrator::with_solver(config, Arc::new(EchoSolver::default()));
    let tasks = zxbench_sched::task_grid(orch.config());

    assert!(orch.run_tasks(tasks, |_, _| {}).await.is_err());
    assert!(!dir.path().join("out").exists());
}

#[tokio::test]
async fn failed_task_still_writes_result_record() {
    let dir = tempfile::tempdir().unwrap();
    // a directory where the diagram file should go makes the write fail
    std::fs::create_dir_all(dir.path().join("dot/8_2_2_1_4242.txt")).unwrap();
    let solver = Arc::new(EchoSolver::default());
    let orch = Orchestrator::with_solver(config_in(dir.path()), solver.clone());

    let summary = orch
        .run_tasks(vec![task()], |_, result| assert!(result.is_err()))
        .await
        .unwrap();
    assert_eq!(summary.failed_tasks.len(), 1);
    assert_eq!(summary.completed, 0);
    assert!(solver.calls.lock().unwrap().is_empty());

    let result = std::fs::read_to_string(dir.path().join("out/8_2_2_1_4242.txt")).unwrap();
    let lines: Vec<&str> = result.lines().collect();
    assert_eq!(lines[0], "8_2_2_1_4242");
    assert_eq!(lines[1], "QUIZX_WITH NUM OF TERMS: NONE");
    assert!(lines[2].starts_with("QUIZX_WITH RUNTIME: FAILED ("));
    assert_eq!(lines[4], "QUIZX_WITHOUT NUM OF TERMS: NONE");
    assert!(lines[5].starts_with("QUIZX_WITHOUT RUNTIME: FAILED ("));
    assert!(result.ends_with(")\n\n"));
}

#[cfg(unix)]
mod process {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Shell stand-in: hangs when called with `hang_flag`, answers at once
    /// otherwise.
    fn write_script(dir: &Path, hang_flag: &str) -> PathBuf {
        let path = dir.join("solver.sh");
        let script = format!(
            "#!/bin/sh\n\
             if [ \"$1\" = \"{hang_flag}\" ]; then\n\
             \x20 exec sleep 30\n\
             fi\n\
             if [ \"$1\" = \"WITH_SD\" ]; then\n\
             \x20 label=QUIZX_WITH\n\
             else\n\
             \x20 label=QUIZX_WITHOUT\n\
             fi\n\
             echo \"$label NUM OF TERMS: 7\"\n\
             echo \"$label RUNTIME: 0.01\"\n"
        );
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn slow_second_solver_is_stopped() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.solver = write_script(dir.path(), "WITHOUT_SD");
        let orch = Orchestrator::new(config);

        let report = orch.run_task(task()).await.unwrap();
        assert!(report.with_sd.is_completed());
        assert!(report.without_sd.is_timed_out());

        let result = std::fs::read_to_string(&report.result_path).unwrap();
        assert_eq!(
            result,
            "8_2_2_1_4242\n\
             QUIZX_WITH NUM OF TERMS: 7\nQUIZX_WITH RUNTIME: 0.01\n\
             QUIZX_WITHOUT NUM OF TERMS: NONE\nQUIZX_WITHOUT RUNTIME: STOPPED\n\n"
        );
    }

    #[tokio::test]
    async fn slow_first_solver_is_stopped() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.solver = write_script(dir.path(), "WITH_SD");
        let orch = Orchestrator::new(config);

        let report = orch.run_task(task()).await.unwrap();
        assert!(report.with_sd.is_timed_out());
        assert!(report.without_sd.is_completed());

        let result = std::fs::read_to_string(&report.result_path).unwrap();
        assert_eq!(
            result,
            "8_2_2_1_4242\n\
             QUIZX_WITH NUM OF TERMS: NONE\nQUIZX_WITH RUNTIME: STOPPED\n\n\
             QUIZX_WITHOUT NUM OF TERMS: 7\nQUIZX_WITHOUT RUNTIME: 0.01\n"
        );
    }
}
