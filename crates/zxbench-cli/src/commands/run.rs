//! Run command implementation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;
use zxbench_sched::{BenchConfig, Orchestrator, SUMMARY_FILE, TimeoutPolicy, task_grid};

/// Command-line values that override the loaded configuration.
#[derive(Debug, Default)]
pub struct Overrides {
    pub solver: Option<PathBuf>,
    pub workers: Option<usize>,
    pub timeout: Option<u64>,
    pub samples: Option<usize>,
    pub master_seed: Option<u64>,
    pub second_only_timeout: bool,
}

impl Overrides {
    fn apply(self, mut config: BenchConfig) -> BenchConfig {
        if let Some(v) = self.solver {
            config.solver = v;
        }
        if let Some(v) = self.workers {
            config.workers = v;
        }
        if let Some(v) = self.timeout {
            config.timeout_secs = v;
        }
        if let Some(v) = self.samples {
            config.samples = v;
        }
        if let Some(v) = self.master_seed {
            config.master_seed = Some(v);
        }
        if self.second_only_timeout {
            config.timeout_policy = TimeoutPolicy::SecondOnly;
        }
        config
    }
}

/// Execute the run command.
pub async fn execute(config_file: Option<&Path>, overrides: Overrides) -> Result<()> {
    let config = BenchConfig::load(config_file).context("Failed to load configuration")?;
    let config = overrides.apply(config);
    config.validate()?;

    if !config.solver.exists() {
        warn!("Solver {} does not exist; every run will fail", config.solver.display());
    }

    let tasks = task_grid(&config);
    println!(
        "{} Running {} tasks with {} workers ({}s timeout, {:?})",
        style("→").cyan().bold(),
        style(tasks.len()).green(),
        config.workers,
        config.timeout_secs,
        config.timeout_policy,
    );
    println!(
        "  Solver: {}\n  Diagrams: {}\n  Results: {}",
        style(config.solver.display()).yellow(),
        config.input_dir.display(),
        config.output_dir.display()
    );

    let output_dir = config.output_dir.clone();
    let orchestrator = Orchestrator::new(config);

    let bar = ProgressBar::new(tasks.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );
    bar.enable_steady_tick(Duration::from_millis(100));

    let run = orchestrator.run_tasks(tasks, |task, result| {
        bar.inc(1);
        match result {
            Ok(report) if report.without_sd.is_timed_out() || report.with_sd.is_timed_out() => {
                bar.set_message(format!("{task} (timeout)"));
            }
            Ok(_) => bar.set_message(task.to_string()),
            Err(e) => bar.println(format!("{} {task}: {e}", style("✗").red().bold())),
        }
    });

    let summary = tokio::select! {
        summary = run => summary?,
        _ = tokio::signal::ctrl_c() => {
            // Dropping the run kills every solver still in flight.
            bar.abandon_with_message("interrupted");
            anyhow::bail!("Interrupted; partial results are in {}", output_dir.display());
        }
    };
    bar.finish_and_clear();

    println!(
        "{} Finished in {:.2}s: {} completed, {} timed out, {} failed solver runs",
        style("✓").green().bold(),
        summary.elapsed_secs,
        style(summary.completed).green(),
        style(summary.timed_out).yellow(),
        style(summary.failed).red(),
    );
    if !summary.failed_tasks.is_empty() {
        println!(
            "  {} tasks produced no result file",
            style(summary.failed_tasks.len()).red()
        );
    }
    println!("  Summary: {}", output_dir.join(SUMMARY_FILE).display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply() {
        let overrides = Overrides {
            workers: Some(3),
            timeout: Some(9),
            second_only_timeout: true,
            ..Overrides::default()
        };
        let config = overrides.apply(BenchConfig::default());
        assert_eq!(config.workers, 3);
        assert_eq!(config.timeout_secs, 9);
        assert_eq!(config.timeout_policy, TimeoutPolicy::SecondOnly);
        assert_eq!(config.samples, 50);
    }

    #[test]
    fn test_empty_overrides_keep_config() {
        let config = Overrides::default().apply(BenchConfig::default());
        assert_eq!(config, BenchConfig::default());
    }
}
