use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use slither_gym_core::growth::GrowthTables;
use slither_gym_core::SessionConfig;
use slither_harness::config::apply_env_overrides;
use slither_harness::runner::{run_trace, write_observations, RunReport};
use slither_harness::trace::load_trace;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "slither-harness")]
#[command(about = "Offline replay harness for the slither observation pipeline")]
struct Cli {
    /// Session config JSON (growth tables plus optional cadence overrides).
    /// Without it a linear placeholder curve is used, which is fine for
    /// smoke runs but produces meaningless size scores.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay one trace and dump the emitted observation stream
    Replay {
        #[arg(long)]
        trace: PathBuf,
        /// Where to write the observation JSONL (defaults to stdout summary only)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Replay many traces in parallel and print per-trace reports
    Sweep {
        /// Trace files to replay
        traces: Vec<PathBuf>,
        #[arg(long)]
        jobs: Option<usize>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Replay { trace, output } => {
            let events = load_trace(&trace)?;
            let artifact = run_trace(&events, cfg);
            if let Some(path) = output {
                write_observations(&path, &artifact.records)?;
                tracing::info!(
                    records = artifact.records.len(),
                    path = %path.display(),
                    "wrote observation stream"
                );
            }
            println!("{}", serde_json::to_string_pretty(&artifact.report)?);
        }
        Commands::Sweep { traces, jobs } => {
            if traces.is_empty() {
                return Err(anyhow!("sweep requires at least one trace file"));
            }
            if let Some(jobs) = jobs {
                if jobs == 0 {
                    return Err(anyhow!("--jobs must be >= 1 when provided"));
                }
            }

            let run_one = |path: &PathBuf| -> Result<(String, RunReport)> {
                let events = load_trace(path)
                    .with_context(|| format!("sweep failed for {}", path.display()))?;
                let artifact = run_trace(&events, cfg.clone());
                Ok((path.display().to_string(), artifact.report))
            };

            let results: Vec<Result<(String, RunReport)>> = if let Some(jobs) = jobs {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(jobs)
                    .build()
                    .context("failed to build rayon threadpool")?;
                pool.install(|| traces.par_iter().map(run_one).collect())
            } else {
                traces.par_iter().map(run_one).collect()
            };

            let mut reports = Vec::with_capacity(results.len());
            for result in results {
                reports.push(result?);
            }
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<SessionConfig> {
    let mut cfg = match path {
        Some(path) => {
            let data = fs::read_to_string(path)
                .with_context(|| format!("failed reading config {}", path.display()))?;
            serde_json::from_str(&data)
                .with_context(|| format!("invalid session config {}", path.display()))?
        }
        None => {
            tracing::warn!("no --config given; using a linear placeholder growth curve");
            SessionConfig::with_reference_cadence(GrowthTables::linear(64))
        }
    };
    apply_env_overrides(&mut cfg);
    Ok(cfg)
}
