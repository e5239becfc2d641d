//! Minimises X² over [-5, 5] with four annealers, one per quarter of the
//! interval, sharing a single worker pool.
//!
//! Worker count and completion log come from `ANNEALPOOL_WORKERS` and
//! `ANNEALPOOL_LOG`; verbosity from `RUST_LOG`.

use std::sync::Arc;

use anyhow::Context;
use ap_engine::{fn_evaluator, Evaluator, Scheduler, SchedulerConfig};
use ap_optimizer::{AnnealingConfig, AnnealingStrategy};
use ap_types::{BoundarySet, Candidate, ObjectiveTarget};
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOWER: f64 = -5.0;
const UPPER: f64 = 5.0;
const QUARTERS: usize = 4;
const TOTAL_CALCULATIONS: usize = 300;
const COOLING_FACTOR: f64 = 0.9;
const START_CHANCE: f64 = 0.25;

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    enable_tracing();

    let config = SchedulerConfig::from_env().context("reading scheduler configuration")?;
    let scheduler = Scheduler::new();
    scheduler.set_retain_completions(false);
    let square: Arc<dyn Evaluator> =
        Arc::new(fn_evaluator(|c: &Candidate| Ok(c.get_parameter("X")?.powi(2))));

    let width = (UPPER - LOWER) / QUARTERS as f64;
    for quarter in 0..QUARTERS {
        let lower = LOWER + width * quarter as f64;
        let boundaries = BoundarySet::new().with_boundary(lower, lower + width, "X")?;
        let strategy_config =
            AnnealingConfig::new(TOTAL_CALCULATIONS / QUARTERS, ObjectiveTarget::Minimize)
                .with_cooling_factor(COOLING_FACTOR)
                .with_start_chance(START_CHANCE);
        let strategy = AnnealingStrategy::new(Arc::new(boundaries), strategy_config)?
            .with_name(format!("quarter-{}", quarter + 1));
        scheduler.register(strategy, Arc::clone(&square));
    }

    if let Some(path) = &config.completion_log {
        let full = BoundarySet::new().with_boundary(LOWER, UPPER, "X")?;
        scheduler
            .enable_logging(path, &full)
            .with_context(|| format!("opening completion log {}", path.display()))?;
    }

    let summary = scheduler.run(config.worker_count)?;
    info!(summary = %serde_json::to_string(&summary)?, "run complete");

    for handle in scheduler.strategies() {
        if let Some(best) = handle.best() {
            info!(strategy = handle.name(), best = %best, "strategy best");
        }
    }

    let best = scheduler
        .best_overall(ObjectiveTarget::Minimize)
        .context("no strategy produced a result")?;
    println!("{}", best.to_string_header());
    println!("{}", best.to_string_values());
    Ok(())
}
