//! meadow — rye grass, rabbits and foxes on a lock-step team of threads.
//!
//! Each ecological quantity is owned by one agent thread.  Every simulated
//! month the team computes from last month's values, commits, and lets the
//! watcher log (and optionally write) the result before time advances.

mod config;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use eco_core::{BarrierKind, Month};
use eco_models::Meadow;
use eco_output::{CsvWriter, LogObserver, ReportObserver};
use eco_sim::SimBuilder;

use config::MeadowConfig;

#[derive(Parser)]
#[command(name = "meadow")]
#[command(version)]
#[command(about = "Lock-step meadow ecosystem: weather, rye grass, rabbits and foxes")]
struct Cli {
    /// Run file (TOML) with optional [sim], [initial] and [params] sections
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Months to simulate
    #[arg(short, long)]
    months: Option<u64>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Rendezvous implementation: spin or condvar
    #[arg(long)]
    barrier: Option<BarrierKind>,

    /// Leave the foxes out of the meadow
    #[arg(long)]
    no_foxes: bool,

    /// Directory for ecosystem.csv
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Abort if the team makes no progress for this long
    #[arg(long)]
    watchdog_ms: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    // ── Configuration: file, then flags ──────────────────────────────────────
    let MeadowConfig { mut sim, mut initial, params } = MeadowConfig::load(cli.config.as_deref())?;
    if let Some(months) = cli.months {
        sim.horizon = Month(months);
    }
    if let Some(seed) = cli.seed {
        sim.seed = seed;
    }
    if let Some(barrier) = cli.barrier {
        sim.barrier = barrier;
    }
    if cli.watchdog_ms.is_some() {
        sim.watchdog_ms = cli.watchdog_ms;
    }
    if cli.no_foxes {
        initial.predators = false;
    }
    sim.team_size = Meadow::team_size(initial.predators);

    // ── World and observers ──────────────────────────────────────────────────
    let (world, meadow) = Meadow::world(&initial, &params, sim.seed)?;
    let calendar = sim.calendar();
    info!(
        team = sim.team_size,
        months = sim.horizon.0,
        seed = sim.seed,
        barrier = ?sim.barrier,
        foxes = initial.predators,
        "meadow ready"
    );

    let csv = match &cli.out {
        Some(dir) => Some(ReportObserver::new(open_csv(dir)?, calendar)),
        None      => None,
    };
    let observer = (LogObserver::new(calendar), csv);

    // ── Run ──────────────────────────────────────────────────────────────────
    let t0 = Instant::now();
    let mut report = meadow
        .register(SimBuilder::new(sim, world, observer))
        .build()?
        .run()?;
    let elapsed = t0.elapsed();

    if let Some(csv) = report.observer.1.as_mut() {
        if let Some(e) = csv.take_error() {
            bail!("writing {}: {e}", csv.writer().path().display());
        }
        info!(rows = csv.writer().rows(), path = %csv.writer().path().display(), "csv written");
    }

    // ── Summary ──────────────────────────────────────────────────────────────
    let (year, month_of_year) = calendar.split(report.final_month);
    println!();
    println!(
        "Simulated {} months in {:.3} s ({} barrier rounds), stopped at {year}-{:02}",
        report.ticks(),
        elapsed.as_secs_f64(),
        report.barrier.rounds,
        month_of_year + 1,
    );
    println!();
    println!("{:<10} {:>12}", "Field", "Value");
    println!("{}", "-".repeat(23));
    for (name, value) in report.final_snapshot.iter() {
        println!("{name:<10} {:>12}", value.to_string());
    }
    println!();
    println!("{:<4} {:<10} {:>8} {:>8} {:>8}", "Id", "Agent", "Compute", "Commit", "Observe");
    println!("{}", "-".repeat(42));
    for agent in &report.agents {
        println!(
            "{:<4} {:<10} {:>8} {:>8} {:>8}",
            agent.id.0, agent.name, agent.counts.compute, agent.counts.commit, agent.counts.observe,
        );
    }

    Ok(())
}

fn open_csv(dir: &Path) -> Result<CsvWriter> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    Ok(CsvWriter::new(dir)?)
}
