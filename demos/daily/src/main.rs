//! daily: one simulated day of a synthetic attention-economy population.
//!
//! Usage: `daily [activities.csv] [context.csv] [events.csv]`
//!
//! Any table not given on the command line falls back to the built-in
//! default.  Set `RUST_LOG=debug` for a line per tick.

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use psim_agent::PopulationBuilder;
use psim_catalog::{
    default_catalog, default_context, load_activities_csv, load_context_csv, load_events_csv,
    load_events_reader,
};
use psim_core::{AgentId, SimConfig, TICKS_PER_DAY};
use psim_engine::{ProgressLogger, SimBuilder, SimObserver, TickRecord};
use psim_output::{CsvWriter, SimOutputObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const AGENT_COUNT:     usize = 10_000;
const SEED:            u64   = 42;
const SNAPSHOT_TICKS:  u64   = 16; // every four hours
const OUTPUT_DIR:      &str  = "output/daily";
const PROFILE_SAMPLES: u32   = 3;

// Morning hot-time, a lunchtime video trend and an evening outage.
const EVENTS_CSV: &str = "\
Tick,Type,Target,Value\n\
32,HOT_TIME,GAME,2.0\n\
48,VIRAL_BOOST,VIDEO,1.0\n\
80,SERVER_DOWN,GAME,\n\
";

// ── Observer ──────────────────────────────────────────────────────────────────

/// Progress logging plus file output in one observer.
struct DemoObserver {
    progress: ProgressLogger,
    output:   SimOutputObserver<CsvWriter>,
}

impl SimObserver for DemoObserver {
    fn on_sim_start(&mut self, catalog: &psim_catalog::ActivityCatalog) {
        self.output.on_sim_start(catalog);
    }

    fn on_tick_end(&mut self, record: &TickRecord) {
        for marker in &record.events {
            tracing::info!(event = %marker, "world event");
        }
        self.progress.on_tick_end(record);
        self.output.on_tick_end(record);
    }

    fn on_snapshot(&mut self, tick: psim_core::Tick, population: &psim_agent::Population) {
        self.output.on_snapshot(tick, population);
    }

    fn on_sim_end(&mut self, final_tick: psim_core::Tick, population: &psim_agent::Population) {
        self.progress.on_sim_end(final_tick, population);
        self.output.on_sim_end(final_tick, population);
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    // 1. Inputs.
    let catalog = match args.first() {
        Some(p) => load_activities_csv(Path::new(p)).with_context(|| format!("loading {p}"))?,
        None => default_catalog()?,
    };
    let context = match args.get(1) {
        Some(p) => load_context_csv(Path::new(p)).with_context(|| format!("loading {p}"))?,
        None => default_context(),
    };
    let events = match args.get(2) {
        Some(p) => load_events_csv(Path::new(p)).with_context(|| format!("loading {p}"))?,
        None => load_events_reader(Cursor::new(EVENTS_CSV))?,
    };
    println!("Catalog: {} activities, {} events", catalog.len(), events.len());

    // 2. Population.
    let t0 = Instant::now();
    let (population, rngs) = PopulationBuilder::new(AGENT_COUNT, SEED).build()?;
    println!("Generated {} agents in {:.3} s", population.count, t0.elapsed().as_secs_f64());

    // 3. Sim.
    let config = SimConfig {
        total_ticks:             TICKS_PER_DAY,
        seed:                    SEED,
        num_threads:             None,
        snapshot_interval_ticks: SNAPSHOT_TICKS,
        ..SimConfig::default()
    };
    let mut sim = SimBuilder::new(config, population, rngs, catalog, context)
        .events(events)
        .build()?;

    // 4. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let mut obs = DemoObserver {
        progress: ProgressLogger::default(),
        output:   SimOutputObserver::new(CsvWriter::new(Path::new(OUTPUT_DIR))?),
    };

    // 5. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.output.take_error() {
        eprintln!("output error: {e}");
    }

    // 6. Report.
    let log = sim.log();
    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  total revenue : {:.0}", log.total_revenue());
    println!("  total actions : {}", log.total_actions());
    if let Some(last) = log.last() {
        println!(
            "  final stress / dopamine / anxiety : {:.1} / {:.1} / {:.1}",
            last.avg_stress, last.avg_dopamine, last.avg_anxiety
        );
    }
    println!();

    println!("{:<16} {:>10}", "Activity", "Count");
    println!("{}", "-".repeat(27));
    for (id, count) in log.top_activities(5) {
        println!("{id:<16} {count:>10}");
    }
    println!();

    for marker in log.annotations() {
        println!("event: {marker}");
    }
    println!();

    let pop = sim.population();
    for i in 0..PROFILE_SAMPLES.min(pop.count as u32) {
        println!("{}", pop.profile(AgentId(i)));
    }
    println!("Output written to {OUTPUT_DIR}/");

    Ok(())
}
