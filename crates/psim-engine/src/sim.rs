//! The `Sim` struct and its tick loop.

use psim_agent::{AgentRngs, Population};
use psim_catalog::{ActivityCatalog, CatalogOverlay, ContextTable, EventKind, EventSchedule};
use psim_core::{MediaGroup, SimClock, SimConfig, Tick};
use psim_model::{ActionMask, Allocator, GreedyKnapsack, TickContext, UtilityModel};

use crate::gacha::GachaParams;
use crate::update::{DynamicsParams, Settle};
use crate::{SimLog, SimObserver, SimResult, TickRecord, ViralTrend};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Each tick runs these steps in order:
///
/// 1. Build a fresh [`CatalogOverlay`] from the base catalog, so overrides
///    from the previous tick are gone.
/// 2. Apply this tick's events to the overlay and the viral trend.
/// 3. Look up the context slot for the tick.
/// 4. Score every `(agent, activity)` pair and allocate actions
///    (optionally on Rayon with the `parallel` feature).
/// 5. Settle each agent in ascending index order: gacha, wallet,
///    stress/dopamine/anxiety, current media, boredom, interests.
/// 6. Fold engagement into the viral trend and spending into revenue.
/// 7. Append a [`TickRecord`] to the log.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<A: Allocator = GreedyKnapsack> {
    pub config: SimConfig,

    /// Current tick and its time-of-day label.
    pub clock: SimClock,

    /// Per-agent state (SoA arrays), owned and mutated only by the tick loop.
    pub population: Population,

    /// Per-agent deterministic RNGs, kept apart from `population` for the
    /// split borrow in the scoring step.
    pub rngs: AgentRngs,

    /// Base catalog.  Never modified after construction.
    pub catalog: ActivityCatalog,

    pub context: ContextTable,
    pub events: EventSchedule,
    pub utility: UtilityModel,
    pub allocator: A,
    pub gacha: GachaParams,
    pub dynamics: DynamicsParams,

    /// Population-wide trend state carried between ticks.
    pub viral: ViralTrend,

    pub(crate) revenue: f64,
    pub(crate) counts: Vec<u64>,
    pub(crate) log: SimLog,
    pub(crate) started: bool,

    #[cfg(feature = "parallel")]
    pub(crate) pool: Option<rayon::ThreadPool>,
}

impl<A: Allocator> Sim<A> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary and `on_sim_end` once
    /// the end tick is reached.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let remaining = self.config.end_tick().0.saturating_sub(self.clock.current_tick.0);
        self.run_ticks(remaining, observer)?;
        observer.on_sim_end(self.clock.current_tick, &self.population);
        Ok(())
    }

    /// Run at most `n` ticks from the current position.
    ///
    /// Stops early at `config.end_tick()`; the run is terminal there.  Does
    /// not call `on_sim_end`, so a run can be stepped incrementally and
    /// finished with [`run`](Self::run).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        if !self.started {
            observer.on_sim_start(&self.catalog);
            self.started = true;
        }

        let end = self.config.end_tick();
        for _ in 0..n {
            let now = self.clock.current_tick;
            if now >= end {
                break;
            }

            observer.on_tick_start(now);
            let record = self.process_tick(now)?;
            observer.on_tick_end(&record);
            self.log.push(record);

            let every = self.config.snapshot_interval_ticks;
            if every > 0 && now.0.is_multiple_of(every) {
                observer.on_snapshot(now, &self.population);
            }

            self.clock.advance();
        }
        Ok(())
    }

    /// `true` once every configured tick has run.
    pub fn is_finished(&self) -> bool {
        self.clock.current_tick >= self.config.end_tick()
    }

    pub fn log(&self) -> &SimLog {
        &self.log
    }

    /// Consume the simulation, keeping its log and final population.
    pub fn into_parts(self) -> (SimLog, Population) {
        (self.log, self.population)
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Revenue accumulated so far.
    pub fn revenue(&self) -> f64 {
        self.revenue
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, now: Tick) -> SimResult<TickRecord> {
        let time = self.clock.label(now);

        // ── Steps 1–2: reset overrides, apply events ──────────────────────
        let mut overlay = CatalogOverlay::new(&self.catalog);
        let mut annotations = Vec::new();
        for event in self.events.at(now) {
            match event.kind {
                EventKind::ServerDown => overlay.server_down(event.target),
                EventKind::HotTime    => overlay.hot_time(event.target, event.magnitude),
                EventKind::ViralBoost => self.viral.boost(event.target, event.magnitude),
            }
            annotations.push(event.annotation(&time));
        }

        // ── Step 3: context ───────────────────────────────────────────────
        let slot = self.context.slot(now);

        // ── Step 4: score and allocate ────────────────────────────────────
        let mask = {
            let ctx = TickContext::new(now, &overlay, slot, Some(&self.viral.scores));
            let utility = &self.utility;
            let allocator = &self.allocator;
            let population = &self.population;
            let rngs = &mut self.rngs;
            let intensity = self.catalog.intensity.as_slice();

            let mut decide = || -> ActionMask {
                let u = utility.score(population, &ctx, rngs);
                allocator.allocate(&u, intensity, &population.attention_cap)
            };

            #[cfg(feature = "parallel")]
            let mask = match &self.pool {
                Some(pool) => pool.install(decide),
                None => decide(),
            };
            #[cfg(not(feature = "parallel"))]
            let mask = decide();

            mask
        };

        // ── Step 5: settle agents in ascending index order ────────────────
        let settle = Settle {
            overlay:  &overlay,
            gacha:    &self.gacha,
            dynamics: &self.dynamics,
        };
        let pop = &mut self.population;
        let mut engaged = [0u64; MediaGroup::COUNT];
        let mut spent = 0.0;
        let mut active_users = 0;
        let mut pulls = 0u32;
        let mut wins = 0u32;

        for i in 0..pop.count {
            let agent_slot = &slot[pop.life_pattern[i].index()];
            let outcome = settle.agent(pop, i, mask.row(i), agent_slot, &mut self.rngs.inner[i]);

            spent += outcome.spent;
            if outcome.actions > 0 {
                active_users += 1;
            }
            for (e, &on) in engaged.iter_mut().zip(&outcome.engaged) {
                *e += on as u64;
            }
            if let Some(win) = outcome.gacha {
                pulls += 1;
                wins += win as u32;
            }
        }

        // ── Step 6: population-wide aggregates ────────────────────────────
        self.viral.update(&engaged, pop.count);
        self.revenue += spent;
        for (c, n) in self.counts.iter_mut().zip(mask.column_counts()) {
            *c += n;
        }

        let actions = mask.count_true();
        tracing::debug!(
            tick = now.0,
            %time,
            actions,
            active_users,
            pulls,
            wins,
            revenue = self.revenue,
            "tick"
        );

        // ── Step 7: log record ────────────────────────────────────────────
        Ok(TickRecord {
            tick:            now,
            time,
            total_revenue:   self.revenue,
            avg_stress:      pop.mean_stress(),
            avg_dopamine:    pop.mean_dopamine(),
            avg_anxiety:     pop.mean_anxiety(),
            pattern_stress:  pop.mean_stress_by_pattern(),
            active_users,
            actions,
            activity_counts: self.counts.clone(),
            viral:           self.viral.scores,
            events:          annotations,
        })
    }
}
