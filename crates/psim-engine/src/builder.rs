//! Fluent builder for constructing a [`Sim`].

use psim_agent::{AgentRngs, Population};
use psim_catalog::{ActivityCatalog, ContextTable, EventSchedule};
use psim_core::{DEFAULT_TICK_SECS, SimConfig};
use psim_model::{Allocator, GreedyKnapsack, UtilityModel, UtilityParams};

use crate::gacha::GachaParams;
use crate::update::DynamicsParams;
use crate::{Sim, SimError, SimLog, SimResult, ViralTrend};

/// Fluent builder for [`Sim<A>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: total ticks, seed, tick duration, threads
/// - [`Population`] + [`AgentRngs`] from [`psim_agent::PopulationBuilder`]
/// - [`ActivityCatalog`] and [`ContextTable`]
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                    |
/// |-------------------|----------------------------|
/// | `.events(s)`      | no events                  |
/// | `.utility(p)`     | `UtilityParams::default()` |
/// | `.gacha(p)`       | `GachaParams::default()`   |
/// | `.dynamics(p)`    | `DynamicsParams::default()`|
/// | `.allocator(a)`   | `GreedyKnapsack::default()`|
///
/// # Example
///
/// ```rust,ignore
/// let (population, rngs) = PopulationBuilder::new(n, seed).build()?;
/// let mut sim = SimBuilder::new(config, population, rngs, default_catalog()?, default_context())
///     .events(schedule)
///     .build()?;
/// sim.run(&mut ProgressLogger::default())?;
/// ```
pub struct SimBuilder<A: Allocator = GreedyKnapsack> {
    config:     SimConfig,
    population: Population,
    rngs:       AgentRngs,
    catalog:    ActivityCatalog,
    context:    ContextTable,
    events:     EventSchedule,
    utility:    UtilityParams,
    gacha:      GachaParams,
    dynamics:   DynamicsParams,
    allocator:  A,
}

impl SimBuilder<GreedyKnapsack> {
    /// Create a builder with all required inputs.
    pub fn new(
        config:     SimConfig,
        population: Population,
        rngs:       AgentRngs,
        catalog:    ActivityCatalog,
        context:    ContextTable,
    ) -> Self {
        Self {
            config,
            population,
            rngs,
            catalog,
            context,
            events:    EventSchedule::new(),
            utility:   UtilityParams::default(),
            gacha:     GachaParams::default(),
            dynamics:  DynamicsParams::default(),
            allocator: GreedyKnapsack::default(),
        }
    }
}

impl<A: Allocator> SimBuilder<A> {
    pub fn events(mut self, events: EventSchedule) -> Self {
        self.events = events;
        self
    }

    pub fn utility(mut self, params: UtilityParams) -> Self {
        self.utility = params;
        self
    }

    pub fn gacha(mut self, params: GachaParams) -> Self {
        self.gacha = params;
        self
    }

    pub fn dynamics(mut self, params: DynamicsParams) -> Self {
        self.dynamics = params;
        self
    }

    /// Replace the action selector.
    pub fn allocator<B: Allocator>(self, allocator: B) -> SimBuilder<B> {
        SimBuilder {
            config:     self.config,
            population: self.population,
            rngs:       self.rngs,
            catalog:    self.catalog,
            context:    self.context,
            events:     self.events,
            utility:    self.utility,
            gacha:      self.gacha,
            dynamics:   self.dynamics,
            allocator,
        }
    }

    /// Check preconditions and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<A>> {
        let agent_count = self.population.count;
        if agent_count == 0 {
            return Err(SimError::EmptyPopulation);
        }
        for (what, got) in self.population.field_lengths() {
            if got != agent_count {
                return Err(SimError::AgentCountMismatch { expected: agent_count, got, what });
            }
        }
        if self.rngs.len() != agent_count {
            return Err(SimError::AgentCountMismatch {
                expected: agent_count,
                got:      self.rngs.len(),
                what:     "agent RNGs",
            });
        }
        if self.catalog.is_empty() {
            return Err(SimError::EmptyCatalog);
        }
        if self.config.tick_duration_secs != DEFAULT_TICK_SECS {
            return Err(SimError::Config(format!(
                "tick_duration_secs must be {DEFAULT_TICK_SECS} (one context slot), got {}",
                self.config.tick_duration_secs
            )));
        }
        let utility = UtilityModel::new(self.utility)
            .map_err(|e| SimError::Config(format!("utility noise_sd: {e}")))?;
        let end = self.config.end_tick();
        if self.events.last_tick().is_some_and(|last| last >= end) {
            tracing::warn!(%end, "events scheduled at or after the end tick will never fire");
        }

        #[cfg(feature = "parallel")]
        let pool = match self.config.num_threads {
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| SimError::Config(e.to_string()))?,
            ),
            None => None,
        };

        let activity_ids = self.catalog.activities().iter().map(|a| a.id.clone()).collect();
        let counts = vec![0; self.catalog.len()];

        tracing::info!(
            agents     = agent_count,
            activities = self.catalog.len(),
            events     = self.events.len(),
            ticks      = self.config.total_ticks,
            "simulation ready"
        );

        Ok(Sim {
            clock:      self.config.make_clock(),
            config:     self.config,
            population: self.population,
            rngs:       self.rngs,
            catalog:    self.catalog,
            context:    self.context,
            events:     self.events,
            utility,
            allocator:  self.allocator,
            gacha:      self.gacha,
            dynamics:   self.dynamics,
            viral:      ViralTrend::default(),
            revenue:    0.0,
            counts,
            log:        SimLog::new(activity_ids),
            started:    false,
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}

