//! Core agent storage: `Population` (SoA data) and `AgentRngs` (per-agent RNG).
//!
//! # Why two structs?
//!
//! The utility phase needs `&mut AgentRngs` (noise draws, one stream per
//! agent) and `&Population` (shared read access to traits and state) at the
//! same time.  Keeping the RNGs out of `Population` lets both borrows live
//! side by side, and lets Rayon hand each worker a disjoint slice of RNGs.

use std::fmt;

use psim_core::{AgentId, AgentRng, Big5, INTEREST_DIM, LifePattern, MediaGroup};

/// Upper bound of the stress / dopamine / anxiety gauges.
pub const GAUGE_MAX: f64 = 100.0;

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, separated from [`Population`].
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `global_seed`.
    pub fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── Population ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for every agent's traits and state.
///
/// Every `Vec` field has exactly `count` elements.  Traits are fixed after
/// generation; state fields are mutated in place by the engine each tick and
/// kept inside their declared bounds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Population {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    pub id: Vec<AgentId>,

    // ── Static traits ─────────────────────────────────────────────────────
    /// Big Five vector, each component in `[0, 1]`.  Index with [`Big5`].
    pub big5: Vec<[f64; Big5::COUNT]>,

    /// Prospect-theory loss weighting, `[1, 5]`.
    pub loss_aversion: Vec<f64>,

    /// Skill level compared against activity difficulty, `[0, 100]`.
    pub intelligence: Vec<f64>,

    /// Susceptibility to chasing losses, `[0, 2]`.
    pub gambler_fallacy: Vec<f64>,

    pub life_pattern: Vec<LifePattern>,

    /// Per-tick intensity budget, `[50, 200]`.
    pub attention_cap: Vec<u32>,

    // ── Mutable state ─────────────────────────────────────────────────────
    /// Currency balance.  May go negative.
    pub wallet: Vec<f64>,

    pub stress: Vec<f64>,
    pub dopamine: Vec<f64>,
    pub anxiety: Vec<f64>,

    /// Boredom per media group, each in `[0, 1]`.
    pub media_boredom: Vec<[f64; MediaGroup::COUNT]>,

    /// Media group the agent is currently "in".  `None` before the first
    /// action; kept through ticks with no action.
    pub current_media: Vec<Option<MediaGroup>>,

    /// Taste profile, each component in `[0, 1]`.
    #[cfg_attr(feature = "serde", serde(with = "interest_rows"))]
    pub interests: Vec<[f64; INTEREST_DIM]>,

    pub gacha_pity: Vec<u32>,
    pub fail_streak: Vec<u32>,
}

impl Population {
    /// `count` identical, mid-range agents.
    ///
    /// Traits sit at the centre of their generating distributions and state
    /// is at its initial values.  The generator fills this in place; tests
    /// use it directly to control every input.
    pub fn blank(count: usize) -> Self {
        Self {
            count,
            id:              (0..count as u32).map(AgentId).collect(),
            big5:            vec![[0.5; Big5::COUNT]; count],
            loss_aversion:   vec![2.25; count],
            intelligence:    vec![50.0; count],
            gambler_fallacy: vec![1.0; count],
            life_pattern:    vec![LifePattern::OfficeWorker; count],
            attention_cap:   vec![100; count],
            wallet:          vec![0.0; count],
            stress:          vec![0.0; count],
            dopamine:        vec![50.0; count],
            anxiety:         vec![0.0; count],
            media_boredom:   vec![[0.0; MediaGroup::COUNT]; count],
            current_media:   vec![None; count],
            interests:       vec![[0.0; INTEREST_DIM]; count],
            gacha_pity:      vec![0; count],
            fail_streak:     vec![0; count],
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Length of every per-agent array, by field name.
    ///
    /// All entries equal `count` for a well-formed population.
    pub fn field_lengths(&self) -> [(&'static str, usize); 16] {
        [
            ("id",              self.id.len()),
            ("big5",            self.big5.len()),
            ("loss_aversion",   self.loss_aversion.len()),
            ("intelligence",    self.intelligence.len()),
            ("gambler_fallacy", self.gambler_fallacy.len()),
            ("life_pattern",    self.life_pattern.len()),
            ("attention_cap",   self.attention_cap.len()),
            ("wallet",          self.wallet.len()),
            ("stress",          self.stress.len()),
            ("dopamine",        self.dopamine.len()),
            ("anxiety",         self.anxiety.len()),
            ("media_boredom",   self.media_boredom.len()),
            ("current_media",   self.current_media.len()),
            ("interests",       self.interests.len()),
            ("gacha_pity",      self.gacha_pity.len()),
            ("fail_streak",     self.fail_streak.len()),
        ]
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.id.iter().copied()
    }

    // ── Aggregates ────────────────────────────────────────────────────────

    pub fn mean_stress(&self) -> f64 {
        mean(&self.stress)
    }

    pub fn mean_dopamine(&self) -> f64 {
        mean(&self.dopamine)
    }

    pub fn mean_anxiety(&self) -> f64 {
        mean(&self.anxiety)
    }

    /// Mean stress per life pattern.  `None` for patterns with no agents.
    pub fn mean_stress_by_pattern(&self) -> [Option<f64>; LifePattern::COUNT] {
        let mut sum = [0.0; LifePattern::COUNT];
        let mut n = [0usize; LifePattern::COUNT];
        for (s, p) in self.stress.iter().zip(&self.life_pattern) {
            sum[p.index()] += s;
            n[p.index()] += 1;
        }
        std::array::from_fn(|i| (n[i] > 0).then(|| sum[i] / n[i] as f64))
    }

    /// `true` if every bounded quantity is inside its declared range.
    pub fn within_bounds(&self) -> bool {
        let gauge = |v: &f64| (0.0..=GAUGE_MAX).contains(v);
        let unit = |v: &f64| (0.0..=1.0).contains(v);
        self.stress.iter().all(gauge)
            && self.dopamine.iter().all(gauge)
            && self.anxiety.iter().all(gauge)
            && self.media_boredom.iter().all(|b| b.iter().all(unit))
            && self.interests.iter().all(|v| v.iter().all(unit))
    }

    /// Human-readable snapshot of one agent.
    pub fn profile(&self, agent: AgentId) -> AgentProfile {
        let i = agent.index();
        AgentProfile {
            id:               agent,
            life_pattern:     self.life_pattern[i],
            big5:             self.big5[i],
            loss_aversion:    self.loss_aversion[i],
            attention_cap:    self.attention_cap[i],
            wallet:           self.wallet[i],
            stress:           self.stress[i],
            dopamine:         self.dopamine[i],
            anxiety:          self.anxiety[i],
            current_media:    self.current_media[i],
            active_interests: self.interests[i].iter().filter(|&&v| v > 0.0).count(),
        }
    }
}

/// serde only covers arrays up to 32 elements; interest rows go through
/// plain sequences instead.
#[cfg(feature = "serde")]
mod interest_rows {
    use psim_core::INTEREST_DIM;
    use serde::de::Error as _;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        rows: &[[f64; INTEREST_DIM]],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(rows.len()))?;
        for row in rows {
            seq.serialize_element(row.as_slice())?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<[f64; INTEREST_DIM]>, D::Error> {
        Vec::<Vec<f64>>::deserialize(deserializer)?
            .into_iter()
            .map(|row| {
                let len = row.len();
                <[f64; INTEREST_DIM]>::try_from(row)
                    .map_err(|_| D::Error::invalid_length(len, &"one weight per interest slot"))
            })
            .collect()
    }
}

fn mean(v: &[f64]) -> f64 {
    if v.is_empty() {
        return 0.0;
    }
    v.iter().sum::<f64>() / v.len() as f64
}

// ── AgentProfile ──────────────────────────────────────────────────────────────

/// One agent's traits and state, copied out for inspection.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentProfile {
    pub id:               AgentId,
    pub life_pattern:     LifePattern,
    pub big5:             [f64; Big5::COUNT],
    pub loss_aversion:    f64,
    pub attention_cap:    u32,
    pub wallet:           f64,
    pub stress:           f64,
    pub dopamine:         f64,
    pub anxiety:          f64,
    pub current_media:    Option<MediaGroup>,
    pub active_interests: usize,
}

impl fmt::Display for AgentProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.big5;
        writeln!(f, "{} ({})", self.id, self.life_pattern)?;
        writeln!(f, "  attention cap : {}", self.attention_cap)?;
        writeln!(f, "  loss aversion : {:.2}", self.loss_aversion)?;
        writeln!(f, "  wallet        : {:.0}", self.wallet)?;
        writeln!(
            f,
            "  big5 (OCEAN)  : {:.2} {:.2} {:.2} {:.2} {:.2}",
            b[0], b[1], b[2], b[3], b[4]
        )?;
        writeln!(
            f,
            "  stress/dopamine/anxiety : {:.1} / {:.1} / {:.1}",
            self.stress, self.dopamine, self.anxiety
        )?;
        let media = self.current_media.map_or("-", |m| m.as_str());
        write!(f, "  media {media}, {} active interests", self.active_interests)
    }
}
