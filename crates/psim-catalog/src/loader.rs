//! CSV ingestion for activities, context rows and events.
//!
//! # Activity CSV
//!
//! ```csv
//! ID,Name,Category,Media_Group,Intensity,Fun_Reward,Growth_Reward,Difficulty,Cost,Stress_Cost,Tags,Ad_Supported
//! ACT_GM_PVP,PvP ranked match,GAME,GAME,90,50,5,60,0,15,Competition|Skill,false
//! ```
//!
//! Only `ID` is required.  Older catalogs with a single `Base_Reward`
//! column load as fun reward.  Each column that had to be defaulted is
//! reported once per file with `tracing::warn!`.
//!
//! # Context CSV
//!
//! ```csv
//! Time_Index,Pattern_ID,Context,Stress_Mod,Ad_Eff
//! 32,0,COMMUTE_AM,1.5,1.5
//! ```
//!
//! `Pattern_ID` (numeric or snake-case name) may be omitted, in which case
//! the row applies to every life pattern.  `Ad_Efficiency` is accepted as
//! an alias of `Ad_Eff`.
//!
//! # Event CSV
//!
//! ```csv
//! Tick,Type,Target,Value
//! 10,SERVER_DOWN,GAME,
//! 80,HOT_TIME,GAME,2.5
//! ```

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use psim_core::{LifePattern, MediaGroup, Tick};

use crate::{
    ActivityBuilder, ActivityCatalog, CatalogError, CatalogResult, ContextRow, ContextTable,
    Event, EventKind, EventSchedule,
};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ActivityRecord {
    #[serde(rename = "ID")]
    id:            String,
    #[serde(rename = "Name", default)]
    name:          Option<String>,
    #[serde(rename = "Category", default)]
    category:      Option<String>,
    #[serde(rename = "Media_Group", default)]
    media_group:   Option<String>,
    #[serde(rename = "Intensity", default)]
    intensity:     Option<f64>,
    #[serde(rename = "Fun_Reward", default)]
    fun_reward:    Option<f64>,
    #[serde(rename = "Base_Reward", default)]
    base_reward:   Option<f64>,
    #[serde(rename = "Growth_Reward", default)]
    growth_reward: Option<f64>,
    #[serde(rename = "Difficulty", default)]
    difficulty:    Option<f64>,
    #[serde(rename = "Cost", default)]
    cost:          Option<f64>,
    #[serde(rename = "Stress_Cost", default)]
    stress_cost:   Option<f64>,
    #[serde(rename = "Tags", default)]
    tags:          Option<String>,
    #[serde(rename = "Ad_Supported", default)]
    ad_supported:  Option<bool>,
}

impl ActivityRecord {
    fn into_builder(self) -> ActivityBuilder {
        let mut b = ActivityBuilder::new(self.id);
        if let Some(v) = self.name { b = b.name(v); }
        if let Some(v) = self.category { b = b.category(v); }
        if let Some(v) = self.media_group { b = b.media_group(v); }
        if let Some(v) = self.intensity { b = b.intensity(v); }
        if let Some(v) = self.fun_reward { b = b.fun_reward(v); }
        if let Some(v) = self.base_reward { b = b.base_reward(v); }
        if let Some(v) = self.growth_reward { b = b.growth_reward(v); }
        if let Some(v) = self.difficulty { b = b.difficulty(v); }
        if let Some(v) = self.cost { b = b.cost(v); }
        if let Some(v) = self.stress_cost { b = b.stress_cost(v); }
        if let Some(v) = self.tags { b = b.tags_field(&v); }
        if let Some(v) = self.ad_supported { b = b.ad_supported(v); }
        b
    }
}

#[derive(Deserialize)]
struct ContextRecord {
    #[serde(rename = "Time_Index")]
    slot:       usize,
    #[serde(rename = "Pattern_ID", default)]
    pattern:    Option<String>,
    #[serde(rename = "Context", default)]
    label:      Option<String>,
    #[serde(rename = "Stress_Mod", default)]
    stress_mod: Option<f64>,
    #[serde(rename = "Ad_Eff", alias = "Ad_Efficiency", default)]
    ad_eff:     Option<f64>,
}

#[derive(Deserialize)]
struct EventRecord {
    #[serde(rename = "Tick")]
    tick:   u64,
    #[serde(rename = "Type")]
    kind:   String,
    #[serde(rename = "Target")]
    target: String,
    #[serde(rename = "Value", default)]
    value:  Option<f64>,
}

fn parse_err(e: csv::Error) -> CatalogError {
    CatalogError::Parse(e.to_string())
}

// ── Activities ────────────────────────────────────────────────────────────────

pub fn load_activities_csv(path: &Path) -> CatalogResult<ActivityCatalog> {
    let file = std::fs::File::open(path)?;
    load_activities_reader(file)
}

/// Like [`load_activities_csv`] but accepts any `Read` source.
pub fn load_activities_reader<R: Read>(reader: R) -> CatalogResult<ActivityCatalog> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut defaulted: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut activities = Vec::new();

    for result in csv_reader.deserialize::<ActivityRecord>() {
        let builder = result.map_err(parse_err)?.into_builder();
        for column in builder.missing_columns() {
            *defaulted.entry(column).or_default() += 1;
        }
        activities.push(builder.build()?);
    }

    for (column, rows) in defaulted {
        tracing::warn!(column, rows, "activity column missing; using default");
    }

    ActivityCatalog::new(activities)
}

// ── Context ───────────────────────────────────────────────────────────────────

pub fn load_context_csv(path: &Path) -> CatalogResult<ContextTable> {
    let file = std::fs::File::open(path)?;
    load_context_reader(file)
}

/// Like [`load_context_csv`] but accepts any `Read` source.
pub fn load_context_reader<R: Read>(reader: R) -> CatalogResult<ContextTable> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    let mut no_stress = 0usize;
    let mut no_ad = 0usize;

    for result in csv_reader.deserialize::<ContextRecord>() {
        let rec = result.map_err(parse_err)?;
        let pattern = rec
            .pattern
            .as_deref()
            .map(str::parse::<LifePattern>)
            .transpose()?;
        no_stress += rec.stress_mod.is_none() as usize;
        no_ad += rec.ad_eff.is_none() as usize;
        rows.push(ContextRow {
            slot:       rec.slot,
            pattern,
            label:      rec.label,
            stress_mod: rec.stress_mod,
            ad_eff:     rec.ad_eff,
        });
    }

    if no_stress > 0 {
        tracing::warn!(rows = no_stress, "Stress_Mod missing; using 1.0");
    }
    if no_ad > 0 {
        tracing::warn!(rows = no_ad, "Ad_Eff missing; using 1.0");
    }

    ContextTable::from_rows(rows)
}

// ── Events ────────────────────────────────────────────────────────────────────

pub fn load_events_csv(path: &Path) -> CatalogResult<EventSchedule> {
    let file = std::fs::File::open(path)?;
    load_events_reader(file)
}

/// Like [`load_events_csv`] but accepts any `Read` source.
pub fn load_events_reader<R: Read>(reader: R) -> CatalogResult<EventSchedule> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut schedule = EventSchedule::new();

    for result in csv_reader.deserialize::<EventRecord>() {
        let rec = result.map_err(parse_err)?;
        let kind: EventKind = rec.kind.parse()?;
        let target: MediaGroup = rec.target.parse()?;
        let mut event = Event::new(Tick(rec.tick), kind, target);
        if let Some(v) = rec.value {
            if !v.is_finite() {
                return Err(CatalogError::InvalidEvent(format!(
                    "{kind} at tick {}: magnitude {v}",
                    rec.tick
                )));
            }
            event = event.with_magnitude(v);
        }
        schedule.push(event);
    }

    Ok(schedule)
}
