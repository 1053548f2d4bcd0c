//! Activity records and the catalog that indexes them.
//!
//! The catalog is immutable for the whole run.  Besides the row records it
//! keeps column vectors (`intensity`, `cost`, …) so the utility model can
//! read one contiguous slice per coefficient.

#[cfg(not(feature = "fx-hash"))]
use std::collections::HashMap;

use psim_core::{ActivityId, MediaGroup, Tag};

use crate::{CatalogError, CatalogResult};

#[cfg(not(feature = "fx-hash"))]
type IdIndex = HashMap<String, ActivityId>;
#[cfg(feature = "fx-hash")]
type IdIndex = rustc_hash::FxHashMap<String, ActivityId>;

// ── Activity ──────────────────────────────────────────────────────────────────

/// One normalized catalog row.
#[derive(Clone, Debug, PartialEq)]
pub struct Activity {
    pub id:            String,
    pub name:          String,
    pub category:      String,
    pub media_group:   MediaGroup,
    /// Attention cost per tick, `>= 0`.
    pub intensity:     f64,
    pub fun_reward:    f64,
    pub growth_reward: f64,
    /// Currency spent.  Negative means income.
    pub cost:          f64,
    /// Stress added.  Negative means relief.
    pub stress_cost:   f64,
    /// Entry barrier compared against agent intelligence, `>= 0`.
    pub difficulty:    f64,
    pub tags:          Vec<Tag>,
    /// Fun reward scales with the slot's ad-efficiency multiplier.
    pub ad_supported:  bool,
}

impl Activity {
    #[inline]
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }
}

// ── ActivityBuilder ───────────────────────────────────────────────────────────

/// Raw row → normalized [`Activity`].
///
/// Every field except the id is optional.  [`build`](Self::build) fills
/// the gaps:
///
/// | Column          | Default                                  |
/// |-----------------|------------------------------------------|
/// | `name`          | the id                                   |
/// | `category`      | the media-group label                    |
/// | `media_group`   | parsed from `category`; required if both are absent |
/// | `fun_reward`    | legacy `base_reward`, else 0             |
/// | numeric columns | 0                                        |
/// | `tags`          | none                                     |
/// | `ad_supported`  | false                                    |
#[derive(Clone, Debug, Default)]
pub struct ActivityBuilder {
    id:            String,
    name:          Option<String>,
    category:      Option<String>,
    media_group:   Option<String>,
    intensity:     Option<f64>,
    fun_reward:    Option<f64>,
    base_reward:   Option<f64>,
    growth_reward: Option<f64>,
    cost:          Option<f64>,
    stress_cost:   Option<f64>,
    difficulty:    Option<f64>,
    tags:          Vec<String>,
    ad_supported:  Option<bool>,
}

impl ActivityBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Default::default() }
    }

    pub fn name(mut self, v: impl Into<String>) -> Self {
        self.name = Some(v.into());
        self
    }

    pub fn category(mut self, v: impl Into<String>) -> Self {
        self.category = Some(v.into());
        self
    }

    pub fn media_group(mut self, v: impl Into<String>) -> Self {
        self.media_group = Some(v.into());
        self
    }

    pub fn intensity(mut self, v: f64) -> Self {
        self.intensity = Some(v);
        self
    }

    pub fn fun_reward(mut self, v: f64) -> Self {
        self.fun_reward = Some(v);
        self
    }

    /// Single-reward column from older catalogs; used as fun reward when
    /// `fun_reward` is absent.
    pub fn base_reward(mut self, v: f64) -> Self {
        self.base_reward = Some(v);
        self
    }

    pub fn growth_reward(mut self, v: f64) -> Self {
        self.growth_reward = Some(v);
        self
    }

    pub fn cost(mut self, v: f64) -> Self {
        self.cost = Some(v);
        self
    }

    pub fn stress_cost(mut self, v: f64) -> Self {
        self.stress_cost = Some(v);
        self
    }

    pub fn difficulty(mut self, v: f64) -> Self {
        self.difficulty = Some(v);
        self
    }

    pub fn tag(mut self, v: impl Into<String>) -> Self {
        self.tags.push(v.into());
        self
    }

    /// `|`-separated tag list, as stored in catalog CSVs.
    pub fn tags_field(mut self, field: &str) -> Self {
        self.tags.extend(
            field
                .split('|')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from),
        );
        self
    }

    pub fn ad_supported(mut self, v: bool) -> Self {
        self.ad_supported = Some(v);
        self
    }

    /// Names of optional columns that [`build`](Self::build) will default.
    pub fn missing_columns(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.fun_reward.is_none() && self.base_reward.is_none() {
            out.push("Fun_Reward");
        }
        if self.growth_reward.is_none() {
            out.push("Growth_Reward");
        }
        if self.difficulty.is_none() {
            out.push("Difficulty");
        }
        if self.intensity.is_none() {
            out.push("Intensity");
        }
        if self.cost.is_none() {
            out.push("Cost");
        }
        if self.stress_cost.is_none() {
            out.push("Stress_Cost");
        }
        if self.media_group.is_none() {
            out.push("Media_Group");
        }
        out
    }

    /// Validate and normalize.
    pub fn build(self) -> CatalogResult<Activity> {
        let invalid = |what: String| CatalogError::InvalidActivity { id: self.id.clone(), what };

        if self.id.trim().is_empty() {
            return Err(invalid("empty id".into()));
        }

        let group_label = self
            .media_group
            .as_deref()
            .or(self.category.as_deref())
            .ok_or_else(|| invalid("neither Media_Group nor Category given".into()))?;
        let media_group: MediaGroup = group_label.parse()?;

        let intensity = self.intensity.unwrap_or(0.0);
        if !(intensity >= 0.0) {
            return Err(invalid(format!("intensity {intensity} must be >= 0")));
        }
        let difficulty = self.difficulty.unwrap_or(0.0);
        if !(difficulty >= 0.0) {
            return Err(invalid(format!("difficulty {difficulty} must be >= 0")));
        }

        let mut tags = Vec::with_capacity(self.tags.len());
        for t in &self.tags {
            let tag: Tag = t.parse()?;
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        Ok(Activity {
            name:          self.name.unwrap_or_else(|| self.id.clone()),
            category:      self.category.unwrap_or_else(|| media_group.as_str().to_string()),
            media_group,
            intensity,
            fun_reward:    self.fun_reward.or(self.base_reward).unwrap_or(0.0),
            growth_reward: self.growth_reward.unwrap_or(0.0),
            cost:          self.cost.unwrap_or(0.0),
            stress_cost:   self.stress_cost.unwrap_or(0.0),
            difficulty,
            tags,
            ad_supported:  self.ad_supported.unwrap_or(false),
            id:            self.id,
        })
    }
}

// ── ActivityCatalog ───────────────────────────────────────────────────────────

/// The validated, immutable activity catalog.
#[derive(Clone, Debug)]
pub struct ActivityCatalog {
    activities: Vec<Activity>,
    by_id:      IdIndex,

    // Column views, one entry per activity.
    pub intensity:     Vec<f64>,
    pub fun_reward:    Vec<f64>,
    pub growth_reward: Vec<f64>,
    pub cost:          Vec<f64>,
    pub stress_cost:   Vec<f64>,
    pub difficulty:    Vec<f64>,
    pub media_group:   Vec<MediaGroup>,
    pub ad_supported:  Vec<bool>,
    pub gambling:      Vec<bool>,
    /// Interest-vector slots hit by each activity's tags.
    pub tag_slots:     Vec<Vec<usize>>,
}

impl ActivityCatalog {
    /// Validate `activities` and build the column views.
    ///
    /// Fails on an empty list, duplicate ids, or more than `u16::MAX` rows.
    pub fn new(activities: Vec<Activity>) -> CatalogResult<Self> {
        if activities.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }
        if activities.len() > u16::MAX as usize {
            return Err(CatalogError::TooManyActivities(activities.len()));
        }

        let mut by_id = IdIndex::default();
        for (i, a) in activities.iter().enumerate() {
            if by_id.insert(a.id.clone(), ActivityId(i as u16)).is_some() {
                return Err(CatalogError::DuplicateId(a.id.clone()));
            }
        }

        let col = |f: fn(&Activity) -> f64| activities.iter().map(f).collect::<Vec<_>>();
        Ok(Self {
            intensity:     col(|a| a.intensity),
            fun_reward:    col(|a| a.fun_reward),
            growth_reward: col(|a| a.growth_reward),
            cost:          col(|a| a.cost),
            stress_cost:   col(|a| a.stress_cost),
            difficulty:    col(|a| a.difficulty),
            media_group:   activities.iter().map(|a| a.media_group).collect(),
            ad_supported:  activities.iter().map(|a| a.ad_supported).collect(),
            gambling:      activities.iter().map(|a| a.has_tag(Tag::Gambling)).collect(),
            tag_slots:     activities
                .iter()
                .map(|a| a.tags.iter().map(|t| t.index()).collect())
                .collect(),
            by_id,
            activities,
        })
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn get(&self, id: ActivityId) -> &Activity {
        &self.activities[id.index()]
    }

    /// Look up an activity by its catalog id string.
    pub fn find(&self, id: &str) -> Option<ActivityId> {
        self.by_id.get(id).copied()
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn ids(&self) -> impl Iterator<Item = ActivityId> + '_ {
        (0..self.activities.len() as u16).map(ActivityId)
    }

    /// Activities belonging to `group`.
    pub fn in_group(&self, group: MediaGroup) -> impl Iterator<Item = ActivityId> + '_ {
        self.ids().filter(move |a| self.media_group[a.index()] == group)
    }
}
