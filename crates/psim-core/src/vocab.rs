//! Closed vocabularies: activity tags, media groups, life patterns.
//!
//! Each vocabulary is an enum with an explicit index so that catalog rows
//! can be mapped to vector slots once at ingestion time.  Parsing an unknown
//! label is an error, never a silent no-op.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Length of every agent's interest vector.  The first [`Tag::COUNT`] slots
/// are the catalog tags; the rest are idiosyncratic slots no activity hits.
pub const INTEREST_DIM: usize = 50;

// ── Big Five ──────────────────────────────────────────────────────────────────

/// Column indices into the five-factor personality vector.
pub struct Big5;

impl Big5 {
    pub const OPENNESS: usize = 0;
    pub const CONSCIENTIOUSNESS: usize = 1;
    pub const EXTRAVERSION: usize = 2;
    pub const AGREEABLENESS: usize = 3;
    pub const NEUROTICISM: usize = 4;
    pub const COUNT: usize = 5;
}

// ── Tag ───────────────────────────────────────────────────────────────────────

/// Activity tag vocabulary.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tag {
    Competition,
    Skill,
    Growth,
    Rpg,
    Gambling,
    Collection,
    Free,
    Patience,
    Humor,
    Trend,
    Social,
    Info,
    Responsibility,
    Relax,
}

impl Tag {
    pub const COUNT: usize = 14;

    pub const ALL: [Tag; Tag::COUNT] = [
        Tag::Competition,
        Tag::Skill,
        Tag::Growth,
        Tag::Rpg,
        Tag::Gambling,
        Tag::Collection,
        Tag::Free,
        Tag::Patience,
        Tag::Humor,
        Tag::Trend,
        Tag::Social,
        Tag::Info,
        Tag::Responsibility,
        Tag::Relax,
    ];

    /// Slot of this tag in the interest vector.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Competition    => "Competition",
            Tag::Skill          => "Skill",
            Tag::Growth         => "Growth",
            Tag::Rpg            => "RPG",
            Tag::Gambling       => "Gambling",
            Tag::Collection     => "Collection",
            Tag::Free           => "Free",
            Tag::Patience       => "Patience",
            Tag::Humor          => "Humor",
            Tag::Trend          => "Trend",
            Tag::Social         => "Social",
            Tag::Info           => "Info",
            Tag::Responsibility => "Responsibility",
            Tag::Relax          => "Relax",
        }
    }
}

impl FromStr for Tag {
    type Err = CoreError;

    /// Case-insensitive match on the canonical label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Tag::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownTag(s.to_string()))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── MediaGroup ────────────────────────────────────────────────────────────────

/// Coarse activity category used for inertia, saturation and virality.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MediaGroup {
    Game,
    Video,
    Book,
    Work,
    Comm,
    Life,
}

impl MediaGroup {
    pub const COUNT: usize = 6;

    pub const ALL: [MediaGroup; MediaGroup::COUNT] = [
        MediaGroup::Game,
        MediaGroup::Video,
        MediaGroup::Book,
        MediaGroup::Work,
        MediaGroup::Comm,
        MediaGroup::Life,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`index`](Self::index).
    pub fn from_index(i: usize) -> Option<MediaGroup> {
        MediaGroup::ALL.get(i).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MediaGroup::Game  => "GAME",
            MediaGroup::Video => "VIDEO",
            MediaGroup::Book  => "BOOK",
            MediaGroup::Work  => "WORK",
            MediaGroup::Comm  => "COMM",
            MediaGroup::Life  => "LIFE",
        }
    }
}

impl FromStr for MediaGroup {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GAME"                    => Ok(MediaGroup::Game),
            "VIDEO" | "MEDIA" | "SHORT" => Ok(MediaGroup::Video),
            "BOOK" | "STUDY"          => Ok(MediaGroup::Book),
            "WORK"                    => Ok(MediaGroup::Work),
            "COMM"                    => Ok(MediaGroup::Comm),
            "LIFE"                    => Ok(MediaGroup::Life),
            _ => Err(CoreError::UnknownMediaGroup(s.trim().to_string())),
        }
    }
}

impl fmt::Display for MediaGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── LifePattern ───────────────────────────────────────────────────────────────

/// Daily-schedule archetype.  Fixed for an agent's lifetime.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LifePattern {
    #[default]
    OfficeWorker,
    Student,
    Freelancer,
    NightShift,
}

impl LifePattern {
    pub const COUNT: usize = 4;

    pub const ALL: [LifePattern; LifePattern::COUNT] = [
        LifePattern::OfficeWorker,
        LifePattern::Student,
        LifePattern::Freelancer,
        LifePattern::NightShift,
    ];

    /// Share of the generated population per pattern, in `ALL` order.
    pub const WEIGHTS: [f64; LifePattern::COUNT] = [0.5, 0.3, 0.15, 0.05];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<LifePattern> {
        LifePattern::ALL.get(i).copied()
    }

    /// Initial-wallet multiplier reflecting income disparity.
    pub fn wallet_scale(self) -> f64 {
        match self {
            LifePattern::OfficeWorker => 1.0,
            LifePattern::Student      => 0.3,
            LifePattern::Freelancer   => 0.5,
            LifePattern::NightShift   => 0.8,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LifePattern::OfficeWorker => "office_worker",
            LifePattern::Student      => "student",
            LifePattern::Freelancer   => "freelancer",
            LifePattern::NightShift   => "night_shift",
        }
    }
}

impl FromStr for LifePattern {
    type Err = CoreError;

    /// Accepts either the numeric pattern id or the snake-case name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(i) = s.parse::<usize>() {
            return LifePattern::from_index(i)
                .ok_or_else(|| CoreError::UnknownLifePattern(s.to_string()));
        }
        LifePattern::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownLifePattern(s.to_string()))
    }
}

impl fmt::Display for LifePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
