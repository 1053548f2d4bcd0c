//! Scheduled, one-tick world events.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use psim_core::{MediaGroup, Tick};

use crate::CatalogError;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum EventKind {
    /// The target group is unavailable for the tick.
    ServerDown,
    /// The target group's fun reward is multiplied by the magnitude.
    HotTime,
    /// The magnitude is added to the target group's viral-trend score.
    ViralBoost,
}

impl EventKind {
    /// Magnitude used when a schedule row leaves it blank.
    pub fn default_magnitude(self) -> f64 {
        match self {
            EventKind::ServerDown => 0.0,
            EventKind::HotTime    => 2.0,
            EventKind::ViralBoost => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::ServerDown => "SERVER_DOWN",
            EventKind::HotTime    => "HOT_TIME",
            EventKind::ViralBoost => "VIRAL_BOOST",
        }
    }
}

impl FromStr for EventKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SERVER_DOWN" => Ok(EventKind::ServerDown),
            "HOT_TIME"    => Ok(EventKind::HotTime),
            "VIRAL_BOOST" => Ok(EventKind::ViralBoost),
            other => Err(CatalogError::InvalidEvent(format!("unknown event type {other:?}"))),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directive that applies during exactly one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub tick:      Tick,
    pub kind:      EventKind,
    pub target:    MediaGroup,
    pub magnitude: f64,
}

impl Event {
    /// Event with the kind's default magnitude.
    pub fn new(tick: Tick, kind: EventKind, target: MediaGroup) -> Self {
        Self { tick, kind, target, magnitude: kind.default_magnitude() }
    }

    pub fn with_magnitude(mut self, magnitude: f64) -> Self {
        self.magnitude = magnitude;
        self
    }

    /// Marker text for the log, e.g. `"08:15 HOT_TIME GAME x2"`.
    pub fn annotation(&self, time_label: &str) -> String {
        match self.kind {
            EventKind::ServerDown => format!("{time_label} SERVER_DOWN {}", self.target),
            EventKind::HotTime => format!("{time_label} HOT_TIME {} x{}", self.target, self.magnitude),
            EventKind::ViralBoost => {
                format!("{time_label} VIRAL_BOOST {} +{}", self.target, self.magnitude)
            }
        }
    }
}

/// Events keyed by the tick they fire on.  Several events may share a tick;
/// they are applied in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventSchedule {
    by_tick: BTreeMap<Tick, Vec<Event>>,
}

impl EventSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.by_tick.entry(event.tick).or_default().push(event);
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, event: Event) -> Self {
        self.push(event);
        self
    }

    /// Events firing at `tick`; empty if none.
    pub fn at(&self, tick: Tick) -> &[Event] {
        self.by_tick.get(&tick).map_or(&[], Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.by_tick.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tick.is_empty()
    }

    /// Last tick that has an event, if any.
    pub fn last_tick(&self) -> Option<Tick> {
        self.by_tick.keys().next_back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.by_tick.values().flatten()
    }
}
