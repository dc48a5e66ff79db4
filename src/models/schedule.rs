//! Schedule (solution) model.
//!
//! A schedule is the time-ordered list of section passages, one entry
//! per train. Entries are produced values; nothing here is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::time::minutes_between;
use super::{PriorityTier, SectionId, TrainId};

/// Planned passage of one train through the section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Scheduled train.
    pub train_id: TrainId,
    /// Section being traversed.
    pub section_id: SectionId,
    /// Planned section entry.
    pub planned_entry: DateTime<Utc>,
    /// Planned section exit.
    pub planned_exit: DateTime<Utc>,
    /// Speed used for the traversal (km/h).
    pub effective_speed_kmh: f64,
    /// Train priority tier.
    pub priority: PriorityTier,
    /// Weight the train carried in the objective (tier weight).
    pub priority_weight: f64,
}

impl ScheduleEntry {
    /// Occupation time (minutes).
    pub fn duration_minutes(&self) -> f64 {
        minutes_between(self.planned_entry, self.planned_exit)
    }
}

/// A complete schedule for one section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Entries ordered by planned entry.
    pub entries: Vec<ScheduleEntry>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a schedule from entries in any order, sorting by entry time.
    ///
    /// Equal entry times are ordered by train id.
    pub fn from_entries(mut entries: Vec<ScheduleEntry>) -> Self {
        entries.sort_by(|a, b| {
            a.planned_entry
                .cmp(&b.planned_entry)
                .then(a.train_id.cmp(&b.train_id))
        });
        Self { entries }
    }

    /// Appends an entry. Callers append in entry order.
    pub fn push(&mut self, entry: ScheduleEntry) {
        self.entries.push(entry);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the schedule has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in entry order.
    pub fn iter(&self) -> std::slice::Iter<'_, ScheduleEntry> {
        self.entries.iter()
    }

    /// Finds the entry for a train.
    pub fn entry_for_train(&self, train_id: TrainId) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.train_id == train_id)
    }

    /// Latest planned exit.
    pub fn makespan(&self) -> Option<DateTime<Utc>> {
        self.entries.iter().map(|e| e.planned_exit).max()
    }

    /// Earliest planned entry.
    pub fn first_entry(&self) -> Option<DateTime<Utc>> {
        self.entries.iter().map(|e| e.planned_entry).min()
    }

    /// Train ids in entry order.
    pub fn train_order(&self) -> Vec<TrainId> {
        self.entries.iter().map(|e| e.train_id).collect()
    }

    /// First pair of consecutive occupations separated by less than
    /// `headway_minutes`, as `(earlier, later)` train ids.
    ///
    /// A tolerance of one microsecond absorbs timestamp rounding.
    pub fn first_conflict(&self, headway_minutes: f64) -> Option<(TrainId, TrainId)> {
        let mut ordered: Vec<&ScheduleEntry> = self.entries.iter().collect();
        ordered.sort_by_key(|e| e.planned_entry);

        ordered.windows(2).find_map(|pair| {
            let gap = minutes_between(pair[0].planned_exit, pair[1].planned_entry);
            (gap + 1e-6 < headway_minutes).then_some((pair[0].train_id, pair[1].train_id))
        })
    }

    /// Whether consecutive occupations respect `headway_minutes`.
    pub fn is_conflict_free(&self, headway_minutes: f64) -> bool {
        self.first_conflict(headway_minutes).is_none()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ScheduleEntry;
    type IntoIter = std::slice::Iter<'a, ScheduleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
