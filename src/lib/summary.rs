//! Weekly aggregation of stress levels

use std::{collections::BTreeMap, fmt, ops};

use crate::lib::{date::WeekKey, entry::Entry};

/// Fewest entries for which a trend is meaningful
pub const MIN_ENTRIES: usize = 2;

/// Running sum of the stress levels that were reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    total: u32,
    count: usize,
}

impl Tally {
    fn mean(self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.total as f64 / self.count as f64)
        }
    }
}

impl ops::AddAssign<&Entry> for Tally {
    fn add_assign(&mut self, entry: &Entry) {
        if let Some(stress) = entry.stress {
            self.total += stress.value() as u32;
            self.count += 1;
        }
    }
}

/// All entries of a single week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    week: WeekKey,
    entries: usize,
    stress: Tally,
}

impl Summary {
    pub fn new_week(week: WeekKey) -> Self {
        Self {
            week,
            entries: 0,
            stress: Tally::default(),
        }
    }

    pub fn week(&self) -> WeekKey {
        self.week
    }

    /// Number of entries registered, including those without a stress level
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Average stress of the week, `None` if no entry reported one
    pub fn mean(&self) -> Option<f64> {
        self.stress.mean()
    }
}

impl ops::AddAssign<&Entry> for Summary {
    fn add_assign(&mut self, entry: &Entry) {
        debug_assert_eq!(entry.week(), self.week);
        self.entries += 1;
        self.stress += entry;
    }
}

/// Not enough entries to compute a trend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsufficientData {
    pub found: usize,
}

impl fmt::Display for InsufficientData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Not enough data to plot trends: {} entr{} recorded, at least {} needed.",
            self.found,
            if self.found == 1 { "y" } else { "ies" },
            MIN_ENTRIES,
        )
    }
}

/// Weekly summaries in chronological order
#[derive(Debug)]
pub struct Calendar {
    items: Vec<Summary>,
    overall: Tally,
}

impl Calendar {
    /// Group entries by week
    ///
    /// Entries need not be sorted. Fails if there are fewer than
    /// `MIN_ENTRIES` entries in total.
    pub fn weekly(entries: &[Entry]) -> Result<Self, InsufficientData> {
        if entries.len() < MIN_ENTRIES {
            return Err(InsufficientData {
                found: entries.len(),
            });
        }
        let mut weeks = BTreeMap::new();
        let mut overall = Tally::default();
        for entry in entries {
            let week = entry.week();
            *weeks
                .entry(week)
                .or_insert_with(|| Summary::new_week(week)) += entry;
            overall += entry;
        }
        tracing::debug!(
            entries = entries.len(),
            weeks = weeks.len(),
            "aggregated stress levels"
        );
        Ok(Self {
            items: weeks.into_values().collect(),
            overall,
        })
    }

    pub fn contents(&self) -> &[Summary] {
        &self.items
    }

    /// Average stress over all entries regardless of the week
    pub fn overall_mean(&self) -> Option<f64> {
        self.overall.mean()
    }
}
