//! Host-authored pairwise handicap overrides.
//!
//! The table is keyed by `(from, to, segment)` and stores a signed value: a
//! positive value is the number of strokes `from` gives `to` on that nine. Every
//! write also stores the negated value for the reverse direction, so at most one
//! direction of a pair ever owes strokes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::Limits;
use crate::course::Segment;
use crate::player::PlayerId;
use crate::validation::ValidationError;

/// One persisted row of the override table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideEntry {
    pub from: PlayerId,
    pub to: PlayerId,
    #[serde(default)]
    pub front9: i32,
    #[serde(default)]
    pub back9: i32,
}

impl OverrideEntry {
    fn value(&self, segment: Segment) -> i32 {
        match segment {
            Segment::Front9 => self.front9,
            Segment::Back9 => self.back9,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<OverrideEntry>", into = "Vec<OverrideEntry>")]
pub struct OverrideMatrix {
    values: BTreeMap<(PlayerId, PlayerId, Segment), i32>,
}

impl OverrideMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `from -> to` to `value` and `to -> from` to `-value`.
    pub fn set(&mut self, from: PlayerId, to: PlayerId, segment: Segment, value: i32) {
        if from == to {
            return;
        }
        if value == 0 {
            self.values.remove(&(from, to, segment));
            self.values.remove(&(to, from, segment));
        } else {
            self.values.insert((from, to, segment), value);
            self.values.insert((to, from, segment), -value);
        }
    }

    /// Signed value for one direction; 0 when unset.
    pub fn value(&self, from: PlayerId, to: PlayerId, segment: Segment) -> i32 {
        self.values.get(&(from, to, segment)).copied().unwrap_or(0)
    }

    /// Strokes `from` gives `to` on a nine. Negative values owe nothing.
    pub fn strokes_owed(&self, from: PlayerId, to: PlayerId, segment: Segment) -> u32 {
        self.value(from, to, segment).max(0).unsigned_abs()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Drop every entry involving a removed player.
    pub fn remove_player(&mut self, player: PlayerId) {
        self.values
            .retain(|&(from, to, _), _| from != player && to != player);
    }

    /// Build from persisted rows, enforcing range and reciprocity.
    ///
    /// A zero in one direction never conflicts: it is how a table that only records
    /// the giving side stores the receiving side.
    pub fn try_from_entries(
        entries: impl IntoIterator<Item = OverrideEntry>,
        limits: &Limits,
    ) -> Result<Self, ValidationError> {
        let mut matrix = Self::new();
        for entry in entries {
            for segment in Segment::ALL {
                let value = entry.value(segment);
                if value.unsigned_abs() > limits.max_override_strokes
                    || (entry.from == entry.to && value != 0)
                {
                    return Err(ValidationError::InvalidOverride {
                        from: entry.from,
                        to: entry.to,
                        segment,
                        value,
                        max: limits.max_override_strokes,
                    });
                }
                if value == 0 {
                    continue;
                }
                match matrix.values.get(&(entry.from, entry.to, segment)) {
                    Some(&existing) if existing != value => {
                        tracing::warn!(
                            from = entry.from,
                            to = entry.to,
                            ?segment,
                            existing,
                            value,
                            "Rejecting non-reciprocal handicap override"
                        );
                        return Err(ValidationError::AsymmetricOverride {
                            from: entry.from,
                            to: entry.to,
                            segment,
                        });
                    },
                    _ => matrix.set(entry.from, entry.to, segment, value),
                }
            }
        }
        Ok(matrix)
    }

    /// One row per unordered pair, keyed from the lower player id.
    pub fn entries(&self) -> Vec<OverrideEntry> {
        let mut rows: BTreeMap<(PlayerId, PlayerId), OverrideEntry> = BTreeMap::new();
        for (&(from, to, segment), &value) in &self.values {
            if from > to {
                continue;
            }
            let row = rows.entry((from, to)).or_insert(OverrideEntry {
                from,
                to,
                front9: 0,
                back9: 0,
            });
            match segment {
                Segment::Front9 => row.front9 = value,
                Segment::Back9 => row.back9 = value,
            }
        }
        rows.into_values().collect()
    }
}

impl TryFrom<Vec<OverrideEntry>> for OverrideMatrix {
    type Error = ValidationError;

    /// Persisted rows are only checked for reciprocity here. Magnitudes depend on
    /// the configured limits and are checked by `GameSnapshot::validate`.
    fn try_from(entries: Vec<OverrideEntry>) -> Result<Self, Self::Error> {
        let unbounded = Limits {
            max_override_strokes: u32::MAX,
            ..Limits::default()
        };
        Self::try_from_entries(entries, &unbounded)
    }
}

impl From<OverrideMatrix> for Vec<OverrideEntry> {
    fn from(matrix: OverrideMatrix) -> Self {
        matrix.entries()
    }
}
