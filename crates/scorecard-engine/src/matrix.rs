use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use scorecard_core::course::Segment;
use scorecard_core::handicap::OverrideMatrix;
use scorecard_core::player::{Player, PlayerId};

/// Where a game's stroke matrix came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatrixSource {
    /// Differences of the players' own handicaps.
    Derived,
    /// The host's pairwise override table.
    Override,
}

/// Strokes owed for every ordered player pair, per nine.
///
/// Only non-zero entries are stored; lookups default to 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandicapMatrix {
    owed: BTreeMap<(PlayerId, PlayerId, Segment), u32>,
    source: MatrixSource,
}

impl HandicapMatrix {
    /// `owed[A][B] = max(0, handicap A - handicap B)`, the same on both nines.
    pub fn derive(players: &[Player]) -> Self {
        let mut owed = BTreeMap::new();
        for from in players {
            for to in players {
                if from.id == to.id {
                    continue;
                }
                let diff = from.handicap_or_zero().saturating_sub(to.handicap_or_zero());
                if diff > 0 {
                    for segment in Segment::ALL {
                        owed.insert((from.id, to.id, segment), u32::from(diff));
                    }
                }
            }
        }
        Self {
            owed,
            source: MatrixSource::Derived,
        }
    }

    /// Take owed strokes straight from the override table, for rostered players only.
    pub fn from_overrides(players: &[Player], overrides: &OverrideMatrix) -> Self {
        let mut owed = BTreeMap::new();
        for from in players {
            for to in players {
                if from.id == to.id {
                    continue;
                }
                for segment in Segment::ALL {
                    let strokes = overrides.strokes_owed(from.id, to.id, segment);
                    if strokes > 0 {
                        owed.insert((from.id, to.id, segment), strokes);
                    }
                }
            }
        }
        Self {
            owed,
            source: MatrixSource::Override,
        }
    }

    /// An override table, when present, replaces the derived matrix.
    pub fn for_game(players: &[Player], overrides: Option<&OverrideMatrix>) -> Self {
        match overrides {
            Some(table) => Self::from_overrides(players, table),
            None => Self::derive(players),
        }
    }

    pub fn strokes_owed(&self, from: PlayerId, to: PlayerId, segment: Segment) -> u32 {
        self.owed.get(&(from, to, segment)).copied().unwrap_or(0)
    }

    pub fn source(&self) -> MatrixSource {
        self.source
    }

    /// Non-zero `(from, to, segment, strokes)` entries.
    pub fn entries(&self) -> impl Iterator<Item = (PlayerId, PlayerId, Segment, u32)> + '_ {
        self.owed
            .iter()
            .map(|(&(from, to, segment), &strokes)| (from, to, segment, strokes))
    }
}
