//! Animal penalty totals. Each record is weighted by the turbo multiplier of its hole.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use scorecard_core::animal::{AnimalRecord, AnimalSpecies};
use scorecard_core::course::Segment;
use scorecard_core::player::{Player, PlayerId};
use scorecard_core::turbo::TurboValues;

/// Count per species, with every species present.
pub type SpeciesCounts = BTreeMap<AnimalSpecies, u32>;

fn zeroed_species() -> SpeciesCounts {
    AnimalSpecies::ALL.into_iter().map(|s| (s, 0)).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalTotals {
    pub player_id: PlayerId,
    /// Weighted points per hole on the front nine. Holes without animals are absent.
    pub front9: BTreeMap<u8, u32>,
    pub back9: BTreeMap<u8, u32>,
    pub total_front9: u32,
    pub total_back9: u32,
    pub grand_total: u32,
    pub by_species: SpeciesCounts,
}

impl AnimalTotals {
    pub fn empty(player_id: PlayerId) -> Self {
        Self {
            player_id,
            front9: BTreeMap::new(),
            back9: BTreeMap::new(),
            total_front9: 0,
            total_back9: 0,
            grand_total: 0,
            by_species: zeroed_species(),
        }
    }

    fn add(&mut self, record: &AnimalRecord, points: u32) {
        let (holes, total) = match Segment::of(record.hole) {
            Segment::Front9 => (&mut self.front9, &mut self.total_front9),
            Segment::Back9 => (&mut self.back9, &mut self.total_back9),
        };
        *holes.entry(record.hole).or_default() += points;
        *total += points;
        self.grand_total += points;
        *self.by_species.entry(record.species).or_default() += points;
    }

    /// Weighted points on one hole.
    pub fn hole(&self, hole: u8) -> u32 {
        let holes = match Segment::of(hole) {
            Segment::Front9 => &self.front9,
            Segment::Back9 => &self.back9,
        };
        holes.get(&hole).copied().unwrap_or(0)
    }
}

/// Weighted totals for every rostered player. Records for unknown players are skipped.
pub fn aggregate(
    records: &[AnimalRecord],
    players: &[Player],
    turbo: &TurboValues,
) -> BTreeMap<PlayerId, AnimalTotals> {
    let mut totals: BTreeMap<PlayerId, AnimalTotals> = players
        .iter()
        .map(|p| (p.id, AnimalTotals::empty(p.id)))
        .collect();

    for record in records {
        if record.count == 0 {
            continue;
        }
        let Some(entry) = totals.get_mut(&record.player_id) else {
            tracing::trace!(player_id = record.player_id, "Skipping animal record for unknown player");
            continue;
        };
        let points = record.count.saturating_mul(turbo.multiplier(record.hole));
        entry.add(record, points);
    }

    totals
}

/// Raw counts by species for one hole, for each rostered player.
pub fn hole_summary(
    records: &[AnimalRecord],
    hole: u8,
    players: &[Player],
) -> BTreeMap<PlayerId, SpeciesCounts> {
    players
        .iter()
        .map(|p| {
            let mut counts = zeroed_species();
            for r in records
                .iter()
                .filter(|r| r.player_id == p.id && r.hole == hole)
            {
                *counts.entry(r.species).or_default() += r.count;
            }
            (p.id, counts)
        })
        .collect()
}

/// Unweighted counts by species over the whole round.
pub fn raw_counts(records: &[AnimalRecord], players: &[Player]) -> BTreeMap<PlayerId, SpeciesCounts> {
    let mut totals: BTreeMap<PlayerId, SpeciesCounts> =
        players.iter().map(|p| (p.id, zeroed_species())).collect();
    for r in records {
        if let Some(counts) = totals.get_mut(&r.player_id) {
            *counts.entry(r.species).or_default() += r.count;
        }
    }
    totals
}
