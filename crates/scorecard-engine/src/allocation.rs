//! Handicap stroke allocation.
//!
//! Strokes owed on a nine are spread over its non-turbo holes: par 4s and 5s
//! first, hardest (lowest stroke index) first, then par 3s in the same order.
//! A second pass upgrades holes to two strokes in that same order. No hole takes
//! more than two; anything beyond that is dropped and reported.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use scorecard_core::course::{Course, Hole, Segment};
use scorecard_core::player::PlayerId;
use scorecard_core::turbo::TurboValues;

use crate::matrix::HandicapMatrix;

/// Most strokes a single hole can carry.
pub const MAX_STROKES_PER_HOLE: u8 = 2;

/// Strokes placed on the holes of one nine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentAllocation {
    /// Hole number to strokes (1 or 2). Holes without strokes are absent.
    pub strokes: BTreeMap<u8, u8>,
    /// Owed strokes that did not fit on the eligible holes.
    pub dropped: u32,
}

impl SegmentAllocation {
    pub fn strokes_on(&self, hole: u8) -> u8 {
        self.strokes.get(&hole).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.strokes.values().map(|&s| u32::from(s)).sum()
    }
}

/// Allocate `owed` strokes over one nine.
pub fn allocate_segment(owed: u32, holes: &[Hole], turbo: &TurboValues) -> SegmentAllocation {
    if owed == 0 {
        return SegmentAllocation::default();
    }

    let (mut long, mut short): (Vec<Hole>, Vec<Hole>) = holes
        .iter()
        .filter(|h| !turbo.is_turbo(h.number))
        .partition(|h| h.par >= 4);
    long.sort_by_key(|h| h.hc);
    short.sort_by_key(|h| h.hc);

    let mut allocation = SegmentAllocation::default();
    let mut remaining = owed;

    for hole in long.iter().chain(short.iter()) {
        if remaining == 0 {
            break;
        }
        allocation.strokes.insert(hole.number, 1);
        remaining -= 1;
    }

    for hole in long.iter().chain(short.iter()) {
        if remaining == 0 {
            break;
        }
        if let Some(s) = allocation.strokes.get_mut(&hole.number)
            && *s < MAX_STROKES_PER_HOLE
        {
            *s += 1;
            remaining -= 1;
        }
    }

    if remaining > 0 {
        tracing::debug!(
            owed,
            dropped = remaining,
            eligible = long.len() + short.len(),
            "Owed strokes exceed allocatable holes"
        );
    }
    allocation.dropped = remaining;
    allocation
}

/// Both nines for one ordered pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairAllocation {
    pub front9: SegmentAllocation,
    pub back9: SegmentAllocation,
}

impl PairAllocation {
    pub fn segment(&self, segment: Segment) -> &SegmentAllocation {
        match segment {
            Segment::Front9 => &self.front9,
            Segment::Back9 => &self.back9,
        }
    }

    fn segment_mut(&mut self, segment: Segment) -> &mut SegmentAllocation {
        match segment {
            Segment::Front9 => &mut self.front9,
            Segment::Back9 => &mut self.back9,
        }
    }

    pub fn strokes_on(&self, hole: u8) -> u8 {
        self.segment(Segment::of(hole)).strokes_on(hole)
    }
}

/// Stroke placement for every ordered pair that owes something.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrokeAllocation {
    pairs: BTreeMap<(PlayerId, PlayerId), PairAllocation>,
}

impl StrokeAllocation {
    pub fn compute(course: &Course, turbo: &TurboValues, matrix: &HandicapMatrix) -> Self {
        let front = course.front_nine();
        let back = course.back_nine();
        let mut pairs: BTreeMap<(PlayerId, PlayerId), PairAllocation> = BTreeMap::new();

        for (from, to, segment, owed) in matrix.entries() {
            let holes = match segment {
                Segment::Front9 => &front,
                Segment::Back9 => &back,
            };
            *pairs.entry((from, to)).or_default().segment_mut(segment) =
                allocate_segment(owed, holes, turbo);
        }

        Self { pairs }
    }

    /// Strokes `from` gives `to` on a hole.
    pub fn strokes(&self, from: PlayerId, to: PlayerId, hole: u8) -> u8 {
        self.pairs
            .get(&(from, to))
            .map_or(0, |pair| pair.strokes_on(hole))
    }

    pub fn pair(&self, from: PlayerId, to: PlayerId) -> Option<&PairAllocation> {
        self.pairs.get(&(from, to))
    }

    /// Pairs whose owed strokes did not all fit: `(from, to, segment, dropped)`.
    pub fn over_allocated(&self) -> impl Iterator<Item = (PlayerId, PlayerId, Segment, u32)> + '_ {
        self.pairs.iter().flat_map(|(&(from, to), pair)| {
            Segment::ALL.into_iter().filter_map(move |segment| {
                let dropped = pair.segment(segment).dropped;
                (dropped > 0).then_some((from, to, segment, dropped))
            })
        })
    }
}
