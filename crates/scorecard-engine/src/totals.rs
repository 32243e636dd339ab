use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use scorecard_core::course::{Course, Segment};
use scorecard_core::player::{Player, PlayerId};
use scorecard_core::scores::Scores;

/// Running gross totals for one player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTotals {
    pub player_id: PlayerId,
    pub front9: u32,
    pub back9: u32,
    pub total: u32,
    pub holes_played: u8,
    /// Gross minus par over the holes played so far.
    pub to_par: i64,
}

impl PlayerTotals {
    pub fn compute(player_id: PlayerId, course: &Course, scores: &Scores) -> Self {
        let mut totals = Self {
            player_id,
            ..Self::default()
        };
        let mut par_played = 0u32;

        for (hole, gross) in scores.player_holes(player_id).filter(|&(_, g)| g > 0) {
            let Some(h) = course.hole(hole) else {
                continue;
            };
            match Segment::of(hole) {
                Segment::Front9 => totals.front9 += gross,
                Segment::Back9 => totals.back9 += gross,
            }
            totals.holes_played += 1;
            par_played += u32::from(h.par);
        }

        totals.total = totals.front9 + totals.back9;
        totals.to_par = i64::from(totals.total) - i64::from(par_played);
        totals
    }
}

pub fn all_totals(
    players: &[Player],
    course: &Course,
    scores: &Scores,
) -> BTreeMap<PlayerId, PlayerTotals> {
    players
        .iter()
        .map(|p| (p.id, PlayerTotals::compute(p.id, course, scores)))
        .collect()
}
