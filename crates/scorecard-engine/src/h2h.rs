//! Head-to-head match points.
//!
//! Each hole is scored on its own from the focus player's side: net scores decide
//! WIN/LOSE/TIE, the gross score that set the pace is classified against par, and
//! the point table times the turbo multiplier gives the hole's value.

use std::fmt;

use serde::{Deserialize, Serialize};

use scorecard_core::course::Course;
use scorecard_core::player::{Player, PlayerId};
use scorecard_core::points::{PointTable, ScoreType};
use scorecard_core::scores::Scores;
use scorecard_core::turbo::TurboValues;

use crate::allocation::StrokeAllocation;
use crate::display;

/// Handicap relationship on a hole, from the focus player's side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handicap {
    #[default]
    None,
    /// The focus player gives the opponent this many strokes.
    Gives(u8),
    /// The focus player receives this many strokes.
    Gets(u8),
}

impl Handicap {
    pub fn label(self) -> String {
        match self {
            Self::None => "None".to_string(),
            Self::Gives(n) => format!("Give{n}"),
            Self::Gets(n) => format!("Get{n}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchResult {
    Win,
    Lose,
    Tie,
    /// At least one gross score is missing.
    Pending,
}

impl MatchResult {
    pub fn label(self) -> &'static str {
        match self {
            Self::Win => "WIN",
            Self::Lose => "LOSE",
            Self::Tie => "TIE",
            Self::Pending => "PENDING",
        }
    }
}

/// Everything the engine needs to score one hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleInput {
    pub hole: u8,
    pub par: u8,
    pub turbo: u32,
    pub player_gross: Option<u32>,
    pub opponent_gross: Option<u32>,
    pub handicap: Handicap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleOutcome {
    pub hole: u8,
    pub par: u8,
    pub turbo: u32,
    pub player_gross: Option<u32>,
    pub opponent_gross: Option<u32>,
    pub player_net: Option<i64>,
    pub opponent_net: Option<i64>,
    pub handicap: Handicap,
    pub score_type: Option<ScoreType>,
    pub base_point: u32,
    pub hole_point: u32,
    pub result: MatchResult,
    pub player_delta: i64,
}

/// Score a single hole.
pub fn score_hole(input: &HoleInput, points: &PointTable) -> HoleOutcome {
    // A recorded 0 is an unplayed hole.
    let (Some(player_gross), Some(opponent_gross)) = (
        input.player_gross.filter(|&g| g > 0),
        input.opponent_gross.filter(|&g| g > 0),
    ) else {
        return HoleOutcome {
            hole: input.hole,
            par: input.par,
            turbo: input.turbo,
            player_gross: None,
            opponent_gross: None,
            player_net: None,
            opponent_net: None,
            handicap: input.handicap,
            score_type: None,
            base_point: 0,
            hole_point: 0,
            result: MatchResult::Pending,
            player_delta: 0,
        };
    };

    let (player_net, opponent_net) = match input.handicap {
        Handicap::None => (i64::from(player_gross), i64::from(opponent_gross)),
        Handicap::Gives(n) => (
            i64::from(player_gross),
            i64::from(opponent_gross) - i64::from(n),
        ),
        Handicap::Gets(n) => (
            i64::from(player_gross) - i64::from(n),
            i64::from(opponent_gross),
        ),
    };

    let result = match player_net.cmp(&opponent_net) {
        std::cmp::Ordering::Less => MatchResult::Win,
        std::cmp::Ordering::Greater => MatchResult::Lose,
        std::cmp::Ordering::Equal => MatchResult::Tie,
    };

    // A loss is valued by the opponent's winning score.
    let deciding_gross = if result == MatchResult::Lose {
        opponent_gross
    } else {
        player_gross
    };
    let score_type = ScoreType::classify(deciding_gross, input.par);
    let base_point = points.points_for(score_type);
    let hole_point = base_point.saturating_mul(input.turbo);
    let turbo = i64::from(input.turbo);
    let par_point = i64::from(points.par_or_worse);
    let par = u32::from(input.par);

    let player_delta = match result {
        MatchResult::Win => i64::from(hole_point),
        MatchResult::Lose => -i64::from(hole_point),
        MatchResult::Tie if opponent_gross < par => {
            // The opponent's sub-par score still costs the focus player its
            // value above the par tier.
            let opponent_type = ScoreType::classify(opponent_gross, input.par);
            let penalty_point = i64::from(points.points_for(opponent_type)) * turbo;
            -(penalty_point - par_point * turbo)
        },
        MatchResult::Tie if input.handicap != Handicap::None && player_gross < par => {
            (i64::from(base_point) - par_point) * turbo
        },
        MatchResult::Tie | MatchResult::Pending => 0,
    };

    HoleOutcome {
        hole: input.hole,
        par: input.par,
        turbo: input.turbo,
        player_gross: Some(player_gross),
        opponent_gross: Some(opponent_gross),
        player_net: Some(player_net),
        opponent_net: Some(opponent_net),
        handicap: input.handicap,
        score_type: Some(score_type),
        base_point,
        hole_point,
        result,
        player_delta,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct H2hSummary {
    pub total_points: i64,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub pending: u32,
}

impl H2hSummary {
    pub fn from_holes(holes: &[HoleOutcome]) -> Self {
        let mut summary = Self::default();
        for outcome in holes {
            summary.total_points += outcome.player_delta;
            match outcome.result {
                MatchResult::Win => summary.wins += 1,
                MatchResult::Lose => summary.losses += 1,
                MatchResult::Tie => summary.ties += 1,
                MatchResult::Pending => summary.pending += 1,
            }
        }
        summary
    }
}

/// A full 18-hole match between the focus player and one opponent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct H2hMatch {
    pub player: PlayerId,
    pub opponent: PlayerId,
    pub player_name: String,
    pub opponent_name: String,
    pub holes: Vec<HoleOutcome>,
    pub summary: H2hSummary,
}

/// Inputs shared by every match in a game.
#[derive(Debug, Clone, Copy)]
pub struct MatchContext<'a> {
    pub course: &'a Course,
    pub scores: &'a Scores,
    pub turbo: &'a TurboValues,
    pub allocation: &'a StrokeAllocation,
    pub points: &'a PointTable,
}

/// Score every hole of the course for `player` against `opponent`.
pub fn score_match(ctx: &MatchContext<'_>, player: &Player, opponent: &Player) -> H2hMatch {
    let holes: Vec<HoleOutcome> = ctx
        .course
        .holes
        .iter()
        .map(|hole| {
            let input = HoleInput {
                hole: hole.number,
                par: hole.par,
                turbo: ctx.turbo.multiplier(hole.number),
                player_gross: ctx.scores.gross(player.id, hole.number),
                opponent_gross: ctx.scores.gross(opponent.id, hole.number),
                handicap: display::resolve(ctx.allocation, player.id, opponent.id, hole.number)
                    .into(),
            };
            score_hole(&input, ctx.points)
        })
        .collect();
    let summary = H2hSummary::from_holes(&holes);

    H2hMatch {
        player: player.id,
        opponent: opponent.id,
        player_name: player.display_name.clone(),
        opponent_name: opponent.display_name.clone(),
        holes,
        summary,
    }
}

fn cell<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

impl fmt::Display for H2hMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} vs {} ===", self.player_name, self.opponent_name)?;
        writeln!(
            f,
            "Hole | Par | Turbo | Gross | Opp | Net | OppNet | HC     | Type      | Base | Point | Result  | Delta"
        )?;
        for h in &self.holes {
            writeln!(
                f,
                "H{:>2}  | {:>3} | x{:<4} | {:>5} | {:>3} | {:>3} | {:>6} | {:<6} | {:<9} | {:>4} | {:>5} | {:<7} | {:+}",
                h.hole,
                h.par,
                h.turbo,
                cell(h.player_gross),
                cell(h.opponent_gross),
                cell(h.player_net),
                cell(h.opponent_net),
                h.handicap.label(),
                h.score_type.map_or("-", ScoreType::label),
                h.base_point,
                h.hole_point,
                h.result.label(),
                h.player_delta,
            )?;
        }
        writeln!(f, "Total Points: {:+}", self.summary.total_points)?;
        write!(
            f,
            "WIN: {} | LOSE: {} | TIE: {} | PENDING: {}",
            self.summary.wins, self.summary.losses, self.summary.ties, self.summary.pending
        )
    }
}
