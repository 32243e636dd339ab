//! Full scoreboard recomputation for one game.
//!
//! A [`GameView`] builds the stroke matrix and allocation once from a snapshot;
//! every focus player's scoreboard is then derived from it without further state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use scorecard_core::course::Segment;
use scorecard_core::game::GameSnapshot;
use scorecard_core::net::messages::{MessageType, ViewUpdateMsg};
use scorecard_core::net::protocol::{MAX_MESSAGE_SIZE, ProtocolError, encode_message};
use scorecard_core::player::{PlayerId, PlayerRole};

use crate::allocation::StrokeAllocation;
use crate::animals::{self, AnimalTotals};
use crate::display::{self, StrokeIndicator};
use crate::h2h::{self, H2hMatch, MatchContext};
use crate::matrix::{HandicapMatrix, MatrixSource};
use crate::totals::{self, PlayerTotals};

/// Owed strokes on one nine that did not fit on its eligible holes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverAllocation {
    pub from: PlayerId,
    pub to: PlayerId,
    pub segment: Segment,
    pub dropped: u32,
}

/// One player's column as seen by the focus player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub player_id: PlayerId,
    pub display_name: String,
    pub role: PlayerRole,
    /// Holes carrying a stroke marker. Empty for the focus player's own column.
    pub indicators: BTreeMap<u8, StrokeIndicator>,
    /// Focus player's match against this player; `None` on the focus column.
    pub h2h: Option<H2hMatch>,
    pub totals: PlayerTotals,
    pub animals: AnimalTotals,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub focus: PlayerId,
    pub matrix_source: MatrixSource,
    pub columns: Vec<Column>,
    pub over_allocated: Vec<OverAllocation>,
}

impl Scoreboard {
    pub fn column(&self, player: PlayerId) -> Option<&Column> {
        self.columns.iter().find(|c| c.player_id == player)
    }

    /// Serialize into a broadcastable view update.
    ///
    /// The view is written positionally; it holds no internally tagged enums. The
    /// returned message is guaranteed to fit in one frame once wrapped.
    pub fn encode(&self, game_id: u64) -> Result<ViewUpdateMsg, ProtocolError> {
        let view_data =
            rmp_serde::to_vec(self).map_err(|e| ProtocolError::SerializeError(e.to_string()))?;
        if view_data.len() >= MAX_MESSAGE_SIZE {
            return Err(ProtocolError::PayloadTooLarge(view_data.len()));
        }
        let msg = ViewUpdateMsg {
            game_id,
            focus: self.focus,
            view_data,
        };
        encode_message(MessageType::ScoreboardView, &msg)?;
        Ok(msg)
    }

    pub fn decode(msg: &ViewUpdateMsg) -> Result<Self, ProtocolError> {
        rmp_serde::from_slice(&msg.view_data)
            .map_err(|e| ProtocolError::DeserializeError(e.to_string()))
    }
}

/// Derived state shared by every scoreboard of one game.
#[derive(Debug, Clone)]
pub struct GameView<'a> {
    snapshot: &'a GameSnapshot,
    matrix: HandicapMatrix,
    allocation: StrokeAllocation,
}

impl<'a> GameView<'a> {
    pub fn compute(snapshot: &'a GameSnapshot) -> Self {
        let matrix = HandicapMatrix::for_game(&snapshot.players, snapshot.overrides.as_ref());
        let allocation = StrokeAllocation::compute(&snapshot.course, &snapshot.turbo, &matrix);
        tracing::debug!(
            players = snapshot.players.len(),
            source = ?matrix.source(),
            turbo_holes = snapshot.turbo.turbo_holes().count(),
            "Recomputed stroke allocation"
        );
        Self {
            snapshot,
            matrix,
            allocation,
        }
    }

    pub fn matrix(&self) -> &HandicapMatrix {
        &self.matrix
    }

    pub fn allocation(&self) -> &StrokeAllocation {
        &self.allocation
    }

    pub fn indicator(&self, viewer: PlayerId, target: PlayerId, hole: u8) -> StrokeIndicator {
        display::resolve(&self.allocation, viewer, target, hole)
    }

    pub fn over_allocated(&self) -> Vec<OverAllocation> {
        self.allocation
            .over_allocated()
            .map(|(from, to, segment, dropped)| OverAllocation {
                from,
                to,
                segment,
                dropped,
            })
            .collect()
    }

    fn match_context(&self) -> MatchContext<'_> {
        MatchContext {
            course: &self.snapshot.course,
            scores: &self.snapshot.scores,
            turbo: &self.snapshot.turbo,
            allocation: &self.allocation,
            points: &self.snapshot.points,
        }
    }

    /// Match for `player` against `opponent`. `None` if either is not on the roster
    /// or both are the same player.
    pub fn h2h(&self, player: PlayerId, opponent: PlayerId) -> Option<H2hMatch> {
        if player == opponent {
            return None;
        }
        let p = self.snapshot.player(player)?;
        let o = self.snapshot.player(opponent)?;
        Some(h2h::score_match(&self.match_context(), p, o))
    }

    /// Everything the focus player's scorecard shows. `None` for an unknown focus.
    pub fn scoreboard(&self, focus: PlayerId) -> Option<Scoreboard> {
        let snap = self.snapshot;
        let focus_player = snap.player(focus)?;
        let ctx = self.match_context();
        let mut player_totals = totals::all_totals(&snap.players, &snap.course, &snap.scores);
        let mut animal_totals = animals::aggregate(&snap.animals, &snap.players, &snap.turbo);

        let columns: Vec<Column> = snap
            .players
            .iter()
            .map(|p| {
                let (indicators, h2h) = if p.id == focus {
                    (BTreeMap::new(), None)
                } else {
                    let indicators = snap
                        .course
                        .holes
                        .iter()
                        .map(|h| (h.number, self.indicator(focus, p.id, h.number)))
                        .filter(|(_, ind)| *ind != StrokeIndicator::None)
                        .collect();
                    (indicators, Some(h2h::score_match(&ctx, focus_player, p)))
                };
                Column {
                    player_id: p.id,
                    display_name: p.display_name.clone(),
                    role: p.role,
                    indicators,
                    h2h,
                    totals: player_totals.remove(&p.id).unwrap_or_default(),
                    animals: animal_totals
                        .remove(&p.id)
                        .unwrap_or_else(|| AnimalTotals::empty(p.id)),
                }
            })
            .collect();

        tracing::debug!(focus, players = columns.len(), "Built scoreboard");
        Some(Scoreboard {
            focus,
            matrix_source: self.matrix.source(),
            columns,
            over_allocated: self.over_allocated(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scorecard_core::animal::{AnimalRecord, AnimalSpecies};
    use scorecard_core::config::{Limits, PLAYER_CEILING};
    use scorecard_core::handicap::OverrideMatrix;
    use scorecard_core::net::messages::ServerMessage;
    use scorecard_core::net::protocol::{decode_server_message, encode_server_message};
    use scorecard_core::test_helpers::{fill_scores, sample_snapshot};
    use scorecard_core::turbo::{TurboPreset, TurboValues};

    #[test]
    fn unknown_focus_has_no_scoreboard() {
        let snap = sample_snapshot(2);
        let view = GameView::compute(&snap);
        assert!(view.scoreboard(99).is_none());
        assert!(view.h2h(1, 99).is_none());
        assert!(view.h2h(1, 1).is_none());
    }

    #[test]
    fn focus_column_is_bare() {
        let snap = sample_snapshot(3);
        let view = GameView::compute(&snap);
        let board = view.scoreboard(2).unwrap();
        assert_eq!(board.columns.len(), 3);
        let own = board.column(2).unwrap();
        assert!(own.indicators.is_empty());
        assert!(own.h2h.is_none());
        assert!(board.column(1).unwrap().h2h.is_some());
        assert_eq!(board.matrix_source, MatrixSource::Derived);
    }

    #[test]
    fn indicators_follow_handicap_difference() {
        // Handicaps 0 and 4: player 2 gives four strokes on each nine.
        let snap = sample_snapshot(2);
        let view = GameView::compute(&snap);
        let board = view.scoreboard(1).unwrap();
        let col = board.column(2).unwrap();
        assert_eq!(col.indicators.len(), 8);
        assert_eq!(col.indicators[&2], StrokeIndicator::Receiving(1));
        assert_eq!(col.indicators[&13], StrokeIndicator::Receiving(1));

        let other = view.scoreboard(2).unwrap();
        assert_eq!(other.column(1).unwrap().indicators[&2], StrokeIndicator::Giving(1));
    }

    #[test]
    fn turbo_moves_strokes() {
        let mut snap = sample_snapshot(2);
        snap.set_turbo(2, 2, &Limits::default()).unwrap();
        let view = GameView::compute(&snap);
        assert_eq!(view.indicator(1, 2, 2), StrokeIndicator::None);
        // The fifth hardest front long hole picks up the stroke.
        assert_eq!(view.indicator(1, 2, 6), StrokeIndicator::Receiving(1));
    }

    #[test]
    fn override_replaces_handicaps() {
        let mut snap = sample_snapshot(2);
        let mut table = OverrideMatrix::new();
        table.set(1, 2, Segment::Back9, 1);
        snap.set_overrides(Some(table));
        let view = GameView::compute(&snap);
        let board = view.scoreboard(1).unwrap();
        assert_eq!(board.matrix_source, MatrixSource::Override);
        assert_eq!(view.matrix().strokes_owed(2, 1, Segment::Front9), 0);
        assert_eq!(view.allocation().strokes(1, 2, 13), 1);
        let col = board.column(2).unwrap();
        assert_eq!(col.indicators.len(), 1);
        assert_eq!(col.indicators[&13], StrokeIndicator::Giving(1));
    }

    #[test]
    fn over_allocation_is_reported() {
        let mut snap = sample_snapshot(2);
        snap.set_handicap(2, Some(20), &Limits::default()).unwrap();
        let view = GameView::compute(&snap);
        let over = view.scoreboard(1).unwrap().over_allocated;
        assert_eq!(over.len(), 2);
        assert!(over.iter().all(|o| o.from == 2 && o.to == 1 && o.dropped == 2));
    }

    #[test]
    fn columns_carry_totals_and_animals() {
        let mut snap = sample_snapshot(2);
        fill_scores(&mut snap, 2, 4);
        snap.set_turbo(9, 2, &Limits::default()).unwrap();
        snap.set_animal_count(2, 9, AnimalSpecies::Frog, 1).unwrap();
        let view = GameView::compute(&snap);
        let board = view.scoreboard(1).unwrap();
        let col = board.column(2).unwrap();
        assert_eq!(col.totals.total, 72);
        assert_eq!(col.totals.to_par, 0);
        assert_eq!(col.animals.grand_total, 2);
        assert_eq!(board.column(1).unwrap().animals.grand_total, 0);
    }

    #[test]
    fn scoreboard_survives_the_wire() {
        let mut snap = sample_snapshot(3);
        fill_scores(&mut snap, 1, 4);
        fill_scores(&mut snap, 3, 5);
        let view = GameView::compute(&snap);
        let board = view.scoreboard(1).unwrap();

        let msg = board.encode(7).unwrap();
        assert_eq!(msg.focus, 1);
        let wire = encode_server_message(&ServerMessage::View(msg)).unwrap();
        let ServerMessage::View(back) = decode_server_message(&wire).unwrap() else {
            panic!("expected a view update");
        };
        assert_eq!(back.game_id, 7);
        assert_eq!(Scoreboard::decode(&back).unwrap(), board);
    }

    #[test]
    fn largest_roster_fits_in_one_frame() {
        let mut snap = sample_snapshot(PLAYER_CEILING);
        snap.turbo = TurboValues::from_preset(TurboPreset::Multiplier);
        for player in 1..=PLAYER_CEILING as PlayerId {
            fill_scores(&mut snap, player, 3 + (player % 4) as u32);
            for hole in 1..=18 {
                snap.animals.push(AnimalRecord {
                    player_id: player,
                    hole,
                    species: AnimalSpecies::ALL[usize::from(hole) % 6],
                    count: 2,
                });
            }
        }
        let view = GameView::compute(&snap);

        for focus in [1, PLAYER_CEILING as PlayerId] {
            let board = view.scoreboard(focus).unwrap();
            let msg = board.encode(1).unwrap();
            let wire = encode_server_message(&ServerMessage::View(msg)).unwrap();
            assert!(wire.len() <= MAX_MESSAGE_SIZE);
        }
    }

    #[test]
    fn oversized_frame_rejected_at_encode() {
        // Every name byte is above 0x7f and costs two bytes once the view is framed.
        let mut snap = sample_snapshot(2);
        snap.rename_player(2, "é".repeat(12_000)).unwrap();
        let view = GameView::compute(&snap);
        let board = view.scoreboard(1).unwrap();
        assert!(matches!(
            board.encode(1),
            Err(ProtocolError::PayloadTooLarge(len)) if len > MAX_MESSAGE_SIZE
        ));
    }
}
