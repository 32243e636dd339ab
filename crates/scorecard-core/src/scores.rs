use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

/// Gross strokes per player per hole. Unplayed holes have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scores(BTreeMap<PlayerId, BTreeMap<u8, u32>>);

impl Scores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gross(&self, player: PlayerId, hole: u8) -> Option<u32> {
        self.0.get(&player).and_then(|holes| holes.get(&hole)).copied()
    }

    /// Upsert a score; the latest write wins. `None` clears the hole.
    pub fn record(&mut self, player: PlayerId, hole: u8, strokes: Option<u32>) {
        match strokes {
            Some(s) => {
                self.0.entry(player).or_default().insert(hole, s);
            },
            None => {
                if let Some(holes) = self.0.get_mut(&player) {
                    holes.remove(&hole);
                    if holes.is_empty() {
                        self.0.remove(&player);
                    }
                }
            },
        }
    }

    /// Drop every score for a player removed from the roster.
    pub fn remove_player(&mut self, player: PlayerId) {
        self.0.remove(&player);
    }

    /// All recorded holes for one player, ascending.
    pub fn player_holes(&self, player: PlayerId) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.0
            .get(&player)
            .into_iter()
            .flat_map(|holes| holes.iter().map(|(&h, &s)| (h, s)))
    }

    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.0.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_write_wins() {
        let mut scores = Scores::new();
        scores.record(1, 4, Some(5));
        scores.record(1, 4, Some(4));
        assert_eq!(scores.gross(1, 4), Some(4));
    }

    #[test]
    fn none_clears_hole() {
        let mut scores = Scores::new();
        scores.record(1, 4, Some(5));
        scores.record(1, 4, None);
        assert_eq!(scores.gross(1, 4), None);
        assert_eq!(scores.players().count(), 0);
    }

    #[test]
    fn remove_player_cascades() {
        let mut scores = Scores::new();
        scores.record(1, 1, Some(4));
        scores.record(2, 1, Some(5));
        scores.remove_player(1);
        assert_eq!(scores.gross(1, 1), None);
        assert_eq!(scores.gross(2, 1), Some(5));
    }

    #[test]
    fn player_holes_are_ordered() {
        let mut scores = Scores::new();
        scores.record(3, 10, Some(6));
        scores.record(3, 2, Some(3));
        let holes: Vec<_> = scores.player_holes(3).collect();
        assert_eq!(holes, vec![(2, 3), (10, 6)]);
        assert_eq!(scores.player_holes(9).count(), 0);
    }
}
