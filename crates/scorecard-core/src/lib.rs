pub mod animal;
pub mod config;
pub mod course;
pub mod events;
pub mod game;
pub mod handicap;
pub mod net;
pub mod player;
pub mod points;
pub mod scores;
pub mod turbo;
pub mod validation;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::course::{Course, Hole};
    use crate::game::GameSnapshot;
    use crate::player::{Player, PlayerId, PlayerRole};

    /// Par and stroke index for the standard test course, holes 1 to 18.
    const LAYOUT: [(u8, u8); 18] = [
        (4, 7),
        (4, 1),
        (3, 15),
        (5, 11),
        (4, 3),
        (4, 9),
        (3, 17),
        (5, 13),
        (4, 5),
        (4, 8),
        (5, 12),
        (3, 16),
        (4, 2),
        (4, 6),
        (3, 18),
        (4, 4),
        (5, 10),
        (4, 14),
    ];

    /// A par-72 course with odd stroke indexes on the front and even on the back.
    pub fn standard_course() -> Course {
        Course::new(
            "Test Links",
            LAYOUT
                .iter()
                .enumerate()
                .map(|(i, &(par, hc))| Hole::new(i as u8 + 1, par, hc))
                .collect(),
        )
    }

    /// Create `n` test players with sequential IDs starting at 1. Player 1 hosts.
    /// Handicaps step by 4: 0, 4, 8, ...
    pub fn make_players(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| Player {
                id: i as PlayerId + 1,
                display_name: format!("Player{}", i + 1),
                role: if i == 0 {
                    PlayerRole::Host
                } else {
                    PlayerRole::Participant
                },
                handicap: Some(i as u8 * 4),
            })
            .collect()
    }

    /// A fresh game on the standard course with `n` players and no scores.
    pub fn sample_snapshot(n: usize) -> GameSnapshot {
        let mut snap = GameSnapshot::new(standard_course());
        snap.players = make_players(n);
        snap
    }

    /// Record the same gross score on every hole for a player.
    pub fn fill_scores(snap: &mut GameSnapshot, player: PlayerId, gross: u32) {
        for hole in 1..=18 {
            snap.scores.record(player, hole, Some(gross));
        }
    }
}
