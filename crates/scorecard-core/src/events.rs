use serde::{Deserialize, Serialize};

use crate::animal::AnimalSpecies;
use crate::player::{PlayerId, PlayerRole};
use crate::points::PointTable;

/// A change to a game's inputs. Every change triggers a full recomputation of
/// the derived views it touches; nothing is updated incrementally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameChange {
    ScoreChanged {
        player_id: PlayerId,
        hole: u8,
        strokes: Option<u32>,
    },
    TurboChanged {
        hole: u8,
        multiplier: u32,
    },
    HandicapChanged {
        player_id: PlayerId,
        handicap: Option<u8>,
    },
    OverrideChanged,
    ScoringConfigChanged {
        points: PointTable,
    },
    PlayerJoined {
        player_id: PlayerId,
    },
    PlayerRemoved {
        player_id: PlayerId,
    },
    RoleChanged {
        player_id: PlayerId,
        role: PlayerRole,
    },
    PlayerRenamed {
        player_id: PlayerId,
        display_name: String,
    },
    AnimalChanged {
        player_id: PlayerId,
        hole: u8,
        species: AnimalSpecies,
        count: u32,
    },
}

/// Which derived views must be recomputed and pushed after a change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedViews {
    /// Handicap stroke indicators.
    pub strokes: bool,
    pub h2h: bool,
    /// Gross stroke totals.
    pub totals: bool,
    pub animals: bool,
}

impl AffectedViews {
    pub const ALL: Self = Self {
        strokes: true,
        h2h: true,
        totals: true,
        animals: true,
    };

    pub fn any(&self) -> bool {
        self.strokes || self.h2h || self.totals || self.animals
    }
}

impl GameChange {
    pub fn affected_views(&self) -> AffectedViews {
        match self {
            Self::ScoreChanged { .. } => AffectedViews {
                h2h: true,
                totals: true,
                ..AffectedViews::default()
            },
            // Turbo holes lose their handicap strokes and scale every point.
            Self::TurboChanged { .. } => AffectedViews {
                strokes: true,
                h2h: true,
                animals: true,
                ..AffectedViews::default()
            },
            Self::HandicapChanged { .. } | Self::OverrideChanged => AffectedViews {
                strokes: true,
                h2h: true,
                ..AffectedViews::default()
            },
            Self::ScoringConfigChanged { .. } => AffectedViews {
                h2h: true,
                ..AffectedViews::default()
            },
            Self::PlayerJoined { .. } | Self::PlayerRemoved { .. } => AffectedViews::ALL,
            Self::RoleChanged { .. } | Self::PlayerRenamed { .. } => AffectedViews::default(),
            Self::AnimalChanged { .. } => AffectedViews {
                animals: true,
                ..AffectedViews::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_change_touches_h2h_and_totals() {
        let change = GameChange::ScoreChanged {
            player_id: 1,
            hole: 3,
            strokes: Some(4),
        };
        let views = change.affected_views();
        assert!(views.h2h && views.totals);
        assert!(!views.strokes && !views.animals);
    }

    #[test]
    fn turbo_change_reallocates_strokes() {
        let views = GameChange::TurboChanged {
            hole: 9,
            multiplier: 2,
        }
        .affected_views();
        assert!(views.strokes && views.h2h && views.animals);
        assert!(!views.totals);
    }

    #[test]
    fn role_change_needs_no_recompute() {
        let views = GameChange::RoleChanged {
            player_id: 2,
            role: PlayerRole::Host,
        }
        .affected_views();
        assert!(!views.any());
    }

    #[test]
    fn roster_change_recomputes_everything() {
        assert_eq!(
            GameChange::PlayerRemoved { player_id: 4 }.affected_views(),
            AffectedViews::ALL
        );
    }

    #[test]
    fn tagged_json_shape() {
        let json = serde_json::to_value(GameChange::TurboChanged {
            hole: 18,
            multiplier: 3,
        })
        .unwrap();
        assert_eq!(json["type"], "turbo_changed");
        assert_eq!(json["multiplier"], 3);
    }
}
