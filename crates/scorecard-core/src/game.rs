use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::animal::{AnimalRecord, AnimalSpecies};
use crate::config::Limits;
use crate::course::{Course, HOLES_PER_ROUND};
use crate::events::GameChange;
use crate::handicap::OverrideMatrix;
use crate::player::{Player, PlayerId, PlayerRole};
use crate::points::PointTable;
use crate::scores::Scores;
use crate::turbo::TurboValues;
use crate::validation::{ValidationError, check_hole};

/// A consistent view of one game's inputs, as handed over by the persistence layer.
///
/// The engine recomputes every derived view from a snapshot; the mutators here
/// return the [`GameChange`] the caller should broadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub players: Vec<Player>,
    pub course: Course,
    #[serde(default)]
    pub turbo: TurboValues,
    #[serde(default)]
    pub scores: Scores,
    /// When present, replaces the handicap-derived stroke matrix entirely.
    #[serde(default)]
    pub overrides: Option<OverrideMatrix>,
    #[serde(default)]
    pub points: PointTable,
    #[serde(default)]
    pub animals: Vec<AnimalRecord>,
}

impl GameSnapshot {
    pub fn new(course: Course) -> Self {
        Self {
            players: Vec::new(),
            course,
            turbo: TurboValues::new(),
            scores: Scores::new(),
            overrides: None,
            points: PointTable::default(),
            animals: Vec::new(),
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, ValidationError> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ValidationError::UnknownPlayer(id))
    }

    /// Add a player, or replace the one with the same id.
    pub fn add_player(
        &mut self,
        player: Player,
        limits: &Limits,
    ) -> Result<GameChange, ValidationError> {
        let player_id = player.id;
        if self.player(player_id).is_none() && self.players.len() >= limits.max_players {
            return Err(ValidationError::RosterFull {
                max: limits.max_players,
            });
        }
        self.players.retain(|p| p.id != player_id);
        self.players.push(player);
        Ok(GameChange::PlayerJoined { player_id })
    }

    /// Remove a player along with their scores, animals and overrides.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<GameChange, ValidationError> {
        if self.player(id).is_none() {
            return Err(ValidationError::UnknownPlayer(id));
        }
        self.players.retain(|p| p.id != id);
        self.scores.remove_player(id);
        self.animals.retain(|a| a.player_id != id);
        if let Some(overrides) = self.overrides.as_mut() {
            overrides.remove_player(id);
        }
        Ok(GameChange::PlayerRemoved { player_id: id })
    }

    pub fn toggle_role(&mut self, id: PlayerId) -> Result<GameChange, ValidationError> {
        let player = self.player_mut(id)?;
        player.role = player.role.toggled();
        Ok(GameChange::RoleChanged {
            player_id: id,
            role: player.role,
        })
    }

    pub fn rename_player(
        &mut self,
        id: PlayerId,
        display_name: impl Into<String>,
    ) -> Result<GameChange, ValidationError> {
        let player = self.player_mut(id)?;
        player.display_name = display_name.into();
        Ok(GameChange::PlayerRenamed {
            player_id: id,
            display_name: player.display_name.clone(),
        })
    }

    pub fn set_handicap(
        &mut self,
        id: PlayerId,
        handicap: Option<u8>,
        limits: &Limits,
    ) -> Result<GameChange, ValidationError> {
        if let Some(h) = handicap
            && h > limits.max_handicap
        {
            return Err(ValidationError::InvalidHandicapRange {
                player: id,
                handicap: h,
                max: limits.max_handicap,
            });
        }
        self.player_mut(id)?.handicap = handicap;
        Ok(GameChange::HandicapChanged {
            player_id: id,
            handicap,
        })
    }

    pub fn record_score(
        &mut self,
        player_id: PlayerId,
        hole: u8,
        strokes: Option<u32>,
        limits: &Limits,
    ) -> Result<GameChange, ValidationError> {
        check_hole(hole)?;
        if self.player(player_id).is_none() {
            return Err(ValidationError::UnknownPlayer(player_id));
        }
        if let Some(s) = strokes
            && (s == 0 || s > limits.max_gross)
        {
            return Err(ValidationError::InvalidScore {
                player: player_id,
                hole,
                strokes: s,
            });
        }
        self.scores.record(player_id, hole, strokes);
        Ok(GameChange::ScoreChanged {
            player_id,
            hole,
            strokes,
        })
    }

    pub fn set_turbo(
        &mut self,
        hole: u8,
        multiplier: u32,
        limits: &Limits,
    ) -> Result<GameChange, ValidationError> {
        check_hole(hole)?;
        if multiplier == 0 || multiplier > limits.max_turbo {
            return Err(ValidationError::InvalidTurbo {
                hole,
                multiplier,
                max: limits.max_turbo,
            });
        }
        self.turbo.set(hole, multiplier);
        Ok(GameChange::TurboChanged { hole, multiplier })
    }

    pub fn set_points(&mut self, points: PointTable) -> GameChange {
        self.points = points;
        GameChange::ScoringConfigChanged { points }
    }

    pub fn set_overrides(&mut self, overrides: Option<OverrideMatrix>) -> GameChange {
        self.overrides = overrides;
        GameChange::OverrideChanged
    }

    /// Upsert an animal count. A zero count deletes the record.
    pub fn set_animal_count(
        &mut self,
        player_id: PlayerId,
        hole: u8,
        species: AnimalSpecies,
        count: u32,
    ) -> Result<GameChange, ValidationError> {
        check_hole(hole)?;
        if self.player(player_id).is_none() {
            return Err(ValidationError::UnknownPlayer(player_id));
        }
        self.animals.retain(|a| {
            !(a.player_id == player_id && a.hole == hole && a.species == species)
        });
        if count > 0 {
            self.animals.push(AnimalRecord {
                player_id,
                hole,
                species,
                count,
            });
        }
        Ok(GameChange::AnimalChanged {
            player_id,
            hole,
            species,
            count,
        })
    }

    /// Check every input against the accepted ranges.
    pub fn validate(&self, limits: &Limits) -> Result<(), ValidationError> {
        self.validate_course()?;
        if self.players.len() > limits.max_players {
            return Err(ValidationError::RosterFull {
                max: limits.max_players,
            });
        }

        let mut ids = HashSet::new();
        for player in &self.players {
            if !ids.insert(player.id) {
                return Err(ValidationError::DuplicatePlayer(player.id));
            }
            if let Some(h) = player.handicap
                && h > limits.max_handicap
            {
                return Err(ValidationError::InvalidHandicapRange {
                    player: player.id,
                    handicap: h,
                    max: limits.max_handicap,
                });
            }
        }

        for (hole, multiplier) in self.turbo.entries() {
            check_hole(hole)?;
            if multiplier == 0 || multiplier > limits.max_turbo {
                return Err(ValidationError::InvalidTurbo {
                    hole,
                    multiplier,
                    max: limits.max_turbo,
                });
            }
        }

        for player in self.scores.players() {
            if !ids.contains(&player) {
                return Err(ValidationError::UnknownPlayer(player));
            }
            for (hole, strokes) in self.scores.player_holes(player) {
                check_hole(hole)?;
                if strokes == 0 || strokes > limits.max_gross {
                    return Err(ValidationError::InvalidScore {
                        player,
                        hole,
                        strokes,
                    });
                }
            }
        }

        if let Some(overrides) = &self.overrides {
            for entry in overrides.entries() {
                for player in [entry.from, entry.to] {
                    if !ids.contains(&player) {
                        return Err(ValidationError::UnknownPlayer(player));
                    }
                }
            }
            // Re-check magnitudes against the configured limit.
            OverrideMatrix::try_from_entries(overrides.entries(), limits)?;
        }

        for record in &self.animals {
            check_hole(record.hole)?;
            if !ids.contains(&record.player_id) {
                return Err(ValidationError::UnknownPlayer(record.player_id));
            }
        }

        Ok(())
    }

    fn validate_course(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for hole in &self.course.holes {
            check_hole(hole.number)?;
            if !seen.insert(hole.number) {
                return Err(ValidationError::InvalidCourse(format!(
                    "hole {} listed twice",
                    hole.number
                )));
            }
            if hole.par == 0 {
                return Err(ValidationError::InvalidCourse(format!(
                    "hole {} has par 0",
                    hole.number
                )));
            }
            if !(1..=HOLES_PER_ROUND).contains(&hole.hc) {
                return Err(ValidationError::InvalidCourse(format!(
                    "hole {} has stroke index {}",
                    hole.number, hole.hc
                )));
            }
        }
        Ok(())
    }

    pub fn hosts(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.role == PlayerRole::Host)
    }
}
