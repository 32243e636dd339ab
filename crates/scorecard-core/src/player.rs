use serde::{Deserialize, Serialize};

/// Unique identifier for a player within a game.
pub type PlayerId = u64;

/// A player on a shared scorecard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    #[serde(default)]
    pub role: PlayerRole,
    /// Playing handicap. Unset players play off scratch.
    #[serde(default)]
    pub handicap: Option<u8>,
}

impl Player {
    pub fn new(id: PlayerId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            role: PlayerRole::Participant,
            handicap: None,
        }
    }

    pub fn with_handicap(mut self, handicap: u8) -> Self {
        self.handicap = Some(handicap);
        self
    }

    pub fn with_role(mut self, role: PlayerRole) -> Self {
        self.role = role;
        self
    }

    pub fn handicap_or_zero(&self) -> u8 {
        self.handicap.unwrap_or(0)
    }

    pub fn is_host(&self) -> bool {
        self.role == PlayerRole::Host
    }
}

/// Hosts may edit turbo values, the point table, handicaps and the roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerRole {
    Host,
    #[default]
    Participant,
}

impl PlayerRole {
    /// The role a host toggle switches to.
    pub fn toggled(self) -> Self {
        match self {
            Self::Host => Self::Participant,
            Self::Participant => Self::Host,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_handicap_plays_off_scratch() {
        let p = Player::new(1, "Somchai");
        assert_eq!(p.handicap_or_zero(), 0);
        assert_eq!(p.with_handicap(12).handicap_or_zero(), 12);
    }

    #[test]
    fn role_defaults_to_participant_when_missing() {
        let p: Player = serde_json::from_str(r#"{"id":7,"display_name":"Niran"}"#).unwrap();
        assert_eq!(p.role, PlayerRole::Participant);
        assert!(p.handicap.is_none());
        assert!(!p.is_host());
    }

    #[test]
    fn toggle_role() {
        assert_eq!(PlayerRole::Host.toggled(), PlayerRole::Participant);
        assert_eq!(PlayerRole::Participant.toggled(), PlayerRole::Host);
    }
}
