use serde::{Deserialize, Serialize};

use crate::events::GameChange;
use crate::player::PlayerId;

/// Network message type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum MessageType {
    GameChange = 0x10,
    ScoreboardView = 0x11,
}

impl MessageType {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0x10 => Some(Self::GameChange),
            0x11 => Some(Self::ScoreboardView),
            _ => None,
        }
    }
}

/// Broadcast to every viewer in a game after an input changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameChangeMsg {
    pub game_id: u64,
    pub change: GameChange,
}

/// A recomputed scoreboard for one focus player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewUpdateMsg {
    pub game_id: u64,
    pub focus: PlayerId,
    /// MessagePack-encoded scoreboard produced by the engine.
    pub view_data: Vec<u8>,
}

/// Messages the game server fans out to connected viewers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ServerMessage {
    Change(GameChangeMsg),
    View(ViewUpdateMsg),
}
