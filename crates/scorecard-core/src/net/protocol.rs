use serde::{Deserialize, Serialize};

use super::messages::{GameChangeMsg, MessageType, ServerMessage, ViewUpdateMsg};

/// Maximum message payload size in bytes.
pub const MAX_MESSAGE_SIZE: usize = 64 * 1024; // 64 KiB

#[derive(Debug)]
pub enum ProtocolError {
    EmptyMessage,
    UnknownMessageType(u8),
    PayloadTooLarge(usize),
    SerializeError(String),
    DeserializeError(String),
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "empty message"),
            Self::UnknownMessageType(b) => write!(f, "unknown message type: 0x{b:02x}"),
            Self::PayloadTooLarge(size) => {
                write!(
                    f,
                    "payload too large: {size} bytes (max {MAX_MESSAGE_SIZE})"
                )
            },
            Self::SerializeError(e) => write!(f, "serialize error: {e}"),
            Self::DeserializeError(e) => write!(f, "deserialize error: {e}"),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Encode a serializable payload with a 1-byte type prefix.
///
/// Payloads are written with field names so tagged enums decode unambiguously.
pub fn encode_message<T: Serialize>(
    msg_type: MessageType,
    payload: &T,
) -> Result<Vec<u8>, ProtocolError> {
    let payload_bytes = rmp_serde::to_vec_named(payload)
        .map_err(|e| ProtocolError::SerializeError(e.to_string()))?;
    let total = 1 + payload_bytes.len();
    if total > MAX_MESSAGE_SIZE {
        return Err(ProtocolError::PayloadTooLarge(total));
    }
    let mut buf = Vec::with_capacity(total);
    buf.push(msg_type as u8);
    buf.extend_from_slice(&payload_bytes);
    Ok(buf)
}

/// Encode a `ServerMessage` to wire format.
pub fn encode_server_message(msg: &ServerMessage) -> Result<Vec<u8>, ProtocolError> {
    match msg {
        ServerMessage::Change(m) => encode_message(MessageType::GameChange, m),
        ServerMessage::View(m) => encode_message(MessageType::ScoreboardView, m),
    }
}

/// Extract the message type byte from raw wire data.
pub fn decode_message_type(data: &[u8]) -> Result<MessageType, ProtocolError> {
    let Some(&first) = data.first() else {
        return Err(ProtocolError::EmptyMessage);
    };
    MessageType::from_byte(first).ok_or(ProtocolError::UnknownMessageType(first))
}

/// Decode a MessagePack payload (bytes after the type prefix).
pub fn decode_payload<T: for<'de> Deserialize<'de>>(data: &[u8]) -> Result<T, ProtocolError> {
    if data.is_empty() {
        return Err(ProtocolError::EmptyMessage);
    }
    rmp_serde::from_slice(&data[1..]).map_err(|e| ProtocolError::DeserializeError(e.to_string()))
}

/// Decode raw wire data into a `ServerMessage`.
pub fn decode_server_message(data: &[u8]) -> Result<ServerMessage, ProtocolError> {
    match decode_message_type(data)? {
        MessageType::GameChange => Ok(ServerMessage::Change(decode_payload::<GameChangeMsg>(
            data,
        )?)),
        MessageType::ScoreboardView => Ok(ServerMessage::View(decode_payload::<ViewUpdateMsg>(
            data,
        )?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animal::AnimalSpecies;
    use crate::events::GameChange;
    use crate::points::PointTable;

    fn change_msg(change: GameChange) -> ServerMessage {
        ServerMessage::Change(GameChangeMsg { game_id: 77, change })
    }

    #[test]
    fn game_change_survives_wire() {
        for change in [
            GameChange::ScoreChanged {
                player_id: 1,
                hole: 7,
                strokes: None,
            },
            GameChange::OverrideChanged,
            GameChange::ScoringConfigChanged {
                points: PointTable {
                    albatross: Some(7),
                    ..PointTable::default()
                },
            },
            GameChange::AnimalChanged {
                player_id: 3,
                hole: 14,
                species: AnimalSpecies::MonitorLizard,
                count: 2,
            },
        ] {
            let msg = change_msg(change);
            let bytes = encode_server_message(&msg).unwrap();
            assert_eq!(bytes[0], MessageType::GameChange as u8);
            assert_eq!(decode_server_message(&bytes).unwrap(), msg);
        }
    }

    #[test]
    fn view_update_carries_opaque_bytes() {
        let msg = ServerMessage::View(ViewUpdateMsg {
            game_id: 1,
            focus: 4,
            view_data: vec![1, 2, 3, 250],
        });
        let bytes = encode_server_message(&msg).unwrap();
        assert_eq!(decode_message_type(&bytes).unwrap(), MessageType::ScoreboardView);
        assert_eq!(decode_server_message(&bytes).unwrap(), msg);
    }

    #[test]
    fn empty_message_rejected() {
        assert!(matches!(
            decode_server_message(&[]),
            Err(ProtocolError::EmptyMessage)
        ));
    }

    #[test]
    fn unknown_type_rejected() {
        assert!(matches!(
            decode_server_message(&[0xEE, 0x00]),
            Err(ProtocolError::UnknownMessageType(0xEE))
        ));
    }

    #[test]
    fn oversized_payload_rejected() {
        let msg = ServerMessage::View(ViewUpdateMsg {
            game_id: 1,
            focus: 1,
            view_data: vec![0; MAX_MESSAGE_SIZE],
        });
        assert!(matches!(
            encode_server_message(&msg),
            Err(ProtocolError::PayloadTooLarge(_))
        ));
    }

    #[test]
    fn truncated_payload_is_deserialize_error() {
        let msg = change_msg(GameChange::PlayerJoined { player_id: 9 });
        let bytes = encode_server_message(&msg).unwrap();
        assert!(matches!(
            decode_server_message(&bytes[..bytes.len() - 1]),
            Err(ProtocolError::DeserializeError(_))
        ));
    }
}
