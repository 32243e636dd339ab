use crate::course::Segment;
use crate::player::PlayerId;

/// Input rejected at the boundary before it reaches the scoring engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidHandicapRange {
        player: PlayerId,
        handicap: u8,
        max: u8,
    },
    InvalidOverride {
        from: PlayerId,
        to: PlayerId,
        segment: Segment,
        value: i32,
        max: u32,
    },
    /// Both directions of a pair carry values that are not negations of each other.
    AsymmetricOverride {
        from: PlayerId,
        to: PlayerId,
        segment: Segment,
    },
    InvalidHole(u8),
    InvalidTurbo {
        hole: u8,
        multiplier: u32,
        max: u32,
    },
    InvalidScore {
        player: PlayerId,
        hole: u8,
        strokes: u32,
    },
    UnknownPlayer(PlayerId),
    DuplicatePlayer(PlayerId),
    RosterFull {
        max: usize,
    },
    InvalidCourse(String),
    Config(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidHandicapRange {
                player,
                handicap,
                max,
            } => write!(f, "player {player}: handicap {handicap} outside 0..={max}"),
            Self::InvalidOverride {
                from,
                to,
                segment,
                value,
                max,
            } => write!(
                f,
                "override {from}->{to} ({segment:?}): {value} outside -{max}..={max}"
            ),
            Self::AsymmetricOverride { from, to, segment } => write!(
                f,
                "override {from}->{to} ({segment:?}) is not the negation of {to}->{from}"
            ),
            Self::InvalidHole(hole) => write!(f, "hole {hole} outside 1..=18"),
            Self::InvalidTurbo {
                hole,
                multiplier,
                max,
            } => write!(f, "hole {hole}: turbo x{multiplier} outside 1..={max}"),
            Self::InvalidScore {
                player,
                hole,
                strokes,
            } => write!(f, "player {player}, hole {hole}: invalid gross score {strokes}"),
            Self::UnknownPlayer(id) => write!(f, "unknown player {id}"),
            Self::DuplicatePlayer(id) => write!(f, "player {id} listed twice"),
            Self::RosterFull { max } => write!(f, "roster is full ({max} players)"),
            Self::InvalidCourse(msg) => write!(f, "invalid course: {msg}"),
            Self::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check a hole number is on the card.
pub fn check_hole(hole: u8) -> Result<(), ValidationError> {
    if (1..=crate::course::HOLES_PER_ROUND).contains(&hole) {
        Ok(())
    } else {
        Err(ValidationError::InvalidHole(hole))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hole_range() {
        assert!(check_hole(1).is_ok());
        assert!(check_hole(18).is_ok());
        assert_eq!(check_hole(0), Err(ValidationError::InvalidHole(0)));
        assert_eq!(check_hole(19), Err(ValidationError::InvalidHole(19)));
    }

    #[test]
    fn display_messages() {
        let err = ValidationError::InvalidHandicapRange {
            player: 4,
            handicap: 60,
            max: 54,
        };
        assert_eq!(err.to_string(), "player 4: handicap 60 outside 0..=54");

        let err = ValidationError::AsymmetricOverride {
            from: 1,
            to: 2,
            segment: Segment::Back9,
        };
        assert!(err.to_string().contains("not the negation"));
    }
}
