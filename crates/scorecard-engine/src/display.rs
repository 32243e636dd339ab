use serde::{Deserialize, Serialize};

use scorecard_core::player::PlayerId;

use crate::allocation::StrokeAllocation;
use crate::h2h::Handicap;

/// Color a stroke marker is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// The viewer gives strokes.
    Red,
    /// The viewer receives strokes.
    Green,
}

/// Stroke relationship between the viewer and one column player on one hole.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrokeIndicator {
    #[default]
    None,
    Giving(u8),
    Receiving(u8),
}

impl StrokeIndicator {
    /// Signed count: negative when giving, positive when receiving.
    pub fn count(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Giving(n) => -i32::from(n),
            Self::Receiving(n) => i32::from(n),
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Giving(1) | Self::Receiving(1) => "*",
            Self::Giving(_) | Self::Receiving(_) => "**",
        }
    }

    pub fn tone(self) -> Option<Tone> {
        match self {
            Self::None => None,
            Self::Giving(_) => Some(Tone::Red),
            Self::Receiving(_) => Some(Tone::Green),
        }
    }
}

impl From<StrokeIndicator> for Handicap {
    fn from(indicator: StrokeIndicator) -> Self {
        match indicator {
            StrokeIndicator::None => Handicap::None,
            StrokeIndicator::Giving(n) => Handicap::Gives(n),
            StrokeIndicator::Receiving(n) => Handicap::Gets(n),
        }
    }
}

/// Resolve what `viewer` sees in `target`'s column on `hole`.
///
/// Giving takes precedence if a misconfigured table has strokes flowing both ways.
pub fn resolve(
    allocation: &StrokeAllocation,
    viewer: PlayerId,
    target: PlayerId,
    hole: u8,
) -> StrokeIndicator {
    if viewer == target {
        return StrokeIndicator::None;
    }
    let giving = allocation.strokes(viewer, target, hole);
    if giving > 0 {
        return StrokeIndicator::Giving(giving);
    }
    let receiving = allocation.strokes(target, viewer, hole);
    if receiving > 0 {
        return StrokeIndicator::Receiving(receiving);
    }
    StrokeIndicator::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::HandicapMatrix;
    use scorecard_core::player::Player;
    use scorecard_core::test_helpers::standard_course;
    use scorecard_core::turbo::TurboValues;

    fn allocation(handicap_a: u8, handicap_b: u8) -> StrokeAllocation {
        let players = vec![
            Player::new(1, "A").with_handicap(handicap_a),
            Player::new(2, "B").with_handicap(handicap_b),
        ];
        StrokeAllocation::compute(
            &standard_course(),
            &TurboValues::new(),
            &HandicapMatrix::derive(&players),
        )
    }

    #[test]
    fn self_column_has_no_indicator() {
        let alloc = allocation(10, 0);
        assert_eq!(resolve(&alloc, 1, 1, 2), StrokeIndicator::None);
    }

    #[test]
    fn giver_sees_red_receiver_sees_green() {
        // Player 1 gives one stroke on the front: hole 2 is the hardest long hole.
        let alloc = allocation(1, 0);
        let giver = resolve(&alloc, 1, 2, 2);
        let receiver = resolve(&alloc, 2, 1, 2);
        assert_eq!(giver, StrokeIndicator::Giving(1));
        assert_eq!(giver.count(), -1);
        assert_eq!(giver.tone(), Some(Tone::Red));
        assert_eq!(receiver.count(), 1);
        assert_eq!(receiver.tone(), Some(Tone::Green));
        assert_eq!(receiver.marker(), "*");
    }

    #[test]
    fn double_stroke_marker() {
        let alloc = allocation(10, 0);
        // Ten on a nine: every hole one, then hole 2 gets a second.
        assert_eq!(resolve(&alloc, 2, 1, 2), StrokeIndicator::Receiving(2));
        assert_eq!(resolve(&alloc, 2, 1, 2).marker(), "**");
        assert_eq!(resolve(&alloc, 2, 1, 5).marker(), "*");
    }

    #[test]
    fn hole_without_strokes() {
        let alloc = allocation(1, 0);
        let indicator = resolve(&alloc, 1, 2, 7);
        assert_eq!(indicator, StrokeIndicator::None);
        assert_eq!(indicator.marker(), "");
        assert_eq!(indicator.tone(), None);
    }

    #[test]
    fn indicator_maps_to_handicap() {
        assert_eq!(Handicap::from(StrokeIndicator::Giving(2)), Handicap::Gives(2));
        assert_eq!(Handicap::from(StrokeIndicator::Receiving(1)), Handicap::Gets(1));
        assert_eq!(Handicap::from(StrokeIndicator::None), Handicap::None);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn views_mirror_each_other(a in 0u8..=54, b in 0u8..=54, hole in 1u8..=18) {
                let alloc = allocation(a, b);
                let ab = resolve(&alloc, 1, 2, hole);
                let ba = resolve(&alloc, 2, 1, hole);
                prop_assert_eq!(ab.count(), -ba.count());
                prop_assert!(
                    !(matches!(ab, StrokeIndicator::Giving(_))
                        && matches!(ba, StrokeIndicator::Giving(_)))
                );
            }
        }
    }
}
