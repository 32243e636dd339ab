use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::course::HOLES_PER_ROUND;

/// Multiplier used for holes with no turbo entry.
pub const DEFAULT_MULTIPLIER: u32 = 1;

/// Per-hole point multipliers set by the host.
///
/// A hole with a multiplier above 1 is a turbo hole: every point earned on it is
/// multiplied, and it never receives a handicap stroke.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurboValues(BTreeMap<u8, u32>);

impl TurboValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn multiplier(&self, hole: u8) -> u32 {
        self.0.get(&hole).copied().unwrap_or(DEFAULT_MULTIPLIER)
    }

    pub fn is_turbo(&self, hole: u8) -> bool {
        self.multiplier(hole) > DEFAULT_MULTIPLIER
    }

    /// Set a hole's multiplier. Setting it back to 1 removes the entry.
    pub fn set(&mut self, hole: u8, multiplier: u32) {
        if multiplier == DEFAULT_MULTIPLIER {
            self.0.remove(&hole);
        } else {
            self.0.insert(hole, multiplier);
        }
    }

    /// Holes with a multiplier above 1, ascending.
    pub fn turbo_holes(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.0
            .iter()
            .filter(|&(_, &m)| m > DEFAULT_MULTIPLIER)
            .map(|(&h, &m)| (h, m))
    }

    /// Raw entries, including any explicit non-turbo values.
    pub fn entries(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.0.iter().map(|(&h, &m)| (h, m))
    }

    pub fn from_preset(preset: TurboPreset) -> Self {
        let mut values = Self::new();
        for &(hole, multiplier) in preset.values() {
            values.set(hole, multiplier);
        }
        values
    }
}

impl FromIterator<(u8, u32)> for TurboValues {
    fn from_iter<I: IntoIterator<Item = (u8, u32)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (hole, multiplier) in iter {
            values.set(hole, multiplier);
        }
        values
    }
}

/// Named turbo layouts offered on the host's turbo screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurboPreset {
    /// Doubles the two closing holes.
    Standard,
    /// Escalating finish on both nines.
    Curve,
    /// The house default spread across the round.
    Multiplier,
}

impl TurboPreset {
    pub const ALL: [TurboPreset; 3] = [
        TurboPreset::Standard,
        TurboPreset::Curve,
        TurboPreset::Multiplier,
    ];

    pub fn values(self) -> &'static [(u8, u32)] {
        match self {
            Self::Standard => &[(9, 2), (18, 2)],
            Self::Curve => &[(7, 2), (8, 3), (9, 4), (16, 2), (17, 3), (18, 4)],
            Self::Multiplier => &[
                (1, 2),
                (7, 2),
                (8, 2),
                (9, 3),
                (10, 2),
                (16, 2),
                (17, 2),
                (18, 3),
            ],
        }
    }

    /// Find the preset that exactly matches the given values, if any.
    pub fn detect(turbo: &TurboValues) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| {
            let values = preset.values();
            (1..=HOLES_PER_ROUND).all(|hole| {
                let expected = values
                    .iter()
                    .find(|&&(h, _)| h == hole)
                    .map_or(DEFAULT_MULTIPLIER, |&(_, m)| m);
                turbo.multiplier(hole) == expected
            })
        })
    }
}
