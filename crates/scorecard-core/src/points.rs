use serde::{Deserialize, Serialize};

/// Points for an albatross when the table leaves the tier unset.
pub const DEFAULT_ALBATROSS_POINTS: u32 = 10;

/// Classification of the gross score that decided a head-to-head hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScoreType {
    /// A one on a par 3.
    #[serde(rename = "HIO")]
    HoleInOne,
    Albatross,
    Eagle,
    Birdie,
    ParOrWorse,
}

impl ScoreType {
    /// Classify a gross score against par.
    pub fn classify(gross: u32, par: u8) -> Self {
        let gross = i64::from(gross);
        let par = i64::from(par);
        if par == 3 && gross == 1 {
            Self::HoleInOne
        } else if gross <= par - 3 {
            Self::Albatross
        } else if gross == par - 2 {
            Self::Eagle
        } else if gross == par - 1 {
            Self::Birdie
        } else {
            Self::ParOrWorse
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::HoleInOne => "HIO",
            Self::Albatross => "Albatross",
            Self::Eagle => "Eagle",
            Self::Birdie => "Birdie",
            Self::ParOrWorse => "Par",
        }
    }
}

/// Head-to-head point table, configurable per game by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PointTable {
    pub hole_in_one: u32,
    pub albatross: Option<u32>,
    pub eagle: u32,
    pub birdie: u32,
    pub par_or_worse: u32,
}

impl Default for PointTable {
    fn default() -> Self {
        Self {
            hole_in_one: 10,
            albatross: None,
            eagle: 5,
            birdie: 2,
            par_or_worse: 1,
        }
    }
}

impl PointTable {
    pub fn points_for(&self, score_type: ScoreType) -> u32 {
        match score_type {
            ScoreType::HoleInOne => self.hole_in_one,
            ScoreType::Albatross => self.albatross.unwrap_or(DEFAULT_ALBATROSS_POINTS),
            ScoreType::Eagle => self.eagle,
            ScoreType::Birdie => self.birdie,
            ScoreType::ParOrWorse => self.par_or_worse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_tiers() {
        assert_eq!(ScoreType::classify(1, 3), ScoreType::HoleInOne);
        assert_eq!(ScoreType::classify(1, 4), ScoreType::Albatross);
        assert_eq!(ScoreType::classify(2, 5), ScoreType::Albatross);
        assert_eq!(ScoreType::classify(3, 5), ScoreType::Eagle);
        assert_eq!(ScoreType::classify(2, 4), ScoreType::Eagle);
        assert_eq!(ScoreType::classify(3, 4), ScoreType::Birdie);
        assert_eq!(ScoreType::classify(4, 4), ScoreType::ParOrWorse);
        assert_eq!(ScoreType::classify(9, 4), ScoreType::ParOrWorse);
    }

    #[test]
    fn par_three_two_is_birdie() {
        assert_eq!(ScoreType::classify(2, 3), ScoreType::Birdie);
    }

    #[test]
    fn default_table() {
        let table = PointTable::default();
        assert_eq!(table.points_for(ScoreType::HoleInOne), 10);
        assert_eq!(table.points_for(ScoreType::Albatross), 10);
        assert_eq!(table.points_for(ScoreType::Eagle), 5);
        assert_eq!(table.points_for(ScoreType::Birdie), 2);
        assert_eq!(table.points_for(ScoreType::ParOrWorse), 1);
    }

    #[test]
    fn explicit_albatross_value_is_used() {
        let table = PointTable {
            albatross: Some(8),
            ..PointTable::default()
        };
        assert_eq!(table.points_for(ScoreType::Albatross), 8);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let table: PointTable = serde_json::from_str(r#"{"birdie":3}"#).unwrap();
        assert_eq!(table.birdie, 3);
        assert_eq!(table.eagle, 5);
        assert_eq!(table.albatross, None);
    }

    #[test]
    fn explicit_zero_is_respected() {
        let table: PointTable = serde_json::from_str(r#"{"parOrWorse":0}"#).unwrap();
        assert_eq!(table.points_for(ScoreType::ParOrWorse), 0);
    }
}
