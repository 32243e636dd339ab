use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

/// Penalty animals a player can pick up on a hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimalSpecies {
    Monkey,
    Giraffe,
    Snake,
    Camel,
    Frog,
    MonitorLizard,
}

impl AnimalSpecies {
    pub const ALL: [AnimalSpecies; 6] = [
        AnimalSpecies::Monkey,
        AnimalSpecies::Giraffe,
        AnimalSpecies::Snake,
        AnimalSpecies::Camel,
        AnimalSpecies::Frog,
        AnimalSpecies::MonitorLizard,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monkey => "monkey",
            Self::Giraffe => "giraffe",
            Self::Snake => "snake",
            Self::Camel => "camel",
            Self::Frog => "frog",
            Self::MonitorLizard => "monitor_lizard",
        }
    }
}

impl std::fmt::Display for AnimalSpecies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw count of one species for one player on one hole, as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalRecord {
    pub player_id: PlayerId,
    pub hole: u8,
    pub species: AnimalSpecies,
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn species_wire_names() {
        let json = serde_json::to_string(&AnimalSpecies::MonitorLizard).unwrap();
        assert_eq!(json, "\"monitor_lizard\"");
        for species in AnimalSpecies::ALL {
            let s = serde_json::to_string(&species).unwrap();
            assert_eq!(s.trim_matches('"'), species.as_str());
        }
    }

    #[test]
    fn record_from_json() {
        let rec: AnimalRecord = serde_json::from_str(
            r#"{"player_id":3,"hole":12,"species":"camel","count":2}"#,
        )
        .unwrap();
        assert_eq!(rec.species, AnimalSpecies::Camel);
        assert_eq!(rec.count, 2);
    }
}
