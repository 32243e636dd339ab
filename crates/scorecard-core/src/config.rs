use serde::{Deserialize, Serialize};

use crate::points::PointTable;
use crate::validation::ValidationError;

/// Engine configuration, loaded from `scorecard.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorecardConfig {
    /// Point table applied to new games.
    pub points: PointTable,
    pub limits: Limits,
}

/// Largest roster a game can be configured for. Every scoreboard of a game this
/// size still fits in one broadcast frame.
pub const PLAYER_CEILING: usize = 24;

/// Accepted ranges for host-supplied values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Roster size, at most [`PLAYER_CEILING`].
    pub max_players: usize,
    pub max_handicap: u8,
    /// Largest magnitude of a pairwise override, per nine.
    pub max_override_strokes: u32,
    pub max_turbo: u32,
    pub max_gross: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_players: 16,
            max_handicap: 54,
            max_override_strokes: 10,
            max_turbo: 10,
            max_gross: 20,
        }
    }
}

impl ScorecardConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.limits.max_turbo == 0 {
            return Err(ValidationError::Config(
                "limits.max_turbo must be > 0".to_string(),
            ));
        }
        if self.limits.max_players == 0 || self.limits.max_players > PLAYER_CEILING {
            return Err(ValidationError::Config(format!(
                "limits.max_players must be in 1..={PLAYER_CEILING}"
            )));
        }
        if self.limits.max_gross == 0 {
            return Err(ValidationError::Config(
                "limits.max_gross must be > 0".to_string(),
            ));
        }
        if self.limits.max_override_strokes > 18 {
            tracing::warn!(
                max = self.limits.max_override_strokes,
                "max_override_strokes exceeds two strokes per hole on a nine; excess is never allocated"
            );
        }
        Ok(())
    }

    /// Parse a TOML document, falling back to defaults for missing keys.
    pub fn from_toml(contents: &str) -> Result<Self, ValidationError> {
        toml::from_str(contents).map_err(|e| ValidationError::Config(e.to_string()))
    }

    /// Load config from `SCORECARD_CONFIG` or `scorecard.toml`, then apply env overrides.
    pub fn load() -> Self {
        let path = std::env::var("SCORECARD_CONFIG")
            .ok()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "scorecard.toml".to_string());

        let mut config = match std::fs::read_to_string(&path) {
            Ok(contents) => match Self::from_toml(&contents) {
                Ok(cfg) => {
                    tracing::info!(path = %path, "Loaded scorecard configuration");
                    cfg
                },
                Err(e) => {
                    tracing::warn!(path = %path, "Failed to parse config: {e}, using defaults");
                    Self::default()
                },
            },
            Err(_) => {
                tracing::info!(path = %path, "No config file found, using defaults");
                Self::default()
            },
        };

        if let Ok(val) = std::env::var("SCORECARD_MAX_HANDICAP")
            && let Ok(n) = val.parse::<u8>()
        {
            config.limits.max_handicap = n;
        }
        if let Ok(val) = std::env::var("SCORECARD_MAX_TURBO")
            && let Ok(n) = val.parse::<u32>()
        {
            config.limits.max_turbo = n;
        }

        if let Err(e) = config.validate() {
            tracing::warn!("Invalid scorecard configuration: {e}, using default limits");
            config.limits = Limits::default();
        }

        config
    }
}
