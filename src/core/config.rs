// Game configuration loaded from TOML
//
// A missing file means "play with defaults"; a file that exists but does not
// parse or validate stops the game before any match state is created.

use crate::core::math;
use crate::engine::pose::ClassifierConfig;
use crate::game::bot::AiHandicap;
use crate::game::characters::Archetype;
use log::warn;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Lowest accepted bot difficulty
pub const MIN_DIFFICULTY: i32 = 1;

/// Highest accepted bot difficulty
pub const MAX_DIFFICULTY: i32 = 5;

/// Longest accepted turn window, in seconds
pub const MAX_TURN_SECONDS: f64 = 600.0;

/// Who is in front of the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum GameMode {
    /// Two people share the frame, one per half
    #[default]
    TwoPlayer,
    /// One person against the scripted bot
    PlayerVsAi,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unknown roster name: {0}")]
    UnknownArchetype(String),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Everything a match needs to know before it starts
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub mode: GameMode,
    /// Bot difficulty; read it through `difficulty_level`
    pub difficulty: i32,
    /// Length of one turn window in seconds
    pub turn_seconds: f64,
    pub player_one: String,
    pub player_two: String,
    /// Fixed seed for reproducible matches
    pub seed: Option<u64>,
    /// Stop after this many turns even without a winner
    pub max_turns: Option<u32>,
    /// Bonuses applied to the bot's combatant
    pub ai: AiHandicap,
    pub classifier: ClassifierConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::TwoPlayer,
            difficulty: MIN_DIFFICULTY,
            turn_seconds: 5.0,
            player_one: "Draco".to_string(),
            player_two: "Hydra".to_string(),
            seed: None,
            max_turns: None,
            ai: AiHandicap::default(),
            classifier: ClassifierConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from disk, falling back to defaults when the file does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            warn!(
                "Config {} not found, using defaults",
                path.to_string_lossy()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source,
        })?;

        Self::from_toml_str(&content)
    }

    /// Check every field a match depends on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.turn_seconds > 0.0 && self.turn_seconds <= MAX_TURN_SECONDS) {
            return Err(ConfigError::Invalid {
                field: "turn_seconds",
                reason: format!(
                    "must be in (0, {}] seconds, got {}",
                    MAX_TURN_SECONDS, self.turn_seconds
                ),
            });
        }

        self.ai.validate()?;

        Archetype::by_name(&self.player_one)?;
        Archetype::by_name(&self.player_two)?;

        self.classifier.validate()
    }

    /// Difficulty clamped into the supported range
    pub fn difficulty_level(&self) -> u8 {
        math::clamp(self.difficulty, MIN_DIFFICULTY, MAX_DIFFICULTY) as u8
    }

    /// Length of one turn window; `turn_seconds` must have passed `validate`
    pub fn turn_duration(&self) -> Duration {
        Duration::from_secs_f64(self.turn_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.mode, GameMode::TwoPlayer);
        assert_eq!(config.turn_duration(), Duration::from_secs(5));
    }

    #[test]
    fn test_parse_full_config() {
        let config = GameConfig::from_toml_str(
            r#"
            mode = "player_vs_ai"
            difficulty = 3
            turn_seconds = 2.5
            player_one = "Lyra"
            player_two = "Orion"
            seed = 42

            [ai]
            attack = 5
            health = 10

            [classifier]
            extension_ratio = 0.4
            "#,
        )
        .unwrap();

        assert_eq!(config.mode, GameMode::PlayerVsAi);
        assert_eq!(config.difficulty_level(), 3);
        assert_eq!(config.player_one, "Lyra");
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.ai.attack, 5);
        assert_eq!(config.ai.mana, 0);
        assert_eq!(config.classifier.extension_ratio, 0.4);
        assert_eq!(config.turn_duration(), Duration::from_millis(2500));
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = GameConfig::from_toml_str("").unwrap();
        assert_eq!(config.player_one, "Draco");
        assert_eq!(config.player_two, "Hydra");
    }

    #[test]
    fn test_difficulty_is_clamped() {
        let mut config = GameConfig::default();
        config.difficulty = 42;
        assert_eq!(config.difficulty_level(), 5);
        config.difficulty = -3;
        assert_eq!(config.difficulty_level(), 1);
    }

    #[test]
    fn test_unknown_roster_name_rejected() {
        let err = GameConfig::from_toml_str(r#"player_two = "Gandalf""#).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownArchetype(ref name) if name == "Gandalf"));
    }

    #[test]
    fn test_non_positive_turn_rejected() {
        let err = GameConfig::from_toml_str("turn_seconds = 0.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "turn_seconds",
                ..
            }
        ));
    }

    #[test]
    fn test_oversized_turn_rejected() {
        for document in ["turn_seconds = 1e30", "turn_seconds = 600.5", "turn_seconds = nan"] {
            assert!(
                matches!(
                    GameConfig::from_toml_str(document),
                    Err(ConfigError::Invalid {
                        field: "turn_seconds",
                        ..
                    })
                ),
                "{} was accepted",
                document
            );
        }

        let config = GameConfig::from_toml_str("turn_seconds = 600.0").unwrap();
        assert_eq!(config.turn_duration(), Duration::from_secs(600));
    }

    #[test]
    fn test_oversized_handicap_rejected() {
        let err = GameConfig::from_toml_str(
            r#"
            mode = "player_vs_ai"

            [ai]
            health = 2147483647
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "ai.health", .. }));

        let mut config = GameConfig::default();
        config.ai.attack = -5000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            GameConfig::from_toml_str("splitscreen = true"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(GameConfig::from_toml_str(r#"mode = "online""#).is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = GameConfig::load_or_default("/definitely/not/here/wizviz.toml").unwrap();
        assert_eq!(config.mode, GameMode::TwoPlayer);
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("wizviz-config-{}.toml", std::process::id()));
        std::fs::write(&path, "difficulty = 2\nplayer_one = \"Phoenix\"\n").unwrap();

        let config = GameConfig::load_or_default(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.difficulty_level(), 2);
        assert_eq!(config.player_one, "Phoenix");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::UnknownArchetype("Zeus".to_string());
        assert_eq!(err.to_string(), "Unknown roster name: Zeus");
    }
}
