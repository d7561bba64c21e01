// Configuration loading and parsing (config/game.toml, seeded from defaults/).

use std::path::{Path, PathBuf};
use std::time::Duration;

use draftfc_core::auction::WheelSettings;
use draftfc_core::draft::MAX_SLOTS;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// game.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire game.toml file.
#[derive(Debug, Clone, Deserialize)]
struct GameFile {
    game: GameConfig,
    wheel: WheelConfig,
    data_paths: DataPaths,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub game: GameConfig,
    pub wheel: WheelConfig,
    pub data_paths: DataPaths,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    /// Player count shown when the home screen opens.
    pub default_players: usize,
    pub min_players: usize,
    pub max_players: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WheelConfig {
    pub settle_delay_ms: u64,
    pub extra_turns: u32,
}

impl WheelConfig {
    pub fn settings(&self) -> WheelSettings {
        WheelSettings {
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            extra_turns: self.extra_turns,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    /// Directory holding `<position>.json` player pools.
    pub players_dir: String,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/game.toml` relative to `base_dir`.
///
/// Does not seed missing files; `load_config()` does that first.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let game_path = base_dir.join("config").join("game.toml");
    let text = read_file(&game_path)?;
    let file: GameFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: game_path.clone(),
        source: e,
    })?;

    let config = Config {
        game: file.game,
        wheel: file.wheel,
        data_paths: file.data_paths,
    };

    validate(&config)?;
    Ok(config)
}

/// Seed `config/game.toml` from `defaults/game.toml` if it does not exist yet.
///
/// An existing file is never overwritten. Returns the path written, if any.
pub fn ensure_game_config(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let source = base_dir.join("defaults").join("game.toml");
    let config_dir = base_dir.join("config");
    let target = config_dir.join("game.toml");

    if target.exists() {
        return Ok(None);
    }
    if !source.exists() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "neither config/game.toml nor defaults/game.toml found in {}; \
                 run from the project root",
                base_dir.display()
            ),
        });
    }

    let seed_error = |e: std::io::Error| ConfigError::DefaultsCopyError {
        message: format!("failed to seed {}: {e}", target.display()),
    };
    std::fs::create_dir_all(&config_dir).map_err(seed_error)?;
    std::fs::copy(&source, &target).map_err(seed_error)?;

    info!("Seeded {} from defaults", target.display());
    Ok(Some(target))
}

/// Load config relative to the current working directory, seeding defaults first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_game_config(&cwd)?;
    load_config_from(&cwd)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let game = &config.game;

    if game.min_players == 0 {
        return Err(ConfigError::ValidationError {
            field: "game.min_players".into(),
            message: "must be at least 1".into(),
        });
    }

    if game.max_players > MAX_SLOTS {
        return Err(ConfigError::ValidationError {
            field: "game.max_players".into(),
            message: format!("must be at most {MAX_SLOTS}, got {}", game.max_players),
        });
    }

    if game.min_players > game.max_players {
        return Err(ConfigError::ValidationError {
            field: "game.min_players".into(),
            message: format!(
                "must not exceed max_players ({}), got {}",
                game.max_players, game.min_players
            ),
        });
    }

    if !(game.min_players..=game.max_players).contains(&game.default_players) {
        return Err(ConfigError::ValidationError {
            field: "game.default_players".into(),
            message: format!(
                "must be between {} and {} inclusive, got {}",
                game.min_players, game.max_players, game.default_players
            ),
        });
    }

    if config.wheel.extra_turns == 0 {
        return Err(ConfigError::ValidationError {
            field: "wheel.extra_turns".into(),
            message: "must be > 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
