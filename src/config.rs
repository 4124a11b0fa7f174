//! Application-level configuration loading, including gameplay tuning.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::state::scoring::ScoringConfig;

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "GUESS_THE_SONG_BACK_CONFIG_PATH";
/// Rounds played per game unless configured otherwise.
const DEFAULT_TOTAL_ROUNDS: u32 = 10;
/// Options (correct answer included) shown each round.
const DEFAULT_OPTION_COUNT: usize = 4;
/// Directory holding the persisted score documents.
const DEFAULT_DATA_DIR: &str = "data";
/// Music catalog the backend queries for artists and previews.
const DEFAULT_CATALOG_BASE_URL: &str = "https://itunes.apple.com";

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Number of rounds in a full game.
    pub total_rounds: u32,
    /// Number of options shown per round.
    pub option_count: usize,
    /// Round scoring parameters.
    pub scoring: ScoringConfig,
    /// Directory holding the persisted score documents.
    pub data_dir: PathBuf,
    /// Base URL of the music catalog API.
    pub catalog_base_url: String,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to the
    /// baked-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        total_rounds = config.total_rounds,
                        option_count = config.option_count,
                        "loaded configuration from file"
                    );
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            total_rounds: DEFAULT_TOTAL_ROUNDS,
            option_count: DEFAULT_OPTION_COUNT,
            scoring: ScoringConfig::default(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog_base_url: DEFAULT_CATALOG_BASE_URL.to_owned(),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    total_rounds: Option<u32>,
    option_count: Option<usize>,
    scoring: Option<RawScoring>,
    data_dir: Option<PathBuf>,
    catalog_base_url: Option<String>,
}

#[derive(Debug, Deserialize)]
/// JSON representation of the scoring parameters inside the configuration file.
struct RawScoring {
    max_score: Option<u32>,
    min_score: Option<u32>,
    grace_period_ms: Option<u64>,
    decay_per_second: Option<u32>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = AppConfig::default();

        let total_rounds = match value.total_rounds {
            Some(0) => {
                warn!("total_rounds must be at least 1; using default");
                defaults.total_rounds
            }
            Some(rounds) => rounds,
            None => defaults.total_rounds,
        };

        let option_count = match value.option_count {
            Some(count) if count < 2 => {
                warn!(count, "option_count must be at least 2; using default");
                defaults.option_count
            }
            Some(count) => count,
            None => defaults.option_count,
        };

        Self {
            total_rounds,
            option_count,
            scoring: value
                .scoring
                .map(|raw| merge_scoring(raw, &defaults.scoring))
                .unwrap_or(defaults.scoring),
            data_dir: value.data_dir.unwrap_or(defaults.data_dir),
            catalog_base_url: value.catalog_base_url.unwrap_or(defaults.catalog_base_url),
        }
    }
}

fn merge_scoring(raw: RawScoring, defaults: &ScoringConfig) -> ScoringConfig {
    ScoringConfig {
        max_score: raw.max_score.unwrap_or(defaults.max_score),
        min_score: raw.min_score.unwrap_or(defaults.min_score),
        grace_period_ms: raw.grace_period_ms.unwrap_or(defaults.grace_period_ms),
        decay_per_second: raw.decay_per_second.unwrap_or(defaults.decay_per_second),
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_is_merged_with_defaults() {
        let raw: RawConfig =
            serde_json::from_str(r#"{"total_rounds": 5, "scoring": {"max_score": 50}}"#).unwrap();
        let config: AppConfig = raw.into();

        assert_eq!(config.total_rounds, 5);
        assert_eq!(config.option_count, DEFAULT_OPTION_COUNT);
        assert_eq!(config.scoring.max_score, 50);
        assert_eq!(config.scoring.min_score, 10);
    }

    #[test]
    fn nonsense_values_fall_back_to_defaults() {
        let raw: RawConfig =
            serde_json::from_str(r#"{"total_rounds": 0, "option_count": 1}"#).unwrap();
        let config: AppConfig = raw.into();

        assert_eq!(config.total_rounds, DEFAULT_TOTAL_ROUNDS);
        assert_eq!(config.option_count, DEFAULT_OPTION_COUNT);
    }
}
