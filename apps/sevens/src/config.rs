use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::engine::DealOptions;
use crate::error::AppError;

/// Who sits in the second seat of a terminal game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opponent {
    Ai,
    /// Hot-seat: both players share the terminal.
    Human,
}

impl FromStr for Opponent {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ai" => Ok(Opponent::Ai),
            "human" => Ok(Opponent::Human),
            other => Err(AppError::config(format!(
                "SEVENS_OPPONENT must be 'ai' or 'human', got '{other}'"
            ))),
        }
    }
}

/// Settings for the `sevens` binary, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SevensConfig {
    pub seed: Option<u64>,
    pub shuffle: bool,
    pub save_dir: PathBuf,
    pub opponent: Opponent,
    pub player_name: String,
    /// Registered AI name used when `opponent` is `Ai`.
    pub ai: String,
}

impl Default for SevensConfig {
    fn default() -> Self {
        Self {
            seed: None,
            shuffle: true,
            save_dir: PathBuf::from("./saved-games"),
            opponent: Opponent::Ai,
            player_name: "Player".to_string(),
            ai: "random".to_string(),
        }
    }
}

impl SevensConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unset and blank values take
    /// the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let seed = get("SEVENS_SEED")
            .map(|raw| {
                raw.trim().parse::<u64>().map_err(|_| {
                    AppError::config(format!("SEVENS_SEED must be an unsigned integer, got '{raw}'"))
                })
            })
            .transpose()?;

        let shuffle = match get("SEVENS_SHUFFLE") {
            Some(raw) => parse_bool("SEVENS_SHUFFLE", &raw)?,
            None => defaults.shuffle,
        };

        let opponent = match get("SEVENS_OPPONENT") {
            Some(raw) => raw.parse()?,
            None => defaults.opponent,
        };

        Ok(Self {
            seed,
            shuffle,
            save_dir: get("SEVENS_SAVE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.save_dir),
            opponent,
            player_name: get("SEVENS_PLAYER_NAME")
                .map(|s| s.trim().to_string())
                .unwrap_or(defaults.player_name),
            ai: get("SEVENS_AI")
                .map(|s| s.trim().to_ascii_lowercase())
                .unwrap_or(defaults.ai),
        })
    }

    pub fn deal_options(&self) -> DealOptions {
        DealOptions {
            seed: self.seed,
            shuffle: self.shuffle,
        }
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::config(format!(
            "{key} must be a boolean, got '{raw}'"
        ))),
    }
}
