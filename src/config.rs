use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::study::quiz::{DEFAULT_CHOICE_COUNT, QuizConfig, QuizMode};
use crate::study::session::clamp_length;

const APP_DIR: &str = "studypal";
const DEFAULT_QUIZ_LENGTH: usize = 5;
const MIN_CHOICES: usize = 2;
const MAX_CHOICES: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub quiz_length: Option<usize>,
    pub quiz_mode: Option<QuizMode>,
    pub shuffle: Option<bool>,
    pub choice_count: Option<usize>,
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let base = dirs::config_dir().context("Could not determine config directory")?;
        Ok(base.join(APP_DIR))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Get the default data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let base = dirs::data_dir().context("Could not determine data directory")?;
        Ok(base.join(APP_DIR))
    }

    /// Configured data directory, falling back to the platform default
    pub fn resolved_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::data_dir(),
        }
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            Self::from_toml(&content)
        } else {
            Ok(Config::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| "Failed to parse config file")
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let dir = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Config path has no parent directory"))?;

        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&path, &content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Quiz length clamped to 1..=25
    pub fn quiz_length(&self) -> usize {
        clamp_length(self.quiz_length.unwrap_or(DEFAULT_QUIZ_LENGTH))
    }

    pub fn quiz_mode(&self) -> QuizMode {
        self.quiz_mode.unwrap_or_default()
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle.unwrap_or(false)
    }

    /// Options shown per multiple-choice question, clamped to 2..=6
    pub fn choice_count(&self) -> usize {
        self.choice_count
            .unwrap_or(DEFAULT_CHOICE_COUNT)
            .clamp(MIN_CHOICES, MAX_CHOICES)
    }

    pub fn quiz_config(&self) -> QuizConfig {
        QuizConfig {
            length: self.quiz_length(),
            mode: self.quiz_mode(),
            shuffle: self.shuffle(),
            choice_count: self.choice_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.quiz_config(), QuizConfig::default());
    }

    #[test]
    fn test_parse_and_clamp() {
        let config = Config::from_toml(
            r#"
            quiz_length = 100
            quiz_mode = "typed"
            shuffle = true
            choice_count = 1
            "#,
        )
        .unwrap();

        let quiz = config.quiz_config();
        assert_eq!(quiz.length, 25);
        assert_eq!(quiz.mode, QuizMode::Typed);
        assert!(quiz.shuffle);
        assert_eq!(quiz.choice_count, 2);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = Config {
            data_dir: Some(PathBuf::from("/tmp/studypal")),
            quiz_length: Some(10),
            quiz_mode: Some(QuizMode::MultipleChoice),
            shuffle: None,
            choice_count: Some(3),
        };
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("quiz_mode = \"choice\""));
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(Config::from_toml("quiz_length = \"many\"").is_err());
    }
}
