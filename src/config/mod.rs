pub mod module_loader;
pub mod toml_config;

use crate::detection::{patterns, phrases};
use crate::verdict::RiskTier;
use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub history: HistoryConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ScoringConfig {
    /// Upper clamp for the accumulated score; never 100% certain.
    pub max_score: u32,
    /// A message is flagged as a scam when its score is strictly above this.
    pub scam_threshold: u32,
    /// How many matched phrases a category reason lists.
    pub reason_sample_size: usize,
    /// Optional directory of YAML signal modules adding phrase categories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_config_dir: Option<String>,
    pub tiers: TierBands,
    pub phrase_categories: Vec<PhraseCategoryConfig>,
    pub patterns: Vec<PatternConfig>,
    pub formatting: FormattingConfig,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_score: 98,
            scam_threshold: 40,
            reason_sample_size: 3,
            module_config_dir: None,
            tiers: TierBands::default(),
            phrase_categories: phrases::default_categories(),
            patterns: patterns::default_patterns(),
            formatting: FormattingConfig::default(),
        }
    }
}

/// Inclusive lower bounds of each tier above `Safe`.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct TierBands {
    pub medium: u32,
    pub high: u32,
    pub critical: u32,
}

impl Default for TierBands {
    fn default() -> Self {
        Self {
            medium: 35,
            high: 60,
            critical: 80,
        }
    }
}

impl TierBands {
    pub fn tier_for(&self, score: u32) -> RiskTier {
        match score {
            s if s >= self.critical => RiskTier::Critical,
            s if s >= self.high => RiskTier::High,
            s if s >= self.medium => RiskTier::Medium,
            _ => RiskTier::Safe,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PhraseCategoryConfig {
    pub name: String,
    /// Qualifier placed before "phrase(s)" in reasons, e.g. "high-risk".
    pub label: String,
    /// Points added per distinct phrase found.
    pub weight: u32,
    pub phrases: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PatternConfig {
    pub name: String,
    pub reason: String,
    /// Regular expression, evaluated against the original text.
    pub pattern: String,
    /// Flat bonus added once when the pattern matches.
    pub bonus: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct FormattingConfig {
    pub short_word_max_len: usize,
    pub short_word_ratio: f64,
    pub min_words: usize,
    pub word_length_bonus: u32,
    pub numeric_run_min_digits: usize,
    pub numeric_run_bonus: u32,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            short_word_max_len: 2,
            short_word_ratio: 0.5,
            min_words: 5,
            word_length_bonus: 10,
            numeric_run_min_digits: 6,
            numeric_run_bonus: 5,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HistoryBackend {
    Memory,
    Json,
    Sqlite,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct HistoryConfig {
    pub backend: HistoryBackend,
    /// History directory. JSON keeps `meneyScamHistory.json` here, SQLite
    /// keeps `meneyScamHistory.db`.
    pub path: String,
    pub capacity: usize,
    /// Characters of the message kept in each entry.
    pub preview_chars: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            backend: HistoryBackend::Json,
            path: default_history_dir(),
            capacity: 10,
            preview_chars: 100,
        }
    }
}

fn default_history_dir() -> String {
    std::env::var("HOME")
        .map(|home| format!("{home}/.local/share/eye-meney"))
        .unwrap_or_else(|_| ".eye-meney".to_string())
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

impl Config {
    pub fn default_path() -> &'static str {
        "/etc/eye-meney.toml"
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        toml_config::load_config(path)
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        std::fs::write(&path, content).with_context(|| {
            format!(
                "Failed to write configuration file: {}",
                path.as_ref().display()
            )
        })?;
        Ok(())
    }

    /// Check scoring and history settings for internal consistency.
    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;

        if self.history.capacity == 0 {
            bail!("History capacity must be at least 1");
        }

        Ok(())
    }
}

impl ScoringConfig {
    /// Check the tunables before a scorer is built. The tier bands must
    /// partition `[0, max_score]` with every tier reachable.
    pub fn validate(&self) -> Result<()> {
        let bands = self.tiers;

        if !(bands.medium < bands.high && bands.high < bands.critical) {
            bail!(
                "Tier bands must be strictly ascending (medium {} < high {} < critical {})",
                bands.medium,
                bands.high,
                bands.critical
            );
        }
        if bands.medium == 0 {
            bail!("Medium tier bound must be above zero so that SAFE is reachable");
        }
        if bands.critical > self.max_score {
            bail!(
                "Critical tier bound {} exceeds max_score {}",
                bands.critical,
                self.max_score
            );
        }
        if self.scam_threshold >= self.max_score {
            bail!(
                "scam_threshold {} must be below max_score {}",
                self.scam_threshold,
                self.max_score
            );
        }
        if self.reason_sample_size == 0 {
            bail!("reason_sample_size must be at least 1");
        }

        for category in &self.phrase_categories {
            if category.phrases.iter().all(|p| p.trim().is_empty()) {
                bail!("Phrase category '{}' has no phrases", category.name);
            }
        }
        for pattern in &self.patterns {
            Regex::new(&pattern.pattern)
                .with_context(|| format!("Invalid regex in pattern check '{}'", pattern.name))?;
        }

        let formatting = &self.formatting;
        if !(0.0..=1.0).contains(&formatting.short_word_ratio) {
            bail!(
                "short_word_ratio must be within [0, 1], got {}",
                formatting.short_word_ratio
            );
        }
        if formatting.numeric_run_min_digits == 0 {
            bail!("numeric_run_min_digits must be at least 1");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scoring.max_score, 98);
        assert_eq!(config.history.capacity, 10);
    }

    #[test]
    fn test_tier_bands_partition_range() {
        let bands = TierBands::default();
        assert_eq!(bands.tier_for(0), RiskTier::Safe);
        assert_eq!(bands.tier_for(34), RiskTier::Safe);
        assert_eq!(bands.tier_for(35), RiskTier::Medium);
        assert_eq!(bands.tier_for(59), RiskTier::Medium);
        assert_eq!(bands.tier_for(60), RiskTier::High);
        assert_eq!(bands.tier_for(79), RiskTier::High);
        assert_eq!(bands.tier_for(80), RiskTier::Critical);
        assert_eq!(bands.tier_for(98), RiskTier::Critical);
    }

    #[test]
    fn test_rejects_unordered_bands() {
        let mut config = Config::default();
        config.scoring.tiers = TierBands {
            medium: 50,
            high: 40,
            critical: 80,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_band_above_cap() {
        let mut config = Config::default();
        config.scoring.tiers.critical = 99;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_invalid_regex() {
        let mut config = Config::default();
        config.scoring.patterns.push(PatternConfig {
            name: "broken".to_string(),
            reason: "Broken".to_string(),
            pattern: "(unclosed".to_string(),
            bonus: 5,
        });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let mut config = Config::default();
        config.history.capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [scoring]
            scam_threshold = 35

            [history]
            backend = "memory"
            capacity = 20
            "#,
        )
        .unwrap();
        assert_eq!(config.scoring.scam_threshold, 35);
        assert_eq!(config.scoring.max_score, 98);
        assert_eq!(config.history.backend, HistoryBackend::Memory);
        assert_eq!(config.history.capacity, 20);
        assert_eq!(config.history.preview_chars, 100);
        assert!(!config.scoring.phrase_categories.is_empty());
    }
}
