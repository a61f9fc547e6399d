use super::patterns::PHONE_NUMBER_PATTERN;
use super::{SignalCheck, SignalHit};
use crate::config::FormattingConfig;
use crate::normalization::NormalizedMessage;
use anyhow::{Context, Result};
use regex::Regex;

/// Flags text dominated by very short tokens, a crude proxy for broken
/// grammar or spacing tricks.
pub struct WordLengthCheck {
    short_word_max_len: usize,
    short_word_ratio: f64,
    min_words: usize,
    bonus: u32,
}

impl WordLengthCheck {
    pub fn from_config(config: &FormattingConfig) -> Self {
        Self {
            short_word_max_len: config.short_word_max_len,
            short_word_ratio: config.short_word_ratio,
            min_words: config.min_words,
            bonus: config.word_length_bonus,
        }
    }
}

impl SignalCheck for WordLengthCheck {
    fn evaluate(&self, message: &NormalizedMessage) -> Option<SignalHit> {
        let words: Vec<&str> = message
            .original
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|w| !w.is_empty())
            .collect();

        if words.is_empty() || words.len() < self.min_words {
            return None;
        }

        let short = words
            .iter()
            .filter(|w| w.chars().count() <= self.short_word_max_len)
            .count();
        let ratio = short as f64 / words.len() as f64;
        if ratio <= self.short_word_ratio {
            return None;
        }

        Some(SignalHit::new(
            self.name(),
            self.bonus,
            format!(
                "Poor grammar or formatting ({} of {} words are very short)",
                short,
                words.len()
            ),
        ))
    }

    fn name(&self) -> &str {
        "word_length_ratio"
    }
}

/// A long run of digits that is not part of a phone number, typically a
/// fake reference, amount or account number.
pub struct NumericRunCheck {
    run_regex: Regex,
    phone_regex: Regex,
    bonus: u32,
}

impl NumericRunCheck {
    pub fn from_config(config: &FormattingConfig) -> Result<Self> {
        let run_regex = Regex::new(&format!(r"\d{{{},}}", config.numeric_run_min_digits))
            .context("Invalid numeric run length")?;
        let phone_regex =
            Regex::new(PHONE_NUMBER_PATTERN).context("Invalid phone number pattern")?;
        Ok(Self {
            run_regex,
            phone_regex,
            bonus: config.numeric_run_bonus,
        })
    }
}

impl SignalCheck for NumericRunCheck {
    fn evaluate(&self, message: &NormalizedMessage) -> Option<SignalHit> {
        let phones: Vec<(usize, usize)> = self
            .phone_regex
            .find_iter(&message.original)
            .map(|m| (m.start(), m.end()))
            .collect();

        let run = self.run_regex.find_iter(&message.original).find(|run| {
            !phones
                .iter()
                .any(|&(start, end)| run.start() < end && start < run.end())
        })?;

        Some(SignalHit::new(
            self.name(),
            self.bonus,
            format!("Contains long numeric sequence ({})", run.as_str()),
        ))
    }

    fn name(&self) -> &str {
        "numeric_run"
    }
}
