use crate::config::Config;
use crate::history::{self, HistoryEntry, HistoryStore};
use crate::scorer::MessageScorer;
use crate::verdict::Verdict;
use anyhow::{bail, Result};

/// The caller around [`MessageScorer`]: enforces the non-empty input
/// precondition and records every verdict in the history log.
pub struct ScamDetector<S: HistoryStore> {
    scorer: MessageScorer,
    store: S,
    preview_chars: usize,
}

impl ScamDetector<Box<dyn HistoryStore>> {
    /// Validate `config` and open the configured history backend.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let scorer = MessageScorer::new(&config.scoring)?;
        let store = history::open_store(&config.history)?;
        Ok(Self::new(scorer, store, config.history.preview_chars))
    }
}

impl<S: HistoryStore> ScamDetector<S> {
    pub fn new(scorer: MessageScorer, store: S, preview_chars: usize) -> Self {
        Self {
            scorer,
            store,
            preview_chars,
        }
    }

    pub fn analyze(&mut self, text: &str) -> Result<Verdict> {
        if text.trim().is_empty() {
            bail!("message is empty");
        }

        let verdict = self.scorer.score(text);
        log::info!(
            "Analyzed message ({} chars): tier={} score={} scam={}",
            text.chars().count(),
            verdict.tier,
            verdict.score,
            verdict.is_scam
        );

        let entry = HistoryEntry::from_verdict(text, &verdict, self.preview_chars);
        if let Err(e) = self.store.append(entry) {
            // The verdict is still valid without its log entry.
            log::warn!("Failed to record history entry: {e:#}");
        }

        Ok(verdict)
    }

    pub fn history(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        self.store.recent_entries(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HistoryBackend, ScoringConfig};
    use crate::history::MemoryHistoryStore;
    use crate::verdict::RiskTier;

    fn detector(capacity: usize) -> ScamDetector<MemoryHistoryStore> {
        ScamDetector::new(
            MessageScorer::new(&ScoringConfig::default()).unwrap(),
            MemoryHistoryStore::new(capacity),
            100,
        )
    }

    #[test]
    fn test_rejects_blank_input() {
        let mut detector = detector(10);
        assert!(detector.analyze("").is_err());
        assert!(detector.analyze(" \n\t ").is_err());
        assert!(detector.history(10).unwrap().is_empty());
    }

    #[test]
    fn test_records_history_entry() {
        let mut detector = detector(10);
        let verdict = detector.analyze("Send OTP to 9876543210 now").unwrap();
        let history = detector.history(10).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].message, "Send OTP to 9876543210 now");
        assert_eq!(history[0].score, verdict.score);
        assert_eq!(history[0].tier, verdict.tier);
        assert_eq!(history[0].is_scam, verdict.is_scam);
    }

    #[test]
    fn test_history_keeps_most_recent_in_order() {
        let mut detector = detector(10);
        for n in 0..15 {
            detector.analyze(&format!("message number {n}")).unwrap();
        }
        let history = detector.history(usize::MAX).unwrap();
        assert_eq!(history.len(), 10);
        let messages: Vec<String> = history.into_iter().map(|e| e.message).collect();
        let expected: Vec<String> = (5..15).map(|n| format!("message number {n}")).collect();
        assert_eq!(messages, expected);
    }

    #[test]
    fn test_from_config_with_memory_backend() {
        let mut config = Config::default();
        config.history.backend = HistoryBackend::Memory;
        let mut detector = ScamDetector::from_config(&config).unwrap();
        let verdict = detector
            .analyze("Your account blocked! Update KYC at http://kyc-verify.in")
            .unwrap();
        assert!(verdict.is_scam);
        assert!(verdict.tier >= RiskTier::High);
        assert_eq!(detector.history(1).unwrap().len(), 1);
    }

    #[test]
    fn test_from_config_rejects_invalid_config() {
        let mut config = Config::default();
        config.history.backend = HistoryBackend::Memory;
        config.scoring.tiers.high = config.scoring.tiers.medium;
        assert!(ScamDetector::from_config(&config).is_err());
    }
}
