use crate::config::{module_loader, ScoringConfig, TierBands};
use crate::detection::formatting::{NumericRunCheck, WordLengthCheck};
use crate::detection::patterns::PatternCheck;
use crate::detection::phrases::PhraseCategory;
use crate::detection::SignalCheck;
use crate::normalization::MessageNormalizer;
use crate::verdict::{Verdict, NO_INDICATORS_REASON};
use anyhow::{Context, Result};

/// Deterministic, stateless scam-message classifier.
///
/// Evaluation order is fixed: phrase categories, then structural patterns,
/// then the formatting heuristics. Reasons come out in that order.
pub struct MessageScorer {
    checks: Vec<Box<dyn SignalCheck>>,
    normalizer: MessageNormalizer,
    max_score: u32,
    scam_threshold: u32,
    tiers: TierBands,
}

impl MessageScorer {
    pub fn new(config: &ScoringConfig) -> Result<Self> {
        config.validate()?;

        let mut checks: Vec<Box<dyn SignalCheck>> = Vec::new();

        for category in &config.phrase_categories {
            checks.push(Box::new(PhraseCategory::from_config(
                category,
                config.reason_sample_size,
            )));
        }

        if let Some(module_dir) = &config.module_config_dir {
            let modules = module_loader::load_modules(module_dir)
                .with_context(|| format!("Failed to load signal modules from {module_dir}"))?;
            for module in modules {
                log::info!("Signal module enabled: {}", module.name);
                checks.push(Box::new(PhraseCategory::from_config(
                    &module.into_category(),
                    config.reason_sample_size,
                )));
            }
        }

        for pattern in &config.patterns {
            checks.push(Box::new(PatternCheck::from_config(pattern)?));
        }

        checks.push(Box::new(WordLengthCheck::from_config(&config.formatting)));
        checks.push(Box::new(NumericRunCheck::from_config(&config.formatting)?));

        Ok(Self {
            checks,
            normalizer: MessageNormalizer::new(),
            max_score: config.max_score,
            scam_threshold: config.scam_threshold,
            tiers: config.tiers,
        })
    }

    /// Names of the checks in evaluation order.
    pub fn check_names(&self) -> Vec<&str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    pub fn score(&self, text: &str) -> Verdict {
        let message = self.normalizer.normalize(text);
        let mut total: u32 = 0;
        let mut reasons = Vec::new();

        for check in &self.checks {
            if let Some(hit) = check.evaluate(&message) {
                log::debug!("Signal {} fired (+{}): {}", hit.signal, hit.points, hit.reason);
                total = total.saturating_add(hit.points);
                reasons.push(hit.reason);
            }
        }

        let score = total.min(self.max_score);
        let tier = self.tiers.tier_for(score);

        if reasons.is_empty() {
            reasons.push(NO_INDICATORS_REASON.to_string());
        }

        Verdict {
            score,
            is_scam: score > self.scam_threshold,
            tier,
            reasons,
            advice: tier.advice().to_string(),
        }
    }
}
