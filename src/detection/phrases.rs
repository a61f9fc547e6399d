use super::{SignalCheck, SignalHit};
use crate::config::PhraseCategoryConfig;
use crate::normalization::NormalizedMessage;

const CRITICAL_PHRASES: &[&str] = &[
    "send otp",
    "share otp",
    "share your otp",
    "bank details",
    "card details",
    "cvv",
    "atm pin",
    "upi pin",
    "transfer money",
    "confirm identity",
    "remote access",
    "anydesk",
    "teamviewer",
];

const HIGH_PHRASES: &[&str] = &[
    "lottery",
    "winner",
    "prize",
    "you have won",
    "kyc",
    "account blocked",
    "account suspended",
    "link expired",
    "click here",
    "update details",
    "pay now",
    "refund",
    "free gift",
    "call immediately",
    "processing fee",
];

const MEDIUM_PHRASES: &[&str] = &[
    "congratulations",
    "urgent",
    "immediate",
    "verify",
    "blocked",
    "suspended",
    "offer expires",
    "limited time",
    "act now",
    "cashback",
    "amazing offer",
    "whatsapp",
    "dear customer",
    "hurry",
];

const HINDI_PHRASES: &[&str] = &[
    "लॉटरी",
    "बधाई",
    "विजेता",
    "इनाम",
    "तुरंत",
    "जल्दी",
    "केवाईसी",
    "ब्लॉक",
    "बंद",
    "सत्यापित करें",
    "यहाँ क्लिक करें",
    "ओटीपी भेजें",
    "ओटीपी शेयर करें",
    "बैंक विवरण",
    "खाता बंद",
    "रिफंड",
    "ऑफर समाप्त",
    "सीमित समय",
    "अभी करें",
    "पहचान की पुष्टि",
    "विवरण अपडेट करें",
    "अभी भुगतान करें",
    "पैसे ट्रांसफर करें",
    "कैशबैक",
    "मुफ्त उपहार",
    "अद्भुत ऑफर",
    "तुरंत कॉल करें",
    "व्हाट्सएप",
];

fn category(name: &str, label: &str, weight: u32, phrases: &[&str]) -> PhraseCategoryConfig {
    PhraseCategoryConfig {
        name: name.to_string(),
        label: label.to_string(),
        weight,
        phrases: phrases.iter().map(|p| p.to_string()).collect(),
    }
}

pub fn default_categories() -> Vec<PhraseCategoryConfig> {
    vec![
        category("critical", "critical-risk", 40, CRITICAL_PHRASES),
        category("high", "high-risk", 20, HIGH_PHRASES),
        category("medium", "medium-risk", 10, MEDIUM_PHRASES),
        category("hindi", "Hindi high-risk", 25, HINDI_PHRASES),
    ]
}

/// Substring-set matcher. Each distinct phrase counts once no matter how
/// often it appears.
pub struct PhraseCategory {
    name: String,
    label: String,
    weight: u32,
    phrases: Vec<String>,
    sample_size: usize,
}

impl PhraseCategory {
    pub fn from_config(config: &PhraseCategoryConfig, sample_size: usize) -> Self {
        let mut phrases: Vec<String> = Vec::with_capacity(config.phrases.len());
        for phrase in &config.phrases {
            let phrase = phrase.trim().to_lowercase();
            if !phrase.is_empty() && !phrases.contains(&phrase) {
                phrases.push(phrase);
            }
        }

        Self {
            name: config.name.clone(),
            label: config.label.clone(),
            weight: config.weight,
            phrases,
            sample_size,
        }
    }

    /// Configured phrases present in `lowered`, in table order.
    pub fn find_matches<'a>(&'a self, lowered: &str) -> Vec<&'a str> {
        self.phrases
            .iter()
            .filter(|phrase| lowered.contains(phrase.as_str()))
            .map(String::as_str)
            .collect()
    }
}

impl SignalCheck for PhraseCategory {
    fn evaluate(&self, message: &NormalizedMessage) -> Option<SignalHit> {
        let found = self.find_matches(&message.lowered);
        if found.is_empty() {
            return None;
        }

        let count = found.len() as u32;
        let sample: Vec<&str> = found.iter().take(self.sample_size).copied().collect();
        let noun = if count == 1 { "phrase" } else { "phrases" };
        let reason = format!(
            "Contains {} {} {}: {}",
            count,
            self.label,
            noun,
            sample.join(", ")
        );

        Some(SignalHit::new(
            &self.name,
            count.saturating_mul(self.weight),
            reason,
        ))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
