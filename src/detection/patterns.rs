use super::{SignalCheck, SignalHit};
use crate::config::PatternConfig;
use crate::normalization::{truncate_chars, NormalizedMessage};
use anyhow::{Context, Result};
use regex::Regex;

/// Indian mobile number, optionally prefixed with the country code.
pub const PHONE_NUMBER_PATTERN: &str = r"(?:\+91[\s-]?|\b91[\s-]?|\b)[6-9]\d{9}\b";

const URL_PATTERN: &str =
    r"(?i)(?:\bhttps?://\S+|\bwww\.\S+|\bbit\.ly/\S*|\btinyurl\.com/\S*|\bt\.co/\S*)";
const URGENCY_PATTERN: &str = r"(?i)\b(?:urgent(?:ly)?|immediate(?:ly)?|expires?|expired|expiring|act now|limited time|hurry|last chance|within 24 hours)\b";
const CREDENTIAL_PATTERN: &str = r"(?i)\b(?:otp|one[\s-]time password|verification code|cvv|pin|password|login credentials)\b";
const PAYMENT_PATTERN: &str =
    r"(?i)\b(?:pay|payment|transfer|send money|bank|account|upi)\b";

/// Longest excerpt of matched text quoted in a reason.
const EVIDENCE_CHARS: usize = 40;

fn pattern(name: &str, reason: &str, pattern: &str, bonus: u32) -> PatternConfig {
    PatternConfig {
        name: name.to_string(),
        reason: reason.to_string(),
        pattern: pattern.to_string(),
        bonus,
    }
}

pub fn default_patterns() -> Vec<PatternConfig> {
    vec![
        pattern(
            "phone_number",
            "Contains phone number (unsolicited contact)",
            PHONE_NUMBER_PATTERN,
            15,
        ),
        pattern("url", "Contains suspicious links", URL_PATTERN, 30),
        pattern(
            "urgency",
            "Uses urgent/pressure tactics",
            URGENCY_PATTERN,
            25,
        ),
        pattern(
            "credential_request",
            "Asks for OTP/verification codes",
            CREDENTIAL_PATTERN,
            35,
        ),
        pattern(
            "payment_request",
            "Requests money or financial information",
            PAYMENT_PATTERN,
            30,
        ),
    ]
}

/// Boolean structural check: a flat bonus when the regex matches anywhere.
pub struct PatternCheck {
    name: String,
    reason: String,
    regex: Regex,
    bonus: u32,
}

impl PatternCheck {
    pub fn from_config(config: &PatternConfig) -> Result<Self> {
        let regex = Regex::new(&config.pattern)
            .with_context(|| format!("Invalid regex in pattern check '{}'", config.name))?;
        Ok(Self {
            name: config.name.clone(),
            reason: config.reason.clone(),
            regex,
            bonus: config.bonus,
        })
    }
}

impl SignalCheck for PatternCheck {
    fn evaluate(&self, message: &NormalizedMessage) -> Option<SignalHit> {
        let found = self.regex.find(&message.original)?;
        let evidence = truncate_chars(found.as_str().trim(), EVIDENCE_CHARS);
        Some(SignalHit::new(
            &self.name,
            self.bonus,
            format!("{} ({})", self.reason, evidence),
        ))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalization::MessageNormalizer;

    fn check(name: &str) -> PatternCheck {
        let config = default_patterns()
            .into_iter()
            .find(|p| p.name == name)
            .unwrap();
        PatternCheck::from_config(&config).unwrap()
    }

    fn fires(name: &str, text: &str) -> bool {
        check(name)
            .evaluate(&MessageNormalizer::new().normalize(text))
            .is_some()
    }

    #[test]
    fn test_phone_number() {
        assert!(fires("phone_number", "Call 9876543210 now"));
        assert!(fires("phone_number", "Call +919876543210 now"));
        assert!(fires("phone_number", "Call +91 9876543210 now"));
        assert!(!fires("phone_number", "Order 1234567890 shipped"));
        assert!(!fires("phone_number", "Ref 98765432101234"));
    }

    #[test]
    fn test_url() {
        assert!(fires("url", "Click http://bit.ly/x"));
        assert!(fires("url", "visit www.example.in today"));
        assert!(fires("url", "go to bit.ly/abc"));
        assert!(!fires("url", "Meet at the cafe tomorrow"));
    }

    #[test]
    fn test_urgency() {
        assert!(fires("urgency", "URGENT: reply"));
        assert!(fires("urgency", "Offer expires tonight"));
        assert!(!fires("urgency", "Your appointment is tomorrow"));
    }

    #[test]
    fn test_credential_request_uses_word_boundaries() {
        assert!(fires("credential_request", "Share the OTP you received"));
        assert!(fires("credential_request", "enter your PIN"));
        assert!(!fires("credential_request", "Happy shopping this weekend"));
    }

    #[test]
    fn test_payment_request() {
        assert!(fires("payment_request", "Pay the fee via UPI"));
        assert!(fires("payment_request", "your bank account"));
        assert!(!fires("payment_request", "Please reply to confirm"));
    }

    #[test]
    fn test_reason_names_matched_text() {
        let hit = check("url")
            .evaluate(&MessageNormalizer::new().normalize("Click http://bit.ly/x now"))
            .unwrap();
        assert_eq!(hit.points, 30);
        assert_eq!(hit.reason, "Contains suspicious links (http://bit.ly/x)");
    }

    #[test]
    fn test_invalid_regex_is_error() {
        let config = pattern("bad", "Bad", "[unclosed", 1);
        assert!(PatternCheck::from_config(&config).is_err());
    }
}
