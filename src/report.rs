use crate::verdict::Verdict;

pub const SAFETY_TIPS: &[&str] = &[
    "Never share OTP, passwords, or bank details via SMS/calls",
    "Banks never ask for sensitive information via messages",
    "Verify suspicious messages by calling the official number",
    "Be cautious of urgent/time-limited offers",
    "When in doubt, don't click or respond",
];

pub fn headline(verdict: &Verdict) -> &'static str {
    if verdict.is_scam {
        "🚨 SCAM DETECTED"
    } else {
        "✅ SAFE MESSAGE"
    }
}

/// Plain-text summary suitable for the clipboard or a chat message.
pub fn result_text(verdict: &Verdict) -> String {
    format!(
        "MENEY Scam Detection Result:\n{}\nConfidence: {}%\n\nAnalysis: {}\n\nAdvice: {}",
        headline(verdict),
        verdict.score,
        verdict.reasons.join("; "),
        verdict.advice
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::RiskTier;

    #[test]
    fn test_result_text_layout() {
        let verdict = Verdict {
            score: 72,
            is_scam: true,
            tier: RiskTier::High,
            reasons: vec![
                "Contains suspicious links (bit.ly/x)".to_string(),
                "Asks for OTP/verification codes (OTP)".to_string(),
            ],
            advice: RiskTier::High.advice().to_string(),
        };

        let text = result_text(&verdict);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "MENEY Scam Detection Result:");
        assert_eq!(lines[1], "🚨 SCAM DETECTED");
        assert_eq!(lines[2], "Confidence: 72%");
        assert_eq!(
            lines[4],
            "Analysis: Contains suspicious links (bit.ly/x); Asks for OTP/verification codes (OTP)"
        );
        assert!(lines[6].starts_with("Advice: 🚨 HIGH RISK"));
    }

    #[test]
    fn test_safe_headline() {
        let verdict = Verdict {
            score: 0,
            is_scam: false,
            tier: RiskTier::Safe,
            reasons: vec![],
            advice: String::new(),
        };
        assert_eq!(headline(&verdict), "✅ SAFE MESSAGE");
    }
}
