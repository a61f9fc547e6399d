use serde::{Deserialize, Serialize};
use std::fmt;

/// Fallback reason used when no signal fired.
pub const NO_INDICATORS_REASON: &str = "No obvious scam indicators found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    Safe,
    Medium,
    High,
    Critical,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Safe => "SAFE",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
            RiskTier::Critical => "CRITICAL",
        }
    }

    /// The single canonical advice message for this band.
    pub fn advice(&self) -> &'static str {
        match self {
            RiskTier::Safe => {
                "✅ This message appears to be safe, but always stay vigilant and never share \
                 personal information unless you're certain of the sender's identity."
            }
            RiskTier::Medium => {
                "⚠️ SUSPICIOUS: This message shows signs of being a scam. Be very careful and \
                 verify independently before taking any action."
            }
            RiskTier::High => {
                "🚨 HIGH RISK: This is very likely a scam! Do not respond, click links, or share \
                 any information. Block the sender immediately."
            }
            RiskTier::Critical => {
                "🛑 CRITICAL: This message matches known fraud patterns. Do not reply, call back, \
                 or share any OTP, PIN or bank details. Block the sender and report it to \
                 cybercrime.gov.in or call 1930."
            }
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub score: u32,
    pub is_scam: bool,
    pub tier: RiskTier,
    /// One entry per triggered check, in evaluation order. Never empty.
    pub reasons: Vec<String>,
    pub advice: String,
}
