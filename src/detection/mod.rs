pub mod formatting;
pub mod patterns;
pub mod phrases;

use crate::normalization::NormalizedMessage;

/// Contribution of a single check that fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalHit {
    pub signal: String,
    pub points: u32,
    pub reason: String,
}

impl SignalHit {
    pub fn new(signal: &str, points: u32, reason: String) -> Self {
        Self {
            signal: signal.to_string(),
            points,
            reason,
        }
    }
}

/// One row of the scoring table. Implementations are pure predicates over
/// the message; `None` means the check did not fire.
pub trait SignalCheck: Send + Sync {
    fn evaluate(&self, message: &NormalizedMessage) -> Option<SignalHit>;
    fn name(&self) -> &str;
}
