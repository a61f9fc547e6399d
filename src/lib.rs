pub mod config;
pub mod detection;
pub mod detector;
pub mod history;
pub mod normalization;
pub mod report;
pub mod samples;
pub mod scorer;
pub mod verdict;

pub use config::Config;
pub use detector::ScamDetector;
pub use history::{HistoryEntry, HistoryStore};
pub use scorer::MessageScorer;
pub use verdict::{RiskTier, Verdict};
