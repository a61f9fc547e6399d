#![allow(clippy::uninlined_format_args)]

use eye_meney::config::ScoringConfig;
use eye_meney::history::MemoryHistoryStore;
use eye_meney::report;
use eye_meney::samples::SAMPLE_MESSAGES;
use eye_meney::{MessageScorer, ScamDetector};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Testing built-in sample messages...");

    let scorer = MessageScorer::new(&ScoringConfig::default())?;
    let mut detector = ScamDetector::new(scorer, MemoryHistoryStore::new(10), 100);

    let mut failures = 0;
    for sample in SAMPLE_MESSAGES {
        println!("\n=== {} ({}) ===", sample.title, sample.description);
        println!("Message: {}", sample.text);

        let verdict = detector.analyze(sample.text)?;
        println!("\n{}", report::result_text(&verdict));

        if verdict.is_scam == sample.expect_scam {
            println!("\n✅ Classified as expected");
        } else {
            println!(
                "\n❌ Expected scam={} but got scam={} (score {})",
                sample.expect_scam, verdict.is_scam, verdict.score
            );
            failures += 1;
        }
    }

    println!("\n=== HISTORY ===");
    for entry in detector.history(10)? {
        println!(
            "{} {:<8} {:>3} {}",
            entry.timestamp.to_rfc3339(),
            entry.tier.as_str(),
            entry.score,
            entry.message
        );
    }

    if failures > 0 {
        anyhow::bail!("{} sample(s) misclassified", failures);
    }
    Ok(())
}
