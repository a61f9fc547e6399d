use clap::{Arg, Command};
use eye_meney::config::toml_config::load_config_or_default;
use eye_meney::config::Config;
use eye_meney::report::{self, SAFETY_TIPS};
use eye_meney::samples::SAMPLE_MESSAGES;
use eye_meney::{HistoryStore, MessageScorer, ScamDetector, Verdict};
use log::LevelFilter;
use std::io::Read;
use std::process;

fn main() {
    let matches = Command::new("eye-meney")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Eye-MENEY scam message detector")
        .long_about(
            "Eye-MENEY scores SMS/WhatsApp style messages for scam indicators:\n\
             • weighted English and Hindi phrase tables\n\
             • links, phone numbers, urgency, OTP and payment requests\n\
             • formatting heuristics\n\
             Every analysis is recorded in a small local history log.",
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value(Config::default_path()),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Validate the configuration and list the scoring checks")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("message")
                .short('m')
                .long("message")
                .value_name("TEXT")
                .help("Message text to analyze")
                .conflicts_with("file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .help("Read the message to analyze from a file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("samples")
                .long("samples")
                .help("Analyze the built-in sample messages")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("history")
                .long("history")
                .value_name("N")
                .help("Show the N most recent analyses")
                .num_args(0..=1)
                .default_missing_value("10")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print verdicts as JSON")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging with every signal that fired")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        generate_default_config(generate_path);
        return;
    }

    let config_path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or(Config::default_path());

    let config = match load_config_or_default(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e:#}");
            process::exit(1);
        }
    };

    if matches.get_flag("test-config") {
        test_config(&config);
        return;
    }

    let mut detector = match ScamDetector::from_config(&config) {
        Ok(detector) => detector,
        Err(e) => {
            eprintln!("❌ Configuration validation failed:");
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    };

    let as_json = matches.get_flag("json");

    if let Some(&limit) = matches.get_one::<usize>("history") {
        show_history(&detector, limit, as_json);
        return;
    }

    if matches.get_flag("samples") {
        for sample in SAMPLE_MESSAGES {
            println!("{} - {}", sample.title, sample.description);
            println!("> {}", sample.text);
            match detector.analyze(sample.text) {
                Ok(verdict) => print_verdict(&verdict, as_json),
                Err(e) => eprintln!("❌ {e:#}"),
            }
            println!();
        }
        return;
    }

    let text = if let Some(message) = matches.get_one::<String>("message") {
        message.clone()
    } else if let Some(path) = matches.get_one::<String>("file") {
        match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Error reading message file {path}: {e}");
                process::exit(1);
            }
        }
    } else {
        let mut buffer = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut buffer) {
            eprintln!("Error reading message from stdin: {e}");
            process::exit(1);
        }
        buffer
    };

    match detector.analyze(&text) {
        Ok(verdict) => print_verdict(&verdict, as_json),
        Err(e) => {
            eprintln!("❌ Cannot analyze: {e:#}");
            eprintln!("Paste the suspicious message with --message, --file or on stdin.");
            process::exit(2);
        }
    }
}

/// Validate the configuration and build a scorer without touching history.
fn test_config(config: &Config) {
    println!("🔍 Testing configuration...");
    println!();

    let scorer = match config
        .validate()
        .and_then(|()| MessageScorer::new(&config.scoring))
    {
        Ok(scorer) => scorer,
        Err(e) => {
            eprintln!("❌ Configuration validation failed:");
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    };

    println!("Max score: {}", scorer.max_score());
    println!("Scam threshold: > {}", config.scoring.scam_threshold);
    println!(
        "Tier bands: MEDIUM >= {}, HIGH >= {}, CRITICAL >= {}",
        config.scoring.tiers.medium, config.scoring.tiers.high, config.scoring.tiers.critical
    );
    let names = scorer.check_names();
    println!("Number of scoring checks: {}", names.len());
    for (i, name) in names.iter().enumerate() {
        println!("  Check {}: {}", i + 1, name);
    }
    println!(
        "History: {:?} in {} (capacity {})",
        config.history.backend, config.history.path, config.history.capacity
    );
    println!("✅ Configuration is valid");
}

fn print_verdict(verdict: &Verdict, as_json: bool) {
    if as_json {
        match serde_json::to_string_pretty(verdict) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error serializing verdict: {e}"),
        }
        return;
    }

    println!("═══════════════════════════════════════");
    println!("{}", report::headline(verdict));
    println!("Confidence: {}%  (risk: {})", verdict.score, verdict.tier);
    println!("═══════════════════════════════════════");
    println!("{}", verdict.advice);
    println!();
    println!("Detection Reasons:");
    for reason in &verdict.reasons {
        println!("  • {reason}");
    }
    println!();
    println!("🛡️ Stay Safe Online:");
    for tip in SAFETY_TIPS {
        println!("  • {tip}");
    }
}

fn show_history<S: HistoryStore>(detector: &ScamDetector<S>, limit: usize, as_json: bool) {
    let entries = match detector.history(limit) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("❌ Failed to read history: {e:#}");
            process::exit(1);
        }
    };

    if as_json {
        match serde_json::to_string_pretty(&entries) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error serializing history: {e}"),
        }
        return;
    }

    if entries.is_empty() {
        println!("📭 No analyses recorded yet");
        return;
    }

    println!("📊 Recent analyses (oldest first):");
    println!("┌──────────────────────┬──────────┬───────┬──────────────────────────────────────────┐");
    println!("│ Time (UTC)           │ Tier     │ Score │ Message                                  │");
    println!("├──────────────────────┼──────────┼───────┼──────────────────────────────────────────┤");
    for entry in &entries {
        println!(
            "│ {:<20} │ {:<8} │ {:>5} │ {:<40} │",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.tier.as_str(),
            entry.score,
            truncate_string(&entry.message.replace('\n', " "), 40)
        );
    }
    println!("└──────────────────────┴──────────┴───────┴──────────────────────────────────────────┘");
}

fn generate_default_config(path: &str) {
    let config = Config::default();
    match config.to_file(path) {
        Ok(()) => {
            println!("Default configuration written to: {path}");
            println!("Please edit the configuration file to suit your needs.");
        }
        Err(e) => {
            eprintln!("Error writing configuration file: {e:#}");
            process::exit(1);
        }
    }
}

fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
