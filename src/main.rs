use clap::{Arg, Command};
use fraud_shield::demo::{call_simulation, demo_message, DemoKind, StepKind};
use fraud_shield::{AnalysisResult, Classification, EngineConfig, ScoringEngine};
use log::LevelFilter;
use std::io::Read;
use std::process;

fn build_cli() -> Command {
    Command::new("fraud-shield")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Heuristic fraud scoring for SMS, chat and call-transcript text")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Engine configuration file path")
                .default_value("/etc/fraud-shield.yaml"),
        )
        .arg(
            Arg::new("message")
                .short('m')
                .long("message")
                .value_name("TEXT")
                .help("Message to analyze")
                .conflicts_with("file"),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .help("Read the message from a file (stdin is used when no message is given)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the analysis as JSON")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("demo")
                .long("demo")
                .value_name("TYPE")
                .help("Analyze a built-in demo message (safe, suspicious, fraud)")
                .value_parser(clap::value_parser!(DemoKind))
                .conflicts_with_all(["message", "file", "simulate-call"]),
        )
        .arg(
            Arg::new("simulate-call")
                .long("simulate-call")
                .value_name("TYPE")
                .help("Replay a scripted call, scoring the transcript after each caller line")
                .value_parser(clap::value_parser!(DemoKind))
                .conflicts_with_all(["message", "file"]),
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
                .help("Validate the configuration and compile all rules")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
}

fn main() {
    let matches = build_cli().get_matches();

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
        .unwrap_or("/etc/fraud-shield.yaml");

    let engine = match load_config(config_path).and_then(|config| config.build_engine()) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error loading configuration: {e:#}");
            process::exit(1);
        }
    };

    if matches.get_flag("test-config") {
        println!("🔍 Testing configuration...");
        println!("Categories: {}", engine.taxonomy().rules().len());
        for rule in engine.taxonomy().rules() {
            println!(
                "  {} {} (weight {}, {} keywords)",
                rule.category.icon(),
                rule.category,
                rule.weight,
                rule.keywords.len()
            );
        }
        println!("Content rules: {}", engine.rules().len());
        for rule in engine.rules() {
            println!("  🔍 {} ({})", rule.name(), rule.description());
        }
        let thresholds = engine.thresholds();
        println!(
            "Thresholds: safe < {} <= suspicious < {} <= fraud",
            thresholds.safe_below, thresholds.fraud_at
        );
        println!("✅ Configuration is valid");
        return;
    }

    let json = matches.get_flag("json");

    if let Some(kind) = matches.get_one::<DemoKind>("simulate-call") {
        simulate_call(&engine, *kind, json);
        return;
    }

    let message = if let Some(kind) = matches.get_one::<DemoKind>("demo") {
        demo_message(*kind).to_string()
    } else if let Some(text) = matches.get_one::<String>("message") {
        text.clone()
    } else {
        match read_input(matches.get_one::<String>("file")) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Error reading message: {e:#}");
                process::exit(1);
            }
        }
    };

    let result = engine.analyze(&message);
    if json {
        print_json(&result);
    } else {
        print_report(&result);
    }
}

fn load_config(path: &str) -> anyhow::Result<EngineConfig> {
    if std::path::Path::new(path).exists() {
        EngineConfig::from_file(path)
    } else {
        log::warn!("Configuration file '{path}' not found, using default configuration");
        Ok(EngineConfig::default())
    }
}

fn generate_default_config(path: &str) {
    let config = EngineConfig::default();
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

fn read_input(file: Option<&String>) -> anyhow::Result<String> {
    use anyhow::Context;

    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read message file '{path}'")),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read message from stdin")?;
            Ok(text)
        }
    }
}

fn simulate_call(engine: &ScoringEngine, kind: DemoKind, json: bool) {
    let call = call_simulation(kind);
    println!("📞 Incoming call: {}", call.caller);
    println!();

    let mut transcript = String::new();
    for step in &call.steps {
        match step.kind {
            StepKind::Caller => {
                println!("🗣️  {}", step.text);
                if !transcript.is_empty() {
                    transcript.push(' ');
                }
                transcript.push_str(step.text);

                let result = engine.analyze(&transcript);
                if json {
                    print_json(&result);
                } else {
                    println!(
                        "   {} {} ({}/100)",
                        classification_icon(result.classification),
                        result.classification,
                        result.risk_score
                    );
                }
            }
            StepKind::AiStatus => println!("   🤖 {}", step.text),
        }
    }
}

fn print_json(result: &AnalysisResult) {
    match serde_json::to_string_pretty(result) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing result: {e}");
            process::exit(1);
        }
    }
}

fn print_report(result: &AnalysisResult) {
    println!(
        "{} Classification: {}",
        classification_icon(result.classification),
        result.classification.as_str().to_uppercase()
    );
    println!("Risk score: {}/100", result.risk_score);
    println!();
    if result.flags.is_empty() {
        println!("No fraud indicators found");
    } else {
        println!("Indicators:");
        for flag in &result.flags {
            println!("  {} {} [+{}]", flag.icon, flag.text, flag.severity);
        }
    }
    println!();
    println!("{}", result.explanation);
}

fn classification_icon(classification: Classification) -> &'static str {
    match classification {
        Classification::Safe => "✅",
        Classification::Suspicious => "⚠️",
        Classification::Fraud => "🚨",
    }
}
