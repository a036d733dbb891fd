use fraud_shield::demo::{demo_message, DemoKind};
use fraud_shield::EngineConfig;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Testing the built-in demo messages against the default engine...");

    let engine = EngineConfig::default().build_engine()?;
    let mut failures = 0;

    for kind in [DemoKind::Safe, DemoKind::Suspicious, DemoKind::Fraud] {
        let message = demo_message(kind);
        let result = engine.analyze(message);

        println!();
        println!("📨 {:?}: {}", kind, message);
        println!(
            "   → {} (score {}, {} flags)",
            result.classification,
            result.risk_score,
            result.flags.len()
        );
        for flag in &result.flags {
            println!("     {} {} [+{}]", flag.icon, flag.text, flag.severity);
        }

        let expected_safe = kind == DemoKind::Safe;
        let is_safe = result.classification == fraud_shield::Classification::Safe;
        if expected_safe != is_safe {
            println!("   ❌ Unexpected classification");
            failures += 1;
        } else {
            println!("   ✅ OK");
        }
    }

    println!();
    println!("JSON for the fraud demo:");
    println!(
        "{}",
        serde_json::to_string_pretty(&engine.analyze(demo_message(DemoKind::Fraud)))?
    );

    if failures > 0 {
        anyhow::bail!("{} demo message(s) classified unexpectedly", failures);
    }
    Ok(())
}
