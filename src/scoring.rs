//! Score aggregation, classification and evidence flags.
//!
//! Contributions are collected in a fixed order (keyword categories, content
//! rules, structural checks), summed, clamped to 0..=100 and classified. Flags
//! are stably sorted by severity so equal-severity flags keep that order.

use crate::keywords::KeywordMatcher;
use crate::patterns::{self, ContentRule, PATTERN_WEIGHT};
use crate::structure::{StructuralSignals, PUNCTUATION_POINTS, SHOUTING_POINTS};
use crate::taxonomy::{Category, Taxonomy};
use serde::{Deserialize, Serialize};

pub const MAX_RISK_SCORE: u32 = 100;
pub const NO_MESSAGE_EXPLANATION: &str = "No message provided";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Safe,
    Suspicious,
    Fraud,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Safe => "safe",
            Classification::Suspicious => "suspicious",
            Classification::Fraud => "fraud",
        }
    }

    pub fn explanation(&self) -> &'static str {
        match self {
            Classification::Safe => {
                "This message appears to be safe with no significant fraud indicators."
            }
            Classification::Suspicious => {
                "This message contains some suspicious elements. Exercise caution and verify the sender."
            }
            Classification::Fraud => {
                "This message shows strong fraud indicators. Do not respond or share any information."
            }
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Thresholds {
    /// Scores below this are safe.
    pub safe_below: u32,
    /// Scores at or above this are fraud.
    pub fraud_at: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            safe_below: 30,
            fraud_at: 70,
        }
    }
}

impl Thresholds {
    pub fn classify(&self, score: u32) -> Classification {
        if score < self.safe_below {
            Classification::Safe
        } else if score < self.fraud_at {
            Classification::Suspicious
        } else {
            Classification::Fraud
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagCategory {
    Urgency,
    Money,
    Banking,
    Threats,
    Requests,
    Impersonation,
    Pattern,
}

impl From<Category> for FlagCategory {
    fn from(category: Category) -> Self {
        match category {
            Category::Urgency => FlagCategory::Urgency,
            Category::Money => FlagCategory::Money,
            Category::Banking => FlagCategory::Banking,
            Category::Threats => FlagCategory::Threats,
            Category::Requests => FlagCategory::Requests,
            Category::Impersonation => FlagCategory::Impersonation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    pub category: FlagCategory,
    pub icon: String,
    pub text: String,
    pub severity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub classification: Classification,
    pub risk_score: u32,
    pub flags: Vec<Flag>,
    pub explanation: String,
}

impl AnalysisResult {
    fn no_message() -> Self {
        Self {
            classification: Classification::Safe,
            risk_score: 0,
            flags: Vec::new(),
            explanation: NO_MESSAGE_EXPLANATION.to_string(),
        }
    }
}

/// Immutable fraud scorer. Build once and share; `analyze` only reads.
pub struct ScoringEngine {
    taxonomy: Taxonomy,
    rules: Vec<Box<dyn ContentRule>>,
    thresholds: Thresholds,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        let whitelist: Vec<String> = patterns::DEFAULT_URL_WHITELIST
            .iter()
            .map(|s| s.to_string())
            .collect();
        Self::new(
            Taxonomy::default(),
            patterns::default_rules(&whitelist),
            Thresholds::default(),
        )
    }
}

impl ScoringEngine {
    pub fn new(
        taxonomy: Taxonomy,
        rules: Vec<Box<dyn ContentRule>>,
        thresholds: Thresholds,
    ) -> Self {
        Self {
            taxonomy,
            rules,
            thresholds,
        }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn rules(&self) -> &[Box<dyn ContentRule>] {
        &self.rules
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn analyze(&self, message: &str) -> AnalysisResult {
        if is_blank(message) {
            log::debug!("Empty message, skipping analysis");
            return AnalysisResult::no_message();
        }

        let normalized = message.to_lowercase();
        let mut flags = Vec::new();
        let mut raw_score: u32 = 0;

        for hit in KeywordMatcher::new(&self.taxonomy).find_matches(&normalized) {
            raw_score = raw_score.saturating_add(hit.risk);
            flags.push(Flag {
                category: hit.category.into(),
                icon: hit.category.icon().to_string(),
                text: hit.category.describe(&hit.keywords),
                severity: hit.risk,
            });
        }

        for rule in &self.rules {
            if rule.is_match(message) {
                log::debug!("Content rule '{}' matched (+{})", rule.name(), PATTERN_WEIGHT);
                raw_score = raw_score.saturating_add(PATTERN_WEIGHT);
                flags.push(Flag {
                    category: FlagCategory::Pattern,
                    icon: "🔍".to_string(),
                    text: format!("Suspicious pattern detected: {}", rule.description()),
                    severity: PATTERN_WEIGHT,
                });
            }
        }

        let signals = StructuralSignals::evaluate(message);
        raw_score = raw_score.saturating_add(signals.points());
        if signals.excessive_punctuation {
            flags.push(Flag {
                category: FlagCategory::Urgency,
                icon: "⚡".to_string(),
                text: "Excessive punctuation detected (urgency tactic)".to_string(),
                severity: PUNCTUATION_POINTS,
            });
        }
        if signals.shouting {
            flags.push(Flag {
                category: FlagCategory::Urgency,
                icon: "📢".to_string(),
                text: "Excessive capitalization detected (pressure tactic)".to_string(),
                severity: SHOUTING_POINTS,
            });
        }

        let risk_score = raw_score.min(MAX_RISK_SCORE);
        let classification = self.thresholds.classify(risk_score);
        log::debug!(
            "Raw score {} clamped to {}: {}",
            raw_score,
            risk_score,
            classification
        );

        // Vec::sort_by is stable
        flags.sort_by(|a, b| b.severity.cmp(&a.severity));

        AnalysisResult {
            classification,
            risk_score,
            flags,
            explanation: classification.explanation().to_string(),
        }
    }
}

/// Whitespace and line terminators as a JavaScript `trim` sees them. NEL
/// (U+0085) is not included.
fn is_separator(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0b}'
            | '\u{0c}'
            | '\r'
            | ' '
            | '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\u{feff}'
    )
}

fn is_blank(message: &str) -> bool {
    message.chars().all(is_separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::{demo_message, DemoKind};
    use crate::patterns::RegexRule;
    use crate::taxonomy::CategoryRule;

    fn texts(result: &AnalysisResult) -> Vec<&str> {
        result.flags.iter().map(|f| f.text.as_str()).collect()
    }

    #[test]
    fn test_empty_and_blank_messages() {
        let engine = ScoringEngine::default();
        for message in ["", "   ", "\n\t ", "\u{feff}", "\u{3000}"] {
            let result = engine.analyze(message);
            assert_eq!(result.classification, Classification::Safe);
            assert_eq!(result.risk_score, 0);
            assert!(result.flags.is_empty());
            assert_eq!(result.explanation, "No message provided");
        }
    }

    #[test]
    fn test_next_line_is_not_blank() {
        let engine = ScoringEngine::default();
        assert!(is_blank("\u{a0}\u{feff}\u{200a}\u{0b}"));
        assert!(!is_blank("\u{85}"));

        let result = engine.analyze("\u{85}");
        assert_eq!(result.risk_score, 5);
        assert_eq!(result.classification, Classification::Safe);
        assert_eq!(
            result.explanation,
            "This message appears to be safe with no significant fraud indicators."
        );
    }

    #[test]
    fn test_safe_demo_message() {
        let engine = ScoringEngine::default();
        let result = engine.analyze(demo_message(DemoKind::Safe));

        assert_eq!(result.classification, Classification::Safe);
        assert!(result.risk_score < 30);
        assert_eq!(
            result.explanation,
            "This message appears to be safe with no significant fraud indicators."
        );
    }

    #[test]
    fn test_suspicious_demo_message() {
        let engine = ScoringEngine::default();
        let result = engine.analyze(demo_message(DemoKind::Suspicious));

        let categories: Vec<FlagCategory> = result.flags.iter().map(|f| f.category).collect();
        assert!(categories.contains(&FlagCategory::Banking));
        assert!(categories.contains(&FlagCategory::Requests));
        assert!(categories.contains(&FlagCategory::Impersonation));
        assert!(texts(&result).contains(&"Suspicious pattern detected: Suspicious URL"));
        assert_ne!(result.classification, Classification::Safe);
    }

    #[test]
    fn test_fraud_demo_message() {
        let engine = ScoringEngine::default();
        let result = engine.analyze(demo_message(DemoKind::Fraud));

        assert_eq!(result.classification, Classification::Fraud);
        assert_eq!(result.risk_score, 100);

        let flag_texts = texts(&result);
        assert!(flag_texts.iter().any(|t| t.starts_with("Money-related fraud keywords")));
        assert!(flag_texts.iter().any(|t| t.starts_with("Urgency tactics detected")));
        assert!(flag_texts.iter().any(|t| t.starts_with("Suspicious action requests")));
        assert!(flag_texts.contains(&"Suspicious pattern detected: Money amount"));
        assert!(flag_texts.contains(&"Suspicious pattern detected: Suspicious URL"));
        assert!(flag_texts.contains(&"Excessive punctuation detected (urgency tactic)"));
        assert!(flag_texts.contains(&"Excessive capitalization detected (pressure tactic)"));
    }

    #[test]
    fn test_bare_card_number() {
        let engine = ScoringEngine::default();
        let result = engine.analyze("1234567890123456");

        let patterns: Vec<&Flag> = result
            .flags
            .iter()
            .filter(|f| f.category == FlagCategory::Pattern)
            .collect();
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].text, "Suspicious pattern detected: Credit card number");
        assert_eq!(patterns[0].severity, 15);
        // 15 for the card, 5 for brevity
        assert_eq!(result.risk_score, 20);
        assert_eq!(result.classification, Classification::Safe);
    }

    #[test]
    fn test_card_number_after_accented_letter() {
        let engine = ScoringEngine::default();
        let result = engine.analyze("Pagó1234567890123456 hoy mismo amigo");

        assert_eq!(result.flags.len(), 1);
        assert_eq!(result.flags[0].text, "Suspicious pattern detected: Credit card number");
        assert_eq!(result.risk_score, 15);
    }

    #[test]
    fn test_pattern_counted_once_regardless_of_matches() {
        let engine = ScoringEngine::default();
        let one = engine.analyze("Your statement shows $100 today ok");
        let many = engine.analyze("Your statement shows $100 $200 $300 ok");
        assert_eq!(one.risk_score, many.risk_score);
        assert_eq!(one.risk_score, 15);
    }

    #[test]
    fn test_keyword_flag_text_and_severity() {
        let engine = ScoringEngine::default();
        let result = engine.analyze("Please share your cvv and otp and pin and password");

        let banking = result
            .flags
            .iter()
            .find(|f| f.category == FlagCategory::Banking)
            .unwrap();
        assert_eq!(banking.icon, "🏦");
        assert_eq!(banking.severity, 90);
        assert_eq!(
            banking.text,
            "Banking/financial information requested: \"cvv, pin, otp\""
        );
        assert_eq!(result.risk_score, 90);
        assert_eq!(result.classification, Classification::Fraud);
    }

    #[test]
    fn test_flags_sorted_stably_by_severity() {
        let engine = ScoringEngine::default();
        // requests (20), impersonation (20), url pattern (15), punctuation (10)
        let result = engine.analyze("Please confirm with the courier at http://parcel-track.xyz !!!");

        let severities: Vec<u32> = result.flags.iter().map(|f| f.severity).collect();
        assert!(severities.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(result.flags[0].category, FlagCategory::Requests);
        assert_eq!(result.flags[1].category, FlagCategory::Impersonation);
        assert_eq!(result.flags[2].category, FlagCategory::Pattern);
        assert_eq!(result.flags[3].icon, "⚡");
    }

    #[test]
    fn test_structural_flags_keep_check_order() {
        let engine = ScoringEngine::default();
        let result = engine.analyze("WHAT THE HECK IS THIS!!! honestly mate");

        assert_eq!(result.flags.len(), 2);
        assert_eq!(result.flags[0].icon, "⚡");
        assert_eq!(result.flags[1].icon, "📢");
        assert_eq!(result.risk_score, 20);
    }

    #[test]
    fn test_brevity_adds_points_without_flag() {
        let engine = ScoringEngine::default();
        let result = engine.analyze("see you at 6");
        assert_eq!(result.risk_score, 5);
        assert!(result.flags.is_empty());
    }

    #[test]
    fn test_score_is_clamped_before_classification() {
        let engine = ScoringEngine::default();
        let result = engine.analyze(
            "URGENT!!! Your bank account is SUSPENDED. Police will ARREST you. \
             Click here to verify account, send money via transfer. You WON a prize: $5,000 \
             http://claim.xyz card 1234567890123456",
        );
        assert_eq!(result.risk_score, 100);
        assert_eq!(result.classification, Classification::Fraud);
    }

    #[test]
    fn test_thresholds_classify_boundaries() {
        let thresholds = Thresholds::default();
        assert_eq!(thresholds.classify(0), Classification::Safe);
        assert_eq!(thresholds.classify(29), Classification::Safe);
        assert_eq!(thresholds.classify(30), Classification::Suspicious);
        assert_eq!(thresholds.classify(69), Classification::Suspicious);
        assert_eq!(thresholds.classify(70), Classification::Fraud);
        assert_eq!(thresholds.classify(100), Classification::Fraud);
    }

    #[test]
    fn test_classification_matches_score_band() {
        let engine = ScoringEngine::default();
        let samples = [
            "hello there, how was the trip?",
            "verify your account details now",
            "You won! Claim your cash prize, click here: http://x.xyz",
            "Your package delivery failed, update address",
            "IRS notice: pay fine or face arrest. Call now.",
        ];
        for sample in samples {
            let result = engine.analyze(sample);
            assert!(result.risk_score <= 100);
            let expected = match result.risk_score {
                s if s < 30 => Classification::Safe,
                s if s < 70 => Classification::Suspicious,
                _ => Classification::Fraud,
            };
            assert_eq!(result.classification, expected, "{}", sample);
            assert_eq!(result.explanation, expected.explanation());
        }
    }

    #[test]
    fn test_deterministic_output() {
        let engine = ScoringEngine::default();
        let message = demo_message(DemoKind::Fraud);
        let first = serde_json::to_string(&engine.analyze(message)).unwrap();
        let second = serde_json::to_string(&engine.analyze(message)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_json_shape() {
        let engine = ScoringEngine::default();
        let value = serde_json::to_value(engine.analyze("send money to the courier now please")).unwrap();

        assert!(value.get("riskScore").is_some());
        assert_eq!(value["classification"], "suspicious");
        assert_eq!(value["flags"][0]["category"], "requests");
        assert!(value["flags"][0]["severity"].is_u64());
    }

    #[test]
    fn test_custom_engine() {
        let taxonomy = Taxonomy::new(vec![CategoryRule::new(
            Category::Money,
            40,
            &["gift card"],
        )]);
        let rules: Vec<Box<dyn ContentRule>> = vec![Box::new(
            RegexRule::new("code", r"\b[A-Z0-9]{4}-[A-Z0-9]{4}\b", "Voucher code").unwrap(),
        )];
        let engine = ScoringEngine::new(
            taxonomy,
            rules,
            Thresholds {
                safe_below: 20,
                fraud_at: 50,
            },
        );

        let result = engine.analyze("Buy a Gift Card and text me the code ABCD-1234 thanks");
        assert_eq!(result.risk_score, 55);
        assert_eq!(result.classification, Classification::Fraud);
        assert_eq!(result.flags.len(), 2);
        assert_eq!(result.flags[1].text, "Suspicious pattern detected: Voucher code");

        // default categories are gone
        assert_eq!(engine.analyze("urgent bank transfer please now").risk_score, 0);
    }
}
