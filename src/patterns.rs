use lazy_static::lazy_static;
use regex::Regex;

/// Points added by any content rule that matches at least once.
pub const PATTERN_WEIGHT: u32 = 15;

pub const DEFAULT_URL_WHITELIST: [&str; 5] = ["google", "facebook", "amazon", "apple", "microsoft"];

// Word boundaries are ASCII-only (`(?-u:\b)`), so an accented letter next to
// a digit run still counts as a boundary.
lazy_static! {
    static ref CREDIT_CARD: Regex = Regex::new(r"(?-u:\b)[0-9]{16}(?-u:\b)").unwrap();
    static ref SSN: Regex = Regex::new(r"(?-u:\b)[0-9]{3}-[0-9]{2}-[0-9]{4}(?-u:\b)").unwrap();
    // A URL runs until tab, LF, VT, FF, CR, a space separator, U+2028/2029 or
    // BOM. NEL (U+0085) is not a separator here.
    static ref URL: Regex = Regex::new(
        r"(?i)https?://[^\t\n\x0B\x0C\r\x20\x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]+"
    )
    .unwrap();
    static ref DOLLAR_AMOUNT: Regex = Regex::new(r"\$[0-9]+[,0-9]*(?:\.[0-9]{2})?").unwrap();
    static ref RUPEE_AMOUNT: Regex = Regex::new(r"₹[0-9]+[,0-9]*(?:\.[0-9]{2})?").unwrap();
}

/// A structured-content check run against the original-case message.
pub trait ContentRule: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    /// Number of non-overlapping matches in `text`.
    fn count_matches(&self, text: &str) -> usize;

    fn is_match(&self, text: &str) -> bool {
        self.count_matches(text) > 0
    }
}

pub struct RegexRule {
    name: String,
    description: String,
    regex: Regex,
}

impl RegexRule {
    pub fn new(name: &str, pattern: &str, description: &str) -> Result<Self, regex::Error> {
        Ok(Self::from_regex(name, Regex::new(pattern)?, description))
    }

    pub fn from_regex(name: &str, regex: Regex, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            regex,
        }
    }
}

impl ContentRule for RegexRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn count_matches(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }
}

/// Flags http(s) URLs unless the rest of their line mentions a whitelisted
/// name. The whitelist test is a plain substring check, so
/// `http://evil.com/google` counts as whitelisted.
pub struct UnlistedUrlRule {
    whitelist: Vec<String>,
}

impl UnlistedUrlRule {
    pub fn new(whitelist: &[String]) -> Self {
        Self {
            whitelist: whitelist.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    fn is_whitelisted(&self, rest_of_line: &str) -> bool {
        let rest = rest_of_line.to_lowercase();
        self.whitelist.iter().any(|name| rest.contains(name.as_str()))
    }
}

impl ContentRule for UnlistedUrlRule {
    fn name(&self) -> &str {
        "unlisted_url"
    }

    fn description(&self) -> &str {
        "Suspicious URL"
    }

    fn count_matches(&self, text: &str) -> usize {
        let mut count = 0;
        let mut pos = 0;

        while let Some(m) = URL.find_at(text, pos) {
            let after_scheme = m.start() + m.as_str().find("://").map_or(0, |i| i + 3);
            let line_end = text[after_scheme..]
                .find(|c: char| matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}'))
                .map_or(text.len(), |i| after_scheme + i);

            if self.is_whitelisted(&text[after_scheme..line_end]) {
                // A later URL on the same line may still be unlisted.
                pos = m.start() + 1;
            } else {
                count += 1;
                pos = m.end();
            }
        }

        count
    }
}

/// Built-in rules in evaluation order.
pub fn default_rules(url_whitelist: &[String]) -> Vec<Box<dyn ContentRule>> {
    vec![
        Box::new(RegexRule::from_regex(
            "credit_card",
            CREDIT_CARD.clone(),
            "Credit card number",
        )),
        Box::new(RegexRule::from_regex(
            "ssn",
            SSN.clone(),
            "Social security number",
        )),
        Box::new(UnlistedUrlRule::new(url_whitelist)),
        Box::new(RegexRule::from_regex(
            "dollar_amount",
            DOLLAR_AMOUNT.clone(),
            "Money amount",
        )),
        Box::new(RegexRule::from_regex(
            "rupee_amount",
            RUPEE_AMOUNT.clone(),
            "Money amount",
        )),
    ]
}
