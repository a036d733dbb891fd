use serde::{Deserialize, Serialize};

/// Weight used for a configured category rule that does not set one.
pub const DEFAULT_CATEGORY_WEIGHT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Urgency,
    Money,
    Banking,
    Threats,
    Requests,
    Impersonation,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Urgency,
        Category::Money,
        Category::Banking,
        Category::Threats,
        Category::Requests,
        Category::Impersonation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Urgency => "urgency",
            Category::Money => "money",
            Category::Banking => "banking",
            Category::Threats => "threats",
            Category::Requests => "requests",
            Category::Impersonation => "impersonation",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Urgency => "⚡",
            Category::Money => "💰",
            Category::Banking => "🏦",
            Category::Threats => "⚠️",
            Category::Requests => "🔗",
            Category::Impersonation => "🎭",
        }
    }

    /// Human-readable flag text for the given matched keywords. Only the
    /// first three keywords are quoted.
    pub fn describe(&self, keywords: &[&str]) -> String {
        let shown = keywords
            .iter()
            .take(3)
            .copied()
            .collect::<Vec<_>>()
            .join(", ");

        match self {
            Category::Urgency => format!("Urgency tactics detected: \"{}\"", shown),
            Category::Money => format!("Money-related fraud keywords: \"{}\"", shown),
            Category::Banking => {
                format!("Banking/financial information requested: \"{}\"", shown)
            }
            Category::Threats => format!("Threatening language detected: \"{}\"", shown),
            Category::Requests => format!("Suspicious action requests: \"{}\"", shown),
            Category::Impersonation => {
                format!("Possible impersonation attempt: \"{}\"", shown)
            }
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: Category,
    #[serde(default = "default_weight")]
    pub weight: u32,
    pub keywords: Vec<String>,
}

fn default_weight() -> u32 {
    DEFAULT_CATEGORY_WEIGHT
}

impl CategoryRule {
    pub fn new(category: Category, weight: u32, keywords: &[&str]) -> Self {
        Self {
            category,
            weight,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Ordered, immutable set of keyword categories. Rule order decides the order
/// category flags are generated in.
#[derive(Debug, Clone, PartialEq)]
pub struct Taxonomy {
    rules: Vec<CategoryRule>,
}

impl Taxonomy {
    /// Builds a taxonomy, lower-casing every keyword once up front.
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| CategoryRule {
                keywords: rule.keywords.iter().map(|k| k.to_lowercase()).collect(),
                ..rule
            })
            .collect();
        Self { rules }
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn get(&self, category: Category) -> Option<&CategoryRule> {
        self.rules.iter().find(|r| r.category == category)
    }

    pub fn default_rules() -> Vec<CategoryRule> {
        vec![
            CategoryRule::new(
                Category::Urgency,
                15,
                &[
                    "urgent",
                    "immediately",
                    "now",
                    "asap",
                    "hurry",
                    "quick",
                    "fast",
                    "expire",
                    "limited time",
                ],
            ),
            CategoryRule::new(
                Category::Money,
                25,
                &[
                    "winner",
                    "won",
                    "prize",
                    "lottery",
                    "million",
                    "thousand",
                    "cash",
                    "reward",
                    "claim",
                    "free money",
                ],
            ),
            CategoryRule::new(
                Category::Banking,
                30,
                &[
                    "bank account",
                    "credit card",
                    "debit card",
                    "cvv",
                    "pin",
                    "otp",
                    "password",
                    "verify account",
                    "suspended",
                    "blocked",
                ],
            ),
            CategoryRule::new(
                Category::Threats,
                25,
                &[
                    "suspend",
                    "block",
                    "terminate",
                    "legal action",
                    "arrest",
                    "police",
                    "court",
                    "fine",
                ],
            ),
            CategoryRule::new(
                Category::Requests,
                20,
                &[
                    "click here",
                    "click link",
                    "download",
                    "install",
                    "update",
                    "verify",
                    "confirm",
                    "send money",
                    "transfer",
                ],
            ),
            CategoryRule::new(
                Category::Impersonation,
                20,
                &[
                    "bank",
                    "government",
                    "tax department",
                    "irs",
                    "police",
                    "courier",
                    "delivery",
                    "amazon",
                    "paypal",
                ],
            ),
        ]
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::new(Self::default_rules())
    }
}
