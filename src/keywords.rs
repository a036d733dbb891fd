use crate::taxonomy::{Category, Taxonomy};

/// Keyword matches for a single category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMatch<'a> {
    pub category: Category,
    pub keywords: Vec<&'a str>,
    pub risk: u32,
}

/// Caps how many keyword hits in one category count towards its risk.
pub const MAX_COUNTED_MATCHES: usize = 3;

pub fn category_risk(weight: u32, match_count: usize) -> u32 {
    weight.saturating_mul(match_count.min(MAX_COUNTED_MATCHES) as u32)
}

/// Substring keyword matcher over a taxonomy.
pub struct KeywordMatcher<'t> {
    taxonomy: &'t Taxonomy,
}

impl<'t> KeywordMatcher<'t> {
    pub fn new(taxonomy: &'t Taxonomy) -> Self {
        Self { taxonomy }
    }

    /// Matches `normalized` (already lower-cased) against every category.
    /// Only categories with at least one hit are returned, in taxonomy order,
    /// and keywords keep their declaration order.
    pub fn find_matches(&self, normalized: &str) -> Vec<CategoryMatch<'t>> {
        let taxonomy: &'t Taxonomy = self.taxonomy;
        let mut matches = Vec::new();

        for rule in taxonomy.rules() {
            let keywords: Vec<&'t str> = rule
                .keywords
                .iter()
                .filter(|keyword| normalized.contains(keyword.as_str()))
                .map(|keyword| keyword.as_str())
                .collect();

            if keywords.is_empty() {
                continue;
            }

            let risk = category_risk(rule.weight, keywords.len());
            log::debug!(
                "Category {} matched {:?} (+{})",
                rule.category,
                keywords,
                risk
            );
            matches.push(CategoryMatch {
                category: rule.category,
                keywords,
                risk,
            });
        }

        matches
    }
}
