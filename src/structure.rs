use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EXCESSIVE_PUNCTUATION: Regex = Regex::new(r"[!?]{3,}").unwrap();
    // ASCII boundaries: "ÉCOLE" contributes "COLE".
    static ref SHOUTED_WORD: Regex = Regex::new(r"(?-u:\b)[A-Z]{4,}(?-u:\b)").unwrap();
}

pub const SHORT_MESSAGE_LEN: usize = 20;
pub const SHORT_MESSAGE_POINTS: u32 = 5;
pub const PUNCTUATION_POINTS: u32 = 10;
pub const SHOUTING_POINTS: u32 = 10;
/// Shouting needs strictly more than this many all-caps words.
pub const SHOUTED_WORD_LIMIT: usize = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructuralSignals {
    pub short_message: bool,
    pub excessive_punctuation: bool,
    pub shouting: bool,
}

impl StructuralSignals {
    /// Runs every check against the original-case message.
    pub fn evaluate(message: &str) -> Self {
        let signals = Self {
            short_message: is_short(message),
            excessive_punctuation: EXCESSIVE_PUNCTUATION.is_match(message),
            shouting: shouted_words(message) > SHOUTED_WORD_LIMIT,
        };
        log::trace!("Structural signals: {:?}", signals);
        signals
    }

    pub fn points(&self) -> u32 {
        let mut points = 0;
        if self.short_message {
            points += SHORT_MESSAGE_POINTS;
        }
        if self.excessive_punctuation {
            points += PUNCTUATION_POINTS;
        }
        if self.shouting {
            points += SHOUTING_POINTS;
        }
        points
    }
}

/// Length is measured in UTF-16 code units, so an emoji counts as two.
fn is_short(message: &str) -> bool {
    message.encode_utf16().count() < SHORT_MESSAGE_LEN
}

fn shouted_words(message: &str) -> usize {
    SHOUTED_WORD.find_iter(message).count()
}
