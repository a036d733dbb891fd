pub mod config;
pub mod demo;
pub mod keywords;
pub mod patterns;
pub mod scoring;
pub mod structure;
pub mod taxonomy;

pub use config::EngineConfig;
pub use scoring::{AnalysisResult, Classification, Flag, FlagCategory, ScoringEngine, Thresholds};
pub use taxonomy::{Category, CategoryRule, Taxonomy};

use lazy_static::lazy_static;

lazy_static! {
    static ref DEFAULT_ENGINE: ScoringEngine = ScoringEngine::default();
}

/// Process-wide engine with the built-in taxonomy and rules.
pub fn default_engine() -> &'static ScoringEngine {
    &DEFAULT_ENGINE
}

/// Scores `message` with the default engine.
pub fn analyze(message: &str) -> AnalysisResult {
    DEFAULT_ENGINE.analyze(message)
}
