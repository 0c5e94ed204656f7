//! Conditions and scoring
//!
//! The static condition table, the keyword vocabulary derived from it, and the
//! substring-count scorer used by both the guided interview and free-text
//! analysis.

mod analysis;
mod scorer;
mod table;
mod vocabulary;

pub use analysis::{analyze_text, PossibleCondition, SymptomAnalysis, MAX_POSSIBLE_CONDITIONS};
pub use scorer::{
    best_match, rank_conditions, score_condition, score_conditions, ConditionScore,
    ConfidenceBand, DiagnosisResult, UNKNOWN_CONDITION,
};
pub use table::{Condition, ConditionCategory, ConditionTable};
pub use vocabulary::Vocabulary;
