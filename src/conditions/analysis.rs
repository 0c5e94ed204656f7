//! Free-text symptom analysis
//!
//! One-shot counterpart to the guided interview: pulls symptom keywords out
//! of a paragraph and ranks every condition in the table against them.

use super::scorer::{rank_conditions, ConfidenceBand};
use super::table::{ConditionCategory, ConditionTable};
use super::vocabulary::Vocabulary;
use serde::{Deserialize, Serialize};

/// How many ranked conditions an analysis reports
pub const MAX_POSSIBLE_CONDITIONS: usize = 3;

/// A condition suggested by an analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PossibleCondition {
    pub name: String,
    pub category: ConditionCategory,
    pub confidence: f64,
    pub band: ConfidenceBand,
}

/// Result of analyzing a free-text description
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SymptomAnalysis {
    pub key_symptoms: Vec<String>,
    pub possible_conditions: Vec<PossibleCondition>,
    pub recommendation: String,
}

impl SymptomAnalysis {
    pub fn is_empty(&self) -> bool {
        self.possible_conditions.is_empty()
    }
}

/// Analyze a free-text symptom description
pub fn analyze_text(text: &str, table: &ConditionTable, vocabulary: &Vocabulary) -> SymptomAnalysis {
    let key_symptoms = vocabulary.find_in(text);

    let possible_conditions: Vec<PossibleCondition> = rank_conditions(&key_symptoms, &table.all())
        .into_iter()
        .filter(|score| score.confidence > 0.0)
        .take(MAX_POSSIBLE_CONDITIONS)
        .map(|score| PossibleCondition {
            name: score.condition.name.clone(),
            category: score.condition.category,
            confidence: score.confidence,
            band: ConfidenceBand::from_confidence(score.confidence),
        })
        .collect();

    tracing::debug!(
        key_symptoms = key_symptoms.len(),
        matches = possible_conditions.len(),
        "Analyzed symptom description"
    );

    let recommendation = recommendation_for(possible_conditions.first().map(|c| c.category));

    SymptomAnalysis {
        key_symptoms,
        possible_conditions,
        recommendation,
    }
}

fn recommendation_for(leading: Option<ConditionCategory>) -> String {
    let text = match leading {
        Some(ConditionCategory::Rare) => {
            "The symptoms described overlap with rare conditions. Consider consulting a specialist \
             such as a geneticist, cardiologist or endocrinologist for proper evaluation."
        }
        Some(ConditionCategory::Common) => {
            "The symptoms described are consistent with common conditions. Consider discussing them \
             with your primary care provider."
        }
        None => {
            "No known condition matched the symptoms described. Try describing specific symptoms \
             such as fatigue, joint pain or dizziness."
        }
    };
    text.to_string()
}
