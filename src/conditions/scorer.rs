//! Condition scorer
//!
//! Scores candidate conditions against a list of collected symptom entries.
//!
//! For each candidate:
//!
//! ```text
//! confidence = 100 * matched_entries / canonical_symptom_count
//! ```
//!
//! where an entry matches if it equals a canonical symptom, is contained in
//! one, or contains one. Every matching entry counts, so duplicate entries
//! raise the score and it can exceed 100. Scores are per condition and are
//! not normalized across candidates.

use super::table::{Condition, ConditionCategory};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Name reported when no candidate scores above zero
pub const UNKNOWN_CONDITION: &str = "Unknown";

/// Score of a single candidate
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionScore<'a> {
    pub condition: &'a Condition,
    /// Collected entries that matched a canonical symptom
    pub matched: usize,
    /// 100 * matched / canonical symptom count
    pub confidence: f64,
}

/// Final result of an interview or analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosisResult {
    pub condition_name: String,
    /// `None` for the unknown sentinel
    pub category: Option<ConditionCategory>,
    pub confidence_percent: f64,
}

impl DiagnosisResult {
    /// Sentinel for "nothing matched"
    pub fn unknown() -> Self {
        Self {
            condition_name: UNKNOWN_CONDITION.to_string(),
            category: None,
            confidence_percent: 0.0,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.category.is_none()
    }

    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::from_confidence(self.confidence_percent)
    }
}

impl From<&ConditionScore<'_>> for DiagnosisResult {
    fn from(score: &ConditionScore<'_>) -> Self {
        Self {
            condition_name: score.condition.name.clone(),
            category: Some(score.condition.category),
            confidence_percent: score.confidence,
        }
    }
}

impl std::fmt::Display for DiagnosisResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({:.1}% confidence)",
            self.condition_name, self.confidence_percent
        )
    }
}

/// Coarse confidence bucket for display
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
    /// 70% and above
    High,
    /// 50% to below 70%
    Moderate,
    /// Below 50%
    Low,
}

impl ConfidenceBand {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 70.0 {
            ConfidenceBand::High
        } else if confidence >= 50.0 {
            ConfidenceBand::Moderate
        } else {
            ConfidenceBand::Low
        }
    }
}

impl std::fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceBand::High => write!(f, "high"),
            ConfidenceBand::Moderate => write!(f, "moderate"),
            ConfidenceBand::Low => write!(f, "low"),
        }
    }
}

/// Whether a collected entry counts toward a canonical symptom.
///
/// An entry matches when it contains the canonical symptom, or when it
/// appears in the canonical symptom as whole words ("pain" in "joint pain",
/// but not "a" in "fatigue").
fn entry_matches(entry: &str, canonical: &str) -> bool {
    if entry.is_empty() {
        return false;
    }
    entry == canonical || contains_words(canonical, entry) || entry.contains(canonical)
}

/// Whether `needle` occurs in `haystack` bounded by non-alphanumerics
fn contains_words(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Score one condition
pub fn score_condition<'a, S: AsRef<str>>(
    collected: &[S],
    condition: &'a Condition,
) -> ConditionScore<'a> {
    let total = condition.canonical_symptoms.len();

    let matched = collected
        .iter()
        .map(|entry| entry.as_ref().trim().to_lowercase())
        .filter(|entry| {
            condition
                .canonical_symptoms
                .iter()
                .any(|canonical| entry_matches(entry, canonical))
        })
        .count();

    let confidence = if total == 0 {
        0.0
    } else {
        matched as f64 / total as f64 * 100.0
    };

    ConditionScore {
        condition,
        matched,
        confidence,
    }
}

/// Score every candidate, preserving candidate order
pub fn score_conditions<'a, S: AsRef<str>>(
    collected: &[S],
    candidates: &[&'a Condition],
) -> Vec<ConditionScore<'a>> {
    candidates
        .iter()
        .map(|condition| score_condition(collected, condition))
        .collect()
}

/// Score and sort descending by confidence; ties keep candidate order
pub fn rank_conditions<'a, S: AsRef<str>>(
    collected: &[S],
    candidates: &[&'a Condition],
) -> Vec<ConditionScore<'a>> {
    let mut scores = score_conditions(collected, candidates);
    // Vec::sort_by is stable
    scores.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });
    scores
}

/// Best candidate, or the unknown sentinel if nothing scores above zero
pub fn best_match<S: AsRef<str>>(collected: &[S], candidates: &[&Condition]) -> DiagnosisResult {
    rank_conditions(collected, candidates)
        .first()
        .filter(|top| top.confidence > 0.0)
        .map(DiagnosisResult::from)
        .unwrap_or_else(DiagnosisResult::unknown)
}
