//! Condition table
//!
//! The fixed disease-symptom table the interview scores against:
//! - `Condition`: a named condition with its canonical symptom keywords
//! - `ConditionCategory`: rare vs. common classification
//! - `ConditionTable`: the ordered, read-only collection
//!
//! Declaration order is significant: scoring ties go to the condition
//! declared first.

use serde::{Deserialize, Serialize};

/// Whether a condition is considered rare or common
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ConditionCategory {
    /// Rare disease (the interview's rare follow-up branch)
    Rare,
    /// Common condition (the interview's common follow-up branch)
    Common,
}

impl ConditionCategory {
    /// Get all categories for iteration
    pub fn all() -> &'static [ConditionCategory] {
        &[ConditionCategory::Rare, ConditionCategory::Common]
    }
}

impl std::fmt::Display for ConditionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConditionCategory::Rare => write!(f, "rare"),
            ConditionCategory::Common => write!(f, "common"),
        }
    }
}

impl std::str::FromStr for ConditionCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rare" => Ok(ConditionCategory::Rare),
            "common" => Ok(ConditionCategory::Common),
            other => Err(format!("unknown condition category: {}", other)),
        }
    }
}

/// A condition and the symptom keywords that characterize it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Condition {
    /// Display name (e.g., "Addison's Disease")
    pub name: String,
    /// Canonical symptom keywords, lower-case, in declaration order
    pub canonical_symptoms: Vec<String>,
    /// Rare or common
    pub category: ConditionCategory,
}

impl Condition {
    /// Create a new condition
    pub fn new<S: AsRef<str>>(
        name: impl Into<String>,
        category: ConditionCategory,
        symptoms: &[S],
    ) -> Self {
        Self {
            name: name.into(),
            canonical_symptoms: symptoms
                .iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .collect(),
            category,
        }
    }

    pub fn is_rare(&self) -> bool {
        self.category == ConditionCategory::Rare
    }

    /// Check whether a canonical symptom is listed for this condition
    pub fn has_symptom(&self, symptom: &str) -> bool {
        self.canonical_symptoms.iter().any(|s| s == symptom)
    }
}

/// Ordered, immutable collection of conditions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConditionTable {
    conditions: Vec<Condition>,
}

impl ConditionTable {
    /// Build a table from conditions in declaration order
    pub fn new(conditions: Vec<Condition>) -> Self {
        Self { conditions }
    }

    /// The built-in RareDex table
    pub fn standard() -> Self {
        use ConditionCategory::{Common, Rare};

        Self::new(vec![
            Condition::new(
                "Ehlers-Danlos Syndrome",
                Rare,
                &[
                    "joint pain",
                    "fatigue",
                    "easy bruising",
                    "flexible joints",
                    "skin stretchiness",
                    "chronic pain",
                ],
            ),
            Condition::new(
                "POTS",
                Rare,
                &[
                    "dizziness",
                    "fatigue",
                    "rapid heartbeat",
                    "lightheadedness",
                    "exercise intolerance",
                ],
            ),
            Condition::new(
                "Addison's Disease",
                Rare,
                &[
                    "fatigue",
                    "weight loss",
                    "dark skin patches",
                    "low blood pressure",
                    "salt craving",
                ],
            ),
            Condition::new(
                "Fibromyalgia",
                Common,
                &["joint pain", "fatigue", "sleep issues", "widespread pain", "brain fog"],
            ),
            Condition::new(
                "Influenza",
                Common,
                &["fever", "fatigue", "cough", "body aches", "chills"],
            ),
            Condition::new(
                "Migraine",
                Common,
                &["headache", "nausea", "light sensitivity", "dizziness"],
            ),
            Condition::new(
                "Iron-Deficiency Anemia",
                Common,
                &[
                    "fatigue",
                    "pale skin",
                    "shortness of breath",
                    "dizziness",
                    "cold hands",
                ],
            ),
        ])
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// All conditions, as scoring candidates
    pub fn all(&self) -> Vec<&Condition> {
        self.conditions.iter().collect()
    }

    /// Conditions of one category, in table order
    pub fn by_category(&self, category: ConditionCategory) -> Vec<&Condition> {
        self.conditions
            .iter()
            .filter(|c| c.category == category)
            .collect()
    }

    /// Case-insensitive lookup by name
    pub fn get(&self, name: &str) -> Option<&Condition> {
        let needle = name.trim().to_lowercase();
        self.conditions
            .iter()
            .find(|c| c.name.to_lowercase() == needle)
    }

    /// Every canonical symptom, first occurrence order, no duplicates
    pub fn symptom_vocabulary(&self) -> Vec<String> {
        let mut vocabulary: Vec<String> = Vec::new();
        for symptom in self.conditions.iter().flat_map(|c| &c.canonical_symptoms) {
            if !vocabulary.contains(symptom) {
                vocabulary.push(symptom.clone());
            }
        }
        vocabulary
    }

    /// Symptoms listed by some rare condition and by no common condition.
    ///
    /// Any of these in an interview's screening answers routes it to the
    /// rare follow-up branch.
    pub fn rare_indicators(&self) -> Vec<String> {
        let (rare, common): (Vec<&Condition>, Vec<&Condition>) =
            self.conditions.iter().partition(|c| c.is_rare());

        let mut indicators: Vec<String> = Vec::new();
        for symptom in rare.into_iter().flat_map(|c| &c.canonical_symptoms) {
            let shared = common.iter().any(|c| c.has_symptom(symptom));
            if !shared && !indicators.contains(symptom) {
                indicators.push(symptom.clone());
            }
        }
        indicators
    }
}

impl Default for ConditionTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_order() {
        let table = ConditionTable::standard();
        let names: Vec<&str> = table.conditions().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names[0], "Ehlers-Danlos Syndrome");
        assert_eq!(names[1], "POTS");
        assert_eq!(names[2], "Addison's Disease");
        assert_eq!(table.get("addison's disease").unwrap().canonical_symptoms.len(), 5);
    }

    #[test]
    fn test_by_category() {
        let table = ConditionTable::standard();
        let rare = table.by_category(ConditionCategory::Rare);
        assert_eq!(rare.len(), 3);
        assert!(rare.iter().all(|c| c.is_rare()));

        let common = table.by_category(ConditionCategory::Common);
        assert!(common.iter().any(|c| c.name == "Fibromyalgia"));
        assert_eq!(rare.len() + common.len(), table.len());
    }

    #[test]
    fn test_vocabulary_is_deduplicated() {
        let table = ConditionTable::standard();
        let vocabulary = table.symptom_vocabulary();
        assert_eq!(vocabulary.iter().filter(|s| *s == "fatigue").count(), 1);
        assert_eq!(vocabulary[0], "joint pain");
    }

    #[test]
    fn test_rare_indicators_exclude_shared_symptoms() {
        let table = ConditionTable::standard();
        let indicators = table.rare_indicators();

        assert!(indicators.contains(&"flexible joints".to_string()));
        assert!(indicators.contains(&"salt craving".to_string()));
        // Shared with common conditions
        assert!(!indicators.contains(&"fatigue".to_string()));
        assert!(!indicators.contains(&"joint pain".to_string()));
        assert!(!indicators.contains(&"dizziness".to_string()));
    }

    #[test]
    fn test_category_parse_and_display() {
        assert_eq!("Rare".parse::<ConditionCategory>(), Ok(ConditionCategory::Rare));
        assert_eq!(ConditionCategory::Common.to_string(), "common");
        assert!("weird".parse::<ConditionCategory>().is_err());
    }
}
