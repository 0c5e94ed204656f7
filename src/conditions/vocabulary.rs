//! Symptom vocabulary
//!
//! The set of keywords an answer can be recognized by. Built from the
//! condition table plus any extra signal words the question scripts use.

use super::table::ConditionTable;

/// Ordered keyword vocabulary used for substring matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    keywords: Vec<String>,
}

impl Vocabulary {
    /// Vocabulary of every canonical symptom in the table
    pub fn from_table(table: &ConditionTable) -> Self {
        Self {
            keywords: table.symptom_vocabulary(),
        }
    }

    /// Builder method: add signal keywords not already present
    pub fn with_signals<I, S>(mut self, signals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for signal in signals {
            let signal = signal.as_ref().trim().to_lowercase();
            if !signal.is_empty() && !self.keywords.contains(&signal) {
                self.keywords.push(signal);
            }
        }
        self
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k == keyword)
    }

    /// Keywords found in `text`, in vocabulary order.
    ///
    /// A keyword that is contained in another matched keyword is dropped, so
    /// "joint pain" does not also report "pain".
    pub fn find_in(&self, text: &str) -> Vec<String> {
        let text = text.to_lowercase();
        let matched: Vec<&String> = self
            .keywords
            .iter()
            .filter(|k| text.contains(k.as_str()))
            .collect();

        matched
            .iter()
            .filter(|k| {
                !matched
                    .iter()
                    .any(|other| other.len() > k.len() && other.contains(k.as_str()))
            })
            .map(|k| (*k).clone())
            .collect()
    }

    /// Whether `text` mentions any keyword at all
    pub fn mentions_any(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }
}
