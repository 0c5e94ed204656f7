//! Disease statistics
//!
//! Prevalence, age distribution and symptom prevalence for the diseases the
//! statistics view covers.

use super::{CatalogError, CatalogResult};
use serde::Serialize;

/// Share of patients in an age bracket
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct AgeBucket {
    pub age: &'static str,
    pub count: u32,
}

/// How often a symptom occurs among patients
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SymptomPrevalence {
    pub name: &'static str,
    pub percentage: u8,
}

/// Statistics for one disease
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DiseaseStats {
    pub name: &'static str,
    pub prevalence: &'static str,
    pub demographics: &'static [AgeBucket],
    pub symptoms: &'static [SymptomPrevalence],
    pub description: &'static str,
}

impl DiseaseStats {
    /// Symptom with the highest prevalence; first listed wins ties
    pub fn leading_symptom(&self) -> Option<&SymptomPrevalence> {
        self.symptoms
            .iter()
            .rev()
            .max_by_key(|s| s.percentage)
    }

    /// Age bracket with the most patients; first listed wins ties
    pub fn peak_age_bracket(&self) -> Option<&AgeBucket> {
        self.demographics.iter().rev().max_by_key(|b| b.count)
    }
}

const fn bucket(age: &'static str, count: u32) -> AgeBucket {
    AgeBucket { age, count }
}

const fn symptom(name: &'static str, percentage: u8) -> SymptomPrevalence {
    SymptomPrevalence { name, percentage }
}

static DISEASE_STATS: &[DiseaseStats] = &[
    DiseaseStats {
        name: "Ehlers-Danlos Syndrome",
        prevalence: "1 in 5,000 people worldwide",
        demographics: &[
            bucket("0-18", 25),
            bucket("19-30", 35),
            bucket("31-45", 20),
            bucket("46-60", 15),
            bucket("61+", 5),
        ],
        symptoms: &[
            symptom("Joint hypermobility", 90),
            symptom("Skin hyperextensibility", 70),
            symptom("Chronic pain", 80),
            symptom("Easy bruising", 65),
            symptom("Fatigue", 75),
        ],
        description: "Ehlers-Danlos syndrome is a group of inherited disorders that affect the \
                      connective tissues, primarily skin, joints, and blood vessel walls.",
    },
    DiseaseStats {
        name: "POTS",
        prevalence: "1 to 3 million Americans",
        demographics: &[
            bucket("0-18", 20),
            bucket("19-30", 40),
            bucket("31-45", 25),
            bucket("46-60", 10),
            bucket("61+", 5),
        ],
        symptoms: &[
            symptom("Tachycardia upon standing", 95),
            symptom("Lightheadedness", 85),
            symptom("Fatigue", 80),
            symptom("Brain fog", 75),
            symptom("Exercise intolerance", 70),
        ],
        description: "Postural Orthostatic Tachycardia Syndrome (POTS) is a condition that \
                      affects circulation, causing an abnormal increase in heart rate when \
                      standing up from a lying position.",
    },
    DiseaseStats {
        name: "Addison's Disease",
        prevalence: "1 in 100,000 people",
        demographics: &[
            bucket("0-18", 10),
            bucket("19-30", 25),
            bucket("31-45", 35),
            bucket("46-60", 20),
            bucket("61+", 10),
        ],
        symptoms: &[
            symptom("Fatigue", 90),
            symptom("Weight loss", 80),
            symptom("Hyperpigmentation", 75),
            symptom("Low blood pressure", 85),
            symptom("Salt craving", 65),
        ],
        description: "Addison's disease is a rare condition where the adrenal glands don't \
                      produce enough hormones, particularly cortisol and aldosterone.",
    },
    DiseaseStats {
        name: "Angelman Syndrome",
        prevalence: "1 in 12,000 to 20,000 people",
        demographics: &[
            bucket("0-18", 60),
            bucket("19-30", 25),
            bucket("31-45", 10),
            bucket("46-60", 4),
            bucket("61+", 1),
        ],
        symptoms: &[
            symptom("Developmental delays", 100),
            symptom("Speech impairment", 95),
            symptom("Movement/balance issues", 90),
            symptom("Seizures", 80),
            symptom("Happy demeanor", 85),
        ],
        description: "Angelman syndrome is a genetic disorder that causes developmental \
                      disabilities and neurological problems, including difficulty with \
                      movement and balance, seizures, and speech impairment.",
    },
];

/// Every disease with statistics, in display order
pub fn disease_stats() -> &'static [DiseaseStats] {
    DISEASE_STATS
}

/// Case-insensitive lookup
pub fn find_stats(name: &str) -> CatalogResult<&'static DiseaseStats> {
    let needle = name.trim().to_lowercase();
    DISEASE_STATS
        .iter()
        .find(|s| s.name.to_lowercase() == needle)
        .ok_or_else(|| CatalogError::DiseaseNotFound(name.trim().to_string()))
}
