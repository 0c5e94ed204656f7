//! Disease categories
//!
//! Well-known rare diseases grouped by category for browsing.

use super::{CatalogError, CatalogResult};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DiseaseCategory {
    pub name: &'static str,
    pub diseases: &'static [&'static str],
}

impl DiseaseCategory {
    pub fn contains(&self, disease: &str) -> bool {
        let needle = disease.trim().to_lowercase();
        self.diseases.iter().any(|d| d.to_lowercase() == needle)
    }
}

static DISEASE_CATEGORIES: &[DiseaseCategory] = &[
    DiseaseCategory {
        name: "Neurological",
        diseases: &[
            "Angelman Syndrome",
            "Huntington's Disease",
            "Rett Syndrome",
            "Narcolepsy",
            "Charcot-Marie-Tooth Disease",
        ],
    },
    DiseaseCategory {
        name: "Autoimmune",
        diseases: &[
            "Addison's Disease",
            "Guillain-Barré Syndrome",
            "Myasthenia Gravis",
            "Sjögren's Syndrome",
            "Vasculitis",
        ],
    },
    DiseaseCategory {
        name: "Genetic",
        diseases: &[
            "Ehlers-Danlos Syndrome",
            "Marfan Syndrome",
            "Cystic Fibrosis",
            "Phenylketonuria",
            "Gaucher Disease",
        ],
    },
    DiseaseCategory {
        name: "Metabolic",
        diseases: &[
            "Fabry Disease",
            "Pompe Disease",
            "Niemann-Pick Disease",
            "Maple Syrup Urine Disease",
            "Homocystinuria",
        ],
    },
];

pub fn disease_categories() -> &'static [DiseaseCategory] {
    DISEASE_CATEGORIES
}

/// Case-insensitive category lookup
pub fn find_category(name: &str) -> CatalogResult<&'static DiseaseCategory> {
    let needle = name.trim().to_lowercase();
    DISEASE_CATEGORIES
        .iter()
        .find(|c| c.name.to_lowercase() == needle)
        .ok_or_else(|| CatalogError::CategoryNotFound(name.trim().to_string()))
}

/// Categories listing a disease
pub fn categories_of(disease: &str) -> Vec<&'static str> {
    DISEASE_CATEGORIES
        .iter()
        .filter(|c| c.contains(disease))
        .map(|c| c.name)
        .collect()
}
