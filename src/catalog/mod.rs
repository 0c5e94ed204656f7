//! Reference catalog
//!
//! Read-only tables backing the information views:
//! - [`stats`]: prevalence and symptom statistics per disease
//! - [`categories`]: diseases grouped by category
//! - [`resources`]: support and research organisations

pub mod categories;
pub mod resources;
pub mod stats;

pub use categories::{categories_of, disease_categories, find_category, DiseaseCategory};
pub use resources::{resources, resources_tagged, Resource, ResourceType};
pub use stats::{disease_stats, find_stats, AgeBucket, DiseaseStats, SymptomPrevalence};

use thiserror::Error;

/// Errors from catalog lookups
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Disease not found: {0}")]
    DiseaseNotFound(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),
}

/// Result type for catalog lookups
pub type CatalogResult<T> = Result<T, CatalogError>;
