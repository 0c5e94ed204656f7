//! # RareDex
//!
//! Rare disease information hub with a guided symptom interview.
//!
//! ## Features
//!
//! - **Guided interview**: scripted demographics and symptom questions that
//!   branch to rare or common follow-ups
//! - **Heuristic scoring**: substring matching of collected symptoms against a
//!   fixed condition table
//! - **Free-text analysis**: one-shot keyword extraction and ranking
//! - **Reference catalog**: disease statistics, categories and resources
//!
//! ## Modules
//!
//! - [`interview`]: session state machine, question scripts, answer extraction
//! - [`conditions`]: condition table, vocabulary and scorer
//! - [`catalog`]: static reference tables
//! - [`config`]: TOML and environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use raredex::{InterviewConfig, Interviewer, TurnOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let interviewer = Interviewer::new(InterviewConfig::default());
//!     let mut session = interviewer.start();
//!
//!     let answers = [
//!         "I'm around 15", "girl",
//!         "yes", "flexible joints", "no", "no", "no",
//!         "yes", "yes", "no", "no", "no",
//!     ];
//!     for answer in answers {
//!         if let TurnOutcome::Diagnosed(result) = interviewer.respond(&mut session, answer).await? {
//!             println!("Possible condition: {}", result);
//!         }
//!     }
//!
//!     for turn in session.transcript().turns() {
//!         println!("{}", turn);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod conditions;
pub mod config;
pub mod interview;

// Re-export top-level types for convenience
pub use conditions::{
    analyze_text, best_match, Condition, ConditionCategory, ConditionTable, ConfidenceBand,
    DiagnosisResult, SymptomAnalysis, Vocabulary,
};

pub use interview::{
    Demographics, Gender, Intake, InterviewError, InterviewResult, InterviewSession, Interviewer,
    Phase, ThinkingDelay, Transcript, TurnOutcome,
};

pub use catalog::{CatalogError, CatalogResult, DiseaseCategory, DiseaseStats, Resource};

pub use config::{Config, ConfigError, InterviewConfig, LoggingConfig};
