//! Interview error types
//!
//! Invalid answers, unparseable demographics and unmatched symptoms are not
//! errors: they re-prompt, fall back to defaults, or produce the unknown
//! diagnosis. These variants cover misuse of a session.

use super::types::Phase;
use thiserror::Error;

/// Errors that can occur while driving an interview
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InterviewError {
    /// The session already holds a final diagnosis
    #[error("Interview already complete")]
    Completed,

    /// Input arrived while the diagnosis is being evaluated
    #[error("Input locked while answers are evaluated")]
    InputLocked,

    /// Evaluation requested before the last follow-up question was answered
    #[error("Nothing to evaluate in phase {0}")]
    NotReadyToEvaluate(Phase),

    /// Question index points outside the active script
    #[error("No question {index} in phase {phase}")]
    QuestionOutOfRange { phase: Phase, index: usize },
}

/// Result type for interview operations
pub type InterviewResult<T> = Result<T, InterviewError>;
