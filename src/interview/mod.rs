//! Guided symptom interview
//!
//! A scripted dialogue that collects demographics and symptoms, branches to a
//! rare or common follow-up path, and scores the result against the condition
//! table.
//!
//! ```rust,no_run
//! use raredex::config::InterviewConfig;
//! use raredex::interview::{Interviewer, TurnOutcome};
//!
//! # async fn run() -> Result<(), raredex::interview::InterviewError> {
//! let interviewer = Interviewer::new(InterviewConfig::default());
//! let mut session = interviewer.start();
//!
//! for answer in ["I'm around 15", "girl", "yes"] {
//!     if let TurnOutcome::Diagnosed(result) = interviewer.respond(&mut session, answer).await? {
//!         println!("{}", result);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod delay;
mod error;
pub mod extract;
mod machine;
pub mod script;
mod types;

pub use delay::{NoDelay, ThinkingDelay, TimedDelay};
pub use error::{InterviewError, InterviewResult};
pub use extract::{AgeAnswer, Extracted, Validation};
pub use machine::{InterviewSession, Interviewer, TurnOutcome, DISCLAIMER};
pub use script::{DemographicKey, ExpectedSignal, Prompt};
pub use types::{Demographics, Gender, Intake, Phase, Speaker, Transcript, Turn};
