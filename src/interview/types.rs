//! Core interview types
//!
//! - `Phase`: the stages of the guided interview
//! - `Gender` and `Demographics`: what the demographics phase collects
//! - `Turn` and `Transcript`: the append-only message log
//! - `Intake`: an optional complaint captured before the interview starts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stage of the guided interview
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Age, then gender
    Demographics,
    /// Broad screening prompts
    GeneralScreening,
    /// Symptom groups characteristic of rare conditions
    RareFollowUp,
    /// Symptom groups characteristic of common conditions
    CommonFollowUp,
    /// Terminal; a diagnosis has been produced
    Complete,
}

impl Phase {
    pub fn is_follow_up(&self) -> bool {
        matches!(self, Phase::RareFollowUp | Phase::CommonFollowUp)
    }

    pub fn is_symptom_phase(&self) -> bool {
        matches!(
            self,
            Phase::GeneralScreening | Phase::RareFollowUp | Phase::CommonFollowUp
        )
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Demographics => write!(f, "demographics"),
            Phase::GeneralScreening => write!(f, "general_screening"),
            Phase::RareFollowUp => write!(f, "rare_follow_up"),
            Phase::CommonFollowUp => write!(f, "common_follow_up"),
            Phase::Complete => write!(f, "complete"),
        }
    }
}

/// Canonical gender tag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Other,
    /// Declined, unsure, or never answered
    Unspecified,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
            Gender::Other => write!(f, "Other"),
            Gender::Unspecified => write!(f, "Unspecified"),
        }
    }
}

/// Demographics collected in the first phase
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Demographics {
    pub age: Option<u8>,
    pub gender: Option<Gender>,
}

impl std::fmt::Display for Demographics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let age = self
            .age
            .map(|a| a.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let gender = self.gender.unwrap_or(Gender::Unspecified);
        write!(f, "age: {}, gender: {}", age, gender)
    }
}

/// Who said something
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Bot,
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Speaker::User => write!(f, "You"),
            Speaker::Bot => write!(f, "Bot"),
        }
    }
}

/// A single transcript entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl Turn {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            at: Utc::now(),
        }
    }
}

impl std::fmt::Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.speaker, self.text)
    }
}

/// Append-only conversation log
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::new(Speaker::User, text));
    }

    pub fn push_bot(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::new(Speaker::Bot, text));
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Turns appended at or after `index`
    pub fn since(&self, index: usize) -> &[Turn] {
        self.turns.get(index..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn last_bot(&self) -> Option<&Turn> {
        self.turns.iter().rev().find(|t| t.speaker == Speaker::Bot)
    }
}

/// Complaint captured before the interview starts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Intake {
    pub complaint: String,
    pub severity: String,
}

impl Intake {
    pub fn new(complaint: impl Into<String>, severity: impl Into<String>) -> Self {
        Self {
            complaint: complaint.into(),
            severity: severity.into(),
        }
    }
}
