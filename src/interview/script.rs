//! Question scripts
//!
//! Static, ordered prompts for each interview phase. Each prompt carries the
//! signal an answer is expected to provide: a demographic field, a single
//! symptom keyword, or a symptom group that an affirmative answer adds in
//! full.

use super::types::Phase;

/// Which demographic field a prompt collects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemographicKey {
    Age,
    Gender,
}

/// What an answer to a prompt is expected to contribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedSignal {
    Demographic(DemographicKey),
    Keyword(&'static str),
    Keywords(&'static [&'static str]),
}

impl ExpectedSignal {
    /// Symptom keywords an affirmative answer contributes
    pub fn keywords(&self) -> Vec<&'static str> {
        match self {
            ExpectedSignal::Demographic(_) => Vec::new(),
            ExpectedSignal::Keyword(k) => vec![*k],
            ExpectedSignal::Keywords(ks) => ks.to_vec(),
        }
    }
}

/// A single scripted question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prompt {
    pub text: &'static str,
    pub expected: ExpectedSignal,
}

const fn prompt(text: &'static str, expected: ExpectedSignal) -> Prompt {
    Prompt { text, expected }
}

const DEMOGRAPHIC_PROMPTS: &[Prompt] = &[
    prompt(
        "How old are you?",
        ExpectedSignal::Demographic(DemographicKey::Age),
    ),
    prompt(
        "What's your gender? (e.g., Male, Female, Other)",
        ExpectedSignal::Demographic(DemographicKey::Gender),
    ),
];

const SCREENING_PROMPTS: &[Prompt] = &[
    prompt(
        "Do you have any fatigue or tiredness?",
        ExpectedSignal::Keyword("fatigue"),
    ),
    prompt(
        "Are you experiencing any pain? Where?",
        ExpectedSignal::Keyword("pain"),
    ),
    prompt(
        "Do you have dizziness or balance issues?",
        ExpectedSignal::Keyword("dizziness"),
    ),
    prompt(
        "Have you had a fever recently?",
        ExpectedSignal::Keyword("fever"),
    ),
    prompt(
        "Do you have a cough or any trouble breathing?",
        ExpectedSignal::Keyword("cough"),
    ),
];

const RARE_FOLLOW_UP_PROMPTS: &[Prompt] = &[
    prompt(
        "Do you bruise easily or notice unusual skin changes?",
        ExpectedSignal::Keywords(&["easy bruising", "skin stretchiness", "dark skin patches"]),
    ),
    prompt(
        "Do your joints feel unusually flexible or do you have chronic pain?",
        ExpectedSignal::Keywords(&["flexible joints", "chronic pain", "joint pain"]),
    ),
    prompt(
        "Do you feel dizzy or have a rapid heartbeat when standing?",
        ExpectedSignal::Keywords(&["dizziness", "rapid heartbeat", "lightheadedness"]),
    ),
    prompt(
        "Have you lost weight unexpectedly or crave salt?",
        ExpectedSignal::Keywords(&["weight loss", "salt craving"]),
    ),
    prompt(
        "Do you have trouble sleeping or feel foggy?",
        ExpectedSignal::Keywords(&["sleep issues", "brain fog"]),
    ),
];

const COMMON_FOLLOW_UP_PROMPTS: &[Prompt] = &[
    prompt(
        "Do you get headaches, nausea, or sensitivity to light?",
        ExpectedSignal::Keywords(&["headache", "nausea", "light sensitivity"]),
    ),
    prompt(
        "Have you had chills, a cough, or body aches?",
        ExpectedSignal::Keywords(&["chills", "cough", "body aches"]),
    ),
    prompt(
        "Do you have widespread pain or aching joints?",
        ExpectedSignal::Keywords(&["widespread pain", "joint pain"]),
    ),
    prompt(
        "Do you have trouble sleeping or feel foggy?",
        ExpectedSignal::Keywords(&["sleep issues", "brain fog"]),
    ),
    prompt(
        "Is your skin pale, are your hands cold, or do you get short of breath?",
        ExpectedSignal::Keywords(&["pale skin", "cold hands", "shortness of breath"]),
    ),
];

/// Prompts for a phase; empty for `Complete`
pub fn prompts(phase: Phase) -> &'static [Prompt] {
    match phase {
        Phase::Demographics => DEMOGRAPHIC_PROMPTS,
        Phase::GeneralScreening => SCREENING_PROMPTS,
        Phase::RareFollowUp => RARE_FOLLOW_UP_PROMPTS,
        Phase::CommonFollowUp => COMMON_FOLLOW_UP_PROMPTS,
        Phase::Complete => &[],
    }
}

/// A single prompt, if the index is in range
pub fn prompt_at(phase: Phase, index: usize) -> Option<&'static Prompt> {
    prompts(phase).get(index)
}

/// Every symptom keyword any prompt can contribute, in script order
pub fn signal_keywords() -> Vec<&'static str> {
    let mut keywords: Vec<&'static str> = Vec::new();
    for phase in [
        Phase::GeneralScreening,
        Phase::RareFollowUp,
        Phase::CommonFollowUp,
    ] {
        for keyword in prompts(phase).iter().flat_map(|p| p.expected.keywords()) {
            if !keywords.contains(&keyword) {
                keywords.push(keyword);
            }
        }
    }
    keywords
}
