//! Interview state machine
//!
//! Drives an `InterviewSession` through its phases one answer at a time:
//!
//! ```text
//! Demographics -> GeneralScreening -> RareFollowUp   -> Complete
//!                                  \-> CommonFollowUp -/
//! ```
//!
//! `Interviewer` holds the read-only pieces (condition table, vocabulary,
//! configuration, thinking delay) and can serve any number of sessions.
//! Each session is owned by its caller and passed in by `&mut`.

use super::delay::{ThinkingDelay, TimedDelay};
use super::error::{InterviewError, InterviewResult};
use super::extract::{self, Extracted};
use super::script::{self, DemographicKey, ExpectedSignal, Prompt};
use super::types::{Demographics, Gender, Intake, Phase, Transcript};
use crate::conditions::{best_match, ConditionCategory, ConditionTable, DiagnosisResult, Vocabulary};
use crate::config::InterviewConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Shown after every diagnosis
pub const DISCLAIMER: &str = "This is not a definitive medical diagnosis. Please consult a \
                              healthcare professional for further evaluation and confirmation.";

const OPENING: &str = "Hi! Let's get started.";
const EVALUATING: &str = "Thanks! Let me review your answers...";

/// One conversation's state.
///
/// While the phase is not `Complete`, `question_index` always points at a
/// prompt of the active phase.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewSession {
    id: Uuid,
    phase: Phase,
    question_index: usize,
    demographics: Demographics,
    collected_symptoms: Vec<String>,
    retry_count: u32,
    awaiting_evaluation: bool,
    transcript: Transcript,
    final_diagnosis: Option<DiagnosisResult>,
    intake: Option<Intake>,
    created_at: DateTime<Utc>,
}

impl InterviewSession {
    fn new(intake: Option<Intake>) -> Self {
        let collected_symptoms = intake
            .as_ref()
            .map(|i| i.complaint.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .into_iter()
            .collect();

        Self {
            id: Uuid::new_v4(),
            phase: Phase::Demographics,
            question_index: 0,
            demographics: Demographics::default(),
            collected_symptoms,
            retry_count: 0,
            awaiting_evaluation: false,
            transcript: Transcript::new(),
            final_diagnosis: None,
            intake,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn demographics(&self) -> &Demographics {
        &self.demographics
    }

    /// Collected symptom entries in answer order, duplicates included
    pub fn collected_symptoms(&self) -> &[String] {
        &self.collected_symptoms
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn final_diagnosis(&self) -> Option<&DiagnosisResult> {
        self.final_diagnosis.as_ref()
    }

    pub fn intake(&self) -> Option<&Intake> {
        self.intake.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// True between the last follow-up answer and the diagnosis
    pub fn is_input_locked(&self) -> bool {
        self.awaiting_evaluation || self.is_complete()
    }

    /// The question currently awaiting an answer
    pub fn current_prompt(&self) -> Option<&'static Prompt> {
        script::prompt_at(self.phase, self.question_index)
    }
}

/// What happened to a submitted answer
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Blank input; nothing recorded
    Ignored,
    /// Answer not usable; the same question was asked again
    Reprompted { retry_count: u32 },
    /// Answer applied; `phase` is the phase now active
    Accepted { phase: Phase, forced: bool },
    /// Last follow-up answered; input locked until `conclude`
    AwaitingEvaluation,
    /// Interview finished with this result
    Diagnosed(DiagnosisResult),
}

/// Runs interviews against a condition table
pub struct Interviewer {
    table: Arc<ConditionTable>,
    vocabulary: Vocabulary,
    rare_indicators: Vec<String>,
    config: InterviewConfig,
    delay: Arc<dyn ThinkingDelay>,
}

impl Interviewer {
    /// Interviewer over the built-in condition table
    pub fn new(config: InterviewConfig) -> Self {
        Self::with_table(Arc::new(ConditionTable::standard()), config)
    }

    pub fn with_table(table: Arc<ConditionTable>, config: InterviewConfig) -> Self {
        let vocabulary = Vocabulary::from_table(&table).with_signals(script::signal_keywords());
        let rare_indicators = table.rare_indicators();
        let delay = Arc::new(TimedDelay::from_millis(config.thinking_delay_ms));

        Self {
            table,
            vocabulary,
            rare_indicators,
            config,
            delay,
        }
    }

    /// Builder method: replace the thinking delay
    pub fn with_delay(mut self, delay: Arc<dyn ThinkingDelay>) -> Self {
        self.delay = delay;
        self
    }

    pub fn table(&self) -> &ConditionTable {
        &self.table
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn config(&self) -> &InterviewConfig {
        &self.config
    }

    /// Start a fresh session and ask the first question
    pub fn start(&self) -> InterviewSession {
        self.open(InterviewSession::new(None))
    }

    /// Start a session seeded with an intake complaint
    pub fn start_with_intake(&self, intake: Intake) -> InterviewSession {
        self.open(InterviewSession::new(Some(intake)))
    }

    fn open(&self, mut session: InterviewSession) -> InterviewSession {
        let first = first_prompt_text(Phase::Demographics);
        session.transcript.push_bot(format!("{} {}", OPENING, first));

        tracing::debug!(
            session_id = %session.id,
            intake = session.intake.is_some(),
            "Interview started"
        );
        session
    }

    /// Whether collected entries point at the rare follow-up branch
    pub fn evaluate_rarity(&self, collected: &[String]) -> bool {
        collected.iter().any(|entry| {
            let entry = entry.to_lowercase();
            self.rare_indicators
                .iter()
                .any(|indicator| entry.contains(indicator.as_str()))
        })
    }

    /// Apply one user answer.
    ///
    /// Invalid answers are re-asked until the retry ceiling is reached, after
    /// which the next answer is accepted with whatever it yields. Finishing
    /// the last follow-up question returns `AwaitingEvaluation`; call
    /// `conclude` to produce the diagnosis.
    pub fn submit(
        &self,
        session: &mut InterviewSession,
        input: &str,
    ) -> InterviewResult<TurnOutcome> {
        if session.is_complete() {
            return Err(InterviewError::Completed);
        }
        if session.awaiting_evaluation {
            return Err(InterviewError::InputLocked);
        }

        let answer = input.trim();
        if answer.is_empty() {
            return Ok(TurnOutcome::Ignored);
        }

        let prompt = session
            .current_prompt()
            .ok_or(InterviewError::QuestionOutOfRange {
                phase: session.phase,
                index: session.question_index,
            })?;

        session.transcript.push_user(answer);

        let validation = extract::validate(
            answer,
            session.phase,
            prompt,
            &session.collected_symptoms,
            &self.vocabulary,
        );

        tracing::debug!(
            session_id = %session.id,
            phase = %session.phase,
            question = session.question_index,
            valid = validation.valid,
            "Processed answer"
        );

        if !validation.valid && session.retry_count < self.config.retry_ceiling {
            session.retry_count += 1;
            session.transcript.push_bot(reprompt_text(prompt));
            return Ok(TurnOutcome::Reprompted {
                retry_count: session.retry_count,
            });
        }

        let forced = !validation.valid;
        if forced {
            tracing::warn!(
                session_id = %session.id,
                phase = %session.phase,
                question = session.question_index,
                retries = session.retry_count,
                "Retry ceiling reached, accepting answer as given"
            );
        }
        session.retry_count = 0;

        match session.phase {
            Phase::Demographics => self.handle_demographics(session, prompt, validation.extracted),
            Phase::GeneralScreening | Phase::RareFollowUp | Phase::CommonFollowUp => {
                handle_symptoms(session, validation.extracted)
            }
            Phase::Complete => return Err(InterviewError::Completed),
        }

        Ok(self.advance(session, forced))
    }

    /// Wait out the thinking pause, score, and finish the session
    pub async fn conclude(&self, session: &mut InterviewSession) -> InterviewResult<DiagnosisResult> {
        if session.is_complete() {
            return Err(InterviewError::Completed);
        }
        if !session.awaiting_evaluation {
            return Err(InterviewError::NotReadyToEvaluate(session.phase));
        }

        let category = match session.phase {
            Phase::RareFollowUp => ConditionCategory::Rare,
            Phase::CommonFollowUp => ConditionCategory::Common,
            other => return Err(InterviewError::NotReadyToEvaluate(other)),
        };

        self.delay.wait().await;

        let candidates = self.table.by_category(category);
        let diagnosis = best_match(&session.collected_symptoms, &candidates);

        let message = if diagnosis.is_unknown() {
            format!(
                "Based on your answers ({}), I couldn't match your symptoms to a known condition ({}).",
                session.demographics, diagnosis
            )
        } else {
            format!(
                "Based on your answers ({}), a possible condition could be {}.",
                session.demographics, diagnosis
            )
        };
        session.transcript.push_bot(message);
        session.transcript.push_bot(DISCLAIMER);

        tracing::info!(
            session_id = %session.id,
            branch = %category,
            condition = %diagnosis.condition_name,
            confidence = diagnosis.confidence_percent,
            symptoms = session.collected_symptoms.len(),
            "Interview complete"
        );

        session.final_diagnosis = Some(diagnosis.clone());
        session.awaiting_evaluation = false;
        session.phase = Phase::Complete;
        session.question_index = 0;

        Ok(diagnosis)
    }

    /// `submit`, then `conclude` if the answer finished the interview
    pub async fn respond(
        &self,
        session: &mut InterviewSession,
        input: &str,
    ) -> InterviewResult<TurnOutcome> {
        match self.submit(session, input)? {
            TurnOutcome::AwaitingEvaluation => {
                let diagnosis = self.conclude(session).await?;
                Ok(TurnOutcome::Diagnosed(diagnosis))
            }
            outcome => Ok(outcome),
        }
    }

    fn handle_demographics(&self, session: &mut InterviewSession, prompt: &Prompt, extracted: Extracted) {
        match prompt.expected {
            ExpectedSignal::Demographic(DemographicKey::Age) => {
                let age = match extracted {
                    Extracted::Age(answer) => answer.resolve(self.config.default_age),
                    _ => self.config.default_age,
                };
                session.demographics.age = Some(age);
            }
            ExpectedSignal::Demographic(DemographicKey::Gender) => {
                let gender = match extracted {
                    Extracted::Gender(gender) => gender,
                    _ => Gender::Unspecified,
                };
                session.demographics.gender = Some(gender);
            }
            ExpectedSignal::Keyword(_) | ExpectedSignal::Keywords(_) => {}
        }
    }

    /// Move to the next question, or to the next phase after the last one
    fn advance(&self, session: &mut InterviewSession, forced: bool) -> TurnOutcome {
        let prompts = script::prompts(session.phase);
        let next = session.question_index + 1;

        if let Some(prompt) = prompts.get(next) {
            session.question_index = next;
            session.transcript.push_bot(prompt.text);
            return TurnOutcome::Accepted {
                phase: session.phase,
                forced,
            };
        }

        match session.phase {
            Phase::Demographics => {
                enter_phase(session, Phase::GeneralScreening);
                let greeting = match &session.intake {
                    Some(intake) => format!(
                        "Thanks! I see you mentioned {} {}.",
                        intake.severity, intake.complaint
                    ),
                    None => "Thanks! Let's talk about your symptoms.".to_string(),
                };
                session.transcript.push_bot(format!(
                    "{} {}",
                    greeting,
                    first_prompt_text(Phase::GeneralScreening)
                ));
            }
            Phase::GeneralScreening => {
                let next_phase = if self.evaluate_rarity(&session.collected_symptoms) {
                    Phase::RareFollowUp
                } else {
                    Phase::CommonFollowUp
                };
                enter_phase(session, next_phase);
                session.transcript.push_bot(first_prompt_text(next_phase));
            }
            Phase::RareFollowUp | Phase::CommonFollowUp => {
                session.awaiting_evaluation = true;
                session.transcript.push_bot(EVALUATING);
                return TurnOutcome::AwaitingEvaluation;
            }
            Phase::Complete => {}
        }

        TurnOutcome::Accepted {
            phase: session.phase,
            forced,
        }
    }
}

fn handle_symptoms(session: &mut InterviewSession, extracted: Extracted) {
    if let Extracted::Symptoms(symptoms) = extracted {
        session.collected_symptoms.extend(symptoms);
    }
}

fn enter_phase(session: &mut InterviewSession, phase: Phase) {
    tracing::info!(
        session_id = %session.id,
        from = %session.phase,
        to = %phase,
        symptoms = session.collected_symptoms.len(),
        "Phase transition"
    );
    session.phase = phase;
    session.question_index = 0;
}

fn first_prompt_text(phase: Phase) -> &'static str {
    script::prompts(phase)
        .first()
        .map(|p| p.text)
        .unwrap_or_default()
}

fn reprompt_text(prompt: &Prompt) -> String {
    let hint = match prompt.expected {
        ExpectedSignal::Demographic(DemographicKey::Age) => "Please answer with a number, e.g., 25",
        ExpectedSignal::Demographic(DemographicKey::Gender) => {
            "e.g., Male, Female, Other, or prefer not to say"
        }
        _ => "Please answer clearly, e.g., Yes/No or specific details",
    };
    format!("I didn't quite get that. {} ({})", prompt.text, hint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::delay::NoDelay;

    fn interviewer(retry_ceiling: u32) -> Interviewer {
        let config = InterviewConfig {
            retry_ceiling,
            default_age: 30,
            thinking_delay_ms: 0,
        };
        Interviewer::new(config).with_delay(Arc::new(NoDelay))
    }

    fn answer_all(interviewer: &Interviewer, session: &mut InterviewSession, answers: &[&str]) {
        for answer in answers {
            interviewer.submit(session, answer).unwrap();
        }
    }

    #[test]
    fn test_session_opens_with_age_question() {
        let interviewer = interviewer(1);
        let session = interviewer.start();

        assert_eq!(session.phase(), Phase::Demographics);
        assert_eq!(session.question_index(), 0);
        assert_eq!(
            session.transcript().last_bot().unwrap().text,
            "Hi! Let's get started. How old are you?"
        );
    }

    #[test]
    fn test_demographics_scenario() {
        let interviewer = interviewer(1);
        let mut session = interviewer.start();

        let outcome = interviewer.submit(&mut session, "I'm around 15").unwrap();
        assert_eq!(
            outcome,
            TurnOutcome::Accepted {
                phase: Phase::Demographics,
                forced: false
            }
        );
        assert_eq!(session.demographics().age, Some(15));

        let outcome = interviewer.submit(&mut session, "girl").unwrap();
        assert_eq!(
            outcome,
            TurnOutcome::Accepted {
                phase: Phase::GeneralScreening,
                forced: false
            }
        );
        assert_eq!(session.demographics().gender, Some(Gender::Female));
        assert_eq!(session.phase(), Phase::GeneralScreening);
        assert_eq!(session.question_index(), 0);
        assert!(session
            .transcript()
            .last_bot()
            .unwrap()
            .text
            .ends_with("Do you have any fatigue or tiredness?"));
    }

    #[test]
    fn test_retry_ceiling() {
        let interviewer = interviewer(3);
        let mut session = interviewer.start();

        for attempt in 1..=3 {
            let outcome = interviewer.submit(&mut session, "banana").unwrap();
            assert_eq!(outcome, TurnOutcome::Reprompted { retry_count: attempt });
            assert_eq!(session.question_index(), 0);
        }

        let outcome = interviewer.submit(&mut session, "banana").unwrap();
        assert_eq!(
            outcome,
            TurnOutcome::Accepted {
                phase: Phase::Demographics,
                forced: true
            }
        );
        assert_eq!(session.retry_count(), 0);
        assert_eq!(session.question_index(), 1);
        // Placeholder age substituted
        assert_eq!(session.demographics().age, Some(30));
    }

    #[test]
    fn test_valid_answer_resets_retry_count() {
        let interviewer = interviewer(3);
        let mut session = interviewer.start();

        interviewer.submit(&mut session, "no idea what you mean").unwrap();
        assert_eq!(session.retry_count(), 0);

        interviewer.submit(&mut session, "purple").unwrap();
        assert_eq!(session.retry_count(), 1);
        interviewer.submit(&mut session, "Male").unwrap();
        assert_eq!(session.retry_count(), 0);
        assert_eq!(session.phase(), Phase::GeneralScreening);
    }

    #[test]
    fn test_unparseable_gender_defaults_to_unspecified() {
        let interviewer = interviewer(1);
        let mut session = interviewer.start();
        answer_all(&interviewer, &mut session, &["40", "blue", "still blue"]);

        assert_eq!(session.demographics().gender, Some(Gender::Unspecified));
        assert_eq!(session.phase(), Phase::GeneralScreening);
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let interviewer = interviewer(1);
        let mut session = interviewer.start();
        let before = session.transcript().len();

        let outcome = interviewer.submit(&mut session, "   ").unwrap();
        assert_eq!(outcome, TurnOutcome::Ignored);
        assert_eq!(session.transcript().len(), before);
        assert_eq!(session.retry_count(), 0);
    }

    #[test]
    fn test_rare_branch_scenario() {
        let interviewer = interviewer(1);
        let mut session = interviewer.start();
        answer_all(
            &interviewer,
            &mut session,
            &[
                "25",
                "female",
                "I have flexible joints",
                "skin stretchiness on my arms",
                "no",
                "no",
                "no",
            ],
        );

        assert!(session
            .collected_symptoms()
            .contains(&"flexible joints".to_string()));
        assert!(session
            .collected_symptoms()
            .contains(&"skin stretchiness".to_string()));
        assert!(interviewer.evaluate_rarity(session.collected_symptoms()));
        assert_eq!(session.phase(), Phase::RareFollowUp);
        assert_eq!(
            session.transcript().last_bot().unwrap().text,
            "Do you bruise easily or notice unusual skin changes?"
        );
    }

    #[test]
    fn test_common_branch_without_indicators() {
        let interviewer = interviewer(1);
        let mut session = interviewer.start();
        answer_all(
            &interviewer,
            &mut session,
            &["52", "man", "yes", "yes", "yes", "no", "no"],
        );

        assert_eq!(
            session.collected_symptoms(),
            &["fatigue".to_string(), "pain".to_string(), "dizziness".to_string()]
        );
        assert_eq!(session.phase(), Phase::CommonFollowUp);
    }

    #[test]
    fn test_question_index_stays_in_range() {
        let interviewer = interviewer(1);
        let mut session = interviewer.start();
        let mut answers = vec!["30", "other"];
        answers.extend(std::iter::repeat("no").take(10));

        for answer in answers {
            let outcome = interviewer.submit(&mut session, answer).unwrap();
            if outcome == TurnOutcome::AwaitingEvaluation {
                break;
            }
            assert!(session.question_index() < script::prompts(session.phase()).len());
        }
        assert!(session.is_input_locked());
    }

    #[tokio::test]
    async fn test_addisons_end_to_end() {
        let interviewer = interviewer(1);
        let mut session = interviewer.start();
        answer_all(
            &interviewer,
            &mut session,
            &[
                "30",
                "woman",
                "yes",
                "no, but some weight loss",
                "no",
                "no",
                "no",
                "no",
                "no",
                "no",
            ],
        );
        assert_eq!(session.phase(), Phase::RareFollowUp);

        interviewer.submit(&mut session, "salt craving").unwrap();
        let outcome = interviewer.respond(&mut session, "no").await.unwrap();

        let TurnOutcome::Diagnosed(diagnosis) = outcome else {
            panic!("expected a diagnosis, got {:?}", outcome);
        };
        assert_eq!(
            session.collected_symptoms(),
            &[
                "fatigue".to_string(),
                "weight loss".to_string(),
                "salt craving".to_string()
            ]
        );
        assert_eq!(diagnosis.condition_name, "Addison's Disease");
        assert_eq!(diagnosis.category, Some(ConditionCategory::Rare));
        assert!((diagnosis.confidence_percent - 60.0).abs() < 1e-9);

        assert!(session.is_complete());
        assert_eq!(session.final_diagnosis(), Some(&diagnosis));
        let turns = session.transcript().turns();
        assert_eq!(turns[turns.len() - 1].text, DISCLAIMER);
        assert_eq!(
            turns[turns.len() - 2].text,
            "Based on your answers (age: 30, gender: Female), a possible condition could be \
             Addison's Disease (60.0% confidence)."
        );
    }

    #[tokio::test]
    async fn test_no_symptoms_gives_unknown() {
        let interviewer = interviewer(1);
        let mut session = interviewer.start();
        let answers = ["30", "prefer not to say", "no", "no", "no", "no", "no", "no", "no", "no", "no"];
        answer_all(&interviewer, &mut session, &answers);

        let outcome = interviewer.respond(&mut session, "no").await.unwrap();
        assert_eq!(outcome, TurnOutcome::Diagnosed(DiagnosisResult::unknown()));
        assert!(session
            .transcript()
            .turns()
            .iter()
            .any(|t| t.text.contains("Unknown (0.0% confidence)")));
    }

    #[tokio::test]
    async fn test_input_locked_until_concluded() {
        let interviewer = interviewer(1);
        let mut session = interviewer.start();
        let answers = ["30", "male", "no", "no", "no", "no", "no", "no", "no", "no", "no"];
        answer_all(&interviewer, &mut session, &answers);

        let outcome = interviewer.submit(&mut session, "no").unwrap();
        assert_eq!(outcome, TurnOutcome::AwaitingEvaluation);
        assert_eq!(
            interviewer.submit(&mut session, "hello?"),
            Err(InterviewError::InputLocked)
        );

        interviewer.conclude(&mut session).await.unwrap();
        let before = session.transcript().len();
        assert_eq!(
            interviewer.submit(&mut session, "one more thing"),
            Err(InterviewError::Completed)
        );
        assert_eq!(session.transcript().len(), before);
        assert_eq!(
            interviewer.conclude(&mut session).await,
            Err(InterviewError::Completed)
        );
    }

    #[tokio::test]
    async fn test_conclude_before_follow_up_fails() {
        let interviewer = interviewer(1);
        let mut session = interviewer.start();
        assert_eq!(
            interviewer.conclude(&mut session).await,
            Err(InterviewError::NotReadyToEvaluate(Phase::Demographics))
        );
    }

    #[test]
    fn test_intake_seeds_symptoms_and_greeting() {
        let interviewer = interviewer(1);
        let mut session = interviewer.start_with_intake(Intake::new("Joint Pain", "moderate"));
        assert_eq!(session.collected_symptoms(), &["joint pain".to_string()]);

        answer_all(&interviewer, &mut session, &["33", "female"]);
        assert!(session
            .transcript()
            .last_bot()
            .unwrap()
            .text
            .starts_with("Thanks! I see you mentioned moderate Joint Pain."));
    }

    #[test]
    fn test_session_serializes() {
        let interviewer = interviewer(1);
        let mut session = interviewer.start();
        answer_all(&interviewer, &mut session, &["30", "male"]);

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["phase"], "general_screening");
        assert_eq!(json["demographics"]["age"], 30);
        assert!(json["transcript"]["turns"].as_array().unwrap().len() >= 5);
    }
}
