//! Answer validation and extraction
//!
//! Pure heuristics that decide whether free text answers the current prompt
//! and pull structured values out of it:
//!
//! - age: first integer in (0, 150), decade phrases ("in my twenties"),
//!   or an explicit "not sure"
//! - gender: word-boundary match against a fixed synonym table
//! - symptoms: vocabulary keywords, yes/no words, hedges, or previously
//!   collected entries
//!
//! Extraction always produces a best-effort value, even for answers that
//! fail validation, so the state machine can proceed once the retry ceiling
//! is reached.

use super::script::{DemographicKey, ExpectedSignal, Prompt};
use super::types::{Gender, Phase};
use crate::conditions::Vocabulary;
use regex::Regex;
use std::sync::LazyLock;

/// Words that make any symptom answer acceptable
pub const HEDGE_WORDS: &[&str] = &["maybe", "kinda", "not really", "not sure"];

/// Phrases meaning the user doesn't know their age
const UNKNOWN_AGE_PHRASES: &[&str] = &["not sure", "don't know", "dont know", "no idea"];

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("static regex"));

static DECADE_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([1-9])0'?s\b").expect("static regex"));

static DECADE_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(twenties|thirties|forties|fifties|sixties|seventies|eighties|nineties)\b")
        .expect("static regex")
});

static TEEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(teen|teens|teenager)\b").expect("static regex"));

static GENDER_UNSPECIFIED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(not sure|prefer not to say|rather not say|prefer not)\b").expect("static regex")
});

static GENDER_FEMALE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(female|woman|girl|lady)\b").expect("static regex"));

static GENDER_MALE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(male|man|guy|boy)\b").expect("static regex"));

static GENDER_OTHER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(other|non-binary|nonbinary)\b").expect("static regex"));

static AFFIRMATIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(yes|yeah|yep|yup|definitely)\b").expect("static regex"));

static NEGATIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(no|nope|nah|never)\b").expect("static regex"));

/// How an age was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeAnswer {
    /// An integer written in the answer
    Stated(u8),
    /// Inferred from a decade or "teen" phrase
    Approximate(u8),
    /// User said they don't know
    Unknown,
}

impl AgeAnswer {
    /// The age, substituting `default_age` when unknown
    pub fn resolve(&self, default_age: u8) -> u8 {
        match self {
            AgeAnswer::Stated(age) | AgeAnswer::Approximate(age) => *age,
            AgeAnswer::Unknown => default_age,
        }
    }
}

/// Value pulled out of an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    Age(AgeAnswer),
    Gender(Gender),
    Symptoms(Vec<String>),
    /// Nothing usable (unparseable demographic)
    Nothing,
}

/// Outcome of validating an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    pub extracted: Extracted,
}

impl Validation {
    fn accepted(extracted: Extracted) -> Self {
        Self {
            valid: true,
            extracted,
        }
    }

    fn rejected(extracted: Extracted) -> Self {
        Self {
            valid: false,
            extracted,
        }
    }
}

/// Extract an age from free text.
///
/// The first plain digit run whose value lies in (0, 150) wins; runs written
/// as decades ("30s", "40's") are skipped. Decade phrases give the decade
/// midpoint ("30s" is 35) only when no plain integer is present, "teen"
/// gives 15.
pub fn extract_age(text: &str) -> Option<AgeAnswer> {
    let lower = text.to_lowercase();

    if let Some(age) = DIGITS
        .find_iter(&lower)
        .filter(|m| !has_decade_suffix(&lower[m.end()..]))
        .filter_map(|m| m.as_str().parse::<u32>().ok())
        .find(|n| (1..150).contains(n))
    {
        // Range-checked above
        return Some(AgeAnswer::Stated(age as u8));
    }

    if let Some(caps) = DECADE_NUMERIC.captures(&lower) {
        if let Ok(decade) = caps[1].parse::<u8>() {
            return Some(AgeAnswer::Approximate(decade * 10 + 5));
        }
    }

    if let Some(caps) = DECADE_WORD.captures(&lower) {
        let decade = match &caps[1] {
            "twenties" => 2,
            "thirties" => 3,
            "forties" => 4,
            "fifties" => 5,
            "sixties" => 6,
            "seventies" => 7,
            "eighties" => 8,
            _ => 9,
        };
        return Some(AgeAnswer::Approximate(decade * 10 + 5));
    }

    if TEEN.is_match(&lower) {
        return Some(AgeAnswer::Approximate(15));
    }

    if UNKNOWN_AGE_PHRASES.iter().any(|p| lower.contains(p)) {
        return Some(AgeAnswer::Unknown);
    }

    None
}

/// Whether text following a digit run turns it into a decade ("s", "'s")
fn has_decade_suffix(rest: &str) -> bool {
    let rest = rest.strip_prefix('\'').unwrap_or(rest);
    match rest.strip_prefix('s') {
        Some(after) => !after.starts_with(|c: char| c.is_alphanumeric()),
        None => false,
    }
}

/// Map free text to a canonical gender tag.
///
/// A stated synonym wins over a decline phrase elsewhere in the answer.
pub fn extract_gender(text: &str) -> Option<Gender> {
    let lower = text.to_lowercase();

    if GENDER_FEMALE.is_match(&lower) {
        Some(Gender::Female)
    } else if GENDER_MALE.is_match(&lower) {
        Some(Gender::Male)
    } else if GENDER_OTHER.is_match(&lower) {
        Some(Gender::Other)
    } else if GENDER_UNSPECIFIED.is_match(&lower) {
        Some(Gender::Unspecified)
    } else {
        None
    }
}

pub fn is_hedge(text: &str) -> bool {
    let lower = text.to_lowercase();
    HEDGE_WORDS.iter().any(|h| lower.contains(h))
}

pub fn is_affirmative(text: &str) -> bool {
    AFFIRMATIVE.is_match(&text.to_lowercase())
}

pub fn is_negative(text: &str) -> bool {
    NEGATIVE.is_match(&text.to_lowercase())
}

/// Symptom entries an answer contributes.
///
/// Vocabulary keywords win; otherwise an affirmative answer adds the
/// prompt's expected keywords, a negative one adds nothing, and anything
/// else is kept as the lower-cased raw phrase.
pub fn extract_symptoms(text: &str, prompt: &Prompt, vocabulary: &Vocabulary) -> Vec<String> {
    let matched = vocabulary.find_in(text);
    if !matched.is_empty() {
        return matched;
    }

    if is_negative(text) {
        return Vec::new();
    }

    if is_affirmative(text) {
        let expected = prompt.expected.keywords();
        if !expected.is_empty() {
            return expected.into_iter().map(String::from).collect();
        }
    }

    let raw = text.trim().to_lowercase();
    if raw.is_empty() {
        Vec::new()
    } else {
        vec![raw]
    }
}

/// Whether a symptom-phase answer is usable
pub fn is_valid_symptom_answer(text: &str, collected: &[String], vocabulary: &Vocabulary) -> bool {
    let lower = text.trim().to_lowercase();
    if lower.is_empty() {
        return false;
    }

    is_hedge(&lower)
        || is_affirmative(&lower)
        || is_negative(&lower)
        || vocabulary.mentions_any(&lower)
        || collected
            .iter()
            .any(|c| !c.is_empty() && lower.contains(c.as_str()))
}

/// Validate an answer to `prompt` in `phase` and extract its value
pub fn validate(
    text: &str,
    phase: Phase,
    prompt: &Prompt,
    collected: &[String],
    vocabulary: &Vocabulary,
) -> Validation {
    let text = text.trim();

    match (phase, prompt.expected) {
        (Phase::Demographics, ExpectedSignal::Demographic(DemographicKey::Age)) => {
            match extract_age(text) {
                Some(age) => Validation::accepted(Extracted::Age(age)),
                None => Validation::rejected(Extracted::Nothing),
            }
        }
        (Phase::Demographics, ExpectedSignal::Demographic(DemographicKey::Gender)) => {
            match extract_gender(text) {
                Some(gender) => Validation::accepted(Extracted::Gender(gender)),
                None => Validation::rejected(Extracted::Nothing),
            }
        }
        (phase, _) if phase.is_symptom_phase() => {
            let symptoms = Extracted::Symptoms(extract_symptoms(text, prompt, vocabulary));
            if is_valid_symptom_answer(text, collected, vocabulary) {
                Validation::accepted(symptoms)
            } else {
                Validation::rejected(symptoms)
            }
        }
        _ => Validation::rejected(Extracted::Nothing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::ConditionTable;
    use crate::interview::script::{prompt_at, signal_keywords};

    fn vocabulary() -> Vocabulary {
        Vocabulary::from_table(&ConditionTable::standard()).with_signals(signal_keywords())
    }

    #[test]
    fn test_age_embedded_anywhere() {
        for age in 1..150u32 {
            let text = format!("well, I turned {} last month", age);
            assert_eq!(extract_age(&text), Some(AgeAnswer::Stated(age as u8)), "{}", text);
        }
        assert_eq!(extract_age("age:42!"), Some(AgeAnswer::Stated(42)));
    }

    #[test]
    fn test_age_hedged() {
        assert_eq!(extract_age("I'm around 15"), Some(AgeAnswer::Stated(15)));
        assert_eq!(extract_age("maybe 20"), Some(AgeAnswer::Stated(20)));
    }

    #[test]
    fn test_age_out_of_range_is_skipped() {
        assert_eq!(extract_age("0"), None);
        assert_eq!(extract_age("150"), None);
        assert_eq!(extract_age("born 1990, so 34"), Some(AgeAnswer::Stated(34)));
        assert_eq!(extract_age("99999999999999999999"), None);
    }

    #[test]
    fn test_age_decades_and_unknown() {
        assert_eq!(extract_age("in my 30s"), Some(AgeAnswer::Approximate(35)));
        assert_eq!(extract_age("early twenties"), Some(AgeAnswer::Approximate(25)));
        assert_eq!(extract_age("I'm a teenager"), Some(AgeAnswer::Approximate(15)));
        assert_eq!(extract_age("not sure"), Some(AgeAnswer::Unknown));
        assert_eq!(extract_age("I don't know"), Some(AgeAnswer::Unknown));
        assert_eq!(extract_age("old enough"), None);
        assert_eq!(AgeAnswer::Unknown.resolve(30), 30);
    }

    #[test]
    fn test_age_integer_beats_decade_phrase() {
        assert_eq!(extract_age("I'm 42, in my 40s"), Some(AgeAnswer::Stated(42)));
        assert_eq!(
            extract_age("25 but I feel like I'm in my 80s"),
            Some(AgeAnswer::Stated(25))
        );
        assert_eq!(extract_age("my 50's, 57 to be exact"), Some(AgeAnswer::Stated(57)));
        assert_eq!(extract_age("late 60's"), Some(AgeAnswer::Approximate(65)));
    }

    #[test]
    fn test_gender_synonyms() {
        let cases = [
            ("male", Gender::Male),
            ("man", Gender::Male),
            ("guy", Gender::Male),
            ("boy", Gender::Male),
            ("female", Gender::Female),
            ("woman", Gender::Female),
            ("girl", Gender::Female),
            ("other", Gender::Other),
            ("not sure", Gender::Unspecified),
            ("prefer not to say", Gender::Unspecified),
        ];
        for (text, expected) in cases {
            assert_eq!(extract_gender(text), Some(expected), "{}", text);
            assert_eq!(extract_gender(&text.to_uppercase()), Some(expected), "{}", text);
        }
    }

    #[test]
    fn test_gender_word_boundaries() {
        assert_eq!(extract_gender("I'm a Female"), Some(Gender::Female));
        assert_eq!(extract_gender("a woman"), Some(Gender::Female));
        assert_eq!(extract_gender("manager"), None);
        assert_eq!(extract_gender("blue"), None);
    }

    #[test]
    fn test_gender_stated_over_decline_phrase() {
        assert_eq!(
            extract_gender("I'm a man, not sure why you ask"),
            Some(Gender::Male)
        );
        assert_eq!(
            extract_gender("female, though I'd rather not say more"),
            Some(Gender::Female)
        );
        assert_eq!(extract_gender("rather not say"), Some(Gender::Unspecified));
    }

    #[test]
    fn test_symptom_validity() {
        let vocab = vocabulary();
        let collected = vec!["my left knee".to_string()];

        assert!(is_valid_symptom_answer("yes", &[], &vocab));
        assert!(is_valid_symptom_answer("kinda", &[], &vocab));
        assert!(is_valid_symptom_answer("I get dizziness", &[], &vocab));
        assert!(is_valid_symptom_answer("still my left knee", &collected, &vocab));
        assert!(!is_valid_symptom_answer("purple", &collected, &vocab));
        assert!(!is_valid_symptom_answer("   ", &collected, &vocab));
    }

    #[test]
    fn test_symptom_extraction() {
        let vocab = vocabulary();
        let fatigue = prompt_at(Phase::GeneralScreening, 0).unwrap();
        let bruising = prompt_at(Phase::RareFollowUp, 0).unwrap();

        assert_eq!(extract_symptoms("Yes", fatigue, &vocab), vec!["fatigue"]);
        assert_eq!(
            extract_symptoms("yeah", bruising, &vocab),
            vec!["easy bruising", "skin stretchiness", "dark skin patches"]
        );
        assert!(extract_symptoms("no", fatigue, &vocab).is_empty());
        assert_eq!(
            extract_symptoms("I have flexible joints", fatigue, &vocab),
            vec!["flexible joints"]
        );
        assert_eq!(
            extract_symptoms("  Not Really  ", fatigue, &vocab),
            vec!["not really"]
        );
    }

    #[test]
    fn test_validate_dispatches_by_phase() {
        let vocab = vocabulary();
        let age = prompt_at(Phase::Demographics, 0).unwrap();
        let gender = prompt_at(Phase::Demographics, 1).unwrap();
        let pain = prompt_at(Phase::GeneralScreening, 1).unwrap();

        assert_eq!(
            validate("I'm around 15", Phase::Demographics, age, &[], &vocab),
            Validation::accepted(Extracted::Age(AgeAnswer::Stated(15)))
        );
        assert_eq!(
            validate("girl", Phase::Demographics, gender, &[], &vocab),
            Validation::accepted(Extracted::Gender(Gender::Female))
        );
        assert_eq!(
            validate("banana", Phase::Demographics, age, &[], &vocab),
            Validation::rejected(Extracted::Nothing)
        );

        let rejected = validate("my elbow", Phase::GeneralScreening, pain, &[], &vocab);
        assert!(!rejected.valid);
        assert_eq!(rejected.extracted, Extracted::Symptoms(vec!["my elbow".to_string()]));
    }
}
