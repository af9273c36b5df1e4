use pdassign_common::config::ScoringConfig;
use pdassign_common::types::{AnswerAnalysis, QualityTier};

use super::Lexicon;

/// Phrases that mark an answer as illustrating its point with an example.
/// Matched as lowercase substrings, so "like" also fires inside "likely".
pub const EXAMPLE_PHRASES: &[&str] = &[
    "for example",
    "such as",
    "like",
    "consider",
    "suppose",
    "e.g.",
    "i.e.",
    "for instance",
    "namely",
    "including",
];

/// Sentence length (in words) that earns the full readability score.
const TARGET_SENTENCE_LENGTH: f64 = 15.0;
/// Readability lost per word of distance from the target length.
const READABILITY_PENALTY_PER_WORD: f64 = 0.2;
const MAX_READABILITY: f64 = 10.0;
/// Words assumed to take one minute to write.
const WORDS_PER_MINUTE: u32 = 50;

/// Scores single answers against a topic lexicon.
#[derive(Clone, Debug)]
pub struct AnswerAnalyzer {
    lexicon: Lexicon,
    min_technical_terms: u32,
}

impl AnswerAnalyzer {
    pub fn new(lexicon: Lexicon, min_technical_terms: u32) -> Self {
        Self {
            lexicon,
            min_technical_terms: min_technical_terms.max(1),
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(
            Lexicon::with_extra(&config.lexicons),
            config.min_technical_terms,
        )
    }

    /// Analyze one answer. Blank text yields the Missing analysis; an unknown
    /// or absent topic simply never reports technical terms.
    pub fn analyze(&self, answer: &str, topic: Option<&str>) -> AnswerAnalysis {
        let trimmed = answer.trim();
        if trimmed.is_empty() {
            return AnswerAnalysis::missing();
        }

        let word_count = saturating_u32(trimmed.split_whitespace().count());
        let character_count = saturating_u32(trimmed.chars().count());
        let lowered = trimmed.to_lowercase();

        let has_technical_terms = topic
            .map(|t| self.lexicon.count_matches(t, &lowered) >= self.min_technical_terms)
            .unwrap_or(false);

        let has_examples = EXAMPLE_PHRASES
            .iter()
            .any(|phrase| lowered.contains(phrase));

        AnswerAnalysis {
            word_count,
            character_count,
            quality: QualityTier::from_word_count(word_count),
            has_technical_terms,
            has_examples,
            readability_score: readability_score(word_count, count_sentences(trimmed)),
            estimated_time_spent: (word_count / WORDS_PER_MINUTE).max(1),
        }
    }

    /// Analyze every answer of a submission in order.
    pub fn analyze_all(&self, answers: &[String], topic: Option<&str>) -> Vec<AnswerAnalysis> {
        answers.iter().map(|a| self.analyze(a, topic)).collect()
    }
}

impl Default for AnswerAnalyzer {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}

/// Non-blank fragments between sentence terminators.
fn count_sentences(text: &str) -> u32 {
    let count = text
        .split(['.', '!', '?'])
        .filter(|fragment| !fragment.trim().is_empty())
        .count();
    saturating_u32(count)
}

fn readability_score(word_count: u32, sentences: u32) -> f64 {
    if sentences == 0 {
        return 0.0;
    }
    let average = f64::from(word_count) / f64::from(sentences);
    let score = MAX_READABILITY - (average - TARGET_SENTENCE_LENGTH).abs() * READABILITY_PENALTY_PER_WORD;
    score.clamp(0.0, MAX_READABILITY)
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
