use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Discrete answer quality bucket derived from word count.
///
/// Variants are declared from worst to best so the derived ordering follows quality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Missing,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl QualityTier {
    pub const ALL: [QualityTier; 5] = [
        Self::Missing,
        Self::Poor,
        Self::Fair,
        Self::Good,
        Self::Excellent,
    ];

    /// Map a word count onto its tier. Thresholds are inclusive lower bounds.
    pub fn from_word_count(word_count: u32) -> Self {
        match word_count {
            300.. => Self::Excellent,
            200..=299 => Self::Good,
            150..=199 => Self::Fair,
            50..=149 => Self::Poor,
            _ => Self::Missing,
        }
    }

    /// Per-answer score before the technical-term and example bonuses.
    pub fn base_score(&self) -> f64 {
        match self {
            Self::Excellent => 95.0,
            Self::Good => 85.0,
            Self::Fair => 75.0,
            Self::Poor => 60.0,
            Self::Missing => 0.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Poor => "poor",
            Self::Fair => "fair",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }
}

/// Heuristic analysis of a single free-text answer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnswerAnalysis {
    pub word_count: u32,
    /// Characters after trimming surrounding whitespace.
    pub character_count: u32,
    pub quality: QualityTier,
    pub has_technical_terms: bool,
    pub has_examples: bool,
    /// 0–10, best when sentences average 15 words.
    pub readability_score: f64,
    /// Minutes; 0 only for an empty answer.
    pub estimated_time_spent: u32,
}

impl AnswerAnalysis {
    /// Analysis of an answer with no words.
    pub fn missing() -> Self {
        Self {
            word_count: 0,
            character_count: 0,
            quality: QualityTier::Missing,
            has_technical_terms: false,
            has_examples: false,
            readability_score: 0.0,
            estimated_time_spent: 0,
        }
    }
}

/// Submission-level statistics folded from a list of answer analyses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmissionMetrics {
    pub total_words: u32,
    pub average_words_per_answer: f64,
    /// Share of answers above the Missing tier, 0–100.
    pub completion_percentage: f64,
    /// Count per tier. Every tier is present; counts sum to the answer count.
    pub quality_distribution: BTreeMap<QualityTier, u32>,
    pub estimated_total_time: u32,
    pub technical_depth_score: f64,
    pub overall_quality_score: f64,
}

impl SubmissionMetrics {
    /// All-zero metrics with a zeroed entry for every tier.
    pub fn empty() -> Self {
        Self {
            total_words: 0,
            average_words_per_answer: 0.0,
            completion_percentage: 0.0,
            quality_distribution: QualityTier::ALL.iter().map(|tier| (*tier, 0)).collect(),
            estimated_total_time: 0,
            technical_depth_score: 0.0,
            overall_quality_score: 0.0,
        }
    }

    pub fn tier_count(&self, tier: QualityTier) -> u32 {
        self.quality_distribution.get(&tier).copied().unwrap_or(0)
    }
}

impl Default for SubmissionMetrics {
    fn default() -> Self {
        Self::empty()
    }
}

/// Outcome of the submission pass/fail rules.
///
/// `issues` block completion, `warnings` do not.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_complete: bool,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(QualityTier::from_word_count(0), QualityTier::Missing);
        assert_eq!(QualityTier::from_word_count(49), QualityTier::Missing);
        assert_eq!(QualityTier::from_word_count(50), QualityTier::Poor);
        assert_eq!(QualityTier::from_word_count(149), QualityTier::Poor);
        assert_eq!(QualityTier::from_word_count(150), QualityTier::Fair);
        assert_eq!(QualityTier::from_word_count(199), QualityTier::Fair);
        assert_eq!(QualityTier::from_word_count(200), QualityTier::Good);
        assert_eq!(QualityTier::from_word_count(299), QualityTier::Good);
        assert_eq!(QualityTier::from_word_count(300), QualityTier::Excellent);
        assert_eq!(QualityTier::from_word_count(10_000), QualityTier::Excellent);
    }

    #[test]
    fn test_tier_is_monotonic_in_word_count() {
        let mut previous = QualityTier::Missing;
        for words in 0..400 {
            let tier = QualityTier::from_word_count(words);
            assert!(tier >= previous, "tier dropped at {} words", words);
            previous = tier;
        }
    }

    #[test]
    fn test_empty_metrics_serialize_every_tier() {
        let json = serde_json::to_value(SubmissionMetrics::empty()).unwrap();
        let dist = json["quality_distribution"].as_object().unwrap();
        assert_eq!(dist.len(), 5);
        for tier in QualityTier::ALL {
            assert_eq!(dist[tier.as_str()], 0);
        }
        assert_eq!(json["total_words"], 0);
    }
}
