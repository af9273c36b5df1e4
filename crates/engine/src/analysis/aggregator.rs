use pdassign_common::types::{AnswerAnalysis, QualityTier, SubmissionMetrics};

const TECHNICAL_BONUS: f64 = 5.0;
const EXAMPLE_BONUS: f64 = 5.0;
const MAX_ANSWER_SCORE: f64 = 100.0;

/// Score of one answer: tier base score plus bonuses, capped at 100.
pub fn answer_score(analysis: &AnswerAnalysis) -> f64 {
    let mut score = analysis.quality.base_score();
    if analysis.has_technical_terms {
        score += TECHNICAL_BONUS;
    }
    if analysis.has_examples {
        score += EXAMPLE_BONUS;
    }
    score.min(MAX_ANSWER_SCORE)
}

/// Fold per-answer analyses into submission metrics.
///
/// An empty slice yields [`SubmissionMetrics::empty`].
pub fn aggregate(analyses: &[AnswerAnalysis]) -> SubmissionMetrics {
    if analyses.is_empty() {
        return SubmissionMetrics::empty();
    }

    let count = analyses.len() as f64;
    let mut metrics = SubmissionMetrics::empty();
    let mut answered = 0u32;
    let mut technical = 0u32;
    let mut score_sum = 0.0;

    for analysis in analyses {
        metrics.total_words = metrics.total_words.saturating_add(analysis.word_count);
        metrics.estimated_total_time = metrics
            .estimated_total_time
            .saturating_add(analysis.estimated_time_spent);
        *metrics
            .quality_distribution
            .entry(analysis.quality)
            .or_insert(0) += 1;

        if analysis.quality != QualityTier::Missing {
            answered += 1;
        }
        if analysis.has_technical_terms {
            technical += 1;
        }
        score_sum += answer_score(analysis);
    }

    metrics.average_words_per_answer = f64::from(metrics.total_words) / count;
    metrics.completion_percentage = f64::from(answered) / count * 100.0;
    metrics.technical_depth_score = f64::from(technical) / count * 100.0;
    metrics.overall_quality_score = score_sum / count;
    metrics
}
