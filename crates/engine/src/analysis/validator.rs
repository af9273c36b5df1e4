use pdassign_common::config::ScoringConfig;
use pdassign_common::types::{AnswerAnalysis, QualityTier, SubmissionMetrics, ValidationReport};

use super::{aggregate, AnswerAnalyzer};

/// Full scoring run over one submission's answers.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub analyses: Vec<AnswerAnalysis>,
    pub metrics: SubmissionMetrics,
    pub report: ValidationReport,
}

/// Applies pass/fail rules over aggregated submission metrics.
#[derive(Clone, Debug)]
pub struct SubmissionValidator {
    analyzer: AnswerAnalyzer,
    min_overall_quality: f64,
    min_average_words: f64,
    max_poor_answers: u32,
    min_technical_depth: f64,
}

impl SubmissionValidator {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            analyzer: AnswerAnalyzer::from_config(config),
            min_overall_quality: config.min_overall_quality,
            min_average_words: config.min_average_words,
            max_poor_answers: config.max_poor_answers,
            min_technical_depth: config.min_technical_depth,
        }
    }

    pub fn analyzer(&self) -> &AnswerAnalyzer {
        &self.analyzer
    }

    /// Analyze, aggregate and check a full answer list.
    pub fn evaluate(&self, answers: &[String], topic: Option<&str>) -> Evaluation {
        let analyses = self.analyzer.analyze_all(answers, topic);
        let metrics = aggregate(&analyses);
        let report = self.check(&metrics);
        Evaluation {
            analyses,
            metrics,
            report,
        }
    }

    pub fn validate(&self, answers: &[String], topic: Option<&str>) -> ValidationReport {
        self.evaluate(answers, topic).report
    }

    /// Apply the rules to already aggregated metrics.
    pub fn check(&self, metrics: &SubmissionMetrics) -> ValidationReport {
        let mut issues = Vec::new();
        let mut warnings = Vec::new();

        let missing = metrics.tier_count(QualityTier::Missing);
        if missing > 0 {
            issues.push(if missing == 1 {
                "1 question has no meaningful answer".to_string()
            } else {
                format!("{} questions have no meaningful answers", missing)
            });
        }

        let poor = metrics.tier_count(QualityTier::Poor);
        if poor > self.max_poor_answers {
            warnings.push(format!(
                "{} answers are brief (under 150 words) and could use more detail",
                poor
            ));
        }

        if metrics.technical_depth_score < self.min_technical_depth {
            warnings.push(format!(
                "Low technical depth: only {:.0}% of answers use topic terminology",
                metrics.technical_depth_score
            ));
        }

        if metrics.overall_quality_score < self.min_overall_quality {
            issues.push(format!(
                "Overall quality score {:.1} is below the required {:.0}",
                metrics.overall_quality_score, self.min_overall_quality
            ));
        }

        if metrics.average_words_per_answer < self.min_average_words {
            warnings.push(format!(
                "Average answer length is {:.0} words; at least {:.0} is recommended",
                metrics.average_words_per_answer, self.min_average_words
            ));
        }

        ValidationReport {
            is_complete: issues.is_empty(),
            issues,
            warnings,
        }
    }
}

impl Default for SubmissionValidator {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}
