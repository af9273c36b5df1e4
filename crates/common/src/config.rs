use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level system configuration, deserialized from system.toml.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub assignments: AssignmentConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Thresholds used by the answer analyzer and the submission validator.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Lexicon matches required before an answer counts as technical.
    pub min_technical_terms: u32,
    /// Overall quality score (0–100) below which a submission is blocked.
    pub min_overall_quality: f64,
    /// Average words per answer below which a warning is raised.
    pub min_average_words: f64,
    /// More Poor-tier answers than this raises a warning.
    pub max_poor_answers: u32,
    /// Technical depth score (0–100) below which a warning is raised.
    pub min_technical_depth: f64,
    /// Let incomplete submissions through instead of rejecting them.
    pub allow_incomplete_submission: bool,
    /// Extra per-topic terms merged into the built-in lexicons.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub lexicons: BTreeMap<String, Vec<String>>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_technical_terms: 1,
            min_overall_quality: 70.0,
            min_average_words: 200.0,
            max_poor_answers: 3,
            min_technical_depth: 40.0,
            allow_incomplete_submission: false,
            lexicons: BTreeMap::new(),
        }
    }
}

/// Assignment generation parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignmentConfig {
    /// Questions per assignment; also the answer slots per submission.
    pub question_count: usize,
    pub due_in_days: u32,
    pub base_points: u32,
    /// Added to `base_points` once per difficulty level.
    pub points_per_difficulty: u32,
}

impl Default for AssignmentConfig {
    fn default() -> Self {
        Self {
            question_count: 15,
            due_in_days: 7,
            base_points: 100,
            points_per_difficulty: 20,
        }
    }
}

/// Which repository implementation backs the server.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgres,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// PostgreSQL pool size. Ignored by the memory backend.
    pub max_connections: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            max_connections: 10,
        }
    }
}
