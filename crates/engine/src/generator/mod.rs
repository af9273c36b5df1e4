//! Topic assignment generation from the physical design question bank.

pub mod params;
pub mod topics;

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use pdassign_common::config::AssignmentConfig;
use pdassign_common::ids::AssignmentId;
use pdassign_common::types::Assignment;
use pdassign_common::{PdAssignError, Result};

use crate::store::Repository;
use topics::{TopicSpec, FALLBACK_TOPIC, TOPICS};

pub const DELIVERABLES: &[&str] = &[
    "Detailed written analysis for each question (minimum 200 words per question)",
    "Technical diagrams and sketches where applicable",
    "Trade-off analysis with quantitative justifications",
    "Alternative solutions with pros and cons comparison",
    "References to industry standards and best practices",
];

/// Builds assignments for engineers at their current difficulty.
#[derive(Clone, Debug)]
pub struct AssignmentGenerator {
    config: AssignmentConfig,
}

impl AssignmentGenerator {
    pub fn new(config: AssignmentConfig) -> Self {
        Self { config }
    }

    /// Pick a random topic whose difficulty range covers `difficulty`.
    pub fn select_topic<R: Rng>(&self, difficulty: u8, rng: &mut R) -> &'static TopicSpec {
        let suitable: Vec<&'static TopicSpec> =
            TOPICS.iter().filter(|t| t.suits(difficulty)).collect();

        suitable
            .choose(rng)
            .copied()
            .or_else(|| topics::find(FALLBACK_TOPIC))
            .unwrap_or(&TOPICS[0])
    }

    /// Build an assignment. Pure apart from the supplied randomness and clock.
    pub fn generate<R: Rng>(
        &self,
        engineer_id: &str,
        difficulty: u8,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<Assignment> {
        let due_date = now
            .checked_add_signed(Duration::days(i64::from(self.config.due_in_days)))
            .ok_or_else(|| {
                PdAssignError::Internal(format!(
                    "due date {} days out is out of range",
                    self.config.due_in_days
                ))
            })?
            .date_naive();
        let points = u32::from(difficulty)
            .checked_mul(self.config.points_per_difficulty)
            .and_then(|bonus| bonus.checked_add(self.config.base_points))
            .ok_or_else(|| {
                PdAssignError::Internal(format!("points overflow at difficulty {}", difficulty))
            })?;

        let topic = self.select_topic(difficulty, rng);
        let params = params::generate(topic.name, rng);

        let mut questions: Vec<String> = topic
            .templates
            .iter()
            .map(|template| params::fill_template(template, &params))
            .collect();

        while questions.len() < self.config.question_count {
            questions.push(format!(
                "Additional {topic} question: Explain your approach to solving complex {topic} challenges in modern chip design.",
                topic = topic.name
            ));
        }
        questions.truncate(self.config.question_count);

        Ok(Assignment {
            id: AssignmentId::new(),
            code: format!(
                "PD_{}_{}",
                topic.name.to_uppercase(),
                now.format("%Y%m%d_%H%M")
            ),
            title: format!("{} Comprehensive Challenge", capitalize(topic.name)),
            topic: topic.name.to_string(),
            difficulty,
            questions,
            deliverables: DELIVERABLES.iter().map(|d| d.to_string()).collect(),
            due_date,
            points,
            engineer_id: engineer_id.to_string(),
            created_at: now,
        })
    }

    /// Generate an assignment at the engineer's stored difficulty and persist it.
    pub async fn generate_for(&self, store: &dyn Repository, engineer_id: &str) -> Result<Assignment> {
        let engineer_id = engineer_id.trim();
        if engineer_id.is_empty() {
            return Err(PdAssignError::Validation("engineer_id must not be empty".into()));
        }

        let difficulty = store.engineer_difficulty(engineer_id).await?;
        let assignment = {
            let mut rng = StdRng::from_entropy();
            self.generate(engineer_id, difficulty, &mut rng, Utc::now())?
        };

        store.put_assignment(&assignment).await?;

        tracing::info!(
            assignment_id = %assignment.id,
            code = %assignment.code,
            engineer_id = %engineer_id,
            topic = %assignment.topic,
            difficulty = difficulty,
            "Assignment generated"
        );
        metrics::counter!("assignments.generated", "topic" => assignment.topic.clone())
            .increment(1);

        Ok(assignment)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_beginner_always_gets_floorplanning() {
        let generator = AssignmentGenerator::new(AssignmentConfig::default());
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let a = generator.generate("eng_001", 1, &mut rng, fixed_now()).unwrap();
            assert_eq!(a.topic, "floorplanning");
        }
    }

    #[test]
    fn test_generated_assignment_fields() {
        let generator = AssignmentGenerator::new(AssignmentConfig::default());
        let mut rng = StdRng::seed_from_u64(11);
        let a = generator.generate("eng_007", 1, &mut rng, fixed_now()).unwrap();

        assert_eq!(a.code, "PD_FLOORPLANNING_20240301_0930");
        assert_eq!(a.title, "Floorplanning Comprehensive Challenge");
        assert_eq!(a.questions.len(), 15);
        assert_eq!(a.deliverables.len(), 5);
        assert_eq!(a.due_date, NaiveDate::from_ymd_opt(2024, 3, 8).unwrap());
        assert_eq!(a.points, 120);
        assert_eq!(a.engineer_id, "eng_007");
        assert!(a.questions.iter().all(|q| !q.contains('{')));
    }

    #[test]
    fn test_points_scale_with_difficulty() {
        let generator = AssignmentGenerator::new(AssignmentConfig::default());
        let mut rng = StdRng::seed_from_u64(5);
        let a = generator.generate("eng_002", 4, &mut rng, fixed_now()).unwrap();
        assert_eq!(a.points, 180);
        assert!(topics::find(&a.topic).unwrap().suits(4));
    }

    #[test]
    fn test_question_count_pads_and_truncates() {
        let mut rng = StdRng::seed_from_u64(9);

        let short = AssignmentGenerator::new(AssignmentConfig {
            question_count: 5,
            ..AssignmentConfig::default()
        });
        let a = short.generate("e", 1, &mut rng, fixed_now()).unwrap();
        assert_eq!(a.questions.len(), 5);

        let long = AssignmentGenerator::new(AssignmentConfig {
            question_count: 18,
            ..AssignmentConfig::default()
        });
        let a = long.generate("e", 1, &mut rng, fixed_now()).unwrap();
        assert_eq!(a.questions.len(), 18);
        assert!(a.questions[17].starts_with("Additional floorplanning question"));
    }

    #[test]
    fn test_unrepresentable_due_date_is_an_error() {
        let generator = AssignmentGenerator::new(AssignmentConfig {
            due_in_days: 4_000_000_000,
            ..AssignmentConfig::default()
        });
        let mut rng = StdRng::seed_from_u64(1);
        let err = generator
            .generate("eng_001", 1, &mut rng, fixed_now())
            .unwrap_err();
        assert!(matches!(err, PdAssignError::Internal(_)));
    }

    #[test]
    fn test_points_overflow_is_an_error() {
        let generator = AssignmentGenerator::new(AssignmentConfig {
            base_points: u32::MAX,
            points_per_difficulty: 1,
            ..AssignmentConfig::default()
        });
        let mut rng = StdRng::seed_from_u64(1);
        let err = generator
            .generate("eng_001", 1, &mut rng, fixed_now())
            .unwrap_err();
        assert!(matches!(err, PdAssignError::Internal(_)));
    }

    #[test]
    fn test_out_of_range_difficulty_falls_back() {
        let generator = AssignmentGenerator::new(AssignmentConfig::default());
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(generator.select_topic(9, &mut rng).name, FALLBACK_TOPIC);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("routing"), "Routing");
        assert_eq!(capitalize(""), "");
    }
}
