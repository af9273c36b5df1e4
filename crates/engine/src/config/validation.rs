use pdassign_common::config::SystemConfig;

use super::loader::ConfigError;

/// Ten years.
const MAX_DUE_IN_DAYS: u32 = 3650;
/// Highest difficulty a topic can be drawn for.
const MAX_DIFFICULTY: u32 = 5;
const MAX_POINTS: u32 = 1_000_000;

/// Validate the complete system configuration.
///
/// Collects every out-of-range value so one failed start reports all of them.
pub fn validate(config: &SystemConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_scoring(config, &mut errors);
    validate_assignments(config, &mut errors);
    validate_storage(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors.join("; ")))
    }
}

fn validate_scoring(config: &SystemConfig, errors: &mut Vec<String>) {
    let s = &config.scoring;

    if s.min_technical_terms == 0 {
        errors.push("scoring.min_technical_terms must be > 0".into());
    }
    let percentages = [
        ("min_overall_quality", s.min_overall_quality),
        ("min_technical_depth", s.min_technical_depth),
    ];
    for (name, value) in percentages {
        if !(0.0..=100.0).contains(&value) {
            errors.push(format!("scoring.{} must be between 0 and 100", name));
        }
    }
    if !s.min_average_words.is_finite() || s.min_average_words < 0.0 {
        errors.push("scoring.min_average_words must be >= 0".into());
    }
    for (topic, terms) in &s.lexicons {
        if topic.trim().is_empty() {
            errors.push("scoring.lexicons topic names must not be empty".into());
        }
        if terms.iter().all(|t| t.trim().is_empty()) {
            errors.push(format!("scoring.lexicons.{} must list at least one term", topic));
        }
    }
}

fn validate_assignments(config: &SystemConfig, errors: &mut Vec<String>) {
    let a = &config.assignments;

    if a.question_count == 0 {
        errors.push("assignments.question_count must be > 0".into());
    }
    if a.due_in_days == 0 || a.due_in_days > MAX_DUE_IN_DAYS {
        errors.push(format!(
            "assignments.due_in_days must be between 1 and {}",
            MAX_DUE_IN_DAYS
        ));
    }
    let top_points = a
        .points_per_difficulty
        .checked_mul(MAX_DIFFICULTY)
        .and_then(|bonus| bonus.checked_add(a.base_points));
    if top_points.map_or(true, |p| p > MAX_POINTS) {
        errors.push(format!(
            "assignments.base_points + {} * points_per_difficulty must not exceed {}",
            MAX_DIFFICULTY, MAX_POINTS
        ));
    }
}

fn validate_storage(config: &SystemConfig, errors: &mut Vec<String>) {
    if config.storage.max_connections == 0 {
        errors.push("storage.max_connections must be > 0".into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&SystemConfig::default()).is_ok());
    }

    #[test]
    fn test_all_errors_reported_together() {
        let mut config = SystemConfig::default();
        config.scoring.min_technical_terms = 0;
        config.scoring.min_overall_quality = 120.0;
        config.assignments.question_count = 0;
        config.storage.max_connections = 0;

        let Err(ConfigError::Validation(msg)) = validate(&config) else {
            panic!("expected validation error");
        };
        assert!(msg.contains("min_technical_terms"));
        assert!(msg.contains("min_overall_quality"));
        assert!(msg.contains("question_count"));
        assert!(msg.contains("max_connections"));
    }

    #[test]
    fn test_far_due_date_rejected() {
        let mut config = SystemConfig::default();
        config.assignments.due_in_days = 4_000_000_000;
        let Err(ConfigError::Validation(msg)) = validate(&config) else {
            panic!("expected validation error");
        };
        assert!(msg.contains("due_in_days"));

        config.assignments.due_in_days = MAX_DUE_IN_DAYS;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_points_bounds() {
        let mut config = SystemConfig::default();
        config.assignments.points_per_difficulty = u32::MAX;
        assert!(validate(&config).is_err());

        config.assignments.points_per_difficulty = 20;
        config.assignments.base_points = MAX_POINTS;
        assert!(validate(&config).is_err());

        config.assignments.base_points = MAX_POINTS - 5 * 20;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_lexicon_rejected() {
        let mut config = SystemConfig::default();
        config
            .scoring
            .lexicons
            .insert("dft".into(), vec!["  ".into()]);
        assert!(validate(&config).is_err());
    }
}
