use std::path::{Path, PathBuf};

use pdassign_common::config::SystemConfig;

use super::validation;

/// Complete engine configuration loaded from the config directory.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Parsed system.toml.
    pub system: SystemConfig,
    pub config_dir: PathBuf,
}

/// Load configuration from `{config_dir}/system.toml`.
///
/// Fails with a clear error if the file is unreadable, malformed or
/// out of range. The server refuses to start on any of these.
pub fn load_config(config_dir: &Path) -> Result<EngineConfig, ConfigError> {
    tracing::info!(config_dir = %config_dir.display(), "Loading configuration");

    let system_path = config_dir.join("system.toml");
    let content = std::fs::read_to_string(&system_path).map_err(|e| ConfigError::FileRead {
        path: system_path.clone(),
        source: e,
    })?;

    let system = parse_system_config(&content).map_err(|e| match e {
        ConfigError::Parse { detail, .. } => ConfigError::Parse {
            path: system_path.clone(),
            detail,
        },
        other => other,
    })?;

    let config = EngineConfig {
        system,
        config_dir: config_dir.to_path_buf(),
    };

    tracing::info!(
        backend = ?config.system.storage.backend,
        question_count = config.system.assignments.question_count,
        extra_lexicon_topics = config.system.scoring.lexicons.len(),
        "Configuration loaded successfully"
    );

    Ok(config)
}

/// Parse and validate system.toml content.
pub fn parse_system_config(content: &str) -> Result<SystemConfig, ConfigError> {
    let system: SystemConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
        path: PathBuf::from("system.toml"),
        detail: e.to_string(),
    })?;

    validation::validate(&system)?;
    Ok(system)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {detail}")]
    Parse { path: PathBuf, detail: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdassign_common::config::StorageBackend;

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [scoring]
            min_technical_terms = 2
            min_overall_quality = 60.0
            min_average_words = 150.0
            max_poor_answers = 3
            min_technical_depth = 40.0
            allow_incomplete_submission = true

            [scoring.lexicons]
            dft = ["scan chain", "atpg"]

            [assignments]
            question_count = 10
            due_in_days = 14
            base_points = 100
            points_per_difficulty = 20

            [storage]
            backend = "postgres"
            max_connections = 4
        "#;

        let config = parse_system_config(toml).unwrap();
        assert_eq!(config.scoring.min_technical_terms, 2);
        assert!(config.scoring.allow_incomplete_submission);
        assert_eq!(config.scoring.lexicons["dft"].len(), 2);
        assert_eq!(config.assignments.question_count, 10);
        assert_eq!(config.storage.backend, StorageBackend::Postgres);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = parse_system_config("").unwrap();
        assert_eq!(config.scoring.min_overall_quality, 70.0);
        assert_eq!(config.assignments.question_count, 15);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = parse_system_config("[scoring\nmin = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_unrepresentable_due_date_fails_validation() {
        let err = parse_system_config("[assignments]\ndue_in_days = 4000000000\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_unknown_backend_is_parse_error() {
        let toml = "[storage]\nbackend = \"mongo\"\nmax_connections = 1\n";
        assert!(matches!(
            parse_system_config(toml).unwrap_err(),
            ConfigError::Parse { .. }
        ));
    }

    #[test]
    fn test_load_missing_dir_is_read_error() {
        let err = load_config(Path::new("/nonexistent/pdassign-config")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }

    #[test]
    fn test_shipped_config_loads() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config");
        let config = load_config(&dir).unwrap();
        assert_eq!(config.system.assignments.question_count, 15);
        assert_eq!(config.system.scoring.min_technical_terms, 1);
    }
}
