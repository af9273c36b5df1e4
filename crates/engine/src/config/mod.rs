mod loader;
mod validation;

pub use loader::{load_config, parse_system_config, ConfigError, EngineConfig};
pub use validation::validate;
