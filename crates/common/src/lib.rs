pub mod api;
pub mod config;
pub mod error;
pub mod ids;
pub mod types;

pub use error::{PdAssignError, Result};
pub use ids::*;
