mod analysis;
mod assignment;
mod submission;

pub use analysis::*;
pub use assignment::*;
pub use submission::*;
