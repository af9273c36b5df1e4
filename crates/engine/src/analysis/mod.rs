//! Heuristic answer scoring: per-answer analysis, submission aggregation and
//! pass/fail validation. Everything here is a pure function of its inputs.

mod aggregator;
mod analyzer;
mod lexicon;
mod validator;

pub use aggregator::{aggregate, answer_score};
pub use analyzer::{AnswerAnalyzer, EXAMPLE_PHRASES};
pub use lexicon::Lexicon;
pub use validator::{Evaluation, SubmissionValidator};
