pub mod alerts;
pub mod cycles;
pub mod error;
pub mod frequency;
pub mod pattern;
pub mod summary;
pub mod validator;

pub use error::AnalysisError;
pub use summary::{AnalysisOptions, AnalysisReport, AnalysisSummary, analyze, summarize};
pub use validator::ValidationMode;
