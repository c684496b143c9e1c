pub mod analysis;

pub use analysis::{AnalysisOutcome, AnalyzeRequest, AnalyzeResponse};
