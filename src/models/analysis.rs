use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A well-formed reply from the model.
///
/// `Empty` is not a failure: the API answered, it just produced no candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Success(String),
    Empty,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub input: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalyzeResponse {
    Success {
        text: String,
        analyzed_at: DateTime<Utc>,
    },
    Empty {
        message: String,
        analyzed_at: DateTime<Utc>,
    },
    Error {
        kind: String,
        message: String,
    },
}
