use thiserror::Error;

/// Everything that can stop a submission from producing an analysis.
///
/// None of these are fatal: each one is rendered as an error banner and the
/// page stays usable for the next attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Please enter some data to analyze.")]
    MissingInput,

    #[error("API key not found. Please set the 'API_KEY' environment variable.")]
    MissingCredential,

    #[error("An analysis is already in progress. Please wait for it to finish.")]
    Busy,

    #[error("An error occurred while calling the API: {}", describe_network(.status, .cause))]
    NetworkError { status: Option<u16>, cause: String },

    #[error("Could not parse the API response. Error: missing or malformed {path}")]
    ParseError { path: String },
}

impl AnalysisError {
    /// Stable machine-readable name, used by the JSON API.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::MissingInput => "missing_input",
            AnalysisError::MissingCredential => "missing_credential",
            AnalysisError::Busy => "busy",
            AnalysisError::NetworkError { .. } => "network_error",
            AnalysisError::ParseError { .. } => "parse_error",
        }
    }

    pub(crate) fn transport(err: reqwest::Error) -> Self {
        AnalysisError::NetworkError {
            status: err.status().map(|s| s.as_u16()),
            cause: err.to_string(),
        }
    }

    pub(crate) fn missing(path: impl Into<String>) -> Self {
        AnalysisError::ParseError { path: path.into() }
    }
}

fn describe_network(status: &Option<u16>, cause: &str) -> String {
    match status {
        Some(code) => format!("HTTP {}: {}", code, cause),
        None => cause.to_string(),
    }
}
