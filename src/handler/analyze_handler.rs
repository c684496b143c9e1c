use axum::{
    Form,
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use std::sync::Arc;

use crate::error::AnalysisError;
use crate::models::{AnalysisOutcome, AnalyzeRequest, AnalyzeResponse};
use crate::presenter::{Banner, EMPTY_RESULT_MESSAGE, IndexTemplate};
use crate::state::AppState;

/// Validates one submission and, if it passes, makes the single API call.
///
/// Input and credential are checked before the in-flight slot is taken, so
/// an invalid submission never reaches the network.
pub async fn run_analysis(
    state: &AppState,
    raw_input: &str,
) -> Result<AnalysisOutcome, AnalysisError> {
    if raw_input.is_empty() {
        return Err(AnalysisError::MissingInput);
    }
    let api_key = state.credential().ok_or(AnalysisError::MissingCredential)?;

    let _permit = state.begin_analysis()?;
    state.ai.analyze(raw_input, api_key).await
}

fn log_result(result: &Result<AnalysisOutcome, AnalysisError>) {
    match result {
        Ok(_) => {}
        Err(err @ (AnalysisError::MissingInput | AnalysisError::MissingCredential)) => {
            tracing::info!("Submission rejected: {}", err.kind())
        }
        Err(err) => tracing::warn!("Analysis failed: {}", err),
    }
}

/// GET / - Render the empty form.
pub async fn index() -> impl IntoResponse {
    IndexTemplate::blank()
}

/// POST / - Run the analysis for a form submission and re-render the page.
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    Form(payload): Form<AnalyzeRequest>,
) -> impl IntoResponse {
    let result = run_analysis(&state, &payload.input).await;
    log_result(&result);

    IndexTemplate {
        banner: Some(Banner::from(&result)),
        input: payload.input,
    }
}

/// POST /api/analyze - JSON variant of the same flow.
pub async fn analyze_json(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    let result = run_analysis(&state, &payload.input).await;
    log_result(&result);

    match result {
        Ok(AnalysisOutcome::Success(text)) => (
            StatusCode::OK,
            Json(AnalyzeResponse::Success {
                text,
                analyzed_at: Utc::now(),
            }),
        ),
        Ok(AnalysisOutcome::Empty) => (
            StatusCode::OK,
            Json(AnalyzeResponse::Empty {
                message: EMPTY_RESULT_MESSAGE.to_string(),
                analyzed_at: Utc::now(),
            }),
        ),
        Err(err) => (
            status_for(&err),
            Json(AnalyzeResponse::Error {
                kind: err.kind().to_string(),
                message: err.to_string(),
            }),
        ),
    }
}

fn status_for(err: &AnalysisError) -> StatusCode {
    match err {
        AnalysisError::MissingInput => StatusCode::BAD_REQUEST,
        AnalysisError::MissingCredential => StatusCode::SERVICE_UNAVAILABLE,
        AnalysisError::Busy => StatusCode::TOO_MANY_REQUESTS,
        AnalysisError::NetworkError { .. } | AnalysisError::ParseError { .. } => {
            StatusCode::BAD_GATEWAY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[tokio::test]
    async fn empty_input_is_rejected_before_credential_check() {
        let state = AppState::new(AppConfig::default());
        let result = run_analysis(&state, "").await;
        assert_eq!(result, Err(AnalysisError::MissingInput));
    }

    #[tokio::test]
    async fn missing_credential_is_reported() {
        let state = AppState::new(AppConfig::default());
        let result = run_analysis(&state, "port scan from 10.0.0.5").await;
        assert_eq!(result, Err(AnalysisError::MissingCredential));
    }

    #[tokio::test]
    async fn busy_when_another_analysis_holds_the_slot() {
        let state = AppState::new(AppConfig {
            api_key: Some("key".to_string()),
            api_base: "http://127.0.0.1:9".to_string(),
            ..AppConfig::default()
        });
        let _held = state.begin_analysis().unwrap();
        let result = run_analysis(&state, "port scan").await;
        assert_eq!(result, Err(AnalysisError::Busy));
    }

    #[test]
    fn error_statuses() {
        assert_eq!(status_for(&AnalysisError::MissingInput), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&AnalysisError::Busy), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            status_for(&AnalysisError::missing("candidates[0].content")),
            StatusCode::BAD_GATEWAY
        );
    }
}
