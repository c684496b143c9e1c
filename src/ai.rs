use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::AnalysisError;
use crate::models::AnalysisOutcome;

const ANALYST_PREAMBLE: &str = "You are a very simple virtual security analyst. Analyze the following system event \
or network log description. Identify any potential threats. Then, in a new paragraph, \
provide a single, very simple, and actionable preventative measure. \
Keep your response concise and to the point.";

const MAX_ERROR_BODY_CHARS: usize = 500;

// ============ Request Structures ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_p: f64,
    top_k: u32,
    max_output_tokens: u32,
    stop_sequences: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.5,
            top_p: 0.95,
            top_k: 64,
            max_output_tokens: 1024,
            stop_sequences: Vec::new(),
        }
    }
}

impl GeminiRequest {
    pub fn for_input(raw_input: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(raw_input),
                }],
            }],
            generation_config: GenerationConfig::default(),
        }
    }
}

/// Wraps the user's input in the analyst instructions.
pub fn build_prompt(raw_input: &str) -> String {
    format!("{}\n\nEvent: {}", ANALYST_PREAMBLE, raw_input)
}

/// Pulls `candidates[0].content.parts[0].text` out of a decoded reply.
///
/// The reply is walked one level at a time so that a missing or mistyped
/// level is reported by its path.
pub fn extract_text(response: &Value) -> Result<AnalysisOutcome, AnalysisError> {
    let candidate = match response.get("candidates") {
        None | Some(Value::Null) => return Ok(AnalysisOutcome::Empty),
        Some(Value::Array(candidates)) => match candidates.first() {
            Some(candidate) => candidate,
            None => return Ok(AnalysisOutcome::Empty),
        },
        Some(Value::Object(map)) if map.is_empty() => return Ok(AnalysisOutcome::Empty),
        Some(Value::Object(_)) => return Err(AnalysisError::missing("candidates[0]")),
        Some(_) => return Err(AnalysisError::missing("candidates")),
    };

    let content = candidate
        .get("content")
        .filter(|c| c.is_object())
        .ok_or_else(|| AnalysisError::missing("candidates[0].content"))?;
    let parts = content
        .get("parts")
        .and_then(Value::as_array)
        .ok_or_else(|| AnalysisError::missing("candidates[0].content.parts"))?;
    let part = parts
        .first()
        .ok_or_else(|| AnalysisError::missing("candidates[0].content.parts[0]"))?;
    let text = part
        .get("text")
        .and_then(Value::as_str)
        .ok_or_else(|| AnalysisError::missing("candidates[0].content.parts[0].text"))?;

    Ok(AnalysisOutcome::Success(text.to_string()))
}

/// Decodes a 2xx response body and extracts the analysis text from it.
///
/// A body that is not JSON at all is a failed call rather than a malformed
/// reply.
pub fn parse_body(status: u16, body: &str) -> Result<AnalysisOutcome, AnalysisError> {
    let response: Value = serde_json::from_str(body).map_err(|e| {
        tracing::warn!("Response body is not JSON: {}", e);
        AnalysisError::NetworkError {
            status: Some(status),
            cause: format!("invalid JSON in response body: {}", e),
        }
    })?;
    extract_text(&response)
}

fn truncate_body(body: &str) -> String {
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

// ============ AI Client ============

#[derive(Clone)]
pub struct AiClient {
    client: Client,
    endpoint: String,
}

impl AiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!(
                "{}/models/{}:generateContent",
                config.api_base.trim_end_matches('/'),
                config.model
            ),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one analysis request. The credential is supplied by the caller
    /// on every call rather than stored in the client.
    pub async fn analyze(
        &self,
        raw_input: &str,
        api_key: &str,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let request = GeminiRequest::for_input(raw_input);
        let url = format!("{}?key={}", self.endpoint, urlencoding::encode(api_key));

        tracing::info!(
            "Requesting analysis from {} ({} bytes of input)",
            self.endpoint,
            raw_input.len()
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalysisError::transport(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::transport(e.without_url()))?;

        if !status.is_success() {
            let cause = truncate_body(&body);
            tracing::warn!("API error ({}): {}", status, cause);
            return Err(AnalysisError::NetworkError {
                status: Some(status.as_u16()),
                cause,
            });
        }

        let outcome = parse_body(status.as_u16(), &body)?;
        match &outcome {
            AnalysisOutcome::Success(text) => {
                tracing::info!("Analysis complete ({} chars)", text.len())
            }
            AnalysisOutcome::Empty => tracing::info!("Model returned no candidates"),
        }
        Ok(outcome)
    }
}
