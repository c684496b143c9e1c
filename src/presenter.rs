//! Turns the result of one submission into what the page shows.
//!
//! Every submission renders exactly one banner: success, warning or error.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::error::AnalysisError;
use crate::models::AnalysisOutcome;

pub const EMPTY_RESULT_MESSAGE: &str =
    "No analysis could be generated. The model may have returned an empty response.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub title: Option<String>,
    pub message: String,
}

impl Banner {
    pub fn css_class(&self) -> &'static str {
        match self.kind {
            BannerKind::Success => "banner success",
            BannerKind::Warning => "banner warning",
            BannerKind::Error => "banner error",
        }
    }
}

impl From<&Result<AnalysisOutcome, AnalysisError>> for Banner {
    fn from(result: &Result<AnalysisOutcome, AnalysisError>) -> Self {
        match result {
            Ok(AnalysisOutcome::Success(text)) => Banner {
                kind: BannerKind::Success,
                title: Some("Analysis Complete".to_string()),
                message: text.clone(),
            },
            Ok(AnalysisOutcome::Empty) => Banner {
                kind: BannerKind::Warning,
                title: None,
                message: EMPTY_RESULT_MESSAGE.to_string(),
            },
            Err(err) => Banner {
                kind: BannerKind::Error,
                title: None,
                message: err.to_string(),
            },
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub input: String,
    pub banner: Option<Banner>,
}

impl IndexTemplate {
    pub fn blank() -> Self {
        Self {
            input: String::new(),
            banner: None,
        }
    }
}

impl IntoResponse for IndexTemplate {
    fn into_response(self) -> Response {
        match self.render() {
            Ok(html) => Html(html).into_response(),
            Err(e) => {
                tracing::error!("Failed to render page: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_shows_title_and_text() {
        let banner = Banner::from(&Ok(AnalysisOutcome::Success("X".to_string())));
        assert_eq!(banner.kind, BannerKind::Success);
        assert_eq!(banner.title.as_deref(), Some("Analysis Complete"));
        assert_eq!(banner.message, "X");
    }

    #[test]
    fn empty_is_a_warning_not_an_error() {
        let banner = Banner::from(&Ok(AnalysisOutcome::Empty));
        assert_eq!(banner.kind, BannerKind::Warning);
        assert_eq!(banner.message, EMPTY_RESULT_MESSAGE);
    }

    #[test]
    fn errors_render_their_message() {
        let banner = Banner::from(&Err(AnalysisError::MissingInput));
        assert_eq!(banner.kind, BannerKind::Error);
        assert_eq!(banner.message, "Please enter some data to analyze.");
        assert_eq!(banner.css_class(), "banner error");
    }

    #[test]
    fn page_escapes_reflected_input() {
        let page = IndexTemplate {
            input: "<b>bold</b>".to_string(),
            banner: Some(Banner::from(&Ok(AnalysisOutcome::Empty))),
        }
        .render()
        .unwrap();
        assert!(!page.contains("<b>bold</b>"));
        assert!(page.contains("&lt;b&gt;bold"));
        assert!(page.contains("banner warning"));
    }

    #[test]
    fn blank_page_has_form_and_no_banner() {
        let page = IndexTemplate::blank().render().unwrap();
        assert!(page.contains("Analyze Threat"));
        assert!(page.contains("name=\"input\""));
        assert!(!page.contains("class=\"banner"));
    }
}
