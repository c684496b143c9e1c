//! Virtual security analyst.
//!
//! Serves a one-form web page that forwards pasted log snippets to the
//! Gemini `generateContent` API and shows the model's threat analysis.

pub mod ai;
pub mod config;
pub mod error;
pub mod handler;
pub mod models;
pub mod presenter;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use error::AnalysisError;
pub use models::AnalysisOutcome;
pub use routes::app_router;
pub use state::AppState;
