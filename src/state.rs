use std::sync::Arc;
use tokio::sync::{Semaphore, SemaphorePermit};

use crate::ai::AiClient;
use crate::config::AppConfig;
use crate::error::AnalysisError;

pub struct AppState {
    pub config: AppConfig,
    pub ai: AiClient,
    in_flight: Semaphore,
}

impl AppState {
    pub fn new(config: AppConfig) -> Arc<Self> {
        let ai = AiClient::new(&config);
        Arc::new(Self {
            config,
            ai,
            in_flight: Semaphore::new(1),
        })
    }

    /// Current credential, if one is configured.
    pub fn credential(&self) -> Option<&str> {
        self.config.api_key.as_deref()
    }

    /// Claims the single analysis slot. The permit releases it on drop.
    pub fn begin_analysis(&self) -> Result<SemaphorePermit<'_>, AnalysisError> {
        self.in_flight.try_acquire().map_err(|_| AnalysisError::Busy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_analysis_at_a_time() {
        let state = AppState::new(AppConfig::default());

        let permit = state.begin_analysis().unwrap();
        assert_eq!(state.begin_analysis().unwrap_err(), AnalysisError::Busy);

        drop(permit);
        assert!(state.begin_analysis().is_ok());
    }

    #[test]
    fn blank_credential_counts_as_missing() {
        let state = AppState::new(AppConfig::default());
        assert!(state.credential().is_none());

        let state = AppState::new(AppConfig {
            api_key: Some("secret".to_string()),
            ..AppConfig::default()
        });
        assert_eq!(state.credential(), Some("secret"));
    }
}
