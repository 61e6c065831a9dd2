use crate::ports::outbound::{AnalysisGateway, SuggestionPayload};
use crate::shared::error::ArkitectoError;
use crate::shared::AppResult;
use tracing::debug;

const GENERIC_SUGGESTIONS_ERROR: &str = "Could not load the suggestion catalog.";

/// QuickSuggestionsUseCase - the catalog of preset requests
pub struct QuickSuggestionsUseCase<A> {
    analysis_gateway: A,
}

impl<A: AnalysisGateway> QuickSuggestionsUseCase<A> {
    pub fn new(analysis_gateway: A) -> Self {
        Self { analysis_gateway }
    }

    /// Fetches the catalog in server order
    pub async fn list(&self) -> AppResult<Vec<SuggestionPayload>> {
        let payload = self.analysis_gateway.suggestions().await?;
        if !payload.success {
            let message = payload
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| GENERIC_SUGGESTIONS_ERROR.to_string());
            return Err(ArkitectoError::AnalysisRejected { message });
        }
        debug!(count = payload.suggestions.len(), "suggestions loaded");
        Ok(payload.suggestions)
    }

    /// Picks a preset by its listed position, starting at 1
    pub async fn pick(&self, position: usize) -> AppResult<SuggestionPayload> {
        let mut suggestions = self.list().await?;
        if suggestions.is_empty() {
            return Err(ArkitectoError::validation("suggestion", "no suggestions are available"));
        }
        let count = suggestions.len();
        if position == 0 || position > count {
            return Err(ArkitectoError::validation(
                "suggestion",
                format!("pick a number between 1 and {}", count),
            ));
        }
        Ok(suggestions.swap_remove(position - 1))
    }
}
