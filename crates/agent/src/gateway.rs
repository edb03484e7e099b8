//! Generation gateway: a single at-most-once call into a provider.
//!
//! No retries, no backoff, no caching. A successful response with blank
//! text comes back as `EMPTY_RESULT_MARKER` so callers never show an empty
//! answer.

use std::sync::Arc;

use syllabus_core::error::ProviderError;
use syllabus_core::provider::{GenerationRequest, GenerationResponse, Provider};
use tracing::{debug, warn};

pub const EMPTY_RESULT_MARKER: &str = "No response generated.";

#[derive(Clone)]
pub struct GenerationGateway {
    provider: Arc<dyn Provider>,
}

impl GenerationGateway {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    pub async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        let model = request.model.clone();
        let turns = request.turns.len();
        debug!(provider = self.provider.name(), model = %model, turns, "Generation request");

        match self.provider.complete(request).await {
            Ok(response) if response.text.trim().is_empty() => {
                debug!(model = %model, "Provider returned empty text");
                Ok(GenerationResponse::new(EMPTY_RESULT_MARKER))
            }
            Ok(response) => {
                debug!(model = %model, chars = response.text.len(), "Generation complete");
                Ok(response)
            }
            Err(e) => {
                warn!(provider = self.provider.name(), model = %model, error = %e, "Generation failed");
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for GenerationGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationGateway")
            .field("provider", &self.provider.name())
            .finish()
    }
}
