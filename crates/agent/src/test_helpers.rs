//! Shared test helpers for session, dispatcher and gateway tests.

use std::sync::Mutex;

use syllabus_core::error::ProviderError;
use syllabus_core::provider::{GenerationRequest, GenerationResponse, Provider};
use tokio::sync::Semaphore;

/// A provider that replays a scripted sequence of outcomes and records
/// every request it receives.
///
/// Panics if more calls are made than outcomes provided.
pub struct ScriptedProvider {
    outcomes: Mutex<Vec<Result<String, ProviderError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedProvider {
    pub fn new(outcomes: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
    }

    pub fn failing(error: ProviderError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request);
            requests.len() - 1
        };
        let outcomes = self.outcomes.lock().unwrap();
        match outcomes.get(call) {
            Some(outcome) => outcome.clone().map(GenerationResponse::new),
            None => panic!(
                "ScriptedProvider: no more outcomes (call #{}, have {})",
                call,
                outcomes.len()
            ),
        }
    }
}

/// A scripted provider that holds every call until `open` is called, so
/// tests can observe the in-flight state.
pub struct GatedProvider {
    inner: ScriptedProvider,
    gate: Semaphore,
}

impl GatedProvider {
    pub fn new(inner: ScriptedProvider) -> Self {
        Self {
            inner,
            gate: Semaphore::new(0),
        }
    }

    /// Let one pending call complete.
    pub fn open(&self) {
        self.gate.add_permits(1);
    }

    pub fn call_count(&self) -> usize {
        self.inner.call_count()
    }

    /// Wait until at least `n` calls have reached the provider.
    pub async fn wait_for_calls(&self, n: usize) {
        while self.call_count() < n {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait::async_trait]
impl Provider for GatedProvider {
    fn name(&self) -> &str {
        "gated"
    }

    async fn complete(&self, request: GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        // Record before blocking so `wait_for_calls` sees the call.
        let call = {
            let mut requests = self.inner.requests.lock().unwrap();
            requests.push(request);
            requests.len() - 1
        };
        let permit = self.gate.acquire().await.map_err(|e| ProviderError::Network(e.to_string()))?;
        permit.forget();

        let outcomes = self.inner.outcomes.lock().unwrap();
        outcomes[call].clone().map(GenerationResponse::new)
    }
}
