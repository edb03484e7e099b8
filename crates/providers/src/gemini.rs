//! Native Gemini provider (`models/{model}:generateContent`).
//!
//! Turns map one-to-one onto Gemini `contents` (`user` / `model` roles), the
//! system instruction travels in `systemInstruction`, and the temperature in
//! `generationConfig`. Text from all parts of the first candidate is joined.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use syllabus_core::error::ProviderError;
use syllabus_core::provider::{GenerationRequest, GenerationResponse, Provider, TurnRole};
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// A Gemini API provider.
pub struct GeminiProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Provider against the public Gemini endpoint.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self::new(DEFAULT_BASE_URL, api_key)
    }

    fn endpoint(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    fn build_body(request: &GenerationRequest) -> ApiRequest {
        ApiRequest {
            contents: request
                .turns
                .iter()
                .map(|t| ApiContent {
                    role: match t.role {
                        TurnRole::User => "user".into(),
                        TurnRole::Model => "model".into(),
                    },
                    parts: vec![ApiPart {
                        text: Some(t.text.clone()),
                    }],
                })
                .collect(),
            system_instruction: (!request.system_instruction.is_empty()).then(|| {
                ApiSystemInstruction {
                    parts: vec![ApiPart {
                        text: Some(request.system_instruction.clone()),
                    }],
                }
            }),
            generation_config: ApiGenerationConfig {
                temperature: request.temperature,
            },
        }
    }

    /// Pull the answer text out of a response. An empty candidate list with a
    /// block reason is a failure; an empty answer is not.
    fn extract_text(response: ApiResponse) -> Result<String, ProviderError> {
        let Some(candidate) = response.candidates.into_iter().next() else {
            if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
                return Err(ProviderError::Blocked(reason));
            }
            return Ok(String::new());
        };

        let text = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        Ok(text)
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, request: GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        let url = self.endpoint(&request.model);
        let body = Self::build_body(&request);

        debug!(provider = "gemini", model = %request.model, turns = request.turns.len(), "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status().as_u16();

        match status {
            200 => {}
            429 => return Err(ProviderError::RateLimited),
            401 | 403 => {
                return Err(ProviderError::AuthenticationFailed(
                    "Invalid API key or insufficient permissions".into(),
                ));
            }
            404 => return Err(ProviderError::ModelNotFound(request.model)),
            _ => {
                let error_body = response.text().await.unwrap_or_default();
                warn!(status, body = %error_body, "Gemini returned error");
                return Err(ProviderError::ApiError {
                    status_code: status,
                    message: error_body,
                });
            }
        }

        let api_response: ApiResponse =
            response.json().await.map_err(|e| ProviderError::ApiError {
                status_code: 200,
                message: format!("Failed to parse response: {e}"),
            })?;

        Ok(GenerationResponse::new(Self::extract_text(api_response)?))
    }

    async fn health_check(&self) -> Result<bool, ProviderError> {
        let url = format!("{}/models", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(response.status().is_success())
    }
}

// --- Gemini API types ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest {
    contents: Vec<ApiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<ApiSystemInstruction>,
    generation_config: ApiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiContent {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<ApiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct ApiSystemInstruction {
    parts: Vec<ApiPart>,
}

#[derive(Debug, Serialize)]
struct ApiGenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<ApiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<ApiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct ApiCandidate {
    #[serde(default)]
    content: Option<ApiContent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}
