//! Provider trait — the abstraction over text-generation backends.
//!
//! A Provider knows how to send an ordered list of turns plus a system
//! instruction to a model and get the generated text back.
//!
//! Implementations: Gemini (native), OpenAI-compatible endpoints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::message::Role;

/// Speaker of a single turn on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Model,
}

impl From<Role> for TurnRole {
    fn from(role: Role) -> Self {
        match role {
            Role::User => TurnRole::User,
            Role::Assistant => TurnRole::Model,
        }
    }
}

/// One turn of the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Model,
            text: text.into(),
        }
    }
}

/// A complete generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// The model to use (e.g., "gemini-3-flash-preview")
    pub model: String,

    /// Ordered turns, oldest first. The last turn is the one being answered.
    pub turns: Vec<Turn>,

    /// Instruction contract sent out-of-band from the turns
    pub system_instruction: String,

    /// Sampling temperature (0.0 = deterministic)
    pub temperature: f32,
}

/// A generation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub text: String,
}

impl GenerationResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// The core Provider trait.
///
/// Every generation backend implements this trait. Sessions and the study-tool
/// dispatcher only ever see `Arc<dyn Provider>`.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "gemini", "openai").
    fn name(&self) -> &str;

    /// Send a request and get the generated text. Called at most once per request.
    async fn complete(&self, request: GenerationRequest) -> Result<GenerationResponse, ProviderError>;

    /// Health check: can we reach the provider?
    async fn health_check(&self) -> Result<bool, ProviderError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_wire_field_names() {
        let req = GenerationRequest {
            model: "gemini-3-flash-preview".into(),
            turns: vec![Turn::user("Q"), Turn::model("A")],
            system_instruction: "Be grounded".into(),
            temperature: 0.2,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["systemInstruction"], "Be grounded");
        assert_eq!(json["turns"][0]["role"], "user");
        assert_eq!(json["turns"][1]["role"], "model");
    }

    #[test]
    fn assistant_maps_to_model_turn() {
        assert_eq!(TurnRole::from(Role::Assistant), TurnRole::Model);
        assert_eq!(TurnRole::from(Role::User), TurnRole::User);
    }
}
