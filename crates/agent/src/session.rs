//! Conversation session: one chat per notebook, one request in flight.
//!
//! ```text
//!   Idle ──submit(valid)──▶ Sending ──success──▶ Idle   (+ assistant reply)
//!                              └──────failure──▶ Idle   (+ fallback reply)
//! ```
//!
//! Invalid input is rejected with a `ValidationError` before anything is
//! appended or sent. Provider failures never leave this boundary: they are
//! logged and turned into the fixed fallback reply.

use syllabus_core::error::ValidationError;
use syllabus_core::message::Message;
use syllabus_core::notebook::Notebook;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::context::ContextAssembler;
use crate::gateway::GenerationGateway;
use crate::grounding::{GroundingPolicy, RequestMode};

/// Assistant reply appended when the generation call fails.
pub const FALLBACK_MESSAGE: &str =
    "Sorry, I encountered an error processing your syllabus. Please try again.";

/// Starter prompts offered while a conversation is still empty.
pub const SUGGESTED_PROMPTS: [&str; 4] = [
    "Summarize the main modules",
    "Explain the grading criteria",
    "What are the prerequisites?",
    "List all mandatory textbooks",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Sending,
}

pub struct ChatSession {
    notebook_id: String,
    model: String,
    gateway: GenerationGateway,
    assembler: ContextAssembler,
    messages: RwLock<Vec<Message>>,
    in_flight: Mutex<()>,
}

impl ChatSession {
    pub fn new(
        notebook_id: impl Into<String>,
        model: impl Into<String>,
        gateway: GenerationGateway,
        assembler: ContextAssembler,
    ) -> Self {
        Self {
            notebook_id: notebook_id.into(),
            model: model.into(),
            gateway,
            assembler,
            messages: RwLock::new(Vec::new()),
            in_flight: Mutex::new(()),
        }
    }

    pub fn notebook_id(&self) -> &str {
        &self.notebook_id
    }

    pub fn state(&self) -> SessionState {
        match self.in_flight.try_lock() {
            Ok(_) => SessionState::Idle,
            Err(_) => SessionState::Sending,
        }
    }

    /// Conversation so far, in send order.
    pub async fn messages(&self) -> Vec<Message> {
        self.messages.read().await.clone()
    }

    /// Send `text` grounded in `notebook`'s documents and append the reply.
    ///
    /// Returns the appended assistant message, which is the fallback text
    /// when generation failed.
    pub async fn submit(&self, notebook: Option<&Notebook>, text: &str) -> Result<Message, ValidationError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyQuery);
        }
        let notebook = notebook.ok_or(ValidationError::NoActiveNotebook)?;
        if notebook.id != self.notebook_id {
            return Err(ValidationError::NotebookMismatch {
                expected: self.notebook_id.clone(),
                actual: notebook.id.clone(),
            });
        }
        if !notebook.has_documents() {
            return Err(ValidationError::NoDocuments);
        }
        let _sending = self
            .in_flight
            .try_lock()
            .map_err(|_| ValidationError::Busy(self.notebook_id.clone()))?;

        let history = {
            let mut messages = self.messages.write().await;
            let history = messages.clone();
            messages.push(Message::user(text));
            history
        };
        debug!(notebook_id = %self.notebook_id, history = history.len(), "Session sending");

        let block = self.assembler.assemble(&notebook.documents, &history, text);
        debug!(
            notebook_id = %self.notebook_id,
            documents = block.metadata.documents_included,
            estimated_tokens = block.metadata.estimated_tokens,
            "Context assembled"
        );
        let request = GroundingPolicy::request(RequestMode::Chat, &self.model, block.into_turns());

        let reply = match self.gateway.generate(request).await {
            Ok(response) => Message::assistant(response.text),
            Err(e) => {
                warn!(notebook_id = %self.notebook_id, error = %e, "Chat generation failed, using fallback");
                Message::assistant(FALLBACK_MESSAGE)
            }
        };

        self.messages.write().await.push(reply.clone());
        info!(notebook_id = %self.notebook_id, "Session idle");
        Ok(reply)
    }

    /// Reset the conversation. Rejected while a request is in flight.
    pub async fn clear(&self) -> Result<(), ValidationError> {
        let _guard = self
            .in_flight
            .try_lock()
            .map_err(|_| ValidationError::Busy(self.notebook_id.clone()))?;
        self.messages.write().await.clear();
        debug!(notebook_id = %self.notebook_id, "Session cleared");
        Ok(())
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("notebook_id", &self.notebook_id)
            .field("model", &self.model)
            .field("state", &self.state())
            .finish()
    }
}
