//! Study tools: fixed, history-free generation tasks over a notebook's documents.

use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use syllabus_core::error::ValidationError;
use syllabus_core::message::StudyArtifact;
use syllabus_core::notebook::Document;
use tracing::{info, warn};

use crate::context::ContextAssembler;
use crate::gateway::GenerationGateway;
use crate::grounding::{GroundingPolicy, RequestMode};

/// Artifact title used when a tool run fails.
pub const ERROR_TITLE: &str = "Error";
/// Artifact content used when a tool run fails.
pub const FAILURE_TEXT: &str = "Failed to generate tool output.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyTool {
    Summary,
    Simple,
    Notes,
    Viva,
}

impl StudyTool {
    pub const ALL: [StudyTool; 4] = [
        StudyTool::Summary,
        StudyTool::Simple,
        StudyTool::Notes,
        StudyTool::Viva,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StudyTool::Summary => "summary",
            StudyTool::Simple => "simple",
            StudyTool::Notes => "notes",
            StudyTool::Viva => "viva",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StudyTool::Summary => "Chapter Summary",
            StudyTool::Simple => "Simple Explain",
            StudyTool::Notes => "Exam Notes",
            StudyTool::Viva => "Viva Prep",
        }
    }

    /// The task prompt bound to this tool. Never varies at runtime.
    pub fn prompt(&self) -> &'static str {
        match self {
            StudyTool::Summary => "Provide a comprehensive chapter-wise summary of this syllabus.",
            StudyTool::Simple => {
                "Explain the key concepts of this syllabus in very simple terms for a beginner."
            }
            StudyTool::Notes => {
                "Generate detailed exam study notes including key formulas, definitions, and diagrams descriptions."
            }
            StudyTool::Viva => {
                "Generate 10 possible viva/exam questions with detailed answers based on this content."
            }
        }
    }
}

impl fmt::Display for StudyTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudyTool {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str() == wanted)
            .ok_or_else(|| ValidationError::UnknownVariant {
                kind: "study tool",
                value: s.to_string(),
            })
    }
}

/// Runs study tools, at most one at a time.
pub struct StudyToolDispatcher {
    model: String,
    gateway: GenerationGateway,
    assembler: ContextAssembler,
    running: Mutex<Option<StudyTool>>,
}

/// Marks a tool as running for as long as it lives.
struct RunningSlot<'a> {
    slot: &'a Mutex<Option<StudyTool>>,
}

impl Drop for RunningSlot<'_> {
    fn drop(&mut self) {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl StudyToolDispatcher {
    pub fn new(model: impl Into<String>, gateway: GenerationGateway, assembler: ContextAssembler) -> Self {
        Self {
            model: model.into(),
            gateway,
            assembler,
            running: Mutex::new(None),
        }
    }

    /// The tool currently in flight, if any.
    pub fn running(&self) -> Option<StudyTool> {
        *self.running.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn claim(&self, kind: StudyTool) -> Result<RunningSlot<'_>, ValidationError> {
        let mut slot = self.running.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(current) = *slot {
            return Err(ValidationError::Busy(current.to_string()));
        }
        *slot = Some(kind);
        Ok(RunningSlot { slot: &self.running })
    }

    /// Run one tool over `documents`. Generation failures come back as an
    /// `Error` artifact, never as an `Err`.
    pub async fn run(&self, kind: StudyTool, documents: &[Document]) -> Result<StudyArtifact, ValidationError> {
        if documents.is_empty() {
            return Err(ValidationError::NoDocuments);
        }
        let _slot = self.claim(kind)?;

        let block = self.assembler.assemble_task(documents, kind.prompt());
        let request = GroundingPolicy::request(RequestMode::StudyTool, &self.model, block.into_turns());
        info!(tool = %kind, documents = documents.len(), "Dispatching study tool");

        match self.gateway.generate(request).await {
            Ok(response) => Ok(StudyArtifact::new(kind.display_name(), response.text)),
            Err(e) => {
                warn!(tool = %kind, error = %e, "Study tool failed");
                Ok(StudyArtifact::new(ERROR_TITLE, FAILURE_TEXT))
            }
        }
    }
}

impl fmt::Debug for StudyToolDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StudyToolDispatcher")
            .field("model", &self.model)
            .field("running", &self.running())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grounding::{SYSTEM_INSTRUCTION, TOOL_TEMPERATURE};
    use crate::session::{ChatSession, SessionState};
    use crate::test_helpers::{GatedProvider, ScriptedProvider};
    use std::sync::Arc;
    use syllabus_core::error::ProviderError;
    use syllabus_core::notebook::{DocumentKind, Notebook, Subject};
    use syllabus_core::provider::Provider;

    fn docs() -> Vec<Document> {
        vec![
            Document::new("unit1.md", DocumentKind::Md, "Processes", 9),
            Document::new("unit2.md", DocumentKind::Md, "Threads", 7),
        ]
    }

    fn dispatcher(provider: Arc<dyn Provider>) -> StudyToolDispatcher {
        StudyToolDispatcher::new("tool-model", GenerationGateway::new(provider), ContextAssembler::unbounded())
    }

    #[test]
    fn parse_known_kinds_and_reject_unknown() {
        for tool in StudyTool::ALL {
            assert_eq!(tool.as_str().parse::<StudyTool>().unwrap(), tool);
        }
        assert_eq!("  VIVA ".parse::<StudyTool>().unwrap(), StudyTool::Viva);
        assert!(matches!(
            "quiz".parse::<StudyTool>(),
            Err(ValidationError::UnknownVariant { kind: "study tool", .. })
        ));
    }

    #[test]
    fn display_names() {
        let names: Vec<_> = StudyTool::ALL.iter().map(|t| t.display_name()).collect();
        assert_eq!(names, ["Chapter Summary", "Simple Explain", "Exam Notes", "Viva Prep"]);
    }

    #[tokio::test]
    async fn summary_uses_bound_prompt() {
        let provider = Arc::new(ScriptedProvider::texts(&["## Summary"]));
        let artifact = dispatcher(provider.clone()).run(StudyTool::Summary, &docs()).await.unwrap();

        assert_eq!(artifact, StudyArtifact::new("Chapter Summary", "## Summary"));
        let request = &provider.requests()[0];
        assert_eq!(request.turns.len(), 1);
        assert!(request.turns[0].text.ends_with(
            "\n\nTASK: Provide a comprehensive chapter-wise summary of this syllabus."
        ));
        assert!(request.turns[0].text.contains("--- DOCUMENT: unit2.md ---\nThreads"));
        assert_eq!(request.system_instruction, SYSTEM_INSTRUCTION);
        assert_eq!(request.temperature, TOOL_TEMPERATURE);
    }

    #[tokio::test]
    async fn failure_becomes_error_artifact() {
        let provider = Arc::new(ScriptedProvider::failing(ProviderError::RateLimited));
        let d = dispatcher(provider);
        let artifact = d.run(StudyTool::Notes, &docs()).await.unwrap();

        assert_eq!(artifact, StudyArtifact::new(ERROR_TITLE, FAILURE_TEXT));
        assert_eq!(d.running(), None);
    }

    #[tokio::test]
    async fn empty_documents_rejected() {
        let provider = Arc::new(ScriptedProvider::texts(&[]));
        let result = dispatcher(provider.clone()).run(StudyTool::Viva, &[]).await;
        assert_eq!(result, Err(ValidationError::NoDocuments));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn second_tool_rejected_while_running() {
        let provider = Arc::new(GatedProvider::new(ScriptedProvider::texts(&["simple answer"])));
        let d = Arc::new(dispatcher(provider.clone()));

        let pending = {
            let d = d.clone();
            tokio::spawn(async move { d.run(StudyTool::Simple, &docs()).await })
        };
        provider.wait_for_calls(1).await;

        assert_eq!(d.running(), Some(StudyTool::Simple));
        assert_eq!(
            d.run(StudyTool::Summary, &docs()).await,
            Err(ValidationError::Busy("simple".into()))
        );

        provider.open();
        let artifact = pending.await.unwrap().unwrap();
        assert_eq!(artifact.title, "Simple Explain");
        assert_eq!(d.running(), None);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn tool_runs_while_chat_is_sending() {
        let mut nb = Notebook::new(Subject::OperatingSystems, "Operating Systems");
        nb.documents = docs();

        let chat_provider = Arc::new(GatedProvider::new(ScriptedProvider::texts(&["chat"])));
        let session = Arc::new(ChatSession::new(
            nb.id.clone(),
            "chat-model",
            GenerationGateway::new(chat_provider.clone()),
            ContextAssembler::unbounded(),
        ));
        let tool_provider = Arc::new(GatedProvider::new(ScriptedProvider::texts(&["summary"])));
        let d = Arc::new(dispatcher(tool_provider.clone()));

        let chat = {
            let session = session.clone();
            let nb = nb.clone();
            tokio::spawn(async move { session.submit(Some(&nb), "What is a process?").await })
        };
        chat_provider.wait_for_calls(1).await;

        let tool = {
            let d = d.clone();
            let documents = nb.documents.clone();
            tokio::spawn(async move { d.run(StudyTool::Summary, &documents).await })
        };
        tool_provider.wait_for_calls(1).await;

        assert_eq!(session.state(), SessionState::Sending);
        assert_eq!(d.running(), Some(StudyTool::Summary));

        tool_provider.open();
        let artifact = tool.await.unwrap().unwrap();
        assert_eq!(artifact, StudyArtifact::new("Chapter Summary", "summary"));
        assert_eq!(session.state(), SessionState::Sending);

        chat_provider.open();
        let reply = chat.await.unwrap().unwrap();
        assert_eq!(reply.content, "chat");
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(d.running(), None);
    }
}
