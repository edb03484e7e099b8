//! End-to-end integration tests for the Syllabus study engine.
//!
//! These tests exercise the full pipeline: ingestion into a persisted
//! workspace, grounded chat through a session, and study tools, with a
//! scripted provider standing in for the generation service.

use std::sync::{Arc, Mutex};

use syllabus_agent::{
    ChatSession, ContextAssembler, ContextPolicy, EMPTY_RESULT_MARKER, FALLBACK_MESSAGE,
    GenerationGateway, SYSTEM_INSTRUCTION, Segment, SessionState, StudyTool, StudyToolDispatcher,
};
use syllabus_config::AppConfig;
use syllabus_core::collaborator::{Ingestor, RawFile};
use syllabus_core::error::{Error, ProviderError, ValidationError};
use syllabus_core::message::{Message, Role, StudyArtifact};
use syllabus_core::notebook::{Document, DocumentKind, Notebook, Subject};
use syllabus_core::provider::{GenerationRequest, GenerationResponse, Provider, TurnRole};
use syllabus_core::snapshot::SnapshotBackend;
use syllabus_local::PlainTextIngestor;
use syllabus_store::{FileSnapshotBackend, InMemorySnapshotBackend, SNAPSHOT_KEY, WorkspaceStore};

// ── Mock Provider ────────────────────────────────────────────────────────

/// A mock provider that replays scripted outcomes and records requests.
struct ScriptedProvider {
    outcomes: Mutex<Vec<Result<String, ProviderError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedProvider {
    fn new(outcomes: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn text(response: &str) -> Self {
        Self::new(vec![Ok(response.to_string())])
    }

    fn silent() -> Self {
        Self::new(Vec::new())
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn last_request(&self) -> GenerationRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn complete(&self, request: GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        let mut requests = self.requests.lock().unwrap();
        let outcomes = self.outcomes.lock().unwrap();
        let call = requests.len();
        if call >= outcomes.len() {
            panic!(
                "ScriptedProvider exhausted: call #{}, have {}",
                call,
                outcomes.len()
            );
        }
        requests.push(request);
        outcomes[call].clone().map(GenerationResponse::new)
    }
}

fn gateway(provider: &Arc<ScriptedProvider>) -> GenerationGateway {
    GenerationGateway::new(provider.clone())
}

fn session(notebook: &Notebook, provider: &Arc<ScriptedProvider>) -> ChatSession {
    ChatSession::new(&notebook.id, "e2e-model", gateway(provider), ContextAssembler::unbounded())
}

fn dispatcher(provider: &Arc<ScriptedProvider>) -> StudyToolDispatcher {
    StudyToolDispatcher::new("e2e-model", gateway(provider), ContextAssembler::unbounded())
}

fn doc(name: &str, content: &str) -> Document {
    Document::new(name, DocumentKind::Txt, content, content.len() as u64)
}

fn memory_store() -> (Arc<InMemorySnapshotBackend>, WorkspaceStore) {
    let backend = Arc::new(InMemorySnapshotBackend::new());
    let store = WorkspaceStore::load(backend.clone()).unwrap();
    (backend, store)
}

fn persisted(backend: &InMemorySnapshotBackend) -> Vec<Notebook> {
    serde_json::from_str(&backend.read(SNAPSHOT_KEY).unwrap().unwrap()).unwrap()
}

// ── E2E: Full Study Flow ─────────────────────────────────────────────────

#[tokio::test]
async fn e2e_ingest_chat_and_tool_over_file_workspace() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut store = WorkspaceStore::load(Arc::new(FileSnapshotBackend::new(dir.path()))).unwrap();

    let notebook = store.create(Subject::OperatingSystems, "Memory Management").unwrap();
    let docs = PlainTextIngestor::new()
        .ingest(vec![
            RawFile::new("paging.md", "# Paging\nFixed-size frames."),
            RawFile::new("segmentation.txt", "Variable-size segments."),
        ])
        .await
        .unwrap();
    store.append_documents(&notebook.id, docs).unwrap();
    let active = store.active().cloned().unwrap();
    assert_eq!(active.documents.len(), 2);

    let provider = Arc::new(ScriptedProvider::new(vec![
        Ok("## Paging\n- Fixed-size frames\n\n### Sources\n- paging.md".into()),
        Ok("## Summary\n- Unit 1: Paging".into()),
    ]));

    let chat = session(&active, &provider);
    let reply = chat.submit(Some(&active), "What is paging?").await.unwrap();
    assert!(reply.content.contains("paging.md"));

    let request = provider.last_request();
    assert_eq!(request.system_instruction, SYSTEM_INSTRUCTION);
    assert_eq!(request.turns[0].role, TurnRole::User);
    assert!(request.turns[0].text.starts_with("CONTEXT:\n--- DOCUMENT: paging.md ---\n# Paging"));
    assert!(request.turns[0].text.ends_with("\n\nQUERY: What is paging?"));

    let artifact = dispatcher(&provider).run(StudyTool::Summary, &active.documents).await.unwrap();
    assert_eq!(artifact.title, "Chapter Summary");

    // The study tool never sees the chat history.
    let tool_request = provider.last_request();
    assert_eq!(tool_request.turns.len(), 1);
    assert!(!tool_request.turns[0].text.contains("What is paging?"));
    assert_eq!(provider.calls(), 2);
}

// ── E2E: Session State Machine ───────────────────────────────────────────

#[tokio::test]
async fn e2e_whitespace_input_never_leaves_idle() {
    let mut notebook = Notebook::new(Subject::Dbms, "Indexing");
    notebook.documents.push(doc("btree.txt", "B+ trees"));
    let provider = Arc::new(ScriptedProvider::silent());
    let chat = session(&notebook, &provider);

    for input in ["", " ", "\t\n"] {
        let err = chat.submit(Some(&notebook), input).await.unwrap_err();
        assert_eq!(err, ValidationError::EmptyQuery);
        assert_eq!(chat.state(), SessionState::Idle);
    }
    assert!(chat.messages().await.is_empty());
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn e2e_zero_documents_disables_chat() {
    let (_, mut store) = memory_store();
    let notebook = store.create(Subject::Ai, "Search").unwrap();
    let provider = Arc::new(ScriptedProvider::silent());
    let chat = session(&notebook, &provider);

    let err = chat.submit(store.active(), "Explain A*").await.unwrap_err();
    assert_eq!(err, ValidationError::NoDocuments);
    assert!(chat.messages().await.is_empty());
    assert_eq!(provider.calls(), 0);

    let err = dispatcher(&provider).run(StudyTool::Viva, &notebook.documents).await.unwrap_err();
    assert_eq!(err, ValidationError::NoDocuments);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn e2e_gateway_failure_appends_exactly_one_fallback() {
    let mut notebook = Notebook::new(Subject::ComputerNetworks, "Transport");
    notebook.documents.push(doc("tcp.txt", "Three-way handshake"));
    let provider = Arc::new(ScriptedProvider::new(vec![Err(ProviderError::ApiError {
        status_code: 500,
        message: "internal".into(),
    })]));
    let chat = session(&notebook, &provider);

    let before = chat.messages().await.len();
    chat.submit(Some(&notebook), "Explain the handshake").await.unwrap();
    let after = chat.messages().await;

    // The optimistic user message plus exactly one assistant reply.
    assert_eq!(after.len(), before + 2);
    assert_eq!(after.iter().filter(|m| m.role == Role::Assistant).count(), 1);
    assert_eq!(after.last().unwrap().content, FALLBACK_MESSAGE);
    assert_eq!(chat.state(), SessionState::Idle);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn e2e_empty_generation_gets_marker() {
    let mut notebook = Notebook::new(Subject::Other, "Misc");
    notebook.documents.push(doc("a.txt", "x"));
    let provider = Arc::new(ScriptedProvider::text(""));
    let chat = session(&notebook, &provider);

    let reply = chat.submit(Some(&notebook), "anything?").await.unwrap();
    assert_eq!(reply.content, EMPTY_RESULT_MARKER);
}

// ── E2E: Context Assembly ────────────────────────────────────────────────

#[tokio::test]
async fn e2e_context_segment_order_is_exact() {
    let docs = vec![doc("A", "x"), doc("B", "y")];
    let block = ContextAssembler::unbounded().assemble(&docs, &[], "Q");

    assert_eq!(
        block.segments,
        vec![
            Segment::Document { name: "A".into(), content: "x".into() },
            Segment::Document { name: "B".into(), content: "y".into() },
            Segment::Query("Q".into()),
        ]
    );
    let turns = block.into_turns();
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].text, "CONTEXT:\n--- DOCUMENT: A ---\nx\n\n--- DOCUMENT: B ---\ny\n\nQUERY: Q");
}

#[tokio::test]
async fn e2e_configured_history_window() {
    let mut config = AppConfig::default();
    config.context.max_history_turns = Some(1);
    let assembler = ContextAssembler::new(ContextPolicy::from(&config.context));

    let history = vec![Message::user("old question"), Message::assistant("latest answer")];
    let block = assembler.assemble(&[doc("A", "x")], &history, "Q");
    assert_eq!(block.metadata.history_dropped, 1);

    let texts: Vec<String> = block.into_turns().into_iter().map(|t| t.text).collect();
    assert!(!texts.iter().any(|t| t == "old question"));
    assert_eq!(texts[0], "latest answer");
}

// ── E2E: Study Tools ─────────────────────────────────────────────────────

#[tokio::test]
async fn e2e_summary_prompt_is_fixed() {
    let docs = vec![doc("syllabus.txt", "Unit 1: Sets. Unit 2: Relations.")];

    for _ in 0..2 {
        let provider = Arc::new(ScriptedProvider::text("summary"));
        dispatcher(&provider).run(StudyTool::Summary, &docs).await.unwrap();
        let text = provider.last_request().turns[0].text.clone();
        assert!(text.ends_with("TASK: Provide a comprehensive chapter-wise summary of this syllabus."));
    }
    assert_eq!("summary".parse::<StudyTool>().unwrap().prompt(), StudyTool::Summary.prompt());
}

#[tokio::test]
async fn e2e_tool_failure_is_visible_artifact() {
    let provider = Arc::new(ScriptedProvider::new(vec![Err(ProviderError::RateLimited)]));
    let d = dispatcher(&provider);
    let artifact = d.run(StudyTool::Notes, &[doc("a.txt", "x")]).await.unwrap();

    assert_eq!(artifact, StudyArtifact::new("Error", "Failed to generate tool output."));
    assert_eq!(d.running(), None);
}

// ── E2E: Workspace Store ─────────────────────────────────────────────────

#[tokio::test]
async fn e2e_duplicate_document_never_admitted() {
    let (backend, mut store) = memory_store();
    let notebook = store.create(Subject::Dbms, "Joins").unwrap();
    let d = doc("joins.txt", "Hash join");

    store.append_documents(&notebook.id, vec![d.clone()]).unwrap();
    let err = store.append_documents(&notebook.id, vec![d.clone(), doc("x", "y")]).unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::DuplicateDocument { .. })));

    let mut copy = store.get(&notebook.id).cloned().unwrap();
    copy.documents.push(d);
    assert!(store.update(copy).is_err());

    assert_eq!(store.get(&notebook.id).unwrap().documents.len(), 1);
    assert_eq!(persisted(&backend)[0].documents.len(), 1);
}

#[tokio::test]
async fn e2e_delete_active_notebook() {
    let (backend, mut store) = memory_store();
    let keep = store.create(Subject::Ai, "Keep").unwrap();
    let gone = store.create(Subject::Ai, "Gone").unwrap();
    store.select(&gone.id).unwrap();

    assert!(store.delete(&gone.id).unwrap());
    assert!(store.active().is_none());
    let ids: Vec<String> = persisted(&backend).into_iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![keep.id]);
}

#[tokio::test]
async fn e2e_workspace_roundtrip_is_lossless() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut store = WorkspaceStore::load(Arc::new(FileSnapshotBackend::new(dir.path()))).unwrap();

    let a = store.create(Subject::Dbms, "Normal Forms").unwrap();
    store
        .append_documents(&a.id, vec![doc("1nf.txt", "atomic values"), doc("bcnf.md", "every determinant")])
        .unwrap();
    store.create(Subject::ComputerNetworks, "Routing").unwrap();
    let pasted = PlainTextIngestor::paste("Lecture 4", "Dijkstra and Bellman-Ford").unwrap();
    let routing_id = store.list()[1].id.clone();
    store.append_documents(&routing_id, vec![pasted]).unwrap();
    let before = store.list().to_vec();

    let reloaded = WorkspaceStore::load(Arc::new(FileSnapshotBackend::new(dir.path()))).unwrap();
    assert_eq!(reloaded.list(), before.as_slice());
    assert!(dir.path().join(format!("{SNAPSHOT_KEY}.json")).exists());
}

// ── E2E: Configuration System ────────────────────────────────────────────

#[tokio::test]
async fn e2e_config_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.default_provider, "gemini");
    assert_eq!(config.active_model(), "gemini-3-flash-preview");
    assert_eq!(ContextPolicy::from(&config.context), ContextPolicy::default());

    let router = syllabus_providers::build_from_config(&config);
    assert_eq!(router.default().unwrap().name(), "gemini");
}
