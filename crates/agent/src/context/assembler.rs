//! Context assembler: documents, history and query in a fixed order.
//!
//! # Determinism
//!
//! Assembly is a pure function of its inputs. Identical documents, history
//! and query always produce identical segments and turns; no random or
//! time-dependent logic runs here.
//!
//! # Windowing
//!
//! The default policy includes everything: every document in full and every
//! history message. `ContextPolicy` can bound history to the most recent N
//! messages and truncate each document to N characters. Both bounds are
//! opt-in via the `[context]` config section.

use crate::context::token;
use serde::{Deserialize, Serialize};
use syllabus_config::ContextConfig;
use syllabus_core::message::{Message, Role};
use syllabus_core::notebook::Document;
use syllabus_core::provider::{Turn, TurnRole};

// ── Types ─────────────────────────────────────────────────────────────────

/// One ordered piece of an assembled context.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// A source document, labeled by name.
    Document { name: String, content: String },
    /// A prior conversation message with its role preserved.
    History { role: Role, text: String },
    /// The user's new question. Always last in a chat block.
    Query(String),
    /// A study-tool task prompt. Always last in a task block.
    Task(String),
}

impl Segment {
    /// Header line plus content, as sent inside the `CONTEXT:` turn.
    fn render_document(name: &str, content: &str) -> String {
        format!("--- DOCUMENT: {name} ---\n{content}")
    }
}

/// Windowing bounds. `None` means no bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextPolicy {
    pub max_history_turns: Option<usize>,
    pub max_document_chars: Option<usize>,
}

impl From<&ContextConfig> for ContextPolicy {
    fn from(config: &ContextConfig) -> Self {
        Self {
            max_history_turns: config.max_history_turns,
            max_document_chars: config.max_document_chars,
        }
    }
}

/// Metadata about one assembly run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssemblyMetadata {
    pub documents_included: usize,
    /// Documents whose content was cut to `max_document_chars`.
    pub documents_truncated: usize,
    pub history_included: usize,
    /// Oldest history messages left out by `max_history_turns`.
    pub history_dropped: usize,
    /// Characters across all rendered turns.
    pub total_chars: usize,
    pub estimated_tokens: usize,
}

/// The ordered result of an assembly, ready to render into turns.
#[derive(Debug, Clone)]
pub struct ContextBlock {
    pub segments: Vec<Segment>,
    pub metadata: AssemblyMetadata,
}

impl ContextBlock {
    /// Render segments into provider turns.
    ///
    /// Chat blocks yield one turn per history message, then a single user
    /// turn `CONTEXT: ... QUERY: <query>`, so roles alternate as long as the
    /// history does. Task blocks yield a single `CONTEXT: ... TASK: <prompt>`
    /// user turn.
    pub fn turns(&self) -> Vec<Turn> {
        let documents: Vec<String> = self
            .segments
            .iter()
            .filter_map(|s| match s {
                Segment::Document { name, content } => Some(Segment::render_document(name, content)),
                _ => None,
            })
            .collect();
        let context = format!("CONTEXT:\n{}", documents.join("\n\n"));

        let mut turns = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                Segment::History { role, text } => turns.push(Turn {
                    role: TurnRole::from(*role),
                    text: text.clone(),
                }),
                Segment::Query(query) => turns.push(Turn::user(format!("{context}\n\nQUERY: {query}"))),
                Segment::Task(prompt) => turns.push(Turn::user(format!("{context}\n\nTASK: {prompt}"))),
                Segment::Document { .. } => {}
            }
        }
        turns
    }

    pub fn into_turns(self) -> Vec<Turn> {
        self.turns()
    }
}

// ── Assembler ─────────────────────────────────────────────────────────────

/// The context assembler. Stateless apart from its policy; create one and reuse it.
#[derive(Debug, Clone, Default)]
pub struct ContextAssembler {
    policy: ContextPolicy,
}

impl ContextAssembler {
    pub fn new(policy: ContextPolicy) -> Self {
        Self { policy }
    }

    /// Assembler that includes everything.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Build a chat context: documents, then history, then the query.
    pub fn assemble(&self, documents: &[Document], history: &[Message], query: &str) -> ContextBlock {
        let mut metadata = AssemblyMetadata::default();
        let mut segments = self.document_segments(documents, &mut metadata);

        let skip = match self.policy.max_history_turns {
            Some(limit) => history.len().saturating_sub(limit),
            None => 0,
        };
        metadata.history_dropped = skip;
        metadata.history_included = history.len() - skip;
        segments.extend(history[skip..].iter().map(|m| Segment::History {
            role: m.role,
            text: m.content.clone(),
        }));

        segments.push(Segment::Query(query.to_string()));
        Self::finish(segments, metadata)
    }

    /// Build a history-free study-tool context: documents, then the task prompt.
    pub fn assemble_task(&self, documents: &[Document], task_prompt: &str) -> ContextBlock {
        let mut metadata = AssemblyMetadata::default();
        let mut segments = self.document_segments(documents, &mut metadata);
        segments.push(Segment::Task(task_prompt.to_string()));
        Self::finish(segments, metadata)
    }

    fn document_segments(&self, documents: &[Document], metadata: &mut AssemblyMetadata) -> Vec<Segment> {
        metadata.documents_included = documents.len();
        documents
            .iter()
            .map(|doc| {
                let content = match self.policy.max_document_chars {
                    Some(limit) if doc.content.chars().count() > limit => {
                        metadata.documents_truncated += 1;
                        doc.content.chars().take(limit).collect()
                    }
                    _ => doc.content.clone(),
                };
                Segment::Document {
                    name: doc.name.clone(),
                    content,
                }
            })
            .collect()
    }

    fn finish(segments: Vec<Segment>, mut metadata: AssemblyMetadata) -> ContextBlock {
        let mut block = ContextBlock { segments, metadata: AssemblyMetadata::default() };
        let turns = block.turns();
        metadata.total_chars = turns.iter().map(|t| t.text.chars().count()).sum();
        metadata.estimated_tokens = token::estimate_turns_tokens(&turns);
        block.metadata = metadata;
        block
    }
}
