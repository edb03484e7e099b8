//! Grounding policy: the fixed instruction and sampling settings attached to
//! every generation request.
//!
//! These are constants. Nothing in config or at runtime can change them, and
//! `GroundingPolicy::request` is the only place the agent builds a
//! `GenerationRequest`.

use syllabus_core::provider::{GenerationRequest, Turn};

/// Exact sentence the model must answer with when the context has no answer.
pub const REFUSAL: &str = "This topic is not covered in your uploaded syllabus.";

pub const SYSTEM_INSTRUCTION: &str = r#"You are SyllabusGPT, a strict academic assistant.
Your goal is to answer questions ONLY using the provided documents (the "Syllabus Context").

RULES:
1. If the answer is NOT in the context, strictly respond: "This topic is not covered in your uploaded syllabus."
2. DO NOT use external knowledge.
3. ALWAYS cite the document name used for the answer.
4. Format your response clearly with Markdown.
5. If you find partial information, provide it and state what is missing.
6. If the user asks for summaries, exam notes, or viva questions, generate them based ONLY on the context.

Response Format:
- Use clear headings.
- Bullet points for lists.
- A "Sources" section at the end listing the documents referenced."#;

pub const CHAT_TEMPERATURE: f32 = 0.2;
pub const TOOL_TEMPERATURE: f32 = 0.3;

/// Which kind of request is being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    Chat,
    StudyTool,
}

impl RequestMode {
    pub fn temperature(self) -> f32 {
        match self {
            RequestMode::Chat => CHAT_TEMPERATURE,
            RequestMode::StudyTool => TOOL_TEMPERATURE,
        }
    }
}

pub struct GroundingPolicy;

impl GroundingPolicy {
    pub fn request(mode: RequestMode, model: impl Into<String>, turns: Vec<Turn>) -> GenerationRequest {
        GenerationRequest {
            model: model.into(),
            turns,
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            temperature: mode.temperature(),
        }
    }
}
