//! The grounded conversation engine.
//!
//! Every request follows the same path:
//!
//! 1. **Validate** the input against the active notebook (non-empty query,
//!    at least one document, nothing already in flight)
//! 2. **Assemble** documents, history and the new input into ordered turns
//! 3. **Ground** the turns with the fixed system instruction and temperature
//! 4. **Generate** once through the gateway, with no retries
//! 5. **Settle**: chat appends the reply (or the fallback), study tools
//!    return an artifact (or the `Error` artifact)

pub mod context;
pub mod gateway;
pub mod grounding;
pub mod session;
pub mod study_tools;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use context::{AssemblyMetadata, ContextAssembler, ContextBlock, ContextPolicy, Segment};
pub use gateway::{EMPTY_RESULT_MARKER, GenerationGateway};
pub use grounding::{GroundingPolicy, RequestMode, REFUSAL, SYSTEM_INSTRUCTION};
pub use session::{ChatSession, FALLBACK_MESSAGE, SUGGESTED_PROMPTS, SessionState};
pub use study_tools::{StudyTool, StudyToolDispatcher};
