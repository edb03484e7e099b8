//! Context assembly.
//!
//! Turns a notebook's documents, the conversation so far and the new query
//! into the ordered turn list a provider receives.
//!
//! # Segment order
//!
//! | Position | Source | Rendering |
//! |----------|--------|-----------|
//! | 1 | Documents, notebook order | `--- DOCUMENT: <name> ---` + content, under a `CONTEXT:` header |
//! | 2 | History, send order | one turn per message, `assistant` becomes `model` |
//! | 3 | Query | `QUERY: <text>` |
//!
//! History renders first; the documents and the query share the final user
//! turn, so that turn always follows a `model` turn or leads the request.
//!
//! Study-tool tasks skip history and fold everything into a single
//! `CONTEXT: ... TASK: <prompt>` turn.

pub mod assembler;
pub mod token;

pub use assembler::{AssemblyMetadata, ContextAssembler, ContextBlock, ContextPolicy, Segment};
