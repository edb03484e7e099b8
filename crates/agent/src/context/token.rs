//! Token estimation utilities.
//!
//! Uses a character-based heuristic: ~4 characters per token. The figure is
//! reported in assembly metadata only; nothing is trimmed against it.

use syllabus_core::provider::Turn;

/// Estimate the token count for a string.
///
/// Heuristic: 1 token ≈ 4 characters. Rounds up.
pub fn estimate_tokens(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    text.len().div_ceil(4)
}

/// Estimate tokens for a single turn including per-turn overhead.
///
/// Each turn costs ~4 tokens of overhead for role name and delimiters
/// in the API wire format.
pub fn estimate_turn_tokens(turn: &Turn) -> usize {
    let overhead = 4;
    overhead + estimate_tokens(&turn.text)
}

pub fn estimate_turns_tokens(turns: &[Turn]) -> usize {
    turns.iter().map(estimate_turn_tokens).sum()
}
