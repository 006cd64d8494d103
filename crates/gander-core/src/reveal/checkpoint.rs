//! Logical breakpoints during a reveal
//!
//! Hosts do expensive synchronized work (scrolling) only at these ticks.

/// Fallback checkpoint spacing for long unbroken text
pub const CHECKPOINT_INTERVAL: usize = 50;

/// Whether revealing `current` at `index` (after `prev`) is a checkpoint
pub fn is_checkpoint(prev: Option<char>, current: char, index: usize) -> bool {
    match (prev, current) {
        // Sentence end, bullet marker, list comma, closing aside, double space
        (Some('.' | '!' | '?' | '*' | ',' | ')' | ' '), ' ') => true,
        (_, '\n') => true,
        (prev, '`') if prev != Some('`') => true,
        _ => index > 0 && index % CHECKPOINT_INTERVAL == 0,
    }
}
