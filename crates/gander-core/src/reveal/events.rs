//! Reveal events
//!
//! Published by a running reveal to its host.

use std::sync::Arc;

use crate::format::{FormatterOptions, Segment};

/// Identifies one reveal controller among several sharing a channel
pub type RevealId = u64;

/// Event from a reveal, tagged with its controller and source generation
#[derive(Debug, Clone)]
pub struct RevealEvent {
    pub reveal: RevealId,
    /// Bumped on every `set_source`; events from older generations are stale
    pub generation: u64,
    pub kind: RevealEventKind,
}

/// What happened
#[derive(Debug, Clone)]
pub enum RevealEventKind {
    /// Segment tree for the newly revealed prefix (every tick)
    Frame(RevealFrame),
    /// Logical breakpoint reached, a good moment to scroll
    Checkpoint { revealed: usize },
    /// Whether the reveal is still typing
    TypingStatus(bool),
    /// Stopped by the host at `revealed` characters
    Cancelled { revealed: usize },
    /// Whole source revealed
    Complete,
}

/// One published render update
#[derive(Debug, Clone)]
pub struct RevealFrame {
    pub revealed: usize,
    pub total: usize,
    pub segments: Vec<Segment>,
    pub options: Arc<FormatterOptions>,
}
