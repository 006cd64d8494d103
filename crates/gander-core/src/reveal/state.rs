//! Reveal state machine
//!
//! Timer-free: the controller drives `tick` from its task, tests drive it
//! directly. Lengths count chars, never bytes.

use serde::Serialize;

use super::checkpoint::is_checkpoint;
use crate::format::{parse, Segment};

/// Lifecycle of one source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealPhase {
    /// Source set, nothing revealed yet
    Idle,
    Revealing,
    /// Everything revealed
    Complete,
    /// Stopped by the host, prefix frozen
    Cancelled,
}

impl RevealPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, RevealPhase::Complete | RevealPhase::Cancelled)
    }
}

/// Outcome of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Char index of the character just revealed
    pub index: usize,
    pub ch: char,
    pub checkpoint: bool,
}

/// Point-in-time copy of a reveal, handed to hosts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealSnapshot {
    pub phase: RevealPhase,
    pub revealed: usize,
    pub total: usize,
    pub segments: Vec<Segment>,
}

impl RevealSnapshot {
    pub fn is_typing(&self) -> bool {
        self.revealed < self.total && self.phase != RevealPhase::Cancelled
    }
}

impl Default for RevealSnapshot {
    fn default() -> Self {
        Self {
            phase: RevealPhase::Complete,
            revealed: 0,
            total: 0,
            segments: Vec::new(),
        }
    }
}

/// Progressive disclosure of one source text
#[derive(Debug, Clone)]
pub struct RevealState {
    source: String,
    total: usize,
    revealed: usize,
    /// Byte offset of the end of the revealed prefix
    cursor: usize,
    last: Option<char>,
    phase: RevealPhase,
    segments: Vec<Segment>,
}

impl RevealState {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let total = source.chars().count();
        Self {
            source,
            total,
            revealed: 0,
            cursor: 0,
            last: None,
            phase: RevealPhase::Idle,
            segments: Vec::new(),
        }
    }

    /// Reveal one more character and re-segment the prefix
    ///
    /// Returns `None` once the reveal is complete or cancelled.
    pub fn tick(&mut self) -> Option<Tick> {
        if self.phase.is_terminal() {
            return None;
        }
        let Some(ch) = self.source[self.cursor..].chars().next() else {
            self.phase = RevealPhase::Complete;
            return None;
        };

        let index = self.revealed;
        let checkpoint = is_checkpoint(self.last, ch, index);
        self.cursor += ch.len_utf8();
        self.revealed += 1;
        self.last = Some(ch);
        self.segments = parse(&self.source[..self.cursor]);
        self.phase = if self.revealed == self.total {
            RevealPhase::Complete
        } else {
            RevealPhase::Revealing
        };

        Some(Tick {
            index,
            ch,
            checkpoint,
        })
    }

    /// Freeze at the current prefix
    ///
    /// Returns false when already complete or cancelled.
    pub fn cancel(&mut self) -> bool {
        if self.phase.is_terminal() {
            return false;
        }
        self.phase = RevealPhase::Cancelled;
        true
    }

    pub fn revealed_text(&self) -> &str {
        &self.source[..self.cursor]
    }

    pub fn revealed_len(&self) -> usize {
        self.revealed
    }

    pub fn total_len(&self) -> usize {
        self.total
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_cancelled(&self) -> bool {
        self.phase == RevealPhase::Cancelled
    }

    /// True while characters remain and the reveal was not cancelled
    pub fn is_typing(&self) -> bool {
        self.revealed < self.total && !self.is_cancelled()
    }

    pub fn snapshot(&self) -> RevealSnapshot {
        RevealSnapshot {
            phase: self.phase,
            revealed: self.revealed,
            total: self.total,
            segments: self.segments.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::SegmentKind;

    #[test]
    fn test_reaches_total_in_exactly_len_ticks() {
        let text = "Hi **there** (é)";
        let mut state = RevealState::new(text);
        assert_eq!(state.phase(), RevealPhase::Idle);
        assert!(state.is_typing());

        let mut ticks = 0;
        let mut last_len = 0;
        while state.tick().is_some() {
            ticks += 1;
            assert!(state.revealed_len() > last_len);
            last_len = state.revealed_len();
        }
        assert_eq!(ticks, text.chars().count());
        assert_eq!(state.revealed_len(), state.total_len());
        assert_eq!(state.phase(), RevealPhase::Complete);
        assert_eq!(state.revealed_text(), text);
        assert_eq!(state.segments(), parse(text).as_slice());
        assert!(!state.is_typing());
    }

    #[test]
    fn test_first_tick_leaves_idle() {
        let mut state = RevealState::new("ab");
        let tick = state.tick().unwrap();
        assert_eq!(tick.index, 0);
        assert_eq!(tick.ch, 'a');
        assert_eq!(state.phase(), RevealPhase::Revealing);
    }

    #[test]
    fn test_partial_bold_shows_as_text() {
        let mut state = RevealState::new("a **b** c");
        for _ in 0..5 {
            state.tick();
        }
        assert_eq!(state.revealed_text(), "a **b");
        assert_eq!(state.segments(), &[Segment::text("a **b")]);

        state.tick();
        state.tick();
        assert_eq!(state.segments()[1].kind, SegmentKind::Bold);
    }

    #[test]
    fn test_cancel_freezes_prefix() {
        let mut state = RevealState::new("Hello world");
        for _ in 0..4 {
            state.tick();
        }
        assert!(state.cancel());
        assert!(state.tick().is_none());
        assert_eq!(state.revealed_len(), 4);
        assert_eq!(state.revealed_text(), "Hell");
        assert!(!state.is_typing());
        assert!(!state.cancel());
    }

    #[test]
    fn test_cancel_after_complete_is_noop() {
        let mut state = RevealState::new("ok");
        while state.tick().is_some() {}
        assert!(!state.cancel());
        assert_eq!(state.phase(), RevealPhase::Complete);
    }

    #[test]
    fn test_empty_source_completes_without_ticks() {
        let mut state = RevealState::new("");
        assert!(!state.is_typing());
        assert!(state.tick().is_none());
        assert_eq!(state.phase(), RevealPhase::Complete);
    }

    #[test]
    fn test_tick_reports_checkpoint() {
        let mut state = RevealState::new("Hi. There");
        let hits: Vec<_> = std::iter::from_fn(|| state.tick())
            .filter(|tick| tick.checkpoint)
            .map(|tick| tick.index)
            .collect();
        assert_eq!(hits, vec![3]);
    }
}
