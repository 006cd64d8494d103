//! Aggregate typing status across concurrent reveals

use std::collections::BTreeMap;

use super::events::RevealId;

/// Tracks which reveals are typing
#[derive(Debug, Default)]
pub struct TypingTracker {
    typing: BTreeMap<RevealId, bool>,
}

impl TypingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a typing-status report; returns the new global flag
    pub fn update(&mut self, reveal: RevealId, is_typing: bool) -> bool {
        self.typing.insert(reveal, is_typing);
        self.any_typing()
    }

    /// Forget a reveal whose owner went away
    pub fn remove(&mut self, reveal: RevealId) {
        self.typing.remove(&reveal);
    }

    pub fn any_typing(&self) -> bool {
        self.typing.values().any(|typing| *typing)
    }

    /// Most recent reveal still typing, the one a cancel should target
    pub fn typing_reveal(&self) -> Option<RevealId> {
        self.typing
            .iter()
            .rev()
            .find(|(_, typing)| **typing)
            .map(|(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_typing_is_or_of_reveals() {
        let mut tracker = TypingTracker::new();
        assert!(!tracker.any_typing());
        assert!(tracker.update(1, true));
        assert!(tracker.update(2, false));
        assert_eq!(tracker.typing_reveal(), Some(1));
        assert!(!tracker.update(1, false));
        assert_eq!(tracker.typing_reveal(), None);
    }

    #[test]
    fn test_remove_clears_status() {
        let mut tracker = TypingTracker::new();
        tracker.update(3, true);
        tracker.remove(3);
        assert!(!tracker.any_typing());
    }
}
