//! Typewriter-style reveal of formatted replies
//!
//! A reply is disclosed one character per tick; every tick re-segments the
//! revealed prefix so partially typed markup never renders as garbage.

mod cancellation;
mod checkpoint;
mod controller;
mod events;
mod pacing;
mod state;
mod typing;

pub use cancellation::RevealCancellation;
pub use checkpoint::{is_checkpoint, CHECKPOINT_INTERVAL};
pub use controller::RevealController;
pub use events::{RevealEvent, RevealEventKind, RevealFrame, RevealId};
pub use pacing::RevealPacing;
pub use state::{RevealPhase, RevealSnapshot, RevealState, Tick};
pub use typing::TypingTracker;
