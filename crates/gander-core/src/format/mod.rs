//! Response formatting
//!
//! Turns a raw model reply into typed segments (bold, question, bullet,
//! parenthetical, code, text). Pure and restartable: the reveal controller
//! re-runs it on every prefix of a reply.

mod debug;
mod options;
mod parser;
mod segment;

pub use debug::{debug_text_parsing, describe_segments, SAMPLE_CASES};
pub use options::FormatterOptions;
pub use parser::parse;
pub use segment::{plain_text, Segment, SegmentKind};
