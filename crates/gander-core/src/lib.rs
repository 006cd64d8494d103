//! Gander core library
//!
//! Segments model replies into formatted runs and reveals them one character
//! at a time. The chat proxy boundary and configuration live here too, so the
//! binary stays a thin terminal host.

pub mod chat;
pub mod config;
pub mod error;
pub mod format;
pub mod reveal;

pub use config::Config;
pub use error::{Error, Result};
