//! # Error Types
//!
//! Two tiers, neither retried: setup failures (bad embed window id, bad
//! configuration, terminal I/O) and invariant violations in the render path
//! (transform stack misuse, unbalanced frames). Both end the process.

use crate::transform::StackError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClockError {
    /// Push/pop discipline of the transform stack was violated
    #[error("transform stack: {0}")]
    Stack(#[from] StackError),

    /// A frame finished with saved transforms still on the stack
    #[error("frame ended with transform stack depth {depth}")]
    UnbalancedFrame { depth: usize },

    /// The host window id handed to us could not be parsed
    #[error("invalid embed window id {0:?}")]
    InvalidWindowId(String),

    /// Configuration could not be serialized
    #[error("config: {0}")]
    Config(#[from] toml::ser::Error),

    /// Terminal or file I/O failed
    #[error("io: {0}")]
    Io(#[from] io::Error),
}
