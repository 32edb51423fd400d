//! Error types for tickback
//!
//! Only the checked `try_*` operations produce these. The default operations
//! never fail and degrade silently when their usage contract is broken.

use crate::Tick;
use thiserror::Error;

/// Tickback error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The ring slot for `tick` was last written by a different tick
    #[error("Tick {tick} is outside the retained window (slot holds {stored:?})")]
    StaleTick { tick: Tick, stored: Option<Tick> },

    /// An input tick went backwards
    #[error("Input tick {tick} is behind the current tick {current}")]
    NonMonotonicTick { tick: Tick, current: Tick },

    /// An authoritative state arrived for a tick that was never predicted
    #[error("Server tick {tick} is ahead of the current tick {current}")]
    FutureTick { tick: Tick, current: Tick },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
