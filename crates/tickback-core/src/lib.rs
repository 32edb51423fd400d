//! Tickback Core - shared vocabulary for the prediction engine
//!
//! This crate holds the pieces every other tickback crate agrees on:
//!
//! - **Tick**: the logical time index used to address history
//! - **Snapshot**: the bound for states and inputs stored in history
//! - **Error / Result**: failures reported by the checked `try_*` operations
//!
//! # Example
//!
//! ```rust
//! use tickback_core::{Snapshot, Tick};
//!
//! #[derive(Debug, Clone, Copy, Default, PartialEq)]
//! struct Position {
//!     x: f32,
//!     y: f32,
//! }
//!
//! fn assert_snapshot<T: Snapshot>() {}
//! assert_snapshot::<Position>();
//!
//! let tick: Tick = 42;
//! assert_eq!(tick % 16, 10);
//! ```

mod error;

pub use error::{Error, Result};

/// Logical time index
///
/// Callers supply ticks in non-decreasing order. Nothing in the default
/// operations checks this.
pub type Tick = u64;

/// A plain value that can be stored in tick-indexed history
///
/// Snapshots are copied in and out of history by value and must not own
/// resources. `Default` provides the contents of slots that have never
/// been written.
pub trait Snapshot: Copy + Default + 'static {}

impl<T: Copy + Default + 'static> Snapshot for T {}
