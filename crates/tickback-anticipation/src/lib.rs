//! Tickback Anticipation - pattern-based value extrapolation
//!
//! Independent of the rollback engine. An [`Anticipator`] keeps a short,
//! bounded history of a value and guesses what comes next by finding where
//! the newest values have been seen before.
//!
//! - **Anticipator**: bounded history, pattern prediction, fade weight
//! - **PredictNext**: per-type extrapolation from two observations
//!
//! # Example
//!
//! ```rust
//! use tickback_anticipation::{Anticipator, AnticipatorConfig};
//!
//! let config = AnticipatorConfig::with_capacity(8);
//! let mut speed = Anticipator::with_config(config, 0.0f32).unwrap();
//! for sample in [1.0, 2.0, 3.0, 1.0, 2.0] {
//!     speed.set_value(sample);
//! }
//!
//! assert_eq!(speed.predict(), 3.0);
//! // Extrapolate from the current value toward the pattern prediction
//! assert_eq!(speed.predict_in(0.25), 4.0);
//! assert_eq!(speed.weight(), 0.25);
//! ```

mod anticipator;
mod predict_next;

pub use anticipator::{Anticipator, AnticipatorConfig};
pub use predict_next::PredictNext;

// Re-export shared types for convenience
pub use tickback_core::{Error, Result};
