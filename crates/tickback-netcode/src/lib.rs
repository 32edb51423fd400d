//! Tickback Netcode - client-side prediction and server reconciliation
//!
//! This crate provides the rollback side of tickback:
//!
//! - **Prediction**: Apply inputs locally before server confirmation
//! - **Reconciliation**: Correct a diverged prediction and replay inputs
//! - **Smoothing**: Blend from the live prediction toward the last correction
//! - **Policies**: Caller-supplied apply, compare, correct and interpolate steps
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Client                                 │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐  │
//! │  │    Input     │─▶│  Predictor   │─▶│ SmoothPredictor  │  │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘  │
//! │                      │    ▲                   │            │
//! │                      ▼    │                   ▼            │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐  │
//! │  │ Server state │─▶│ TickRing x2  │  │     Render       │  │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use tickback_netcode::{ExactMatch, Predictor};
//!
//! let mut predictor = Predictor::new(0i32, |s: i32, i: i32| s + i, ExactMatch);
//!
//! // Predict locally
//! predictor.apply_input(1, 1);
//! predictor.apply_input(2, 2);
//! predictor.apply_input(3, 3);
//! assert_eq!(predictor.current_state(), 6);
//!
//! // The server says tick 1 ended at 10: replay ticks 2 and 3 on top
//! assert_eq!(predictor.state_received(10, 1), 15);
//! assert_eq!(predictor.current(), (15, 3));
//! ```

mod config;
mod policy;
mod prediction;
mod smoothing;

pub use config::PredictorConfig;
pub use policy::{ApplyInput, CompareStates, CorrectState, ExactMatch, InterpolateStates, TakeServer};
pub use prediction::{Predictor, Reconciliation};
pub use smoothing::SmoothPredictor;

// Re-export shared types for convenience
pub use tickback_core::{Error, Result, Snapshot, Tick};
pub use tickback_rollback_buffer::{RingStats, TickRing};
