//! Correction smoothing
//!
//! Wraps a [`Predictor`] and remembers what the last reconciliation
//! returned, so rendering can blend from the live prediction toward it
//! instead of snapping.

use crate::policy::{ApplyInput, CompareStates, CorrectState, InterpolateStates, TakeServer};
use crate::Predictor;
use tickback_core::{Result, Snapshot, Tick};
use tracing::trace;

/// A [`Predictor`] with an interpolation policy for visual blending
///
/// `last_corrected_state` is updated on every reconciliation, including
/// the ones where the live state already matched. It is the last value
/// returned by reconciliation, not necessarily a fresh correction. Before
/// any reconciliation it holds the predictor's live state at construction.
///
/// # Example
///
/// ```
/// use tickback_netcode::{ExactMatch, Predictor, SmoothPredictor};
///
/// let predictor = Predictor::new(0.0f32, |s: f32, i: f32| s + i, ExactMatch);
/// let mut smooth = SmoothPredictor::new(predictor, |a: f32, b: f32, t: f32| a + (b - a) * t);
///
/// smooth.apply_input(1.0, 1);
/// smooth.apply_input(1.0, 2);
/// smooth.state_received(4.0, 1);
///
/// assert_eq!(smooth.last_corrected_state(), 5.0);
/// assert_eq!(smooth.smoothed_state(0.0), 5.0);
/// assert_eq!(smooth.smooth(7.0, 0.5), 6.0);
/// ```
#[derive(Debug, Clone)]
pub struct SmoothPredictor<S, I, A, C, L, R = TakeServer>
where
    S: Snapshot,
    I: Snapshot,
{
    predictor: Predictor<S, I, A, C, R>,
    interpolate: L,
    last_corrected_state: S,
}

impl<S, I, A, C, L, R> SmoothPredictor<S, I, A, C, L, R>
where
    S: Snapshot,
    I: Snapshot,
    A: ApplyInput<S, I>,
    C: CompareStates<S>,
    R: CorrectState<S>,
    L: InterpolateStates<S>,
{
    /// Wrap a predictor with an interpolation policy
    pub fn new(predictor: Predictor<S, I, A, C, R>, interpolate: L) -> Self {
        let last_corrected_state = predictor.current_state();
        Self {
            predictor,
            interpolate,
            last_corrected_state,
        }
    }

    /// See [`Predictor::apply_input`]
    pub fn apply_input(&mut self, input: I, tick: Tick) -> S {
        self.predictor.apply_input(input, tick)
    }

    /// Reconcile through the wrapped predictor and remember the result
    pub fn state_received(&mut self, server_state: S, server_tick: Tick) -> S {
        let reconciled = self.predictor.state_received(server_state, server_tick);
        self.last_corrected_state = reconciled;
        reconciled
    }

    /// See [`Predictor::try_state_received`]; remembers the result on success
    pub fn try_state_received(&mut self, server_state: S, server_tick: Tick) -> Result<S> {
        let reconciled = self.predictor.try_state_received(server_state, server_tick)?;
        self.last_corrected_state = reconciled;
        Ok(reconciled)
    }

    /// Checked reconciliation reporting whether a correction was applied
    ///
    /// `Ok(false)` means the live prediction already matched.
    pub fn reconcile(&mut self, server_state: S, server_tick: Tick) -> Result<bool> {
        self.try_state_received(server_state, server_tick)?;
        Ok(self
            .predictor
            .last_reconciliation()
            .is_some_and(|r| r.corrected))
    }

    /// Blend from the live predicted state toward `target`
    ///
    /// `factor` 0 yields the live state, 1 yields `target`, given an
    /// interpolation policy that honours its endpoints.
    pub fn smooth(&self, target: S, factor: f32) -> S {
        trace!(factor, "smoothing toward target");
        self.interpolate
            .interpolate(self.predictor.current_state(), target, factor)
    }

    /// Blend from the live predicted state toward the last reconciled state
    pub fn smoothed_state(&self, factor: f32) -> S {
        self.smooth(self.last_corrected_state, factor)
    }

    /// Last value returned by reconciliation
    pub fn last_corrected_state(&self) -> S {
        self.last_corrected_state
    }

    pub fn predictor(&self) -> &Predictor<S, I, A, C, R> {
        &self.predictor
    }

    pub fn predictor_mut(&mut self) -> &mut Predictor<S, I, A, C, R> {
        &mut self.predictor
    }

    /// Unwrap the inner predictor
    pub fn into_inner(self) -> Predictor<S, I, A, C, R> {
        self.predictor
    }
}
