//! Client-side prediction engine
//!
//! Applies inputs locally before server confirmation and reconciles with
//! authoritative states by replaying buffered inputs.

use crate::policy::{ApplyInput, CompareStates, CorrectState, TakeServer};
use crate::PredictorConfig;
use tickback_core::{Error, Result, Snapshot, Tick};
use tickback_rollback_buffer::TickRing;
use tracing::{debug, trace, warn};

/// Outcome of the most recent call to [`Predictor::state_received`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciliation {
    /// Tick the authoritative state was stamped with
    pub server_tick: Tick,
    /// Whether the comparer rejected the live state
    pub corrected: bool,
    /// Number of buffered inputs replayed on top of the correction
    pub replayed: u64,
}

/// Client-side prediction engine
///
/// Holds the live predicted state, a state history and an input history,
/// both addressed by tick. Every input is applied immediately; when an
/// authoritative state arrives for a past tick, a mismatch is corrected at
/// that tick and every input since is replayed.
///
/// # Usage contract
///
/// The default operations never fail. Breaking these rules produces
/// silently wrong results rather than errors:
///
/// - Input ticks must be non-decreasing. Going backwards overwrites history.
/// - Both ring capacities must exceed the prediction horizon. A server tick
///   older than the window reads aliased states and inputs.
/// - Every tick between a server tick and the current tick must have had an
///   input recorded. Gaps replay whatever stale input occupies the slot.
///
/// The `try_*` methods check these rules and report violations as
/// [`Error`]s without changing what the default operations do.
#[derive(Debug, Clone)]
pub struct Predictor<S, I, A, C, R = TakeServer>
where
    S: Snapshot,
    I: Snapshot,
{
    current_state: S,
    current_tick: Tick,
    states: TickRing<S>,
    inputs: TickRing<I>,
    apply: A,
    compare: C,
    correct: R,
    config: PredictorConfig,
    last_reconciliation: Option<Reconciliation>,
}

impl<S, I, A, C> Predictor<S, I, A, C, TakeServer>
where
    S: Snapshot,
    I: Snapshot,
    A: ApplyInput<S, I>,
    C: CompareStates<S>,
{
    /// Create a predictor with the default configuration
    ///
    /// `start_state` is seeded into the history at tick 0.
    pub fn new(start_state: S, apply: A, compare: C) -> Self {
        Self::build(PredictorConfig::default(), start_state, apply, compare)
    }

    /// Create a predictor with a custom configuration
    pub fn with_config(
        config: PredictorConfig,
        start_state: S,
        apply: A,
        compare: C,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, start_state, apply, compare))
    }

    fn build(config: PredictorConfig, start_state: S, apply: A, compare: C) -> Self {
        let mut states = TickRing::new(config.state_capacity);
        states.add(start_state, 0);
        Self {
            current_state: start_state,
            current_tick: 0,
            states,
            inputs: TickRing::new(config.input_capacity),
            apply,
            compare,
            correct: TakeServer,
            config,
            last_reconciliation: None,
        }
    }
}

impl<S, I, A, C, R> Predictor<S, I, A, C, R>
where
    S: Snapshot,
    I: Snapshot,
    A: ApplyInput<S, I>,
    C: CompareStates<S>,
    R: CorrectState<S>,
{
    /// Replace the corrector policy
    pub fn with_corrector<R2: CorrectState<S>>(self, correct: R2) -> Predictor<S, I, A, C, R2> {
        Predictor {
            current_state: self.current_state,
            current_tick: self.current_tick,
            states: self.states,
            inputs: self.inputs,
            apply: self.apply,
            compare: self.compare,
            correct,
            config: self.config,
            last_reconciliation: self.last_reconciliation,
        }
    }

    /// Apply a local input at `tick` and return the new predicted state
    ///
    /// The input is recorded for replay. In one-frame-delay mode the state
    /// history at `tick` receives the state before the input; otherwise it
    /// receives the state after it. The current tick becomes `tick`.
    pub fn apply_input(&mut self, input: I, tick: Tick) -> S {
        self.inputs.add(input, tick);

        if self.config.one_frame_delay {
            self.states.add(self.current_state, tick);
            self.current_state = self.apply.apply(self.current_state, input);
        } else {
            let next = self.apply.apply(self.current_state, input);
            self.states.add(next, tick);
            self.current_state = next;
        }

        trace!(tick, delayed = self.config.one_frame_delay, "applied input");
        self.current_tick = tick;
        self.current_state
    }

    /// Reconcile with an authoritative state for `server_tick`
    ///
    /// The live state (not the history at `server_tick`) is compared with
    /// `server_state`. On a match, `server_state` is returned and the live
    /// state is left alone. On a mismatch, the corrected state is written at
    /// `server_tick`, inputs from `server_tick + 1` through the current tick
    /// are replayed on top of it, and the replayed state becomes live.
    pub fn state_received(&mut self, server_state: S, server_tick: Tick) -> S {
        if self.compare.matches(self.current_state, server_state) {
            debug!(server_tick, current_tick = self.current_tick, "prediction matches server");
            self.last_reconciliation = Some(Reconciliation {
                server_tick,
                corrected: false,
                replayed: 0,
            });
            return server_state;
        }

        let mut corrected = self.correct.correct(server_state, self.current_state);
        self.states.add(corrected, server_tick);

        let mut replayed = 0;
        if server_tick < self.current_tick {
            for tick in (server_tick + 1)..=self.current_tick {
                corrected = self.apply.apply(corrected, self.inputs.get(tick));
                self.states.add(corrected, tick);
                trace!(tick, "replayed input");
                replayed += 1;
            }
        }

        debug!(
            server_tick,
            current_tick = self.current_tick,
            replayed,
            "corrected misprediction"
        );
        self.current_state = corrected;
        self.last_reconciliation = Some(Reconciliation {
            server_tick,
            corrected: true,
            replayed,
        });
        corrected
    }

    /// Checked [`apply_input`](Self::apply_input): rejects a tick behind the current tick
    pub fn try_apply_input(&mut self, input: I, tick: Tick) -> Result<S> {
        if tick < self.current_tick {
            warn!(tick, current_tick = self.current_tick, "rejected out-of-order input");
            return Err(Error::NonMonotonicTick {
                tick,
                current: self.current_tick,
            });
        }
        Ok(self.apply_input(input, tick))
    }

    /// Checked [`state_received`](Self::state_received)
    ///
    /// Rejects a server tick ahead of the current tick, a server tick whose
    /// history slot has been reused, and a replay span with any input slot
    /// not written by its own tick. Nothing is modified when it fails.
    pub fn try_state_received(&mut self, server_state: S, server_tick: Tick) -> Result<S> {
        if server_tick > self.current_tick {
            warn!(server_tick, current_tick = self.current_tick, "rejected future server state");
            return Err(Error::FutureTick {
                tick: server_tick,
                current: self.current_tick,
            });
        }

        let span = self.current_tick - server_tick;
        if span >= self.config.state_capacity as Tick {
            warn!(server_tick, current_tick = self.current_tick, "server state outside history window");
            return Err(Error::StaleTick {
                tick: server_tick,
                stored: self.states.written_tick(server_tick),
            });
        }
        for tick in (server_tick + 1)..=self.current_tick {
            if let Err(err) = self.inputs.try_get(tick) {
                warn!(server_tick, tick, "missing input in replay span");
                return Err(err);
            }
        }

        Ok(self.state_received(server_state, server_tick))
    }

    /// State recorded at `tick`, subject to ring aliasing
    pub fn state_at_tick(&self, tick: Tick) -> S {
        self.states.get(tick)
    }

    /// Checked [`state_at_tick`](Self::state_at_tick)
    pub fn try_state_at_tick(&self, tick: Tick) -> Result<S> {
        self.states.try_get(tick)
    }

    /// Input recorded at `tick`, subject to ring aliasing
    pub fn input_at_tick(&self, tick: Tick) -> I {
        self.inputs.get(tick)
    }

    /// Live predicted state and the tick of the last applied input
    pub fn current(&self) -> (S, Tick) {
        (self.current_state, self.current_tick)
    }

    /// Live predicted state
    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Tick of the last applied input
    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    /// Outcome of the last reconciliation, if any
    pub fn last_reconciliation(&self) -> Option<Reconciliation> {
        self.last_reconciliation
    }

    /// Get access to the state history
    pub fn states(&self) -> &TickRing<S> {
        &self.states
    }

    /// Get access to the input history
    pub fn inputs(&self) -> &TickRing<I> {
        &self.inputs
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    /// Reset the predictor
    ///
    /// Clears both histories and reseeds `start_state` at tick 0.
    pub fn reset(&mut self, start_state: S) {
        self.states.clear();
        self.inputs.clear();
        self.states.add(start_state, 0);
        self.current_state = start_state;
        self.current_tick = 0;
        self.last_reconciliation = None;
    }
}
