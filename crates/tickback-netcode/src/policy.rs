//! Caller-supplied policies
//!
//! The engine knows nothing about what a state or an input means. Each
//! behaviour it needs is a small trait, owned by the session for its whole
//! lifetime and resolved statically. Every trait is implemented for the
//! matching closure type, so plain closures work as policies.

/// Advance a state by one input
///
/// Used both for live prediction and for replay during reconciliation, so
/// it must be deterministic.
pub trait ApplyInput<S, I> {
    fn apply(&self, state: S, input: I) -> S;
}

impl<S, I, F> ApplyInput<S, I> for F
where
    F: Fn(S, I) -> S,
{
    fn apply(&self, state: S, input: I) -> S {
        self(state, input)
    }
}

/// Decide whether a local state is close enough to an authoritative one
///
/// Returning `true` means no correction is needed.
pub trait CompareStates<S> {
    fn matches(&self, local: S, server: S) -> bool;
}

impl<S, F> CompareStates<S> for F
where
    F: Fn(S, S) -> bool,
{
    fn matches(&self, local: S, server: S) -> bool {
        self(local, server)
    }
}

/// Merge an authoritative state with the local prediction
///
/// The result becomes the base state that buffered inputs are replayed on.
pub trait CorrectState<S> {
    fn correct(&self, server: S, local: S) -> S;
}

impl<S, F> CorrectState<S> for F
where
    F: Fn(S, S) -> S,
{
    fn correct(&self, server: S, local: S) -> S {
        self(server, local)
    }
}

/// Blend between two states
///
/// `factor` is in `[0, 1]`. Implementations should return `from` at 0 and
/// `to` at 1.
pub trait InterpolateStates<S> {
    fn interpolate(&self, from: S, to: S, factor: f32) -> S;
}

impl<S, F> InterpolateStates<S> for F
where
    F: Fn(S, S, f32) -> S,
{
    fn interpolate(&self, from: S, to: S, factor: f32) -> S {
        self(from, to, factor)
    }
}

/// Default corrector: the server state wins, local prediction is discarded
#[derive(Debug, Clone, Copy, Default)]
pub struct TakeServer;

impl<S> CorrectState<S> for TakeServer {
    fn correct(&self, server: S, _local: S) -> S {
        server
    }
}

/// Comparer that treats states as matching only when they are equal
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatch;

impl<S: PartialEq> CompareStates<S> for ExactMatch {
    fn matches(&self, local: S, server: S) -> bool {
        local == server
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closures_as_policies() {
        let apply = |s: i32, i: i32| s + i;
        assert_eq!(apply.apply(4, 3), 7);

        let within_one = |a: i32, b: i32| (a - b).abs() <= 1;
        assert!(within_one.matches(4, 5));
        assert!(!within_one.matches(4, 6));

        let average = |server: i32, local: i32| (server + local) / 2;
        assert_eq!(average.correct(10, 6), 8);

        let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;
        assert_eq!(lerp.interpolate(0.0, 10.0, 0.25), 2.5);
    }

    #[test]
    fn test_take_server() {
        assert_eq!(TakeServer.correct(10, 6), 10);
    }

    #[test]
    fn test_exact_match() {
        assert!(ExactMatch.matches(3, 3));
        assert!(!ExactMatch.matches(3, 4));
        assert!(ExactMatch.matches((1, 2.5f32), (1, 2.5f32)));
    }
}
