//! Sequence-pattern value anticipator

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tickback_core::{Error, Result};
use tracing::trace;

use crate::PredictNext;

/// Configuration for an [`Anticipator`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnticipatorConfig {
    /// Number of past values kept for pattern matching
    pub capacity: usize,
}

impl AnticipatorConfig {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity }
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidConfig(
                "capacity must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AnticipatorConfig {
    fn default() -> Self {
        Self { capacity: 15 }
    }
}

/// Extrapolates the next value of a series from its own history
///
/// Every value set is recorded in a bounded FIFO (oldest evicted first).
/// [`predict`](Self::predict) looks for an earlier stretch of history that
/// mirrors the newest values and returns what followed it. Scanning is
/// quadratic in the history length, which stays small.
///
/// The fade weight moved by [`predict_in`](Self::predict_in) and
/// [`predict_out`](Self::predict_out) is tracked and clamped to `[0, 1]`,
/// but is not fed into [`PredictNext`]. Callers that want to fade the
/// prediction in or out read it through [`weight`](Self::weight).
///
/// # Example
///
/// ```
/// use tickback_anticipation::Anticipator;
///
/// let mut anticipator = Anticipator::new(0i32);
/// for value in [1, 2, 3, 1, 2] {
///     anticipator.set_value(value);
/// }
/// assert_eq!(anticipator.predict(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Anticipator<T> {
    history: VecDeque<T>,
    capacity: usize,
    value: T,
    weight: f32,
}

impl<T> Anticipator<T>
where
    T: PredictNext + Copy + PartialEq,
{
    /// Create an anticipator holding `initial` with the default capacity
    ///
    /// `initial` is not recorded into history.
    pub fn new(initial: T) -> Self {
        Self::build(AnticipatorConfig::default().capacity, initial)
    }

    /// Create an anticipator with a custom configuration
    pub fn with_config(config: AnticipatorConfig, initial: T) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config.capacity, initial))
    }

    fn build(capacity: usize, initial: T) -> Self {
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
            value: initial,
            weight: 0.0,
        }
    }

    /// Set the current value and record it, evicting the oldest when full
    pub fn set_value(&mut self, value: T) {
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(value);
        self.value = value;
    }

    /// Most recently set value
    pub fn value(&self) -> T {
        self.value
    }

    /// Pattern-matched continuation of the history
    ///
    /// For each start index `s`, counts how far `h[s + k]` keeps equal to
    /// `h[n - 1 - k]`, stopping before the newest slot so the continuation
    /// `h[s + len]` always exists. The earliest longest run wins. With no
    /// run at all the newest value is returned; with fewer than two values
    /// the current value is.
    pub fn predict(&self) -> T {
        let n = self.history.len();
        if n < 2 {
            return self.value;
        }

        let mut best_start = 0;
        let mut best_len = 0;
        for start in 0..n - 1 {
            let mut len = 0;
            while start + len < n - 1 && self.history[start + len] == self.history[n - 1 - len] {
                len += 1;
            }
            if len > best_len {
                best_start = start;
                best_len = len;
            }
        }

        if best_len == 0 {
            return self.history[n - 1];
        }
        trace!(start = best_start, len = best_len, "matched history pattern");
        self.history[best_start + best_len]
    }

    /// Raise the fade weight by `step` and extrapolate
    pub fn predict_in(&mut self, step: f32) -> T {
        self.weight = (self.weight + step).clamp(0.0, 1.0);
        trace!(weight = self.weight, "fade in");
        T::predict_next(self.value, self.predict())
    }

    /// Lower the fade weight by `step` and extrapolate
    pub fn predict_out(&mut self, step: f32) -> T {
        self.weight = (self.weight - step).clamp(0.0, 1.0);
        trace!(weight = self.weight, "fade out");
        T::predict_next(self.value, self.predict())
    }

    /// Current fade weight in `[0, 1]`
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Recorded values, oldest first
    pub fn history(&self) -> impl Iterator<Item = T> + '_ {
        self.history.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop the history and reset the weight, keeping the current value
    pub fn clear(&mut self) {
        self.history.clear();
        self.weight = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_history(values: &[i32]) -> Anticipator<i32> {
        let mut anticipator = Anticipator::new(0);
        for &value in values {
            anticipator.set_value(value);
        }
        anticipator
    }

    #[test]
    fn test_pattern_match() {
        let anticipator = with_history(&[1, 2, 3, 1, 2]);
        assert_eq!(anticipator.predict(), 3);
    }

    #[test]
    fn test_fewer_than_two_values() {
        let anticipator = Anticipator::new(7);
        assert_eq!(anticipator.predict(), 7);

        let anticipator = with_history(&[4]);
        assert_eq!(anticipator.predict(), 4);
    }

    #[test]
    fn test_no_match_returns_newest() {
        let anticipator = with_history(&[1, 2, 3]);
        assert_eq!(anticipator.predict(), 3);
    }

    #[test]
    fn test_constant_series() {
        let anticipator = with_history(&[4, 4, 4]);
        assert_eq!(anticipator.predict(), 4);
    }

    #[test]
    fn test_earliest_longest_run_wins() {
        // Runs of length 1 start at 0 and 2; the first is kept
        let anticipator = with_history(&[5, 8, 5, 7, 9, 5]);
        assert_eq!(anticipator.predict(), 8);
    }

    #[test]
    fn test_eviction() {
        let config = AnticipatorConfig::with_capacity(3);
        let mut anticipator = Anticipator::with_config(config, 0).unwrap();
        for value in 1..=5 {
            anticipator.set_value(value);
        }

        assert_eq!(anticipator.len(), 3);
        assert_eq!(anticipator.history().collect::<Vec<_>>(), vec![3, 4, 5]);
        assert_eq!(anticipator.value(), 5);
    }

    #[test]
    fn test_weight_clamping() {
        let mut anticipator = Anticipator::new(0.0f32);
        for _ in 0..5 {
            anticipator.predict_in(0.3);
            assert!(anticipator.weight() <= 1.0);
        }
        assert_eq!(anticipator.weight(), 1.0);

        for _ in 0..5 {
            anticipator.predict_out(0.3);
            assert!(anticipator.weight() >= 0.0);
        }
        assert_eq!(anticipator.weight(), 0.0);
    }

    #[test]
    fn test_predict_in_extrapolates_from_current_value() {
        let mut anticipator = with_history(&[1, 2, 3, 1, 2]);
        // predict() is 3, current value is 2: 3 + (3 - 2)
        assert_eq!(anticipator.predict_in(0.5), 4);
        assert_eq!(anticipator.predict_out(0.1), 4);
        assert!((anticipator.weight() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_clear() {
        let mut anticipator = with_history(&[1, 2, 3]);
        anticipator.predict_in(0.5);
        anticipator.clear();

        assert!(anticipator.is_empty());
        assert_eq!(anticipator.weight(), 0.0);
        assert_eq!(anticipator.predict(), 3);
    }

    #[test]
    fn test_config() {
        assert_eq!(AnticipatorConfig::default().capacity, 15);
        assert!(matches!(
            Anticipator::with_config(AnticipatorConfig::with_capacity(0), 0i32),
            Err(Error::InvalidConfig(_))
        ));

        let parsed: AnticipatorConfig = ron::from_str("(capacity: 8)").unwrap();
        assert_eq!(parsed, AnticipatorConfig::with_capacity(8));
    }
}
