//! Tickback Rollback Buffer - tick-indexed ring buffer for prediction history
//!
//! A fixed-capacity container addressed by `tick % capacity`. It backs both
//! the state history and the input history of the prediction engine.
//!
//! # Features
//!
//! - **Bounded memory**: capacity is fixed at construction
//! - **O(1) writes and reads**: the slot is computed, never searched
//! - **Aliasing overwrite**: a write always replaces the slot, whatever tick
//!   wrote it before
//! - **Opt-in checking**: [`TickRing::try_get`] reports aliased reads
//!
//! # Window contract
//!
//! [`TickRing::get`] performs no validity check. Reading a tick whose last
//! write is more than `capacity` ticks old returns the value of whichever
//! tick last wrote that slot, with no signal. Keep the capacity larger than
//! the longest gap between a prediction and its authoritative correction.
//!
//! # Example
//!
//! ```rust
//! use tickback_rollback_buffer::TickRing;
//!
//! let mut ring = TickRing::new(4);
//! for (tick, value) in (0..4).zip(10..14) {
//!     ring.add(value, tick);
//! }
//! assert_eq!(ring.get(0), 10);
//!
//! // Tick 4 shares slot 0 with tick 0
//! ring.add(14, 4);
//! assert_eq!(ring.get(4), 14);
//! assert_eq!(ring.get(0), 14);
//! assert!(ring.try_get(0).is_err());
//! ```

use tickback_core::{Error, Result, Snapshot, Tick};

/// A ring buffer of values addressed by tick
///
/// Every slot starts out holding `T::default()`.
#[derive(Debug, Clone)]
pub struct TickRing<T: Snapshot> {
    /// Slot storage, indexed by `tick % capacity`
    values: Vec<T>,
    /// Tick that last wrote each slot, `None` if never written
    stamps: Vec<Option<Tick>>,
    capacity: usize,
}

impl<T: Snapshot> TickRing<T> {
    /// Create a new ring with the given capacity
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of slots (must exceed the prediction horizon)
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than 0");
        Self {
            values: vec![T::default(); capacity],
            stamps: vec![None; capacity],
            capacity,
        }
    }

    fn tick_to_index(&self, tick: Tick) -> usize {
        (tick % self.capacity as Tick) as usize
    }

    /// Write `value` into the slot for `tick`, overwriting unconditionally
    pub fn add(&mut self, value: T, tick: Tick) {
        let index = self.tick_to_index(tick);
        self.values[index] = value;
        self.stamps[index] = Some(tick);
    }

    /// Read the slot for `tick`
    ///
    /// No validity check: a stale tick returns whatever value currently
    /// occupies its slot.
    pub fn get(&self, tick: Tick) -> T {
        self.values[self.tick_to_index(tick)]
    }

    /// Read the slot for `tick`, failing if another tick wrote it last
    pub fn try_get(&self, tick: Tick) -> Result<T> {
        let index = self.tick_to_index(tick);
        match self.stamps[index] {
            Some(stored) if stored == tick => Ok(self.values[index]),
            stored => Err(Error::StaleTick { tick, stored }),
        }
    }

    /// The tick that last wrote the slot `tick` maps to
    pub fn written_tick(&self, tick: Tick) -> Option<Tick> {
        self.stamps[self.tick_to_index(tick)]
    }

    /// The highest tick currently held in any slot
    pub fn newest_tick(&self) -> Option<Tick> {
        self.stamps.iter().flatten().copied().max()
    }

    /// Number of slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Reset every slot to `T::default()` and forget all stamps
    pub fn clear(&mut self) {
        self.values.fill(T::default());
        self.stamps.fill(None);
    }

    /// Get statistics about the ring
    pub fn stats(&self) -> RingStats {
        RingStats {
            capacity: self.capacity,
            occupied: self.stamps.iter().filter(|s| s.is_some()).count(),
            newest_tick: self.newest_tick(),
        }
    }
}

impl<T: Snapshot> Default for TickRing<T> {
    fn default() -> Self {
        Self::new(128) // ~2 seconds at 60 ticks per second
    }
}

/// Statistics about a [`TickRing`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingStats {
    /// Number of slots
    pub capacity: usize,
    /// Slots written at least once since construction or the last clear
    pub occupied: usize,
    /// Highest tick held
    pub newest_tick: Option<Tick>,
}

impl RingStats {
    /// Oldest tick guaranteed not to alias, given the newest write
    pub fn window_start(&self) -> Option<Tick> {
        self.newest_tick
            .map(|newest| newest.saturating_sub((self.capacity as Tick).saturating_sub(1)))
    }

    /// Get the fill percentage (0.0 to 1.0)
    pub fn fill_ratio(&self) -> f32 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.occupied as f32 / self.capacity as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let ring: TickRing<i32> = TickRing::new(64);
        assert_eq!(ring.capacity(), 64);
        assert_eq!(ring.get(10), 0);
        assert_eq!(ring.newest_tick(), None);
        assert_eq!(ring.stats().occupied, 0);
    }

    #[test]
    #[should_panic(expected = "Capacity must be greater than 0")]
    fn test_zero_capacity() {
        let _ring: TickRing<i32> = TickRing::new(0);
    }

    #[test]
    fn test_add_and_get() {
        let mut ring = TickRing::new(64);
        ring.add(1.5f32, 10);
        ring.add(2.5f32, 11);

        assert_eq!(ring.get(10), 1.5);
        assert_eq!(ring.get(11), 2.5);
        assert_eq!(ring.try_get(11), Ok(2.5));
    }

    #[test]
    fn test_ring_aliasing() {
        let mut ring = TickRing::new(4);
        ring.add(10, 0);
        ring.add(11, 1);
        ring.add(12, 2);
        ring.add(13, 3);
        assert_eq!(ring.get(0), 10);

        ring.add(14, 4);
        assert_eq!(ring.get(4), 14);
        assert_eq!(ring.get(0), 14);
        assert_eq!(ring.get(1), 11);
    }

    #[test]
    fn test_overwrite_ignores_previous_writer() {
        let mut ring = TickRing::new(4);
        ring.add(99, 9);
        // Tick 1 is older than tick 9 but still takes the slot
        ring.add(5, 1);
        assert_eq!(ring.get(9), 5);
        assert_eq!(ring.written_tick(9), Some(1));
    }

    #[test]
    fn test_try_get_reports_stale_reads() {
        let mut ring = TickRing::new(4);
        assert_eq!(
            ring.try_get(2),
            Err(Error::StaleTick {
                tick: 2,
                stored: None
            })
        );

        ring.add(7, 2);
        ring.add(8, 6);
        assert_eq!(
            ring.try_get(2),
            Err(Error::StaleTick {
                tick: 2,
                stored: Some(6)
            })
        );
        // The unchecked read still aliases
        assert_eq!(ring.get(2), 8);
    }

    #[test]
    fn test_clear() {
        let mut ring = TickRing::new(8);
        ring.add(3, 1);
        ring.add(4, 2);
        ring.clear();

        assert_eq!(ring.get(1), 0);
        assert_eq!(ring.written_tick(2), None);
        assert_eq!(ring.newest_tick(), None);
    }

    #[test]
    fn test_stats() {
        let mut ring = TickRing::new(16);
        ring.add(1u8, 10);
        ring.add(2u8, 20);
        ring.add(3u8, 30);

        let stats = ring.stats();
        assert_eq!(stats.capacity, 16);
        assert_eq!(stats.occupied, 3);
        assert_eq!(stats.newest_tick, Some(30));
        assert_eq!(stats.window_start(), Some(15));
        assert!((stats.fill_ratio() - 3.0 / 16.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_stats_zero_capacity() {
        let stats = RingStats {
            capacity: 0,
            occupied: 0,
            newest_tick: Some(5),
        };
        assert_eq!(stats.window_start(), Some(5));
        assert_eq!(stats.fill_ratio(), 0.0);
    }
}
