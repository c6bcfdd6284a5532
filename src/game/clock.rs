//! Fixed-interval clock pacing automaton generations

use crate::config::DEFAULT_CELL_UPDATE_INTERVAL_MS;

/// Accumulates frame time and reports how many fixed intervals have passed
#[derive(Debug, Clone, PartialEq)]
pub struct CellClock {
    interval_ms: f32,
    elapsed_ms: f32,
}

impl CellClock {
    /// Panics unless `interval_ms` is positive.
    pub fn new(interval_ms: f32) -> Self {
        assert!(interval_ms > 0.0, "Clock interval must be positive, got {}", interval_ms);
        Self {
            interval_ms,
            elapsed_ms: 0.0,
        }
    }

    /// Add `dt_ms` and return the number of whole intervals now complete.
    ///
    /// Leftover time carries into the next call.
    pub fn advance(&mut self, dt_ms: f32) -> u32 {
        self.elapsed_ms += dt_ms.max(0.0);
        let ticks = (self.elapsed_ms / self.interval_ms).floor();
        self.elapsed_ms -= ticks * self.interval_ms;
        ticks as u32
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
    }

    pub fn interval_ms(&self) -> f32 {
        self.interval_ms
    }

    /// Time accumulated toward the next interval
    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }
}

impl Default for CellClock {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_UPDATE_INTERVAL_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_until_interval() {
        let mut clock = CellClock::default();
        assert_eq!(clock.interval_ms(), 2100.0);
        assert_eq!(clock.advance(1000.0), 0);
        assert_eq!(clock.advance(1000.0), 0);
        assert_eq!(clock.advance(100.0), 1);
        assert_eq!(clock.elapsed_ms(), 0.0);
    }

    #[test]
    fn test_multiple_intervals_in_one_frame() {
        let mut clock = CellClock::new(100.0);
        assert_eq!(clock.advance(350.0), 3);
        assert_eq!(clock.elapsed_ms(), 50.0);
        assert_eq!(clock.advance(50.0), 1);
    }

    #[test]
    fn test_negative_dt_is_ignored() {
        let mut clock = CellClock::new(100.0);
        assert_eq!(clock.advance(-500.0), 0);
        assert_eq!(clock.elapsed_ms(), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut clock = CellClock::new(100.0);
        clock.advance(90.0);
        clock.reset();
        assert_eq!(clock.advance(20.0), 0);
    }

    #[test]
    #[should_panic]
    fn test_zero_interval_panics() {
        CellClock::new(0.0);
    }
}
