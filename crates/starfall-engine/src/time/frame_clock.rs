use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time since the clock was created.
    pub elapsed: Duration,

    /// Monotonic frame counter, starting at 0.
    pub frame_index: u64,
}

impl FrameTime {
    /// Elapsed time in milliseconds, the unit animation curves are written in.
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Frame clock producing `FrameTime` snapshots.
#[derive(Debug, Clone)]
pub struct FrameClock {
    origin: Instant,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            frame_index: 0,
        }
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let ft = FrameTime {
            elapsed: now.saturating_duration_since(self.origin),
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_index_counts_ticks() {
        let mut clock = FrameClock::new();
        let start = clock.origin;
        assert_eq!(clock.tick_at(start).frame_index, 0);
        assert_eq!(clock.tick_at(start).frame_index, 1);
    }

    #[test]
    fn elapsed_is_measured_from_origin() {
        let mut clock = FrameClock::new();
        let start = clock.origin;
        let ft = clock.tick_at(start + Duration::from_secs(2));
        assert!((ft.elapsed_ms() - 2000.0).abs() < 1e-6);
    }

    #[test]
    fn elapsed_never_goes_negative() {
        let mut clock = FrameClock::new();
        let Some(before) = clock.origin.checked_sub(Duration::from_millis(5)) else { return };
        assert_eq!(clock.tick_at(before).elapsed, Duration::ZERO);
    }
}
