/// Cursor position for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorTick {
    /// Horizontal position in frame pixels, `0.0..=frame_width`.
    pub position: f64,
    /// Fraction of the current cycle elapsed.
    pub progress: f64,
    /// True on the frame that closed the previous cycle.
    pub looped: bool,
}

/// Sweeps across the frame once per cycle period, looping.
///
/// Position is always derived from wall-clock time, so it is independent of
/// frame rate.
#[derive(Debug, Clone)]
pub struct RhythmCursor {
    period_us: i64,
    cycle_start_us: Option<i64>,
    cycles: u64,
}

impl RhythmCursor {
    pub fn new(period_us: i64) -> Self {
        Self {
            period_us,
            cycle_start_us: None,
            cycles: 0,
        }
    }

    /// Number of completed cycles.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn is_running(&self) -> bool {
        self.cycle_start_us.is_some()
    }

    pub fn start(&mut self, now_us: i64) {
        self.cycle_start_us = Some(now_us);
    }

    pub fn stop(&mut self) {
        self.cycle_start_us = None;
    }

    /// Progress through the cycle at `now_us`. The first tick starts the cycle.
    pub fn tick(&mut self, now_us: i64, frame_width: f64) -> CursorTick {
        let start = *self.cycle_start_us.get_or_insert(now_us);
        let mut progress = (now_us - start) as f64 / self.period_us as f64;
        let mut looped = false;

        if progress > 1.0 {
            self.cycle_start_us = Some(now_us);
            self.cycles += 1;
            progress = 0.0;
            looped = true;
        }

        CursorTick {
            position: frame_width * progress,
            progress,
            looped,
        }
    }
}
