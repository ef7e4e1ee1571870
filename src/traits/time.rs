use std::cell::Cell;
use std::time::{Duration, Instant};

/// Clock the frame loop is scheduled against.
/// Implementations: SystemTimeProvider (wall clock), ManualTimeProvider (replay and testing).
pub trait TimeProvider {
    /// Current time in microseconds from an arbitrary epoch.
    fn now_us(&self) -> i64;

    /// Block (or jump) until `now_us() >= target_us`.
    fn wait_until(&self, target_us: i64);
}

/// Wall-clock time, measured from construction.
pub struct SystemTimeProvider {
    start: Instant,
}

impl SystemTimeProvider {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for SystemTimeProvider {
    fn now_us(&self) -> i64 {
        self.start.elapsed().as_micros() as i64
    }

    fn wait_until(&self, target_us: i64) {
        let remaining = target_us - self.now_us();
        if remaining > 0 {
            std::thread::sleep(Duration::from_micros(remaining as u64));
        }
    }
}

/// Time that only moves when told to. Never goes backwards.
#[derive(Default)]
pub struct ManualTimeProvider {
    current_us: Cell<i64>,
}

impl ManualTimeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, delta_us: i64) {
        self.current_us.set(self.current_us.get() + delta_us);
    }
}

impl TimeProvider for ManualTimeProvider {
    fn now_us(&self) -> i64 {
        self.current_us.get()
    }

    fn wait_until(&self, target_us: i64) {
        if target_us > self.current_us.get() {
            self.current_us.set(target_us);
        }
    }
}
