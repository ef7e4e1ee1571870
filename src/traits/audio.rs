use anyhow::Result;

/// Receives the audible pulse fired on every rhythm-cycle loop.
pub trait Metronome {
    /// `cycle` is the 1-based index of the cycle that just ended.
    fn pulse(&mut self, cycle: u64) -> Result<()>;
}

/// Metronome that only counts pulses. Used for headless replay and tests.
#[derive(Debug, Default)]
pub struct PulseCounter {
    pulses: Vec<u64>,
}

impl PulseCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pulses(&self) -> &[u64] {
        &self.pulses
    }
}

impl Metronome for PulseCounter {
    fn pulse(&mut self, cycle: u64) -> Result<()> {
        self.pulses.push(cycle);
        Ok(())
    }
}
