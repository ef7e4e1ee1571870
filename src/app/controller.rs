use anyhow::Result;
use tracing::{debug, info};

use crate::game::{Command, CycleReport, FrameInput, Session, SessionError, SessionEvent};
use crate::model::hand::Hand;
use crate::traits::audio::Metronome;
use crate::traits::pose::{PoseSource, VideoFrame};
use crate::traits::render::RenderBackend;
use crate::traits::time::TimeProvider;

/// Something that happens to the frame loop at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Frame(VideoFrame),
    Command(Command),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedInput {
    pub time_us: i64,
    pub input: Input,
}

/// Drives a [`Session`] from captured frames and user commands.
///
/// Owns the collaborators the session itself never touches: the detector,
/// the drawing surface and the metronome.
pub struct Controller<P, R, M> {
    session: Session,
    pose: P,
    renderer: R,
    metronome: M,
    last_video_time: Option<f64>,
    last_hands: Vec<Hand>,
    reports: Vec<CycleReport>,
    rejected: Vec<SessionError>,
}

impl<P, R, M> Controller<P, R, M>
where
    P: PoseSource,
    R: RenderBackend,
    M: Metronome,
{
    pub fn new(session: Session, pose: P, renderer: R, metronome: M) -> Self {
        Self {
            session,
            pose,
            renderer,
            metronome,
            last_video_time: None,
            last_hands: Vec::new(),
            reports: Vec::new(),
            rejected: Vec::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn pose(&self) -> &P {
        &self.pose
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn metronome(&self) -> &M {
        &self.metronome
    }

    /// Cycle reports in the order they were emitted.
    pub fn reports(&self) -> &[CycleReport] {
        &self.reports
    }

    /// Commands the session refused.
    pub fn rejected(&self) -> &[SessionError] {
        &self.rejected
    }

    /// Forward a user command. Rejections are recorded, not fatal.
    pub fn command(&mut self, command: Command, now_us: i64) -> Result<(), SessionError> {
        self.session.set_detector_ready(self.pose.is_ready());
        let result = self.session.apply(command, now_us);
        if let Err(e) = result {
            self.rejected.push(e);
        }
        result
    }

    /// Process one captured frame.
    ///
    /// A frame whose video time matches the previous one reuses the previous
    /// detection instead of running the detector again.
    pub fn frame(&mut self, frame: &VideoFrame, now_us: i64) -> Result<()> {
        if !self.session.is_capturing() {
            return Ok(());
        }

        if self.last_video_time != Some(frame.video_time) {
            self.last_video_time = Some(frame.video_time);
            let max_hands = self.session.config().max_hands;
            self.last_hands = self.pose.detect(frame, now_us, max_hands)?;
        } else {
            debug!(video_time = frame.video_time, "duplicate frame, reusing detection");
        }

        let input = FrameInput {
            width: frame.width,
            height: frame.height,
            hands: &self.last_hands,
        };
        let output = self.session.advance(&input, now_us);

        self.renderer.begin_frame(frame.width, frame.height)?;
        for command in &output.commands {
            self.renderer.draw(command)?;
        }
        self.renderer.end_frame()?;

        for event in output.events {
            match event {
                SessionEvent::CycleCompleted(report) => self.reports.push(report),
                SessionEvent::MetronomePulse { cycle } => self.metronome.pulse(cycle)?,
                _ => {}
            }
        }
        Ok(())
    }

    /// Feed a timeline of inputs, waiting on `clock` until each is due.
    pub fn run<I, T>(&mut self, inputs: I, clock: &T) -> Result<()>
    where
        I: IntoIterator<Item = TimedInput>,
        T: TimeProvider + ?Sized,
    {
        let mut frames = 0usize;
        for timed in inputs {
            clock.wait_until(timed.time_us);
            let now_us = clock.now_us();
            match timed.input {
                Input::Command(command) => {
                    // Rejections are logged by the session and kept in `rejected`.
                    let _ = self.command(command, now_us);
                }
                Input::Frame(frame) => {
                    self.frame(&frame, now_us)?;
                    frames += 1;
                }
            }
        }
        info!(
            frames,
            cycles = self.reports.len(),
            rejected = self.rejected.len(),
            "input timeline finished"
        );
        Ok(())
    }
}
