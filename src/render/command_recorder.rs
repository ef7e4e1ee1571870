use anyhow::{Result, bail};

use crate::traits::render::{RenderBackend, RenderCommand};

/// Commands drawn during one frame, with the surface size they targeted.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFrame {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<RenderCommand>,
}

/// A RenderBackend that records draw commands instead of drawing.
/// Does not require a display surface.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    frames: Vec<RecordedFrame>,
    open: Option<RecordedFrame>,
    /// Keep only the most recent frames; `None` keeps everything.
    capacity: Option<usize>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder that retains at most `capacity` finished frames.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// Get all finished frames, oldest first.
    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&RecordedFrame> {
        self.frames.last()
    }

    /// Clear recorded frames.
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl RenderBackend for CommandRecorder {
    fn begin_frame(&mut self, width: f64, height: f64) -> Result<()> {
        if self.open.is_some() {
            bail!("begin_frame called while a frame is already open");
        }
        self.open = Some(RecordedFrame {
            width,
            height,
            commands: Vec::new(),
        });
        Ok(())
    }

    fn draw(&mut self, command: &RenderCommand) -> Result<()> {
        match &mut self.open {
            Some(frame) => {
                frame.commands.push(command.clone());
                Ok(())
            }
            None => bail!("draw called outside begin_frame/end_frame"),
        }
    }

    fn end_frame(&mut self) -> Result<()> {
        let Some(frame) = self.open.take() else {
            bail!("end_frame called without begin_frame");
        };
        self.frames.push(frame);
        if let Some(capacity) = self.capacity {
            if self.frames.len() > capacity {
                let excess = self.frames.len() - capacity;
                self.frames.drain(..excess);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_commands_per_frame() {
        let mut recorder = CommandRecorder::new();
        recorder.begin_frame(640.0, 480.0).unwrap();
        recorder.draw(&RenderCommand::Clear).unwrap();
        recorder.end_frame().unwrap();

        let frame = recorder.last_frame().unwrap();
        assert_eq!(frame.width, 640.0);
        assert_eq!(frame.commands, vec![RenderCommand::Clear]);
    }

    #[test]
    fn draw_outside_frame_fails() {
        let mut recorder = CommandRecorder::new();
        assert!(recorder.draw(&RenderCommand::Clear).is_err());
        assert!(recorder.end_frame().is_err());
    }

    #[test]
    fn capacity_drops_oldest_frames() {
        let mut recorder = CommandRecorder::with_capacity(2);
        for i in 0..5 {
            recorder.begin_frame(f64::from(i), 1.0).unwrap();
            recorder.end_frame().unwrap();
        }
        let widths: Vec<f64> = recorder.frames().iter().map(|f| f.width).collect();
        assert_eq!(widths, vec![3.0, 4.0]);
    }
}
