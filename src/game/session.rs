use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::model::hand::{Hand, PerSide, Side};
use crate::model::track::{RhythmTrack, TrackLayout};
use crate::render::overlay;
use crate::traits::render::RenderCommand;

use super::calibration::{CalibrationPhase, Calibrator};
use super::cursor::RhythmCursor;
use super::error::SessionError;
use super::score::{CycleReport, Scorer};
use super::tap::{TapDetector, TapEdge, Threshold};

/// Edge-triggered user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Toggle camera capture and the frame loop.
    EnableCapture,
    BeginCalibration,
    ToggleTapTracking,
}

/// Everything the session needs from one captured frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub width: f64,
    pub height: f64,
    pub hands: &'a [Hand],
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    CalibrationStarted,
    CalibrationCompleted { left: Threshold, right: Threshold },
    Tapped { side: Side, time_us: i64 },
    CycleCompleted(CycleReport),
    MetronomePulse { cycle: u64 },
}

/// Result of one [`Session::advance`] step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutput {
    pub commands: Vec<RenderCommand>,
    pub events: Vec<SessionEvent>,
}

/// All per-session state: calibration, taps, cursor and scores.
///
/// Mutated only through [`Session::apply`] and [`Session::advance`], both
/// called from the single frame loop.
pub struct Session {
    config: SessionConfig,
    track: RhythmTrack,
    layout: Option<TrackLayout>,
    detector_ready: bool,
    capturing: bool,
    tracking: bool,
    calibrator: Calibrator,
    taps: PerSide<TapDetector>,
    cursor: RhythmCursor,
    scorer: Scorer,
    last_report: Option<CycleReport>,
    pending: Vec<SessionEvent>,
}

impl Session {
    pub fn new(config: SessionConfig, track: RhythmTrack) -> Self {
        let calibrator = Calibrator::new(
            config.calibration_duration_us(),
            config.threshold_multiplier,
        );
        let cursor = RhythmCursor::new(config.cycle_period_us());
        Self {
            config,
            track,
            layout: None,
            detector_ready: false,
            capturing: false,
            tracking: false,
            calibrator,
            taps: PerSide::default(),
            cursor,
            scorer: Scorer::new(),
            last_report: None,
            pending: Vec::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn set_detector_ready(&mut self, ready: bool) {
        self.detector_ready = ready;
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn calibration_phase(&self) -> CalibrationPhase {
        self.calibrator.phase()
    }

    /// Thresholds, once calibration has completed.
    pub fn thresholds(&self) -> Option<&PerSide<Threshold>> {
        self.calibrator.thresholds()
    }

    pub fn is_tapped(&self, side: Side) -> bool {
        self.taps.get(side).is_tapped()
    }

    pub fn last_report(&self) -> Option<&CycleReport> {
        self.last_report.as_ref()
    }

    pub fn capture_label(&self) -> &'static str {
        if self.capturing {
            "DISABLE PREDICTIONS"
        } else {
            "ENABLE PREDICTIONS"
        }
    }

    pub fn tracking_label(&self) -> &'static str {
        if self.tracking {
            "STOP TRACKING"
        } else {
            "TRACK TAPS"
        }
    }

    /// "left accuracy: 87.5%", or "--" before the first cycle report.
    pub fn accuracy_label(&self, side: Side) -> String {
        match &self.last_report {
            Some(report) => format!("{} accuracy: {}", side.label(), report.get(side)),
            None => format!("{} accuracy: --", side.label()),
        }
    }

    /// Handle a user command. On error nothing changes.
    pub fn apply(&mut self, command: Command, now_us: i64) -> Result<(), SessionError> {
        let result = match command {
            Command::EnableCapture => self.toggle_capture(),
            Command::BeginCalibration => self.begin_calibration(now_us),
            Command::ToggleTapTracking => self.toggle_tracking(),
        };
        if let Err(e) = &result {
            warn!(?command, "command rejected: {e}");
        }
        result
    }

    fn toggle_capture(&mut self) -> Result<(), SessionError> {
        if !self.detector_ready {
            return Err(SessionError::DetectorNotReady);
        }
        self.capturing = !self.capturing;
        if !self.capturing {
            self.cursor.stop();
            self.scorer.reset();
        }
        info!(capturing = self.capturing, "capture toggled");
        Ok(())
    }

    fn begin_calibration(&mut self, now_us: i64) -> Result<(), SessionError> {
        if !self.capturing {
            return Err(SessionError::CaptureNotRunning);
        }
        self.calibrator.begin(now_us);
        self.taps.left.reset();
        self.taps.right.reset();
        self.pending.push(SessionEvent::CalibrationStarted);
        Ok(())
    }

    fn toggle_tracking(&mut self) -> Result<(), SessionError> {
        if !self.tracking {
            if !self.capturing {
                return Err(SessionError::CaptureNotRunning);
            }
            let Some(thresholds) = self.calibrator.thresholds() else {
                return Err(SessionError::CalibrationIncomplete);
            };
            if !Side::ALL.iter().any(|&side| thresholds.get(side).is_calibrated()) {
                return Err(SessionError::NoCalibratedHand);
            }
        }
        self.tracking = !self.tracking;
        self.taps.left.reset();
        self.taps.right.reset();
        self.scorer.reset();
        info!(tracking = self.tracking, "tap tracking toggled");
        Ok(())
    }

    /// Layout for the current frame width, rebuilt when the width changes.
    fn layout_for(&mut self, width: f64) -> &TrackLayout {
        let layout = match self.layout.take() {
            Some(layout) if layout.frame_width() == width => layout,
            _ => TrackLayout::new(
                &self.track,
                width,
                self.config.bar_fraction,
                self.config.rest_split,
            ),
        };
        self.layout.insert(layout)
    }

    /// Run one frame: calibration, tap detection, cursor, scoring, drawing.
    pub fn advance(&mut self, frame: &FrameInput<'_>, now_us: i64) -> FrameOutput {
        let mut out = FrameOutput {
            commands: Vec::new(),
            events: std::mem::take(&mut self.pending),
        };
        if !self.capturing {
            return out;
        }

        let mirrored = self.config.mirror_handedness;
        let pinches: Vec<(Side, f64)> = frame
            .hands
            .iter()
            .map(|hand| {
                (
                    Side::from_handedness(hand.handedness, mirrored),
                    hand.pinch_distance(),
                )
            })
            .collect();

        if let Some(thresholds) = self.calibrator.update(now_us, pinches.iter().copied()) {
            out.events.push(SessionEvent::CalibrationCompleted {
                left: thresholds.left,
                right: thresholds.right,
            });
        }

        // Sides with a detected hand and a usable threshold this frame.
        let mut scored = PerSide::new(false, false);
        if self.tracking {
            if let Some(thresholds) = self.calibrator.thresholds().copied() {
                for &(side, distance) in &pinches {
                    let Some(threshold) = thresholds.get(side).value() else {
                        continue;
                    };
                    match self.taps.get_mut(side).update(distance, threshold) {
                        TapEdge::Pressed => {
                            debug!(side = side.label(), now_us, "tapped");
                            out.events.push(SessionEvent::Tapped {
                                side,
                                time_us: now_us,
                            });
                        }
                        TapEdge::Released => debug!(side = side.label(), now_us, "released"),
                        TapEdge::None => {}
                    }
                    *scored.get_mut(side) = true;
                }
            }
        }

        let tick = self.cursor.tick(now_us, frame.width);
        if tick.looped {
            let cycle = self.cursor.cycles();
            let report = self.scorer.flush(cycle);
            info!(
                cycle,
                left = %report.left,
                right = %report.right,
                "cycle complete"
            );
            self.last_report = Some(report);
            out.events.push(SessionEvent::CycleCompleted(report));
            out.events.push(SessionEvent::MetronomePulse { cycle });
        }

        let expected = self
            .layout_for(frame.width)
            .zone_at(tick.position)
            .map(|zone| zone.kind.expects_tap());
        if let Some(expected) = expected {
            for side in Side::ALL {
                if *scored.get(side) {
                    let tapped = self.taps.get(side).is_tapped();
                    self.scorer.score(side, tapped, expected);
                }
            }
        }

        out.commands.push(RenderCommand::Clear);
        let layout = self.layout_for(frame.width);
        overlay::draw_track(&mut out.commands, layout, frame.height);
        overlay::draw_cursor(&mut out.commands, tick.position, frame.height);
        overlay::draw_hands(&mut out.commands, frame.hands, frame.width, frame.height);
        out
    }

    /// Accumulated (hits, total) for the cycle in progress.
    pub fn current_score(&self, side: Side) -> (u64, u64) {
        let acc = self.scorer.accumulator(side);
        (acc.hits(), acc.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::score::Accuracy;
    use crate::model::hand::Handedness;
    use crate::model::hand::test_hands::pinch_hand;

    const MS: i64 = 1_000;

    fn session(track: &[i32]) -> Session {
        let config = SessionConfig {
            mirror_handedness: false,
            ..Default::default()
        };
        let mut session = Session::new(config, RhythmTrack::new(track.to_vec()).unwrap());
        session.set_detector_ready(true);
        session
    }

    fn frame(hands: &[Hand]) -> FrameInput<'_> {
        FrameInput {
            width: 800.0,
            height: 600.0,
            hands,
        }
    }

    /// Calibrate the left hand at a pinch gap of 0.2 (threshold 0.01).
    fn calibrated(track: &[i32]) -> Session {
        let mut s = session(track);
        s.apply(Command::EnableCapture, 0).unwrap();
        s.apply(Command::BeginCalibration, 0).unwrap();
        let open = [pinch_hand(Handedness::Left, 0.2)];
        s.advance(&frame(&open), 0);
        s.advance(&frame(&open), 5000 * MS);
        s
    }

    #[test]
    fn commands_rejected_until_ready() {
        let mut s = Session::new(SessionConfig::default(), RhythmTrack::new(vec![4]).unwrap());
        assert_eq!(
            s.apply(Command::EnableCapture, 0),
            Err(SessionError::DetectorNotReady)
        );
        assert!(!s.is_capturing());

        s.set_detector_ready(true);
        assert_eq!(
            s.apply(Command::BeginCalibration, 0),
            Err(SessionError::CaptureNotRunning)
        );
        assert_eq!(s.calibration_phase(), CalibrationPhase::Idle);
    }

    #[test]
    fn capture_toggles_with_labels() {
        let mut s = session(&[4]);
        assert_eq!(s.capture_label(), "ENABLE PREDICTIONS");
        s.apply(Command::EnableCapture, 0).unwrap();
        assert_eq!(s.capture_label(), "DISABLE PREDICTIONS");
        s.apply(Command::EnableCapture, 0).unwrap();
        assert!(!s.is_capturing());
        assert!(s.advance(&frame(&[]), 10).commands.is_empty());
    }

    #[test]
    fn tracking_requires_completed_calibration() {
        let mut s = session(&[4]);
        s.apply(Command::EnableCapture, 0).unwrap();
        assert_eq!(
            s.apply(Command::ToggleTapTracking, 0),
            Err(SessionError::CalibrationIncomplete)
        );
        assert!(!s.is_tracking());
        assert_eq!(s.tracking_label(), "TRACK TAPS");
    }

    #[test]
    fn tracking_rejected_while_capture_off() {
        let mut s = calibrated(&[4]);
        s.apply(Command::EnableCapture, 5000 * MS).unwrap();
        assert!(!s.is_capturing());
        assert_eq!(
            s.apply(Command::ToggleTapTracking, 5000 * MS),
            Err(SessionError::CaptureNotRunning)
        );
        assert!(!s.is_tracking());
    }

    #[test]
    fn tracking_rejected_when_calibration_saw_no_hands() {
        let mut s = session(&[4]);
        s.apply(Command::EnableCapture, 0).unwrap();
        s.apply(Command::BeginCalibration, 0).unwrap();
        s.advance(&frame(&[]), 0);
        s.advance(&frame(&[]), 5000 * MS);
        assert_eq!(s.calibration_phase(), CalibrationPhase::Complete);

        assert_eq!(
            s.apply(Command::ToggleTapTracking, 5000 * MS),
            Err(SessionError::NoCalibratedHand)
        );
        assert!(!s.is_tracking());
    }

    #[test]
    fn each_hand_uses_its_own_threshold() {
        let mut s = session(&[1]);
        s.apply(Command::EnableCapture, 0).unwrap();
        s.apply(Command::BeginCalibration, 0).unwrap();
        // Left: 0.2² × 0.25 = 0.01; right: 0.4² × 0.25 = 0.04.
        let open = [
            pinch_hand(Handedness::Left, 0.2),
            pinch_hand(Handedness::Right, 0.4),
        ];
        s.advance(&frame(&open), 0);
        s.advance(&frame(&open), 5000 * MS);
        s.apply(Command::ToggleTapTracking, 5000 * MS).unwrap();

        // 0.15² = 0.0225: above the left threshold, below the right one.
        let half = [
            pinch_hand(Handedness::Left, 0.15),
            pinch_hand(Handedness::Right, 0.15),
        ];
        let out = s.advance(&frame(&half), 5100 * MS);
        assert!(!s.is_tapped(Side::Left));
        assert!(s.is_tapped(Side::Right));
        assert_eq!(
            out.events,
            vec![SessionEvent::Tapped {
                side: Side::Right,
                time_us: 5100 * MS
            }]
        );
        assert_eq!(s.current_score(Side::Left), (0, 1));
        assert_eq!(s.current_score(Side::Right), (1, 1));
    }

    #[test]
    fn calibration_events() {
        let mut s = session(&[4]);
        s.apply(Command::EnableCapture, 0).unwrap();
        s.apply(Command::BeginCalibration, 0).unwrap();
        let hands = [pinch_hand(Handedness::Left, 0.2)];
        let out = s.advance(&frame(&hands), 0);
        assert_eq!(out.events, vec![SessionEvent::CalibrationStarted]);

        let out = s.advance(&frame(&hands), 5000 * MS);
        match out.events.as_slice() {
            [SessionEvent::CalibrationCompleted { left, right }] => {
                let left = left.value().unwrap();
                assert!((left - 0.04 * 0.25).abs() < 1e-12);
                assert_eq!(*right, Threshold::Uncalibrated);
            }
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[test]
    fn pinch_taps_and_releases() {
        let mut s = calibrated(&[4]);
        s.apply(Command::ToggleTapTracking, 5000 * MS).unwrap();
        assert_eq!(s.tracking_label(), "STOP TRACKING");

        let pinched = [pinch_hand(Handedness::Left, 0.05)];
        let out = s.advance(&frame(&pinched), 5100 * MS);
        assert!(out.events.contains(&SessionEvent::Tapped {
            side: Side::Left,
            time_us: 5100 * MS
        }));
        assert!(s.is_tapped(Side::Left));
        assert!(!s.is_tapped(Side::Right));

        let open = [pinch_hand(Handedness::Left, 0.2)];
        s.advance(&frame(&open), 5200 * MS);
        assert!(!s.is_tapped(Side::Left));
    }

    #[test]
    fn mirrored_label_drives_opposite_side() {
        let config = SessionConfig::default();
        assert!(config.mirror_handedness);
        let mut s = Session::new(config, RhythmTrack::new(vec![4]).unwrap());
        s.set_detector_ready(true);
        s.apply(Command::EnableCapture, 0).unwrap();
        s.apply(Command::BeginCalibration, 0).unwrap();
        let hands = [pinch_hand(Handedness::Left, 0.2)];
        s.advance(&frame(&hands), 0);
        s.advance(&frame(&hands), 5000 * MS);
        let thresholds = s.thresholds().unwrap();
        assert!(thresholds.right.is_calibrated());
        assert!(!thresholds.left.is_calibrated());
    }

    #[test]
    fn frames_inside_zone_are_scored_continuously() {
        // Whole frame is one note zone.
        let mut s = calibrated(&[1]);
        s.apply(Command::ToggleTapTracking, 5000 * MS).unwrap();
        let pinched = [pinch_hand(Handedness::Left, 0.05)];
        for i in 0..10 {
            s.advance(&frame(&pinched), 5000 * MS + i * 16 * MS);
        }
        assert_eq!(s.current_score(Side::Left), (10, 10));
        assert_eq!(s.current_score(Side::Right), (0, 0));
    }

    #[test]
    fn loop_flushes_report_and_pulses() {
        let mut s = calibrated(&[1]);
        s.apply(Command::ToggleTapTracking, 5000 * MS).unwrap();
        // Cursor started on the first captured frame at t=0.
        let open = [pinch_hand(Handedness::Left, 0.2)];
        s.advance(&frame(&open), 6000 * MS);
        s.advance(&frame(&open), 7000 * MS);
        let out = s.advance(&frame(&open), 8001 * MS);

        let report = CycleReport {
            cycle: 1,
            left: Accuracy::Ratio(0.0),
            right: Accuracy::NoData,
        };
        assert!(out.events.contains(&SessionEvent::CycleCompleted(report)));
        assert!(out.events.contains(&SessionEvent::MetronomePulse { cycle: 1 }));
        assert_eq!(s.accuracy_label(Side::Left), "left accuracy: 0.0%");
        assert_eq!(s.accuracy_label(Side::Right), "right accuracy: --");
        // The loop frame itself is scored into the new cycle.
        assert_eq!(s.current_score(Side::Left), (0, 1));
    }

    #[test]
    fn frame_draws_track_cursor_and_hands() {
        let mut s = session(&[2, -2]);
        s.apply(Command::EnableCapture, 0).unwrap();
        let hands = [pinch_hand(Handedness::Right, 0.1)];
        let out = s.advance(&frame(&hands), 0);
        assert_eq!(out.commands[0], RenderCommand::Clear);
        // Clear + 3 zones + cursor + 21 connectors + 21 dots.
        assert_eq!(out.commands.len(), 1 + 3 + 1 + 21 + 21);
    }
}
