use std::fs;
use std::path::Path;

use super::error::TrackError;

/// Ordered note/rest divisions of one rhythm bar.
///
/// A positive entry `n` is a note spanning `1/n` of the bar; a negative entry
/// is a rest of the same span, ending in a short pickup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RhythmTrack {
    entries: Vec<i32>,
}

impl RhythmTrack {
    pub fn new(entries: Vec<i32>) -> Result<Self, TrackError> {
        if entries.is_empty() {
            return Err(TrackError::Empty);
        }
        if let Some(index) = entries.iter().position(|&n| n == 0) {
            return Err(TrackError::ZeroEntry { index });
        }
        Ok(Self { entries })
    }

    /// Parse whitespace/newline separated signed integers.
    pub fn parse(text: &str) -> Result<Self, TrackError> {
        let mut entries = Vec::new();
        for (line_idx, line) in text.lines().enumerate() {
            for token in line.split_whitespace() {
                let value = token
                    .parse::<i32>()
                    .map_err(|_| TrackError::InvalidToken {
                        line: line_idx + 1,
                        token: token.to_string(),
                    })?;
                entries.push(value);
            }
        }
        Self::new(entries)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TrackError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| TrackError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn entries(&self) -> &[i32] {
        &self.entries
    }
}

/// What the player is expected to do while the cursor is inside a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneKind {
    Note,
    Rest,
    Pickup,
}

impl ZoneKind {
    pub fn expects_tap(self) -> bool {
        match self {
            ZoneKind::Note | ZoneKind::Pickup => true,
            ZoneKind::Rest => false,
        }
    }
}

/// Horizontal span `[start, end)` of the track in frame pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub kind: ZoneKind,
    pub start: f64,
    pub end: f64,
    /// Index of the track entry this zone belongs to.
    pub segment: usize,
}

impl Zone {
    pub fn contains(&self, x: f64) -> bool {
        self.start <= x && x < self.end
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Track entries laid out left to right across a frame of a given width.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackLayout {
    frame_width: f64,
    zones: Vec<Zone>,
}

impl TrackLayout {
    /// `bar_fraction` is the share of the frame one whole bar occupies;
    /// `rest_split` is the silent share of each rest segment.
    pub fn new(track: &RhythmTrack, frame_width: f64, bar_fraction: f64, rest_split: f64) -> Self {
        let bar_width = frame_width * bar_fraction;
        let mut zones = Vec::with_capacity(track.entries.len() * 2);
        let mut x = 0.0;

        for (segment, &n) in track.entries.iter().enumerate() {
            let width = bar_width / f64::from(n.unsigned_abs());
            let end = x + width;
            if n > 0 {
                zones.push(Zone {
                    kind: ZoneKind::Note,
                    start: x,
                    end,
                    segment,
                });
            } else {
                let split = x + width * rest_split;
                zones.push(Zone {
                    kind: ZoneKind::Rest,
                    start: x,
                    end: split,
                    segment,
                });
                zones.push(Zone {
                    kind: ZoneKind::Pickup,
                    start: split,
                    end,
                    segment,
                });
            }
            x = end;
        }

        Self { frame_width, zones }
    }

    pub fn frame_width(&self) -> f64 {
        self.frame_width
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Zone under the cursor, if the cursor is over the track at all.
    pub fn zone_at(&self, x: f64) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.contains(x))
    }
}
