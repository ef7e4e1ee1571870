use crate::model::hand::{HAND_CONNECTIONS, Hand, Landmark};
use crate::model::track::{TrackLayout, ZoneKind};
use crate::traits::render::{Color, Point, RenderCommand};

const CONNECTOR_WIDTH: f32 = 5.0;
const LANDMARK_WIDTH: f32 = 2.0;
const CURSOR_WIDTH: f32 = 2.0;

/// Vertical band the track occupies, as fractions of frame height.
const TRACK_TOP: f64 = 0.85;
const TRACK_HEIGHT: f64 = 0.1;
/// Horizontal gap left between adjacent zones, in pixels.
const ZONE_GAP: f64 = 1.0;

const NOTE_COLOR: Color = Color::new(0.2, 0.6, 1.0, 0.8);
const REST_COLOR: Color = Color::new(0.4, 0.4, 0.4, 0.6);
const PICKUP_COLOR: Color = Color::new(1.0, 0.8, 0.2, 0.8);

fn to_pixels(landmark: &Landmark, width: f64, height: f64) -> Point {
    Point::new(landmark.x * width, landmark.y * height)
}

/// Skeleton connectors and landmark dots for every hand.
pub fn draw_hands(out: &mut Vec<RenderCommand>, hands: &[Hand], width: f64, height: f64) {
    for hand in hands {
        for (a, b) in HAND_CONNECTIONS {
            out.push(RenderCommand::Line {
                from: to_pixels(&hand.landmarks[a], width, height),
                to: to_pixels(&hand.landmarks[b], width, height),
                color: Color::GREEN,
                width: CONNECTOR_WIDTH,
            });
        }
        for landmark in &hand.landmarks {
            out.push(RenderCommand::Dot {
                at: to_pixels(landmark, width, height),
                color: Color::RED,
                width: LANDMARK_WIDTH,
            });
        }
    }
}

fn zone_color(kind: ZoneKind) -> Color {
    match kind {
        ZoneKind::Note => NOTE_COLOR,
        ZoneKind::Rest => REST_COLOR,
        ZoneKind::Pickup => PICKUP_COLOR,
    }
}

/// One rectangle per zone along the bottom of the frame.
pub fn draw_track(out: &mut Vec<RenderCommand>, layout: &TrackLayout, height: f64) {
    let y = height * TRACK_TOP;
    let h = height * TRACK_HEIGHT;
    for zone in layout.zones() {
        out.push(RenderCommand::Rect {
            x: zone.start,
            y,
            w: (zone.width() - ZONE_GAP).max(0.0),
            h,
            color: zone_color(zone.kind),
        });
    }
}

/// Full-height vertical line at the cursor.
pub fn draw_cursor(out: &mut Vec<RenderCommand>, position: f64, height: f64) {
    out.push(RenderCommand::Line {
        from: Point::new(position, 0.0),
        to: Point::new(position, height),
        color: Color::WHITE,
        width: CURSOR_WIDTH,
    });
}
