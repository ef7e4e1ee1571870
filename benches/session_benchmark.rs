use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pinch_rhythm::config::SessionConfig;
use pinch_rhythm::game::{Command, FrameInput, Session};
use pinch_rhythm::model::{Hand, Handedness, LANDMARK_COUNT, Landmark, RhythmTrack};

const FRAME_US: i64 = 16_667;

fn hand(handedness: Handedness, gap: f64) -> Hand {
    let mut points = [Landmark::new(0.5, 0.5); LANDMARK_COUNT];
    points[8] = Landmark::new(0.5 + gap, 0.5);
    Hand::new(points, handedness)
}

/// A capturing, tracking session calibrated on `hands`, and the time of its
/// next frame.
fn tracking_session(hands: &[Hand]) -> (Session, i64) {
    let track = RhythmTrack::new(vec![4, 8, 8, -4, 4, 16, 16, -8, 8]).unwrap();
    let mut session = Session::new(SessionConfig::default(), track);
    session.set_detector_ready(true);
    session.apply(Command::EnableCapture, 0).unwrap();
    session.apply(Command::BeginCalibration, 0).unwrap();

    let frame = FrameInput {
        width: 1280.0,
        height: 720.0,
        hands,
    };
    let mut t = 0;
    while session.thresholds().is_none() {
        session.advance(&frame, t);
        t += FRAME_US;
    }
    session.apply(Command::ToggleTapTracking, t).unwrap();
    (session, t)
}

fn advance_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_advance");

    let two_hands = [hand(Handedness::Left, 0.2), hand(Handedness::Right, 0.2)];
    group.bench_function("two_hands_tracking", |b| {
        let (mut session, mut t) = tracking_session(&two_hands);
        let frame = FrameInput {
            width: 1280.0,
            height: 720.0,
            hands: &two_hands,
        };
        b.iter(|| {
            t += FRAME_US;
            black_box(session.advance(black_box(&frame), t));
        });
    });

    group.bench_function("no_hands", |b| {
        let (mut session, mut t) = tracking_session(&two_hands);
        let frame = FrameInput {
            width: 1280.0,
            height: 720.0,
            hands: &[],
        };
        b.iter(|| {
            t += FRAME_US;
            black_box(session.advance(black_box(&frame), t));
        });
    });

    group.finish();
}

fn layout_benchmark(c: &mut Criterion) {
    let track = RhythmTrack::new(vec![4, 8, 8, -4, 4, 16, 16, -8, 8]).unwrap();
    c.bench_function("track_layout_zone_at", |b| {
        let layout = pinch_rhythm::model::TrackLayout::new(&track, 1280.0, 1.0, 0.8);
        let mut x = 0.0;
        b.iter(|| {
            black_box(layout.zone_at(black_box(x)));
            x = (x + 7.3) % 1280.0;
        });
    });
}

criterion_group!(benches, advance_benchmark, layout_benchmark);
criterion_main!(benches);
