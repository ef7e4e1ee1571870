use serde::{Deserialize, Serialize};

/// Number of landmarks on a detected hand skeleton.
pub const LANDMARK_COUNT: usize = 21;

/// Landmark indices of the 21-point hand skeleton.
#[allow(dead_code)]
pub mod landmarks {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_MCP: usize = 5;
    pub const INDEX_FINGER_PIP: usize = 6;
    pub const INDEX_FINGER_DIP: usize = 7;
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const MIDDLE_FINGER_MCP: usize = 9;
    pub const MIDDLE_FINGER_PIP: usize = 10;
    pub const MIDDLE_FINGER_DIP: usize = 11;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_MCP: usize = 13;
    pub const RING_FINGER_PIP: usize = 14;
    pub const RING_FINGER_DIP: usize = 15;
    pub const RING_FINGER_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

/// Bone connections of the hand skeleton, as landmark index pairs.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    (0, 5),
    (5, 6),
    (6, 7),
    (7, 8),
    (5, 9),
    (9, 10),
    (10, 11),
    (11, 12),
    (9, 13),
    (13, 14),
    (14, 15),
    (15, 16),
    (13, 17),
    (0, 17),
    (17, 18),
    (18, 19),
    (19, 20),
];

/// A 2-D keypoint in normalized frame coordinates (0.0..=1.0).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
}

impl Landmark {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Classifier-assigned handedness label of a detected hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

/// Scoring/threshold bucket a hand is assigned to.
///
/// Kept distinct from [`Handedness`] because front-facing capture mirrors
/// the classifier's labels relative to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    /// Map a detected label to its bucket.
    /// With `mirrored`, a "Left" hand lands in the Right bucket and vice versa.
    pub fn from_handedness(handedness: Handedness, mirrored: bool) -> Self {
        match (handedness, mirrored) {
            (Handedness::Left, false) | (Handedness::Right, true) => Side::Left,
            (Handedness::Right, false) | (Handedness::Left, true) => Side::Right,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// One value per [`Side`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PerSide<T> {
    pub left: T,
    pub right: T,
}

impl<T> PerSide<T> {
    pub fn new(left: T, right: T) -> Self {
        Self { left, right }
    }

    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// One detected hand: 21 landmarks plus its handedness label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    pub landmarks: [Landmark; LANDMARK_COUNT],
    pub handedness: Handedness,
}

impl Hand {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT], handedness: Handedness) -> Self {
        Self {
            landmarks,
            handedness,
        }
    }

    /// Squared thumb-tip to index-tip distance: the tap signal.
    pub fn pinch_distance(&self) -> f64 {
        squared_distance(
            self,
            landmarks::THUMB_TIP,
            landmarks::INDEX_FINGER_TIP,
        )
    }
}

/// Squared Euclidean distance between two landmarks of `hand`.
///
/// Panics if either index is `>= LANDMARK_COUNT`.
pub fn squared_distance(hand: &Hand, a: usize, b: usize) -> f64 {
    let dx = hand.landmarks[a].x - hand.landmarks[b].x;
    let dy = hand.landmarks[a].y - hand.landmarks[b].y;
    dx * dx + dy * dy
}
