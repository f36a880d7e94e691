// Landmark data delivered by the pose detector
//
// Coordinates are normalized to the frame: x grows to the right, y grows
// downwards, both in [0, 1]. A landmark the detector did not place comes
// through as (0, 0).

use glam::Vec2;
use serde::Deserialize;

/// A single body point with the detector's confidence in it
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    /// Detector confidence in [0, 1]
    pub visibility: f32,
}

impl Landmark {
    /// Position as a vector
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Whether the detector is confident enough in this point
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.visibility >= threshold
    }

    /// Whether the detector actually placed this point
    pub fn is_placed(&self) -> bool {
        self.position() != Vec2::ZERO
    }
}

/// Side of the body, from the tracked person's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// The landmarks of one tracked person in one frame
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackedBody {
    pub nose: Landmark,
    pub left_shoulder: Landmark,
    pub right_shoulder: Landmark,
    pub left_hip: Landmark,
    pub right_hip: Landmark,
    pub left_wrist: Landmark,
    pub right_wrist: Landmark,
}

impl TrackedBody {
    pub fn shoulder(&self, side: Side) -> &Landmark {
        match side {
            Side::Left => &self.left_shoulder,
            Side::Right => &self.right_shoulder,
        }
    }

    pub fn hip(&self, side: Side) -> &Landmark {
        match side {
            Side::Left => &self.left_hip,
            Side::Right => &self.right_hip,
        }
    }

    pub fn wrist(&self, side: Side) -> &Landmark {
        match side {
            Side::Left => &self.left_wrist,
            Side::Right => &self.right_wrist,
        }
    }

    /// The six limb and torso points the classifier depends on
    pub fn limbs(&self) -> [&Landmark; 6] {
        [
            &self.left_wrist,
            &self.right_wrist,
            &self.left_shoulder,
            &self.right_shoulder,
            &self.left_hip,
            &self.right_hip,
        ]
    }
}

/// Everything the detector reported for one captured frame
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PoseFrame {
    /// Capture time in milliseconds
    pub timestamp_ms: u64,
    /// One entry per tracked person
    #[serde(default)]
    pub bodies: Vec<TrackedBody>,
}
