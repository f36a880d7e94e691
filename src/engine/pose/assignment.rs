// Mapping tracked bodies to player slots

use super::landmark::{Landmark, TrackedBody};
use crate::core::config::GameMode;
use crate::core::math;
use std::fmt;

/// Horizontal split between the two players' halves of the frame
pub const FRAME_MIDLINE: f32 = 0.5;

/// A player position in the duel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSlot {
    /// Left half of the frame
    One,
    /// Right half of the frame
    Two,
}

impl PlayerSlot {
    pub const ALL: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    /// Zero-based index, for per-slot arrays
    pub fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }
}

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.index() + 1)
    }
}

/// Horizontal position used to place a body: the nose, else the shoulder midpoint
pub fn reference_x(body: &TrackedBody, presence_threshold: f32) -> Option<f32> {
    let usable = |landmark: &Landmark| {
        (landmark.is_visible(presence_threshold) && landmark.is_placed()).then_some(landmark.x)
    };

    usable(&body.nose)
        .or_else(|| math::mean_present(usable(&body.left_shoulder), usable(&body.right_shoulder)))
}

/// Decide which player a tracked body belongs to
///
/// With one player in front of the camera every body is player one.
pub fn assign_slot(body: &TrackedBody, mode: GameMode, presence_threshold: f32) -> Option<PlayerSlot> {
    match mode {
        GameMode::PlayerVsAi => Some(PlayerSlot::One),
        GameMode::TwoPlayer => {
            let x = reference_x(body, presence_threshold)?;
            Some(if x < FRAME_MIDLINE {
                PlayerSlot::One
            } else {
                PlayerSlot::Two
            })
        }
    }
}
