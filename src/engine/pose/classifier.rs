// Gesture classification from body landmarks
//
// Every threshold is a fraction of the person's torso length, so the same
// gesture reads the same whether the player stands close to the camera or
// across the room.

use super::assignment::{assign_slot, PlayerSlot};
use super::landmark::{Landmark, Side, TrackedBody};
use crate::core::config::{ConfigError, GameMode};
use crate::core::math;
use crate::game::action::ActionLabel;
use serde::Deserialize;

/// Tunable classifier thresholds
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Minimum landmark visibility for a body to be classified at all
    pub presence_threshold: f32,
    /// Horizontal wrist reach, as a fraction of torso length, that counts as a strike
    pub extension_ratio: f32,
    /// How far above the shoulder a wrist must be to heal
    pub heal_margin_ratio: f32,
    /// Gap left above the hip at the bottom of the guard band
    pub defend_hip_margin_ratio: f32,
    /// Widest gap between the wrists that still reads as a guard
    pub guard_width_ratio: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            presence_threshold: 0.5,
            extension_ratio: 0.35,
            heal_margin_ratio: 0.10,
            defend_hip_margin_ratio: 0.15,
            guard_width_ratio: 0.25,
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.presence_threshold) {
            return Err(ConfigError::Invalid {
                field: "classifier.presence_threshold",
                reason: format!("must be within [0, 1], got {}", self.presence_threshold),
            });
        }

        let ratios = [
            ("classifier.extension_ratio", self.extension_ratio),
            ("classifier.heal_margin_ratio", self.heal_margin_ratio),
            ("classifier.defend_hip_margin_ratio", self.defend_hip_margin_ratio),
            ("classifier.guard_width_ratio", self.guard_width_ratio),
        ];
        for (field, value) in ratios {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a non-negative ratio, got {}", value),
                });
            }
        }

        Ok(())
    }
}

/// Body proportions every rule is measured against
#[derive(Debug, Clone, Copy)]
struct Proportions {
    center_x: f32,
    torso_length: f32,
}

/// Classifies one tracked body in one frame
#[derive(Debug, Clone, Default)]
pub struct ActionClassifier {
    config: ClassifierConfig,
}

impl ActionClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Assign the body to a slot and classify it
    ///
    /// `None` means no vote this frame: the body could not be placed or the
    /// detector was not confident enough.
    pub fn observe(&self, body: &TrackedBody, mode: GameMode) -> Option<(PlayerSlot, ActionLabel)> {
        let label = self.classify(body)?;
        let slot = assign_slot(body, mode, self.config.presence_threshold)?;
        Some((slot, label))
    }

    /// Instantaneous action label for a body
    ///
    /// Rules are checked in priority order: strike, guard, heal, rest.
    pub fn classify(&self, body: &TrackedBody) -> Option<ActionLabel> {
        if body
            .limbs()
            .iter()
            .any(|landmark| !landmark.is_visible(self.config.presence_threshold))
        {
            return None;
        }

        let proportions = Self::proportions(body)?;
        let torso = proportions.torso_length;
        let reach = self.config.extension_ratio * torso;

        let extended =
            |side: Side| (body.wrist(side).x - proportions.center_x).abs() > reach;
        let raised = |side: Side| {
            Self::anchor(body.hip(side), body.hip(side.opposite())).y - body.wrist(side).y > reach
        };

        let left_extended = extended(Side::Left);
        let right_extended = extended(Side::Right);

        if left_extended || right_extended {
            let special = left_extended
                && right_extended
                && Side::BOTH.iter().any(|&side| raised(side));
            return Some(if special {
                ActionLabel::SpecialAttack
            } else {
                ActionLabel::Attacking
            });
        }

        if self.is_guarding(body, torso) {
            return Some(ActionLabel::Defending);
        }

        let heal_margin = self.config.heal_margin_ratio * torso;
        let healing = Side::BOTH.iter().any(|&side| {
            body.wrist(side).y < Self::anchor(body.shoulder(side), body.shoulder(side.opposite())).y - heal_margin
        });
        if healing {
            return Some(ActionLabel::Healing);
        }

        Some(ActionLabel::Resting)
    }

    /// Both wrists inside the chest band and held close together
    fn is_guarding(&self, body: &TrackedBody, torso: f32) -> bool {
        let hip_margin = self.config.defend_hip_margin_ratio * torso;

        let in_band = Side::BOTH.iter().all(|&side| {
            let top = Self::anchor(body.shoulder(side), body.shoulder(side.opposite())).y;
            let bottom = Self::anchor(body.hip(side), body.hip(side.opposite())).y - hip_margin;
            let y = body.wrist(side).y;
            y >= top && y <= bottom
        });

        let gap = (body.left_wrist.x - body.right_wrist.x).abs();
        in_band && gap < self.config.guard_width_ratio * torso
    }

    /// Center line and torso length, with one-sided fallbacks
    fn proportions(body: &TrackedBody) -> Option<Proportions> {
        let placed_x = |landmark: &Landmark| landmark.is_placed().then_some(landmark.x);
        let center_x = math::mean_present(placed_x(&body.left_shoulder), placed_x(&body.right_shoulder))?;

        let side_torso = |side: Side| {
            let shoulder = body.shoulder(side);
            let hip = body.hip(side);
            (shoulder.is_placed() && hip.is_placed()).then(|| hip.y - shoulder.y)
        };
        let torso_length = math::mean_present(side_torso(Side::Left), side_torso(Side::Right))?;

        if torso_length <= 0.0 {
            return None;
        }

        Some(Proportions {
            center_x,
            torso_length,
        })
    }

    /// The landmark itself if placed, otherwise its mirror on the other side
    fn anchor<'a>(primary: &'a Landmark, fallback: &'a Landmark) -> &'a Landmark {
        if primary.is_placed() {
            primary
        } else {
            fallback
        }
    }
}
