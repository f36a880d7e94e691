// Combat action definitions and costs

use std::fmt;

/// Mana spent by Attacking
pub const ATTACK_COST: i32 = 20;
/// Mana spent by Defending
pub const DEFEND_COST: i32 = 20;
/// Mana spent by Healing
pub const HEAL_COST: i32 = 30;
/// Mana spent by a Special Attack
pub const SPECIAL_COST: i32 = 50;

/// Represents every move a player can make in a turn
///
/// Declaration order is the tie-break order for vote counting: when two
/// labels collect the same number of votes, the one listed first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum ActionLabel {
    /// Idle, recovers mana
    #[default]
    Resting,
    /// Guard against an incoming attack this turn
    Defending,
    /// Basic strike
    Attacking,
    /// Restore health
    Healing,
    /// Double-damage strike that ignores the opponent's move
    SpecialAttack,
}

impl ActionLabel {
    /// All labels in tie-break order
    pub const ALL: [ActionLabel; 5] = [
        ActionLabel::Resting,
        ActionLabel::Defending,
        ActionLabel::Attacking,
        ActionLabel::Healing,
        ActionLabel::SpecialAttack,
    ];

    /// Number of labels
    pub const COUNT: usize = Self::ALL.len();

    /// Position in tie-break order
    pub fn index(self) -> usize {
        self as usize
    }

    /// Mana the move costs
    pub fn mana_cost(self) -> i32 {
        match self {
            ActionLabel::Resting => 0,
            ActionLabel::Defending => DEFEND_COST,
            ActionLabel::Attacking => ATTACK_COST,
            ActionLabel::Healing => HEAL_COST,
            ActionLabel::SpecialAttack => SPECIAL_COST,
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            ActionLabel::Resting => "Resting",
            ActionLabel::Defending => "Defending",
            ActionLabel::Attacking => "Attacking",
            ActionLabel::Healing => "Healing",
            ActionLabel::SpecialAttack => "Special Attack",
        }
    }

    /// Verb used in narration ("tried to ...")
    pub fn verb(self) -> &'static str {
        match self {
            ActionLabel::Resting => "rest",
            ActionLabel::Defending => "defend",
            ActionLabel::Attacking => "attack",
            ActionLabel::Healing => "heal",
            ActionLabel::SpecialAttack => "use a special attack",
        }
    }
}

impl fmt::Display for ActionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
