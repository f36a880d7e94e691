// Combatant - a duelist's live resources for one match

use super::roster::Archetype;
use crate::core::dice::CombatDice;

/// Starting mana below which the special attack is buffed
pub const UNDERDOG_MANA_THRESHOLD: i32 = 100;

/// Special attack multiplier for a low starting mana roll
pub const UNDERDOG_SPECIAL_MULTIPLIER: f32 = 1.25;

/// A duelist in a match
///
/// Health may drop below zero from the killing blow so the size of the
/// overkill is visible; it never drops further once there.
#[derive(Debug, Clone, PartialEq)]
pub struct Combatant {
    /// Character name, fixed at creation
    name: String,

    // Resources
    /// Current health; zero or below means defeated
    pub health: i32,
    /// Current mana, never negative
    pub mana: i32,

    // Stats
    pub attack: i32,
    pub defense: i32,

    // Special attack
    pub special_attack_name: String,
    pub special_attack_damage: f32,
}

impl Combatant {
    /// Build a combatant from a roster row and a starting mana value
    ///
    /// A starting mana below `UNDERDOG_MANA_THRESHOLD` buffs the special attack
    /// once, here; later mana changes do not revisit it.
    pub fn from_archetype(archetype: &Archetype, starting_mana: i32) -> Self {
        let mut special_attack_damage = archetype.special_attack_damage;
        if starting_mana < UNDERDOG_MANA_THRESHOLD {
            special_attack_damage *= UNDERDOG_SPECIAL_MULTIPLIER;
        }

        Self {
            name: archetype.name.to_string(),
            health: archetype.health,
            mana: starting_mana.max(0),
            attack: archetype.attack,
            defense: archetype.defense,
            special_attack_name: archetype.special_attack_name.to_string(),
            special_attack_damage,
        }
    }

    /// Build a combatant with a rolled starting mana
    pub fn spawn(archetype: &Archetype, dice: &mut impl CombatDice) -> Self {
        Self::from_archetype(archetype, dice.starting_mana())
    }

    /// Character name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if there is enough mana for a cost
    pub fn can_afford(&self, cost: i32) -> bool {
        self.mana >= cost
    }

    /// Pay a mana cost
    /// Returns false, leaving mana untouched, if there is not enough
    pub fn spend_mana(&mut self, cost: i32) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.mana -= cost;
        true
    }

    /// Gain mana
    pub fn restore_mana(&mut self, amount: i32) {
        self.mana = (self.mana + amount).max(0);
    }

    /// Gain health
    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).max(0);
    }

    /// Apply damage and return how much was dealt
    ///
    /// A defeated combatant takes no further damage.
    pub fn take_damage(&mut self, damage: i32) -> i32 {
        if self.is_defeated() {
            return 0;
        }
        let damage = damage.max(0);
        self.health -= damage;
        damage
    }

    /// Check if the combatant is out of the match
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }
}
