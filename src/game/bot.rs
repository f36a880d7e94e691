// Scripted opponent for single-player matches
//
// A small priority rule over the bot's own resources and the opponent's
// health. It only ever answers with an `ActionLabel`, so its moves go through
// the same resolver as a player's.

use crate::core::config::ConfigError;
use crate::game::action::{ActionLabel, ATTACK_COST, DEFEND_COST, HEAL_COST, SPECIAL_COST};
use crate::game::characters::Combatant;
use serde::Deserialize;

/// Health at or below which the bot heals, at difficulty 1
const BASE_LOW_HEALTH: i32 = 20;

/// Health at or below which the bot guards, at difficulty 1
const BASE_THREAT_HEALTH: i32 = 30;

/// Extra caution per difficulty level above 1
const CAUTION_PER_LEVEL: i32 = 5;

/// Lowest difficulty at which the bot finishes with its special attack
const SPECIAL_FINISH_DIFFICULTY: u8 = 3;

/// Largest bonus or penalty accepted for any handicap stat
pub const MAX_HANDICAP: i32 = 1000;

/// Stat bonuses granted to the bot's combatant at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AiHandicap {
    pub attack: i32,
    pub health: i32,
    pub mana: i32,
}

impl AiHandicap {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("ai.attack", self.attack),
            ("ai.health", self.health),
            ("ai.mana", self.mana),
        ];
        for (field, value) in fields {
            if !(-MAX_HANDICAP..=MAX_HANDICAP).contains(&value) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be within ±{}, got {}", MAX_HANDICAP, value),
                });
            }
        }
        Ok(())
    }

    /// Apply the bonuses; stats never drop below their floors
    pub fn apply(&self, combatant: &mut Combatant) {
        combatant.attack = combatant.attack.saturating_add(self.attack).max(0);
        combatant.health = combatant.health.saturating_add(self.health).max(1);
        combatant.mana = combatant.mana.saturating_add(self.mana).max(0);
    }
}

/// What the bot looks at when picking a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotView {
    pub health: i32,
    pub mana: i32,
    pub attack: i32,
    pub opponent_health: i32,
}

impl BotView {
    pub fn new(bot: &Combatant, opponent: &Combatant) -> Self {
        Self {
            health: bot.health,
            mana: bot.mana,
            attack: bot.attack,
            opponent_health: opponent.health,
        }
    }
}

/// Bot decision rule for one difficulty level
#[derive(Debug, Clone)]
pub struct BotPolicy {
    difficulty: u8,
}

impl BotPolicy {
    /// Create a bot; difficulty is expected already clamped into range
    pub fn new(difficulty: u8) -> Self {
        Self {
            difficulty: difficulty.max(1),
        }
    }

    /// Health at or below which the bot heals
    pub fn low_health_threshold(&self) -> i32 {
        BASE_LOW_HEALTH + self.caution()
    }

    /// Health at or below which the bot guards
    pub fn threat_threshold(&self) -> i32 {
        BASE_THREAT_HEALTH + self.caution()
    }

    fn caution(&self) -> i32 {
        CAUTION_PER_LEVEL * (i32::from(self.difficulty) - 1)
    }

    /// Pick this turn's move
    pub fn decide(&self, bot: &Combatant, opponent: &Combatant) -> ActionLabel {
        self.choose(BotView::new(bot, opponent))
    }

    /// The priority rule: recover, finish, heal, guard, attack
    pub fn choose(&self, view: BotView) -> ActionLabel {
        if view.mana < ATTACK_COST {
            return ActionLabel::Resting;
        }

        if view.opponent_health <= view.attack {
            return ActionLabel::Attacking;
        }

        if self.difficulty >= SPECIAL_FINISH_DIFFICULTY
            && view.mana >= SPECIAL_COST
            && view.opponent_health <= view.attack * 2
        {
            return ActionLabel::SpecialAttack;
        }

        if view.health <= self.low_health_threshold() && view.mana >= HEAL_COST {
            return ActionLabel::Healing;
        }

        if view.health <= self.threat_threshold() && view.mana >= DEFEND_COST {
            return ActionLabel::Defending;
        }

        ActionLabel::Attacking
    }
}

impl Default for BotPolicy {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::Archetype;

    fn view(health: i32, mana: i32, attack: i32, opponent_health: i32) -> BotView {
        BotView {
            health,
            mana,
            attack,
            opponent_health,
        }
    }

    #[test]
    fn test_rests_when_out_of_mana() {
        let bot = BotPolicy::new(1);
        assert_eq!(bot.choose(view(100, 0, 25, 5)), ActionLabel::Resting);
        assert_eq!(bot.choose(view(100, 19, 25, 100)), ActionLabel::Resting);
    }

    #[test]
    fn test_finishes_when_lethal() {
        let bot = BotPolicy::new(1);
        assert_eq!(bot.choose(view(10, 20, 25, 25)), ActionLabel::Attacking);
    }

    #[test]
    fn test_special_finish_needs_difficulty() {
        let situation = view(100, 60, 25, 45);
        assert_eq!(BotPolicy::new(1).choose(situation), ActionLabel::Attacking);
        assert_eq!(BotPolicy::new(3).choose(situation), ActionLabel::SpecialAttack);
    }

    #[test]
    fn test_heals_when_low() {
        let bot = BotPolicy::new(1);
        assert_eq!(bot.choose(view(20, 40, 25, 100)), ActionLabel::Healing);
        // Can't afford to heal, guards instead
        assert_eq!(bot.choose(view(20, 25, 25, 100)), ActionLabel::Defending);
    }

    #[test]
    fn test_guards_when_threatened() {
        let bot = BotPolicy::new(1);
        assert_eq!(bot.choose(view(28, 40, 25, 100)), ActionLabel::Defending);
        assert_eq!(bot.choose(view(31, 40, 25, 100)), ActionLabel::Attacking);
    }

    #[test]
    fn test_difficulty_raises_caution() {
        let easy = BotPolicy::new(1);
        let hard = BotPolicy::new(5);
        assert_eq!(hard.low_health_threshold(), 40);
        assert_eq!(hard.threat_threshold(), 50);

        let situation = view(35, 40, 25, 100);
        assert_eq!(easy.choose(situation), ActionLabel::Attacking);
        assert_eq!(hard.choose(situation), ActionLabel::Healing);
    }

    #[test]
    fn test_decide_reads_both_combatants() {
        let bot = BotPolicy::default();
        let me = Combatant::from_archetype(Archetype::by_name("Orion").unwrap(), 100);
        let mut them = Combatant::from_archetype(Archetype::by_name("Phoenix").unwrap(), 100);

        assert_eq!(bot.decide(&me, &them), ActionLabel::Attacking);
        them.health = 20;
        assert_eq!(bot.decide(&me, &them), ActionLabel::Attacking);

        let mut tired = me.clone();
        tired.mana = 10;
        assert_eq!(bot.decide(&tired, &them), ActionLabel::Resting);
    }

    #[test]
    fn test_handicap_applies_bonuses() {
        let mut combatant = Combatant::from_archetype(Archetype::by_name("Draco").unwrap(), 100);
        AiHandicap {
            attack: 5,
            health: -200,
            mana: 10,
        }
        .apply(&mut combatant);

        assert_eq!(combatant.attack, 30);
        assert_eq!(combatant.health, 1);
        assert_eq!(combatant.mana, 110);
    }

    #[test]
    fn test_handicap_saturates() {
        let mut combatant = Combatant::from_archetype(Archetype::by_name("Hydra").unwrap(), 100);
        AiHandicap {
            attack: i32::MIN,
            health: i32::MAX,
            mana: i32::MAX,
        }
        .apply(&mut combatant);

        assert_eq!(combatant.attack, 0);
        assert_eq!(combatant.health, i32::MAX);
        assert_eq!(combatant.mana, i32::MAX);
    }

    #[test]
    fn test_handicap_bounds() {
        assert!(AiHandicap::default().validate().is_ok());
        let edge = AiHandicap {
            attack: MAX_HANDICAP,
            health: -MAX_HANDICAP,
            mana: 0,
        };
        assert!(edge.validate().is_ok());
        let over = AiHandicap {
            mana: MAX_HANDICAP + 1,
            ..AiHandicap::default()
        };
        assert!(matches!(
            over.validate(),
            Err(ConfigError::Invalid { field: "ai.mana", .. })
        ));
    }

    #[test]
    fn test_only_emits_known_actions() {
        let bot = BotPolicy::new(5);
        for health in (0..200).step_by(7) {
            for mana in (0..150).step_by(5) {
                let action = bot.choose(view(health, mana, 30, 60));
                assert!(ActionLabel::ALL.contains(&action));
                assert!(mana >= action.mana_cost(), "bot picked unaffordable {:?}", action);
            }
        }
    }
}
