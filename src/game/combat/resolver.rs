// Turn resolution
//
// Both moves of a turn are declared before either is applied. Each move is
// judged against the opponent's declared move and the pre-turn mana of its
// own actor, so applying player one before player two only fixes the order
// of the events, never the outcome.

use super::event::{TurnEvent, TurnOutcome};
use crate::core::dice::{CombatDice, DefenseRoll};
use crate::core::math;
use crate::game::action::ActionLabel;
use crate::game::characters::Combatant;

/// Damage multiplier against a resting opponent
pub const EXPOSED_MULTIPLIER_NUM: i32 = 3;
pub const EXPOSED_MULTIPLIER_DEN: i32 = 2;

/// Damage multiplier of a special attack over a basic attack
pub const SPECIAL_MULTIPLIER: i32 = 2;

/// A move as declared at the start of the turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Intent {
    action: ActionLabel,
    /// The actor had the mana for it
    paid: bool,
}

impl Intent {
    fn declare(actor: &Combatant, action: ActionLabel) -> Self {
        Self {
            action,
            paid: actor.can_afford(action.mana_cost()),
        }
    }

    /// A paid-for guard
    fn is_guarding(&self) -> bool {
        self.paid && self.action == ActionLabel::Defending
    }
}

/// Resolve one turn and return its events in order
pub fn resolve_turn(
    first: &mut Combatant,
    second: &mut Combatant,
    first_action: ActionLabel,
    second_action: ActionLabel,
    dice: &mut impl CombatDice,
) -> Vec<TurnEvent> {
    let first_intent = Intent::declare(first, first_action);
    let second_intent = Intent::declare(second, second_action);

    let mut events = Vec::with_capacity(2);
    apply_move(first, second, first_intent, second_intent, dice, &mut events);
    apply_move(second, first, second_intent, first_intent, dice, &mut events);
    events
}

/// Apply one side's move
fn apply_move(
    actor: &mut Combatant,
    opponent: &mut Combatant,
    intent: Intent,
    opposing: Intent,
    dice: &mut impl CombatDice,
    events: &mut Vec<TurnEvent>,
) {
    let action = intent.action;

    if !intent.paid || !actor.spend_mana(action.mana_cost()) {
        events.push(TurnEvent::insufficient_mana(actor.name(), action));
        return;
    }

    let event = match action {
        ActionLabel::Resting => {
            let gained = dice.rest_mana();
            actor.restore_mana(gained);
            TurnEvent::solo(actor.name(), action, gained, TurnOutcome::Rested)
        }
        ActionLabel::Defending => TurnEvent::solo(actor.name(), action, 0, TurnOutcome::Guarding),
        ActionLabel::Healing => {
            let healed = dice.heal_amount();
            actor.heal(healed);
            TurnEvent::solo(actor.name(), action, healed, TurnOutcome::Healed)
        }
        ActionLabel::Attacking => {
            let (damage, outcome) = attack_damage(actor, opponent, opposing, dice);
            let dealt = opponent.take_damage(damage);
            TurnEvent::against(actor.name(), action, dealt, opponent.name(), outcome)
        }
        ActionLabel::SpecialAttack => {
            let dealt = opponent.take_damage(actor.attack * SPECIAL_MULTIPLIER);
            TurnEvent::against(
                actor.name(),
                action,
                dealt,
                opponent.name(),
                TurnOutcome::Special(actor.special_attack_name.clone()),
            )
        }
    };

    events.push(event);
}

/// Basic attack damage against the opponent's declared move
fn attack_damage(
    attacker: &Combatant,
    defender: &Combatant,
    defender_move: Intent,
    dice: &mut impl CombatDice,
) -> (i32, TurnOutcome) {
    if defender_move.is_guarding() {
        return mitigate(attacker.attack, defender.defense, dice.defense_roll());
    }

    match defender_move.action {
        ActionLabel::Resting => (
            attacker.attack * EXPOSED_MULTIPLIER_NUM / EXPOSED_MULTIPLIER_DEN,
            TurnOutcome::Exposed,
        ),
        _ => (attacker.attack, TurnOutcome::Hit),
    }
}

/// Damage that gets through a guard
///
/// A fully efficient guard stops everything. Otherwise defense is taken off
/// the attack first and the roll's reduction is applied to what is left.
pub fn mitigate(attack: i32, defense: i32, roll: DefenseRoll) -> (i32, TurnOutcome) {
    if roll.fully_efficient {
        return (0, TurnOutcome::Blocked);
    }

    let base = (attack - defense).max(0);
    let damage = math::floor_scaled(base, 1.0 - roll.reduction);
    let reduction_percent = (roll.reduction * 100.0).round() as u32;

    (damage, TurnOutcome::Mitigated { reduction_percent })
}
