// Narrated combat events and the per-match log

use crate::game::action::ActionLabel;
use std::fmt;

/// How a move played out
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Attack landed at full strength
    Hit,
    /// Attack landed on a resting opponent
    Exposed,
    /// Special attack landed, carries the move's name
    Special(String),
    /// Guard stopped the attack completely
    Blocked,
    /// Guard removed part of the damage
    Mitigated { reduction_percent: u32 },
    /// Health restored
    Healed,
    /// Mana restored
    Rested,
    /// Guard raised for this turn
    Guarding,
    /// Not enough mana, nothing happened
    InsufficientMana,
}

/// One narrated line in the combat log
#[derive(Debug, Clone, PartialEq)]
pub struct TurnEvent {
    pub actor: String,
    pub action: ActionLabel,
    /// Damage dealt, health healed or mana gained
    pub amount: i32,
    pub target: Option<String>,
    pub outcome: TurnOutcome,
}

impl TurnEvent {
    /// A move that affects only the actor
    pub fn solo(actor: &str, action: ActionLabel, amount: i32, outcome: TurnOutcome) -> Self {
        Self {
            actor: actor.to_string(),
            action,
            amount,
            target: None,
            outcome,
        }
    }

    /// A move aimed at the opponent
    pub fn against(
        actor: &str,
        action: ActionLabel,
        amount: i32,
        target: &str,
        outcome: TurnOutcome,
    ) -> Self {
        Self {
            actor: actor.to_string(),
            action,
            amount,
            target: Some(target.to_string()),
            outcome,
        }
    }

    /// The actor could not pay for the move
    pub fn insufficient_mana(actor: &str, action: ActionLabel) -> Self {
        Self::solo(actor, action, 0, TurnOutcome::InsufficientMana)
    }
}

impl fmt::Display for TurnEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = self.target.as_deref().unwrap_or("the air");

        match &self.outcome {
            TurnOutcome::Hit => write!(
                f,
                "{} attacked {} for {} damage",
                self.actor, target, self.amount
            ),
            TurnOutcome::Exposed => write!(
                f,
                "{} caught {} resting for {} damage",
                self.actor, target, self.amount
            ),
            TurnOutcome::Special(move_name) => write!(
                f,
                "{} unleashed {} on {} for {} damage",
                self.actor, move_name, target, self.amount
            ),
            TurnOutcome::Blocked => write!(
                f,
                "{} fully blocked {}'s attack",
                target, self.actor
            ),
            TurnOutcome::Mitigated { reduction_percent } => write!(
                f,
                "{}'s guard absorbed {}% of {}'s attack, {} damage got through",
                target, reduction_percent, self.actor, self.amount
            ),
            TurnOutcome::Healed => write!(f, "{} healed {} health", self.actor, self.amount),
            TurnOutcome::Rested => write!(f, "{} rested and recovered {} mana", self.actor, self.amount),
            TurnOutcome::Guarding => write!(f, "{} raised a guard", self.actor),
            TurnOutcome::InsufficientMana => write!(
                f,
                "{} tried to {} but didn't have enough mana",
                self.actor,
                self.action.verb()
            ),
        }
    }
}

/// Ordered record of every event in a match, grouped by turn
///
/// Display only; the simulation never reads it back.
#[derive(Debug, Clone, Default)]
pub struct CombatLog {
    turns: Vec<Vec<TurnEvent>>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the events of a finished turn
    pub fn record_turn(&mut self, events: Vec<TurnEvent>) {
        self.turns.push(events);
    }

    /// Events of one turn, counting from 1
    pub fn turn(&self, number: usize) -> Option<&[TurnEvent]> {
        number
            .checked_sub(1)
            .and_then(|index| self.turns.get(index))
            .map(Vec::as_slice)
    }

    /// Events of the most recent turn
    pub fn last_turn(&self) -> &[TurnEvent] {
        self.turns.last().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of turns recorded
    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }
}
