// Duel - the match state and the loop that drives it
//
// The duel owns both combatants and the log. The runner feeds it one pair of
// actions per turn, read from the capture session or, for player two in
// single-player mode, from the bot.

use crate::core::config::{ConfigError, GameConfig, GameMode};
use crate::core::dice::CombatDice;
use crate::engine::pose::{LandmarkSource, PlayerSlot, PoseSession, SourceError};
use crate::game::action::ActionLabel;
use crate::game::bot::BotPolicy;
use crate::game::characters::{Archetype, Combatant};
use crate::game::combat::{resolve_turn, CombatLog, TurnEvent};
use log::info;
use std::time::Duration;

/// How a finished match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Winner { winner: PlayerSlot, loser: PlayerSlot },
    Draw,
}

/// Why the runner stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEnd {
    /// A combatant was defeated
    Decided(MatchOutcome),
    /// The frame source closed before anyone was defeated
    Abandoned { turns: u32 },
    /// The configured turn cap was reached
    TurnLimit { turns: u32 },
}

/// A match between two combatants
#[derive(Debug, Clone)]
pub struct Duel {
    players: [Combatant; 2],
    turn: u32,
    log: CombatLog,
}

impl Duel {
    pub fn new(player_one: Combatant, player_two: Combatant) -> Self {
        Self {
            players: [player_one, player_two],
            turn: 0,
            log: CombatLog::new(),
        }
    }

    /// Build both combatants from the configured roster names
    ///
    /// Both names are looked up before any dice are rolled. In single-player
    /// mode the bot's handicap goes onto player two.
    pub fn from_config(config: &GameConfig, dice: &mut impl CombatDice) -> Result<Self, ConfigError> {
        let first = Archetype::by_name(&config.player_one)?;
        let second = Archetype::by_name(&config.player_two)?;

        let player_one = Combatant::spawn(first, dice);
        let mut player_two = Combatant::spawn(second, dice);

        if config.mode == GameMode::PlayerVsAi {
            config.ai.apply(&mut player_two);
        }

        Ok(Self::new(player_one, player_two))
    }

    pub fn player(&self, slot: PlayerSlot) -> &Combatant {
        &self.players[slot.index()]
    }

    /// Turns played so far
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    /// Resolve one turn, player one's move first
    pub fn play_turn(
        &mut self,
        first_action: ActionLabel,
        second_action: ActionLabel,
        dice: &mut impl CombatDice,
    ) -> &[TurnEvent] {
        let [one, two] = &mut self.players;
        let events = resolve_turn(one, two, first_action, second_action, dice);

        self.turn += 1;
        self.log.record_turn(events);
        self.log.last_turn()
    }

    /// The result, once either combatant is defeated
    pub fn outcome(&self) -> Option<MatchOutcome> {
        let [one, two] = &self.players;
        if !one.is_defeated() && !two.is_defeated() {
            return None;
        }

        let outcome = if one.health > two.health {
            MatchOutcome::Winner {
                winner: PlayerSlot::One,
                loser: PlayerSlot::Two,
            }
        } else if two.health > one.health {
            MatchOutcome::Winner {
                winner: PlayerSlot::Two,
                loser: PlayerSlot::One,
            }
        } else {
            MatchOutcome::Draw
        };

        Some(outcome)
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }
}

/// Drives turns until the match ends
#[derive(Debug, Clone)]
pub struct MatchRunner {
    turn_duration: Duration,
    max_turns: Option<u32>,
    /// Present in single-player mode
    bot: Option<BotPolicy>,
}

impl MatchRunner {
    pub fn new(turn_duration: Duration, max_turns: Option<u32>, bot: Option<BotPolicy>) -> Self {
        Self {
            turn_duration,
            max_turns,
            bot,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        let bot = match config.mode {
            GameMode::PlayerVsAi => Some(BotPolicy::new(config.difficulty_level())),
            GameMode::TwoPlayer => None,
        };
        Self::new(config.turn_duration(), config.max_turns, bot)
    }

    /// Play turns until someone is defeated, the source closes or the cap is hit
    pub fn run_match<S: LandmarkSource>(
        &self,
        duel: &mut Duel,
        session: &mut PoseSession<S>,
        dice: &mut impl CombatDice,
    ) -> Result<MatchEnd, SourceError> {
        loop {
            if let Some(outcome) = duel.outcome() {
                return Ok(MatchEnd::Decided(outcome));
            }

            if self.max_turns.is_some_and(|cap| duel.turn() >= cap) {
                info!("Turn limit reached after {} turns", duel.turn());
                return Ok(MatchEnd::TurnLimit { turns: duel.turn() });
            }

            let scan = session.scan_turn(self.turn_duration)?;
            let first_action = scan.actions.first();
            let second_action = match (scan.actions.second(), self.bot.as_ref()) {
                (Some(action), _) => action,
                (None, Some(bot)) => {
                    bot.decide(duel.player(PlayerSlot::Two), duel.player(PlayerSlot::One))
                }
                (None, None) => ActionLabel::Resting,
            };

            info!(
                "Turn {}: {} vs {} (votes {}/{}, {} frames, {} dropped, {} abstained)",
                duel.turn() + 1,
                first_action,
                second_action,
                scan.votes.tally(PlayerSlot::One).total(),
                scan.votes.tally(PlayerSlot::Two).total(),
                scan.frames_seen,
                scan.frames_dropped,
                scan.abstentions
            );

            for event in duel.play_turn(first_action, second_action, dice) {
                info!("{}", event);
            }

            if scan.source_closed && !duel.is_over() {
                info!("Frame source closed after {} turns", duel.turn());
                return Ok(MatchEnd::Abandoned { turns: duel.turn() });
            }
        }
    }
}
