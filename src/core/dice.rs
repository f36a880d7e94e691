// Random rolls used by combatant creation and turn resolution
//
// Everything random in a match goes through `CombatDice`, so a seeded
// generator replays a match exactly and tests can pin individual rolls.

use rand::rngs::OsRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::ops::RangeInclusive;

/// Mana a combatant starts a match with
pub const STARTING_MANA: RangeInclusive<i32> = 80..=120;

/// Mana recovered by resting
pub const REST_MANA: RangeInclusive<i32> = 20..=35;

/// Health restored by healing
pub const HEAL_AMOUNT: RangeInclusive<i32> = 15..=30;

/// Fraction of damage a partially efficient guard removes
pub const DEFENSE_REDUCTION: RangeInclusive<f64> = 0.40..=0.80;

/// Chance that a guard blocks an attack completely
pub const FULL_BLOCK_CHANCE: f64 = 0.5;

/// Outcome of a defender's guard against an attack
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefenseRoll {
    /// The guard stopped the attack entirely
    pub fully_efficient: bool,
    /// Fraction of damage removed when the guard is not fully efficient
    pub reduction: f64,
}

/// Source of every random draw the game makes
pub trait CombatDice {
    fn starting_mana(&mut self) -> i32;
    fn rest_mana(&mut self) -> i32;
    fn heal_amount(&mut self) -> i32;
    fn defense_roll(&mut self) -> DefenseRoll;
}

/// `CombatDice` backed by any random number generator
#[derive(Debug, Clone)]
pub struct RngDice<R> {
    rng: R,
}

impl<R: Rng> RngDice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> CombatDice for RngDice<R> {
    fn starting_mana(&mut self) -> i32 {
        self.rng.gen_range(STARTING_MANA)
    }

    fn rest_mana(&mut self) -> i32 {
        self.rng.gen_range(REST_MANA)
    }

    fn heal_amount(&mut self) -> i32 {
        self.rng.gen_range(HEAL_AMOUNT)
    }

    fn defense_roll(&mut self) -> DefenseRoll {
        DefenseRoll {
            fully_efficient: self.rng.gen_bool(FULL_BLOCK_CHANCE),
            reduction: self.rng.gen_range(DEFENSE_REDUCTION),
        }
    }
}

/// The dice used by a real match
pub type GameDice = RngDice<ChaCha8Rng>;

/// Errors raised while preparing the random source
#[derive(Debug, thiserror::Error)]
pub enum DiceError {
    #[error("Operating system entropy unavailable: {0}")]
    Entropy(#[from] rand::Error),
}

/// Deterministic dice for a fixed seed
pub fn seeded(seed: u64) -> GameDice {
    RngDice::new(ChaCha8Rng::seed_from_u64(seed))
}

/// Dice seeded from operating system entropy
///
/// Fails instead of falling back: damage and healing have no sane default.
pub fn from_entropy() -> Result<GameDice, DiceError> {
    let mut seed = <ChaCha8Rng as SeedableRng>::Seed::default();
    OsRng.try_fill_bytes(&mut seed)?;
    Ok(RngDice::new(ChaCha8Rng::from_seed(seed)))
}

/// Use the configured seed when there is one, entropy otherwise
pub fn from_seed_or_entropy(seed: Option<u64>) -> Result<GameDice, DiceError> {
    match seed {
        Some(seed) => Ok(seeded(seed)),
        None => from_entropy(),
    }
}
