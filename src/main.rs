use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::io::{self, BufReader};
use std::path::PathBuf;

mod core;
mod engine;
mod game;

use crate::core::config::{GameConfig, GameMode};
use crate::core::dice::{self, GameDice};
use crate::engine::pose::{
    ActionClassifier, ChannelSource, LandmarkSource, PlayerSlot, PoseSession, ReplaySource,
};
use crate::game::duel::{Duel, MatchEnd, MatchOutcome, MatchRunner};

/// Motion-controlled duel driven by a stream of pose landmarks
#[derive(Parser, Debug)]
#[command(name = "wizviz")]
#[command(about = "Turn-based duel controlled by body poses")]
struct Args {
    /// Match configuration (TOML); defaults are used if it does not exist
    #[arg(short, long, default_value = "wizviz.toml")]
    config: PathBuf,

    /// Landmark frames as JSON lines: a recording to replay, or `-` for a live detector on stdin
    #[arg(short, long, default_value = "-")]
    frames: String,

    /// Random seed for a reproducible match
    #[arg(short, long)]
    seed: Option<u64>,

    /// Override the configured game mode
    #[arg(short, long, value_enum)]
    mode: Option<GameMode>,

    /// Override the turn window length in seconds
    #[arg(long)]
    turn_seconds: Option<f64>,
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    let mut config = GameConfig::load_or_default(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(turn_seconds) = args.turn_seconds {
        config.turn_seconds = turn_seconds;
    }
    config.validate().context("checking match configuration")?;

    let mut dice = dice::from_seed_or_entropy(config.seed).context("seeding dice")?;
    let mut duel = Duel::from_config(&config, &mut dice)?;

    info!(
        "Starting duel, {:?}, {:.1}s turns",
        config.mode, config.turn_seconds
    );
    for slot in PlayerSlot::ALL {
        let combatant = duel.player(slot);
        info!(
            "{}: {} with {} mana, special {} ({:.1})",
            slot,
            combatant.name(),
            combatant.mana,
            combatant.special_attack_name,
            combatant.special_attack_damage
        );
    }

    let end = if args.frames == "-" {
        info!("Reading live frames from stdin");
        let source = ChannelSource::spawn_reader(BufReader::new(io::stdin()));
        play(&config, &mut duel, &mut dice, source)?
    } else {
        let source = ReplaySource::open(&args.frames)
            .with_context(|| format!("opening frames {}", args.frames))?;
        play(&config, &mut duel, &mut dice, source)?
    };

    print_summary(&duel, end);
    Ok(())
}

/// Run the match against one frame source
fn play<S: LandmarkSource>(
    config: &GameConfig,
    duel: &mut Duel,
    dice: &mut GameDice,
    source: S,
) -> Result<MatchEnd> {
    let classifier = ActionClassifier::new(config.classifier);
    let mut session = PoseSession::new(source, classifier, config.mode);
    let runner = MatchRunner::from_config(config);

    runner
        .run_match(duel, &mut session, dice)
        .context("reading pose frames")
}

fn print_summary(duel: &Duel, end: MatchEnd) {
    for number in 1..=duel.log().turn_count() {
        println!("Turn {}", number);
        for event in duel.log().turn(number).unwrap_or(&[]) {
            println!("  {}", event);
        }
    }

    println!();
    for slot in PlayerSlot::ALL {
        let combatant = duel.player(slot);
        println!(
            "{}: {:<10} health {:>4}  mana {:>4}",
            slot,
            combatant.name(),
            combatant.health,
            combatant.mana
        );
    }

    let name = |slot: PlayerSlot| duel.player(slot).name().to_string();
    match end {
        MatchEnd::Decided(MatchOutcome::Winner { winner, loser }) => {
            println!("{} was defeated. {} wins!", name(loser), name(winner));
        }
        MatchEnd::Decided(MatchOutcome::Draw) => {
            println!(
                "Draw: {} and {} fell together",
                name(PlayerSlot::One),
                name(PlayerSlot::Two)
            );
        }
        MatchEnd::Abandoned { turns } => {
            println!("Frame stream ended after {} turns, no winner", turns);
        }
        MatchEnd::TurnLimit { turns } => {
            println!("Turn limit of {} reached, no winner", turns);
        }
    }
}
