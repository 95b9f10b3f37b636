use clap::Parser;
use match_three::cli::ConfigArgs;
use match_three::engine::{Game, Outcome};
use match_three::heuristics::Strategy;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Plays seeded games with each strategy and compares the outcomes",
    long_about = None
)]
struct Args {
    #[clap(flatten)]
    config: ConfigArgs,

    /// Number of seeded games per strategy
    #[clap(short, long, default_value_t = 20)]
    games: u64,

    /// Seed of the first game; game i uses start_seed + i
    #[clap(long, default_value_t = 0)]
    start_seed: u64,

    /// Stop a game that has not finished after this many turns
    #[clap(long, default_value_t = 500)]
    max_turns: u32,
}

#[derive(Default)]
struct Tally {
    won: u32,
    lost: u32,
    unfinished: u32,
    turns: u64,
}

/// Seed for game `game_idx`, wrapping past `u64::MAX`.
fn game_seed(start_seed: u64, game_idx: u64) -> u64 {
    start_seed.wrapping_add(game_idx)
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = args.config.to_config();
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let mut tallies: Vec<(Strategy, Tally)> = Strategy::ALL
        .iter()
        .map(|&strategy| (strategy, Tally::default()))
        .collect();

    println!("Starting self-play for {} boards...", args.games);

    for game_idx in 0..args.games {
        let seed = game_seed(args.start_seed, game_idx);

        for (strategy, tally) in tallies.iter_mut() {
            // Every strategy sees the same starting board.
            let mut game = match Game::with_seed(config, seed) {
                Ok(game) => game,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            let mut picker = SmallRng::seed_from_u64(seed);

            while !game.is_over() && game.turns() < args.max_turns {
                let Some(tile) = game.next_tile() else {
                    break;
                };
                let Some(column) = strategy.choose(game.board(), tile, &mut picker) else {
                    break;
                };
                if let Err(e) = game.play(tile, column) {
                    eprintln!(
                        "Warning: strategy {} chose a rejected column on seed {}: {}",
                        strategy.name(),
                        seed,
                        e
                    );
                    break;
                }
            }

            match game.outcome() {
                Outcome::Won => tally.won += 1,
                Outcome::Lost => tally.lost += 1,
                Outcome::InProgress => tally.unfinished += 1,
            }
            tally.turns += u64::from(game.turns());
            println!(
                "  Seed: {:<6} Strategy: {:<10} Outcome: {:<10} Turns: {}",
                seed,
                strategy.name(),
                format!("{:?}", game.outcome()),
                game.turns()
            );
        }
    }

    println!("\n--- Self-play Complete ---");
    for (strategy, tally) in &tallies {
        let avg_turns = if args.games == 0 {
            0.0
        } else {
            tally.turns as f64 / args.games as f64
        };
        println!(
            "Strategy {:<10}: won {:<4} lost {:<4} unfinished {:<4} avg turns {:.2}",
            strategy.name(),
            tally.won,
            tally.lost,
            tally.unfinished,
            avg_turns
        );
    }
    ExitCode::SUCCESS
}
