use clap::Parser;
use match_three::cli::ConfigArgs;
use match_three::engine::{Game, Outcome};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(flatten)]
    config: ConfigArgs,

    /// Seed for the random tiles; a fresh one is used if omitted
    #[clap(long)]
    seed: Option<u64>,
}

/// One line of player input.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Quit,
    /// 1-based column; anything that is not a number becomes 0, which is never valid.
    Column(usize),
}

/// Reads one command. End of input counts as quitting; read errors are returned so the
/// caller can stop instead of prompting again.
fn read_command(reader: &mut impl BufRead) -> io::Result<Command> {
    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Ok(Command::Quit);
    }
    let trimmed_input = input.trim();
    if trimmed_input == "q" {
        return Ok(Command::Quit);
    }
    Ok(Command::Column(trimmed_input.parse::<usize>().unwrap_or(0)))
}

fn main() -> ExitCode {
    let args = Args::parse();

    let rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let mut game = match Game::new(args.config.to_config(), rng) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    println!("Welcome to Match Three!");

    let mut last_landing = None;
    while !game.is_over() {
        let Some(tile) = game.next_tile() else {
            break;
        };

        loop {
            println!("---------------------");
            println!("Turn: {}", game.turns() + 1);
            println!("{}", game.board().to_string_with_highlight(last_landing));
            print!(
                "Next tile: {}   column (1-{}), or 'q' to quit: ",
                tile.to_char(),
                game.board().width()
            );
            io::stdout().flush().ok(); // Ensure prompt is shown before input

            let column = match read_command(&mut io::stdin().lock()) {
                Ok(Command::Column(column)) => column,
                Ok(Command::Quit) => {
                    println!("\nThanks for playing!");
                    return ExitCode::SUCCESS;
                }
                Err(e) => {
                    eprintln!("Error reading input: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            match game.play(tile, column) {
                Ok(placement) => {
                    if !placement.cleared.is_empty() {
                        println!("Cleared {} tiles!", placement.cleared.len());
                    }
                    last_landing = Some((placement.row, placement.column));
                    break;
                }
                Err(e) => println!("Wrong column: {}.", e),
            }
        }
    }

    println!("---------------------");
    println!("{}", game.board());
    println!();
    match game.outcome() {
        Outcome::Won => println!("WIN!!!"),
        Outcome::Lost => println!("Game Over"),
        Outcome::InProgress => println!("No playable tile left."),
    }
    println!("Total turns: {}", game.turns());
    ExitCode::SUCCESS
}
