mod puzzle;
mod search;
mod trace;

use crossterm::style::Stylize;

use puzzle::Puzzle;
use search::{hill_climb, SearchConfig};
use trace::ConsoleTrace;

/// Pulls the optional seed out of the command line; an argument that is
/// present but not a number is an error rather than a silent fallback to
/// OS entropy.
fn seed_arg(args: &mut impl Iterator<Item = String>) -> Result<Option<u64>, String> {
    match args.nth(1) {
        None => Ok(None),
        Some(arg) => arg
            .parse()
            .map(Some)
            .map_err(|_| format!("not a valid seed: {arg:?}")),
    }
}

fn main() {
    let board = [[1, 2, 3], [4, 0, 6], [7, 5, 8]];
    let initial = Puzzle::new(board, 1, 1).expect("demo board is valid");

    let mut config = SearchConfig::default();
    match seed_arg(&mut std::env::args()) {
        Ok(Some(seed)) => config = config.with_random_seed(seed),
        Ok(None) => {}
        Err(message) => {
            eprintln!("{message}");
            eprintln!("usage: puzzle-climber [seed]");
            std::process::exit(2);
        }
    }

    let outcome = hill_climb(initial, &config, &mut ConsoleTrace);

    if outcome.solved {
        println!(
            "{} ({} iterations)",
            "Solved the puzzle!".green().bold(),
            outcome.iterations
        );
    } else {
        println!(
            "{} ({} iterations)",
            "Stuck, could not solve the puzzle".red().bold(),
            outcome.iterations
        );
    }
    println!("{}", outcome.state);
}
