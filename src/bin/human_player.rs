use clap::Parser;
use std::io::{self, Write};
use twenty48::engine::{Direction, Game};
use twenty48::error::EngineError;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play 2048 in the terminal", long_about = None)]
struct Args {
    /// Seed for tile spawning; the same seed replays the same game
    #[clap(short, long)]
    seed: Option<u64>,

    /// Log every move (overridden by RUST_LOG)
    #[clap(short, long)]
    verbose: bool,
}

enum Command {
    Play(Direction),
    Quit,
}

fn parse_command(input: &str) -> Result<Command, EngineError> {
    match input {
        "q" => Ok(Command::Quit),
        "w" | "\x1b[A" => Ok(Command::Play(Direction::Up)),
        "s" | "\x1b[B" => Ok(Command::Play(Direction::Down)),
        "a" | "\x1b[D" => Ok(Command::Play(Direction::Left)),
        "d" | "\x1b[C" => Ok(Command::Play(Direction::Right)),
        other => other.parse().map(Command::Play),
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut game = match args.seed {
        Some(seed) => Game::with_seed(seed),
        None => Game::new(),
    };
    println!("Welcome to 2048!");

    let stdin = io::stdin();
    loop {
        println!("Moves: {}", game.moves());
        println!("{}", game);

        if game.is_over() {
            println!();
            println!("---------------------");
            println!("GAME OVER!");
            println!("Final Score: {}", game.score());
            println!("Total Moves: {}", game.moves());
            println!("---------------------");
            break;
        }

        print!("Direction (up/down/left/right, wasd or arrows), 'q' to quit: ");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            println!();
            break;
        }

        match parse_command(input.trim()) {
            Ok(Command::Quit) => {
                println!("Thanks for playing!");
                break;
            }
            Ok(Command::Play(direction)) => {
                let movements = game.play(direction);
                if movements.is_empty() {
                    println!("Nothing moves {}.", direction);
                } else {
                    println!("{} tiles moved.", movements.len());
                }
                for movement in &movements {
                    log::debug!("{}", movement);
                }
            }
            Err(e) => println!("{}", e),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert!(matches!(parse_command("q"), Ok(Command::Quit)));
        assert!(matches!(parse_command("w"), Ok(Command::Play(Direction::Up))));
        assert!(matches!(parse_command("\x1b[C"), Ok(Command::Play(Direction::Right))));
        assert!(matches!(parse_command("down"), Ok(Command::Play(Direction::Down))));
        assert!(matches!(
            parse_command("north"),
            Err(EngineError::InvalidDirection(_))
        ));
    }
}
