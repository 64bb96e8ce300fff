use std::io::{self, Write};

use clap::Parser;
use minefield::game::{Game, RevealResult, Status};
use minefield::{tui, Difficulty, GameConfig};

#[derive(Parser, Debug)]
#[command(name = "minefield", about = "Minesweeper with scoring, hints and three difficulty presets", version)]
struct Args {
    /// Launch TUI mode
    #[arg(long)]
    tui: bool,
    /// Difficulty preset (14x14 board)
    #[arg(long, value_enum, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,
    /// Fixed 10x10 board with 10 mines; ignores --difficulty
    #[arg(long)]
    classic: bool,
    /// Seed (0 = random)
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn print_help() {
    println!("Commands:");
    println!("  r x y     - reveal cell at column x, row y (1-based)");
    println!("  f x y     - toggle flag at x, y (1-based)");
    println!("  hint      - reveal one safe cell (once per game)");
    println!("  n         - retry with the same settings");
    println!("  d level   - new game on easy, medium or hard");
    println!("  q         - quit");
    println!("  h/help    - show this help");
}

fn parse_coords(parts: &[&str]) -> Option<(usize, usize)> {
    if parts.len() < 3 { println!("Usage: {} x y", parts[0]); return None; }
    let x = match parts[1].parse::<usize>() { Ok(v) => v, Err(_) => { println!("Invalid x"); return None; } };
    let y = match parts[2].parse::<usize>() { Ok(v) => v, Err(_) => { println!("Invalid y"); return None; } };
    if x == 0 || y == 0 { println!("Use 1-based coordinates"); return None; }
    Some((x - 1, y - 1))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let mut game = if args.classic {
        Game::with_config(GameConfig::CLASSIC, args.seed)
    } else {
        Game::new(args.difficulty, args.seed)
    };

    if args.tui {
        if let Err(e) = tui::run_tui(game) {
            eprintln!("TUI error: {}", e);
        }
        return;
    }

    let mode = game.difficulty().map_or("Classic", Difficulty::label);
    println!("Minefield {}x{} with {} mines ({}){}", game.size(), game.size(), game.mine_count(), mode, if args.seed != 0 { format!(" seed {}", args.seed) } else { String::new() });
    println!("Coordinates are 1-based. Type 'h' for help.");
    print_help();

    let mut input = String::new();
    let mut announced = false;
    loop {
        game.tick();
        println!("\n{}", game);
        println!("Score {}  Time {}s  Best {}  Flags {}/{}", game.score(), game.elapsed_seconds(), game.high_score(), game.flagged_count(), game.mine_count());
        match game.status() {
            Status::GameOver if !announced => {
                println!("Boom! You hit a mine. Game over. 'n' to retry, 'q' to quit.");
                announced = true;
            }
            Status::Victory if !announced => {
                println!("Congratulations! You cleared the board! 'n' to retry, 'q' to quit.");
                println!("Final board (mines shown):\n{}", game.render(true, true));
                announced = true;
            }
            _ => {}
        }

        print!("> ");
        let _ = io::stdout().flush();
        input.clear();
        match io::stdin().read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = input.trim();
        if line.is_empty() { continue; }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0].to_lowercase().as_str() {
            "q" | "quit" | "exit" => break,
            "h" | "help" => print_help(),
            "r" | "reveal" => {
                let Some((x, y)) = parse_coords(&parts) else { continue };
                if game.reveal(x, y) == RevealResult::NoOp { println!("Nothing to reveal there"); }
            }
            "f" | "flag" => {
                let Some((x, y)) = parse_coords(&parts) else { continue };
                if !game.toggle_flag(x, y) { println!("Cannot flag revealed cell or out of bounds"); }
            }
            "hint" => {
                if game.use_hint() == RevealResult::NoOp { println!("No hint available"); }
            }
            "n" | "new" | "retry" => { game.retry(); announced = false; }
            "d" | "difficulty" => {
                if game.difficulty().is_none() { println!("The classic board has a fixed difficulty"); continue; }
                let Some(level) = parts.get(1) else { println!("Usage: d easy|medium|hard"); continue };
                match <Difficulty as clap::ValueEnum>::from_str(level, true) {
                    Ok(d) => { game.reset(d); announced = false; }
                    Err(_) => println!("Unknown difficulty '{}'", level),
                }
            }
            other => {
                println!("Unknown command '{}'. Type 'h' for help.", other);
            }
        }
    }
}
