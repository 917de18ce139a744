//! Command-line entry point for the Connect Four engine.
//!
//! A single binary covers every way the engine is driven day to day: one-off scoring of move
//! sequences read from stdin, an accumulating variant of the same for exploring one game tree
//! interactively, a human-playable terminal game, engine-vs-engine self-play (for fun or to
//! mine slow positions into a warm-up book), batch regression testing against a scored test
//! file, and serving the JSON move endpoint over HTTP. Exactly one of these modes is selected
//! per invocation.

mod board_display;

use board_display::print_board;
use clap::Parser;
use connect_four_ai::{Position, Solver};
use connect_four_ai_cli::Cli;
use connect_four_ai_http::AppState;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::info;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut solver = Solver::new();
    load_books(&mut solver, cli.book.as_deref(), cli.warmup.as_deref())?;

    if cli.find {
        find_mode(&mut solver)
    } else if cli.cfind {
        cfind_mode(&mut solver)
    } else if cli.play {
        play_mode(&mut solver)
    } else if cli.botgame {
        botgame_mode(&mut solver, cli.games)
    } else if cli.train {
        train_mode(&mut solver, cli.games, cli.threshold, &cli.output)
    } else if let Some(path) = cli.test.as_deref() {
        test_mode(&mut solver, path)
    } else {
        web_mode(solver, cli.port)
    }
}

fn load_books(solver: &mut Solver, book: Option<&Path>, warmup: Option<&Path>) -> anyhow::Result<()> {
    if let Some(path) = book {
        solver.load_opening_book(path)?;
        info!(path = %path.display(), "loaded opening book");
    }
    if let Some(path) = warmup {
        solver.load_warmup_book(path)?;
        info!(path = %path.display(), "loaded warm-up book");
    }
    Ok(())
}

/// Solves `position` and prints its score, node count, search time, and best move, in the
/// format shared by `--find` and `--cfind`.
fn report_move(solver: &mut Solver, sequence: &str, position: &Position) {
    let start = Instant::now();
    let best_move = solver.find_best_move(position);
    let score = solver.solve(position);
    let elapsed = start.elapsed();

    println!(
        "{sequence}: {} moves, score {score}, nodes {}, {:.1} ms, best move column {}",
        position.get_moves(),
        solver.explored_positions,
        elapsed.as_secs_f64() * 1000.0,
        best_move + 1,
    );
}

fn find_mode(solver: &mut Solver) -> anyhow::Result<()> {
    for (line_no, line) in io::stdin().lock().lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match Position::from_moves(line) {
            Ok(position) => report_move(solver, line, &position),
            Err(err) => eprintln!("line {}: {err}", line_no + 1),
        }
    }
    Ok(())
}

fn cfind_mode(solver: &mut Solver) -> anyhow::Result<()> {
    let mut position = Position::new();
    let mut sequence = String::new();

    for (line_no, line) in io::stdin().lock().lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match position.play_sequence(line) {
            Ok(()) => {
                sequence.push_str(line);
                report_move(solver, &sequence, &position);
            }
            Err(err) => eprintln!("line {}: {err}", line_no + 1),
        }
    }
    Ok(())
}

fn play_mode(solver: &mut Solver) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut position = Position::new();
    let mut sequence = String::new();

    print!("Choose your side:\n[1] first\n[2] second\nEnter your choice: ");
    io::stdout().flush()?;
    let human_first = loop {
        let mut input = String::new();
        stdin.read_line(&mut input)?;
        match input.trim() {
            "1" => break true,
            "2" => break false,
            _ => {
                print!("Invalid choice\nEnter your choice: ");
                io::stdout().flush()?;
            }
        }
    };

    println!("The game has started!");

    loop {
        print_board(&sequence);
        let human_turn = (position.get_moves() % 2 == 0) == human_first;

        let column = if human_turn {
            print!("Enter your move: column: ");
            io::stdout().flush()?;
            loop {
                let mut input = String::new();
                stdin.read_line(&mut input)?;
                match input.trim().parse::<usize>() {
                    Ok(col) if (1..=Position::WIDTH).contains(&col) && position.can_play(col - 1) => break col - 1,
                    _ => {
                        print!("Invalid move\nEnter your move: ");
                        io::stdout().flush()?;
                    }
                }
            }
        } else {
            solver.find_best_move(&position)
        };

        let winning = position.is_winning_move(column);
        position.play_col(column);
        sequence.push_str(&(column + 1).to_string());

        if !human_turn {
            println!("Bot has played: column {}", column + 1);
        }

        if winning {
            print_board(&sequence);
            println!("{}", if human_turn { "You win!" } else { "You lose!" });
            break;
        }
        if position.get_moves() == Position::BOARD_SIZE {
            print_board(&sequence);
            println!("It's a draw!");
            break;
        }
    }

    Ok(())
}

fn botgame_mode(solver: &mut Solver, games: usize) -> anyhow::Result<()> {
    for game in 1..=games {
        println!("=== Game {game} of {games} ===");
        let mut position = Position::new();
        let mut sequence = String::new();

        loop {
            print_board(&sequence);
            let mover = if position.get_moves() % 2 == 0 { 1 } else { 2 };
            let column = solver.find_best_move(&position);
            let winning = position.is_winning_move(column);

            position.play_col(column);
            sequence.push_str(&(column + 1).to_string());
            println!("Player {mover} played column {}", column + 1);

            if winning {
                print_board(&sequence);
                println!("Player {mover} wins!");
                break;
            }
            if position.get_moves() == Position::BOARD_SIZE {
                print_board(&sequence);
                println!("Draw!");
                break;
            }
        }
    }
    Ok(())
}

fn train_mode(solver: &mut Solver, games: usize, threshold_secs: f64, output: &Path) -> anyhow::Result<()> {
    let threshold = Duration::from_secs_f64(threshold_secs);
    let mut log = OpenOptions::new().create(true).append(true).open(output)?;
    let mut logged = 0usize;

    for game in 1..=games {
        let mut position = Position::new();
        let mut sequence = String::new();

        loop {
            let start = Instant::now();
            solver.solve(&position);
            let elapsed = start.elapsed();

            if elapsed > threshold {
                writeln!(log, "{sequence}")?;
                logged += 1;
                info!(sequence = %sequence, elapsed_ms = elapsed.as_millis(), "logged slow position");
            }

            let column = solver.find_best_move(&position);
            let winning = position.is_winning_move(column);
            position.play_col(column);
            sequence.push_str(&(column + 1).to_string());

            if winning || position.get_moves() == Position::BOARD_SIZE {
                break;
            }
        }

        info!(game, games, moves = position.get_moves(), logged, "self-play game complete");
    }

    log.flush()?;
    println!("Logged {logged} slow position(s) across {games} game(s) to {}", output.display());
    Ok(())
}

fn test_mode(solver: &mut Solver, path: &Path) -> anyhow::Result<()> {
    let reader = BufReader::new(File::open(path)?);
    let mut passed = 0usize;
    let mut total = 0usize;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some((sequence, expected)) = line.rsplit_once(' ') else {
            eprintln!("line {}: expected \"<sequence> <score>\", got {line:?}", line_no + 1);
            continue;
        };
        let Ok(expected_score) = expected.parse::<i8>() else {
            eprintln!("line {}: not a valid score: {expected:?}", line_no + 1);
            continue;
        };

        let position = match Position::from_moves(sequence) {
            Ok(position) => position,
            Err(err) => {
                eprintln!("line {}: {err}", line_no + 1);
                continue;
            }
        };

        total += 1;
        solver.reset();
        let score = solver.solve(&position);

        if score == expected_score {
            passed += 1;
            println!("{sequence}: {score} [correct]");
        } else {
            println!("{sequence}: {score}, expected {expected_score} [INCORRECT]");
        }
    }

    let accuracy = if total == 0 { 0.0 } else { 100.0 * passed as f64 / total as f64 };
    println!("{passed}/{total} correct ({accuracy:.1}%)");
    Ok(())
}

fn web_mode(solver: Solver, port: Option<u16>) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let port = port
            .or_else(|| std::env::var("PORT").ok().and_then(|value| value.parse().ok()))
            .unwrap_or(connect_four_ai_http::DEFAULT_PORT);
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let state = AppState::new(Arc::new(Mutex::new(solver)));
        connect_four_ai_http::serve(addr, state).await.map_err(anyhow::Error::from)
    })
}
