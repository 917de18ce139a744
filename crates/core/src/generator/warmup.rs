//! Builds a secondary "warm-up" opening book from positions flagged slow during self-play.

use super::GeneratorError;
use crate::{OpeningBook, Position, Solver};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

/// Reads move sequences for positions that took too long to solve during self-play (one per
/// line, collected by the CLI's `--train` mode) and builds a book covering each such
/// position's legal, undecided children, solved directly via `solver`.
///
/// The resulting book is meant to be loaded on top of the main opening book at startup, with
/// its entries taking precedence on key collision.
pub fn warmup(hard_positions: &Path, solver: &mut Solver) -> Result<OpeningBook, GeneratorError> {
    let mut book = OpeningBook::new();
    let mut covered_positions = 0usize;

    for line in BufReader::new(File::open(hard_positions)?).lines() {
        let line = line?;
        let sequence = line.trim();
        if sequence.is_empty() {
            continue;
        }

        let position = Position::from_moves(sequence)?;
        covered_positions += 1;

        for col in 0..Position::WIDTH {
            if !position.can_play(col) || position.is_winning_move(col) {
                continue;
            }

            let mut child = position;
            child.play_col(col);
            if child.is_won() {
                continue;
            }

            let score = solver.solve(&child);
            book.insert(child.key3(), (score - Position::MIN_SCORE + 1) as u8);
        }
    }

    info!(covered_positions, entries = book.len(), "warm-up book generated");
    Ok(book)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_every_undecided_child_of_each_hard_position() {
        let path = std::env::temp_dir().join(format!(
            "connect-four-ai-warmup-test-{}",
            std::process::id()
        ));
        std::fs::write(&path, "4\n44\n").unwrap();

        let mut solver = Solver::new();
        let book = warmup(&path, &mut solver).unwrap();

        let first = Position::from_moves("4").unwrap();
        let legal_children = (0..Position::WIDTH)
            .filter(|&col| first.can_play(col) && !first.is_winning_move(col))
            .count();
        assert!(book.len() >= legal_children);

        std::fs::remove_file(&path).unwrap();
    }
}
