//! ASCII rendering of a move sequence as a Connect Four board, for the interactive CLI modes.

use connect_four_ai::Position;

/// Renders `sequence` (the same 1-indexed digit format `Position::from_moves` accepts) as a
/// 6x7 grid with column numbers beneath it, alternating `x`/`o` starting from the first player.
///
/// Assumes `sequence` is legal; out-of-range characters are skipped rather than rejected, since
/// by the time a caller has a sequence worth printing it has already gone through
/// `Position::play_sequence`.
pub fn print_board(sequence: &str) {
    let mut grid = [['.'; Position::WIDTH]; Position::HEIGHT];

    for (i, c) in sequence.chars().enumerate() {
        let Some(col) = c.to_digit(10).map(|d| d as usize - 1) else { continue };
        if col >= Position::WIDTH {
            continue;
        }
        let Some(row) = (0..Position::HEIGHT).rev().find(|&row| grid[row][col] == '.') else {
            continue;
        };
        grid[row][col] = if i % 2 == 0 { 'x' } else { 'o' };
    }

    for row in &grid {
        print!("|");
        for cell in row {
            print!("{cell}|");
        }
        println!();
    }

    print!(" ");
    for col in 1..=Position::WIDTH {
        print!("{col} ");
    }
    println!();
}
