//! Provides the core solving logic for the Connect Four AI.

use crate::{MoveSorter, OpeningBook, OpeningBookError, Position, TranspositionTable};
use rand::seq::SliceRandom;
use std::collections::BTreeMap;
use std::path::Path;

/// A strong solver for finding the exact score of Connect Four positions.
///
/// This struct implements a high-performance negamax search algorithm with several
/// optimisations, including:
/// - Alpha-beta pruning
/// - Score-based move ordering to prioritise stronger moves
/// - A transposition table to cache results of previously seen positions
/// - A binary search on the score for faster convergence
/// - An optional opening book consulted ahead of search
#[derive(Debug)]
pub struct Solver {
    /// A counter for the number of nodes explored during the last `solve` call.
    pub explored_positions: usize,

    /// The transposition table used for caching search results.
    pub transposition_table: TranspositionTable,

    /// The opening book for instant lookups of early-game positions, if one has been loaded.
    pub opening_book: Option<OpeningBook>,
}

impl Solver {
    /// A pre-sorted list of columns to check, starting from the centre column.
    const COLUMNS: [usize; Position::WIDTH] = const {
        let mut columns = [0; Position::WIDTH];
        let mut i = 0;
        while i < Position::WIDTH {
            columns[i] = (Position::WIDTH as i32 / 2 + (1 - 2 * (i as i32 % 2)) * (i as i32 + 1) / 2) as usize;
            i += 1;
        }
        columns
    };

    /// Creates a new `Solver` with an empty transposition table and no opening book.
    pub fn new() -> Solver {
        Self::default()
    }

    /// Loads an opening book from `path`, replacing any book currently held.
    pub fn load_opening_book(&mut self, path: &Path) -> Result<(), OpeningBookError> {
        self.opening_book = Some(OpeningBook::load(path)?);
        Ok(())
    }

    /// Loads a warm-up book from `path`, layering it on top of any book already loaded.
    ///
    /// Entries from the warm-up book take precedence over the main book on key collision,
    /// since warm-up positions were specifically flagged as slow during self-play.
    pub fn load_warmup_book(&mut self, path: &Path) -> Result<(), OpeningBookError> {
        match self.opening_book.as_mut() {
            Some(book) => book.load_into(path),
            None => {
                self.opening_book = Some(OpeningBook::load(path)?);
                Ok(())
            }
        }
    }

    /// Resets the solver's per-search state: the node counter and the transposition table.
    ///
    /// Call this between unrelated searches, not between recursive calls exploring the same
    /// game tree, where the retained memoization is the point.
    pub fn reset(&mut self) {
        self.explored_positions = 0;
        self.transposition_table.reset();
    }

    /// Solves a position to find its exact game-theoretic score.
    ///
    /// Uses a binary search over the possible score range, repeatedly calling the negamax
    /// search with a null window to test whether the true score lies above or below a probe
    /// value. This converges to the exact score faster than a single full-window search.
    ///
    /// Assumes the given position is valid and not already won by either player.
    ///
    /// Returns a positive score if the side to move wins (higher is faster), zero for a draw,
    /// and a negative score if the side to move loses (more negative is slower to lose).
    pub fn solve(&mut self, position: &Position) -> i8 {
        self.explored_positions = 0;

        if let Some(shifted) = self.opening_book.as_ref().and_then(|book| book.get(position)) {
            return shifted as i8 + Position::MIN_SCORE - 1;
        }

        if position.can_win_next() {
            return (Position::BOARD_SIZE as i8 + 1 - position.get_moves() as i8) / 2;
        }

        let mut min = -((Position::BOARD_SIZE - position.get_moves()) as i8) / 2;
        let mut max = (Position::BOARD_SIZE + 1 - position.get_moves()) as i8 / 2;

        while min < max {
            let mut med = min + (max - min) / 2;
            if med <= 0 && min / 2 < med {
                med = min / 2;
            } else if med >= 0 && max / 2 > med {
                med = max / 2;
            }

            let score = self.negamax(position, med, med + 1);
            if score <= med {
                max = score;
            } else {
                min = score;
            }
        }

        min
    }

    /// Finds the best column to play in a given position.
    ///
    /// The empty board is special-cased to the centre column without invoking the solver, and
    /// an immediately winning move is always taken. Otherwise, the move (or one of the moves,
    /// chosen uniformly at random) with the best resulting score for the side to move is
    /// returned.
    pub fn find_best_move(&mut self, position: &Position) -> usize {
        if position.get_moves() == 0 {
            return Position::WIDTH / 2;
        }

        let groups = self.analyze(position);
        groups
            .first()
            .and_then(|group| group.first())
            .copied()
            .unwrap_or_else(|| {
                Self::COLUMNS
                    .iter()
                    .copied()
                    .find(|&column| position.can_play(column))
                    .expect("analyze is only called on positions with at least one legal move")
            })
    }

    /// Groups every legal move by how good it is for the side to move, best group first.
    ///
    /// If any legal move wins immediately, it is the sole group (with every immediately
    /// winning column, in random order, if there is more than one). Otherwise, columns are
    /// grouped by the resulting score and the groups are ordered best to worst; within each
    /// group, columns are shuffled. The HTTP layer uses this to pick the best move that is
    /// also present in a caller-supplied list of currently valid moves, falling back to the
    /// next-best group when the top group is entirely excluded.
    pub fn analyze(&mut self, position: &Position) -> Vec<Vec<usize>> {
        let mut winning = Vec::new();
        let mut remaining = Vec::new();

        for &column in Self::COLUMNS.iter() {
            if !position.can_play(column) {
                continue;
            }
            if position.is_winning_move(column) {
                winning.push(column);
            } else {
                remaining.push(column);
            }
        }

        let mut rng = rand::rng();

        if !winning.is_empty() {
            winning.shuffle(&mut rng);
            return vec![winning];
        }

        let mut by_score: BTreeMap<i8, Vec<usize>> = BTreeMap::new();
        for column in remaining {
            let mut child = *position;
            child.play_col(column);
            let score = -self.solve(&child);
            by_score.entry(score).or_default().push(column);
        }

        by_score
            .into_iter()
            .rev()
            .map(|(_, mut columns)| {
                columns.shuffle(&mut rng);
                columns
            })
            .collect()
    }

    /// The core negamax search function with alpha-beta pruning and transposition table
    /// memoization.
    ///
    /// Assumes the side to move cannot win in one move (checked by the caller via
    /// `can_win_next`/`solve`'s own check, or by the preceding frame having excluded the
    /// winning child already). Returns a value that equals the true score when it falls
    /// inside `[alpha, beta)`, and otherwise only bounds the true score on the side the
    /// window was exceeded.
    fn negamax(&mut self, position: &Position, mut alpha: i8, mut beta: i8) -> i8 {
        debug_assert!(alpha < beta);
        self.explored_positions += 1;

        let next = position.possible_non_losing_moves();
        if next == 0 {
            return -((Position::BOARD_SIZE - position.get_moves()) as i8) / 2;
        }

        if position.get_moves() >= Position::BOARD_SIZE - 2 {
            return 0;
        }

        let min = -((Position::BOARD_SIZE - 2 - position.get_moves()) as i8) / 2;
        if alpha < min {
            alpha = min;
            if alpha >= beta {
                return alpha;
            }
        }

        let mut max = ((Position::BOARD_SIZE - 1 - position.get_moves()) as i8) / 2;
        let key = position.key();
        let stored = self.transposition_table.get(key);
        if stored != 0 {
            max = stored as i8 + Position::MIN_SCORE - 1;
        }
        if beta > max {
            beta = max;
            if alpha >= beta {
                return beta;
            }
        }

        let mut moves = MoveSorter::new();
        for &column in Self::COLUMNS.iter().rev() {
            let move_bit = next & Position::column_mask(column);
            if move_bit != 0 {
                moves.add(column, position.score_move(move_bit));
            }
        }

        for column in moves {
            let mut child = *position;
            child.play_col(column);
            let score = -self.negamax(&child, -beta, -alpha);

            // Fail-high: break rather than return, so every explored node still reaches the
            // unconditional store below, exactly as the reference solver's table update does.
            if score >= beta {
                alpha = score;
                break;
            }
            if score > alpha {
                alpha = score;
            }
        }

        self.transposition_table.put(key, (alpha - Position::MIN_SCORE + 1) as u8);
        alpha
    }
}

impl Default for Solver {
    fn default() -> Solver {
        Solver {
            explored_positions: 0,
            transposition_table: TranspositionTable::new(),
            opening_book: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_empty_board_to_the_canonical_first_player_score() {
        // The published game-theoretic value of the empty 7x6 board: a first-player win,
        // eighteen plies before the end of a perfectly-played game.
        let mut solver = Solver::new();
        assert_eq!(solver.solve(&Position::new()), 18);
    }

    #[test]
    fn finds_the_centre_column_on_an_empty_board() {
        let mut solver = Solver::new();
        assert_eq!(solver.find_best_move(&Position::new()), 3);
    }

    #[test]
    fn finds_an_immediately_winning_move() {
        let mut solver = Solver::new();
        // The mover has three stacked in column 0 (see position.rs's equivalent fixture).
        let pos = Position::from_moves("121213").unwrap();
        assert!(pos.is_winning_move(0));
        assert_eq!(solver.find_best_move(&pos), 0);
    }

    #[test]
    fn solve_is_idempotent_across_repeated_calls() {
        let mut solver = Solver::new();
        let pos = Position::from_moves("443355").unwrap();
        let first = solver.solve(&pos);
        let second = solver.solve(&pos);
        assert_eq!(first, second);
    }

    #[test]
    fn solve_agrees_with_its_mirror() {
        let mut solver = Solver::new();
        let pos = Position::from_moves("4453").unwrap();
        let a = solver.solve(&pos);
        solver.reset();
        let b = solver.solve(&pos.mirrored());
        assert_eq!(a, b);
    }

    #[test]
    fn find_best_move_always_returns_a_playable_column() {
        let mut solver = Solver::new();
        let pos = Position::from_moves("444445555522").unwrap();
        let best = solver.find_best_move(&pos);
        assert!(pos.can_play(best));
    }

    #[test]
    fn analyze_groups_by_score_descending() {
        let mut solver = Solver::new();
        let pos = Position::from_moves("4").unwrap();
        let groups = solver.analyze(&pos);
        assert!(!groups.is_empty());
        let mut scores = Vec::new();
        for group in &groups {
            for &column in group {
                let mut child = pos;
                child.play_col(column);
                scores.push(-solver.solve(&child));
            }
        }
        let mut sorted = scores.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(scores, sorted);
    }
}
