//! Converts a text score-book into the binary on-disk opening book format.

use super::GeneratorError;
use crate::{OpeningBook, Position};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

/// Reads `"<sequence> <score>"` lines from `input` and writes the binary `.book` file to
/// `output`.
///
/// For each line, the sequence is replayed to recover its `Key3`, and the score is stored
/// shifted by `score - MIN_SCORE + 1` so the stored byte is never zero (zero is reserved
/// elsewhere to mean "no entry").
pub fn convert_to_binary(input: &Path, output: &Path) -> Result<usize, GeneratorError> {
    let mut book = OpeningBook::new();

    for line in BufReader::new(File::open(input)?).lines() {
        let line = line?;
        let (sequence, score) = line
            .rsplit_once(' ')
            .ok_or_else(|| GeneratorError::MalformedScoreLine { line: line.clone() })?;

        let position = Position::from_moves(sequence)?;
        let score: i8 = score
            .parse()
            .map_err(|_| GeneratorError::MalformedScoreLine { line: line.clone() })?;

        book.insert(position.key3(), (score - Position::MIN_SCORE + 1) as u8);
    }

    let entries = book.len();
    info!(entries, "converted text score book to binary");
    book.save(output)?;
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("connect-four-ai-convert-test-{name}-{}", std::process::id()));
        path
    }

    #[test]
    fn converts_text_lines_into_a_loadable_binary_book() {
        let input = temp_path("scores");
        let output = temp_path("book");

        std::fs::write(&input, "4 5\n44 -3\n443 0\n").unwrap();

        let entries = convert_to_binary(&input, &output).unwrap();
        assert_eq!(entries, 3);

        let book = OpeningBook::load(&output).unwrap();
        assert_eq!(book.len(), 3);

        let pos = Position::from_moves("4").unwrap();
        assert_eq!(book.get(&pos), Some((5 - Position::MIN_SCORE + 1) as u8));

        std::fs::remove_file(&input).unwrap();
        std::fs::remove_file(&output).unwrap();
    }

    #[test]
    fn rejects_a_malformed_line() {
        let input = temp_path("malformed");
        let output = temp_path("malformed-book");
        std::fs::write(&input, "not-a-valid-line\n").unwrap();

        let err = convert_to_binary(&input, &output).unwrap_err();
        assert!(matches!(err, GeneratorError::MalformedScoreLine { .. }));

        std::fs::remove_file(&input).unwrap();
    }
}
