use thiserror::Error;

/// Errors that can occur when parsing or constructing Connect Four positions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionParsingError {
    /// The board string has an invalid number of characters.
    #[error("invalid board string length: found {actual}, expected {expected}")]
    InvalidBoardStringLength { actual: usize, expected: usize },
    /// The move sequence contains an invalid (non-numeric) character.
    #[error("invalid character '{character}' at index {index}")]
    InvalidCharacter { character: char, index: usize },
    /// The move sequence contains an invalid, out of range column.
    #[error("invalid column {column} at index {index}")]
    InvalidColumn { column: usize, index: usize },
    /// The move sequence contains an invalid move as a result of a full column.
    #[error("invalid move at index {index}: column {column} is full")]
    InvalidFullColumnMove { column: usize, index: usize },
    /// The move sequence contains an invalid move that results in a winning position.
    #[error("invalid move at index {index}: column {column} results in a win")]
    InvalidWinningMove { column: usize, index: usize },
    /// A board payload did not have the expected number of rows/columns of cells.
    #[error("invalid board dimensions: found {actual} cells, expected {expected}")]
    InvalidBoardDimensions { actual: usize, expected: usize },
    /// A column in a board payload has an occupied cell above an empty one.
    #[error("floating piece in column {column}: occupied cell above an empty one")]
    FloatingPiece { column: usize },
    /// The declared side to move does not match the parity of the occupied cell count.
    #[error("side-to-move mismatch: board implies player {implied} to move, request declared player {declared}")]
    SideToMoveMismatch { implied: u8, declared: u8 },
    /// The board payload already contains a completed four-in-a-row.
    #[error("board is already a won position")]
    AlreadyWon,
}
