//! Offline pipeline for building opening books: exhaustive exploration of unique, undecided
//! positions, resumable batch scoring, conversion to the binary on-disk format, and a
//! secondary warm-up book for positions flagged slow during self-play.

mod calculate_scores;
mod convert;
mod explore;
mod warmup;

pub use calculate_scores::calculate_scores;
pub use convert::convert_to_binary;
pub use explore::explore;
pub use warmup::warmup;

use thiserror::Error;

/// Errors produced by the generator pipeline's offline phases.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("generator I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid move sequence: {0}")]
    InvalidSequence(#[from] crate::PositionParsingError),
    #[error("opening book failure: {0}")]
    Book(#[from] crate::OpeningBookError),
    #[error("malformed score-book line: {line:?}")]
    MalformedScoreLine { line: String },
}
