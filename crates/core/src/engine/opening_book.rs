//! An opening book for Connect Four, storing pre-computed scores for opening game positions.

use crate::Position;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;

/// The number of bytes in one on-disk record: a 7-byte little-endian `Key3` plus a 1-byte
/// value. There is no header, length, or checksum; end of file simply ends the book.
const RECORD_SIZE: usize = 8;

/// Errors encountered while loading or saving an opening book file.
#[derive(Debug, Error)]
pub enum OpeningBookError {
    #[error("opening book I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("truncated opening book record: {found} bytes remained before EOF, expected a multiple of {RECORD_SIZE}")]
    TruncatedRecord { found: usize },
}

/// A non-lossy, read-only (after load) cache of pre-computed scores for opening positions.
///
/// Unlike the search's `TranspositionTable`, which is a lossy, fixed-size, overwrite-on-
/// collision cache, this book is a `HashMap` that never drops an entry: opening-book depths
/// produce at most a few million positions, small enough that a hash map is the simplest
/// correct design. Keys are `Position::key3()`, which folds left-right mirror symmetry, so
/// a book half the size of the naive one covers the same opening positions.
#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    map: HashMap<u64, u8>,
}

impl OpeningBook {
    /// Creates a new, empty opening book.
    pub fn new() -> OpeningBook {
        OpeningBook::default()
    }

    /// Returns the number of entries currently held.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true iff the book holds no entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Inserts a raw, already-shifted score for a given `Key3`.
    pub fn insert(&mut self, key3: u64, shifted_score: u8) {
        self.map.insert(key3, shifted_score);
    }

    /// Looks up a position's raw, shifted score in the opening book.
    ///
    /// The caller is responsible for undoing the `score - MIN_SCORE + 1` shift applied when
    /// the entry was written.
    #[inline(always)]
    pub fn get(&self, position: &Position) -> Option<u8> {
        self.map.get(&position.key3()).copied()
    }

    /// Merges `other`'s entries into this book, in place. On a key collision, `other`'s value
    /// wins: this is how a warm-up book is layered on top of the main book, since warm-up
    /// positions were specifically flagged as slow and deserve an authoritative override.
    pub fn merge(&mut self, other: OpeningBook) {
        self.map.extend(other.map);
    }

    /// Saves the opening book to `path` using the fixed 8-byte-record binary format.
    pub fn save(&self, path: &Path) -> Result<(), OpeningBookError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        for (&key3, &value) in &self.map {
            let key_bytes = key3.to_le_bytes();
            writer.write_all(&key_bytes[..7])?;
            writer.write_all(&[value])?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Loads an opening book from `path`, replacing any entries currently held.
    pub fn load(path: &Path) -> Result<OpeningBook, OpeningBookError> {
        let mut book = OpeningBook::new();
        book.load_into(path)?;
        Ok(book)
    }

    /// Reads records from `path` into this book, in place. Used to layer a warm-up book on
    /// top of an already-loaded main book: later reads win on key collision.
    pub fn load_into(&mut self, path: &Path) -> Result<(), OpeningBookError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let mut record = [0u8; RECORD_SIZE];

        loop {
            let mut read = 0;
            while read < RECORD_SIZE {
                match reader.read(&mut record[read..])? {
                    0 => break,
                    n => read += n,
                }
            }

            if read == 0 {
                break;
            }
            if read != RECORD_SIZE {
                return Err(OpeningBookError::TruncatedRecord { found: read });
            }

            let mut key_bytes = [0u8; 8];
            key_bytes[..7].copy_from_slice(&record[..7]);
            let key3 = u64::from_le_bytes(key_bytes);
            self.map.insert(key3, record[7]);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn temp_path(name: &str) -> std::path::PathBuf {
        let mut path = temp_dir();
        path.push(format!("connect-four-ai-opening-book-test-{name}-{}", std::process::id()));
        path
    }

    #[test]
    fn round_trips_through_save_and_load() {
        let path = temp_path("round-trip");
        let mut book = OpeningBook::new();
        book.insert(12345, 17);
        book.insert(u64::MAX >> 8, 1);
        book.save(&path).unwrap();

        let loaded = OpeningBook::load(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.map.get(&12345), Some(&17));
        assert_eq!(loaded.map.get(&(u64::MAX >> 8)), Some(&1));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn merge_prefers_the_other_books_value_on_collision() {
        let mut base = OpeningBook::new();
        base.insert(1, 10);
        base.insert(2, 20);

        let mut warmup = OpeningBook::new();
        warmup.insert(1, 99);

        base.merge(warmup);
        assert_eq!(base.map.get(&1), Some(&99));
        assert_eq!(base.map.get(&2), Some(&20));
    }

    #[test]
    fn load_rejects_a_truncated_final_record() {
        let path = temp_path("truncated");
        std::fs::write(&path, [0u8; 5]).unwrap();

        let err = OpeningBook::load(&path).unwrap_err();
        assert!(matches!(err, OpeningBookError::TruncatedRecord { found: 5 }));

        std::fs::remove_file(&path).unwrap();
    }
}
