//! A transposition table implementation for storing and retrieving game state evaluations.

/// A single slot in the transposition table: a truncated key alongside its stored value.
#[derive(Debug, Default, Copy, Clone)]
struct TTEntry {
    /// The lower 32 bits of the full position key, used to verify the entry on lookup.
    key: u32,
    /// The stored value. `0` means the slot is empty.
    value: u8,
}

/// A fixed-size, direct-indexed transposition table used to memoize search results.
///
/// Unlike the opening book (which is a non-lossy `HashMap`), this table is a classic
/// chess-engine style cache: one slot per index, no probing, and a later `put` at the same
/// index silently overwrites whatever was there. Collisions lose data, which is acceptable
/// here because the table only ever holds exact scores for the position that produced them;
/// losing an entry costs re-search time, never correctness.
#[derive(Debug)]
pub struct TranspositionTable {
    entries: Vec<TTEntry>,
}

impl TranspositionTable {
    /// The number of slots in the table. A prime just above a power of two, matching the
    /// capacity used by the classic Connect Four solver this table's design is modeled on.
    pub const SIZE: usize = (1 << 23) + 9;

    /// Creates a new, empty transposition table, allocating all of its slots up front.
    pub fn new() -> TranspositionTable {
        Self::default()
    }

    /// Calculates the table index for a given position key.
    #[inline(always)]
    fn index(&self, key: u64) -> usize {
        (key % Self::SIZE as u64) as usize
    }

    /// Clears every slot in the table, discarding all memoized scores.
    ///
    /// Called between unrelated searches (e.g. successive independent CLI invocations), not
    /// between recursive calls exploring the same game tree, where the memoization is the
    /// point.
    pub fn reset(&mut self) {
        self.entries.iter_mut().for_each(|entry| *entry = TTEntry::default());
    }

    /// Stores `value` for `key`, unconditionally overwriting whatever occupied the slot.
    ///
    /// `value` must be non-zero; `0` is reserved to mean "empty" so that `get` can distinguish
    /// a stored value from a miss.
    pub fn put(&mut self, key: u64, value: u8) {
        debug_assert!(value != 0, "0 is reserved to mean a transposition table miss");
        let pos = self.index(key);
        self.entries[pos] = TTEntry { key: key as u32, value };
    }

    /// Retrieves the value stored for `key`, or `0` if the slot is empty or holds another key.
    pub fn get(&self, key: u64) -> u8 {
        let pos = self.index(key);
        let entry = &self.entries[pos];
        if entry.value != 0 && entry.key == key as u32 {
            entry.value
        } else {
            0
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> TranspositionTable {
        TranspositionTable {
            entries: vec![TTEntry::default(); Self::SIZE],
        }
    }
}
