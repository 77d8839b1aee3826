use crate::error::line_and_column;
use crate::memo::MemoKey;
use crate::outcome::Outcome;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// Stored result of one memoized attempt.
struct Entry<T> {
    outcome: Outcome<T>,
    end: usize,
}

/// Packrat cache counters for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MemoStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
}

/// Input plus position for a single parse run
///
/// The input is never mutated. The position only moves forward through
/// [`Cursor::advance`]; moving it anywhere else goes through
/// [`Cursor::jump_to`], which is reserved for backtracking and memo restores.
pub struct Cursor {
    input: Vec<char>,
    position: usize,
    memoize: bool,
    cache: HashMap<MemoKey, HashMap<usize, Box<dyn Any>>>,
    stats: MemoStats,
}

impl Cursor {
    pub fn new(input: &str) -> Self {
        Cursor::from_chars(input.chars().collect())
    }

    pub fn from_chars(input: Vec<char>) -> Self {
        Cursor {
            input,
            position: 0,
            memoize: false,
            cache: HashMap::new(),
            stats: MemoStats::default(),
        }
    }

    pub fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    pub fn memoize(&self) -> bool {
        self.memoize
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of elements left after the current position.
    pub fn remaining(&self) -> usize {
        self.input.len() - self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// The whole input, independent of the position.
    pub fn input(&self) -> &[char] {
        &self.input
    }

    /// Element at `position + offset`, or `None` past the end of input.
    pub fn peek(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    /// Text between `start` and `end`, both relative to the current position
    /// and clamped to the end of input.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let len = self.input.len();
        let from = (self.position + start).min(len);
        let to = (self.position + end).clamp(from, len);
        self.input[from..to].iter().collect()
    }

    /// Consume `n` elements, stopping at the end of input.
    pub fn advance(&mut self, n: usize) {
        self.position = (self.position + n).min(self.input.len());
    }

    /// Move directly to an absolute position.
    ///
    /// # Panics
    ///
    /// Panics if `absolute` lies beyond the end of input; that is a bug in the
    /// grammar, not in the input.
    pub fn jump_to(&mut self, absolute: usize) {
        assert!(
            absolute <= self.input.len(),
            "cannot jump to position {} of an input of length {}",
            absolute,
            self.input.len()
        );
        self.position = absolute;
    }

    /// 1-based line and column of an absolute offset.
    pub fn line_and_column(&self, offset: usize) -> (usize, usize) {
        line_and_column(&self.input, offset)
    }

    /// Look up the outcome `key` produced at the current position.
    ///
    /// On a hit the cursor moves to where that attempt ended.
    pub fn get_cached<T: Clone + 'static>(&mut self, key: &MemoKey) -> Option<Outcome<T>> {
        if !self.memoize {
            return None;
        }

        let entry = self
            .cache
            .get(key)
            .and_then(|by_position| by_position.get(&self.position))
            .and_then(|entry| entry.downcast_ref::<Entry<T>>());

        match entry {
            Some(entry) => {
                let outcome = entry.outcome.clone();
                let end = entry.end;
                trace!(?key, start = self.position, end, "memo hit");
                self.stats.hits += 1;
                self.position = end;
                Some(outcome)
            }
            None => {
                trace!(?key, start = self.position, "memo miss");
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Remember `outcome` for `key` at `start`, ending at the current position.
    pub fn put_cached<T: Clone + 'static>(&mut self, key: &MemoKey, start: usize, outcome: &Outcome<T>) {
        if !self.memoize {
            return;
        }

        let entry = Entry {
            outcome: outcome.clone(),
            end: self.position,
        };
        let by_position = self.cache.entry(key.clone()).or_default();
        if by_position.insert(start, Box::new(entry)).is_none() {
            self.stats.entries += 1;
        }
    }

    pub fn stats(&self) -> MemoStats {
        self.stats
    }
}

impl fmt::Debug for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position)
            .field("len", &self.input.len())
            .field("memoize", &self.memoize)
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Expectation;

    #[test]
    fn test_basic_operations() {
        let mut cursor = Cursor::new("hello\nworld");

        assert_eq!(cursor.peek(0), Some('h'));
        assert_eq!(cursor.peek(4), Some('o'));
        assert_eq!(cursor.remaining(), 11);

        cursor.advance(2);
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.peek(0), Some('l'));
        assert_eq!(cursor.slice(0, 3), "llo");
        assert_eq!(cursor.remaining(), 9);
    }

    #[test]
    fn test_end_of_input() {
        let mut cursor = Cursor::new("ab");
        cursor.advance(5);

        assert!(cursor.is_at_end());
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.peek(0), None);
        assert_eq!(cursor.slice(0, 4), "");
    }

    #[test]
    fn test_empty_input() {
        let cursor = Cursor::new("");
        assert!(cursor.is_at_end());
        assert_eq!(cursor.peek(0), None);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_jump_to_backwards() {
        let mut cursor = Cursor::new("abcd");
        cursor.advance(3);
        cursor.jump_to(1);
        assert_eq!(cursor.peek(0), Some('b'));
    }

    #[test]
    #[should_panic(expected = "cannot jump")]
    fn test_jump_past_end_panics() {
        let mut cursor = Cursor::new("ab");
        cursor.jump_to(3);
    }

    #[test]
    fn test_line_and_column() {
        let cursor = Cursor::new("abc\ndef");
        assert_eq!(cursor.line_and_column(0), (1, 1));
        assert_eq!(cursor.line_and_column(4), (2, 1));
        assert_eq!(cursor.line_and_column(5), (2, 2));
    }

    #[test]
    fn test_cache_disabled_by_default() {
        let key = MemoKey::fresh();
        let mut cursor = Cursor::new("abc");
        cursor.advance(1);
        cursor.put_cached(&key, 0, &Outcome::Success('a'));
        cursor.jump_to(0);

        assert_eq!(cursor.get_cached::<char>(&key), None);
        assert_eq!(cursor.stats(), MemoStats::default());
    }

    #[test]
    fn test_cache_hit_restores_end_position() {
        let key = MemoKey::fresh();
        let mut cursor = Cursor::new("abc").with_memoize(true);
        cursor.advance(2);
        cursor.put_cached(&key, 0, &Outcome::Success("ab".to_string()));
        cursor.jump_to(0);

        let hit = cursor.get_cached::<String>(&key);
        assert_eq!(hit, Some(Outcome::Success("ab".to_string())));
        assert_eq!(cursor.position(), 2);

        let stats = cursor.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn test_cache_keyed_by_identity_and_position() {
        let first = MemoKey::fresh();
        let second = MemoKey::fresh();
        let mut cursor = Cursor::new("abc").with_memoize(true);
        cursor.put_cached(&first, 0, &Outcome::<char>::fail(Expectation::message("x")));

        assert_eq!(cursor.get_cached::<char>(&second), None);
        cursor.advance(1);
        assert_eq!(cursor.get_cached::<char>(&first), None);
        assert_eq!(cursor.stats().misses, 2);
    }
}
