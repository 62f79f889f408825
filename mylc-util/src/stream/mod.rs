//! A generic rewindable lookahead buffer.
//!
//! `BufferedStream<T>` decorates any [`Sentinel`]-producing iterator with
//! peeking, accept-history tracking, and a single-checkpoint rewind. Both
//! the lexer (over source characters) and the parser (over tokens) share
//! this exact mechanism rather than each hand-rolling their own lookahead.

/// A value stream that can describe its own "ran out" marker.
///
/// Reading past the end of the underlying source must be idempotent: the
/// sentinel keeps being produced forever after, so callers never need to
/// special-case "no more input" as a distinct error.
pub trait Sentinel: Clone {
    fn is_sentinel(&self) -> bool;
}

pub struct BufferedStream<T: Sentinel> {
    source: Box<dyn Iterator<Item = T>>,
    /// Elements pulled from `source` but not yet consumed, in the order
    /// they'll be read (front = next `next()`/`peek(0)`).
    lookahead: Vec<T>,
    /// Elements consumed via `accept()`, in read order.
    accept_history: Vec<T>,
    /// Index into `accept_history` marking the last `mark_checkpoint()`.
    rewind_checkpoint: usize,
    sentinel: T,
}

impl<T: Sentinel> BufferedStream<T> {
    pub fn new(source: impl Iterator<Item = T> + 'static, sentinel: T) -> Self {
        Self {
            source: Box::new(source),
            lookahead: Vec::new(),
            accept_history: Vec::new(),
            rewind_checkpoint: 0,
            sentinel,
        }
    }

    /// Pulls from the underlying source until the lookahead buffer holds
    /// at least `count` elements (or the source is exhausted, at which
    /// point the sentinel fills the remainder).
    fn fill_to(&mut self, count: usize) {
        while self.lookahead.len() < count {
            match self.source.next() {
                Some(item) => self.lookahead.push(item),
                None => self.lookahead.push(self.sentinel.clone()),
            }
        }
    }

    /// Returns the lookahead element `offset` positions ahead of the
    /// current position without consuming anything. `offset = 0` is the
    /// same element `next()` would return.
    pub fn peek(&mut self, offset: usize) -> T {
        self.fill_to(offset + 1);
        self.lookahead[offset].clone()
    }

    /// Returns whether the stream has nothing left but the sentinel.
    pub fn is_finished(&mut self) -> bool {
        self.peek(0).is_sentinel()
    }

    /// Consumes and returns the current element, advancing the position.
    /// Does not affect accept history.
    pub fn next(&mut self) -> T {
        self.fill_to(1);
        let item = self.lookahead.remove(0);
        if item.is_sentinel() {
            // Keep the sentinel available for every subsequent read.
            self.lookahead.insert(0, item.clone());
        }
        item
    }

    /// Consumes the current element, recording it in the accept history
    /// so a later `rewind()` can replay it.
    pub fn accept(&mut self) {
        let item = self.next();
        self.accept_history.push(item);
    }

    /// Consumes the current element without recording it; indistinguishable
    /// from `next()` except for documenting intent at call sites.
    pub fn discard(&mut self) {
        self.next();
    }

    /// Records the current accept-history length as the point a following
    /// `rewind()` will restore to.
    pub fn mark_checkpoint(&mut self) {
        self.rewind_checkpoint = self.accept_history.len();
    }

    /// Moves every element accepted since the last `mark_checkpoint()`
    /// back in front of the lookahead buffer, in original order, so the
    /// next `next()`/`peek(0)` reproduces the state at the checkpoint.
    pub fn rewind(&mut self) {
        let replay: Vec<T> = self.accept_history.split_off(self.rewind_checkpoint);
        for item in replay.into_iter().rev() {
            self.lookahead.insert(0, item);
        }
        self.rewind_checkpoint = 0;
    }

    /// Drops all accept history and resets the checkpoint.
    pub fn clear_history(&mut self) {
        self.accept_history.clear();
        self.rewind_checkpoint = 0;
    }

    /// Returns everything accepted so far.
    pub fn accept_history(&self) -> &[T] {
        &self.accept_history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Digit {
        Value(u8),
        Eof,
    }

    impl Sentinel for Digit {
        fn is_sentinel(&self) -> bool {
            matches!(self, Digit::Eof)
        }
    }

    fn stream(values: &[u8]) -> BufferedStream<Digit> {
        let values: Vec<Digit> = values.iter().map(|&v| Digit::Value(v)).collect();
        BufferedStream::new(values.into_iter(), Digit::Eof)
    }

    #[test]
    fn peek_does_not_consume() {
        let mut s = stream(&[1, 2, 3]);
        assert_eq!(s.peek(0), Digit::Value(1));
        assert_eq!(s.peek(1), Digit::Value(2));
        assert_eq!(s.next(), Digit::Value(1));
    }

    #[test]
    fn past_eof_yields_sentinel_forever() {
        let mut s = stream(&[1]);
        assert_eq!(s.next(), Digit::Value(1));
        assert_eq!(s.next(), Digit::Eof);
        assert_eq!(s.next(), Digit::Eof);
        assert!(s.is_finished());
    }

    #[test]
    fn rewind_restores_checkpoint() {
        let mut s = stream(&[1, 2, 3, 4]);
        s.accept(); // consumes 1
        s.mark_checkpoint();
        s.accept(); // consumes 2
        s.accept(); // consumes 3
        assert_eq!(s.peek(0), Digit::Value(4));
        s.rewind();
        assert_eq!(s.next(), Digit::Value(2));
        assert_eq!(s.next(), Digit::Value(3));
        assert_eq!(s.next(), Digit::Value(4));
    }

    #[test]
    fn discard_advances_without_recording_history() {
        let mut s = stream(&[1, 2]);
        s.mark_checkpoint();
        s.discard();
        s.rewind();
        // Nothing was recorded since the checkpoint, so rewind is a no-op.
        assert_eq!(s.next(), Digit::Value(2));
    }

    #[test]
    fn clear_history_drops_accept_log() {
        let mut s = stream(&[1, 2, 3]);
        s.accept();
        s.accept();
        s.clear_history();
        assert!(s.accept_history().is_empty());
        s.mark_checkpoint();
        s.rewind();
        assert_eq!(s.next(), Digit::Value(3));
    }
}
