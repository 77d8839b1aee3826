use crate::outcome::Outcome;
use crate::parser::{Parser, Step};

/// Absolute character offsets of a parsed region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start position (inclusive)
    pub start: usize,
    /// End position (exclusive)
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Parser that succeeds with the cursor's absolute position
pub fn get_position() -> Parser<usize> {
    Parser::new(|cursor, k| Step::resume(k, Outcome::Success(cursor.position())))
}

/// Parser that moves the cursor to the absolute `position`
///
/// This is an explicit jump; it may move backwards. Jumping past the end of
/// the input is a bug in the grammar and panics.
pub fn set_position(position: usize) -> Parser<()> {
    Parser::new(move |cursor, k| {
        cursor.jump_to(position);
        Step::resume(k, Outcome::Success(()))
    })
}

/// A parser combinator that captures the position span of a successful parse
pub fn with_position<T: 'static>(parser: Parser<T>) -> Parser<(T, Span)> {
    Parser::new(move |cursor, k| {
        let start = cursor.position();
        parser.suspend(Box::new(move |cursor, outcome| {
            let span = Span::new(start, cursor.position());
            Step::resume(k, outcome.map(|value| (value, span)))
        }))
    })
}

/// Extension trait to add .with_position() method support for parsers
pub trait PositionExt<T> {
    fn with_position(self) -> Parser<(T, Span)>;
}

/// Implement PositionExt for all parsers
impl<T: 'static> PositionExt<T> for Parser<T> {
    fn with_position(self) -> Parser<(T, Span)> {
        with_position(self)
    }
}
