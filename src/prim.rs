//! Parsers that decide their outcome without looking at any input.

use crate::outcome::{Expectation, Outcome};
use crate::parser::{Parser, Step};

/// Parser that always succeeds with `value` and consumes nothing
pub fn ret<T: Clone + 'static>(value: T) -> Parser<T> {
    Parser::new(move |_, k| Step::resume(k, Outcome::Success(value.clone())))
}

/// Parser that succeeds with the absent marker: matched, but contributes no
/// node. [`crate::bind::sequence`] drops these values.
pub fn absent<T: 'static>() -> Parser<Option<T>> {
    Parser::new(|_, k| Step::resume(k, Outcome::Success(None)))
}

/// Parser that always fails with `message` without consuming input
pub fn fail<T: 'static>(message: impl Into<String>) -> Parser<T> {
    let message = message.into();
    Parser::new(move |_, k| Step::resume(k, Outcome::fail(Expectation::message(message.clone()))))
}

/// Parser that always fails without saying what it expected
pub fn zero<T: 'static>() -> Parser<T> {
    Parser::new(|_, k| Step::resume(k, Outcome::fail(Expectation::Nothing)))
}

/// Parser that fails reporting `found` as unexpected at the current position
pub fn unexpected<T: 'static>(found: impl Into<String>) -> Parser<T> {
    let found = found.into();
    Parser::new(move |cursor, k| {
        let expected = Expectation::unexpected(found.clone(), cursor.position());
        Step::resume(k, Outcome::fail(expected))
    })
}
