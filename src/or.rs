use crate::outcome::{Failure, Outcome};
use crate::parser::{Parser, Step};
use crate::prim::zero;

/// Parser combinator that tries the first parser, and if it fails, tries the second parser
///
/// The second parser only runs when the first failed *without consuming
/// input*. A failure after consumption is returned as-is; wrap the first
/// parser in [`crate::attempt::attempt`] to make it retryable. When both
/// fail, their expectations are merged into one set.
pub fn choice<T: 'static>(first: Parser<T>, second: Parser<T>) -> Parser<T> {
    Parser::new(move |cursor, k| {
        let start = cursor.position();
        let second = second.clone();
        first.suspend(Box::new(move |cursor, outcome| match outcome {
            Outcome::Failure(failed) if !failed.consumed => {
                cursor.jump_to(start);
                second.suspend(Box::new(move |_, outcome| {
                    let outcome = match outcome {
                        Outcome::Failure(Failure { expected, consumed }) => {
                            Outcome::Failure(Failure::new(failed.expected.merge(expected), consumed))
                        }
                        success => success,
                    };
                    Step::resume(k, outcome)
                }))
            }
            decided => Step::resume(k, decided),
        }))
    })
}

/// Try each parser in order under the same rule as [`choice`]
///
/// An empty list never succeeds.
pub fn choice_all<T: 'static>(parsers: Vec<Parser<T>>) -> Parser<T> {
    parsers
        .into_iter()
        .rev()
        .reduce(|rest, parser| choice(parser, rest))
        .unwrap_or_else(zero)
}

/// Extension trait to add .or() method support for parsers
pub trait OrExt<T> {
    fn or(self, other: Parser<T>) -> Parser<T>;
}

/// Implement OrExt for all parsers
impl<T: 'static> OrExt<T> for Parser<T> {
    fn or(self, other: Parser<T>) -> Parser<T> {
        choice(self, other)
    }
}
