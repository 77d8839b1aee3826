use crate::memo::memo;
use crate::outcome::{Expectation, Failure, Outcome};
use crate::parser::{Parser, Step};

/// Parser combinator that names what `parser` expects
///
/// On failure the original expectation is replaced by `message`, reported at
/// the position where `parser` started. Whether input was consumed is kept
/// as it was. An empty message hides the expectation from error reports.
pub fn label<T: Clone + 'static>(parser: Parser<T>, message: impl Into<String>) -> Parser<T> {
    let message = message.into();
    memo(Parser::new(move |cursor, k| {
        let start = cursor.position();
        let message = message.clone();
        parser.suspend(Box::new(move |_, outcome| match outcome {
            Outcome::Failure(Failure { consumed, .. }) => {
                let expected = Expectation::at(message, start);
                Step::resume(k, Outcome::Failure(Failure::new(expected, consumed)))
            }
            success => Step::resume(k, success),
        }))
    }))
}

/// Extension trait to add .label() method support for parsers
pub trait LabelExt<T> {
    fn label(self, message: impl Into<String>) -> Parser<T>;
}

impl<T: Clone + 'static> LabelExt<T> for Parser<T> {
    fn label(self, message: impl Into<String>) -> Parser<T> {
        label(self, message)
    }
}
