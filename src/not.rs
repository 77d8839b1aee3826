use crate::outcome::{Expectation, Outcome};
use crate::parser::{Parser, Step};

/// Parser combinator that performs negative lookahead
///
/// Succeeds with () if the given parser fails at the current position.
/// Fails if the given parser succeeds, reporting what it matched as
/// unexpected. Never consumes any input regardless of outcome.
pub fn not_followed_by<T: 'static>(parser: Parser<T>) -> Parser<()> {
    Parser::new(move |cursor, k| {
        let start = cursor.position();
        parser.suspend(Box::new(move |cursor, outcome| {
            let end = cursor.position();
            cursor.jump_to(start);
            let outcome = match outcome {
                Outcome::Success(_) => {
                    let found = cursor.slice(0, end.saturating_sub(start));
                    Outcome::fail(Expectation::unexpected(found, start))
                }
                Outcome::Failure(_) => Outcome::Success(()),
            };
            Step::resume(k, outcome)
        }))
    })
}

/// Extension trait to add .not_followed_by() method support for parsers
pub trait NotExt<T> {
    fn not_followed_by(self) -> Parser<()>;
}

/// Implement NotExt for all parsers
impl<T: 'static> NotExt<T> for Parser<T> {
    fn not_followed_by(self) -> Parser<()> {
        not_followed_by(self)
    }
}
