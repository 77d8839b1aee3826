use crate::map::map;
use crate::memo::memo;
use crate::outcome::Outcome;
use crate::parser::{Cont, Parser, Step};

/// Parser combinator that matches zero or more occurrences of the given parser
///
/// Stops at the first failure that consumed nothing. A failure that did
/// consume input is propagated. An occurrence that succeeds without moving
/// the cursor is kept and ends the repetition, so parsers that can match
/// the empty string cannot loop forever.
pub fn many<T: 'static>(parser: Parser<T>) -> Parser<Vec<T>> {
    Parser::new(move |_, k| repeat(parser.clone(), Vec::new(), k))
}

/// Like [`many`] over a parser that may succeed with the absent marker
///
/// `None` values are matches that contribute nothing and are left out of
/// the result, the way [`crate::bind::sequence`] leaves them out.
pub fn many_present<T: 'static>(parser: Parser<Option<T>>) -> Parser<Vec<T>> {
    map(many(parser), |values| values.into_iter().flatten().collect())
}

/// Like [`many`], discarding the matched values
pub fn skip_many<T: 'static>(parser: Parser<T>) -> Parser<()> {
    memo(map(many(parser), |_| ()))
}

/// Keep running `parser`, appending to `values`, until it stops matching.
pub(crate) fn repeat<T: 'static>(parser: Parser<T>, values: Vec<T>, k: Cont<Vec<T>>) -> Step {
    Step::next(move |cursor| {
        let before = cursor.position();
        let again = parser.clone();
        parser.invoke(
            cursor,
            Box::new(move |cursor, outcome| {
                let mut values = values;
                match outcome {
                    Outcome::Success(value) => {
                        values.push(value);
                        if cursor.position() == before {
                            Step::resume(k, Outcome::Success(values))
                        } else {
                            repeat(again, values, k)
                        }
                    }
                    Outcome::Failure(failure) if failure.consumed => {
                        Step::resume(k, Outcome::Failure(failure))
                    }
                    Outcome::Failure(_) => {
                        cursor.jump_to(before);
                        Step::resume(k, Outcome::Success(values))
                    }
                }
            }),
        )
    })
}

/// Extension trait to add .many() method support for parsers
pub trait ManyExt<T> {
    fn many(self) -> Parser<Vec<T>>;
}

/// Implement ManyExt for all parsers
impl<T: 'static> ManyExt<T> for Parser<T> {
    fn many(self) -> Parser<Vec<T>> {
        many(self)
    }
}
