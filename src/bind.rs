use crate::map::lift2;
use crate::outcome::Outcome;
use crate::parser::{Cont, Parser, Step};
use std::rc::Rc;

/// Monadic bind: run `parser`, then the parser `f` builds from its value
///
/// A failure of `parser` short-circuits; `f` is never called. If the second
/// parser fails after `parser` consumed input, the failure counts as
/// consuming.
///
/// ```
/// use contparse::{run, bind::bind, char::digit, prim::ret};
///
/// let doubled = bind(digit(), |d| ret(d.to_digit(10).unwrap() * 2));
/// assert_eq!(run(&doubled, "4").unwrap(), 8);
/// ```
pub fn bind<T, U, F>(parser: Parser<T>, f: F) -> Parser<U>
where
    T: 'static,
    U: 'static,
    F: Fn(T) -> Parser<U> + 'static,
{
    let f = Rc::new(f);
    Parser::new(move |cursor, k| {
        let start = cursor.position();
        let f = Rc::clone(&f);
        parser.suspend(Box::new(move |_, outcome| match outcome {
            Outcome::Success(value) => f(value).suspend(Box::new(move |cursor, outcome| {
                let moved = cursor.position() != start;
                Step::resume(k, outcome.consumed_if(moved))
            })),
            Outcome::Failure(failure) => Step::resume(k, Outcome::Failure(failure)),
        }))
    })
}

/// Run `first`, discard its value, then run `second`
pub fn then<T: 'static, U: 'static>(first: Parser<T>, second: Parser<U>) -> Parser<U> {
    bind(first, move |_| second.clone())
}

/// Run `first`, then `second`, keeping the value of `first`
pub fn skip<T: Clone + 'static, U: 'static>(first: Parser<T>, second: Parser<U>) -> Parser<T> {
    lift2(first, second, |value, _| value)
}

/// Run every parser in order, collecting the values that are present
///
/// `None` values are the absent marker and are left out of the result. The
/// first failure stops the sequence; later parsers never run.
pub fn sequence<T: 'static>(parsers: Vec<Parser<Option<T>>>) -> Parser<Vec<T>> {
    let parsers: Rc<[Parser<Option<T>>]> = parsers.into();
    Parser::new(move |cursor, k| {
        let start = cursor.position();
        sequence_from(Rc::clone(&parsers), 0, Vec::new(), start, k)
    })
}

fn sequence_from<T: 'static>(
    parsers: Rc<[Parser<Option<T>>]>,
    index: usize,
    values: Vec<T>,
    start: usize,
    k: Cont<Vec<T>>,
) -> Step {
    let Some(parser) = parsers.get(index).cloned() else {
        return Step::resume(k, Outcome::Success(values));
    };

    parser.suspend(Box::new(move |cursor, outcome| match outcome {
        Outcome::Success(value) => {
            let mut values = values;
            values.extend(value);
            sequence_from(parsers, index + 1, values, start, k)
        }
        Outcome::Failure(failure) => {
            let moved = cursor.position() != start;
            Step::resume(k, Outcome::<Vec<T>>::Failure(failure).consumed_if(moved))
        }
    }))
}

/// Extension trait to add .bind(), .then() and .skip() method support for parsers
pub trait BindExt<T> {
    fn bind<U: 'static, F>(self, f: F) -> Parser<U>
    where
        F: Fn(T) -> Parser<U> + 'static;

    fn then<U: 'static>(self, next: Parser<U>) -> Parser<U>;

    fn skip<U: 'static>(self, next: Parser<U>) -> Parser<T>
    where
        T: Clone;
}

impl<T: 'static> BindExt<T> for Parser<T> {
    fn bind<U: 'static, F>(self, f: F) -> Parser<U>
    where
        F: Fn(T) -> Parser<U> + 'static,
    {
        bind(self, f)
    }

    fn then<U: 'static>(self, next: Parser<U>) -> Parser<U> {
        then(self, next)
    }

    fn skip<U: 'static>(self, next: Parser<U>) -> Parser<T>
    where
        T: Clone,
    {
        skip(self, next)
    }
}
