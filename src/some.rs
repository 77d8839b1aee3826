use crate::many::{repeat, skip_many};
use crate::map::map;
use crate::memo::memo;
use crate::outcome::Outcome;
use crate::parser::{Parser, Step};

/// Parser combinator that matches one or more occurrences of the given parser
///
/// The first occurrence is required and its failure is returned unchanged.
/// The rest follow the rules of [`crate::many::many`].
pub fn many1<T: 'static>(parser: Parser<T>) -> Parser<Vec<T>> {
    Parser::new(move |cursor, k| {
        let before = cursor.position();
        let rest = parser.clone();
        parser.suspend(Box::new(move |cursor, outcome| match outcome {
            Outcome::Success(value) => {
                let values = vec![value];
                if cursor.position() == before {
                    Step::resume(k, Outcome::Success(values))
                } else {
                    repeat(rest, values, k)
                }
            }
            Outcome::Failure(failure) => Step::resume(k, Outcome::Failure(failure)),
        }))
    })
}

/// Like [`many1`], leaving out absent values
///
/// At least one match is still required, even if every match is absent.
pub fn many1_present<T: 'static>(parser: Parser<Option<T>>) -> Parser<Vec<T>> {
    map(many1(parser), |values| values.into_iter().flatten().collect())
}

/// Like [`many1`], discarding the matched values
pub fn skip_many1<T: 'static>(parser: Parser<T>) -> Parser<()> {
    memo(crate::bind::then(parser.clone(), skip_many(parser)))
}

/// Extension trait to add .many1() method support for parsers
pub trait SomeExt<T> {
    fn many1(self) -> Parser<Vec<T>>;
}

/// Implement SomeExt for all parsers
impl<T: 'static> SomeExt<T> for Parser<T> {
    fn many1(self) -> Parser<Vec<T>> {
        many1(self)
    }
}

/// The `many1` values joined into a string
pub fn many1_chars(parser: Parser<char>) -> Parser<String> {
    map(many1(parser), |chars| chars.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Runner;
    use crate::char::{char, digit, string};
    use crate::outcome::{Expectation, Failure};
    use crate::or::choice;
    use crate::prim::ret;

    #[test]
    fn test_many1_zero_matches_fails() {
        let report = Runner::new().execute(&many1(char('a')), "xyz");
        assert_eq!(
            report.outcome(),
            &Outcome::Failure(Failure::new(Expectation::at("a", 0), false))
        );
        assert_eq!(report.position(), 0);
    }

    #[test]
    fn test_many1_one_match() {
        let report = Runner::new().execute(&many1(char('a')), "abc");
        assert_eq!(report.outcome(), &Outcome::Success(vec!['a']));
        assert_eq!(report.position(), 1);
    }

    #[test]
    fn test_many1_multiple_matches() {
        let report = Runner::new().execute(&char('a').many1(), "aaab");
        assert_eq!(report.outcome(), &Outcome::Success(vec!['a', 'a', 'a']));
    }

    #[test]
    fn test_many1_first_consumed_failure_propagates() {
        let report = Runner::new().execute(&many1(string("ab")), "ac");
        assert!(report.outcome().failure().unwrap().consumed);
    }

    #[test]
    fn test_many1_zero_width_stops() {
        let parser = many1(ret('z'));
        assert_eq!(Runner::new().run(&parser, "abc").unwrap(), vec!['z']);
    }

    #[test]
    fn test_many1_present() {
        let item = choice(map(digit(), Some), map(char('_'), |_| None));
        let runner = Runner::new();
        assert_eq!(runner.run(&many1_present(item.clone()), "1_000").unwrap(), vec!['1', '0', '0', '0']);
        assert_eq!(runner.run(&many1_present(item.clone()), "__").unwrap(), Vec::<char>::new());
        assert!(runner.run(&many1_present(item), "x").is_err());
    }

    #[test]
    fn test_many1_chars() {
        let parser = many1_chars(digit());
        assert_eq!(Runner::new().run(&parser, "2024-10").unwrap(), "2024");
    }

    #[test]
    fn test_skip_many1() {
        let runner = Runner::new();
        let report = runner.execute(&skip_many1(char(' ')), "  x");
        assert_eq!(report.outcome(), &Outcome::Success(()));
        assert_eq!(report.position(), 2);
        assert!(runner.run(&skip_many1(char(' ')), "x").is_err());
    }
}
