use crate::memo::memo;
use crate::outcome::{Failure, Outcome};
use crate::parser::{Parser, Step};

/// Parser combinator that makes a failure look as if nothing was consumed
///
/// On failure the cursor is moved back to where `parser` started and the
/// failure is reported as unconsumed, so an enclosing [`crate::or::choice`]
/// will try its next alternative. Success is passed through untouched.
pub fn attempt<T: Clone + 'static>(parser: Parser<T>) -> Parser<T> {
    memo(Parser::new(move |cursor, k| {
        let start = cursor.position();
        parser.suspend(Box::new(move |cursor, outcome| match outcome {
            Outcome::Failure(Failure { expected, .. }) => {
                cursor.jump_to(start);
                Step::resume(k, Outcome::Failure(Failure::new(expected, false)))
            }
            success => Step::resume(k, success),
        }))
    }))
}

/// Extension trait to add .attempt() method support for parsers
pub trait AttemptExt<T> {
    fn attempt(self) -> Parser<T>;
}

/// Implement AttemptExt for all parsers
impl<T: Clone + 'static> AttemptExt<T> for Parser<T> {
    fn attempt(self) -> Parser<T> {
        attempt(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Runner;
    use crate::char::string;
    use crate::outcome::Expectation;

    #[test]
    fn test_attempt_success_passes_through() {
        let report = Runner::new().execute(&attempt(string("let")), "let x");
        assert_eq!(report.outcome(), &Outcome::Success("let".to_string()));
        assert_eq!(report.position(), 3);
    }

    #[test]
    fn test_attempt_failure_rewinds() {
        let report = Runner::new().execute(&attempt(string("let")), "lex");
        assert_eq!(
            report.outcome(),
            &Outcome::Failure(Failure::new(Expectation::at("let", 0), false))
        );
        assert_eq!(report.position(), 0);
    }

    #[test]
    fn test_without_attempt_failure_is_consumed() {
        let report = Runner::new().execute(&string("let"), "lex");
        assert!(report.outcome().failure().unwrap().consumed);
        assert_eq!(report.position(), 2);
    }

    #[test]
    fn test_attempt_method_syntax_with_memo() {
        let parser = string("abc").attempt();
        let runner = Runner::new().memoize(true);
        assert!(runner.run(&parser, "abd").is_err());
        assert_eq!(runner.run(&parser, "abc").unwrap(), "abc");
    }
}
