use crate::parser::{Parser, WeakParser};
use std::cell::OnceCell;
use std::rc::Rc;

/// A lazy parser that defers the construction of the actual parser until parse time.
/// This is useful for breaking mutual recursion between parser-building functions.
///
/// The factory runs every time the parser runs and the parser it builds
/// lives only as long as that run needs it. A grammar that recurses through
/// `lazy` therefore never owns more of itself than its own definition,
/// however deeply the input nests. Use [`recursive`] to build the grammar
/// once and share it.
pub fn lazy<T, F>(factory: F) -> Parser<T>
where
    T: 'static,
    F: Fn() -> Parser<T> + 'static,
{
    Parser::new(move |_, k| factory().suspend(k))
}

/// Define a parser that refers to itself
///
/// `define` receives a handle standing for the parser being defined. The
/// handle only holds a weak reference, so the grammar does not keep itself
/// alive. Running the handle before `define` has returned, or after the
/// defined parser has been dropped, panics.
///
/// ```
/// use contparse::{run, lazy::recursive, char::char, or::choice, bind::{then, skip}};
///
/// // nested parentheses around a single 'x'
/// let nested = recursive(|nested| {
///     choice(char('x'), then(char('('), skip(nested, char(')'))))
/// });
/// assert_eq!(run(&nested, "((x))").unwrap(), 'x');
/// ```
pub fn recursive<T, F>(define: F) -> Parser<T>
where
    T: 'static,
    F: FnOnce(Parser<T>) -> Parser<T>,
{
    let slot: Rc<OnceCell<WeakParser<T>>> = Rc::new(OnceCell::new());
    let target = Rc::clone(&slot);
    let handle = Parser::new(move |_, k| {
        let Some(parser) = target.get().and_then(|weak| weak.upgrade()) else {
            panic!("recursive parser used before its definition was complete or after it was dropped");
        };
        parser.suspend(k)
    });

    let parser = define(handle);
    if slot.set(parser.downgrade()).is_err() {
        unreachable!("recursive parser slot filled twice");
    }
    parser
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Runner;
    use crate::bind::{skip, then};
    use crate::char::{char, digit};
    use crate::many::many;
    use crate::map::map;
    use crate::or::choice;
    use crate::outcome::Outcome;
    use std::cell::Cell;

    #[test]
    fn test_lazy_basic() {
        let parser = lazy(|| many(char('a')));
        let report = Runner::new().execute(&parser, "aaaa");
        assert_eq!(report.outcome().value().map(Vec::len), Some(4));
        assert_eq!(report.position(), 4);
    }

    #[test]
    fn test_lazy_builds_on_every_run() {
        let builds = Rc::new(Cell::new(0));
        let counter = Rc::clone(&builds);
        let parser = lazy(move || {
            counter.set(counter.get() + 1);
            digit()
        });
        assert_eq!(builds.get(), 0);

        let runner = Runner::new();
        assert_eq!(runner.run(&parser, "1").unwrap(), '1');
        assert_eq!(runner.run(&parser, "2").unwrap(), '2');
        assert_eq!(builds.get(), 2);
    }

    fn list() -> Parser<usize> {
        // '[' list* ']' counting the lists
        let inner = many(lazy(list));
        then(char('['), skip(map(inner, |lists| 1 + lists.iter().sum::<usize>()), char(']')))
    }

    fn nested() -> Parser<usize> {
        // 'x' wrapped in any number of parentheses, counting them
        choice(
            map(char('x'), |_| 0),
            then(char('('), skip(map(lazy(nested), |d| d + 1), char(')'))),
        )
    }

    #[test]
    fn test_lazy_deep_nesting_and_drop() {
        let depth = 100_000;
        let input = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));

        for memoize in [false, true] {
            let grammar = nested();
            let report = Runner::new().memoize(memoize).execute(&grammar, &input);
            assert_eq!(report.outcome(), &Outcome::Success(depth));
            drop(report);
            drop(grammar);
        }
    }

    #[test]
    fn test_lazy_mutual_recursion() {
        assert_eq!(Runner::new().run(&list(), "[[][[]]]").unwrap(), 4);
    }

    #[test]
    fn test_recursive_nesting() {
        let depth = recursive(|nested| {
            choice(
                map(char('x'), |_| 0),
                then(char('('), skip(map(nested, |d| d + 1), char(')'))),
            )
        });

        let input = format!("{}x{}", "(".repeat(500), ")".repeat(500));
        assert_eq!(Runner::new().run(&depth, &input).unwrap(), 500);
    }

    #[test]
    #[should_panic(expected = "recursive parser used before")]
    fn test_recursive_handle_outliving_definition_panics() {
        let escaped = Rc::new(Cell::new(None));
        let keep = Rc::clone(&escaped);
        let parser = recursive(|handle: Parser<char>| {
            keep.set(Some(handle.clone()));
            char('a')
        });
        drop(parser);

        let handle = escaped.take().unwrap();
        let _ = Runner::new().run(&handle, "a");
    }
}
