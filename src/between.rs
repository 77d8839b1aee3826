use crate::bind::{skip, then};
use crate::parser::Parser;

/// Parser combinator that matches content between opening and closing delimiters
///
/// Only the content's value is kept.
pub fn between<O, C, T>(open: Parser<O>, close: Parser<C>, content: Parser<T>) -> Parser<T>
where
    O: 'static,
    C: 'static,
    T: Clone + 'static,
{
    then(open, skip(content, close))
}

/// Extension trait to add .between() method support for parsers
pub trait BetweenExt<T> {
    fn between<O: 'static, C: 'static>(self, open: Parser<O>, close: Parser<C>) -> Parser<T>;
}

/// Implement BetweenExt for all parsers
impl<T: Clone + 'static> BetweenExt<T> for Parser<T> {
    fn between<O: 'static, C: 'static>(self, open: Parser<O>, close: Parser<C>) -> Parser<T> {
        between(open, close, self)
    }
}
