use crate::bind::then;
use crate::many::many;
use crate::map::lift2;
use crate::or::choice;
use crate::parser::Parser;
use crate::prim::ret;

/// Parser combinator that matches one or more items separated by `separator`
///
/// A separator that is not followed by an item is an error once the
/// separator has consumed input.
pub fn sep_by1<T, S>(parser: Parser<T>, separator: Parser<S>) -> Parser<Vec<T>>
where
    T: Clone + 'static,
    S: 'static,
{
    let rest = many(then(separator, parser.clone()));
    lift2(parser, rest, |first, rest| {
        let mut items = Vec::with_capacity(rest.len() + 1);
        items.push(first);
        items.extend(rest);
        items
    })
}

/// Parser combinator that matches zero or more items separated by `separator`
pub fn sep_by<T, S>(parser: Parser<T>, separator: Parser<S>) -> Parser<Vec<T>>
where
    T: Clone + 'static,
    S: 'static,
{
    choice(sep_by1(parser, separator), ret(Vec::new()))
}

/// Extension trait to add .sep_by() and .sep_by1() method support for parsers
pub trait SeparatedListExt<T> {
    fn sep_by<S: 'static>(self, separator: Parser<S>) -> Parser<Vec<T>>;
    fn sep_by1<S: 'static>(self, separator: Parser<S>) -> Parser<Vec<T>>;
}

impl<T: Clone + 'static> SeparatedListExt<T> for Parser<T> {
    fn sep_by<S: 'static>(self, separator: Parser<S>) -> Parser<Vec<T>> {
        sep_by(self, separator)
    }

    fn sep_by1<S: 'static>(self, separator: Parser<S>) -> Parser<Vec<T>> {
        sep_by1(self, separator)
    }
}
