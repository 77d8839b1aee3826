use crate::map::map;
use crate::or::choice;
use crate::parser::Parser;
use crate::prim::{absent, ret};

/// Run `parser`, or succeed with `default` if it fails without consuming input
pub fn option<T: Clone + 'static>(default: T, parser: Parser<T>) -> Parser<T> {
    choice(parser, ret(default))
}

/// Run `parser` and wrap its value in `Some`, or succeed with `None` if it
/// fails without consuming input
pub fn optional<T: 'static>(parser: Parser<T>) -> Parser<Option<T>> {
    choice(map(parser, Some), absent())
}

/// Like [`option`], falling back to `T::default()`
pub fn or_default<T: Clone + Default + 'static>(parser: Parser<T>) -> Parser<T> {
    option(T::default(), parser)
}
