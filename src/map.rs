use crate::bind::bind;
use crate::parser::{Parser, Step};
use std::rc::Rc;

/// Parser combinator that transforms the output of a parser using a mapping function
pub fn map<T, U, F>(parser: Parser<T>, mapper: F) -> Parser<U>
where
    T: 'static,
    U: 'static,
    F: Fn(T) -> U + 'static,
{
    let mapper = Rc::new(mapper);
    Parser::new(move |_, k| {
        let mapper = Rc::clone(&mapper);
        parser.suspend(Box::new(move |_, outcome| {
            Step::resume(k, outcome.map(|value| mapper(value)))
        }))
    })
}

/// Apply the function produced by `function` to the value produced by `argument`
pub fn ap<A, B, F>(function: Parser<F>, argument: Parser<A>) -> Parser<B>
where
    A: 'static,
    B: 'static,
    F: Fn(A) -> B + 'static,
{
    bind(function, move |f| map(argument.clone(), f))
}

/// Combine the values of two parsers run in sequence
pub fn lift2<A, B, C, F>(first: Parser<A>, second: Parser<B>, f: F) -> Parser<C>
where
    A: Clone + 'static,
    B: 'static,
    C: 'static,
    F: Fn(A, B) -> C + 'static,
{
    let f = Rc::new(f);
    bind(first, move |a| {
        let f = Rc::clone(&f);
        map(second.clone(), move |b| f(a.clone(), b))
    })
}

/// Combine the values of three parsers run in sequence
pub fn lift3<A, B, C, D, F>(first: Parser<A>, second: Parser<B>, third: Parser<C>, f: F) -> Parser<D>
where
    A: Clone + 'static,
    B: Clone + 'static,
    C: 'static,
    D: 'static,
    F: Fn(A, B, C) -> D + 'static,
{
    let f = Rc::new(f);
    bind(first, move |a| {
        let f = Rc::clone(&f);
        let third = third.clone();
        bind(second.clone(), move |b| {
            let f = Rc::clone(&f);
            let a = a.clone();
            map(third.clone(), move |c| f(a.clone(), b.clone(), c))
        })
    })
}

/// Extension trait to add .map() method support for parsers
pub trait MapExt<T> {
    fn map<U: 'static, F>(self, mapper: F) -> Parser<U>
    where
        F: Fn(T) -> U + 'static;
}

impl<T: 'static> MapExt<T> for Parser<T> {
    fn map<U: 'static, F>(self, mapper: F) -> Parser<U>
    where
        F: Fn(T) -> U + 'static,
    {
        map(self, mapper)
    }
}
