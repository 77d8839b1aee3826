use crate::cursor::Cursor;
use crate::outcome::Outcome;
use std::fmt;
use std::rc::{Rc, Weak};

/// Continuation receiving a parser's outcome.
pub type Cont<T> = Box<dyn FnOnce(&mut Cursor, Outcome<T>) -> Step>;

type Run<T> = dyn Fn(&mut Cursor, Cont<T>) -> Step;

/// A unit of suspended work handed back to the driver.
///
/// Parsers never call a sub-parser or a continuation directly; they return a
/// `Step` that does so. The driver loop is therefore the only caller on the
/// native stack, however deeply parsers are nested.
pub enum Step {
    /// The outermost continuation has received its outcome.
    Done,
    /// More work remains.
    Next(Box<dyn FnOnce(&mut Cursor) -> Step>),
}

impl Step {
    pub fn next(thunk: impl FnOnce(&mut Cursor) -> Step + 'static) -> Step {
        Step::Next(Box::new(thunk))
    }

    /// Hand `outcome` to `k` on the next step.
    pub fn resume<T: 'static>(k: Cont<T>, outcome: Outcome<T>) -> Step {
        Step::next(move |cursor| k(cursor, outcome))
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Done => f.write_str("Step::Done"),
            Step::Next(_) => f.write_str("Step::Next(<thunk>)"),
        }
    }
}

/// Core parser value for parser combinators
///
/// A parser is a shared function of the cursor and a continuation. It must
/// eventually deliver exactly one [`Outcome`] to that continuation, by way of
/// the [`Step`]s it returns. Cloning a parser is cheap and keeps its identity.
pub struct Parser<T> {
    run: Rc<Run<T>>,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Parser {
            run: Rc::clone(&self.run),
        }
    }
}

impl<T> fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("run", &"<function>")
            .finish()
    }
}

impl<T: 'static> Parser<T> {
    pub fn new(run: impl Fn(&mut Cursor, Cont<T>) -> Step + 'static) -> Self {
        Parser { run: Rc::new(run) }
    }

    /// Start this parser against `cursor` right away.
    ///
    /// Only the driver and step thunks should call this; combinators use
    /// [`Parser::suspend`].
    pub fn invoke(&self, cursor: &mut Cursor, k: Cont<T>) -> Step {
        (self.run)(cursor, k)
    }

    /// Schedule this parser as the next step.
    pub fn suspend(&self, k: Cont<T>) -> Step {
        let parser = self.clone();
        Step::next(move |cursor| parser.invoke(cursor, k))
    }

    pub(crate) fn downgrade(&self) -> WeakParser<T> {
        WeakParser {
            run: Rc::downgrade(&self.run),
        }
    }
}

/// Non-owning handle to a parser, used to tie recursive knots without cycles.
pub(crate) struct WeakParser<T> {
    run: Weak<Run<T>>,
}

impl<T> WeakParser<T> {
    pub(crate) fn upgrade(&self) -> Option<Parser<T>> {
        self.run.upgrade().map(|run| Parser { run })
    }
}
