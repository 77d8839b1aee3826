//! The trampoline that drives parsers to completion.
//!
//! Every parser hands work back to the driver as a [`Step`]; the driver loop
//! is the only thing that calls those steps, so native stack depth stays
//! constant no matter how deeply the grammar nests or how long the input is.

use crate::cursor::{Cursor, MemoStats};
use crate::error::ParseError;
use crate::outcome::Outcome;
use crate::parser::{Parser, Step};
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, trace};

const DEFAULT_YIELD_EVERY: usize = 1024;

/// Run `step` and everything it leads to. Returns the number of steps taken.
pub fn drive(cursor: &mut Cursor, mut step: Step) -> usize {
    let mut steps = 0;
    while let Step::Next(thunk) = step {
        steps += 1;
        step = thunk(cursor);
    }
    steps
}

/// Like [`drive`], but yields to the async scheduler every `yield_every`
/// steps. Ordering and results are the same as [`drive`].
pub async fn drive_async(cursor: &mut Cursor, mut step: Step, yield_every: usize) -> usize {
    let yield_every = yield_every.max(1);
    let mut steps = 0;
    while let Step::Next(thunk) = step {
        steps += 1;
        step = thunk(cursor);
        if steps % yield_every == 0 {
            trace!(steps, position = cursor.position(), "yielding to scheduler");
            tokio::task::yield_now().await;
        }
    }
    steps
}

/// Everything a finished run produced.
#[derive(Debug)]
pub struct Report<T> {
    outcome: Outcome<T>,
    steps: usize,
    cursor: Cursor,
}

impl<T> Report<T> {
    pub fn outcome(&self) -> &Outcome<T> {
        &self.outcome
    }

    /// Where the cursor stood when the parser finished.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Number of trampoline steps the run took.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn memo_stats(&self) -> MemoStats {
        self.cursor.stats()
    }

    pub fn into_outcome(self) -> Outcome<T> {
        self.outcome
    }

    /// The parsed value, or the failure rendered against the input.
    pub fn into_result(self) -> Result<T, ParseError> {
        match self.outcome {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(failure) => Err(ParseError::from_failure(&failure, &self.cursor)),
        }
    }
}

/// Run configuration.
///
/// ```
/// use contparse::{Runner, char::string};
///
/// let runner = Runner::new().memoize(true).yield_every(256);
/// assert_eq!(runner.run(&string("hi"), "hi").unwrap(), "hi");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Runner {
    memoize: bool,
    yield_every: usize,
}

impl Default for Runner {
    fn default() -> Self {
        Runner {
            memoize: false,
            yield_every: DEFAULT_YIELD_EVERY,
        }
    }
}

type Slot<T> = Rc<Cell<Option<Outcome<T>>>>;

impl Runner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the packrat cache for runs made by this runner.
    pub fn memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    /// Steps between scheduler yields in async runs. Zero is treated as one.
    pub fn yield_every(mut self, steps: usize) -> Self {
        self.yield_every = steps.max(1);
        self
    }

    fn start<T: 'static>(&self, parser: &Parser<T>, cursor: &mut Cursor) -> (Step, Slot<T>) {
        let slot: Slot<T> = Rc::new(Cell::new(None));
        let sink = Rc::clone(&slot);
        let step = parser.invoke(
            cursor,
            Box::new(move |_, outcome| {
                sink.set(Some(outcome));
                Step::Done
            }),
        );
        (step, slot)
    }

    fn finish<T>(slot: Slot<T>, steps: usize, cursor: Cursor) -> Report<T> {
        let Some(outcome) = slot.take() else {
            panic!("parser returned control to the driver without producing an outcome");
        };
        debug!(
            steps,
            position = cursor.position(),
            success = outcome.is_success(),
            memo_hits = cursor.stats().hits,
            memo_misses = cursor.stats().misses,
            "parse finished"
        );
        Report {
            outcome,
            steps,
            cursor,
        }
    }

    fn cursor(&self, input: &str) -> Cursor {
        let cursor = Cursor::new(input).with_memoize(self.memoize);
        debug!(len = cursor.remaining(), memoize = self.memoize, "parse started");
        cursor
    }

    /// Drive `parser` over `input` and report everything about the run.
    pub fn execute<T: 'static>(&self, parser: &Parser<T>, input: &str) -> Report<T> {
        let mut cursor = self.cursor(input);
        let (step, slot) = self.start(parser, &mut cursor);
        let steps = drive(&mut cursor, step);
        Self::finish(slot, steps, cursor)
    }

    /// Async counterpart of [`Runner::execute`].
    pub async fn execute_async<T: 'static>(&self, parser: &Parser<T>, input: &str) -> Report<T> {
        let mut cursor = self.cursor(input);
        let (step, slot) = self.start(parser, &mut cursor);
        let steps = drive_async(&mut cursor, step, self.yield_every).await;
        Self::finish(slot, steps, cursor)
    }

    pub fn run<T: 'static>(&self, parser: &Parser<T>, input: &str) -> Result<T, ParseError> {
        self.execute(parser, input).into_result()
    }

    pub async fn run_async<T: 'static>(
        &self,
        parser: &Parser<T>,
        input: &str,
    ) -> Result<T, ParseError> {
        self.execute_async(parser, input).await.into_result()
    }

    /// Run and hand the result to exactly one of the two callbacks.
    pub fn run_with<T: 'static, S, F>(&self, parser: &Parser<T>, input: &str, on_success: S, on_failure: F)
    where
        S: FnOnce(T),
        F: FnOnce(ParseError),
    {
        match self.run(parser, input) {
            Ok(value) => on_success(value),
            Err(error) => on_failure(error),
        }
    }
}

/// Parse `input` with a default [`Runner`].
pub fn run<T: 'static>(parser: &Parser<T>, input: &str) -> Result<T, ParseError> {
    Runner::default().run(parser, input)
}

/// Parse `input` with a default [`Runner`], yielding to the scheduler
/// periodically.
pub async fn run_async<T: 'static>(parser: &Parser<T>, input: &str) -> Result<T, ParseError> {
    Runner::default().run_async(parser, input).await
}
