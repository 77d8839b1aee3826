//! # contparse - Continuation-Passing Parser Combinators
//!
//! Parsers are values built from a small algebra of combinators and run by
//! a trampoline, so grammars can nest arbitrarily deeply and inputs can be
//! arbitrarily long without growing the native stack.
//!
//! - **Predictable choice**: an alternative is only tried when the previous
//!   one failed without consuming input; [`attempt`](attempt::attempt) opts
//!   into backtracking
//! - **Packrat memoization**: switchable per run, never changes results
//! - **Readable errors**: expectations from every tried alternative, with a
//!   1-based line and column
//!
//! ```
//! use contparse::{run, bind::skip, char::{char, digit}, some::many1_chars, or::OrExt};
//!
//! let number = many1_chars(digit());
//! let list = skip(number.clone(), char(';')).or(number);
//! assert_eq!(run(&list, "42;").unwrap(), "42");
//! ```

pub mod attempt;
pub mod between;
pub mod bind;
pub mod char;
pub mod cursor;
pub mod default;
pub mod driver;
pub mod error;
pub mod label;
pub mod lazy;
pub mod many;
pub mod map;
pub mod memo;
pub mod not;
pub mod or;
pub mod outcome;
pub mod parser;
pub mod position;
pub mod prim;
pub mod separated_list;
pub mod some;
pub mod token;

pub use cursor::{Cursor, MemoStats};
pub use driver::{Report, Runner, run, run_async};
pub use error::ParseError;
pub use memo::memo;
pub use outcome::{Expectation, Failure, Outcome};
pub use parser::{Cont, Parser, Step};
pub use position::Span;
