//! Lexical layer built purely from the core combinators.
//!
//! A [`LanguageDef`] describes comments, identifier and operator characters,
//! and reserved words; [`TokenParser::new`] turns it into lexeme parsers that
//! skip trailing white space and comments.

mod language;
mod lexer;
mod literal;
mod number;

pub use language::LanguageDef;
pub use lexer::TokenParser;
pub use number::Number;
