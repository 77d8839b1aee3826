//! Character-level primitives.
//!
//! Every parser here looks at one element at a time except [`string`], which
//! matches a literal run of characters.

use crate::error::END_OF_INPUT;
use crate::label::label;
use crate::many::skip_many;
use crate::memo::memo;
use crate::outcome::{Expectation, Failure, Outcome};
use crate::parser::{Parser, Step};

/// Parser that consumes one character matching `predicate`
///
/// On a mismatch nothing is consumed and the offending character (or end of
/// input) is reported as unexpected.
pub fn satisfy<F>(predicate: F) -> Parser<char>
where
    F: Fn(char) -> bool + 'static,
{
    memo(Parser::new(move |cursor, k| {
        let position = cursor.position();
        let outcome = match cursor.peek(0) {
            Some(c) if predicate(c) => {
                cursor.advance(1);
                Outcome::Success(c)
            }
            Some(c) => Outcome::fail(Expectation::unexpected(c.escape_debug().to_string(), position)),
            None => Outcome::fail(Expectation::unexpected(END_OF_INPUT, position)),
        };
        Step::resume(k, outcome)
    }))
}

/// Parser that matches exactly the character `expected`
pub fn char(expected: char) -> Parser<char> {
    let message = expected.to_string();
    memo(Parser::new(move |cursor, k| {
        let position = cursor.position();
        let outcome = match cursor.peek(0) {
            Some(c) if c == expected => {
                cursor.advance(1);
                Outcome::Success(c)
            }
            _ => Outcome::fail(Expectation::at(message.clone(), position)),
        };
        Step::resume(k, outcome)
    }))
}

/// Any single character
pub fn any_char() -> Parser<char> {
    label(satisfy(|_| true), "any character")
}

/// Any character that appears in `chars`
pub fn one_of(chars: &str) -> Parser<char> {
    let set: Vec<char> = chars.chars().collect();
    satisfy(move |c| set.contains(&c))
}

/// Any character that does not appear in `chars`
pub fn none_of(chars: &str) -> Parser<char> {
    let set: Vec<char> = chars.chars().collect();
    satisfy(move |c| !set.contains(&c))
}

pub fn digit() -> Parser<char> {
    label(satisfy(|c| c.is_ascii_digit()), "digit")
}

pub fn hex_digit() -> Parser<char> {
    label(satisfy(|c| c.is_ascii_hexdigit()), "hexadecimal digit")
}

pub fn oct_digit() -> Parser<char> {
    label(satisfy(|c| ('0'..='7').contains(&c)), "octal digit")
}

/// A Unicode letter
pub fn letter() -> Parser<char> {
    label(satisfy(char::is_alphabetic), "letter")
}

/// A Unicode letter or digit
pub fn alpha_num() -> Parser<char> {
    label(satisfy(char::is_alphanumeric), "letter or digit")
}

pub fn upper() -> Parser<char> {
    label(satisfy(char::is_uppercase), "uppercase letter")
}

pub fn lower() -> Parser<char> {
    label(satisfy(char::is_lowercase), "lowercase letter")
}

/// A single whitespace character
pub fn space() -> Parser<char> {
    label(satisfy(char::is_whitespace), "space")
}

/// Skip zero or more whitespace characters
pub fn spaces() -> Parser<()> {
    label(skip_many(space()), "white space")
}

pub fn newline() -> Parser<char> {
    label(char('\n'), "new-line")
}

/// Parser that matches an exact string character by character
///
/// Matching characters are consumed as they are compared, so a partial match
/// is a failure that consumed input. Wrap in [`crate::attempt::attempt`] to
/// make it retryable.
pub fn string(expected: impl Into<String>) -> Parser<String> {
    let expected: String = expected.into();
    let chars: Vec<char> = expected.chars().collect();
    memo(Parser::new(move |cursor, k| {
        let start = cursor.position();
        let matched = chars
            .iter()
            .enumerate()
            .take_while(|(i, c)| cursor.peek(*i) == Some(**c))
            .count();
        cursor.advance(matched);

        let outcome = if matched == chars.len() {
            Outcome::Success(expected.clone())
        } else {
            let expectation = Expectation::at(expected.clone(), start);
            Outcome::Failure(Failure::new(expectation, matched > 0))
        };
        Step::resume(k, outcome)
    }))
}

/// Parser that succeeds only when no input remains
pub fn eof() -> Parser<()> {
    Parser::new(|cursor, k| {
        let outcome = if cursor.is_at_end() {
            Outcome::Success(())
        } else {
            Outcome::fail(Expectation::at(END_OF_INPUT, cursor.position()))
        };
        Step::resume(k, outcome)
    })
}
