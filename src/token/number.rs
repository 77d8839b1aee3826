use super::lexer::TokenParser;
use crate::bind::{bind, then};
use crate::char::{char, digit, hex_digit, oct_digit, one_of};
use crate::default::option;
use crate::label::label;
use crate::map::{lift2, map};
use crate::or::{choice, choice_all};
use crate::parser::Parser;
use crate::prim::{fail, ret};
use crate::some::{many1, many1_chars};

const TOO_LARGE: &str = "number too large";

/// Result of [`TokenParser::natural_or_float`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Natural(u64),
    Float(f64),
}

impl TokenParser {
    /// Decimal digits, as a number. Not a lexeme.
    pub fn decimal(&self) -> Parser<u64> {
        decimal()
    }

    /// `0x` or `0X` followed by hexadecimal digits. Not a lexeme.
    pub fn hexadecimal(&self) -> Parser<u64> {
        then(char('0'), hex_tail())
    }

    /// `0o` or `0O` followed by octal digits. Not a lexeme.
    pub fn octal(&self) -> Parser<u64> {
        then(char('0'), oct_tail())
    }

    /// A decimal, hexadecimal or octal natural number
    pub fn natural(&self) -> Parser<u64> {
        label(self.lexeme(natural()), "natural")
    }

    /// A natural number with an optional sign; white space may follow the sign
    pub fn integer(&self) -> Parser<i64> {
        let value = bind(self.lexeme(sign()), |negative| {
            bind(natural(), move |n| match signed(negative, n) {
                Some(value) => ret(value),
                None => fail(TOO_LARGE),
            })
        });
        label(self.lexeme(value), "integer")
    }

    /// A decimal number with a fraction, an exponent, or both
    pub fn float(&self) -> Parser<f64> {
        label(self.lexeme(bind(decimal(), fraction_exponent)), "float")
    }

    /// A natural number or a float, whichever the input holds
    pub fn natural_or_float(&self) -> Parser<Number> {
        let zero_prefixed = choice_all(vec![
            map(choice(hex_tail(), oct_tail()), Number::Natural),
            decimal_float(),
            map(fraction_exponent(0), Number::Float),
            ret(Number::Natural(0)),
        ]);
        let number = choice(then(char('0'), zero_prefixed), decimal_float());
        label(self.lexeme(number), "number")
    }
}

/// One or more `digit`s read in `base`
pub(super) fn number(base: u32, digit: Parser<char>) -> Parser<u64> {
    bind(many1(digit), move |digits| {
        let value = digits.iter().try_fold(0u64, |acc, d| {
            let d = d.to_digit(base)?;
            acc.checked_mul(u64::from(base))?.checked_add(u64::from(d))
        });
        match value {
            Some(value) => ret(value),
            None => fail(TOO_LARGE),
        }
    })
}

pub(super) fn decimal() -> Parser<u64> {
    number(10, digit())
}

fn hex_tail() -> Parser<u64> {
    then(one_of("xX"), number(16, hex_digit()))
}

fn oct_tail() -> Parser<u64> {
    then(one_of("oO"), number(8, oct_digit()))
}

fn natural() -> Parser<u64> {
    let zero_prefixed = label(
        then(char('0'), choice_all(vec![hex_tail(), oct_tail(), decimal(), ret(0)])),
        "",
    );
    choice(zero_prefixed, decimal())
}

/// Whether a leading sign makes the number negative
fn sign() -> Parser<bool> {
    choice_all(vec![map(char('-'), |_| true), map(char('+'), |_| false), ret(false)])
}

fn signed(negative: bool, n: u64) -> Option<i64> {
    let n = i128::from(n);
    i64::try_from(if negative { -n } else { n }).ok()
}

fn decimal_float() -> Parser<Number> {
    bind(decimal(), |n| {
        option(Number::Natural(n), map(fraction_exponent(n), Number::Float))
    })
}

/// The part of a float after its integer digits, `whole`
fn fraction_exponent(whole: u64) -> Parser<f64> {
    let fraction = label(
        then(
            char('.'),
            map(label(many1(digit()), "fraction"), |digits| {
                std::iter::once('.').chain(digits).collect::<String>()
            }),
        ),
        "fraction",
    );
    let exponent_sign = choice_all(vec![map(char('-'), |_| "-"), map(char('+'), |_| ""), ret("")]);
    let exponent = label(
        then(
            one_of("eE"),
            lift2(exponent_sign, label(many1_chars(digit()), "exponent"), |sign, digits| {
                format!("e{}{}", sign, digits)
            }),
        ),
        "exponent",
    );

    let with_fraction = lift2(fraction, option(String::new(), exponent.clone()), |f, e| f + &e);
    bind(choice(with_fraction, exponent), move |tail| {
        match format!("{}{}", whole, tail).parse::<f64>() {
            Ok(value) => ret(value),
            Err(_) => fail("float"),
        }
    })
}
