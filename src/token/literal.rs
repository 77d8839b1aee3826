use super::lexer::TokenParser;
use super::number::{decimal, number};
use crate::attempt::attempt;
use crate::between::between;
use crate::bind::{bind, then};
use crate::char::{char, hex_digit, oct_digit, satisfy, space, string};
use crate::label::label;
use crate::many::many_present;
use crate::map::map;
use crate::or::{choice, choice_all};
use crate::parser::Parser;
use crate::prim::{fail, ret};
use crate::some::many1;

/// Single-character escapes: `\n` and friends.
const ESCAPES: [(char, char); 10] = [
    ('a', '\u{07}'),
    ('b', '\u{08}'),
    ('f', '\u{0C}'),
    ('n', '\n'),
    ('r', '\r'),
    ('t', '\t'),
    ('v', '\u{0B}'),
    ('\\', '\\'),
    ('"', '"'),
    ('\'', '\''),
];

/// ASCII control mnemonics. Three-letter codes come first so that `SOH`
/// is not read as `SO` followed by `H`.
const ASCII_CODES: [(&str, char); 34] = [
    ("NUL", '\u{00}'),
    ("SOH", '\u{01}'),
    ("STX", '\u{02}'),
    ("ETX", '\u{03}'),
    ("EOT", '\u{04}'),
    ("ENQ", '\u{05}'),
    ("ACK", '\u{06}'),
    ("BEL", '\u{07}'),
    ("DLE", '\u{10}'),
    ("DC1", '\u{11}'),
    ("DC2", '\u{12}'),
    ("DC3", '\u{13}'),
    ("DC4", '\u{14}'),
    ("NAK", '\u{15}'),
    ("SYN", '\u{16}'),
    ("ETB", '\u{17}'),
    ("CAN", '\u{18}'),
    ("SUB", '\u{1A}'),
    ("ESC", '\u{1B}'),
    ("DEL", '\u{7F}'),
    ("BS", '\u{08}'),
    ("HT", '\u{09}'),
    ("LF", '\u{0A}'),
    ("VT", '\u{0B}'),
    ("FF", '\u{0C}'),
    ("CR", '\u{0D}'),
    ("SO", '\u{0E}'),
    ("SI", '\u{0F}'),
    ("EM", '\u{19}'),
    ("FS", '\u{1C}'),
    ("GS", '\u{1D}'),
    ("RS", '\u{1E}'),
    ("US", '\u{1F}'),
    ("SP", ' '),
];

impl TokenParser {
    /// A character literal in single quotes, with escape codes
    pub fn char_literal(&self) -> Parser<char> {
        let letter = label(
            satisfy(|c| c != '\'' && c != '\\' && c > '\u{1A}'),
            "literal character",
        );
        let character = choice(letter, then(char('\\'), escape_code()));
        let open = label(char('\''), "character");
        let close = label(char('\''), "end of character");
        self.lexeme(between(open, close, character))
    }

    /// A string literal in double quotes, with escape codes, `\&` and gaps
    pub fn string_literal(&self) -> Parser<String> {
        let letter = map(
            label(satisfy(|c| c != '"' && c != '\\' && c > '\u{1A}'), "string character"),
            Some,
        );
        let gap = then(many1(space()), label(char('\\'), "end of string gap"));
        let escape = then(
            char('\\'),
            choice_all(vec![
                map(gap, |_| None),
                map(char('&'), |_| None),
                map(escape_code(), Some),
            ]),
        );
        let body = map(many_present(choice(letter, escape)), |chars| {
            chars.into_iter().collect::<String>()
        });
        let open = label(char('"'), "literal string");
        let close = label(char('"'), "end of string");
        self.lexeme(between(open, close, body))
    }
}

/// Everything that may follow a backslash
fn escape_code() -> Parser<char> {
    label(
        choice_all(vec![char_escape(), char_num(), char_ascii(), char_control()]),
        "escape code",
    )
}

fn char_escape() -> Parser<char> {
    choice_all(
        ESCAPES
            .iter()
            .map(|&(code, value)| map(char(code), move |_| value))
            .collect(),
    )
}

/// `\65`, `\o101` and `\x41`
fn char_num() -> Parser<char> {
    let code = choice_all(vec![
        decimal(),
        then(char('o'), number(8, oct_digit())),
        then(char('x'), number(16, hex_digit())),
    ]);
    bind(code, |code| {
        match u32::try_from(code).ok().and_then(char::from_u32) {
            Some(c) => ret(c),
            None => fail("valid character code"),
        }
    })
}

fn char_ascii() -> Parser<char> {
    choice_all(
        ASCII_CODES
            .iter()
            .map(|&(code, value)| attempt(map(string(code), move |_| value)))
            .collect(),
    )
}

/// `\^A` is 1, `\^Z` is 26
fn char_control() -> Parser<char> {
    let upper = label(satisfy(|c| c.is_ascii_uppercase()), "uppercase letter");
    then(
        char('^'),
        map(upper, |c| char::from(c as u8 - b'A' + 1)),
    )
}

#[cfg(test)]
mod tests {
    use crate::Runner;
    use crate::outcome::Outcome;
    use crate::token::{LanguageDef, TokenParser};

    fn lexer() -> TokenParser {
        TokenParser::new(LanguageDef::default())
    }

    #[test]
    fn test_char_literal_plain() {
        let report = Runner::new().execute(&lexer().char_literal(), "'a'  rest");
        assert_eq!(report.outcome(), &Outcome::Success('a'));
        assert_eq!(report.position(), 5);
    }

    #[test]
    fn test_char_literal_escapes() {
        let tokens = lexer();
        let runner = Runner::new();
        let cases = [
            (r"'\n'", '\n'),
            (r"'\t'", '\t'),
            (r"'\\'", '\\'),
            (r"'\''", '\''),
            (r"'\65'", 'A'),
            (r"'\o101'", 'A'),
            (r"'\x41'", 'A'),
            (r"'\NUL'", '\0'),
            (r"'\SOH'", '\u{01}'),
            (r"'\SO'", '\u{0E}'),
            (r"'\DEL'", '\u{7F}'),
            (r"'\SP'", ' '),
            (r"'\^A'", '\u{01}'),
            (r"'\^Z'", '\u{1A}'),
        ];
        for (input, expected) in cases {
            assert_eq!(runner.run(&tokens.char_literal(), input).unwrap(), expected, "{}", input);
        }
    }

    #[test]
    fn test_char_literal_errors() {
        let tokens = lexer();
        let runner = Runner::new();

        let error = runner.run(&tokens.char_literal(), "'ab'").unwrap_err();
        assert_eq!(error.expected, vec!["end of character"]);
        assert_eq!(error.column, 3);

        let error = runner.run(&tokens.char_literal(), r"'\q'").unwrap_err();
        assert_eq!(error.expected, vec!["escape code"]);
        assert_eq!(error.column, 3);

        let error = runner.run(&tokens.char_literal(), "x").unwrap_err();
        assert_eq!(error.expected, vec!["character"]);
    }

    #[test]
    fn test_char_literal_invalid_code() {
        let error = Runner::new()
            .run(&lexer().char_literal(), r"'\x110000'")
            .unwrap_err();
        assert!(error.expected.contains(&"escape code".to_string()));
        assert_eq!(error.column, 3);
    }

    #[test]
    fn test_string_literal() {
        let report = Runner::new().execute(&lexer().string_literal(), "\"hello world\" next");
        assert_eq!(report.outcome(), &Outcome::Success("hello world".to_string()));
        assert_eq!(report.position(), 14);
    }

    #[test]
    fn test_string_literal_escapes() {
        let tokens = lexer();
        let runner = Runner::new();

        assert_eq!(runner.run(&tokens.string_literal(), r#""a\tb\"c""#).unwrap(), "a\tb\"c");
        assert_eq!(runner.run(&tokens.string_literal(), r#""\SO\&H""#).unwrap(), "\u{0E}H");
        assert_eq!(runner.run(&tokens.string_literal(), r#""\1234\&5""#).unwrap(), "\u{4D2}5");
        assert_eq!(runner.run(&tokens.string_literal(), "\"ab\\  \n  \\cd\"").unwrap(), "abcd");
        assert_eq!(runner.run(&tokens.string_literal(), "\"\"").unwrap(), "");
    }

    #[test]
    fn test_string_literal_unterminated() {
        let error = Runner::new().run(&lexer().string_literal(), "\"abc").unwrap_err();
        assert_eq!(error.expected, vec!["end of string"]);
        assert_eq!(error.unexpected, "end of input");
    }

    #[test]
    fn test_string_literal_bad_gap() {
        let error = Runner::new().run(&lexer().string_literal(), "\"a\\  b\"").unwrap_err();
        assert!(error.expected.contains(&"end of string gap".to_string()));
        assert_eq!(error.column, 6);
    }
}
