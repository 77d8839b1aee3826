use super::language::LanguageDef;
use crate::attempt::attempt;
use crate::between::between;
use crate::bind::{bind, sequence, skip, then};
use crate::char::{none_of, one_of, satisfy, string};
use crate::label::label;
use crate::lazy::recursive;
use crate::many::{many, skip_many};
use crate::map::{lift2, map};
use crate::not::not_followed_by;
use crate::or::choice_all;
use crate::outcome::{Expectation, Outcome};
use crate::parser::{Parser, Step};
use crate::position::with_position;
use crate::prim::ret;
use crate::separated_list::{sep_by, sep_by1};
use crate::some::skip_many1;
use std::rc::Rc;

/// Lexeme parsers derived from a [`LanguageDef`].
///
/// Every lexeme parser skips the white space and comments that follow it,
/// so a grammar only has to skip leading white space once, at its start.
#[derive(Debug, Clone)]
pub struct TokenParser {
    ident_start: Parser<char>,
    ident_letter: Parser<char>,
    op_start: Parser<char>,
    op_letter: Parser<char>,
    reserved_names: Rc<[String]>,
    reserved_op_names: Rc<[String]>,
    case_sensitive: bool,
    white_space: Parser<()>,
}

impl TokenParser {
    pub fn new(def: LanguageDef) -> Self {
        let white_space = white_space(&def);

        let mut reserved_names: Vec<String> = def
            .reserved_names
            .iter()
            .map(|name| fold_case(name, def.case_sensitive))
            .collect();
        reserved_names.sort();
        reserved_names.dedup();

        let mut reserved_op_names = def.reserved_op_names;
        reserved_op_names.sort();
        reserved_op_names.dedup();

        TokenParser {
            ident_start: def.ident_start,
            ident_letter: def.ident_letter,
            op_start: def.op_start,
            op_letter: def.op_letter,
            reserved_names: reserved_names.into(),
            reserved_op_names: reserved_op_names.into(),
            case_sensitive: def.case_sensitive,
            white_space,
        }
    }

    /// Skip white space, line comments and block comments. Never fails
    /// without consuming input; an unterminated block comment is an error.
    pub fn white_space(&self) -> Parser<()> {
        self.white_space.clone()
    }

    /// `parser` followed by white space
    pub fn lexeme<T: Clone + 'static>(&self, parser: Parser<T>) -> Parser<T> {
        skip(parser, self.white_space())
    }

    /// The literal `name` as a lexeme
    pub fn symbol(&self, name: &str) -> Parser<String> {
        self.lexeme(string(name))
    }

    /// An identifier that is not a reserved name
    pub fn identifier(&self) -> Parser<String> {
        let ident = label(
            lift2(self.ident_start.clone(), many(self.ident_letter.clone()), join),
            "identifier",
        );
        let reserved = Rc::clone(&self.reserved_names);
        let case_sensitive = self.case_sensitive;
        self.lexeme(attempt(bind(with_position(ident), move |(name, span)| {
            if is_reserved(&reserved, &fold_case(&name, case_sensitive)) {
                reject(format!("reserved word {}", name), span.start)
            } else {
                ret(name)
            }
        })))
    }

    /// The reserved word `name`, not followed by an identifier character
    pub fn reserved(&self, name: &str) -> Parser<()> {
        let boundary = label(
            not_followed_by(self.ident_letter.clone()),
            format!("end of {}", name),
        );
        self.lexeme(attempt(then(self.case_string(name), boundary)))
    }

    /// An operator that is not a reserved operator
    pub fn operator(&self) -> Parser<String> {
        let op = label(
            lift2(self.op_start.clone(), many(self.op_letter.clone()), join),
            "operator",
        );
        let reserved = Rc::clone(&self.reserved_op_names);
        self.lexeme(attempt(bind(with_position(op), move |(name, span)| {
            if is_reserved(&reserved, &name) {
                reject(format!("reserved operator {}", name), span.start)
            } else {
                ret(name)
            }
        })))
    }

    /// The reserved operator `name`, not followed by an operator character
    pub fn reserved_op(&self, name: &str) -> Parser<()> {
        let boundary = label(
            not_followed_by(self.op_letter.clone()),
            format!("end of {}", name),
        );
        self.lexeme(attempt(then(string(name), boundary)))
    }

    /// `name`, ignoring letter case unless the language is case sensitive
    fn case_string(&self, name: &str) -> Parser<String> {
        if self.case_sensitive {
            return string(name);
        }

        let chars = name
            .chars()
            .map(|expected| {
                let matches = satisfy(move |c| c == expected || c.to_lowercase().eq(expected.to_lowercase()));
                map(label(matches, name), Some)
            })
            .collect();
        let name = name.to_string();
        map(sequence(chars), move |_| name.clone())
    }

    pub fn parens<T: Clone + 'static>(&self, parser: Parser<T>) -> Parser<T> {
        between(self.symbol("("), self.symbol(")"), parser)
    }

    pub fn braces<T: Clone + 'static>(&self, parser: Parser<T>) -> Parser<T> {
        between(self.symbol("{"), self.symbol("}"), parser)
    }

    pub fn angles<T: Clone + 'static>(&self, parser: Parser<T>) -> Parser<T> {
        between(self.symbol("<"), self.symbol(">"), parser)
    }

    pub fn brackets<T: Clone + 'static>(&self, parser: Parser<T>) -> Parser<T> {
        between(self.symbol("["), self.symbol("]"), parser)
    }

    pub fn semi(&self) -> Parser<String> {
        self.symbol(";")
    }

    pub fn comma(&self) -> Parser<String> {
        self.symbol(",")
    }

    pub fn colon(&self) -> Parser<String> {
        self.symbol(":")
    }

    pub fn dot(&self) -> Parser<String> {
        self.symbol(".")
    }

    /// Zero or more `parser`s separated by semicolons
    pub fn semi_sep<T: Clone + 'static>(&self, parser: Parser<T>) -> Parser<Vec<T>> {
        sep_by(parser, self.semi())
    }

    pub fn semi_sep1<T: Clone + 'static>(&self, parser: Parser<T>) -> Parser<Vec<T>> {
        sep_by1(parser, self.semi())
    }

    /// Zero or more `parser`s separated by commas
    pub fn comma_sep<T: Clone + 'static>(&self, parser: Parser<T>) -> Parser<Vec<T>> {
        sep_by(parser, self.comma())
    }

    pub fn comma_sep1<T: Clone + 'static>(&self, parser: Parser<T>) -> Parser<Vec<T>> {
        sep_by1(parser, self.comma())
    }
}

fn join(first: char, rest: Vec<char>) -> String {
    std::iter::once(first).chain(rest).collect()
}

fn fold_case(name: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        name.to_string()
    } else {
        name.to_lowercase()
    }
}

/// `names` is sorted.
fn is_reserved(names: &[String], name: &str) -> bool {
    names.binary_search_by(|known| known.as_str().cmp(name)).is_ok()
}

/// Fail reporting `found` as unexpected at `offset`.
fn reject<T: 'static>(found: String, offset: usize) -> Parser<T> {
    Parser::new(move |_, k| {
        Step::resume(k, Outcome::fail(Expectation::unexpected(found.clone(), offset)))
    })
}

fn white_space(def: &LanguageDef) -> Parser<()> {
    let mut pieces = vec![skip_many1(satisfy(char::is_whitespace))];
    if !def.comment_line.is_empty() {
        pieces.push(line_comment(&def.comment_line));
    }
    if !def.comment_start.is_empty() {
        pieces.push(block_comment(def));
    }
    skip_many(choice_all(pieces))
}

fn line_comment(start: &str) -> Parser<()> {
    then(attempt(string(start)), skip_many(satisfy(|c| c != '\n')))
}

fn block_comment(def: &LanguageDef) -> Parser<()> {
    let start = def.comment_start.clone();
    let end = def.comment_end.clone();
    let nested = def.nested_comments;

    let mut delimiters: Vec<char> = Vec::new();
    for c in end.chars().chain(start.chars()) {
        if !delimiters.contains(&c) {
            delimiters.push(c);
        }
    }
    let delimiters: String = delimiters.into_iter().collect();

    recursive(move |comment| {
        let mut body = vec![skip_many1(none_of(&delimiters))];
        if nested {
            body.push(comment);
        }
        body.push(then(
            not_followed_by(string(end.as_str())),
            map(one_of(&delimiters), |_| ()),
        ));

        let close = map(label(attempt(string(end.as_str())), "end of comment"), |_| ());
        then(attempt(string(start.as_str())), then(skip_many(choice_all(body)), close))
    })
}
