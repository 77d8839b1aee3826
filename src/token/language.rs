use crate::char::{alpha_num, char, letter, one_of};
use crate::or::choice;
use crate::parser::Parser;

const OPERATOR_CHARS: &str = ":!#$%&*+./<=>?@\\^|-~";

/// Everything that distinguishes one language's tokens from another's.
///
/// Empty comment delimiters disable that kind of comment. Override single
/// fields with struct update syntax:
///
/// ```
/// use contparse::token::LanguageDef;
///
/// let def = LanguageDef {
///     comment_line: "#".to_string(),
///     reserved_names: vec!["if".into(), "else".into()],
///     ..LanguageDef::default()
/// };
/// assert!(def.comment_start.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct LanguageDef {
    /// Opens a block comment, for example `/*`.
    pub comment_start: String,
    /// Closes a block comment, for example `*/`.
    pub comment_end: String,
    /// Starts a comment running to the end of the line, for example `//`.
    pub comment_line: String,
    /// Whether block comments may contain block comments.
    pub nested_comments: bool,
    /// First character of an identifier.
    pub ident_start: Parser<char>,
    /// Any later character of an identifier.
    pub ident_letter: Parser<char>,
    /// First character of an operator.
    pub op_start: Parser<char>,
    /// Any later character of an operator.
    pub op_letter: Parser<char>,
    pub reserved_names: Vec<String>,
    pub reserved_op_names: Vec<String>,
    pub case_sensitive: bool,
}

impl Default for LanguageDef {
    fn default() -> Self {
        LanguageDef {
            comment_start: String::new(),
            comment_end: String::new(),
            comment_line: String::new(),
            nested_comments: true,
            ident_start: choice(letter(), char('_')),
            ident_letter: choice(alpha_num(), one_of("_'")),
            op_start: one_of(OPERATOR_CHARS),
            op_letter: one_of(OPERATOR_CHARS),
            reserved_names: Vec::new(),
            reserved_op_names: Vec::new(),
            case_sensitive: true,
        }
    }
}

impl LanguageDef {
    /// C-like comments (`/* */`, `//`), not nested
    pub fn c_style() -> Self {
        LanguageDef {
            comment_start: "/*".to_string(),
            comment_end: "*/".to_string(),
            comment_line: "//".to_string(),
            nested_comments: false,
            ..LanguageDef::default()
        }
    }

    /// Haskell-like comments (`{- -}`, `--`), nested
    pub fn haskell_style() -> Self {
        LanguageDef {
            comment_start: "{-".to_string(),
            comment_end: "-}".to_string(),
            comment_line: "--".to_string(),
            nested_comments: true,
            ..LanguageDef::default()
        }
    }
}
