use crate::cursor::Cursor;
use crate::outcome::Failure;
use thiserror::Error;

/// Shown in place of a snippet when the failure sits at the end of input.
pub const END_OF_INPUT: &str = "end of input";

/// Longest excerpt of the input quoted in a message.
const MAX_SNIPPET: usize = 6;

/// A parse failure rendered for people.
///
/// `line` and `column` are 1-based. `expected` holds the deduplicated
/// alternatives in the order they were tried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub unexpected: String,
    pub expected: Vec<String>,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    context: Vec<String>,
}

impl ParseError {
    /// Render `failure` against the input of the cursor it happened on.
    ///
    /// The failure is reported at the furthest offset recorded in its
    /// expectation, or at the cursor's position when the expectation carries
    /// none. Alternatives that failed earlier in the input are left out.
    pub fn from_failure(failure: &Failure, cursor: &Cursor) -> Self {
        let input = cursor.input();
        let reported = failure.expected.furthest();
        let offset = reported.offset().unwrap_or(cursor.position()).min(input.len());
        let expected = reported.expected();

        let unexpected = match reported.found() {
            Some(found) => found.to_string(),
            None => {
                let width = expected
                    .first()
                    .map(|e| e.chars().count())
                    .unwrap_or(1)
                    .clamp(1, MAX_SNIPPET);
                let end = (offset + width).min(input.len());
                let snippet: String = input[offset..end].iter().collect();
                if snippet.is_empty() {
                    END_OF_INPUT.to_string()
                } else {
                    snippet
                }
            }
        };

        let (line, column) = line_and_column(input, offset);

        let mut message = format!("Unexpected \"{}\"", unexpected);
        if !expected.is_empty() {
            let alternatives: Vec<String> = expected.iter().map(|e| format!("\"{}\"", e)).collect();
            message.push_str(", expecting ");
            message.push_str(&alternatives.join(" or "));
        }
        message.push_str(&format!(" at line {} column {}", line, column));

        ParseError {
            message,
            unexpected,
            expected,
            offset,
            line,
            column,
            context: context_lines(input, line, column),
        }
    }

    /// Up to two lines either side of the failing line, with a pointer under
    /// the failing column.
    pub fn context(&self) -> &[String] {
        &self.context
    }

    /// The message followed by its source context.
    pub fn pretty(&self) -> String {
        let mut out = self.message.clone();
        out.push_str("\n\n");
        for line in &self.context {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

fn is_line_break(input: &[char], i: usize) -> bool {
    match input[i] {
        '\n' => true,
        // "\r\n" counts once, at the '\n'.
        '\r' => input.get(i + 1) != Some(&'\n'),
        _ => false,
    }
}

/// 1-based line and column of `offset`, counting `\n`, `\r\n` and `\r` as
/// line terminators.
pub fn line_and_column(input: &[char], offset: usize) -> (usize, usize) {
    let offset = offset.min(input.len());
    let mut line = 1;
    let mut line_start = 0;

    for i in 0..offset {
        if is_line_break(input, i) {
            line += 1;
            line_start = i + 1;
        }
    }

    (line, offset - line_start + 1)
}

fn split_lines(input: &[char]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for (i, &c) in input.iter().enumerate() {
        if is_line_break(input, i) {
            lines.push(std::mem::take(&mut current));
        } else if c != '\r' {
            current.push(c);
        }
    }
    lines.push(current);
    lines
}

fn context_lines(input: &[char], line: usize, column: usize) -> Vec<String> {
    let mut context = Vec::new();

    for (index, content) in split_lines(input).iter().enumerate() {
        let number = index + 1;
        if number + 2 < line || number > line + 2 {
            continue;
        }

        let prefix = if number == line {
            format!("  > {} | ", number)
        } else {
            format!("    {} | ", number)
        };
        context.push(format!("{}{}", prefix, content));

        if number == line {
            let pointer_offset = prefix.len() + column - 1;
            context.push(format!("{}^--- here", " ".repeat(pointer_offset)));
        }
    }

    context
}
