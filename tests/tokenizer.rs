use contparse::bind::{skip, then};
use contparse::char::{char, eof};
use contparse::label::label;
use contparse::lazy::recursive;
use contparse::many::many;
use contparse::map::{lift2, map};
use contparse::or::{choice, choice_all};
use contparse::position::set_position;
use contparse::token::{LanguageDef, Number, TokenParser};
use contparse::{Outcome, Parser, Runner, run};

fn tokens() -> TokenParser {
    TokenParser::new(LanguageDef {
        reserved_names: vec!["let".into(), "in".into()],
        reserved_op_names: vec!["=".into(), "+".into()],
        ..LanguageDef::c_style()
    })
}

/// `let x = e in e` and `+` over numbers, names and parentheses, rendered as
/// s-expressions.
fn program(tokens: &TokenParser) -> Parser<String> {
    let t = tokens.clone();
    let expr = recursive(move |expr| {
        let binding = lift2(
            then(t.reserved("let"), t.identifier()),
            then(t.reserved_op("="), expr.clone()),
            |name, value| (name, value),
        );
        let let_expr = lift2(binding, then(t.reserved("in"), expr.clone()), |(name, value), body| {
            format!("(let {} {} {})", name, value, body)
        });

        let atom = choice_all(vec![
            map(t.natural(), |n| n.to_string()),
            t.identifier(),
            t.parens(expr),
        ]);
        let sum = lift2(atom.clone(), many(then(t.reserved_op("+"), atom)), |first, rest| {
            rest.into_iter()
                .fold(first, |acc, term| format!("(+ {} {})", acc, term))
        });

        choice(let_expr, sum)
    });
    then(tokens.white_space(), skip(expr, eof()))
}

#[test]
fn test_natural_leaves_rest_unconsumed() {
    let report = Runner::new().execute(&tokens().natural(), "123abc");
    assert_eq!(report.outcome(), &Outcome::Success(123));
    assert_eq!(report.position(), 3);
}

#[test]
fn test_hexadecimal() {
    assert_eq!(run(&tokens().hexadecimal(), "0x1F").unwrap(), 31);
}

#[test]
fn test_parens_reports_missing_close() {
    let tokens = tokens();
    let error = run(&tokens.parens(tokens.identifier()), "(abc").unwrap_err();
    assert_eq!(error.unexpected, "end of input");
    assert_eq!(error.expected, vec![")"]);
    assert_eq!(error.line, 1);
    assert_eq!(error.column, 5);
}

#[test]
fn test_forced_failure_on_second_line() {
    let forced = |offset| then(set_position(offset), label(char('!'), "bang"));

    let error = run(&forced(4), "abc\ndef").unwrap_err();
    assert_eq!((error.line, error.column), (2, 1));

    let error = run(&forced(5), "abc\ndef").unwrap_err();
    assert_eq!(error.offset, 5);
    assert_eq!((error.line, error.column), (2, 2));
    assert_eq!(error.expected, vec!["bang"]);
}

#[test]
fn test_reserved_word_boundary() {
    let tokens = tokens();

    let report = Runner::new().execute(&tokens.reserved("let"), "let");
    assert_eq!(report.outcome(), &Outcome::Success(()));
    assert_eq!(report.position(), 3);

    let report = Runner::new().execute(&tokens.reserved("let"), "let \n x");
    assert_eq!(report.position(), 6);

    let report = Runner::new().execute(&tokens.reserved("let"), "letx");
    let failure = report.outcome().failure().unwrap();
    assert!(!failure.consumed);
    assert_eq!(report.position(), 0);
}

#[test]
fn test_program() {
    let tokens = tokens();
    let grammar = program(&tokens);
    let runner = Runner::new();

    assert_eq!(runner.run(&grammar, "let x = 1 in x + 2").unwrap(), "(let x 1 (+ x 2))");
    assert_eq!(
        runner.run(&grammar, " /* sum */ (a + b) + 0x10 // done").unwrap(),
        "(+ (+ a b) 16)"
    );
    assert_eq!(
        runner.run(&grammar, "let a = 1 in\nlet b = (a) in\n  a + b").unwrap(),
        "(let a 1 (let b a (+ a b)))"
    );
}

#[test]
fn test_program_errors() {
    let tokens = tokens();
    let grammar = program(&tokens);
    let runner = Runner::new();

    let error = runner.run(&grammar, "let in = 1 in in").unwrap_err();
    assert_eq!(error.unexpected, "reserved word in");
    assert_eq!((error.line, error.column), (1, 5));

    let error = runner.run(&grammar, "(a + b").unwrap_err();
    assert_eq!(error.unexpected, "end of input");
    assert!(error.expected.contains(&")".to_string()));

    let error = runner.run(&grammar, "let x = 1\nin x /* open").unwrap_err();
    assert_eq!(error.expected, vec!["end of comment"]);
    assert_eq!(error.line, 2);
}

#[test]
fn test_program_memoized_matches_plain() {
    let tokens = tokens();
    let grammar = program(&tokens);
    let inputs = ["let x = 1 in x + 2", "(a + b", "1 + (2 + (3 + x))", "let = 2"];

    for input in inputs {
        let plain = Runner::new().execute(&grammar, input);
        let cached = Runner::new().memoize(true).execute(&grammar, input);
        assert_eq!(plain.outcome(), cached.outcome(), "input {:?}", input);
        assert_eq!(plain.position(), cached.position(), "input {:?}", input);
    }
}

#[test]
fn test_literals_in_a_list() {
    let tokens = tokens();
    let literal = choice_all(vec![
        tokens.string_literal(),
        map(tokens.char_literal(), String::from),
        map(tokens.natural_or_float(), |n| match n {
            Number::Natural(n) => n.to_string(),
            Number::Float(f) => format!("{:?}", f),
        }),
    ]);
    let list = tokens.brackets(tokens.comma_sep(literal));

    assert_eq!(
        run(&list, r#"[ "a\tb", 'c', 2.5, 0o17 ]"#).unwrap(),
        vec!["a\tb", "c", "2.5", "15"]
    );
}

#[test]
fn test_error_context_points_at_failure() {
    let tokens = tokens();
    let error = run(&program(&tokens), "let x = 1 in\nx + in").unwrap_err();
    assert_eq!(error.line, 2);
    assert!(error.context().iter().any(|line| line.contains("^--- here")));
    assert!(error.pretty().starts_with(&error.message));
}
