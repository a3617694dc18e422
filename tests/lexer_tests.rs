// Integration tests for the Grapher lexer

use grapher::syntax::lexer::BAD_CHARACTER;
use grapher::syntax::{LexErrorKind, Lexer, Token, TokenKind};
use std::fs;
use std::io;

fn kinds(src: &str) -> Vec<TokenKind> {
    Lexer::new(src).tokenize().into_iter().map(|t| t.kind).collect()
}

fn pairs(src: &str) -> Vec<(TokenKind, String)> {
    Lexer::new(src)
        .tokenize()
        .into_iter()
        .map(|t| (t.kind, t.text))
        .collect()
}

#[test]
fn test_literal_table() {
    let cases = [
        ("0", TokenKind::IntegerLiteral, "0"),
        ("0x1F", TokenKind::IntegerLiteral, "0x1F"),
        ("3.14", TokenKind::DoubleLiteral, "3.14"),
        ("2e10", TokenKind::DoubleLiteral, "2e10"),
        ("2e+", TokenKind::Error, "2e+"),
        (".", TokenKind::Dot, "."),
        ("\"hello\"", TokenKind::StringLiteral, "hello"),
        ("\"unterminated", TokenKind::Error, BAD_CHARACTER),
    ];

    for (src, kind, text) in cases {
        let token = Lexer::new(src).next_token();
        assert_eq!(token.kind, kind, "kind for {:?}", src);
        assert_eq!(token.text, text, "text for {:?}", src);
    }
}

#[test]
fn test_digits_then_dot_then_letter() {
    let mut lexer = Lexer::new("12.a");

    assert_eq!(lexer.next_token().text, "12");
    let dot = lexer.next_token();
    assert_eq!(dot.kind, TokenKind::Dot);
    assert_eq!(dot.text, ".");
    assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
    assert!(lexer.next_token().is_end());
}

#[test]
fn test_round_trip_literals() {
    let integers = ["7", "0", "1234567890", "0xdeadBEEF", "0X0"];
    let doubles = ["0.5", "10.25", ".75", "1e9", "6.02E+23", "1.0e-7", "00.1"];
    let strings = ["", "plain", "with spaces", "multi\nline", "tab\there"];

    for lit in integers {
        let token = Lexer::new(&format!("  {}  ", lit)).next_token();
        assert_eq!((token.kind, token.text.as_str()), (TokenKind::IntegerLiteral, lit));
    }

    for lit in doubles {
        let token = Lexer::new(&format!("\n{}\n", lit)).next_token();
        assert_eq!((token.kind, token.text.as_str()), (TokenKind::DoubleLiteral, lit));
    }

    for lit in strings {
        let token = Lexer::new(&format!("\"{}\"", lit)).next_token();
        assert_eq!((token.kind, token.text.as_str()), (TokenKind::StringLiteral, lit));
    }
}

#[test]
fn test_every_input_terminates() {
    let inputs = [
        "",
        "   \t\n",
        "0x",
        "1e",
        "\"",
        "...",
        "@@@",
        "graph g . 12.e5 + \"x",
        "é ünïcode 名前",
    ];

    for src in inputs {
        let mut lexer = Lexer::new(src);
        let mut steps = 0;
        while !lexer.next_token().is_end() {
            steps += 1;
            assert!(steps <= src.chars().count(), "no progress on {:?}", src);
        }
        for _ in 0..3 {
            assert!(lexer.next_token().is_end());
        }
    }
}

#[test]
fn test_small_program() {
    let src = r#"
        graph g
        int f x
        return x * 2 + 0x10 / 1.5e3 - "label"
    "#;

    assert_eq!(
        kinds(src),
        vec![
            TokenKind::KwGraph,
            TokenKind::Identifier,
            TokenKind::KwInt,
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::KwReturn,
            TokenKind::Identifier,
            TokenKind::Mul,
            TokenKind::IntegerLiteral,
            TokenKind::Add,
            TokenKind::IntegerLiteral,
            TokenKind::Div,
            TokenKind::DoubleLiteral,
            TokenKind::Sub,
            TokenKind::StringLiteral,
            TokenKind::EndOfInput,
        ]
    );
}

#[test]
fn test_member_access_shape() {
    assert_eq!(
        pairs("g.nodes"),
        vec![
            (TokenKind::Identifier, "g".to_string()),
            (TokenKind::Dot, ".".to_string()),
            (TokenKind::Identifier, "nodes".to_string()),
            (TokenKind::EndOfInput, String::new()),
        ]
    );
}

#[test]
fn test_lexing_continues_after_errors() {
    let mut lexer = Lexer::new("0xq 3e 4e-- 5");
    let tokens = lexer.tokenize();

    let errors = tokens.iter().filter(|t| t.is_error()).count();
    assert_eq!(errors, 3);
    assert_eq!(tokens[tokens.len() - 2].text, "5");

    let diagnostic_kinds: Vec<LexErrorKind> =
        lexer.diagnostics().iter().map(|d| d.kind).collect();
    assert_eq!(
        diagnostic_kinds,
        vec![
            LexErrorKind::MalformedHexLiteral,
            LexErrorKind::MalformedExponent,
            LexErrorKind::MalformedExponent,
        ]
    );
}

#[test]
fn test_diagnostic_display() {
    let mut lexer = Lexer::new("\n  \"abc");
    lexer.tokenize();

    let message = lexer.diagnostics()[0].to_string();
    assert_eq!(
        message,
        "Lexer error at line 2, column 3: unterminated string literal 'abc'"
    );
}

#[test]
fn test_token_display() {
    let rendered: Vec<String> = Lexer::new("int x + 1.5")
        .map(|t: Token| t.to_string())
        .collect();
    assert_eq!(
        rendered,
        vec!["<kw_int, int>", "<id, x>", "<add, +>", "<double, 1.5>"]
    );
}

#[test]
fn test_from_path() {
    let path = std::env::temp_dir().join(format!("grapher-lexer-{}.grp", std::process::id()));
    fs::write(&path, "bool b\ntrue\n").unwrap();

    let lexer = Lexer::from_path(&path).unwrap();
    fs::remove_file(&path).unwrap();

    let tokens: Vec<Token> = lexer.collect();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[2].kind, TokenKind::KwTrue);
    assert_eq!(tokens[2].location.line, 2);
}

#[test]
fn test_from_missing_path() {
    let err = Lexer::from_path("/definitely/not/here.grp").err().unwrap();
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
}
