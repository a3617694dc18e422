//! Lexer (tokenizer) for Grapher source
//!
//! Turns raw source text into [`Token`]s one call at a time. Each call to
//! [`Lexer::next_token`] skips whitespace, looks at the next character and
//! hands control to one of three scanners:
//!
//! - a number/dot state machine (`12`, `0x1F`, `3.14`, `2e-3`, `.`)
//! - a string literal scanner (`"..."`, no escape sequences)
//! - an identifier scanner that checks reserved words once the identifier is
//!   complete
//!
//! The operators `+ - * /` are returned directly. Any other character is
//! skipped and recorded as a diagnostic.
//!
//! Lexing errors never abort the lexer: they come back as
//! [`TokenKind::Error`] tokens, and a matching [`LexError`] is appended to
//! [`Lexer::diagnostics`].

use super::token::{SourceLocation, Token, TokenKind};
use rustc_hash::FxHashMap;
use std::fmt;
use std::fs;
use std::io;
use std::iter::FusedIterator;
use std::path::Path;
use std::sync::OnceLock;

/// Text carried by most error tokens.
pub const BAD_CHARACTER: &str = "bad character";

/// Classification of lexing failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexErrorKind {
    /// Something other than a hex digit after `0x`
    MalformedHexLiteral,
    /// Something other than a sign or digit after `e`, or a non-digit after the sign
    MalformedExponent,
    /// End of input before the closing `"`
    UnterminatedStringLiteral,
    /// A character no scanner accepts; it is skipped without producing a token
    UnexpectedCharacter,
}

impl LexErrorKind {
    fn describe(self) -> &'static str {
        match self {
            LexErrorKind::MalformedHexLiteral => "malformed hexadecimal literal",
            LexErrorKind::MalformedExponent => "malformed exponent",
            LexErrorKind::UnterminatedStringLiteral => "unterminated string literal",
            LexErrorKind::UnexpectedCharacter => "unexpected character",
        }
    }
}

/// Lexer diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    /// Characters consumed before the failure (the skipped character for
    /// [`LexErrorKind::UnexpectedCharacter`]).
    pub lexeme: String,
    pub location: SourceLocation,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer error at line {}, column {}: {} '{}'",
            self.location.line,
            self.location.column,
            self.kind.describe(),
            self.lexeme
        )
    }
}

impl std::error::Error for LexError {}

fn keywords() -> &'static FxHashMap<&'static str, TokenKind> {
    static KEYWORDS: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();
    KEYWORDS.get_or_init(|| {
        let mut table = FxHashMap::default();
        table.insert("int", TokenKind::KwInt);
        table.insert("double", TokenKind::KwDouble);
        table.insert("bool", TokenKind::KwBool);
        table.insert("graph", TokenKind::KwGraph);
        table.insert("true", TokenKind::KwTrue);
        table.insert("false", TokenKind::KwFalse);
        table.insert("return", TokenKind::KwReturn);
        table
    })
}

/// Look up a complete identifier in the reserved-word table.
pub fn lookup_keyword(ident: &str) -> Option<TokenKind> {
    keywords().get(ident).copied()
}

/// Same set as C's `isspace` in the "C" locale.
fn is_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// States of the number/dot scanner.
///
/// ```text
///   Start      -> Zero ('0') | Dot ('.') | Digits (1-9)
///   Zero       -> HexPrefix (x X) | Digits | Dot | ExpMarker (e E)   accepts integer
///   HexPrefix  -> HexDigits                                          error otherwise
///   HexDigits  -> HexDigits                                          accepts integer
///   Digits     -> Digits | Dot | ExpMarker                           accepts integer
///   Dot        -> Fraction                                           accepts dot / integer prefix
///   Fraction   -> Fraction | ExpMarker                               accepts double
///   ExpMarker  -> ExpSign (+ -) | ExpDigits                          error otherwise
///   ExpSign    -> ExpDigits                                          error otherwise
///   ExpDigits  -> ExpDigits                                          accepts double
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberState {
    Start,
    Zero,
    HexPrefix,
    HexDigits,
    Digits,
    Dot,
    Fraction,
    ExpMarker,
    ExpSign,
    ExpDigits,
}

/// Lexer for Grapher source
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    diagnostics: Vec<LexError>,
}

impl Lexer {
    /// Create a lexer over in-memory source text.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            diagnostics: Vec::new(),
        }
    }

    /// Create a lexer over the contents of a file.
    ///
    /// The file is read completely and closed before this returns.
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let source = fs::read_to_string(path)?;
        Ok(Self::new(&source))
    }

    /// Diagnostics recorded so far, oldest first.
    pub fn diagnostics(&self) -> &[LexError] {
        &self.diagnostics
    }

    /// Move the recorded diagnostics out of the lexer.
    pub fn take_diagnostics(&mut self) -> Vec<LexError> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Lex the remaining input. The returned vector always ends with an
    /// [`TokenKind::EndOfInput`] token.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            let done = token.is_end();
            tokens.push(token);
            if done {
                break;
            }
        }

        tokens
    }

    /// Produce the next token.
    ///
    /// Once the input is exhausted every call returns
    /// [`TokenKind::EndOfInput`].
    pub fn next_token(&mut self) -> Token {
        loop {
            let Some(ch) = self.peek() else {
                return Token::new(TokenKind::EndOfInput, "", self.current_location(), 0);
            };

            match ch {
                c if is_space(c) => {
                    self.advance();
                }
                '.' | '0'..='9' => return self.dot_or_number(),
                '"' => return self.string_literal(),
                '_' | 'a'..='z' | 'A'..='Z' => return self.identifier_or_reserved(),
                '+' | '-' | '*' | '/' => return self.operator(),
                _ => {
                    let location = self.current_location();
                    self.advance();
                    self.diagnostics.push(LexError {
                        kind: LexErrorKind::UnexpectedCharacter,
                        lexeme: ch.to_string(),
                        location,
                    });
                }
            }
        }
    }

    /// Scan a dot or a numeric literal.
    ///
    /// The character that ends a token is never consumed, so the next call
    /// starts on it.
    fn dot_or_number(&mut self) -> Token {
        let start = self.current_location();
        let begin = self.position;
        let mut lexeme = String::new();
        let mut state = NumberState::Start;

        loop {
            let ch = self.peek();
            let is_digit = ch.is_some_and(|c| c.is_ascii_digit());
            let is_hex = ch.is_some_and(|c| c.is_ascii_hexdigit());

            state = match state {
                NumberState::Start => match ch {
                    Some('0') => NumberState::Zero,
                    Some('.') => NumberState::Dot,
                    // dispatch only calls us on '.' or a digit
                    _ => NumberState::Digits,
                },
                NumberState::Zero => match ch {
                    Some('x' | 'X') => NumberState::HexPrefix,
                    Some('.') => NumberState::Dot,
                    Some('e' | 'E') => NumberState::ExpMarker,
                    _ if is_digit => NumberState::Digits,
                    _ => return self.token(TokenKind::IntegerLiteral, lexeme, start, begin),
                },
                NumberState::HexPrefix => {
                    if !is_hex {
                        return self.error(
                            LexErrorKind::MalformedHexLiteral,
                            BAD_CHARACTER.to_string(),
                            lexeme,
                            start,
                            begin,
                        );
                    }
                    NumberState::HexDigits
                }
                NumberState::HexDigits => {
                    if !is_hex {
                        return self.token(TokenKind::IntegerLiteral, lexeme, start, begin);
                    }
                    NumberState::HexDigits
                }
                NumberState::Digits => match ch {
                    Some('.') => NumberState::Dot,
                    Some('e' | 'E') => NumberState::ExpMarker,
                    _ if is_digit => NumberState::Digits,
                    _ => return self.token(TokenKind::IntegerLiteral, lexeme, start, begin),
                },
                NumberState::Dot => {
                    if !is_digit {
                        return self.dot_or_integer_prefix(lexeme, start, begin);
                    }
                    NumberState::Fraction
                }
                NumberState::Fraction => match ch {
                    Some('e' | 'E') => NumberState::ExpMarker,
                    _ if is_digit => NumberState::Fraction,
                    _ => return self.token(TokenKind::DoubleLiteral, lexeme, start, begin),
                },
                NumberState::ExpMarker => match ch {
                    Some('+' | '-') => NumberState::ExpSign,
                    _ if is_digit => NumberState::ExpDigits,
                    _ => {
                        return self.error(
                            LexErrorKind::MalformedExponent,
                            BAD_CHARACTER.to_string(),
                            lexeme,
                            start,
                            begin,
                        )
                    }
                },
                NumberState::ExpSign => {
                    if !is_digit {
                        let text = lexeme.clone();
                        return self.error(
                            LexErrorKind::MalformedExponent,
                            text,
                            lexeme,
                            start,
                            begin,
                        );
                    }
                    NumberState::ExpDigits
                }
                NumberState::ExpDigits => {
                    if !is_digit {
                        return self.token(TokenKind::DoubleLiteral, lexeme, start, begin);
                    }
                    NumberState::ExpDigits
                }
            };

            if let Some(c) = self.advance() {
                lexeme.push(c);
            }
        }
    }

    /// A `.` that is not followed by a digit.
    ///
    /// On its own it is a [`TokenKind::Dot`]. After digits (`12.x`) the dot is
    /// pushed back and only the digits are returned, so the next call lexes the
    /// dot by itself.
    fn dot_or_integer_prefix(
        &mut self,
        mut lexeme: String,
        start: SourceLocation,
        begin: usize,
    ) -> Token {
        if lexeme == "." {
            return self.token(TokenKind::Dot, lexeme, start, begin);
        }

        self.push_back();
        lexeme.pop();
        self.token(TokenKind::IntegerLiteral, lexeme, start, begin)
    }

    /// Scan a string literal. The quotes are consumed but not part of the text.
    ///
    /// ```text
    ///   0 --'"'--> 1 --any--> 1 --'"'--> (2)
    ///              1 --end of input--> error
    /// ```
    fn string_literal(&mut self) -> Token {
        let start = self.current_location();
        let begin = self.position;
        let mut text = String::new();

        self.advance(); // opening quote

        loop {
            match self.advance() {
                Some('"') => return self.token(TokenKind::StringLiteral, text, start, begin),
                Some(ch) => text.push(ch),
                None => {
                    return self.error(
                        LexErrorKind::UnterminatedStringLiteral,
                        BAD_CHARACTER.to_string(),
                        text,
                        start,
                        begin,
                    )
                }
            }
        }
    }

    /// Scan an identifier by maximal munch, then check the reserved words.
    fn identifier_or_reserved(&mut self) -> Token {
        let start = self.current_location();
        let begin = self.position;
        let mut ident = String::new();

        while let Some(ch) = self.peek() {
            if ch == '_' || ch.is_ascii_alphanumeric() {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = lookup_keyword(&ident).unwrap_or(TokenKind::Identifier);
        self.token(kind, ident, start, begin)
    }

    fn operator(&mut self) -> Token {
        let start = self.current_location();
        let begin = self.position;
        let ch = self.advance();

        let kind = match ch {
            Some('+') => TokenKind::Add,
            Some('-') => TokenKind::Sub,
            Some('*') => TokenKind::Mul,
            _ => TokenKind::Div,
        };

        let text = ch.map(String::from).unwrap_or_default();
        self.token(kind, text, start, begin)
    }

    fn token(&self, kind: TokenKind, text: String, start: SourceLocation, begin: usize) -> Token {
        Token::new(kind, text, start, self.position - begin)
    }

    fn error(
        &mut self,
        kind: LexErrorKind,
        text: String,
        lexeme: String,
        start: SourceLocation,
        begin: usize,
    ) -> Token {
        self.diagnostics.push(LexError {
            kind,
            lexeme,
            location: start,
        });
        self.token(TokenKind::Error, text, start, begin)
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Un-read the last character. Only ever used for the `.` of `12.x`,
    /// which is never a newline.
    fn push_back(&mut self) {
        if self.position > 0 {
            self.position -= 1;
            self.column = self.column.saturating_sub(1).max(1);
        }
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

impl Iterator for Lexer {
    type Item = Token;

    /// Yields every token before [`TokenKind::EndOfInput`], then `None`.
    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.is_end() {
            None
        } else {
            Some(token)
        }
    }
}

impl FusedIterator for Lexer {}
