//! Token values produced by the [`Lexer`](super::lexer::Lexer).
//!
//! A token is a kind tag plus the lexeme text. Tokens also remember where
//! they started and how many characters they consumed so front ends can point
//! back into the source, but neither takes part in equality.

use std::fmt;

/// Position in the source text. Lines and columns start at 1; columns count
/// characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    EndOfInput,
    /// Lexing failed; the token text is a diagnostic, not a lexeme.
    Error,

    // Literals
    IntegerLiteral,
    DoubleLiteral,
    StringLiteral,

    Identifier,

    // Reserved words
    KwInt,
    KwDouble,
    KwBool,
    KwGraph,
    KwTrue,
    KwFalse,
    KwReturn,

    // Punctuation and operators
    Dot, // .
    Add, // +
    Sub, // -
    Mul, // *
    Div, // /
}

impl TokenKind {
    /// Short lowercase name used in `<kind, text>` renderings.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::EndOfInput => "eof",
            TokenKind::Error => "error",
            TokenKind::IntegerLiteral => "integer",
            TokenKind::DoubleLiteral => "double",
            TokenKind::StringLiteral => "string",
            TokenKind::Identifier => "id",
            TokenKind::KwInt => "kw_int",
            TokenKind::KwDouble => "kw_double",
            TokenKind::KwBool => "kw_bool",
            TokenKind::KwGraph => "kw_graph",
            TokenKind::KwTrue => "kw_true",
            TokenKind::KwFalse => "kw_false",
            TokenKind::KwReturn => "kw_return",
            TokenKind::Dot => "dot",
            TokenKind::Add => "add",
            TokenKind::Sub => "sub",
            TokenKind::Mul => "mul",
            TokenKind::Div => "div",
        }
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::IntegerLiteral | TokenKind::DoubleLiteral | TokenKind::StringLiteral
        )
    }

    pub fn is_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Add | TokenKind::Sub | TokenKind::Mul | TokenKind::Div
        )
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::KwInt
                | TokenKind::KwDouble
                | TokenKind::KwBool
                | TokenKind::KwGraph
                | TokenKind::KwTrue
                | TokenKind::KwFalse
                | TokenKind::KwReturn
        )
    }

    /// Reserved words that name one of the primitive types.
    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::KwInt | TokenKind::KwDouble | TokenKind::KwBool | TokenKind::KwGraph
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single token.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Where the first consumed character sits.
    pub location: SourceLocation,
    /// Number of characters consumed, quotes included.
    pub width: usize,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        location: SourceLocation,
        width: usize,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
            width,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::Error
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.text == other.text
    }
}

impl Eq for Token {}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.kind, self.text)
    }
}
