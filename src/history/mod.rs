// Recorded token stream with a cursor for stepping back and forth

use crate::syntax::{LexError, Lexer, Token, TokenKind};
use rustc_hash::FxHashMap;
use std::fmt;

/// Default cap on recorded tokens
pub const DEFAULT_TOKEN_LIMIT: usize = 1_000_000;

/// Errors raised while recording or navigating a token history
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// The lexer produced more tokens than the configured limit
    TokenLimitExceeded { limit: usize },

    /// Already at the first token
    AtStart,

    /// Already at the last token
    AtEnd,
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::TokenLimitExceeded { limit } => {
                write!(f, "Token limit exceeded: more than {} tokens", limit)
            }
            HistoryError::AtStart => write!(f, "Already at the first token"),
            HistoryError::AtEnd => write!(f, "Already at the last token"),
        }
    }
}

impl std::error::Error for HistoryError {}

/// Drain `lexer` through its end-of-input token, which is included and
/// counts toward `max_tokens`.
///
/// Diagnostics stay on the lexer, so they can still be read when the limit
/// is hit.
pub fn collect_tokens(lexer: &mut Lexer, max_tokens: usize) -> Result<Vec<Token>, HistoryError> {
    let mut tokens = Vec::new();

    loop {
        if tokens.len() >= max_tokens {
            return Err(HistoryError::TokenLimitExceeded { limit: max_tokens });
        }

        let token = lexer.next_token();
        let done = token.is_end();
        tokens.push(token);

        if done {
            return Ok(tokens);
        }
    }
}

/// Every token a lexer produced, in order, plus a cursor.
#[derive(Debug)]
pub struct TokenHistory {
    tokens: Vec<Token>,
    diagnostics: Vec<LexError>,
    position: usize,
    kind_counts: FxHashMap<TokenKind, usize>,
    line_index: FxHashMap<usize, Vec<usize>>,
}

impl TokenHistory {
    /// Drain `lexer` through its end-of-input token.
    pub fn record(mut lexer: Lexer, max_tokens: usize) -> Result<Self, HistoryError> {
        let tokens = collect_tokens(&mut lexer, max_tokens)?;
        let mut kind_counts: FxHashMap<TokenKind, usize> = FxHashMap::default();
        let mut line_index: FxHashMap<usize, Vec<usize>> = FxHashMap::default();

        for (idx, token) in tokens.iter().enumerate() {
            *kind_counts.entry(token.kind).or_insert(0) += 1;
            if !token.is_end() {
                line_index.entry(token.location.line).or_default().push(idx);
            }
        }

        Ok(TokenHistory {
            tokens,
            diagnostics: lexer.take_diagnostics(),
            position: 0,
            kind_counts,
            line_index,
        })
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn diagnostics(&self) -> &[LexError] {
        &self.diagnostics
    }

    /// Token under the cursor
    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn is_at_start(&self) -> bool {
        self.position == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.position + 1 >= self.tokens.len()
    }

    pub fn step_forward(&mut self) -> Result<(), HistoryError> {
        if self.is_at_end() {
            return Err(HistoryError::AtEnd);
        }
        self.position += 1;
        Ok(())
    }

    pub fn step_backward(&mut self) -> Result<(), HistoryError> {
        if self.is_at_start() {
            return Err(HistoryError::AtStart);
        }
        self.position -= 1;
        Ok(())
    }

    pub fn rewind_to_start(&mut self) {
        self.position = 0;
    }

    pub fn jump_to_end(&mut self) {
        self.position = self.tokens.len().saturating_sub(1);
    }

    /// How many tokens of `kind` were recorded
    pub fn count_of(&self, kind: TokenKind) -> usize {
        self.kind_counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn error_count(&self) -> usize {
        self.count_of(TokenKind::Error)
    }

    /// Tokens that start on `line`, in source order
    pub fn tokens_on_line(&self, line: usize) -> impl Iterator<Item = (usize, &Token)> {
        self.line_index
            .get(&line)
            .into_iter()
            .flatten()
            .map(|&idx| (idx, &self.tokens[idx]))
    }
}
