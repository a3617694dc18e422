//! Grapher front end
//!
//! This module turns Grapher source text into tokens and defines the tree the
//! parser builds from them:
//! - [`token`]: Token values and source locations
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`ast`]: AST node definitions
//!
//! # Lexer Implementation
//!
//! Hand-written scanner: one state machine per token family (numbers and dots,
//! string literals, identifiers and reserved words). Errors are returned as
//! tokens so a caller can keep lexing and collect every diagnostic in one pass.

pub mod ast;
pub mod lexer;
pub mod token;

pub use lexer::{LexError, LexErrorKind, Lexer};
pub use token::{SourceLocation, Token, TokenKind};
