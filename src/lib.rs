//! # Introduction
//!
//! Front end for Grapher, a small language whose primitive types are `int`,
//! `double`, `bool` and a first-class `graph`. The crate provides the lexer,
//! the AST node model a parser builds from its tokens, and a terminal browser
//! for stepping through a token stream.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → TokenHistory → TUI
//!                        ↘ parser (external) → AST
//! ```
//!
//! 1. [`syntax`]: tokenizes source text ([`syntax::lexer`]) and defines the
//!    AST ([`syntax::ast`]).
//! 2. [`history`]: records a full token stream with a cursor for stepping
//!    forward and backward.
//! 3. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Token set
//!
//! Integer literals (decimal and `0x` hex), double literals (fraction and/or
//! exponent), string literals, identifiers, the reserved words `int double
//! bool graph true false return`, `.` and the operators `+ - * /`.

pub mod history;
pub mod syntax;
pub mod ui;
