//! Parse Python 3.13 source code into a typed abstract syntax tree.
//!
//! Parsing happens in two stages. The [`lexer`] turns a UTF-8 buffer into
//! a stream of spanned tokens, applying Python's significant-indentation
//! and implicit line-joining rules, so that `print("hi")` roughly becomes
//!
//! ```text
//! Name("print"), Lpar, String("hi"), Rpar, Newline, EndOfFile
//! ```
//!
//! The parser then matches that stream against the grammar by recursive
//! descent and builds the [`flint_python_ast`] tree, or reports the first
//! syntax error with its exact source position.
//!
//! Both stages are pure functions of their input: no I/O, no caches, no
//! shared state. Independent parses may run on separate threads without
//! coordination.
//!
//! # Examples
//!
//! Tokenize a string:
//!
//! ```
//! use flint_python_parser::{lex, Mode};
//!
//! let tokens = lex("x = 1 + 2\n", Mode::Module);
//! assert!(tokens.map(|t| t.is_ok()).all(|ok| ok));
//! ```
//!
//! Parse a module:
//!
//! ```
//! use flint_python_parser::parse_program;
//!
//! let body = parse_program("def double(x):\n    return x * 2\n").unwrap();
//! assert_eq!(body.len(), 1);
//! ```
//!
//! Parse a single expression:
//!
//! ```
//! use flint_python_parser::parse_expression;
//!
//! assert!(parse_expression("1 + 2 * 3").unwrap().is_bin_op());
//! ```

pub mod lexer;
mod error;
mod parser;
mod string;
mod token;

use flint_python_ast::{Expr, Mod, Suite};

pub use error::{LexicalError, LexicalErrorType, ParseError, ParseErrorType};
pub use lexer::{lex, LexResult, Lexer, Spanned};
pub use token::{Tok, TokenKind};

/// Tokenize `source` completely, stopping at the first lexical error.
pub fn tokenize(source: &str, mode: Mode) -> Result<Vec<Spanned>, LexicalError> {
    lex(source, mode).collect()
}

/// Parse `source` according to `mode`.
pub fn parse(source: &str, mode: Mode) -> Result<Mod, ParseError> {
    log::trace!("parsing {} bytes in {mode:?} mode", source.len());
    let tokens = tokenize(source, mode)?;
    parse_tokens(tokens, mode)
}

/// Parse an already-tokenized stream according to `mode`.
pub fn parse_tokens(tokens: Vec<Spanned>, mode: Mode) -> Result<Mod, ParseError> {
    let parser = parser::Parser::new(tokens);
    match mode {
        Mode::Module => Ok(Mod::Module(parser.parse_module()?)),
        Mode::Expression => Ok(Mod::Expression(parser.parse_expression_mode()?)),
    }
}

/// Parse a module and return its statement list.
pub fn parse_program(source: &str) -> Result<Suite, ParseError> {
    match parse(source, Mode::Module)? {
        Mod::Module(module) => Ok(module.body),
        Mod::Expression(_) => unreachable!("Mode::Module cannot produce an expression root"),
    }
}

/// Parse a single expression (the `eval` form).
pub fn parse_expression(source: &str) -> Result<Expr, ParseError> {
    match parse(source, Mode::Expression)? {
        Mod::Expression(expression) => Ok(*expression.body),
        Mod::Module(_) => unreachable!("Mode::Expression cannot produce a module root"),
    }
}

/// How a source buffer is to be parsed.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Mode {
    /// A sequence of statements.
    Module,
    /// A single expression.
    Expression,
}

impl std::str::FromStr for Mode {
    type Err = ModeParseError;

    // The names follow the `mode` argument of `builtins.compile()`.
    fn from_str(s: &str) -> Result<Self, ModeParseError> {
        match s {
            "exec" | "single" => Ok(Mode::Module),
            "eval" => Ok(Mode::Expression),
            _ => Err(ModeParseError),
        }
    }
}

/// Returned when a given mode is not valid.
#[derive(Debug)]
pub struct ModeParseError;

impl std::fmt::Display for ModeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, r#"mode must be "exec", "eval", or "single""#)
    }
}

impl std::error::Error for ModeParseError {}
