//! Error types surfaced by the lexer and the parser.

use std::fmt;

use flint_python_ast::Location;

use crate::token::TokenKind;

/// Why tokenization failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexicalErrorType {
    #[error("inconsistent use of tabs and spaces in indentation")]
    AmbiguousIndentation,
    #[error("unindent does not match any outer indentation level")]
    InconsistentDedent,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated triple-quoted string literal")]
    UnterminatedTripleQuotedString,
    #[error("unterminated f-string")]
    UnterminatedFString,
    #[error("f-string: single '}}' is not allowed")]
    SingleRbrace,
    #[error("f-string: expecting '}}'")]
    UnclosedReplacementField,
    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),
    #[error("truncated escape sequence")]
    TruncatedEscape,
    #[error("invalid unicode escape")]
    InvalidUnicodeEscape,
    #[error("unknown character name in '\\N' escape")]
    UnknownCharacterName,
    #[error("bytes literal can only contain ASCII characters")]
    NonAsciiBytes,
    #[error("{0}")]
    InvalidNumber(&'static str),
    #[error("unexpected character after line continuation character")]
    LineContinuation,
    #[error("unexpected character {tok:?}")]
    UnrecognizedToken { tok: char },
}

/// A lexical error together with the position of the offending character.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{error} at line {} column {}", .location.row(), .location.column())]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: Location,
}

impl LexicalError {
    pub fn new(error: LexicalErrorType, location: Location) -> Self {
        Self { error, location }
    }
}

/// Why parsing failed.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    /// A specific token was required but something else was found.
    ExpectedToken {
        expected: TokenKind,
        found: TokenKind,
        context: Option<&'static str>,
    },
    /// A grammar element (described in prose) was required.
    Expected(&'static str),
    /// An identifier was required.
    ExpectedName { found: TokenKind },
    /// The token cannot start or continue anything at this position.
    UnexpectedToken { found: TokenKind },
    /// A structural error with its own message (duplicate keyword argument,
    /// invalid assignment target, ...).
    Syntax(String),
    /// Tokenization failed while feeding the parser.
    Lexical(LexicalErrorType),
}

impl fmt::Display for ParseErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorType::ExpectedToken {
                expected,
                found,
                context,
            } => {
                write!(f, "expected {}, found {}", expected.display(), found.display())?;
                if let Some(context) = context {
                    write!(f, " ({context})")?;
                }
                Ok(())
            }
            ParseErrorType::Expected(what) => write!(f, "expected {what}"),
            ParseErrorType::ExpectedName { found } => {
                write!(f, "expected name, found {}", found.display())
            }
            ParseErrorType::UnexpectedToken { found } => {
                write!(f, "unexpected token {}", found.display())
            }
            ParseErrorType::Syntax(message) => f.write_str(message),
            ParseErrorType::Lexical(error) => error.fmt(f),
        }
    }
}

/// A parse error together with the position it was detected at.
///
/// The first error aborts the parse; no partial tree is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{error} at line {} column {}", .location.row(), .location.column())]
pub struct ParseError {
    pub error: ParseErrorType,
    pub location: Location,
}

impl ParseError {
    pub fn new(error: ParseErrorType, location: Location) -> Self {
        Self { error, location }
    }
}

impl From<LexicalError> for ParseError {
    fn from(error: LexicalError) -> Self {
        Self {
            error: ParseErrorType::Lexical(error.error),
            location: error.location,
        }
    }
}
