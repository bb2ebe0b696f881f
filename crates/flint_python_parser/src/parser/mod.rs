//! The recursive-descent parser.
//!
//! [`Parser`] owns the token vector and a cursor index. One token of
//! lookahead decides nearly everything; a saved cursor position provides
//! the bounded backtracking used to disambiguate soft keywords
//! (`match ...:` vs. `match(...)`) and parenthesized `with` items. The
//! first error aborts the parse: every production returns a `Result` and
//! errors propagate with `?`.

mod expression;
mod helpers;
mod pattern;
mod statement;

#[cfg(test)]
mod tests;

use flint_python_ast::{Identifier, Location, ModExpression, ModModule, Suite};

use crate::error::{ParseError, ParseErrorType};
use crate::lexer::Spanned;
use crate::token::{Tok, TokenKind};

pub(crate) struct Parser {
    tokens: Vec<Spanned>,
    at: usize,
}

impl Parser {
    pub(crate) fn new(mut tokens: Vec<Spanned>) -> Self {
        // The grammar is written against a token stream that always ends
        // with an end marker.
        if !matches!(tokens.last(), Some((_, Tok::EndOfFile, _))) {
            let location = tokens.last().map_or_else(Location::default, |t| t.2);
            tokens.push((location, Tok::EndOfFile, location));
        }
        Self { tokens, at: 0 }
    }

    pub(crate) fn parse_module(mut self) -> Result<ModModule, ParseError> {
        let mut body = Suite::new();
        while !self.at(TokenKind::EndOfFile) {
            if self.at(TokenKind::Indent) {
                return Err(self.syntax_error("unexpected indent"));
            }
            body.extend(self.parse_statement()?);
        }
        Ok(ModModule { body })
    }

    pub(crate) fn parse_expression_mode(mut self) -> Result<ModExpression, ParseError> {
        let body = self.parse_expression_list()?;
        helpers::reject_bare_starred(&body, self.location())?;
        self.eat(TokenKind::Newline);
        self.expect(TokenKind::EndOfFile)?;
        Ok(ModExpression {
            body: Box::new(body),
        })
    }

    // Token access

    fn current(&self) -> &Tok {
        &self.tokens[self.at].1
    }

    fn kind(&self) -> TokenKind {
        TokenKind::from_token(self.current())
    }

    fn nth_kind(&self, n: usize) -> TokenKind {
        let index = (self.at + n).min(self.tokens.len() - 1);
        TokenKind::from_token(&self.tokens[index].1)
    }

    fn peek_kind(&self) -> TokenKind {
        self.nth_kind(1)
    }

    /// The start position of the current token.
    fn location(&self) -> Location {
        self.tokens[self.at].0
    }

    /// Consume and return the current token. Never advances past the end
    /// marker.
    fn bump(&mut self) -> Tok {
        let tok = self.tokens[self.at].1.clone();
        if self.at + 1 < self.tokens.len() {
            self.at += 1;
        }
        tok
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    /// Whether the current token is the soft keyword `keyword`.
    fn at_soft_keyword(&self, keyword: &str) -> bool {
        matches!(self.current(), Tok::Name { name } if name == keyword)
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(ParseError::new(
                ParseErrorType::ExpectedToken {
                    expected: kind,
                    found: self.kind(),
                    context: None,
                },
                self.location(),
            ))
        }
    }

    fn expect_with_context(
        &mut self,
        kind: TokenKind,
        context: &'static str,
    ) -> Result<(), ParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(ParseError::new(
                ParseErrorType::ExpectedToken {
                    expected: kind,
                    found: self.kind(),
                    context: Some(context),
                },
                self.location(),
            ))
        }
    }

    fn expect_name(&mut self) -> Result<Identifier, ParseError> {
        if self.at(TokenKind::Name) {
            let Tok::Name { name } = self.bump() else {
                unreachable!()
            };
            Ok(Identifier::new(name))
        } else {
            Err(ParseError::new(
                ParseErrorType::ExpectedName { found: self.kind() },
                self.location(),
            ))
        }
    }

    // Backtracking

    fn checkpoint(&self) -> usize {
        self.at
    }

    fn restore(&mut self, checkpoint: usize) {
        self.at = checkpoint;
    }

    // Errors

    fn syntax_error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(ParseErrorType::Syntax(message.into()), self.location())
    }

    fn expected(&self, what: &'static str) -> ParseError {
        ParseError::new(ParseErrorType::Expected(what), self.location())
    }

    fn unexpected_token(&self) -> ParseError {
        ParseError::new(
            ParseErrorType::UnexpectedToken { found: self.kind() },
            self.location(),
        )
    }
}
