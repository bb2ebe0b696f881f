//! The pattern grammar of `match` statements.
//!
//! A bare name at pattern position is a capture unless a dot follows
//! (then it is a dotted value pattern); `_` is the wildcard; literals
//! match by equality and `None`/`True`/`False` by identity. Sequence
//! patterns admit at most one star sub-pattern, mapping patterns an
//! optional trailing `**rest`.

use flint_python_ast::{
    Constant, Expr, ExprAttribute, ExprBinOp, ExprConstant, ExprName, ExprUnaryOp, MatchCase,
    Operator, Pattern, PatternMatchAs, PatternMatchClass, PatternMatchMapping, PatternMatchOr,
    PatternMatchSequence, PatternMatchSingleton, PatternMatchStar, PatternMatchValue, UnaryOp,
};

use crate::error::ParseError;
use crate::token::TokenKind;

use super::{helpers, Parser};

/// Whether a token can begin a pattern.
fn starts_pattern(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Name
            | TokenKind::Int
            | TokenKind::Float
            | TokenKind::Complex
            | TokenKind::String
            | TokenKind::Bytes
            | TokenKind::FStringStart
            | TokenKind::Minus
            | TokenKind::None
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Lpar
            | TokenKind::Lsqb
            | TokenKind::Lbrace
            | TokenKind::Star
    )
}

fn check_single_star(parser: &Parser, patterns: &[Pattern]) -> Result<(), ParseError> {
    if patterns.iter().filter(|p| p.is_match_star()).count() > 1 {
        Err(parser.sequence_star_error())
    } else {
        Ok(())
    }
}

impl Parser {
    fn sequence_star_error(&self) -> ParseError {
        self.syntax_error("multiple starred names in sequence pattern")
    }

    pub(super) fn parse_match_case(&mut self) -> Result<MatchCase, ParseError> {
        self.bump(); // the `case` name
        let pattern = self.parse_match_patterns()?;
        let guard = if self.eat(TokenKind::If) {
            Some(Box::new(self.parse_named_expression()?))
        } else {
            None
        };
        let body = self.parse_suite()?;
        Ok(MatchCase {
            pattern,
            guard,
            body,
        })
    }

    /// The top of a `case`: a pattern, or an open (bracketless) sequence
    /// `p1, p2, ...`.
    fn parse_match_patterns(&mut self) -> Result<Pattern, ParseError> {
        let first = self.parse_match_maybe_star_pattern()?;
        if self.at(TokenKind::Comma) {
            let mut patterns = vec![first];
            while self.eat(TokenKind::Comma) {
                if !starts_pattern(self.kind()) {
                    break;
                }
                patterns.push(self.parse_match_maybe_star_pattern()?);
            }
            check_single_star(self, &patterns)?;
            return Ok(Pattern::MatchSequence(PatternMatchSequence { patterns }));
        }
        if first.is_match_star() {
            return Err(self.syntax_error("starred pattern must be in a sequence"));
        }
        Ok(first)
    }

    fn parse_match_maybe_star_pattern(&mut self) -> Result<Pattern, ParseError> {
        if self.eat(TokenKind::Star) {
            let name = self.expect_name()?;
            let name = (name != "_").then_some(name);
            return Ok(Pattern::MatchStar(PatternMatchStar { name }));
        }
        self.parse_match_pattern()
    }

    /// An or-pattern with an optional `as` capture.
    fn parse_match_pattern(&mut self) -> Result<Pattern, ParseError> {
        let pattern = self.parse_match_or_pattern()?;
        if self.eat(TokenKind::As) {
            let location = self.location();
            let name = self.expect_name()?;
            if name == "_" {
                return Err(ParseError::new(
                    crate::error::ParseErrorType::Syntax(
                        "cannot use '_' as a target".to_owned(),
                    ),
                    location,
                ));
            }
            return Ok(Pattern::MatchAs(PatternMatchAs {
                pattern: Some(Box::new(pattern)),
                name: Some(name),
            }));
        }
        Ok(pattern)
    }

    fn parse_match_or_pattern(&mut self) -> Result<Pattern, ParseError> {
        let first = self.parse_match_closed_pattern()?;
        if !self.at(TokenKind::Vbar) {
            return Ok(first);
        }
        let mut patterns = vec![first];
        while self.eat(TokenKind::Vbar) {
            patterns.push(self.parse_match_closed_pattern()?);
        }
        Ok(Pattern::MatchOr(PatternMatchOr { patterns }))
    }

    fn parse_match_closed_pattern(&mut self) -> Result<Pattern, ParseError> {
        match self.kind() {
            TokenKind::Minus | TokenKind::Int | TokenKind::Float | TokenKind::Complex => {
                let value = self.parse_match_literal_number()?;
                Ok(Pattern::MatchValue(PatternMatchValue {
                    value: Box::new(value),
                }))
            }
            TokenKind::String | TokenKind::Bytes | TokenKind::FStringStart => {
                self.parse_match_string_pattern()
            }
            TokenKind::None => {
                self.bump();
                Ok(Pattern::MatchSingleton(PatternMatchSingleton {
                    value: Constant::None,
                }))
            }
            TokenKind::True => {
                self.bump();
                Ok(Pattern::MatchSingleton(PatternMatchSingleton {
                    value: Constant::Bool(true),
                }))
            }
            TokenKind::False => {
                self.bump();
                Ok(Pattern::MatchSingleton(PatternMatchSingleton {
                    value: Constant::Bool(false),
                }))
            }
            TokenKind::Name => {
                if self.peek_kind() == TokenKind::Dot {
                    let value = self.parse_match_value_name()?;
                    if self.at(TokenKind::Lpar) {
                        return self.parse_match_class_pattern(value);
                    }
                    return Ok(Pattern::MatchValue(PatternMatchValue {
                        value: Box::new(value),
                    }));
                }
                if self.peek_kind() == TokenKind::Lpar {
                    let cls = Expr::Name(ExprName {
                        id: self.expect_name()?,
                    });
                    return self.parse_match_class_pattern(cls);
                }
                // A bare name captures; `_` is the wildcard.
                let name = self.expect_name()?;
                let name = (name != "_").then_some(name);
                Ok(Pattern::MatchAs(PatternMatchAs {
                    pattern: None,
                    name,
                }))
            }
            TokenKind::Lpar => self.parse_match_group_pattern(),
            TokenKind::Lsqb => self.parse_match_bracket_sequence(),
            TokenKind::Lbrace => self.parse_match_mapping_pattern(),
            _ => Err(self.expected("a pattern")),
        }
    }

    /// `Name ('.' Name)+`, the value-pattern form.
    fn parse_match_value_name(&mut self) -> Result<Expr, ParseError> {
        let mut expr = Expr::Name(ExprName {
            id: self.expect_name()?,
        });
        while self.eat(TokenKind::Dot) {
            let attr = self.expect_name()?;
            expr = Expr::Attribute(ExprAttribute {
                value: Box::new(expr),
                attr,
            });
        }
        Ok(expr)
    }

    /// A signed number, optionally a complex literal `real ± imagj`.
    fn parse_match_literal_number(&mut self) -> Result<Expr, ParseError> {
        let real = self.parse_match_signed_number()?;
        if matches!(self.kind(), TokenKind::Plus | TokenKind::Minus)
            && self.peek_kind() == TokenKind::Complex
        {
            let op = if self.eat(TokenKind::Plus) {
                Operator::Add
            } else {
                self.bump();
                Operator::Sub
            };
            let imag = self.parse_match_number_atom()?;
            return Ok(Expr::BinOp(ExprBinOp {
                left: Box::new(real),
                op,
                right: Box::new(imag),
            }));
        }
        Ok(real)
    }

    fn parse_match_signed_number(&mut self) -> Result<Expr, ParseError> {
        if self.eat(TokenKind::Minus) {
            let operand = self.parse_match_number_atom()?;
            return Ok(Expr::UnaryOp(ExprUnaryOp {
                op: UnaryOp::USub,
                operand: Box::new(operand),
            }));
        }
        self.parse_match_number_atom()
    }

    fn parse_match_number_atom(&mut self) -> Result<Expr, ParseError> {
        match self.kind() {
            TokenKind::Int => {
                let crate::token::Tok::Int { value } = self.bump() else {
                    unreachable!()
                };
                Ok(helpers::constant_expr(value))
            }
            TokenKind::Float => {
                let crate::token::Tok::Float { value } = self.bump() else {
                    unreachable!()
                };
                Ok(helpers::constant_expr(Constant::Float(value)))
            }
            TokenKind::Complex => {
                let crate::token::Tok::Complex { real, imag } = self.bump() else {
                    unreachable!()
                };
                Ok(helpers::constant_expr(Constant::Complex { real, imag }))
            }
            _ => Err(self.expected("a number")),
        }
    }

    fn parse_match_string_pattern(&mut self) -> Result<Pattern, ParseError> {
        let location = self.location();
        let value = self.parse_string_group()?;
        match &value {
            Expr::Constant(ExprConstant { .. }) => Ok(Pattern::MatchValue(PatternMatchValue {
                value: Box::new(value),
            })),
            _ => Err(ParseError::new(
                crate::error::ParseErrorType::Syntax(
                    "patterns may not match f-strings".to_owned(),
                ),
                location,
            )),
        }
    }

    fn parse_match_group_pattern(&mut self) -> Result<Pattern, ParseError> {
        self.bump(); // (
        if self.eat(TokenKind::Rpar) {
            return Ok(Pattern::MatchSequence(PatternMatchSequence {
                patterns: Vec::new(),
            }));
        }
        let first = self.parse_match_maybe_star_pattern()?;
        if self.at(TokenKind::Comma) {
            let mut patterns = vec![first];
            while self.eat(TokenKind::Comma) {
                if self.at(TokenKind::Rpar) {
                    break;
                }
                patterns.push(self.parse_match_maybe_star_pattern()?);
            }
            self.expect(TokenKind::Rpar)?;
            check_single_star(self, &patterns)?;
            return Ok(Pattern::MatchSequence(PatternMatchSequence { patterns }));
        }
        self.expect(TokenKind::Rpar)?;
        if first.is_match_star() {
            return Err(self.syntax_error("starred pattern must be in a sequence"));
        }
        Ok(first)
    }

    fn parse_match_bracket_sequence(&mut self) -> Result<Pattern, ParseError> {
        self.bump(); // [
        let mut patterns = Vec::new();
        loop {
            if self.at(TokenKind::Rsqb) {
                break;
            }
            patterns.push(self.parse_match_maybe_star_pattern()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::Rsqb)?;
        check_single_star(self, &patterns)?;
        Ok(Pattern::MatchSequence(PatternMatchSequence { patterns }))
    }

    fn parse_match_mapping_pattern(&mut self) -> Result<Pattern, ParseError> {
        self.bump(); // {
        let mut keys = Vec::new();
        let mut patterns = Vec::new();
        let mut rest = None;
        loop {
            if self.at(TokenKind::Rbrace) {
                break;
            }
            if self.eat(TokenKind::DoubleStar) {
                let location = self.location();
                let name = self.expect_name()?;
                if name == "_" {
                    return Err(ParseError::new(
                        crate::error::ParseErrorType::Syntax(
                            "cannot use '_' as a target".to_owned(),
                        ),
                        location,
                    ));
                }
                rest = Some(name);
                if self.eat(TokenKind::Comma) && !self.at(TokenKind::Rbrace) {
                    return Err(
                        self.syntax_error("'**' must be the last entry of a mapping pattern")
                    );
                }
                break;
            }
            keys.push(self.parse_match_mapping_key()?);
            self.expect(TokenKind::Colon)?;
            patterns.push(self.parse_match_pattern()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::Rbrace)?;
        Ok(Pattern::MatchMapping(PatternMatchMapping {
            keys,
            patterns,
            rest,
        }))
    }

    /// Mapping keys are literals or dotted values.
    fn parse_match_mapping_key(&mut self) -> Result<Expr, ParseError> {
        match self.kind() {
            TokenKind::Minus | TokenKind::Int | TokenKind::Float | TokenKind::Complex => {
                self.parse_match_literal_number()
            }
            TokenKind::String | TokenKind::Bytes => self.parse_string_group(),
            TokenKind::None => {
                self.bump();
                Ok(helpers::constant_expr(Constant::None))
            }
            TokenKind::True => {
                self.bump();
                Ok(helpers::constant_expr(true))
            }
            TokenKind::False => {
                self.bump();
                Ok(helpers::constant_expr(false))
            }
            TokenKind::Name if self.peek_kind() == TokenKind::Dot => {
                self.parse_match_value_name()
            }
            _ => Err(self.syntax_error(
                "mapping pattern keys may only match literals and attribute lookups",
            )),
        }
    }

    fn parse_match_class_pattern(&mut self, cls: Expr) -> Result<Pattern, ParseError> {
        self.bump(); // (
        let mut patterns = Vec::new();
        let mut kwd_attrs: Vec<flint_python_ast::Identifier> = Vec::new();
        let mut kwd_patterns = Vec::new();
        loop {
            if self.at(TokenKind::Rpar) {
                break;
            }
            if self.at(TokenKind::Name) && self.peek_kind() == TokenKind::Equal {
                let attr = self.expect_name()?;
                if kwd_attrs.contains(&attr) {
                    return Err(self.syntax_error(format!(
                        "attribute name repeated in class pattern: {attr}"
                    )));
                }
                self.bump(); // =
                kwd_patterns.push(self.parse_match_pattern()?);
                kwd_attrs.push(attr);
            } else {
                if !kwd_attrs.is_empty() {
                    return Err(
                        self.syntax_error("positional patterns follow keyword patterns")
                    );
                }
                patterns.push(self.parse_match_pattern()?);
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::Rpar)?;
        Ok(Pattern::MatchClass(PatternMatchClass {
            cls: Box::new(cls),
            patterns,
            kwd_attrs,
            kwd_patterns,
        }))
    }
}
