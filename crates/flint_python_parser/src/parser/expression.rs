//! Expression parsing.
//!
//! Binary and boolean operators are parsed by precedence climbing over a
//! static binding-power table; unary operators, `await` and `**` get
//! their Python-specific asymmetries (`**` binds tighter than unary on
//! its right operand, so `-x ** y` is `-(x ** y)` while `2 ** -1` is
//! legal). Comparisons chain into a single `Compare` node and are
//! non-associative.

use flint_python_ast::{
    BoolOp, CmpOp, Comprehension, ConversionFlag, Expr, ExprAttribute, ExprAwait, ExprBoolOp,
    ExprCall, ExprCompare, ExprConstant, ExprDict, ExprDictComp, ExprFormattedValue,
    ExprGeneratorExp, ExprIfExp, ExprJoinedStr, ExprLambda, ExprList, ExprListComp, ExprName,
    ExprNamedExpr, ExprSet, ExprSetComp, ExprSlice, ExprStarred, ExprSubscript, ExprTuple,
    ExprUnaryOp, ExprYield, ExprYieldFrom, Keyword, Operator, UnaryOp,
};

use crate::error::ParseError;
use crate::token::{Tok, TokenKind};

use super::{helpers, Parser};

// Binding powers, low to high. Left-associative operators parse their
// right operand one level above their own; `**` parses its right operand
// at the unary level, which both makes it right-associative and admits a
// unary operand.
const OR: (u8, u8) = (4, 5);
const AND: (u8, u8) = (6, 7);
const NOT: u8 = 8;
const CMP: (u8, u8) = (10, 11);
const BOR: (u8, u8) = (12, 13);
const BXOR: (u8, u8) = (14, 15);
const BAND: (u8, u8) = (16, 17);
const SHIFT: (u8, u8) = (18, 19);
const ARITH: (u8, u8) = (20, 21);
const TERM: (u8, u8) = (22, 23);
const FACTOR: u8 = 24;
const POWER: (u8, u8) = (27, FACTOR);

/// The `(left, right)` binding power of an infix operator token.
fn binary_power(kind: TokenKind) -> Option<(u8, u8)> {
    Some(match kind {
        TokenKind::Or => OR,
        TokenKind::And => AND,
        TokenKind::Vbar => BOR,
        TokenKind::CircumFlex => BXOR,
        TokenKind::Amper => BAND,
        TokenKind::LeftShift | TokenKind::RightShift => SHIFT,
        TokenKind::Plus | TokenKind::Minus => ARITH,
        TokenKind::Star
        | TokenKind::Slash
        | TokenKind::DoubleSlash
        | TokenKind::Percent
        | TokenKind::At => TERM,
        TokenKind::DoubleStar => POWER,
        _ => return None,
    })
}

fn token_operator(kind: TokenKind) -> Operator {
    match kind {
        TokenKind::Vbar => Operator::BitOr,
        TokenKind::CircumFlex => Operator::BitXor,
        TokenKind::Amper => Operator::BitAnd,
        TokenKind::LeftShift => Operator::LShift,
        TokenKind::RightShift => Operator::RShift,
        TokenKind::Plus => Operator::Add,
        TokenKind::Minus => Operator::Sub,
        TokenKind::Star => Operator::Mult,
        TokenKind::Slash => Operator::Div,
        TokenKind::DoubleSlash => Operator::FloorDiv,
        TokenKind::Percent => Operator::Mod,
        TokenKind::At => Operator::MatMult,
        TokenKind::DoubleStar => Operator::Pow,
        _ => unreachable!("not a binary operator: {kind:?}"),
    }
}

/// Append to a `JoinedStr` value list, merging adjacent string constants.
fn push_joined(values: &mut Vec<Expr>, expr: Expr) {
    if let Expr::Constant(ExprConstant {
        value: flint_python_ast::Constant::Str(tail),
        ..
    }) = &expr
    {
        if let Some(Expr::Constant(ExprConstant {
            value: flint_python_ast::Constant::Str(head),
            ..
        })) = values.last_mut()
        {
            head.push_str(tail);
            return;
        }
    }
    values.push(expr);
}

impl Parser {
    /// Parse a `test`: a conditional expression, lambda, or anything
    /// higher in the precedence table.
    pub(super) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        if self.at(TokenKind::Lambda) {
            return self.parse_lambda();
        }
        let body = self.parse_binary_expression(0)?;
        if self.at(TokenKind::If) {
            self.bump();
            let test = self.parse_binary_expression(0)?;
            self.expect(TokenKind::Else)?;
            let orelse = self.parse_expression()?;
            return Ok(Expr::IfExp(ExprIfExp {
                test: Box::new(test),
                body: Box::new(body),
                orelse: Box::new(orelse),
            }));
        }
        Ok(body)
    }

    /// Parse a `test`, allowing a leading `name := value`.
    pub(super) fn parse_named_expression(&mut self) -> Result<Expr, ParseError> {
        if self.at(TokenKind::Name) && self.peek_kind() == TokenKind::ColonEqual {
            let id = self.expect_name()?;
            self.bump(); // :=
            let value = self.parse_expression()?;
            return Ok(Expr::NamedExpr(ExprNamedExpr {
                target: Box::new(Expr::Name(ExprName { id })),
                value: Box::new(value),
            }));
        }
        self.parse_expression()
    }

    /// Parse a comma-separated expression list; two or more elements (or
    /// a trailing comma) build a tuple. Starred elements are admitted;
    /// contexts that forbid a lone starred expression reject it after the
    /// fact.
    pub(super) fn parse_expression_list(&mut self) -> Result<Expr, ParseError> {
        let first = self.parse_possibly_starred()?;
        if !self.at(TokenKind::Comma) {
            return Ok(first);
        }
        let mut elts = vec![first];
        while self.eat(TokenKind::Comma) {
            if !self.kind().starts_expression() {
                break;
            }
            elts.push(self.parse_possibly_starred()?);
        }
        Ok(Expr::Tuple(ExprTuple { elts }))
    }

    fn parse_possibly_starred(&mut self) -> Result<Expr, ParseError> {
        if self.at(TokenKind::Star) {
            self.bump();
            let value = self.parse_binary_expression(BOR.0)?;
            return Ok(Expr::Starred(ExprStarred {
                value: Box::new(value),
            }));
        }
        self.parse_expression()
    }

    /// A display element: starred, walrus, or a plain `test`.
    fn parse_possibly_starred_named(&mut self) -> Result<Expr, ParseError> {
        if self.at(TokenKind::Star) {
            self.bump();
            let value = self.parse_binary_expression(BOR.0)?;
            return Ok(Expr::Starred(ExprStarred {
                value: Box::new(value),
            }));
        }
        self.parse_named_expression()
    }

    pub(super) fn parse_binary_expression(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        let mut lhs = match self.kind() {
            TokenKind::Not if min_bp <= NOT => {
                self.bump();
                let operand = self.parse_binary_expression(NOT)?;
                Expr::UnaryOp(ExprUnaryOp {
                    op: UnaryOp::Not,
                    operand: Box::new(operand),
                })
            }
            TokenKind::Plus | TokenKind::Minus | TokenKind::Tilde => {
                let op = match self.bump() {
                    Tok::Plus => UnaryOp::UAdd,
                    Tok::Minus => UnaryOp::USub,
                    _ => UnaryOp::Invert,
                };
                let operand = self.parse_binary_expression(FACTOR)?;
                Expr::UnaryOp(ExprUnaryOp {
                    op,
                    operand: Box::new(operand),
                })
            }
            TokenKind::Await => {
                self.bump();
                let value = self.parse_primary()?;
                Expr::Await(ExprAwait {
                    value: Box::new(value),
                })
            }
            _ => self.parse_primary()?,
        };
        loop {
            let kind = self.kind();
            if CMP.0 >= min_bp && self.at_compare_operator() {
                let mut ops = Vec::new();
                let mut comparators = Vec::new();
                while let Some(op) = self.eat_compare_operator() {
                    ops.push(op);
                    comparators.push(self.parse_binary_expression(CMP.1)?);
                }
                lhs = Expr::Compare(ExprCompare {
                    left: Box::new(lhs),
                    ops,
                    comparators,
                });
                continue;
            }
            let Some((lbp, rbp)) = binary_power(kind) else {
                break;
            };
            if lbp < min_bp {
                break;
            }
            self.bump();
            let rhs = self.parse_binary_expression(rbp)?;
            lhs = match kind {
                TokenKind::Or | TokenKind::And => {
                    let op = if kind == TokenKind::Or {
                        BoolOp::Or
                    } else {
                        BoolOp::And
                    };
                    // `a or b or c` is one BoolOp with three values.
                    match lhs {
                        Expr::BoolOp(ExprBoolOp {
                            op: prev,
                            mut values,
                        }) if prev == op => {
                            values.push(rhs);
                            Expr::BoolOp(ExprBoolOp { op, values })
                        }
                        lhs => Expr::BoolOp(ExprBoolOp {
                            op,
                            values: vec![lhs, rhs],
                        }),
                    }
                }
                kind => Expr::BinOp(flint_python_ast::ExprBinOp {
                    left: Box::new(lhs),
                    op: token_operator(kind),
                    right: Box::new(rhs),
                }),
            };
        }
        Ok(lhs)
    }

    fn at_compare_operator(&self) -> bool {
        match self.kind() {
            TokenKind::Not => self.peek_kind() == TokenKind::In,
            kind => kind.is_compare_operator(),
        }
    }

    fn eat_compare_operator(&mut self) -> Option<CmpOp> {
        let op = match self.kind() {
            TokenKind::EqEqual => CmpOp::Eq,
            TokenKind::NotEqual => CmpOp::NotEq,
            TokenKind::Less => CmpOp::Lt,
            TokenKind::LessEqual => CmpOp::LtE,
            TokenKind::Greater => CmpOp::Gt,
            TokenKind::GreaterEqual => CmpOp::GtE,
            TokenKind::In => CmpOp::In,
            TokenKind::Is => {
                self.bump();
                return Some(if self.eat(TokenKind::Not) {
                    CmpOp::IsNot
                } else {
                    CmpOp::Is
                });
            }
            TokenKind::Not if self.peek_kind() == TokenKind::In => {
                self.bump();
                self.bump();
                return Some(CmpOp::NotIn);
            }
            _ => return None,
        };
        self.bump();
        Some(op)
    }

    /// An atom with its `.attr`, `[...]` and `(...)` trailers.
    pub(super) fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_atom()?;
        loop {
            match self.kind() {
                TokenKind::Dot => {
                    self.bump();
                    let attr = self.expect_name()?;
                    expr = Expr::Attribute(ExprAttribute {
                        value: Box::new(expr),
                        attr,
                    });
                }
                TokenKind::Lpar => {
                    self.bump();
                    let (args, keywords) = self.parse_call_arguments(true)?;
                    expr = Expr::Call(ExprCall {
                        func: Box::new(expr),
                        args,
                        keywords,
                    });
                }
                TokenKind::Lsqb => {
                    self.bump();
                    let slice = self.parse_subscript()?;
                    self.expect(TokenKind::Rsqb)?;
                    expr = Expr::Subscript(ExprSubscript {
                        value: Box::new(expr),
                        slice: Box::new(slice),
                    });
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        match self.kind() {
            TokenKind::Name => {
                let Tok::Name { name } = self.bump() else {
                    unreachable!()
                };
                Ok(helpers::name_expr(name))
            }
            TokenKind::Int => {
                let Tok::Int { value } = self.bump() else {
                    unreachable!()
                };
                Ok(helpers::constant_expr(value))
            }
            TokenKind::Float => {
                let Tok::Float { value } = self.bump() else {
                    unreachable!()
                };
                Ok(helpers::constant_expr(flint_python_ast::Constant::Float(value)))
            }
            TokenKind::Complex => {
                let Tok::Complex { real, imag } = self.bump() else {
                    unreachable!()
                };
                Ok(helpers::constant_expr(flint_python_ast::Constant::Complex {
                    real,
                    imag,
                }))
            }
            TokenKind::String | TokenKind::Bytes | TokenKind::FStringStart => {
                self.parse_string_group()
            }
            TokenKind::True => {
                self.bump();
                Ok(helpers::constant_expr(true))
            }
            TokenKind::False => {
                self.bump();
                Ok(helpers::constant_expr(false))
            }
            TokenKind::None => {
                self.bump();
                Ok(helpers::constant_expr(flint_python_ast::Constant::None))
            }
            TokenKind::Ellipsis => {
                self.bump();
                Ok(helpers::constant_expr(flint_python_ast::Constant::Ellipsis))
            }
            TokenKind::Lpar => self.parse_group(),
            TokenKind::Lsqb => self.parse_list_display(),
            TokenKind::Lbrace => self.parse_brace_display(),
            _ => Err(self.expected("an expression")),
        }
    }

    /// `(...)`: the empty tuple, a parenthesized expression or yield, a
    /// tuple display, or a generator expression.
    fn parse_group(&mut self) -> Result<Expr, ParseError> {
        self.bump(); // (
        if self.eat(TokenKind::Rpar) {
            return Ok(Expr::Tuple(ExprTuple { elts: Vec::new() }));
        }
        if self.at(TokenKind::Yield) {
            let expr = self.parse_yield_expression()?;
            self.expect(TokenKind::Rpar)?;
            return Ok(expr);
        }
        let location = self.location();
        let first = self.parse_possibly_starred_named()?;
        if self.at_comprehension_start() {
            helpers::reject_bare_starred(&first, location)?;
            let generators = self.parse_comprehensions()?;
            self.expect(TokenKind::Rpar)?;
            return Ok(Expr::GeneratorExp(ExprGeneratorExp {
                elt: Box::new(first),
                generators,
            }));
        }
        if self.at(TokenKind::Comma) {
            let mut elts = vec![first];
            while self.eat(TokenKind::Comma) {
                if !self.kind().starts_expression() {
                    break;
                }
                elts.push(self.parse_possibly_starred_named()?);
            }
            self.expect(TokenKind::Rpar)?;
            return Ok(Expr::Tuple(ExprTuple { elts }));
        }
        self.expect(TokenKind::Rpar)?;
        Ok(first)
    }

    fn parse_list_display(&mut self) -> Result<Expr, ParseError> {
        self.bump(); // [
        if self.eat(TokenKind::Rsqb) {
            return Ok(Expr::List(ExprList { elts: Vec::new() }));
        }
        let location = self.location();
        let first = self.parse_possibly_starred_named()?;
        if self.at_comprehension_start() {
            helpers::reject_bare_starred(&first, location)?;
            let generators = self.parse_comprehensions()?;
            self.expect(TokenKind::Rsqb)?;
            return Ok(Expr::ListComp(ExprListComp {
                elt: Box::new(first),
                generators,
            }));
        }
        let mut elts = vec![first];
        while self.eat(TokenKind::Comma) {
            if self.at(TokenKind::Rsqb) {
                break;
            }
            elts.push(self.parse_possibly_starred_named()?);
        }
        self.expect(TokenKind::Rsqb)?;
        Ok(Expr::List(ExprList { elts }))
    }

    /// `{...}`: a dict or set display or comprehension.
    fn parse_brace_display(&mut self) -> Result<Expr, ParseError> {
        self.bump(); // {
        if self.eat(TokenKind::Rbrace) {
            return Ok(Expr::Dict(ExprDict {
                keys: Vec::new(),
                values: Vec::new(),
            }));
        }
        if self.eat(TokenKind::DoubleStar) {
            let value = self.parse_binary_expression(BOR.0)?;
            return self.parse_dict_rest(vec![None], vec![value]);
        }
        let location = self.location();
        let first = self.parse_possibly_starred_named()?;
        if self.at(TokenKind::Colon) {
            helpers::reject_bare_starred(&first, location)?;
            self.bump();
            let value = self.parse_expression()?;
            if self.at_comprehension_start() {
                let generators = self.parse_comprehensions()?;
                self.expect(TokenKind::Rbrace)?;
                return Ok(Expr::DictComp(ExprDictComp {
                    key: Box::new(first),
                    value: Box::new(value),
                    generators,
                }));
            }
            return self.parse_dict_rest(vec![Some(first)], vec![value]);
        }
        if self.at_comprehension_start() {
            helpers::reject_bare_starred(&first, location)?;
            let generators = self.parse_comprehensions()?;
            self.expect(TokenKind::Rbrace)?;
            return Ok(Expr::SetComp(ExprSetComp {
                elt: Box::new(first),
                generators,
            }));
        }
        let mut elts = vec![first];
        while self.eat(TokenKind::Comma) {
            if self.at(TokenKind::Rbrace) {
                break;
            }
            elts.push(self.parse_possibly_starred_named()?);
        }
        self.expect(TokenKind::Rbrace)?;
        Ok(Expr::Set(ExprSet { elts }))
    }

    fn parse_dict_rest(
        &mut self,
        mut keys: Vec<Option<Expr>>,
        mut values: Vec<Expr>,
    ) -> Result<Expr, ParseError> {
        while self.eat(TokenKind::Comma) {
            if self.at(TokenKind::Rbrace) {
                break;
            }
            if self.eat(TokenKind::DoubleStar) {
                keys.push(None);
                values.push(self.parse_binary_expression(BOR.0)?);
            } else {
                let key = self.parse_expression()?;
                self.expect(TokenKind::Colon)?;
                keys.push(Some(key));
                values.push(self.parse_expression()?);
            }
        }
        self.expect(TokenKind::Rbrace)?;
        Ok(Expr::Dict(ExprDict { keys, values }))
    }

    /// The interior of a subscript: a slice, an expression, or a tuple of
    /// them (`a[1:2, ..., b]`).
    fn parse_subscript(&mut self) -> Result<Expr, ParseError> {
        let first = self.parse_slice_item()?;
        if !self.at(TokenKind::Comma) {
            return Ok(first);
        }
        let mut elts = vec![first];
        while self.eat(TokenKind::Comma) {
            if self.at(TokenKind::Rsqb) {
                break;
            }
            elts.push(self.parse_slice_item()?);
        }
        Ok(Expr::Tuple(ExprTuple { elts }))
    }

    fn parse_slice_item(&mut self) -> Result<Expr, ParseError> {
        if self.at(TokenKind::Colon) {
            return self.parse_slice_tail(None);
        }
        if self.at(TokenKind::Star) {
            self.bump();
            let value = self.parse_binary_expression(BOR.0)?;
            return Ok(Expr::Starred(ExprStarred {
                value: Box::new(value),
            }));
        }
        let expr = self.parse_named_expression()?;
        if self.at(TokenKind::Colon) {
            return self.parse_slice_tail(Some(expr));
        }
        Ok(expr)
    }

    fn parse_slice_tail(&mut self, lower: Option<Expr>) -> Result<Expr, ParseError> {
        self.bump(); // :
        let upper = if self.kind().starts_expression() && !self.at(TokenKind::Star) {
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };
        let step = if self.eat(TokenKind::Colon) {
            if self.kind().starts_expression() && !self.at(TokenKind::Star) {
                Some(Box::new(self.parse_expression()?))
            } else {
                None
            }
        } else {
            None
        };
        Ok(Expr::Slice(ExprSlice {
            lower: lower.map(Box::new),
            upper,
            step,
        }))
    }

    /// Parse call arguments; the opening parenthesis has been consumed
    /// and the closing one is consumed here.
    pub(super) fn parse_call_arguments(
        &mut self,
        allow_genexp: bool,
    ) -> Result<(Vec<Expr>, Vec<Keyword>), ParseError> {
        let mut args = Vec::new();
        let mut keywords: Vec<Keyword> = Vec::new();
        let mut seen_keyword = false;
        let mut seen_double_star = false;
        if self.eat(TokenKind::Rpar) {
            return Ok((args, keywords));
        }
        loop {
            if self.at(TokenKind::DoubleStar) {
                self.bump();
                keywords.push(Keyword {
                    arg: None,
                    value: self.parse_expression()?,
                });
                seen_keyword = true;
                seen_double_star = true;
            } else if self.at(TokenKind::Star) {
                if seen_double_star {
                    return Err(self.syntax_error(
                        "iterable argument unpacking follows keyword argument unpacking",
                    ));
                }
                self.bump();
                let value = self.parse_expression()?;
                args.push(Expr::Starred(ExprStarred {
                    value: Box::new(value),
                }));
            } else if self.at(TokenKind::Name) && self.peek_kind() == TokenKind::Equal {
                let name = self.expect_name()?;
                self.bump(); // =
                if keywords
                    .iter()
                    .any(|kw| kw.arg.as_ref().is_some_and(|arg| *arg == name))
                {
                    return Err(self.syntax_error(format!("keyword argument repeated: {name}")));
                }
                keywords.push(Keyword {
                    arg: Some(name),
                    value: self.parse_expression()?,
                });
                seen_keyword = true;
            } else {
                let location = self.location();
                let expr = self.parse_named_expression()?;
                if allow_genexp && self.at_comprehension_start() {
                    if !args.is_empty() || !keywords.is_empty() {
                        return Err(self.syntax_error(
                            "generator expression must be parenthesized",
                        ));
                    }
                    let generators = self.parse_comprehensions()?;
                    args.push(Expr::GeneratorExp(ExprGeneratorExp {
                        elt: Box::new(expr),
                        generators,
                    }));
                    if self.at(TokenKind::Comma) {
                        return Err(self.syntax_error(
                            "generator expression must be parenthesized",
                        ));
                    }
                    self.expect(TokenKind::Rpar)?;
                    return Ok((args, keywords));
                }
                if seen_keyword {
                    return Err(ParseError::new(
                        crate::error::ParseErrorType::Syntax(
                            "positional argument follows keyword argument".to_owned(),
                        ),
                        location,
                    ));
                }
                args.push(expr);
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
            if self.at(TokenKind::Rpar) {
                break;
            }
        }
        self.expect(TokenKind::Rpar)?;
        Ok((args, keywords))
    }

    fn at_comprehension_start(&self) -> bool {
        self.at(TokenKind::For)
            || (self.at(TokenKind::Async) && self.peek_kind() == TokenKind::For)
    }

    /// One or more `for target in iter [if guard]*` clauses; the caller
    /// has checked that a `for` (or `async for`) is next.
    pub(super) fn parse_comprehensions(&mut self) -> Result<Vec<Comprehension>, ParseError> {
        let mut generators = Vec::new();
        while self.at_comprehension_start() {
            let is_async = self.eat(TokenKind::Async);
            self.expect(TokenKind::For)?;
            let target = self.parse_target_list()?;
            self.expect(TokenKind::In)?;
            // The iterable is an `or_test`: a conditional here would
            // swallow the comprehension's own `if` guard.
            let iter = self.parse_binary_expression(0)?;
            let mut ifs = Vec::new();
            while self.eat(TokenKind::If) {
                ifs.push(self.parse_binary_expression(0)?);
            }
            generators.push(Comprehension {
                target,
                iter,
                ifs,
                is_async,
            });
        }
        debug_assert!(!generators.is_empty());
        Ok(generators)
    }

    /// An assignment target list (`for` targets, comprehension targets):
    /// comma-separated targets, validated as L-values.
    pub(super) fn parse_target_list(&mut self) -> Result<Expr, ParseError> {
        let first = self.parse_target()?;
        if !self.at(TokenKind::Comma) {
            return Ok(first);
        }
        let mut elts = vec![first];
        while self.eat(TokenKind::Comma) {
            if !self.kind().starts_expression() {
                break;
            }
            elts.push(self.parse_target()?);
        }
        Ok(Expr::Tuple(ExprTuple { elts }))
    }

    pub(super) fn parse_target(&mut self) -> Result<Expr, ParseError> {
        if self.eat(TokenKind::Star) {
            let value = self.parse_target()?;
            return Ok(Expr::Starred(ExprStarred {
                value: Box::new(value),
            }));
        }
        let location = self.location();
        let expr = self.parse_primary()?;
        helpers::validate_assign_target(&expr, location, false)?;
        Ok(expr)
    }

    pub(super) fn parse_lambda(&mut self) -> Result<Expr, ParseError> {
        self.bump(); // lambda
        let args = if self.at(TokenKind::Colon) {
            flint_python_ast::Arguments::empty()
        } else {
            self.parse_parameters(false, TokenKind::Colon)?
        };
        self.expect(TokenKind::Colon)?;
        let body = self.parse_expression()?;
        Ok(Expr::Lambda(ExprLambda {
            args: Box::new(args),
            body: Box::new(body),
        }))
    }

    pub(super) fn parse_yield_expression(&mut self) -> Result<Expr, ParseError> {
        self.bump(); // yield
        if self.eat(TokenKind::From) {
            let value = self.parse_expression()?;
            return Ok(Expr::YieldFrom(ExprYieldFrom {
                value: Box::new(value),
            }));
        }
        if self.kind().starts_expression() {
            let location = self.location();
            let value = self.parse_expression_list()?;
            helpers::reject_bare_starred(&value, location)?;
            Ok(Expr::Yield(ExprYield {
                value: Some(Box::new(value)),
            }))
        } else {
            Ok(Expr::Yield(ExprYield { value: None }))
        }
    }

    /// A run of adjacent string-like literals, concatenated implicitly.
    pub(super) fn parse_string_group(&mut self) -> Result<Expr, ParseError> {
        let location = self.location();
        let mut parts: Vec<Expr> = Vec::new();
        let mut bytes: Vec<u8> = Vec::new();
        let mut any_str = false;
        let mut any_bytes = false;
        let mut any_fstring = false;
        let mut kind: Option<String> = None;
        let mut first = true;
        loop {
            match self.kind() {
                TokenKind::String => {
                    let Tok::String { value, kind: k } = self.bump() else {
                        unreachable!()
                    };
                    if first {
                        kind = k;
                    }
                    any_str = true;
                    push_joined(&mut parts, helpers::constant_expr(value));
                }
                TokenKind::Bytes => {
                    let Tok::Bytes { value } = self.bump() else {
                        unreachable!()
                    };
                    any_bytes = true;
                    bytes.extend(value);
                }
                TokenKind::FStringStart => {
                    any_str = true;
                    any_fstring = true;
                    let Expr::JoinedStr(joined) = self.parse_fstring()? else {
                        unreachable!()
                    };
                    for value in joined.values {
                        push_joined(&mut parts, value);
                    }
                }
                _ => break,
            }
            first = false;
        }
        if any_bytes && any_str {
            return Err(ParseError::new(
                crate::error::ParseErrorType::Syntax(
                    "cannot mix bytes and nonbytes literals".to_owned(),
                ),
                location,
            ));
        }
        if any_bytes {
            return Ok(helpers::constant_expr(bytes));
        }
        if any_fstring {
            return Ok(Expr::JoinedStr(ExprJoinedStr { values: parts }));
        }
        // A run of plain strings collapses into one constant.
        let mut value = String::new();
        for part in parts {
            let Expr::Constant(ExprConstant {
                value: flint_python_ast::Constant::Str(s),
                ..
            }) = part
            else {
                unreachable!()
            };
            value.push_str(&s);
        }
        Ok(Expr::Constant(ExprConstant {
            value: flint_python_ast::Constant::Str(value),
            kind,
        }))
    }

    fn parse_fstring(&mut self) -> Result<Expr, ParseError> {
        self.bump(); // FStringStart
        let mut values = Vec::new();
        loop {
            match self.kind() {
                TokenKind::FStringMiddle => {
                    let Tok::FStringMiddle { value } = self.bump() else {
                        unreachable!()
                    };
                    push_joined(&mut values, helpers::constant_expr(value));
                }
                TokenKind::Lbrace => {
                    values.push(self.parse_fstring_replacement_field()?);
                }
                TokenKind::FStringEnd => {
                    self.bump();
                    break;
                }
                _ => return Err(self.unexpected_token()),
            }
        }
        Ok(Expr::JoinedStr(ExprJoinedStr { values }))
    }

    fn parse_fstring_replacement_field(&mut self) -> Result<Expr, ParseError> {
        self.bump(); // {
        let location = self.location();
        let value = if self.at(TokenKind::Yield) {
            self.parse_yield_expression()?
        } else {
            self.parse_expression_list()?
        };
        helpers::reject_bare_starred(&value, location)?;
        let conversion = if self.eat(TokenKind::Exclamation) {
            let location = self.location();
            let name = self.expect_name()?;
            match name.as_str() {
                "s" => ConversionFlag::Str,
                "r" => ConversionFlag::Repr,
                "a" => ConversionFlag::Ascii,
                _ => {
                    return Err(ParseError::new(
                        crate::error::ParseErrorType::Syntax(
                            "f-string: invalid conversion character; expected 's', 'r', or 'a'"
                                .to_owned(),
                        ),
                        location,
                    ));
                }
            }
        } else {
            ConversionFlag::None
        };
        let format_spec = if self.eat(TokenKind::Colon) {
            Some(Box::new(self.parse_fstring_spec()?))
        } else {
            None
        };
        self.expect_with_context(TokenKind::Rbrace, "f-string: expecting '}'")?;
        Ok(Expr::FormattedValue(ExprFormattedValue {
            value: Box::new(value),
            conversion,
            format_spec,
        }))
    }

    fn parse_fstring_spec(&mut self) -> Result<Expr, ParseError> {
        let mut values = Vec::new();
        loop {
            match self.kind() {
                TokenKind::FStringMiddle => {
                    let Tok::FStringMiddle { value } = self.bump() else {
                        unreachable!()
                    };
                    push_joined(&mut values, helpers::constant_expr(value));
                }
                TokenKind::Lbrace => {
                    values.push(self.parse_fstring_replacement_field()?);
                }
                _ => break,
            }
        }
        Ok(Expr::JoinedStr(ExprJoinedStr { values }))
    }
}
