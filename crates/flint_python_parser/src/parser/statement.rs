//! Statement parsing.
//!
//! Dispatch is on the first token of the statement. Keywords route to
//! their dedicated parsers; `@` starts a decorator chain; the soft
//! keywords `match` and `type` are promoted by lookahead (with a bounded
//! backtrack for `match`, whose subject grammar overlaps ordinary
//! expressions); everything else is an expression statement that may turn
//! into an assignment, augmented assignment or annotated assignment.

use flint_python_ast::{
    Alias, Arg, Arguments, ExceptHandler, Expr, ExprName, Identifier, Stmt, StmtAnnAssign,
    StmtAssert, StmtAssign, StmtAugAssign, StmtClassDef, StmtDelete, StmtExpr, StmtFor,
    StmtFunctionDef, StmtGlobal, StmtIf, StmtImport, StmtImportFrom, StmtMatch, StmtNonlocal,
    StmtRaise, StmtReturn, StmtTry, StmtTypeAlias, StmtWhile, StmtWith, Suite, TypeParam,
    TypeParamParamSpec, TypeParamTypeVar, TypeParamTypeVarTuple, WithItem,
};

use crate::error::ParseError;
use crate::token::TokenKind;

use super::{helpers, Parser};

impl Parser {
    /// Parse one logical line: a compound statement, or a `;`-separated
    /// run of simple statements.
    pub(super) fn parse_statement(&mut self) -> Result<Vec<Stmt>, ParseError> {
        match self.kind() {
            TokenKind::If => Ok(vec![self.parse_if_statement()?]),
            TokenKind::While => Ok(vec![self.parse_while_statement()?]),
            TokenKind::For => Ok(vec![self.parse_for_statement(false)?]),
            TokenKind::Try => Ok(vec![self.parse_try_statement()?]),
            TokenKind::With => Ok(vec![self.parse_with_statement(false)?]),
            TokenKind::Def => Ok(vec![self.parse_function_def(false, Vec::new())?]),
            TokenKind::Class => Ok(vec![self.parse_class_def(Vec::new())?]),
            TokenKind::At => Ok(vec![self.parse_decorated()?]),
            TokenKind::Async => Ok(vec![self.parse_async_statement()?]),
            TokenKind::Name if self.at_soft_keyword("match") => {
                if let Some(stmt) = self.try_parse_match_statement()? {
                    Ok(vec![stmt])
                } else {
                    self.parse_simple_statement_line()
                }
            }
            _ => self.parse_simple_statement_line(),
        }
    }

    fn parse_simple_statement_line(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut stmts = vec![self.parse_simple_statement()?];
        while self.eat(TokenKind::Semi) {
            if matches!(self.kind(), TokenKind::Newline | TokenKind::EndOfFile) {
                break;
            }
            stmts.push(self.parse_simple_statement()?);
        }
        if !self.eat(TokenKind::Newline) && !self.at(TokenKind::EndOfFile) {
            self.expect(TokenKind::Newline)?;
        }
        Ok(stmts)
    }

    fn parse_simple_statement(&mut self) -> Result<Stmt, ParseError> {
        match self.kind() {
            TokenKind::Pass => {
                self.bump();
                Ok(Stmt::Pass)
            }
            TokenKind::Break => {
                self.bump();
                Ok(Stmt::Break)
            }
            TokenKind::Continue => {
                self.bump();
                Ok(Stmt::Continue)
            }
            TokenKind::Return => {
                self.bump();
                let value = if self.kind().starts_expression() {
                    let location = self.location();
                    let value = self.parse_expression_list()?;
                    helpers::reject_bare_starred(&value, location)?;
                    Some(Box::new(value))
                } else {
                    None
                };
                Ok(Stmt::Return(StmtReturn { value }))
            }
            TokenKind::Raise => {
                self.bump();
                let mut exc = None;
                let mut cause = None;
                if self.kind().starts_expression() {
                    exc = Some(Box::new(self.parse_expression()?));
                    if self.eat(TokenKind::From) {
                        cause = Some(Box::new(self.parse_expression()?));
                    }
                }
                Ok(Stmt::Raise(StmtRaise { exc, cause }))
            }
            TokenKind::Del => {
                self.bump();
                let mut targets = Vec::new();
                loop {
                    let location = self.location();
                    let target = self.parse_expression()?;
                    helpers::validate_del_target(&target, location)?;
                    targets.push(target);
                    if !self.eat(TokenKind::Comma) || !self.kind().starts_expression() {
                        break;
                    }
                }
                Ok(Stmt::Delete(StmtDelete { targets }))
            }
            TokenKind::Assert => {
                self.bump();
                let test = Box::new(self.parse_expression()?);
                let msg = if self.eat(TokenKind::Comma) {
                    Some(Box::new(self.parse_expression()?))
                } else {
                    None
                };
                Ok(Stmt::Assert(StmtAssert { test, msg }))
            }
            TokenKind::Global => {
                self.bump();
                let names = self.parse_name_list()?;
                Ok(Stmt::Global(StmtGlobal { names }))
            }
            TokenKind::Nonlocal => {
                self.bump();
                let names = self.parse_name_list()?;
                Ok(Stmt::Nonlocal(StmtNonlocal { names }))
            }
            TokenKind::Import => self.parse_import_statement(),
            TokenKind::From => self.parse_import_from_statement(),
            TokenKind::Yield => {
                let value = self.parse_yield_expression()?;
                Ok(Stmt::Expr(StmtExpr {
                    value: Box::new(value),
                }))
            }
            TokenKind::Name
                if self.at_soft_keyword("type")
                    && self.peek_kind() == TokenKind::Name
                    && matches!(self.nth_kind(2), TokenKind::Equal | TokenKind::Lsqb) =>
            {
                self.parse_type_alias_statement()
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_name_list(&mut self) -> Result<Vec<Identifier>, ParseError> {
        let mut names = vec![self.expect_name()?];
        while self.eat(TokenKind::Comma) {
            names.push(self.expect_name()?);
        }
        Ok(names)
    }

    /// An expression statement, or an assignment when `=`, an augmented
    /// operator, or an annotation `:` follows the first expression.
    fn parse_expression_statement(&mut self) -> Result<Stmt, ParseError> {
        let starts_parenthesized = self.at(TokenKind::Lpar);
        let location = self.location();
        let first = self.parse_expression_list()?;

        if self.at(TokenKind::Colon) {
            // `target: annotation [= value]`
            helpers::validate_ann_assign_target(&first, location)?;
            let simple = first.is_name() && !starts_parenthesized;
            self.bump();
            let annotation = Box::new(self.parse_expression()?);
            let value = if self.eat(TokenKind::Equal) {
                Some(Box::new(self.parse_assignment_value()?))
            } else {
                None
            };
            return Ok(Stmt::AnnAssign(StmtAnnAssign {
                target: Box::new(first),
                annotation,
                value,
                simple,
            }));
        }

        if let Some(op) = self.kind().as_augmented_assign_operator() {
            helpers::validate_aug_assign_target(&first, location)?;
            self.bump();
            let value = Box::new(self.parse_assignment_value()?);
            return Ok(Stmt::AugAssign(StmtAugAssign {
                target: Box::new(first),
                op,
                value,
            }));
        }

        if self.at(TokenKind::Equal) {
            let mut targets = Vec::new();
            let mut value = first;
            let mut value_location = location;
            while self.eat(TokenKind::Equal) {
                helpers::validate_assign_target(&value, value_location, false)?;
                targets.push(value);
                value_location = self.location();
                value = self.parse_assignment_value()?;
            }
            return Ok(Stmt::Assign(StmtAssign {
                targets,
                value: Box::new(value),
            }));
        }

        helpers::reject_bare_starred(&first, location)?;
        Ok(Stmt::Expr(StmtExpr {
            value: Box::new(first),
        }))
    }

    /// The right-hand side of an assignment: a yield expression or an
    /// expression list.
    fn parse_assignment_value(&mut self) -> Result<Expr, ParseError> {
        if self.at(TokenKind::Yield) {
            self.parse_yield_expression()
        } else {
            let location = self.location();
            let value = self.parse_expression_list()?;
            helpers::reject_bare_starred(&value, location)?;
            Ok(value)
        }
    }

    fn parse_import_statement(&mut self) -> Result<Stmt, ParseError> {
        self.bump(); // import
        let mut names = Vec::new();
        loop {
            let name = self.parse_dotted_name()?;
            let asname = if self.eat(TokenKind::As) {
                Some(self.expect_name()?)
            } else {
                None
            };
            names.push(Alias { name, asname });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(Stmt::Import(StmtImport { names }))
    }

    fn parse_dotted_name(&mut self) -> Result<Identifier, ParseError> {
        let mut name = String::from(self.expect_name()?.as_str());
        while self.at(TokenKind::Dot) && self.peek_kind() == TokenKind::Name {
            self.bump();
            name.push('.');
            name.push_str(self.expect_name()?.as_str());
        }
        Ok(Identifier::new(name))
    }

    fn parse_import_from_statement(&mut self) -> Result<Stmt, ParseError> {
        self.bump(); // from
        let mut level = 0u32;
        loop {
            match self.kind() {
                TokenKind::Dot => {
                    self.bump();
                    level += 1;
                }
                TokenKind::Ellipsis => {
                    self.bump();
                    level += 3;
                }
                _ => break,
            }
        }
        let module = if self.at(TokenKind::Name) {
            Some(self.parse_dotted_name()?)
        } else if level == 0 {
            return Err(self.expected("module name"));
        } else {
            None
        };
        self.expect(TokenKind::Import)?;
        let names = if self.eat(TokenKind::Star) {
            vec![Alias {
                name: Identifier::new("*"),
                asname: None,
            }]
        } else if self.eat(TokenKind::Lpar) {
            let mut names = Vec::new();
            loop {
                if self.at(TokenKind::Rpar) {
                    break;
                }
                names.push(self.parse_import_alias()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::Rpar)?;
            if names.is_empty() {
                return Err(self.expected("import name"));
            }
            names
        } else {
            let mut names = vec![self.parse_import_alias()?];
            while self.eat(TokenKind::Comma) {
                names.push(self.parse_import_alias()?);
            }
            names
        };
        Ok(Stmt::ImportFrom(StmtImportFrom {
            module,
            names,
            level,
        }))
    }

    fn parse_import_alias(&mut self) -> Result<Alias, ParseError> {
        let name = self.expect_name()?;
        let asname = if self.eat(TokenKind::As) {
            Some(self.expect_name()?)
        } else {
            None
        };
        Ok(Alias { name, asname })
    }

    fn parse_type_alias_statement(&mut self) -> Result<Stmt, ParseError> {
        self.bump(); // type
        let name = Expr::Name(ExprName {
            id: self.expect_name()?,
        });
        let type_params = if self.at(TokenKind::Lsqb) {
            self.parse_type_params()?
        } else {
            Vec::new()
        };
        self.expect(TokenKind::Equal)?;
        let value = Box::new(self.parse_expression()?);
        Ok(Stmt::TypeAlias(StmtTypeAlias {
            name: Box::new(name),
            type_params,
            value,
        }))
    }

    // Compound statements

    /// Parse the `: suite` that closes a compound-statement header:
    /// either an indented block or a run of simple statements on the same
    /// line.
    pub(super) fn parse_suite(&mut self) -> Result<Suite, ParseError> {
        self.expect(TokenKind::Colon)?;
        if self.eat(TokenKind::Newline) {
            if !self.eat(TokenKind::Indent) {
                return Err(self.expected("an indented block"));
            }
            let mut body = Suite::new();
            while !self.eat(TokenKind::Dedent) {
                body.extend(self.parse_statement()?);
            }
            Ok(body)
        } else {
            self.parse_simple_statement_line()
        }
    }

    fn parse_if_statement(&mut self) -> Result<Stmt, ParseError> {
        self.bump(); // if (or elif)
        let test = Box::new(self.parse_named_expression()?);
        let body = self.parse_suite()?;
        let orelse = if self.at(TokenKind::Elif) {
            vec![self.parse_if_statement()?]
        } else if self.eat(TokenKind::Else) {
            self.parse_suite()?
        } else {
            Vec::new()
        };
        Ok(Stmt::If(StmtIf { test, body, orelse }))
    }

    fn parse_while_statement(&mut self) -> Result<Stmt, ParseError> {
        self.bump(); // while
        let test = Box::new(self.parse_named_expression()?);
        let body = self.parse_suite()?;
        let orelse = if self.eat(TokenKind::Else) {
            self.parse_suite()?
        } else {
            Vec::new()
        };
        Ok(Stmt::While(StmtWhile { test, body, orelse }))
    }

    fn parse_for_statement(&mut self, is_async: bool) -> Result<Stmt, ParseError> {
        self.bump(); // for
        let target = Box::new(self.parse_target_list()?);
        self.expect(TokenKind::In)?;
        let location = self.location();
        let iter = self.parse_expression_list()?;
        helpers::reject_bare_starred(&iter, location)?;
        let body = self.parse_suite()?;
        let orelse = if self.eat(TokenKind::Else) {
            self.parse_suite()?
        } else {
            Vec::new()
        };
        Ok(Stmt::For(StmtFor {
            is_async,
            target,
            iter: Box::new(iter),
            body,
            orelse,
        }))
    }

    fn parse_with_statement(&mut self, is_async: bool) -> Result<Stmt, ParseError> {
        self.bump(); // with
        let items = self.parse_with_items()?;
        let body = self.parse_suite()?;
        Ok(Stmt::With(StmtWith {
            is_async,
            items,
            body,
        }))
    }

    fn parse_with_items(&mut self) -> Result<Vec<WithItem>, ParseError> {
        // `with (a as x, b):` parenthesizes the item list itself; the
        // parenthesis could equally open a tuple (or grouped) context
        // expression, so try the item-list reading first and back off.
        if self.at(TokenKind::Lpar) {
            let checkpoint = self.checkpoint();
            if let Some(items) = self.try_parse_parenthesized_with_items() {
                return Ok(items);
            }
            self.restore(checkpoint);
        }
        let mut items = vec![self.parse_with_item()?];
        while self.eat(TokenKind::Comma) {
            items.push(self.parse_with_item()?);
        }
        Ok(items)
    }

    fn try_parse_parenthesized_with_items(&mut self) -> Option<Vec<WithItem>> {
        self.bump(); // (
        let mut items = Vec::new();
        loop {
            if self.at(TokenKind::Rpar) {
                break;
            }
            items.push(self.parse_with_item().ok()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        if items.is_empty() {
            return None;
        }
        if !self.eat(TokenKind::Rpar) {
            return None;
        }
        // Only a `:` directly after the parenthesis confirms the list
        // reading; `with (a, b) as c:` must re-parse as a tuple.
        self.at(TokenKind::Colon).then_some(items)
    }

    fn parse_with_item(&mut self) -> Result<WithItem, ParseError> {
        let context_expr = self.parse_expression()?;
        let optional_vars = if self.eat(TokenKind::As) {
            Some(Box::new(self.parse_target()?))
        } else {
            None
        };
        Ok(WithItem {
            context_expr,
            optional_vars,
        })
    }

    fn parse_try_statement(&mut self) -> Result<Stmt, ParseError> {
        self.bump(); // try
        let body = self.parse_suite()?;
        let mut handlers = Vec::new();
        let mut is_star = false;
        let mut seen_bare_except = false;
        while self.at(TokenKind::Except) {
            if seen_bare_except {
                return Err(self.syntax_error("default 'except:' must be last"));
            }
            self.bump();
            let star = self.eat(TokenKind::Star);
            if handlers.is_empty() {
                is_star = star;
            } else if star != is_star {
                return Err(
                    self.syntax_error("cannot have both 'except' and 'except*' on the same 'try'")
                );
            }
            let type_ = if self.kind().starts_expression() {
                let type_ = self.parse_expression()?;
                if self.at(TokenKind::Comma) {
                    return Err(
                        self.syntax_error("multiple exception types must be parenthesized")
                    );
                }
                Some(Box::new(type_))
            } else {
                if star {
                    return Err(self.expected("one or more exception types"));
                }
                seen_bare_except = true;
                None
            };
            let name = if self.eat(TokenKind::As) {
                Some(self.expect_name()?)
            } else {
                None
            };
            let body = self.parse_suite()?;
            handlers.push(ExceptHandler { type_, name, body });
        }
        let orelse = if self.at(TokenKind::Else) {
            if handlers.is_empty() {
                return Err(self.expected("'except' or 'finally' block"));
            }
            self.bump();
            self.parse_suite()?
        } else {
            Vec::new()
        };
        let finalbody = if self.eat(TokenKind::Finally) {
            self.parse_suite()?
        } else {
            Vec::new()
        };
        if handlers.is_empty() && finalbody.is_empty() {
            return Err(self.expected("'except' or 'finally' block"));
        }
        Ok(Stmt::Try(StmtTry {
            body,
            handlers,
            orelse,
            finalbody,
            is_star,
        }))
    }

    fn parse_decorated(&mut self) -> Result<Stmt, ParseError> {
        let mut decorator_list = Vec::new();
        while self.eat(TokenKind::At) {
            decorator_list.push(self.parse_named_expression()?);
            self.expect(TokenKind::Newline)?;
        }
        match self.kind() {
            TokenKind::Def => self.parse_function_def(false, decorator_list),
            TokenKind::Class => self.parse_class_def(decorator_list),
            TokenKind::Async => {
                self.bump();
                if !self.at(TokenKind::Def) {
                    return Err(self.expected("function definition after 'async'"));
                }
                self.parse_function_def(true, decorator_list)
            }
            _ => Err(self.expected("function or class definition after decorators")),
        }
    }

    fn parse_async_statement(&mut self) -> Result<Stmt, ParseError> {
        self.bump(); // async
        match self.kind() {
            TokenKind::Def => self.parse_function_def(true, Vec::new()),
            TokenKind::For => self.parse_for_statement(true),
            TokenKind::With => self.parse_with_statement(true),
            _ => Err(self.expected("'def', 'for' or 'with' after 'async'")),
        }
    }

    fn parse_function_def(
        &mut self,
        is_async: bool,
        decorator_list: Vec<Expr>,
    ) -> Result<Stmt, ParseError> {
        self.bump(); // def
        let name = self.expect_name()?;
        let type_params = if self.at(TokenKind::Lsqb) {
            self.parse_type_params()?
        } else {
            Vec::new()
        };
        self.expect(TokenKind::Lpar)?;
        let args = self.parse_parameters(true, TokenKind::Rpar)?;
        self.expect(TokenKind::Rpar)?;
        let returns = if self.eat(TokenKind::Rarrow) {
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };
        let body = self.parse_suite()?;
        Ok(Stmt::FunctionDef(StmtFunctionDef {
            is_async,
            name,
            type_params,
            args: Box::new(args),
            returns,
            body,
            decorator_list,
        }))
    }

    fn parse_class_def(&mut self, decorator_list: Vec<Expr>) -> Result<Stmt, ParseError> {
        self.bump(); // class
        let name = self.expect_name()?;
        let type_params = if self.at(TokenKind::Lsqb) {
            self.parse_type_params()?
        } else {
            Vec::new()
        };
        let (bases, keywords) = if self.eat(TokenKind::Lpar) {
            self.parse_call_arguments(false)?
        } else {
            (Vec::new(), Vec::new())
        };
        let body = self.parse_suite()?;
        Ok(Stmt::ClassDef(StmtClassDef {
            name,
            type_params,
            bases,
            keywords,
            body,
            decorator_list,
        }))
    }

    /// A PEP 695 type parameter list: `[T, U: bound, *Ts, **P]`.
    fn parse_type_params(&mut self) -> Result<Vec<TypeParam>, ParseError> {
        self.bump(); // [
        let mut type_params = Vec::new();
        loop {
            if self.at(TokenKind::Rsqb) {
                break;
            }
            let param = match self.kind() {
                TokenKind::Star => {
                    self.bump();
                    TypeParam::TypeVarTuple(TypeParamTypeVarTuple {
                        name: self.expect_name()?,
                    })
                }
                TokenKind::DoubleStar => {
                    self.bump();
                    TypeParam::ParamSpec(TypeParamParamSpec {
                        name: self.expect_name()?,
                    })
                }
                _ => {
                    let name = self.expect_name()?;
                    let bound = if self.eat(TokenKind::Colon) {
                        Some(Box::new(self.parse_expression()?))
                    } else {
                        None
                    };
                    TypeParam::TypeVar(TypeParamTypeVar { name, bound })
                }
            };
            type_params.push(param);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        if type_params.is_empty() {
            return Err(self.syntax_error("type parameter list cannot be empty"));
        }
        self.expect(TokenKind::Rsqb)?;
        Ok(type_params)
    }

    /// A parameter list for `def` (with annotations) or `lambda`
    /// (without). Stops before `terminator`, which the caller consumes.
    pub(super) fn parse_parameters(
        &mut self,
        allow_annotations: bool,
        terminator: TokenKind,
    ) -> Result<Arguments, ParseError> {
        let mut args = Arguments::empty();
        let mut star_seen = false;
        loop {
            if self.at(terminator) {
                break;
            }
            match self.kind() {
                TokenKind::Slash => {
                    self.bump();
                    if star_seen {
                        return Err(self.syntax_error("'/' must be ahead of '*'"));
                    }
                    if !args.posonlyargs.is_empty() {
                        return Err(self.syntax_error("'/' may appear only once"));
                    }
                    if args.args.is_empty() {
                        return Err(
                            self.syntax_error("at least one argument must precede '/'")
                        );
                    }
                    args.posonlyargs = std::mem::take(&mut args.args);
                }
                TokenKind::Star => {
                    self.bump();
                    if star_seen {
                        return Err(self.syntax_error("'*' may appear only once"));
                    }
                    star_seen = true;
                    if !self.at(TokenKind::Comma) && !self.at(terminator) {
                        let vararg = self.parse_parameter(allow_annotations)?;
                        if self.at(TokenKind::Equal) {
                            return Err(self.syntax_error(
                                "var-positional argument cannot have default value",
                            ));
                        }
                        args.vararg = Some(Box::new(vararg));
                    }
                }
                TokenKind::DoubleStar => {
                    self.bump();
                    let kwarg = self.parse_parameter(allow_annotations)?;
                    if self.at(TokenKind::Equal) {
                        return Err(
                            self.syntax_error("var-keyword argument cannot have default value")
                        );
                    }
                    args.kwarg = Some(Box::new(kwarg));
                    if self.eat(TokenKind::Comma) && !self.at(terminator) {
                        return Err(
                            self.syntax_error("arguments cannot follow var-keyword argument")
                        );
                    }
                    break;
                }
                _ => {
                    let arg = self.parse_parameter(allow_annotations)?;
                    let default = if self.eat(TokenKind::Equal) {
                        Some(self.parse_expression()?)
                    } else {
                        None
                    };
                    if star_seen {
                        args.kwonlyargs.push(arg);
                        args.kw_defaults.push(default);
                    } else if let Some(default) = default {
                        args.args.push(arg);
                        args.defaults.push(default);
                    } else {
                        if !args.defaults.is_empty() {
                            return Err(self.syntax_error(
                                "parameter without a default follows parameter with a default",
                            ));
                        }
                        args.args.push(arg);
                    }
                }
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        if star_seen && args.vararg.is_none() && args.kwonlyargs.is_empty() && args.kwarg.is_none()
        {
            return Err(self.syntax_error("named arguments must follow bare '*'"));
        }
        self.check_duplicate_parameters(&args)?;
        Ok(args)
    }

    fn parse_parameter(&mut self, allow_annotations: bool) -> Result<Arg, ParseError> {
        let arg = self.expect_name()?;
        let annotation = if allow_annotations && self.eat(TokenKind::Colon) {
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };
        Ok(Arg {
            arg,
            annotation,
            type_comment: None,
        })
    }

    fn check_duplicate_parameters(&self, args: &Arguments) -> Result<(), ParseError> {
        let mut seen = std::collections::HashSet::new();
        let all = args
            .posonlyargs
            .iter()
            .chain(&args.args)
            .chain(args.vararg.as_deref())
            .chain(&args.kwonlyargs)
            .chain(args.kwarg.as_deref());
        for arg in all {
            if !seen.insert(arg.arg.as_str()) {
                return Err(self.syntax_error(format!(
                    "duplicate argument '{}' in function definition",
                    arg.arg
                )));
            }
        }
        Ok(())
    }

    /// `match` is a soft keyword: commit to the statement reading only if
    /// a subject expression followed by `:` parses, otherwise rewind and
    /// let the expression-statement path have the tokens.
    fn try_parse_match_statement(&mut self) -> Result<Option<Stmt>, ParseError> {
        let checkpoint = self.checkpoint();
        self.bump(); // the `match` name
        if !self.kind().starts_expression() {
            self.restore(checkpoint);
            return Ok(None);
        }
        let Ok(subject) = self.parse_expression_list() else {
            self.restore(checkpoint);
            return Ok(None);
        };
        if !self.at(TokenKind::Colon) {
            self.restore(checkpoint);
            return Ok(None);
        }
        self.bump(); // :
        self.expect(TokenKind::Newline)?;
        if !self.eat(TokenKind::Indent) {
            return Err(self.expected("an indented block"));
        }
        let mut cases = Vec::new();
        while self.at_soft_keyword("case") {
            cases.push(self.parse_match_case()?);
        }
        if cases.is_empty() {
            return Err(self.expected("at least one 'case' block"));
        }
        self.expect(TokenKind::Dedent)?;
        Ok(Some(Stmt::Match(StmtMatch {
            subject: Box::new(subject),
            cases,
        })))
    }
}
