//! The unparser: AST subtree in, Python source out.
//!
//! Expressions carry an integer precedence; a child is parenthesized iff
//! its level is below the level its context demands. `**` parses its
//! right operand at the unary level and is right-associative, so its left
//! operand is rendered one level tighter and its right one looser; unary
//! operators render their operand at their own level so `-x ** y` keeps
//! the power unparenthesized.

use flint_python_ast::{
    Alias, Arguments, BoolOp, Comprehension, Constant, ExceptHandler, Expr, ExprConstant,
    Identifier, MatchCase, Mod, Operator, Pattern, Stmt, StmtAnnAssign, StmtAssert, StmtAssign,
    StmtAugAssign, StmtClassDef, StmtDelete, StmtExpr, StmtFor, StmtFunctionDef, StmtGlobal,
    StmtIf, StmtImport, StmtImportFrom, StmtMatch, StmtNonlocal, StmtRaise, StmtReturn, StmtTry,
    StmtTypeAlias, StmtWhile, StmtWith, TypeParam, UnaryOp, WithItem,
};

use crate::escape;
use crate::stylist::Style;

pub(crate) mod precedence {
    macro_rules! precedence {
        ($($op:ident,)*) => {
            precedence!(@0, $($op,)*);
        };
        (@$i:expr, $op1:ident, $($op:ident,)*) => {
            pub(crate) const $op1: u8 = $i;
            precedence!(@$i + 1, $($op,)*);
        };
        (@$i:expr,) => {};
    }
    precedence!(
        TUPLE, TEST, OR, AND, NOT, CMP, // "EXPR" =
        BOR, BXOR, BAND, SHIFT, ARITH, TERM, FACTOR, POWER, AWAIT, ATOM,
    );
    pub(crate) const EXPR: u8 = BOR;
}

/// Generates source for one AST subtree with a fixed [`Style`].
pub struct Generator<'a> {
    style: &'a Style,
    buffer: String,
    indent_depth: usize,
}

impl<'a> Generator<'a> {
    pub fn new(style: &'a Style) -> Self {
        Self {
            style,
            buffer: String::new(),
            indent_depth: 0,
        }
    }

    pub fn finish(self) -> String {
        self.buffer
    }

    fn p(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    fn p_id(&mut self, id: &Identifier) {
        self.buffer.push_str(id.as_str());
    }

    fn p_if(&mut self, cond: bool, s: &str) {
        if cond {
            self.p(s);
        }
    }

    fn p_delim(&mut self, first: &mut bool, s: &str) {
        self.p_if(!std::mem::take(first), s);
    }

    fn newline(&mut self) {
        self.buffer.push('\n');
        for _ in 0..self.indent_depth {
            self.buffer.push_str(&self.style.indent());
        }
    }

    /// Render a subtree with a scratch generator sharing this style.
    fn buffered(&self, f: impl FnOnce(&mut Generator)) -> String {
        let mut sub = Generator::new(self.style);
        f(&mut sub);
        sub.finish()
    }

    pub fn unparse_module(&mut self, module: &Mod) {
        match module {
            Mod::Module(module) => {
                let mut first = true;
                for stmt in &module.body {
                    if !std::mem::take(&mut first) {
                        self.newline();
                    }
                    self.unparse_stmt(stmt);
                }
                if !module.body.is_empty() {
                    self.buffer.push('\n');
                }
            }
            Mod::Expression(expression) => {
                self.unparse_expr(&expression.body, precedence::TUPLE);
            }
        }
    }

    /// Emit the statements of a block, indented one level.
    fn unparse_suite(&mut self, suite: &[Stmt]) {
        self.indent_depth += 1;
        for stmt in suite {
            self.newline();
            self.unparse_stmt(stmt);
        }
        self.indent_depth -= 1;
    }

    pub fn unparse_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::FunctionDef(def) => self.unparse_function_def(def),
            Stmt::ClassDef(def) => self.unparse_class_def(def),
            Stmt::Return(StmtReturn { value }) => {
                self.p("return");
                if let Some(value) = value {
                    self.p(" ");
                    self.unparse_expr(value, precedence::TUPLE);
                }
            }
            Stmt::Delete(StmtDelete { targets }) => {
                self.p("del ");
                let mut first = true;
                for target in targets {
                    self.p_delim(&mut first, ", ");
                    self.unparse_expr(target, precedence::TEST);
                }
            }
            Stmt::Assign(StmtAssign { targets, value }) => {
                for target in targets {
                    self.unparse_expr(target, precedence::TUPLE);
                    self.p(" = ");
                }
                self.unparse_assignment_value(value);
            }
            Stmt::AugAssign(StmtAugAssign { target, op, value }) => {
                self.unparse_expr(target, precedence::TUPLE);
                self.p(" ");
                self.p(op.as_str());
                self.p("= ");
                self.unparse_assignment_value(value);
            }
            Stmt::AnnAssign(StmtAnnAssign {
                target,
                annotation,
                value,
                simple,
            }) => {
                // A non-simple name target keeps its parentheses so the
                // flag round-trips.
                let need_parens = !simple && target.is_name();
                self.p_if(need_parens, "(");
                self.unparse_expr(target, precedence::ATOM);
                self.p_if(need_parens, ")");
                self.p(": ");
                self.unparse_expr(annotation, precedence::TEST);
                if let Some(value) = value {
                    self.p(" = ");
                    self.unparse_assignment_value(value);
                }
            }
            Stmt::TypeAlias(StmtTypeAlias {
                name,
                type_params,
                value,
            }) => {
                self.p("type ");
                self.unparse_expr(name, precedence::ATOM);
                self.unparse_type_params(type_params);
                self.p(" = ");
                self.unparse_expr(value, precedence::TEST);
            }
            Stmt::For(StmtFor {
                is_async,
                target,
                iter,
                body,
                orelse,
            }) => {
                self.p_if(*is_async, "async ");
                self.p("for ");
                self.unparse_expr(target, precedence::TUPLE);
                self.p(" in ");
                self.unparse_expr(iter, precedence::TUPLE);
                self.p(":");
                self.unparse_suite(body);
                if !orelse.is_empty() {
                    self.newline();
                    self.p("else:");
                    self.unparse_suite(orelse);
                }
            }
            Stmt::While(StmtWhile { test, body, orelse }) => {
                self.p("while ");
                self.unparse_expr(test, precedence::TEST);
                self.p(":");
                self.unparse_suite(body);
                if !orelse.is_empty() {
                    self.newline();
                    self.p("else:");
                    self.unparse_suite(orelse);
                }
            }
            Stmt::If(stmt_if) => self.unparse_if(stmt_if, false),
            Stmt::With(StmtWith {
                is_async,
                items,
                body,
            }) => {
                self.p_if(*is_async, "async ");
                self.p("with ");
                let mut first = true;
                for item in items {
                    self.p_delim(&mut first, ", ");
                    self.unparse_with_item(item);
                }
                self.p(":");
                self.unparse_suite(body);
            }
            Stmt::Match(StmtMatch { subject, cases }) => {
                self.p("match ");
                self.unparse_expr(subject, precedence::TUPLE);
                self.p(":");
                self.indent_depth += 1;
                for case in cases {
                    self.newline();
                    self.unparse_match_case(case);
                }
                self.indent_depth -= 1;
            }
            Stmt::Raise(StmtRaise { exc, cause }) => {
                self.p("raise");
                if let Some(exc) = exc {
                    self.p(" ");
                    self.unparse_expr(exc, precedence::TEST);
                }
                if let Some(cause) = cause {
                    self.p(" from ");
                    self.unparse_expr(cause, precedence::TEST);
                }
            }
            Stmt::Try(stmt_try) => self.unparse_try(stmt_try),
            Stmt::Assert(StmtAssert { test, msg }) => {
                self.p("assert ");
                self.unparse_expr(test, precedence::TEST);
                if let Some(msg) = msg {
                    self.p(", ");
                    self.unparse_expr(msg, precedence::TEST);
                }
            }
            Stmt::Import(StmtImport { names }) => {
                self.p("import ");
                self.unparse_aliases(names);
            }
            Stmt::ImportFrom(StmtImportFrom {
                module,
                names,
                level,
            }) => {
                self.p("from ");
                for _ in 0..*level {
                    self.p(".");
                }
                if let Some(module) = module {
                    self.p_id(module);
                }
                self.p(" import ");
                self.unparse_aliases(names);
            }
            Stmt::Global(StmtGlobal { names }) => {
                self.p("global ");
                self.unparse_name_list(names);
            }
            Stmt::Nonlocal(StmtNonlocal { names }) => {
                self.p("nonlocal ");
                self.unparse_name_list(names);
            }
            Stmt::Expr(StmtExpr { value }) => match value.as_ref() {
                // A yield statement reads bare, without the parentheses
                // the expression form carries.
                Expr::Yield(_) | Expr::YieldFrom(_) => self.unparse_yield_bare(value),
                value => self.unparse_expr(value, precedence::TUPLE),
            },
            Stmt::Pass => self.p("pass"),
            Stmt::Break => self.p("break"),
            Stmt::Continue => self.p("continue"),
        }
    }

    /// Assignment right-hand sides admit a bare yield.
    fn unparse_assignment_value(&mut self, value: &Expr) {
        match value {
            Expr::Yield(_) | Expr::YieldFrom(_) => self.unparse_yield_bare(value),
            value => self.unparse_expr(value, precedence::TUPLE),
        }
    }

    fn unparse_yield_bare(&mut self, value: &Expr) {
        match value {
            Expr::Yield(yield_expr) => {
                self.p("yield");
                if let Some(value) = &yield_expr.value {
                    self.p(" ");
                    self.unparse_expr(value, precedence::TUPLE);
                }
            }
            Expr::YieldFrom(yield_from) => {
                self.p("yield from ");
                self.unparse_expr(&yield_from.value, precedence::TEST);
            }
            _ => unreachable!(),
        }
    }

    fn unparse_if(&mut self, stmt_if: &StmtIf, is_elif: bool) {
        self.p(if is_elif { "elif " } else { "if " });
        self.unparse_expr(&stmt_if.test, precedence::TEST);
        self.p(":");
        self.unparse_suite(&stmt_if.body);
        match stmt_if.orelse.as_slice() {
            [] => {}
            [Stmt::If(nested)] => {
                self.newline();
                self.unparse_if(nested, true);
            }
            orelse => {
                self.newline();
                self.p("else:");
                self.unparse_suite(orelse);
            }
        }
    }

    fn unparse_try(&mut self, stmt_try: &StmtTry) {
        self.p("try:");
        self.unparse_suite(&stmt_try.body);
        for handler in &stmt_try.handlers {
            self.newline();
            self.unparse_except_handler(handler, stmt_try.is_star);
        }
        if !stmt_try.orelse.is_empty() {
            self.newline();
            self.p("else:");
            self.unparse_suite(&stmt_try.orelse);
        }
        if !stmt_try.finalbody.is_empty() {
            self.newline();
            self.p("finally:");
            self.unparse_suite(&stmt_try.finalbody);
        }
    }

    fn unparse_except_handler(&mut self, handler: &ExceptHandler, is_star: bool) {
        self.p("except");
        self.p_if(is_star, "*");
        if let Some(type_) = &handler.type_ {
            self.p(" ");
            self.unparse_expr(type_, precedence::TEST);
        }
        if let Some(name) = &handler.name {
            self.p(" as ");
            self.p_id(name);
        }
        self.p(":");
        self.unparse_suite(&handler.body);
    }

    fn unparse_with_item(&mut self, item: &WithItem) {
        self.unparse_expr(&item.context_expr, precedence::TEST);
        if let Some(optional_vars) = &item.optional_vars {
            self.p(" as ");
            self.unparse_expr(optional_vars, precedence::TEST);
        }
    }

    fn unparse_function_def(&mut self, def: &StmtFunctionDef) {
        for decorator in &def.decorator_list {
            self.p("@");
            self.unparse_expr(decorator, precedence::TEST);
            self.newline();
        }
        self.p_if(def.is_async, "async ");
        self.p("def ");
        self.p_id(&def.name);
        self.unparse_type_params(&def.type_params);
        self.p("(");
        self.unparse_arguments(&def.args);
        self.p(")");
        if let Some(returns) = &def.returns {
            self.p(" -> ");
            self.unparse_expr(returns, precedence::TEST);
        }
        self.p(":");
        self.unparse_suite(&def.body);
    }

    fn unparse_class_def(&mut self, def: &StmtClassDef) {
        for decorator in &def.decorator_list {
            self.p("@");
            self.unparse_expr(decorator, precedence::TEST);
            self.newline();
        }
        self.p("class ");
        self.p_id(&def.name);
        self.unparse_type_params(&def.type_params);
        if !def.bases.is_empty() || !def.keywords.is_empty() {
            self.p("(");
            let mut first = true;
            for base in &def.bases {
                self.p_delim(&mut first, ", ");
                self.unparse_expr(base, precedence::TEST);
            }
            for keyword in &def.keywords {
                self.p_delim(&mut first, ", ");
                if let Some(arg) = &keyword.arg {
                    self.p_id(arg);
                    self.p("=");
                } else {
                    self.p("**");
                }
                self.unparse_expr(&keyword.value, precedence::TEST);
            }
            self.p(")");
        }
        self.p(":");
        self.unparse_suite(&def.body);
    }

    fn unparse_type_params(&mut self, type_params: &[TypeParam]) {
        if type_params.is_empty() {
            return;
        }
        self.p("[");
        let mut first = true;
        for type_param in type_params {
            self.p_delim(&mut first, ", ");
            match type_param {
                TypeParam::TypeVar(tv) => {
                    self.p_id(&tv.name);
                    if let Some(bound) = &tv.bound {
                        self.p(": ");
                        self.unparse_expr(bound, precedence::TEST);
                    }
                }
                TypeParam::TypeVarTuple(tvt) => {
                    self.p("*");
                    self.p_id(&tvt.name);
                }
                TypeParam::ParamSpec(ps) => {
                    self.p("**");
                    self.p_id(&ps.name);
                }
            }
        }
        self.p("]");
    }

    fn unparse_aliases(&mut self, names: &[Alias]) {
        let mut first = true;
        for alias in names {
            self.p_delim(&mut first, ", ");
            self.p_id(&alias.name);
            if let Some(asname) = &alias.asname {
                self.p(" as ");
                self.p_id(asname);
            }
        }
    }

    fn unparse_name_list(&mut self, names: &[Identifier]) {
        let mut first = true;
        for name in names {
            self.p_delim(&mut first, ", ");
            self.p_id(name);
        }
    }

    fn unparse_match_case(&mut self, case: &MatchCase) {
        self.p("case ");
        self.unparse_pattern(&case.pattern);
        if let Some(guard) = &case.guard {
            self.p(" if ");
            self.unparse_expr(guard, precedence::TEST);
        }
        self.p(":");
        self.unparse_suite(&case.body);
    }

    fn unparse_pattern(&mut self, pattern: &Pattern) {
        match pattern {
            Pattern::MatchValue(value) => self.unparse_expr(&value.value, precedence::TEST),
            Pattern::MatchSingleton(singleton) => match &singleton.value {
                Constant::None => self.p("None"),
                Constant::Bool(true) => self.p("True"),
                Constant::Bool(false) => self.p("False"),
                _ => unreachable!("singleton patterns match None and booleans only"),
            },
            Pattern::MatchSequence(sequence) => {
                self.p("[");
                let mut first = true;
                for pattern in &sequence.patterns {
                    self.p_delim(&mut first, ", ");
                    self.unparse_pattern(pattern);
                }
                self.p("]");
            }
            Pattern::MatchMapping(mapping) => {
                self.p("{");
                let mut first = true;
                for (key, pattern) in mapping.keys.iter().zip(&mapping.patterns) {
                    self.p_delim(&mut first, ", ");
                    self.unparse_expr(key, precedence::TEST);
                    self.p(": ");
                    self.unparse_pattern(pattern);
                }
                if let Some(rest) = &mapping.rest {
                    self.p_delim(&mut first, ", ");
                    self.p("**");
                    self.p_id(rest);
                }
                self.p("}");
            }
            Pattern::MatchClass(class_pattern) => {
                self.unparse_expr(&class_pattern.cls, precedence::ATOM);
                self.p("(");
                let mut first = true;
                for pattern in &class_pattern.patterns {
                    self.p_delim(&mut first, ", ");
                    self.unparse_pattern(pattern);
                }
                for (attr, pattern) in class_pattern.kwd_attrs.iter().zip(&class_pattern.kwd_patterns) {
                    self.p_delim(&mut first, ", ");
                    self.p_id(attr);
                    self.p("=");
                    self.unparse_pattern(pattern);
                }
                self.p(")");
            }
            Pattern::MatchStar(star) => {
                self.p("*");
                match &star.name {
                    Some(name) => self.p_id(name),
                    None => self.p("_"),
                }
            }
            Pattern::MatchAs(as_pattern) => match (&as_pattern.pattern, &as_pattern.name) {
                (Some(pattern), Some(name)) => {
                    self.unparse_pattern(pattern);
                    self.p(" as ");
                    self.p_id(name);
                }
                (None, Some(name)) => self.p_id(name),
                (None, None) => self.p("_"),
                (Some(_), None) => unreachable!("as-pattern without a name"),
            },
            Pattern::MatchOr(or_pattern) => {
                let mut first = true;
                for pattern in &or_pattern.patterns {
                    self.p_delim(&mut first, " | ");
                    // An as-pattern alternative needs parentheses to keep
                    // the `as` from capturing the whole or-pattern.
                    let parens = pattern.is_match_as()
                        && pattern.as_match_as().is_some_and(|p| p.pattern.is_some());
                    self.p_if(parens, "(");
                    self.unparse_pattern(pattern);
                    self.p_if(parens, ")");
                }
            }
        }
    }

    pub fn unparse_expr(&mut self, expr: &Expr, level: u8) {
        macro_rules! op_prec {
            ($op_ty:ident, $x:expr, $enu:path, $($var:ident($op:literal, $prec:ident)),*$(,)?) => {
                match $x {
                    $(<$enu>::$var => (op_prec!(@space $op_ty, $op), precedence::$prec),)*
                }
            };
            (@space bin, $op:literal) => {
                concat!(" ", $op, " ")
            };
            (@space un, $op:literal) => {
                $op
            };
        }
        macro_rules! group_if {
            ($lvl:expr, $body:block) => {{
                let group = level > $lvl;
                self.p_if(group, "(");
                $body
                self.p_if(group, ")");
            }};
        }
        match expr {
            Expr::BoolOp(bool_op) => {
                let (op, prec) = op_prec!(bin, bool_op.op, BoolOp, And("and", AND), Or("or", OR));
                group_if!(prec, {
                    let mut first = true;
                    for value in &bool_op.values {
                        self.p_delim(&mut first, op);
                        self.unparse_expr(value, prec + 1);
                    }
                });
            }
            Expr::NamedExpr(named) => {
                // A bare walrus is legal in only a few positions; the
                // parentheses are always legal and never change the tree.
                self.p("(");
                self.unparse_expr(&named.target, precedence::ATOM);
                self.p(" := ");
                self.unparse_expr(&named.value, precedence::ATOM);
                self.p(")");
            }
            Expr::BinOp(bin_op) => {
                let right_associative = matches!(bin_op.op, Operator::Pow);
                let (op, prec) = op_prec!(
                    bin,
                    bin_op.op,
                    Operator,
                    Add("+", ARITH),
                    Sub("-", ARITH),
                    Mult("*", TERM),
                    MatMult("@", TERM),
                    Div("/", TERM),
                    Mod("%", TERM),
                    Pow("**", POWER),
                    LShift("<<", SHIFT),
                    RShift(">>", SHIFT),
                    BitOr("|", BOR),
                    BitXor("^", BXOR),
                    BitAnd("&", BAND),
                    FloorDiv("//", TERM),
                );
                group_if!(prec, {
                    self.unparse_expr(&bin_op.left, prec + u8::from(right_associative));
                    self.p(op);
                    self.unparse_expr(&bin_op.right, prec + u8::from(!right_associative));
                });
            }
            Expr::UnaryOp(unary_op) => {
                let (op, prec) = op_prec!(
                    un,
                    unary_op.op,
                    UnaryOp,
                    Invert("~", FACTOR),
                    Not("not ", NOT),
                    UAdd("+", FACTOR),
                    USub("-", FACTOR)
                );
                group_if!(prec, {
                    self.p(op);
                    self.unparse_expr(&unary_op.operand, prec);
                });
            }
            Expr::Lambda(lambda) => {
                group_if!(precedence::TEST, {
                    self.p(if lambda.args.is_empty() {
                        "lambda"
                    } else {
                        "lambda "
                    });
                    self.unparse_arguments(&lambda.args);
                    self.p(": ");
                    self.unparse_expr(&lambda.body, precedence::TEST);
                });
            }
            Expr::IfExp(if_exp) => {
                group_if!(precedence::TEST, {
                    self.unparse_expr(&if_exp.body, precedence::TEST + 1);
                    self.p(" if ");
                    self.unparse_expr(&if_exp.test, precedence::TEST + 1);
                    self.p(" else ");
                    self.unparse_expr(&if_exp.orelse, precedence::TEST);
                });
            }
            Expr::Dict(dict) => {
                self.p("{");
                let mut first = true;
                for (key, value) in dict.keys.iter().zip(&dict.values) {
                    self.p_delim(&mut first, ", ");
                    if let Some(key) = key {
                        self.unparse_expr(key, precedence::TEST);
                        self.p(": ");
                        self.unparse_expr(value, precedence::TEST);
                    } else {
                        self.p("**");
                        self.unparse_expr(value, precedence::EXPR);
                    }
                }
                self.p("}");
            }
            Expr::Set(set) => {
                self.p("{");
                let mut first = true;
                for elt in &set.elts {
                    self.p_delim(&mut first, ", ");
                    self.unparse_expr(elt, precedence::TEST);
                }
                self.p("}");
            }
            Expr::ListComp(comp) => {
                self.p("[");
                self.unparse_expr(&comp.elt, precedence::TEST);
                self.unparse_comp(&comp.generators);
                self.p("]");
            }
            Expr::SetComp(comp) => {
                self.p("{");
                self.unparse_expr(&comp.elt, precedence::TEST);
                self.unparse_comp(&comp.generators);
                self.p("}");
            }
            Expr::DictComp(comp) => {
                self.p("{");
                self.unparse_expr(&comp.key, precedence::TEST);
                self.p(": ");
                self.unparse_expr(&comp.value, precedence::TEST);
                self.unparse_comp(&comp.generators);
                self.p("}");
            }
            Expr::GeneratorExp(generator) => {
                self.p("(");
                self.unparse_expr(&generator.elt, precedence::TEST);
                self.unparse_comp(&generator.generators);
                self.p(")");
            }
            Expr::Await(await_expr) => {
                group_if!(precedence::AWAIT, {
                    self.p("await ");
                    self.unparse_expr(&await_expr.value, precedence::ATOM);
                });
            }
            Expr::Yield(yield_expr) => {
                if let Some(value) = &yield_expr.value {
                    self.p("(yield ");
                    self.unparse_expr(value, precedence::TEST);
                    self.p(")");
                } else {
                    self.p("(yield)");
                }
            }
            Expr::YieldFrom(yield_from) => {
                self.p("(yield from ");
                self.unparse_expr(&yield_from.value, precedence::TEST);
                self.p(")");
            }
            Expr::Compare(compare) => {
                group_if!(precedence::CMP, {
                    let new_lvl = precedence::CMP + 1;
                    self.unparse_expr(&compare.left, new_lvl);
                    for (op, comparator) in compare.ops.iter().zip(&compare.comparators) {
                        self.p(" ");
                        self.p(op.as_str());
                        self.p(" ");
                        self.unparse_expr(comparator, new_lvl);
                    }
                });
            }
            Expr::Call(call) => {
                self.unparse_expr(&call.func, precedence::ATOM);
                self.p("(");
                if let ([Expr::GeneratorExp(generator)], []) =
                    (call.args.as_slice(), call.keywords.as_slice())
                {
                    // A sole bare generator argument skips the extra
                    // parentheses.
                    self.unparse_expr(&generator.elt, precedence::TEST);
                    self.unparse_comp(&generator.generators);
                } else {
                    let mut first = true;
                    for arg in &call.args {
                        self.p_delim(&mut first, ", ");
                        self.unparse_expr(arg, precedence::TEST);
                    }
                    for keyword in &call.keywords {
                        self.p_delim(&mut first, ", ");
                        if let Some(arg) = &keyword.arg {
                            self.p_id(arg);
                            self.p("=");
                        } else {
                            self.p("**");
                        }
                        self.unparse_expr(&keyword.value, precedence::TEST);
                    }
                }
                self.p(")");
            }
            Expr::FormattedValue(formatted) => {
                self.p("f");
                let quote = self.style.quote;
                self.buffer.push(quote.as_char());
                self.unparse_formatted_value(formatted);
                self.buffer.push(quote.as_char());
            }
            Expr::JoinedStr(joined) => {
                self.p("f");
                let quote = self.style.quote;
                self.buffer.push(quote.as_char());
                for value in &joined.values {
                    self.unparse_fstring_part(value);
                }
                self.buffer.push(quote.as_char());
            }
            Expr::Constant(constant) => self.unparse_constant(constant),
            Expr::Attribute(attribute) => {
                self.unparse_expr(&attribute.value, precedence::ATOM);
                // An integer literal would swallow the dot as a decimal
                // point.
                let period = if matches!(
                    attribute.value.as_ref(),
                    Expr::Constant(ExprConstant {
                        value: Constant::Int(_),
                        ..
                    })
                ) {
                    " ."
                } else {
                    "."
                };
                self.p(period);
                self.p_id(&attribute.attr);
            }
            Expr::Subscript(subscript) => {
                self.unparse_expr(&subscript.value, precedence::ATOM);
                self.p("[");
                self.unparse_expr(&subscript.slice, precedence::TUPLE);
                self.p("]");
            }
            Expr::Starred(starred) => {
                self.p("*");
                self.unparse_expr(&starred.value, precedence::EXPR);
            }
            Expr::Name(name) => self.p_id(&name.id),
            Expr::List(list) => {
                self.p("[");
                let mut first = true;
                for elt in &list.elts {
                    self.p_delim(&mut first, ", ");
                    self.unparse_expr(elt, precedence::TEST);
                }
                self.p("]");
            }
            Expr::Tuple(tuple) => {
                if tuple.elts.is_empty() {
                    self.p("()");
                } else {
                    group_if!(precedence::TUPLE, {
                        let mut first = true;
                        for elt in &tuple.elts {
                            self.p_delim(&mut first, ", ");
                            self.unparse_expr(elt, precedence::TEST);
                        }
                        self.p_if(tuple.elts.len() == 1, ",");
                    });
                }
            }
            Expr::Slice(slice) => {
                if let Some(lower) = &slice.lower {
                    self.unparse_expr(lower, precedence::TEST);
                }
                self.p(":");
                if let Some(upper) = &slice.upper {
                    self.unparse_expr(upper, precedence::TEST);
                }
                if let Some(step) = &slice.step {
                    self.p(":");
                    self.unparse_expr(step, precedence::TEST);
                }
            }
        }
    }

    fn unparse_constant(&mut self, constant: &ExprConstant) {
        if let Some(kind) = &constant.kind {
            self.p(kind);
        }
        match &constant.value {
            Constant::None => self.p("None"),
            Constant::Bool(true) => self.p("True"),
            Constant::Bool(false) => self.p("False"),
            Constant::Str(value) => {
                let repr = escape::str_repr(value, self.style.quote);
                self.p(&repr);
            }
            Constant::Bytes(value) => {
                let repr = escape::bytes_repr(value, self.style.quote);
                self.p(&repr);
            }
            Constant::Int(value) => self.p(&value.to_string()),
            Constant::Float(value) => self.p(&escape::float_repr(*value)),
            Constant::Complex { real, imag } => {
                if *real == 0.0 {
                    self.p(&escape::float_repr(*imag));
                    self.p("j");
                } else {
                    self.p("(");
                    self.p(&escape::float_repr(*real));
                    let imag_repr = escape::float_repr(*imag);
                    if !imag_repr.starts_with('-') {
                        self.p("+");
                    }
                    self.p(&imag_repr);
                    self.p("j)");
                }
            }
            Constant::Ellipsis => self.p("..."),
        }
    }

    /// Parameter lists in the CPython alignment: `defaults` attach to the
    /// tail of the positional parameters, `kw_defaults` pair off with the
    /// keyword-only parameters.
    fn unparse_arguments(&mut self, args: &Arguments) {
        let mut first = true;
        let defaults_start = args.defaults_start();
        for (i, arg) in args.posonlyargs.iter().chain(&args.args).enumerate() {
            self.p_delim(&mut first, ", ");
            self.p_id(&arg.arg);
            if let Some(annotation) = &arg.annotation {
                self.p(": ");
                self.unparse_expr(annotation, precedence::TEST);
            }
            if let Some(i) = i.checked_sub(defaults_start) {
                self.p("=");
                self.unparse_expr(&args.defaults[i], precedence::TEST);
            }
            self.p_if(i + 1 == args.posonlyargs.len(), ", /");
        }
        if args.vararg.is_some() || !args.kwonlyargs.is_empty() {
            self.p_delim(&mut first, ", ");
            self.p("*");
        }
        if let Some(vararg) = &args.vararg {
            self.p_id(&vararg.arg);
            if let Some(annotation) = &vararg.annotation {
                self.p(": ");
                self.unparse_expr(annotation, precedence::TEST);
            }
        }
        for (arg, default) in args.kwonlyargs.iter().zip(&args.kw_defaults) {
            self.p_delim(&mut first, ", ");
            self.p_id(&arg.arg);
            if let Some(annotation) = &arg.annotation {
                self.p(": ");
                self.unparse_expr(annotation, precedence::TEST);
            }
            if let Some(default) = default {
                self.p("=");
                self.unparse_expr(default, precedence::TEST);
            }
        }
        if let Some(kwarg) = &args.kwarg {
            self.p_delim(&mut first, ", ");
            self.p("**");
            self.p_id(&kwarg.arg);
            if let Some(annotation) = &kwarg.annotation {
                self.p(": ");
                self.unparse_expr(annotation, precedence::TEST);
            }
        }
    }

    fn unparse_comp(&mut self, generators: &[Comprehension]) {
        for comp in generators {
            self.p(if comp.is_async {
                " async for "
            } else {
                " for "
            });
            self.unparse_expr(&comp.target, precedence::TUPLE);
            self.p(" in ");
            self.unparse_expr(&comp.iter, precedence::TEST + 1);
            for cond in &comp.ifs {
                self.p(" if ");
                self.unparse_expr(cond, precedence::TEST + 1);
            }
        }
    }

    /// One part of an f-string body: literal text or a replacement field.
    fn unparse_fstring_part(&mut self, part: &Expr) {
        match part {
            Expr::Constant(ExprConstant {
                value: Constant::Str(value),
                ..
            }) => {
                let text = escape::fstring_text(value, self.style.quote);
                self.p(&text);
            }
            Expr::FormattedValue(formatted) => self.unparse_formatted_value(formatted),
            _ => unreachable!("f-string parts are text or formatted values"),
        }
    }

    fn unparse_formatted_value(&mut self, formatted: &flint_python_ast::ExprFormattedValue) {
        let buffered =
            self.buffered(|sub| sub.unparse_expr(&formatted.value, precedence::TEST + 1));
        // A leading brace would read as an escaped `{{`.
        self.p(if buffered.starts_with('{') { "{ " } else { "{" });
        self.p(&buffered);
        if let Some(conversion) = formatted.conversion.to_char() {
            self.p("!");
            self.buffer.push(conversion);
        }
        if let Some(spec) = &formatted.format_spec {
            self.p(":");
            match spec.as_ref() {
                Expr::JoinedStr(joined) => {
                    for value in &joined.values {
                        self.unparse_fstring_part(value);
                    }
                }
                _ => unreachable!("format specs are joined strings"),
            }
        }
        self.p("}");
    }
}
