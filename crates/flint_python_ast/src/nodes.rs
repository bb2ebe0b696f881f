//! The node variants of the Python 3.13 AST.
//!
//! Naming follows the `Stmt`/`Expr` + struct-per-variant convention: the
//! enum variant `Stmt::FunctionDef` carries a [`StmtFunctionDef`] payload,
//! and so on. Field names and shapes track the CPython `ast` module so
//! that trees read the same way Python documentation describes them.

use crate::{Constant, Identifier, Suite};

/// The root of a parse: a module body or a single expression.
#[derive(Clone, Debug, PartialEq, is_macro::Is)]
pub enum Mod {
    Module(ModModule),
    Expression(ModExpression),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModModule {
    pub body: Suite,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModExpression {
    pub body: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq, is_macro::Is)]
pub enum Stmt {
    FunctionDef(StmtFunctionDef),
    ClassDef(StmtClassDef),
    Return(StmtReturn),
    Delete(StmtDelete),
    Assign(StmtAssign),
    AugAssign(StmtAugAssign),
    AnnAssign(StmtAnnAssign),
    TypeAlias(StmtTypeAlias),
    For(StmtFor),
    While(StmtWhile),
    If(StmtIf),
    With(StmtWith),
    Match(StmtMatch),
    Raise(StmtRaise),
    Try(StmtTry),
    Assert(StmtAssert),
    Import(StmtImport),
    ImportFrom(StmtImportFrom),
    Global(StmtGlobal),
    Nonlocal(StmtNonlocal),
    Expr(StmtExpr),
    Pass,
    Break,
    Continue,
}

/// A `def` or `async def` definition.
#[derive(Clone, Debug, PartialEq)]
pub struct StmtFunctionDef {
    pub is_async: bool,
    pub name: Identifier,
    pub type_params: Vec<TypeParam>,
    pub args: Box<Arguments>,
    pub returns: Option<Box<Expr>>,
    pub body: Suite,
    pub decorator_list: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtClassDef {
    pub name: Identifier,
    pub type_params: Vec<TypeParam>,
    pub bases: Vec<Expr>,
    pub keywords: Vec<Keyword>,
    pub body: Suite,
    pub decorator_list: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtReturn {
    pub value: Option<Box<Expr>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtDelete {
    pub targets: Vec<Expr>,
}

/// `a = b = value`. `targets` is non-empty; every target is an assignable
/// L-value and all of them share the single right-hand `value`.
#[derive(Clone, Debug, PartialEq)]
pub struct StmtAssign {
    pub targets: Vec<Expr>,
    pub value: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtAugAssign {
    pub target: Box<Expr>,
    pub op: Operator,
    pub value: Box<Expr>,
}

/// `target: annotation = value`. `simple` is true iff `target` is a bare,
/// unparenthesized name; `value` may be absent for a pure declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct StmtAnnAssign {
    pub target: Box<Expr>,
    pub annotation: Box<Expr>,
    pub value: Option<Box<Expr>>,
    pub simple: bool,
}

/// A PEP 695 `type X[T] = ...` alias. `name` is always a `Name` expression.
#[derive(Clone, Debug, PartialEq)]
pub struct StmtTypeAlias {
    pub name: Box<Expr>,
    pub type_params: Vec<TypeParam>,
    pub value: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtFor {
    pub is_async: bool,
    pub target: Box<Expr>,
    pub iter: Box<Expr>,
    pub body: Suite,
    pub orelse: Suite,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtWhile {
    pub test: Box<Expr>,
    pub body: Suite,
    pub orelse: Suite,
}

/// An `if` statement; `elif` chains nest as a single-`If` `orelse`.
#[derive(Clone, Debug, PartialEq)]
pub struct StmtIf {
    pub test: Box<Expr>,
    pub body: Suite,
    pub orelse: Suite,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtWith {
    pub is_async: bool,
    pub items: Vec<WithItem>,
    pub body: Suite,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtMatch {
    pub subject: Box<Expr>,
    pub cases: Vec<MatchCase>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtRaise {
    pub exc: Option<Box<Expr>>,
    pub cause: Option<Box<Expr>>,
}

/// `try`/`except` (or `except*` when `is_star`) with optional `else` and
/// `finally` suites.
#[derive(Clone, Debug, PartialEq)]
pub struct StmtTry {
    pub body: Suite,
    pub handlers: Vec<ExceptHandler>,
    pub orelse: Suite,
    pub finalbody: Suite,
    pub is_star: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtAssert {
    pub test: Box<Expr>,
    pub msg: Option<Box<Expr>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtImport {
    pub names: Vec<Alias>,
}

/// `from module import names`; `level` counts leading dots for relative
/// imports, and `module` is absent for `from . import x`.
#[derive(Clone, Debug, PartialEq)]
pub struct StmtImportFrom {
    pub module: Option<Identifier>,
    pub names: Vec<Alias>,
    pub level: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtGlobal {
    pub names: Vec<Identifier>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtNonlocal {
    pub names: Vec<Identifier>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StmtExpr {
    pub value: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq, is_macro::Is)]
pub enum Expr {
    BoolOp(ExprBoolOp),
    NamedExpr(ExprNamedExpr),
    BinOp(ExprBinOp),
    UnaryOp(ExprUnaryOp),
    Lambda(ExprLambda),
    IfExp(ExprIfExp),
    Dict(ExprDict),
    Set(ExprSet),
    ListComp(ExprListComp),
    SetComp(ExprSetComp),
    DictComp(ExprDictComp),
    GeneratorExp(ExprGeneratorExp),
    Await(ExprAwait),
    Yield(ExprYield),
    YieldFrom(ExprYieldFrom),
    Compare(ExprCompare),
    Call(ExprCall),
    FormattedValue(ExprFormattedValue),
    JoinedStr(ExprJoinedStr),
    Constant(ExprConstant),
    Attribute(ExprAttribute),
    Subscript(ExprSubscript),
    Starred(ExprStarred),
    Name(ExprName),
    List(ExprList),
    Tuple(ExprTuple),
    Slice(ExprSlice),
}

/// `and`/`or` chain; `values` has at least two elements.
#[derive(Clone, Debug, PartialEq)]
pub struct ExprBoolOp {
    pub op: BoolOp,
    pub values: Vec<Expr>,
}

/// A named ("walrus") expression `target := value`; `target` is a name.
#[derive(Clone, Debug, PartialEq)]
pub struct ExprNamedExpr {
    pub target: Box<Expr>,
    pub value: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprBinOp {
    pub left: Box<Expr>,
    pub op: Operator,
    pub right: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprUnaryOp {
    pub op: UnaryOp,
    pub operand: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprLambda {
    pub args: Box<Arguments>,
    pub body: Box<Expr>,
}

/// The conditional expression `body if test else orelse`.
#[derive(Clone, Debug, PartialEq)]
pub struct ExprIfExp {
    pub test: Box<Expr>,
    pub body: Box<Expr>,
    pub orelse: Box<Expr>,
}

/// `keys` and `values` are aligned; a `None` key marks a `**` unpack of
/// the corresponding value.
#[derive(Clone, Debug, PartialEq)]
pub struct ExprDict {
    pub keys: Vec<Option<Expr>>,
    pub values: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprSet {
    pub elts: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprListComp {
    pub elt: Box<Expr>,
    pub generators: Vec<Comprehension>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprSetComp {
    pub elt: Box<Expr>,
    pub generators: Vec<Comprehension>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprDictComp {
    pub key: Box<Expr>,
    pub value: Box<Expr>,
    pub generators: Vec<Comprehension>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprGeneratorExp {
    pub elt: Box<Expr>,
    pub generators: Vec<Comprehension>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprAwait {
    pub value: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprYield {
    pub value: Option<Box<Expr>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprYieldFrom {
    pub value: Box<Expr>,
}

/// A chained comparison `left op0 comparators[0] op1 comparators[1] ...`;
/// `ops` and `comparators` are aligned and non-empty.
#[derive(Clone, Debug, PartialEq)]
pub struct ExprCompare {
    pub left: Box<Expr>,
    pub ops: Vec<CmpOp>,
    pub comparators: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprCall {
    pub func: Box<Expr>,
    pub args: Vec<Expr>,
    pub keywords: Vec<Keyword>,
}

/// A single `{...}` replacement field of an f-string.
#[derive(Clone, Debug, PartialEq)]
pub struct ExprFormattedValue {
    pub value: Box<Expr>,
    pub conversion: ConversionFlag,
    /// A `JoinedStr` over constant and formatted parts, when present.
    pub format_spec: Option<Box<Expr>>,
}

/// An f-string: constant text parts interleaved with formatted values.
#[derive(Clone, Debug, PartialEq)]
pub struct ExprJoinedStr {
    pub values: Vec<Expr>,
}

/// `kind` preserves an explicit `u` string prefix.
#[derive(Clone, Debug, PartialEq)]
pub struct ExprConstant {
    pub value: Constant,
    pub kind: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprAttribute {
    pub value: Box<Expr>,
    pub attr: Identifier,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprSubscript {
    pub value: Box<Expr>,
    pub slice: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprStarred {
    pub value: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprName {
    pub id: Identifier,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprList {
    pub elts: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExprTuple {
    pub elts: Vec<Expr>,
}

/// `lower:upper:step` with every part optional; a bare `:` has all three
/// absent.
#[derive(Clone, Debug, PartialEq)]
pub struct ExprSlice {
    pub lower: Option<Box<Expr>>,
    pub upper: Option<Box<Expr>>,
    pub step: Option<Box<Expr>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoolOp {
    And,
    Or,
}

impl BoolOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            BoolOp::And => "and",
            BoolOp::Or => "or",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mult,
    MatMult,
    Div,
    Mod,
    Pow,
    LShift,
    RShift,
    BitOr,
    BitXor,
    BitAnd,
    FloorDiv,
}

impl Operator {
    pub const fn as_str(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mult => "*",
            Operator::MatMult => "@",
            Operator::Div => "/",
            Operator::Mod => "%",
            Operator::Pow => "**",
            Operator::LShift => "<<",
            Operator::RShift => ">>",
            Operator::BitOr => "|",
            Operator::BitXor => "^",
            Operator::BitAnd => "&",
            Operator::FloorDiv => "//",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Invert,
    Not,
    UAdd,
    USub,
}

impl UnaryOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Invert => "~",
            UnaryOp::Not => "not",
            UnaryOp::UAdd => "+",
            UnaryOp::USub => "-",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CmpOp {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    Is,
    IsNot,
    In,
    NotIn,
}

impl CmpOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            CmpOp::Eq => "==",
            CmpOp::NotEq => "!=",
            CmpOp::Lt => "<",
            CmpOp::LtE => "<=",
            CmpOp::Gt => ">",
            CmpOp::GtE => ">=",
            CmpOp::Is => "is",
            CmpOp::IsNot => "is not",
            CmpOp::In => "in",
            CmpOp::NotIn => "not in",
        }
    }
}

/// The `!s` / `!r` / `!a` conversion of a formatted value.
#[repr(i8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConversionFlag {
    None = -1,
    Str = b's' as i8,
    Ascii = b'a' as i8,
    Repr = b'r' as i8,
}

impl ConversionFlag {
    pub const fn to_char(self) -> Option<char> {
        match self {
            ConversionFlag::None => None,
            ConversionFlag::Str => Some('s'),
            ConversionFlag::Ascii => Some('a'),
            ConversionFlag::Repr => Some('r'),
        }
    }
}

#[derive(Clone, Debug, PartialEq, is_macro::Is)]
pub enum Pattern {
    MatchValue(PatternMatchValue),
    MatchSingleton(PatternMatchSingleton),
    MatchSequence(PatternMatchSequence),
    MatchMapping(PatternMatchMapping),
    MatchClass(PatternMatchClass),
    MatchStar(PatternMatchStar),
    MatchAs(PatternMatchAs),
    MatchOr(PatternMatchOr),
}

/// A literal or dotted-name value pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct PatternMatchValue {
    pub value: Box<Expr>,
}

/// `None`, `True` or `False`, matched by identity.
#[derive(Clone, Debug, PartialEq)]
pub struct PatternMatchSingleton {
    pub value: Constant,
}

/// A `[...]` / `(...)` sequence pattern; contains at most one star
/// sub-pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct PatternMatchSequence {
    pub patterns: Vec<Pattern>,
}

/// `keys` and `patterns` are aligned; `rest` captures `**name`.
#[derive(Clone, Debug, PartialEq)]
pub struct PatternMatchMapping {
    pub keys: Vec<Expr>,
    pub patterns: Vec<Pattern>,
    pub rest: Option<Identifier>,
}

/// `Cls(positional..., name=pattern, ...)`; `kwd_attrs` and
/// `kwd_patterns` are aligned.
#[derive(Clone, Debug, PartialEq)]
pub struct PatternMatchClass {
    pub cls: Box<Expr>,
    pub patterns: Vec<Pattern>,
    pub kwd_attrs: Vec<Identifier>,
    pub kwd_patterns: Vec<Pattern>,
}

/// `*name`, or `*_` when `name` is absent.
#[derive(Clone, Debug, PartialEq)]
pub struct PatternMatchStar {
    pub name: Option<Identifier>,
}

/// `pattern as name`; a bare capture has no `pattern`, the wildcard `_`
/// has neither.
#[derive(Clone, Debug, PartialEq)]
pub struct PatternMatchAs {
    pub pattern: Option<Box<Pattern>>,
    pub name: Option<Identifier>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PatternMatchOr {
    pub patterns: Vec<Pattern>,
}

#[derive(Clone, Debug, PartialEq, is_macro::Is)]
pub enum TypeParam {
    TypeVar(TypeParamTypeVar),
    TypeVarTuple(TypeParamTypeVarTuple),
    ParamSpec(TypeParamParamSpec),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeParamTypeVar {
    pub name: Identifier,
    pub bound: Option<Box<Expr>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeParamTypeVarTuple {
    pub name: Identifier,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeParamParamSpec {
    pub name: Identifier,
}

/// A function's parameter list.
///
/// `defaults` aligns to the tail of `posonlyargs + args`; `kw_defaults`
/// aligns one-to-one with `kwonlyargs`, with `None` marking a parameter
/// without a default.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Arguments {
    pub posonlyargs: Vec<Arg>,
    pub args: Vec<Arg>,
    pub vararg: Option<Box<Arg>>,
    pub kwonlyargs: Vec<Arg>,
    pub kw_defaults: Vec<Option<Expr>>,
    pub kwarg: Option<Box<Arg>>,
    pub defaults: Vec<Expr>,
}

impl Arguments {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.posonlyargs.is_empty()
            && self.args.is_empty()
            && self.vararg.is_none()
            && self.kwonlyargs.is_empty()
            && self.kwarg.is_none()
    }

    /// The index into `posonlyargs + args` at which defaults begin.
    pub fn defaults_start(&self) -> usize {
        self.posonlyargs.len() + self.args.len() - self.defaults.len()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Arg {
    pub arg: Identifier,
    pub annotation: Option<Box<Expr>>,
    pub type_comment: Option<String>,
}

impl Arg {
    pub fn new(arg: impl Into<Identifier>) -> Self {
        Self {
            arg: arg.into(),
            annotation: None,
            type_comment: None,
        }
    }
}

/// A call keyword; an absent `arg` marks a `**` unpack.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyword {
    pub arg: Option<Identifier>,
    pub value: Expr,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Alias {
    pub name: Identifier,
    pub asname: Option<Identifier>,
}

/// One `for target in iter` clause of a comprehension with its `if`
/// guards.
#[derive(Clone, Debug, PartialEq)]
pub struct Comprehension {
    pub target: Expr,
    pub iter: Expr,
    pub ifs: Vec<Expr>,
    pub is_async: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExceptHandler {
    pub type_: Option<Box<Expr>>,
    pub name: Option<Identifier>,
    pub body: Suite,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WithItem {
    pub context_expr: Expr,
    pub optional_vars: Option<Box<Expr>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MatchCase {
    pub pattern: Pattern,
    pub guard: Option<Box<Expr>>,
    pub body: Suite,
}

macro_rules! impl_from {
    ($(($payload:ident, $enum:ident :: $variant:ident),)*) => {
        $(
            impl From<$payload> for $enum {
                fn from(payload: $payload) -> Self {
                    $enum::$variant(payload)
                }
            }
        )*
    };
}

impl_from!(
    (ModModule, Mod::Module),
    (ModExpression, Mod::Expression),
    (StmtFunctionDef, Stmt::FunctionDef),
    (StmtClassDef, Stmt::ClassDef),
    (StmtReturn, Stmt::Return),
    (StmtDelete, Stmt::Delete),
    (StmtAssign, Stmt::Assign),
    (StmtAugAssign, Stmt::AugAssign),
    (StmtAnnAssign, Stmt::AnnAssign),
    (StmtTypeAlias, Stmt::TypeAlias),
    (StmtFor, Stmt::For),
    (StmtWhile, Stmt::While),
    (StmtIf, Stmt::If),
    (StmtWith, Stmt::With),
    (StmtMatch, Stmt::Match),
    (StmtRaise, Stmt::Raise),
    (StmtTry, Stmt::Try),
    (StmtAssert, Stmt::Assert),
    (StmtImport, Stmt::Import),
    (StmtImportFrom, Stmt::ImportFrom),
    (StmtGlobal, Stmt::Global),
    (StmtNonlocal, Stmt::Nonlocal),
    (StmtExpr, Stmt::Expr),
    (ExprBoolOp, Expr::BoolOp),
    (ExprNamedExpr, Expr::NamedExpr),
    (ExprBinOp, Expr::BinOp),
    (ExprUnaryOp, Expr::UnaryOp),
    (ExprLambda, Expr::Lambda),
    (ExprIfExp, Expr::IfExp),
    (ExprDict, Expr::Dict),
    (ExprSet, Expr::Set),
    (ExprListComp, Expr::ListComp),
    (ExprSetComp, Expr::SetComp),
    (ExprDictComp, Expr::DictComp),
    (ExprGeneratorExp, Expr::GeneratorExp),
    (ExprAwait, Expr::Await),
    (ExprYield, Expr::Yield),
    (ExprYieldFrom, Expr::YieldFrom),
    (ExprCompare, Expr::Compare),
    (ExprCall, Expr::Call),
    (ExprFormattedValue, Expr::FormattedValue),
    (ExprJoinedStr, Expr::JoinedStr),
    (ExprConstant, Expr::Constant),
    (ExprAttribute, Expr::Attribute),
    (ExprSubscript, Expr::Subscript),
    (ExprStarred, Expr::Starred),
    (ExprName, Expr::Name),
    (ExprList, Expr::List),
    (ExprTuple, Expr::Tuple),
    (ExprSlice, Expr::Slice),
    (PatternMatchValue, Pattern::MatchValue),
    (PatternMatchSingleton, Pattern::MatchSingleton),
    (PatternMatchSequence, Pattern::MatchSequence),
    (PatternMatchMapping, Pattern::MatchMapping),
    (PatternMatchClass, Pattern::MatchClass),
    (PatternMatchStar, Pattern::MatchStar),
    (PatternMatchAs, Pattern::MatchAs),
    (PatternMatchOr, Pattern::MatchOr),
    (TypeParamTypeVar, TypeParam::TypeVar),
    (TypeParamTypeVarTuple, TypeParam::TypeVarTuple),
    (TypeParamParamSpec, TypeParam::ParamSpec),
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_predicates() {
        let expr = Expr::Name(ExprName {
            id: Identifier::new("x"),
        });
        assert!(expr.is_name());
        assert!(!expr.is_starred());
        assert!(Stmt::Pass.is_pass());
    }

    #[test]
    fn test_defaults_alignment() {
        let args = Arguments {
            args: vec![Arg::new("a"), Arg::new("b")],
            defaults: vec![Expr::Constant(ExprConstant {
                value: Constant::Bool(false),
                kind: None,
            })],
            ..Arguments::default()
        };
        assert_eq!(args.defaults_start(), 1);
    }
}
