use flint_python_ast::*;
use pretty_assertions::assert_eq;

use crate::{parse_expression, parse_program, ParseErrorType};

fn suite(source: &str) -> Suite {
    parse_program(source).unwrap_or_else(|err| panic!("{source:?} failed to parse: {err}"))
}

fn stmt(source: &str) -> Stmt {
    let mut body = suite(source);
    assert_eq!(body.len(), 1, "expected one statement from {source:?}");
    body.pop().unwrap()
}

fn expr(source: &str) -> Expr {
    parse_expression(source).unwrap_or_else(|err| panic!("{source:?} failed to parse: {err}"))
}

fn parse_err(source: &str) -> ParseErrorType {
    parse_program(source)
        .expect_err(&format!("{source:?} parsed but should not have"))
        .error
}

fn name(id: &str) -> Expr {
    Expr::Name(ExprName {
        id: Identifier::new(id),
    })
}

fn int(value: i32) -> Expr {
    Expr::Constant(ExprConstant {
        value: Constant::Int(num_bigint::BigInt::from(value)),
        kind: None,
    })
}

fn string(value: &str) -> Expr {
    Expr::Constant(ExprConstant {
        value: Constant::Str(value.to_owned()),
        kind: None,
    })
}

#[test]
fn test_pass() {
    assert_eq!(suite("pass\n"), vec![Stmt::Pass]);
}

#[test]
fn test_semicolon_separated_statements() {
    assert_eq!(suite("pass; break; continue\n"), vec![
        Stmt::Pass,
        Stmt::Break,
        Stmt::Continue
    ]);
}

#[test]
fn test_simple_annotated_assignment() {
    assert_eq!(
        stmt("x: int = 5\n"),
        Stmt::AnnAssign(StmtAnnAssign {
            target: Box::new(name("x")),
            annotation: Box::new(name("int")),
            value: Some(Box::new(int(5))),
            simple: true,
        })
    );
}

#[test]
fn test_attribute_annotated_assignment_is_not_simple() {
    assert_eq!(
        stmt("self.x: int = 5\n"),
        Stmt::AnnAssign(StmtAnnAssign {
            target: Box::new(Expr::Attribute(ExprAttribute {
                value: Box::new(name("self")),
                attr: Identifier::new("x"),
            })),
            annotation: Box::new(name("int")),
            value: Some(Box::new(int(5))),
            simple: false,
        })
    );
}

#[test]
fn test_parenthesized_name_annotation_is_not_simple() {
    let Stmt::AnnAssign(ann) = stmt("(x): int = 5\n") else {
        panic!("expected an annotated assignment")
    };
    assert!(!ann.simple);
}

#[test]
fn test_annotation_without_value() {
    assert_eq!(
        stmt("x: int\n"),
        Stmt::AnnAssign(StmtAnnAssign {
            target: Box::new(name("x")),
            annotation: Box::new(name("int")),
            value: None,
            simple: true,
        })
    );
}

#[test]
fn test_function_parameter_shapes() {
    let Stmt::FunctionDef(def) = stmt("def f(a, b=1, *c, d, e=2, **f): pass\n") else {
        panic!("expected a function definition")
    };
    let args = *def.args;
    assert_eq!(args.posonlyargs, vec![]);
    assert_eq!(args.args, vec![Arg::new("a"), Arg::new("b")]);
    assert_eq!(args.defaults, vec![int(1)]);
    assert_eq!(args.vararg, Some(Box::new(Arg::new("c"))));
    assert_eq!(args.kwonlyargs, vec![Arg::new("d"), Arg::new("e")]);
    assert_eq!(args.kw_defaults, vec![None, Some(int(2))]);
    assert_eq!(args.kwarg, Some(Box::new(Arg::new("f"))));
}

#[test]
fn test_positional_only_parameters() {
    let Stmt::FunctionDef(def) = stmt("def f(a, b, /, c, *, d): pass\n") else {
        panic!("expected a function definition")
    };
    let args = *def.args;
    assert_eq!(args.posonlyargs, vec![Arg::new("a"), Arg::new("b")]);
    assert_eq!(args.args, vec![Arg::new("c")]);
    assert_eq!(args.vararg, None);
    assert_eq!(args.kwonlyargs, vec![Arg::new("d")]);
    assert_eq!(args.kw_defaults, vec![None]);
}

#[test]
fn test_comparison_chain() {
    assert_eq!(
        expr("a < b < c"),
        Expr::Compare(ExprCompare {
            left: Box::new(name("a")),
            ops: vec![CmpOp::Lt, CmpOp::Lt],
            comparators: vec![name("b"), name("c")],
        })
    );
}

#[test]
fn test_two_token_comparison_operators() {
    assert_eq!(
        expr("a is not b not in c"),
        Expr::Compare(ExprCompare {
            left: Box::new(name("a")),
            ops: vec![CmpOp::IsNot, CmpOp::NotIn],
            comparators: vec![name("b"), name("c")],
        })
    );
}

#[test]
fn test_arithmetic_precedence() {
    assert_eq!(
        expr("a + b * c"),
        Expr::BinOp(ExprBinOp {
            left: Box::new(name("a")),
            op: Operator::Add,
            right: Box::new(Expr::BinOp(ExprBinOp {
                left: Box::new(name("b")),
                op: Operator::Mult,
                right: Box::new(name("c")),
            })),
        })
    );
}

#[test]
fn test_power_is_right_associative() {
    assert_eq!(
        expr("a ** b ** c"),
        Expr::BinOp(ExprBinOp {
            left: Box::new(name("a")),
            op: Operator::Pow,
            right: Box::new(Expr::BinOp(ExprBinOp {
                left: Box::new(name("b")),
                op: Operator::Pow,
                right: Box::new(name("c")),
            })),
        })
    );
}

#[test]
fn test_unary_binds_below_power() {
    // -x ** 2 is -(x ** 2); 2 ** -1 is legal.
    assert_eq!(
        expr("-x ** 2"),
        Expr::UnaryOp(ExprUnaryOp {
            op: UnaryOp::USub,
            operand: Box::new(Expr::BinOp(ExprBinOp {
                left: Box::new(name("x")),
                op: Operator::Pow,
                right: Box::new(int(2)),
            })),
        })
    );
    assert_eq!(
        expr("2 ** -1"),
        Expr::BinOp(ExprBinOp {
            left: Box::new(int(2)),
            op: Operator::Pow,
            right: Box::new(Expr::UnaryOp(ExprUnaryOp {
                op: UnaryOp::USub,
                operand: Box::new(int(1)),
            })),
        })
    );
}

#[test]
fn test_boolean_operators_flatten() {
    assert_eq!(
        expr("a or b or c"),
        Expr::BoolOp(ExprBoolOp {
            op: BoolOp::Or,
            values: vec![name("a"), name("b"), name("c")],
        })
    );
    assert_eq!(
        expr("a or b and c"),
        Expr::BoolOp(ExprBoolOp {
            op: BoolOp::Or,
            values: vec![
                name("a"),
                Expr::BoolOp(ExprBoolOp {
                    op: BoolOp::And,
                    values: vec![name("b"), name("c")],
                })
            ],
        })
    );
}

#[test]
fn test_multiple_assignment_targets_share_value() {
    assert_eq!(
        stmt("a = b = 1\n"),
        Stmt::Assign(StmtAssign {
            targets: vec![name("a"), name("b")],
            value: Box::new(int(1)),
        })
    );
}

#[test]
fn test_augmented_assignment() {
    assert_eq!(
        stmt("x //= 2\n"),
        Stmt::AugAssign(StmtAugAssign {
            target: Box::new(name("x")),
            op: Operator::FloorDiv,
            value: Box::new(int(2)),
        })
    );
}

#[test]
fn test_assignment_to_literal_is_rejected() {
    assert_eq!(
        parse_err("3 = x\n"),
        ParseErrorType::Syntax("cannot assign to literal".to_owned())
    );
    assert!(matches!(parse_err("a + b = c\n"), ParseErrorType::Syntax(_)));
    assert!(matches!(parse_err("f() = 1\n"), ParseErrorType::Syntax(_)));
}

#[test]
fn test_starred_assignment_needs_sequence() {
    assert!(matches!(parse_err("*a = b\n"), ParseErrorType::Syntax(_)));
    assert_eq!(
        stmt("*a, b = c\n"),
        Stmt::Assign(StmtAssign {
            targets: vec![Expr::Tuple(ExprTuple {
                elts: vec![
                    Expr::Starred(ExprStarred {
                        value: Box::new(name("a"))
                    }),
                    name("b")
                ],
            })],
            value: Box::new(name("c")),
        })
    );
}

#[test]
fn test_walrus() {
    assert_eq!(
        expr("(x := 1)"),
        Expr::NamedExpr(ExprNamedExpr {
            target: Box::new(name("x")),
            value: Box::new(int(1)),
        })
    );
    let Stmt::If(stmt_if) = stmt("if x := f():\n    pass\n") else {
        panic!("expected an if statement")
    };
    assert!(stmt_if.test.is_named_expr());
}

#[test]
fn test_ternary() {
    assert_eq!(
        expr("a if b else c"),
        Expr::IfExp(ExprIfExp {
            test: Box::new(name("b")),
            body: Box::new(name("a")),
            orelse: Box::new(name("c")),
        })
    );
}

#[test]
fn test_lambda() {
    let Expr::Lambda(lambda) = expr("lambda a, b=1: a") else {
        panic!("expected a lambda")
    };
    assert_eq!(lambda.args.args, vec![Arg::new("a"), Arg::new("b")]);
    assert_eq!(lambda.args.defaults, vec![int(1)]);
    assert_eq!(*lambda.body, name("a"));
}

#[test]
fn test_call_arguments() {
    assert_eq!(
        expr("f(a, *b, c=1, **d)"),
        Expr::Call(ExprCall {
            func: Box::new(name("f")),
            args: vec![
                name("a"),
                Expr::Starred(ExprStarred {
                    value: Box::new(name("b"))
                })
            ],
            keywords: vec![
                Keyword {
                    arg: Some(Identifier::new("c")),
                    value: int(1)
                },
                Keyword {
                    arg: None,
                    value: name("d")
                },
            ],
        })
    );
}

#[test]
fn test_duplicate_keyword_argument_rejected() {
    assert_eq!(
        parse_err("f(a=1, a=2)\n"),
        ParseErrorType::Syntax("keyword argument repeated: a".to_owned())
    );
}

#[test]
fn test_positional_after_keyword_rejected() {
    assert!(matches!(parse_err("f(a=1, b)\n"), ParseErrorType::Syntax(_)));
}

#[test]
fn test_bare_generator_sole_call_argument() {
    let Expr::Call(call) = expr("sum(x for x in y)") else {
        panic!("expected a call")
    };
    assert_eq!(call.args.len(), 1);
    assert!(call.args[0].is_generator_exp());
    assert!(matches!(
        parse_err("f(x for x in y, 1)\n"),
        ParseErrorType::Syntax(_)
    ));
}

#[test]
fn test_comprehensions() {
    let Expr::ListComp(comp) = expr("[x * 2 for x in xs if x > 0 if x < 10]") else {
        panic!("expected a list comprehension")
    };
    assert_eq!(comp.generators.len(), 1);
    assert_eq!(comp.generators[0].ifs.len(), 2);
    assert!(!comp.generators[0].is_async);

    let Expr::DictComp(comp) = expr("{k: v for k, v in items}") else {
        panic!("expected a dict comprehension")
    };
    assert!(comp.generators[0].target.is_tuple());

    let Expr::SetComp(comp) = expr("{x async for x in xs}") else {
        panic!("expected a set comprehension")
    };
    assert!(comp.generators[0].is_async);
}

#[test]
fn test_dict_display_with_unpack() {
    assert_eq!(
        expr("{1: 'a', **rest}"),
        Expr::Dict(ExprDict {
            keys: vec![Some(int(1)), None],
            values: vec![string("a"), name("rest")],
        })
    );
}

#[test]
fn test_slices() {
    let Expr::Subscript(sub) = expr("a[:]") else {
        panic!("expected a subscript")
    };
    assert_eq!(
        *sub.slice,
        Expr::Slice(ExprSlice {
            lower: None,
            upper: None,
            step: None
        })
    );

    let Expr::Subscript(sub) = expr("a[1:2, 3]") else {
        panic!("expected a subscript")
    };
    let Expr::Tuple(tuple) = *sub.slice else {
        panic!("expected a tuple subscript")
    };
    assert!(tuple.elts[0].is_slice());
    assert_eq!(tuple.elts[1], int(3));

    let Expr::Subscript(sub) = expr("a[::2]") else {
        panic!("expected a subscript")
    };
    assert_eq!(
        *sub.slice,
        Expr::Slice(ExprSlice {
            lower: None,
            upper: None,
            step: Some(Box::new(int(2)))
        })
    );
}

#[test]
fn test_fstring_with_conversion_and_nested_spec() {
    assert_eq!(
        expr("f\"hi {name!r:>{w}}\""),
        Expr::JoinedStr(ExprJoinedStr {
            values: vec![
                string("hi "),
                Expr::FormattedValue(ExprFormattedValue {
                    value: Box::new(name("name")),
                    conversion: ConversionFlag::Repr,
                    format_spec: Some(Box::new(Expr::JoinedStr(ExprJoinedStr {
                        values: vec![
                            string(">"),
                            Expr::FormattedValue(ExprFormattedValue {
                                value: Box::new(name("w")),
                                conversion: ConversionFlag::None,
                                format_spec: None,
                            }),
                        ],
                    }))),
                }),
            ],
        })
    );
}

#[test]
fn test_implicit_string_concatenation() {
    assert_eq!(expr("'a' \"b\""), string("ab"));
    // An f-string part makes the whole group a JoinedStr with merged
    // constant runs.
    assert_eq!(
        expr("'a' f'{x}' 'b' 'c'"),
        Expr::JoinedStr(ExprJoinedStr {
            values: vec![
                string("a"),
                Expr::FormattedValue(ExprFormattedValue {
                    value: Box::new(name("x")),
                    conversion: ConversionFlag::None,
                    format_spec: None,
                }),
                string("bc"),
            ],
        })
    );
    assert!(matches!(
        parse_err("'a' b'b'\n"),
        ParseErrorType::Syntax(_)
    ));
}

#[test]
fn test_match_sequence_with_star() {
    let Stmt::Match(stmt_match) = stmt("match p:\n    case [1, *rest]:\n        pass\n") else {
        panic!("expected a match statement")
    };
    assert_eq!(*stmt_match.subject, name("p"));
    assert_eq!(stmt_match.cases.len(), 1);
    assert_eq!(
        stmt_match.cases[0].pattern,
        Pattern::MatchSequence(PatternMatchSequence {
            patterns: vec![
                Pattern::MatchValue(PatternMatchValue {
                    value: Box::new(int(1))
                }),
                Pattern::MatchStar(PatternMatchStar {
                    name: Some(Identifier::new("rest"))
                }),
            ],
        })
    );
}

#[test]
fn test_match_patterns() {
    let source = "\
match command:
    case Point(x=0, y=0):
        pass
    case [Point(0, 0)] | (0, 1):
        pass
    case {'key': value, **rest}:
        pass
    case str() | bytes() as s if s:
        pass
    case color.RED:
        pass
    case -1 + 2j:
        pass
    case None | True:
        pass
    case _:
        pass
";
    let Stmt::Match(stmt_match) = stmt(source) else {
        panic!("expected a match statement")
    };
    assert_eq!(stmt_match.cases.len(), 8);

    let Pattern::MatchClass(class_pattern) = &stmt_match.cases[0].pattern else {
        panic!("expected a class pattern")
    };
    assert_eq!(
        class_pattern.kwd_attrs,
        vec![Identifier::new("x"), Identifier::new("y")]
    );

    let Pattern::MatchMapping(mapping) = &stmt_match.cases[2].pattern else {
        panic!("expected a mapping pattern")
    };
    assert_eq!(mapping.keys.len(), 1);
    assert_eq!(mapping.rest, Some(Identifier::new("rest")));

    let Pattern::MatchAs(as_pattern) = &stmt_match.cases[3].pattern else {
        panic!("expected an as pattern")
    };
    assert!(as_pattern.pattern.as_ref().unwrap().is_match_or());
    assert!(stmt_match.cases[3].guard.is_some());

    let Pattern::MatchValue(value) = &stmt_match.cases[4].pattern else {
        panic!("expected a value pattern")
    };
    assert!(value.value.is_attribute());

    assert_eq!(
        stmt_match.cases[7].pattern,
        Pattern::MatchAs(PatternMatchAs {
            pattern: None,
            name: None
        })
    );
}

#[test]
fn test_match_as_soft_keyword() {
    // Not a match statement: an assignment and a call.
    assert_eq!(
        stmt("match = 1\n"),
        Stmt::Assign(StmtAssign {
            targets: vec![name("match")],
            value: Box::new(int(1)),
        })
    );
    let Stmt::Expr(call) = stmt("match(x)\n") else {
        panic!("expected an expression statement")
    };
    assert!(call.value.is_call());
}

#[test]
fn test_multiple_stars_in_sequence_pattern_rejected() {
    assert!(matches!(
        parse_err("match p:\n    case [*a, *b]:\n        pass\n"),
        ParseErrorType::Syntax(_)
    ));
}

#[test]
fn test_type_alias_statement() {
    let Stmt::TypeAlias(alias) = stmt("type Vector[T] = list[T]\n") else {
        panic!("expected a type alias")
    };
    assert_eq!(*alias.name, name("Vector"));
    assert_eq!(
        alias.type_params,
        vec![TypeParam::TypeVar(TypeParamTypeVar {
            name: Identifier::new("T"),
            bound: None
        })]
    );

    // `type` stays an ordinary name elsewhere.
    let Stmt::Expr(call) = stmt("type(x)\n") else {
        panic!("expected an expression statement")
    };
    assert!(call.value.is_call());
}

#[test]
fn test_type_parameters_on_def_and_class() {
    let Stmt::FunctionDef(def) = stmt("def f[T, *Ts, **P](x: T) -> T: pass\n") else {
        panic!("expected a function definition")
    };
    assert_eq!(
        def.type_params,
        vec![
            TypeParam::TypeVar(TypeParamTypeVar {
                name: Identifier::new("T"),
                bound: None
            }),
            TypeParam::TypeVarTuple(TypeParamTypeVarTuple {
                name: Identifier::new("Ts")
            }),
            TypeParam::ParamSpec(TypeParamParamSpec {
                name: Identifier::new("P")
            }),
        ]
    );
    assert!(def.returns.is_some());

    let Stmt::ClassDef(class_def) = stmt("class C[T: int](Base, metaclass=M): pass\n") else {
        panic!("expected a class definition")
    };
    assert_eq!(class_def.type_params.len(), 1);
    assert_eq!(class_def.bases, vec![name("Base")]);
    assert_eq!(class_def.keywords.len(), 1);
}

#[test]
fn test_decorators() {
    let Stmt::FunctionDef(def) = stmt("@cache\n@app.route('/')\ndef handler(): pass\n") else {
        panic!("expected a function definition")
    };
    assert_eq!(def.decorator_list.len(), 2);
    assert!(def.decorator_list[1].is_call());
}

#[test]
fn test_async_forms() {
    let Stmt::FunctionDef(def) = stmt("async def f():\n    await g()\n") else {
        panic!("expected a function definition")
    };
    assert!(def.is_async);
    let Stmt::Expr(awaited) = &def.body[0] else {
        panic!("expected an expression statement")
    };
    assert!(awaited.value.is_await());

    let Stmt::For(stmt_for) = stmt("async for x in xs:\n    pass\n") else {
        panic!("expected a for statement")
    };
    assert!(stmt_for.is_async);

    let Stmt::With(stmt_with) = stmt("async with ctx() as c:\n    pass\n") else {
        panic!("expected a with statement")
    };
    assert!(stmt_with.is_async);
}

#[test]
fn test_elif_chain_nests() {
    let Stmt::If(outer) = stmt("if a:\n    pass\nelif b:\n    pass\nelse:\n    pass\n") else {
        panic!("expected an if statement")
    };
    assert_eq!(outer.orelse.len(), 1);
    let Stmt::If(inner) = &outer.orelse[0] else {
        panic!("expected a nested if for elif")
    };
    assert_eq!(inner.orelse, vec![Stmt::Pass]);
}

#[test]
fn test_while_for_else() {
    let Stmt::While(stmt_while) = stmt("while x:\n    pass\nelse:\n    pass\n") else {
        panic!("expected a while statement")
    };
    assert_eq!(stmt_while.orelse, vec![Stmt::Pass]);

    let Stmt::For(stmt_for) = stmt("for i in 1, 2:\n    pass\n") else {
        panic!("expected a for statement")
    };
    assert!(stmt_for.iter.is_tuple());
}

#[test]
fn test_with_items() {
    let Stmt::With(stmt_with) = stmt("with open(p) as f, lock:\n    pass\n") else {
        panic!("expected a with statement")
    };
    assert_eq!(stmt_with.items.len(), 2);
    assert!(stmt_with.items[0].optional_vars.is_some());

    // Parenthesized item list.
    let Stmt::With(stmt_with) = stmt("with (open(p) as f, lock):\n    pass\n") else {
        panic!("expected a with statement")
    };
    assert_eq!(stmt_with.items.len(), 2);

    // A parenthesized tuple remains a single context manager.
    let Stmt::With(stmt_with) = stmt("with (a, b) as pair:\n    pass\n") else {
        panic!("expected a with statement")
    };
    assert_eq!(stmt_with.items.len(), 1);
    assert!(stmt_with.items[0].context_expr.is_tuple());
}

#[test]
fn test_try_except() {
    let Stmt::Try(stmt_try) =
        stmt("try:\n    pass\nexcept ValueError as e:\n    pass\nexcept:\n    pass\nelse:\n    pass\nfinally:\n    pass\n")
    else {
        panic!("expected a try statement")
    };
    assert!(!stmt_try.is_star);
    assert_eq!(stmt_try.handlers.len(), 2);
    assert_eq!(stmt_try.handlers[0].name, Some(Identifier::new("e")));
    assert_eq!(stmt_try.handlers[1].type_, None);
    assert_eq!(stmt_try.orelse, vec![Stmt::Pass]);
    assert_eq!(stmt_try.finalbody, vec![Stmt::Pass]);
}

#[test]
fn test_try_except_star() {
    let Stmt::Try(stmt_try) = stmt("try:\n    pass\nexcept* ValueError:\n    pass\n") else {
        panic!("expected a try statement")
    };
    assert!(stmt_try.is_star);
    assert!(matches!(
        parse_err("try:\n    pass\nexcept* ValueError:\n    pass\nexcept TypeError:\n    pass\n"),
        ParseErrorType::Syntax(_)
    ));
}

#[test]
fn test_imports() {
    assert_eq!(
        stmt("import os.path as p, sys\n"),
        Stmt::Import(StmtImport {
            names: vec![
                Alias {
                    name: Identifier::new("os.path"),
                    asname: Some(Identifier::new("p"))
                },
                Alias {
                    name: Identifier::new("sys"),
                    asname: None
                },
            ],
        })
    );
    assert_eq!(
        stmt("from ..pkg import (a as b, c)\n"),
        Stmt::ImportFrom(StmtImportFrom {
            module: Some(Identifier::new("pkg")),
            names: vec![
                Alias {
                    name: Identifier::new("a"),
                    asname: Some(Identifier::new("b"))
                },
                Alias {
                    name: Identifier::new("c"),
                    asname: None
                },
            ],
            level: 2,
        })
    );
    assert_eq!(
        stmt("from . import x\n"),
        Stmt::ImportFrom(StmtImportFrom {
            module: None,
            names: vec![Alias {
                name: Identifier::new("x"),
                asname: None
            }],
            level: 1,
        })
    );
}

#[test]
fn test_global_nonlocal_del() {
    assert_eq!(
        stmt("global a, b\n"),
        Stmt::Global(StmtGlobal {
            names: vec![Identifier::new("a"), Identifier::new("b")]
        })
    );
    assert_eq!(
        stmt("del a, b[0]\n"),
        Stmt::Delete(StmtDelete {
            targets: vec![
                name("a"),
                Expr::Subscript(ExprSubscript {
                    value: Box::new(name("b")),
                    slice: Box::new(int(0)),
                })
            ],
        })
    );
    assert!(matches!(parse_err("del 1\n"), ParseErrorType::Syntax(_)));
}

#[test]
fn test_yield_forms() {
    let Stmt::FunctionDef(def) =
        stmt("def g():\n    yield\n    yield 1, 2\n    x = yield from other()\n")
    else {
        panic!("expected a function definition")
    };
    let Stmt::Expr(bare) = &def.body[0] else {
        panic!()
    };
    assert_eq!(*bare.value, Expr::Yield(ExprYield { value: None }));
    let Stmt::Expr(tuple_yield) = &def.body[1] else {
        panic!()
    };
    let Expr::Yield(y) = &*tuple_yield.value else {
        panic!("expected yield")
    };
    assert!(y.value.as_ref().unwrap().is_tuple());
    let Stmt::Assign(assign) = &def.body[2] else {
        panic!()
    };
    assert!(assign.value.is_yield_from());
}

#[test]
fn test_return_and_raise() {
    let Stmt::Return(ret) = stmt("return a, b\n") else {
        panic!("expected a return statement")
    };
    assert!(ret.value.as_ref().unwrap().is_tuple());

    assert_eq!(
        stmt("raise ValueError('x') from err\n"),
        Stmt::Raise(StmtRaise {
            exc: Some(Box::new(Expr::Call(ExprCall {
                func: Box::new(name("ValueError")),
                args: vec![string("x")],
                keywords: vec![],
            }))),
            cause: Some(Box::new(name("err"))),
        })
    );
}

#[test]
fn test_expression_mode() {
    assert!(parse_expression("a, b").unwrap().is_tuple());
    assert!(parse_expression("pass").is_err());
    assert!(parse_expression("a; b").is_err());
}

#[test]
fn test_expected_token_error_shape() {
    let err = parse_program("def f(:\n    pass\n").unwrap_err();
    assert!(matches!(
        err.error,
        ParseErrorType::ExpectedName { .. } | ParseErrorType::ExpectedToken { .. }
    ));
    assert_eq!(err.location.row(), 1);
}

#[test]
fn test_error_reports_position() {
    let err = parse_program("x = (1 +\n").unwrap_err();
    assert_eq!(err.location.row(), 2);
}
