//! Structural validation shared by the statement and expression parsers.
//!
//! Python enforces assignability at parse time: `3 = x` is a syntax
//! error, not a runtime failure. These checks walk candidate target
//! expressions after they have been parsed with the ordinary expression
//! grammar.

use flint_python_ast::{Constant, Expr, ExprConstant, ExprName, Identifier, Location};

use crate::error::{ParseError, ParseErrorType};

/// A plain name expression for `id`.
pub(super) fn name_expr(id: impl Into<Identifier>) -> Expr {
    Expr::Name(ExprName { id: id.into() })
}

/// A constant expression without a string-prefix kind.
pub(super) fn constant_expr(value: impl Into<Constant>) -> Expr {
    Expr::Constant(ExprConstant {
        value: value.into(),
        kind: None,
    })
}

fn error(message: &str, location: Location) -> ParseError {
    ParseError::new(ParseErrorType::Syntax(message.to_owned()), location)
}

/// Check that `expr` may be assigned to. `allow_starred` admits `*name`
/// elements, which are only legal directly inside a tuple or list target.
pub(super) fn validate_assign_target(
    expr: &Expr,
    location: Location,
    allow_starred: bool,
) -> Result<(), ParseError> {
    match expr {
        Expr::Name(_) | Expr::Attribute(_) | Expr::Subscript(_) => Ok(()),
        Expr::Starred(starred) => {
            if allow_starred {
                validate_assign_target(&starred.value, location, false)
            } else {
                Err(error(
                    "starred assignment target must be in a list or tuple",
                    location,
                ))
            }
        }
        Expr::Tuple(tuple) => tuple
            .elts
            .iter()
            .try_for_each(|elt| validate_assign_target(elt, location, true)),
        Expr::List(list) => list
            .elts
            .iter()
            .try_for_each(|elt| validate_assign_target(elt, location, true)),
        Expr::Constant(_) | Expr::JoinedStr(_) | Expr::FormattedValue(_) => {
            Err(error("cannot assign to literal", location))
        }
        _ => Err(error("cannot assign to expression", location)),
    }
}

/// Augmented assignment accepts a single name, attribute or subscript.
pub(super) fn validate_aug_assign_target(
    expr: &Expr,
    location: Location,
) -> Result<(), ParseError> {
    match expr {
        Expr::Name(_) | Expr::Attribute(_) | Expr::Subscript(_) => Ok(()),
        _ => Err(error(
            "invalid augmented assignment target",
            location,
        )),
    }
}

/// An annotated assignment accepts a single name, attribute or subscript.
pub(super) fn validate_ann_assign_target(
    expr: &Expr,
    location: Location,
) -> Result<(), ParseError> {
    match expr {
        Expr::Name(_) | Expr::Attribute(_) | Expr::Subscript(_) => Ok(()),
        Expr::Tuple(_) => Err(error(
            "only single target (not tuple) can be annotated",
            location,
        )),
        _ => Err(error("invalid annotated assignment target", location)),
    }
}

/// Check that `expr` may appear in a `del` statement.
pub(super) fn validate_del_target(expr: &Expr, location: Location) -> Result<(), ParseError> {
    match expr {
        Expr::Name(_) | Expr::Attribute(_) | Expr::Subscript(_) => Ok(()),
        Expr::Tuple(tuple) => tuple
            .elts
            .iter()
            .try_for_each(|elt| validate_del_target(elt, location)),
        Expr::List(list) => list
            .elts
            .iter()
            .try_for_each(|elt| validate_del_target(elt, location)),
        _ => Err(error("cannot delete this expression", location)),
    }
}

/// A starred expression needs an enclosing tuple, list or call.
pub(super) fn reject_bare_starred(expr: &Expr, location: Location) -> Result<(), ParseError> {
    if expr.is_starred() {
        Err(error("cannot use starred expression here", location))
    } else {
        Ok(())
    }
}
