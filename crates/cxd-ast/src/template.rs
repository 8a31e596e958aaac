//! Template arguments.

use crate::expr::Expr;
use crate::types::Type;

/// One template argument; packs recursively hold their expanded elements.
#[derive(Clone, Debug, PartialEq)]
pub enum TemplateArg {
    Type(Type),
    /// A declaration argument, rendered as its function-pointer type name.
    Declaration(Type),
    NullPtr(Type),
    Integral(i128),
    Expression(Box<Expr>),
    Pack(Vec<TemplateArg>),
    Template(String),
    TemplateExpansion(String),
    Null,
}
