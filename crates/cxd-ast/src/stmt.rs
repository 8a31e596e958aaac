//! Statement nodes.

use crate::decl::{Decl, VarDecl};
use crate::expr::Expr;

#[derive(Clone, Debug, PartialEq)]
pub struct IfStmt {
    pub is_constexpr: bool,
    /// C++17 init-statement, hoisted into a synthetic scope on emission.
    pub init: Option<Box<Stmt>>,
    /// Condition-declaration (`if (auto x = ...)`), hoisted likewise.
    pub cond_var: Option<VarDecl>,
    pub cond: Expr,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SwitchStmt {
    pub init: Option<Box<Stmt>>,
    pub cond_var: Option<VarDecl>,
    pub cond: Expr,
    pub body: Box<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ForStmt {
    pub init: Option<Box<Stmt>>,
    pub cond: Option<Expr>,
    pub inc: Option<Expr>,
    pub body: Box<Stmt>,
}

/// A range-based `for` after semantic analysis: the compiler-synthesized
/// range/begin/end declarations and the rewritten condition and increment
/// are all present as real nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct RangeForStmt {
    pub range_decl: VarDecl,
    pub begin_decl: VarDecl,
    pub end_decl: VarDecl,
    pub cond: Expr,
    pub inc: Expr,
    pub loop_var: VarDecl,
    pub body: Box<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    Compound(Vec<Stmt>),
    Expr(Expr),
    Decl(Vec<Decl>),
    If(IfStmt),
    Switch(SwitchStmt),
    Case { lhs: Expr, body: Box<Stmt> },
    Default(Box<Stmt>),
    While { cond: Expr, body: Box<Stmt> },
    DoWhile { body: Box<Stmt>, cond: Expr },
    For(ForStmt),
    RangeFor(Box<RangeForStmt>),
    Return(Option<Expr>),
    Break,
    Continue,
    Null,
    Unsupported { kind: String },
}

impl Stmt {
    pub fn is_compound(&self) -> bool {
        matches!(self, Stmt::Compound(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Stmt::Null)
    }
}
