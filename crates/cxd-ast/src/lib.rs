//! Typed C++ abstract syntax tree consumed by the cxd emitter.
//!
//! The tree is produced by an external parser/sema collaborator and is
//! immutable for the lifetime of one generation pass; the emitter only reads
//! it. Node categories are closed sum types so every emission rule is an
//! exhaustive `match` — the "supported vs. not yet handled" distinction is
//! carried by the explicit `Unsupported` variant of each category instead of
//! a fallthrough in a dynamic dispatch table.

pub mod decl;
pub use decl::{
    Access, BaseSpecifier, BindingDecl, BindingPath, CtorInit, Decl, DecompositionDecl, FieldDecl,
    FunctionDecl, MethodDecl, MethodKind, ParamDecl, Qualifiers, RecordDecl, StorageClass,
    UsingDecl, VarDecl,
};

pub mod expr;
pub use expr::{
    BinOp, CallExpr, CastKind, CharEncoding, Expr, MemberExpr, NamedCastName, NewExpr, TraitKind,
    TypeOrExpr, UnOp,
};

pub mod lambda;
pub use lambda::{Capture, CaptureKind, LambdaClass, LambdaExpr};

pub mod stmt;
pub use stmt::{ForStmt, IfStmt, RangeForStmt, Stmt, SwitchStmt};

pub mod template;
pub use template::TemplateArg;

pub mod types;
pub use types::{BuiltinKind, Type};
