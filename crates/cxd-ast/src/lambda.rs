//! Lambda expressions and the closure class they denote.
//!
//! Sema exposes the closure class members explicitly: the call operator (and
//! its instantiations for a generic lambda), any conversion-to-function-
//! pointer operators, and the static invoker behind them. The emitter turns
//! all of this into an explicit class definition.

use cxd_common::SourceLoc;
use smallvec::SmallVec;

use crate::decl::MethodDecl;
use crate::expr::Expr;
use crate::types::Type;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CaptureKind {
    This,
    StarThis,
    ByCopy,
    ByRef,
    /// Variable-length array capture; not expressible as a class member.
    Vla,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Capture {
    pub kind: CaptureKind,
    /// Plain source name of the captured entity; `"this"` for this-captures.
    pub name: String,
    /// Type of the captured entity. For this-captures, the type of the
    /// capture initializer (pointer for `this`, value for `*this`).
    pub ty: Type,
    /// The capture initializer expression. For an init-capture by copy
    /// (`[a = b[1]]`) this is the assigned expression and is used instead of
    /// the bound name.
    pub init: Option<Expr>,
    pub has_explicit_init: bool,
}

impl Capture {
    pub fn by_copy(name: impl Into<String>, ty: Type) -> Self {
        Self {
            kind: CaptureKind::ByCopy,
            name: name.into(),
            ty,
            init: None,
            has_explicit_init: false,
        }
    }

    pub fn by_ref(name: impl Into<String>, ty: Type) -> Self {
        Self {
            kind: CaptureKind::ByRef,
            name: name.into(),
            ty,
            init: None,
            has_explicit_init: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LambdaClass {
    pub is_generic: bool,
    pub call_operator: MethodDecl,
    /// Instantiations of the call operator actually used (generic lambdas).
    pub call_operator_specializations: Vec<MethodDecl>,
    /// Conversion operators to function pointer; ones without a body are
    /// undeduced and are skipped on emission.
    pub conversions: Vec<MethodDecl>,
    pub conversion_specializations: Vec<MethodDecl>,
    pub static_invoker: Option<MethodDecl>,
    pub static_invoker_specializations: Vec<MethodDecl>,
}

impl LambdaClass {
    pub fn with_call_operator(call_operator: MethodDecl) -> Self {
        Self {
            is_generic: false,
            call_operator,
            call_operator_specializations: Vec::new(),
            conversions: Vec::new(),
            conversion_specializations: Vec::new(),
            static_invoker: None,
            static_invoker_specializations: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LambdaExpr {
    /// Location of the lambda token; the closure class name derives from it.
    pub location: SourceLoc,
    pub captures: SmallVec<[Capture; 4]>,
    pub class: LambdaClass,
}
