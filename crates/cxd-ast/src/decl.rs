//! Declaration nodes.

use bitflags::bitflags;
use cxd_common::SourceLoc;

use crate::expr::Expr;
use crate::stmt::Stmt;
use crate::template::TemplateArg;
use crate::types::Type;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
    Private,
}

impl Access {
    pub fn spelling(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum StorageClass {
    #[default]
    None,
    Static,
    Extern,
}

bitflags! {
    /// Declaration qualifiers rendered in canonical order:
    /// inline, static, virtual, volatile, constexpr.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct Qualifiers: u16 {
        const INLINE = 1 << 0;
        const STATIC = 1 << 1;
        const VIRTUAL = 1 << 2;
        const VOLATILE = 1 << 3;
        const CONSTEXPR = 1 << 4;
        const CONST = 1 << 5;
        const NOEXCEPT = 1 << 6;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VarDecl {
    pub name: String,
    pub ty: Type,
    pub storage: StorageClass,
    pub is_inline: bool,
    pub is_constexpr: bool,
    pub init: Option<Expr>,
    pub is_nrvo: bool,
    /// Set by sema for a static local of class type whose constructor is not
    /// trivial; emission replaces the declaration with a guarded
    /// placement-construct block.
    pub has_non_trivial_static_init: bool,
    pub location: SourceLoc,
}

impl VarDecl {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            storage: StorageClass::None,
            is_inline: false,
            is_constexpr: false,
            init: None,
            is_nrvo: false,
            has_non_trivial_static_init: false,
            location: SourceLoc::default(),
        }
    }

    pub fn with_init(mut self, init: Expr) -> Self {
        self.init = Some(init);
        self
    }

    pub fn at(mut self, location: SourceLoc) -> Self {
        self.location = location;
        self
    }
}

/// How one binding of a decomposition reaches its element of the decomposed
/// value.
#[derive(Clone, Debug, PartialEq)]
pub enum BindingPath {
    /// Tuple-like decomposition: the initializer of the compiler-synthesized
    /// holding variable (typically a `get<I>` call).
    HoldingVar { init: Expr },
    /// Member access into the decomposed value.
    Member(Expr),
    /// Array decomposition: subscript into the temporary.
    ArraySubscript { index: Expr },
}

#[derive(Clone, Debug, PartialEq)]
pub struct BindingDecl {
    pub name: String,
    pub ty: Type,
    /// `None` for a binding sema could not resolve; emission marks it.
    pub path: Option<BindingPath>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DecompositionDecl {
    pub ty: Type,
    pub init: Expr,
    pub bindings: Vec<BindingDecl>,
    pub location: SourceLoc,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParamDecl {
    pub name: String,
    pub ty: Type,
}

impl ParamDecl {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub ret: Type,
    pub params: Vec<ParamDecl>,
    pub qualifiers: Qualifiers,
    pub body: Option<Stmt>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MethodKind {
    Constructor,
    Destructor,
    Conversion,
    Other,
}

/// A constructor member-initializer. `member` is `None` for base-class or
/// delegating initializers, where the initializer expression carries the
/// whole text.
#[derive(Clone, Debug, PartialEq)]
pub struct CtorInit {
    pub member: Option<String>,
    pub init: Expr,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MethodDecl {
    pub kind: MethodKind,
    pub access: Access,
    pub name: String,
    pub ret: Type,
    pub params: Vec<ParamDecl>,
    pub qualifiers: Qualifiers,
    pub is_defaulted: bool,
    pub is_deleted: bool,
    pub is_user_provided: bool,
    pub ctor_inits: Vec<CtorInit>,
    pub body: Option<Stmt>,
}

impl MethodDecl {
    pub fn plain(name: impl Into<String>, ret: Type) -> Self {
        Self {
            kind: MethodKind::Other,
            access: Access::Public,
            name: name.into(),
            ret,
            params: Vec::new(),
            qualifiers: Qualifiers::empty(),
            is_defaulted: false,
            is_deleted: false,
            is_user_provided: true,
            ctor_inits: Vec::new(),
            body: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BaseSpecifier {
    pub access: Access,
    pub ty: Type,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordDecl {
    pub is_class: bool,
    pub name: String,
    pub template_args: Option<Vec<TemplateArg>>,
    pub bases: Vec<BaseSpecifier>,
    pub decls: Vec<Decl>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub ty: Type,
}

/// A using-declaration; the scope components are the printable spellings of
/// the enclosing contexts, outermost first.
#[derive(Clone, Debug, PartialEq)]
pub struct UsingDecl {
    pub scope: Vec<String>,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Decl {
    Var(VarDecl),
    Decomposition(DecompositionDecl),
    Function(FunctionDecl),
    Method(MethodDecl),
    Record(RecordDecl),
    Field(FieldDecl),
    AccessSpec(Access),
    TypeAlias { name: String, underlying: Type },
    Typedef { name: String, underlying: Type },
    Using(UsingDecl),
    StaticAssert {
        condition: Expr,
        message: Option<Expr>,
        failed: bool,
    },
    Unsupported { kind: String },
}
