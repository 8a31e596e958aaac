//! Expression nodes.
//!
//! Transparent wrapper nodes the compiler inserts (`ExprWithCleanups`,
//! `MaterializeTemporary`, ...) are kept as explicit variants because some
//! emission rules key off them — e.g. structured-binding expansion checks
//! for `ExprWithCleanups` to tell a temporary-backed binding from one that
//! can take an address-of.

use crate::lambda::LambdaExpr;
use crate::template::TemplateArg;
use crate::types::Type;

/// Binary operators by spelling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    BitAnd,
    BitXor,
    BitOr,
    LogicalAnd,
    LogicalOr,
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    RemAssign,
    ShlAssign,
    ShrAssign,
    AndAssign,
    XorAssign,
    OrAssign,
    Comma,
}

impl BinOp {
    pub fn spelling(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::BitAnd => "&",
            Self::BitXor => "^",
            Self::BitOr => "|",
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
            Self::Assign => "=",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::MulAssign => "*=",
            Self::DivAssign => "/=",
            Self::RemAssign => "%=",
            Self::ShlAssign => "<<=",
            Self::ShrAssign => ">>=",
            Self::AndAssign => "&=",
            Self::XorAssign => "^=",
            Self::OrAssign => "|=",
            Self::Comma => ",",
        }
    }
}

/// Unary operators by spelling; postfix forms carry their own variants.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnOp {
    PostInc,
    PostDec,
    PreInc,
    PreDec,
    AddrOf,
    Deref,
    Plus,
    Minus,
    Not,
    LogicalNot,
}

impl UnOp {
    pub fn spelling(self) -> &'static str {
        match self {
            Self::PostInc | Self::PreInc => "++",
            Self::PostDec | Self::PreDec => "--",
            Self::AddrOf => "&",
            Self::Deref => "*",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Not => "~",
            Self::LogicalNot => "!",
        }
    }

    pub fn is_postfix(self) -> bool {
        matches!(self, Self::PostInc | Self::PostDec)
    }
}

/// Character literal encodings, determining the literal prefix.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CharEncoding {
    Plain,
    Wide,
    Utf8,
    Utf16,
    Utf32,
}

/// Semantic kinds of a cast operation. Only some of them re-surface as
/// explicit cast syntax; the rest stay invisible and emission forwards to
/// the operand.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CastKind {
    BitCast,
    IntegralCast,
    IntegralToFloating,
    FloatingToIntegral,
    FloatingCast,
    DerivedToBase,
    UncheckedDerivedToBase,
    LValueToRValue,
    NoOp,
    ArrayToPointerDecay,
    FunctionToPointerDecay,
    UserDefinedConversion,
    ConstructorConversion,
    NullToPointer,
    IntegralToBoolean,
    PointerToBoolean,
}

impl CastKind {
    /// Whether an implicit cast of this kind is made explicit in the output.
    pub fn resurfaces(self) -> bool {
        matches!(
            self,
            Self::BitCast
                | Self::IntegralCast
                | Self::IntegralToFloating
                | Self::FloatingToIntegral
                | Self::FloatingCast
                | Self::DerivedToBase
                | Self::UncheckedDerivedToBase
        )
    }

    pub fn is_cast_to_base(self) -> bool {
        matches!(self, Self::DerivedToBase | Self::UncheckedDerivedToBase)
    }
}

/// The keyword of an explicitly written named cast.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NamedCastName {
    Static,
    Const,
    Reinterpret,
    Dynamic,
}

impl NamedCastName {
    pub fn spelling(self) -> &'static str {
        match self {
            Self::Static => "static_cast",
            Self::Const => "const_cast",
            Self::Reinterpret => "reinterpret_cast",
            Self::Dynamic => "dynamic_cast",
        }
    }
}

/// `sizeof` / `alignof`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraitKind {
    SizeOf,
    AlignOf,
}

impl TraitKind {
    pub fn spelling(self) -> &'static str {
        match self {
            Self::SizeOf => "sizeof",
            Self::AlignOf => "alignof",
        }
    }
}

/// Operand of `sizeof`/`alignof`/`typeid`: a type or an expression.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeOrExpr {
    Type(Type),
    Expr(Box<Expr>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub args: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MemberExpr {
    pub base: Box<Expr>,
    pub is_arrow: bool,
    pub name: String,
    pub template_args: Vec<TemplateArg>,
    /// Set when the member is the conversion operator of a closure class; the
    /// member is then spelled `operator <class>::retType` and template
    /// arguments are suppressed.
    pub lambda_conversion_class: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewExpr {
    pub placement: Vec<Expr>,
    pub allocated_type: Type,
    /// Construct-expression for class types; `None` for scalar/array news.
    pub construct: Option<Box<Expr>>,
    pub is_array: bool,
    pub array_size: Option<Box<Expr>>,
    pub initializer: Option<Box<Expr>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    DeclRef {
        name: String,
        template_args: Vec<TemplateArg>,
    },
    UnresolvedLookup {
        name: String,
    },
    IntegerLiteral {
        value: i128,
        ty: Type,
    },
    FloatingLiteral {
        value: f64,
        ty: Type,
    },
    BoolLiteral(bool),
    CharLiteral {
        value: u32,
        encoding: CharEncoding,
    },
    StringLiteral(String),
    NullPtrLiteral,
    GnuNull,
    /// `__func__` and friends; the operand is the resolved string literal.
    Predefined(Box<Expr>),
    Conditional {
        cond: Box<Expr>,
        when_true: Box<Expr>,
        when_false: Box<Expr>,
    },
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
    },
    Paren(Box<Expr>),
    Call(CallExpr),
    /// A user-defined literal call; its template arguments may be a single
    /// character pack which renders as `<'a', 'b'>`.
    UserDefinedLiteral {
        call: CallExpr,
        template_args: Vec<TemplateArg>,
    },
    MemberCall(CallExpr),
    OperatorCall {
        op_spelling: String,
        /// Member operator: `a.operator@(b)`; free operator: `operator@(a, b)`.
        is_member: bool,
        callee_name: String,
        args: Vec<Expr>,
    },
    Member(MemberExpr),
    Subscript {
        base: Box<Expr>,
        index: Box<Expr>,
    },
    InitList(Vec<Expr>),
    Construct {
        ty: Type,
        args: Vec<Expr>,
        list_init: bool,
    },
    FunctionalCast {
        dest: Type,
        sub: Box<Expr>,
        list_init: bool,
    },
    NamedCast {
        name: NamedCastName,
        dest: Type,
        kind: CastKind,
        sub: Box<Expr>,
    },
    CStyleCast {
        dest: Type,
        kind: CastKind,
        sub: Box<Expr>,
    },
    ImplicitCast {
        dest: Type,
        kind: CastKind,
        sub: Box<Expr>,
    },
    New(NewExpr),
    Delete {
        array_form: bool,
        arg: Box<Expr>,
    },
    UnaryTypeTrait {
        kind: TraitKind,
        arg: TypeOrExpr,
    },
    Typeid(TypeOrExpr),
    This,
    Lambda(Box<LambdaExpr>),
    StdInitializerList {
        ty: Type,
        sub: Box<Expr>,
    },
    MaterializeTemporary(Box<Expr>),
    BindTemporary(Box<Expr>),
    ExprWithCleanups(Box<Expr>),
    DefaultArg(Box<Expr>),
    DefaultInit(Box<Expr>),
    OpaqueValue(Box<Expr>),
    SubstTemplateParm(Box<Expr>),
    /// Per-element initializer loop for array copies; `common` is the shared
    /// source expression, `sub` the per-element initializer containing
    /// `ArrayInitIndex` placeholders.
    ArrayInitLoop {
        common: Box<Expr>,
        sub: Box<Expr>,
        size: u64,
    },
    ArrayInitIndex,
    Unsupported {
        kind: String,
    },
}

impl Expr {
    pub fn decl_ref(name: impl Into<String>) -> Self {
        Expr::DeclRef {
            name: name.into(),
            template_args: Vec::new(),
        }
    }

    pub fn int(value: i128, ty: Type) -> Self {
        Expr::IntegerLiteral { value, ty }
    }

    /// Strip implicit casts and transparent wrappers, mirroring what the
    /// tree looks like "as written".
    pub fn ignore_implicit(&self) -> &Expr {
        match self {
            Expr::ImplicitCast { sub, .. }
            | Expr::MaterializeTemporary(sub)
            | Expr::BindTemporary(sub)
            | Expr::ExprWithCleanups(sub)
            | Expr::OpaqueValue(sub)
            | Expr::SubstTemplateParm(sub) => sub.ignore_implicit(),
            other => other,
        }
    }

    /// Immediate children, used by recursive searches over the tree.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Predefined(sub)
            | Expr::Paren(sub)
            | Expr::Unary { operand: sub, .. }
            | Expr::ImplicitCast { sub, .. }
            | Expr::NamedCast { sub, .. }
            | Expr::CStyleCast { sub, .. }
            | Expr::FunctionalCast { sub, .. }
            | Expr::StdInitializerList { sub, .. }
            | Expr::MaterializeTemporary(sub)
            | Expr::BindTemporary(sub)
            | Expr::ExprWithCleanups(sub)
            | Expr::DefaultArg(sub)
            | Expr::DefaultInit(sub)
            | Expr::OpaqueValue(sub)
            | Expr::SubstTemplateParm(sub)
            | Expr::Delete { arg: sub, .. } => vec![sub],
            Expr::Conditional {
                cond,
                when_true,
                when_false,
            } => vec![cond, when_true, when_false],
            Expr::Binary { lhs, rhs, .. } => vec![lhs, rhs],
            Expr::Call(call) | Expr::MemberCall(call) => {
                let mut children: Vec<&Expr> = vec![&call.callee];
                children.extend(call.args.iter());
                children
            }
            Expr::UserDefinedLiteral { call, .. } => {
                let mut children: Vec<&Expr> = vec![&call.callee];
                children.extend(call.args.iter());
                children
            }
            Expr::OperatorCall { args, .. } => args.iter().collect(),
            Expr::Member(member) => vec![&member.base],
            Expr::Subscript { base, index } => vec![base, index],
            Expr::InitList(elements) => elements.iter().collect(),
            Expr::Construct { args, .. } => args.iter().collect(),
            Expr::New(new_expr) => {
                let mut children: Vec<&Expr> = new_expr.placement.iter().collect();
                if let Some(construct) = &new_expr.construct {
                    children.push(construct);
                }
                if let Some(size) = &new_expr.array_size {
                    children.push(size);
                }
                if let Some(init) = &new_expr.initializer {
                    children.push(init);
                }
                children
            }
            Expr::UnaryTypeTrait {
                arg: TypeOrExpr::Expr(sub),
                ..
            }
            | Expr::Typeid(TypeOrExpr::Expr(sub)) => vec![sub],
            Expr::ArrayInitLoop { common, sub, .. } => vec![common, sub],
            _ => Vec::new(),
        }
    }
}
