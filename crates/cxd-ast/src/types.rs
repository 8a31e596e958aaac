//! The type representation attached to expressions and declarations.
//!
//! Types keep their sugar: `auto` stays `auto` with its deduction attached
//! and alias names stay alias names. Emission rules that need the canonical
//! spelling call [`Type::desugared`] explicitly; everything else renders the
//! sugared form so the output reads like the source did.

/// Builtin (fundamental) types, one variant per distinct kind the emitter
/// must tell apart for literal suffixes and spelling.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinKind {
    Bool,
    CharU,
    UChar,
    Char16,
    Char32,
    UShort,
    UInt,
    ULong,
    ULongLong,
    UInt128,
    CharS,
    SChar,
    Short,
    Int,
    Long,
    LongLong,
    Int128,
    Float,
    Double,
    LongDouble,
    WCharS,
    WCharU,
    Void,
}

impl BuiltinKind {
    pub fn spelling(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::CharU | Self::CharS => "char",
            Self::UChar => "unsigned char",
            Self::Char16 => "char16_t",
            Self::Char32 => "char32_t",
            Self::UShort => "unsigned short",
            Self::UInt => "unsigned int",
            Self::ULong => "unsigned long",
            Self::ULongLong => "unsigned long long",
            Self::UInt128 => "unsigned __int128",
            Self::SChar => "signed char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::LongLong => "long long",
            Self::Int128 => "__int128",
            Self::Float => "float",
            Self::Double => "double",
            Self::LongDouble => "long double",
            Self::WCharS | Self::WCharU => "wchar_t",
            Self::Void => "void",
        }
    }

    pub fn is_signed_integer(self) -> bool {
        matches!(
            self,
            Self::CharS | Self::SChar | Self::Short | Self::Int | Self::Long | Self::LongLong | Self::Int128
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Type {
    Builtin(BuiltinKind),
    /// A class or struct type, by name.
    Record { name: String, is_class: bool },
    /// Any other named type (enums, template-ids, dependent names). The name
    /// is the printable spelling.
    Named(String),
    Pointer(Box<Type>),
    LValueReference(Box<Type>),
    RValueReference(Box<Type>),
    Array {
        element: Box<Type>,
        size: Option<u64>,
    },
    FunctionPointer {
        ret: Box<Type>,
        params: Vec<Type>,
    },
    /// `auto` as written, with the deduced type when deduction happened.
    Auto(Option<Box<Type>>),
    /// A type alias as written, with its underlying type.
    Alias {
        name: String,
        underlying: Box<Type>,
    },
    Qualified {
        is_const: bool,
        is_volatile: bool,
        inner: Box<Type>,
    },
}

impl Type {
    pub fn record(name: impl Into<String>) -> Self {
        Type::Record {
            name: name.into(),
            is_class: true,
        }
    }

    pub fn const_of(inner: Type) -> Self {
        Type::Qualified {
            is_const: true,
            is_volatile: false,
            inner: Box::new(inner),
        }
    }

    /// Strip sugar (`auto`, alias names, top-level qualifier nesting of
    /// sugar) down to the canonical type. Qualifiers and declarators are
    /// preserved; only naming sugar is resolved.
    pub fn desugared(&self) -> &Type {
        match self {
            Type::Auto(Some(deduced)) => deduced.desugared(),
            Type::Alias { underlying, .. } => underlying.desugared(),
            other => other,
        }
    }

    /// Strip top-level cv-qualifiers.
    pub fn unqualified(&self) -> &Type {
        match self {
            Type::Qualified { inner, .. } => inner.unqualified(),
            other => other,
        }
    }

    pub fn is_lvalue_reference(&self) -> bool {
        matches!(self.desugared(), Type::LValueReference(_))
    }

    pub fn is_reference(&self) -> bool {
        matches!(
            self.desugared(),
            Type::LValueReference(_) | Type::RValueReference(_)
        )
    }

    pub fn is_array(&self) -> bool {
        matches!(self.desugared().unqualified(), Type::Array { .. })
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self.desugared().unqualified(), Type::Pointer(_))
    }

    pub fn is_record(&self) -> bool {
        matches!(self.desugared().unqualified(), Type::Record { .. })
    }

    pub fn is_function_pointer(&self) -> bool {
        matches!(self.desugared().unqualified(), Type::FunctionPointer { .. })
    }

    pub fn builtin_kind(&self) -> Option<BuiltinKind> {
        match self.desugared().unqualified() {
            Type::Builtin(kind) => Some(*kind),
            _ => None,
        }
    }

    /// The record name behind this type, through sugar and qualifiers.
    pub fn record_name(&self) -> Option<&str> {
        match self.desugared().unqualified() {
            Type::Record { name, .. } => Some(name),
            _ => None,
        }
    }
}

pub mod display {
    //! Printable spellings for types. This is the "type name" collaborator
    //! the emitter consults; it has no emission state of its own.

    use super::Type;

    /// The plain spelling of a type, qualifiers included.
    pub fn type_name(ty: &Type) -> String {
        match ty {
            Type::Builtin(kind) => kind.spelling().to_string(),
            Type::Record { name, .. } | Type::Named(name) => name.clone(),
            Type::Pointer(inner) => format!("{} *", type_name(inner)),
            Type::LValueReference(inner) => format!("{} &", type_name(inner)),
            Type::RValueReference(inner) => format!("{} &&", type_name(inner)),
            Type::Array { element, size } => match size {
                Some(size) => format!("{}[{}]", type_name(element), size),
                None => format!("{}[]", type_name(element)),
            },
            Type::FunctionPointer { ret, params } => {
                format!("{} (*)({})", type_name(ret), param_list(params))
            }
            Type::Auto(_) => "auto".to_string(),
            Type::Alias { name, .. } => name.clone(),
            Type::Qualified {
                is_const,
                is_volatile,
                inner,
            } => {
                let mut text = String::new();
                if *is_const {
                    text.push_str("const ");
                }
                if *is_volatile {
                    text.push_str("volatile ");
                }
                text.push_str(&type_name(inner));
                text
            }
        }
    }

    /// Spelling without top-level cv-qualifiers.
    pub fn type_name_unqualified(ty: &Type) -> String {
        type_name(ty.unqualified())
    }

    /// The spelling of a type with a declarator name in the right position:
    /// arrays and function pointers wrap the name, everything else prefixes
    /// it.
    pub fn type_name_as_parameter(ty: &Type, name: &str) -> String {
        match ty {
            Type::Array { element, size } => match size {
                Some(size) => format!("{} {}[{}]", type_name(element), name, size),
                None => format!("{} {}[]", type_name(element), name),
            },
            Type::LValueReference(inner) if inner.is_array() => {
                reference_to_array(inner, name, "&")
            }
            Type::RValueReference(inner) if inner.is_array() => {
                reference_to_array(inner, name, "&&")
            }
            Type::FunctionPointer { ret, params } => {
                format!("{} (*{})({})", type_name(ret), name, param_list(params))
            }
            Type::Qualified { .. } | Type::Auto(_) | Type::Alias { .. } => {
                match ty.desugared().unqualified() {
                    inner @ (Type::Array { .. } | Type::FunctionPointer { .. }) => {
                        type_name_as_parameter(inner, name)
                    }
                    _ => format!("{} {}", type_name(ty), name),
                }
            }
            _ => format!("{} {}", type_name(ty), name),
        }
    }

    fn reference_to_array(array: &Type, name: &str, amp: &str) -> String {
        match array.desugared().unqualified() {
            Type::Array { element, size } => match size {
                Some(size) => format!("{} ({}{})[{}]", type_name(element), amp, name, size),
                None => format!("{} ({}{})[]", type_name(element), amp, name),
            },
            other => format!("{} {}{}", type_name(other), amp, name),
        }
    }

    fn param_list(params: &[Type]) -> String {
        params
            .iter()
            .map(type_name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::display::{type_name, type_name_as_parameter};
    use super::*;

    #[test]
    fn auto_keeps_its_spelling() {
        let deduced = Type::Auto(Some(Box::new(Type::Builtin(BuiltinKind::Int))));
        assert_eq!(type_name(&deduced), "auto");
        assert_eq!(type_name(deduced.desugared()), "int");
    }

    #[test]
    fn reference_to_array_declarator() {
        let ty = Type::LValueReference(Box::new(Type::Array {
            element: Box::new(Type::Builtin(BuiltinKind::Int)),
            size: Some(3),
        }));
        assert_eq!(type_name_as_parameter(&ty, "arr"), "int (&arr)[3]");
    }

    #[test]
    fn alias_desugars_to_underlying() {
        let ty = Type::Alias {
            name: "Meters".into(),
            underlying: Box::new(Type::Builtin(BuiltinKind::Double)),
        };
        assert_eq!(type_name(&ty), "Meters");
        assert_eq!(type_name(ty.desugared()), "double");
    }

    #[test]
    fn function_pointer_declarator() {
        let ty = Type::FunctionPointer {
            ret: Box::new(Type::Builtin(BuiltinKind::Void)),
            params: vec![Type::Builtin(BuiltinKind::Int)],
        };
        assert_eq!(type_name(&ty), "void (*)(int)");
        assert_eq!(type_name_as_parameter(&ty, "fp"), "void (*fp)(int)");
    }
}
