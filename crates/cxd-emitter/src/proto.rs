//! Signature rendering for functions and methods.
//!
//! Declaration bodies go through the regular statement rules; the signature
//! in front of them is formatted here so function declarations, class
//! methods, and synthesized closure members all spell qualifiers, return
//! types, and parameter lists the same way.

use cxd_ast::types::display::{type_name, type_name_as_parameter};
use cxd_ast::{FunctionDecl, MethodDecl, MethodKind, ParamDecl, Qualifiers};

use crate::writer::OutputBuffer;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SkipConstexpr {
    Yes,
    No,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SkipAccess {
    Yes,
    No,
}

/// Render a free function's prototype up to (and including) the closing
/// parenthesis of its parameter list.
pub fn function_prototype(out: &mut OutputBuffer, decl: &FunctionDecl) {
    append_qualifiers(out, decl.qualifiers, SkipConstexpr::No);
    out.append(&type_name(&decl.ret));
    out.append(" ");
    out.append(&decl.name);
    out.append("(");
    append_parameter_list(out, &decl.params);
    out.append(")");
}

/// Render a method signature: access specifier, qualifiers, return type,
/// name, and parameter list. Conversion operators introduce a `using
/// retType` alias first because their deduced return type is not always
/// spellable in operator position.
pub fn method_signature(
    out: &mut OutputBuffer,
    decl: &MethodDecl,
    skip_constexpr: SkipConstexpr,
    skip_access: SkipAccess,
) {
    if skip_access == SkipAccess::No {
        out.append(decl.access.spelling());
        out.append(": ");
    }

    if decl.kind == MethodKind::Conversion {
        out.append("using retType = ");
        out.append(&type_name(decl.ret.desugared()));
        out.append_line(";");
    }

    append_qualifiers(out, decl.qualifiers, skip_constexpr);

    match decl.kind {
        MethodKind::Constructor | MethodKind::Destructor => {}
        MethodKind::Conversion => {
            out.append("operator retType (");
        }
        MethodKind::Other => {
            out.append(&type_name(decl.ret.desugared()));
            out.append(" ");
        }
    }

    if decl.kind != MethodKind::Conversion {
        out.append(&decl.name);
        out.append("(");
    }

    append_parameter_list(out, &decl.params);
    out.append(")");

    if decl.qualifiers.contains(Qualifiers::CONST) {
        out.append(" const");
    }
    if decl.qualifiers.contains(Qualifiers::NOEXCEPT) {
        out.append(" noexcept");
    }
}

/// Parameters with names, `type name` per element.
pub fn append_parameter_list(out: &mut OutputBuffer, params: &[ParamDecl]) {
    for (index, param) in params.iter().enumerate() {
        if index > 0 {
            out.append(", ");
        }
        if param.name.is_empty() {
            out.append(&type_name(&param.ty));
        } else {
            out.append(&type_name_as_parameter(&param.ty, &param.name));
        }
    }
}

fn append_qualifiers(out: &mut OutputBuffer, qualifiers: Qualifiers, skip_constexpr: SkipConstexpr) {
    if qualifiers.contains(Qualifiers::INLINE) {
        out.append("inline ");
    }
    if qualifiers.contains(Qualifiers::STATIC) {
        out.append("static ");
    }
    if qualifiers.contains(Qualifiers::VIRTUAL) {
        out.append("virtual ");
    }
    if qualifiers.contains(Qualifiers::VOLATILE) {
        out.append("volatile ");
    }
    if qualifiers.contains(Qualifiers::CONSTEXPR) {
        if skip_constexpr == SkipConstexpr::Yes {
            out.append("/*constexpr*/ ");
        } else {
            out.append("constexpr ");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::EmitterOptions;
    use cxd_ast::{Access, BuiltinKind, Type};

    #[test]
    fn free_function_prototype() {
        let decl = FunctionDecl {
            name: "max".into(),
            ret: Type::Builtin(BuiltinKind::Int),
            params: vec![
                ParamDecl::new("a", Type::Builtin(BuiltinKind::Int)),
                ParamDecl::new("b", Type::Builtin(BuiltinKind::Int)),
            ],
            qualifiers: Qualifiers::empty(),
            body: None,
        };

        let mut out = OutputBuffer::new(EmitterOptions::default());
        function_prototype(&mut out, &decl);
        assert_eq!(out.into_string(), "int max(int a, int b)");
    }

    #[test]
    fn const_method_signature() {
        let mut decl = MethodDecl::plain("size", Type::Builtin(BuiltinKind::Int));
        decl.access = Access::Public;
        decl.qualifiers = Qualifiers::CONST;

        let mut out = OutputBuffer::new(EmitterOptions::default());
        method_signature(&mut out, &decl, SkipConstexpr::No, SkipAccess::No);
        assert_eq!(out.into_string(), "public: int size() const");
    }

    #[test]
    fn conversion_operator_uses_ret_type_alias() {
        let mut decl = MethodDecl::plain("", Type::Builtin(BuiltinKind::Bool));
        decl.kind = MethodKind::Conversion;

        let mut out = OutputBuffer::new(EmitterOptions::default());
        method_signature(&mut out, &decl, SkipConstexpr::No, SkipAccess::Yes);
        let text = out.into_string();
        assert!(text.starts_with("using retType = bool;\n"));
        assert!(text.contains("operator retType ()"));
    }
}
