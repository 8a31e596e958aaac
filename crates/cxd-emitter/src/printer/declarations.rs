//! Declaration emission rules.

use cxd_ast::types::display::{type_name, type_name_as_parameter, type_name_unqualified};
use cxd_ast::{
    Expr, FieldDecl, FunctionDecl, MethodDecl, MethodKind, RecordDecl, StorageClass, Type,
    UsingDecl, VarDecl,
};

use crate::proto::{self, SkipAccess, SkipConstexpr};

use super::{LambdaCallerRole, Printer};

impl Printer {
    pub(super) fn emit_var_decl(&mut self, var: &VarDecl) {
        if var.has_non_trivial_static_init {
            self.emit_guarded_static_init(var);
            return;
        }

        if var.is_nrvo {
            self.out.append_line("/* NRVO variable */");
        }

        // The initializer is a lambda anchoring role; closure classes inside
        // it land in front of the whole declaration statement.
        self.with_lambda_scope(LambdaCallerRole::VarDecl, |printer| {
            printer.emit_var_decl_prefix(var);
            if let Some(init) = &var.init {
                printer.out.append(" = ");
                printer.emit_expr(init);
            }
        });
        self.out.append_line(";");
    }

    /// Qualifiers, type, and name of a variable declaration, without the
    /// initializer or terminator. Function-pointer variables get a `using`
    /// alias first so the declarator stays readable.
    pub(super) fn emit_var_decl_prefix(&mut self, var: &VarDecl) {
        if var.is_inline {
            self.out.append("inline ");
        }
        match var.storage {
            StorageClass::Static => self.out.append("static "),
            StorageClass::Extern => self.out.append("extern "),
            StorageClass::None => {}
        }
        if var.is_constexpr {
            self.out.append("constexpr ");
        }

        if let fn_ptr @ Type::FunctionPointer { .. } = var.ty.desugared().unqualified()
            && var.location.is_valid()
        {
            let alias = format!("FuncPtr_{}", var.location.line);
            self.out.append("using ");
            self.out.append(&alias);
            self.out.append(" = ");
            self.out.append(&type_name(fn_ptr));
            self.out.append_line(";");
            self.out.append(&alias);
            self.out.append(" ");
            self.out.append(&var.name);
            return;
        }

        self.out.append(&type_name_as_parameter(&var.ty, &var.name));
    }

    /// A function-local static of class type with a non-trivial constructor:
    /// the declaration becomes the double-checked guard the compiler
    /// generates, written out as a flag, a raw byte buffer, and a
    /// placement-construct on first pass.
    fn emit_guarded_static_init(&mut self, var: &VarDecl) {
        let buffer_name = self.names.internal_var_name(&var.name, Some(var.location));
        let guard_name = format!("{buffer_name}B");
        let ty_text = type_name_unqualified(var.ty.desugared());
        tracing::trace!(name = %var.name, buffer = %buffer_name, "guarded static init");

        self.out.append("static bool ");
        self.out.append(&guard_name);
        self.out.append_line(";");
        self.out.append("static char ");
        self.out.append(&buffer_name);
        self.out.append("[sizeof(");
        self.out.append(&ty_text);
        self.out.append_line(")];");
        self.out.append_newline();

        self.out.append("if( ! ");
        self.out.append(&guard_name);
        self.out.append(" )");
        self.out.open_scope();

        self.out.append("new (&");
        self.out.append(&buffer_name);
        self.out.append(") ");
        match &var.init {
            Some(init) => self.emit_expr(init),
            None => self.out.append(&ty_text),
        }
        self.out.append_line(";");
        self.out.append(&guard_name);
        self.out.append_line(" = true;");

        self.out.close_scope();
        self.out.append_newline();
    }

    pub(super) fn emit_function(&mut self, decl: &FunctionDecl) {
        proto::function_prototype(&mut self.out, decl);
        match &decl.body {
            Some(body) => {
                self.emit_stmt(body);
            }
            None => self.out.append_line(";"),
        }
        self.out.append_newline();
    }

    pub(super) fn emit_method(&mut self, decl: &MethodDecl) {
        self.emit_method_with(decl, SkipConstexpr::No, SkipAccess::No);
    }

    /// Shared by record members and closure-class synthesis, which renders
    /// undeduced members with their `constexpr` commented out.
    pub(super) fn emit_method_with(
        &mut self,
        decl: &MethodDecl,
        skip_constexpr: SkipConstexpr,
        skip_access: SkipAccess,
    ) {
        proto::method_signature(&mut self.out, decl, skip_constexpr, skip_access);

        if decl.is_deleted {
            self.out.append_line(" = delete;");
            return;
        }
        if decl.is_defaulted {
            self.out.append_line(" = default;");
            return;
        }

        if !decl.ctor_inits.is_empty() && decl.kind == MethodKind::Constructor {
            self.out.append_newline();
            self.out.append(": ");
            for (index, init) in decl.ctor_inits.iter().enumerate() {
                if index > 0 {
                    self.out.append(", ");
                }
                if let Some(member) = &init.member {
                    self.out.append(member);
                    self.wrap_in_curlys(|printer| printer.emit_expr(&init.init));
                } else {
                    self.emit_expr(&init.init);
                }
            }
        }

        match &decl.body {
            Some(body) => {
                self.emit_stmt(body);
            }
            None => self.out.append_line(";"),
        }
    }

    pub(super) fn emit_record(&mut self, decl: &RecordDecl) {
        self.out.append(if decl.is_class { "class " } else { "struct " });
        self.out.append(&decl.name);
        if let Some(args) = &decl.template_args {
            self.emit_template_args(args);
        }

        for (index, base) in decl.bases.iter().enumerate() {
            self.out.append(if index == 0 { " : " } else { ", " });
            self.out.append(base.access.spelling());
            self.out.append(" ");
            self.out.append(&type_name(&base.ty));
        }

        self.out.open_scope();
        for member in &decl.decls {
            self.emit_decl(member);
        }
        self.out.close_scope_with_semi();
        self.out.append_newline();
        self.out.append_newline();
    }

    pub(super) fn emit_field(&mut self, decl: &FieldDecl) {
        self.out.append(&type_name_as_parameter(&decl.ty, &decl.name));
        self.out.append_line(";");
    }

    pub(super) fn emit_type_alias(&mut self, name: &str, underlying: &Type) {
        self.out.append("using ");
        self.out.append(name);
        self.out.append(" = ");
        self.out.append(&type_name(underlying));
        self.out.append_line(";");
    }

    pub(super) fn emit_using(&mut self, decl: &UsingDecl) {
        self.out.append("using ");
        for component in &decl.scope {
            self.out.append(component);
            self.out.append("::");
        }
        self.out.append(&decl.name);
        self.out.append_line(";");
    }

    /// static_assert is already evaluated by sema; the output records the
    /// verdict as a comment instead of re-asserting.
    pub(super) fn emit_static_assert(
        &mut self,
        condition: &Expr,
        message: Option<&Expr>,
        failed: bool,
    ) {
        self.out
            .append(if failed { "/* FAILED: " } else { "/* PASSED: " });
        self.out.append("static_assert(");
        self.emit_expr(condition);
        if let Some(message) = message {
            self.out.append(", ");
            self.emit_expr(message);
        }
        self.out.append_line("); */");
    }
}
