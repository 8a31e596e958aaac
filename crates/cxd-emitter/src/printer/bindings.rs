//! Structured-binding expansion.
//!
//! A decomposition declaration becomes a uniquely named temporary holding
//! the whole decomposed value plus one named variable per binding. Tuple-
//! like bindings re-emit their holding-variable initializer with references
//! to the decomposed value redirected at the temporary; array bindings
//! subscript the temporary directly.

use cxd_ast::types::display::{type_name, type_name_as_parameter};
use cxd_ast::{BindingPath, DecompositionDecl, Expr};

use super::Printer;

/// First declaration reference reachable from an initializer, depth-first.
/// An array-init loop is entered through its common source expression.
fn find_decl_ref(expr: &Expr) -> Option<&str> {
    match expr {
        Expr::DeclRef { name, .. } => return Some(name),
        Expr::ArrayInitLoop { common, .. } => {
            if let Expr::DeclRef { name, .. } = common.ignore_implicit() {
                return Some(name);
            }
        }
        _ => {}
    }

    expr.children().into_iter().find_map(find_decl_ref)
}

impl Printer {
    #[tracing::instrument(level = "debug", skip_all, fields(location = %decl.location))]
    pub(super) fn emit_decomposition(&mut self, decl: &DecompositionDecl) {
        let Some(found) = find_decl_ref(&decl.init) else {
            self.structural_error("unknown decl", decl.location);
            return;
        };
        // Operator call spellings make poor identifiers; collapse them.
        let base_name = if found.contains("operator") {
            "operator"
        } else {
            found
        };

        let location = decl.location.is_valid().then_some(decl.location);
        let temp_name = self.names.internal_var_name(base_name, location);
        tracing::trace!(%temp_name, bindings = decl.bindings.len(), "decomposition temporary");

        self.out
            .append(&type_name_as_parameter(&decl.ty, &temp_name));
        self.out.append(" = ");
        self.emit_expr(&decl.init);
        self.out.append_line(";");

        let is_ref_to_object = decl.ty.is_lvalue_reference();

        for binding in &decl.bindings {
            let Some(path) = &binding.path else {
                self.not_supported("unresolved binding");
                self.out.append_newline();
                continue;
            };

            // `&` preserves reference semantics where the bound element is
            // not a temporary: array elements of a referenced array, and
            // holding expressions without a cleanup wrapper.
            let needs_addr_of = match path {
                BindingPath::ArraySubscript { .. } => is_ref_to_object,
                BindingPath::HoldingVar { init } => {
                    !matches!(init, Expr::ExprWithCleanups(_))
                }
                BindingPath::Member(expr) => !matches!(expr, Expr::ExprWithCleanups(_)),
            };

            self.out.append(&type_name(&binding.ty));
            if needs_addr_of {
                self.out.append("&");
            }
            self.out.append(" ");
            self.out.append(&binding.name);
            self.out.append(" = ");

            match path {
                BindingPath::HoldingVar { init } => {
                    self.emit_with_binding_temp(init, &temp_name);
                }
                BindingPath::Member(expr) => {
                    self.emit_with_binding_temp(expr, &temp_name);
                }
                BindingPath::ArraySubscript { index } => {
                    self.out.append(&temp_name);
                    self.out.append("[");
                    self.emit_expr(index);
                    self.out.append("]");
                }
            }

            self.out.append_line(";");
        }
    }

    /// Emit an expression with unresolvable declaration references rewritten
    /// to the decomposition temporary.
    fn emit_with_binding_temp(&mut self, expr: &Expr, temp_name: &str) {
        let previous = self.binding_temp.replace(temp_name.to_string());
        self.emit_expr(expr);
        self.binding_temp = previous;
    }
}
