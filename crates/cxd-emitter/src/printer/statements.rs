//! Statement emission rules.
//!
//! Every rule here leaves the buffer at a statement boundary: the last thing
//! written is a `;` plus newline or a closed scope plus newline. Bodies of
//! control statements are always emitted as braced scopes, even when the
//! source had a single unbraced statement.

use cxd_ast::{Expr, IfStmt, RangeForStmt, Stmt, SwitchStmt, VarDecl};

use super::{LambdaCallerRole, Printer};

impl Printer {
    pub(super) fn emit_compound(&mut self, body: &[Stmt]) {
        self.out.open_scope();
        for stmt in body {
            self.emit_stmt(stmt);
        }
        self.out.close_scope();
        self.out.append_newline();
    }

    /// Emit a statement as a braced block regardless of its source form.
    fn emit_body_as_block(&mut self, body: &Stmt) {
        if let Stmt::Compound(stmts) = body {
            self.emit_compound(stmts);
        } else {
            self.out.open_scope();
            self.emit_stmt(body);
            self.out.close_scope();
            self.out.append_newline();
        }
    }

    pub(super) fn emit_if(&mut self, stmt: &IfStmt) {
        // An init-statement or condition-declaration is hoisted into a
        // synthetic scope wrapping the whole construct, else branch included.
        let hoisted = stmt.init.is_some() || stmt.cond_var.is_some();
        if hoisted {
            self.out.open_scope();
        }
        if let Some(init) = &stmt.init {
            self.emit_stmt(init);
        }
        if let Some(cond_var) = &stmt.cond_var {
            self.emit_var_decl(cond_var);
        }

        self.out.append(if stmt.is_constexpr {
            "if constexpr("
        } else {
            "if("
        });
        self.emit_expr(&stmt.cond);
        self.out.append(")");
        self.emit_body_as_block(&stmt.then_branch);

        if let Some(else_branch) = &stmt.else_branch {
            let else_kw = if stmt.is_constexpr {
                "else /*constexpr*/"
            } else {
                "else"
            };
            // `else if` chains stay flat instead of nesting a block per arm.
            if let Stmt::If(nested) = else_branch.as_ref() {
                self.out.append(else_kw);
                self.out.append(" ");
                self.emit_if(nested);
            } else {
                self.out.append_line(else_kw);
                self.emit_body_as_block(else_branch);
            }
        }

        if hoisted {
            self.out.close_scope();
            self.out.append_newline();
        }
    }

    pub(super) fn emit_switch(&mut self, stmt: &SwitchStmt) {
        let hoisted = stmt.init.is_some() || stmt.cond_var.is_some();
        if hoisted {
            self.out.open_scope();
        }
        if let Some(init) = &stmt.init {
            self.emit_stmt(init);
        }
        if let Some(cond_var) = &stmt.cond_var {
            self.emit_var_decl(cond_var);
        }

        self.out.append("switch(");
        self.emit_expr(&stmt.cond);
        self.out.append(")");
        self.emit_body_as_block(&stmt.body);

        if hoisted {
            self.out.close_scope();
            self.out.append_newline();
        }
    }

    pub(super) fn emit_case(&mut self, lhs: &Expr, body: &Stmt) {
        self.out.append("case ");
        self.emit_expr(lhs);
        self.out.append_line(":");
        self.emit_stmt(body);
    }

    pub(super) fn emit_default_case(&mut self, body: &Stmt) {
        self.out.append_line("default:");
        self.emit_stmt(body);
    }

    pub(super) fn emit_while(&mut self, cond: &Expr, body: &Stmt) {
        self.out.append("while(");
        self.emit_expr(cond);
        self.out.append(")");
        self.emit_body_as_block(body);
    }

    pub(super) fn emit_do_while(&mut self, body: &Stmt, cond: &Expr) {
        self.out.append("do");
        self.out.open_scope();
        if let Stmt::Compound(stmts) = body {
            for stmt in stmts {
                self.emit_stmt(stmt);
            }
        } else {
            self.emit_stmt(body);
        }
        self.out.close_scope();
        self.out.append(" while(");
        self.emit_expr(cond);
        self.out.append_line(");");
    }

    pub(super) fn emit_for(&mut self, stmt: &cxd_ast::ForStmt) {
        self.out.append("for(");
        match &stmt.init {
            Some(init) => self.emit_for_init(init),
            None => self.out.append(";"),
        }
        if let Some(cond) = &stmt.cond {
            self.out.append(" ");
            self.emit_expr(cond);
        }
        self.out.append(";");
        if let Some(inc) = &stmt.inc {
            self.out.append(" ");
            self.emit_expr(inc);
        }
        self.out.append(")");
        self.emit_body_as_block(&stmt.body);
    }

    /// The init-statement of a classic `for`, rendered inline inside the
    /// header: no newline after the terminating `;`.
    fn emit_for_init(&mut self, init: &Stmt) {
        match init {
            Stmt::Decl(decls) => {
                for (index, decl) in decls.iter().enumerate() {
                    if index > 0 {
                        self.out.append(", ");
                    }
                    if let cxd_ast::Decl::Var(var) = decl {
                        self.emit_var_decl_inline(var);
                    } else {
                        self.not_supported("for-init declaration");
                    }
                }
                self.out.append(";");
            }
            Stmt::Expr(expr) => {
                self.emit_expr(expr);
                self.out.append(";");
            }
            Stmt::Null => self.out.append(";"),
            other => {
                self.emit_stmt(other);
            }
        }
    }

    /// Range-based iteration expands into its compiler-synthesized form: an
    /// outer scope declaring the range, begin, and end variables, a blank
    /// separator line, then the rewritten three-part loop declaring the
    /// original loop variable at the top of its body.
    pub(super) fn emit_range_for(&mut self, stmt: &RangeForStmt) {
        self.out.open_scope();
        self.emit_var_decl(&stmt.range_decl);
        self.emit_var_decl(&stmt.begin_decl);
        self.emit_var_decl(&stmt.end_decl);
        self.out.append_newline();

        self.out.append("for( ; ");
        self.emit_expr(&stmt.cond);
        self.out.append("; ");
        self.emit_expr(&stmt.inc);
        self.out.append(")");

        self.out.open_scope();
        self.emit_var_decl(&stmt.loop_var);
        if let Stmt::Compound(stmts) = stmt.body.as_ref() {
            for inner in stmts {
                self.emit_stmt(inner);
            }
        } else {
            self.emit_stmt(&stmt.body);
        }
        self.out.close_scope();
        self.out.append_newline();

        self.out.close_scope();
        self.out.append_newline();
    }

    pub(super) fn emit_return(&mut self, value: Option<&Expr>) {
        let Some(value) = value else {
            self.out.append_line("return;");
            return;
        };
        // The return value is a lambda anchoring role: closure classes inside
        // it are hoisted in front of the whole return statement.
        self.with_lambda_scope(LambdaCallerRole::Return, |printer| {
            printer.out.append("return ");
            printer.emit_expr(value);
        });
        self.out.append_line(";");
    }

    /// A variable declaration rendered without its statement terminator, for
    /// `for`-header init positions.
    pub(super) fn emit_var_decl_inline(&mut self, var: &VarDecl) {
        self.emit_var_decl_prefix(var);
        if let Some(init) = &var.init {
            self.out.append(" = ");
            self.emit_expr(init);
        }
    }
}
