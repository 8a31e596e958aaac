//! Expression emission rules.
//!
//! None of these terminate a statement; the enclosing statement rule owns
//! the `;`. Call, member-call, operator-call, and binary-operator rules push
//! a lambda context frame because their operands may contain lambda
//! expressions that must be hoisted above the full expression.

use cxd_ast::types::display::{type_name, type_name_unqualified};
use cxd_ast::{
    BinOp, CallExpr, Expr, MemberExpr, NewExpr, TemplateArg, TraitKind, Type, TypeOrExpr, UnOp,
};
use cxd_common::SourceLoc;

use super::{LambdaCallerRole, Printer};

impl Printer {
    pub(super) fn emit_decl_ref(&mut self, name: &str, template_args: &[TemplateArg]) {
        self.out.append(name);
        // During structured-binding expansion an unqualified or
        // scope-qualified reference resolves to the synthesized temporary.
        if let Some(temp) = &self.binding_temp
            && (name.is_empty() || name.ends_with("::"))
        {
            let temp = temp.clone();
            self.out.append(&temp);
        }
        if !template_args.is_empty() {
            self.emit_template_args(template_args);
        }
    }

    pub(super) fn emit_conditional(&mut self, cond: &Expr, when_true: &Expr, when_false: &Expr) {
        self.emit_expr(cond);
        self.out.append(" ? ");
        self.emit_expr(when_true);
        self.out.append(" : ");
        self.emit_expr(when_false);
    }

    pub(super) fn emit_binary(&mut self, op: BinOp, lhs: &Expr, rhs: &Expr) {
        self.with_lambda_scope(LambdaCallerRole::BinaryOperator, |printer| {
            printer.emit_expr(lhs);
            if op == BinOp::Comma {
                printer.out.append(", ");
            } else {
                printer.out.append(" ");
                printer.out.append(op.spelling());
                printer.out.append(" ");
            }
            printer.emit_expr(rhs);
        });
    }

    pub(super) fn emit_unary(&mut self, op: UnOp, operand: &Expr) {
        if op.is_postfix() {
            self.emit_expr(operand);
            self.out.append(op.spelling());
        } else {
            self.out.append(op.spelling());
            self.emit_expr(operand);
        }
    }

    pub(super) fn emit_call(&mut self, call: &CallExpr) {
        self.with_lambda_scope(LambdaCallerRole::Call, |printer| {
            printer.emit_expr(&call.callee);
            printer.wrap_in_parens(|printer| printer.emit_comma_separated(&call.args));
        });
    }

    /// A user-defined literal call. A single character-pack template argument
    /// renders as quoted characters (`operator""_x<'1', '2'>()`); anything
    /// else renders as ordinary template arguments.
    pub(super) fn emit_user_defined_literal(&mut self, call: &CallExpr, template_args: &[TemplateArg]) {
        self.with_lambda_scope(LambdaCallerRole::Call, |printer| {
            printer.emit_expr(&call.callee);
            match template_args {
                [TemplateArg::Pack(elements)] => {
                    printer.out.append("<");
                    for (index, element) in elements.iter().enumerate() {
                        if index > 0 {
                            printer.out.append(", ");
                        }
                        if let TemplateArg::Integral(value) = element
                            && let Some(c) = u32::try_from(*value).ok().and_then(char::from_u32)
                        {
                            printer.out.append("'");
                            printer.out.append(&c.to_string());
                            printer.out.append("'");
                        } else {
                            printer.emit_template_arg(element);
                        }
                    }
                    printer.out.append(">");
                }
                [] => {}
                args => printer.emit_template_args(args),
            }
            printer.wrap_in_parens(|printer| printer.emit_comma_separated(&call.args));
        });
    }

    pub(super) fn emit_member_call(&mut self, call: &CallExpr) {
        self.with_lambda_scope(LambdaCallerRole::MemberCall, |printer| {
            printer.emit_expr(&call.callee);
            printer.wrap_in_parens(|printer| printer.emit_comma_separated(&call.args));
        });
    }

    /// An overloaded operator call in its desugared spelling: member
    /// operators become `lhs.operator@(args...)`, free operators become
    /// `operator@(lhs, args...)`.
    pub(super) fn emit_operator_call(
        &mut self,
        op_spelling: &str,
        is_member: bool,
        callee_name: &str,
        args: &[Expr],
    ) {
        self.with_lambda_scope(LambdaCallerRole::OperatorCall, |printer| {
            let Some((first, rest)) = args.split_first() else {
                return;
            };
            if is_member {
                printer.emit_operand_with_parens_if_needed(first);
                printer.out.append(".operator");
                printer.out.append(op_spelling);
                printer.out.append("(");
                printer.emit_comma_separated(rest);
            } else {
                printer.out.append(callee_name);
                printer.out.append("(");
                printer.emit_operand_with_parens_if_needed(first);
                for arg in rest {
                    printer.out.append(", ");
                    printer.emit_expr(arg);
                }
            }
            printer.out.append(")");
        });
    }

    /// A dereference used as an operator operand needs its own parentheses
    /// to survive the rewrite into method-call syntax.
    fn emit_operand_with_parens_if_needed(&mut self, operand: &Expr) {
        let needs_parens = matches!(
            operand.ignore_implicit(),
            Expr::Unary {
                op: UnOp::Deref,
                ..
            }
        );
        if needs_parens {
            self.wrap_in_parens(|printer| printer.emit_expr(operand));
        } else {
            self.emit_expr(operand);
        }
    }

    pub(super) fn emit_member(&mut self, member: &MemberExpr) {
        self.emit_expr(&member.base);
        self.out.append(if member.is_arrow { "->" } else { "." });

        // The conversion operator of a closure class has no spellable name;
        // it renders through the class's `retType` alias.
        if let Some(class) = &member.lambda_conversion_class {
            self.out.append("operator ");
            self.out.append(class);
            self.out.append("::retType");
            return;
        }

        self.out.append(&member.name);
        if !member.template_args.is_empty() {
            self.emit_template_args(&member.template_args);
        }
    }

    pub(super) fn emit_init_list(&mut self, elements: &[Expr]) {
        self.wrap_in_curlys(|printer| printer.emit_comma_separated(elements));
    }

    pub(super) fn emit_construct(&mut self, ty: &Type, args: &[Expr], list_init: bool) {
        self.out.append(&type_name_unqualified(ty.desugared()));
        if list_init {
            self.wrap_in_curlys(|printer| printer.emit_comma_separated(args));
        } else {
            self.wrap_in_parens(|printer| printer.emit_comma_separated(args));
        }
    }

    pub(super) fn emit_functional_cast(&mut self, dest: &Type, sub: &Expr, list_init: bool) {
        let inner = sub.ignore_implicit();
        let is_construct = matches!(inner, Expr::Construct { .. });
        let is_std_list = matches!(inner, Expr::StdInitializerList { .. });
        // A construct-expression spells the type itself; writing it here
        // again would double it.
        if !is_construct && !is_std_list {
            self.out.append(&type_name(dest));
        }
        let needs_parens = !is_construct && !is_std_list && !list_init;
        if needs_parens {
            self.wrap_in_parens(|printer| printer.emit_expr(sub));
        } else {
            self.emit_expr(sub);
        }
    }

    pub(super) fn emit_std_initializer_list(&mut self, ty: &Type, sub: &Expr) {
        // cv-qualifiers are not writable in this position.
        self.out.append(&type_name_unqualified(ty));
        self.emit_expr(sub);
    }

    pub(super) fn emit_new(&mut self, new_expr: &NewExpr) {
        self.out.append("new ");

        if !new_expr.placement.is_empty() {
            self.wrap_in_parens(|printer| printer.emit_comma_separated(&new_expr.placement));
            self.out.append(" ");
        }

        if let Some(construct) = &new_expr.construct {
            self.emit_expr(construct);
            return;
        }

        self.out.append(&type_name(&new_expr.allocated_type));

        if new_expr.is_array {
            let Some(size) = &new_expr.array_size else {
                self.structural_error("array new without a readable size", SourceLoc::default());
                return;
            };
            self.out.append("[");
            self.emit_expr(size);
            self.out.append("]");
        }

        if let Some(initializer) = &new_expr.initializer {
            if matches!(initializer.ignore_implicit(), Expr::InitList(_)) {
                self.emit_expr(initializer);
            } else {
                self.wrap_in_curlys(|printer| printer.emit_expr(initializer));
            }
        }
    }

    pub(super) fn emit_delete(&mut self, array_form: bool, arg: &Expr) {
        self.out.append("delete");
        if array_form {
            self.out.append("[]");
        }
        self.out.append(" ");
        self.emit_expr(arg);
    }

    pub(super) fn emit_unary_type_trait(&mut self, kind: TraitKind, arg: &TypeOrExpr) {
        self.out.append(kind.spelling());
        match arg {
            TypeOrExpr::Type(ty) => {
                self.out.append("(");
                self.out.append(&type_name(ty));
                self.out.append(")");
            }
            TypeOrExpr::Expr(expr) => self.emit_expr(expr),
        }
    }

    pub(super) fn emit_typeid(&mut self, arg: &TypeOrExpr) {
        self.out.append("typeid");
        self.wrap_in_parens(|printer| match arg {
            TypeOrExpr::Type(ty) => printer.out.append(&type_name(ty)),
            TypeOrExpr::Expr(expr) => printer.emit_expr(expr),
        });
    }

    /// A per-element array copy: one rendering of the element initializer
    /// per index, with the current index supplied to `ArrayInitIndex` nodes
    /// inside it.
    pub(super) fn emit_array_init_loop(&mut self, sub: &Expr, size: u64) {
        self.wrap_in_curlys(|printer| {
            for index in 0..size {
                if index > 0 {
                    printer.out.append(", ");
                }
                printer.array_init_index.push(index);
                printer.emit_expr(sub);
                printer.array_init_index.pop();
            }
        });
    }

    pub(super) fn emit_array_init_index(&mut self) {
        match self.array_init_index.last() {
            Some(index) => {
                let text = index.to_string();
                self.out.append(&text);
            }
            None => {
                self.structural_error(
                    "array init index outside of an array init loop",
                    SourceLoc::default(),
                );
            }
        }
    }
}
