//! Closure-class synthesis for lambda expressions.
//!
//! A lambda becomes an explicit class: one private field per capture, a
//! constructor binding the fields, the call operator, and, when the lambda
//! is convertible to a function pointer, the conversion operator plus its
//! static invoker. The class definition is written into the hoisting anchor
//! chosen by the lambda context stack; the lambda token position only
//! receives the class name and constructor arguments.

use cxd_ast::types::display::type_name;
use cxd_ast::{CaptureKind, LambdaExpr, MethodDecl};
use cxd_common::NameGenerator;

use crate::proto::{SkipAccess, SkipConstexpr};

use super::{LambdaCallerRole, Printer};

/// The synthesized class text plus the constructor-argument list for the
/// use site.
struct ClosureParts {
    text: String,
    inits: String,
}

impl Printer {
    #[tracing::instrument(level = "debug", skip_all, fields(location = %lambda.location))]
    pub(super) fn emit_lambda_expr(&mut self, lambda: &LambdaExpr) {
        let class_name = NameGenerator::lambda_class_name(lambda.location);

        let anchor = self.lambda_anchor_index();
        let parts = self.synthesize_closure_class(lambda, &class_name);

        let Some(anchor) = anchor else {
            // No anchoring context: the class is emitted in place, followed
            // by an instance declaration carrying the captures.
            self.with_lambda_scope(LambdaCallerRole::Free, |printer| {
                printer.out.append_raw(&parts.text);
                printer.out.append(" ");
                printer.out.append(&class_name);
                printer.out.append(&parts.inits);
            });
            return;
        };

        let role = self.lambda_stack[anchor].role;
        tracing::trace!(?role, anchor, "hoisting closure class");
        let preamble = &mut self.lambda_stack[anchor].preamble;
        preamble.push_str(&parts.text);

        if matches!(role, LambdaCallerRole::VarDecl | LambdaCallerRole::Call) {
            // The anchor's own text spells the use site; only the class
            // definition is hoisted.
            preamble.push_str(";\n\n");
            self.out.append(&class_name);
            self.out.append(&parts.inits);
        } else {
            // Return values and operator operands cannot take a braced
            // constructor call in place; an instance named after the class
            // is declared next to it and referenced instead.
            preamble.push_str(&format!(" {}{};\n\n", class_name, parts.inits));
            self.out.append(&class_name);
        }
    }

    /// Build the class definition text. Emission of the member bodies runs
    /// through the ordinary statement rules with `this` respelled to the
    /// captured `__this`.
    fn synthesize_closure_class(&mut self, lambda: &LambdaExpr, class_name: &str) -> ClosureParts {
        let staged = self.out.nested();
        let parent = std::mem::replace(&mut self.out, staged);
        let was_in_lambda = std::mem::replace(&mut self.in_lambda_body, true);

        self.out.append_newline();
        self.out.append("class ");
        self.out.append(class_name);
        self.out.open_scope();

        let class = &lambda.class;
        if class.is_generic {
            let have_conversion = !class.conversion_specializations.is_empty();
            for conversion in &class.conversion_specializations {
                self.emit_closure_method(conversion);
            }
            for call_op in &class.call_operator_specializations {
                self.emit_closure_method(call_op);
            }
            if have_conversion {
                for invoker in &class.static_invoker_specializations {
                    self.emit_closure_method(invoker);
                }
            }
        } else {
            // Undeduced conversion operators still carry `auto` and no body;
            // those are not real members of the closure yet.
            let deduced: Vec<&MethodDecl> = class
                .conversions
                .iter()
                .filter(|conversion| conversion.body.is_some())
                .collect();
            for conversion in &deduced {
                self.emit_closure_method(conversion);
            }
            self.emit_closure_method(&class.call_operator);
            if !deduced.is_empty()
                && let Some(invoker) = &class.static_invoker
            {
                self.emit_closure_method(invoker);
            }
        }

        let inits = self.emit_captures_and_ctor(lambda, class_name);

        self.out.close_scope();

        self.in_lambda_body = was_in_lambda;
        let staged = std::mem::replace(&mut self.out, parent);
        ClosureParts {
            text: staged.into_string(),
            inits,
        }
    }

    fn emit_closure_method(&mut self, method: &MethodDecl) {
        crate::proto::method_signature(&mut self.out, method, SkipConstexpr::Yes, SkipAccess::No);
        self.out.append_newline();
        if let Some(body) = &method.body {
            self.emit_stmt(body);
        } else {
            self.out.append_line(";");
        }
        self.out.append_newline();
    }

    /// Capture fields, the constructor, and the use-site argument list, all
    /// derived in one walk over the captures so their orders always agree.
    fn emit_captures_and_ctor(&mut self, lambda: &LambdaExpr, class_name: &str) -> String {
        let mut ctor = format!("public: {class_name}(");
        let mut ctor_inits = String::from(": ");
        let mut inits = String::from("{");

        if !lambda.captures.is_empty() {
            self.out.append_newline();
            self.out.append_line("private:");
        }

        let mut first = true;
        let mut emitted_any = false;
        for capture in &lambda.captures {
            tracing::trace!(name = %capture.name, kind = ?capture.kind, "processing capture");

            // Variable-length arrays have no expressible member type.
            if capture.kind == CaptureKind::Vla {
                continue;
            }

            if first {
                first = false;
            } else {
                ctor.push_str(", ");
                inits.push_str(", ");
                ctor_inits.push_str("\n, ");
            }
            emitted_any = true;

            let is_this_capture =
                matches!(capture.kind, CaptureKind::This | CaptureKind::StarThis);
            let plain_name = capture.name.as_str();
            let field_name = if is_this_capture {
                format!("__{plain_name}")
            } else {
                plain_name.to_string()
            };

            let is_array = capture.ty.is_array();
            let field_type = capture_type_text(&capture.ty, plain_name);
            let ctor_param_type = capture_type_text(&capture.ty, &format!("_{plain_name}"));

            ctor.push_str(&ctor_param_type);
            self.out.append(&field_type);

            if capture.kind == CaptureKind::ByRef && !capture.ty.is_reference() && !is_array {
                ctor.push('&');
                self.out.append("&");
            }

            // An init-capture by copy carries its assigned expression; the
            // use site passes that expression, not the bound name.
            if !is_this_capture
                && capture.kind == CaptureKind::ByCopy
                && let Some(init) = &capture.init
            {
                let init = init.clone();
                let rendered = self.render_to_string(&init);
                inits.push_str(&rendered);
            } else {
                if capture.kind == CaptureKind::StarThis {
                    inits.push('*');
                }
                inits.push_str(plain_name);
            }

            if is_array {
                // The array declarator already wraps the name.
                self.out.append_line(";");
            } else {
                ctor.push_str(&format!(" _{field_name}"));
                self.out.append(" ");
                self.out.append(&field_name);
                self.out.append_line(";");
            }

            ctor_inits.push_str(&format!("{field_name}{{_{field_name}}}"));
        }

        ctor.push(')');
        inits.push('}');

        if !lambda.captures.is_empty() {
            self.out.append_newline();
            self.out.append_line(&ctor);
            if emitted_any {
                self.out.append_line(&ctor_inits);
            }
            self.out.append_line("{}");
        }

        inits
    }
}

/// The printable type of a capture as a member/parameter: arrays wrap the
/// name in a reference declarator, everything else is the plain type text
/// with the name appended by the caller.
fn capture_type_text(ty: &cxd_ast::Type, name: &str) -> String {
    let text = type_name(ty);
    if ty.is_array()
        && let Some(bracket) = text.find('[')
    {
        let mut wrapped = String::with_capacity(text.len() + name.len() + 3);
        wrapped.push_str(&text[..bracket]);
        wrapped.push_str(&format!("(&{name})"));
        wrapped.push_str(&text[bracket..]);
        return wrapped;
    }
    text
}
