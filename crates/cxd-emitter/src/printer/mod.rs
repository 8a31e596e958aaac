//! The recursive emission visitor.
//!
//! `Printer` walks the tree and appends text; each node kind has exactly one
//! rule, found by an exhaustive match in the dispatchers below. Statement
//! rules always leave the buffer at a statement boundary (a `;` or a closed
//! scope); expression rules never terminate the statement themselves.
//!
//! The lambda context stack lives here because the dispatchers push frames:
//! entering one of the anchoring syntactic roles (call, member call,
//! operator call, variable initializer, return value, binary operand)
//! redirects output into a staged buffer. When the role exits, any closure
//! classes hoisted onto that frame are spliced in front of the staged text,
//! which is what places a class definition before the call that uses it.

mod bindings;
mod declarations;
mod expressions;
mod lambdas;
mod literals;
mod statements;

use cxd_ast::{Decl, Expr, Stmt};
use cxd_common::{Diagnostic, DiagnosticSink, NameGenerator, SourceLoc};
use smallvec::SmallVec;

use crate::options::EmitterOptions;
use crate::writer::OutputBuffer;

/// The syntactic role a lambda-producing context appears in. Only the first
/// six anchor hoisted closure classes; `Free` exists for a lambda with no
/// enclosing anchoring context.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LambdaCallerRole {
    Call,
    MemberCall,
    OperatorCall,
    VarDecl,
    Return,
    BinaryOperator,
    Free,
}

impl LambdaCallerRole {
    /// Whether a closure class may be hoisted onto a frame with this role.
    fn anchors_lambda(self) -> bool {
        !matches!(self, Self::Free)
    }
}

/// One entry of the lambda context stack.
#[derive(Debug)]
pub(crate) struct LambdaFrame {
    pub(crate) role: LambdaCallerRole,
    /// Closure class definitions hoisted onto this frame; spliced before the
    /// frame's own output when the frame finishes.
    pub(crate) preamble: String,
}

impl LambdaFrame {
    fn new(role: LambdaCallerRole) -> Self {
        Self {
            role,
            preamble: String::new(),
        }
    }
}

/// Result of one generation pass.
#[derive(Debug)]
pub struct GeneratedOutput {
    pub text: String,
    pub diagnostics: DiagnosticSink,
    pub scopes_balanced: bool,
}

pub struct Printer {
    pub(crate) out: OutputBuffer,
    pub(crate) lambda_stack: Vec<LambdaFrame>,
    pub(crate) names: NameGenerator,
    pub(crate) diagnostics: DiagnosticSink,
    /// Innermost array-init-loop indices; `ArrayInitIndex` reads the top.
    pub(crate) array_init_index: SmallVec<[u64; 4]>,
    /// Set during structured-binding expansion: the synthesized temporary
    /// that unresolvable decl-refs in a binding path resolve to.
    pub(crate) binding_temp: Option<String>,
    /// Inside a closure member body `this` spells `__this`.
    pub(crate) in_lambda_body: bool,
}

impl Printer {
    pub fn new(options: EmitterOptions) -> Self {
        Self {
            out: OutputBuffer::new(options),
            lambda_stack: Vec::new(),
            names: NameGenerator::new(),
            diagnostics: DiagnosticSink::new(),
            array_init_index: SmallVec::new(),
            binding_temp: None,
            in_lambda_body: false,
        }
    }

    /// Emit a whole translation unit.
    pub fn emit_translation_unit(&mut self, decls: &[Decl]) {
        for decl in decls {
            self.emit_decl(decl);
        }
    }

    pub fn finish(self) -> GeneratedOutput {
        let scopes_balanced = self.out.is_balanced();
        GeneratedOutput {
            text: self.out.into_string(),
            diagnostics: self.diagnostics,
            scopes_balanced,
        }
    }

    // =========================================================================
    // Dispatchers
    // =========================================================================

    pub fn emit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Compound(body) => self.emit_compound(body),
            Stmt::Expr(expr) => {
                self.emit_expr(expr);
                self.out.append_line(";");
            }
            Stmt::Decl(decls) => {
                for decl in decls {
                    self.emit_decl(decl);
                }
            }
            Stmt::If(if_stmt) => self.emit_if(if_stmt),
            Stmt::Switch(switch) => self.emit_switch(switch),
            Stmt::Case { lhs, body } => self.emit_case(lhs, body),
            Stmt::Default(body) => self.emit_default_case(body),
            Stmt::While { cond, body } => self.emit_while(cond, body),
            Stmt::DoWhile { body, cond } => self.emit_do_while(body, cond),
            Stmt::For(for_stmt) => self.emit_for(for_stmt),
            Stmt::RangeFor(range_for) => self.emit_range_for(range_for),
            Stmt::Return(value) => self.emit_return(value.as_ref()),
            Stmt::Break => self.out.append_line("break;"),
            Stmt::Continue => self.out.append_line("continue;"),
            Stmt::Null => self.out.append_line(";"),
            Stmt::Unsupported { kind } => {
                self.not_supported(kind);
                self.out.append_newline();
            }
        }
    }

    pub fn emit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::DeclRef {
                name,
                template_args,
            } => self.emit_decl_ref(name, template_args),
            Expr::UnresolvedLookup { name } => self.out.append(name),
            Expr::IntegerLiteral { value, ty } => self.emit_integer_literal(*value, ty),
            Expr::FloatingLiteral { value, ty } => self.emit_floating_literal(*value, ty),
            Expr::BoolLiteral(value) => self.out.append(if *value { "true" } else { "false" }),
            Expr::CharLiteral { value, encoding } => self.emit_char_literal(*value, *encoding),
            Expr::StringLiteral(text) => self.emit_string_literal(text),
            Expr::NullPtrLiteral => self.out.append("nullptr"),
            Expr::GnuNull => self.out.append("NULL"),
            Expr::Predefined(name) => self.emit_expr(name),
            Expr::Conditional {
                cond,
                when_true,
                when_false,
            } => self.emit_conditional(cond, when_true, when_false),
            Expr::Binary { op, lhs, rhs } => self.emit_binary(*op, lhs, rhs),
            Expr::Unary { op, operand } => self.emit_unary(*op, operand),
            Expr::Paren(sub) => {
                self.out.append("(");
                self.emit_expr(sub);
                self.out.append(")");
            }
            Expr::Call(call) => self.emit_call(call),
            Expr::UserDefinedLiteral {
                call,
                template_args,
            } => self.emit_user_defined_literal(call, template_args),
            Expr::MemberCall(call) => self.emit_member_call(call),
            Expr::OperatorCall {
                op_spelling,
                is_member,
                callee_name,
                args,
            } => self.emit_operator_call(op_spelling, *is_member, callee_name, args),
            Expr::Member(member) => self.emit_member(member),
            Expr::Subscript { base, index } => {
                self.emit_expr(base);
                self.out.append("[");
                self.emit_expr(index);
                self.out.append("]");
            }
            Expr::InitList(elements) => self.emit_init_list(elements),
            Expr::Construct {
                ty,
                args,
                list_init,
            } => self.emit_construct(ty, args, *list_init),
            Expr::FunctionalCast {
                dest,
                sub,
                list_init,
            } => self.emit_functional_cast(dest, sub, *list_init),
            Expr::NamedCast {
                name,
                dest,
                kind,
                sub,
            } => self.emit_named_cast(*name, dest, *kind, sub),
            Expr::CStyleCast { dest, kind, sub } => self.emit_c_style_cast(dest, *kind, sub),
            Expr::ImplicitCast { dest, kind, sub } => self.emit_implicit_cast(dest, *kind, sub),
            Expr::New(new_expr) => self.emit_new(new_expr),
            Expr::Delete { array_form, arg } => self.emit_delete(*array_form, arg),
            Expr::UnaryTypeTrait { kind, arg } => self.emit_unary_type_trait(*kind, arg),
            Expr::Typeid(arg) => self.emit_typeid(arg),
            Expr::This => {
                if self.in_lambda_body {
                    self.out.append("__this");
                } else {
                    self.out.append("this");
                }
            }
            Expr::Lambda(lambda) => self.emit_lambda_expr(lambda),
            Expr::StdInitializerList { ty, sub } => self.emit_std_initializer_list(ty, sub),
            Expr::MaterializeTemporary(sub)
            | Expr::BindTemporary(sub)
            | Expr::ExprWithCleanups(sub)
            | Expr::DefaultArg(sub)
            | Expr::DefaultInit(sub)
            | Expr::OpaqueValue(sub)
            | Expr::SubstTemplateParm(sub) => self.emit_expr(sub),
            Expr::ArrayInitLoop { common: _, sub, size } => self.emit_array_init_loop(sub, *size),
            Expr::ArrayInitIndex => self.emit_array_init_index(),
            Expr::Unsupported { kind } => self.not_supported(kind),
        }
    }

    pub fn emit_decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Var(var) => self.emit_var_decl(var),
            Decl::Decomposition(decomposition) => self.emit_decomposition(decomposition),
            Decl::Function(function) => self.emit_function(function),
            Decl::Method(method) => self.emit_method(method),
            Decl::Record(record) => self.emit_record(record),
            Decl::Field(field) => self.emit_field(field),
            Decl::AccessSpec(access) => {
                self.out.append(access.spelling());
                self.out.append_line(":");
            }
            Decl::TypeAlias { name, underlying } | Decl::Typedef { name, underlying } => {
                self.emit_type_alias(name, underlying)
            }
            Decl::Using(using) => self.emit_using(using),
            Decl::StaticAssert {
                condition,
                message,
                failed,
            } => self.emit_static_assert(condition, message.as_ref(), *failed),
            Decl::Unsupported { kind } => {
                self.not_supported(kind);
                self.out.append_newline();
            }
        }
    }

    // =========================================================================
    // Lambda context stack
    // =========================================================================

    /// Run `f` inside a lambda context with the given role. Push, staged
    /// emission, and pop-and-finish are one routine so every exit path of a
    /// role leaves the stack and the output consistent.
    pub(crate) fn with_lambda_scope(&mut self, role: LambdaCallerRole, f: impl FnOnce(&mut Self)) {
        let staged = self.out.nested();
        let parent = std::mem::replace(&mut self.out, staged);
        self.lambda_stack.push(LambdaFrame::new(role));

        f(self);

        // Strict LIFO: the frame pushed above is still the top one.
        let frame = self
            .lambda_stack
            .pop()
            .unwrap_or_else(|| LambdaFrame::new(role));
        let staged = std::mem::replace(&mut self.out, parent);
        if !frame.preamble.is_empty() {
            // Class definitions hoist to the outermost anchoring context:
            // while an enclosing anchoring frame is still open, its staged
            // text is mid-expression, so the preamble bubbles up to that
            // frame instead of being written here.
            if let Some(anchor) = self.lambda_anchor_index() {
                tracing::trace!(role = ?frame.role, anchor, "bubbling hoisted closure classes");
                self.lambda_stack[anchor].preamble.push_str(&frame.preamble);
            } else {
                tracing::trace!(role = ?frame.role, "splicing hoisted closure classes");
                self.out.append_raw(&frame.preamble);
            }
        }
        self.out.splice(staged);
    }

    /// First frame, innermost outward, that may anchor a closure class.
    pub(crate) fn lambda_anchor_index(&self) -> Option<usize> {
        self.lambda_stack
            .iter()
            .rposition(|frame| frame.role.anchors_lambda())
    }

    // =========================================================================
    // Failure paths
    // =========================================================================

    /// Recoverable: no emission rule for this construct. Mark it inline and
    /// let the pass continue.
    pub(crate) fn not_supported(&mut self, kind: &str) {
        tracing::debug!(kind, "unsupported construct");
        self.out.append("/* NYI: ");
        self.out.append(kind);
        self.out.append(" */");
    }

    /// Structural invariant violation: record a diagnostic; the caller stops
    /// emitting the offending subtree. Output before this point stays.
    pub(crate) fn structural_error(&mut self, message: impl Into<String>, location: SourceLoc) {
        let message = message.into();
        tracing::debug!(%message, %location, "structural error");
        self.diagnostics
            .push(Diagnostic::error(message).at(location));
    }

    // =========================================================================
    // Small shared helpers
    // =========================================================================

    pub(crate) fn wrap_in_parens(&mut self, f: impl FnOnce(&mut Self)) {
        self.out.append("(");
        f(self);
        self.out.append(")");
    }

    pub(crate) fn wrap_in_curlys(&mut self, f: impl FnOnce(&mut Self)) {
        self.out.append("{");
        f(self);
        self.out.append("}");
    }

    pub(crate) fn emit_comma_separated(&mut self, args: &[Expr]) {
        for (index, arg) in args.iter().enumerate() {
            if index > 0 {
                self.out.append(", ");
            }
            self.emit_expr(arg);
        }
    }

    /// Render an expression into a detached string using this printer's
    /// state (lambda stack included), leaving the main output untouched.
    pub(crate) fn render_to_string(&mut self, expr: &Expr) -> String {
        let staged = self.out.nested();
        let parent = std::mem::replace(&mut self.out, staged);
        self.emit_expr(expr);
        let staged = std::mem::replace(&mut self.out, parent);
        staged.into_string()
    }
}
