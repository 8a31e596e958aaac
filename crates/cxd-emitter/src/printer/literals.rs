//! Literal, cast, and template-argument formatting.
//!
//! The suffix and escape tables are total over their enumerations with an
//! explicit empty/literal default; no input reaches an unhandled-kind
//! failure here.

use cxd_ast::types::display::type_name;
use cxd_ast::{BuiltinKind, CastKind, CharEncoding, Expr, NamedCastName, TemplateArg, Type};

use super::Printer;

/// The literal suffix reproducing a builtin integer/floating kind when the
/// emitted text is re-parsed.
fn builtin_suffix(kind: BuiltinKind) -> &'static str {
    match kind {
        BuiltinKind::UInt => "u",
        BuiltinKind::ULong => "ul",
        BuiltinKind::ULongLong => "ull",
        BuiltinKind::UInt128 => "ulll",
        BuiltinKind::Long => "l",
        BuiltinKind::LongLong => "ll",
        BuiltinKind::Float => "f",
        BuiltinKind::LongDouble => "L",
        BuiltinKind::Bool
        | BuiltinKind::CharU
        | BuiltinKind::UChar
        | BuiltinKind::Char16
        | BuiltinKind::Char32
        | BuiltinKind::UShort
        | BuiltinKind::CharS
        | BuiltinKind::SChar
        | BuiltinKind::Short
        | BuiltinKind::Int
        | BuiltinKind::Int128
        | BuiltinKind::Double
        | BuiltinKind::WCharS
        | BuiltinKind::WCharU
        | BuiltinKind::Void => "",
    }
}

impl Printer {
    pub(super) fn emit_integer_literal(&mut self, value: i128, ty: &Type) {
        let text = value.to_string();
        self.out.append(&text);
        self.emit_literal_suffix(ty);
    }

    pub(super) fn emit_floating_literal(&mut self, value: f64, ty: &Type) {
        let mut text = value.to_string();
        // A whole-valued float still needs a decimal point to re-parse as a
        // floating literal.
        if text.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
            text.push_str(".0");
        }
        self.out.append(&text);
        self.emit_literal_suffix(ty);
    }

    fn emit_literal_suffix(&mut self, ty: &Type) {
        if let Some(kind) = ty.builtin_kind() {
            self.out.append(builtin_suffix(kind));
        }
    }

    pub(super) fn emit_char_literal(&mut self, value: u32, encoding: CharEncoding) {
        match encoding {
            CharEncoding::Plain => {}
            CharEncoding::Wide => self.out.append("L"),
            CharEncoding::Utf8 => self.out.append("u8"),
            CharEncoding::Utf16 => self.out.append("u"),
            CharEncoding::Utf32 => self.out.append("U"),
        }

        let escaped = match value {
            0x5C => Some("'\\\\'"),
            0x00 => Some("'\\0'"),
            0x27 => Some("'\\''"),
            0x07 => Some("'\\a'"),
            0x08 => Some("'\\b'"),
            0x0C => Some("'\\f'"),
            0x0A => Some("'\\n'"),
            0x0D => Some("'\\r'"),
            0x09 => Some("'\\t'"),
            0x0B => Some("'\\v'"),
            _ => None,
        };
        if let Some(escaped) = escaped {
            self.out.append(escaped);
            return;
        }

        // A plain char sign-extended into the upper bits comes back down to
        // its byte value.
        let value = if encoding == CharEncoding::Plain && (value & !0xFF) == !0xFF {
            value & 0xFF
        } else {
            value
        };

        if value < 256 && (0x20..0x7F).contains(&value) {
            let mut text = String::with_capacity(3);
            text.push('\'');
            if let Some(c) = char::from_u32(value) {
                text.push(c);
            }
            text.push('\'');
            self.out.append(&text);
        } else {
            // Out of table and non-printable: a hex escape keeps the literal
            // well-formed.
            let text = format!("'\\x{value:x}'");
            self.out.append(&text);
        }
    }

    pub(super) fn emit_string_literal(&mut self, text: &str) {
        let mut escaped = String::with_capacity(text.len() + 2);
        escaped.push('"');
        for c in text.chars() {
            match c {
                '\\' => escaped.push_str("\\\\"),
                '"' => escaped.push_str("\\\""),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\t' => escaped.push_str("\\t"),
                '\0' => escaped.push_str("\\0"),
                '\x07' => escaped.push_str("\\a"),
                '\x08' => escaped.push_str("\\b"),
                '\x0C' => escaped.push_str("\\f"),
                '\x0B' => escaped.push_str("\\v"),
                c if (c as u32) < 0x20 => {
                    escaped.push_str(&format!("\\x{:x}", c as u32));
                }
                c => escaped.push(c),
            }
        }
        escaped.push('"');
        self.out.append(&escaped);
    }

    // =========================================================================
    // Casts
    // =========================================================================

    pub(super) fn emit_named_cast(
        &mut self,
        name: NamedCastName,
        dest: &Type,
        kind: CastKind,
        sub: &Expr,
    ) {
        self.format_cast(name.spelling(), dest, kind, sub, false);
    }

    /// C-style casts canonicalize to `reinterpret_cast`.
    pub(super) fn emit_c_style_cast(&mut self, dest: &Type, kind: CastKind, sub: &Expr) {
        self.format_cast("reinterpret_cast", dest, kind, sub, false);
    }

    /// Implicit conversions that change a value re-surface as explicit
    /// casts; the rest forward to the operand. An implicit `this`
    /// derived-to-base conversion is not writable in its position and is
    /// emitted as a comment.
    pub(super) fn emit_implicit_cast(&mut self, dest: &Type, kind: CastKind, sub: &Expr) {
        if !kind.resurfaces() {
            self.emit_expr(sub);
            return;
        }

        // A literal that already spells its type needs no cast around it.
        if let literal @ Expr::IntegerLiteral { .. } = sub.ignore_implicit() {
            self.emit_expr(literal);
            return;
        }

        let is_reinterpret = kind == CastKind::BitCast;
        let cast_name = if is_reinterpret {
            "reinterpret_cast"
        } else {
            "static_cast"
        };
        let as_comment = !is_reinterpret && matches!(sub.ignore_implicit(), Expr::This);
        self.format_cast(cast_name, dest, kind, sub, as_comment);
    }

    /// Shared cast rendering. Casting to a base class by reference appends
    /// `&` to the destination type text; the pointer form already spells the
    /// indirection itself.
    fn format_cast(
        &mut self,
        cast_name: &str,
        dest: &Type,
        kind: CastKind,
        sub: &Expr,
        as_comment: bool,
    ) {
        let mut dest_text = type_name(dest.desugared());
        if kind.is_cast_to_base() && dest.is_record() {
            dest_text.push('&');
        }

        if as_comment {
            self.out.append("/*");
        }
        self.out.append(cast_name);
        self.out.append("<");
        self.out.append(&dest_text);
        self.out.append(">(");
        self.emit_expr(sub);
        self.out.append(")");
        if as_comment {
            self.out.append("*/");
        }
    }

    // =========================================================================
    // Template arguments
    // =========================================================================

    pub(super) fn emit_template_args(&mut self, args: &[TemplateArg]) {
        self.out.append("<");
        for (index, arg) in args.iter().enumerate() {
            if index > 0 {
                self.out.append(", ");
            }
            self.emit_template_arg(arg);
        }
        // `>>` would parse as a shift.
        if self.out.last_char() == Some('>') {
            self.out.append(" ");
        }
        self.out.append(">");
    }

    pub(super) fn emit_template_arg(&mut self, arg: &TemplateArg) {
        match arg {
            TemplateArg::Type(ty) | TemplateArg::Declaration(ty) => {
                self.out.append(&type_name(ty));
            }
            TemplateArg::NullPtr(_) => self.out.append("nullptr"),
            TemplateArg::Integral(value) => {
                let text = value.to_string();
                self.out.append(&text);
            }
            TemplateArg::Expression(expr) => self.emit_expr(expr),
            TemplateArg::Pack(elements) => {
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        self.out.append(", ");
                    }
                    self.emit_template_arg(element);
                }
            }
            TemplateArg::Template(name) | TemplateArg::TemplateExpansion(name) => {
                self.out.append(name);
            }
            TemplateArg::Null => self.not_supported("null template argument"),
        }
    }
}
