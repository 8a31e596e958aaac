//! Literal suffixes, character escapes, cast canonicalization, and
//! template-argument spelling.

use cxd_ast::{
    BuiltinKind, CallExpr, CastKind, CharEncoding, Decl, Expr, NamedCastName, TemplateArg, Type,
};
use cxd_emitter::{EmitterOptions, Printer};

fn emit(expr: &Expr) -> String {
    let mut printer = Printer::new(EmitterOptions::default());
    printer.emit_expr(expr);
    printer.finish().text
}

fn builtin(kind: BuiltinKind) -> Type {
    Type::Builtin(kind)
}

#[test]
fn integer_literals_carry_their_type_suffix() {
    let cases = [
        (42, BuiltinKind::Int, "42"),
        (4000000000, BuiltinKind::UInt, "4000000000u"),
        (1, BuiltinKind::ULong, "1ul"),
        (1, BuiltinKind::ULongLong, "1ull"),
        (1, BuiltinKind::UInt128, "1ulll"),
        (1, BuiltinKind::Long, "1l"),
        (1, BuiltinKind::LongLong, "1ll"),
        (-7, BuiltinKind::Int, "-7"),
    ];
    for (value, kind, expected) in cases {
        assert_eq!(emit(&Expr::int(value, builtin(kind))), expected);
    }
}

#[test]
fn floating_literals_stay_floating() {
    let cases = [
        (3.5, BuiltinKind::Float, "3.5f"),
        (3.14, BuiltinKind::Double, "3.14"),
        (2.0, BuiltinKind::Double, "2.0"),
        (2.5, BuiltinKind::LongDouble, "2.5L"),
    ];
    for (value, kind, expected) in cases {
        assert_eq!(
            emit(&Expr::FloatingLiteral {
                value,
                ty: builtin(kind)
            }),
            expected
        );
    }
}

#[test]
fn character_escape_table_is_complete() {
    let cases: [(u32, &str); 10] = [
        (0x00, "'\\0'"),
        (0x07, "'\\a'"),
        (0x08, "'\\b'"),
        (0x0C, "'\\f'"),
        (0x0A, "'\\n'"),
        (0x0D, "'\\r'"),
        (0x09, "'\\t'"),
        (0x0B, "'\\v'"),
        (0x5C, "'\\\\'"),
        (0x27, "'\\''"),
    ];
    for (value, expected) in cases {
        let expr = Expr::CharLiteral {
            value,
            encoding: CharEncoding::Plain,
        };
        assert_eq!(emit(&expr), expected);
    }
}

#[test]
fn printable_characters_render_plain() {
    let expr = Expr::CharLiteral {
        value: 'A' as u32,
        encoding: CharEncoding::Plain,
    };
    assert_eq!(emit(&expr), "'A'");
}

#[test]
fn out_of_table_characters_use_hex_escapes() {
    let expr = Expr::CharLiteral {
        value: 0x01,
        encoding: CharEncoding::Plain,
    };
    assert_eq!(emit(&expr), "'\\x1'");
}

#[test]
fn character_encodings_prefix_the_literal() {
    let cases = [
        (CharEncoding::Wide, "L'x'"),
        (CharEncoding::Utf8, "u8'x'"),
        (CharEncoding::Utf16, "u'x'"),
        (CharEncoding::Utf32, "U'x'"),
    ];
    for (encoding, expected) in cases {
        let expr = Expr::CharLiteral {
            value: 'x' as u32,
            encoding,
        };
        assert_eq!(emit(&expr), expected);
    }
}

#[test]
fn string_literals_escape_their_contents() {
    let expr = Expr::StringLiteral("a\"b\n".into());
    assert_eq!(emit(&expr), "\"a\\\"b\\n\"");
}

#[test]
fn implicit_conversion_resurfaces_as_static_cast() {
    let expr = Expr::ImplicitCast {
        dest: builtin(BuiltinKind::Double),
        kind: CastKind::IntegralToFloating,
        sub: Box::new(Expr::decl_ref("i")),
    };
    assert_eq!(emit(&expr), "static_cast<double>(i)");
}

#[test]
fn implicit_cast_of_a_literal_needs_no_cast() {
    let expr = Expr::ImplicitCast {
        dest: builtin(BuiltinKind::Long),
        kind: CastKind::IntegralCast,
        sub: Box::new(Expr::int(5, builtin(BuiltinKind::Int))),
    };
    assert_eq!(emit(&expr), "5");
}

#[test]
fn value_preserving_casts_stay_invisible() {
    let expr = Expr::ImplicitCast {
        dest: builtin(BuiltinKind::Int),
        kind: CastKind::LValueToRValue,
        sub: Box::new(Expr::decl_ref("x")),
    };
    assert_eq!(emit(&expr), "x");
}

#[test]
fn bit_cast_becomes_reinterpret_cast() {
    let expr = Expr::ImplicitCast {
        dest: Type::Pointer(Box::new(builtin(BuiltinKind::Int))),
        kind: CastKind::BitCast,
        sub: Box::new(Expr::decl_ref("p")),
    };
    assert_eq!(emit(&expr), "reinterpret_cast<int *>(p)");
}

#[test]
fn derived_to_base_by_reference_appends_an_ampersand() {
    let expr = Expr::ImplicitCast {
        dest: Type::record("Base"),
        kind: CastKind::DerivedToBase,
        sub: Box::new(Expr::decl_ref("d")),
    };
    assert_eq!(emit(&expr), "static_cast<Base&>(d)");
}

#[test]
fn this_to_base_conversion_is_only_a_comment() {
    let expr = Expr::ImplicitCast {
        dest: Type::record("Base"),
        kind: CastKind::UncheckedDerivedToBase,
        sub: Box::new(Expr::This),
    };
    assert_eq!(emit(&expr), "/*static_cast<Base&>(this)*/");
}

#[test]
fn c_style_cast_canonicalizes_to_reinterpret_cast() {
    let expr = Expr::CStyleCast {
        dest: Type::Pointer(Box::new(builtin(BuiltinKind::Int))),
        kind: CastKind::BitCast,
        sub: Box::new(Expr::decl_ref("raw")),
    };
    assert_eq!(emit(&expr), "reinterpret_cast<int *>(raw)");
}

#[test]
fn named_casts_keep_their_keyword() {
    let expr = Expr::NamedCast {
        name: NamedCastName::Const,
        dest: Type::Pointer(Box::new(builtin(BuiltinKind::Int))),
        kind: CastKind::NoOp,
        sub: Box::new(Expr::decl_ref("cp")),
    };
    assert_eq!(emit(&expr), "const_cast<int *>(cp)");
}

#[test]
fn nested_template_arguments_separate_closing_brackets() {
    let expr = Expr::DeclRef {
        name: "first".into(),
        template_args: vec![TemplateArg::Type(Type::Named("std::vector<int>".into()))],
    };
    assert_eq!(emit(&expr), "first<std::vector<int> >");
}

#[test]
fn literal_operator_renders_character_packs_quoted() {
    let expr = Expr::UserDefinedLiteral {
        call: CallExpr {
            callee: Box::new(Expr::decl_ref("operator\"\"_km")),
            args: vec![],
        },
        template_args: vec![TemplateArg::Pack(vec![
            TemplateArg::Integral('1' as i128),
            TemplateArg::Integral('2' as i128),
        ])],
    };
    assert_eq!(emit(&expr), "operator\"\"_km<'1', '2'>()");
}

#[test]
fn static_assert_records_its_verdict() {
    let passed = Decl::StaticAssert {
        condition: Expr::BoolLiteral(true),
        message: Some(Expr::StringLiteral("ok".into())),
        failed: false,
    };
    let failed = Decl::StaticAssert {
        condition: Expr::BoolLiteral(false),
        message: None,
        failed: true,
    };

    let mut printer = Printer::new(EmitterOptions::default());
    printer.emit_decl(&passed);
    printer.emit_decl(&failed);
    let text = printer.finish().text;

    assert!(text.contains("/* PASSED: static_assert(true, \"ok\"); */"));
    assert!(text.contains("/* FAILED: static_assert(false); */"));
}
