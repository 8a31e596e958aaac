//! Structured-binding expansion: temporary synthesis, per-binding rewrites,
//! and the failure diagnostics.

use cxd_ast::{
    BindingDecl, BindingPath, BuiltinKind, CallExpr, Decl, DecompositionDecl, Expr, MemberExpr,
    TemplateArg, Type,
};
use cxd_common::{FileId, SourceLoc};
use cxd_emitter::{EmitterOptions, GeneratedOutput, Printer};

fn loc(line: u32, column: u32) -> SourceLoc {
    SourceLoc::new(FileId(0), line, column)
}

fn int() -> Type {
    Type::Builtin(BuiltinKind::Int)
}

fn emit(decl: &Decl) -> GeneratedOutput {
    let mut printer = Printer::new(EmitterOptions::default());
    printer.emit_decl(decl);
    printer.finish()
}

/// A member access into the decomposed value; the base reference has no
/// printable name and resolves to the synthesized temporary.
fn member_path(member: &str) -> BindingPath {
    BindingPath::Member(Expr::Member(MemberExpr {
        base: Box::new(Expr::decl_ref("")),
        is_arrow: false,
        name: member.into(),
        template_args: vec![],
        lambda_conversion_class: None,
    }))
}

fn pair_decomposition(location: SourceLoc) -> DecompositionDecl {
    DecompositionDecl {
        ty: Type::record("std::pair<int, int>"),
        init: Expr::decl_ref("p"),
        bindings: vec![
            BindingDecl {
                name: "a".into(),
                ty: int(),
                path: Some(member_path("first")),
            },
            BindingDecl {
                name: "b".into(),
                ty: int(),
                path: Some(member_path("second")),
            },
        ],
        location,
    }
}

#[test]
fn tuple_like_decomposition_rewrites_through_the_temporary() {
    let output = emit(&Decl::Decomposition(pair_decomposition(loc(3, 8))));
    let text = &output.text;

    assert!(text.contains("std::pair<int, int> __p"));
    assert!(text.contains(" = p;"));
    // Members are not temporaries: the bindings alias them by reference.
    assert!(text.contains("int& a = __p"));
    assert!(text.contains(".first;"));
    assert!(text.contains("int& b = __p"));
    assert!(text.contains(".second;"));
    assert!(!output.diagnostics.has_errors());
}

#[test]
fn temporary_backed_binding_takes_no_address() {
    let holding_init = Expr::ExprWithCleanups(Box::new(Expr::Call(CallExpr {
        callee: Box::new(Expr::DeclRef {
            name: "std::get".into(),
            template_args: vec![TemplateArg::Integral(0)],
        }),
        args: vec![Expr::decl_ref("")],
    })));
    let decl = DecompositionDecl {
        ty: Type::record("std::tuple<int>"),
        init: Expr::decl_ref("make"),
        bindings: vec![BindingDecl {
            name: "v".into(),
            ty: int(),
            path: Some(BindingPath::HoldingVar { init: holding_init }),
        }],
        location: loc(5, 4),
    };

    let text = emit(&Decl::Decomposition(decl)).text;
    assert!(text.contains("int v = std::get<0>(__make"));
    assert!(!text.contains("int& v"));
}

#[test]
fn array_decomposition_subscripts_the_temporary() {
    let array_ref = Type::LValueReference(Box::new(Type::Array {
        element: Box::new(int()),
        size: Some(2),
    }));
    let decl = DecompositionDecl {
        ty: array_ref,
        init: Expr::decl_ref("arr"),
        bindings: vec![
            BindingDecl {
                name: "x".into(),
                ty: int(),
                path: Some(BindingPath::ArraySubscript {
                    index: Expr::int(0, int()),
                }),
            },
            BindingDecl {
                name: "y".into(),
                ty: int(),
                path: Some(BindingPath::ArraySubscript {
                    index: Expr::int(1, int()),
                }),
            },
        ],
        location: loc(6, 2),
    };

    let text = emit(&Decl::Decomposition(decl)).text;
    assert!(text.contains("int (&__arr"));
    assert!(text.contains(")[2] = arr;"));
    // Binding into a referenced array preserves reference semantics.
    assert!(text.contains("int& x = __arr"));
    assert!(text.contains("[0];"));
    assert!(text.contains("int& y = __arr"));
    assert!(text.contains("[1];"));
}

#[test]
fn same_source_name_in_two_scopes_stays_unique() {
    let mut printer = Printer::new(EmitterOptions::default());
    printer.emit_decl(&Decl::Decomposition(pair_decomposition(loc(4, 8))));
    printer.emit_decl(&Decl::Decomposition(pair_decomposition(loc(9, 8))));
    let text = printer.finish().text;

    let temps: Vec<&str> = text
        .lines()
        .filter(|line| line.ends_with(" = p;"))
        .collect();
    assert_eq!(temps.len(), 2);
    assert_ne!(temps[0], temps[1]);
}

#[test]
fn location_less_decompositions_fall_back_to_counters() {
    let mut printer = Printer::new(EmitterOptions::default());
    printer.emit_decl(&Decl::Decomposition(pair_decomposition(SourceLoc::default())));
    printer.emit_decl(&Decl::Decomposition(pair_decomposition(SourceLoc::default())));
    let text = printer.finish().text;

    assert!(text.contains("__p = p;"));
    assert!(text.contains("__p2 = p;"));
}

#[test]
fn initializer_without_a_decl_ref_is_a_structural_error() {
    let decl = DecompositionDecl {
        ty: Type::record("std::pair<int, int>"),
        init: Expr::int(1, int()),
        bindings: vec![],
        location: loc(8, 1),
    };

    let output = emit(&Decl::Decomposition(decl));
    assert!(output.text.is_empty());
    assert!(output.diagnostics.has_errors());
    assert!(
        output
            .diagnostics
            .iter()
            .any(|d| d.message.contains("unknown decl"))
    );
}

#[test]
fn unresolved_binding_leaves_a_marker() {
    let decl = DecompositionDecl {
        ty: Type::record("Odd"),
        init: Expr::decl_ref("o"),
        bindings: vec![BindingDecl {
            name: "q".into(),
            ty: int(),
            path: None,
        }],
        location: loc(9, 1),
    };

    let output = emit(&Decl::Decomposition(decl));
    assert!(output.text.contains("/* NYI: unresolved binding */"));
    assert!(!output.diagnostics.has_errors());
}
