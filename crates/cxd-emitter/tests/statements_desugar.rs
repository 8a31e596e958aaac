//! Statement-level desugaring: range-for expansion, init-statement
//! hoisting, and the guarded static-local initialization.

use cxd_ast::{
    BinOp, BuiltinKind, CallExpr, Decl, Expr, ForStmt, IfStmt, RangeForStmt, Stmt, StorageClass,
    SwitchStmt, Type, UnOp, VarDecl,
};
use cxd_common::{FileId, SourceLoc};
use cxd_emitter::{EmitterOptions, Printer};

fn loc(line: u32, column: u32) -> SourceLoc {
    SourceLoc::new(FileId(0), line, column)
}

fn int() -> Type {
    Type::Builtin(BuiltinKind::Int)
}

fn call(name: &str, args: Vec<Expr>) -> Expr {
    Expr::Call(CallExpr {
        callee: Box::new(Expr::decl_ref(name)),
        args,
    })
}

fn emit_stmt(stmt: &Stmt) -> String {
    let mut printer = Printer::new(EmitterOptions::default());
    printer.emit_stmt(stmt);
    let output = printer.finish();
    assert!(output.scopes_balanced);
    output.text
}

fn emit_decl(decl: &Decl) -> String {
    let mut printer = Printer::new(EmitterOptions::default());
    printer.emit_decl(decl);
    let output = printer.finish();
    assert!(output.scopes_balanced);
    output.text
}

/// `for (int x : c) { consume(x); }` after sema.
fn range_for() -> Stmt {
    let range_decl = VarDecl::new(
        "__range1",
        Type::RValueReference(Box::new(Type::Auto(None))),
    )
    .with_init(Expr::decl_ref("c"));
    let begin_decl = VarDecl::new("__begin1", Type::Auto(None)).with_init(Expr::MemberCall(
        CallExpr {
            callee: Box::new(Expr::Member(cxd_ast::MemberExpr {
                base: Box::new(Expr::decl_ref("__range1")),
                is_arrow: false,
                name: "begin".into(),
                template_args: vec![],
                lambda_conversion_class: None,
            })),
            args: vec![],
        },
    ));
    let end_decl = VarDecl::new("__end1", Type::Auto(None)).with_init(Expr::MemberCall(CallExpr {
        callee: Box::new(Expr::Member(cxd_ast::MemberExpr {
            base: Box::new(Expr::decl_ref("__range1")),
            is_arrow: false,
            name: "end".into(),
            template_args: vec![],
            lambda_conversion_class: None,
        })),
        args: vec![],
    }));

    Stmt::RangeFor(Box::new(RangeForStmt {
        range_decl,
        begin_decl,
        end_decl,
        cond: Expr::Binary {
            op: BinOp::Ne,
            lhs: Box::new(Expr::decl_ref("__begin1")),
            rhs: Box::new(Expr::decl_ref("__end1")),
        },
        inc: Expr::Unary {
            op: UnOp::PreInc,
            operand: Box::new(Expr::decl_ref("__begin1")),
        },
        loop_var: VarDecl::new("x", int()).with_init(Expr::Unary {
            op: UnOp::Deref,
            operand: Box::new(Expr::decl_ref("__begin1")),
        }),
        body: Box::new(Stmt::Compound(vec![Stmt::Expr(call(
            "consume",
            vec![Expr::decl_ref("x")],
        ))])),
    }))
}

#[test]
fn range_for_expands_to_explicit_iteration() {
    let text = emit_stmt(&range_for());

    assert!(text.contains("auto && __range1 = c;"));
    assert!(text.contains("auto __begin1 = __range1.begin();"));
    assert!(text.contains("auto __end1 = __range1.end();"));
    // Blank separator between the iterator declarations and the loop.
    assert!(text.contains(".end();\n\n"));
    assert!(text.contains("for( ; __begin1 != __end1; ++__begin1)"));
    assert!(text.contains("int x = *__begin1;"));
    assert!(text.contains("consume(x);"));

    // The loop variable is declared at the top of the loop body.
    let loop_at = text.find("for( ;").unwrap();
    let var_at = text.find("int x").unwrap();
    let body_at = text.find("consume").unwrap();
    assert!(loop_at < var_at);
    assert!(var_at < body_at);
}

#[test]
fn if_init_statement_is_hoisted_into_a_scope() {
    let stmt = Stmt::If(IfStmt {
        is_constexpr: false,
        init: Some(Box::new(Stmt::Decl(vec![Decl::Var(
            VarDecl::new("x", int()).with_init(call("next", vec![])),
        )]))),
        cond_var: None,
        cond: Expr::Binary {
            op: BinOp::Gt,
            lhs: Box::new(Expr::decl_ref("x")),
            rhs: Box::new(Expr::int(0, int())),
        },
        then_branch: Box::new(Stmt::Compound(vec![Stmt::Expr(call(
            "consume",
            vec![Expr::decl_ref("x")],
        ))])),
        else_branch: Some(Box::new(Stmt::Compound(vec![Stmt::Expr(call(
            "reject",
            vec![],
        ))]))),
    });

    let text = emit_stmt(&stmt);

    assert!(text.starts_with("{\n"));
    let init_at = text.find("int x = next();").unwrap();
    let if_at = text.find("if(x > 0)").unwrap();
    let else_at = text.find("else").unwrap();
    assert!(init_at < if_at);
    assert!(if_at < else_at);
}

#[test]
fn constexpr_if_keeps_its_keyword() {
    let stmt = Stmt::If(IfStmt {
        is_constexpr: true,
        init: None,
        cond_var: None,
        cond: Expr::BoolLiteral(true),
        then_branch: Box::new(Stmt::Compound(vec![])),
        else_branch: Some(Box::new(Stmt::Compound(vec![]))),
    });

    let text = emit_stmt(&stmt);
    assert!(text.contains("if constexpr(true)"));
    assert!(text.contains("else /*constexpr*/"));
    assert!(!text.starts_with("{\n"));
}

#[test]
fn switch_condition_variable_is_hoisted() {
    let stmt = Stmt::Switch(SwitchStmt {
        init: None,
        cond_var: Some(VarDecl::new("c", int()).with_init(call("category", vec![]))),
        cond: Expr::decl_ref("c"),
        body: Box::new(Stmt::Compound(vec![
            Stmt::Case {
                lhs: Expr::int(0, int()),
                body: Box::new(Stmt::Break),
            },
            Stmt::Default(Box::new(Stmt::Break)),
        ])),
    });

    let text = emit_stmt(&stmt);

    let var_at = text.find("int c = category();").unwrap();
    let switch_at = text.find("switch(c)").unwrap();
    assert!(var_at < switch_at);
    assert!(text.contains("case 0:"));
    assert!(text.contains("default:"));
    assert!(text.contains("break;"));
}

#[test]
fn classic_for_keeps_its_header_inline() {
    let stmt = Stmt::For(ForStmt {
        init: Some(Box::new(Stmt::Decl(vec![Decl::Var(
            VarDecl::new("i", int()).with_init(Expr::int(0, int())),
        )]))),
        cond: Some(Expr::Binary {
            op: BinOp::Lt,
            lhs: Box::new(Expr::decl_ref("i")),
            rhs: Box::new(Expr::int(3, int())),
        }),
        inc: Some(Expr::Unary {
            op: UnOp::PreInc,
            operand: Box::new(Expr::decl_ref("i")),
        }),
        body: Box::new(Stmt::Compound(vec![Stmt::Expr(call(
            "consume",
            vec![Expr::decl_ref("i")],
        ))])),
    });

    let text = emit_stmt(&stmt);
    assert!(text.contains("for(int i = 0; i < 3; ++i)"));
}

#[test]
fn do_while_condition_follows_the_body() {
    let stmt = Stmt::DoWhile {
        body: Box::new(Stmt::Compound(vec![Stmt::Expr(call("step", vec![]))])),
        cond: Expr::decl_ref("running"),
    };

    let text = emit_stmt(&stmt);
    assert!(text.contains("do"));
    assert!(text.contains("} while(running);"));
}

#[test]
fn static_local_with_non_trivial_ctor_gets_a_guard() {
    let mut var = VarDecl::new("s", Type::record("std::string"))
        .with_init(Expr::Construct {
            ty: Type::record("std::string"),
            args: vec![Expr::StringLiteral("x".into())],
            list_init: true,
        })
        .at(loc(4, 3));
    var.storage = StorageClass::Static;
    var.has_non_trivial_static_init = true;

    let text = emit_decl(&Decl::Var(var));

    assert!(!text.contains("static std::string s"));
    assert!(text.contains("static bool __s"));
    assert!(text.contains("[sizeof(std::string)];"));
    assert!(text.contains("if( ! __s"));
    assert!(text.contains("new (&__s"));
    assert!(text.contains("std::string{\"x\"};"));
    assert!(text.contains(" = true;"));

    // Flag declaration, buffer declaration, then the guarded construct.
    let flag_at = text.find("static bool").unwrap();
    let buffer_at = text.find("static char").unwrap();
    let guard_at = text.find("if( !").unwrap();
    assert!(flag_at < buffer_at);
    assert!(buffer_at < guard_at);
}

#[test]
fn nrvo_variable_is_annotated() {
    let mut var = VarDecl::new("result", Type::record("Widget")).with_init(Expr::Construct {
        ty: Type::record("Widget"),
        args: vec![],
        list_init: false,
    });
    var.is_nrvo = true;

    let text = emit_decl(&Decl::Var(var));
    assert!(text.contains("/* NRVO variable */"));
    assert!(text.contains("Widget result = Widget();"));
}

#[test]
fn function_pointer_variable_gets_a_using_alias() {
    let fn_ptr = Type::FunctionPointer {
        ret: Box::new(Type::Builtin(BuiltinKind::Void)),
        params: vec![int()],
    };
    let var = VarDecl::new("callback", fn_ptr)
        .with_init(Expr::decl_ref("handler"))
        .at(loc(7, 1));

    let text = emit_decl(&Decl::Var(var));
    assert!(text.contains("using FuncPtr_7 = void (*)(int);"));
    assert!(text.contains("FuncPtr_7 callback = handler;"));
}

#[test]
fn unsupported_statement_leaves_a_marker() {
    let text = emit_stmt(&Stmt::Unsupported {
        kind: "CoroutineBodyStmt".into(),
    });
    assert!(text.contains("/* NYI: CoroutineBodyStmt */"));
}

#[test]
fn null_statement_is_a_bare_terminator() {
    assert_eq!(emit_stmt(&Stmt::Null), ";\n");
}
