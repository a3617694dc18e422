// Integration tests for AST construction and teardown

use grapher::syntax::ast::{
    new_arg_list, new_expr_list, new_stmt_list, Arg, ArgList, Atom, AtomKind, Expr, ExprList,
    ExprOp, FuncCall, FuncDef, PrimitiveType, Stmt, StmtKind, StmtList,
};
use grapher::syntax::{Lexer, TokenKind};

fn var(name: &str) -> Expr {
    Expr::leaf(Atom::new(AtomKind::Var, name))
}

fn int(text: &str) -> Expr {
    Expr::leaf(Atom::new(AtomKind::Integer, text))
}

#[test]
fn test_three_element_expr_list() {
    let list: Option<Box<ExprList>> = None;
    let list = new_expr_list(list, int("1"));
    let list = new_expr_list(Some(list), int("2"));
    let list = new_expr_list(Some(list), int("3"));

    assert_eq!(list.len(), 3);

    // head insertion: the last element added comes first
    let texts: Vec<String> = list.iter().map(|e| e.to_string()).collect();
    assert_eq!(texts, vec!["3", "2", "1"]);

    let payloads: usize = list.iter().map(Expr::node_count).sum();
    assert_eq!(payloads, 3);

    drop(list);
}

#[test]
fn test_func_def_build_and_drop() {
    let params = new_arg_list(None, Arg::new(PrimitiveType::Int, "x"));
    let body_expr = Expr::binary(ExprOp::Mul, var("x"), int("2"));
    let body = new_stmt_list(None, Stmt::Expr(body_expr));

    let def = FuncDef::new(PrimitiveType::Int, "f", Some(params), Some(body));

    assert_eq!(def.name, "f");
    assert_eq!(def.param_count(), 1);
    let body = def.body.as_ref().unwrap();
    assert_eq!(body.item.kind(), StmtKind::Expr);
    match &body.item {
        Stmt::Expr(e) => assert_eq!(e.to_string(), "(* x 2)"),
        other => panic!("unexpected statement {:?}", other),
    }

    let program = new_stmt_list(None, Stmt::FuncDef(def));
    drop(program);
}

#[test]
fn test_missing_children_are_fine() {
    let def = FuncDef::new(PrimitiveType::Graph, "empty", None, None);
    assert_eq!(def.param_count(), 0);
    drop(def);

    let call = FuncCall::new("noargs", None);
    let expr = Expr::leaf(Atom::call(call));
    assert_eq!(expr.to_string(), "(call noargs)");
    drop(expr);

    let bare = Expr::new(ExprOp::AtomRef, None, None, None);
    assert!(!bare.is_leaf());
    drop(bare);
}

#[test]
fn test_source_order_recovery() {
    let mut params: Option<Box<ArgList>> = None;
    for (ty, name) in [
        (PrimitiveType::Graph, "g"),
        (PrimitiveType::Int, "i"),
        (PrimitiveType::Bool, "b"),
    ] {
        params = Some(new_arg_list(params, Arg::new(ty, name)));
    }

    let params = params.unwrap();
    let names: Vec<&str> = params.iter_source_order().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["g", "i", "b"]);

    let owned = params.to_source_order();
    assert_eq!(owned[0], Arg::new(PrimitiveType::Graph, "g"));
    assert_eq!(owned[2].ty, PrimitiveType::Bool);
}

#[test]
fn test_nested_call_tree() {
    // dist(g, -(a + b))
    let inner = Expr::unary(
        ExprOp::UnaryNeg,
        Expr::paren(Expr::binary(ExprOp::Add, var("a"), var("b"))),
    );
    let args = new_expr_list(None, var("g"));
    let args = new_expr_list(Some(args), inner);
    let call = Expr::leaf(Atom::call(FuncCall::new("dist", Some(args))));

    assert_eq!(call.to_string(), "(call dist g (neg (paren (+ a b))))");
    assert_eq!(call.node_count(), 7);
}

#[test]
fn test_building_from_tokens() {
    // a hand-driven reduction of `1.5 * r`
    let tokens = Lexer::new("1.5 * r").tokenize();

    let left = Atom::from_token(&tokens[0]).map(Expr::leaf).unwrap();
    let op = ExprOp::from_operator(tokens[1].kind).unwrap();
    let right = Atom::from_token(&tokens[2]).map(Expr::leaf).unwrap();
    let expr = Expr::binary(op, left, right);

    assert_eq!(expr.to_string(), "(* 1.5 r)");
    assert_eq!(expr.left.as_ref().and_then(|l| l.atom.as_ref()).map(|a| a.kind), Some(AtomKind::Float));
    assert_eq!(tokens[3].kind, TokenKind::EndOfInput);
}

#[test]
fn test_long_list_drops() {
    let mut list: Option<Box<ExprList>> = None;
    for i in 0..1000 {
        list = Some(new_expr_list(list, int(&i.to_string())));
    }
    let list = list.unwrap();
    assert_eq!(list.len(), 1000);
    assert_eq!(list.item.to_string(), "999");
    drop(list);
}

#[test]
fn test_very_long_statement_list_drops() {
    let mut program: Option<Box<StmtList>> = None;
    for i in 0..250_000 {
        program = Some(new_stmt_list(program, Stmt::Expr(int(&i.to_string()))));
    }
    let program = program.unwrap();
    assert_eq!(program.len(), 250_000);

    let copy = program.clone();
    assert_eq!(copy, program);
    assert_eq!(copy.item.kind(), StmtKind::Expr);

    drop(copy);
    drop(program);
}
