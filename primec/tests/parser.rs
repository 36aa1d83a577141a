use primec::grammer::ast::{BinaryOp, Expr, FuncId, Stmt, TypeRef};
use primec::grammer::lexer::Lexer;
use primec::grammer::parsercore::Parser;
use primec::Error;

fn assert(code: &str) {
    for (line_idx, line) in code.lines().enumerate() {
        println!("{:>2}: {}", line_idx, line);
    }
    let ast = Parser::new(Lexer::new(code)).parse();
    println!("{:#?}", ast);
    assert!(ast.is_ok(), "Error found: {:?}", ast.err());
}

fn assert_err(code: &str) -> Error {
    let result = primec::parse(code);
    println!("{:?}", result);
    match result {
        Ok(ast) => panic!("Parsed without error: {:#?}", ast),
        Err(e) => e,
    }
}

macro_rules! case {
    ($name:ident, $code:expr) => {
        #[test]
        fn $name() {
            assert($code);
        }
    };
}

macro_rules! case_err {
    ($name:ident, $code:expr, $expect:pat) => {
        #[test]
        fn $name() {
            let e = assert_err($code);
            assert!(matches!(e, $expect), "unexpected error: {:?}", e);
        }
    };
}

// Function
case!(empty_program, "");
case!(func_main, "func main() { }");
case!(func_args, "func add(int a, int b) -> int { return a + b; }");
case!(func_types, "func f(bool b, char c, array xs) -> bool { return b; }");
case!(func_comment, "// leading\nfunc main() { // trailing\n}");

// Statements
case!(stmt_var, "func main() { int x := 5; }");
case!(stmt_if, "func main() { int c := 1; if c { c := 2; } }");
case!(stmt_if_else, "func main() { int c := 1; if c == 1 { c := 2; } else { c := 3; } }");
case!(stmt_for, "func main() { int s := 0; for int i := 0; i < 10; i += 1 { s += i; } }");
case!(stmt_return_value, "func f() -> int { return 1; }");
case!(stmt_return_void, "func main() { return; }");
case!(stmt_expr_call, "func g() { } func main() { g(); }");

// Expressions
case!(expr_precedence, "func main() { int x := 1 + 2 * 3 - 4 / 2 % 3; }");
case!(expr_logic, "func main() { int x := 1 < 2 && 3 >= 4 || 5 != 6; }");
case!(expr_paren, "func main() { int x := (1 + 2) * 3; }");
case!(expr_index, "func main() { array a := 0; a[1] := a[0] + 1; }");
case!(expr_call_args, "func f(int a, int b) { } func main() { f(1, 2 + 3); }");
case!(expr_nested_assign, "func main() { int x := 0; int y := x := 2; }");

// Errors
case_err!(err_missing_semicolon, "func main() { int x := 5 }", Error::UnexpectedToken { .. });
case_err!(err_missing_paren, "func main( { }", Error::UnexpectedToken { .. });
case_err!(err_bad_type, "func f(float x) { }", Error::UnexpectedToken { .. });
case_err!(err_eof_in_block, "func main() { int x := 1;", Error::UnexpectedToken { .. });
case_err!(err_trailing_tokens, "func main() { } int x := 1;", Error::UnexpectedToken { .. });
case_err!(err_invalid_char, "func main() { int x := 1 # 2; }", Error::InvalidCharacter { .. });
case_err!(err_assign_to_literal, "func main() { 1 := 2; }", Error::InvalidAssignTarget { .. });
case_err!(err_assign_to_call, "func f() { } func main() { f() := 2; }", Error::InvalidAssignTarget { .. });
case_err!(err_literal_range, "func main() { int x := 99999999999; }", Error::InvalidLiteral { .. });
case_err!(err_missing_expr, "func main() { int x := ; }", Error::UnexpectedToken { .. });

#[test]
fn func_count() {
    let code = "func a() { } func b(int x) -> int { return x; } func main() { }";
    let ast = primec::parse(code).unwrap();
    assert_eq!(ast.funcs.len(), code.matches("func").count());
    let names: Vec<_> = ast.funcs.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "main"]);
    let b = &ast.funcs[FuncId::from(1)];
    assert_eq!(b.ret, Some(TypeRef::Int));
    assert_eq!(b.params.len(), 1);
    assert_eq!(ast.vars[b.params[0]].name, "x");
}

#[test]
fn binary_left_associative() {
    let ast = primec::parse("func main() { 1 - 2 - 3; }").unwrap();
    let main = &ast.funcs[FuncId::from(0)];
    let Stmt::Expr(expr) = ast.stmts[main.body[0]] else {
        panic!("expected expression statement");
    };
    // (1 - 2) - 3
    let Expr::Binary(BinaryOp::Sub, lhs, rhs) = ast.exprs[expr] else {
        panic!("expected subtraction");
    };
    assert_eq!(ast.exprs[rhs], Expr::Literal(3));
    assert!(matches!(ast.exprs[lhs], Expr::Binary(BinaryOp::Sub, _, _)));
}

#[test]
fn multiplicative_binds_tighter() {
    let ast = primec::parse("func main() { 1 + 2 * 3; }").unwrap();
    let main = &ast.funcs[FuncId::from(0)];
    let Stmt::Expr(expr) = ast.stmts[main.body[0]] else {
        panic!("expected expression statement");
    };
    let Expr::Binary(BinaryOp::Add, lhs, rhs) = ast.exprs[expr] else {
        panic!("expected addition at the root");
    };
    assert_eq!(ast.exprs[lhs], Expr::Literal(1));
    assert!(matches!(ast.exprs[rhs], Expr::Binary(BinaryOp::Mul, _, _)));
}

#[test]
fn compound_assignment_desugars() {
    let ast = primec::parse("func main() { int x := 1; x *= 4; }").unwrap();
    let main = &ast.funcs[FuncId::from(0)];
    let Stmt::Expr(expr) = ast.stmts[main.body[1]] else {
        panic!("expected expression statement");
    };
    let Expr::Assign(target, value) = ast.exprs[expr] else {
        panic!("expected assignment");
    };
    let Expr::Binary(BinaryOp::Mul, lhs, rhs) = ast.exprs[value] else {
        panic!("expected multiplication");
    };
    assert_ne!(target, lhs);
    assert_eq!(ast.exprs[target], ast.exprs[lhs]);
    assert_eq!(ast.exprs[lhs], Expr::Ident("x".to_string(), vec![]));
    assert_eq!(ast.exprs[rhs], Expr::Literal(4));
}

#[test]
fn error_reports_position_and_spelling() {
    let e = assert_err("func main() {\n  int x := 5\n}");
    match e {
        Error::UnexpectedToken {
            expected,
            found,
            pos,
        } => {
            assert_eq!(expected, "';'");
            assert_eq!(found, "'}'");
            assert_eq!((pos.row, pos.col), (2, 0));
        }
        e => panic!("unexpected error: {:?}", e),
    }
}

#[test]
fn error_at_end_of_file() {
    let e = assert_err("func main() {");
    match e {
        Error::UnexpectedToken { found, .. } => assert_eq!(found, "end of file"),
        e => panic!("unexpected error: {:?}", e),
    }
}

#[test]
fn trailing_tokens_expect_function() {
    let e = assert_err("func main() { } return;");
    match e {
        Error::UnexpectedToken {
            expected, found, ..
        } => {
            assert_eq!(expected, "function declaration");
            assert_eq!(found, "'return'");
        }
        e => panic!("unexpected error: {:?}", e),
    }
}

fn expected_of(code: &str) -> String {
    match assert_err(code) {
        Error::UnexpectedToken { expected, .. } => expected,
        e => panic!("unexpected error: {:?}", e),
    }
}

#[test]
fn expected_tokens_are_spelled() {
    assert_eq!(expected_of("func f(int a { }"), "')'");
    assert_eq!(expected_of("func f(int) { }"), "identifier");
    assert_eq!(expected_of("func main() { for int i 0; }"), "':='");
    assert_eq!(expected_of("func main() { int x := a[1; }"), "']'");
}
