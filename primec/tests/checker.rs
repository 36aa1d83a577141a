use primec::grammer::ast::{Expr, FuncId};
use primec::{check, parse, Error};

fn assert(code: &str) {
    let ast = parse(code).unwrap();
    let result = check(&ast);
    assert!(result.is_ok(), "Error found: {:?}", result.err());
}

fn assert_err(code: &str) -> Error {
    let ast = parse(code).unwrap();
    match check(&ast) {
        Ok(resolution) => panic!("Checked without error: {:#?}", resolution),
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

// Accepted
case!(unique_functions, "func a() { } func b() { } func main() { a(); b(); }");
case!(params_in_scope, "func add(int a, int b) -> int { return a + b; }");
case!(shadow_in_if, "func main() { int x := 1; if x { int x := 2; x := 3; } }");
case!(shadow_in_else, "func main() { int x := 1; if x { } else { int x := 2; } }");
case!(shadow_param, "func f(int x) { if x { int x := 0; } }");
case!(sibling_blocks, "func main() { if 1 { int y := 1; } else { int y := 2; } }");
case!(for_scope, "func main() { for int i := 0; i < 3; i += 1 { int j := i; } for int i := 0; i < 3; i += 1 { } }");
case!(recursion, "func f(int n) -> int { return f(n - 1); }");
case!(same_name_in_two_funcs, "func f(int x) { } func g(int x) { int y := x; }");
case!(index_expr, "func main() { array a := 0; int i := 1; a[i] := a[i + 1]; }");

// Rejected
case_err!(duplicate_function, "func f() { } func f() { }", Error::DuplicateFunction { .. });
case_err!(duplicate_param, "func f(int a, int a) { }", Error::DuplicateParameter { .. });
case_err!(duplicate_local, "func main() { int x := 1; int x := 2; }", Error::DuplicateVariable { .. });
case_err!(local_clashes_param, "func f(int x) { int x := 2; }", Error::DuplicateVariable { .. });
case_err!(undefined_variable, "func main() { int x := y; }", Error::UndefinedVariable { .. });
case_err!(out_of_scope, "func main() { if 1 { int y := 1; } int z := y; }", Error::UndefinedVariable { .. });
case_err!(loop_var_out_of_scope, "func main() { for int i := 0; i < 1; i += 1 { } i := 2; }", Error::UndefinedVariable { .. });
case_err!(other_funcs_param, "func f(int a) { } func main() { a := 1; }", Error::UndefinedVariable { .. });
case_err!(undefined_function, "func main() { g(); }", Error::UndefinedFunction { .. });
case_err!(forward_call, "func main() { g(); } func g() { }", Error::UndefinedFunction { .. });
case_err!(arity_too_few, "func f(int a, int b) { } func main() { f(1); }", Error::ArityMismatch { expected: 2, found: 1, .. });
case_err!(arity_too_many, "func f() { } func main() { f(1); }", Error::ArityMismatch { expected: 0, found: 1, .. });
case_err!(call_variable, "func f() { } func main() { int f := 1; f(); }", Error::NotAFunction { .. });
case_err!(undefined_in_index, "func main() { array a := 0; a[k] := 1; }", Error::UndefinedVariable { .. });
case_err!(undefined_in_arg, "func f(int a) { } func main() { f(q); }", Error::UndefinedVariable { .. });

#[test]
fn undefined_identifier_is_named() {
    let e = assert_err("func main() { int x := 1; x := counter + 1; }");
    assert!(matches!(&e, Error::UndefinedVariable { name, .. } if name == "counter"));
    assert!(e.to_string().contains("counter"));
}

#[test]
fn undefined_function_is_named() {
    let e = assert_err("func main() { launch(1); }");
    assert!(e.to_string().contains("launch"));
}

#[test]
fn duplicate_param_names_function() {
    let e = assert_err("func swap(int a, int b, int a) { }");
    match e {
        Error::DuplicateParameter { name, func, pos } => {
            assert_eq!(name, "a");
            assert_eq!(func, "swap");
            assert_eq!((pos.row, pos.col), (0, 28));
        }
        e => panic!("unexpected error: {:?}", e),
    }
}

#[test]
fn resolution_links_calls_and_idents() {
    let ast = parse("func add(int a, int b) -> int { return a + b; } func main() { int r := add(1, 2); }")
        .unwrap();
    let resolution = check(&ast).unwrap();

    let calls: Vec<_> = ast
        .exprs
        .iter_enumerated()
        .filter(|(_, expr)| matches!(expr, Expr::Call(..)))
        .map(|(id, _)| resolution.call(id))
        .collect();
    assert_eq!(calls, vec![Some(FuncId::from(0))]);

    let add = &ast.funcs[FuncId::from(0)];
    for (id, expr) in ast.exprs.iter_enumerated() {
        if let Expr::Ident(name, _) = expr {
            let var = resolution.ident(id).unwrap();
            assert_eq!(&ast.vars[var].name, name);
            assert!(add.params.contains(&var));
        }
    }
    assert_eq!(resolution.idents.len(), 2);
}

#[test]
fn shadowing_resolves_innermost() {
    let ast = parse("func main() { int x := 1; if x { int x := 2; x := 3; } }").unwrap();
    let resolution = check(&ast).unwrap();
    let (outer, inner) = (0usize, 1usize);
    let targets: Vec<usize> = ast
        .exprs
        .iter_enumerated()
        .filter(|(_, expr)| matches!(expr, Expr::Ident(..)))
        .map(|(id, _)| resolution.ident(id).unwrap().into())
        .collect();
    // condition `x` sees the outer declaration, the assignment the inner one
    assert_eq!(targets, vec![outer, inner]);
}

fn error_pos(code: &str) -> (usize, usize) {
    let e = assert_err(code);
    let pos = e.pos().unwrap_or_else(|| panic!("no position on {:?}", e));
    (pos.row, pos.col)
}

#[test]
fn semantic_errors_carry_position() {
    assert_eq!(error_pos("func f() { }\nfunc f() { }"), (1, 5));
    assert_eq!(error_pos("func main() {\n  int x := 1;\n  int x := 2;\n}"), (2, 6));
    assert_eq!(error_pos("func main() {\n  int x := 1 + y;\n}"), (1, 15));
    assert_eq!(error_pos("func main() { go(); }"), (0, 14));
    assert_eq!(error_pos("func f(int a) { }\nfunc main() { f(1, 2); }"), (1, 14));
    assert_eq!(error_pos("func f() { }\nfunc main() { int f := 1; f(); }"), (1, 26));
}
