use showc_core::{AstNode, RuntimeError, RuntimeErrorKind, RuntimeScope, Value, evaluate, parse_program, tokenize};

fn parse(source: &str) -> AstNode {
    let tokens = tokenize(source).expect("tokenize failed");
    parse_program(&tokens).expect("parse failed")
}

fn run_in(source: &str, scope: &mut RuntimeScope) -> Result<String, RuntimeError> {
    let mut out = Vec::new();
    evaluate(&parse(source), scope, &mut out)?;
    Ok(String::from_utf8(out).expect("utf-8 output"))
}

fn run(source: &str) -> Result<String, RuntimeError> {
    run_in(source, &mut RuntimeScope::new())
}

#[test]
fn while_loop_counts_to_nine() {
    let out = run("int a=1; while a less 10 { show a; int a = a + 1; };").expect("run failed");
    assert_eq!(out, "1\n2\n3\n4\n5\n6\n7\n8\n9\n");
}

#[test]
fn zero_iteration_loop() {
    assert_eq!(run("int a = 10; while a less 10 { show a; };").expect("run failed"), "");
}

#[test]
fn if_else_branches() {
    let out = run("int a = 3; if a more 2 { show 'big'; } else { show 'small'; }; if a less 2 { show 'no'; };")
        .expect("run failed");
    assert_eq!(out, "big\n");
}

#[test]
fn function_call_prints_sum_and_keeps_caller_bindings() {
    let mut scope = RuntimeScope::new();
    let out = run_in(
        "int x = 100; int y = 200; func add(x, y) { int r = x + y; show r; }; add(3, 4); show x; show y;",
        &mut scope,
    )
    .expect("run failed");
    assert_eq!(out, "7\n100\n200\n");
    assert_eq!(scope.get("x"), Some(&Value::Int(100)));
    assert_eq!(scope.get("r"), None);
}

#[test]
fn arguments_are_evaluated_in_the_caller() {
    let out = run("int n = 5; func twice(v) { show v * 2; }; twice(n + 1);").expect("run failed");
    assert_eq!(out, "12\n");
}

#[test]
fn recursion() {
    let out = run("func down(n) { if n more 0 { show n; down(n - 1); }; }; down(3);").expect("run failed");
    assert_eq!(out, "3\n2\n1\n");
}

#[test]
fn unbounded_recursion_is_stopped() {
    let err = std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(|| run("func f(n) { f(n); }; f(1);"))
        .expect("spawn")
        .join()
        .expect("join")
        .expect_err("expected runtime error");
    assert!(matches!(err.kind, RuntimeErrorKind::CallDepthExceeded { .. }));
}

#[test]
fn division_by_zero_is_a_runtime_error() {
    let err = run("int z = 0; show 10 / z;").expect_err("expected runtime error");
    assert_eq!(err.kind, RuntimeErrorKind::DivisionByZero);
    let err = run("double z = 0.0; show 1.0 / z;").expect_err("expected runtime error");
    assert_eq!(err.kind, RuntimeErrorKind::DivisionByZero);
}

#[test]
fn string_addition_is_unsupported() {
    let err = run("show 'a' + 'b';").expect_err("expected runtime error");
    assert_eq!(
        err.kind,
        RuntimeErrorKind::UnsupportedOperation {
            op: "+".to_string(),
            left: "string".to_string(),
            right: Some("string".to_string()),
        }
    );
}

#[test]
fn integer_arithmetic_wraps() {
    assert_eq!(run("int m = 2147483647; show m + 1;").expect("run failed"), "-2147483648\n");
}

#[test]
fn doubles_and_mixed_arithmetic() {
    assert_eq!(run("show 2.5 * 2.0; show 1 + 0.5; show 7 / 2;").expect("run failed"), "5.000000\n1.500000\n3\n");
}

#[test]
fn comparisons_and_logic() {
    let out = run("show 'abc' less 'abd'; show 1 equal 1 and 2 non-equal 2; show true or false;").expect("run failed");
    assert_eq!(out, "true\nfalse\ntrue\n");
}

#[test]
fn non_boolean_condition() {
    let err = run("while 1 { show 1; };").expect_err("expected runtime error");
    assert_eq!(
        err.kind,
        RuntimeErrorKind::NonBooleanCondition { construct: "while", found: "int".to_string() }
    );
}

#[test]
fn undefined_names() {
    let err = run("show ghost;").expect_err("expected runtime error");
    assert_eq!(err.kind, RuntimeErrorKind::UndefinedVariable { name: "ghost".to_string() });
    let err = run("ghost();").expect_err("expected runtime error");
    assert_eq!(err.kind, RuntimeErrorKind::UndefinedFunction { name: "ghost".to_string() });
}

#[test]
fn showing_a_call_result_fails() {
    let err = run("func f() { show 1; }; show f();").expect_err("expected runtime error");
    assert!(matches!(err.kind, RuntimeErrorKind::UnsupportedOperation { .. }));
}

#[test]
fn scope_persists_between_evaluations() {
    let mut scope = RuntimeScope::new();
    run_in("int a = 41; func inc(v) { show v + 1; };", &mut scope).expect("first unit");
    assert_eq!(run_in("inc(a);", &mut scope).expect("second unit"), "42\n");
}
