use showc_core::analyzers::semantic::Analyzer;
use showc_core::{
    AstNode, Type, TypeEnv, TypeError, TypeErrorKind, analyze_semantic_rules, check, parse_program, tokenize,
};

fn parse(source: &str) -> AstNode {
    let tokens = tokenize(source).expect("tokenize failed");
    parse_program(&tokens).expect("parse failed")
}

fn check_source(source: &str) -> Result<TypeEnv, TypeError> {
    analyze_semantic_rules(&parse(source))
}

fn error_kind(source: &str) -> TypeErrorKind {
    check_source(source).expect_err("expected a type error").kind
}

#[test]
fn well_typed_program_binds_declarations() {
    let env = check_source("int a = 5; int b = 10; int c = a + b; show c;").expect("type check failed");
    assert_eq!(env.lookup("c"), Some(Type::Int));
    assert_eq!(env.lookup("a"), Some(Type::Int));
}

#[test]
fn declared_type_must_match_initializer() {
    let kind = error_kind("int a = 5; int b = 10; string c = a + b;");
    assert_eq!(
        kind,
        TypeErrorKind::TypeMismatch { name: "c".to_string(), declared: Type::String, actual: Type::Int }
    );
}

#[test]
fn no_implicit_int_double_coercion() {
    assert!(matches!(error_kind("double d = 1;"), TypeErrorKind::TypeMismatch { .. }));
    assert!(matches!(error_kind("show 1 + 2.0;"), TypeErrorKind::InvalidOperands { .. }));
}

#[test]
fn string_concatenation_is_rejected() {
    let kind = error_kind("string a = 'x'; string b = 'y'; show a + b;");
    assert_eq!(
        kind,
        TypeErrorKind::InvalidOperands { op: "+".to_string(), left: Type::String, right: Type::String }
    );
}

#[test]
fn comparisons_and_logic_yield_boolean() {
    let env = check_source(
        "boolean a = 1 less 2; boolean b = 'x' equal 'y'; boolean c = a and b or true; boolean d = 2.0 more 1.5;",
    )
    .expect("type check failed");
    assert_eq!(env.lookup("c"), Some(Type::Boolean));
    assert!(matches!(error_kind("show true less false;"), TypeErrorKind::InvalidOperands { .. }));
    assert!(matches!(error_kind("show 1 and 2;"), TypeErrorKind::InvalidOperands { .. }));
}

#[test]
fn negation_requires_a_number() {
    check_source("show -1; show -2.5;").expect("type check failed");
    assert!(matches!(error_kind("show -'x';"), TypeErrorKind::InvalidOperand { .. }));
}

#[test]
fn undefined_variable() {
    assert_eq!(error_kind("show y;"), TypeErrorKind::UndefinedVariable { name: "y".to_string() });
}

#[test]
fn literal_zero_divisor() {
    assert_eq!(error_kind("show 10 / 0;"), TypeErrorKind::DivisionByZero);
    assert_eq!(error_kind("show 1.0 / 0.0;"), TypeErrorKind::DivisionByZero);
    check_source("int z = 0; show 10 / z;").expect("non-literal divisor is accepted");
}

#[test]
fn divisor_folding_to_zero() {
    assert_eq!(error_kind("int x = 10 / (2 - 2); show x;"), TypeErrorKind::DivisionByZero);
    assert_eq!(error_kind("int a = 5; int b = a / (1 - 1); show b;"), TypeErrorKind::DivisionByZero);
    assert_eq!(error_kind("show 2.0 / -(1.5 - 1.5);"), TypeErrorKind::DivisionByZero);
    check_source("int a = 5; show a / (3 - 1);").expect("non-zero constant divisor is accepted");
}

#[test]
fn conditions_must_be_boolean() {
    assert_eq!(
        error_kind("if 1 { show 1; };"),
        TypeErrorKind::InvalidCondition { construct: "if", found: Type::Int }
    );
    assert_eq!(
        error_kind("while 'x' { show 1; };"),
        TypeErrorKind::InvalidCondition { construct: "while", found: Type::String }
    );
}

#[test]
fn branch_declarations_land_in_enclosing_scope() {
    let env = check_source("if true { int inner = 1; }; show inner;").expect("type check failed");
    assert_eq!(env.lookup("inner"), Some(Type::Int));
}

#[test]
fn untyped_params_take_the_first_call_types() {
    let env = check_source("func add(x, y) { show x + y; }; add(1, 2); add(3, 4);").expect("type check failed");
    let add = env.lookup_function("add").expect("add is registered");
    assert_eq!(add.params, vec![Type::Int, Type::Int]);
}

#[test]
fn later_call_must_match_specialized_params() {
    let kind = error_kind("func f(x) { show x; }; f(1); f('s');");
    assert_eq!(
        kind,
        TypeErrorKind::ArgumentMismatch { name: "f".to_string(), index: 0, expected: Type::Int, found: Type::String }
    );
}

#[test]
fn body_is_checked_against_call_argument_types() {
    let kind = error_kind("func f(x) { int y = x + 1; show y; }; f('a');");
    assert_eq!(
        kind,
        TypeErrorKind::InvalidOperands { op: "+".to_string(), left: Type::String, right: Type::Int }
    );
}

#[test]
fn calls_inside_untyped_bodies_wait_for_concrete_types() {
    let source = "func emit(v) { show v; }; func twice(w) { emit(w * 2.0); }; twice(1.5);";
    let env = check_source(source).expect("type check failed");
    assert_eq!(env.lookup_function("emit").expect("emit").params, vec![Type::Double]);
    assert_eq!(env.lookup_function("twice").expect("twice").params, vec![Type::Double]);
}

#[test]
fn typed_params_are_checked_at_call_sites() {
    let kind = error_kind("func inc(int x) { show x + 1; }; inc('a');");
    assert_eq!(
        kind,
        TypeErrorKind::ArgumentMismatch { name: "inc".to_string(), index: 0, expected: Type::Int, found: Type::String }
    );
}

#[test]
fn call_arity_is_checked() {
    let kind = error_kind("func add(x, y) { show x + y; }; add(1);");
    assert_eq!(kind, TypeErrorKind::ArityMismatch { name: "add".to_string(), expected: 2, found: 1 });
}

#[test]
fn undefined_function() {
    assert_eq!(error_kind("nope(1);"), TypeErrorKind::UndefinedFunction { name: "nope".to_string() });
}

#[test]
fn function_bodies_do_not_see_caller_variables() {
    assert!(matches!(
        error_kind("int outer = 1; func f() { show outer; };"),
        TypeErrorKind::UndefinedVariable { .. }
    ));
}

#[test]
fn calls_to_user_functions_are_void() {
    assert!(matches!(error_kind("func f() { show 1; }; show f();"), TypeErrorKind::InvalidOperand { .. }));
    assert!(matches!(error_kind("func f() { show 1; }; int x = f();"), TypeErrorKind::TypeMismatch { .. }));
}

#[test]
fn recursion_is_allowed() {
    check_source("func down(n) { if n more 0 { down(n - 1); }; };").expect("type check failed");
}

#[test]
fn environment_persists_between_units() {
    let mut env = TypeEnv::new();
    check(&parse("int a = 1;"), &mut env).expect("first unit");
    check(&parse("show a + 1;"), &mut env).expect("second unit sees a");
}

#[test]
fn analyzer_restores_environment_on_error() {
    let mut analyzer = Analyzer::new();
    analyzer.analyze(&parse("int a = 1;")).expect("first unit");
    analyzer.analyze(&parse("int b = 2; show missing;")).expect_err("second unit fails");
    assert_eq!(analyzer.env().lookup("a"), Some(Type::Int));
    assert_eq!(analyzer.env().lookup("b"), None);
}
