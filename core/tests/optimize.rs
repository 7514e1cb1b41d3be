use showc_core::ast::BinaryOperator;
use showc_core::ir::opt::{dce::eliminate_dead_temporaries, optimize};
use showc_core::ir::tac::{Opcode, TacInstr};
use showc_core::{generate_tac, parse_program, tokenize};

fn optimized(source: &str) -> Vec<String> {
    let tokens = tokenize(source).expect("tokenize failed");
    let ast = parse_program(&tokens).expect("parse failed");
    generate_tac(&ast, true).iter().map(|i| i.to_string()).collect()
}

fn add(lhs: &str, rhs: &str, result: &str) -> TacInstr {
    TacInstr::binary(BinaryOperator::Add, lhs.into(), rhs.into(), result.into())
}

#[test]
fn unread_temporary_is_removed() {
    assert_eq!(optimized("a + b; show a;"), vec!["show a"]);
}

#[test]
fn removal_cascades_to_operands() {
    let instrs = vec![add("a", "b", "t1"), add("t1", "c", "t2"), TacInstr::show("a".into())];
    let out = eliminate_dead_temporaries(instrs);
    assert_eq!(out, vec![TacInstr::show("a".into())]);
}

#[test]
fn temporaries_feeding_show_survive() {
    assert_eq!(optimized("show a * 2;"), vec!["t1 = a * 2", "show t1"]);
}

#[test]
fn temporaries_feeding_branches_survive() {
    let text = optimized("while a less 3 { show a; };");
    assert!(text.contains(&"t1 = a less 3".to_string()));
    assert!(text.contains(&"iffalse t1 goto L2".to_string()));
}

#[test]
fn temporaries_feeding_calls_survive() {
    let text = optimized("func f(x) { show x; }; f(a + 1);");
    assert!(text.contains(&"t1 = a + 1".to_string()));
    assert!(text.contains(&"param t1".to_string()));
}

#[test]
fn unread_call_result_keeps_the_call() {
    let text = optimized("func f() { show 1; }; f();");
    assert_eq!(text.last().map(String::as_str), Some("t1 = call f with 0 args"));
}

#[test]
fn variable_assignments_are_never_removed() {
    assert_eq!(optimized("int unused = a + 1;"), vec!["t1 = a + 1", "unused = t1"]);
}

#[test]
fn control_flow_and_markers_are_kept() {
    let instrs = vec![
        TacInstr::new(Opcode::Func, None, None, Some("f".into())),
        TacInstr::label("L1".into()),
        TacInstr::goto("L1".into()),
        TacInstr::new(Opcode::EndFunc, None, None, Some("f".into())),
    ];
    assert_eq!(optimize(instrs.clone()), instrs);
}
