use showc_core::ast::BinaryOperator;
use showc_core::ir::opt::const_fold::{fold_binary, fold_neg};
use showc_core::ir::tac::{Literal, Opcode, TacGenerator, dump};
use showc_core::{AstNode, TacInstr, generate_tac, parse_program, tokenize};

fn parse(source: &str) -> AstNode {
    let tokens = tokenize(source).expect("tokenize failed");
    parse_program(&tokens).expect("parse failed")
}

fn tac(source: &str) -> Vec<TacInstr> {
    generate_tac(&parse(source), false)
}

fn lines(source: &str) -> Vec<String> {
    tac(source).iter().map(|i| i.to_string()).collect()
}

/// Operand and instructions for the single expression in `show <expr>;`.
fn expression(source: &str) -> (String, Vec<TacInstr>) {
    let ast = parse(source);
    let expr = match ast.statements()[0].get_kind() {
        showc_core::AstNodeKind::Show { expr } => expr.as_ref().clone(),
        other => panic!("unexpected {:?}", other),
    };
    let mut generator = TacGenerator::new();
    let operand = generator.generate(&expr);
    (operand, generator.take_instructions())
}

#[test]
fn declarations_and_show() {
    assert_eq!(
        lines("int a = 5; int b = 10; int c = a + b; show c;"),
        vec!["a = 5", "b = 10", "t1 = a + b", "c = t1", "show c"]
    );
}

#[test]
fn literal_operands_fold_without_instructions() {
    let (operand, instrs) = expression("show 5 + 10;");
    assert_eq!(operand, "15");
    assert!(instrs.is_empty());
}

#[test]
fn nested_literals_fold_completely() {
    let (operand, instrs) = expression("show (2 + 3) * (10 - 4) / 3;");
    assert_eq!(operand, "10");
    assert!(instrs.is_empty());

    let (operand, _) = expression("show 1 less 2 and 'a' equal 'a';");
    assert_eq!(operand, "true");

    let (operand, _) = expression("show -(1.5 * 2.0);");
    assert_eq!(operand, "-3.0");
}

#[test]
fn folded_results_are_fixed_points() {
    for source in ["show 7 * 6;", "show 2.5 + 0.25;", "show 'x' non-equal 'y';", "show -2147483647 - 1;"] {
        let (operand, _) = expression(source);
        let literal = Literal::parse(&operand).expect("folded operand is a literal");
        assert_eq!(literal.to_string(), operand);
    }
}

#[test]
fn integer_folding_wraps() {
    let (operand, _) = expression("show 2147483647 + 1;");
    assert_eq!(operand, "-2147483648");
}

#[test]
fn mixed_literal_kinds_do_not_fold() {
    assert_eq!(fold_binary(BinaryOperator::Add, &Literal::Int(1), &Literal::Double(2.0)), None);
    assert_eq!(fold_binary(BinaryOperator::Add, &Literal::Str("a".into()), &Literal::Str("b".into())), None);
    assert_eq!(fold_neg(&Literal::Bool(true)), None);
}

#[test]
fn partially_literal_expression_emits_one_instruction() {
    let (operand, instrs) = expression("show x + (2 * 3);");
    assert_eq!(operand, "t1");
    assert_eq!(instrs.len(), 1);
    assert_eq!(instrs[0].to_string(), "t1 = x + 6");
}

#[test]
fn if_else_sequence() {
    assert_eq!(
        lines("if a less 1 { show 1; } else { show 2; };"),
        vec!["t1 = a less 1", "iffalse t1 goto L1", "show 1", "goto L2", "L1:", "show 2", "L2:"]
    );
}

#[test]
fn if_without_else_still_emits_both_labels() {
    assert_eq!(
        lines("if flag { show 1; };"),
        vec!["iffalse flag goto L1", "show 1", "goto L2", "L1:", "L2:"]
    );
}

#[test]
fn while_sequence() {
    assert_eq!(
        lines("int a = 1; while a less 10 { show a; int a = a + 1; };"),
        vec![
            "a = 1",
            "L1:",
            "t1 = a less 10",
            "iffalse t1 goto L2",
            "show a",
            "t2 = a + 1",
            "a = t2",
            "goto L1",
            "L2:",
        ]
    );
}

#[test]
fn function_declaration_and_call() {
    let instrs = tac("func add(x, int y) { int r = x + y; show r; }; add(1, 2);");
    let text: Vec<String> = instrs.iter().map(|i| i.to_string()).collect();
    assert_eq!(
        text,
        vec![
            "func add",
            "formal any x",
            "formal int y",
            "t1 = x + y",
            "r = t1",
            "show r",
            "endfunc add",
            "t2 = call add with 2 args",
            "param 1",
            "param 2",
        ]
    );
    assert_eq!(instrs[8].op, Opcode::Arg(0));
    assert_eq!(instrs[9].op, Opcode::Arg(1));
}

#[test]
fn call_arguments_are_evaluated_before_the_call() {
    let text = lines("f(a + 1, b);");
    assert_eq!(text, vec!["t1 = a + 1", "t2 = call f with 2 args", "param t1", "param b"]);
}

#[test]
fn counters_continue_across_units() {
    let mut generator = TacGenerator::new();
    generator.generate(&parse("if c { show 1; }; show a + b;"));
    let first = generator.take_instructions();
    generator.generate(&parse("if c { show 1; }; show a + b;"));
    let second = generator.take_instructions();
    assert_eq!(dump(&first), "iffalse c goto L1\nshow 1\ngoto L2\nL1:\nL2:\nt1 = a + b\nshow t1\n");
    assert_eq!(dump(&second), "iffalse c goto L3\nshow 1\ngoto L4\nL3:\nL4:\nt2 = a + b\nshow t2\n");
}

#[test]
fn string_and_double_literal_spelling() {
    assert_eq!(lines("string s = 'hi'; double d = 2.0;"), vec!["s = \"hi\"", "d = 2.0"]);
}

#[test]
fn serializes_opcode_mnemonics() {
    let instrs = tac("show -x;");
    let json = serde_json::to_value(&instrs).expect("serialize");
    assert_eq!(json[0]["op"], "neg");
    assert_eq!(json[0]["result"], "t1");
    assert_eq!(json[1]["op"], "show");
}
