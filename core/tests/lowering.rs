use showc_core::ir::tac::TacInstr;
use showc_core::ir::{Block, Inst, IrType, LoweringErrorKind, Module, Terminator};
use showc_core::{CompileOptions, generate_tac, lower_tac_to_ir, parse_program, tokenize};

fn tac(source: &str) -> Vec<TacInstr> {
    let tokens = tokenize(source).expect("tokenize failed");
    let ast = parse_program(&tokens).expect("parse failed");
    generate_tac(&ast, true)
}

fn lower(source: &str) -> Module {
    lower_tac_to_ir(&tac(source), &CompileOptions::default()).expect("lowering failed")
}

fn calls<'m>(module: &'m Module, function: &str) -> Vec<&'m str> {
    module
        .function(function)
        .expect("function exists")
        .blocks
        .iter()
        .flat_map(|b| b.insts.iter())
        .filter_map(|inst| match inst {
            Inst::Call { callee, .. } => Some(callee.as_str()),
            _ => None,
        })
        .collect()
}

fn global_values(module: &Module) -> Vec<&str> {
    module.globals.iter().map(|g| g.value.as_str()).collect()
}

#[test]
fn while_loop_lowers_to_labeled_blocks() {
    let module = lower("int a = 1; while a less 10 { show a; int a = a + 1; };");
    let main = module.function("main").expect("main");

    let start = main.block("L1").expect("start label block");
    match &start.terminator {
        Some(Terminator::CondBr { if_false, .. }) => assert_eq!(if_false, "L2"),
        other => panic!("unexpected terminator {:?}", other),
    }
    assert!(main.block("L2").is_some());
    assert_eq!(
        main.entry().and_then(|b| b.terminator.clone()),
        Some(Terminator::Br { target: "L1".to_string() })
    );

    // Entry falls through and the loop body jumps back, both into the start block.
    let back_edges = main
        .blocks
        .iter()
        .filter(|b| b.terminator == Some(Terminator::Br { target: "L1".to_string() }))
        .count();
    assert_eq!(back_edges, 2);
}

#[test]
fn every_block_has_exactly_one_terminator() {
    let module = lower(
        "int a = 0; if a less 1 { show 'small'; } else { show 'big'; }; \
         while a less 3 { if a equal 1 { show a; }; int a = a + 1; };",
    );
    module.verify().expect("module verifies");
    for function in &module.functions {
        for block in &function.blocks {
            assert!(block.is_terminated(), "block {} is open", block.name);
            for target in block.terminator.iter().flat_map(|t| t.targets()) {
                assert!(function.block(target).is_some(), "missing target {}", target);
            }
        }
    }
}

#[test]
fn main_returns_zero() {
    let module = lower("show 1;");
    let main = module.function("main").expect("main");
    assert_eq!(main.ret, IrType::I32);
    assert_eq!(
        main.blocks.last().and_then(|b| b.terminator.clone()),
        Some(Terminator::Ret { value: showc_core::ir::Operand::Int(0) })
    );
}

#[test]
fn code_after_goto_opens_a_dead_block() {
    let instrs = vec![
        TacInstr::goto("L1".into()),
        TacInstr::show("1".into()),
        TacInstr::label("L1".into()),
    ];
    let module = lower_tac_to_ir(&instrs, &CompileOptions::default()).expect("lowering failed");
    let main = module.function("main").expect("main");
    let dead = main.block("dead_1").expect("dead block");
    assert_eq!(dead.terminator, Some(Terminator::Br { target: "L1".to_string() }));
    assert_eq!(main.entry().and_then(|b| b.terminator.clone()), Some(Terminator::Br { target: "L1".to_string() }));
}

#[test]
fn branch_to_missing_label_is_rejected() {
    let instrs = vec![TacInstr::goto("L9".into())];
    let err = lower_tac_to_ir(&instrs, &CompileOptions::default()).expect_err("expected lowering error");
    assert_eq!(err.kind, LoweringErrorKind::UndefinedLabel { function: "main".to_string(), label: "L9".to_string() });
}

#[test]
fn label_defined_twice_is_rejected() {
    let instrs = vec![TacInstr::label("L1".into()), TacInstr::label("L1".into())];
    let err = lower_tac_to_ir(&instrs, &CompileOptions::default()).expect_err("expected lowering error");
    assert_eq!(err.kind, LoweringErrorKind::DuplicateLabel { label: "L1".to_string() });
}

#[test]
fn terminated_block_refuses_more_work() {
    let mut block = Block::new("b");
    block.terminate(Terminator::Br { target: "c".to_string() }).expect("first terminator");
    let err = block.terminate(Terminator::Br { target: "d".to_string() }).expect_err("second terminator");
    assert_eq!(err.kind, LoweringErrorKind::DoubleTerminator { block: "b".to_string() });
    let err = block
        .push(Inst::Alloca { dest: "x".to_string(), ty: IrType::I32 })
        .expect_err("push after terminator");
    assert!(matches!(err.kind, LoweringErrorKind::BlockTerminated { .. }));
}

#[test]
fn show_selects_format_by_type() {
    let module = lower("show 1; show 2.5; show 'hi'; show true;");
    let globals = global_values(&module);
    for expected in ["%d\n", "%f\n", "%s\n", "hi", "true", "false"] {
        assert!(globals.contains(&expected), "missing global {:?}", expected);
    }
    assert_eq!(calls(&module, "main"), vec!["printf"; 4]);
}

#[test]
fn string_literals_are_interned_once() {
    let module = lower("show 'x'; show 'x';");
    assert_eq!(global_values(&module).iter().filter(|v| **v == "x").count(), 1);
}

#[test]
fn string_comparison_calls_strcmp() {
    let module = lower("string a = 'x'; boolean b = a equal 'y'; show b;");
    assert!(calls(&module, "main").contains(&"strcmp"));
}

#[test]
fn variables_are_allocated_in_the_entry_block() {
    let module = lower("int a = 1; while a less 3 { int b = a; int a = b + 1; };");
    let main = module.function("main").expect("main");
    let allocas: Vec<&str> = main
        .blocks
        .iter()
        .flat_map(|b| b.insts.iter().map(move |i| (b.name.as_str(), i)))
        .filter_map(|(block, inst)| match inst {
            Inst::Alloca { dest, .. } => Some((block, dest.as_str())),
            _ => None,
        })
        .map(|(block, dest)| {
            assert_eq!(block, "entry");
            dest
        })
        .collect();
    assert_eq!(allocas, vec!["var.a", "var.b"]);
}

#[test]
fn pause_option_calls_system() {
    let options = CompileOptions { pause_on_exit: true, ..CompileOptions::default() };
    let module = lower_tac_to_ir(&tac("show 1;"), &options).expect("lowering failed");
    assert_eq!(calls(&module, "main"), vec!["printf", "system"]);
    assert!(global_values(&module).contains(&"pause"));
}

#[test]
fn functions_are_lowered_separately() {
    let module = lower("func add(x, y) { int r = x + y; show r; }; add(1, 2);");
    let add = module.function("fn.add").expect("fn.add");
    assert_eq!(add.params, vec![("x".to_string(), IrType::I32), ("y".to_string(), IrType::I32)]);
    assert_eq!(calls(&module, "main"), vec!["fn.add"]);
    assert_eq!(calls(&module, "fn.add"), vec!["printf"]);
}

#[test]
fn untyped_params_take_the_first_call_types() {
    let module = lower("func add(x, y) { show x + y; }; add(1.5, 2.5);");
    let add = module.function("fn.add").expect("fn.add");
    assert_eq!(add.params, vec![("x".to_string(), IrType::Double), ("y".to_string(), IrType::Double)]);
}

#[test]
fn conflicting_specialization_is_rejected() {
    let err = lower_tac_to_ir(&tac("func f(x) { show x; }; f(1); f('s');"), &CompileOptions::default())
        .expect_err("expected lowering error");
    assert_eq!(
        err.kind,
        LoweringErrorKind::SignatureMismatch {
            function: "f".to_string(),
            expected: vec![IrType::I32],
            found: vec![IrType::I8Ptr],
        }
    );
}

#[test]
fn uncalled_untyped_function_is_not_lowered() {
    let module = lower("func f(x) { show x equal 'a'; }; func g(int n) { show n; }; show 1;");
    assert!(module.function("fn.f").is_none());
    assert!(module.function("fn.g").is_some());
}

#[test]
fn call_result_stays_in_a_register() {
    let module = lower("func f() { show 1; }; f();");
    let main = module.function("main").expect("main");
    let cells: Vec<&str> = main
        .blocks
        .iter()
        .flat_map(|b| b.insts.iter())
        .filter_map(|inst| match inst {
            Inst::Alloca { dest, .. } => Some(dest.as_str()),
            Inst::Store { ptr, .. } => Some(ptr.as_str()),
            _ => None,
        })
        .collect();
    assert!(cells.is_empty(), "unexpected memory cells {:?}", cells);
}

#[test]
fn int_argument_widens_into_double_param() {
    let module = lower("func f(double x) { show x; }; f(1);");
    let widened = module
        .function("main")
        .expect("main")
        .blocks
        .iter()
        .flat_map(|b| b.insts.iter())
        .any(|inst| matches!(inst, Inst::SiToFp { .. }));
    assert!(widened);
}

#[test]
fn redefined_function_gets_a_new_version() {
    let module = lower("func f() { show 1; }; f(); func f() { show 2; }; f();");
    assert!(module.function("fn.f").is_some());
    assert!(module.function("fn.f.2").is_some());
    assert_eq!(calls(&module, "main"), vec!["fn.f", "fn.f.2"]);
}

#[test]
fn module_text_has_declarations_and_entry_point() {
    let text = lower("show 1;").to_string();
    assert!(text.contains("declare i32 @printf(i8*, ...)"));
    assert!(text.contains("define i32 @main() {"));
    assert!(text.contains("ret i32 0"));
}
