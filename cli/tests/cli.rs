use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

fn script(dir: &TempDir, name: &str, source: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, source).expect("write script");
    path
}

fn showc() -> Command {
    Command::cargo_bin("showc").expect("binary exists")
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("run showc");
    assert!(output.status.success(), "showc failed: {}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn run_prints_shown_values() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = script(&dir, "loop.showc", "int a=1; while a less 4 { show a; int a = a + 1; };");
    let out = stdout_of(showc().arg("run").arg(&path));
    assert_eq!(out, "1\n2\n3\n");
}

#[test]
fn build_writes_ir_next_to_script() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = script(&dir, "sum.showc", "int a = 5; int b = 10; int c = a + b; show c;");
    let out = stdout_of(showc().arg("build").arg(&path));
    assert!(out.contains("built sum.showc"));

    let ir = fs::read_to_string(dir.path().join("sum.ll")).expect("IR written");
    assert!(ir.contains("; ModuleID = 'sum.showc'"));
    assert!(ir.contains("define i32 @main()"));
}

#[test]
fn build_honours_output_and_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = script(&dir, "p.showc", "show 1;");
    let config = script(&dir, "showc.json", r#"{"module_name": "configured", "pause_on_exit": true}"#);
    let target = dir.path().join("out.ll");
    stdout_of(showc().arg("build").arg(&path).arg("-o").arg(&target).arg("--config").arg(&config));

    let ir = fs::read_to_string(&target).expect("IR written");
    assert!(ir.contains("; ModuleID = 'configured'"));
    assert!(ir.contains("@system"));
}

#[test]
fn build_dumps_tac_as_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = script(&dir, "j.showc", "int a = 2; show a * 3;");
    let out = stdout_of(showc().args(["build", "-d", "tac", "--json"]).arg(&path));
    let json_end = out.rfind(']').expect("json array");
    let tac: serde_json::Value = serde_json::from_str(&out[..=json_end]).expect("valid JSON");
    assert_eq!(tac[1]["op"], "*");
    assert_eq!(tac[1]["result"], "t1");
    assert_eq!(tac[2]["op"], "show");
}

#[test]
fn build_dumps_ir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = script(&dir, "ir.showc", "if true { show 'yes'; };");
    let out = stdout_of(showc().args(["build", "--dump", "ir"]).arg(&path));
    assert!(out.contains("declare i32 @printf(i8*, ...)"));
    assert!(out.contains("L1:"));
}

#[test]
fn check_reports_ok() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = script(&dir, "ok.showc", "func add(x, y) { show x + y; }; add(1, 2);");
    let out = stdout_of(showc().arg("check").arg(&path));
    assert!(out.contains("ok.showc: ok"));
}

#[test]
fn type_error_fails_with_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = script(&dir, "bad.showc", "int a = 5; string c = a + 1;");
    let output = showc().arg("check").arg(&path).output().expect("run showc");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("SHOWC | ERROR"));
    assert!(stderr.contains("variable 'c' is declared as string"));
}

#[test]
fn build_rejects_divisor_folding_to_zero() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = script(&dir, "zero.showc", "int a = 5; int b = a / (1 - 1); show b;");
    let output = showc().arg("build").arg(&path).output().expect("run showc");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("SHOWC | ERROR"));
    assert!(stderr.contains("divisor is a constant zero"));
    assert!(!path.with_extension("ll").exists());
}

#[test]
fn runtime_error_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = script(&dir, "div.showc", "int z = 0; show 1 / z;");
    let output = showc().arg("run").arg(&path).output().expect("run showc");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("division by zero"));
}

#[test]
fn missing_file_fails() {
    showc().args(["run", "does-not-exist.showc"]).assert().failure();
}

#[test]
fn repl_reads_units_until_quit() {
    let out = stdout_of(
        showc()
            .arg("repl")
            .write_stdin("int a = 2;\nwhile a less 4 {\n show a;\n int a = a + 1;\n};\nshow 'x' + 1;\n:tac\n:quit\n"),
    );
    assert!(out.contains("2\n3\n"));
    assert!(out.contains("iffalse t1 goto L2"));
}

#[test]
fn build_dumps_ast_as_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = script(&dir, "a.showc", "int a = 1;");
    let out = stdout_of(showc().args(["build", "-d", "ast", "--json"]).arg(&path));
    assert!(out.contains("\"TypedDeclaration\""));
}
