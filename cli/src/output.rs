//! file: cli/src/output.rs
//! description: styled terminal output for the CLI.
//!
//! Diagnostics, TAC tables and token listings all go through
//! `OutputHandler`, which writes into any `Write` so tests can capture it.
//!
use std::io::{self, Write};

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use console::Style;

use showc_core::ir::tac::TacInstr;
use showc_core::{Level, Location, ShowcErrorExt, Token, generate_error_report};

/// Styles for different output elements.
pub struct FormatStyle {
    pub title: Style,
    pub info: Style,
    pub warning: Style,
    pub error: Style,
    pub critical: Style,
    pub success: Style,
}

impl Default for FormatStyle {
    fn default() -> Self {
        FormatStyle {
            title: Style::new().bold().underlined(),
            info: Style::new().cyan(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            critical: Style::new().white().on_red().bold(),
            success: Style::new().green().bold(),
        }
    }
}

pub struct OutputHandler<T: Write> {
    out: T,
    formatting: FormatStyle,
}

impl<T: Write> OutputHandler<T> {
    pub fn new(out: T) -> Self {
        OutputHandler { out, formatting: FormatStyle::default() }
    }

    /// Write one line, styled when `style` is given.
    pub fn line(&mut self, text: &str, style: Option<&Style>) -> io::Result<()> {
        match style {
            Some(s) => writeln!(self.out, "{}", s.apply_to(text)),
            None => writeln!(self.out, "{}", text),
        }
    }

    /// Write text as-is, e.g. program output collected from `show`.
    pub fn raw(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{}", text)?;
        self.out.flush()
    }

    pub fn title(&mut self, text: &str) -> io::Result<()> {
        let style = self.formatting.title.clone();
        self.line(text, Some(&style))
    }

    pub fn success(&mut self, text: &str) -> io::Result<()> {
        let style = self.formatting.success.clone();
        self.line(text, Some(&style))
    }

    pub fn diagnostic(&mut self, error: &dyn ShowcErrorExt) -> io::Result<()> {
        let style = match error.level() {
            Level::Info => self.formatting.info.clone(),
            Level::Warning => self.formatting.warning.clone(),
            Level::Error => self.formatting.error.clone(),
            Level::Critical => self.formatting.critical.clone(),
        };
        self.line(&generate_error_report(error), Some(&style))
    }

    pub fn tac_table(&mut self, instrs: &[TacInstr]) -> io::Result<()> {
        writeln!(self.out, "{}", render_tac_table(instrs))
    }

    pub fn token_table(&mut self, tokens: &[Token]) -> io::Result<()> {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["#", "kind", "lexeme", "at"]);
        for (i, token) in tokens.iter().enumerate() {
            table.add_row(vec![
                i.to_string(),
                format!("{:?}", token.kind),
                token.lexeme.clone(),
                token.location.to_string(),
            ]);
        }
        writeln!(self.out, "{}", table)
    }
}

/// TAC as a table: index, opcode, operands and the dump form.
pub fn render_tac_table(instrs: &[TacInstr]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "op", "arg1", "arg2", "result", "text"]);
    for (i, instr) in instrs.iter().enumerate() {
        table.add_row(vec![
            i.to_string(),
            instr.op.to_string(),
            instr.arg1().to_string(),
            instr.arg2().to_string(),
            instr.result().to_string(),
            instr.to_string(),
        ]);
    }
    table
}

/// A `--json` dump that could not be serialized.
#[derive(Debug)]
pub struct DumpError {
    pub stage: String,
    pub reason: String,
}

impl DumpError {
    pub fn boxed(stage: &str, err: serde_json::Error) -> Box<dyn ShowcErrorExt> {
        Box::new(DumpError { stage: stage.to_string(), reason: err.to_string() })
    }
}

impl ShowcErrorExt for DumpError {
    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        format!("cannot dump {} as JSON: {}", self.stage, self.reason)
    }

    fn issuer(&self) -> String {
        "showc.cli".to_string()
    }

    fn location(&self) -> Option<Location> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showc_core::ir::generate_tac;
    use showc_core::{parse_program, tokenize};

    #[test]
    fn tac_table_lists_every_instruction() {
        let tokens = tokenize("int a = 1; show a;").expect("tokenize");
        let ast = parse_program(&tokens).expect("parse");
        let tac = generate_tac(&ast, false);
        let rendered = render_tac_table(&tac).to_string();
        assert!(rendered.contains("a = 1"));
        assert!(rendered.contains("show a"));
    }

    #[test]
    fn diagnostic_contains_report_text() {
        let err = tokenize("int a = 1 @").expect_err("lexical error");
        let mut buf = Vec::new();
        OutputHandler::new(&mut buf).diagnostic(&err).expect("write");
        let text = String::from_utf8_lossy(&buf);
        assert!(text.contains("SHOWC | ERROR"));
    }

    #[test]
    fn dump_failure_is_reported_as_diagnostic() {
        let cause = serde_json::from_str::<serde_json::Value>("{").expect_err("truncated json");
        let err = DumpError::boxed("tac", cause);
        let mut buf = Vec::new();
        OutputHandler::new(&mut buf).diagnostic(err.as_ref()).expect("write");
        let text = String::from_utf8_lossy(&buf);
        assert!(text.contains("SHOWC | ERROR"));
        assert!(text.contains("cannot dump tac as JSON"));
    }
}
