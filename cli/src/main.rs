mod output;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use showc_core::error::ShowcErrorExt;
use showc_core::ir::tac::dump;
use showc_core::script::Script;
use showc_core::{CompileOptions, Session, tokenize};

use output::{DumpError, OutputHandler};

fn main() -> ExitCode {
    let cli = Command::new("showc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compiler and interpreter for the show language")
        .arg(
            Arg::new("verbose")
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true),
        );

    let cli = setup_cli(cli);
    let matches = cli.get_matches();
    init_logging(matches.get_count("verbose"));
    dispatch_commands(&matches)
}

/// Sets up the CLI with subcommands and arguments.
fn setup_cli(cli: Command) -> Command {
    let file_arg = |help: &'static str| Arg::new("file").help(help).required(true).index(1);
    let config_arg = Arg::new("config")
        .help("JSON file with compile options")
        .long("config")
        .value_parser(clap::value_parser!(PathBuf))
        .value_name("FILE");

    cli.subcommand(
        Command::new("build")
            .about("Compile a script to low-level IR")
            .arg(file_arg("The script file to build"))
            .arg(
                Arg::new("output")
                    .help("Where to write the IR (defaults to the script path with .ll)")
                    .short('o')
                    .long("output")
                    .value_parser(clap::value_parser!(PathBuf))
                    .value_name("FILE"),
            )
            .arg(
                Arg::new("dump")
                    .help("Print an intermediate stage")
                    .short('d')
                    .long("dump")
                    .value_parser(["tokens", "ast", "tac", "ir"])
                    .value_name("STAGE"),
            )
            .arg(Arg::new("json").help("Dump the AST or TAC as JSON").long("json").action(ArgAction::SetTrue))
            .arg(
                Arg::new("no-opt")
                    .help("Skip dead-temporary elimination")
                    .long("no-opt")
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("pause")
                    .help("Call system(\"pause\") before main returns")
                    .long("pause")
                    .action(ArgAction::SetTrue),
            )
            .arg(config_arg.clone()),
    )
    .subcommand(
        Command::new("run")
            .about("Interpret a script file")
            .arg(file_arg("The script file to run")),
    )
    .subcommand(
        Command::new("check")
            .about("Parse and type-check a script file")
            .arg(file_arg("The script file to check")),
    )
    .subcommand(
        Command::new("repl")
            .about("Read statements interactively (default)")
            .arg(config_arg),
    )
}

fn init_logging(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

/// Dispatches the command based on the parsed arguments.
fn dispatch_commands(matches: &ArgMatches) -> ExitCode {
    let mut out = OutputHandler::new(io::stdout());
    let result = match matches.subcommand() {
        Some(("build", sub_m)) => build(sub_m, &mut out),
        Some(("run", sub_m)) => run(sub_m, &mut out),
        Some(("check", sub_m)) => check(sub_m, &mut out),
        Some(("repl", sub_m)) => repl(sub_m, &mut out),
        _ => repl(matches, &mut out),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let mut err_out = OutputHandler::new(io::stderr());
            err_out.diagnostic(err.as_ref()).ok();
            ExitCode::FAILURE
        }
    }
}

type CliResult = Result<(), Box<dyn ShowcErrorExt>>;

/// Options from `--config` (if any) with command-line flags applied on top.
fn load_options(sub_m: &ArgMatches) -> Result<CompileOptions, Box<dyn ShowcErrorExt>> {
    let config = sub_m.try_get_one::<PathBuf>("config").ok().flatten();
    let mut options = match config {
        Some(path) => CompileOptions::load(path).map_err(|e| Box::new(e) as Box<dyn ShowcErrorExt>)?,
        None => CompileOptions::default(),
    };
    if sub_m.try_get_one::<bool>("no-opt").ok().flatten().copied().unwrap_or(false) {
        options.optimize = false;
    }
    if sub_m.try_get_one::<bool>("pause").ok().flatten().copied().unwrap_or(false) {
        options.pause_on_exit = true;
    }
    Ok(options)
}

fn load_script(sub_m: &ArgMatches) -> Result<Script, Box<dyn ShowcErrorExt>> {
    let file = sub_m.get_one::<String>("file").cloned().unwrap_or_default();
    Script::new(PathBuf::from(file))
}

fn io_error(path: &Path, err: io::Error) -> Box<dyn ShowcErrorExt> {
    Box::new(showc_core::script::MissingScriptError { path: path.to_path_buf(), reason: err.to_string() })
}

fn build<T: Write>(sub_m: &ArgMatches, out: &mut OutputHandler<T>) -> CliResult {
    let script = load_script(sub_m)?;
    let mut options = load_options(sub_m)?;
    if sub_m.get_one::<PathBuf>("config").is_none() {
        options.module_name = script.name.clone();
    }

    let mut session = Session::new(options);
    let unit = session.translate_unit(&script.content)?;
    let module = session.lower().map_err(|e| Box::new(e) as Box<dyn ShowcErrorExt>)?;

    if let Some(stage) = sub_m.get_one::<String>("dump") {
        let written = match stage.as_str() {
            "tokens" => {
                let tokens = tokenize(&script.content).map_err(|e| Box::new(e) as Box<dyn ShowcErrorExt>)?;
                out.token_table(&tokens)
            }
            "ast" if sub_m.get_flag("json") => {
                let json = serde_json::to_string_pretty(&unit.ast).map_err(|e| DumpError::boxed("ast", e))?;
                out.line(&json, None)
            }
            "ast" => out.raw(&unit.ast.to_string()),
            "tac" if sub_m.get_flag("json") => {
                let json = serde_json::to_string_pretty(&unit.tac).map_err(|e| DumpError::boxed("tac", e))?;
                out.line(&json, None)
            }
            "tac" => out.tac_table(&unit.tac),
            _ => out.raw(&module.to_string()),
        };
        written.map_err(|e| io_error(&script.path, e))?;
    }

    let target = sub_m
        .get_one::<PathBuf>("output")
        .cloned()
        .unwrap_or_else(|| script.path.with_extension("ll"));
    std::fs::write(&target, module.to_string()).map_err(|e| io_error(&target, e))?;
    log::info!("wrote {}", target.display());
    out.success(&format!("built {} -> {}", script.name, target.display()))
        .map_err(|e| io_error(&target, e))
}

fn run<T: Write>(sub_m: &ArgMatches, out: &mut OutputHandler<T>) -> CliResult {
    let script = load_script(sub_m)?;
    let mut session = Session::new(CompileOptions::default());
    let unit = session.compile_unit(&script.content)?;
    out.raw(&unit.shown).map_err(|e| io_error(&script.path, e))
}

fn check<T: Write>(sub_m: &ArgMatches, out: &mut OutputHandler<T>) -> CliResult {
    let script = load_script(sub_m)?;
    let mut session = Session::new(CompileOptions::default());
    session.check_unit(&script.content)?;
    out.success(&format!("{}: ok", script.name)).map_err(|e| io_error(&script.path, e))
}

/// Braces balanced and the text ends in `;`: a unit is ready to compile.
fn unit_complete(buffer: &str) -> bool {
    let open = buffer.matches('{').count();
    let close = buffer.matches('}').count();
    open <= close && buffer.trim_end().ends_with(';')
}

fn repl<T: Write>(sub_m: &ArgMatches, out: &mut OutputHandler<T>) -> CliResult {
    let options = load_options(sub_m)?;
    let mut session = Session::new(options);
    let stdin = io::stdin();
    let mut buffer = String::new();
    let console_err = |e: io::Error| io_error(Path::new("<stdin>"), e);

    out.title("showc repl  (:tac, :ir, :quit)").map_err(console_err)?;
    for line in stdin.lock().lines() {
        let line = line.map_err(console_err)?;
        match line.trim() {
            ":quit" | ":q" => break,
            ":tac" => {
                out.raw(&dump(session.program())).map_err(console_err)?;
                continue;
            }
            ":ir" => {
                match session.lower() {
                    Ok(module) => out.raw(&module.to_string()).map_err(console_err)?,
                    Err(err) => out.diagnostic(&err).map_err(console_err)?,
                }
                continue;
            }
            _ => {}
        }

        buffer.push_str(&line);
        buffer.push('\n');
        if !unit_complete(&buffer) {
            continue;
        }

        match session.compile_unit(&buffer) {
            Ok(unit) => out.raw(&unit.shown).map_err(console_err)?,
            // The session is untouched by a failed unit; report and go on.
            Err(err) => out.diagnostic(err.as_ref()).map_err(console_err)?,
        }
        buffer.clear();
    }
    Ok(())
}
