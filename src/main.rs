use clap::Parser;
use lisp_core_sandbox::completion::SymbolCompleter;
use lisp_core_sandbox::config::{self, HELP_TEXT, HISTORY_FILE, PRELUDE_FILE, WELCOME_MESSAGE, WELCOME_SUBTITLE};
use lisp_core_sandbox::eval::Interpreter;
use lisp_core_sandbox::gc;
use lisp_core_sandbox::parser::{is_blank, lower, read_one};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};
use std::cell::RefCell;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

/// A small Scheme-flavored Lisp interpreter with TCO, macros, and a
/// mark-and-sweep collector.
#[derive(Parser, Debug)]
#[command(name = "lisp-core-sandbox")]
#[command(version = config::VERSION)]
#[command(about = "An interactive Lisp interpreter")]
struct CliArgs {
    /// Script file to execute. If omitted, starts the REPL.
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,

    /// Skip loading library.lisp from the working directory.
    #[arg(long = "no-prelude")]
    no_prelude: bool,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let mut interp = Interpreter::new();

    if !args.no_prelude {
        if let Ok(prelude) = std::fs::read_to_string(PRELUDE_FILE) {
            if let Err(e) = load_reporting_errors(&mut interp, &prelude) {
                eprintln!("{}: {e}", e.label());
            }
        }
    }

    if let Some(script_path) = args.script {
        match std::fs::read_to_string(&script_path) {
            Ok(source) => match run_all(&mut interp, &source) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("{}: {e}", e.label());
                    ExitCode::FAILURE
                }
            },
            Err(e) => {
                eprintln!("Cannot read script file {}: {e}", script_path.display());
                ExitCode::FAILURE
            }
        }
    } else {
        run_repl(&mut interp)
    }
}

/// Runs every top-level form in `source`, stopping at the first error
/// (script mode: one bad form aborts the whole run).
fn run_all(interp: &mut Interpreter, source: &str) -> Result<(), lisp_core_sandbox::error::LispError> {
    let mut remaining = source;
    while !is_blank(remaining) {
        let (expr, rest) = read_one(remaining)?;
        let atom = lower(&expr, &mut interp.heap, &mut interp.symbols);
        interp.eval(atom, interp.global_env)?;
        remaining = rest;
    }
    Ok(())
}

/// Runs every top-level form in `source`, printing (but not aborting
/// on) each individual error — used for the prelude, where one broken
/// definition shouldn't take down the rest of the library.
fn load_reporting_errors(
    interp: &mut Interpreter,
    source: &str,
) -> Result<(), lisp_core_sandbox::error::LispError> {
    let mut remaining = source;
    while !is_blank(remaining) {
        let (expr, rest) = read_one(remaining)?;
        let atom = lower(&expr, &mut interp.heap, &mut interp.symbols);
        if let Err(e) = interp.eval(atom, interp.global_env) {
            eprintln!("{}: {e}", e.label());
        }
        remaining = rest;
    }
    Ok(())
}

fn run_repl(interp: &mut Interpreter) -> ExitCode {
    let names = Rc::new(RefCell::new(interp.global_binding_names()));
    let config = Config::builder().auto_add_history(true).build();
    let mut rl: Editor<SymbolCompleter, DefaultHistory> = match Editor::with_config(config) {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to initialize REPL: {e}");
            return ExitCode::FAILURE;
        }
    };
    rl.set_helper(Some(SymbolCompleter::new(Rc::clone(&names))));
    let _ = rl.load_history(HISTORY_FILE);

    println!("{WELCOME_MESSAGE}");
    println!("{WELCOME_SUBTITLE}");

    let exit_code = loop {
        let readline = rl.readline("lisp> ");
        match readline {
            Ok(line) => {
                if line.trim() == ":q" {
                    break ExitCode::SUCCESS;
                }
                if line.trim() == ":help" {
                    println!("{HELP_TEXT}");
                    continue;
                }
                if is_blank(&line) {
                    continue;
                }
                match read_one(&line) {
                    Ok((expr, _rest)) => {
                        let atom = lower(&expr, &mut interp.heap, &mut interp.symbols);
                        match interp.eval(atom, interp.global_env) {
                            Ok(result) => println!("=> {}", interp.print(result)),
                            Err(e) => eprintln!("{}: {e}", e.label()),
                        }
                        gc::collect(&mut interp.heap, &[interp.global_env]);
                        *names.borrow_mut() = interp.global_binding_names();
                    }
                    Err(e) => eprintln!("{}: {e}", e.label()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e}");
                break ExitCode::FAILURE;
            }
        }
    };

    let _ = rl.save_history(HISTORY_FILE);
    exit_code
}
