use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use rustyline::{error::ReadlineError, Editor};
use structopt::StructOpt;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dlast::{
    parse_translation_unit, print, DebugReport, ErrorReport, Program, SymbolTable,
    TranslationUnit,
};

#[derive(Debug, StructOpt)]
#[structopt(name = "dlast", about = "Parse Datalog programs and print them in canonical form")]
struct Opt {
    /// Program to format; starts an interactive session when omitted
    #[structopt(parse(from_os_str))]
    input: Option<PathBuf>,

    /// Only report diagnostics, do not print the program
    #[structopt(long)]
    check: bool,

    /// Suppress warnings
    #[structopt(long = "no-warn")]
    no_warn: bool,

    /// Print the debug report after parsing
    #[structopt(long = "debug-report")]
    debug_report: bool,

    /// Raise log verbosity (-v, -vv, -vvv)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,
}

impl Opt {
    fn parse_unit(&self, code: &str, symbols: SymbolTable) -> TranslationUnit {
        let debug_report = if self.debug_report {
            DebugReport::enabled()
        } else {
            DebugReport::new()
        };
        parse_translation_unit(code, symbols, ErrorReport::new(self.no_warn), debug_report)
    }
}

fn init_subscriber(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_ansi(false),
        )
        .with(filter)
        .try_init()
        .ok();
}

fn format_file(opt: &Opt, path: &Path) -> Result<()> {
    let code = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    info!(path = %path.display(), bytes = code.len(), "read_input");

    let unit = opt.parse_unit(&code, SymbolTable::new());
    eprint!("{}", unit.errors());
    if opt.debug_report {
        eprintln!("{}", unit.debug_report());
    }

    let num_errors = unit.errors().num_errors();
    if num_errors > 0 {
        bail!("{} error(s) in {}", num_errors, path.display());
    }
    if !opt.check {
        print!("{}", print(unit.program()));
    }
    Ok(())
}

/// Merges the statements of `unit` into the session program. Declarations
/// the session already has are reported to the unit's error report.
fn merge(session: &mut Program, unit: &mut TranslationUnit) {
    for relation in unit.program().relations().to_vec() {
        if let Err(e) = session.append_relation(relation) {
            unit.errors_mut().add_error(e.to_string(), None);
        }
    }
    for clause in unit.program().clauses() {
        session.append_clause(clause.clone());
    }
}

fn handle_input(opt: &Opt, symbols: &SymbolTable, session: &mut Program, line: &str) {
    match line.trim() {
        ".print" => print!("{}", print(session)),
        ".clear" => *session = Program::new(),
        code => {
            let mut unit = opt.parse_unit(code, symbols.clone());
            merge(session, &mut unit);
            unit.debug_report_mut().add_section("session", "Session program", print(session));

            print!("{}", unit.errors());
            if !unit.debug_report().is_empty() {
                println!("{}", unit.debug_report());
            }
        }
    }
}

fn repl(opt: &Opt) -> Result<()> {
    let mut editor = Editor::<()>::new();
    // One table for the whole session so that merged clauses resolve alike.
    let symbols = SymbolTable::new();
    let mut session = Program::new();

    loop {
        let readline = editor.readline("> ");
        match readline {
            Ok(line) => {
                editor.add_history_entry(line.as_str());
                handle_input(opt, &symbols, &mut session, &line);
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {}", err);
                break;
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let opt = Opt::from_args();
    init_subscriber(opt.verbose);

    match &opt.input {
        Some(path) => format_file(&opt, path),
        None => repl(&opt),
    }
}
