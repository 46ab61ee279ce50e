mod ast;
mod config;
mod env;
mod error;
mod eval;
mod lexer;
mod object;
mod parser;
mod repl;
mod token;

use clap::Parser as ClapParser;
use env::Environment;
use eval::eval_program;
use parser::parse;
use std::path::PathBuf;
use std::process::ExitCode;

/// A small expression-oriented scripting language interpreter.
#[derive(ClapParser, Debug)]
#[command(name = "monkey")]
#[command(version = config::VERSION)]
#[command(about = "Lexer, Pratt parser, and tree-walking evaluator for a small expression language")]
struct CliArgs {
    /// Script file to execute (if omitted, starts the REPL)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let args = CliArgs::parse();

    match args.script {
        Some(path) => run_script(&path),
        None => match repl::run() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

/// Reads a script file, lexes/parses/evaluates it once against a fresh
/// environment, and prints either the accumulated parse errors or the
/// final value's display form.
fn run_script(path: &PathBuf) -> ExitCode {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Cannot read script file {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let (program, errors) = parse(&contents);
    if !errors.is_empty() {
        for err in errors {
            println!("\t{}", err);
        }
        return ExitCode::SUCCESS;
    }

    let env = Environment::new();
    let result = eval_program(&program, &env);
    println!("{}", result);
    ExitCode::SUCCESS
}
