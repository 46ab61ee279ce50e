// ABOUTME: Interactive read-eval-print loop backed by rustyline

use crate::config::{PROMPT, WELCOME_MESSAGE, WELCOME_SUBTITLE};
use crate::env::Environment;
use crate::eval::eval_program;
use crate::parser::parse;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::rc::Rc;

const HISTORY_FILE: &str = ".monkey_history";

/// Runs the REPL against a persistent environment spanning the session.
/// Parse errors are printed tab-prefixed per expression; otherwise the
/// evaluated value's display form is printed followed by a newline.
pub fn run() -> rustyline::Result<()> {
    let env = Environment::new();

    let mut editor = DefaultEditor::new()?;
    let _ = editor.load_history(HISTORY_FILE);

    println!("{}", WELCOME_MESSAGE);
    println!("{}", WELCOME_SUBTITLE);

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());
                eval_line(&line, &env);
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    let _ = editor.save_history(HISTORY_FILE);
    Ok(())
}

fn eval_line(line: &str, env: &Rc<Environment>) {
    let (program, errors) = parse(line);
    if !errors.is_empty() {
        for err in errors {
            println!("\t{}", err);
        }
        return;
    }

    let result = eval_program(&program, env);
    println!("{}", result);
}
