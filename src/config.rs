// ABOUTME: Configuration and constants for the interpreter CLI and REPL

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PROMPT: &str = "-> ";
pub const WELCOME_MESSAGE: &str = "Monkey-family expression interpreter";
pub const WELCOME_SUBTITLE: &str = "Type an expression and press Enter. Ctrl-D to exit.";
