//! Interactive REPL
//!
//! Keeps a single interpreter alive across lines, so declarations persist
//! between prompts.

use miette::{IntoDiagnostic, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::interp::{Interpreter, Value};

const PROMPT: &str = "plume> ";

/// Run the read-eval-print loop until `:quit` or EOF
pub fn run() -> Result<()> {
    println!("Plume REPL v{}", crate::VERSION);
    println!("Type :help for help, :quit to exit");
    println!();

    let mut editor = DefaultEditor::new().into_diagnostic()?;
    let mut interpreter = Interpreter::new();

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(trimmed);

                match trimmed {
                    ":quit" | ":q" => break,
                    ":help" | ":h" => {
                        println!("Commands:");
                        println!("  :help, :h    Show this help");
                        println!("  :quit, :q    Exit the REPL");
                        println!();
                    }
                    _ => eval_line(&mut interpreter, trimmed),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {err}");
                break;
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}

fn eval_line(interpreter: &mut Interpreter, line: &str) {
    // Allow bare expressions without a trailing semicolon at the prompt
    let source = if line.ends_with(';') || line.ends_with('}') {
        line.to_string()
    } else {
        format!("{line};")
    };

    let program = match crate::lexer::lex(&source)
        .and_then(|tokens| crate::parser::parse(&tokens, &source))
    {
        Ok(program) => program,
        Err(report) => {
            eprintln!("{report:?}");
            return;
        }
    };

    match interpreter.interpret(&program) {
        // `print` already echoed; suppress the null a bare statement yields
        Ok(Value::Null) => {}
        Ok(value) => println!("{value}"),
        Err(err) => eprintln!("{:?}", miette::Report::new(err)),
    }
}
