//! Plume CLI
//!
//! Main entry point for the `plume` command.

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "plume")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A featherweight JavaScript-style scripting language", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a Plume script
    Run {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Parse a Plume script without running it
    Check {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Show the parsed expression tree
        #[arg(long)]
        show_ast: bool,
    },

    /// Start the interactive REPL
    Repl,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Run { input } => run(&input),
        Commands::Check { input, show_ast } => check(&input, show_ast),
        Commands::Repl => plume::repl::run(),
    }
}

fn run(input: &std::path::Path) -> Result<()> {
    tracing::info!("Running {:?}", input);

    let source = read_source(input)?;
    let result = plume::interpret(&source)?;

    // Only print non-null results
    match result {
        plume::Value::Null => {}
        value => println!("{value}"),
    }
    Ok(())
}

fn check(input: &std::path::Path, show_ast: bool) -> Result<()> {
    tracing::info!("Checking {:?}", input);

    let source = read_source(input)?;
    let tokens = plume::lexer::lex(&source)?;
    tracing::debug!("Lexed {} tokens", tokens.len());

    let program = plume::parser::parse(&tokens, &source)?;

    if show_ast {
        let json = serde_json::to_string_pretty(&program).into_diagnostic()?;
        println!("{json}");
    } else {
        println!("Parse OK: {}", input.display());
    }
    Ok(())
}

fn read_source(input: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(input)
        .map_err(|e| miette::miette!("Failed to read input file: {}", e))
}
