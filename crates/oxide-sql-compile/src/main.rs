//! oxide-sql-compile CLI
//!
//! Compiles a JSON clause tree into ClickHouse SQL.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use oxide_sql_compile::{compile, read_input, render, StatementKind};

/// ClickHouse SQL fragment compiler.
#[derive(Parser)]
#[command(name = "oxide-sql-compile")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON clause tree to compile (stdin if not specified).
    #[arg(short, long, env = "OXIDE_SQL_INPUT")]
    input: Option<PathBuf>,

    /// Fail when an undefined value reached the statement.
    #[arg(long)]
    strict: bool,

    /// Print the SQL with values inlined instead of JSON.
    #[arg(long)]
    inline: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a SELECT statement.
    Select,

    /// Compile an UPDATE statement.
    Update,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let kind = match cli.command {
        Commands::Select => StatementKind::Select,
        Commands::Update => StatementKind::Update,
    };

    let json = read_input(cli.input.as_deref())?;
    let compiled = compile(&json, kind, cli.strict)?;
    println!("{}", render(&compiled, cli.inline)?);

    Ok(())
}
