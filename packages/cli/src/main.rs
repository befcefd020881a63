mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    check, config, format, parse, replay, CheckArgs, ConfigArgs, FormatArgs, ParseArgs, ReplayArgs,
};

/// polyedit - POLYGON text codec and edit-session replay
#[derive(Parser, Debug)]
#[command(name = "polyedit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode polygon text and print the rings as JSON
    Parse(ParseArgs),

    /// Print polygon text in canonical form
    Format(FormatArgs),

    /// Report why polygon text would be rejected
    Check(CheckArgs),

    /// Drive an edit session from a JSON event script
    Replay(ReplayArgs),

    /// Show or create the editor config
    Config(ConfigArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(e) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Parse(args) => parse(args),
        Command::Format(args) => format(args),
        Command::Check(args) => check(args),
        Command::Replay(args) => replay(args, &cwd),
        Command::Config(args) => config(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
