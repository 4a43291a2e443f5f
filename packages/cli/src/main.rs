mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    add, init, inspect, preview, reconcile, remove, validate, AddArgs, InitArgs, InspectArgs,
    PreviewArgs, ReconcileArgs, RemoveArgs, ValidateArgs,
};
use config::Config;
use tracing::Level;

/// Exhibit CLI - work with exhibition HTML layouts
#[derive(Parser, Debug)]
#[command(name = "exhibit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Show debug logging and info-level diagnostics
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new HTML layout file
    Init(InitArgs),

    /// Print a layout's component tree
    Inspect(InspectArgs),

    /// Check layout files for markup and resource problems
    Validate(ValidateArgs),

    /// Add a component to a layout
    Add(AddArgs),

    /// Remove a component from a layout
    Remove(RemoveArgs),

    /// Complete a layout's resource list
    Reconcile(ReconcileArgs),

    /// Render a standalone preview document
    Preview(PreviewArgs),
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = Config::load(&cwd)?;
    let verbose = cli.verbose;

    match cli.command {
        Command::Init(args) => init(args, &config),
        Command::Inspect(args) => inspect(args, &config, verbose),
        Command::Validate(args) => validate(args, &config, verbose),
        Command::Add(args) => add(args, &config),
        Command::Remove(args) => remove(args, &config),
        Command::Reconcile(args) => reconcile(args, &config, verbose),
        Command::Preview(args) => preview(args, &config),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
