use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::commands::{open_session, print_diagnostics, read_layout, write_layout};
use crate::config::Config;

#[derive(Args, Debug)]
pub struct ReconcileArgs {
    /// Layout JSON file
    pub input: PathBuf,

    /// Write the result here instead of overwriting the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report what would change without writing
    #[arg(long)]
    pub dry_run: bool,
}

pub fn reconcile(args: ReconcileArgs, config: &Config, verbose: bool) -> Result<()> {
    let stored = read_layout(&args.input)?.default_resources.len();
    // Opening a session completes and reconciles the resource list
    let session = open_session(&args.input, config)?;
    let added = session.resources().len().saturating_sub(stored);

    print_diagnostics(session.diagnostics(), verbose);

    if args.dry_run {
        println!("{} {} resource(s) would be added", "•".blue(), added);
        return Ok(());
    }

    write_layout(
        args.output.as_ref().unwrap_or(&args.input),
        &session.to_layout(),
        config,
    )?;
    println!(
        "{} Reconciled {} ({} added, {} total)",
        "✓".green(),
        args.input.display(),
        added,
        session.resources().len()
    );
    Ok(())
}
