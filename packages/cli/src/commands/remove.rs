use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::commands::{open_session, write_layout};
use crate::config::Config;

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Layout JSON file
    pub input: PathBuf,

    /// Path of the component to delete
    #[arg(short, long)]
    pub target: String,

    /// Write the result here instead of overwriting the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn remove(args: RemoveArgs, config: &Config) -> Result<()> {
    let mut session = open_session(&args.input, config)?;

    if !session.remove_component(&args.target).is_applied() {
        return Err(anyhow!("No component at {}", args.target));
    }

    write_layout(
        args.output.as_ref().unwrap_or(&args.input),
        &session.to_layout(),
        config,
    )?;

    println!("{} Removed {}", "✓".green(), args.target);
    println!(
        "   {} resources kept (unused entries are not pruned)",
        session.resources().len()
    );
    Ok(())
}
